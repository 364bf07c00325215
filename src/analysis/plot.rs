use std::io::Cursor;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::prelude::LineSeries;
use plotters::prelude::*;
use crate::analysis::error::RunoutError;
use crate::analysis::spectrum::Spectrum;
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub trace: RGBColor,
    pub reference: RGBColor,
}
impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            background: RGBColor(10, 10, 10),
            trace: CYAN,
            reference: RGBColor(90, 90, 90),
        }
    }
}
/// Polar trace of `(angle, radius)` points with the baseline circle behind it.
pub fn render_polar_png(
    points: &[(f64, f64)],
    baseline: f64,
    style: PlotStyle,
) -> Result<Vec<u8>, RunoutError> {
    let finite: Vec<(f64, f64)> = points
        .iter()
        .copied()
        .filter(|(a, r)| a.is_finite() && r.is_finite())
        .collect();
    if finite.is_empty() {
        return Err(RunoutError::Plot("polar trace has no finite points".into()));
    }
    let extent = finite
        .iter()
        .map(|(_, r)| r.abs())
        .fold(baseline.abs(), f64::max)
        .max(1e-9)
        * 1.05;
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .build_cartesian_2d(-extent..extent, -extent..extent)?;
        let circle = (0..=360).map(|d| {
            let a = (d as f64).to_radians();
            (baseline * a.cos(), baseline * a.sin())
        });
        chart.draw_series(LineSeries::new(circle, &style.reference))?;
        let trace = finite.iter().map(|&(a, r)| (r * a.cos(), r * a.sin()));
        chart.draw_series(LineSeries::new(trace, &style.trace))?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
/// Magnitude against frequency over the reported half of the spectrum.
pub fn render_spectrum_png(spectrum: &Spectrum, style: PlotStyle) -> Result<Vec<u8>, RunoutError> {
    let points: Vec<(f64, f64)> = spectrum.half_points().collect();
    if points.is_empty() {
        return Err(RunoutError::Plot("spectrum has no magnitudes".into()));
    }
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let mut chart = ChartBuilder::on(&root).margin(10).build_cartesian_2d(
            0f64..points.last().map(|p| p.0).unwrap_or(0.0).max(1e-9),
            0f64..points
                .iter()
                .map(|p| p.1)
                .fold(0.0f64, f64::max)
                .max(1e-9),
        )?;
        chart.draw_series(LineSeries::new(points, &style.trace))?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, RunoutError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| RunoutError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
