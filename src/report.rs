use std::io::{self, Write};
use crate::analysis::{CalibrationReport, PolarReport, RunoutReport, Spectrum};
/// Line-oriented writer for gnuplot-style datasets.
///
/// Two whitespace-separated numbers per line, `#` comments, datasets split by
/// two blank lines so they can be addressed with `index`.
pub struct PlotWriter<W: Write> {
    out: W,
}
impl<W: Write> PlotWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
    pub fn into_inner(self) -> W {
        self.out
    }
    pub fn comment(&mut self, text: &str) -> io::Result<()> {
        for line in text.lines() {
            writeln!(self.out, "# {line}")?;
        }
        if text.is_empty() {
            writeln!(self.out, "#")?;
        }
        Ok(())
    }
    pub fn points(&mut self, points: impl IntoIterator<Item = (f64, f64)>) -> io::Result<()> {
        for (x, y) in points {
            writeln!(self.out, "{x} {y}")?;
        }
        Ok(())
    }
    pub fn separator(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out)
    }
    pub fn spectrum(&mut self, spectrum: &Spectrum) -> io::Result<()> {
        self.points(spectrum.half_points())
    }
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
/// Header comments, polar dataset, separator, spectrum dataset.
pub fn write_runout<W: Write>(
    writer: &mut PlotWriter<W>,
    report: &RunoutReport,
    note: &str,
) -> io::Result<()> {
    writer.comment(
        "for polar: set polar, set size square, plot '<file>' index 0; for the spectrum: unset polar, plot '<file>' index 1",
    )?;
    writer.comment(note)?;
    writer.comment(&format!(
        "duration for {} samples = {}",
        report.interval_count, report.duration_ns
    ))?;
    writer.comment(&format!("rpm = {}", report.rpm))?;
    writer.comment(&format!("av  = {}", report.mean_interval_ns))?;
    writer.comment(&format!("baseline = {}", report.baseline_rpm))?;
    writer.comment(&format!("gain = {}", report.gain))?;
    writer.comment(&format!(
        "segments = {}, bin = {} Hz",
        report.spectrum.segments, report.spectrum.bin_hz
    ))?;
    writer.points(report.polar_points())?;
    writer.separator()?;
    writer.spectrum(&report.spectrum)?;
    writer.flush()
}
pub fn write_calibration<W: Write>(
    writer: &mut PlotWriter<W>,
    report: &CalibrationReport,
    label: &str,
) -> io::Result<()> {
    writer.comment(&format!("rpm for this phase {}", report.rpm))?;
    writer.comment(&format!(
        "id {label} (note values are nanoseconds per 1/{}th of a rev)",
        report.profile.len()
    ))?;
    writer.points(report.profile.polar_points())?;
    writer.separator()?;
    writer.flush()
}
pub fn write_polar<W: Write>(writer: &mut PlotWriter<W>, report: &PolarReport) -> io::Result<()> {
    writer.comment(&format!("rpm = {}", report.rpm))?;
    let step = report.angle_increment;
    writer.points(
        report
            .values
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64 * step, v)),
    )?;
    writer.flush()
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AveragedSpectrum;
    fn render(f: impl FnOnce(&mut PlotWriter<Vec<u8>>) -> io::Result<()>) -> String {
        let mut writer = PlotWriter::new(Vec::new());
        f(&mut writer).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }
    #[test]
    fn datasets_have_two_numeric_fields() {
        let text = render(|w| {
            w.comment("header")?;
            w.points([(0.0, 600.0), (0.5, 601.5)])?;
            w.separator()?;
            let spectrum = AveragedSpectrum {
                magnitudes: vec![1.0, 2.0, 3.0, 4.0],
                segments: 1,
            }
            .with_bin_spacing(10.0);
            w.spectrum(&spectrum)
        });
        assert_eq!(text, "# header\n0 600\n0.5 601.5\n\n\n0 1\n10 2\n");
        for line in text.lines().filter(|l| !l.is_empty() && !l.starts_with('#')) {
            let fields: Vec<f64> = line
                .split_whitespace()
                .map(|f| f.parse().unwrap())
                .collect();
            assert_eq!(fields.len(), 2);
        }
    }
    #[test]
    fn multi_line_comment_prefixes_each_line() {
        let text = render(|w| w.comment("a\nb"));
        assert_eq!(text, "# a\n# b\n");
        assert_eq!(render(|w| w.comment("")), "#\n");
    }
}
