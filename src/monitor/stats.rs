use std::fmt;
/// Running extrema of the readings reported by one monitor loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LiveStats {
    pub min: f64,
    pub max: f64,
    pub count: usize,
}
impl Default for LiveStats {
    fn default() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            count: 0,
        }
    }
}
impl LiveStats {
    pub fn record(&mut self, rpm: f64) {
        self.min = self.min.min(rpm);
        self.max = self.max.max(rpm);
        self.count += 1;
    }
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
impl fmt::Display for LiveStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "no readings")
        } else {
            write!(f, "max = {}, min = {}", self.max, self.min)
        }
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn tracks_extrema() {
        let mut stats = LiveStats::default();
        assert_eq!(stats.to_string(), "no readings");
        for rpm in [600.0, 598.5, 603.25, 601.0] {
            stats.record(rpm);
        }
        assert_eq!(stats.min, 598.5);
        assert_eq!(stats.max, 603.25);
        assert_eq!(stats.count, 4);
        assert_eq!(stats.to_string(), "max = 603.25, min = 598.5");
    }
}
