//! Geometry and color bands for the radial risk gauge.

use ratatui::style::Color;

/// Colored band on the gauge arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskBand {
    Green,
    Yellow,
    Orange,
    Red,
}

impl RiskBand {
    pub const ALL: [RiskBand; 4] = [Self::Green, Self::Yellow, Self::Orange, Self::Red];

    /// Band containing a score: [0,25) green, [25,50) yellow, [50,75) orange,
    /// [75,100] red.
    pub fn for_score(score: u8) -> Self {
        match score {
            0..=24 => Self::Green,
            25..=49 => Self::Yellow,
            50..=74 => Self::Orange,
            _ => Self::Red,
        }
    }

    /// Score range covered by the band, end exclusive except for red.
    pub const fn range(&self) -> (u8, u8) {
        match self {
            Self::Green => (0, 25),
            Self::Yellow => (25, 50),
            Self::Orange => (50, 75),
            Self::Red => (75, 100),
        }
    }

    pub const fn color(&self) -> Color {
        match self {
            Self::Green => Color::Rgb(0x2e, 0xcc, 0x71),
            Self::Yellow => Color::Rgb(0xf1, 0xc4, 0x0f),
            Self::Orange => Color::Rgb(0xe6, 0x7e, 0x22),
            Self::Red => Color::Rgb(0xe7, 0x4c, 0x3c),
        }
    }
}

/// Everything needed to draw the gauge for one score.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeSpec {
    pub value: u8,
    /// Position of the threshold marker, always the computed score.
    pub threshold: u8,
    pub bands: [RiskBand; 4],
}

impl GaugeSpec {
    pub fn new(score: u8) -> Self {
        let value = score.min(100);
        Self {
            value,
            threshold: value,
            bands: RiskBand::ALL,
        }
    }

    /// Marker position along the arc, 0.0 at the left end and 1.0 at the right.
    pub fn fraction(&self) -> f64 {
        f64::from(self.threshold) / 100.0
    }

    /// Marker angle in radians, π at 0% sweeping to 0 at 100%.
    pub fn marker_angle(&self) -> f64 {
        std::f64::consts::PI * (1.0 - self.fraction())
    }

    /// Centered label, e.g. `75%`.
    pub fn label(&self) -> String {
        format!("{}%", self.value)
    }

    pub fn band(&self) -> RiskBand {
        RiskBand::for_score(self.value)
    }

    /// Points along the arc of radius `r` for one band, `steps` samples per band.
    pub fn band_arc(band: RiskBand, r: f64, steps: usize) -> Vec<(f64, f64)> {
        let (start, end) = band.range();
        let (start, end) = (f64::from(start), f64::from(end));
        (0..=steps)
            .map(|i| {
                let pct = start + (end - start) * i as f64 / steps.max(1) as f64;
                let angle = std::f64::consts::PI * (1.0 - pct / 100.0);
                (r * angle.cos(), r * angle.sin())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(RiskBand::for_score(0), RiskBand::Green);
        assert_eq!(RiskBand::for_score(24), RiskBand::Green);
        assert_eq!(RiskBand::for_score(25), RiskBand::Yellow);
        assert_eq!(RiskBand::for_score(50), RiskBand::Orange);
        assert_eq!(RiskBand::for_score(75), RiskBand::Red);
        assert_eq!(RiskBand::for_score(100), RiskBand::Red);
    }

    #[test]
    fn test_threshold_marker_tracks_score() {
        let gauge = GaugeSpec::new(75);
        assert_eq!(gauge.threshold, 75);
        assert_eq!(gauge.fraction(), 0.75);
        assert_eq!(gauge.label(), "75%");
    }

    #[test]
    fn test_marker_angle_endpoints() {
        assert!((GaugeSpec::new(0).marker_angle() - std::f64::consts::PI).abs() < 1e-12);
        assert!(GaugeSpec::new(100).marker_angle().abs() < 1e-12);
    }

    #[test]
    fn test_band_arc_stays_on_radius() {
        for (x, y) in GaugeSpec::band_arc(RiskBand::Orange, 2.0, 8) {
            assert!(((x * x + y * y).sqrt() - 2.0).abs() < 1e-9);
            assert!(y >= 0.0);
        }
    }
}
