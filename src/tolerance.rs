use crate::errors::{CheckError, Result};
use crate::percent::Percent;
use serde::{Deserialize, Serialize};

/// Inclusive window around an expected value: a measurement passes when
/// `|measured - expected| <= tolerance`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tolerance {
    pub expected: f64,
    pub tolerance: f64,
}

impl Tolerance {
    pub fn new(expected: f64, tolerance: f64) -> Self {
        Self {
            expected,
            tolerance,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        (value - self.expected).abs() <= self.tolerance
    }

    pub fn min(&self) -> f64 {
        self.expected - self.tolerance
    }

    pub fn max(&self) -> f64 {
        self.expected + self.tolerance
    }

    pub fn check(&self, measured: &Percent) -> Result<()> {
        if self.contains(measured.value) {
            Ok(())
        } else {
            Err(CheckError::OutsideTolerance {
                measured: measured.value,
                expected: self.expected,
                tolerance: self.tolerance,
                source_text: measured.source.clone(),
            })
        }
    }
}

/// Inclusive band a measurement must NOT fall into.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ExclusionBand {
    pub min: f64,
    pub max: f64,
}

impl ExclusionBand {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn check_outside(&self, measured: &Percent) -> Result<()> {
        if self.contains(measured.value) {
            Err(CheckError::InsideExclusion {
                measured: measured.value,
                min: self.min,
                max: self.max,
                source_text: measured.source.clone(),
            })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn within_tolerance_passes() {
        let window = Tolerance::new(20.95, 0.2);
        assert!(window.contains(20.95));
        assert!(window.contains(21.15)); // boundary is inclusive
        assert!(window.contains(20.75));
        assert!(window.check(&Percent::new(20.95, "20,95%")).is_ok());
    }

    #[test]
    fn outside_tolerance_fails_with_context() {
        let window = Tolerance::new(20.95, 0.2);
        assert!(!window.contains(21.3));

        let err = window.check(&Percent::new(21.3, "21,3%")).unwrap_err();
        match err {
            CheckError::OutsideTolerance {
                measured,
                expected,
                tolerance,
                source_text: source,
            } => {
                assert_eq!(measured, 21.3);
                assert_eq!(expected, 20.95);
                assert_eq!(tolerance, 0.2);
                assert_eq!(source, "21,3%");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn window_bounds() {
        let window = Tolerance::new(20.95, 0.2);
        assert_eq!(window.min(), 20.75);
        assert_eq!(window.max(), 21.15);
    }

    #[test]
    fn outside_band_passes() {
        let band = ExclusionBand::new(20.5, 21.5);
        assert!(!band.contains(0.13));
        assert!(band.check_outside(&Percent::new(0.13, "0,13%")).is_ok());
    }

    #[test]
    fn inside_band_fails_with_context() {
        let band = ExclusionBand::new(20.5, 21.5);
        assert!(band.contains(21.0));
        assert!(band.contains(20.5)); // bounds are inclusive
        assert!(band.contains(21.5));

        let err = band
            .check_outside(&Percent::new(21.0, "21,0%"))
            .unwrap_err();
        match err {
            CheckError::InsideExclusion {
                measured,
                min,
                max,
                source_text: source,
            } => {
                assert_eq!(measured, 21.0);
                assert_eq!(min, 20.5);
                assert_eq!(max, 21.5);
                assert_eq!(source, "21,0%");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
