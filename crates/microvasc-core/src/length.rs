//! Diameter-based vessel length estimation.

/// Allometric diameter-to-length fit for mesenteric microvessels.
///
/// `length = coefficient * diameter ^ exponent`, with diameter and length in
/// the same unit (mm in the source data). The default values reproduce the
/// empirical fit used for the rat-mesentery data sets.
#[derive(Debug, Clone, Copy)]
pub struct LengthLaw {
    /// Multiplicative coefficient of the fit.
    pub coefficient: f64,
    /// Diameter exponent of the fit.
    pub exponent: f64,
}

impl Default for LengthLaw {
    fn default() -> Self {
        Self {
            coefficient: 12.4,
            exponent: 1.1,
        }
    }
}

impl LengthLaw {
    /// Estimated length for a vessel of the given diameter.
    pub fn length_for(&self, diameter: f64) -> f64 {
        self.coefficient * diameter.powf(self.exponent)
    }
}
