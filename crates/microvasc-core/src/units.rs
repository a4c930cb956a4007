//! Unit conversions between file units (mm) and model units (CGS).

/// One mmHg expressed in barye (dyn/cm^2).
pub const MMHG_IN_BARYE: f64 = 1333.22;

/// Millimeters to centimeters.
pub fn mm_to_cm(mm: f64) -> f64 {
    mm / 10.0
}

/// Barye to mmHg, for display.
pub fn barye_to_mmhg(p: f64) -> f64 {
    p / MMHG_IN_BARYE
}

/// mmHg to barye.
pub fn mmhg_to_barye(p: f64) -> f64 {
    p * MMHG_IN_BARYE
}
