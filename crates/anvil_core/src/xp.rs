//! Experience math: levels to points to tank liquid.

use crate::DeviceConstants;

/// Total experience points needed to reach `level` from zero.
pub fn experience_for_level(level: u32) -> u32 {
    let l = f64::from(level);
    match level {
        0 => 0,
        1..=15 => level * 17,
        16..=30 => (1.5 * l * l - 29.5 * l + 360.0) as u32,
        _ => (3.5 * l * l - 151.5 * l + 2220.0) as u32,
    }
}

pub fn xp_to_liquid(xp: u32, constants: &DeviceConstants) -> u32 {
    xp.saturating_mul(constants.liquid_per_xp)
}

pub fn liquid_for_level(level: u32, constants: &DeviceConstants) -> u32 {
    xp_to_liquid(experience_for_level(level), constants)
}
