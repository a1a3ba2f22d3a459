//! Packed `0xRRGGBB` colours carried in the `data` field of presentation points.

/// Discharge bucket with measured data
pub const RED: u32 = 0xff0000;
/// Discharge bucket never observed
pub const DARK_RED: u32 = 0x600000;
/// Charge bucket with measured data
pub const BLUE: u32 = 0x0000ff;
/// Charge bucket never observed
pub const DARK_BLUE: u32 = 0x000060;

pub fn from_rgb(red: u8, green: u8, blue: u8) -> u32 {
    (red as u32) << 16 | (green as u32) << 8 | blue as u32
}

pub fn to_rgb(colour: u32) -> (u8, u8, u8) {
    (
        ((colour & 0xff0000) >> 16) as u8,
        ((colour & 0x00ff00) >> 8) as u8,
        (colour & 0x0000ff) as u8,
    )
}

/// Colours for a curve: `(measured, never observed)`.
pub fn curve_colours(discharging: bool) -> (u32, u32) {
    if discharging {
        (RED, DARK_RED)
    } else {
        (BLUE, DARK_BLUE)
    }
}
