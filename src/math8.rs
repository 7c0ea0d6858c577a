/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems.
#[inline]
#[allow(clippy::cast_lossless)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Convert a 0.0-1.0 brightness to an 8-bit scale
///
/// Values outside the range are clamped, NaN maps to 0.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn brightness_to_scale(brightness: f32) -> u8 {
    if brightness.is_nan() {
        return 0;
    }
    libm::roundf(brightness.clamp(0.0, 1.0) * 255.0) as u8
}

/// Convert an 8-bit scale back to 0.0-1.0
pub fn scale_to_brightness(scale: u8) -> f32 {
    f32::from(scale) / 255.0
}
