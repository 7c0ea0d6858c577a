mod order;

pub use order::{Channel, PixelOrder};
use smart_leds::RGB8;

pub type Rgb = RGB8;

/// Pixel color with an optional white channel
///
/// The white channel is ignored by 3 byte pixel orders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PixelColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub w: u8,
}

impl PixelColor {
    pub const BLACK: Self = Self::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, w: u8) -> Self {
        Self { r, g, b, w }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 0)
    }
}

impl From<Rgb> for PixelColor {
    fn from(color: Rgb) -> Self {
        Self::rgb(color.r, color.g, color.b)
    }
}

impl From<PixelColor> for Rgb {
    fn from(color: PixelColor) -> Self {
        Rgb::new(color.r, color.g, color.b)
    }
}

impl From<(u8, u8, u8)> for PixelColor {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::rgb(r, g, b)
    }
}

impl From<(u8, u8, u8, u8)> for PixelColor {
    fn from((r, g, b, w): (u8, u8, u8, u8)) -> Self {
        Self::new(r, g, b, w)
    }
}

/// Packed `0xWWRRGGBB`
impl From<u32> for PixelColor {
    fn from(value: u32) -> Self {
        let [w, r, g, b] = value.to_be_bytes();
        Self::new(r, g, b, w)
    }
}
