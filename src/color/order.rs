use crate::color::PixelColor;
use crate::error::ConfigError;

/// Color channel of a pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Channel {
    Red = 0,
    Green = 1,
    Blue = 2,
    White = 3,
}

impl Channel {
    /// Channel by index into `RGBW`
    pub const fn from_index(index: u8) -> Option<Self> {
        Some(match index {
            0 => Self::Red,
            1 => Self::Green,
            2 => Self::Blue,
            3 => Self::White,
            _ => return None,
        })
    }

    pub const fn from_char(c: u8) -> Option<Self> {
        Some(match c.to_ascii_uppercase() {
            b'R' => Self::Red,
            b'G' => Self::Green,
            b'B' => Self::Blue,
            b'W' => Self::White,
            _ => return None,
        })
    }

    const fn value(self, color: PixelColor) -> u8 {
        match self {
            Self::Red => color.r,
            Self::Green => color.g,
            Self::Blue => color.b,
            Self::White => color.w,
        }
    }

    const fn set(self, color: &mut PixelColor, value: u8) {
        match self {
            Self::Red => color.r = value,
            Self::Green => color.g = value,
            Self::Blue => color.b = value,
            Self::White => color.w = value,
        }
    }
}

/// Order in which a pixel's channels go on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelOrder {
    channels: [Channel; 4],
    len: u8,
}

impl PixelOrder {
    pub const RGB: Self = Self::three(Channel::Red, Channel::Green, Channel::Blue);
    pub const GRB: Self = Self::three(Channel::Green, Channel::Red, Channel::Blue);
    pub const RGBW: Self = Self {
        channels: [Channel::Red, Channel::Green, Channel::Blue, Channel::White],
        len: 4,
    };
    pub const GRBW: Self = Self {
        channels: [Channel::Green, Channel::Red, Channel::Blue, Channel::White],
        len: 4,
    };

    const fn three(first: Channel, second: Channel, third: Channel) -> Self {
        Self {
            channels: [first, second, third, Channel::White],
            len: 3,
        }
    }

    /// `GRB` for 3 bytes per pixel, `GRBW` otherwise
    pub const fn default_for(bytes_per_pixel: u8) -> Self {
        if bytes_per_pixel == 4 {
            Self::GRBW
        } else {
            Self::GRB
        }
    }

    /// Parse an order string such as `"GRB"` or `"RGBW"`
    pub fn parse(order: &str) -> Result<Self, ConfigError> {
        Self::from_channels(order.bytes().map(Channel::from_char))
    }

    /// Build an order from indices into `RGBW`, e.g. `[1, 0, 2]` for `GRB`
    pub fn from_indices(indices: &[u8]) -> Result<Self, ConfigError> {
        Self::from_channels(indices.iter().map(|index| Channel::from_index(*index)))
    }

    fn from_channels(channels: impl Iterator<Item = Option<Channel>>) -> Result<Self, ConfigError> {
        let mut order = Self {
            channels: [Channel::White; 4],
            len: 0,
        };
        for channel in channels {
            let channel = channel.ok_or(ConfigError::PixelOrder)?;
            if order.len == 4 || order.channels().contains(&channel) {
                return Err(ConfigError::PixelOrder);
            }
            order.channels[order.len as usize] = channel;
            order.len += 1;
        }
        if order.len < 3 {
            return Err(ConfigError::PixelOrder);
        }
        Ok(order)
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels[..self.len as usize]
    }

    pub const fn bytes_per_pixel(&self) -> u8 {
        self.len
    }

    pub const fn has_white(&self) -> bool {
        self.len == 4
    }

    /// Write `color` into `out` in wire order
    pub fn write(&self, color: PixelColor, out: &mut [u8]) {
        for (byte, channel) in out.iter_mut().zip(self.channels()) {
            *byte = channel.value(color);
        }
    }

    /// Read a color back from wire order bytes
    pub fn read(&self, bytes: &[u8]) -> PixelColor {
        let mut color = PixelColor::default();
        for (byte, channel) in bytes.iter().zip(self.channels()) {
            channel.set(&mut color, *byte);
        }
        color
    }
}
