//! Logical pixel buffer
//!
//! Keeps user colors in wire order at full brightness and hands a scaled
//! copy to a [`PixelSink`] whenever the pixels are shown.

use heapless::Vec;
use smart_leds::SmartLedsWrite;

use crate::PixelSink;
use crate::color::{PixelColor, PixelOrder, Rgb};
use crate::error::{ConfigError, PixelError};
use crate::math8::{brightness_to_scale, scale8, scale_to_brightness};

/// Pixel store in front of a [`PixelSink`]
///
/// `N` is the capacity in bytes (`pixel_count * bytes_per_pixel`).
pub struct PixelBuffer<S: PixelSink, const N: usize> {
    sink: S,
    order: PixelOrder,
    /// Wire order, full brightness
    pixels: Vec<u8, N>,
    /// Brightness applied, handed to the sink
    output: Vec<u8, N>,
    scale: u8,
    auto_write: bool,
}

impl<S: PixelSink, const N: usize> PixelBuffer<S, N> {
    /// Create a buffer of `pixel_count` black pixels
    pub fn new(
        sink: S,
        pixel_count: usize,
        order: PixelOrder,
        brightness: f32,
        auto_write: bool,
    ) -> Result<Self, ConfigError> {
        let len = pixel_count * order.bytes_per_pixel() as usize;
        let capacity = ConfigError::Capacity {
            required: len,
            capacity: N,
        };
        let mut pixels = Vec::new();
        pixels.resize(len, 0).map_err(|()| capacity)?;
        let mut output = Vec::new();
        output.resize(len, 0).map_err(|()| capacity)?;

        Ok(Self {
            sink,
            order,
            pixels,
            output,
            scale: brightness_to_scale(brightness),
            auto_write,
        })
    }

    /// Number of pixels
    pub fn len(&self) -> usize {
        self.pixels.len() / self.bytes_per_pixel()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub const fn pixel_order(&self) -> PixelOrder {
        self.order
    }

    /// Set a single pixel
    ///
    /// Shows the pixels right away when auto write is on.
    pub fn set(
        &mut self,
        index: usize,
        color: impl Into<PixelColor>,
    ) -> Result<(), PixelError<S::Error>> {
        let len = self.len();
        if index >= len {
            return Err(PixelError::OutOfRange { index, len });
        }
        self.store(index, color.into());
        self.auto_show()?;
        Ok(())
    }

    /// Color of a pixel at full brightness
    pub fn get(&self, index: usize) -> Option<PixelColor> {
        if index >= self.len() {
            return None;
        }
        let bpp = self.bytes_per_pixel();
        Some(self.order.read(&self.pixels[index * bpp..(index + 1) * bpp]))
    }

    /// Set every pixel to `color`
    pub fn fill(&mut self, color: impl Into<PixelColor>) -> Result<(), S::Error> {
        let color = color.into();
        let bpp = self.bytes_per_pixel();
        for pixel in self.pixels.chunks_exact_mut(bpp) {
            self.order.write(color, pixel);
        }
        self.auto_show()
    }

    /// Send the pixels to the sink
    pub fn show(&mut self) -> Result<(), S::Error> {
        if self.scale == u8::MAX {
            return self.sink.transmit(&self.pixels);
        }
        for (out, pixel) in self.output.iter_mut().zip(self.pixels.iter()) {
            *out = scale8(*pixel, self.scale);
        }
        self.sink.transmit(&self.output)
    }

    pub fn brightness(&self) -> f32 {
        scale_to_brightness(self.scale)
    }

    /// Set brightness (0.0-1.0, clamped)
    ///
    /// Shows the pixels right away when auto write is on.
    pub fn set_brightness(&mut self, brightness: f32) -> Result<(), S::Error> {
        self.scale = brightness_to_scale(brightness);
        self.auto_show()
    }

    pub const fn auto_write(&self) -> bool {
        self.auto_write
    }

    pub fn set_auto_write(&mut self, auto_write: bool) {
        self.auto_write = auto_write;
    }

    /// Pixel bytes in wire order, before brightness
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Set every pixel to black without showing
    pub(crate) fn clear(&mut self) {
        self.pixels.fill(0);
    }

    fn bytes_per_pixel(&self) -> usize {
        self.order.bytes_per_pixel() as usize
    }

    fn store(&mut self, index: usize, color: PixelColor) {
        let bpp = self.bytes_per_pixel();
        self.order
            .write(color, &mut self.pixels[index * bpp..(index + 1) * bpp]);
    }

    fn auto_show(&mut self) -> Result<(), S::Error> {
        if self.auto_write {
            self.show()
        } else {
            Ok(())
        }
    }
}

/// Writes colors from the first pixel on, then shows them
impl<S: PixelSink, const N: usize> SmartLedsWrite for PixelBuffer<S, N> {
    type Error = S::Error;
    type Color = Rgb;

    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        let len = self.len();
        for (index, color) in iterator.into_iter().take(len).enumerate() {
            let color: Rgb = color.into();
            self.store(index, color.into());
        }
        self.show()
    }
}
