#![no_std]

pub mod color;
pub mod driver;
pub mod engine;
pub mod envelope;
pub mod error;
pub mod math8;
pub mod pixels;
pub mod program;
pub mod scheduler;
pub mod topology;
pub mod transpose;

pub use color::{Channel, PixelColor, PixelOrder, Rgb};
pub use driver::{StrandConfig, StrandDriver, Strands};
pub use engine::{EngineConfig, PendingFlag, PinConfig, WaveformEngine};
pub use envelope::{FrameEnvelope, RESET_CYCLES, build_envelope};
pub use error::{ConfigError, DriverError, PixelError};
pub use pixels::PixelBuffer;
pub use program::{ShiftDirection, WaveformProgram, build_program};
pub use scheduler::{TransferState, TransmissionScheduler};
pub use topology::StrandTopology;
pub use transpose::{transpose, untranspose};

pub use embassy_time::Duration;
pub use smart_leds::SmartLedsWrite;

/// Destination of serialized pixel bytes
///
/// Implemented by [`StrandDriver`]. A [`PixelBuffer`] holds a sink and
/// calls it whenever the pixels are shown.
pub trait PixelSink {
    type Error;

    /// Send `pixels` (wire order, brightness applied) to the LEDs
    fn transmit(&mut self, pixels: &[u8]) -> Result<(), Self::Error>;
}

impl<T: PixelSink + ?Sized> PixelSink for &mut T {
    type Error = T::Error;

    fn transmit(&mut self, pixels: &[u8]) -> Result<(), Self::Error> {
        (**self).transmit(pixels)
    }
}
