//! Parallel strand driver
//!
//! [`StrandDriver`] turns serialized pixel bytes into frames for the
//! waveform engine. [`Strands`] puts a [`PixelBuffer`] in front of it.

use embassy_time::Duration;
#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::PixelSink;
use crate::color::{PixelColor, PixelOrder};
use crate::engine::{EngineConfig, WaveformEngine};
use crate::envelope::FrameEnvelope;
use crate::error::{ConfigError, DriverError, PixelError};
use crate::pixels::PixelBuffer;
use crate::program::{WaveformProgram, build_program};
use crate::scheduler::{TransferState, TransmissionScheduler};
use crate::topology::{DEFAULT_STRANDS, StrandTopology};

/// Configuration of a strand driver
#[derive(Debug, Clone, Copy)]
pub struct StrandConfig {
    /// First of `strand_count` consecutive data pins, strand 0 on the last
    pub data_pin: u8,
    /// Total number of pixels across all strands
    pub pixel_count: usize,
    /// 1..=8, must divide `pixel_count`
    pub strand_count: u8,
    /// 3 for RGB, 4 for RGBW pixels
    pub bytes_per_pixel: u8,
    /// 0.0-1.0
    pub brightness: f32,
    /// Show pixels on every change
    pub auto_write: bool,
    /// Defaults to `GRB` or `GRBW` depending on bytes per pixel
    pub pixel_order: Option<PixelOrder>,
}

impl StrandConfig {
    /// 8 strands of RGB pixels at full brightness with auto write
    pub const fn new(data_pin: u8, pixel_count: usize) -> Self {
        Self {
            data_pin,
            pixel_count,
            strand_count: DEFAULT_STRANDS,
            bytes_per_pixel: 3,
            brightness: 1.0,
            auto_write: true,
            pixel_order: None,
        }
    }

    pub const fn with_strands(mut self, strand_count: u8) -> Self {
        self.strand_count = strand_count;
        self
    }

    pub const fn with_bytes_per_pixel(mut self, bytes_per_pixel: u8) -> Self {
        self.bytes_per_pixel = bytes_per_pixel;
        self
    }

    pub const fn with_brightness(mut self, brightness: f32) -> Self {
        self.brightness = brightness;
        self
    }

    pub const fn with_auto_write(mut self, auto_write: bool) -> Self {
        self.auto_write = auto_write;
        self
    }

    pub const fn with_pixel_order(mut self, order: PixelOrder) -> Self {
        self.pixel_order = Some(order);
        self
    }

    /// Validated strand layout
    pub const fn topology(&self) -> Result<StrandTopology, ConfigError> {
        StrandTopology::new(self.pixel_count, self.strand_count, self.bytes_per_pixel)
    }

    /// Pixel order, checked against bytes per pixel
    pub const fn resolved_pixel_order(&self) -> Result<PixelOrder, ConfigError> {
        let order = match self.pixel_order {
            Some(order) => order,
            None => PixelOrder::default_for(self.bytes_per_pixel),
        };
        if order.bytes_per_pixel() != self.bytes_per_pixel {
            return Err(ConfigError::PixelOrderLength {
                order: order.bytes_per_pixel(),
                bytes_per_pixel: self.bytes_per_pixel,
            });
        }
        Ok(order)
    }
}

/// Drives up to 8 strands from one waveform engine
///
/// `N` is the frame buffer capacity in bytes, at least
/// [`StrandTopology::envelope_len`].
pub struct StrandDriver<E: WaveformEngine, const N: usize> {
    topology: StrandTopology,
    program: WaveformProgram,
    scheduler: TransmissionScheduler<E, N>,
}

impl<E: WaveformEngine, const N: usize> StrandDriver<E, N> {
    /// Validate the configuration, then acquire and program the engine
    pub fn new(mut engine: E, config: &StrandConfig) -> Result<Self, DriverError<E::Error>> {
        let topology = config.topology()?;
        let envelope = FrameEnvelope::new(topology.payload_len(), topology.strand_count())?;
        let program = build_program(topology.strand_count());

        engine
            .configure(&EngineConfig::for_program(&program, config.data_pin))
            .map_err(DriverError::Engine)?;

        #[cfg(feature = "esp32-log")]
        println!(
            "[StrandDriver.new] {} pixels on {} strands, {} byte frames",
            topology.pixel_count(),
            topology.strand_count(),
            envelope.len()
        );

        Ok(Self {
            topology,
            program,
            scheduler: TransmissionScheduler::new(engine, envelope, topology.strand_count()),
        })
    }

    /// Total number of pixels across all strands
    pub const fn n(&self) -> usize {
        self.topology.pixel_count()
    }

    pub const fn strand_count(&self) -> u8 {
        self.topology.strand_count()
    }

    /// Pixels per strand
    pub const fn strand_len(&self) -> usize {
        self.topology.strand_len()
    }

    pub const fn topology(&self) -> StrandTopology {
        self.topology
    }

    pub const fn program(&self) -> &WaveformProgram {
        &self.program
    }

    /// Frame currently held for the engine
    pub fn envelope(&self) -> &FrameEnvelope<N> {
        self.scheduler.envelope()
    }

    pub fn engine(&self) -> &E {
        self.scheduler.engine()
    }

    pub fn state(&mut self) -> TransferState {
        self.scheduler.state()
    }

    /// Spin until the last frame has left the engine
    pub fn wait_idle(&mut self) {
        self.scheduler.wait_idle();
    }

    /// Wire time of one frame, reset delay included
    pub fn frame_duration(&self) -> Duration {
        self.program
            .frame_duration(self.scheduler.envelope().loop_count())
    }

    /// Blank all strands, wait for the frame and release the engine
    pub fn deinit(self) -> Result<(), DriverError<E::Error>> {
        self.scheduler.deinit().map_err(DriverError::Engine)
    }
}

impl<E: WaveformEngine, const N: usize> PixelSink for StrandDriver<E, N> {
    type Error = DriverError<E::Error>;

    fn transmit(&mut self, pixels: &[u8]) -> Result<(), Self::Error> {
        let expected = self.topology.pixel_bytes();
        if pixels.len() != expected {
            return Err(DriverError::Length {
                expected,
                actual: pixels.len(),
            });
        }
        self.scheduler
            .transmit(pixels)
            .map_err(DriverError::Engine)
    }
}

/// Pixel buffer driving parallel strands
///
/// `P` is the pixel byte capacity, `F` the frame buffer capacity.
pub type Strands<E, const P: usize, const F: usize> = PixelBuffer<StrandDriver<E, F>, P>;

impl<E: WaveformEngine, const P: usize, const F: usize> PixelBuffer<StrandDriver<E, F>, P> {
    /// Validate `config`, program the engine and create black pixels
    ///
    /// Nothing is shown until the first change or [`show`](Self::show).
    pub fn from_config(engine: E, config: &StrandConfig) -> Result<Self, DriverError<E::Error>> {
        let topology = config.topology()?;
        let order = config.resolved_pixel_order()?;
        if topology.pixel_bytes() > P {
            return Err(ConfigError::Capacity {
                required: topology.pixel_bytes(),
                capacity: P,
            }
            .into());
        }
        let driver = StrandDriver::new(engine, config)?;
        Self::new(
            driver,
            topology.pixel_count(),
            order,
            config.brightness,
            config.auto_write,
        )
        .map_err(DriverError::from)
    }

    /// Total number of pixels across all strands
    pub fn n(&self) -> usize {
        self.sink().n()
    }

    pub fn strand_count(&self) -> u8 {
        self.sink().strand_count()
    }

    /// Blank the pixels, send the blank frame and release the engine
    pub fn deinit(mut self) -> Result<(), DriverError<E::Error>> {
        self.clear();
        self.into_sink().deinit()
    }

    /// Color of pixel `index` on `strand`
    pub fn get_on_strand(&self, strand: usize, index: usize) -> Option<PixelColor> {
        let strand_len = self.sink().strand_len();
        if strand >= self.strand_count() as usize || index >= strand_len {
            return None;
        }
        self.get(strand * strand_len + index)
    }

    /// Set pixel `index` on `strand`
    pub fn set_on_strand(
        &mut self,
        strand: usize,
        index: usize,
        color: impl Into<PixelColor>,
    ) -> Result<(), PixelError<DriverError<E::Error>>> {
        let strand_len = self.sink().strand_len();
        if strand >= self.strand_count() as usize || index >= strand_len {
            return Err(PixelError::OutOfRange {
                index: strand.saturating_mul(strand_len).saturating_add(index),
                len: self.n(),
            });
        }
        self.set(strand * strand_len + index, color)
    }
}
