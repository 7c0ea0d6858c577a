use core::fmt;

/// Invalid driver configuration
///
/// Always reported before any engine resource or frame buffer is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Pixel count is not a multiple of the strand count
    UnevenStrands { pixel_count: usize, strand_count: u8 },
    /// Strand count outside of `1..=8`
    StrandCount(u8),
    /// Only 3 (RGB) and 4 (RGBW) bytes per pixel are supported
    BytesPerPixel(u8),
    /// Driver without pixels
    Empty,
    /// Pixel order has unknown or repeated channels
    PixelOrder,
    /// Pixel order channel count differs from bytes per pixel
    PixelOrderLength { order: u8, bytes_per_pixel: u8 },
    /// Fixed-size buffer can not hold the requested frame
    Capacity { required: usize, capacity: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnevenStrands {
                pixel_count,
                strand_count,
            } => write!(
                f,
                "pixel count {pixel_count} must be a multiple of strand count {strand_count}"
            ),
            Self::StrandCount(count) => write!(f, "strand count {count} is not in 1..=8"),
            Self::BytesPerPixel(bpp) => write!(f, "{bpp} bytes per pixel is not supported"),
            Self::Empty => f.write_str("pixel count must be greater than zero"),
            Self::PixelOrder => f.write_str("pixel order must use each of R, G, B, W at most once"),
            Self::PixelOrderLength {
                order,
                bytes_per_pixel,
            } => write!(
                f,
                "pixel order has {order} channels, expected {bytes_per_pixel}"
            ),
            Self::Capacity { required, capacity } => {
                write!(f, "buffer needs {required} bytes, capacity is {capacity}")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

/// Strand driver error
///
/// `E` is the error type of the waveform engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError<E> {
    /// Rejected configuration
    Config(ConfigError),
    /// Pixel buffer length does not match the topology
    Length { expected: usize, actual: usize },
    /// Failure reported by the waveform engine
    Engine(E),
}

impl<E> From<ConfigError> for DriverError<E> {
    fn from(error: ConfigError) -> Self {
        Self::Config(error)
    }
}

impl<E: fmt::Debug> fmt::Display for DriverError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(error) => write!(f, "invalid configuration: {error}"),
            Self::Length { expected, actual } => {
                write!(f, "expected {expected} pixel bytes, got {actual}")
            }
            Self::Engine(error) => write!(f, "waveform engine error: {error:?}"),
        }
    }
}

/// Pixel buffer error
///
/// `E` is the error type of the pixel sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelError<E> {
    /// Pixel index past the end of the buffer
    OutOfRange { index: usize, len: usize },
    /// Failure reported by the sink while showing the pixels
    Sink(E),
}

impl<E> From<E> for PixelError<E> {
    fn from(error: E) -> Self {
        Self::Sink(error)
    }
}

impl<E: fmt::Debug> fmt::Display for PixelError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, len } => {
                write!(f, "pixel index {index} out of range for {len} pixels")
            }
            Self::Sink(error) => write!(f, "pixel sink error: {error:?}"),
        }
    }
}
