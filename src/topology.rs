use crate::error::ConfigError;
use crate::envelope;
use crate::transpose::transposed_len;

/// Maximum number of strands a single engine can drive
pub const MAX_STRANDS: u8 = 8;

/// Default strand count
pub const DEFAULT_STRANDS: u8 = MAX_STRANDS;

/// Layout of the strands driven by one engine
///
/// Strands are contiguous pixel ranges: pixel `p` lives on strand
/// `p / strand_len()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrandTopology {
    pixel_count: usize,
    strand_count: u8,
    bytes_per_pixel: u8,
}

impl StrandTopology {
    /// Validate and create a topology
    pub const fn new(
        pixel_count: usize,
        strand_count: u8,
        bytes_per_pixel: u8,
    ) -> Result<Self, ConfigError> {
        if strand_count == 0 || strand_count > MAX_STRANDS {
            return Err(ConfigError::StrandCount(strand_count));
        }
        if bytes_per_pixel != 3 && bytes_per_pixel != 4 {
            return Err(ConfigError::BytesPerPixel(bytes_per_pixel));
        }
        if pixel_count == 0 {
            return Err(ConfigError::Empty);
        }
        if !pixel_count.is_multiple_of(strand_count as usize) {
            return Err(ConfigError::UnevenStrands {
                pixel_count,
                strand_count,
            });
        }
        Ok(Self {
            pixel_count,
            strand_count,
            bytes_per_pixel,
        })
    }

    /// Total number of pixels across all strands
    pub const fn pixel_count(self) -> usize {
        self.pixel_count
    }

    pub const fn strand_count(self) -> u8 {
        self.strand_count
    }

    pub const fn bytes_per_pixel(self) -> u8 {
        self.bytes_per_pixel
    }

    /// Number of pixels on each strand
    pub const fn strand_len(self) -> usize {
        self.pixel_count / self.strand_count as usize
    }

    /// Length of the serialized pixel buffer
    pub const fn pixel_bytes(self) -> usize {
        self.pixel_count * self.bytes_per_pixel as usize
    }

    /// Length of the transposed payload
    pub const fn payload_len(self) -> usize {
        transposed_len(self.pixel_bytes(), self.strand_count)
    }

    /// Length of the full frame envelope
    pub const fn envelope_len(self) -> usize {
        envelope::envelope_len(self.payload_len())
    }

    /// Index of the strand that drives `pixel`
    pub const fn strand_of(self, pixel: usize) -> usize {
        pixel / self.strand_len()
    }
}
