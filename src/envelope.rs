//! Frame envelope
//!
//! Every frame handed to the waveform engine is framed by two 32-bit words:
//!
//! ```text
//! | loop count - 1 | payload | 0..=3 zero bytes | reset cycles |
//! ```
//!
//! The header tells the program how many bit (or bit group) iterations to
//! run, the trailer how many cycles to hold the line low afterwards. This
//! lets one resident program serve frames of any length.

use heapless::Vec;

use crate::error::ConfigError;

/// Low time after each frame, in engine cycles (300 us at 12.8 MHz)
pub const RESET_CYCLES: u32 = 3840;

/// Header length in bytes
pub const HEADER_LEN: usize = 4;

/// Trailer length in bytes
pub const TRAILER_LEN: usize = 4;

/// Byte order of the envelope words
///
/// The single strand program shifts 32-bit words out MSB first and the
/// engine byte-swaps them on transfer, so its words are stored big-endian.
/// Multi-strand programs shift LSB first without swapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Big,
    Little,
}

impl ByteOrder {
    /// Byte order used for `strand_count` strands
    pub const fn for_strands(strand_count: u8) -> Self {
        if strand_count == 1 {
            Self::Big
        } else {
            Self::Little
        }
    }

    pub const fn encode(self, value: u32) -> [u8; 4] {
        match self {
            Self::Big => value.to_be_bytes(),
            Self::Little => value.to_le_bytes(),
        }
    }

    pub const fn decode(self, bytes: [u8; 4]) -> u32 {
        match self {
            Self::Big => u32::from_be_bytes(bytes),
            Self::Little => u32::from_le_bytes(bytes),
        }
    }
}

/// Zero bytes needed to align `data_len` to a 32-bit word
pub const fn padding_for(data_len: usize) -> usize {
    (4 - data_len % 4) % 4
}

/// Total envelope length for a payload of `data_len` bytes
pub const fn envelope_len(data_len: usize) -> usize {
    HEADER_LEN + data_len + padding_for(data_len) + TRAILER_LEN
}

/// Number of program iterations needed for `data_len` payload bytes
///
/// The single strand program runs once per bit, the others once per byte.
pub const fn loop_count(data_len: usize, strand_count: u8) -> usize {
    if strand_count == 1 {
        data_len * 8
    } else {
        data_len
    }
}

/// Header, payload and trailer in one fixed-capacity buffer
///
/// `N` is the buffer capacity in bytes. The buffer is sized once and the
/// payload is rewritten in place for every frame.
#[derive(Debug, Clone)]
pub struct FrameEnvelope<const N: usize> {
    bytes: Vec<u8, N>,
    data_len: usize,
    order: ByteOrder,
}

impl<const N: usize> FrameEnvelope<N> {
    /// Create an envelope with a zeroed payload of `data_len` bytes
    pub fn new(data_len: usize, strand_count: u8) -> Result<Self, ConfigError> {
        if data_len == 0 {
            return Err(ConfigError::Empty);
        }
        let len = envelope_len(data_len);
        if len > N {
            return Err(ConfigError::Capacity {
                required: len,
                capacity: N,
            });
        }
        let Ok(header) = u32::try_from(loop_count(data_len, strand_count) - 1) else {
            return Err(ConfigError::Capacity {
                required: len,
                capacity: N,
            });
        };

        let order = ByteOrder::for_strands(strand_count);
        let mut bytes = Vec::new();
        bytes.resize(len, 0).map_err(|()| ConfigError::Capacity {
            required: len,
            capacity: N,
        })?;
        bytes[..HEADER_LEN].copy_from_slice(&order.encode(header));
        bytes[len - TRAILER_LEN..].copy_from_slice(&order.encode(RESET_CYCLES));

        Ok(Self {
            bytes,
            data_len,
            order,
        })
    }

    /// Whole envelope as handed to the engine
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn payload(&self) -> &[u8] {
        &self.bytes[HEADER_LEN..HEADER_LEN + self.data_len]
    }

    pub fn payload_mut(&mut self) -> &mut [u8] {
        &mut self.bytes[HEADER_LEN..HEADER_LEN + self.data_len]
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Payload length without padding
    pub const fn data_len(&self) -> usize {
        self.data_len
    }

    pub const fn padding(&self) -> usize {
        padding_for(self.data_len)
    }

    pub const fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Whether the engine must swap bytes within each 32-bit word
    pub const fn byte_swap(&self) -> bool {
        matches!(self.order, ByteOrder::Big)
    }

    /// Decoded header word (`loop_count - 1`)
    pub fn header(&self) -> u32 {
        self.word_at(0)
    }

    /// Decoded trailer word (reset cycles)
    pub fn trailer(&self) -> u32 {
        self.word_at(self.bytes.len() - TRAILER_LEN)
    }

    /// Number of program iterations announced by the header
    pub fn loop_count(&self) -> u32 {
        self.header() + 1
    }

    fn word_at(&self, offset: usize) -> u32 {
        let mut word = [0u8; 4];
        word.copy_from_slice(&self.bytes[offset..offset + 4]);
        self.order.decode(word)
    }
}

/// Frame an already transposed payload
pub fn build_envelope<const N: usize>(
    payload: &[u8],
    strand_count: u8,
) -> Result<FrameEnvelope<N>, ConfigError> {
    let mut envelope = FrameEnvelope::new(payload.len(), strand_count)?;
    envelope.payload_mut().copy_from_slice(payload);
    Ok(envelope)
}
