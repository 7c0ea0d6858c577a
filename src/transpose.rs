//! Bit transposition of per-strand pixel data
//!
//! The waveform engine emits one bit per strand on every step, so the
//! serialized pixels (strands stored back to back) are reshaped into an
//! interleaved stream. For byte `j` of every strand, eight output bytes are
//! produced: output byte `k` holds bit `7 - k` of each strand's byte, with
//! strand `s` stored in bit `7 - s` (strand 0 in the MSB). With fewer than
//! eight strands the low `8 - strand_count` bits are always zero.
//!
//! A single strand is passed through untouched: the engine shifts the pixel
//! bytes out MSB first on its own.

/// Length of the transposed buffer for `source_len` serialized bytes
pub const fn transposed_len(source_len: usize, strand_count: u8) -> usize {
    if strand_count <= 1 {
        source_len
    } else {
        source_len * 8 / strand_count as usize
    }
}

/// Transpose `source` into `dest`
///
/// `source.len()` must be a multiple of `strand_count` and `dest` must be
/// exactly [`transposed_len`] bytes long.
pub fn transpose(source: &[u8], dest: &mut [u8], strand_count: u8) {
    debug_assert!(strand_count > 0);
    debug_assert_eq!(dest.len(), transposed_len(source.len(), strand_count));

    if strand_count == 1 {
        dest.copy_from_slice(source);
        return;
    }

    let strands = strand_count as usize;
    debug_assert!(source.len().is_multiple_of(strands));
    let strand_bytes = source.len() / strands;

    for (column, out) in dest.chunks_exact_mut(8).enumerate() {
        let mut group = [0u8; 8];
        for (strand, byte) in group.iter_mut().take(strands).enumerate() {
            *byte = source[strand * strand_bytes + column];
        }
        out.copy_from_slice(&transpose8(group));
    }
}

/// Reverse [`transpose`]
///
/// `source` is a transposed buffer and `dest` receives the serialized
/// per-strand bytes.
pub fn untranspose(source: &[u8], dest: &mut [u8], strand_count: u8) {
    debug_assert!(strand_count > 0);
    debug_assert_eq!(source.len(), transposed_len(dest.len(), strand_count));

    if strand_count == 1 {
        dest.copy_from_slice(source);
        return;
    }

    let strands = strand_count as usize;
    let strand_bytes = dest.len() / strands;

    for (column, chunk) in source.chunks_exact(8).enumerate() {
        let mut group = [0u8; 8];
        group.copy_from_slice(chunk);
        let bytes = untranspose8(group);
        for (strand, byte) in bytes.iter().take(strands).enumerate() {
            dest[strand * strand_bytes + column] = *byte;
        }
    }
}

/// 8x8 bit matrix transpose of one byte per strand
///
/// Output byte `k` bit `7 - s` is input byte `s` bit `7 - k`.
#[inline]
pub const fn transpose8(group: [u8; 8]) -> [u8; 8] {
    let mut out = [0u8; 8];
    let mut step = 0;
    while step < 8 {
        let mask = 0x80 >> step;
        let mut strand = 0;
        let mut byte = 0u8;
        while strand < 8 {
            if group[strand] & mask != 0 {
                byte |= 0x80 >> strand;
            }
            strand += 1;
        }
        out[step] = byte;
        step += 1;
    }
    out
}

/// Inverse of [`transpose8`]
#[inline]
pub const fn untranspose8(steps: [u8; 8]) -> [u8; 8] {
    let mut out = [0u8; 8];
    let mut strand = 0;
    while strand < 8 {
        let mut step = 0;
        let mut byte = 0u8;
        while step < 8 {
            if steps[step] & (0x80 >> strand) != 0 {
                byte |= 0x80 >> step;
            }
            step += 1;
        }
        out[strand] = byte;
        strand += 1;
    }
    out
}
