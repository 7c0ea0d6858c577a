//! Waveform program builder
//!
//! NeoPixels read an 800 kHz duty-cycle encoded stream. The engine runs at
//! 16x the bit rate and every bit takes 16 cycles split into three phases:
//!
//! ```text
//!        |<- high ->|<- variable ->|<---- low ---->|
//!  "1"   ‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾|_______________
//!  "0"   ‾‾‾‾‾‾‾‾‾‾‾|________________________________
//!            5              5              6
//! ```
//!
//! With 2..=7 strands the filler bits of each transposed byte are shifted
//! out during the high prefix, before the strand bits reach the pins.
//!
//! The program reads the envelope header into the loop counter, runs the
//! bit loop that many times, then reads the trailer into the delay counter
//! and holds the line low for that many cycles before waiting for the next
//! frame.

mod instruction;

use embassy_time::Duration;

pub use instruction::{Counter, Instruction, Level, Op, OutTarget};

use crate::envelope::RESET_CYCLES;

/// NeoPixel bit rate
pub const BIT_RATE_HZ: u32 = 800_000;

/// Engine cycles per transmitted bit
pub const CYCLES_PER_BIT: u32 = 16;

/// Engine clock
pub const CLOCK_HZ: u32 = BIT_RATE_HZ * CYCLES_PER_BIT;

/// Always-high prefix of every bit
pub const HIGH_CYCLES: u32 = 5;

/// Data driven phase of every bit
pub const VARIABLE_CYCLES: u32 = 5;

/// Always-low suffix of every bit
pub const LOW_CYCLES: u32 = CYCLES_PER_BIT - HIGH_CYCLES - VARIABLE_CYCLES;

/// Bits moved per transfer from the frame buffer into the shift register
pub const TRANSFER_WIDTH: u8 = 32;

/// Longest program (2..=7 strands)
pub const MAX_INSTRUCTIONS: usize = 11;

/// Order in which bits leave the shift register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftDirection {
    /// MSB first
    Left,
    /// LSB first
    Right,
}

/// Compiled timing program for a given strand count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveformProgram {
    code: [Instruction; MAX_INSTRUCTIONS],
    len: u8,
    bit_loop: u8,
    bit_loop_end: u8,
    reset_loop: u8,
    strand_count: u8,
}

#[allow(clippy::cast_possible_truncation)]
impl WaveformProgram {
    /// Build the program for `strand_count` strands (`1..=8`)
    pub const fn build(strand_count: u8) -> Self {
        let (data_bits, filler_bits) = if strand_count <= 1 {
            (1, 0)
        } else {
            (strand_count, 8 - strand_count)
        };

        let mut code = [Instruction::pull(); MAX_INSTRUCTIONS];
        let mut len = 0;

        code[len] = Instruction::pull();
        len += 1;
        code[len] = Instruction::out(OutTarget::Counter(Counter::Loop), 32);
        len += 1;

        let bit_loop = len;
        // Low suffix, part 1 of 3: refill once the word is used up
        code[len] = Instruction::pull_if_empty();
        len += 1;
        if filler_bits == 0 {
            code[len] = Instruction::set_pins(Level::High).with_delay((HIGH_CYCLES - 1) as u8);
            len += 1;
        } else {
            // Filler sits in the low bits and leaves the register first
            code[len] = Instruction::set_pins(Level::High).with_delay((HIGH_CYCLES - 2) as u8);
            len += 1;
            code[len] = Instruction::out(OutTarget::Null, filler_bits);
            len += 1;
        }
        code[len] =
            Instruction::out(OutTarget::Pins, data_bits).with_delay((VARIABLE_CYCLES - 1) as u8);
        len += 1;
        // Low suffix, part 2 of 3; the loop jump and the refill complete it
        code[len] = Instruction::set_pins(Level::Low).with_delay((LOW_CYCLES - 3) as u8);
        len += 1;
        let bit_loop_end = len;
        code[len] = Instruction::jump_while(Counter::Loop, bit_loop as u8);
        len += 1;

        code[len] = Instruction::pull();
        len += 1;
        code[len] = Instruction::out(OutTarget::Counter(Counter::Delay), 32);
        len += 1;
        let reset_loop = len;
        code[len] = Instruction::jump_while(Counter::Delay, reset_loop as u8);
        len += 1;

        Self {
            code,
            len: len as u8,
            bit_loop: bit_loop as u8,
            bit_loop_end: bit_loop_end as u8,
            reset_loop: reset_loop as u8,
            strand_count,
        }
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.code[..self.len as usize]
    }

    /// Index execution returns to after the last instruction
    pub const fn wrap_target(&self) -> u8 {
        0
    }

    /// Index of the last instruction before wrapping
    pub const fn wrap(&self) -> u8 {
        self.len - 1
    }

    /// Index of the first instruction of the bit loop
    pub const fn bit_loop(&self) -> u8 {
        self.bit_loop
    }

    pub const fn strand_count(&self) -> u8 {
        self.strand_count
    }

    /// Number of pins driven by the program
    pub const fn out_pin_count(&self) -> u8 {
        self.strand_count
    }

    /// Offset from the first data pin of the pin carrying `strand`
    ///
    /// Strand 0 is the MSB of every transposed byte, so it lands on the
    /// highest driven pin.
    pub const fn pin_offset(&self, strand: u8) -> u8 {
        self.strand_count.saturating_sub(1).saturating_sub(strand)
    }

    pub const fn clock_hz(&self) -> u32 {
        CLOCK_HZ
    }

    pub const fn transfer_width(&self) -> u8 {
        TRANSFER_WIDTH
    }

    pub const fn shift_direction(&self) -> ShiftDirection {
        if self.strand_count == 1 {
            ShiftDirection::Left
        } else {
            ShiftDirection::Right
        }
    }

    /// Whether the engine swaps bytes within each transferred word
    pub const fn byte_swap(&self) -> bool {
        self.strand_count == 1
    }

    /// Cycles spent on one bit loop iteration
    pub fn cycles_per_iteration(&self) -> u32 {
        self.cycles_in(self.bit_loop as usize, self.bit_loop_end as usize + 1)
    }

    /// Cycles needed to emit a frame, including the reset delay
    ///
    /// Assumes the transfer queue never stalls the engine.
    pub fn frame_cycles(&self, loop_count: u32, reset_cycles: u32) -> u64 {
        let prologue = self.cycles_in(0, self.bit_loop as usize);
        let epilogue = self.cycles_in(self.bit_loop_end as usize + 1, self.reset_loop as usize);
        let reset = self.code[self.reset_loop as usize].cycles();

        u64::from(prologue)
            + u64::from(loop_count) * u64::from(self.cycles_per_iteration())
            + u64::from(epilogue)
            + (u64::from(reset_cycles) + 1) * u64::from(reset)
    }

    /// Wire time of a frame with `loop_count` iterations and the default
    /// reset delay
    pub fn frame_duration(&self, loop_count: u32) -> Duration {
        let cycles = self.frame_cycles(loop_count, RESET_CYCLES);
        Duration::from_micros(cycles * 1_000_000 / u64::from(CLOCK_HZ))
    }

    fn cycles_in(&self, start: usize, end: usize) -> u32 {
        self.code[start..end]
            .iter()
            .map(|instruction| instruction.cycles())
            .sum()
    }
}

/// Build the timing program for `strand_count` strands
pub const fn build_program(strand_count: u8) -> WaveformProgram {
    WaveformProgram::build(strand_count)
}
