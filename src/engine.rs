//! Programmable waveform engine boundary
//!
//! The engine is the hardware that runs a [`WaveformProgram`] at a fixed
//! clock and drains a frame buffer through its pins in the background
//! (a PIO state machine fed by DMA, a FlexIO shifter, ...). Implement
//! [`WaveformEngine`] to support a new platform.

use core::cell::Cell;

use critical_section::Mutex;

use crate::program::{ShiftDirection, WaveformProgram};

/// Output pins driven by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinConfig {
    /// First data pin; strand `s` of `count` is driven on
    /// `first_pin + count - 1 - s`
    pub first_pin: u8,
    /// Number of consecutive data pins
    pub count: u8,
}

/// Everything the engine needs to start running a program
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig<'a> {
    pub program: &'a WaveformProgram,
    pub clock_hz: u32,
    pub pins: PinConfig,
    pub shift: ShiftDirection,
    /// Bits per transfer from the frame buffer into the shift register
    pub transfer_width: u8,
}

impl<'a> EngineConfig<'a> {
    /// Configuration that runs `program` on pins starting at `first_pin`
    pub const fn for_program(program: &'a WaveformProgram, first_pin: u8) -> Self {
        Self {
            program,
            clock_hz: program.clock_hz(),
            pins: PinConfig {
                first_pin,
                count: program.out_pin_count(),
            },
            shift: program.shift_direction(),
            transfer_width: program.transfer_width(),
        }
    }
}

/// Fixed-clock output engine
pub trait WaveformEngine {
    type Error: core::fmt::Debug;

    /// Acquire the engine and load the program
    fn configure(&mut self, config: &EngineConfig<'_>) -> Result<(), Self::Error>;

    /// Start draining `frame` in the background
    ///
    /// `frame` is 32-bit word aligned; with `byte_swap` set the bytes of
    /// every word are reversed on transfer. The caller does not touch the
    /// frame memory again until [`is_pending`](Self::is_pending) returns
    /// `false`.
    fn submit_async(&mut self, frame: &[u8], byte_swap: bool) -> Result<(), Self::Error>;

    /// Whether a submitted frame is still being transferred
    fn is_pending(&self) -> bool;

    /// Stop the engine and free its pins
    fn release(&mut self);
}

/// Transfer completion flag shared with an interrupt handler
///
/// The foreground sets it on submit and the completion interrupt clears it.
/// This is the only state the two contexts share.
#[derive(Debug)]
pub struct PendingFlag {
    pending: Mutex<Cell<bool>>,
}

impl PendingFlag {
    pub const fn new() -> Self {
        Self {
            pending: Mutex::new(Cell::new(false)),
        }
    }

    /// Mark a transfer as started
    pub fn start(&self) {
        critical_section::with(|cs| self.pending.borrow(cs).set(true));
    }

    /// Mark the transfer as finished (called from the completion handler)
    pub fn complete(&self) {
        critical_section::with(|cs| self.pending.borrow(cs).set(false));
    }

    pub fn is_pending(&self) -> bool {
        critical_section::with(|cs| self.pending.borrow(cs).get())
    }
}

impl Default for PendingFlag {
    fn default() -> Self {
        Self::new()
    }
}
