//! Background transfer scheduling
//!
//! Handoff protocol between the foreground (single writer of the frame
//! buffer) and the engine (single reader):
//!
//! 1. Poll the engine until it reports no pending transfer.
//! 2. Rewrite the payload in place.
//! 3. Submit the frame and return without waiting.
//!
//! The frame buffer is therefore never written while the engine may read
//! it, and frames go out in call order. The poll is the only wait point, so
//! a threaded port only needs to swap it for a completion signal.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::engine::WaveformEngine;
use crate::envelope::FrameEnvelope;
use crate::transpose::transpose;

/// Transfer state of the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferState {
    /// Frame buffer is free
    Idle,
    /// Engine is draining the frame buffer
    Transmitting,
}

/// Owns the frame buffer and keeps at most one transfer in flight
///
/// `N` is the frame buffer capacity in bytes.
pub struct TransmissionScheduler<E: WaveformEngine, const N: usize> {
    engine: E,
    envelope: FrameEnvelope<N>,
    strand_count: u8,
    state: TransferState,
}

impl<E: WaveformEngine, const N: usize> TransmissionScheduler<E, N> {
    /// Create a scheduler around an envelope sized for `strand_count`
    ///
    /// The engine must already be configured.
    pub const fn new(engine: E, envelope: FrameEnvelope<N>, strand_count: u8) -> Self {
        Self {
            engine,
            envelope,
            strand_count,
            state: TransferState::Idle,
        }
    }

    /// Transpose `source` into the frame buffer and submit it
    ///
    /// Spins while the previous frame is still in flight. Returns as soon as
    /// the new frame is handed to the engine.
    pub fn transmit(&mut self, source: &[u8]) -> Result<(), E::Error> {
        self.wait_idle();
        transpose(source, self.envelope.payload_mut(), self.strand_count);
        self.submit()
    }

    /// Send an all-zero frame, wait for it and release the engine
    pub fn deinit(mut self) -> Result<(), E::Error> {
        self.wait_idle();
        self.envelope.payload_mut().fill(0);
        let result = self.submit();
        self.wait_idle();
        self.engine.release();

        #[cfg(feature = "esp32-log")]
        println!("[TransmissionScheduler.deinit] engine released");

        result
    }

    /// Spin until the engine has finished the frame in flight
    pub fn wait_idle(&mut self) {
        while self.engine.is_pending() {
            core::hint::spin_loop();
        }
        self.state = TransferState::Idle;
    }

    /// Current transfer state, refreshed from the engine
    pub fn state(&mut self) -> TransferState {
        if self.state == TransferState::Transmitting && !self.engine.is_pending() {
            self.state = TransferState::Idle;
        }
        self.state
    }

    pub fn envelope(&self) -> &FrameEnvelope<N> {
        &self.envelope
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    fn submit(&mut self) -> Result<(), E::Error> {
        let byte_swap = self.envelope.byte_swap();
        match self
            .engine
            .submit_async(self.envelope.as_bytes(), byte_swap)
        {
            Ok(()) => {
                self.state = TransferState::Transmitting;
                Ok(())
            }
            Err(error) => {
                #[cfg(feature = "esp32-log")]
                println!("[TransmissionScheduler.submit] submit failed: {:?}", error);
                Err(error)
            }
        }
    }
}
