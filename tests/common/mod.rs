#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use myrtio_strands::PendingFlag;
use myrtio_strands::engine::{EngineConfig, PinConfig, WaveformEngine};
use myrtio_strands::program::{
    Counter, Level, Op, OutTarget, ShiftDirection, WaveformProgram,
};

/// Calls seen by the fake engine, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Configure,
    Poll(bool),
    Submit { frame: Vec<u8>, byte_swap: bool },
    Release,
}

#[derive(Debug, Clone, Copy)]
pub struct Configured {
    pub program: WaveformProgram,
    pub clock_hz: u32,
    pub pins: PinConfig,
    pub shift: ShiftDirection,
    pub transfer_width: u8,
}

#[derive(Debug, Default)]
pub struct EngineLog {
    pub events: Vec<Event>,
    pub configured: Option<Configured>,
    /// Pending polls on which the in-flight buffer was compared
    pub frame_checks: usize,
    /// Pending polls that found the in-flight buffer modified
    pub frames_changed: usize,
}

impl EngineLog {
    pub fn submits(&self) -> Vec<(Vec<u8>, bool)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Submit { frame, byte_swap } => Some((frame.clone(), *byte_swap)),
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineFault;

/// Engine that stays busy for a number of polls after every submit
pub struct FakeEngine {
    log: Rc<RefCell<EngineLog>>,
    flag: PendingFlag,
    busy_polls: usize,
    remaining: Cell<usize>,
    fail_configure: bool,
    fail_submit: bool,
    watch_frame: bool,
    in_flight: Option<(*const u8, Vec<u8>)>,
}

impl FakeEngine {
    pub fn new(busy_polls: usize) -> (Self, Rc<RefCell<EngineLog>>) {
        let log = Rc::new(RefCell::new(EngineLog::default()));
        let engine = Self {
            log: Rc::clone(&log),
            flag: PendingFlag::new(),
            busy_polls,
            remaining: Cell::new(0),
            fail_configure: false,
            fail_submit: false,
            watch_frame: false,
            in_flight: None,
        };
        (engine, log)
    }

    pub fn failing_configure(mut self) -> Self {
        self.fail_configure = true;
        self
    }

    pub fn failing_submit(mut self) -> Self {
        self.fail_submit = true;
        self
    }

    /// Compare the submitted buffer with its contents at submit time on
    /// every poll that reports a pending transfer
    ///
    /// The owner of the buffer must not move while a frame is in flight.
    pub fn watching_frame(mut self) -> Self {
        self.watch_frame = true;
        self
    }
}

impl WaveformEngine for FakeEngine {
    type Error = EngineFault;

    fn configure(&mut self, config: &EngineConfig<'_>) -> Result<(), Self::Error> {
        if self.fail_configure {
            return Err(EngineFault);
        }
        let mut log = self.log.borrow_mut();
        log.events.push(Event::Configure);
        log.configured = Some(Configured {
            program: *config.program,
            clock_hz: config.clock_hz,
            pins: config.pins,
            shift: config.shift,
            transfer_width: config.transfer_width,
        });
        Ok(())
    }

    fn submit_async(&mut self, frame: &[u8], byte_swap: bool) -> Result<(), Self::Error> {
        if self.fail_submit {
            return Err(EngineFault);
        }
        self.log.borrow_mut().events.push(Event::Submit {
            frame: frame.to_vec(),
            byte_swap,
        });
        if self.watch_frame {
            self.in_flight = Some((frame.as_ptr(), frame.to_vec()));
        }
        self.flag.start();
        self.remaining.set(self.busy_polls);
        Ok(())
    }

    fn is_pending(&self) -> bool {
        let remaining = self.remaining.get();
        if remaining > 0 {
            self.remaining.set(remaining - 1);
        } else {
            self.flag.complete();
        }
        let pending = self.flag.is_pending();
        let mut log = self.log.borrow_mut();
        if pending && let Some((ptr, submitted)) = &self.in_flight {
            // SAFETY: the buffer outlives the transfer and stays in place
            // (see `watching_frame`)
            let current = unsafe { std::slice::from_raw_parts(*ptr, submitted.len()) };
            log.frame_checks += 1;
            if current != submitted.as_slice() {
                log.frames_changed += 1;
            }
        }
        log.events.push(Event::Poll(pending));
        pending
    }

    fn release(&mut self) {
        self.log.borrow_mut().events.push(Event::Release);
    }
}

/// Run `program` over one submitted frame and return the pin levels of
/// every cycle (bit `p` = pin `first_pin + p`)
pub fn simulate(program: &WaveformProgram, frame: &[u8], byte_swap: bool) -> Vec<u8> {
    let mut words = frame.chunks_exact(4).map(|chunk| {
        let bytes = [chunk[0], chunk[1], chunk[2], chunk[3]];
        if byte_swap {
            u32::from_be_bytes(bytes)
        } else {
            u32::from_le_bytes(bytes)
        }
    });

    let code = program.instructions();
    let shift = program.shift_direction();
    let pin_mask = u8::try_from((1u16 << program.out_pin_count()) - 1).unwrap();

    let mut osr = 0u32;
    let mut shifted = 32u32;
    let (mut x, mut y) = (0u32, 0u32);
    let mut pins = 0u8;
    let mut pc = usize::from(program.wrap_target());
    let mut levels = Vec::new();

    loop {
        let instruction = code[pc];
        let mut next_pc = if pc == usize::from(program.wrap()) {
            usize::from(program.wrap_target())
        } else {
            pc + 1
        };

        match instruction.op {
            Op::Pull { if_empty } => {
                if !if_empty || shifted >= 32 {
                    let Some(word) = words.next() else {
                        break;
                    };
                    osr = word;
                    shifted = 0;
                }
            }
            Op::Out { target, bits } => {
                let bits = u32::from(bits);
                let value = if bits == 32 {
                    let value = osr;
                    osr = 0;
                    value
                } else {
                    match shift {
                        ShiftDirection::Left => {
                            let value = osr >> (32 - bits);
                            osr <<= bits;
                            value
                        }
                        ShiftDirection::Right => {
                            let value = osr & ((1 << bits) - 1);
                            osr >>= bits;
                            value
                        }
                    }
                };
                shifted += bits;
                match target {
                    OutTarget::Pins => pins = (value & 0xFF) as u8 & pin_mask,
                    OutTarget::Null => {}
                    OutTarget::Counter(Counter::Loop) => y = value,
                    OutTarget::Counter(Counter::Delay) => x = value,
                }
            }
            Op::SetPins(Level::High) => pins = pin_mask,
            Op::SetPins(Level::Low) => pins = 0,
            Op::JumpWhile { counter, target } => {
                let value = match counter {
                    Counter::Loop => &mut y,
                    Counter::Delay => &mut x,
                };
                if *value != 0 {
                    *value -= 1;
                    next_pc = usize::from(target);
                }
            }
        }

        for _ in 0..instruction.cycles() {
            levels.push(pins);
        }
        pc = next_pc;
    }

    levels
}

/// Lengths of the high pulses on `pin`, and the cycles between their
/// rising edges
pub fn pulses(levels: &[u8], pin: u8) -> (Vec<usize>, Vec<usize>) {
    let mask = 1u8 << pin;
    let mut highs = Vec::new();
    let mut rises = Vec::new();
    let mut previous = false;
    for (cycle, level) in levels.iter().enumerate() {
        let high = level & mask != 0;
        if high && !previous {
            rises.push(cycle);
            highs.push(0);
        }
        if high {
            *highs.last_mut().unwrap() += 1;
        }
        previous = high;
    }
    let periods = rises.windows(2).map(|pair| pair[1] - pair[0]).collect();
    (highs, periods)
}

/// Bytes received by the LEDs on `pin` (long pulse = 1, MSB first)
pub fn decode(levels: &[u8], pin: u8) -> Vec<u8> {
    let (highs, _) = pulses(levels, pin);
    highs
        .chunks(8)
        .map(|bits| {
            bits.iter()
                .fold(0u8, |byte, high| (byte << 1) | u8::from(*high >= 10))
        })
        .collect()
}

/// Cycles the line stays low after the last high pulse
pub fn trailing_low(levels: &[u8]) -> usize {
    levels.iter().rev().take_while(|level| **level == 0).count()
}

/// Deterministic, non-trivial pixel bytes
pub fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 37 + 11) as u8).collect()
}
