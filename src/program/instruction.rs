/// Pin level driven on every active output pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

/// Scratch counter of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    /// Iteration counter, loaded from the envelope header
    Loop,
    /// Reset delay counter, loaded from the envelope trailer
    Delay,
}

/// Destination of shifted-out bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutTarget {
    /// Output pins, one bit per pin
    Pins,
    /// Discarded
    Null,
    /// A scratch counter
    Counter(Counter),
}

/// Operation of a single instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// Refill the shift register from the transfer queue, stalling until a
    /// word is available. With `if_empty` set the refill only happens once
    /// the current word is used up.
    Pull { if_empty: bool },
    /// Shift `bits` bits out of the shift register
    Out { target: OutTarget, bits: u8 },
    /// Drive all active pins to `level`
    SetPins(Level),
    /// Jump to `target` while `counter` is non-zero, decrementing it
    JumpWhile { counter: Counter, target: u8 },
}

/// Instruction with its trailing delay
///
/// Every instruction takes one cycle plus `delay` idle cycles during which
/// the pins keep their level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub op: Op,
    pub delay: u8,
}

impl Instruction {
    pub const fn new(op: Op) -> Self {
        Self { op, delay: 0 }
    }

    pub const fn with_delay(self, delay: u8) -> Self {
        Self {
            op: self.op,
            delay,
        }
    }

    /// Cycles spent on this instruction, excluding stalls
    pub const fn cycles(self) -> u32 {
        1 + self.delay as u32
    }

    pub const fn pull() -> Self {
        Self::new(Op::Pull { if_empty: false })
    }

    pub const fn pull_if_empty() -> Self {
        Self::new(Op::Pull { if_empty: true })
    }

    pub const fn out(target: OutTarget, bits: u8) -> Self {
        Self::new(Op::Out { target, bits })
    }

    pub const fn set_pins(level: Level) -> Self {
        Self::new(Op::SetPins(level))
    }

    pub const fn jump_while(counter: Counter, target: u8) -> Self {
        Self::new(Op::JumpWhile { counter, target })
    }
}
