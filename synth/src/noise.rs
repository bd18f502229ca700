pub const LFSR_SEED: u16 = 0xACE1;

/// 15-bit Fibonacci linear feedback shift register with taps at bits 0 and 1. The feedback bit
/// is shifted in at bit 14, so after the first step the state never exceeds 15 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lfsr {
    state: u16,
}

impl Default for Lfsr {
    fn default() -> Self {
        Self::new(LFSR_SEED)
    }
}

impl Lfsr {
    pub fn new(seed: u16) -> Self {
        Self { state: seed }
    }

    pub fn state(&self) -> u16 {
        self.state
    }

    pub fn step(&mut self) -> u16 {
        let bit = (self.state ^ (self.state >> 1)) & 1;
        self.state = (self.state >> 1) | (bit << 14);
        self.state
    }

    /// Steps the register and maps its low bit to a full-scale sample.
    pub fn next_sample(&mut self) -> f32 {
        if self.step() & 1 == 1 { 1.0 } else { -1.0 }
    }
}
