pub mod waveform {
    pub trait Waveform: Copy {
        fn sample(&self, phase_01: f32) -> f32;
    }

    #[derive(Debug, Clone, Copy)]
    pub struct Square {
        pub duty_01: f32,
    }

    impl Default for Square {
        fn default() -> Self {
            Self { duty_01: 0.5 }
        }
    }

    impl Waveform for Square {
        fn sample(&self, phase_01: f32) -> f32 {
            if phase_01 < self.duty_01 { 1.0 } else { -1.0 }
        }
    }

    #[derive(Debug, Clone, Copy, Default)]
    pub struct Triangle;

    impl Waveform for Triangle {
        fn sample(&self, phase_01: f32) -> f32 {
            (((phase_01 * 2.0) - 1.0).abs() * 2.0) - 1.0
        }
    }
}

pub use waveform::{Square, Triangle, Waveform};

/// Normalized position within one cycle of a periodic waveform.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Phase(f32);

impl Phase {
    pub fn new(phase_01: f32) -> Self {
        Self(phase_01)
    }

    pub fn get(self) -> f32 {
        self.0
    }

    /// Moves the phase forward by one sample. Wraps at most once per call, so the phase only
    /// stays below 1 while `freq_hz` is below the sample rate.
    pub fn advance(&mut self, freq_hz: f32, sample_rate_hz: f32) {
        self.0 += freq_hz / sample_rate_hz;
        if self.0 >= 1.0 {
            self.0 -= 1.0;
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Oscillator<W: Waveform> {
    waveform: W,
    phase: Phase,
}

impl<W: Waveform> Oscillator<W> {
    pub fn new(waveform: W) -> Self {
        Self {
            waveform,
            phase: Phase::default(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the value at the current phase and then advances the phase.
    pub fn next_sample(&mut self, freq_hz: f32, sample_rate_hz: f32) -> f32 {
        let sample = self.waveform.sample(self.phase.get());
        self.phase.advance(freq_hz, sample_rate_hz);
        sample
    }
}
