use crate::{
    noise::Lfsr,
    oscillator::{Oscillator, Square, Triangle},
};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    Square,
    Triangle,
    Noise,
}

impl ChannelKind {
    pub const ALL: [Self; 3] = [Self::Square, Self::Triangle, Self::Noise];

    pub fn label(self) -> &'static str {
        match self {
            Self::Square => "SQ",
            Self::Triangle => "TR",
            Self::Noise => "NS",
        }
    }

    pub fn default_volume(self) -> f32 {
        match self {
            Self::Square => 1.0,
            Self::Triangle => 0.7,
            Self::Noise => 0.5,
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy)]
enum Generator {
    Square(Oscillator<Square>),
    Triangle(Oscillator<Triangle>),
    Noise(Lfsr),
}

/// One voice of the soundboard. A channel only holds generator state; whether it runs on a
/// given sample is decided by the mixer.
#[derive(Debug, Clone, Copy)]
pub struct Channel {
    kind: ChannelKind,
    volume: f32,
    generator: Generator,
}

impl Channel {
    pub fn new(kind: ChannelKind) -> Self {
        let generator = match kind {
            ChannelKind::Square => {
                Generator::Square(Oscillator::new(Square::default()))
            }
            ChannelKind::Triangle => {
                Generator::Triangle(Oscillator::new(Triangle))
            }
            ChannelKind::Noise => Generator::Noise(Lfsr::default()),
        };
        Self {
            kind,
            volume: kind.default_volume(),
            generator,
        }
    }

    pub fn kind(&self) -> ChannelKind {
        self.kind
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Produces the next raw sample in [-1, 1], before volume is applied. The noise channel
    /// ignores the frequency.
    pub fn next_sample(&mut self, freq_hz: f32, sample_rate_hz: f32) -> f32 {
        match &mut self.generator {
            Generator::Square(osc) => osc.next_sample(freq_hz, sample_rate_hz),
            Generator::Triangle(osc) => {
                osc.next_sample(freq_hz, sample_rate_hz)
            }
            Generator::Noise(lfsr) => lfsr.next_sample(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_volumes() {
        assert_eq!(Channel::new(ChannelKind::Square).volume(), 1.0);
        assert_eq!(Channel::new(ChannelKind::Triangle).volume(), 0.7);
        assert_eq!(Channel::new(ChannelKind::Noise).volume(), 0.5);
    }

    #[test]
    fn noise_ignores_frequency() {
        let mut a = Channel::new(ChannelKind::Noise);
        let mut b = Channel::new(ChannelKind::Noise);
        for _ in 0..64 {
            assert_eq!(
                a.next_sample(100.0, 44100.0),
                b.next_sample(900.0, 48000.0)
            );
        }
    }

    #[test]
    fn triangle_starts_at_peak() {
        let mut channel = Channel::new(ChannelKind::Triangle);
        assert_eq!(channel.next_sample(440.0, 44100.0), 1.0);
    }
}
