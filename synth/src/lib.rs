//! Sound generation for the soundboard. Everything in this crate is safe to run on the audio
//! thread: no allocation happens after construction and nothing takes a lock.

pub mod channel;
pub mod mixer;
pub mod noise;
pub mod oscillator;
pub mod shared;

pub use channel::{Channel, ChannelKind};
pub use mixer::{AMPLITUDE, Mixer, to_output, to_pcm_i16};
pub use noise::Lfsr;
pub use oscillator::{Oscillator, Phase, Square, Triangle, Waveform};
pub use shared::{
    Controls, FREQUENCY_MAX_HZ, FREQUENCY_MIN_HZ, HISTORY_LEN, Levels,
    Shared, WaveformHistory,
};
