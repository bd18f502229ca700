use crate::{
    channel::{Channel, ChannelKind},
    shared::Shared,
};
use std::sync::Arc;

/// Peak amplitude of the 16-bit output before it is divided between the three channels.
pub const AMPLITUDE: f32 = 28000.0;

/// Quantizes a mixed sample to 16-bit PCM. The mix of all three channels at full scale peaks at
/// 2.2, which still fits in an i16 after the division by 3.
pub fn to_pcm_i16(mixed: f32) -> i16 {
    (mixed * AMPLITUDE / 3.0) as i16
}

/// Converts a mixed sample to the float format expected by the output stream, going through the
/// same quantization as 16-bit output so both formats sound identical.
pub fn to_output(mixed: f32) -> f32 {
    to_pcm_i16(mixed) as f32 / 32768.0
}

pub struct Mixer {
    sample_rate_hz: f32,
    channels: [Channel; 3],
    shared: Arc<Shared>,
}

impl Mixer {
    pub fn new(sample_rate_hz: f32, shared: Arc<Shared>) -> Self {
        log::debug!("creating mixer at {sample_rate_hz}Hz");
        Self {
            sample_rate_hz,
            channels: ChannelKind::ALL.map(Channel::new),
            shared,
        }
    }

    pub fn sample_rate_hz(&self) -> f32 {
        self.sample_rate_hz
    }

    /// Computes one mono sample, updating the meters and the waveform history.
    pub fn next_sample(&mut self) -> f32 {
        let Shared {
            controls,
            levels,
            history,
        } = &*self.shared;
        let playing = controls.playing();
        let freq_hz = controls.frequency_hz();
        let mut mixed = 0.0;
        for channel in self.channels.iter_mut() {
            let kind = channel.kind();
            if playing && controls.enabled(kind) {
                let sample = channel.next_sample(freq_hz, self.sample_rate_hz);
                levels.set_last_sample(kind, sample);
                mixed += sample * channel.volume();
            } else {
                levels.set_last_sample(kind, 0.0);
            }
        }
        history.push(mixed);
        mixed
    }

    /// Fills an interleaved buffer, writing the same sample to every channel of each frame.
    pub fn fill(&mut self, data: &mut [f32], num_channels: usize) {
        for frame in data.chunks_mut(num_channels) {
            let output = to_output(self.next_sample());
            for element in frame {
                *element = output;
            }
        }
    }
}
