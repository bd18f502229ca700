use cpal::{
    BufferSize, Device, OutputCallbackInfo, SampleRate, StreamConfig,
    SupportedBufferSize,
    traits::{DeviceTrait, HostTrait, StreamTrait},
};
use soundboard_synth::{Mixer, Shared};
use std::sync::Arc;

#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// default: 0.01
    pub target_latency_s: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_latency_s: 0.01,
        }
    }
}

/// Picks a buffer size close to the target latency. The result is a multiple of 4 unless the
/// device's supported range forces otherwise.
fn choose_buffer_size(
    sample_rate: SampleRate,
    channels: u16,
    supported: &SupportedBufferSize,
    config: Config,
) -> BufferSize {
    let ideal_buffer_size = (sample_rate.0 as f32 * config.target_latency_s)
        as u32
        * channels as u32;
    // Alsa complains if the buffer size is not evenly divisible by 4.
    let ideal_buffer_size = ideal_buffer_size & (!3);
    match supported {
        SupportedBufferSize::Range { min, max } => {
            BufferSize::Fixed(ideal_buffer_size.clamp(*min, *max))
        }
        SupportedBufferSize::Unknown => BufferSize::Default,
    }
}

pub struct Player {
    device: Device,
}

/// Keeps the output stream alive. Audio stops when this is dropped.
pub struct PlayingStream {
    _stream: cpal::Stream,
    config: StreamConfig,
}

impl PlayingStream {
    pub fn sample_rate_hz(&self) -> u32 {
        self.config.sample_rate.0
    }

    pub fn channels(&self) -> u16 {
        self.config.channels
    }
}

impl Player {
    pub fn new() -> anyhow::Result<Self> {
        let host = cpal::default_host();
        log::info!("cpal host: {}", host.id().name());
        let device = host
            .default_output_device()
            .ok_or(anyhow::anyhow!("no output device"))?;
        if let Ok(name) = device.name() {
            log::info!("cpal device: {}", name);
        } else {
            log::info!("cpal device: (no name)");
        }
        Ok(Self { device })
    }

    fn choose_config(&self, config: Config) -> anyhow::Result<StreamConfig> {
        let default_config = self.device.default_output_config()?;
        let sample_rate = default_config.sample_rate();
        let channels = default_config.channels();
        anyhow::ensure!(channels > 0, "output device has no channels");
        let buffer_size = choose_buffer_size(
            sample_rate,
            channels,
            default_config.buffer_size(),
            config,
        );
        Ok(StreamConfig {
            channels,
            sample_rate,
            buffer_size,
        })
    }

    /// Starts an output stream that runs a new mixer on the audio thread. The mixer reads its
    /// controls from `shared` and writes its meters and history back into it.
    pub fn play(
        &self,
        shared: Arc<Shared>,
        config: Config,
    ) -> anyhow::Result<PlayingStream> {
        let config = self.choose_config(config)?;
        log::info!("sample rate: {}", config.sample_rate.0);
        log::info!("num channels: {}", config.channels);
        log::info!("buffer size: {:?}", config.buffer_size);
        let mut mixer = Mixer::new(config.sample_rate.0 as f32, shared);
        let channels = config.channels as usize;
        let stream = self.device.build_output_stream(
            &config,
            move |data: &mut [f32], _: &OutputCallbackInfo| {
                mixer.fill(data, channels);
            },
            |err| log::error!("stream error: {}", err),
            None,
        )?;
        stream.play()?;
        Ok(PlayingStream {
            _stream: stream,
            config,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn buffer_size_targets_latency_in_multiples_of_4() {
        let size = choose_buffer_size(
            SampleRate(44100),
            2,
            &SupportedBufferSize::Range { min: 0, max: 8192 },
            Config::default(),
        );
        // 441 frames * 2 channels rounded down to a multiple of 4
        assert_eq!(size, BufferSize::Fixed(880));
    }

    #[test]
    fn buffer_size_is_clamped_to_supported_range() {
        let supported = SupportedBufferSize::Range { min: 1024, max: 2048 };
        let small = choose_buffer_size(
            SampleRate(48000),
            1,
            &supported,
            Config::default(),
        );
        assert_eq!(small, BufferSize::Fixed(1024));
        let large = choose_buffer_size(
            SampleRate(48000),
            2,
            &supported,
            Config {
                target_latency_s: 1.0,
            },
        );
        assert_eq!(large, BufferSize::Fixed(2048));
    }

    #[test]
    fn unknown_range_uses_default() {
        let size = choose_buffer_size(
            SampleRate(44100),
            2,
            &SupportedBufferSize::Unknown,
            Config::default(),
        );
        assert_eq!(size, BufferSize::Default);
    }
}
