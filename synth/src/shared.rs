//! State shared between the audio thread and the render thread. The audio thread is the only
//! writer of the history and the levels, and the UI is the only writer of the controls. All
//! fields are atomics accessed with relaxed ordering: a reader may see a mixture of old and new
//! samples, which is harmless for a visualization.

use crate::channel::ChannelKind;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};

pub const HISTORY_LEN: usize = 512;
pub const FREQUENCY_MIN_HZ: f32 = 100.0;
pub const FREQUENCY_MAX_HZ: f32 = 900.0;
pub const DEFAULT_FREQUENCY_HZ: f32 = 440.0;

#[derive(Debug)]
struct AtomicF32(AtomicU32);

impl AtomicF32 {
    fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

/// Per-channel storage indexed by `ChannelKind`.
#[derive(Debug)]
struct PerChannel<T> {
    square: T,
    triangle: T,
    noise: T,
}

impl<T> PerChannel<T> {
    fn new(mut f: impl FnMut() -> T) -> Self {
        Self {
            square: f(),
            triangle: f(),
            noise: f(),
        }
    }

    fn get(&self, kind: ChannelKind) -> &T {
        match kind {
            ChannelKind::Square => &self.square,
            ChannelKind::Triangle => &self.triangle,
            ChannelKind::Noise => &self.noise,
        }
    }
}

/// Settings written by the UI and read by the mixer once per sample.
#[derive(Debug)]
pub struct Controls {
    playing: AtomicBool,
    enabled: PerChannel<AtomicBool>,
    frequency_hz: AtomicF32,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            playing: AtomicBool::new(false),
            enabled: PerChannel::new(|| AtomicBool::new(true)),
            frequency_hz: AtomicF32::new(DEFAULT_FREQUENCY_HZ),
        }
    }
}

impl Controls {
    pub fn playing(&self) -> bool {
        self.playing.load(Ordering::Relaxed)
    }

    pub fn set_playing(&self, playing: bool) {
        self.playing.store(playing, Ordering::Relaxed);
    }

    pub fn toggle_playing(&self) -> bool {
        !self.playing.fetch_xor(true, Ordering::Relaxed)
    }

    pub fn enabled(&self, kind: ChannelKind) -> bool {
        self.enabled.get(kind).load(Ordering::Relaxed)
    }

    pub fn set_enabled(&self, kind: ChannelKind, enabled: bool) {
        self.enabled.get(kind).store(enabled, Ordering::Relaxed);
    }

    /// Returns the new state of the channel.
    pub fn toggle_enabled(&self, kind: ChannelKind) -> bool {
        !self.enabled.get(kind).fetch_xor(true, Ordering::Relaxed)
    }

    pub fn frequency_hz(&self) -> f32 {
        self.frequency_hz.load()
    }

    /// Stores the frequency clamped to the range of the slider.
    pub fn set_frequency_hz(&self, frequency_hz: f32) {
        self.frequency_hz
            .store(frequency_hz.clamp(FREQUENCY_MIN_HZ, FREQUENCY_MAX_HZ));
    }
}

/// The most recent raw sample of each channel, used for the bar meters.
#[derive(Debug)]
pub struct Levels(PerChannel<AtomicF32>);

impl Default for Levels {
    fn default() -> Self {
        Self(PerChannel::new(|| AtomicF32::new(0.0)))
    }
}

impl Levels {
    pub fn last_sample(&self, kind: ChannelKind) -> f32 {
        self.0.get(kind).load()
    }

    pub fn set_last_sample(&self, kind: ChannelKind, sample: f32) {
        self.0.get(kind).store(sample);
    }
}

/// Fixed-size circular buffer of the most recent mixed samples.
#[derive(Debug)]
pub struct WaveformHistory {
    samples: Box<[AtomicU32]>,
    write_index: AtomicUsize,
}

impl Default for WaveformHistory {
    fn default() -> Self {
        Self::new(HISTORY_LEN)
    }
}

impl WaveformHistory {
    pub fn new(len: usize) -> Self {
        assert!(len > 0, "history must hold at least one sample");
        Self {
            samples: (0..len).map(|_| AtomicU32::new(0.0f32.to_bits())).collect(),
            write_index: AtomicUsize::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Index of the slot that the next sample will overwrite, which is also the oldest sample.
    pub fn write_index(&self) -> usize {
        self.write_index.load(Ordering::Relaxed)
    }

    /// Must only be called from a single thread.
    pub fn push(&self, sample: f32) {
        let index = self.write_index.load(Ordering::Relaxed);
        self.samples[index].store(sample.to_bits(), Ordering::Relaxed);
        self.write_index
            .store((index + 1) % self.samples.len(), Ordering::Relaxed);
    }

    /// Copies the history into `out`, oldest sample first.
    pub fn snapshot_into(&self, out: &mut Vec<f32>) {
        out.clear();
        let start = self.write_index();
        let len = self.samples.len();
        out.extend((0..len).map(|i| {
            f32::from_bits(self.samples[(start + i) % len].load(Ordering::Relaxed))
        }));
    }

    pub fn snapshot(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.samples.len());
        self.snapshot_into(&mut out);
        out
    }
}

#[derive(Debug, Default)]
pub struct Shared {
    pub controls: Controls,
    pub levels: Levels,
    pub history: WaveformHistory,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn controls_default_to_stopped_with_all_channels_on() {
        let controls = Controls::default();
        assert!(!controls.playing());
        for kind in ChannelKind::ALL {
            assert!(controls.enabled(kind));
        }
        assert_eq!(controls.frequency_hz(), 440.0);
    }

    #[test]
    fn toggles_report_the_new_state() {
        let controls = Controls::default();
        assert!(controls.toggle_playing());
        assert!(controls.playing());
        assert!(!controls.toggle_enabled(ChannelKind::Noise));
        assert!(!controls.enabled(ChannelKind::Noise));
        assert!(controls.enabled(ChannelKind::Square));
    }

    #[test]
    fn frequency_is_clamped_to_slider_range() {
        let controls = Controls::default();
        controls.set_frequency_hz(50.0);
        assert_eq!(controls.frequency_hz(), FREQUENCY_MIN_HZ);
        controls.set_frequency_hz(1000.0);
        assert_eq!(controls.frequency_hz(), FREQUENCY_MAX_HZ);
        controls.set_frequency_hz(523.25);
        assert_eq!(controls.frequency_hz(), 523.25);
    }

    #[test]
    fn history_wraps_and_snapshots_oldest_first() {
        let history = WaveformHistory::new(4);
        for i in 0..6 {
            history.push(i as f32);
        }
        assert_eq!(history.write_index(), 2);
        assert_eq!(history.snapshot(), [2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn history_can_be_read_while_written() {
        use std::{sync::Arc, thread};
        let shared = Arc::new(Shared::default());
        let writer = {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                for i in 0..100_000 {
                    shared.history.push((i % 3) as f32);
                }
            })
        };
        let mut buf = Vec::new();
        for _ in 0..100 {
            shared.history.snapshot_into(&mut buf);
            assert_eq!(buf.len(), HISTORY_LEN);
            assert!(buf.iter().all(|&s| s == 0.0 || s == 1.0 || s == 2.0));
        }
        writer.join().unwrap();
    }
}
