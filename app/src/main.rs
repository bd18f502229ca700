mod soundboard;

use clap::Parser;
use soundboard::{HEIGHT_PX, Soundboard, Visualization, WIDTH_PX};
use soundboard_player::{Config, Player};
use soundboard_synth::Shared;
use soundboard_widgets::{Window, WindowConfig};
use std::{path::PathBuf, sync::Arc};

#[derive(Parser, Debug)]
#[command(
    name = "soundboard",
    about = "Square, triangle and noise channels mixed live with a visualizer",
    long_about = None
)]
struct Args {
    /// TrueType font used for button and slider labels
    #[arg(long, value_name = "PATH", default_value = "DejaVuSans.ttf")]
    font: PathBuf,

    #[arg(long, value_name = "PT", default_value_t = 16)]
    font_size: u16,

    /// Initial frequency, clamped to the slider's range of 100-900Hz
    #[arg(long, value_name = "HZ", default_value_t = 440.0)]
    frequency: f32,

    /// Requested size of the audio buffer, in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = 0.01)]
    target_latency: f32,

    /// Start with the bar meters rather than the waveform
    #[arg(long)]
    bars: bool,

    /// Start playing immediately
    #[arg(long)]
    play: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let shared = Arc::new(Shared::default());
    shared.controls.set_frequency_hz(args.frequency);
    shared.controls.set_playing(args.play);
    let window = Window::new(WindowConfig {
        title: "Soundboard",
        width_px: WIDTH_PX,
        height_px: HEIGHT_PX,
        font_path: &args.font,
        font_pt_size: args.font_size,
    })?;
    let player = Player::new()?;
    let stream = player.play(
        Arc::clone(&shared),
        Config {
            target_latency_s: args.target_latency,
        },
    )?;
    log::info!(
        "playing at {}Hz on {} channel(s)",
        stream.sample_rate_hz(),
        stream.channels()
    );
    let visualization = if args.bars {
        Visualization::Bars
    } else {
        Visualization::Waveform
    };
    Soundboard::new(window, shared, visualization).run()?;
    drop(stream);
    Ok(())
}
