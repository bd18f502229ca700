use sdl2::{event::Event, keyboard::Scancode, pixels::Color, rect::Rect};
use soundboard_synth::{
    ChannelKind, FREQUENCY_MAX_HZ, FREQUENCY_MIN_HZ, Shared,
};
use soundboard_widgets::{
    BarMeters, Button, Coord, Slider, WaveformView, Window,
};
use std::{sync::Arc, time::Instant};

pub const WIDTH_PX: u32 = 640;
pub const HEIGHT_PX: u32 = 480;
const GRID_SPACING_PX: usize = 32;
const BACKGROUND: Color = Color::WHITE;
const GRID: Color = Color::RGB(0, 0, 128);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visualization {
    Waveform,
    Bars,
}

impl Visualization {
    fn toggle(self) -> Self {
        match self {
            Self::Waveform => Self::Bars,
            Self::Bars => Self::Waveform,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Waveform => "Waveform",
            Self::Bars => "Bars",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Play,
    Channel(ChannelKind),
    Visualization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct Layout {
    play: Button,
    square: Button,
    triangle: Button,
    noise: Button,
    visualization: Button,
    frequency: Slider,
}

impl Layout {
    fn new() -> Self {
        Self {
            play: Button::new(Rect::new(50, 350, 100, 30)),
            square: Button::new(Rect::new(180, 350, 50, 30)),
            triangle: Button::new(Rect::new(240, 350, 50, 30)),
            noise: Button::new(Rect::new(300, 350, 50, 30)),
            visualization: Button::new(Rect::new(550, 400, 80, 30)),
            frequency: Slider::new(
                Rect::new(100, 410, 440, 20),
                FREQUENCY_MIN_HZ,
                FREQUENCY_MAX_HZ,
            ),
        }
    }

    fn channel_button(&self, kind: ChannelKind) -> &Button {
        match kind {
            ChannelKind::Square => &self.square,
            ChannelKind::Triangle => &self.triangle,
            ChannelKind::Noise => &self.noise,
        }
    }

    /// The first control under the point, checked in a fixed order.
    fn control_at(&self, point: Coord) -> Option<Control> {
        if self.play.contains(point) {
            return Some(Control::Play);
        }
        for kind in ChannelKind::ALL {
            if self.channel_button(kind).contains(point) {
                return Some(Control::Channel(kind));
            }
        }
        if self.visualization.contains(point) {
            return Some(Control::Visualization);
        }
        None
    }
}

/// Everything the UI knows apart from the window itself.
struct UiState {
    shared: Arc<Shared>,
    layout: Layout,
    visualization: Visualization,
    mouse_position: Coord,
}

impl UiState {
    fn new(shared: Arc<Shared>, visualization: Visualization) -> Self {
        Self {
            shared,
            layout: Layout::new(),
            visualization,
            mouse_position: Coord::new(0, 0),
        }
    }

    fn activate(&mut self, control: Control) {
        let controls = &self.shared.controls;
        match control {
            Control::Play => {
                let playing = controls.toggle_playing();
                log::debug!("playing: {playing}");
            }
            Control::Channel(kind) => {
                let enabled = controls.toggle_enabled(kind);
                log::debug!("{kind} enabled: {enabled}");
            }
            Control::Visualization => {
                self.visualization = self.visualization.toggle();
                log::debug!("visualization: {:?}", self.visualization);
            }
        }
    }

    fn set_frequency_from_x(&mut self, x: i32) {
        let frequency_hz = self.layout.frequency.value_at(x);
        self.shared.controls.set_frequency_hz(frequency_hz);
        log::debug!("frequency: {frequency_hz}Hz");
    }

    fn click(&mut self, point: Coord) {
        if let Some(control) = self.layout.control_at(point) {
            self.activate(control);
        } else if self.layout.frequency.contains(point) {
            self.set_frequency_from_x(point.x);
        }
    }

    fn hover(&mut self, point: Coord) {
        self.mouse_position = point;
    }

    fn motion(&mut self, point: Coord, left_held: bool) {
        self.hover(point);
        if left_held && self.layout.frequency.contains(point) {
            self.set_frequency_from_x(point.x);
        }
    }

    fn key(&mut self, scancode: Scancode) -> Flow {
        match scancode {
            Scancode::Escape => return Flow::Quit,
            Scancode::Space => self.activate(Control::Play),
            Scancode::Num1 => {
                self.activate(Control::Channel(ChannelKind::Square))
            }
            Scancode::Num2 => {
                self.activate(Control::Channel(ChannelKind::Triangle))
            }
            Scancode::Num3 => {
                self.activate(Control::Channel(ChannelKind::Noise))
            }
            Scancode::V => self.activate(Control::Visualization),
            _ => (),
        }
        Flow::Continue
    }

    fn handle_event(&mut self, event: Event) -> Flow {
        match event {
            Event::Quit { .. } => return Flow::Quit,
            Event::MouseButtonDown { x, y, .. } => {
                self.click(Coord::new(x, y))
            }
            Event::MouseMotion {
                mousestate, x, y, ..
            } => self.motion(Coord::new(x, y), mousestate.left()),
            Event::KeyDown {
                scancode: Some(scancode),
                repeat: false,
                ..
            } => return self.key(scancode),
            _ => (),
        }
        Flow::Continue
    }

    /// Meter inputs for this frame: each channel's latest sample scaled by its volume.
    fn channel_levels(&self) -> [f32; 3] {
        ChannelKind::ALL.map(|kind| {
            self.shared.levels.last_sample(kind).abs() * kind.default_volume()
        })
    }

    fn play_label(&self) -> &'static str {
        if self.shared.controls.playing() {
            "Stop"
        } else {
            "Play"
        }
    }

    fn channel_label(&self, kind: ChannelKind) -> String {
        if self.shared.controls.enabled(kind) {
            format!("{} [*]", kind.label())
        } else {
            kind.label().to_string()
        }
    }

    fn frequency_label(&self) -> String {
        format!("Freq: {:.1} Hz", self.shared.controls.frequency_hz())
    }
}

pub struct Soundboard {
    window: Window,
    ui: UiState,
    meters: BarMeters<3>,
    waveform: WaveformView,
    history_buf: Vec<f32>,
    coords: Vec<Coord>,
}

impl Soundboard {
    pub fn new(
        window: Window,
        shared: Arc<Shared>,
        visualization: Visualization,
    ) -> Self {
        Self {
            window,
            ui: UiState::new(shared, visualization),
            meters: BarMeters::new([
                Color::RGB(0, 200, 0),
                Color::RGB(0, 100, 255),
                Color::RGB(255, 100, 100),
            ]),
            waveform: WaveformView::default(),
            history_buf: Vec::new(),
            coords: Vec::new(),
        }
    }

    fn handle_events(&mut self) -> Flow {
        for event in self.window.event_pump.poll_iter() {
            if self.ui.handle_event(event) == Flow::Quit {
                return Flow::Quit;
            }
        }
        Flow::Continue
    }

    fn render_visualization(&mut self) -> anyhow::Result<()> {
        match self.ui.visualization {
            Visualization::Waveform => {
                self.ui.shared.history.snapshot_into(&mut self.history_buf);
                self.waveform.render(
                    &self.history_buf,
                    &mut self.coords,
                    &mut self.window,
                )
            }
            Visualization::Bars => self.meters.render(&mut self.window),
        }
    }

    fn render_controls(&mut self) -> anyhow::Result<()> {
        let ui = &self.ui;
        let layout = &ui.layout;
        let mouse_position = ui.mouse_position;
        layout.frequency.render(
            ui.shared.controls.frequency_hz(),
            &ui.frequency_label(),
            &mut self.window,
        )?;
        layout
            .play
            .render(ui.play_label(), mouse_position, &mut self.window)?;
        for kind in ChannelKind::ALL {
            layout.channel_button(kind).render(
                &ui.channel_label(kind),
                mouse_position,
                &mut self.window,
            )?;
        }
        layout.visualization.render(
            ui.visualization.label(),
            mouse_position,
            &mut self.window,
        )
    }

    fn render(&mut self) -> anyhow::Result<()> {
        self.window.clear(BACKGROUND);
        self.window.render_grid(GRID_SPACING_PX, GRID)?;
        self.render_visualization()?;
        self.render_controls()?;
        self.window.present();
        Ok(())
    }

    fn update(&mut self) -> anyhow::Result<Flow> {
        if self.handle_events() == Flow::Quit {
            return Ok(Flow::Quit);
        }
        let mouse_state = self.window.event_pump.mouse_state();
        self.ui.hover(Coord::new(mouse_state.x(), mouse_state.y()));
        // Meters keep moving even while hidden so switching views shows current levels.
        let playing = self.ui.shared.controls.playing();
        self.meters.update(playing, self.ui.channel_levels());
        self.render()?;
        Ok(Flow::Continue)
    }

    /// Runs the frame loop until the window is closed.
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            self.window.wait_until_next_frame();
            let flow = self.update()?;
            self.window.prev_tick_complete = Instant::now();
            if flow == Flow::Quit {
                log::info!("quitting");
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use sdl2::mouse::MouseButton;

    fn ui() -> UiState {
        UiState::new(Arc::new(Shared::default()), Visualization::Waveform)
    }

    #[test]
    fn controls_are_found_by_position() {
        let layout = Layout::new();
        assert_eq!(layout.control_at(Coord::new(60, 360)), Some(Control::Play));
        assert_eq!(
            layout.control_at(Coord::new(200, 360)),
            Some(Control::Channel(ChannelKind::Square))
        );
        assert_eq!(
            layout.control_at(Coord::new(260, 360)),
            Some(Control::Channel(ChannelKind::Triangle))
        );
        assert_eq!(
            layout.control_at(Coord::new(349, 379)),
            Some(Control::Channel(ChannelKind::Noise))
        );
        assert_eq!(
            layout.control_at(Coord::new(600, 420)),
            Some(Control::Visualization)
        );
        assert_eq!(layout.control_at(Coord::new(235, 360)), None);
        assert_eq!(layout.control_at(Coord::new(320, 240)), None);
    }

    #[test]
    fn clicking_toggles_controls() {
        let mut ui = ui();
        ui.click(Coord::new(60, 360));
        assert!(ui.shared.controls.playing());
        assert_eq!(ui.play_label(), "Stop");
        ui.click(Coord::new(310, 360));
        assert!(!ui.shared.controls.enabled(ChannelKind::Noise));
        assert_eq!(ui.channel_label(ChannelKind::Noise), "NS");
        assert_eq!(ui.channel_label(ChannelKind::Square), "SQ [*]");
        ui.click(Coord::new(600, 420));
        assert_eq!(ui.visualization, Visualization::Bars);
        ui.click(Coord::new(600, 420));
        assert_eq!(ui.visualization, Visualization::Waveform);
    }

    #[test]
    fn dragging_on_the_slider_sets_frequency() {
        let mut ui = ui();
        ui.motion(Coord::new(320, 420), false);
        assert_eq!(ui.shared.controls.frequency_hz(), 440.0);
        ui.motion(Coord::new(320, 420), true);
        assert_eq!(ui.shared.controls.frequency_hz(), 500.0);
        assert_eq!(ui.frequency_label(), "Freq: 500.0 Hz");
        // Dragging outside the track leaves the frequency alone.
        ui.motion(Coord::new(320, 300), true);
        assert_eq!(ui.shared.controls.frequency_hz(), 500.0);
        assert_eq!(ui.mouse_position, Coord::new(320, 300));
    }

    fn button_down(mouse_btn: MouseButton, x: i32, y: i32) -> Event {
        Event::MouseButtonDown {
            timestamp: 0,
            window_id: 0,
            which: 0,
            mouse_btn,
            clicks: 1,
            x,
            y,
        }
    }

    #[test]
    fn any_mouse_button_toggles_controls() {
        let mut ui = ui();
        let flow = ui.handle_event(button_down(MouseButton::Right, 60, 360));
        assert_eq!(flow, Flow::Continue);
        assert!(ui.shared.controls.playing());
        ui.handle_event(button_down(MouseButton::Middle, 200, 360));
        assert!(!ui.shared.controls.enabled(ChannelKind::Square));
        ui.handle_event(button_down(MouseButton::Left, 60, 360));
        assert!(!ui.shared.controls.playing());
    }

    #[test]
    fn hover_follows_polled_position_without_motion() {
        let mut ui = ui();
        assert!(!ui.layout.play.contains(ui.mouse_position));
        ui.hover(Coord::new(60, 360));
        assert!(ui.layout.play.contains(ui.mouse_position));
        assert_eq!(ui.shared.controls.frequency_hz(), 440.0);
    }

    #[test]
    fn clicking_the_slider_sets_frequency() {
        let mut ui = ui();
        ui.click(Coord::new(100, 415));
        assert_eq!(ui.shared.controls.frequency_hz(), 100.0);
    }

    #[test]
    fn keyboard_shortcuts() {
        let mut ui = ui();
        assert_eq!(ui.key(Scancode::Space), Flow::Continue);
        assert!(ui.shared.controls.playing());
        ui.key(Scancode::Num2);
        assert!(!ui.shared.controls.enabled(ChannelKind::Triangle));
        ui.key(Scancode::V);
        assert_eq!(ui.visualization, Visualization::Bars);
        assert_eq!(ui.key(Scancode::Escape), Flow::Quit);
    }

    #[test]
    fn levels_scale_by_channel_volume() {
        let ui = ui();
        let levels = &ui.shared.levels;
        levels.set_last_sample(ChannelKind::Square, -1.0);
        levels.set_last_sample(ChannelKind::Triangle, 0.5);
        levels.set_last_sample(ChannelKind::Noise, 1.0);
        assert_eq!(ui.channel_levels(), [1.0, 0.35, 0.5]);
    }
}
