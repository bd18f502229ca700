use crate::font::{Font, load_font};
use anyhow::anyhow;
use sdl2::{
    EventPump,
    pixels::Color,
    rect::Rect,
    render::{Canvas, TextureCreator},
    video::{Window as SdlWindow, WindowContext},
};
use std::{
    path::Path,
    thread,
    time::{Duration, Instant},
};

const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / 60);

/// Where to put a piece of text relative to a rectangle.
#[derive(Debug, Clone, Copy)]
pub enum TextAnchor {
    /// Centred inside the rectangle.
    Center(Rect),
    /// Horizontally centred over the rectangle, with its bottom edge `gap_px` above it.
    Above { rect: Rect, gap_px: i32 },
}

impl TextAnchor {
    pub fn place(self, text_width: u32, text_height: u32) -> Rect {
        let (x, y) = match self {
            Self::Center(rect) => (
                rect.x() + (rect.width() as i32 - text_width as i32) / 2,
                rect.y() + (rect.height() as i32 - text_height as i32) / 2,
            ),
            Self::Above { rect, gap_px } => (
                rect.x() + (rect.width() as i32 - text_width as i32) / 2,
                rect.y() - text_height as i32 - gap_px,
            ),
        };
        Rect::new(x, y, text_width, text_height)
    }
}

pub struct WindowConfig<'a> {
    pub title: &'a str,
    pub width_px: u32,
    pub height_px: u32,
    pub font_path: &'a Path,
    pub font_pt_size: u16,
}

pub struct Window {
    pub canvas: Canvas<SdlWindow>,
    pub event_pump: EventPump,
    pub font: Font<'static, 'static>,
    pub texture_creator: TextureCreator<WindowContext>,
    pub prev_tick_complete: Instant,
    width_px: u32,
    height_px: u32,
}

impl Window {
    pub fn new(config: WindowConfig<'_>) -> anyhow::Result<Self> {
        // Load the font first so a missing font fails before a window appears.
        let font = load_font(config.font_path, config.font_pt_size)?;
        let sdl_context = sdl2::init().map_err(|e| anyhow!(e))?;
        let video_subsystem = sdl_context.video().map_err(|e| anyhow!(e))?;
        let window = video_subsystem
            .window(config.title, config.width_px, config.height_px)
            .position_centered()
            .build()?;
        let canvas = window
            .into_canvas()
            .accelerated()
            .target_texture()
            .present_vsync()
            .build()?;
        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump().map_err(|e| anyhow!(e))?;
        log::info!(
            "opened window \"{}\" ({}x{})",
            config.title,
            config.width_px,
            config.height_px
        );
        Ok(Self {
            canvas,
            event_pump,
            font,
            texture_creator,
            prev_tick_complete: Instant::now(),
            width_px: config.width_px,
            height_px: config.height_px,
        })
    }

    pub fn wait_until_next_frame(&self) {
        if let Some(period_to_sleep) = (self.prev_tick_complete
            + FRAME_DURATION)
            .checked_duration_since(Instant::now())
        {
            thread::sleep(period_to_sleep);
        }
    }

    pub fn width_px(&self) -> u32 {
        self.width_px
    }

    pub fn height_px(&self) -> u32 {
        self.height_px
    }

    pub fn clear(&mut self, color: Color) {
        self.canvas.set_draw_color(color);
        self.canvas.clear();
    }

    /// Draws horizontal and vertical lines every `spacing_px` pixels across the whole window.
    pub fn render_grid(
        &mut self,
        spacing_px: usize,
        color: Color,
    ) -> anyhow::Result<()> {
        let width = self.width_px as i32;
        let height = self.height_px as i32;
        self.canvas.set_draw_color(color);
        for x in (0..width).step_by(spacing_px) {
            self.canvas
                .draw_line((x, 0), (x, height))
                .map_err(|e| anyhow!("{e}"))?;
        }
        for y in (0..height).step_by(spacing_px) {
            self.canvas
                .draw_line((0, y), (width, y))
                .map_err(|e| anyhow!("{e}"))?;
        }
        Ok(())
    }

    pub fn render_text(
        &mut self,
        text: &str,
        color: Color,
        anchor: TextAnchor,
    ) -> anyhow::Result<()> {
        let text_surface = self
            .font
            .render(text)
            .solid(color)
            .map_err(|e| anyhow!("{e}"))?;
        let text_texture = text_surface.as_texture(&self.texture_creator)?;
        let text_texture_query = text_texture.query();
        let text_rect =
            anchor.place(text_texture_query.width, text_texture_query.height);
        self.canvas
            .copy(&text_texture, None, Some(text_rect))
            .map_err(|e| anyhow!("{e}"))?;
        Ok(())
    }

    pub fn present(&mut self) {
        self.canvas.present();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn centred_text() {
        let rect = TextAnchor::Center(Rect::new(50, 350, 100, 30)).place(40, 18);
        assert_eq!(rect, Rect::new(80, 356, 40, 18));
    }

    #[test]
    fn text_above_rect() {
        let rect = TextAnchor::Above {
            rect: Rect::new(100, 410, 440, 20),
            gap_px: 5,
        }
        .place(120, 19);
        assert_eq!(rect, Rect::new(260, 386, 120, 19));
    }
}
