use crate::window::Window;
use anyhow::anyhow;
use sdl2::{pixels::Color, rect::Rect};

const BAR_WIDTH_PX: u32 = 20;
const BAR_SPACING_PX: u32 = 10;
const BASE_OFFSET_PX: i32 = 100;
const MAX_HEIGHT_PX: f32 = 200.0;
const DECAY_PER_FRAME: f32 = 0.01;

/// A row of vertical level bars right-aligned to the window. Levels follow the input while
/// active and fall back to zero at a fixed rate per frame otherwise.
pub struct BarMeters<const N: usize> {
    colors: [Color; N],
    levels: [f32; N],
}

impl<const N: usize> BarMeters<N> {
    pub fn new(colors: [Color; N]) -> Self {
        Self {
            colors,
            levels: [0.0; N],
        }
    }

    pub fn levels(&self) -> &[f32; N] {
        &self.levels
    }

    /// Called once per frame.
    pub fn update(&mut self, active: bool, input_levels: [f32; N]) {
        if active {
            self.levels = input_levels;
        } else {
            for level in self.levels.iter_mut() {
                *level = (*level - DECAY_PER_FRAME).max(0.0);
            }
        }
    }

    /// Returns `None` for bars with no height, since sdl2 rounds empty rectangles up to 1px.
    pub fn bar_rect(
        &self,
        index: usize,
        width_px: u32,
        height_px: u32,
    ) -> Option<Rect> {
        let bar_height = (self.levels[index] * MAX_HEIGHT_PX) as i32;
        if bar_height <= 0 {
            return None;
        }
        let base_y = height_px as i32 - BASE_OFFSET_PX;
        let slots_from_right = (N - index) as i32;
        let x = width_px as i32
            - slots_from_right * (BAR_WIDTH_PX + BAR_SPACING_PX) as i32;
        Some(Rect::new(
            x,
            base_y - bar_height,
            BAR_WIDTH_PX,
            bar_height as u32,
        ))
    }

    pub fn render(&self, window: &mut Window) -> anyhow::Result<()> {
        let (width_px, height_px) = (window.width_px(), window.height_px());
        for (index, &color) in self.colors.iter().enumerate() {
            if let Some(rect) = self.bar_rect(index, width_px, height_px) {
                window.canvas.set_draw_color(color);
                window.canvas.fill_rect(rect).map_err(|e| anyhow!("{e}"))?;
            }
        }
        Ok(())
    }
}
