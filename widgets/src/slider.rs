use crate::window::{TextAnchor, Window};
use anyhow::anyhow;
use line_2d::Coord;
use sdl2::{pixels::Color, rect::Rect};

const LABEL_GAP_PX: i32 = 5;

/// A horizontal slider mapping its width linearly onto `min..=max`.
pub struct Slider {
    rect: Rect,
    min: f32,
    max: f32,
}

impl Slider {
    pub fn new(rect: Rect, min: f32, max: f32) -> Self {
        Self { rect, min, max }
    }

    pub fn contains(&self, mouse_position: Coord) -> bool {
        self.rect
            .contains_point((mouse_position.x, mouse_position.y))
    }

    pub fn value_at(&self, x: i32) -> f32 {
        let offset_01 = (x - self.rect.x()) as f32 / self.rect.width() as f32;
        (self.min + offset_01 * (self.max - self.min)).clamp(self.min, self.max)
    }

    pub fn marker_x(&self, value: f32) -> i32 {
        let offset_01 = (value - self.min) / (self.max - self.min);
        (offset_01 * self.rect.width() as f32) as i32 + self.rect.x()
    }

    pub fn render(
        &self,
        value: f32,
        label: &str,
        window: &mut Window,
    ) -> anyhow::Result<()> {
        window.canvas.set_draw_color(Color::RGB(170, 0, 0));
        window
            .canvas
            .fill_rect(self.rect)
            .map_err(|e| anyhow!("{e}"))?;
        let marker_x = self.marker_x(value);
        window.canvas.set_draw_color(Color::WHITE);
        window
            .canvas
            .draw_line(
                (marker_x, self.rect.y()),
                (marker_x, self.rect.bottom()),
            )
            .map_err(|e| anyhow!("{e}"))?;
        window.render_text(
            label,
            Color::BLACK,
            TextAnchor::Above {
                rect: self.rect,
                gap_px: LABEL_GAP_PX,
            },
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn frequency_slider() -> Slider {
        Slider::new(Rect::new(100, 410, 440, 20), 100.0, 900.0)
    }

    #[test]
    fn value_is_linear_across_the_track() {
        let slider = frequency_slider();
        assert_eq!(slider.value_at(100), 100.0);
        assert_eq!(slider.value_at(320), 500.0);
        assert_eq!(slider.value_at(540), 900.0);
    }

    #[test]
    fn value_is_clamped_outside_the_track() {
        let slider = frequency_slider();
        assert_eq!(slider.value_at(0), 100.0);
        assert_eq!(slider.value_at(1000), 900.0);
    }

    #[test]
    fn marker_tracks_value() {
        let slider = frequency_slider();
        assert_eq!(slider.marker_x(100.0), 100);
        assert_eq!(slider.marker_x(440.0), 287);
        assert_eq!(slider.marker_x(900.0), 540);
    }
}
