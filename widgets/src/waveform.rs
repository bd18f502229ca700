use crate::window::Window;
use anyhow::anyhow;
use line_2d::Coord;
use sdl2::{pixels::Color, rect::Rect};

/// Plots a block of samples across the full width of the window as a polyline centred
/// vertically.
pub struct WaveformView {
    pub color: Color,
    /// Pixels per unit of sample amplitude.
    pub scale_px: f32,
    pub line_width: u32,
}

impl Default for WaveformView {
    fn default() -> Self {
        Self {
            color: Color::RGB(0, 100, 0),
            scale_px: 100.0,
            line_width: 1,
        }
    }
}

impl WaveformView {
    /// The polyline starts at the left edge of the centre line and then visits one point per
    /// sample.
    pub fn update_coords(
        &self,
        samples: &[f32],
        width_px: u32,
        height_px: u32,
        coords: &mut Vec<Coord>,
    ) {
        coords.clear();
        let y_px_mid = height_px as i32 / 2;
        coords.push(Coord { x: 0, y: y_px_mid });
        if samples.is_empty() {
            return;
        }
        let width_px = width_px as usize;
        for (i, sample) in samples.iter().enumerate() {
            coords.push(Coord {
                x: ((i * width_px) / samples.len()) as i32,
                y: y_px_mid - (sample * self.scale_px) as i32,
            });
        }
    }

    pub fn render(
        &self,
        samples: &[f32],
        coords: &mut Vec<Coord>,
        window: &mut Window,
    ) -> anyhow::Result<()> {
        self.update_coords(
            samples,
            window.width_px(),
            window.height_px(),
            coords,
        );
        window.canvas.set_draw_color(self.color);
        for pair in coords.windows(2) {
            for Coord { x, y } in line_2d::coords_between(pair[0], pair[1]) {
                let rect = Rect::new(x, y, self.line_width, self.line_width);
                window.canvas.fill_rect(rect).map_err(|e| anyhow!("{e}"))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn coords_span_the_window() {
        let view = WaveformView::default();
        let mut coords = Vec::new();
        view.update_coords(&[0.0, 1.0, -0.5, 2.2], 640, 480, &mut coords);
        assert_eq!(
            coords,
            [
                Coord { x: 0, y: 240 },
                Coord { x: 0, y: 240 },
                Coord { x: 160, y: 140 },
                Coord { x: 320, y: 290 },
                Coord { x: 480, y: 20 },
            ]
        );
    }

    #[test]
    fn empty_history_is_a_single_point() {
        let view = WaveformView::default();
        let mut coords = vec![Coord { x: 5, y: 5 }];
        view.update_coords(&[], 640, 480, &mut coords);
        assert_eq!(coords, [Coord { x: 0, y: 240 }]);
    }
}
