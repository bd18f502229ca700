use crate::window::{TextAnchor, Window};
use anyhow::anyhow;
use line_2d::Coord;
use sdl2::{pixels::Color, rect::Rect};

const HOVER_GROW_PX: i32 = 2;

pub struct Button {
    rect: Rect,
}

impl Button {
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }

    pub fn contains(&self, mouse_position: Coord) -> bool {
        self.rect
            .contains_point((mouse_position.x, mouse_position.y))
    }

    /// The rectangle actually drawn, which grows on every side while the mouse is over it.
    pub fn draw_rect(&self, hovered: bool) -> Rect {
        if hovered {
            Rect::new(
                self.rect.x() - HOVER_GROW_PX,
                self.rect.y() - HOVER_GROW_PX,
                self.rect.width() + 2 * HOVER_GROW_PX as u32,
                self.rect.height() + 2 * HOVER_GROW_PX as u32,
            )
        } else {
            self.rect
        }
    }

    pub fn render(
        &self,
        label: &str,
        mouse_position: Coord,
        window: &mut Window,
    ) -> anyhow::Result<()> {
        let hovered = self.contains(mouse_position);
        let rect = self.draw_rect(hovered);
        let (background, foreground) = if hovered {
            (Color::RGB(100, 100, 100), Color::WHITE)
        } else {
            (Color::RGB(180, 180, 180), Color::BLACK)
        };
        window.canvas.set_draw_color(background);
        window.canvas.fill_rect(rect).map_err(|e| anyhow!("{e}"))?;
        window.canvas.set_draw_color(Color::BLACK);
        window.canvas.draw_rect(rect).map_err(|e| anyhow!("{e}"))?;
        window.render_text(label, foreground, TextAnchor::Center(rect))
    }
}
