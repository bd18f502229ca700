//! Immediate-mode widgets drawn onto a single SDL2 window. Widgets don't own any application
//! state: they are told what to draw each frame and answer hit tests against mouse positions.

mod button;
mod font;
mod meters;
mod slider;
mod waveform;
mod window;

pub use button::*;
pub use font::*;
pub use line_2d::Coord;
pub use meters::*;
pub use slider::*;
pub use waveform::*;
pub use window::*;
