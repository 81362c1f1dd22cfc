use glam::Vec2;

use crate::core::Color;

mod buffer;
pub mod projection;
pub mod rasterizer;

pub use buffer::FrameBuffer;
pub use projection::{project, segments, ScreenSegment, Viewport, DEPTH_EPSILON};

/// Keys the viewer reacts to. Backends map their own key codes onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewerKey {
    /// Held to stop the spin
    Pause,
    ZoomIn,
    ZoomOut,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Window closed
    Quit,
    KeyDown(ViewerKey),
    KeyUp(ViewerKey),
}

/// Whatever owns the window: receives line draws, shows finished frames and
/// reports input.
pub trait Surface {
    fn clear(&mut self, color: Color);
    fn draw_line(&mut self, start: Vec2, end: Vec2, color: Color);
    fn present(&mut self) -> crate::Result<()>;
    /// Drains the input events seen since the last call.
    fn poll_events(&mut self) -> Vec<InputEvent>;
    fn is_key_down(&self, key: ViewerKey) -> bool;
}
