use glam::Vec2;
use minifb::{Key, KeyRepeat, Scale, Window, WindowOptions};

use crate::config::ViewerConfig;
use crate::core::Color;
use crate::pipeline::{FrameBuffer, InputEvent, Surface, ViewerKey};

/// minifb window plus the framebuffer it displays.
pub struct WindowSurface {
    window: Window,
    buffer: FrameBuffer,
}

impl WindowSurface {
    pub fn new(config: &ViewerConfig) -> crate::Result<Self> {
        let mut window = Window::new(
            &config.title,
            config.width,
            config.height,
            WindowOptions {
                resize: false,
                scale: Scale::X1,
                ..WindowOptions::default()
            },
        )?;
        // Frame pacing is done by the viewer loop
        window.set_target_fps(0);

        Ok(Self {
            window,
            buffer: FrameBuffer::new(config.width, config.height),
        })
    }
}

fn keys_for(key: ViewerKey) -> &'static [Key] {
    match key {
        ViewerKey::Pause => &[Key::Space],
        ViewerKey::ZoomIn => &[Key::W],
        ViewerKey::ZoomOut => &[Key::S],
        ViewerKey::Quit => &[Key::Q, Key::Escape],
    }
}

fn viewer_key(key: Key) -> Option<ViewerKey> {
    match key {
        Key::Space => Some(ViewerKey::Pause),
        Key::W => Some(ViewerKey::ZoomIn),
        Key::S => Some(ViewerKey::ZoomOut),
        Key::Q | Key::Escape => Some(ViewerKey::Quit),
        _ => None,
    }
}

impl Surface for WindowSurface {
    fn clear(&mut self, color: Color) {
        self.buffer.clear(color);
    }

    fn draw_line(&mut self, start: Vec2, end: Vec2, color: Color) {
        self.buffer.draw_line(start, end, color);
    }

    fn present(&mut self) -> crate::Result<()> {
        self.window
            .update_with_buffer(&self.buffer.data, self.buffer.width, self.buffer.height)?;
        Ok(())
    }

    fn poll_events(&mut self) -> Vec<InputEvent> {
        if !self.window.is_open() {
            return vec![InputEvent::Quit];
        }

        let pressed = self
            .window
            .get_keys_pressed(KeyRepeat::No)
            .into_iter()
            .filter_map(viewer_key)
            .map(InputEvent::KeyDown);
        let released = self
            .window
            .get_keys_released()
            .into_iter()
            .filter_map(viewer_key)
            .map(InputEvent::KeyUp);
        pressed.chain(released).collect()
    }

    fn is_key_down(&self, key: ViewerKey) -> bool {
        keys_for(key).iter().any(|&k| self.window.is_key_down(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_maps_agree() {
        for key in [
            ViewerKey::Pause,
            ViewerKey::ZoomIn,
            ViewerKey::ZoomOut,
            ViewerKey::Quit,
        ] {
            for &k in keys_for(key) {
                assert_eq!(viewer_key(k), Some(key));
            }
        }
        assert_eq!(viewer_key(Key::A), None);
    }
}
