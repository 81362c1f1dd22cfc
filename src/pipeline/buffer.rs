use glam::{IVec2, Vec2};

use super::rasterizer::{bresenham, clip_line};
use crate::core::Color;

/// CPU-side pixel buffer in minifb's 0x00RRGGBB layout.
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        FrameBuffer {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    pub fn clear(&mut self, color: Color) {
        self.data.fill(color.to_u32());
    }

    pub fn set_pixel(&mut self, pos: IVec2, color: Color) {
        if pos.x < 0 || pos.y < 0 {
            return;
        }
        let (x, y) = (pos.x as usize, pos.y as usize);
        if x < self.width && y < self.height {
            self.data[x + y * self.width] = color.to_u32();
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.data[x + y * self.width])
        } else {
            None
        }
    }

    /// Draws the visible part of the segment; off-screen parts are clipped
    /// away before rasterizing.
    pub fn draw_line(&mut self, start: Vec2, end: Vec2, color: Color) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let max = Vec2::new((self.width - 1) as f32, (self.height - 1) as f32);
        let Some((start, end)) = clip_line(start, end, max) else {
            return;
        };

        let start = start.round().clamp(Vec2::ZERO, max).as_ivec2();
        let end = end.round().clamp(Vec2::ZERO, max).as_ivec2();
        bresenham(start, end, |pos| self.set_pixel(pos, color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_fills_every_pixel() {
        let mut fb = FrameBuffer::new(4, 3);
        fb.clear(Color::BLUE);
        assert!(fb.data.iter().all(|&p| p == Color::BLUE.to_u32()));
    }

    #[test]
    fn horizontal_line() {
        let mut fb = FrameBuffer::new(10, 10);
        fb.draw_line(Vec2::new(1.0, 5.0), Vec2::new(8.0, 5.0), Color::RED);
        for x in 1..=8 {
            assert_eq!(fb.get_pixel(x, 5), Some(Color::RED.to_u32()));
        }
        assert_eq!(fb.get_pixel(0, 5), Some(0));
        assert_eq!(fb.get_pixel(9, 5), Some(0));
    }

    #[test]
    fn far_off_screen_line_is_clipped() {
        let mut fb = FrameBuffer::new(10, 10);
        fb.draw_line(Vec2::new(-1000.0, 2.0), Vec2::new(1000.0, 2.0), Color::GREEN);
        assert!((0..10).all(|x| fb.get_pixel(x, 2) == Some(Color::GREEN.to_u32())));
        let lit = fb.data.iter().filter(|&&p| p != 0).count();
        assert_eq!(lit, 10);
    }

    #[test]
    fn out_of_bounds_pixels_are_ignored() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.set_pixel(IVec2::new(-1, 0), Color::WHITE);
        fb.set_pixel(IVec2::new(2, 1), Color::WHITE);
        assert!(fb.data.iter().all(|&p| p == 0));
        assert_eq!(fb.get_pixel(2, 0), None);
    }
}
