pub const PIXEL_BYTES: usize = 4;

pub type Rgba = [u8; PIXEL_BYTES];

/// The pixel buffer of one redraw, RGBA rows top to bottom.
pub struct RenderFrame<'a> {
    pub width: u32,
    pub height: u32,
    pub buffer: &'a mut [u8],
}

impl RenderFrame<'_> {
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> Option<&mut Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let index = (x as usize + y as usize * self.width as usize) * PIXEL_BYTES;
        self.buffer
            .get_mut(index..index + PIXEL_BYTES)?
            .try_into()
            .ok()
    }

    pub fn draw_square(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgba) {
        for y in y..y.saturating_add(height).min(self.height) {
            for x in x..x.saturating_add(width).min(self.width) {
                if let Some(pixel) = self.pixel_mut(x, y) {
                    *pixel = color;
                }
            }
        }
    }

    pub fn fill(&mut self, color: Rgba) {
        for pixel in self.buffer.chunks_exact_mut(PIXEL_BYTES) {
            pixel.copy_from_slice(&color);
        }
    }
}
