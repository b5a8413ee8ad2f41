use image::RgbImage;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::{media::codec::ImageHandle, studio::error::DecodeError};

const MAX_SIDE: u32 = 160;

/// Small RGB copy of an image, decoded once and drawn with half blocks.
#[derive(Clone)]
pub struct Thumbnail {
    image: RgbImage,
}

impl std::fmt::Debug for Thumbnail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Thumbnail({}x{})", self.image.width(), self.image.height())
    }
}

impl Thumbnail {
    /// Decoding is CPU bound; call from `spawn_blocking`.
    pub fn from_handle(handle: &ImageHandle) -> Result<Self, DecodeError> {
        let bytes = handle.decode()?;
        let image = image::load_from_memory(&bytes)?
            .thumbnail(MAX_SIDE, MAX_SIDE)
            .to_rgb8();

        Ok(Self { image })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Fits the image into `area`, two pixel rows per terminal row.
    fn fit(&self, area: Rect) -> (u16, u16) {
        let (w, h) = self.image.dimensions();
        if w == 0 || h == 0 || area.width == 0 || area.height == 0 {
            return (0, 0);
        }

        let max_w = area.width as f64;
        let max_h = area.height as f64 * 2.0;
        let scale = (max_w / w as f64).min(max_h / h as f64);

        let cols = ((w as f64 * scale).floor() as u16).clamp(1, area.width);
        let rows = (((h as f64 * scale) / 2.0).ceil() as u16).clamp(1, area.height);
        (cols, rows)
    }

    fn sample(&self, x: u16, y: u16, cols: u16, pixel_rows: u16) -> Color {
        let (w, h) = self.image.dimensions();
        let px = ((x as u32 * w) / cols.max(1) as u32).min(w - 1);
        let py = ((y as u32 * h) / pixel_rows.max(1) as u32).min(h - 1);
        let [r, g, b] = self.image.get_pixel(px, py).0;
        Color::Rgb(r, g, b)
    }
}

impl Widget for &Thumbnail {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (cols, rows) = self.fit(area);
        if cols == 0 || rows == 0 {
            return;
        }

        let offset_x = area.x + (area.width - cols) / 2;
        let offset_y = area.y + (area.height - rows) / 2;
        let pixel_rows = rows * 2;

        for row in 0..rows {
            for col in 0..cols {
                let top = self.sample(col, row * 2, cols, pixel_rows);
                let bottom = self.sample(col, row * 2 + 1, cols, pixel_rows);
                buf[(offset_x + col, offset_y + row)]
                    .set_symbol("▀")
                    .set_style(Style::default().fg(top).bg(bottom));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb};
    use std::io::Cursor;

    fn png_handle(width: u32, height: u32, color: [u8; 3]) -> ImageHandle {
        let img = RgbImage::from_pixel(width, height, Rgb(color));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        ImageHandle::from_bytes("image/png", &bytes)
    }

    #[test]
    fn large_images_are_scaled_down() {
        let thumb = Thumbnail::from_handle(&png_handle(640, 320, [10, 20, 30])).unwrap();
        let (w, h) = thumb.dimensions();
        assert!(w <= MAX_SIDE && h <= MAX_SIDE);
        assert_eq!(w, 2 * h);
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let handle = ImageHandle::from_bytes("image/png", b"nope");
        assert!(Thumbnail::from_handle(&handle).is_err());
    }

    #[test]
    fn renders_colours_inside_area() {
        let thumb = Thumbnail::from_handle(&png_handle(8, 8, [200, 0, 0])).unwrap();
        let area = Rect::new(0, 0, 10, 4);
        let mut buf = Buffer::empty(area);
        (&thumb).render(area, &mut buf);

        let painted = buf
            .content()
            .iter()
            .filter(|cell| cell.fg == Color::Rgb(200, 0, 0))
            .count();
        assert!(painted > 0);
    }
}
