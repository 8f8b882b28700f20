//! # Canvas
//!
//! RGBA pixel surface that a card is drawn onto, plus the codec helpers
//! around it (decode, resize, PNG and base64 encode).
//!
//! ## Coordinates
//!
//! ```text
//! (0,0) ─────────── x ──────────▶ (width-1, 0)
//!   │
//!   y        pixels outside the buffer are dropped
//!   │
//!   ▼
//! (0, height-1)
//! ```
//!
//! All drawing entry points take signed coordinates. Writes that land
//! outside the buffer are silently discarded, so callers can draw partly
//! (or entirely) off-canvas without any bounds checks of their own.

use std::io::Cursor;
use std::path::Path;

use base64::Engine;
use image::{DynamicImage, ImageError, ImageFormat, Rgba, RgbaImage, imageops::FilterType};

use crate::error::{KokunError, Result};

/// Straight (non-premultiplied) RGBA color.
pub type Color = Rgba<u8>;

/// How source pixels combine with what is already on the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compositing {
    /// Source replaces destination, alpha included.
    #[default]
    Source,
    /// Porter-Duff "over": source is blended on top of destination.
    Over,
}

/// Narrow a wide coordinate into the canvas's signed range.
pub fn clamp_coord(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Mutable pixel grid with top-left origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Allocate a fully transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Map signed coordinates to buffer coordinates, if on-canvas.
    fn index(&self, x: i32, y: i32) -> Option<(u32, u32)> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.image.width() || y >= self.image.height() {
            return None;
        }
        Some((x, y))
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|(x, y)| *self.image.get_pixel(x, y))
    }

    /// Set a single pixel. Off-canvas writes are dropped.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some((x, y)) = self.index(x, y) {
            self.image.put_pixel(x, y, color);
        }
    }

    /// Blend `color` over the pixel at `(x, y)`, scaling its alpha by `coverage`.
    ///
    /// Used for anti-aliased glyph edges, where `coverage` is the fraction
    /// of the pixel the outline covers.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color, coverage: f32) {
        let Some((x, y)) = self.index(x, y) else {
            return;
        };
        let dst = *self.image.get_pixel(x, y);
        let src_alpha = coverage.clamp(0.0, 1.0) * (color[3] as f32 / 255.0);
        self.image.put_pixel(x, y, blend_over(dst, color, src_alpha));
    }

    fn put(&mut self, x: i32, y: i32, color: Color, mode: Compositing) {
        match mode {
            Compositing::Source => self.set_pixel(x, y, color),
            Compositing::Over => self.blend_pixel(x, y, color, 1.0),
        }
    }

    /// Horizontal line from `x1` to `x2` inclusive. Reversed spans draw nothing.
    pub fn hline(&mut self, x1: i32, y: i32, x2: i32, color: Color) {
        if y < 0 || y >= self.image.height() as i32 {
            return;
        }
        let start = x1.max(0);
        let end = x2.min(self.image.width() as i32 - 1);
        for x in start..=end {
            self.set_pixel(x, y, color);
        }
    }

    /// Vertical line from `y1` to `y2` inclusive. Reversed spans draw nothing.
    pub fn vline(&mut self, x: i32, y1: i32, y2: i32, color: Color) {
        if x < 0 || x >= self.image.width() as i32 {
            return;
        }
        let start = y1.max(0);
        let end = y2.min(self.image.height() as i32 - 1);
        for y in start..=end {
            self.set_pixel(x, y, color);
        }
    }

    /// Fill the whole canvas with a uniform color.
    pub fn fill(&mut self, color: Color, mode: Compositing) {
        match mode {
            Compositing::Source => {
                for pixel in self.image.pixels_mut() {
                    *pixel = color;
                }
            }
            Compositing::Over => {
                let src_alpha = color[3] as f32 / 255.0;
                for pixel in self.image.pixels_mut() {
                    *pixel = blend_over(*pixel, color, src_alpha);
                }
            }
        }
    }

    /// Draw `source` with its top-left corner at `(left_x, top_y)`.
    pub fn draw_image(&mut self, source: &RgbaImage, left_x: i32, top_y: i32, mode: Compositing) {
        for (sx, sy, pixel) in source.enumerate_pixels() {
            self.put(left_x + sx as i32, top_y + sy as i32, *pixel, mode);
        }
    }

    /// Encode the canvas as PNG bytes, entirely in memory.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut png_bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut png_bytes), ImageFormat::Png)
            .map_err(|e| KokunError::ImageEncode(e.to_string()))?;
        Ok(png_bytes)
    }

    /// PNG-encode and base64 the result (standard alphabet, padded).
    pub fn to_base64(&self) -> Result<String> {
        let png = self.to_png()?;
        Ok(base64::engine::general_purpose::STANDARD.encode(png))
    }

    /// Write the canvas to `path` as a PNG file.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.image
            .save_with_format(path, ImageFormat::Png)
            .map_err(|e| match e {
                ImageError::IoError(io) => KokunError::Io(io),
                other => KokunError::ImageEncode(other.to_string()),
            })
    }
}

/// Porter-Duff "over" on straight-alpha pixels.
fn blend_over(dst: Color, src: Color, src_alpha: f32) -> Color {
    if src_alpha <= 0.0 {
        return dst;
    }
    let dst_alpha = dst[3] as f32 / 255.0;
    let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
    if out_alpha <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let mut out = [0u8; 4];
    for c in 0..3 {
        let s = src[c] as f32;
        let d = dst[c] as f32;
        let v = (s * src_alpha + d * dst_alpha * (1.0 - src_alpha)) / out_alpha;
        out[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgba(out)
}

/// Read and decode a PNG or JPEG file.
pub fn decode_file(path: &Path) -> Result<DynamicImage> {
    let bytes = std::fs::read(path)?;
    image::load_from_memory(&bytes).map_err(|e| KokunError::ImageDecode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Resample to exactly `width x height` with a Catmull-Rom kernel.
pub fn resize(image: &DynamicImage, width: u32, height: u32) -> RgbaImage {
    image
        .resize_exact(width, height, FilterType::CatmullRom)
        .to_rgba8()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Rgba([255, 0, 0, 255]);
    const WHITE: Color = Rgba([255, 255, 255, 255]);

    #[test]
    fn test_clamp_coord() {
        assert_eq!(clamp_coord(-5), -5);
        assert_eq!(clamp_coord(i64::MAX), i32::MAX);
        assert_eq!(clamp_coord(i64::from(i32::MIN) - 1), i32::MIN);
    }

    #[test]
    fn test_new_canvas_is_transparent() {
        let canvas = Canvas::new(4, 3);
        assert_eq!(canvas.width(), 4);
        assert_eq!(canvas.height(), 3);
        assert!(canvas.image().pixels().all(|p| *p == Rgba([0, 0, 0, 0])));
    }

    #[test]
    fn test_fill_covers_every_pixel() {
        for (w, h) in [(1, 1), (7, 3), (64, 100)] {
            let mut canvas = Canvas::new(w, h);
            canvas.fill(RED, Compositing::Source);
            assert!(canvas.image().pixels().all(|p| *p == RED));
        }
    }

    #[test]
    fn test_fill_over_transparent_equals_source() {
        let mut canvas = Canvas::new(5, 5);
        canvas.fill(WHITE, Compositing::Over);
        assert!(canvas.image().pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn test_off_canvas_writes_are_dropped() {
        let mut canvas = Canvas::new(3, 3);
        canvas.set_pixel(-1, 0, RED);
        canvas.set_pixel(0, 3, RED);
        canvas.set_pixel(100, -100, RED);
        canvas.blend_pixel(3, 3, RED, 1.0);
        assert!(canvas.image().pixels().all(|p| p[3] == 0));
        assert_eq!(canvas.get_pixel(-1, 0), None);
    }

    #[test]
    fn test_lines_are_inclusive_and_clipped() {
        let mut canvas = Canvas::new(5, 5);
        canvas.hline(-3, 1, 2, RED);
        assert_eq!(canvas.get_pixel(0, 1), Some(RED));
        assert_eq!(canvas.get_pixel(2, 1), Some(RED));
        assert_eq!(canvas.get_pixel(3, 1).map(|p| p[3]), Some(0));

        canvas.vline(4, 2, 10, RED);
        assert_eq!(canvas.get_pixel(4, 2), Some(RED));
        assert_eq!(canvas.get_pixel(4, 4), Some(RED));
    }

    #[test]
    fn test_reversed_line_draws_nothing() {
        let mut canvas = Canvas::new(5, 5);
        canvas.hline(3, 0, 1, RED);
        canvas.vline(0, 4, 2, RED);
        assert!(canvas.image().pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn test_blend_half_coverage() {
        let mut canvas = Canvas::new(1, 1);
        canvas.fill(WHITE, Compositing::Source);
        canvas.blend_pixel(0, 0, Rgba([0, 0, 0, 255]), 0.5);
        let p = canvas.get_pixel(0, 0).unwrap();
        assert!((126..=129).contains(&p[0]), "got {:?}", p);
        assert_eq!(p[3], 255);
    }

    #[test]
    fn test_draw_image_source_replaces_alpha() {
        let mut canvas = Canvas::new(4, 4);
        canvas.fill(WHITE, Compositing::Source);
        let src = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 255, 0]));
        canvas.draw_image(&src, 3, 3, Compositing::Source);
        assert_eq!(canvas.get_pixel(3, 3), Some(Rgba([0, 0, 255, 0])));
        assert_eq!(canvas.get_pixel(2, 2), Some(WHITE));
    }

    #[test]
    fn test_draw_image_over_keeps_destination_under_transparent() {
        let mut canvas = Canvas::new(2, 2);
        canvas.fill(WHITE, Compositing::Source);
        let src = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 255, 0]));
        canvas.draw_image(&src, 0, 0, Compositing::Over);
        assert!(canvas.image().pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn test_png_and_base64_round_trip_header() {
        let mut canvas = Canvas::new(8, 8);
        canvas.fill(RED, Compositing::Source);
        let png = canvas.to_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let encoded = canvas.to_base64().unwrap();
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .unwrap();
        assert_eq!(decoded, png);
    }

    #[test]
    fn test_resize_exact_dimensions() {
        let src = DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 4, RED));
        let out = resize(&src, 3, 7);
        assert_eq!(out.dimensions(), (3, 7));
        assert!(out.pixels().all(|p| p[0] >= 254 && p[1] <= 1 && p[3] >= 254));
    }

    #[test]
    fn test_decode_missing_file_is_io_error() {
        let err = decode_file(Path::new("/nonexistent/kokun/image.png")).unwrap_err();
        assert!(matches!(err, KokunError::Io(_)));
    }
}
