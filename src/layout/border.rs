//! Rectangular frames.
//!
//! A frame of thickness `t` is `t` one-pixel rings, each inset by one pixel
//! from the previous:
//!
//! ```text
//! (x1,y1)
//!    ┌─────────────┐  ring 0
//!    │┌───────────┐│  ring 1
//!    ││           ││
//!    │└───────────┘│
//!    └─────────────┘
//!              (x2,y2)
//! ```

use crate::canvas::{Canvas, Color};

/// Draw `thickness_px` concentric rings from `(x1, y1)` to `(x2, y2)`, both inclusive.
///
/// No bounds checks: if the rings cross over (`x1 + i > x2 - i`) the
/// reversed spans simply draw nothing.
pub fn draw_rect(
    canvas: &mut Canvas,
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    thickness_px: i32,
    color: Color,
) {
    for i in 0..thickness_px {
        canvas.hline(x1 + i, y1 + i, x2 - i, color);
        canvas.hline(x1 + i, y2 - i, x2 - i, color);
        canvas.vline(x1 + i, y1 + i, y2 - i, color);
        canvas.vline(x2 - i, y1 + i, y2 - i, color);
    }
}

/// Thick frame on the canvas edge with a thin frame flush against its inner edge.
///
/// The outer frame spans `(0, 0)` to `(width, height)`, so its right and
/// bottom outermost ring lies just past the buffer. The thin frame is
/// inset by `thick_px - thin_px`.
pub fn draw_nested_borders(
    canvas: &mut Canvas,
    thick_px: i32,
    thick_color: Color,
    thin_px: i32,
    thin_color: Color,
) {
    let width = canvas.width() as i32;
    let height = canvas.height() as i32;

    draw_rect(canvas, 0, 0, width, height, thick_px, thick_color);

    let inset = thick_px - thin_px;
    if inset < 0 {
        log::warn!(
            "thin border ({}px) is thicker than thick border ({}px); drawing anyway",
            thin_px,
            thick_px
        );
    }
    draw_rect(
        canvas,
        inset,
        inset,
        width - inset,
        height - inset,
        thin_px,
        thin_color,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Compositing;
    use image::Rgba;

    const WHITE: Color = Rgba([255, 255, 255, 255]);
    const GREEN: Color = Rgba([0, 128, 79, 255]);
    const GOLD: Color = Rgba([255, 215, 0, 255]);

    fn white_canvas(w: u32, h: u32) -> Canvas {
        let mut canvas = Canvas::new(w, h);
        canvas.fill(WHITE, Compositing::Source);
        canvas
    }

    #[test]
    fn test_single_ring() {
        let mut canvas = white_canvas(10, 10);
        draw_rect(&mut canvas, 2, 2, 7, 7, 1, GREEN);
        assert_eq!(canvas.get_pixel(2, 2), Some(GREEN));
        assert_eq!(canvas.get_pixel(7, 7), Some(GREEN));
        assert_eq!(canvas.get_pixel(5, 2), Some(GREEN));
        assert_eq!(canvas.get_pixel(2, 5), Some(GREEN));
        assert_eq!(canvas.get_pixel(3, 3), Some(WHITE));
        assert_eq!(canvas.get_pixel(1, 1), Some(WHITE));
    }

    #[test]
    fn test_thick_rect_fills_band() {
        let mut canvas = white_canvas(20, 20);
        draw_rect(&mut canvas, 0, 0, 19, 19, 3, GREEN);
        for y in 0..20 {
            for x in 0..20 {
                let in_band = x < 3 || y < 3 || x > 16 || y > 16;
                let expected = if in_band { GREEN } else { WHITE };
                assert_eq!(canvas.get_pixel(x, y), Some(expected), "at ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_degenerate_thickness_does_not_panic() {
        let mut canvas = white_canvas(6, 6);
        draw_rect(&mut canvas, 0, 0, 5, 5, 50, GREEN);
        assert!(canvas.image().pixels().all(|p| *p == GREEN));
    }

    #[test]
    fn test_zero_thickness_draws_nothing() {
        let mut canvas = white_canvas(6, 6);
        draw_rect(&mut canvas, 0, 0, 5, 5, 0, GREEN);
        assert!(canvas.image().pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn test_nested_borders_no_gap_no_overlap() {
        let (thick, thin) = (8, 3);
        let mut canvas = white_canvas(60, 80);
        draw_nested_borders(&mut canvas, thick, GREEN, thin, GOLD);

        // Left edge, mid-height: thick band then thin band, then background
        let row: Vec<Color> = (0..12).map(|x| canvas.get_pixel(x, 40).unwrap()).collect();
        assert_eq!(&row[..5], &[GREEN; 5]);
        assert_eq!(&row[5..8], &[GOLD; 3]);
        assert_eq!(&row[8..], &[WHITE; 4]);

        // Top edge, mid-width
        let col: Vec<Color> = (0..12).map(|y| canvas.get_pixel(30, y).unwrap()).collect();
        assert_eq!(&col[..5], &[GREEN; 5]);
        assert_eq!(&col[5..8], &[GOLD; 3]);
        assert_eq!(&col[8..], &[WHITE; 4]);

        // Right edge: rings are anchored on x = width, so each band is
        // shifted one pixel outward relative to the left side.
        assert_eq!(canvas.get_pixel(59, 40), Some(GREEN));
        assert_eq!(canvas.get_pixel(55, 40), Some(GOLD));
        assert_eq!(canvas.get_pixel(53, 40), Some(GOLD));
        assert_eq!(canvas.get_pixel(52, 40), Some(WHITE));
    }

    #[test]
    fn test_equal_thickness_thin_covers_thick() {
        let mut canvas = white_canvas(30, 30);
        draw_nested_borders(&mut canvas, 4, GREEN, 4, GOLD);
        assert_eq!(canvas.get_pixel(0, 15), Some(GOLD));
        assert_eq!(canvas.get_pixel(3, 15), Some(GOLD));
        assert_eq!(canvas.get_pixel(4, 15), Some(WHITE));
    }

    #[test]
    fn test_inverted_thickness_is_drawn() {
        let mut canvas = white_canvas(30, 30);
        draw_nested_borders(&mut canvas, 2, GREEN, 5, GOLD);
        // inset = -3: the thin frame starts off-canvas and covers x = 0..=1
        assert_eq!(canvas.get_pixel(0, 15), Some(GOLD));
        assert_eq!(canvas.get_pixel(1, 15), Some(GOLD));
        assert_eq!(canvas.get_pixel(2, 15), Some(WHITE));
    }
}
