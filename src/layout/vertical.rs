//! Vertical text columns.
//!
//! A column is a stack of single-glyph labels, one per character, with a
//! fixed pitch equal to the font size. Glyph metrics are ignored for
//! placement, so a column of N characters is always `N * size` pixels tall.
//!
//! ```text
//!   top_y ─ ┬ ┌───┐
//!           │ │ 古 │  baseline = top_y + size
//!           │ ├───┤
//!           │ │ 池 │  baseline = top_y + 2*size
//!           │ ├───┤
//!           │ │ │ │  'ー' drawn as '│'
//!           ┴ └───┘
//! ```
//!
//! Positions are computed in `i64` and clamped into `i32`, so absurd sizes
//! or margins push a column off the canvas instead of overflowing.

use std::path::Path;

use crate::canvas::{Canvas, Color, clamp_coord};
use crate::error::Result;
use crate::font::{Face, FaceLoader};

/// Glyph drawn in place of elongation marks and tildes.
pub const VERTICAL_HYPHEN: char = '│';

/// Where a column sits between the top and bottom margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlign {
    Top,
    Center,
    Bottom,
}

/// Size and color shared by every glyph in a column.
#[derive(Debug, Clone, Copy)]
pub struct ColumnStyle {
    pub font_size: f32,
    pub color: Color,
}

/// Map horizontal elongation marks to their vertical form.
///
/// Wave dash, ASCII tilde, hyphen-minus and the katakana long vowel mark
/// all become [`VERTICAL_HYPHEN`]; everything else is returned unchanged.
pub fn vertical_glyph(ch: char) -> char {
    match ch {
        '〜' | '~' | '-' | 'ー' => VERTICAL_HYPHEN,
        other => other,
    }
}

/// Pitch between glyph baselines. Fractional sizes are truncated; the
/// float-to-int cast saturates and maps NaN to zero.
fn pitch(font_size: f32) -> i64 {
    font_size as i64
}

/// Top edge of a column of `text` under the given alignment.
///
/// Length is counted in code points, not bytes. The result may be negative
/// or past the bottom of the canvas; it is only clamped to the `i32` range.
pub fn column_top(
    align: VerticalAlign,
    text: &str,
    font_size: f32,
    canvas_height: u32,
    margin_px: i32,
) -> i32 {
    let column_height = (text.chars().count() as i64).saturating_mul(pitch(font_size));
    let height = i64::from(canvas_height);
    let margin = i64::from(margin_px);
    let top = match align {
        VerticalAlign::Top => margin,
        VerticalAlign::Bottom => height.saturating_sub(column_height).saturating_sub(margin),
        VerticalAlign::Center => {
            height
                .saturating_sub(margin.saturating_mul(2))
                .saturating_sub(column_height)
                / 2
        }
    };
    clamp_coord(top)
}

/// Draw `text` as a column whose top edge is `top_y`, with an already
/// loaded face.
pub fn draw_glyph_column<F: Face>(
    canvas: &mut Canvas,
    face: &F,
    left_x: i32,
    top_y: i32,
    text: &str,
    style: &ColumnStyle,
) {
    let pitch = pitch(style.font_size);
    let mut baseline_y = i64::from(top_y).saturating_add(pitch);
    let mut buf = [0u8; 4];

    for ch in text.chars() {
        let glyph = vertical_glyph(ch).encode_utf8(&mut buf);
        face.draw_label(
            canvas,
            left_x,
            clamp_coord(baseline_y),
            glyph,
            style.font_size,
            style.color,
        );
        baseline_y = baseline_y.saturating_add(pitch);
    }
}

/// Open the font at `font_path` and draw `text` as a column whose top edge
/// is `top_y`.
///
/// An empty string draws nothing and never touches the font. A load failure
/// is returned before any glyph is drawn.
pub fn draw_vertical_column<L: FaceLoader>(
    canvas: &mut Canvas,
    loader: &L,
    font_path: &Path,
    left_x: i32,
    top_y: i32,
    text: &str,
    style: &ColumnStyle,
) -> Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    let face = loader.load(font_path)?;
    draw_glyph_column(canvas, &face, left_x, top_y, text, style);
    Ok(())
}

/// Align a column against the canvas height and `margin_px`, then draw it.
pub fn draw_aligned_column<F: Face>(
    canvas: &mut Canvas,
    face: &F,
    align: VerticalAlign,
    left_x: i32,
    margin_px: i32,
    text: &str,
    style: &ColumnStyle,
) {
    let top_y = column_top(align, text, style.font_size, canvas.height(), margin_px);
    log::debug!(
        "column {:?} x={} top={} chars={} size={}",
        align,
        left_x,
        top_y,
        text.chars().count(),
        style.font_size
    );
    draw_glyph_column(canvas, face, left_x, top_y, text, style);
}
