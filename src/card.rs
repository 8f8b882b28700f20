//! # Card Composer
//!
//! Turns a [`Poem`] and a style into a finished canvas.
//!
//! ## Drawing order
//!
//! Later steps paint over earlier ones:
//!
//! 1. Background (solid color, or an image stretched to the canvas)
//! 2. First line, top aligned
//! 3. Second line, centered
//! 4. Third line, bottom aligned
//! 5. Author name, bottom aligned, in the author font size
//! 6. Thick outer frame, then the thin inner frame
//! 7. Watermark (if any), horizontal, in white on the bottom frame
//!
//! The font is loaded once per render, and only if some line or the
//! watermark has text. The first failure aborts the render and no canvas
//! is returned.
//!
//! ## Example
//!
//! ```no_run
//! use kokun::card::{Poem, compose};
//! use kokun::style::PartialStyleConfig;
//!
//! let poem = Poem::new("古池や", "蛙飛び込む", "水の音", "芭蕉");
//! let canvas = compose(&poem, &PartialStyleConfig::default())?;
//! canvas.save("card.png".as_ref())?;
//! # Ok::<(), kokun::KokunError>(())
//! ```

use std::path::PathBuf;

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::canvas::{self, Canvas, Color, Compositing, clamp_coord};
use crate::error::Result;
use crate::font::{Face, FaceLoader, FileFontLoader};
use crate::layout::{ColumnStyle, VerticalAlign, draw_aligned_column, draw_nested_borders};
use crate::style::{Background, PartialStyleConfig, StyleConfig};

/// Watermark text is always drawn in this color.
pub const WATERMARK_COLOR: Color = Rgba([255, 255, 255, 255]);

/// Three lines of verse and the poet's name. No form or length checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poem {
    pub first_sentence: String,
    pub second_sentence: String,
    pub third_sentence: String,
    pub author_name: String,
}

impl Poem {
    pub fn new(
        first_sentence: impl Into<String>,
        second_sentence: impl Into<String>,
        third_sentence: impl Into<String>,
        author_name: impl Into<String>,
    ) -> Self {
        Self {
            first_sentence: first_sentence.into(),
            second_sentence: second_sentence.into(),
            third_sentence: third_sentence.into(),
            author_name: author_name.into(),
        }
    }
}

/// An image pasted on top of a finished card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Foreground {
    pub path: PathBuf,
    /// Size the image is resampled to before pasting.
    pub width: u32,
    pub height: u32,
    pub left_x: i32,
    pub top_y: i32,
}

/// Renders cards, opening fonts through `L`.
#[derive(Debug, Clone, Default)]
pub struct Composer<L = FileFontLoader> {
    loader: L,
}

impl Composer<FileFontLoader> {
    pub fn new() -> Self {
        Self {
            loader: FileFontLoader,
        }
    }
}

impl<L: FaceLoader> Composer<L> {
    pub fn with_loader(loader: L) -> Self {
        Self { loader }
    }

    /// Resolve `partial` and render.
    pub fn compose(&self, poem: &Poem, partial: &PartialStyleConfig) -> Result<Canvas> {
        self.compose_resolved(poem, &partial.resolve())
    }

    /// Render with an already resolved style.
    pub fn compose_resolved(&self, poem: &Poem, style: &StyleConfig) -> Result<Canvas> {
        let mut canvas = Canvas::new(style.width, style.height);
        fill_background(&mut canvas, &style.background)?;

        let body = ColumnStyle {
            font_size: style.font_size,
            color: style.font_color,
        };
        let author = ColumnStyle {
            font_size: style.author_font_size,
            ..body
        };
        let columns = [
            (VerticalAlign::Top, style.first_sentence_x, &poem.first_sentence, &body),
            (VerticalAlign::Center, style.second_sentence_x, &poem.second_sentence, &body),
            (VerticalAlign::Bottom, style.third_sentence_x, &poem.third_sentence, &body),
            (VerticalAlign::Bottom, style.author_name_x, &poem.author_name, &author),
        ];

        // One face serves every column and the watermark
        let needs_font =
            style.watermark.is_some() || columns.iter().any(|(_, _, text, _)| !text.is_empty());
        let face = if needs_font {
            Some(
                self.loader
                    .load_with_fallbacks(&style.font_path, &style.fallback_font_paths)?,
            )
        } else {
            None
        };

        if let Some(face) = &face {
            for (align, left_x, text, column_style) in columns {
                draw_aligned_column(
                    &mut canvas,
                    face,
                    align,
                    left_x,
                    style.margin_px,
                    text,
                    column_style,
                );
            }
        }

        draw_nested_borders(
            &mut canvas,
            style.thick_border_px,
            style.thick_border_color,
            style.thin_border_px,
            style.thin_border_color,
        );

        if let (Some(face), Some(watermark)) = (&face, &style.watermark) {
            face.draw_label(
                &mut canvas,
                style.thick_border_px,
                clamp_coord(i64::from(style.height) - i64::from(style.thin_border_px)),
                watermark,
                style.watermark_font_size,
                WATERMARK_COLOR,
            );
        }

        log::info!(
            "composed {}x{} card for {:?}",
            style.width,
            style.height,
            poem.author_name
        );
        Ok(canvas)
    }

    /// Render, then paste `foreground` on top.
    pub fn compose_with_foreground(
        &self,
        poem: &Poem,
        partial: &PartialStyleConfig,
        foreground: &Foreground,
    ) -> Result<Canvas> {
        let mut canvas = self.compose(poem, partial)?;
        paste_foreground(&mut canvas, foreground)?;
        Ok(canvas)
    }
}

fn fill_background(canvas: &mut Canvas, background: &Background) -> Result<()> {
    match background {
        Background::Color(color) => canvas.fill(*color, Compositing::Source),
        Background::Image(path) => {
            let decoded = canvas::decode_file(path)?;
            let stretched = canvas::resize(&decoded, canvas.width(), canvas.height());
            canvas.draw_image(&stretched, 0, 0, Compositing::Source);
        }
    }
    Ok(())
}

/// Decode `foreground.path`, resample it and write it over the canvas.
///
/// Pixels are replaced, not blended; parts past the canvas edge are dropped.
pub fn paste_foreground(canvas: &mut Canvas, foreground: &Foreground) -> Result<()> {
    let decoded = canvas::decode_file(&foreground.path)?;
    let resized = canvas::resize(&decoded, foreground.width, foreground.height);
    log::debug!(
        "pasting {} at ({}, {}) as {}x{}",
        foreground.path.display(),
        foreground.left_x,
        foreground.top_y,
        foreground.width,
        foreground.height
    );
    canvas.draw_image(&resized, foreground.left_x, foreground.top_y, Compositing::Source);
    Ok(())
}

/// Render with fonts read from disk.
pub fn compose(poem: &Poem, partial: &PartialStyleConfig) -> Result<Canvas> {
    Composer::new().compose(poem, partial)
}

/// Render and encode as PNG bytes.
pub fn render_png(poem: &Poem, partial: &PartialStyleConfig) -> Result<Vec<u8>> {
    compose(poem, partial)?.to_png()
}

/// Render and encode as base64 PNG.
pub fn render_base64(poem: &Poem, partial: &PartialStyleConfig) -> Result<String> {
    compose(poem, partial)?.to_base64()
}
