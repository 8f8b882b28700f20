//! Font loading and horizontal label drawing.
//!
//! The layout code never touches font files directly. It asks a
//! [`FaceLoader`] for a [`Face`] and then places labels with
//! [`Face::draw_label`], giving the left edge and the baseline of the run.
//!
//! - [`FileFontLoader`] reads a TrueType/OpenType file on every call and
//!   rasterizes with ab_glyph. Nothing is cached between loads. Fallback
//!   fonts can be stacked behind the primary one; each character is drawn
//!   with the first font that has a glyph for it.
//! - [`BlockLoader`] paints one solid `size x size` square per character.
//!   It needs no font file, which makes it handy for layout previews.

use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontArc, GlyphId, PxScale, ScaleFont};

use crate::canvas::{Canvas, Color, clamp_coord};
use crate::error::{KokunError, Result};

/// A loaded face that can draw a single-line horizontal label.
pub trait Face {
    /// Draw `text` left-to-right starting at `left_x`, sitting on `baseline_y`.
    ///
    /// `size` is the em size in pixels.
    fn draw_label(
        &self,
        canvas: &mut Canvas,
        left_x: i32,
        baseline_y: i32,
        text: &str,
        size: f32,
        color: Color,
    );
}

/// Opens a font resource and produces a [`Face`].
pub trait FaceLoader {
    type Face: Face;

    fn load(&self, path: &Path) -> Result<Self::Face>;

    /// Load `path` with `fallbacks` behind it for characters it cannot draw.
    ///
    /// Loaders that cannot stack faces ignore the fallbacks.
    fn load_with_fallbacks(&self, path: &Path, _fallbacks: &[PathBuf]) -> Result<Self::Face> {
        self.load(path)
    }
}

/// Loads fonts from the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileFontLoader;

impl FaceLoader for FileFontLoader {
    type Face = TtfFace;

    fn load(&self, path: &Path) -> Result<TtfFace> {
        let bytes = std::fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                KokunError::FontNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                KokunError::Io(e)
            }
        })?;
        log::debug!("loaded font {} ({} bytes)", path.display(), bytes.len());
        TtfFace::from_bytes(path, bytes)
    }

    /// Fallbacks that are not installed are skipped; any other failure is
    /// returned.
    fn load_with_fallbacks(&self, path: &Path, fallbacks: &[PathBuf]) -> Result<TtfFace> {
        let mut face = self.load(path)?;
        for fallback in fallbacks {
            match self.load(fallback) {
                Ok(extra) => face = face.with_fallback(extra),
                Err(KokunError::FontNotFound { path }) => {
                    log::debug!("fallback font {} not installed", path.display());
                }
                Err(e) => return Err(e),
            }
        }
        Ok(face)
    }
}

/// TrueType/OpenType face rasterized with ab_glyph.
///
/// Holds the primary font followed by its fallbacks, never empty.
#[derive(Clone)]
pub struct TtfFace {
    fonts: Vec<FontArc>,
}

impl TtfFace {
    /// Parse font bytes. `path` is only used for error reporting.
    pub fn from_bytes(path: &Path, bytes: Vec<u8>) -> Result<Self> {
        let font = FontArc::try_from_vec(bytes).map_err(|e| KokunError::FontParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self { fonts: vec![font] })
    }

    /// Append `other`'s fonts behind this face's own.
    pub fn with_fallback(mut self, other: TtfFace) -> Self {
        self.fonts.extend(other.fonts);
        self
    }

    /// Whether any font in the stack has a glyph for `ch`.
    pub fn has_glyph(&self, ch: char) -> bool {
        self.fonts.iter().any(|font| font.glyph_id(ch).0 != 0)
    }

    /// First font with a glyph for `ch`, else the primary font (whose
    /// notdef glyph gets drawn).
    fn font_for(&self, ch: char) -> (usize, &FontArc) {
        match self.fonts.iter().position(|font| font.glyph_id(ch).0 != 0) {
            Some(index) => (index, &self.fonts[index]),
            None => {
                if !ch.is_whitespace() {
                    log::warn!(
                        "no glyph for {:?} (U+{:04X}) in any loaded font",
                        ch,
                        ch as u32
                    );
                }
                (0, &self.fonts[0])
            }
        }
    }
}

/// ab_glyph scales by ascent-to-descent height; convert from em size.
///
/// Faces that do not report units per em are treated as 1000-unit faces.
fn em_scale(size: f32, height_unscaled: f32, units_per_em: Option<f32>) -> PxScale {
    let units_per_em = units_per_em.unwrap_or_else(|| {
        log::debug!("font has no units_per_em, assuming 1000");
        1000.0
    });
    PxScale::from(size * height_unscaled / units_per_em)
}

impl Face for TtfFace {
    fn draw_label(
        &self,
        canvas: &mut Canvas,
        left_x: i32,
        baseline_y: i32,
        text: &str,
        size: f32,
        color: Color,
    ) {
        let mut caret_x = left_x as f32;
        let mut previous: Option<(usize, GlyphId)> = None;

        for ch in text.chars() {
            let (index, font) = self.font_for(ch);
            let scale = em_scale(size, font.height_unscaled(), font.units_per_em());
            let scaled = font.as_scaled(scale);
            let glyph_id = font.glyph_id(ch);
            if let Some((_, prev)) = previous.filter(|(prev_index, _)| *prev_index == index) {
                caret_x += scaled.kern(prev, glyph_id);
            }

            let glyph = glyph_id
                .with_scale_and_position(scale, ab_glyph::point(caret_x, baseline_y as f32));
            caret_x += scaled.h_advance(glyph_id);
            previous = Some((index, glyph_id));

            if let Some(outlined) = font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                if bounds.max.x < 0.0
                    || bounds.max.y < 0.0
                    || bounds.min.x >= canvas.width() as f32
                    || bounds.min.y >= canvas.height() as f32
                {
                    continue;
                }
                outlined.draw(|px, py, coverage| {
                    let x = bounds.min.x as i32 + px as i32;
                    let y = bounds.min.y as i32 + py as i32;
                    canvas.blend_pixel(x, y, color, coverage);
                });
            }
        }
    }
}

/// Loader for [`BlockFace`]. Ignores the path and never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockLoader;

impl FaceLoader for BlockLoader {
    type Face = BlockFace;

    fn load(&self, _path: &Path) -> Result<BlockFace> {
        Ok(BlockFace)
    }
}

/// Draws every character as a filled square of side `size`, ending at the baseline.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockFace;

impl Face for BlockFace {
    fn draw_label(
        &self,
        canvas: &mut Canvas,
        left_x: i32,
        baseline_y: i32,
        text: &str,
        size: f32,
        color: Color,
    ) {
        let side = size as i64;
        let baseline = i64::from(baseline_y);
        let top = baseline.saturating_sub(side).max(0);
        let bottom = baseline.min(i64::from(canvas.height()));
        let mut x = i64::from(left_x);
        for _ in text.chars() {
            let right = clamp_coord(x.saturating_add(side).saturating_sub(1));
            for y in top..bottom {
                canvas.hline(clamp_coord(x), y as i32, right, color);
            }
            x = x.saturating_add(side);
        }
    }
}
