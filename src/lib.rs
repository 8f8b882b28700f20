//! # Kokun - Senryu Card Renderer
//!
//! Kokun draws a three-line senryu in vertical Japanese script onto a
//! fixed-layout card. It provides:
//!
//! - **Vertical layout**: top, center and bottom aligned glyph columns
//! - **Borders**: a thick outer frame with a thin frame nested inside it
//! - **Styling**: partial configs resolved against a table of defaults
//! - **Output**: PNG files, in-memory PNG bytes, or base64
//!
//! ## Quick Start
//!
//! ```no_run
//! use kokun::{Poem, PartialStyleConfig, card};
//!
//! let poem = Poem::new("古池や", "蛙飛び込む", "水の音", "芭蕉");
//! let style = PartialStyleConfig {
//!     watermark: Some("kokun".to_string()),
//!     ..Default::default()
//! };
//!
//! let png = card::render_png(&poem, &style)?;
//! std::fs::write("card.png", png)?;
//!
//! # Ok::<(), kokun::KokunError>(())
//! ```
//!
//! ## Fonts
//!
//! The bundled `fonts/default.ttf` (DejaVu Sans) covers Latin, Greek and
//! Cyrillic but has no kana or kanji. Japanese text is drawn with the first
//! fallback font that has the glyph: `fonts/cjk.ttf`/`fonts/cjk.otf` if
//! present, then common system locations (Noto Sans CJK, IPAex Gothic,
//! Hiragino, MS Gothic). See [`style::SYSTEM_CJK_FONTS`]. A character no
//! font covers is drawn as the notdef box and logged at `warn`.
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`card`] | Card composition and output helpers |
//! | [`layout`] | Vertical columns and border frames |
//! | [`style`] | Partial and resolved style configuration |
//! | [`font`] | Font loading and label rasterization |
//! | [`canvas`] | RGBA canvas, codec and resize helpers |
//! | [`error`] | Error types |

pub mod canvas;
pub mod card;
pub mod error;
pub mod font;
pub mod layout;
pub mod style;

// Re-exports for convenience
pub use canvas::Canvas;
pub use card::{Composer, Foreground, Poem};
pub use error::KokunError;
pub use style::{PartialStyleConfig, StyleConfig, StyleDefaults};
