//! # Card Style
//!
//! Geometry, colors and fonts for a card, in two shapes:
//!
//! - [`PartialStyleConfig`]: what a caller supplies. Every field is an
//!   `Option`, so `Some(0)` is an explicit zero and `None` means "use the default".
//! - [`StyleConfig`]: the fully resolved configuration the composer draws from.
//!
//! Defaults come from an immutable [`StyleDefaults`] table. The stock table is
//! [`StyleDefaults::KOKUN`]; callers with a different house style can build
//! their own and pass it to [`PartialStyleConfig::resolve_with`].
//!
//! ## Layout
//!
//! ```text
//!  author   third   second   first
//!    x=60   x=160   x=270    x=390
//! ┌──────────────────────────────────┐
//! │┌────────────────────────────────┐│
//! ││                          古    ││  first: top aligned
//! ││                          池    ││
//! ││                 蛙             ││  second: centered
//! ││                 飛             ││
//! ││        水                      ││  third: bottom aligned
//! ││ 芭     音                      ││  author: bottom aligned
//! │└────────────────────────────────┘│
//! └──────────────────────────────────┘
//! ```
//!
//! ## JSON
//!
//! ```json
//! {
//!   "font_size": 80,
//!   "margin_px": 0,
//!   "font_color": "#202020",
//!   "background": { "color": "#FFF2B3" },
//!   "watermark": "kokun"
//! }
//! ```

use std::path::{Path, PathBuf};

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::canvas::Color;
use crate::error::{KokunError, Result};

/// What fills the canvas before anything else is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    /// Uniform color.
    Color(#[serde(with = "hex_color")] Color),
    /// Image file, stretched to the canvas size.
    Image(PathBuf),
}

/// Common install locations of Japanese-capable fonts. Paths that do not
/// exist on the host are skipped when the face is loaded.
pub const SYSTEM_CJK_FONTS: &[&str] = &[
    "fonts/cjk.ttf",
    "fonts/cjk.otf",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/opentype/ipaexfont-gothic/ipaexg.ttf",
    "/usr/share/fonts/truetype/fonts-japanese-gothic.ttf",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/System/Library/Fonts/ヒラギノ角ゴシック W3.ttc",
    "/System/Library/Fonts/Hiragino Sans GB.ttc",
    "C:\\Windows\\Fonts\\msgothic.ttc",
];

/// Table of default values used to complete a [`PartialStyleConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleDefaults {
    pub width: u32,
    pub height: u32,
    pub first_sentence_x: i32,
    pub second_sentence_x: i32,
    pub third_sentence_x: i32,
    pub author_name_x: i32,
    pub font_path: &'static str,
    /// Consulted in order for characters `font_path` has no glyph for.
    pub fallback_font_paths: &'static [&'static str],
    pub font_size: f32,
    pub author_font_size: f32,
    pub font_color: Color,
    pub background_color: Color,
    pub margin_px: i32,
    pub thick_border_color: Color,
    pub thin_border_color: Color,
    pub thick_border_px: i32,
    pub thin_border_px: i32,
    pub watermark_font_size: f32,
}

impl StyleDefaults {
    /// Stock card: 550x1000, green outer frame with a gold inner line.
    pub const KOKUN: Self = Self {
        width: 550,
        height: 1000,
        first_sentence_x: 390,
        second_sentence_x: 270,
        third_sentence_x: 160,
        author_name_x: 60,
        font_path: "fonts/default.ttf",
        fallback_font_paths: SYSTEM_CJK_FONTS,
        font_size: 90.0,
        author_font_size: 50.0,
        font_color: Rgba([0, 0, 0, 255]),
        background_color: Rgba([255, 255, 255, 255]),
        margin_px: 70,
        thick_border_color: Rgba([0, 128, 79, 255]),
        thin_border_color: Rgba([255, 215, 0, 255]),
        thick_border_px: 50,
        thin_border_px: 10,
        watermark_font_size: 30.0,
    };
}

impl Default for StyleDefaults {
    fn default() -> Self {
        Self::KOKUN
    }
}

/// Fully resolved card style.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleConfig {
    pub width: u32,
    pub height: u32,
    /// Left edge of each column. Not clamped to the canvas.
    pub first_sentence_x: i32,
    pub second_sentence_x: i32,
    pub third_sentence_x: i32,
    pub author_name_x: i32,
    pub font_path: PathBuf,
    pub fallback_font_paths: Vec<PathBuf>,
    pub font_size: f32,
    pub author_font_size: f32,
    #[serde(with = "hex_color")]
    pub font_color: Color,
    pub background: Background,
    /// Distance kept between the columns and the top/bottom edges.
    pub margin_px: i32,
    #[serde(with = "hex_color")]
    pub thick_border_color: Color,
    #[serde(with = "hex_color")]
    pub thin_border_color: Color,
    pub thick_border_px: i32,
    /// Expected to be no thicker than `thick_border_px`.
    pub thin_border_px: i32,
    pub watermark: Option<String>,
    pub watermark_font_size: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        PartialStyleConfig::default().resolve()
    }
}

/// Caller-supplied style; unset fields fall back to [`StyleDefaults`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialStyleConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub first_sentence_x: Option<i32>,
    pub second_sentence_x: Option<i32>,
    pub third_sentence_x: Option<i32>,
    pub author_name_x: Option<i32>,
    pub font_path: Option<PathBuf>,
    /// `Some(vec![])` disables fallback fonts.
    pub fallback_font_paths: Option<Vec<PathBuf>>,
    pub font_size: Option<f32>,
    pub author_font_size: Option<f32>,
    #[serde(with = "hex_color::option")]
    pub font_color: Option<Color>,
    pub background: Option<Background>,
    pub margin_px: Option<i32>,
    #[serde(with = "hex_color::option")]
    pub thick_border_color: Option<Color>,
    #[serde(with = "hex_color::option")]
    pub thin_border_color: Option<Color>,
    pub thick_border_px: Option<i32>,
    pub thin_border_px: Option<i32>,
    /// An empty string is treated the same as no watermark.
    pub watermark: Option<String>,
    pub watermark_font_size: Option<f32>,
}

impl PartialStyleConfig {
    /// Resolve against [`StyleDefaults::KOKUN`].
    pub fn resolve(&self) -> StyleConfig {
        self.resolve_with(&StyleDefaults::KOKUN)
    }

    /// Fill every unset field from `defaults`. Never fails.
    pub fn resolve_with(&self, defaults: &StyleDefaults) -> StyleConfig {
        StyleConfig {
            width: self.width.unwrap_or(defaults.width),
            height: self.height.unwrap_or(defaults.height),
            first_sentence_x: self.first_sentence_x.unwrap_or(defaults.first_sentence_x),
            second_sentence_x: self
                .second_sentence_x
                .unwrap_or(defaults.second_sentence_x),
            third_sentence_x: self.third_sentence_x.unwrap_or(defaults.third_sentence_x),
            author_name_x: self.author_name_x.unwrap_or(defaults.author_name_x),
            font_path: self
                .font_path
                .clone()
                .unwrap_or_else(|| PathBuf::from(defaults.font_path)),
            fallback_font_paths: self.fallback_font_paths.clone().unwrap_or_else(|| {
                defaults
                    .fallback_font_paths
                    .iter()
                    .map(PathBuf::from)
                    .collect()
            }),
            font_size: self.font_size.unwrap_or(defaults.font_size),
            author_font_size: self.author_font_size.unwrap_or(defaults.author_font_size),
            font_color: self.font_color.unwrap_or(defaults.font_color),
            background: self
                .background
                .clone()
                .unwrap_or(Background::Color(defaults.background_color)),
            margin_px: self.margin_px.unwrap_or(defaults.margin_px),
            thick_border_color: self
                .thick_border_color
                .unwrap_or(defaults.thick_border_color),
            thin_border_color: self.thin_border_color.unwrap_or(defaults.thin_border_color),
            thick_border_px: self.thick_border_px.unwrap_or(defaults.thick_border_px),
            thin_border_px: self.thin_border_px.unwrap_or(defaults.thin_border_px),
            watermark: self.watermark.clone().filter(|w| !w.is_empty()),
            watermark_font_size: self
                .watermark_font_size
                .unwrap_or(defaults.watermark_font_size),
        }
    }

    /// Layer `over` on top of `self`: fields set in `over` win.
    pub fn merge(self, over: PartialStyleConfig) -> PartialStyleConfig {
        PartialStyleConfig {
            width: over.width.or(self.width),
            height: over.height.or(self.height),
            first_sentence_x: over.first_sentence_x.or(self.first_sentence_x),
            second_sentence_x: over.second_sentence_x.or(self.second_sentence_x),
            third_sentence_x: over.third_sentence_x.or(self.third_sentence_x),
            author_name_x: over.author_name_x.or(self.author_name_x),
            font_path: over.font_path.or(self.font_path),
            fallback_font_paths: over.fallback_font_paths.or(self.fallback_font_paths),
            font_size: over.font_size.or(self.font_size),
            author_font_size: over.author_font_size.or(self.author_font_size),
            font_color: over.font_color.or(self.font_color),
            background: over.background.or(self.background),
            margin_px: over.margin_px.or(self.margin_px),
            thick_border_color: over.thick_border_color.or(self.thick_border_color),
            thin_border_color: over.thin_border_color.or(self.thin_border_color),
            thick_border_px: over.thick_border_px.or(self.thick_border_px),
            thin_border_px: over.thin_border_px.or(self.thin_border_px),
            watermark: over.watermark.or(self.watermark),
            watermark_font_size: over.watermark_font_size.or(self.watermark_font_size),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| KokunError::Config(e.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| KokunError::Config(format!("{}: {}", path.display(), e)))
    }
}

/// Resolve `partial` against the stock defaults.
pub fn resolve(partial: &PartialStyleConfig) -> StyleConfig {
    partial.resolve()
}

/// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
pub fn parse_hex_color(input: &str) -> Option<Color> {
    let hex = input.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        6 => Some(Rgba([channel(0)?, channel(2)?, channel(4)?, 255])),
        8 => Some(Rgba([channel(0)?, channel(2)?, channel(4)?, channel(6)?])),
        _ => None,
    }
}

/// Format as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
pub fn format_hex_color(color: Color) -> String {
    let [r, g, b, a] = color.0;
    if a == 255 {
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    } else {
        format!("#{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
    }
}

/// Serde adapters for colors written as hex strings.
mod hex_color {
    use super::{Color, format_hex_color, parse_hex_color};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_hex_color(*color))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_hex_color(&s).ok_or_else(|| D::Error::custom(format!("invalid color '{}'", s)))
    }

    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(
            color: &Option<Color>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match color {
                Some(c) => serializer.serialize_some(&format_hex_color(*c)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Color>, D::Error> {
            let opt: Option<String> = Option::deserialize(deserializer)?;
            match opt {
                None => Ok(None),
                Some(s) => parse_hex_color(&s)
                    .map(Some)
                    .ok_or_else(|| D::Error::custom(format!("invalid color '{}'", s))),
            }
        }
    }
}
