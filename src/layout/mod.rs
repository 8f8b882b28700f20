//! # Layout
//!
//! Placement of the card's two kinds of geometry:
//!
//! - [`vertical`]: top-to-bottom glyph columns with top, center and bottom alignment
//! - [`border`]: concentric rectangular frames
//!
//! Nothing here validates geometry. Columns and frames that fall partly or
//! wholly outside the canvas are drawn anyway and the canvas drops the
//! off-canvas pixels.

pub mod border;
pub mod vertical;

pub use border::{draw_nested_borders, draw_rect};
pub use vertical::{
    ColumnStyle, VERTICAL_HYPHEN, VerticalAlign, column_top, draw_aligned_column,
    draw_glyph_column, draw_vertical_column, vertical_glyph,
};
