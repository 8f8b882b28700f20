//! # Kokun CLI
//!
//! Command-line interface for rendering senryu cards.
//!
//! ## Usage
//!
//! ```bash
//! # Render with the default style
//! kokun render --first 古池や --second 蛙飛び込む --third 水の音 --author 芭蕉 --out card.png
//!
//! # Layer a JSON style file and a few flag overrides
//! kokun render --config style.json --margin 0 --watermark kokun ... --out card.png
//!
//! # Paste a stamp image and print base64 instead of writing a file
//! kokun render ... --foreground stamp.png --fg-size 80x80 --fg-pos 420,860 --base64
//!
//! # Draw kanji the main font lacks with an installed Japanese font
//! kokun render ... --fallback-font /usr/share/fonts/opentype/ipaexfont-gothic/ipaexg.ttf --out card.png
//!
//! # Show the default style as JSON
//! kokun defaults
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use kokun::{
    Canvas, Composer, Foreground, KokunError, PartialStyleConfig, Poem,
    card::paste_foreground,
    font::BlockLoader,
};

/// Kokun - senryu card renderer
#[derive(Parser, Debug)]
#[command(name = "kokun")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a card to PNG
    Render {
        /// First line (top aligned)
        #[arg(long)]
        first: String,

        /// Second line (centered)
        #[arg(long)]
        second: String,

        /// Third line (bottom aligned)
        #[arg(long)]
        third: String,

        /// Author name
        #[arg(long)]
        author: String,

        /// JSON style file; flags below override it
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Font file
        #[arg(long, value_name = "FILE")]
        font: Option<PathBuf>,

        /// Font used for characters the main font lacks (repeatable; replaces the default list)
        #[arg(long = "fallback-font", value_name = "FILE")]
        fallback_fonts: Vec<PathBuf>,

        /// Watermark text drawn on the bottom frame
        #[arg(long)]
        watermark: Option<String>,

        /// Top/bottom margin in pixels
        #[arg(long)]
        margin: Option<i32>,

        /// Canvas width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Canvas height in pixels
        #[arg(long)]
        height: Option<u32>,

        /// Image to paste on top of the card
        #[arg(long, value_name = "FILE", requires_all = ["fg_size", "fg_pos"])]
        foreground: Option<PathBuf>,

        /// Foreground size as WIDTHxHEIGHT
        #[arg(long, value_name = "WxH", value_parser = parse_size)]
        fg_size: Option<(u32, u32)>,

        /// Foreground top-left corner as X,Y
        #[arg(long, value_name = "X,Y", value_parser = parse_point, allow_hyphen_values = true)]
        fg_pos: Option<(i32, i32)>,

        /// Draw glyphs as solid blocks (layout preview, no font needed)
        #[arg(long)]
        layout_only: bool,

        /// Output PNG file
        #[arg(long, value_name = "FILE", required_unless_present = "base64")]
        out: Option<PathBuf>,

        /// Print the PNG as base64 to stdout
        #[arg(long)]
        base64: bool,
    },

    /// Print the default style as JSON
    Defaults,
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize logging based on verbosity flag.
fn init_logger(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn run(command: Commands) -> Result<(), KokunError> {
    match command {
        Commands::Defaults => {
            let style = PartialStyleConfig::default().resolve();
            let json = serde_json::to_string_pretty(&style)
                .map_err(|e| KokunError::Config(e.to_string()))?;
            println!("{}", json);
        }

        Commands::Render {
            first,
            second,
            third,
            author,
            config,
            font,
            fallback_fonts,
            watermark,
            margin,
            width,
            height,
            foreground,
            fg_size,
            fg_pos,
            layout_only,
            out,
            base64,
        } => {
            let base_style = match config {
                Some(path) => PartialStyleConfig::from_file(&path)?,
                None => PartialStyleConfig::default(),
            };
            let style = base_style.merge(PartialStyleConfig {
                font_path: font,
                fallback_font_paths: (!fallback_fonts.is_empty()).then_some(fallback_fonts),
                watermark,
                margin_px: margin,
                width,
                height,
                ..Default::default()
            });

            let poem = Poem::new(first, second, third, author);
            let mut canvas = render(&poem, &style, layout_only)?;

            if let (Some(path), Some((width, height)), Some((left_x, top_y))) =
                (foreground, fg_size, fg_pos)
            {
                paste_foreground(
                    &mut canvas,
                    &Foreground {
                        path,
                        width,
                        height,
                        left_x,
                        top_y,
                    },
                )?;
            }

            if base64 {
                println!("{}", canvas.to_base64()?);
            }
            if let Some(path) = out {
                canvas.save(&path)?;
                eprintln!("Saved to {}", path.display());
            }
        }
    }

    Ok(())
}

fn render(poem: &Poem, style: &PartialStyleConfig, layout_only: bool) -> Result<Canvas, KokunError> {
    if layout_only {
        Composer::with_loader(BlockLoader).compose(poem, style)
    } else {
        Composer::new().compose(poem, style)
    }
}

/// Parse `WIDTHxHEIGHT`.
fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", s))?;
    let w = w.trim().parse().map_err(|_| format!("bad width '{}'", w))?;
    let h = h.trim().parse().map_err(|_| format!("bad height '{}'", h))?;
    Ok((w, h))
}

/// Parse `X,Y`. Either coordinate may be negative.
fn parse_point(s: &str) -> Result<(i32, i32), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{}'", s))?;
    let x = x.trim().parse().map_err(|_| format!("bad x '{}'", x))?;
    let y = y.trim().parse().map_err(|_| format!("bad y '{}'", y))?;
    Ok((x, y))
}
