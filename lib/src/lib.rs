//! ASCII Mosaic - image to ASCII art via glyph-brightness matching
//!
//! Converts a raster image into a grid of text glyphs. The image is padded
//! to power-of-two dimensions, split into square tiles, and each tile's
//! luma-weighted average brightness is matched against a user-editable
//! character set: the glyph whose rendered ink density (normalized within
//! the set) sits nearest wins.
//!
//! The matching engine maintains its normalized brightness index
//! incrementally as characters are added and removed, and a two-level cache
//! (intrinsic brightness per character, built index per character set)
//! guarantees no glyph is ever rasterized twice in a process.
//!
//! # Example
//! ```no_run
//! use ascii_mosaic::{CharMatcher, Caches, render_mosaic};
//!
//! let input = image::open("photo.jpg").unwrap().to_rgba8();
//! let mut caches = Caches::new();
//! let matcher = CharMatcher::new(&[' ', '.', ':', '#', '@'], &mut caches);
//! let grid = render_mosaic(&input, 64, &matcher).unwrap();
//! for row in &grid {
//!     println!("{}", row.iter().collect::<String>());
//! }
//! ```

pub mod cache;
pub mod error;
pub mod matcher;
pub mod output;
pub mod processor;
pub mod raster;
pub mod session;
pub mod tiles;

// Re-export main types for convenience
pub use cache::{Caches, GlyphBrightnessCache, IndexCache};
pub use error::MosaicError;
pub use matcher::{BrightnessIndex, CharMatcher};
pub use output::{AsciiOutput, ConsoleOutput, HtmlOutput};
pub use processor::render_mosaic;
pub use raster::{GlyphBitmap, GlyphRasterizer, MonoRasterizer};
pub use session::Session;
