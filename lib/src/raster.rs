//! Glyph rasterization
//!
//! Renders single characters into fixed-size binary (ink/no-ink) bitmaps.
//! The ink count of a glyph's bitmap is what defines its intrinsic
//! brightness, so rendering must be deterministic: the same character always
//! produces the same bitmap within a process.

use noto_sans_mono_bitmap::{FontWeight, RasterHeight, get_raster, get_raster_width};

/// Coverage level at which an anti-aliased cell counts as ink
const INK_THRESHOLD: u8 = 64;

/// Raster height used for all glyphs (pixels)
const GLYPH_HEIGHT: RasterHeight = RasterHeight::Size16;

/// A fixed-size binary bitmap of a rendered character
///
/// Cells are stored row-major; `true` means ink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphBitmap {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl GlyphBitmap {
    /// Create a bitmap from row-major cells
    ///
    /// # Panics
    /// Panics if `cells.len() != width * height`.
    pub fn new(width: usize, height: usize, cells: Vec<bool>) -> Self {
        assert_eq!(cells.len(), width * height, "cell count must match dimensions");
        Self { width, height, cells }
    }

    /// Create an all-blank bitmap
    pub fn blank(width: usize, height: usize) -> Self {
        Self::new(width, height, vec![false; width * height])
    }

    /// Number of ink cells
    pub fn ink_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Total number of cells
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Bitmap width in cells
    pub fn width(&self) -> usize {
        self.width
    }

    /// Bitmap height in cells
    pub fn height(&self) -> usize {
        self.height
    }
}

/// Deterministic character-to-bitmap renderer
///
/// Implementations must be pure: no state, and total over at least the
/// printable ASCII range (32-126). All bitmaps produced by one rasterizer
/// share the same dimensions.
pub trait GlyphRasterizer {
    fn render(&self, c: char) -> GlyphBitmap;
}

/// Default rasterizer backed by the embedded Noto Sans Mono bitmap font
///
/// No font files are loaded at runtime; the glyph rasters are compiled into
/// the binary. Characters outside the font's coverage render blank.
#[derive(Debug, Default)]
pub struct MonoRasterizer;

impl MonoRasterizer {
    pub fn new() -> Self {
        Self
    }

    fn cell_width() -> usize {
        get_raster_width(FontWeight::Regular, GLYPH_HEIGHT)
    }
}

impl GlyphRasterizer for MonoRasterizer {
    fn render(&self, c: char) -> GlyphBitmap {
        let width = Self::cell_width();
        let height = GLYPH_HEIGHT.val();

        let Some(raster) = get_raster(c, FontWeight::Regular, GLYPH_HEIGHT) else {
            return GlyphBitmap::blank(width, height);
        };

        let mut cells = Vec::with_capacity(width * height);
        for row in raster.raster() {
            for &coverage in row.iter() {
                cells.push(coverage >= INK_THRESHOLD);
            }
        }
        GlyphBitmap::new(raster.width(), raster.height(), cells)
    }
}
