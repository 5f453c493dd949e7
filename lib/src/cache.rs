//! Shared caches backing the brightness matcher
//!
//! Two levels of reuse keep repeated charset edits cheap:
//!
//! 1. [`GlyphBrightnessCache`] - a character's intrinsic brightness (ink
//!    cells over bitmap area) is computed from its rendered bitmap exactly
//!    once, then served from the cache for the lifetime of the process.
//! 2. [`IndexCache`] - a fully built [`BrightnessIndex`] is registered under
//!    its exact sorted character set, so a matcher whose edits converge on a
//!    previously seen set adopts the existing index instead of rebuilding.
//!
//! Both caches are append-only and exist purely to avoid recomputation.
//! They are explicitly constructed and passed into matcher operations rather
//! than living in ambient global state, which keeps tests isolated.

use std::collections::HashMap;
use std::rc::Rc;

use crate::matcher::BrightnessIndex;
use crate::raster::{GlyphRasterizer, MonoRasterizer};

/// Lazily populated map from character to intrinsic brightness
///
/// Intrinsic brightness is `ink_count / area` of the rendered bitmap, a
/// value in [0, 1] independent of any character set.
pub struct GlyphBrightnessCache {
    rasterizer: Box<dyn GlyphRasterizer>,
    values: HashMap<char, f64>,
}

impl GlyphBrightnessCache {
    /// Cache backed by the default embedded-font rasterizer
    pub fn new() -> Self {
        Self::with_rasterizer(Box::new(MonoRasterizer::new()))
    }

    /// Cache backed by a caller-supplied rasterizer
    pub fn with_rasterizer(rasterizer: Box<dyn GlyphRasterizer>) -> Self {
        Self {
            rasterizer,
            values: HashMap::new(),
        }
    }

    /// Fetch the intrinsic brightness of `c`, rasterizing on first use
    pub fn intrinsic(&mut self, c: char) -> f64 {
        let rasterizer = &*self.rasterizer;
        *self.values.entry(c).or_insert_with(|| {
            let bitmap = rasterizer.render(c);
            bitmap.ink_count() as f64 / bitmap.area() as f64
        })
    }
}

impl Default for GlyphBrightnessCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Map from a sorted character set to the index already built for it
///
/// Keys compare by value, not identity: two matchers whose sets become equal
/// share one index. Indexes are immutable once behind an `Rc`, so a cached
/// entry can never go stale.
#[derive(Default)]
pub struct IndexCache {
    indexes: HashMap<Vec<char>, Rc<BrightnessIndex>>,
}

impl IndexCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the index built for exactly this sorted set, if any
    pub fn get(&self, chars: &[char]) -> Option<Rc<BrightnessIndex>> {
        self.indexes.get(chars).map(Rc::clone)
    }

    /// Register an index under its sorted set
    pub fn insert(&mut self, chars: Vec<char>, index: Rc<BrightnessIndex>) {
        self.indexes.insert(chars, index);
    }
}

/// Both cache levels, bundled for injection into matcher operations
///
/// Owned by one long-lived context (the session); every matcher constructed
/// against the same `Caches` shares rasterization work and built indexes.
pub struct Caches {
    pub glyphs: GlyphBrightnessCache,
    pub indexes: IndexCache,
}

impl Caches {
    pub fn new() -> Self {
        Self {
            glyphs: GlyphBrightnessCache::new(),
            indexes: IndexCache::new(),
        }
    }

    pub fn with_rasterizer(rasterizer: Box<dyn GlyphRasterizer>) -> Self {
        Self {
            glyphs: GlyphBrightnessCache::with_rasterizer(rasterizer),
            indexes: IndexCache::new(),
        }
    }
}

impl Default for Caches {
    fn default() -> Self {
        Self::new()
    }
}
