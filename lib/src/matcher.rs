//! Glyph-brightness matching engine
//!
//! A [`CharMatcher`] owns an ordered character set and a normalized
//! brightness index over it. Each character has a fixed intrinsic brightness
//! (its glyph's ink density); within a set, intrinsic values are rescaled so
//! the darkest member sits at 0.0 and the brightest at 1.0. Nearest-key
//! lookup over the normalized keys answers "which glyph best renders this
//! tile brightness".
//!
//! Adds and removes are maintained incrementally: an edit that leaves the
//! intrinsic min/max untouched is a single entry insert/removal, while an
//! edit that shifts an extreme renormalizes every key against the new range.
//! Indexes are immutable once built and shared through `Rc`; an edit swaps
//! in a new (or cached) index as one unit, so no half-renormalized state is
//! ever observable.

use std::rc::Rc;

use log::debug;

use crate::cache::Caches;

/// One bounds tuple: intrinsic extremes and the characters holding them
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Smallest intrinsic brightness in the set
    pub min: f64,
    /// Largest intrinsic brightness in the set
    pub max: f64,
    /// Character holding `min` (first in code-point order on ties)
    pub darkest: char,
    /// Character holding `max` (first in code-point order on ties)
    pub brightest: char,
}

/// Immutable ordered map from normalized brightness to character
///
/// Keys are unique by construction: when two characters normalize to the
/// same key, the later one in code-point order takes the slot. The entries
/// vector stays sorted, so floor/ceiling lookups are binary searches.
#[derive(Debug, Clone, PartialEq)]
pub struct BrightnessIndex {
    entries: Vec<(f64, char)>,
    bounds: Option<Bounds>,
}

impl BrightnessIndex {
    /// Index over the empty set
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            bounds: None,
        }
    }

    /// Build an index over `chars` (sorted, distinct), fetching intrinsic
    /// values through the cache
    ///
    /// Non-degenerate sets are normalized against their min/max; a single
    /// character, or a set whose members all share one intrinsic value,
    /// keeps raw intrinsic brightness as its key.
    pub fn build(chars: &[char], caches: &mut Caches) -> Self {
        let Some(&first) = chars.first() else {
            return Self::empty();
        };

        let mut bounds = Bounds {
            min: caches.glyphs.intrinsic(first),
            max: caches.glyphs.intrinsic(first),
            darkest: first,
            brightest: first,
        };
        let mut intrinsics = Vec::with_capacity(chars.len());
        for &c in chars {
            let value = caches.glyphs.intrinsic(c);
            intrinsics.push((c, value));
            if value > bounds.max {
                bounds.max = value;
                bounds.brightest = c;
            }
            if value < bounds.min {
                bounds.min = value;
                bounds.darkest = c;
            }
        }

        let span = bounds.max - bounds.min;
        let mut index = Self {
            entries: Vec::with_capacity(chars.len()),
            bounds: Some(bounds),
        };
        for (c, value) in intrinsics {
            let key = if span > 0.0 {
                (value - bounds.min) / span
            } else {
                // Degenerate range: keep the raw intrinsic value
                value
            };
            index.put(key, c);
        }
        index
    }

    /// Ordered-map insert: replace the character on an exact key collision
    fn put(&mut self, key: f64, c: char) {
        match self
            .entries
            .binary_search_by(|&(existing, _)| existing.total_cmp(&key))
        {
            Ok(at) => self.entries[at].1 = c,
            Err(at) => self.entries.insert(at, (key, c)),
        }
    }

    /// Copy of this index with one extra entry, bounds unchanged
    fn with_entry(&self, key: f64, c: char) -> Self {
        let mut copy = self.clone();
        copy.put(key, c);
        copy
    }

    /// Copy of this index without the entry holding `c`, bounds unchanged
    ///
    /// Returns `None` when `c` holds no entry, which happens when its key
    /// was taken over by a colliding character.
    fn without_char(&self, c: char) -> Option<Self> {
        let at = self.entries.iter().position(|&(_, held)| held == c)?;
        let mut copy = self.clone();
        copy.entries.remove(at);
        Some(copy)
    }

    /// Nearest-key lookup with a fixed tie-break
    ///
    /// Returns the character whose key is numerically closest to
    /// `brightness`; on an exact tie in distance the ceiling entry (the
    /// brighter candidate) wins. `None` only for the empty index.
    pub fn glyph_for(&self, brightness: f64) -> Option<char> {
        // First entry with key >= brightness
        let at = self
            .entries
            .partition_point(|&(key, _)| key < brightness);
        let ceiling = self.entries.get(at);
        let floor = at.checked_sub(1).map(|i| &self.entries[i]);

        match (floor, ceiling) {
            (None, None) => None,
            (Some(&(_, c)), None) | (None, Some(&(_, c))) => Some(c),
            (Some(&(floor_key, floor_char)), Some(&(ceil_key, ceil_char))) => {
                if ceil_key - brightness > brightness - floor_key {
                    Some(floor_char)
                } else {
                    Some(ceil_char)
                }
            }
        }
    }

    /// Intrinsic extremes of the set, `None` when empty
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Normalized keys and characters in ascending key order
    pub fn entries(&self) -> &[(f64, char)] {
        &self.entries
    }
}

/// Character set plus the brightness index built over it
///
/// All operations that can change the set take the shared [`Caches`]: edits
/// consult the index cache first (structural sharing beats rebuilding) and
/// fetch intrinsic values through the brightness cache, so no glyph is ever
/// rasterized twice per process.
pub struct CharMatcher {
    chars: Vec<char>,
    index: Rc<BrightnessIndex>,
}

impl CharMatcher {
    /// Build a matcher over `charset`; duplicates collapse, order is
    /// ascending code point
    pub fn new(charset: &[char], caches: &mut Caches) -> Self {
        let mut chars = charset.to_vec();
        chars.sort_unstable();
        chars.dedup();

        if let Some(index) = caches.indexes.get(&chars) {
            debug!("adopting cached index for {} chars", chars.len());
            return Self { chars, index };
        }

        let index = Rc::new(BrightnessIndex::build(&chars, caches));
        caches.indexes.insert(chars.clone(), Rc::clone(&index));
        Self { chars, index }
    }

    /// The glyph whose normalized brightness is nearest to `brightness`
    ///
    /// `None` when the set is empty; callers are expected to check
    /// [`is_empty`](Self::is_empty) before converting an image.
    pub fn glyph_for(&self, brightness: f64) -> Option<char> {
        self.index.glyph_for(brightness)
    }

    /// Add `c` to the set; no-op if already a member
    pub fn add_char(&mut self, c: char, caches: &mut Caches) {
        let Err(at) = self.chars.binary_search(&c) else {
            return;
        };
        self.chars.insert(at, c);

        if let Some(index) = caches.indexes.get(&self.chars) {
            self.index = index;
            return;
        }

        let value = caches.glyphs.intrinsic(c);
        self.index = match self.index.bounds {
            // Inside the current range: single insert, bounds stand
            Some(bounds)
                if bounds.min < bounds.max && value >= bounds.min && value <= bounds.max =>
            {
                let key = (value - bounds.min) / (bounds.max - bounds.min);
                Rc::new(self.index.with_entry(key, c))
            }
            // New extreme (or degenerate range): renormalize everything
            _ => Rc::new(BrightnessIndex::build(&self.chars, caches)),
        };
        caches.indexes.insert(self.chars.clone(), Rc::clone(&self.index));
    }

    /// Remove `c` from the set; no-op if absent
    pub fn remove_char(&mut self, c: char, caches: &mut Caches) {
        let Ok(at) = self.chars.binary_search(&c) else {
            return;
        };
        self.chars.remove(at);

        if let Some(index) = caches.indexes.get(&self.chars) {
            self.index = index;
            return;
        }

        let keeps_bounds = self
            .index
            .bounds
            .is_some_and(|bounds| c != bounds.darkest && c != bounds.brightest);
        // A member with the same intrinsic value shares the removed char's
        // key; whichever of the pair holds the collapsed entry, removing
        // one must leave the other present in the index
        let value = caches.glyphs.intrinsic(c);
        let mut shares_key = false;
        for &other in &self.chars {
            if caches.glyphs.intrinsic(other) == value {
                shares_key = true;
                break;
            }
        }
        self.index = if keeps_bounds && !shares_key {
            match self.index.without_char(c) {
                Some(index) => Rc::new(index),
                None => Rc::new(BrightnessIndex::build(&self.chars, caches)),
            }
        } else {
            // Range shrank, or a shared key needs its survivor back:
            // recompute extremes and renormalize
            Rc::new(BrightnessIndex::build(&self.chars, caches))
        };
        caches.indexes.insert(self.chars.clone(), Rc::clone(&self.index));
    }

    /// Members in ascending code-point order
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The index currently backing lookups (shared, immutable)
    pub fn index(&self) -> &Rc<BrightnessIndex> {
        &self.index
    }
}
