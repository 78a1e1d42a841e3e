//! Per-set tag storage with LRU ordering.
//!
//! Each set is a bounded sequence of resident lines ordered from least
//! recently used (front) to most recently used (back). A line's dirty flag
//! travels with its tag, so the two can never fall out of alignment when a
//! line is promoted, inserted or evicted.
//!
//! # Performance
//!
//! - **Lookup:** O(W) linear scan, W = associativity
//! - **Promotion:** O(W) removal from the middle of the sequence
//! - **Insertion / eviction:** O(1) at the ends

use std::collections::VecDeque;

/// A resident cache line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheLine {
    /// Tag of the block held by this line.
    pub tag: u64,
    /// Set when the block has been modified since it was filled.
    /// Always `false` under write-through.
    pub dirty: bool,
}

/// Result of looking a tag up in a set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lookup {
    /// The tag is resident at this position (0 = LRU).
    Hit(usize),
    /// The tag is not resident.
    Miss,
}

impl Lookup {
    /// Returns `true` for [`Lookup::Hit`].
    #[inline]
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit(_))
    }
}

/// State of the replacement step for one access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Replacement {
    /// Tag resident; promote it to MRU.
    Hit(usize),
    /// Tag absent and the set has a free way.
    MissWithRoom,
    /// Tag absent and every way is occupied; the LRU line must go.
    MissFull,
}

/// One set of a set-associative cache.
#[derive(Debug, PartialEq, Eq)]
pub struct CacheSet {
    lines: VecDeque<CacheLine>,
    ways: usize,
}

impl Clone for CacheSet {
    fn clone(&self) -> Self {
        Self {
            lines: self.lines.clone(),
            ways: self.ways,
        }
    }

    /// Reuses this set's buffer.
    fn clone_from(&mut self, source: &Self) {
        self.lines.clone_from(&source.lines);
        self.ways = source.ways;
    }
}

impl CacheSet {
    /// Creates an empty set with room for `ways` lines.
    pub fn new(ways: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(ways),
            ways,
        }
    }

    /// Finds `tag` by linear scan. Does not reorder the set.
    pub fn lookup(&self, tag: u64) -> Lookup {
        self.lines
            .iter()
            .position(|line| line.tag == tag)
            .map_or(Lookup::Miss, Lookup::Hit)
    }

    /// Classifies a lookup result against the current occupancy.
    pub fn classify(&self, lookup: Lookup) -> Replacement {
        match lookup {
            Lookup::Hit(position) => Replacement::Hit(position),
            Lookup::Miss if self.is_full() => Replacement::MissFull,
            Lookup::Miss => Replacement::MissWithRoom,
        }
    }

    /// Runs the LRU replacement step for one access.
    ///
    /// `modify` is `true` for a store whose line should become dirty. A hit
    /// keeps the line's previous dirty flag unless `modify` is set.
    ///
    /// Returns the evicted line when the set was full.
    pub fn replace(&mut self, lookup: Lookup, tag: u64, modify: bool) -> Option<CacheLine> {
        match self.classify(lookup) {
            Replacement::Hit(position) => {
                let dirty = self
                    .lines
                    .remove(position)
                    .is_some_and(|line| line.dirty);
                self.lines.push_back(CacheLine {
                    tag,
                    dirty: dirty || modify,
                });
                None
            }
            Replacement::MissWithRoom => {
                self.lines.push_back(CacheLine { tag, dirty: modify });
                None
            }
            Replacement::MissFull => {
                let evicted = self.lines.pop_front();
                self.lines.push_back(CacheLine { tag, dirty: modify });
                evicted
            }
        }
    }

    /// Returns `true` if every way is occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.lines.len() >= self.ways
    }

    /// Number of resident lines.
    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if no line is resident.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Capacity of the set (the associativity).
    #[inline]
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Resident lines, LRU first.
    pub fn lines(&self) -> impl ExactSizeIterator<Item = &CacheLine> + '_ {
        self.lines.iter()
    }

    /// Resident tags, LRU first.
    pub fn tags(&self) -> impl ExactSizeIterator<Item = u64> + '_ {
        self.lines.iter().map(|line| line.tag)
    }

    /// Dirty flags, index-aligned with [`tags`](Self::tags).
    pub fn dirty_flags(&self) -> impl ExactSizeIterator<Item = bool> + '_ {
        self.lines.iter().map(|line| line.dirty)
    }
}
