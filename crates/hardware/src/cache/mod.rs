//! Set-Associative Cache Engine.
//!
//! This module implements the trace-driven cache engine. Every access runs
//! the same pipeline:
//!
//! 1. **Decode:** split the address into tag, set index and block offset.
//! 2. **Lookup:** scan the addressed set and count a hit or a miss.
//! 3. **Replace:** promote, insert or evict under LRU ordering.
//! 4. **Account:** count block reads, write-backs and write-throughs
//!    according to the configured write policy.
//!
//! The engine only counts the memory traffic a real cache would cause; there
//! is no backing store.

/// Cache geometry and address decomposition.
pub mod geometry;

/// Per-set LRU tag storage.
pub mod set;

pub use self::geometry::CacheGeometry;
pub use self::set::{CacheLine, CacheSet, Lookup, Replacement};

use crate::common::addr::{Address, DecodedAddress};
use crate::common::data::Operation;
use crate::common::error::{AccessError, ConfigError, DecodeError};
use crate::config::CacheOptions;
use crate::stats::CacheStats;

/// What a single access did to the cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessOutcome {
    /// Decoded fields of the accessed address.
    pub decoded: DecodedAddress,
    /// Whether the tag was resident.
    pub hit: bool,
    /// Line pushed out of a full set, if any.
    pub evicted: Option<CacheLine>,
}

/// A single simulated cache.
///
/// Owns its sets and statistics outright; two engines never share state.
#[derive(Clone, Debug)]
pub struct CacheEngine {
    options: CacheOptions,
    geometry: CacheGeometry,
    sets: Vec<CacheSet>,
    stats: CacheStats,
}

impl CacheEngine {
    /// Creates a cold cache.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the options do not describe a valid
    /// geometry (see [`CacheGeometry::new`]).
    pub fn new(options: CacheOptions) -> Result<Self, ConfigError> {
        let geometry = CacheGeometry::new(&options)?;
        tracing::debug!(
            size = options.size,
            block_size = options.block_size,
            associativity = options.associativity,
            num_sets = geometry.num_sets,
            offset_bits = geometry.block_offset_bits,
            index_bits = geometry.set_index_bits,
            tag_bits = geometry.tag_bits,
            hit_policy = %options.hit_policy,
            miss_policy = %options.miss_policy,
            "cache constructed"
        );
        let sets = (0..geometry.num_sets)
            .map(|_| CacheSet::new(geometry.associativity))
            .collect();
        Ok(Self {
            options,
            geometry,
            sets,
            stats: CacheStats::default(),
        })
    }

    /// Executes one access given as a base-16 address token.
    ///
    /// Does not touch `accesses`; the caller owns that counter.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Decode`] if the address is malformed. The cache
    /// is left untouched in that case.
    pub fn execute(&mut self, op: Operation, address: &str) -> Result<AccessOutcome, AccessError> {
        let addr = Address::parse_hex(address)?;
        Ok(self.access(op, addr))
    }

    /// Executes one access given a raw trace operation code (`0` store, `1` load).
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Decode`] for a malformed address and
    /// [`AccessError::InvalidOperation`] for any other code. The address is
    /// checked first; neither failure mutates the cache.
    pub fn execute_code(&mut self, code: i64, address: &str) -> Result<AccessOutcome, AccessError> {
        let addr = Address::parse_hex(address)?;
        let op = Operation::try_from(code)?;
        Ok(self.access(op, addr))
    }

    /// Executes one access for an already-parsed address.
    pub fn access(&mut self, op: Operation, address: Address) -> AccessOutcome {
        let decoded = self.geometry.decode(address);
        let lookup = self.lookup(decoded.set_index, decoded.tag);
        let modify = op.is_store();
        let write_back = self.options.is_write_back();

        let set = &mut self.sets[decoded.set_index];
        if !lookup.is_hit() {
            if !modify && set.is_full() {
                self.stats.replaces += 1;
            }
            self.stats.reads += 1;
        }

        let evicted = set.replace(lookup, decoded.tag, modify && write_back);

        if write_back {
            if let Some(line) = evicted.filter(|line| line.dirty) {
                tracing::trace!(set = decoded.set_index, tag = line.tag, "dirty eviction");
                self.stats.writes += 1;
            }
        } else if modify {
            self.stats.writes += 1;
        }

        AccessOutcome {
            decoded,
            hit: lookup.is_hit(),
            evicted,
        }
    }

    /// Looks `tag` up in set `set_index`, counting a hit or a miss.
    ///
    /// Does not reorder the set.
    ///
    /// # Panics
    ///
    /// Panics if `set_index >= num_sets`. Indices produced by
    /// [`CacheGeometry::decode`] are always in range.
    pub fn lookup(&mut self, set_index: usize, tag: u64) -> Lookup {
        let lookup = self.sets[set_index].lookup(tag);
        if lookup.is_hit() {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
        }
        lookup
    }

    /// Decodes an address token with this cache's geometry.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if the token is not a valid 64-bit hex value.
    pub fn decode(&self, address: &str) -> Result<DecodedAddress, DecodeError> {
        self.geometry.decode_str(address)
    }

    /// Returns `true` if the block holding `address` is resident.
    pub fn contains(&self, address: Address) -> bool {
        let decoded = self.geometry.decode(address);
        self.sets[decoded.set_index].lookup(decoded.tag).is_hit()
    }

    /// Counts one access presented by the driver.
    #[inline]
    pub const fn record_access(&mut self) {
        self.stats.accesses += 1;
    }

    /// Replaces this cache's resident lines with a copy of `other`'s.
    ///
    /// Used by a driver that models one shared cache with two engines so each
    /// keeps its own statistics. Statistics are not copied.
    ///
    /// # Panics
    ///
    /// Panics if the two engines have different geometries.
    pub fn mirror_sets_from(&mut self, other: &Self) {
        assert_eq!(
            self.geometry, other.geometry,
            "mirrored caches must share a geometry"
        );
        self.sets.clone_from(&other.sets);
    }

    /// Replaces one set's resident lines with a copy of `other`'s.
    ///
    /// An access only touches the set it decodes to, so a driver mirroring
    /// after every access only needs to copy that set.
    ///
    /// # Panics
    ///
    /// Panics if the two engines have different geometries or `set_index`
    /// is out of range.
    pub fn mirror_set_from(&mut self, other: &Self, set_index: usize) {
        assert_eq!(
            self.geometry, other.geometry,
            "mirrored caches must share a geometry"
        );
        self.sets[set_index].clone_from(&other.sets[set_index]);
    }

    /// Accumulated statistics.
    #[inline]
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Options this cache was built from.
    #[inline]
    pub const fn options(&self) -> &CacheOptions {
        &self.options
    }

    /// Derived geometry.
    #[inline]
    pub const fn geometry(&self) -> &CacheGeometry {
        &self.geometry
    }

    /// All sets, indexed by set number.
    #[inline]
    pub fn sets(&self) -> &[CacheSet] {
        &self.sets
    }

    /// One set, or `None` if `index` is out of range.
    #[inline]
    pub fn set(&self, index: usize) -> Option<&CacheSet> {
        self.sets.get(index)
    }
}
