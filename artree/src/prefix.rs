//! Compressed path prefixes.
//!
//! Every internal node carries the byte run shared by all keys routed
//! through it. Only the first [`PREFIX_CAPACITY`] bytes are materialized
//! inline; a longer run keeps its full logical length but truncates the
//! stored bytes, and the descent confirms the tail against a leaf key
//! (pessimistic path compression).

use std::cmp::min;

/// Inline prefix bytes per internal node. A larger capacity means fewer
/// leaf reads to confirm truncated prefixes, at the cost of bigger nodes.
pub const PREFIX_CAPACITY: usize = 32;

#[derive(Clone)]
pub struct Prefix {
    data: [u8; PREFIX_CAPACITY],
    /// Logical length of the compressed run; may exceed `PREFIX_CAPACITY`.
    len: usize,
}

impl Prefix {
    pub fn empty() -> Self {
        Self {
            data: [0; PREFIX_CAPACITY],
            len: 0,
        }
    }

    /// A prefix of logical length `len` whose bytes are `key[start..]`.
    /// Bytes past the inline capacity are dropped; `key` must cover at
    /// least the stored portion.
    pub fn from_key_range(key: &[u8], start: usize, len: usize) -> Self {
        let stored = min(len, PREFIX_CAPACITY);
        debug_assert!(start + stored <= key.len());
        let mut data = [0; PREFIX_CAPACITY];
        data[..stored].copy_from_slice(&key[start..start + stored]);
        Self { data, len }
    }

    /// Logical length of the run this prefix represents.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The materialized portion of the run.
    #[inline]
    pub fn stored(&self) -> &[u8] {
        &self.data[..self.stored_len()]
    }

    #[inline]
    pub fn stored_len(&self) -> usize {
        min(self.len, PREFIX_CAPACITY)
    }

    /// True when the logical run extends past the inline window and the
    /// tail has to be confirmed against a leaf key.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.len > PREFIX_CAPACITY
    }

    #[inline]
    pub fn at(&self, pos: usize) -> u8 {
        debug_assert!(pos < self.stored_len());
        self.data[pos]
    }

    /// Number of bytes of `key[depth..]` matching the inline window. The
    /// whole stored portion matched iff the result equals
    /// [`Self::stored_len`].
    pub fn match_key(&self, key: &[u8], depth: usize) -> usize {
        let n = min(self.stored_len(), key.len().saturating_sub(depth));
        let mut idx = 0;
        while idx < n && self.data[idx] == key[depth + idx] {
            idx += 1;
        }
        idx
    }

    /// The same run cut down to its first `keep` bytes. `keep` may exceed
    /// the inline capacity, in which case the result is itself truncated.
    pub fn truncated_to(&self, keep: usize) -> Self {
        debug_assert!(keep <= self.len);
        let mut data = [0; PREFIX_CAPACITY];
        let stored = min(keep, PREFIX_CAPACITY);
        data[..stored].copy_from_slice(&self.data[..stored]);
        Self { data, len: keep }
    }

    /// The run with its first `start` bytes dropped. Only valid while the
    /// run is fully materialized; a truncated run has to be rebuilt from a
    /// leaf key instead.
    pub fn suffix_from(&self, start: usize) -> Self {
        debug_assert!(!self.is_truncated());
        debug_assert!(start <= self.len);
        let mut data = [0; PREFIX_CAPACITY];
        let stored = self.len - start;
        data[..stored].copy_from_slice(&self.data[start..self.len]);
        Self { data, len: stored }
    }

    /// Concatenation `self + edge + other`, used when a single-child node
    /// collapses into its child. The logical lengths always add up; the
    /// inline window keeps whatever fits.
    pub fn extended_with(&self, edge: u8, other: &Prefix) -> Self {
        let mut data = [0; PREFIX_CAPACITY];
        let mut stored = self.stored_len();
        data[..stored].copy_from_slice(self.stored());
        if stored < PREFIX_CAPACITY {
            data[stored] = edge;
            stored += 1;
            let tail = min(other.stored_len(), PREFIX_CAPACITY - stored);
            data[stored..stored + tail].copy_from_slice(&other.stored()[..tail]);
        }
        Self {
            data,
            len: self.len + 1 + other.len,
        }
    }
}
