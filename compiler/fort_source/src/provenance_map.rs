//! Run-length encoded mapping from buffer offsets to provenance.
//!
//! A [`ProvenanceMap`] travels with a byte buffer and records, for each
//! contiguous run of bytes, the provenance range the run came from. Runs are
//! registered in order and their lengths always sum to the buffer length.
//!
//! ```text
//! offsets:  0 1 2 3 | 4 5 | 6 7 8
//! runs:     @100..104 @7..9 @104..107
//! ```
//!
//! Registering a range that continues the last run extends that run instead
//! of adding a new one, so neighbouring runs are always splice boundaries.

use smallvec::SmallVec;

use crate::{Provenance, ProvenanceRange};

/// One run of the mapping: bytes `[offset, offset + range.len())` map onto
/// `range`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ProvenanceRun {
    /// Buffer offset of the first byte in the run.
    pub offset: usize,
    /// Provenance of the run's bytes, in order.
    pub range: ProvenanceRange,
}

impl ProvenanceRun {
    /// One past the last buffer offset covered by this run.
    #[inline]
    pub fn end(&self) -> usize {
        self.offset + self.range.len()
    }
}

/// Ordered, coalescing offset → provenance mapping.
///
/// Most prescanned lines are a single run, or a handful when continuation
/// lines or macro expansions are spliced in, so the runs live inline.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct ProvenanceMap {
    runs: SmallVec<[ProvenanceRun; 4]>,
}

impl ProvenanceMap {
    /// Create an empty mapping.
    pub fn new() -> Self {
        ProvenanceMap {
            runs: SmallVec::new(),
        }
    }

    /// Total number of bytes covered.
    #[inline]
    pub fn size_in_bytes(&self) -> usize {
        self.runs.last().map_or(0, ProvenanceRun::end)
    }

    /// Check if the mapping covers no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Number of runs after coalescing.
    #[inline]
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// Iterate over the runs in offset order.
    pub fn runs(&self) -> impl Iterator<Item = &ProvenanceRun> + '_ {
        self.runs.iter()
    }

    /// Register the next `range.len()` bytes as coming from `range`.
    ///
    /// Empty ranges register nothing.
    pub fn put(&mut self, range: ProvenanceRange) {
        if range.is_empty() {
            return;
        }
        let offset = self.size_in_bytes();
        if let Some(last) = self.runs.last_mut() {
            if last.range.annex_if_predecessor(range) {
                return;
            }
        }
        self.runs.push(ProvenanceRun { offset, range });
    }

    /// Register all runs of `that` after the bytes already covered.
    pub fn put_map(&mut self, that: &ProvenanceMap) {
        for run in &that.runs {
            self.put(run.range);
        }
    }

    /// Index of the run covering `offset`.
    fn run_index(&self, offset: usize) -> usize {
        assert!(
            offset < self.size_in_bytes(),
            "offset {offset} outside provenance map of {} bytes",
            self.size_in_bytes()
        );
        // Run offsets start at 0, so at least one run satisfies the predicate.
        self.runs.partition_point(|run| run.offset <= offset) - 1
    }

    /// The provenance of `offset` through the end of its run.
    ///
    /// An empty mapping answers the empty range for offset 0.
    ///
    /// # Panics
    /// Panics if `offset` is not covered by the mapping.
    pub fn map(&self, offset: usize) -> ProvenanceRange {
        if self.runs.is_empty() && offset == 0 {
            return ProvenanceRange::empty();
        }
        let run = &self.runs[self.run_index(offset)];
        run.range.suffix(offset - run.offset)
    }

    /// The provenance of a single byte.
    ///
    /// # Panics
    /// Panics if `offset` is not covered by the mapping.
    pub fn lookup(&self, offset: usize) -> Provenance {
        let run = &self.runs[self.run_index(offset)];
        run.range.offset_member(offset - run.offset)
    }

    /// The provenance of the `len` bytes starting at `offset`.
    ///
    /// The answer is only exact when those bytes are contiguous in the
    /// original source; across a splice boundary it stops at the boundary.
    ///
    /// # Panics
    /// Panics if the bytes are not all covered by the mapping.
    pub fn lookup_range(&self, offset: usize, len: usize) -> ProvenanceRange {
        if len == 0 {
            return ProvenanceRange::empty();
        }
        assert!(
            offset + len <= self.size_in_bytes(),
            "bytes {offset}..{} outside provenance map of {} bytes",
            offset + len,
            self.size_in_bytes()
        );
        self.map(offset).prefix(len)
    }

    /// Drop the mapping for everything at and after `len`.
    pub fn truncate(&mut self, len: usize) {
        while self.runs.last().is_some_and(|run| run.offset >= len) {
            self.runs.pop();
        }
        if let Some(last) = self.runs.last_mut() {
            if last.end() > len {
                last.range = last.range.prefix(len - last.offset);
            }
        }
    }

    /// Drop the mapping for the last `bytes` bytes.
    ///
    /// # Panics
    /// Panics if fewer than `bytes` bytes are mapped.
    pub fn remove_last_bytes(&mut self, bytes: usize) {
        let size = self.size_in_bytes();
        assert!(
            bytes <= size,
            "cannot remove {bytes} bytes from provenance map of {size} bytes"
        );
        self.truncate(size - bytes);
    }

    /// Remove every run.
    pub fn clear(&mut self) {
        self.runs.clear();
    }

    /// Release spare run capacity.
    pub fn shrink_to_fit(&mut self) {
        self.runs.shrink_to_fit();
    }
}
