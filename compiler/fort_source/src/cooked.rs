//! Cooked source: the prescanner's final output stream.
//!
//! Once a line has been fully processed (continuations joined, macros
//! expanded, comments and redundant blanks removed) its bytes are appended
//! here together with their provenance runs. Later phases parse the cooked
//! bytes and map offsets back through [`CookedSource::get_provenance`] when
//! they report errors.

use std::ops::Range;

use crate::{Provenance, ProvenanceMap, ProvenanceRange};

/// Receiver of fully processed bytes and their provenance.
pub trait CookedSink {
    /// Append `bytes`, whose provenance is described by `provenances`.
    ///
    /// `provenances` covers exactly `bytes.len()` bytes.
    fn append(&mut self, bytes: &[u8], provenances: &ProvenanceMap);
}

/// Error looking up an offset in the cooked source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CookedSourceError {
    /// The offset lies past the end of the cooked bytes.
    #[error("cooked offset {offset} is out of range (cooked source has {len} bytes)")]
    OffsetOutOfRange { offset: usize, len: usize },
}

/// Accumulated cooked bytes with their offset → provenance mapping.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct CookedSource {
    bytes: Vec<u8>,
    provenances: ProvenanceMap,
}

impl CookedSource {
    /// Create an empty cooked source.
    pub fn new() -> Self {
        CookedSource {
            bytes: Vec::new(),
            provenances: ProvenanceMap::new(),
        }
    }

    /// The cooked bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of cooked bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if nothing has been cooked yet.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The offset → provenance mapping of the cooked bytes.
    pub fn provenance_map(&self) -> &ProvenanceMap {
        &self.provenances
    }

    /// The provenance of the cooked byte at `offset` through the end of its
    /// run.
    pub fn get_provenance(&self, offset: usize) -> Result<ProvenanceRange, CookedSourceError> {
        if offset >= self.bytes.len() {
            return Err(CookedSourceError::OffsetOutOfRange {
                offset,
                len: self.bytes.len(),
            });
        }
        Ok(self.provenances.map(offset))
    }

    /// The provenance of the single cooked byte at `offset`.
    pub fn char_provenance(&self, offset: usize) -> Result<Provenance, CookedSourceError> {
        self.get_provenance(offset).map(|range| range.start())
    }

    /// Find the cooked bytes whose provenance is exactly `range`.
    ///
    /// Returns `None` when `range` is not covered by a single run, e.g. when
    /// it names text that was removed during cooking or spans a splice.
    pub fn find_cooked_range(&self, range: ProvenanceRange) -> Option<Range<usize>> {
        self.provenances.runs().find_map(|run| {
            if run.range.contains_range(range) {
                let start = run.offset + (range.start().raw() - run.range.start().raw());
                Some(start..start + range.len())
            } else {
                None
            }
        })
    }

    /// Consume the cooked source, returning its bytes and mapping.
    pub fn into_parts(self) -> (Vec<u8>, ProvenanceMap) {
        (self.bytes, self.provenances)
    }
}

impl CookedSink for CookedSource {
    fn append(&mut self, bytes: &[u8], provenances: &ProvenanceMap) {
        assert_eq!(
            bytes.len(),
            provenances.size_in_bytes(),
            "cooked bytes and provenance map disagree in length"
        );
        self.bytes.extend_from_slice(bytes);
        self.provenances.put_map(provenances);
    }
}
