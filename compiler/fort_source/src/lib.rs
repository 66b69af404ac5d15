//! Source provenance for the Fortran prescanner.
//!
//! This crate contains the types that tie prescanned bytes back to the
//! pristine input they came from:
//! - [`Provenance`] and [`ProvenanceRange`] for positions in the global
//!   provenance space (files, inclusions, macro expansions)
//! - [`ProvenanceMap`] for the run-length encoded offset → provenance mapping
//!   carried alongside every byte buffer
//! - [`CookedSource`] and the [`CookedSink`] trait for the final, fully
//!   processed character stream
//!
//! # Run Coalescing
//!
//! Adjacent runs whose ranges are contiguous in the original source are
//! merged as they are registered. Two neighbouring runs in a
//! [`ProvenanceMap`] are therefore always a splice boundary, which is what
//! makes range queries able to tell a contiguous span from a stitched one.

mod cooked;
mod provenance;
mod provenance_map;

pub use cooked::{CookedSink, CookedSource, CookedSourceError};
pub use provenance::{Provenance, ProvenanceRange};
pub use provenance_map::{ProvenanceMap, ProvenanceRun};
