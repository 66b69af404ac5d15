//! Preprocessing token sequences for the Fortran prescanner.
//!
//! A [`TokenSequence`] holds a contiguous run of bytes partitioned into
//! preprocessing tokens, and remembers for every byte where it came from in
//! the pristine source. The prescanner builds one per logical line, splices
//! in continuation lines and macro expansions, normalizes it, and finally
//! emits it into the cooked source.
//!
//! # Architecture
//!
//! ```text
//! driver ─ put/copy ─▶ TokenSequence ─ remove_blanks/clip_comment ─▶ emit ─▶ CookedSink
//!                           │
//!                           └─ check_* ─▶ Messages
//! ```
//!
//! Token kinds are not tracked here; classification happens when the cooked
//! source is parsed.

mod characters;
mod context;
mod token_sequence;

pub use characters::{is_blank, is_valid_fortran_token_character};
pub use context::{DirectiveSentinels, NoDirectives, ScannerContext};
pub use token_sequence::TokenSequence;
