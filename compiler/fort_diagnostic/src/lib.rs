//! Diagnostic collection for the Fortran prescanner.
//!
//! Content problems found in user source (bad characters, unbalanced
//! parentheses) are never fatal. They are reported into a [`Messages`]
//! collector as [`Diagnostic`] values located by a
//! [`ProvenanceRange`](fort_source::ProvenanceRange), and scanning carries on.
//!
//! ```text
//! let mut messages = Messages::new();
//! line.check_bad_fortran_characters(&mut messages, &context, false)
//!     .check_bad_parentheses(&mut messages);
//! ```

mod diagnostic;
mod error_code;
mod messages;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use messages::{Messages, MessagesConfig};
