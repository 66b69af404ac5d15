//! Error codes for prescanner diagnostics.

use std::fmt;

/// Error codes for prescanner diagnostics.
///
/// Format: E0### for errors found while prescanning a line.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Character outside the Fortran source character set
    E0001,
    /// `(` without a matching `)`
    E0002,
    /// `)` without a preceding `(`
    E0003,
}

impl ErrorCode {
    /// Every error code, in numeric order.
    pub const ALL: &[ErrorCode] = &[ErrorCode::E0001, ErrorCode::E0002, ErrorCode::E0003];

    /// The code as it appears in rendered diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
        }
    }

    /// One-line description of what the code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "bad character in Fortran token",
            ErrorCode::E0002 => "unmatched '('",
            ErrorCode::E0003 => "unmatched ')'",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E0001"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}
