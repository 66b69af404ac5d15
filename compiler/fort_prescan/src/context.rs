//! Scanner policy consulted by comment clipping and character checks.
//!
//! The token buffer knows where a `!` is, but not whether it starts a
//! comment or an active compiler directive such as `!$omp` or `!dir$`. That
//! is a property of the compilation (which directive families are enabled),
//! so it is asked of a [`ScannerContext`].

use rustc_hash::FxHashSet;

/// Scanner-defined policy the token buffer defers to.
pub trait ScannerContext {
    /// Check if `text`, which begins immediately after a `!`, starts an
    /// active compiler directive sentinel.
    fn is_compiler_directive_sentinel(&self, text: &[u8]) -> bool;
}

/// Context with no directive sentinels: every `!` starts a comment.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct NoDirectives;

impl ScannerContext for NoDirectives {
    fn is_compiler_directive_sentinel(&self, _text: &[u8]) -> bool {
        false
    }
}

/// Sentinels recognized by [`DirectiveSentinels::default`].
const DEFAULT_SENTINELS: &[&str] = &["dir$", "dec$", "$omp", "$acc", "$cuf", "$"];

/// Sentinels are at most this many bytes long.
const MAX_SENTINEL_LEN: usize = 5;

/// Configurable set of compiler directive sentinels.
///
/// The text after the `!` starts a directive when one of its first
/// `MAX_SENTINEL_LEN` bytes' prefixes is an enabled sentinel, so `!dir$ivdep`
/// and `!$omp&` are directives. Matching ignores ASCII case.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DirectiveSentinels {
    sentinels: FxHashSet<Box<[u8]>>,
}

impl DirectiveSentinels {
    /// Create a set holding exactly `sentinels`.
    pub fn new<I, S>(sentinels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = DirectiveSentinels {
            sentinels: FxHashSet::default(),
        };
        for sentinel in sentinels {
            set.insert(sentinel.as_ref());
        }
        set
    }

    /// Enable another sentinel. Sentinels longer than five bytes never
    /// match.
    pub fn insert(&mut self, sentinel: &str) {
        self.sentinels
            .insert(sentinel.to_ascii_lowercase().into_bytes().into_boxed_slice());
    }

    /// Disable a sentinel. Returns `true` if it was enabled.
    pub fn remove(&mut self, sentinel: &str) -> bool {
        self.sentinels
            .remove(sentinel.to_ascii_lowercase().as_bytes())
    }

    /// Number of enabled sentinels.
    pub fn len(&self) -> usize {
        self.sentinels.len()
    }

    /// Check if no sentinel is enabled.
    pub fn is_empty(&self) -> bool {
        self.sentinels.is_empty()
    }
}

impl Default for DirectiveSentinels {
    fn default() -> Self {
        Self::new(DEFAULT_SENTINELS.iter().copied())
    }
}

impl ScannerContext for DirectiveSentinels {
    fn is_compiler_directive_sentinel(&self, text: &[u8]) -> bool {
        let longest = text.len().min(MAX_SENTINEL_LEN);
        let head = text[..longest].to_ascii_lowercase();
        (1..=longest)
            .rev()
            .any(|len| self.sentinels.contains(&head[..len]))
    }
}
