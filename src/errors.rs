//! Error types for loading corpora and ladder data, with error codes and helpful messages.
//!
//! # Error Codes
//!
//! - L001: `Io` (A corpus or ladder file could not be read)
//! - L002: `MalformedLadders` (Ladder JSON could not be decoded)
//! - L003: `InvalidPair` (Ladder pair key is not two words joined by '-')
//! - L004: `ShortChain` (Ladder chain has fewer than two words)
//!
//! Query-time errors live in [`crate::engine::LettersError`].
//!
//! # Examples
//!
//! ```
//! use letters::errors::LoadError;
//!
//! let err = LoadError::InvalidPair { pair: "came".to_string() };
//! assert_eq!(err.code(), "L003");
//! assert!(err.display_detailed().contains("L003"));
//! ```

use std::io;

/// Failure while ingesting corpus or ladder data.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("malformed ladder data in {origin}: {source}")]
    MalformedLadders {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid ladder pair \"{pair}\"")]
    InvalidPair { pair: String },

    #[error("ladder for \"{pair}\" has {len} word(s); at least 2 are needed")]
    ShortChain { pair: String, len: usize },
}

impl LoadError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            LoadError::Io { .. } => "L001",
            LoadError::MalformedLadders { .. } => "L002",
            LoadError::InvalidPair { .. } => "L003",
            LoadError::ShortChain { .. } => "L004",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            LoadError::Io { .. } => "A corpus or ladder file could not be read",
            LoadError::MalformedLadders { .. } => "Ladder JSON could not be decoded",
            LoadError::InvalidPair { .. } => "Ladder pair key is not two words joined by '-'",
            LoadError::ShortChain { .. } => "Ladder chain has fewer than two words",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            LoadError::Io { .. } => "The file named on the command line (or a file inside the ladder directory) does not exist or is not readable UTF-8 text.",
            LoadError::MalformedLadders { .. } => "Ladder files must be a JSON object mapping a pair such as \"came-will\" to a list of ladders. Each ladder is either an array of words or an object with a \"path\" array.",
            LoadError::InvalidPair { .. } => "Every key of a ladder file must be exactly two non-empty words separated by a single '-'.",
            LoadError::ShortChain { .. } => "A ladder connects two different words, so its chain needs at least the two endpoints.",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            LoadError::Io { .. } => Some("Check the path passed with --words, --frequencies or --ladders"),
            LoadError::MalformedLadders { .. } => Some("Expected format: {\"came-will\": [[\"came\", \"wame\", \"wale\", \"wall\", \"will\"]]}"),
            LoadError::InvalidPair { .. } => Some("Pair keys look like 'came-will'"),
            LoadError::ShortChain { .. } => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(base_msg: &str, code: &str, help: Option<&str>) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}
