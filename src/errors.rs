/*!
 * Error types for the karaoke-vtt crate.
 *
 * `VttError` covers every way a strict karaoke VTT document can be rejected.
 * Parsing aborts on the first offending block, so a caller only ever sees one
 * of these. `AppError` wraps the parser error together with the file and
 * configuration failures of the command-line host.
 */

use thiserror::Error;

/// Reasons a document is rejected by the strict parser
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VttError {
    /// The document does not start with the `WEBVTT` header
    #[error("Invalid VTT file: missing WEBVTT header.")]
    MissingHeader,

    /// Nothing follows the header line
    #[error("Invalid VTT file: no cues found.")]
    NoCues,

    /// The body held no block that produced a cue
    #[error("Invalid VTT file: no valid cues found.")]
    NoValidCues,

    /// A block's timing line is not `<timestamp> --> <timestamp>`
    #[error("Invalid cue timing line: \"{line}\"")]
    MalformedTimingLine {
        /// The offending line as it appeared in the block
        line: String,
    },

    /// A timestamp token is not `HH:MM:SS.mmm`
    #[error("Invalid timestamp: {value}")]
    MalformedTimestamp {
        /// The offending token
        value: String,
    },

    /// A cue ends before it starts
    #[error(
        "Invalid cue time range: end must be greater than or equal to start ({start_ms}ms > {end_ms}ms)."
    )]
    InvalidTimeRange {
        /// Decoded start time
        start_ms: u64,
        /// Decoded end time
        end_ms: u64,
    },

    /// A cue has a timing line but no text
    #[error("Invalid cue: empty text (block {block}).")]
    EmptyCueText {
        /// 1-based index of the block in the document body
        block: usize,
    },
}

/// Fieldless mirror of [`VttError`] for matching without caring about payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VttErrorKind {
    MissingHeader,
    NoCues,
    NoValidCues,
    MalformedTimingLine,
    MalformedTimestamp,
    InvalidTimeRange,
    EmptyCueText,
}

impl VttError {
    /// Returns the kind of this error
    pub fn kind(&self) -> VttErrorKind {
        match self {
            Self::MissingHeader => VttErrorKind::MissingHeader,
            Self::NoCues => VttErrorKind::NoCues,
            Self::NoValidCues => VttErrorKind::NoValidCues,
            Self::MalformedTimingLine { .. } => VttErrorKind::MalformedTimingLine,
            Self::MalformedTimestamp { .. } => VttErrorKind::MalformedTimestamp,
            Self::InvalidTimeRange { .. } => VttErrorKind::InvalidTimeRange,
            Self::EmptyCueText { .. } => VttErrorKind::EmptyCueText,
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from loading or validating the configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the subtitle parser
    #[error("Subtitle format error: {0}")]
    Vtt(#[from] VttError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        match error.downcast::<VttError>() {
            Ok(vtt_error) => Self::Vtt(vtt_error),
            Err(error) => Self::Unknown(error.to_string()),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
