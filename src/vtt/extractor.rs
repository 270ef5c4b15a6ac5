/*!
 * Block extraction for strict karaoke VTT documents.
 *
 * Turns the document text into an ordered list of [`RawCue`] values. Every
 * structural check happens here, so the later stages can treat their input
 * as valid.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::VttError;
use crate::vtt::timestamp::parse_timestamp;

/// Required leading token of every document
pub const HEADER: &str = "WEBVTT";

/// Separator between the two timestamps of a timing line
pub const TIMING_ARROW: &str = "-->";

/// UTF-8 byte order mark, trimmed like whitespace around a document
pub const UTF8_BOM: char = '\u{feff}';

static TIMING_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{2}:[0-9]{2}:[0-9]{2}\.[0-9]{3})\s*-->\s*([0-9]{2}:[0-9]{2}:[0-9]{2}\.[0-9]{3})(?:\s+.*)?$")
        .unwrap()
});

static HEADER_LINE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^WEBVTT[^\n]*\n?").unwrap());

static BLOCK_SEPARATOR_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").unwrap());

/// A cue as written in the document, before timeline repair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCue {
    /// Start time in ms
    pub start_ms: u64,

    /// End time in ms, never before `start_ms`
    pub end_ms: u64,

    /// Text lines joined by single spaces, highlight markers still present
    pub raw_text: String,
}

impl RawCue {
    pub fn new(start_ms: u64, end_ms: u64, raw_text: impl Into<String>) -> Self {
        Self {
            start_ms,
            end_ms,
            raw_text: raw_text.into(),
        }
    }
}

/// Replace `\r\n` and lone `\r` with `\n` and trim the result
///
/// Byte order marks at either end are trimmed along with the whitespace.
pub fn normalize_source(input: &str) -> String {
    input
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .trim_matches(|c: char| c.is_whitespace() || c == UTF8_BOM)
        .to_string()
}

/// Split a document into raw cues in source order
///
/// The input may use any line ending style; it is normalized first.
pub fn extract_raw_cues(input: &str) -> Result<Vec<RawCue>, VttError> {
    let source = normalize_source(input);
    if !source.starts_with(HEADER) {
        return Err(VttError::MissingHeader);
    }

    let body = HEADER_LINE_REGEX.replace(&source, "");
    let body = body.trim();
    if body.is_empty() {
        return Err(VttError::NoCues);
    }

    let blocks: Vec<&str> = BLOCK_SEPARATOR_REGEX
        .split(body)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect();

    let mut raw_cues = Vec::with_capacity(blocks.len());
    for (idx, block) in blocks.iter().enumerate() {
        raw_cues.push(extract_block(block, idx + 1)?);
    }

    if raw_cues.is_empty() {
        return Err(VttError::NoValidCues);
    }

    debug!("Extracted {} raw cues from {} blocks", raw_cues.len(), blocks.len());
    Ok(raw_cues)
}

/// Parse one block; `block_number` is 1-based and only used for error reporting
fn extract_block(block: &str, block_number: usize) -> Result<RawCue, VttError> {
    let lines: Vec<&str> = block
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    // A leading line without the arrow is a cue label and is skipped.
    let (timing_line, text_lines) = match lines.split_first() {
        Some((first, rest)) if first.contains(TIMING_ARROW) => (*first, rest),
        Some((_, rest)) => match rest.split_first() {
            Some((second, text)) => (*second, text),
            None => ("", &[][..]),
        },
        None => ("", &[][..]),
    };

    let (start_ms, end_ms) = parse_timing_line(timing_line)?;
    if end_ms < start_ms {
        return Err(VttError::InvalidTimeRange { start_ms, end_ms });
    }

    let raw_text = text_lines.join(" ");
    let raw_text = raw_text.trim();
    if raw_text.is_empty() {
        return Err(VttError::EmptyCueText { block: block_number });
    }

    Ok(RawCue::new(start_ms, end_ms, raw_text))
}

/// Decode `<start> --> <end>[ settings]` into a millisecond pair
pub fn parse_timing_line(line: &str) -> Result<(u64, u64), VttError> {
    let caps = TIMING_LINE_REGEX
        .captures(line)
        .ok_or_else(|| VttError::MalformedTimingLine {
            line: line.to_string(),
        })?;

    let start = caps.get(1).map_or("", |m| m.as_str());
    let end = caps.get(2).map_or("", |m| m.as_str());

    Ok((parse_timestamp(start)?, parse_timestamp(end)?))
}
