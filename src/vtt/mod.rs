/*!
 * Strict karaoke VTT parsing.
 *
 * The pipeline runs in one direction:
 * - `extractor`: document text to raw cues, all validation happens here
 * - `repair`: raw cues to a monotonic timeline
 * - `highlight`: per-cue split into spoken and pending text
 * - `timestamp`: the `HH:MM:SS.mmm` codec used by the extractor
 */

pub mod extractor;
pub mod highlight;
pub mod repair;
pub mod timestamp;

use log::debug;

use crate::cue::KaraokeCue;
use crate::errors::VttError;

pub use extractor::{RawCue, extract_raw_cues};
pub use highlight::{CueText, split_cue_text, strip_markers};
pub use repair::repair_timeline;
pub use timestamp::{format_clock, format_timestamp, parse_timestamp};

/// Parse a karaoke VTT document into its finished cue sequence
///
/// Either the whole document is accepted or the first error found, in
/// document order, is returned. The result is never empty.
pub fn parse_strict_vtt(input: &str) -> Result<Vec<KaraokeCue>, VttError> {
    let raw_cues = extract_raw_cues(input)?;
    let repaired = repair_timeline(&raw_cues);

    let cues: Vec<KaraokeCue> = repaired
        .into_iter()
        .map(|cue| KaraokeCue::new(cue.start_ms, cue.end_ms, split_cue_text(&cue.raw_text)))
        .collect();

    debug!("Parsed {} karaoke cues", cues.len());
    Ok(cues)
}
