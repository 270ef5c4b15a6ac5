/*!
 * Finished karaoke cue records.
 */

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::vtt::highlight::CueText;
use crate::vtt::timestamp::format_timestamp;

/// One timed cue with its spoken/pending split
///
/// Values are produced once by the parser and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KaraokeCue {
    /// Repaired start time in ms
    pub start_ms: u64,

    /// Repaired end time in ms, never before `start_ms`
    pub end_ms: u64,

    /// Cue text without highlight markers
    pub full_text: String,

    /// Spoken prefix of `full_text`
    pub done_text: String,

    /// Unspoken remainder, `done_text + pending_text == full_text`
    pub pending_text: String,
}

impl KaraokeCue {
    pub fn new(start_ms: u64, end_ms: u64, text: CueText) -> Self {
        Self {
            start_ms,
            end_ms,
            full_text: text.full_text,
            done_text: text.done_text,
            pending_text: text.pending_text,
        }
    }

    pub fn duration_ms(&self) -> u64 {
        self.end_ms.saturating_sub(self.start_ms)
    }

    /// Whether `time_ms` falls inside this cue
    ///
    /// The interval is half-open, except that a zero-length cue is active at
    /// exactly its start instant.
    pub fn contains(&self, time_ms: u64) -> bool {
        self.start_ms <= time_ms
            && (time_ms < self.end_ms || (self.end_ms == self.start_ms && time_ms == self.start_ms))
    }

    pub fn format_start_time(&self) -> String {
        format_timestamp(self.start_ms)
    }

    pub fn format_end_time(&self) -> String {
        format_timestamp(self.end_ms)
    }
}

impl fmt::Display for KaraokeCue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} --> {} [{}|{}]",
            self.format_start_time(),
            self.format_end_time(),
            self.done_text,
            self.pending_text
        )
    }
}
