/*!
 * Point-in-time lookups over a finished cue sequence.
 *
 * All lookups binary-search the start times, so they cost the same whether
 * the playback position moves forward or jumps backward. The sequence must
 * have non-decreasing starts, which `parse_strict_vtt` guarantees.
 */

use crate::cue::KaraokeCue;

/// Number of cues whose start is at or before `time_ms`
fn started_count(cues: &[KaraokeCue], time_ms: u64) -> usize {
    cues.partition_point(|cue| cue.start_ms <= time_ms)
}

/// Cue with the greatest start at or before `time_ms`, even if it has ended
///
/// With several cues sharing that start, the last of them is returned.
pub fn find_latest_started_cue(cues: &[KaraokeCue], time_ms: u64) -> Option<&KaraokeCue> {
    match started_count(cues, time_ms) {
        0 => None,
        count => cues.get(count - 1),
    }
}

/// Cue whose interval contains `time_ms`
///
/// Only the latest-started cue is tested. If it does not contain `time_ms`
/// the answer is `None`, even when an earlier cue with the same start would.
pub fn find_active_cue(cues: &[KaraokeCue], time_ms: u64) -> Option<&KaraokeCue> {
    find_latest_started_cue(cues, time_ms).filter(|cue| cue.contains(time_ms))
}

/// Cue to show at `time_ms`: the active one, or else the latest started
pub fn find_displayed_cue(cues: &[KaraokeCue], time_ms: u64) -> Option<&KaraokeCue> {
    find_active_cue(cues, time_ms).or_else(|| find_latest_started_cue(cues, time_ms))
}
