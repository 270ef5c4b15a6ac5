/*!
 * Timeline repair.
 *
 * Makes the start times of a raw cue list non-decreasing and closes the
 * overlaps between neighbours without reordering or dropping any cue.
 */

use log::debug;

use crate::vtt::extractor::RawCue;

/// Repair a raw cue list into a monotonic timeline
///
/// Starts are clamped up to the repaired start of the previous cue. Each end
/// is then clamped down to the next cue's start, stretched up to that start
/// when the cue would otherwise be empty, and finally floored at its own
/// start. The output always has the same length as the input.
pub fn repair_timeline(raw_cues: &[RawCue]) -> Vec<RawCue> {
    let starts = repair_starts(raw_cues);

    raw_cues
        .iter()
        .zip(&starts)
        .enumerate()
        .map(|(idx, (cue, &start_ms))| {
            let next_start = starts.get(idx + 1).copied();
            let end_ms = repair_end(start_ms, cue.end_ms, next_start);
            if end_ms != cue.end_ms {
                debug!("Cue {} end moved from {}ms to {}ms", idx + 1, cue.end_ms, end_ms);
            }
            RawCue {
                start_ms,
                end_ms,
                raw_text: cue.raw_text.clone(),
            }
        })
        .collect()
}

fn repair_starts(raw_cues: &[RawCue]) -> Vec<u64> {
    let mut starts: Vec<u64> = Vec::with_capacity(raw_cues.len());
    for (idx, cue) in raw_cues.iter().enumerate() {
        let start_ms = match starts.last() {
            Some(&previous) if cue.start_ms < previous => {
                debug!("Cue {} start clamped from {}ms to {}ms", idx + 1, cue.start_ms, previous);
                previous
            }
            _ => cue.start_ms,
        };
        starts.push(start_ms);
    }
    starts
}

fn repair_end(start_ms: u64, end_ms: u64, next_start: Option<u64>) -> u64 {
    let mut end_ms = end_ms;

    if let Some(next_start) = next_start {
        if next_start >= start_ms {
            end_ms = end_ms.min(next_start);
        }
        if end_ms <= start_ms && next_start > start_ms {
            end_ms = next_start;
        }
    }

    end_ms.max(start_ms)
}
