/*!
 * Tests for playback clocks
 */

use std::time::Duration;

use karaoke_vtt::clock::{drive, PlaybackClock, ScriptedClock, TokioClock};
use karaoke_vtt::playback::PlaybackState;

use crate::common::VALID_VTT;

#[test]
fn test_scripted_clock_withPositions_shouldReplayThenStop() {
    let mut clock = ScriptedClock::new([10, 5, 20]);
    let positions = tokio_test::block_on(async {
        let mut seen = Vec::new();
        while let Some(position) = clock.next_position().await {
            seen.push(position);
        }
        seen
    });
    assert_eq!(positions, vec![10, 5, 20]);
}

#[test]
fn test_drive_withForwardAndBackwardSweep_shouldRenderDisplayedCues() {
    let mut state = PlaybackState::new();
    state.load_vtt("song.vtt", VALID_VTT).unwrap();

    let mut clock = ScriptedClock::new([38_700, 38_850, 40_000, 38_650, 100]);
    let mut frames = Vec::new();
    let updates = tokio_test::block_on(drive(&mut clock, &mut state, |state| {
        let (done, _) = state.karaoke_line();
        frames.push(done.to_string());
    }));

    assert_eq!(updates, 5);
    assert_eq!(frames, vec!["To", "To cele", "To cele", "To", ""]);
    assert_eq!(state.position_ms(), 100);
}

#[test]
fn test_tokio_clock_withShortDuration_shouldEndAtDuration() {
    let mut clock = TokioClock::new(Duration::from_millis(2), 1.0, 20);
    let positions = tokio_test::block_on(async {
        let mut seen = Vec::new();
        while let Some(position) = clock.next_position().await {
            seen.push(position);
        }
        seen
    });

    assert!(!positions.is_empty());
    assert_eq!(positions.last().copied(), Some(20));
    assert!(positions.windows(2).all(|pair| pair[0] <= pair[1]));
    assert!(positions.iter().all(|&p| p <= 20));
}

#[test]
fn test_tokio_clock_afterEnd_shouldStayStopped() {
    let mut clock = TokioClock::new(Duration::from_millis(1), 1.0, 0);
    tokio_test::block_on(async {
        assert_eq!(clock.next_position().await, Some(0));
        assert_eq!(clock.next_position().await, None);
        assert_eq!(clock.next_position().await, None);
    });
}
