/*!
 * Tests for splitting cue text into spoken and pending parts
 */

use karaoke_vtt::vtt::{split_cue_text, strip_markers, CueText};

fn split(done: &str, pending: &str) -> CueText {
    CueText {
        full_text: format!("{done}{pending}"),
        done_text: done.to_string(),
        pending_text: pending.to_string(),
    }
}

#[test]
fn test_split_cue_text_withSingleMarker_shouldSplitAfterHighlight() {
    assert_eq!(
        split_cue_text("<b>To</b> celebrate, we're gonna record."),
        split("To", " celebrate, we're gonna record.")
    );
    assert_eq!(
        split_cue_text("To <b>cele</b>brate, we're gonna record."),
        split("To cele", "brate, we're gonna record.")
    );
}

#[test]
fn test_split_cue_text_withoutMarker_shouldTreatWholeCueAsSpoken() {
    assert_eq!(split_cue_text("No bold segment here"), split("No bold segment here", ""));
}

#[test]
fn test_split_cue_text_withTwoNonEmptyMarkers_shouldUseTheFirst() {
    assert_eq!(split_cue_text("<b>To</b> <b>cele</b>brate"), split("To", " celebrate"));
}

#[test]
fn test_split_cue_text_withOnlyEmptyMarkers_shouldUseFirstAsCursor() {
    assert_eq!(
        split_cue_text("Episode<b></b> <b></b>700 of the show."),
        split("Episode", " 700 of the show.")
    );
}

#[test]
fn test_split_cue_text_withEmptyMarkerBeforeHighlight_shouldPreferHighlight() {
    assert_eq!(split_cue_text("We<b></b> are <b>here</b> now"), split("We are here", " now"));
}

#[test]
fn test_split_cue_text_withHighlightAtEnd_shouldLeaveNothingPending() {
    assert_eq!(split_cue_text("all <b>done</b>"), split("all done", ""));
}

#[test]
fn test_split_cue_text_withMultibyteText_shouldSplitOnCharBoundaries() {
    assert_eq!(split_cue_text("café <b>crème</b> brûlée"), split("café crème", " brûlée"));
}

#[test]
fn test_split_cue_text_withAnyMarkers_shouldMatchStrippedText() {
    for raw in [
        "<b>To</b> <b>cele</b>brate",
        "a<b></b>b<b></b>c",
        "<b></b>",
        "x <b>y</b>",
        "plain",
    ] {
        let text = split_cue_text(raw);
        assert_eq!(text.full_text, strip_markers(raw), "full text of {raw:?}");
        assert_eq!(format!("{}{}", text.done_text, text.pending_text), text.full_text);
    }
}

#[test]
fn test_strip_markers_withOtherTags_shouldOnlyRemoveBold() {
    assert_eq!(strip_markers("<i>a</i> <b>b</b>"), "<i>a</i> b");
}
