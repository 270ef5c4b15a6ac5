/*!
 * Tests for block extraction and structural validation
 */

use karaoke_vtt::errors::{VttError, VttErrorKind};
use karaoke_vtt::vtt::extractor::{extract_raw_cues, parse_timing_line, RawCue};

use crate::common::VALID_VTT;

#[test]
fn test_extract_raw_cues_withLabels_shouldSkipLabelsAndKeepMarkers() {
    let cues = extract_raw_cues(VALID_VTT).unwrap();
    assert_eq!(
        cues,
        vec![
            RawCue::new(38_640, 38_800, "<b>To</b> celebrate, we're gonna record."),
            RawCue::new(38_800, 39_000, "To <b>cele</b>brate, we're gonna record."),
        ]
    );
}

#[test]
fn test_extract_raw_cues_withMultipleTextLines_shouldJoinWithSingleSpaces() {
    let input = "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\n  first line  \nsecond <b>line</b>\n";
    let cues = extract_raw_cues(input).unwrap();
    assert_eq!(cues[0].raw_text, "first line second <b>line</b>");
}

#[test]
fn test_extract_raw_cues_withCrlfAndHeaderText_shouldParse() {
    let input = "WEBVTT - karaoke\r\n\r\n00:00:01.000 --> 00:00:02.000\r\n<b>Hi</b>\r\n";
    let cues = extract_raw_cues(input).unwrap();
    assert_eq!(cues, vec![RawCue::new(1_000, 2_000, "<b>Hi</b>")]);
}

#[test]
fn test_extract_raw_cues_withOutOfOrderBlocks_shouldKeepSourceOrder() {
    let input = "WEBVTT\n\n00:00:03.000 --> 00:00:04.000\nA\n\n00:00:02.000 --> 00:00:03.000\nB\n";
    let cues = extract_raw_cues(input).unwrap();
    assert_eq!(cues[0].start_ms, 3_000);
    assert_eq!(cues[1].start_ms, 2_000);
}

#[test]
fn test_extract_raw_cues_withManyBlankLines_shouldSplitOnce() {
    let input = "WEBVTT\n\n\n\n00:00:01.000 --> 00:00:02.000\nA\n\n\n\n00:00:02.000 --> 00:00:03.000\nB";
    assert_eq!(extract_raw_cues(input).unwrap().len(), 2);
}

#[test]
fn test_extract_raw_cues_withoutHeader_shouldFailMissingHeader() {
    let input = "00:00:01.000 --> 00:00:02.000\nHello";
    assert_eq!(extract_raw_cues(input), Err(VttError::MissingHeader));
}

#[test]
fn test_extract_raw_cues_withLeadingWhitespaceBeforeHeader_shouldAccept() {
    let input = "\n\n  WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nHello";
    assert!(extract_raw_cues(input).is_ok());
}

#[test]
fn test_extract_raw_cues_withHeaderOnly_shouldFailNoCues() {
    assert_eq!(extract_raw_cues("WEBVTT\n\n   \n"), Err(VttError::NoCues));
    assert_eq!(extract_raw_cues("WEBVTT"), Err(VttError::NoCues));
}

#[test]
fn test_extract_raw_cues_withBadTimingLine_shouldNameTheLine() {
    let input = "WEBVTT\n\n1\n00:00:01 --> 00:00:02\nHello";
    let err = extract_raw_cues(input).unwrap_err();
    assert_eq!(
        err,
        VttError::MalformedTimingLine { line: "00:00:01 --> 00:00:02".to_string() }
    );
    assert!(err.to_string().contains("00:00:01 --> 00:00:02"));
}

#[test]
fn test_extract_raw_cues_withEndBeforeStart_shouldFailInvalidTimeRange() {
    let input = "WEBVTT\n\n00:00:02.000 --> 00:00:01.000\n<b>To</b> celebrate\n";
    let err = extract_raw_cues(input).unwrap_err();
    assert_eq!(err.kind(), VttErrorKind::InvalidTimeRange);
    assert!(err.to_string().to_lowercase().contains("time range"));
}

#[test]
fn test_extract_raw_cues_withZeroDuration_shouldAccept() {
    let input = "WEBVTT\n\n00:00:00.240 --> 00:00:00.240\nWe'<b>re</b>\n";
    assert_eq!(extract_raw_cues(input).unwrap()[0].end_ms, 240);
}

#[test]
fn test_extract_raw_cues_withTimingLineOnly_shouldFailEmptyCueText() {
    let input = "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nHi\n\n2\n00:00:02.000 --> 00:00:03.000\n";
    assert_eq!(extract_raw_cues(input), Err(VttError::EmptyCueText { block: 2 }));
}

#[test]
fn test_extract_raw_cues_withSeveralBadBlocks_shouldReportFirstInDocumentOrder() {
    let input = "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\n\n\nnot a timing\nline\ntext\n\n00:00:05.000 --> 00:00:04.000\nX\n";
    let err = extract_raw_cues(input).unwrap_err();
    // Block 1 has no text, block 2 has no timing line, block 3 ends before it starts
    assert_eq!(err.kind(), VttErrorKind::EmptyCueText);
}

#[test]
fn test_parse_timing_line_withSettings_shouldIgnoreSettings() {
    assert_eq!(
        parse_timing_line("00:00:01.000 --> 00:00:02.000 line:0 align:middle").unwrap(),
        (1_000, 2_000)
    );
}

#[test]
fn test_parse_timing_line_withMissingArrow_shouldFail() {
    let err = parse_timing_line("00:00:01.000 00:00:02.000").unwrap_err();
    assert_eq!(err.kind(), VttErrorKind::MalformedTimingLine);
}

#[test]
fn test_parse_strict_vtt_withLeadingByteOrderMark_shouldAcceptDocument() {
    let cues = karaoke_vtt::parse_strict_vtt("\u{feff}WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nhi").unwrap();
    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].full_text, "hi");
    assert_eq!((cues[0].start_ms, cues[0].end_ms), (1_000, 2_000));
}
