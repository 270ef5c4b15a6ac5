/*!
 * Highlight splitting.
 *
 * A cue's text carries `<b>…</b>` markers around the word being spoken. The
 * splitter picks one marker as the cursor and cuts the plain text into the
 * part already spoken and the part still to come.
 *
 * Marker selection:
 * - no marker: the whole cue counts as spoken;
 * - otherwise the first marker with non-empty inner text;
 * - when every marker is empty, the first marker, which then marks a
 *   position between characters rather than a word.
 */

use once_cell::sync::Lazy;
use regex::Regex;

static MARKER_SPAN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<b>(.*?)</b>").unwrap());

static MARKER_TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?b>").unwrap());

/// The three text views of one cue
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CueText {
    /// Text with every marker tag removed
    pub full_text: String,

    /// Prefix of `full_text` up to and including the cursor marker's text
    pub done_text: String,

    /// Remainder of `full_text` after the cursor marker
    pub pending_text: String,
}

/// One `<b>…</b>` span found in a cue's text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MarkerSpan<'a> {
    /// Byte offset of the opening tag
    start: usize,
    /// Byte offset just past the closing tag
    end: usize,
    inner: &'a str,
}

/// Remove every `<b>` and `</b>` tag, keeping the text between them
pub fn strip_markers(text: &str) -> String {
    MARKER_TAG_REGEX.replace_all(text, "").into_owned()
}

fn marker_spans(text: &str) -> Vec<MarkerSpan<'_>> {
    MARKER_SPAN_REGEX
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let inner = caps.get(1)?;
            Some(MarkerSpan {
                start: whole.start(),
                end: whole.end(),
                inner: inner.as_str(),
            })
        })
        .collect()
}

fn select_cursor<'s, 'a>(spans: &'s [MarkerSpan<'a>]) -> Option<&'s MarkerSpan<'a>> {
    spans
        .iter()
        .find(|span| !span.inner.is_empty())
        .or_else(|| spans.first())
}

/// Split a cue's raw text into full, spoken and pending text
pub fn split_cue_text(raw_text: &str) -> CueText {
    let spans = marker_spans(raw_text);

    let Some(cursor) = select_cursor(&spans) else {
        let plain = strip_markers(raw_text);
        return CueText {
            full_text: plain.clone(),
            done_text: plain,
            pending_text: String::new(),
        };
    };

    let before = strip_markers(&raw_text[..cursor.start]);
    let highlighted = strip_markers(cursor.inner);
    let after = strip_markers(&raw_text[cursor.end..]);

    let done_text = format!("{before}{highlighted}");
    let full_text = format!("{done_text}{after}");

    CueText {
        full_text,
        done_text,
        pending_text: after,
    }
}
