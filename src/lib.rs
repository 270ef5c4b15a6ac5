/*!
 * # karaoke-vtt - strict WebVTT karaoke cues
 *
 * A Rust library for word-by-word karaoke highlighting driven by WebVTT
 * subtitles in which every cue marks the word being spoken with `<b>…</b>`.
 *
 * ## Features
 *
 * - Strict parsing of `WEBVTT` documents with `HH:MM:SS.mmm` timestamps
 * - Repair of out-of-order and overlapping cue timings into a monotonic timeline
 * - Splitting of each cue into spoken and pending text
 * - Logarithmic "which cue is active at T" lookups, forward or backward
 * - A headless player state and clocks for driving playback
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `vtt`: Parsing pipeline:
 *   - `vtt::timestamp`: Timestamp codec
 *   - `vtt::extractor`: Block extraction and validation
 *   - `vtt::repair`: Timeline repair
 *   - `vtt::highlight`: Spoken/pending text split
 * - `cue`: The finished `KaraokeCue` record
 * - `query`: Active, latest-started and displayed cue lookups
 * - `playback`: Player state (position, duration, speed)
 * - `clock`: Position sources for playback
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod clock;
pub mod cue;
pub mod errors;
pub mod file_utils;
pub mod playback;
pub mod query;
pub mod vtt;

// Re-export main types for easier usage
pub use app_config::Config;
pub use cue::KaraokeCue;
pub use errors::{AppError, VttError, VttErrorKind};
pub use playback::PlaybackState;
pub use query::{find_active_cue, find_displayed_cue, find_latest_started_cue};
pub use vtt::parse_strict_vtt;
