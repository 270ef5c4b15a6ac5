/*!
 * Headless karaoke player state.
 *
 * Holds what a presentation layer needs between clock updates: the loaded cue
 * sequence, the playback position, the media duration and the speed. The
 * audio itself lives elsewhere; this type only tracks where it is.
 */

use log::debug;

use crate::cue::KaraokeCue;
use crate::errors::VttError;
use crate::query::{find_active_cue, find_displayed_cue};
use crate::vtt::parse_strict_vtt;

/// Playback speeds the player offers
pub const SUPPORTED_RATES: [f32; 3] = [0.5, 0.75, 1.0];

/// Default distance of [`PlaybackState::skip_forward`] and [`PlaybackState::skip_back`]
pub const DEFAULT_JUMP_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    cues: Vec<KaraokeCue>,
    source_name: Option<String>,
    position_ms: u64,
    duration_ms: u64,
    rate: f32,
    jump_ms: u64,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            cues: Vec::new(),
            source_name: None,
            position_ms: 0,
            duration_ms: 0,
            rate: 1.0,
            jump_ms: DEFAULT_JUMP_MS,
        }
    }
}

impl PlaybackState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `text` and make it the current cue sequence
    ///
    /// On error the previously loaded cues and source name are kept.
    pub fn load_vtt(&mut self, name: &str, text: &str) -> Result<usize, VttError> {
        let cues = parse_strict_vtt(text)?;
        debug!("Loaded {} cues from {}", cues.len(), name);

        self.cues = cues;
        self.source_name = Some(name.to_string());
        Ok(self.cues.len())
    }

    /// Use an already parsed cue sequence
    pub fn load_cues(&mut self, name: &str, cues: Vec<KaraokeCue>) {
        self.cues = cues;
        self.source_name = Some(name.to_string());
    }

    pub fn cues(&self) -> &[KaraokeCue] {
        &self.cues
    }

    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    pub fn has_cues(&self) -> bool {
        !self.cues.is_empty()
    }

    pub fn position_ms(&self) -> u64 {
        self.position_ms
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn jump_ms(&self) -> u64 {
        self.jump_ms
    }

    /// Distance used by the skip methods
    pub fn set_jump_distance(&mut self, jump_ms: u64) {
        self.jump_ms = jump_ms;
    }

    /// Set the media duration, pulling the position back inside it
    pub fn set_duration(&mut self, duration_ms: u64) {
        self.duration_ms = duration_ms;
        self.position_ms = self.position_ms.min(duration_ms);
    }

    /// Record a position reported by the clock, unclamped
    pub fn update_position(&mut self, position_ms: u64) {
        self.position_ms = position_ms;
    }

    /// Move to `target_ms`, clamped to `[0, duration]`
    ///
    /// Does nothing while no cues are loaded.
    pub fn seek(&mut self, target_ms: i64) {
        if !self.has_cues() {
            return;
        }
        let duration = i64::try_from(self.duration_ms).unwrap_or(i64::MAX);
        let clamped = target_ms.clamp(0, duration);
        self.position_ms = u64::try_from(clamped).unwrap_or(0);
    }

    /// Seek relative to the current position
    pub fn jump(&mut self, offset_ms: i64) {
        let current = i64::try_from(self.position_ms).unwrap_or(i64::MAX);
        self.seek(current.saturating_add(offset_ms));
    }

    pub fn skip_forward(&mut self) {
        self.jump(i64::try_from(self.jump_ms).unwrap_or(i64::MAX));
    }

    pub fn skip_back(&mut self) {
        self.jump(i64::try_from(self.jump_ms).map_or(i64::MIN, |ms| -ms));
    }

    /// Change speed; returns false and keeps the old speed for unsupported values
    pub fn set_rate(&mut self, rate: f32) -> bool {
        if SUPPORTED_RATES.contains(&rate) {
            self.rate = rate;
            true
        } else {
            false
        }
    }

    pub fn active_cue(&self) -> Option<&KaraokeCue> {
        find_active_cue(&self.cues, self.position_ms)
    }

    pub fn displayed_cue(&self) -> Option<&KaraokeCue> {
        find_displayed_cue(&self.cues, self.position_ms)
    }

    /// Spoken and pending text to render at the current position
    pub fn karaoke_line(&self) -> (&str, &str) {
        self.displayed_cue()
            .map_or(("", ""), |cue| (cue.done_text.as_str(), cue.pending_text.as_str()))
    }

    /// Drop the cues and position and return to normal speed
    ///
    /// The skip distance is a setting and survives.
    pub fn reset(&mut self) {
        *self = Self {
            jump_ms: self.jump_ms,
            ..Self::default()
        };
    }
}
