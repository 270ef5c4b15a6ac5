use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app_config::Config;
use crate::clock::{self, PlaybackClock, TokioClock};
use crate::cue::KaraokeCue;
use crate::errors::AppError;
use crate::file_utils::{FileManager, FileType, VTT_EXTENSION};
use crate::playback::PlaybackState;
use crate::query::find_displayed_cue;
use crate::vtt::{format_clock, format_timestamp, parse_strict_vtt, parse_timestamp};

// @module: Application controller for karaoke subtitle files

const ANSI_DONE: &str = "\x1B[1;37m";
const ANSI_PENDING: &str = "\x1B[2m";
const ANSI_RESET: &str = "\x1B[0m";

/// Summary of one successfully parsed file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub path: PathBuf,
    pub cue_count: usize,
    pub first_start_ms: u64,
    pub last_end_ms: u64,
}

/// Outcome of checking every subtitle file under a directory
#[derive(Debug, Default)]
pub struct FolderReport {
    pub passed: Vec<CheckReport>,
    /// Files that failed, with the error shown to the user
    pub failed: Vec<(PathBuf, String)>,
}

/// Main application controller
pub struct Controller {
    /// App configuration, validated on construction
    config: Config,
}

impl Controller {
    /// Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        config
            .validate()
            .map_err(|e| AppError::Config(format!("{:#}", e)))?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Empty player state with the configured speed and skip distance
    pub fn new_playback_state(&self) -> PlaybackState {
        let mut state = PlaybackState::new();
        state.set_rate(self.config.playback.rate);
        state.set_jump_distance(self.config.playback.jump_ms);
        state
    }

    /// Read and parse a karaoke subtitle file
    pub fn load_cues<P: AsRef<Path>>(&self, path: P) -> Result<Vec<KaraokeCue>, AppError> {
        let content = FileManager::read_subtitle_payload(path.as_ref())
            .map_err(|e| AppError::File(format!("{:#}", e)))?;
        Ok(parse_strict_vtt(&content)?)
    }

    /// Parse one file and summarize it
    ///
    /// Files that neither carry the `.vtt` extension nor start with the
    /// header are refused before parsing.
    pub fn check<P: AsRef<Path>>(&self, path: P) -> Result<CheckReport> {
        let path = path.as_ref();
        if !FileManager::file_exists(path) {
            return Err(anyhow!("Input file does not exist: {:?}", path));
        }
        if FileManager::detect_file_type(path)? == FileType::Unknown {
            return Err(anyhow!("Not a WebVTT subtitle file: {:?}", path));
        }

        let cues = self
            .load_cues(path)
            .with_context(|| format!("Failed to load {}", path.display()))?;

        let first_start_ms = cues.first().map_or(0, |cue| cue.start_ms);
        let last_end_ms = cues.iter().map(|cue| cue.end_ms).max().unwrap_or(0);

        debug!(
            "{}: {} cues spanning {} to {}",
            path.display(),
            cues.len(),
            format_timestamp(first_start_ms),
            format_timestamp(last_end_ms)
        );

        Ok(CheckReport {
            path: path.to_path_buf(),
            cue_count: cues.len(),
            first_start_ms,
            last_end_ms,
        })
    }

    /// Check every `.vtt` file under `dir`; a failing file does not stop the run
    pub fn check_folder<P: AsRef<Path>>(&self, dir: P) -> Result<FolderReport> {
        let dir = dir.as_ref();
        if !FileManager::dir_exists(dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", dir));
        }

        let files = FileManager::find_files(dir, VTT_EXTENSION)?;
        info!("Checking {} subtitle file(s) in {:?}", files.len(), dir);

        let folder_pb = ProgressBar::new(files.len() as u64);
        folder_pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
                .map_err(|e| anyhow!("Invalid progress bar template: {}", e))?
                .progress_chars("█▓▒░"),
        );

        let mut report = FolderReport::default();
        for file in files {
            folder_pb.set_message(file.display().to_string());
            match self.check(&file) {
                Ok(file_report) => report.passed.push(file_report),
                Err(e) => {
                    warn!("Skipping {:?}: {:#}", file, e);
                    report.failed.push((file, format!("{:#}", e)));
                }
            }
            folder_pb.inc(1);
        }
        folder_pb.finish_and_clear();

        Ok(report)
    }

    /// Cue that would be displayed at `time_ms`
    pub fn query<P: AsRef<Path>>(&self, path: P, time_ms: u64) -> Result<Option<KaraokeCue>> {
        let path = path.as_ref();
        let cues = self
            .load_cues(path)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        Ok(find_displayed_cue(&cues, time_ms).cloned())
    }

    /// Write the parsed cue list as JSON
    ///
    /// Returns `None` when the output exists and `force_overwrite` is not set.
    pub fn export_json<P: AsRef<Path>>(
        &self,
        path: P,
        output: Option<PathBuf>,
        force_overwrite: bool,
    ) -> Result<Option<PathBuf>> {
        let path = path.as_ref();
        let output_path = output.unwrap_or_else(|| {
            let dir = path.parent().unwrap_or(Path::new("."));
            FileManager::generate_output_path(path, dir, "cues", "json")
        });

        if output_path.exists() && !force_overwrite {
            warn!("Output file already exists: {:?}. Use -f to force overwrite.", output_path);
            return Ok(None);
        }

        let cues = self
            .load_cues(path)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        let json = serde_json::to_string_pretty(&cues).context("Failed to serialize cues to JSON")?;
        FileManager::write_to_file(&output_path, &json)?;

        info!("Exported {} cues to {:?}", cues.len(), output_path);
        Ok(Some(output_path))
    }

    /// Play a file against the real-time clock, rendering into a progress bar
    pub async fn play<P: AsRef<Path>>(
        &self,
        path: P,
        rate: Option<f32>,
        duration_ms: Option<u64>,
    ) -> Result<()> {
        let path = path.as_ref();
        let mut state = self.new_playback_state();
        let name = path.display().to_string();
        let content = FileManager::read_subtitle_payload(path)?;
        state
            .load_vtt(&name, &content)
            .with_context(|| format!("Subtitle format error in {}", name))?;

        let rate = rate.unwrap_or(self.config.playback.rate);
        if !state.set_rate(rate) {
            return Err(anyhow!("Unsupported playback rate: {}", rate));
        }

        let end_ms = state.cues().iter().map(|cue| cue.end_ms).max().unwrap_or(0);
        state.set_duration(duration_ms.unwrap_or(end_ms));

        let mut clock = TokioClock::new(
            Duration::from_millis(self.config.playback.tick_ms),
            state.rate(),
            state.duration_ms(),
        );

        let play_pb = ProgressBar::new(state.duration_ms());
        play_pb.set_style(
            ProgressStyle::default_bar()
                .template("{prefix} [{bar:30.cyan/blue}] {msg}")
                .map_err(|e| anyhow!("Invalid progress bar template: {}", e))?
                .progress_chars("█▓▒░"),
        );

        info!("Playing {} at {}x", name, state.rate());
        self.play_with_clock(&mut clock, &mut state, |state, line| {
            play_pb.set_position(state.position_ms());
            play_pb.set_prefix(format!(
                "{} / {}",
                format_clock(state.position_ms()),
                format_clock(state.duration_ms())
            ));
            play_pb.set_message(line.to_string());
        })
        .await;
        play_pb.finish();

        Ok(())
    }

    /// Drive `state` from any clock, handing each rendered line to `on_frame`
    pub async fn play_with_clock<C, F>(
        &self,
        clock: &mut C,
        state: &mut PlaybackState,
        mut on_frame: F,
    ) -> usize
    where
        C: PlaybackClock + ?Sized,
        F: FnMut(&PlaybackState, &str),
    {
        clock::drive(clock, state, |state| {
            let line = self.render_line(state);
            on_frame(state, &line);
        })
        .await
    }

    /// Render the karaoke line for the state's current position
    pub fn render_line(&self, state: &PlaybackState) -> String {
        let Some(cue) = state.displayed_cue() else {
            return String::new();
        };

        let mut line = String::new();
        if self.config.display.show_timestamps {
            line.push_str(&format!("[{} --> {}] ", cue.format_start_time(), cue.format_end_time()));
        }

        if self.config.display.color {
            line.push_str(&format!(
                "{}{}{}{}{}{}",
                ANSI_DONE, cue.done_text, ANSI_RESET, ANSI_PENDING, cue.pending_text, ANSI_RESET
            ));
        } else {
            line.push_str(&cue.done_text);
            line.push('|');
            line.push_str(&cue.pending_text);
        }

        line
    }
}

/// Parse a time argument given either as `HH:MM:SS.mmm` or as plain milliseconds
pub fn parse_time_arg(value: &str) -> Result<u64> {
    let value = value.trim();
    if let Ok(ms) = value.parse::<u64>() {
        return Ok(ms);
    }
    parse_timestamp(value).map_err(|e| anyhow!("{} (expected HH:MM:SS.mmm or milliseconds)", e))
}
