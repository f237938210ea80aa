// Command-line configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;

use crate::pipeline::transport::SchedulerConfig;
use crate::shared::{DEFAULT_BPM, DEFAULT_STEPS, DEFAULT_VOLUME, MAX_BPM, MAX_STEPS, MIN_BPM, MIN_STEPS};

/// A terminal step-sequencer drum machine.
#[derive(Parser, Debug)]
#[command(name = "drumgrid", version, about)]
pub struct Args {
    /// Directory holding kick.wav, snare.wav, hihat.wav, crash.wav, tom.wav and clap.wav
    #[arg(short, long, default_value = "sounds")]
    pub sounds: PathBuf,

    /// Starting tempo in BPM
    #[arg(short, long, default_value_t = DEFAULT_BPM)]
    pub bpm: u32,

    /// Starting number of steps
    #[arg(long, default_value_t = DEFAULT_STEPS)]
    pub steps: usize,

    /// Master volume, 0.0 to 1.0
    #[arg(short, long, default_value_t = DEFAULT_VOLUME)]
    pub volume: f32,

    /// How often the scheduler wakes up, in milliseconds
    #[arg(long, default_value_t = 25)]
    pub lookahead_ms: u64,

    /// How far ahead of the audio clock each pass schedules, in seconds
    #[arg(long, default_value_t = 0.1)]
    pub schedule_ahead: f64,

    /// Log file (the terminal belongs to the UI)
    #[arg(long, default_value = "drumgrid.log")]
    pub log_file: PathBuf,

    /// off, error, warn, info, debug or trace
    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,
}

/// Validated settings; out-of-range values are clamped, not rejected.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub sounds_dir: PathBuf,
    pub bpm: u32,
    pub steps: usize,
    pub volume: f32,
    pub scheduler: SchedulerConfig,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sounds_dir: PathBuf::from("sounds"),
            bpm: DEFAULT_BPM,
            steps: DEFAULT_STEPS,
            volume: DEFAULT_VOLUME,
            scheduler: SchedulerConfig::default(),
            log_file: PathBuf::from("drumgrid.log"),
            log_level: LevelFilter::Info,
        }
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        let schedule_ahead = if args.schedule_ahead.is_finite() && args.schedule_ahead > 0.0 {
            args.schedule_ahead
        } else {
            SchedulerConfig::default().schedule_ahead
        };
        Self {
            sounds_dir: args.sounds,
            bpm: args.bpm.clamp(MIN_BPM, MAX_BPM),
            steps: args.steps.clamp(MIN_STEPS, MAX_STEPS),
            volume: if args.volume.is_nan() { DEFAULT_VOLUME } else { args.volume.clamp(0.0, 1.0) },
            scheduler: SchedulerConfig {
                lookahead: Duration::from_millis(args.lookahead_ms.max(1)),
                schedule_ahead,
            },
            log_file: args.log_file,
            log_level: args.log_level,
        }
    }
}

impl Config {
    pub fn from_args() -> Self {
        Args::parse().into()
    }
}
