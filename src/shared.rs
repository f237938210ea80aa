// Types shared between the controller (middle.rs) and the TUI.
//
// The TUI never touches the pattern or the transport directly. Each frame it
// asks the controller for a `DisplayState` and renders that, and it turns key
// presses into semantic `InputEvent`s the controller applies.

use std::fmt;

pub const NUM_SOUNDS: usize = 6;

pub const MIN_STEPS: usize = 4;
pub const MAX_STEPS: usize = 32;
pub const DEFAULT_STEPS: usize = 16;

pub const MIN_BPM: u32 = 40;
pub const MAX_BPM: u32 = 240;
pub const DEFAULT_BPM: u32 = 120;

pub const DEFAULT_VOLUME: f32 = 0.8;

// the fixed drum kit, in row order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundId {
    Kick,
    Snare,
    HiHat,
    Crash,
    Toms,
    Clap,
}

impl SoundId {
    pub const ALL: [SoundId; NUM_SOUNDS] = [
        SoundId::Kick,
        SoundId::Snare,
        SoundId::HiHat,
        SoundId::Crash,
        SoundId::Toms,
        SoundId::Clap,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            SoundId::Kick => "Kick",
            SoundId::Snare => "Snare",
            SoundId::HiHat => "Hi-Hat",
            SoundId::Crash => "Crash",
            SoundId::Toms => "Toms",
            SoundId::Clap => "Clap",
        }
    }

    // file looked up in the sounds directory
    pub fn file_name(self) -> &'static str {
        match self {
            SoundId::Kick => "kick.wav",
            SoundId::Snare => "snare.wav",
            SoundId::HiHat => "hihat.wav",
            SoundId::Crash => "crash.wav",
            SoundId::Toms => "tom.wav",
            SoundId::Clap => "clap.wav",
        }
    }
}

impl fmt::Display for SoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundStatus {
    Pending,
    Ready,
    Failed,
}

#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    // grid edits, already resolved from the cursor by the tui
    ToggleCell { row: usize, col: usize },
    Clear,

    // transport
    PlayPress,
    AdjustTempo(i32),
    AdjustSteps(i32),
    AdjustVolume(f32),

    // reload every sound from disk (the only way a failed sound comes back)
    Reload,

    // terminal width in columns changed
    Resize(u16),

    Quit,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DisplayState {
    pub grid: Vec<Vec<bool>>, // one row per sound, `steps` wide
    pub playhead: Option<usize>,
    pub playing: bool,
    pub bpm: u32,
    pub steps: usize,
    pub max_steps: usize,
    pub volume: f32,
    pub sounds: [SoundStatus; NUM_SOUNDS],
}
