use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{Receiver, Sender};

use crate::audio::SampleBuffer;
use crate::audio_api::AudioCommand;
use crate::error::AssetLoadError;
use crate::shared::SoundId;

// Where a sound's raw bytes come from
pub trait SoundSource: Send + Sync {
    fn fetch(&self, sound: SoundId) -> Result<Vec<u8>, AssetLoadError>;
}

// <sounds_dir>/<sound file name>
#[derive(Clone, Debug)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl SoundSource for DirSource {
    fn fetch(&self, sound: SoundId) -> Result<Vec<u8>, AssetLoadError> {
        let path = self.root.join(sound.file_name());
        std::fs::read(&path).map_err(|source| AssetLoadError::Fetch { path, source })
    }
}

#[derive(Debug)]
pub struct LoadReport {
    pub sound: SoundId,
    pub result: Result<usize, AssetLoadError>, // frames loaded
}

// Fetch and decode one sound, ready to register with the engine
pub fn load(
    source: &dyn SoundSource,
    sound: SoundId,
    target_rate: u32,
) -> Result<SampleBuffer, AssetLoadError> {
    let bytes = source.fetch(sound)?;
    let buffer = SampleBuffer::decode_wav(&bytes, target_rate)
        .map_err(|source| AssetLoadError::Decode { sound, source })?;
    if buffer.is_empty() {
        return Err(AssetLoadError::Empty(sound));
    }
    Ok(buffer)
}

// Hand a decoded buffer to the engine; Ok only once the engine has it queued
fn register(
    audio_tx: &Sender<AudioCommand>,
    sound: SoundId,
    buffer: SampleBuffer,
) -> Result<usize, AssetLoadError> {
    let frames = buffer.len();
    audio_tx
        .send(AudioCommand::RegisterSample {
            sound,
            buffer: Arc::new(buffer),
        })
        .map_err(|_| AssetLoadError::Unregistered(sound))?;
    Ok(frames)
}

// Load every sound in the background, one thread each so a slow or broken
// file never holds up the others. Decoded buffers go straight to the engine;
// outcomes come back on the returned receiver.
pub fn spawn_load_all(
    source: Arc<dyn SoundSource>,
    target_rate: u32,
    audio_tx: Sender<AudioCommand>,
) -> Receiver<LoadReport> {
    let (report_tx, report_rx) = crossbeam_channel::unbounded();

    for sound in SoundId::ALL {
        let source = Arc::clone(&source);
        let audio_tx = audio_tx.clone();
        let report_tx = report_tx.clone();
        let spawned = thread::Builder::new()
            .name(format!("load-{}", sound.file_name()))
            .spawn(move || {
                let result = load(source.as_ref(), sound, target_rate)
                    .and_then(|buffer| register(&audio_tx, sound, buffer));
                let _ = report_tx.send(LoadReport { sound, result });
            });
        if let Err(err) = spawned {
            log::error!("could not spawn loader for {sound}: {err}");
        }
    }

    report_rx
}
