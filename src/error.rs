// Error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::shared::SoundId;

/// A sound could not be fetched or decoded. The sound stays silent until the
/// next reload; every other sound is unaffected.
#[derive(Error, Debug)]
pub enum AssetLoadError {
    /// The sound's bytes could not be read.
    #[error("could not read {}: {source}", path.display())]
    Fetch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bytes are not a WAV file hound understands.
    #[error("could not decode {sound}: {source}")]
    Decode {
        sound: SoundId,
        #[source]
        source: hound::Error,
    },

    /// Decoded fine but holds no frames.
    #[error("{0} contains no audio")]
    Empty(SoundId),

    /// Decoded, but the audio engine was gone before it could take the buffer.
    #[error("{0} could not be registered: audio engine has shut down")]
    Unregistered(SoundId),
}

/// Grid read/write outside the current pattern bounds.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
pub struct InvalidGridAccess {
    pub row: usize,
    pub col: usize,
    pub rows: usize,
    pub cols: usize,
}
