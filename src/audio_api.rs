use std::sync::Arc;

pub use crate::audio::SampleBuffer;
use crate::shared::SoundId;

#[derive(Clone, Debug)]
pub enum AudioCommand {
    // The engine can't load files (it would stall the audio thread), so the
    // loader decodes off-thread and hands over the finished buffer.
    RegisterSample { sound: SoundId, buffer: Arc<SampleBuffer> },

    // Start `sound` at audio-clock time `at` (seconds). Silently ignored if
    // the sound has no buffer.
    Trigger { sound: SoundId, at: f64 },

    SetMasterGain(f32),

    // Drop every voice that has not reached its start frame yet.
    CancelPending,
}

// What the sequencer needs from the audio side: a clock to schedule against
// and somewhere to send commands.
pub trait AudioOut {
    /// Current audio-clock time in seconds.
    fn current_time(&self) -> f64;
    fn send(&self, cmd: AudioCommand);
}

#[cfg(test)]
pub mod fake {
    use std::cell::{Cell, RefCell};

    use super::{AudioCommand, AudioOut};
    use crate::shared::SoundId;

    // Records commands instead of playing them; the clock only moves when told to.
    #[derive(Default)]
    pub struct FakeAudio {
        pub now: Cell<f64>,
        pub sent: RefCell<Vec<AudioCommand>>,
    }

    impl FakeAudio {
        pub fn at(now: f64) -> Self {
            Self {
                now: Cell::new(now),
                sent: RefCell::new(Vec::new()),
            }
        }

        pub fn set_time(&self, now: f64) {
            self.now.set(now);
        }

        pub fn triggers(&self) -> Vec<(SoundId, f64)> {
            self.sent
                .borrow()
                .iter()
                .filter_map(|cmd| match cmd {
                    AudioCommand::Trigger { sound, at } => Some((*sound, *at)),
                    _ => None,
                })
                .collect()
        }

        pub fn take(&self) -> Vec<AudioCommand> {
            self.sent.borrow_mut().drain(..).collect()
        }
    }

    impl AudioOut for FakeAudio {
        fn current_time(&self) -> f64 {
            self.now.get()
        }

        fn send(&self, cmd: AudioCommand) {
            self.sent.borrow_mut().push(cmd);
        }
    }
}
