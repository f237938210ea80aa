use std::sync::Arc;

use crate::audio_api::AudioCommand;
use crate::shared::NUM_SOUNDS;

use super::clock::AudioClock;
use super::frame::StereoFrame;
use super::sample_buffer::SampleBuffer;
use super::voice::Voice;

const MAX_VOICES: usize = 32; // hard cap so we wont malloc in audio callback

pub struct Engine {
    clock: Arc<AudioClock>,
    bank: [Option<Arc<SampleBuffer>>; NUM_SOUNDS], // empty slot = silent sound
    voices: Vec<Voice>, // never grows past MAX_VOICES
    master_gain: f32,
    frame_pos: u64, // absolute frame of the next frame we render
}

impl Engine {
    pub fn new(clock: Arc<AudioClock>, master_gain: f32) -> Self {
        Self {
            clock,
            bank: std::array::from_fn(|_| None),
            voices: Vec::with_capacity(MAX_VOICES),
            master_gain,
            frame_pos: 0,
        }
    }

    pub fn handle_cmd(&mut self, cmd: AudioCommand) {
        match cmd {
            AudioCommand::RegisterSample { sound, buffer } => {
                self.bank[sound.index()] = Some(buffer);
            }
            AudioCommand::Trigger { sound, at } => {
                // not loaded (yet, or ever): stay silent
                if let Some(buffer) = &self.bank[sound.index()] {
                    let start_frame = self.clock.frame_at(at);
                    self.start_voice(Voice::new(Arc::clone(buffer), start_frame));
                }
            }
            AudioCommand::SetMasterGain(gain) => self.master_gain = gain.max(0.0),
            AudioCommand::CancelPending => self.voices.retain(|v| v.is_started()),
        }
    }

    fn start_voice(&mut self, voice: Voice) {
        if self.voices.len() < MAX_VOICES {
            self.voices.push(voice);
            return;
        }
        // full: steal the voice that started earliest
        if let Some(oldest) = self.voices.iter_mut().min_by_key(|v| v.start_frame) {
            *oldest = voice;
        }
    }

    // Render one interleaved block and advance the audio clock past it
    pub fn render_block(&mut self, data: &mut [f32], channels: usize) {
        let channels = channels.max(1);
        for out in data.chunks_mut(channels) {
            let mut mix = StereoFrame::default();
            for voice in &mut self.voices {
                mix += voice.next_frame(self.frame_pos);
            }
            mix.scaled(self.master_gain).write_to(out);
            self.frame_pos += 1;
        }
        self.voices.retain(|v| !v.is_finished());
        self.clock.publish(self.frame_pos);
    }

    #[cfg(test)]
    fn active_voices(&self) -> usize {
        self.voices.len()
    }
}
