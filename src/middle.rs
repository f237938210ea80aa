// The controller. It owns every piece of sequencer state (pattern, transport,
// step queue, playhead) and is only ever touched from the main loop, so none
// of it needs a lock. The TUI feeds it InputEvents and renders its
// DisplayState; the audio side only ever sees AudioCommands.

use std::time::Instant;

use crate::audio_api::{AudioCommand, AudioOut};
use crate::config::Config;
use crate::loader::sample_loader::LoadReport;
use crate::pipeline::interval::Interval;
use crate::pipeline::pattern::Pattern;
use crate::pipeline::playhead::{Playhead, StepQueue};
use crate::pipeline::transport::Scheduler;
use crate::shared::{DisplayState, InputEvent, MAX_STEPS, MIN_STEPS, NUM_SOUNDS, SoundStatus};

// rough width of one terminal cell, for the pixel breakpoints below
pub const CELL_WIDTH_PX: u32 = 10;

const VOLUME_MAX: f32 = 1.0;

// Narrow screens get fewer steps
pub fn max_steps_for_width(width_px: u32) -> usize {
    if width_px <= 480 {
        8
    } else if width_px <= 768 {
        16
    } else {
        MAX_STEPS
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Reload,
    Quit,
}

pub struct Middle {
    pattern: Pattern,
    scheduler: Scheduler,
    scheduler_timer: Interval,
    queue: StepQueue,
    playhead: Playhead,
    volume: f32,
    max_steps: usize,
    sounds: [SoundStatus; NUM_SOUNDS],
}

impl Middle {
    pub fn new(config: &Config) -> Self {
        Self {
            pattern: Pattern::new(config.steps),
            scheduler: Scheduler::new(config.scheduler, config.bpm, config.steps),
            scheduler_timer: Interval::new(config.scheduler.lookahead),
            queue: StepQueue::default(),
            playhead: Playhead::default(),
            volume: config.volume,
            max_steps: MAX_STEPS,
            sounds: [SoundStatus::Pending; NUM_SOUNDS],
        }
    }

    #[cfg(test)]
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    #[cfg(test)]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    #[cfg(test)]
    pub fn queued_steps(&self) -> usize {
        self.queue.len()
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn handle_input<A: AudioOut + ?Sized>(
        &mut self,
        event: InputEvent,
        audio: &A,
        now: Instant,
    ) -> Outcome {
        match event {
            InputEvent::ToggleCell { row, col } => {
                if let Err(err) = self.pattern.toggle(row, col) {
                    log::warn!("ignoring toggle: {err}");
                }
            }
            InputEvent::Clear => {
                self.pattern.clear();
                log::debug!("pattern cleared");
            }
            InputEvent::PlayPress => self.toggle_playback(audio, now),
            InputEvent::AdjustTempo(delta) => {
                let bpm = self.scheduler.transport().tempo_bpm.saturating_add_signed(delta);
                let bpm = self.scheduler.set_tempo(bpm);
                log::debug!("tempo {bpm} BPM");
            }
            InputEvent::AdjustSteps(delta) => {
                let steps = self.pattern.steps().saturating_add_signed(delta as isize);
                self.set_steps(steps);
            }
            InputEvent::AdjustVolume(delta) => {
                self.volume = (self.volume + delta).clamp(0.0, VOLUME_MAX);
                audio.send(AudioCommand::SetMasterGain(self.volume));
                log::debug!("volume {:.0}%", self.volume * 100.0);
            }
            InputEvent::Resize(cols) => self.apply_width(cols),
            InputEvent::Reload => {
                self.sounds = [SoundStatus::Pending; NUM_SOUNDS];
                return Outcome::Reload;
            }
            InputEvent::Quit => return Outcome::Quit,
        }
        Outcome::Continue
    }

    pub fn toggle_playback<A: AudioOut + ?Sized>(&mut self, audio: &A, now: Instant) {
        if self.scheduler.is_playing() {
            // nothing may sound after this returns
            self.scheduler_timer.cancel();
            self.scheduler.stop();
            if !self.queue.is_empty() {
                log::debug!("dropping {} queued steps", self.queue.len());
            }
            self.queue.clear();
            audio.send(AudioCommand::CancelPending);
            log::info!("stopped");
        } else {
            self.scheduler.start(audio.current_time());
            log::info!(
                "playing at {} BPM, {} steps",
                self.scheduler.transport().tempo_bpm,
                self.pattern.steps()
            );
            // first pass right away, then every lookahead period
            self.run_scheduler(audio);
            self.scheduler_timer.arm(now);
        }
    }

    // Keep pattern and transport the same width, within the current limits
    pub fn set_steps(&mut self, steps: usize) {
        let steps = steps.clamp(MIN_STEPS.min(self.max_steps), self.max_steps);
        if steps != self.pattern.steps() {
            self.pattern.resize(steps);
            self.scheduler.set_step_count(steps);
            log::debug!("{steps} steps");
        }
    }

    // Terminal width in cells changed
    pub fn apply_width(&mut self, cols: u16) {
        let max_steps = max_steps_for_width(cols as u32 * CELL_WIDTH_PX);
        if max_steps != self.max_steps {
            log::debug!("width {cols} cols: at most {max_steps} steps");
            self.max_steps = max_steps;
        }
        if self.pattern.steps() > max_steps {
            self.set_steps(max_steps);
        }
    }

    pub fn run_scheduler<A: AudioOut + ?Sized>(&mut self, audio: &A) -> usize {
        self.scheduler.schedule(&self.pattern, audio, &mut self.queue)
    }

    // The scheduler's own timer: runs a pass if one is due
    pub fn poll_scheduler<A: AudioOut + ?Sized>(&mut self, audio: &A, now: Instant) {
        if self.scheduler_timer.fire(now) {
            self.run_scheduler(audio);
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler_timer.next_due()
    }

    // Draw tick: move the playhead onto whatever has started playing by `audio_now`
    pub fn sync_playhead(&mut self, audio_now: f64) -> bool {
        self.playhead
            .sync(self.scheduler.is_playing(), &mut self.queue, audio_now)
    }

    pub fn on_load_report(&mut self, report: LoadReport) {
        let status = match report.result {
            Ok(frames) => {
                log::info!("loaded {} ({frames} frames)", report.sound);
                SoundStatus::Ready
            }
            Err(err) => {
                log::error!("{} will stay silent: {err}", report.sound);
                SoundStatus::Failed
            }
        };
        self.sounds[report.sound.index()] = status;
    }

    pub fn display_state(&self) -> DisplayState {
        let transport = self.scheduler.transport();
        DisplayState {
            grid: self.pattern.rows().to_vec(),
            // a step a shrink left behind has no column to light
            playhead: self.playhead.highlighted().filter(|s| *s < self.pattern.steps()),
            playing: transport.is_playing(),
            bpm: transport.tempo_bpm,
            steps: self.pattern.steps(),
            max_steps: self.max_steps,
            volume: self.volume(),
            sounds: self.sounds,
        }
    }
}
