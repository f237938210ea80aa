// Transport state and the look-ahead scheduler.
//
// The scheduler runs on a coarse wall-clock interval, but every trigger it
// emits carries an exact audio-clock start time. Each pass schedules every
// step that starts before `now + schedule_ahead`, so a late or early pass
// never moves a note, it only changes how far ahead we happened to be.

use std::time::Duration;

use crate::audio_api::{AudioCommand, AudioOut};
use crate::shared::{DEFAULT_BPM, DEFAULT_STEPS, MAX_BPM, MIN_BPM, SoundId};

use super::pattern::Pattern;
use super::playhead::{ScheduledStep, StepQueue};

/// Steps are sixteenth notes: a quarter of a beat.
pub fn step_duration(bpm: u32) -> f64 {
    60.0 / bpm.max(1) as f64 * 0.25
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayState {
    Stopped,
    Playing,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transport {
    pub state: PlayState,
    pub current_step: usize,
    pub next_step_time: f64,
    pub tempo_bpm: u32,
    pub step_count: usize,
}

impl Default for Transport {
    fn default() -> Self {
        Self {
            state: PlayState::Stopped,
            current_step: 0,
            next_step_time: 0.0,
            tempo_bpm: DEFAULT_BPM,
            step_count: DEFAULT_STEPS,
        }
    }
}

impl Transport {
    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Playing
    }

    // Move to the next step, using whatever tempo is set right now
    fn advance(&mut self) {
        self.next_step_time += step_duration(self.tempo_bpm);
        self.current_step = (self.current_step + 1) % self.step_count.max(1);
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SchedulerConfig {
    /// How often the scheduling pass runs.
    pub lookahead: Duration,
    /// How far past the audio clock each pass schedules, in seconds.
    pub schedule_ahead: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            lookahead: Duration::from_millis(25),
            schedule_ahead: 0.1,
        }
    }
}

pub struct Scheduler {
    transport: Transport,
    config: SchedulerConfig,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig, tempo_bpm: u32, step_count: usize) -> Self {
        let mut scheduler = Self {
            transport: Transport::default(),
            config,
        };
        scheduler.set_tempo(tempo_bpm);
        scheduler.set_step_count(step_count);
        scheduler
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn is_playing(&self) -> bool {
        self.transport.is_playing()
    }

    /// Stopped -> Playing: first step lands right now on the audio clock.
    pub fn start(&mut self, now: f64) {
        self.transport.state = PlayState::Playing;
        self.transport.current_step = 0;
        self.transport.next_step_time = now;
    }

    pub fn stop(&mut self) {
        self.transport.state = PlayState::Stopped;
    }

    /// Only affects steps not yet scheduled.
    pub fn set_tempo(&mut self, bpm: u32) -> u32 {
        self.transport.tempo_bpm = bpm.clamp(MIN_BPM, MAX_BPM);
        self.transport.tempo_bpm
    }

    /// A current step beyond the new count is left alone; it wraps at the next advance.
    pub fn set_step_count(&mut self, steps: usize) {
        self.transport.step_count = steps.max(1);
    }

    /// One scheduling pass. Returns how many steps were scheduled.
    pub fn schedule<A: AudioOut + ?Sized>(
        &mut self,
        pattern: &Pattern,
        audio: &A,
        queue: &mut StepQueue,
    ) -> usize {
        if !self.is_playing() {
            return 0;
        }
        let horizon = audio.current_time() + self.config.schedule_ahead;
        let mut scheduled = 0;
        while self.transport.next_step_time < horizon {
            let step = self.transport.current_step;
            let at = self.transport.next_step_time;
            for sound in SoundId::ALL {
                if pattern.is_active(sound.index(), step) {
                    audio.send(AudioCommand::Trigger { sound, at });
                }
            }
            queue.push(ScheduledStep { step, audio_time: at });
            self.transport.advance();
            scheduled += 1;
        }
        scheduled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio_api::fake::FakeAudio;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;

    fn scheduler(bpm: u32, steps: usize) -> Scheduler {
        Scheduler::new(SchedulerConfig::default(), bpm, steps)
    }

    #[test]
    fn sixteenth_notes_at_120_bpm() {
        assert_relative_eq!(step_duration(120), 0.125);
        assert_relative_eq!(step_duration(60), 0.25);
    }

    #[test]
    fn stopped_scheduler_does_nothing() {
        let audio = FakeAudio::at(3.0);
        let mut s = scheduler(120, 16);
        let mut queue = StepQueue::default();
        assert_eq!(s.schedule(&Pattern::new(16), &audio, &mut queue), 0);
        assert!(queue.is_empty());
    }

    #[test]
    fn one_pass_fills_the_lookahead_window() {
        let audio = FakeAudio::at(10.0);
        let mut pattern = Pattern::new(16);
        pattern.toggle(SoundId::Kick.index(), 0).unwrap();
        pattern.toggle(SoundId::HiHat.index(), 0).unwrap();
        pattern.toggle(SoundId::Snare.index(), 1).unwrap();

        let mut s = scheduler(120, 16);
        let mut queue = StepQueue::default();
        s.start(audio.current_time());

        // window is [10.0, 10.1): only step 0 fits at 0.125s per step
        assert_eq!(s.schedule(&pattern, &audio, &mut queue), 1);
        assert_eq!(s.transport().current_step, 1);
        assert_relative_eq!(s.transport().next_step_time, 10.125);
        assert_eq!(audio.triggers(), vec![(SoundId::Kick, 10.0), (SoundId::HiHat, 10.0)]);

        // clock moves on, step 1 enters the window
        audio.take();
        audio.set_time(10.05);
        assert_eq!(s.schedule(&pattern, &audio, &mut queue), 1);
        assert_eq!(audio.triggers(), vec![(SoundId::Snare, 10.125)]);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn late_pass_catches_up_without_moving_notes() {
        let audio = FakeAudio::at(0.0);
        let mut pattern = Pattern::new(4);
        for step in 0..4 {
            pattern.toggle(0, step).unwrap();
        }
        let mut s = scheduler(120, 4);
        let mut queue = StepQueue::default();
        s.start(0.0);
        s.schedule(&pattern, &audio, &mut queue);

        // a badly delayed callback: 0.125, 0.25, 0.375, 0.5 are all due now
        audio.set_time(0.45);
        assert_eq!(s.schedule(&pattern, &audio, &mut queue), 4);
        let times: Vec<f64> = audio.triggers().iter().map(|(_, at)| *at).collect();
        assert_eq!(times, vec![0.0, 0.125, 0.25, 0.375, 0.5]);
        // wrapped around the 4-step bar
        assert_eq!(s.transport().current_step, 1);
    }

    #[test]
    fn tempo_change_only_affects_later_steps() {
        let audio = FakeAudio::at(0.0);
        let mut s = scheduler(120, 16);
        let mut queue = StepQueue::default();
        s.start(0.0);
        s.schedule(&Pattern::new(16), &audio, &mut queue);
        assert_relative_eq!(s.transport().next_step_time, 0.125);

        s.set_tempo(60);
        audio.set_time(0.3);
        s.schedule(&Pattern::new(16), &audio, &mut queue);
        // 0.125 was already computed at 120; from there it's 0.25 per step
        assert_relative_eq!(s.transport().next_step_time, 0.625);
    }

    #[test]
    fn tempo_is_clamped() {
        let mut s = scheduler(120, 16);
        assert_eq!(s.set_tempo(0), MIN_BPM);
        assert_eq!(s.set_tempo(10_000), MAX_BPM);
    }

    #[test]
    fn shrinking_while_playing_wraps_into_range() {
        let audio = FakeAudio::at(0.0);
        let mut pattern = Pattern::new(16);
        let mut s = scheduler(120, 16);
        let mut queue = StepQueue::default();
        s.start(0.0);
        // steps 0..=9 fall before 1.2
        audio.set_time(1.1);
        s.schedule(&pattern, &audio, &mut queue);
        assert_eq!(s.transport().current_step, 10);

        pattern.resize(8);
        s.set_step_count(8);
        audio.set_time(1.3);
        s.schedule(&pattern, &audio, &mut queue);
        let step = s.transport().current_step;
        assert!(step < 8, "current step {step} escaped an 8-step pattern");
    }

    #[test]
    fn restart_resets_position_and_time() {
        let audio = FakeAudio::at(0.0);
        let mut s = scheduler(120, 16);
        let mut queue = StepQueue::default();
        s.start(0.0);
        audio.set_time(0.5);
        s.schedule(&Pattern::new(16), &audio, &mut queue);
        assert_ne!(s.transport().current_step, 0);

        s.stop();
        s.start(7.25);
        assert_eq!(s.transport().current_step, 0);
        assert_relative_eq!(s.transport().next_step_time, 7.25);
        assert!(s.is_playing());
    }
}
