use std::sync::Arc;

use anyhow::Context;
use crossbeam_channel::{Receiver, Sender};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use crate::audio_api::{AudioCommand, AudioOut};

mod clock;
mod engine;
mod frame;
mod sample_buffer;
mod voice;

pub use sample_buffer::SampleBuffer;

#[cfg(test)]
pub(crate) use sample_buffer::wav_bytes;

use clock::AudioClock;
use engine::Engine;

pub struct AudioHandle {
    tx: Sender<AudioCommand>,
    clock: Arc<AudioClock>,
    _output_stream: cpal::Stream,
}

impl AudioHandle {
    pub fn sample_rate(&self) -> u32 {
        self.clock.sample_rate()
    }

    // for the loader threads, which register buffers on their own
    pub fn command_sender(&self) -> Sender<AudioCommand> {
        self.tx.clone()
    }
}

impl AudioOut for AudioHandle {
    fn current_time(&self) -> f64 {
        self.clock.seconds()
    }

    fn send(&self, cmd: AudioCommand) {
        if self.tx.try_send(cmd).is_err() {
            log::warn!("audio command queue full, dropping command");
        }
    }
}

pub fn start_audio(master_gain: f32) -> anyhow::Result<AudioHandle> {
    let (tx, rx) = crossbeam_channel::bounded::<AudioCommand>(1024);

    let host = cpal::default_host();
    let device = host.default_output_device().context("no default output device")?;
    let config = device.default_output_config().context("no default output config")?;

    let sample_rate = u32::from(config.sample_rate());
    let channels = config.channels() as usize;
    log::info!("audio output: {channels} channels at {sample_rate} Hz");

    match config.sample_format() {
        cpal::SampleFormat::F32 => {
            let clock = Arc::new(AudioClock::new(sample_rate));
            let engine = Engine::new(Arc::clone(&clock), master_gain);
            let output_stream = build_output_stream_f32(&device, &config.config(), rx, engine, channels)?;
            output_stream.play().context("failed to play output stream")?;

            Ok(AudioHandle {
                tx,
                clock,
                _output_stream: output_stream,
            })
        }
        other => anyhow::bail!("unsupported sample format {other:?} (only f32 supported for now)"),
    }
}

fn build_output_stream_f32(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    rx: Receiver<AudioCommand>,
    mut engine: Engine,
    channels: usize,
) -> anyhow::Result<cpal::Stream> {
    let err_fn = |err| log::error!("audio output stream error: {err}");

    let stream = device.build_output_stream(
        config,
        move |data: &mut [f32], _info| {
            while let Ok(cmd) = rx.try_recv() {
                engine.handle_cmd(cmd);
            }
            engine.render_block(data, channels);
        },
        err_fn,
        None,
    )?;

    Ok(stream)
}
