use std::sync::Arc;

use super::frame::StereoFrame;
use super::sample_buffer::SampleBuffer;

// One scheduled playback of a sound. It stays silent until the engine's frame
// counter reaches `start_frame`, then plays the buffer once.
#[derive(Clone, Debug)]
pub struct Voice {
    buffer: Arc<SampleBuffer>,
    pub start_frame: u64,
    pos: usize,
}

impl Voice {
    pub fn new(buffer: Arc<SampleBuffer>, start_frame: u64) -> Self {
        Self {
            buffer,
            start_frame,
            pos: 0,
        }
    }

    pub fn is_started(&self) -> bool {
        self.pos > 0
    }

    pub fn is_finished(&self) -> bool {
        self.pos >= self.buffer.len()
    }

    // Sample for absolute frame `frame`; zero before the start frame and after the end
    #[inline]
    pub fn next_frame(&mut self, frame: u64) -> StereoFrame {
        if frame < self.start_frame {
            return StereoFrame::default();
        }
        match self.buffer.data.get(self.pos) {
            Some(sample) => {
                self.pos += 1;
                *sample
            }
            None => StereoFrame::default(),
        }
    }
}
