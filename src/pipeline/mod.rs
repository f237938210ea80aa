pub mod interval;
pub mod pattern;
pub mod playhead;
pub mod transport;
