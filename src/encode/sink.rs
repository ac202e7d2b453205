use crate::foundation::error::{TraceError, TraceResult};
use crate::render::surface::FrameRGBA;

/// Configuration handed to a [`FrameSink`] before the first frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Playback rate in frames per second.
    pub fps: u32,
}

impl SinkConfig {
    pub fn validate(&self) -> TraceResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(TraceError::validation("sink width/height must be non-zero"));
        }
        if self.fps == 0 {
            return Err(TraceError::validation("sink fps must be non-zero"));
        }
        Ok(())
    }
}

/// Consumer of rendered frames.
///
/// `push_frame` is called between `begin` and `end` with strictly increasing indices. Indices are
/// animation frame numbers, so a sink that only receives every k-th frame sees gaps.
pub trait FrameSink {
    /// Called once before any frame.
    fn begin(&mut self, cfg: SinkConfig) -> TraceResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> TraceResult<()>;
    /// Called once after the last frame.
    fn end(&mut self) -> TraceResult<()>;
}

/// Sink that keeps every frame in memory.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(u64, FrameRGBA)>,
    ended: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured by `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    pub fn frames(&self) -> &[(u64, FrameRGBA)] {
        &self.frames
    }

    /// `true` once `end` was called.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> TraceResult<()> {
        cfg.validate()?;
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> TraceResult<()> {
        if self.cfg.is_none() {
            return Err(TraceError::encode("in-memory sink not started"));
        }
        if let Some((last, _)) = self.frames.last()
            && idx <= *last
        {
            return Err(TraceError::encode("in-memory sink received out-of-order frame"));
        }
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> TraceResult<()> {
        self.ended = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
