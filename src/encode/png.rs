use std::path::{Path, PathBuf};

use crate::encode::ffmpeg::ensure_parent_dir;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::error::{TraceError, TraceResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;
use crate::render::surface::FrameRGBA;

/// Write one frame as a straight-alpha RGBA PNG, creating parent directories as needed.
pub fn save_png(path: &Path, frame: &FrameRGBA) -> TraceResult<()> {
    let expected = (frame.width as usize) * (frame.height as usize) * 4;
    if frame.data.len() != expected {
        return Err(TraceError::validation(
            "frame.data size mismatch with width*height*4",
        ));
    }
    ensure_parent_dir(path)?;

    let mut straight = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_rgba8_in_place(&mut straight);
    }
    image::save_buffer_with_format(
        path,
        &straight,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| TraceError::encode(format!("write png '{}': {e}", path.display())))
}

/// Sink that writes `frame_00000.png`, `frame_00001.png`, ... into a directory.
///
/// Files are numbered by arrival order, not by animation frame index, so the sequence has no
/// gaps when only every k-th frame is pushed.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    cfg: Option<SinkConfig>,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cfg: None,
            written: Vec::new(),
        }
    }

    /// Paths written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn frame_path(&self, n: usize) -> PathBuf {
        self.dir.join(format!("frame_{n:05}.png"))
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> TraceResult<()> {
        cfg.validate()?;
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            TraceError::encode(format!(
                "failed to create output directory '{}': {e}",
                self.dir.display()
            ))
        })?;
        self.cfg = Some(cfg);
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> TraceResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| TraceError::encode("png sink not started"))?;
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(TraceError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        let path = self.frame_path(self.written.len());
        save_png(&path, frame)?;
        tracing::trace!(idx, path = %path.display(), "wrote frame");
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> TraceResult<()> {
        tracing::debug!(frames = self.written.len(), dir = %self.dir.display(), "png sequence done");
        self.cfg = None;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
