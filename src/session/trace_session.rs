use std::path::Path;

use crate::animation::driver::{AnimState, Animator, TickOutcome};
use crate::config::render_config::RenderConfig;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::error::{TraceError, TraceResult};
use crate::path::model::ThetaRhoPath;
use crate::path::parse::{parse_coordinates, read_path_file};
use crate::render::surface::{Readback, Surface};
use crate::render::trace::{RenderStats, draw_marker, render_range};

/// Options for [`Session::play`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackOpts {
    /// Push every n-th drawn frame to the sink. The final frame is always pushed.
    pub every: u64,
    /// Rate reported to the sink.
    pub fps: u32,
}

impl Default for PlaybackOpts {
    fn default() -> Self {
        Self { every: 1, fps: 60 }
    }
}

/// Counters from one [`Session::play`] run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackStats {
    /// Frames drawn, including the first one drawn by the restart.
    pub frames_drawn: u64,
    /// Frames handed to the sink.
    pub frames_pushed: u64,
}

/// One loaded path, its render options, the animation driver and the surface it draws on.
///
/// Every change of input (a new path, a view toggle) cancels the pending tick and restarts from
/// cursor 0. The host advances the animation by calling [`Session::next_frame`] once per frame.
#[derive(Debug)]
pub struct Session<S: Surface> {
    config: RenderConfig,
    path: ThetaRhoPath,
    animator: Animator,
    surface: S,
}

impl<S: Surface> Session<S> {
    /// Create an idle session with an empty path. Nothing is drawn yet.
    pub fn new(config: RenderConfig, surface: S) -> TraceResult<Self> {
        config.validate()?;
        if surface.canvas() != config.canvas {
            return Err(TraceError::validation(format!(
                "surface is {}x{} but config canvas is {}x{}",
                surface.canvas().width,
                surface.canvas().height,
                config.canvas.width,
                config.canvas.height
            )));
        }
        Ok(Self {
            config,
            path: ThetaRhoPath::default(),
            animator: Animator::new(),
            surface,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn path(&self) -> &ThetaRhoPath {
        &self.path
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn state(&self) -> AnimState {
        self.animator.state()
    }

    pub fn cursor(&self) -> usize {
        self.animator.cursor()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Replace the path with the parse of `text` and restart. Returns the sample count.
    pub fn load_text(&mut self, text: &str) -> usize {
        self.replace_path(parse_coordinates(text))
    }

    /// Replace the path with `path` and restart. Returns the sample count.
    pub fn load_path(&mut self, path: ThetaRhoPath) -> usize {
        self.replace_path(path)
    }

    /// Read, parse and load a theta-rho file. On error the current path and animation are kept.
    #[tracing::instrument(skip(self, file), fields(file = %file.display()))]
    pub fn load_file(&mut self, file: &Path) -> TraceResult<usize> {
        let path = read_path_file(file)?;
        Ok(self.replace_path(path))
    }

    /// Load the selected file, if any. `None` (nothing selected) changes nothing and returns
    /// `Ok(false)`.
    pub fn load_selection(&mut self, selection: Option<&Path>) -> TraceResult<bool> {
        match selection {
            Some(file) => self.load_file(file).map(|_| true),
            None => Ok(false),
        }
    }

    pub fn set_full_view(&mut self, on: bool) {
        self.config.full_view = on;
        self.restart();
    }

    pub fn set_rainbow(&mut self, on: bool) {
        self.config.rainbow = on;
        self.restart();
    }

    /// Cancel the pending tick and start over from cursor 0 (or draw the full view).
    pub fn restart(&mut self) {
        self.animator
            .restart(&self.path, &self.config, &mut self.surface);
    }

    /// Cancel the pending tick. The surface keeps the last drawn frame.
    pub fn stop(&mut self) {
        self.animator.stop();
    }

    /// Run the pending tick, if any. Returns `true` when a frame was drawn.
    pub fn next_frame(&mut self) -> bool {
        let Some(handle) = self.animator.pending() else {
            return false;
        };
        !matches!(
            self.animator
                .tick(handle, &self.path, &self.config, &mut self.surface),
            TickOutcome::Stale
        )
    }

    /// Draw the animation frame for `cursor` (history up to `cursor`, then the marker) as a
    /// one-off, in any view mode. Cancels the pending tick first so that nothing overwrites it,
    /// and leaves the session Idle.
    pub fn draw_at(&mut self, cursor: usize) -> RenderStats {
        self.animator.interrupt();
        let stats = render_range(&mut self.surface, &self.path, &self.config, 0, cursor);
        draw_marker(&mut self.surface, &self.path, &self.config, cursor);
        stats
    }

    fn replace_path(&mut self, path: ThetaRhoPath) -> usize {
        self.path = path;
        tracing::debug!(samples = self.path.len(), "loaded path");
        self.restart();
        self.path.len()
    }
}

impl<S: Surface + Readback> Session<S> {
    /// Restart and run the animation to the end, pushing frames into `sink`.
    ///
    /// Frame `0` is the one drawn by the restart; indices count drawn frames. In full-view mode
    /// exactly one frame is pushed.
    pub fn play(
        &mut self,
        sink: &mut dyn FrameSink,
        opts: PlaybackOpts,
    ) -> TraceResult<PlaybackStats> {
        if opts.every == 0 {
            return Err(TraceError::validation("playback 'every' must be non-zero"));
        }
        let canvas = self.surface.canvas();
        sink.begin(SinkConfig {
            width: canvas.width,
            height: canvas.height,
            fps: opts.fps,
        })?;

        self.restart();
        let expected = self.path.frame_count(self.config.step);
        let mut stats = PlaybackStats {
            frames_drawn: 1,
            ..PlaybackStats::default()
        };
        let mut idx = 0u64;
        loop {
            let is_last = self.animator.pending().is_none();
            if is_last || idx.is_multiple_of(opts.every) {
                let frame = self.surface.readback_rgba8()?;
                sink.push_frame(idx, &frame)?;
                stats.frames_pushed += 1;
            }
            if is_last || !self.next_frame() {
                break;
            }
            idx += 1;
            stats.frames_drawn += 1;
            if idx.is_multiple_of(256) {
                tracing::debug!(idx, expected, "playback progress");
            }
        }

        sink.end()?;
        tracing::debug!(
            drawn = stats.frames_drawn,
            pushed = stats.frames_pushed,
            "playback finished"
        );
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/trace_session.rs"]
mod tests;
