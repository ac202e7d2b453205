use crate::config::render_config::RenderConfig;
use crate::path::model::ThetaRhoPath;
use crate::render::surface::Surface;
use crate::render::trace::{draw_marker, render_full, render_range};

/// Animation driver state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimState {
    /// Nothing scheduled: no path yet, stopped, or the cursor ran past the end.
    Idle,
    /// A tick is pending.
    Running,
    /// The full path was drawn once; nothing is scheduled.
    FullView,
}

/// Token for one scheduled tick.
///
/// A handle is valid for exactly one [`Animator::tick`] call and only until the next
/// [`Animator::stop`] / [`Animator::start`] / [`Animator::restart`]. Ticking with anything else is a
/// no-op that reports [`TickOutcome::Stale`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TickHandle {
    generation: u64,
    seq: u64,
}

/// What a call to [`Animator::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// A frame was drawn and another tick is pending.
    Scheduled(TickHandle),
    /// A frame was drawn and the cursor ran past the end; the animator is idle.
    Finished,
    /// The handle was cancelled or already used; nothing was drawn.
    Stale,
}

/// Owns the cursor and advances it one frame per tick.
///
/// Every frame redraws the whole history `0..=cursor` and then the marker at `cursor`; the
/// cursor then advances by `config.step` and the next tick is scheduled only while the cursor
/// stays `<= path.len()`. The cursor never exceeds the path length.
#[derive(Debug)]
pub struct Animator {
    state: AnimState,
    cursor: usize,
    generation: u64,
    seq: u64,
    pending: Option<TickHandle>,
    frames_drawn: u64,
}

impl Default for Animator {
    fn default() -> Self {
        Self::new()
    }
}

impl Animator {
    pub fn new() -> Self {
        Self {
            state: AnimState::Idle,
            cursor: 0,
            generation: 0,
            seq: 0,
            pending: None,
            frames_drawn: 0,
        }
    }

    pub fn state(&self) -> AnimState {
        self.state
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Handle of the tick the host should run next, if any.
    pub fn pending(&self) -> Option<TickHandle> {
        self.pending
    }

    /// Frames drawn by ticks since this animator was created (full-view renders excluded).
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Cancel the pending tick, if any. Idempotent.
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            tracing::debug!(?handle, cursor = self.cursor, "cancelled pending tick");
        }
        self.generation += 1;
        if self.state == AnimState::Running {
            self.state = AnimState::Idle;
        }
    }

    /// Cancel the pending tick and drop out of full view. The surface no longer reflects the
    /// animation after this, so the state is always Idle.
    pub fn interrupt(&mut self) {
        self.stop();
        self.state = AnimState::Idle;
    }

    /// Cancel anything pending and draw the frame at the current cursor right away.
    ///
    /// Returns the handle of the next tick, or `None` when that frame was already the last.
    pub fn start<S: Surface + ?Sized>(
        &mut self,
        path: &ThetaRhoPath,
        config: &RenderConfig,
        surface: &mut S,
    ) -> Option<TickHandle> {
        self.stop();
        self.state = AnimState::Running;
        self.run_frame(path, config, surface)
    }

    /// Rewind to the start of `path`.
    ///
    /// In full-view mode the complete path is drawn once and nothing is scheduled; otherwise
    /// this is [`Animator::start`] from cursor 0.
    #[tracing::instrument(skip_all, fields(samples = path.len(), full_view = config.full_view))]
    pub fn restart<S: Surface + ?Sized>(
        &mut self,
        path: &ThetaRhoPath,
        config: &RenderConfig,
        surface: &mut S,
    ) -> Option<TickHandle> {
        self.stop();
        self.cursor = 0;
        if config.full_view {
            render_full(surface, path, config);
            self.state = AnimState::FullView;
            tracing::debug!("entered full view");
            return None;
        }
        self.start(path, config, surface)
    }

    /// Run the tick identified by `handle`.
    pub fn tick<S: Surface + ?Sized>(
        &mut self,
        handle: TickHandle,
        path: &ThetaRhoPath,
        config: &RenderConfig,
        surface: &mut S,
    ) -> TickOutcome {
        if self.pending != Some(handle) {
            tracing::debug!(?handle, "ignored stale tick");
            return TickOutcome::Stale;
        }
        self.pending = None;
        match self.run_frame(path, config, surface) {
            Some(next) => TickOutcome::Scheduled(next),
            None => TickOutcome::Finished,
        }
    }

    fn run_frame<S: Surface + ?Sized>(
        &mut self,
        path: &ThetaRhoPath,
        config: &RenderConfig,
        surface: &mut S,
    ) -> Option<TickHandle> {
        render_range(surface, path, config, 0, self.cursor);
        draw_marker(surface, path, config, self.cursor);
        self.frames_drawn += 1;

        match self.cursor.checked_add(config.step.max(1)) {
            Some(next) if next <= path.len() => {
                self.cursor = next;
                self.seq += 1;
                let handle = TickHandle {
                    generation: self.generation,
                    seq: self.seq,
                };
                self.pending = Some(handle);
                Some(handle)
            }
            _ => {
                self.cursor = path.len();
                self.state = AnimState::Idle;
                tracing::debug!(frames = self.frames_drawn, "animation finished");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/driver.rs"]
mod tests;
