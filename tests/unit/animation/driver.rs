use super::*;
use crate::foundation::core::Canvas;
use crate::path::model::PolarSample;
use crate::render::recording::{DrawCall, RecordingSurface};

fn line_path(n: usize) -> ThetaRhoPath {
    (0..n)
        .map(|i| PolarSample::new(i as f64 * 0.1, 0.5))
        .collect()
}

fn config(step: usize) -> RenderConfig {
    RenderConfig {
        canvas: Canvas {
            width: 64,
            height: 64,
        },
        step,
        ..RenderConfig::default()
    }
}

/// Drive ticks until the animator stops scheduling; returns the number of ticks run.
fn run_to_end(
    anim: &mut Animator,
    mut next: Option<TickHandle>,
    path: &ThetaRhoPath,
    cfg: &RenderConfig,
    s: &mut RecordingSurface,
) -> usize {
    let mut ticks = 0;
    while let Some(handle) = next {
        ticks += 1;
        next = match anim.tick(handle, path, cfg, s) {
            TickOutcome::Scheduled(h) => Some(h),
            TickOutcome::Finished => None,
            TickOutcome::Stale => panic!("live handle reported stale"),
        };
    }
    ticks
}

#[test]
fn new_animator_is_idle_at_zero() {
    let anim = Animator::new();
    assert_eq!(anim.state(), AnimState::Idle);
    assert_eq!(anim.cursor(), 0);
    assert_eq!(anim.pending(), None);
    assert_eq!(anim.frames_drawn(), 0);
}

#[test]
fn step_one_draws_len_plus_one_frames() {
    let path = line_path(10);
    let cfg = config(1);
    let mut s = RecordingSurface::new(64, 64);
    let mut anim = Animator::new();

    let first = anim.restart(&path, &cfg, &mut s);
    assert_eq!(anim.state(), AnimState::Running);
    assert!(first.is_some());
    assert_eq!(anim.frames_drawn(), 1);

    let ticks = run_to_end(&mut anim, first, &path, &cfg, &mut s);
    assert_eq!(ticks, 10);
    assert_eq!(anim.frames_drawn(), 11);
    assert_eq!(anim.frames_drawn(), path.frame_count(cfg.step) as u64);
    assert_eq!(anim.state(), AnimState::Idle);
    assert_eq!(anim.cursor(), path.len());
    assert_eq!(anim.pending(), None);
}

#[test]
fn larger_step_skips_frames() {
    let path = line_path(10);
    let cfg = config(3);
    let mut s = RecordingSurface::new(64, 64);
    let mut anim = Animator::new();

    let first = anim.restart(&path, &cfg, &mut s);
    let ticks = run_to_end(&mut anim, first, &path, &cfg, &mut s);
    // Cursor visits 0, 3, 6, 9.
    assert_eq!(ticks, 3);
    assert_eq!(anim.frames_drawn(), 4);
    assert_eq!(anim.cursor(), 10);
}

#[test]
fn each_frame_redraws_full_history_then_marker() {
    let path = line_path(4);
    let cfg = config(1);
    let mut s = RecordingSurface::new(64, 64);
    let mut anim = Animator::new();

    let first = anim.restart(&path, &cfg, &mut s);
    // Cursor 0: background only, marker on sample 0.
    assert_eq!(s.segments(), 0);
    assert_eq!(s.discs(), 1);
    assert!(matches!(s.calls.last(), Some(DrawCall::Disc(..))));

    s.reset();
    let Some(handle) = first else {
        panic!("expected a pending tick");
    };
    let TickOutcome::Scheduled(_) = anim.tick(handle, &path, &cfg, &mut s) else {
        panic!("expected another tick");
    };
    // Cursor 1: one segment.
    assert_eq!(s.clears(), 1);
    assert_eq!(s.segments(), 1);
    assert_eq!(s.discs(), 1);
    assert!(matches!(s.calls.last(), Some(DrawCall::Disc(..))));
}

#[test]
fn final_frame_at_len_draws_no_marker() {
    let path = line_path(2);
    let cfg = config(1);
    let mut s = RecordingSurface::new(64, 64);
    let mut anim = Animator::new();

    let first = anim.restart(&path, &cfg, &mut s);
    run_to_end(&mut anim, first, &path, &cfg, &mut s);
    // Frames at cursor 0, 1, 2: markers only at 0 and 1.
    assert_eq!(anim.frames_drawn(), 3);
    assert_eq!(s.discs(), 2);
}

#[test]
fn stop_cancels_pending_tick() {
    let path = line_path(10);
    let cfg = config(1);
    let mut s = RecordingSurface::new(64, 64);
    let mut anim = Animator::new();

    let Some(handle) = anim.restart(&path, &cfg, &mut s) else {
        panic!("expected a pending tick");
    };
    anim.stop();
    assert_eq!(anim.state(), AnimState::Idle);
    assert_eq!(anim.pending(), None);

    s.reset();
    assert_eq!(anim.tick(handle, &path, &cfg, &mut s), TickOutcome::Stale);
    assert!(s.calls.is_empty());

    // Idempotent.
    anim.stop();
    assert_eq!(anim.state(), AnimState::Idle);
}

#[test]
fn restart_invalidates_previous_chain() {
    let path = line_path(10);
    let cfg = config(1);
    let mut s = RecordingSurface::new(64, 64);
    let mut anim = Animator::new();

    let Some(old) = anim.restart(&path, &cfg, &mut s) else {
        panic!("expected a pending tick");
    };
    let Some(new) = anim.restart(&path, &cfg, &mut s) else {
        panic!("expected a pending tick");
    };
    assert_ne!(old, new);
    assert_eq!(anim.tick(old, &path, &cfg, &mut s), TickOutcome::Stale);
    assert!(matches!(
        anim.tick(new, &path, &cfg, &mut s),
        TickOutcome::Scheduled(_)
    ));
}

#[test]
fn consumed_handle_is_stale() {
    let path = line_path(10);
    let cfg = config(1);
    let mut s = RecordingSurface::new(64, 64);
    let mut anim = Animator::new();

    let Some(handle) = anim.restart(&path, &cfg, &mut s) else {
        panic!("expected a pending tick");
    };
    assert!(matches!(
        anim.tick(handle, &path, &cfg, &mut s),
        TickOutcome::Scheduled(_)
    ));
    let frames = anim.frames_drawn();
    assert_eq!(anim.tick(handle, &path, &cfg, &mut s), TickOutcome::Stale);
    assert_eq!(anim.frames_drawn(), frames);
}

#[test]
fn start_resumes_from_current_cursor() {
    let path = line_path(10);
    let cfg = config(2);
    let mut s = RecordingSurface::new(64, 64);
    let mut anim = Animator::new();

    let Some(handle) = anim.restart(&path, &cfg, &mut s) else {
        panic!("expected a pending tick");
    };
    anim.tick(handle, &path, &cfg, &mut s);
    anim.stop();
    let cursor = anim.cursor();
    assert_eq!(cursor, 4);

    s.reset();
    let next = anim.start(&path, &cfg, &mut s);
    assert!(next.is_some());
    assert_eq!(anim.state(), AnimState::Running);
    // The resumed frame draws history up to the paused cursor.
    assert_eq!(s.segments(), cursor);
    assert_eq!(anim.cursor(), cursor + 2);
}

#[test]
fn full_view_draws_once_and_schedules_nothing() {
    let path = line_path(10);
    let cfg = RenderConfig {
        full_view: true,
        ..config(1)
    };
    let mut s = RecordingSurface::new(64, 64);
    let mut anim = Animator::new();

    let Some(old) = anim.restart(&path, &config(1), &mut s) else {
        panic!("expected a pending tick");
    };
    s.reset();

    assert_eq!(anim.restart(&path, &cfg, &mut s), None);
    assert_eq!(anim.state(), AnimState::FullView);
    assert_eq!(anim.pending(), None);
    assert_eq!(s.segments(), 9);
    assert_eq!(s.discs(), 0);

    // The chain started before full view is dead.
    assert_eq!(anim.tick(old, &path, &cfg, &mut s), TickOutcome::Stale);
}

#[test]
fn empty_path_finishes_on_first_frame() {
    let path = ThetaRhoPath::default();
    let cfg = config(1);
    let mut s = RecordingSurface::new(64, 64);
    let mut anim = Animator::new();

    assert_eq!(anim.restart(&path, &cfg, &mut s), None);
    assert_eq!(anim.state(), AnimState::Idle);
    assert_eq!(anim.frames_drawn(), 1);
    assert_eq!(anim.cursor(), 0);
    assert_eq!(s.discs(), 0);
}

#[test]
fn interrupt_always_ends_idle() {
    let path = line_path(5);
    let mut s = RecordingSurface::new(64, 64);
    let mut anim = Animator::new();

    let full = RenderConfig {
        full_view: true,
        ..config(1)
    };
    anim.restart(&path, &full, &mut s);
    assert_eq!(anim.state(), AnimState::FullView);
    anim.stop();
    assert_eq!(anim.state(), AnimState::FullView);
    anim.interrupt();
    assert_eq!(anim.state(), AnimState::Idle);

    let Some(handle) = anim.restart(&path, &config(1), &mut s) else {
        panic!("expected a pending tick");
    };
    anim.interrupt();
    assert_eq!(anim.state(), AnimState::Idle);
    assert_eq!(anim.tick(handle, &path, &config(1), &mut s), TickOutcome::Stale);
}
