use super::*;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::Canvas;
use crate::render::recording::RecordingSurface;

const SQUARE: &str = "# four corners\n0 1\n1.5707963 1\n3.1415926 1\n4.712389 1\n";

fn config() -> RenderConfig {
    RenderConfig {
        canvas: Canvas {
            width: 32,
            height: 32,
        },
        ..RenderConfig::default()
    }
}

fn session() -> Session<RecordingSurface> {
    Session::new(config(), RecordingSurface::new(32, 32)).unwrap()
}

fn scratch_file(tag: &str, contents: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!(
        "rhotrace_session_{tag}_{}.thr",
        std::process::id()
    ));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn new_session_is_idle_and_draws_nothing() {
    let s = session();
    assert_eq!(s.state(), AnimState::Idle);
    assert!(s.path().is_empty());
    assert!(s.surface().calls.is_empty());
}

#[test]
fn new_rejects_invalid_config_and_mismatched_surface() {
    let bad = RenderConfig {
        step: 0,
        ..config()
    };
    assert!(Session::new(bad, RecordingSurface::new(32, 32)).is_err());

    let err = Session::new(config(), RecordingSurface::new(16, 32)).unwrap_err();
    assert!(matches!(err, TraceError::Validation(_)));
}

#[test]
fn load_text_replaces_path_and_starts_animation() {
    let mut s = session();
    assert_eq!(s.load_text(SQUARE), 4);
    assert_eq!(s.state(), AnimState::Running);
    assert_eq!(s.cursor(), 1);
    assert_eq!(s.surface().discs(), 1);

    assert_eq!(s.load_text("0 0\n1 1\n"), 2);
    assert_eq!(s.path().len(), 2);
    assert_eq!(s.cursor(), 1);
}

#[test]
fn next_frame_runs_until_exhausted() {
    let mut s = session();
    s.load_text(SQUARE);
    let mut frames = 1;
    while s.next_frame() {
        frames += 1;
    }
    assert_eq!(frames, 5);
    assert_eq!(s.state(), AnimState::Idle);
    assert_eq!(s.cursor(), 4);
    assert!(!s.next_frame());
}

#[test]
fn stop_halts_ticking() {
    let mut s = session();
    s.load_text(SQUARE);
    s.stop();
    assert_eq!(s.state(), AnimState::Idle);
    s.surface_mut().reset();
    assert!(!s.next_frame());
    assert!(s.surface().calls.is_empty());
}

#[test]
fn full_view_toggle_draws_whole_path_and_cancels_ticks() {
    let mut s = session();
    s.load_text(SQUARE);
    s.surface_mut().reset();

    s.set_full_view(true);
    assert!(s.config().full_view);
    assert_eq!(s.state(), AnimState::FullView);
    assert_eq!(s.surface().segments(), 3);
    assert_eq!(s.surface().discs(), 0);
    assert!(!s.next_frame());

    s.set_full_view(false);
    assert_eq!(s.state(), AnimState::Running);
    assert_eq!(s.cursor(), 1);
}

#[test]
fn rainbow_toggle_restarts_from_zero() {
    let mut s = session();
    s.load_text(SQUARE);
    s.next_frame();
    s.next_frame();
    assert_eq!(s.cursor(), 3);

    s.set_rainbow(false);
    assert!(!s.config().rainbow);
    assert_eq!(s.cursor(), 1);
}

#[test]
fn load_file_reads_and_restarts() {
    let file = scratch_file("ok", SQUARE);
    let mut s = session();
    assert_eq!(s.load_file(&file).unwrap(), 4);
    assert_eq!(s.state(), AnimState::Running);
    let _ = std::fs::remove_file(&file);
}

#[test]
fn failed_load_keeps_current_path() {
    let mut s = session();
    s.load_text(SQUARE);
    let err = s
        .load_file(Path::new("/definitely/not/here.thr"))
        .unwrap_err();
    assert!(matches!(err, TraceError::Input(_)));
    assert_eq!(s.path().len(), 4);
    assert_eq!(s.state(), AnimState::Running);
}

#[test]
fn empty_selection_is_a_no_op() {
    let mut s = session();
    s.load_text(SQUARE);
    s.next_frame();
    let cursor = s.cursor();
    s.surface_mut().reset();

    assert!(!s.load_selection(None).unwrap());
    assert_eq!(s.cursor(), cursor);
    assert_eq!(s.path().len(), 4);
    assert!(s.surface().calls.is_empty());

    let file = scratch_file("selection", "0 0\n");
    assert!(s.load_selection(Some(&file)).unwrap());
    assert_eq!(s.path().len(), 1);
    let _ = std::fs::remove_file(&file);
}

#[test]
fn draw_at_renders_history_and_marker() {
    let mut s = session();
    s.load_text(SQUARE);
    s.surface_mut().reset();

    let stats = s.draw_at(2);
    assert_eq!(stats.segments, 2);
    assert_eq!(s.surface().discs(), 1);
    assert_eq!(s.state(), AnimState::Idle);
    assert!(!s.next_frame());
}

#[test]
fn play_pushes_every_frame_by_default() {
    let mut s = session();
    s.load_text(SQUARE);
    let mut sink = InMemorySink::new();
    let stats = s.play(&mut sink, PlaybackOpts::default()).unwrap();

    assert_eq!(stats.frames_drawn, 5);
    assert_eq!(stats.frames_pushed, 5);
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| *i).collect();
    assert_eq!(idx, vec![0, 1, 2, 3, 4]);
    assert_eq!(
        sink.config(),
        Some(SinkConfig {
            width: 32,
            height: 32,
            fps: 60
        })
    );
    assert!(sink.is_ended());
    assert_eq!(s.surface().readbacks, 5);
}

#[test]
fn play_with_every_skips_but_keeps_last_frame() {
    let mut s = session();
    s.load_text(SQUARE);
    let mut sink = InMemorySink::new();
    let stats = s
        .play(&mut sink, PlaybackOpts { every: 3, fps: 24 })
        .unwrap();

    assert_eq!(stats.frames_drawn, 5);
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| *i).collect();
    assert_eq!(idx, vec![0, 3, 4]);
    assert_eq!(stats.frames_pushed, 3);
}

#[test]
fn play_in_full_view_pushes_one_frame() {
    let mut s = session();
    s.load_text(SQUARE);
    s.set_full_view(true);
    let mut sink = InMemorySink::new();
    let stats = s.play(&mut sink, PlaybackOpts::default()).unwrap();
    assert_eq!(stats.frames_drawn, 1);
    assert_eq!(stats.frames_pushed, 1);
}

#[test]
fn play_rejects_zero_every() {
    let mut s = session();
    let mut sink = InMemorySink::new();
    assert!(
        s.play(
            &mut sink,
            PlaybackOpts {
                every: 0,
                fps: 30
            }
        )
        .is_err()
    );
    assert!(sink.config().is_none());
}

#[test]
fn draw_at_leaves_full_view() {
    let mut s = session();
    s.load_text(SQUARE);
    s.set_full_view(true);
    assert_eq!(s.state(), AnimState::FullView);
    s.surface_mut().reset();

    s.draw_at(1);
    assert_eq!(s.state(), AnimState::Idle);
    assert_eq!(s.surface().segments(), 1);
    assert_eq!(s.surface().discs(), 1);
    // The view option itself is untouched; a restart returns to full view.
    assert!(s.config().full_view);
    s.restart();
    assert_eq!(s.state(), AnimState::FullView);
}
