//! rhotrace traces theta-rho (polar) paths as an animation.
//!
//! A path file holds one `theta rho` pair per line. Samples are projected onto a square canvas
//! and connected by straight segments, optionally colour-cycled along the path, while a marker
//! follows the drawing cursor:
//!
//! - Parse text into a [`ThetaRhoPath`] ([`parse_coordinates`], [`read_path_file`])
//! - Create a [`Session`] over a [`Surface`] (usually [`CpuSurface`])
//! - Advance it with [`Session::next_frame`], or stream it into a [`FrameSink`] with
//!   [`Session::play`]
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod config;
/// Frame sinks (PNG sequences, MP4 via `ffmpeg`, in-memory).
pub mod encode;
pub(crate) mod path;
pub(crate) mod render;
pub(crate) mod session;

pub use crate::foundation::core::{Canvas, Point, Rect, Rgba8};
pub use crate::foundation::error::{TraceError, TraceResult};

pub use crate::animation::driver::{AnimState, Animator, TickHandle, TickOutcome};
pub use crate::config::render_config::RenderConfig;
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, ensure_parent_dir, is_ffmpeg_on_path};
pub use crate::encode::png::{PngSequenceSink, save_png};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::path::model::{PolarSample, ThetaRhoPath};
pub use crate::path::parse::{parse_coordinates, read_path_file};
pub use crate::path::project::{ScreenMapping, project};
pub use crate::render::cpu::CpuSurface;
pub use crate::render::surface::{FrameRGBA, Readback, SegmentPaint, Surface};
pub use crate::render::trace::{RenderStats, draw_marker, render_full, render_range};
pub use crate::session::trace_session::{PlaybackOpts, PlaybackStats, Session};
