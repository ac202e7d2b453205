//! Frame sinks.
//!
//! Sinks consume rendered animation frames in drawing order; [`crate::Session::play`] drives them.

/// `ffmpeg`-based MP4 output via the system `ffmpeg` binary.
pub mod ffmpeg;
/// PNG sequence output.
pub mod png;
/// Sink trait and the in-memory sink.
pub mod sink;
