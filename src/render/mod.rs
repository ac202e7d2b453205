pub(crate) mod cpu;
pub(crate) mod surface;
pub(crate) mod trace;

#[cfg(test)]
#[path = "../../tests/unit/render/recording.rs"]
pub(crate) mod recording;
