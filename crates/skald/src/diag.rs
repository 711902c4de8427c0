//! Diagnostics: logging setup and per-frame counters.

/// Initialize stderr logging via env_logger.
///
/// Respects `RUST_LOG`; defaults to `info` so scene transitions and skipped
/// entities show up without configuration. Safe to call more than once — a
/// second init is ignored.
pub fn init_logger() {
    let _ = env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init();
}

/// Per-frame counters, updated by the render and button phases.
#[cfg(feature = "diagnostics")]
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameStats {
    /// Draw commands executed last frame.
    pub draw_calls: u32,
    /// Alive entities at the end of collection.
    pub entities: u32,
    /// Button callbacks fired last frame.
    pub button_events: u32,
}
