use std::time::Duration;

pub const DEFAULT_RATE_MS: u64 = 250;

/// Runtime settings, taken from the command line only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Show one bar for all cores combined.
    pub aggregate: bool,
    /// First core shown.
    pub start_cpu: usize,
    pub log_scale: bool,
    /// Time between samples.
    pub rate: Duration,
    /// Stop sampling while the screen is idle.
    pub sleep_when_idle: bool,
    /// Draw as a decorated window instead of a bare dock tile.
    pub window_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            aggregate: false,
            start_cpu: 0,
            log_scale: false,
            rate: Duration::from_millis(DEFAULT_RATE_MS),
            sleep_when_idle: false,
            window_mode: false,
        }
    }
}
