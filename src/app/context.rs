use crate::config::SnapsConfig;

/// Per-invocation context shared by subcommand handlers.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub cfg: SnapsConfig,
    pub verbosity: u8,
}

impl AppContext {
    #[must_use]
    pub const fn new(cfg: SnapsConfig, verbosity: u8) -> Self {
        Self { cfg, verbosity }
    }

    /// Convenience constructor loading executable overrides from the
    /// environment.
    #[must_use]
    pub fn from_env(verbosity: u8) -> Self {
        Self::new(SnapsConfig::load(), verbosity)
    }
}
