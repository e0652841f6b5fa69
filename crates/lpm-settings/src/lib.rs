pub mod config;
pub mod folders;

pub use config::Config;
pub use folders::Folders;

/// Configuration and folder layout for a single lpm invocation.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: Config,
    pub folders: Folders,
}

impl Context {
    #[must_use]
    pub const fn new(config: Config, folders: Folders) -> Self {
        Self { config, folders }
    }

    #[must_use]
    pub const fn debug(&self) -> bool {
        self.config.debug_mode
    }
}
