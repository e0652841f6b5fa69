use std::fmt;

#[derive(Debug)]
pub enum LpmError {
    ConfigLoad(String),
    Sync(String),
    NotFound(String),
    Download(String, String),
    InstallApply(String, String),
    Build(String),
    Registry(String),
    InvalidSetting(String, String),
    Io(String),
}

impl LpmError {
    /// Short machine-friendly name of the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ConfigLoad(_) => "ConfigLoadError",
            Self::Sync(_) => "SyncError",
            Self::NotFound(_) => "NotFound",
            Self::Download(..) => "DownloadError",
            Self::InstallApply(..) => "InstallApplyError",
            Self::Build(_) => "BuildError",
            Self::Registry(_) => "RegistryError",
            Self::InvalidSetting(..) => "InvalidSetting",
            Self::Io(_) => "IoError",
        }
    }
}

impl fmt::Display for LpmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigLoad(msg) => {
                write!(f, "Cannot load config: {msg}")
            }
            Self::Sync(msg) => {
                write!(f, "Failed to synchronize package index: {msg}")
            }
            Self::NotFound(name) => {
                write!(f, "Package '{name}' not found in the index")
            }
            Self::Download(name, reason) => {
                write!(f, "Failed to download '{name}': {reason}")
            }
            Self::InstallApply(name, reason) => {
                write!(f, "Failed to install '{name}': {reason}")
            }
            Self::Build(msg) => {
                write!(f, "Build error: {msg}")
            }
            Self::Registry(msg) => {
                write!(f, "Local registry error: {msg}")
            }
            Self::InvalidSetting(key, reason) => {
                write!(f, "Invalid setting '{key}': {reason}")
            }
            Self::Io(msg) => {
                write!(f, "IO error: {msg}")
            }
        }
    }
}

impl std::error::Error for LpmError {}

impl From<std::io::Error> for LpmError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LpmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_package() {
        let err = LpmError::NotFound("hello".to_string());
        assert_eq!(err.to_string(), "Package 'hello' not found in the index");
        assert_eq!(err.kind(), "NotFound");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: LpmError = io.into();
        assert!(matches!(err, LpmError::Io(ref msg) if msg == "denied"));
    }
}
