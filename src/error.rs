//! Startup errors
//!
//! Nothing fails once the scene is running; these only surface while the
//! host is acquiring its canvas and building the initial scene.

use std::fmt;

/// Invalid scene configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Config file could not be read
    Read(String),
    /// JSON could not be parsed
    Parse(String),
    /// A size or coordinate was not a finite number
    NotFinite(&'static str),
    /// A size that must be positive was zero or negative
    NotPositive(&'static str),
    /// The arrow must travel leftward to ever leave the surface
    NonNegativeVelocity,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read(msg) => write!(f, "cannot read scene config: {msg}"),
            ConfigError::Parse(msg) => write!(f, "invalid scene config: {msg}"),
            ConfigError::NotFinite(field) => write!(f, "config field `{field}` must be finite"),
            ConfigError::NotPositive(field) => {
                write!(f, "config field `{field}` must be greater than zero")
            }
            ConfigError::NonNegativeVelocity => write!(f, "arrow velocity must be negative"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Fatal error while setting up the drawing surface or the scene
#[derive(Debug)]
pub enum StartupError {
    Config(ConfigError),
    /// Surface cannot fit the disc vertically
    SurfaceTooSmall { width: u32, height: u32, min_height: f32 },
    /// A required DOM element is missing or has the wrong type
    MissingElement(&'static str),
    /// No GPU adapter / surface could be acquired
    Gpu(String),
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::Config(e) => write!(f, "{e}"),
            StartupError::SurfaceTooSmall {
                width,
                height,
                min_height,
            } => write!(
                f,
                "drawing surface {width}x{height} is too small: need a height of at least {min_height}"
            ),
            StartupError::MissingElement(id) => write!(f, "missing page element `{id}`"),
            StartupError::Gpu(msg) => write!(f, "failed to acquire drawing surface: {msg}"),
        }
    }
}

impl std::error::Error for StartupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StartupError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for StartupError {
    fn from(e: ConfigError) -> Self {
        StartupError::Config(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages() {
        let read = ConfigError::Read("scene.json: No such file or directory".into());
        assert_eq!(
            read.to_string(),
            "cannot read scene config: scene.json: No such file or directory"
        );
        assert_eq!(
            ConfigError::NonNegativeVelocity.to_string(),
            "arrow velocity must be negative"
        );

        let startup = StartupError::from(read.clone());
        assert_eq!(startup.to_string(), read.to_string());
        assert!(std::error::Error::source(&startup).is_some());
    }
}
