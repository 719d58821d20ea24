use std::fmt;

/// Errors raised while loading site.toml; rendering itself cannot fail
#[derive(Debug)]
pub enum Error {
    /// site.toml is not valid TOML, or a field breaks a route/origin/theme rule
    ConfigParse(String),
    IoError(std::io::Error),
    /// A value rejected by a type constructor (`SiteUrl::parse`, `Priority::parse`, ...)
    InvalidData(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ConfigParse(msg) => write!(f, "Invalid site.toml: {}", msg),
            Error::IoError(err) => write!(f, "Failed to read site files: {}", err),
            Error::InvalidData(msg) => write!(f, "Rejected value: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::ConfigParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
