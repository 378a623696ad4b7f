use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum GeoCsvError {
    #[error("Configuration error: {msg}")]
    ConfigError { msg: String },
    #[error("Json error: {msg}")]
    Json { msg: String },
    #[error("Feature collection was rejected by sink: {msg}")]
    Sink { msg: String },
}

impl GeoCsvError {
    pub fn config<T: Into<String>>(msg: T) -> Self {
        GeoCsvError::ConfigError { msg: msg.into() }
    }
}

#[cfg(feature = "jsonconf")]
impl From<serde_json::Error> for GeoCsvError {
    fn from(e: serde_json::Error) -> Self {
        GeoCsvError::Json { msg: e.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, GeoCsvError>;
