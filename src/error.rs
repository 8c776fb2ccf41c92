use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("logger already initialised: {0}")]
    Logger(#[from] log::SetLoggerError),
    #[error("bad level layout: {0}")]
    Layout(String),
}

pub type Result<T> = std::result::Result<T, Error>;
