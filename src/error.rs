use thiserror::Error;

#[derive(Debug, Error)]
pub enum SlicemateError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Engine error: {0}")]
    Engine(String),

    #[error("Engine timed out after {0} ms")]
    Timeout(u64),
}

impl From<SlicemateError> for String {
    fn from(err: SlicemateError) -> Self {
        err.to_string()
    }
}
