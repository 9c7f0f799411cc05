use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Configuration error: {0}")]
    Config(#[from] eyre::Report),
}

impl SlotError {
    /// Whether the error belongs to the transport/parse class that is shown
    /// to the user only as a generic failure message.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, SlotError::Transport(_) | SlotError::Decode(_))
    }
}

pub type SlotResult<T> = Result<T, SlotError>;
