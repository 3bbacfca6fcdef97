use thiserror::Error;

/// Failures of an outbound event forward. Never shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Event channel is closed")]
    Closed,
}

#[derive(Error, Debug)]
pub enum PaintError {
    #[error("Layout computation failed: {0:?}")]
    Layout(taffy::TaffyError),
}

impl From<taffy::TaffyError> for PaintError {
    fn from(e: taffy::TaffyError) -> Self {
        PaintError::Layout(e)
    }
}
