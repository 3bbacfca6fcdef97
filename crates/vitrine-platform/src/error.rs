use thiserror::Error;
use vitrine_layout::LayoutError;
use vitrine_ui::PaintError;

#[derive(Error, Debug)]
pub enum HostError {
    #[error("Layout source failed: {0}")]
    Fetch(String),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Paint(#[from] PaintError),

    #[error("Receiving side is gone")]
    Closed,
}
