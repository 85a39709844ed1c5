//! Tab error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Could not read open tabs: {0}")]
    Source(String),

    #[error("Could not open tabs: {0}")]
    Launch(String),
}
