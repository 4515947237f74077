// Copyright @yucwang 2026

//! Error types for the render front end. The estimator itself never fails.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PavlovaError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Image write error: {0}")]
    ImageWrite(#[from] exr::error::Error),
}

pub type Result<T> = std::result::Result<T, PavlovaError>;
