//! Error types for decorative chart rendering

use thiserror::Error;

/// Result type alias for chart operations
pub type Result<T> = std::result::Result<T, ChartError>;

/// Errors that can occur while loading pages, rendering or committing charts
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Invalid page manifest: {message}")]
    InvalidPage { message: String },

    #[error("Chart rendering failed: {message}")]
    RenderingError { message: String },

    #[error("File I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Image processing error: {message}")]
    ImageError { message: String },

    #[error("Invalid color {value:?}: {message}")]
    InvalidColor { value: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

#[cfg(feature = "png-export")]
impl From<image::ImageError> for ChartError {
    fn from(err: image::ImageError) -> Self {
        ChartError::ImageError {
            message: err.to_string(),
        }
    }
}

impl<T: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<T>>
    for ChartError
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        ChartError::RenderingError {
            message: format!("Drawing area error: {}", err),
        }
    }
}

impl From<config::ConfigError> for ChartError {
    fn from(err: config::ConfigError) -> Self {
        ChartError::ConfigError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ChartError {
    fn from(err: serde_json::Error) -> Self {
        ChartError::InvalidPage {
            message: err.to_string(),
        }
    }
}
