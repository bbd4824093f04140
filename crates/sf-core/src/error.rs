//! Error types for SoundField configuration

use thiserror::Error;

/// Configuration error types
///
/// All of these are caller mistakes and are reported at setup time, before
/// any renderer is constructed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Ambisonic order outside the supported range
    #[error("Invalid ambisonic order: {0} (supported: 1-3)")]
    InvalidAmbisonicOrder(usize),

    /// Channel map shorter than a first-order stream
    #[error("Channel map too short: {got} entries (first-order ambisonics needs 4)")]
    ChannelMapTooShort { got: usize },

    /// Same input channel assigned to two ambisonic channels
    #[error("Duplicate channel index {index} in channel map")]
    DuplicateChannelIndex { index: usize },

    /// Channel map length does not match the requested order
    #[error("Channel map has {got} entries, order {order} expects {expected}")]
    ChannelCountMismatch {
        got: usize,
        expected: usize,
        order: usize,
    },
}

/// Result type for configuration handling
pub type ConfigResult<T> = Result<T, ConfigError>;
