// SPDX-License-Identifier: MPL-2.0
//! Crate-wide error type.
//!
//! Presentation-state bookkeeping never fails: unknown identifiers are
//! no-ops and a full message queue evicts its oldest entry. The only error
//! that reaches callers from the overlay registry or the message queue is
//! [`Error::RenderSurfaceUnavailable`]. Configuration and I/O errors come
//! from the settings layer.

use thiserror::Error as ThisError;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("configuration error: {0}")]
    Config(String),

    /// The render surface could not create or attach an element.
    #[error("render surface unavailable: {reason}")]
    RenderSurfaceUnavailable { reason: String },
}

/// Failure classes of the presentation layer.
///
/// Only [`ErrorKind::RenderSurfaceUnavailable`] is ever surfaced as an
/// [`Error`]; the other two are resolved where they occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An operation referenced an id that is not registered. Swallowed.
    UnknownIdentifier,
    /// The message queue is full. Resolved by evicting the oldest message.
    CapacityExceeded,
    /// The render target is missing or refused an element. Propagated.
    RenderSurfaceUnavailable,
    /// Settings could not be read or written.
    Settings,
}

impl Error {
    /// Builds a render-surface error from any displayable reason.
    pub fn surface(reason: impl Into<String>) -> Self {
        Error::RenderSurfaceUnavailable {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_) | Error::Config(_) => ErrorKind::Settings,
            Error::RenderSurfaceUnavailable { .. } => ErrorKind::RenderSurfaceUnavailable,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn io_error_converts_to_error_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();
        match err {
            Error::Io(message) => assert!(message.contains("missing")),
            other => panic!("expected Io variant, got {other:?}"),
        }
    }

    #[test]
    fn toml_error_converts_to_config_error() {
        let parse_err = toml::from_str::<toml::Value>("not = valid = toml").unwrap_err();
        let err: Error = parse_err.into();
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(err.kind(), ErrorKind::Settings);
    }

    #[test]
    fn surface_error_reports_its_kind_and_reason() {
        let err = Error::surface("document body detached");
        assert_eq!(err.kind(), ErrorKind::RenderSurfaceUnavailable);
        assert_eq!(
            err.to_string(),
            "render surface unavailable: document body detached"
        );
    }
}
