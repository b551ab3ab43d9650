//! Crate-level error types.

use std::fmt;

use crate::camera::ProjectionKind;

/// Errors produced by the trackball crate.
#[derive(Debug)]
pub enum TrackballError {
    /// The camera projection no longer matches the kind the controller was
    /// built for.
    UnsupportedProjection {
        /// Projection kind captured at construction.
        expected: ProjectionKind,
        /// Projection kind found on the camera during `update()`.
        found: ProjectionKind,
    },
    /// The display surface the controller listens on is missing.
    MissingSurface(String),
    /// The host refused to register an input listener.
    Subscribe(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for TrackballError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedProjection { expected, found } => write!(
                f,
                "unsupported camera projection: controller built for \
                 {expected}, camera is {found}"
            ),
            Self::MissingSurface(msg) => {
                write!(f, "missing display surface: {msg}")
            }
            Self::Subscribe(msg) => {
                write!(f, "failed to register input listener: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for TrackballError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TrackballError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_projection_names_both_kinds() {
        let err = TrackballError::UnsupportedProjection {
            expected: ProjectionKind::Perspective,
            found: ProjectionKind::Orthographic,
        };
        let msg = err.to_string();
        assert!(msg.contains("perspective"));
        assert!(msg.contains("orthographic"));
    }

    #[test]
    fn io_error_is_the_source() {
        let err: TrackballError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(std::error::Error::source(&err).is_some());
    }
}
