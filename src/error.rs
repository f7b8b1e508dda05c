use thiserror::Error;

use crate::core::BodyId;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the simulation core and scenario loading.
///
/// Arguments are validated before any state is touched, so an `Err` never
/// leaves a `World`, `HistoryRecorder` or `Simulation` half-updated.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid caller-supplied value (mass, step count, threshold, histogram range, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A body handle that does not belong to the world or recorder it was used with.
    #[error("unknown body {0}")]
    UnknownBody(BodyId),

    /// `track` was called twice for the same body.
    #[error("body {0} is already tracked")]
    AlreadyTracked(BodyId),

    /// I/O while reading a scenario or writing an export.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Malformed scenario YAML.
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// History export serialization.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_mass_reports_the_value() {
        let e = crate::core::Body::new(-2.5, 0.0, 0.0).unwrap_err();
        assert!(matches!(e, Error::InvalidArgument(_)));
        assert_eq!(e.to_string(), "invalid argument: mass must be finite and > 0, got -2.5");
    }

    #[test]
    fn scenario_errors_carry_the_body_label() {
        let mut cfg = crate::config::ScenarioConfig::reference();
        cfg.bodies[10].mass = 0.0;
        let msg = cfg.validate().unwrap_err().to_string();
        assert!(msg.starts_with("invalid argument: bodies[10] (wall1):"), "got {msg}");
    }

    #[test]
    fn body_errors_name_the_body() {
        let msg = Error::UnknownBody(BodyId::from_index(7)).to_string();
        assert!(msg.contains('7'), "got {msg}");
        let msg = Error::AlreadyTracked(BodyId::from_index(2)).to_string();
        assert!(msg.contains("already tracked"));
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.yaml");
        let e: Error = io.into();
        assert!(matches!(e, Error::Io(_)));
    }
}
