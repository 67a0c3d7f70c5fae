use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::coding::CodingError;
use crate::workflows::denial::StatsError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Coding(CodingError),
    Stats(StatsError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Coding(err) => write!(f, "coding error: {}", err),
            AppError::Stats(err) => write!(f, "payer stats error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Coding(err) => Some(err),
            AppError::Stats(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Coding(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Stats(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<CodingError> for AppError {
    fn from(value: CodingError) -> Self {
        Self::Coding(value)
    }
}

impl From<StatsError> for AppError {
    fn from(value: StatsError) -> Self {
        Self::Stats(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coding_errors_map_to_unprocessable_entity() {
        let error = AppError::from(CodingError::InvalidDateFormat {
            field: "dos".to_string(),
            value: "08/26/2025".to_string(),
        });
        assert_eq!(
            error.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn stats_errors_map_to_bad_request() {
        let error = AppError::from(StatsError::InvalidBump {
            payer: "MC".to_string(),
            bump: 1.5,
        });
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn config_errors_are_internal() {
        let error = AppError::from(ConfigError::InvalidPort);
        assert!(error.to_string().starts_with("configuration error"));
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
