use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;

#[derive(Debug)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        json_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            1..=99 => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            // token denials share one body so a link visitor learns nothing
            // beyond the link being unusable
            200..=299 => (StatusCode::UNAUTHORIZED, "link expired or invalid"),
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: 101,
        message: "invalid input".into(),
    }
}

pub fn malformed_token_error() -> Error {
    Error {
        code: 200,
        message: "malformed token".into(),
    }
}

pub fn invalid_signature_error() -> Error {
    Error {
        code: 201,
        message: "invalid signature".into(),
    }
}

pub fn expired_token_error() -> Error {
    Error {
        code: 202,
        message: "token expired".into(),
    }
}

pub fn unauthorized_error() -> Error {
    Error {
        code: 203,
        message: "unauthorized".into(),
    }
}

pub fn env_var_error(_: env::VarError) -> Error {
    Error {
        code: 1,
        message: "environment variable error".into(),
    }
}

pub fn json_error(_: serde_json::Error) -> Error {
    Error {
        code: 2,
        message: "serialization error".into(),
    }
}

pub fn unexpected_error() -> Error {
    Error {
        code: 5,
        message: "unexpected error".into(),
    }
}
