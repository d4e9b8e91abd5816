use crate::errors::ServiceError;
use axum::{
    body::Bytes,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};

/// Standard success response
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// Standard created response
pub fn created_response<T: Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(data)).into_response()
}

/// A request body that has been parsed into a JSON object.
///
/// Fields are checked one at a time so that the first problem found is the
/// one reported: presence, then type, then (for strings) non-emptiness.
#[derive(Debug, Clone)]
pub struct JsonObject(Map<String, Value>);

impl JsonObject {
    /// Parses raw body bytes regardless of the declared content type.
    pub fn parse(body: &Bytes) -> Result<Self, ServiceError> {
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            _ => Err(ServiceError::validation(
                "Request body must be a JSON object",
            )),
        }
    }

    fn field(&self, name: &str) -> Result<&Value, ServiceError> {
        match self.0.get(name) {
            Some(Value::Null) | None => Err(ServiceError::validation(format!(
                "Missing required field: {name}"
            ))),
            Some(value) => Ok(value),
        }
    }

    /// A string field that is non-empty after trimming
    pub fn required_string(&self, name: &str) -> Result<String, ServiceError> {
        let value = self.field(name)?.as_str().ok_or_else(|| {
            ServiceError::validation(format!("Field '{name}' must be a string"))
        })?;
        if value.trim().is_empty() {
            return Err(ServiceError::validation(format!(
                "Field '{name}' must not be empty"
            )));
        }
        Ok(value.to_string())
    }

    pub fn required_bool(&self, name: &str) -> Result<bool, ServiceError> {
        self.field(name)?.as_bool().ok_or_else(|| {
            ServiceError::validation(format!("Field '{name}' must be a boolean"))
        })
    }

    pub fn required_i32(&self, name: &str) -> Result<i32, ServiceError> {
        self.field(name)?
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| ServiceError::validation(format!("Field '{name}' must be an integer")))
    }
}

/// Request types that can be built from an untyped JSON body
pub trait FromJsonObject: Sized {
    fn from_json_object(body: &JsonObject) -> Result<Self, ServiceError>;

    fn from_body(body: &Bytes) -> Result<Self, ServiceError> {
        Self::from_json_object(&JsonObject::parse(body)?)
    }
}
