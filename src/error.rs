use diesel::result::Error as DieselError;
use rocket::http::Status;
use serde::Serialize;
use std::error::Error;
use std::fmt::Display;

/// The error half of the JSON envelope:
/// `{"status":"error","statusCode":N,"message":M,"error":detail?}`.
#[derive(Debug)]
pub struct APIError {
    status: Status,
    message: String,
    detail: Option<String>,
}

impl APIError {
    pub fn new(status: Status, message: String) -> Self {
        APIError {
            status,
            message,
            detail: None,
        }
    }

    pub fn with_detail(status: Status, message: String, detail: String) -> Self {
        APIError {
            status,
            message,
            detail: Some(detail),
        }
    }

    pub fn bad_request(message: String) -> Self {
        APIError::new(Status::BadRequest, message)
    }

    pub fn not_found(message: String) -> Self {
        APIError::new(Status::NotFound, message)
    }

    pub fn unauthorized() -> Self {
        APIError::new(Status::Unauthorized, "Not authorized.".into())
    }
}

impl Default for APIError {
    fn default() -> Self {
        Self {
            status: Status::InternalServerError,
            message: "Something went wrong processing this request.".into(),
            detail: None,
        }
    }
}

impl Display for APIError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("APIError")
            .field("statusCode", &self.status.code)
            .field("message", &self.message)
            .field("error", &self.detail)
            .finish()
    }
}

impl Serialize for APIError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let fields = if self.detail.is_some() { 4 } else { 3 };
        let mut envelope = serializer.serialize_struct("APIError", fields)?;
        envelope.serialize_field("status", "error")?;
        envelope.serialize_field("statusCode", &self.status.code)?;
        envelope.serialize_field("message", &self.message)?;
        if let Some(detail) = &self.detail {
            envelope.serialize_field("error", detail)?;
        }
        envelope.end()
    }
}

impl Error for APIError {}

impl<'r> rocket::response::Responder<'r, 'static> for APIError {
    fn respond_to(self, request: &'r rocket::Request<'_>) -> rocket::response::Result<'static> {
        let status = self.status;
        rocket::Response::build_from(rocket::serde::json::Json(self).respond_to(request)?)
            .status(status)
            .ok()
    }
}

impl From<DieselError> for APIError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => APIError::new(
                Status::NotFound,
                "Something went wrong processing this request.".into(),
            ),
            other => APIError::with_detail(
                Status::InternalServerError,
                "Database error.".into(),
                other.to_string(),
            ),
        }
    }
}

impl From<anyhow::Error> for APIError {
    fn from(err: anyhow::Error) -> Self {
        APIError::with_detail(
            Status::InternalServerError,
            "Upstream request failed.".into(),
            err.to_string(),
        )
    }
}

#[test]
fn error_envelope_shape() {
    let err = APIError::bad_request("Missing required parameter \"q\".".into());
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "status": "error",
            "statusCode": 400,
            "message": "Missing required parameter \"q\".",
        })
    );
}

#[test]
fn error_envelope_carries_detail() {
    let err = APIError::with_detail(
        Status::InternalServerError,
        "Upstream request failed.".into(),
        "connection refused".into(),
    );
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["statusCode"], 500);
    assert_eq!(json["error"], "connection refused");
}
