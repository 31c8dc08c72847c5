use rocket::http::Status;
use rocket::response::Responder;
use rocket::serde::json::Json;
use rocket::Response;
use serde::Serialize;

/// The success half of the JSON envelope:
/// `{"status":"success","statusCode":N,"message":M,"data":D}`.
#[derive(Serialize)]
struct EnvelopeContent<T: Serialize> {
    status: &'static str,
    #[serde(rename = "statusCode")]
    status_code: u16,
    message: String,
    data: T,
}

pub struct Envelope<T> {
    status: Status,
    message: String,
    data: T,
}

impl<T> Envelope<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Envelope<T> {
        Envelope {
            status: Status::Ok,
            message: message.into(),
            data,
        }
    }

    pub fn created(message: impl Into<String>, data: T) -> Envelope<T> {
        Envelope {
            status: Status::Created,
            message: message.into(),
            data,
        }
    }
}

impl<'r, T: Serialize> Responder<'r, 'static> for Envelope<T> {
    fn respond_to(self, request: &'r rocket::Request<'_>) -> rocket::response::Result<'static> {
        let status = self.status;
        let content = EnvelopeContent {
            status: "success",
            status_code: status.code,
            message: self.message,
            data: self.data,
        };
        Response::build_from(Json(content).respond_to(request)?)
            .status(status)
            .ok()
    }
}

#[test]
fn success_envelope_shape() {
    let content = EnvelopeContent {
        status: "success",
        status_code: 200,
        message: "Cities fetched.".to_string(),
        data: vec!["Bled", "Piran"],
    };
    let json = serde_json::to_value(&content).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "status": "success",
            "statusCode": 200,
            "message": "Cities fetched.",
            "data": ["Bled", "Piran"],
        })
    );
}

#[test]
fn null_data_serializes_as_null() {
    let content = EnvelopeContent::<Option<()>> {
        status: "success",
        status_code: 200,
        message: "All location mappings cleared.".to_string(),
        data: None,
    };
    let json = serde_json::to_value(&content).unwrap();
    assert!(json["data"].is_null());
}
