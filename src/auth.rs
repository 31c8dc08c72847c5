use crate::error::APIError;
use chrono::Utc;
use jsonwebtoken::errors::Result;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome, Request};
use serde::{Deserialize, Serialize};

pub const COOKIE_SESSION_TOKEN: &str = "session_token";

#[derive(Clone, Copy)]
pub struct AdminUser;

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AdminUser {
    type Error = APIError;
    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let jwt_secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");

        let jwt = match req.cookies().get(COOKIE_SESSION_TOKEN) {
            Some(jwt) => jwt.value(),
            None => return Outcome::Forward(Status::Unauthorized),
        };

        match decode::<Claims>(
            jwt,
            &DecodingKey::from_secret(jwt_secret.as_bytes()),
            &Validation::new(Algorithm::HS512),
        ) {
            Ok(decoded_jwt) => {
                if decoded_jwt.claims.role == Role::Admin {
                    Outcome::Success(AdminUser)
                } else {
                    // Not enough permission
                    Outcome::Forward(Status::Unauthorized)
                }
            }
            Err(_) => Outcome::Forward(Status::Unauthorized),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct Claims {
    pub role: Role,
    pub exp: i64,
}

#[derive(Eq, PartialEq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Default,
}

#[derive(Deserialize)]
pub struct LoginInfo<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub access_token: String,
}

pub fn create_jwt(role: Role) -> Result<String> {
    let jwt_secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");

    let exp = Utc::now()
        .checked_add_signed(chrono::Duration::minutes(90))
        .expect("valid timestamp")
        .timestamp();

    let claims = Claims { role, exp };

    let header = Header::new(Algorithm::HS512);

    encode(
        &header,
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
}

#[test]
fn admin_jwt_round_trips() {
    std::env::set_var("JWT_SECRET", "test-secret");
    let token = create_jwt(Role::Admin).unwrap();
    let decoded = decode::<Claims>(
        &token,
        &DecodingKey::from_secret(b"test-secret"),
        &Validation::new(Algorithm::HS512),
    )
    .unwrap();
    assert!(decoded.claims.role == Role::Admin);
}
