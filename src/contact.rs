use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Queryable, Debug, Clone, Serialize)]
pub struct DBContact {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// What the client receives after submitting the contact form.
pub type ServerContact = DBContact;

/// What the client sends from the contact form.
#[derive(Deserialize, Debug)]
pub struct ClientContact<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub subject: Option<&'a str>,
    pub message: &'a str,
}
