#![allow(clippy::extra_unused_lifetimes)]
use crate::schema::*;
use serde::{Deserialize, Serialize};

#[derive(Queryable, Debug, Clone, Serialize)]
pub struct DBCity {
    pub id: i32,
    pub name: String,
    pub region: String,
    pub description: String,
    pub coordinates: Option<String>,
    pub image_url: Option<String>,
    pub viator_id: Option<String>,
    pub destination_id: Option<String>,
    pub active: bool,
}

/// What the client receives when they request a city.
pub type ServerCity = DBCity;

/// One row of a bulk city import. Carries its id so a repeated import
/// updates the same row instead of inserting a second one.
#[derive(Deserialize, Insertable, Debug)]
#[table_name = "cities"]
pub struct CityImport {
    pub id: i32,
    pub name: String,
    pub region: String,
    pub description: String,
    pub coordinates: Option<String>,
    pub image_url: Option<String>,
    pub viator_id: Option<String>,
    pub destination_id: Option<String>,
    pub active: bool,
}

/// What the client sends on a full city-detail update.
#[derive(Deserialize, Debug)]
pub struct ClientCity<'a> {
    pub name: &'a str,
    pub region: &'a str,
    pub description: &'a str,
    pub coordinates: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub viator_id: Option<&'a str>,
    pub destination_id: Option<&'a str>,
    pub active: bool,
}
