#![allow(clippy::extra_unused_lifetimes)]
use crate::city::DBCity;
use crate::schema::*;
use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, DbEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceRange {
    Budget,
    Midrange,
    Luxury,
}

#[derive(Queryable, Debug, Clone, Serialize)]
pub struct DBPlaceToStay {
    pub id: i32,
    pub name: String,
    pub city_id: i32,
    pub place_type_id: i32,
    pub price_range: PriceRange,
    pub image_url: Option<String>,
}

#[derive(Queryable, Debug, Clone, Serialize)]
pub struct DBPlaceType {
    pub id: i32,
    pub name: String,
}

/// What the client receives when they request a place to stay: the row
/// with its city and place type joined in.
#[derive(Serialize, Debug, Clone)]
pub struct ServerPlaceToStay {
    pub id: i32,
    pub name: String,
    pub price_range: PriceRange,
    pub image_url: Option<String>,
    pub city: DBCity,
    pub place_type: DBPlaceType,
}

impl ServerPlaceToStay {
    pub fn new(stay: DBPlaceToStay, city: DBCity, place_type: DBPlaceType) -> Self {
        ServerPlaceToStay {
            id: stay.id,
            name: stay.name,
            price_range: stay.price_range,
            image_url: stay.image_url,
            city,
            place_type,
        }
    }

    /// Fallback row for name lookups that miss both the exact and the
    /// fuzzy pass.
    pub fn sample() -> Self {
        ServerPlaceToStay {
            id: 0,
            name: "Grand Hotel Toplice".into(),
            price_range: PriceRange::Luxury,
            image_url: None,
            city: DBCity {
                id: 0,
                name: "Bled".into(),
                region: "Gorenjska".into(),
                description: "Alpine lake town beneath the Julian Alps.".into(),
                coordinates: Some("46.3683,14.1146".into()),
                image_url: None,
                viator_id: None,
                destination_id: None,
                active: true,
            },
            place_type: DBPlaceType {
                id: 0,
                name: "Hotel".into(),
            },
        }
    }
}

/// What the client sends when they post a place to stay.
#[derive(Deserialize, Insertable, Debug)]
#[table_name = "places_to_stay"]
pub struct ClientPlaceToStay<'a> {
    pub name: &'a str,
    pub city_id: i32,
    pub place_type_id: i32,
    pub price_range: PriceRange,
    pub image_url: Option<&'a str>,
}
