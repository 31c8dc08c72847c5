#![allow(clippy::extra_unused_lifetimes)]
use crate::city::DBCity;
use crate::schema::*;
use serde::{Deserialize, Serialize};

#[derive(Queryable, Debug, Clone, Serialize)]
pub struct DBTour {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub duration: String,
    pub city_id: i32,
    pub tour_type_id: i32,
    pub rating: f32,
    pub booking_link: Option<String>,
    pub image_url: Option<String>,
    pub is_featured: bool,
    pub included: Option<String>,
    pub policies: Option<String>,
    pub additional: Option<String>,
}

#[derive(Queryable, Debug, Clone, Serialize)]
pub struct DBTourType {
    pub id: i32,
    pub name: String,
}

/// What the client receives when they request a tour type.
pub type ServerTourType = DBTourType;

/// What the client receives when they request a tour: the row with its
/// city and tour type joined in.
#[derive(Serialize, Debug, Clone)]
pub struct ServerTour {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub duration: String,
    pub rating: f32,
    pub booking_link: Option<String>,
    pub image_url: Option<String>,
    pub is_featured: bool,
    pub included: Option<String>,
    pub policies: Option<String>,
    pub additional: Option<String>,
    pub city: DBCity,
    pub tour_type: DBTourType,
}

impl ServerTour {
    pub fn new(tour: DBTour, city: DBCity, tour_type: DBTourType) -> Self {
        ServerTour {
            id: tour.id,
            name: tour.name,
            description: tour.description,
            price: tour.price,
            duration: tour.duration,
            rating: tour.rating,
            booking_link: tour.booking_link,
            image_url: tour.image_url,
            is_featured: tour.is_featured,
            included: tour.included,
            policies: tour.policies,
            additional: tour.additional,
            city,
            tour_type,
        }
    }
}

/// What the client sends when they post a tour.
#[derive(Deserialize, Debug)]
pub struct ClientTour<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub price: f64,
    pub duration: &'a str,
    pub city_id: i32,
    pub tour_type_id: i32,
    pub rating: f32,
    pub booking_link: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub is_featured: bool,
    pub included: Option<&'a str>,
    pub policies: Option<&'a str>,
    pub additional: Option<&'a str>,
}

/// One row of a bulk tour import, keyed by id like [`crate::city::CityImport`].
#[derive(Deserialize, Insertable, Debug)]
#[table_name = "tours"]
pub struct TourImport {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub duration: String,
    pub city_id: i32,
    pub tour_type_id: i32,
    pub rating: f32,
    pub booking_link: Option<String>,
    pub image_url: Option<String>,
    pub is_featured: bool,
    pub included: Option<String>,
    pub policies: Option<String>,
    pub additional: Option<String>,
}
