#[macro_use]
extern crate diesel;

mod article;
mod auth;
mod cache;
mod category;
mod city;
mod contact;
mod content;
mod dao;
mod endpoints;
mod envelope;
mod error;
mod mapping;
mod media;
mod schema;
mod stay;
mod tour;

use crate::cache::ArticleCache;
use crate::media::MediaClient;
use diesel::prelude::*;
use rocket::{launch, routes};
use std::env;
use std::time::Duration;

/// Article listings are served from cache for this long.
const ARTICLE_CACHE_TTL: Duration = Duration::from_secs(300);

#[launch]
fn rocket() -> _ {
    let db_connection = establish_connection();
    let db_connection = std::sync::Mutex::new(db_connection);

    let build_dir = env::var("BUILD_DIR").unwrap_or_else(|_| "build".into());

    rocket::build()
        .mount("/", routes![endpoints::index])
        .mount(
            "/api/v1",
            routes![
                endpoints::get_countries,
                endpoints::get_cities,
                endpoints::get_city,
                endpoints::put_city,
                endpoints::patch_city_image,
                endpoints::post_cities_import,
                endpoints::get_mapping,
                endpoints::post_mapping,
                endpoints::get_tours,
                endpoints::get_tour,
                endpoints::post_tours,
                endpoints::post_tours_import,
                endpoints::get_tour_types,
                endpoints::get_stays,
                endpoints::get_stay,
                endpoints::post_stays,
                endpoints::patch_stay_image,
                endpoints::get_articles,
                endpoints::get_article,
                endpoints::post_articles,
                endpoints::get_article_categories,
                endpoints::post_article_categories,
                endpoints::post_contacts,
                endpoints::get_search,
                endpoints::post_media,
                endpoints::login,
                endpoints::fallback
            ],
        )
        .manage(db_connection)
        .manage(build_dir)
        .manage(ArticleCache::new(ARTICLE_CACHE_TTL))
        .manage(MediaClient::from_env())
}

fn establish_connection() -> PgConnection {
    let _ = dotenvy::dotenv();

    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    PgConnection::establish(&db_url).unwrap_or_else(|_| panic!("error connecting to {}", db_url))
}
