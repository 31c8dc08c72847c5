use crate::article::{ClientArticle, ServerArticle};
use crate::auth::{create_jwt, AdminUser, LoginInfo, LoginResponse, Role};
use crate::cache::ArticleCache;
use crate::category::{ClientArticleCategory, ServerArticleCategory};
use crate::city::{CityImport, ClientCity, ServerCity};
use crate::contact::{ClientContact, ServerContact};
use crate::content::slugify;
use crate::dao;
use crate::envelope::Envelope;
use crate::error::APIError;
use crate::mapping::{MappingSave, ServerLocationMapping};
use crate::media::{safe_file_name, MediaClient, ServerMedia, UploadRequest};
use crate::stay::{ClientPlaceToStay, DBPlaceToStay, ServerPlaceToStay};
use crate::tour::{ClientTour, DBTour, ServerTour, ServerTourType, TourImport};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use diesel::pg::PgConnection;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use rocket::fs::NamedFile;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{get, patch, post, put, State};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[get("/<files..>", rank = 10000)]
pub async fn index(build_dir: &State<String>, files: PathBuf) -> Option<NamedFile> {
    let path = Path::new(&**build_dir).join(files);

    async fn open_index(build_path: &str) -> Option<NamedFile> {
        NamedFile::open(Path::new(build_path).join("index.html"))
            .await
            .ok()
    }

    if path.is_dir() {
        open_index(&**build_dir).await
    } else {
        match NamedFile::open(path).await.ok() {
            Some(file) => Some(file),
            None => open_index(&**build_dir).await,
        }
    }
}

#[get("/locations/countries")]
pub fn get_countries(
    db_connection: &State<Mutex<PgConnection>>,
) -> Result<Envelope<Vec<String>>, APIError> {
    let regions = dao::mappings::regions(&*db_connection.lock().unwrap())?;

    Ok(Envelope::ok("Countries fetched.", regions))
}

#[get("/locations/cities?<countries>&<limit>")]
pub fn get_cities(
    db_connection: &State<Mutex<PgConnection>>,
    countries: Option<&str>,
    limit: Option<i64>,
) -> Result<Envelope<Vec<ServerCity>>, APIError> {
    let regions = countries.map(parse_countries);
    let cities =
        dao::cities::get_all(&*db_connection.lock().unwrap(), regions.as_deref(), limit)?;

    Ok(Envelope::ok("Cities fetched.", cities))
}

/// Comma-separated region list from the `countries` query parameter.
fn parse_countries(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|region| !region.is_empty())
        .map(str::to_string)
        .collect()
}

#[get("/locations/cities/<name>")]
pub fn get_city(
    db_connection: &State<Mutex<PgConnection>>,
    name: &str,
) -> Result<Envelope<ServerCity>, APIError> {
    match dao::cities::get_by_name(&*db_connection.lock().unwrap(), name)? {
        Some(city) => Ok(Envelope::ok("City found.", city)),
        None => Err(APIError::not_found(format!("No city named {}.", name))),
    }
}

#[put("/locations/cities/<id>", data = "<city>")]
pub fn put_city(
    db_connection: &State<Mutex<PgConnection>>,
    id: i32,
    city: Option<Json<ClientCity<'_>>>,
) -> Result<Envelope<ServerCity>, APIError> {
    let city = match city {
        Some(city) => city,
        None => return Err(APIError::bad_request("Invalid city format.".into())),
    };

    match dao::cities::update(&*db_connection.lock().unwrap(), id, &city)? {
        Some(updated) => Ok(Envelope::ok("City updated.", updated)),
        None => Err(APIError::not_found(format!("No city with id {}.", id))),
    }
}

/// Partial update limited to the image field.
#[derive(Deserialize)]
pub struct ImagePatch<'a> {
    pub image_url: &'a str,
}

#[patch("/locations/cities/<id>/image", data = "<patch>")]
pub fn patch_city_image(
    db_connection: &State<Mutex<PgConnection>>,
    id: i32,
    patch: Option<Json<ImagePatch<'_>>>,
) -> Result<Envelope<ServerCity>, APIError> {
    let patch = match patch {
        Some(patch) => patch,
        None => return Err(APIError::bad_request("Invalid image format.".into())),
    };

    match dao::cities::update_image(&*db_connection.lock().unwrap(), id, patch.image_url)? {
        Some(updated) => Ok(Envelope::ok("City image updated.", updated)),
        None => Err(APIError::not_found(format!("No city with id {}.", id))),
    }
}

#[post("/locations/cities/import", data = "<cities>")]
pub fn post_cities_import(
    db_connection: &State<Mutex<PgConnection>>,
    cities: Option<Json<Vec<CityImport>>>,
) -> Result<Envelope<Vec<ServerCity>>, APIError> {
    let cities = match cities {
        Some(cities) => cities,
        None => return Err(APIError::bad_request("Invalid import format.".into())),
    };
    if cities.is_empty() {
        return Err(APIError::bad_request(
            "Import must contain at least one city.".into(),
        ));
    }

    let imported = dao::cities::upsert_many(&*db_connection.lock().unwrap(), &cities)?;

    Ok(Envelope::created("Cities imported.", imported))
}

#[get("/locations/mapping")]
pub fn get_mapping(
    db_connection: &State<Mutex<PgConnection>>,
) -> Result<Envelope<Vec<ServerLocationMapping>>, APIError> {
    let mappings = dao::mappings::get_all(&*db_connection.lock().unwrap())?;

    Ok(Envelope::ok("Location mappings fetched.", mappings))
}

#[post("/locations/mapping", data = "<save>")]
pub fn post_mapping(
    db_connection: &State<Mutex<PgConnection>>,
    save: Option<Json<MappingSave>>,
) -> Result<Envelope<Option<Vec<ServerLocationMapping>>>, APIError> {
    let save = match save {
        Some(save) => save,
        None => return Err(APIError::bad_request("Invalid mapping format.".into())),
    };

    let rows = save.rows();
    let inserted = dao::mappings::replace_all(&*db_connection.lock().unwrap(), &rows)
        .map_err(|err| match err {
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                APIError::with_detail(
                    Status::BadRequest,
                    "Mapping references a city that does not exist.".into(),
                    info.message().to_string(),
                )
            }
            other => APIError::from(other),
        })?;

    if inserted.is_empty() {
        Ok(Envelope::ok("All location mappings cleared.", None))
    } else {
        Ok(Envelope::ok("Location mappings replaced.", Some(inserted)))
    }
}

#[get("/tours?<city>&<tour_type>&<featured>&<limit>")]
pub fn get_tours(
    db_connection: &State<Mutex<PgConnection>>,
    city: Option<&str>,
    tour_type: Option<&str>,
    featured: Option<bool>,
    limit: Option<i64>,
) -> Result<Envelope<Vec<ServerTour>>, APIError> {
    let rows = dao::tours::get_all(
        &*db_connection.lock().unwrap(),
        city,
        tour_type,
        featured,
        limit,
    )?;

    let tours = rows
        .into_iter()
        .map(|(tour, city, tour_type)| ServerTour::new(tour, city, tour_type))
        .collect();

    Ok(Envelope::ok("Tours fetched.", tours))
}

#[get("/tours/<id>")]
pub fn get_tour(
    db_connection: &State<Mutex<PgConnection>>,
    id: i32,
) -> Result<Envelope<ServerTour>, APIError> {
    match dao::tours::get_by_id(&*db_connection.lock().unwrap(), id)? {
        Some((tour, city, tour_type)) => Ok(Envelope::ok(
            "Tour fetched.",
            ServerTour::new(tour, city, tour_type),
        )),
        None => Err(APIError::not_found(format!("No tour with id {}.", id))),
    }
}

#[post("/tours", data = "<tour>")]
pub fn post_tours(
    db_connection: &State<Mutex<PgConnection>>,
    tour: Option<Json<ClientTour<'_>>>,
    user: Option<AdminUser>,
) -> Result<Envelope<ServerTour>, APIError> {
    user.ok_or_else(APIError::unauthorized)?;

    let tour = match tour {
        Some(tour) => tour,
        None => return Err(APIError::bad_request("Invalid tour format.".into())),
    };

    let db_connection = &*db_connection.lock().unwrap();
    let city = dao::cities::get_by_id(db_connection, tour.city_id)?.ok_or_else(|| {
        APIError::not_found(format!("No city with id {} found.", tour.city_id))
    })?;
    let tour_type =
        dao::tours::type_by_id(db_connection, tour.tour_type_id)?.ok_or_else(|| {
            APIError::not_found(format!(
                "No tour type with id {} found.",
                tour.tour_type_id
            ))
        })?;

    let inserted = dao::tours::create(db_connection, &tour)?;

    Ok(Envelope::created(
        "Tour created.",
        ServerTour::new(inserted, city, tour_type),
    ))
}

#[post("/tours/import", data = "<tours>")]
pub fn post_tours_import(
    db_connection: &State<Mutex<PgConnection>>,
    tours: Option<Json<Vec<TourImport>>>,
) -> Result<Envelope<Vec<DBTour>>, APIError> {
    let tours = match tours {
        Some(tours) => tours,
        None => return Err(APIError::bad_request("Invalid import format.".into())),
    };
    if tours.is_empty() {
        return Err(APIError::bad_request(
            "Import must contain at least one tour.".into(),
        ));
    }

    let imported = dao::tours::upsert_many(&*db_connection.lock().unwrap(), &tours)?;

    Ok(Envelope::created("Tours imported.", imported))
}

#[get("/tour-types")]
pub fn get_tour_types(
    db_connection: &State<Mutex<PgConnection>>,
) -> Result<Envelope<Vec<ServerTourType>>, APIError> {
    let types = dao::tours::types(&*db_connection.lock().unwrap())?;

    Ok(Envelope::ok("Tour types fetched.", types))
}

#[get("/stays?<city>&<limit>")]
pub fn get_stays(
    db_connection: &State<Mutex<PgConnection>>,
    city: Option<&str>,
    limit: Option<i64>,
) -> Result<Envelope<Vec<ServerPlaceToStay>>, APIError> {
    let rows = dao::stays::get_all(&*db_connection.lock().unwrap(), city, limit)?;

    let stays = rows
        .into_iter()
        .map(|(stay, city, place_type)| ServerPlaceToStay::new(stay, city, place_type))
        .collect();

    Ok(Envelope::ok("Places to stay fetched.", stays))
}

#[get("/stays/<name>")]
pub fn get_stay(
    db_connection: &State<Mutex<PgConnection>>,
    name: &str,
) -> Result<Envelope<ServerPlaceToStay>, APIError> {
    let stay = match dao::stays::get_by_name(&*db_connection.lock().unwrap(), name)? {
        Some((stay, city, place_type)) => ServerPlaceToStay::new(stay, city, place_type),
        None => ServerPlaceToStay::sample(),
    };

    Ok(Envelope::ok("Place to stay fetched.", stay))
}

#[post("/stays", data = "<stay>")]
pub fn post_stays(
    db_connection: &State<Mutex<PgConnection>>,
    stay: Option<Json<ClientPlaceToStay<'_>>>,
) -> Result<Envelope<DBPlaceToStay>, APIError> {
    let stay = match stay {
        Some(stay) => stay,
        None => return Err(APIError::bad_request("Invalid place-to-stay format.".into())),
    };

    let db_connection = &*db_connection.lock().unwrap();
    dao::cities::get_by_id(db_connection, stay.city_id)?.ok_or_else(|| {
        APIError::not_found(format!("No city with id {} found.", stay.city_id))
    })?;
    dao::stays::place_type_by_id(db_connection, stay.place_type_id)?.ok_or_else(|| {
        APIError::not_found(format!(
            "No place type with id {} found.",
            stay.place_type_id
        ))
    })?;

    let inserted = dao::stays::create(db_connection, &stay)?;

    Ok(Envelope::created("Place to stay created.", inserted))
}

#[patch("/stays/<id>/image", data = "<patch>")]
pub fn patch_stay_image(
    db_connection: &State<Mutex<PgConnection>>,
    id: i32,
    patch: Option<Json<ImagePatch<'_>>>,
) -> Result<Envelope<DBPlaceToStay>, APIError> {
    let patch = match patch {
        Some(patch) => patch,
        None => return Err(APIError::bad_request("Invalid image format.".into())),
    };

    match dao::stays::update_image(&*db_connection.lock().unwrap(), id, patch.image_url)? {
        Some(updated) => Ok(Envelope::ok("Place-to-stay image updated.", updated)),
        None => Err(APIError::not_found(format!(
            "No place to stay with id {}.",
            id
        ))),
    }
}

#[get("/articles?<category>&<limit>")]
pub fn get_articles(
    db_connection: &State<Mutex<PgConnection>>,
    cache: &State<ArticleCache>,
    category: Option<&str>,
    limit: Option<i64>,
) -> Result<Envelope<Vec<ServerArticle>>, APIError> {
    let limit = limit.unwrap_or(10);

    let key = ArticleCache::key(category, limit);
    if let Some(articles) = cache.get(&key) {
        return Ok(Envelope::ok("Articles fetched.", articles.as_ref().clone()));
    }

    let db_connection = &*db_connection.lock().unwrap();
    let category_id = match category {
        Some(slug) => Some(
            dao::articles::category_by_slug(db_connection, slug)?
                .ok_or_else(|| APIError::not_found(format!("No article category {}.", slug)))?
                .id,
        ),
        None => None,
    };

    let articles: Vec<ServerArticle> = dao::articles::get_all(db_connection, category_id, limit)?
        .into_iter()
        .map(ServerArticle::new)
        .collect();
    cache.put(key, articles.clone());

    Ok(Envelope::ok("Articles fetched.", articles))
}

#[get("/articles/<slug>")]
pub fn get_article(
    db_connection: &State<Mutex<PgConnection>>,
    slug: &str,
) -> Result<Envelope<ServerArticle>, APIError> {
    let article = match dao::articles::get_by_slug(&*db_connection.lock().unwrap(), slug)? {
        Some(article) => ServerArticle::new(article),
        None => ServerArticle::sample(),
    };

    Ok(Envelope::ok("Article fetched.", article))
}

#[post("/articles", data = "<article>")]
pub fn post_articles(
    db_connection: &State<Mutex<PgConnection>>,
    cache: &State<ArticleCache>,
    article: Option<Json<ClientArticle<'_>>>,
) -> Result<Envelope<ServerArticle>, APIError> {
    let article = match article {
        Some(article) => article,
        None => return Err(APIError::bad_request("Invalid article format.".into())),
    };

    let db_connection = &*db_connection.lock().unwrap();
    if let Some(category_id) = article.category_id {
        dao::articles::category_by_id(db_connection, category_id)?.ok_or_else(|| {
            APIError::not_found(format!(
                "No article category with id {} found.",
                category_id
            ))
        })?;
    }

    let inserted = dao::articles::create(db_connection, &article)?;
    cache.invalidate_all();

    Ok(Envelope::created(
        "Article created.",
        ServerArticle::new(inserted),
    ))
}

#[get("/articles/categories")]
pub fn get_article_categories(
    db_connection: &State<Mutex<PgConnection>>,
) -> Result<Envelope<Vec<ServerArticleCategory>>, APIError> {
    let categories = dao::articles::categories(&*db_connection.lock().unwrap())?;

    Ok(Envelope::ok("Article categories fetched.", categories))
}

#[post("/articles/categories", data = "<category>")]
pub fn post_article_categories(
    db_connection: &State<Mutex<PgConnection>>,
    category: Option<Json<ClientArticleCategory<'_>>>,
) -> Result<Envelope<ServerArticleCategory>, APIError> {
    let category = match category {
        Some(category) => category,
        None => return Err(APIError::bad_request("Invalid category format.".into())),
    };
    if category.name.trim().is_empty() {
        return Err(APIError::bad_request(
            "Category name must not be empty.".into(),
        ));
    }

    let slug = slugify(category.name);
    let uuid = uuid::Uuid::new_v4().to_string();
    let inserted = dao::articles::create_category(
        &*db_connection.lock().unwrap(),
        &category,
        &uuid,
        &slug,
    )?;

    Ok(Envelope::created("Article category created.", inserted))
}

#[post("/contacts", data = "<contact>")]
pub fn post_contacts(
    db_connection: &State<Mutex<PgConnection>>,
    contact: Option<Json<ClientContact<'_>>>,
) -> Result<Envelope<ServerContact>, APIError> {
    let contact = match contact {
        Some(contact) => contact,
        None => return Err(APIError::bad_request("Invalid contact format.".into())),
    };
    if contact.email.trim().is_empty() || contact.message.trim().is_empty() {
        return Err(APIError::bad_request(
            "Email and message are required.".into(),
        ));
    }

    let inserted = dao::contacts::create(&*db_connection.lock().unwrap(), &contact)?;

    Ok(Envelope::created("Contact message received.", inserted))
}

#[derive(Serialize)]
pub struct SearchResults {
    pub cities: Vec<ServerCity>,
    pub tours: Vec<ServerTour>,
    pub articles: Vec<ServerArticle>,
}

#[get("/search?<q>&<limit>")]
pub fn get_search(
    db_connection: &State<Mutex<PgConnection>>,
    q: Option<&str>,
    limit: Option<i64>,
) -> Result<Envelope<SearchResults>, APIError> {
    let q = match q.map(str::trim) {
        Some(q) if !q.is_empty() => q,
        _ => {
            return Err(APIError::bad_request(
                "Missing required query parameter \"q\".".into(),
            ))
        }
    };
    let limit = limit.unwrap_or(10);
    let pattern = dao::contains_pattern(q);

    let db_connection = &*db_connection.lock().unwrap();
    let cities = dao::cities::search(db_connection, &pattern, limit)?;
    let tours = dao::tours::search(db_connection, &pattern, limit)?
        .into_iter()
        .map(|(tour, city, tour_type)| ServerTour::new(tour, city, tour_type))
        .collect();
    let articles = dao::articles::search(db_connection, &pattern, limit)?
        .into_iter()
        .map(ServerArticle::new)
        .collect();

    Ok(Envelope::ok(
        "Search results fetched.",
        SearchResults {
            cities,
            tours,
            articles,
        },
    ))
}

#[post("/media", data = "<upload>")]
pub async fn post_media(
    media: &State<MediaClient>,
    upload: Option<Json<UploadRequest<'_>>>,
) -> Result<Envelope<ServerMedia>, APIError> {
    let upload = match upload {
        Some(upload) => upload,
        None => return Err(APIError::bad_request("Invalid upload format.".into())),
    };
    if upload.file_name.trim().is_empty() {
        return Err(APIError::bad_request("A file name is required.".into()));
    }

    let bytes = BASE64
        .decode(upload.data)
        .map_err(|_| APIError::bad_request("Image data must be base64 encoded.".into()))?;
    if bytes.is_empty() {
        return Err(APIError::bad_request("Image data must not be empty.".into()));
    }

    let file_name = safe_file_name(upload.file_name);
    let uploaded = media
        .upload_image(&file_name, upload.content_type, bytes)
        .await?;

    Ok(Envelope::created("Image uploaded.", uploaded))
}

#[post("/auth/login", data = "<login_info>")]
pub fn login(login_info: Option<Json<LoginInfo<'_>>>) -> Result<Json<LoginResponse>, APIError> {
    let login_info = match login_info {
        Some(login_info) => login_info,
        None => return Err(APIError::bad_request("Missing login information.".into())),
    };

    let admin_email = std::env::var("ADMIN_EMAIL").expect("ADMIN_EMAIL must be defined");
    let admin_password = std::env::var("ADMIN_PASSWORD").expect("ADMIN_PASSWORD must be defined");

    if login_info.email == admin_email && login_info.password == admin_password {
        create_jwt(Role::Admin)
            .map(|access_token| Json(LoginResponse { access_token }))
            .map_err(|_| APIError::default())
    } else {
        Err(APIError::new(
            Status::Unauthorized,
            "Invalid email or password.".into(),
        ))
    }
}

#[get("/<_..>", rank = 9999)]
pub fn fallback() -> APIError {
    APIError::not_found("Invalid endpoint.".into())
}

#[test]
fn countries_parse_to_a_trimmed_list() {
    assert_eq!(
        parse_countries("Gorenjska, Obalno-kraška"),
        vec!["Gorenjska".to_string(), "Obalno-kraška".to_string()]
    );
}

#[test]
fn empty_country_segments_are_dropped() {
    assert_eq!(parse_countries(",Gorenjska,,"), vec!["Gorenjska".to_string()]);
    assert_eq!(parse_countries(""), Vec::<String>::new());
}
