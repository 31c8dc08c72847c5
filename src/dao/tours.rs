use super::{escape_like, log_err};
use crate::city::DBCity;
use crate::schema::cities::dsl as c;
use crate::schema::tour_types::dsl as tt;
use crate::schema::tours::dsl as t;
use crate::tour::{ClientTour, DBTour, DBTourType, TourImport};
use diesel::pg::upsert::excluded;
use diesel::prelude::*;
use diesel::QueryResult;
use log::debug;

/// Tours joined with their city and tour type, filtered by whatever
/// the caller supplied. City and type filters match by name,
/// case-insensitively.
pub fn get_all(
    conn: &PgConnection,
    city: Option<&str>,
    tour_type: Option<&str>,
    featured: Option<bool>,
    limit: Option<i64>,
) -> QueryResult<Vec<(DBTour, DBCity, DBTourType)>> {
    debug!(
        "loading tours (city: {:?}, type: {:?}, featured: {:?}, limit: {:?})",
        city, tour_type, featured, limit
    );

    let mut query = t::tours
        .inner_join(c::cities)
        .inner_join(tt::tour_types)
        .into_boxed();
    if let Some(city) = city {
        query = query.filter(c::name.ilike(escape_like(city)));
    }
    if let Some(tour_type) = tour_type {
        query = query.filter(tt::name.ilike(escape_like(tour_type)));
    }
    if let Some(featured) = featured {
        query = query.filter(t::is_featured.eq(featured));
    }
    if let Some(limit) = limit {
        query = query.limit(limit);
    }
    log_err("tour list", query.load::<(DBTour, DBCity, DBTourType)>(conn))
}

pub fn get_by_id(
    conn: &PgConnection,
    id: i32,
) -> QueryResult<Option<(DBTour, DBCity, DBTourType)>> {
    debug!("loading tour {}", id);
    log_err(
        "tour load",
        t::tours
            .filter(t::id.eq(id))
            .inner_join(c::cities)
            .inner_join(tt::tour_types)
            .first::<(DBTour, DBCity, DBTourType)>(conn)
            .optional(),
    )
}

pub fn create(conn: &PgConnection, tour: &ClientTour<'_>) -> QueryResult<DBTour> {
    debug!("creating tour {:?}", tour.name);
    log_err(
        "tour create",
        diesel::insert_into(t::tours)
            .values((
                t::name.eq(tour.name),
                t::description.eq(tour.description),
                t::price.eq(tour.price),
                t::duration.eq(tour.duration),
                t::city_id.eq(tour.city_id),
                t::tour_type_id.eq(tour.tour_type_id),
                t::rating.eq(tour.rating),
                t::booking_link.eq(tour.booking_link),
                t::image_url.eq(tour.image_url),
                t::is_featured.eq(tour.is_featured),
                t::included.eq(tour.included),
                t::policies.eq(tour.policies),
                t::additional.eq(tour.additional),
            ))
            .get_result::<DBTour>(conn),
    )
}

/// Bulk import, idempotent on id like [`super::cities::upsert_many`].
pub fn upsert_many(conn: &PgConnection, rows: &[TourImport]) -> QueryResult<Vec<DBTour>> {
    debug!("upserting {} tours", rows.len());
    log_err(
        "tour import",
        diesel::insert_into(t::tours)
            .values(rows)
            .on_conflict(t::id)
            .do_update()
            .set((
                t::name.eq(excluded(t::name)),
                t::description.eq(excluded(t::description)),
                t::price.eq(excluded(t::price)),
                t::duration.eq(excluded(t::duration)),
                t::city_id.eq(excluded(t::city_id)),
                t::tour_type_id.eq(excluded(t::tour_type_id)),
                t::rating.eq(excluded(t::rating)),
                t::booking_link.eq(excluded(t::booking_link)),
                t::image_url.eq(excluded(t::image_url)),
                t::is_featured.eq(excluded(t::is_featured)),
                t::included.eq(excluded(t::included)),
                t::policies.eq(excluded(t::policies)),
                t::additional.eq(excluded(t::additional)),
            ))
            .get_results::<DBTour>(conn),
    )
}

pub fn types(conn: &PgConnection) -> QueryResult<Vec<DBTourType>> {
    debug!("loading tour types");
    log_err("tour type list", tt::tour_types.load::<DBTourType>(conn))
}

pub fn type_by_id(conn: &PgConnection, id: i32) -> QueryResult<Option<DBTourType>> {
    debug!("loading tour type {}", id);
    log_err(
        "tour type load",
        tt::tour_types.find(id).first::<DBTourType>(conn).optional(),
    )
}

/// Substring search over name and description. `pattern` is a
/// ready-made ILIKE pattern.
pub fn search(
    conn: &PgConnection,
    pattern: &str,
    limit: i64,
) -> QueryResult<Vec<(DBTour, DBCity, DBTourType)>> {
    debug!("searching tours for {:?}", pattern);
    log_err(
        "tour search",
        t::tours
            .inner_join(c::cities)
            .inner_join(tt::tour_types)
            .filter(t::name.ilike(pattern).or(t::description.ilike(pattern)))
            .limit(limit)
            .load::<(DBTour, DBCity, DBTourType)>(conn),
    )
}
