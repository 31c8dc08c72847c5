use super::{contains_pattern, escape_like, first_token, log_err};
use crate::city::{CityImport, ClientCity, DBCity};
use crate::schema::cities::dsl as c;
use diesel::pg::upsert::excluded;
use diesel::prelude::*;
use diesel::QueryResult;
use log::debug;

/// Active cities, optionally restricted to an exact region list. No
/// ordering is applied; rows come back in whatever order the database
/// returns them.
pub fn get_all(
    conn: &PgConnection,
    regions: Option<&[String]>,
    limit: Option<i64>,
) -> QueryResult<Vec<DBCity>> {
    debug!("loading cities (regions: {:?}, limit: {:?})", regions, limit);

    let mut query = c::cities.filter(c::active.eq(true)).into_boxed();
    if let Some(regions) = regions {
        query = query.filter(c::region.eq_any(regions.to_vec()));
    }
    if let Some(limit) = limit {
        query = query.limit(limit);
    }
    log_err("city list", query.load::<DBCity>(conn))
}

pub fn get_by_id(conn: &PgConnection, id: i32) -> QueryResult<Option<DBCity>> {
    debug!("loading city {}", id);
    log_err("city load", c::cities.find(id).first::<DBCity>(conn).optional())
}

/// Name lookup: exact case-insensitive match first, then a fuzzy
/// substring match on the first token of the name.
pub fn get_by_name(conn: &PgConnection, name: &str) -> QueryResult<Option<DBCity>> {
    debug!("looking up city {:?}", name);

    let exact = log_err(
        "city lookup",
        c::cities
            .filter(c::name.ilike(escape_like(name)))
            .first::<DBCity>(conn)
            .optional(),
    )?;
    if exact.is_some() {
        return Ok(exact);
    }

    log_err(
        "fuzzy city lookup",
        c::cities
            .filter(c::name.ilike(contains_pattern(first_token(name))))
            .first::<DBCity>(conn)
            .optional(),
    )
}

/// Bulk import, idempotent on id: a row that already exists is updated
/// in place.
pub fn upsert_many(conn: &PgConnection, rows: &[CityImport]) -> QueryResult<Vec<DBCity>> {
    debug!("upserting {} cities", rows.len());
    log_err(
        "city import",
        diesel::insert_into(c::cities)
            .values(rows)
            .on_conflict(c::id)
            .do_update()
            .set((
                c::name.eq(excluded(c::name)),
                c::region.eq(excluded(c::region)),
                c::description.eq(excluded(c::description)),
                c::coordinates.eq(excluded(c::coordinates)),
                c::image_url.eq(excluded(c::image_url)),
                c::viator_id.eq(excluded(c::viator_id)),
                c::destination_id.eq(excluded(c::destination_id)),
                c::active.eq(excluded(c::active)),
            ))
            .get_results::<DBCity>(conn),
    )
}

/// Full-row update. `Ok(None)` when no city has this id.
pub fn update(conn: &PgConnection, id: i32, city: &ClientCity<'_>) -> QueryResult<Option<DBCity>> {
    debug!("updating city {}", id);
    log_err(
        "city update",
        diesel::update(c::cities.find(id))
            .set((
                c::name.eq(city.name),
                c::region.eq(city.region),
                c::description.eq(city.description),
                c::coordinates.eq(city.coordinates),
                c::image_url.eq(city.image_url),
                c::viator_id.eq(city.viator_id),
                c::destination_id.eq(city.destination_id),
                c::active.eq(city.active),
            ))
            .get_result::<DBCity>(conn)
            .optional(),
    )
}

pub fn update_image(
    conn: &PgConnection,
    id: i32,
    image_url: &str,
) -> QueryResult<Option<DBCity>> {
    debug!("updating image for city {}", id);
    log_err(
        "city image update",
        diesel::update(c::cities.find(id))
            .set(c::image_url.eq(image_url))
            .get_result::<DBCity>(conn)
            .optional(),
    )
}

/// Substring search over name and region. `pattern` is a ready-made
/// ILIKE pattern.
pub fn search(conn: &PgConnection, pattern: &str, limit: i64) -> QueryResult<Vec<DBCity>> {
    debug!("searching cities for {:?}", pattern);
    log_err(
        "city search",
        c::cities
            .filter(c::active.eq(true))
            .filter(c::name.ilike(pattern).or(c::region.ilike(pattern)))
            .limit(limit)
            .load::<DBCity>(conn),
    )
}
