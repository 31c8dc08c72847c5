use super::{contains_pattern, escape_like, first_token, log_err};
use crate::city::DBCity;
use crate::schema::cities::dsl as c;
use crate::schema::place_types::dsl as pt;
use crate::schema::places_to_stay::dsl as s;
use crate::stay::{ClientPlaceToStay, DBPlaceToStay, DBPlaceType};
use diesel::prelude::*;
use diesel::QueryResult;
use log::debug;

/// Places to stay joined with their city and place type. The city
/// filter matches by name, case-insensitively.
pub fn get_all(
    conn: &PgConnection,
    city: Option<&str>,
    limit: Option<i64>,
) -> QueryResult<Vec<(DBPlaceToStay, DBCity, DBPlaceType)>> {
    debug!("loading places to stay (city: {:?}, limit: {:?})", city, limit);

    let mut query = s::places_to_stay
        .inner_join(c::cities)
        .inner_join(pt::place_types)
        .into_boxed();
    if let Some(city) = city {
        query = query.filter(c::name.ilike(escape_like(city)));
    }
    if let Some(limit) = limit {
        query = query.limit(limit);
    }
    log_err(
        "place-to-stay list",
        query.load::<(DBPlaceToStay, DBCity, DBPlaceType)>(conn),
    )
}

/// Name lookup with the same exact-then-fuzzy chain as
/// [`super::cities::get_by_name`].
pub fn get_by_name(
    conn: &PgConnection,
    name: &str,
) -> QueryResult<Option<(DBPlaceToStay, DBCity, DBPlaceType)>> {
    debug!("looking up place to stay {:?}", name);

    let exact = log_err(
        "place-to-stay lookup",
        s::places_to_stay
            .inner_join(c::cities)
            .inner_join(pt::place_types)
            .filter(s::name.ilike(escape_like(name)))
            .first::<(DBPlaceToStay, DBCity, DBPlaceType)>(conn)
            .optional(),
    )?;
    if exact.is_some() {
        return Ok(exact);
    }

    log_err(
        "fuzzy place-to-stay lookup",
        s::places_to_stay
            .inner_join(c::cities)
            .inner_join(pt::place_types)
            .filter(s::name.ilike(contains_pattern(first_token(name))))
            .first::<(DBPlaceToStay, DBCity, DBPlaceType)>(conn)
            .optional(),
    )
}

pub fn create(conn: &PgConnection, stay: &ClientPlaceToStay<'_>) -> QueryResult<DBPlaceToStay> {
    debug!("creating place to stay {:?}", stay.name);
    log_err(
        "place-to-stay create",
        diesel::insert_into(s::places_to_stay)
            .values(stay)
            .get_result::<DBPlaceToStay>(conn),
    )
}

pub fn update_image(
    conn: &PgConnection,
    id: i32,
    image_url: &str,
) -> QueryResult<Option<DBPlaceToStay>> {
    debug!("updating image for place to stay {}", id);
    log_err(
        "place-to-stay image update",
        diesel::update(s::places_to_stay.find(id))
            .set(s::image_url.eq(image_url))
            .get_result::<DBPlaceToStay>(conn)
            .optional(),
    )
}

pub fn place_type_by_id(conn: &PgConnection, id: i32) -> QueryResult<Option<DBPlaceType>> {
    debug!("loading place type {}", id);
    log_err(
        "place type load",
        pt::place_types.find(id).first::<DBPlaceType>(conn).optional(),
    )
}
