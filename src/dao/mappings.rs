use super::log_err;
use crate::mapping::{DBLocationMapping, MappingRow};
use crate::schema::location_mappings::dsl as lm;
use chrono::Utc;
use diesel::prelude::*;
use diesel::QueryResult;
use log::debug;

pub fn get_all(conn: &PgConnection) -> QueryResult<Vec<DBLocationMapping>> {
    debug!("loading location mappings");
    log_err(
        "mapping list",
        lm::location_mappings.load::<DBLocationMapping>(conn),
    )
}

/// Distinct region names currently mapped.
pub fn regions(conn: &PgConnection) -> QueryResult<Vec<String>> {
    debug!("loading mapped regions");
    log_err(
        "region list",
        lm::location_mappings
            .select(lm::region)
            .distinct()
            .load::<String>(conn),
    )
}

/// Replace the whole table: delete everything, then bulk-insert the
/// new rows. The two statements are deliberately independent; a failed
/// insert leaves the table in the post-delete state.
pub fn replace_all(
    conn: &PgConnection,
    rows: &[MappingRow],
) -> QueryResult<Vec<DBLocationMapping>> {
    debug!("replacing all location mappings with {} rows", rows.len());

    log_err(
        "mapping delete",
        diesel::delete(lm::location_mappings).execute(conn),
    )?;
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let now = Utc::now();
    let values: Vec<_> = rows
        .iter()
        .map(|row| {
            (
                lm::city_id.eq(row.city_id),
                lm::region.eq(row.region.as_str()),
                lm::created_at.eq(now),
                lm::updated_at.eq(now),
            )
        })
        .collect();
    log_err(
        "mapping insert",
        diesel::insert_into(lm::location_mappings)
            .values(values)
            .get_results::<DBLocationMapping>(conn),
    )
}
