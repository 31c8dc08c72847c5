use super::log_err;
use crate::contact::{ClientContact, DBContact};
use crate::schema::contacts::dsl as ct;
use chrono::Utc;
use diesel::prelude::*;
use diesel::QueryResult;
use log::debug;

pub fn create(conn: &PgConnection, contact: &ClientContact<'_>) -> QueryResult<DBContact> {
    debug!("storing contact message from {:?}", contact.email);
    log_err(
        "contact create",
        diesel::insert_into(ct::contacts)
            .values((
                ct::name.eq(contact.name),
                ct::email.eq(contact.email),
                ct::subject.eq(contact.subject),
                ct::message.eq(contact.message),
                ct::created_at.eq(Utc::now()),
            ))
            .get_result::<DBContact>(conn),
    )
}
