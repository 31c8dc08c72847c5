use super::{contains_pattern, escape_like, first_token, log_err};
use crate::article::{ClientArticle, DBArticle};
use crate::category::{ClientArticleCategory, DBArticleCategory};
use crate::schema::article_categories::dsl as ac;
use crate::schema::articles::dsl as a;
use chrono::Utc;
use diesel::prelude::*;
use diesel::QueryResult;
use log::debug;

/// Newest articles first, optionally restricted to one category.
pub fn get_all(
    conn: &PgConnection,
    category_id: Option<i32>,
    limit: i64,
) -> QueryResult<Vec<DBArticle>> {
    debug!(
        "loading articles (category: {:?}, limit: {})",
        category_id, limit
    );

    let mut query = a::articles
        .order(a::created_at.desc())
        .limit(limit)
        .into_boxed();
    if let Some(category_id) = category_id {
        query = query.filter(a::category_id.eq(category_id));
    }
    log_err("article list", query.load::<DBArticle>(conn))
}

/// Slug lookup. The slug is derived from the title at read time, so
/// the request slug is turned back into words and matched against the
/// title case-insensitively, then fuzzily on its first token.
pub fn get_by_slug(conn: &PgConnection, slug: &str) -> QueryResult<Option<DBArticle>> {
    debug!("looking up article {:?}", slug);

    let words = slug.replace('-', " ");
    let exact = log_err(
        "article lookup",
        a::articles
            .filter(a::title.ilike(escape_like(&words)))
            .first::<DBArticle>(conn)
            .optional(),
    )?;
    if exact.is_some() {
        return Ok(exact);
    }

    log_err(
        "fuzzy article lookup",
        a::articles
            .filter(a::title.ilike(contains_pattern(first_token(slug))))
            .first::<DBArticle>(conn)
            .optional(),
    )
}

pub fn create(conn: &PgConnection, article: &ClientArticle<'_>) -> QueryResult<DBArticle> {
    debug!("creating article {:?}", article.title);

    let now = Utc::now();
    log_err(
        "article create",
        diesel::insert_into(a::articles)
            .values((
                a::title.eq(article.title),
                a::content.eq(article.content),
                a::category_id.eq(article.category_id),
                a::author.eq(article.author),
                a::tags.eq(article.tags),
                a::feature_img.eq(article.feature_img),
                a::created_at.eq(now),
                a::updated_at.eq(now),
            ))
            .get_result::<DBArticle>(conn),
    )
}

/// Substring search over the title. `pattern` is a ready-made ILIKE
/// pattern.
pub fn search(conn: &PgConnection, pattern: &str, limit: i64) -> QueryResult<Vec<DBArticle>> {
    debug!("searching articles for {:?}", pattern);
    log_err(
        "article search",
        a::articles
            .filter(a::title.ilike(pattern))
            .limit(limit)
            .load::<DBArticle>(conn),
    )
}

pub fn categories(conn: &PgConnection) -> QueryResult<Vec<DBArticleCategory>> {
    debug!("loading article categories");
    log_err(
        "article category list",
        ac::article_categories.load::<DBArticleCategory>(conn),
    )
}

pub fn category_by_id(conn: &PgConnection, id: i32) -> QueryResult<Option<DBArticleCategory>> {
    debug!("loading article category {}", id);
    log_err(
        "article category load",
        ac::article_categories
            .find(id)
            .first::<DBArticleCategory>(conn)
            .optional(),
    )
}

pub fn category_by_slug(
    conn: &PgConnection,
    slug: &str,
) -> QueryResult<Option<DBArticleCategory>> {
    debug!("loading article category {:?}", slug);
    log_err(
        "article category lookup",
        ac::article_categories
            .filter(ac::slug.eq(slug))
            .first::<DBArticleCategory>(conn)
            .optional(),
    )
}

pub fn create_category(
    conn: &PgConnection,
    category: &ClientArticleCategory<'_>,
    uuid: &str,
    slug: &str,
) -> QueryResult<DBArticleCategory> {
    debug!("creating article category {:?}", category.name);
    log_err(
        "article category create",
        diesel::insert_into(ac::article_categories)
            .values((
                ac::uuid.eq(uuid),
                ac::name.eq(category.name),
                ac::slug.eq(slug),
                ac::description.eq(category.description),
            ))
            .get_result::<DBArticleCategory>(conn),
    )
}
