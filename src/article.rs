use crate::content::{excerpt, slugify, EXCERPT_LENGTH};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Queryable, Debug, Clone, Serialize)]
pub struct DBArticle {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub category_id: Option<i32>,
    pub author: String,
    pub tags: Option<String>,
    pub feature_img: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// What the client receives when they request an article. Slug and
/// excerpt are derived from the row at read time, never stored.
#[derive(Serialize, Debug, Clone)]
pub struct ServerArticle {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub category_id: Option<i32>,
    pub author: String,
    pub tags: Option<String>,
    pub feature_img: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ServerArticle {
    pub fn new(article: DBArticle) -> Self {
        let slug = slugify(&article.title);
        let excerpt = excerpt(&article.content, EXCERPT_LENGTH);
        ServerArticle {
            id: article.id,
            title: article.title,
            slug,
            excerpt,
            content: article.content,
            category_id: article.category_id,
            author: article.author,
            tags: article.tags,
            feature_img: article.feature_img,
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }

    /// Fallback article for slug lookups that miss both the exact and
    /// the fuzzy pass.
    pub fn sample() -> Self {
        let now = Utc::now();
        ServerArticle::new(DBArticle {
            id: 0,
            title: "Exploring Lake Bled".into(),
            content: "<p>Lake Bled sits beneath the Julian Alps, ringed by a \
                      walking path and watched over by a clifftop castle. Row \
                      out to the island church, ring the wishing bell, and \
                      finish with a slice of kremsnita on the shore.</p>"
                .into(),
            category_id: None,
            author: "Editorial Team".into(),
            tags: Some("slovenia,lake-bled,alps".into()),
            feature_img: None,
            created_at: now,
            updated_at: now,
        })
    }
}

/// What the client sends when they post an article.
#[derive(Deserialize, Debug)]
pub struct ClientArticle<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub category_id: Option<i32>,
    pub author: &'a str,
    pub tags: Option<&'a str>,
    pub feature_img: Option<&'a str>,
}
