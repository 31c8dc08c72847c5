use serde::{Deserialize, Serialize};

#[derive(Queryable, Debug, Clone, Serialize)]
pub struct DBArticleCategory {
    pub id: i32,
    pub uuid: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

/// What the client receives when they request an article category.
pub type ServerArticleCategory = DBArticleCategory;

/// What the client sends when they post a category. The uuid and slug
/// are assigned server-side.
#[derive(Deserialize, Debug)]
pub struct ClientArticleCategory<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
}
