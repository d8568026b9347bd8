use super::{run_blocking, Response};
use crate::error::ServiceError;
use crate::extractors::{DbConnection, Query};
use crate::models::{Article, ArticleFilter, ALL_CATEGORIES};
use actix_web::{get, HttpResponse};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug, Default)]
pub struct ListingQuery {
    pub search: Option<String>,
    pub category: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct Listing {
    articles: Vec<Article>,
    search: String,
    category: String,
}

#[get("/user")]
pub async fn listing(
    query: Query<ListingQuery>,
    mut conn: DbConnection,
) -> Result<HttpResponse, ServiceError> {
    let ListingQuery { search, category } = query.into_inner();
    let search = search.as_deref().unwrap_or_default().trim().to_owned();
    let category = category.unwrap_or_else(|| ALL_CATEGORIES.to_owned());
    let filter = ArticleFilter::new(Some(&category), Some(&search));
    let articles = run_blocking(move || Ok(Article::list(&mut conn, &filter)?)).await?;
    Ok(Response::ok(Listing {
        articles,
        search,
        category,
    }))
}
