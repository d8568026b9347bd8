use super::{run_blocking, Response};
use crate::config::Config;
use crate::error::ServiceError;
use crate::extractors::DbConnection;
use crate::models::{Article, Comment};
use actix_web::{get, post, web, Error, HttpResponse};
use diesel::SqliteConnection;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug)]
pub struct CommentForm {
    pub name: Option<String>,
    pub comment: String,
}

#[derive(Serialize, Debug)]
pub struct ArticleView {
    article: Article,
    media_paths: Vec<String>,
    comments: Vec<Comment>,
}

fn find_article(conn: &mut SqliteConnection, id: i32) -> Result<Article, ServiceError> {
    Article::find(conn, id)?
        .ok_or_else(|| ServiceError::NotFound(format!("Article not found: {}", id)))
}

fn article_view(
    conn: &mut SqliteConnection,
    article: Article,
    config: &Config,
) -> Result<ArticleView, ServiceError> {
    let comments = Comment::list_for_article(conn, article.id)?;
    Ok(ArticleView {
        media_paths: article.media.urls(config),
        article,
        comments,
    })
}

#[get("/article/{id}")]
pub async fn get_article(
    path: web::Path<(i32,)>,
    config: web::Data<Config>,
    mut conn: DbConnection,
) -> Result<HttpResponse, ServiceError> {
    let (id,) = path.into_inner();
    let view = run_blocking(move || {
        let article = find_article(&mut conn, id)?;
        article_view(&mut conn, article, &config)
    })
    .await?;
    Ok(Response::ok(view))
}

#[post("/article/{id}")]
pub async fn comment_article(
    path: web::Path<(i32,)>,
    config: web::Data<Config>,
    mut conn: DbConnection,
    form: Result<web::Form<CommentForm>, Error>,
) -> Result<HttpResponse, ServiceError> {
    let (id,) = path.into_inner();
    // The form is judged only after the article is known to exist.
    let form = form.map(web::Form::into_inner).map_err(|e| e.to_string());
    let view = run_blocking(move || {
        let article = find_article(&mut conn, id)?;
        let form = form.map_err(ServiceError::BadRequest)?;
        let comment =
            Comment::create(&mut conn, article.id, form.name.as_deref(), &form.comment)?;
        log::info!("comment {} added to article {}", comment.id, article.id);
        article_view(&mut conn, article, &config)
    })
    .await?;
    Ok(Response::ok(view))
}
