use super::{run_blocking, Response};
use crate::config::Config;
use crate::db::DbPool;
use crate::error::ServiceError;
use crate::extractors::{DbConnection, Query};
use crate::models::{
    Article, ArticleDraft, ArticleFilter, ArticleSummary, Category, Comment, ALL_CATEGORIES,
};
use crate::upload::{self, UploadedFile};
use actix_multipart::{Multipart, MultipartError};
use actix_web::{get, http::header, post, web::Data, HttpResponse};
use futures::TryStreamExt;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

const FILES_FIELD: &str = "files[]";

#[derive(Deserialize, Debug, Default)]
pub struct DashboardQuery {
    pub category: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct Dashboard {
    total_articles: i64,
    total_comments: i64,
    categories: Vec<String>,
    articles: Vec<ArticleSummary>,
    category: String,
}

#[get("/admin")]
pub async fn dashboard(
    query: Query<DashboardQuery>,
    mut conn: DbConnection,
) -> Result<HttpResponse, ServiceError> {
    let filter = ArticleFilter::new(query.category.as_deref(), None);
    let dashboard = run_blocking(move || {
        let articles = Article::list(&mut conn, &filter)?;
        Ok(Dashboard {
            total_articles: Article::count(&mut conn)?,
            total_comments: Comment::count(&mut conn)?,
            categories: Article::categories(&mut conn)?,
            articles: articles.into_iter().map(ArticleSummary::from).collect(),
            category: filter
                .category
                .unwrap_or_else(|| ALL_CATEGORIES.to_owned()),
        })
    })
    .await?;
    Ok(Response::ok(dashboard))
}

#[derive(Deserialize, Debug, Default)]
pub struct PublishFormQuery {
    /// Id of the article the previous submission created.
    pub published: Option<i32>,
}

#[derive(Serialize, Debug)]
pub struct PublishForm {
    categories: Vec<&'static str>,
    published: Option<i32>,
}

#[get("/admin/publish")]
pub async fn publish_form(query: Query<PublishFormQuery>) -> HttpResponse {
    Response::ok(PublishForm {
        categories: Category::names(),
        published: query.published,
    })
}

/// Parts of the publish form, read completely before anything is stored.
/// Accepted files wait in the upload directory as temporary files.
#[derive(Default, Debug)]
struct Submission {
    fields: HashMap<String, String>,
    files: Vec<UploadedFile>,
}

fn bad_multipart(e: MultipartError) -> ServiceError {
    ServiceError::BadRequest(format!("Could not read form: {}", e))
}

impl Submission {
    async fn read(mut payload: Multipart, upload_dir: &Path) -> Result<Self, ServiceError> {
        let mut submission = Self::default();
        while let Some(mut field) = payload.try_next().await.map_err(bad_multipart)? {
            let name = field.name().to_owned();
            let filename = field
                .content_disposition()
                .get_filename()
                .map(str::to_owned);
            if name == FILES_FIELD {
                let dir = upload_dir.to_owned();
                let filename = filename.unwrap_or_default();
                let mut upload =
                    run_blocking(move || Ok(UploadedFile::create(&dir, &filename)?)).await?;
                // Rejected parts are still drained so the next part can be read.
                while let Some(chunk) = field.try_next().await.map_err(bad_multipart)? {
                    if let Some(mut file) = upload.take() {
                        upload = Some(
                            run_blocking(move || {
                                file.write_chunk(&chunk)?;
                                Ok(file)
                            })
                            .await?,
                        );
                    }
                }
                submission.files.extend(upload);
                continue;
            }
            let mut data = Vec::new();
            while let Some(chunk) = field.try_next().await.map_err(bad_multipart)? {
                data.extend_from_slice(&chunk);
            }
            if filename.is_none() {
                let value = String::from_utf8(data).map_err(|_| {
                    ServiceError::BadRequest(format!("Form field {} is not valid UTF-8", name))
                })?;
                submission.fields.insert(name, value);
            }
        }
        Ok(submission)
    }

    fn required(&mut self, name: &str) -> Result<String, ServiceError> {
        self.fields
            .remove(name)
            .ok_or_else(|| ServiceError::BadRequest(format!("Missing form field: {}", name)))
    }
}

#[post("/admin/publish")]
pub async fn publish(
    config: Data<Config>,
    pool: Data<DbPool>,
    payload: Multipart,
) -> Result<HttpResponse, ServiceError> {
    let upload_dir = config.upload_dir();
    let mut submission = Submission::read(payload, &upload_dir).await?;
    let title = submission.required("title")?;
    let photographer = submission.required("photographer")?;
    let headline = submission.required("content")?;
    let body = submission.required("content_text")?;
    let category = submission.required("category")?;
    let files = submission.files;

    // No connection is held while the body streams in.
    let article = run_blocking(move || {
        let mut conn = pool.get()?;
        let media = upload::store_uploads(&upload_dir, files)?;
        let draft = ArticleDraft {
            title,
            photographer,
            headline,
            body,
            category,
            media,
        };
        Ok(Article::create(&mut conn, &draft)?)
    })
    .await?;
    log::info!(
        "published article {} {:?} with {} media file(s)",
        article.id,
        article.title,
        article.media.paths().len()
    );
    Ok(HttpResponse::SeeOther()
        .insert_header((
            header::LOCATION,
            format!("/admin/publish?published={}", article.id),
        ))
        .finish())
}
