use crate::error::ServiceError;
use actix_web::{get, http::header, web, HttpResponse};
use serde::{Deserialize, Serialize};
pub mod admin;
pub mod article;
pub mod user;

/// Envelope of every view payload.
#[derive(Serialize, Deserialize, Debug)]
pub struct Response<T> {
    pub status: String,
    pub result: T,
}

impl<T: Serialize> Response<T> {
    pub fn ok(result: T) -> HttpResponse {
        HttpResponse::Ok().json(Response {
            status: "OK".to_owned(),
            result,
        })
    }
}

/// Runs diesel and filesystem work on the blocking thread pool.
pub(crate) async fn run_blocking<F, T>(f: F) -> Result<T, ServiceError>
where
    F: FnOnce() -> Result<T, ServiceError> + Send + 'static,
    T: Send + 'static,
{
    web::block(f).await?
}

#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, "/user"))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_rt::test]
    async fn test_index_redirects_to_listing() {
        let app = test::init_service(App::new().service(index)).await;
        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 302);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/user");
    }
}
