use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("blocking task failed")]
    Blocking(#[from] BlockingError),
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{}", self);
            HttpResponse::build(status).finish()
        } else {
            HttpResponse::build(status).body(self.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let not_found = ServiceError::NotFound("Article not found: 3".to_owned());
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);
        let bad_request = ServiceError::BadRequest("Missing form field: title".to_owned());
        assert_eq!(bad_request.status_code(), StatusCode::BAD_REQUEST);
        let database = ServiceError::from(diesel::result::Error::NotFound);
        assert_eq!(database.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            database.error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
