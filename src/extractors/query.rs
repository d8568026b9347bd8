//! Query extractor

use actix_web::error::ErrorBadRequest;
use actix_web::{dev, Error, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use serde::de;
use std::{fmt, ops};

/// Query string extractor backed by `serde_qs`. A malformed query string is a
/// bad request; absent parameters deserialize as `None`.
pub struct Query<T>(pub T);

impl<T> Query<T> {
    /// Deconstruct to a inner value
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> ops::Deref for Query<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: fmt::Debug> fmt::Debug for Query<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<T> FromRequest for Query<T>
where
    T: de::DeserializeOwned,
{
    type Error = Error;
    type Future = Ready<Result<Self, Error>>;

    fn from_request(req: &HttpRequest, _: &mut dev::Payload) -> Self::Future {
        ready(
            serde_qs::from_str::<T>(req.query_string())
                .map(Query)
                .map_err(|e| ErrorBadRequest(format!("Could not extract query: {}", e))),
        )
    }
}
