use crate::db::{Conn, DbPool};
use crate::error::ServiceError;
use actix_web::error::ErrorInternalServerError;
use actix_web::{dev, web::Data, Error, FromRequest, HttpRequest};
use futures::future::{err, ok, Ready};
use std::ops::{Deref, DerefMut};

/// A pooled connection checked out for the duration of one request.
pub struct DbConnection {
    pub conn: Conn,
}

impl Deref for DbConnection {
    type Target = Conn;

    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}

impl DerefMut for DbConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.conn
    }
}

impl FromRequest for DbConnection {
    type Error = Error;
    type Future = Ready<Result<Self, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut dev::Payload) -> Self::Future {
        let pool = match req.app_data::<Data<DbPool>>() {
            Some(pool) => pool,
            None => return err(ErrorInternalServerError("database pool is not configured")),
        };
        match pool.get() {
            Ok(conn) => ok(DbConnection { conn }),
            Err(e) => err(ServiceError::Pool(e).into()),
        }
    }
}
