mod db_connection;
mod query;
pub use db_connection::DbConnection;
pub use query::Query;
