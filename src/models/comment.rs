use crate::schema::comments;
use chrono::Local;
use diesel::prelude::*;
use serde::Serialize;

/// `October 18, 2026 09:05 PM`
pub const COMMENT_DATE_FORMAT: &str = "%B %d, %Y %I:%M %p";

/// Stored name of commenters who leave the name empty.
pub const ANONYMOUS: &str = "Anonymous";

#[derive(Serialize, Queryable, Clone, Debug)]
pub struct Comment {
    pub id: i32,
    pub article_id: i32,
    pub name: String,
    pub comment: String,
    pub created_date: String,
}

#[derive(Insertable)]
#[diesel(table_name = comments)]
struct NewComment<'a> {
    pub article_id: i32,
    pub name: &'a str,
    pub comment: &'a str,
    pub created_date: String,
}

impl Comment {
    pub fn create(
        conn: &mut SqliteConnection,
        article_id: i32,
        name: Option<&str>,
        comment: &str,
    ) -> QueryResult<Comment> {
        let name = match name {
            Some(name) if !name.is_empty() => name,
            _ => ANONYMOUS,
        };
        let new_comment = NewComment {
            article_id,
            name,
            comment,
            created_date: Local::now().format(COMMENT_DATE_FORMAT).to_string(),
        };
        diesel::insert_into(comments::table)
            .values(new_comment)
            .get_result(conn)
    }

    /// Newest first.
    pub fn list_for_article(
        conn: &mut SqliteConnection,
        article_id: i32,
    ) -> QueryResult<Vec<Comment>> {
        comments::table
            .filter(comments::article_id.eq(article_id))
            .order(comments::id.desc())
            .load::<Comment>(conn)
    }

    pub fn count(conn: &mut SqliteConnection) -> QueryResult<i64> {
        comments::table.count().get_result(conn)
    }
}
