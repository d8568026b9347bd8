use super::Media;
use crate::schema::articles;
use chrono::Local;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use serde::Serialize;

/// `October 18, 2026`
pub const ARTICLE_DATE_FORMAT: &str = "%B %d, %Y";

/// Category query value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "All";

#[derive(Serialize, Queryable, Clone, Debug)]
pub struct Article {
    pub id: i32,
    pub title: String,
    pub photographer: String,
    pub headline: String,
    pub body: String,
    pub category: String,
    #[diesel(deserialize_as = Option<String>)]
    pub media: Media,
    pub created_date: String,
}

/// Row shown on the admin dashboard.
#[derive(Serialize, Debug)]
pub struct ArticleSummary {
    pub id: i32,
    pub title: String,
    pub category: String,
    pub created_date: String,
}

impl From<Article> for ArticleSummary {
    fn from(article: Article) -> Self {
        Self {
            id: article.id,
            title: article.title,
            category: article.category,
            created_date: article.created_date,
        }
    }
}

/// Everything needed to publish an article except its id and date.
#[derive(Debug)]
pub struct ArticleDraft {
    pub title: String,
    pub photographer: String,
    pub headline: String,
    pub body: String,
    pub category: String,
    pub media: Media,
}

#[derive(Insertable)]
#[diesel(table_name = articles)]
struct NewArticle<'a> {
    pub title: &'a str,
    pub photographer: &'a str,
    pub headline: &'a str,
    pub body: &'a str,
    pub category: &'a str,
    pub media: Option<String>,
    pub created_date: String,
}

/// Listing filter. Both parts are optional and combine with AND.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ArticleFilter {
    pub category: Option<String>,
    pub search: Option<String>,
}

impl ArticleFilter {
    /// Blank search terms and blank or `All` categories mean "unfiltered".
    pub fn new(category: Option<&str>, search: Option<&str>) -> Self {
        let category = category
            .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES)
            .map(str::to_owned);
        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);
        Self { category, search }
    }

    fn apply<'a>(
        &'a self,
        mut query: articles::BoxedQuery<'a, Sqlite>,
    ) -> articles::BoxedQuery<'a, Sqlite> {
        if let Some(search) = &self.search {
            let pattern = format!("%{}%", escape_like(search));
            // LIKE is case-insensitive for ASCII in SQLite.
            query = query.filter(
                articles::headline
                    .like(pattern.clone())
                    .escape('\\')
                    .or(articles::body.like(pattern).escape('\\')),
            );
        }
        if let Some(category) = &self.category {
            query = query.filter(articles::category.eq(category.as_str()));
        }
        query
    }
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl Article {
    pub fn create(conn: &mut SqliteConnection, draft: &ArticleDraft) -> QueryResult<Article> {
        let new_article = NewArticle {
            title: &draft.title,
            photographer: &draft.photographer,
            headline: &draft.headline,
            body: &draft.body,
            category: &draft.category,
            media: draft.media.to_column(),
            created_date: Local::now().format(ARTICLE_DATE_FORMAT).to_string(),
        };
        diesel::insert_into(articles::table)
            .values(new_article)
            .get_result(conn)
    }

    pub fn find(conn: &mut SqliteConnection, id: i32) -> QueryResult<Option<Article>> {
        articles::table.find(id).first::<Article>(conn).optional()
    }

    /// Newest first.
    pub fn list(conn: &mut SqliteConnection, filter: &ArticleFilter) -> QueryResult<Vec<Article>> {
        filter
            .apply(articles::table.into_boxed())
            .order(articles::id.desc())
            .load::<Article>(conn)
    }

    /// Categories in use, alphabetical, without duplicates or blanks.
    pub fn categories(conn: &mut SqliteConnection) -> QueryResult<Vec<String>> {
        articles::table
            .select(articles::category)
            .filter(articles::category.ne(""))
            .distinct()
            .order(articles::category.asc())
            .load::<String>(conn)
    }

    pub fn count(conn: &mut SqliteConnection) -> QueryResult<i64> {
        articles::table.count().get_result(conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::TestEnv;

    fn draft(title: &str, category: &str, headline: &str, body: &str) -> ArticleDraft {
        ArticleDraft {
            title: title.to_owned(),
            photographer: "Staff".to_owned(),
            headline: headline.to_owned(),
            body: body.to_owned(),
            category: category.to_owned(),
            media: Media::default(),
        }
    }

    fn titles(articles: &[Article]) -> Vec<&str> {
        articles.iter().map(|a| a.title.as_str()).collect()
    }

    #[test]
    fn test_create_article() {
        let env = TestEnv::new();
        let mut conn = env.conn();
        let mut new = draft("test", "News", "Headline", "Body");
        new.media = Media::new(vec!["uploads/a.png".to_owned(), "uploads/b.mp4".to_owned()]);
        let created = Article::create(&mut conn, &new).expect("must succeed");
        let found = Article::find(&mut conn, created.id)
            .expect("query")
            .expect("must exist");
        assert_eq!(found.title, "test");
        assert_eq!(found.media.paths(), ["uploads/a.png", "uploads/b.mp4"]);
        assert!(!found.created_date.is_empty());
    }

    #[test]
    fn test_find_missing() {
        let env = TestEnv::new();
        let mut conn = env.conn();
        assert!(Article::find(&mut conn, 42).expect("query").is_none());
    }

    #[test]
    fn test_ids_are_not_reused() {
        let env = TestEnv::new();
        let mut conn = env.conn();
        let first = Article::create(&mut conn, &draft("a", "News", "", "")).unwrap();
        let second = Article::create(&mut conn, &draft("b", "News", "", "")).unwrap();
        assert!(second.id > first.id);
    }

    #[test]
    fn test_list_newest_first() {
        let env = TestEnv::new();
        let mut conn = env.conn();
        Article::create(&mut conn, &draft("A1", "News", "", "")).unwrap();
        Article::create(&mut conn, &draft("A2", "News", "", "")).unwrap();
        let articles = Article::list(&mut conn, &ArticleFilter::default()).unwrap();
        assert_eq!(titles(&articles), ["A2", "A1"]);
    }

    #[test]
    fn test_list_filters() {
        let env = TestEnv::new();
        let mut conn = env.conn();
        for (title, category, headline, body) in &[
            ("flood", "News", "Flood warning", "Rivers rise"),
            ("essay", "Opinion", "On rivers", "An essay"),
            ("poem", "Literary", "Verse", "nothing here"),
        ] {
            Article::create(&mut conn, &draft(title, category, headline, body)).unwrap();
        }

        let by_text = Article::list(&mut conn, &ArticleFilter::new(None, Some("RIVERS"))).unwrap();
        assert_eq!(titles(&by_text), ["essay", "flood"]);

        let by_category =
            Article::list(&mut conn, &ArticleFilter::new(Some("News"), None)).unwrap();
        assert_eq!(titles(&by_category), ["flood"]);

        let both = ArticleFilter::new(Some("Opinion"), Some("rivers"));
        assert_eq!(titles(&Article::list(&mut conn, &both).unwrap()), ["essay"]);

        let none = ArticleFilter::new(Some("Literary"), Some("rivers"));
        assert!(Article::list(&mut conn, &none).unwrap().is_empty());
    }

    #[test]
    fn test_search_is_literal() {
        let env = TestEnv::new();
        let mut conn = env.conn();
        Article::create(&mut conn, &draft("sale", "News", "50% off", "")).unwrap();
        Article::create(&mut conn, &draft("other", "News", "500 days", "")).unwrap();
        let found = Article::list(&mut conn, &ArticleFilter::new(None, Some("50%"))).unwrap();
        assert_eq!(titles(&found), ["sale"]);
    }

    #[test]
    fn test_filter_normalisation() {
        assert_eq!(ArticleFilter::new(None, Some("   ")), ArticleFilter::default());
        assert_eq!(ArticleFilter::new(Some("All"), Some("")), ArticleFilter::default());
        assert_eq!(ArticleFilter::new(Some(""), None), ArticleFilter::default());
        assert_eq!(
            ArticleFilter::new(Some("Arts"), Some("  paint ")),
            ArticleFilter {
                category: Some("Arts".to_owned()),
                search: Some("paint".to_owned()),
            }
        );
    }

    #[test]
    fn test_categories_and_count() {
        let env = TestEnv::new();
        let mut conn = env.conn();
        for category in &["Opinion", "News", "Opinion", "", "Arts"] {
            Article::create(&mut conn, &draft("x", category, "", "")).unwrap();
        }
        assert_eq!(
            Article::categories(&mut conn).unwrap(),
            vec!["Arts", "News", "Opinion"]
        );
        assert_eq!(Article::count(&mut conn).unwrap(), 5);
    }
}
