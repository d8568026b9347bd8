mod article;
mod category;
mod comment;
mod media;
pub use article::{Article, ArticleDraft, ArticleFilter, ArticleSummary, ALL_CATEGORIES};
pub use category::Category;
pub use comment::{Comment, ANONYMOUS};
pub use media::Media;
