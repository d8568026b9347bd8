use crate::config::Config;
use serde::Serialize;

/// Separator of the `media` column. Sanitized upload names never contain it.
const DELIMITER: char = ',';

/// Ordered list of media paths (`uploads/<file>`) attached to an article.
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct Media(Vec<String>);

impl Media {
    pub fn new(paths: Vec<String>) -> Self {
        Self(paths)
    }

    pub fn paths(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Column representation; an article without media stores NULL.
    pub fn to_column(&self) -> Option<String> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.join(&DELIMITER.to_string()))
        }
    }

    pub fn urls(&self, config: &Config) -> Vec<String> {
        self.0.iter().map(|path| config.media_url(path)).collect()
    }
}

impl From<Option<String>> for Media {
    fn from(column: Option<String>) -> Self {
        match column {
            Some(column) if !column.is_empty() => {
                Self(column.split(DELIMITER).map(str::to_owned).collect())
            }
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_representation() {
        assert_eq!(Media::default().to_column(), None);
        assert_eq!(Media::from(None), Media::default());
        assert_eq!(Media::from(Some(String::new())), Media::default());

        let media = Media::from(Some("uploads/a.png,uploads/b.mp4".to_owned()));
        assert_eq!(media.paths(), ["uploads/a.png", "uploads/b.mp4"]);
        assert_eq!(
            media.to_column().as_deref(),
            Some("uploads/a.png,uploads/b.mp4")
        );
    }

    #[test]
    fn test_urls() {
        let media = Media::new(vec!["uploads/a.png".to_owned(), "uploads/b.mp4".to_owned()]);
        assert_eq!(
            media.urls(&Config::default()),
            vec!["/static/uploads/a.png", "/static/uploads/b.mp4"]
        );
    }
}
