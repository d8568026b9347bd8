use serde::Serialize;

/// Sections an article can be filed under. The store keeps the display name
/// as plain text; the publish form only offers these.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    News,
    Updates,
    Opinion,
    Feature,
    Literary,
    Komiks,
    Arts,
    Photos,
    Videos,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::News,
        Category::Updates,
        Category::Opinion,
        Category::Feature,
        Category::Literary,
        Category::Komiks,
        Category::Arts,
        Category::Photos,
        Category::Videos,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::News => "News",
            Category::Updates => "Updates",
            Category::Opinion => "Opinion",
            Category::Feature => "Feature",
            Category::Literary => "Literary",
            Category::Komiks => "Komiks",
            Category::Arts => "Arts",
            Category::Photos => "Photos",
            Category::Videos => "Videos",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.as_str()).collect()
    }
}
