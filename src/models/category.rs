use serde::{Deserialize, Serialize};

/// Fixed set of categories a submission may be filed under.
///
/// Records store the display label as plain text; the enum is only
/// consulted when a submission is accepted.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Category {
    Business,
    Technology,
    HealthWellness,
    Education,
    Finance,
    RealEstate,
    Entertainment,
    Sports,
    Environment,
    Politics,
    Other,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Business,
        Category::Technology,
        Category::HealthWellness,
        Category::Education,
        Category::Finance,
        Category::RealEstate,
        Category::Entertainment,
        Category::Sports,
        Category::Environment,
        Category::Politics,
        Category::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Business => "Business",
            Self::Technology => "Technology",
            Self::HealthWellness => "Health & Wellness",
            Self::Education => "Education",
            Self::Finance => "Finance",
            Self::RealEstate => "Real Estate",
            Self::Entertainment => "Entertainment",
            Self::Sports => "Sports",
            Self::Environment => "Environment",
            Self::Politics => "Politics",
            Self::Other => "Other",
        }
    }

    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(Category::label).collect()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| format!("unknown category: {}", s))
    }
}
