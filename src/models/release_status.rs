use serde::{Deserialize, Serialize};

/// Lifecycle state of a press release.
///
/// `Draft` is the only state with outgoing transitions: it moves to
/// `Published` on approval or to `Rejected` on rejection. Neither target
/// state leads back to `Draft`.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
    sqlx::Type,
)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReleaseStatus {
    #[default]
    Draft,
    Published,
    Rejected,
}

impl ReleaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Rejected => "rejected",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Published => "Published",
            Self::Rejected => "Rejected",
        }
    }

    pub fn can_transition_to(&self, next: ReleaseStatus) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::Published) | (Self::Draft, Self::Rejected)
        )
    }
}

impl std::fmt::Display for ReleaseStatus {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl PartialEq<&str> for ReleaseStatus {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl std::str::FromStr for ReleaseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "rejected" => Ok(Self::Rejected),
            _ => Err(format!("invalid release status: {}", s)),
        }
    }
}
