use thiserror::Error;
use uuid::Uuid;

use crate::models::ReleaseStatus;

#[derive(Error, Debug)]
pub enum GeneralError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Failure of the backing record store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Slug {0:?} is already taken")]
    SlugConflict(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn user_message(&self) -> &'static str {
        "Something went wrong while saving your changes. Please try again."
    }
}

/// Malformed input, detected before any store or storage call.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{0:?} is not a valid email address")]
    InvalidEmail(String),

    #[error("{0:?} is not a known category")]
    UnknownCategory(String),

    #[error("{0:?} is not an allowed image type")]
    UnsupportedImageType(String),

    #[error("Image is {size} bytes, the limit is {max} bytes")]
    ImageTooLarge { size: usize, max: usize },
}

impl ValidationError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Required(field) => format!("Please fill in the {field} field."),
            Self::InvalidEmail(_) => "Please enter a valid email address.".to_string(),
            Self::UnknownCategory(_) => "Please select a category.".to_string(),
            Self::UnsupportedImageType(_) => {
                "Please select a valid image file (JPG, PNG, GIF, WebP)".to_string()
            }
            Self::ImageTooLarge { .. } => "Image must be smaller than 5MB".to_string(),
        }
    }
}

/// Failure of the image blob storage.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Storage access denied")]
    PermissionDenied,

    #[error("Storage bucket {0:?} not found")]
    BucketMissing(String),

    #[error("{0:?} does not belong to this storage")]
    ForeignUrl(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl UploadError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::PermissionDenied => {
                "Storage access denied. Please check your storage permissions."
            }
            Self::BucketMissing(_) => {
                "Storage bucket not found. Please check your storage configuration."
            }
            Self::ForeignUrl(_) => "That image is not managed by this site.",
            Self::Io(_) => "Failed to upload image. Please try again.",
        }
    }
}

/// Failure of a review-workflow action.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("Press release {0} not found")]
    NotFound(Uuid),

    #[error("Cannot move a {from} press release to {to}")]
    InvalidTransition {
        from: ReleaseStatus,
        to: ReleaseStatus,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl WorkflowError {
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound(_) => "That press release no longer exists.".to_string(),
            Self::InvalidTransition { from, .. } => {
                format!("This press release is already {}.", from.as_str())
            }
            Self::Validation(e) => e.user_message(),
            Self::Store(e) => e.user_message().to_string(),
        }
    }
}

pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23505"),
        _ => false,
    }
}
