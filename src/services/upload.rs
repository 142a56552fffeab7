//! Press-release image uploads: validation plus a blob-storage seam.

use async_trait::async_trait;
use chrono::Utc;
use mime::Mime;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::common::{UploadError, ValidationError};

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024; // 5MB

/// Image subtypes accepted under `image/*`. `jpg` is not registered but
/// browsers send it.
const ALLOWED_SUBTYPES: [&str; 5] = ["jpeg", "jpg", "png", "gif", "webp"];

/// Folder inside the bucket that holds press-release images.
const OBJECT_PREFIX: &str = "press-releases";

#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Checks type and size; returns the file extension to store under.
    pub fn validate(&self) -> Result<&'static str, ValidationError> {
        let extension = allowed_extension(&self.content_type)
            .ok_or_else(|| ValidationError::UnsupportedImageType(self.content_type.clone()))?;

        if self.bytes.len() > MAX_IMAGE_BYTES {
            return Err(ValidationError::ImageTooLarge {
                size: self.bytes.len(),
                max: MAX_IMAGE_BYTES,
            });
        }

        Ok(extension)
    }
}

fn allowed_extension(content_type: &str) -> Option<&'static str> {
    let mime: Mime = content_type.trim().parse().ok()?;
    if mime.type_() != mime::IMAGE {
        return None;
    }

    let subtype = mime.subtype().as_str().to_ascii_lowercase();
    if !ALLOWED_SUBTYPES.contains(&subtype.as_str()) {
        return None;
    }

    Some(match subtype.as_str() {
        "jpeg" | "jpg" => "jpg",
        "png" => "png",
        "gif" => "gif",
        _ => "webp",
    })
}

/// `press-releases/{unix_millis}-{6 hex}.{ext}`
pub fn object_path(extension: &str) -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!(
        "{OBJECT_PREFIX}/{}-{}.{extension}",
        Utc::now().timestamp_millis(),
        &random[..6]
    )
}

#[derive(Debug)]
pub enum UploadFailure {
    Invalid(ValidationError),
    Storage(UploadError),
}

impl UploadFailure {
    pub fn user_message(&self) -> String {
        match self {
            Self::Invalid(e) => e.user_message(),
            Self::Storage(e) => e.user_message().to_string(),
        }
    }
}

impl From<ValidationError> for UploadFailure {
    fn from(e: ValidationError) -> Self {
        Self::Invalid(e)
    }
}

impl From<UploadError> for UploadFailure {
    fn from(e: UploadError) -> Self {
        Self::Storage(e)
    }
}

#[async_trait]
pub trait BlobStorage: Send + Sync {
    /// Stores `bytes` at `path` and returns the public URL.
    async fn put(&self, path: &str, bytes: &[u8], content_type: &str) -> Result<String, UploadError>;

    /// Removes the blob behind a URL previously returned by [`BlobStorage::put`].
    async fn delete(&self, url: &str) -> Result<(), UploadError>;

    /// True when `url` points at an image this storage would have issued.
    fn owns(&self, url: &str) -> bool;
}

/// Validates, then stores. Invalid uploads never reach `storage`.
pub async fn upload_image<B>(storage: &B, upload: &ImageUpload) -> Result<String, UploadFailure>
where
    B: BlobStorage + ?Sized,
{
    let extension = upload.validate()?;
    let path = object_path(extension);

    let url = storage
        .put(&path, &upload.bytes, &upload.content_type)
        .await?;
    log::info!(
        "Uploaded {} ({} bytes) to {}",
        upload.file_name,
        upload.bytes.len(),
        url
    );

    Ok(url)
}

/// Blob storage on the local filesystem. `root` plays the bucket and must
/// exist; uploads are served back under `url_prefix`.
pub struct LocalBlobStorage {
    root: PathBuf,
    url_prefix: String,
}

impl LocalBlobStorage {
    pub fn new(root: impl Into<PathBuf>, url_prefix: &str) -> Self {
        Self {
            root: root.into(),
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn ensure_bucket(&self) -> Result<(), UploadError> {
        match fs::metadata(&self.root).await {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(UploadError::BucketMissing(self.root.display().to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(UploadError::BucketMissing(self.root.display().to_string()))
            }
            Err(e) => Err(io_error(e)),
        }
    }

    fn resolve(&self, relative: &str) -> Option<PathBuf> {
        let relative = Path::new(relative);
        let safe = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));

        safe.then(|| self.root.join(relative))
    }

    /// Maps one of our public URLs back onto the bucket.
    fn locate(&self, url: &str) -> Option<PathBuf> {
        url.strip_prefix(&self.url_prefix)
            .and_then(|rest| rest.strip_prefix('/'))
            .and_then(|relative| self.resolve(relative))
    }
}

fn io_error(e: std::io::Error) -> UploadError {
    match e.kind() {
        ErrorKind::PermissionDenied => UploadError::PermissionDenied,
        _ => UploadError::Io(e),
    }
}

#[async_trait]
impl BlobStorage for LocalBlobStorage {
    async fn put(&self, path: &str, bytes: &[u8], _content_type: &str) -> Result<String, UploadError> {
        self.ensure_bucket().await?;

        let target = self
            .resolve(path)
            .ok_or_else(|| UploadError::ForeignUrl(path.to_string()))?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await.map_err(io_error)?;
        }
        fs::write(&target, bytes).await.map_err(io_error)?;

        Ok(format!("{}/{}", self.url_prefix, path))
    }

    async fn delete(&self, url: &str) -> Result<(), UploadError> {
        let target = self
            .locate(url)
            .ok_or_else(|| UploadError::ForeignUrl(url.to_string()))?;

        match fs::remove_file(&target).await {
            Ok(()) => Ok(()),
            // already gone
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(e)),
        }
    }

    fn owns(&self, url: &str) -> bool {
        self.locate(url)
            .and_then(|target| {
                target
                    .strip_prefix(&self.root)
                    .ok()
                    .map(|p| p.parent() == Some(Path::new(OBJECT_PREFIX)))
            })
            .unwrap_or(false)
    }
}
