use std::fmt;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use url::Url;
use uuid::Uuid;

/// A fetched image, kept in memory until something renders or saves it.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageHandle {
    data: Arc<[u8]>,
    content_type: String,
    source: Url,
}

impl ImageHandle {
    pub fn new(data: impl Into<Arc<[u8]>>, content_type: impl Into<String>, source: Url) -> Self {
        Self {
            data: data.into(),
            content_type: content_type.into(),
            source,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn source(&self) -> &Url {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// File extension matching the declared content type.
    pub fn extension(&self) -> &'static str {
        let essence = self
            .content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/png" => "png",
            "image/gif" => "gif",
            "image/webp" => "webp",
            "image/svg+xml" => "svg",
            _ => "bin",
        }
    }

    /// Width and height read from the image header, if the format is recognised.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        image::ImageReader::new(Cursor::new(&self.data[..]))
            .with_guessed_format()
            .ok()?
            .into_dimensions()
            .ok()
    }

    /// Write the payload to a fresh file under `dir` and return its path.
    pub fn persist(&self, dir: &Path) -> std::io::Result<PathBuf> {
        let path = dir.join(format!("catsays-{}.{}", Uuid::new_v4(), self.extension()));
        std::fs::write(&path, &self.data)?;
        Ok(path)
    }

    /// Write the payload to exactly `path`.
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, &self.data)
    }
}

impl fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageHandle")
            .field("len", &self.data.len())
            .field("content_type", &self.content_type)
            .field("source", &self.source.as_str())
            .finish()
    }
}
