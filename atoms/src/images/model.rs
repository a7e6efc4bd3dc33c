use serde::{Deserialize, Serialize};
use std::fmt;

/// Pixel size used by the sized lh3 template when a caller asks for one without a value.
pub const DEFAULT_IMAGE_SIZE: u32 = 800;

/// Bare Google Drive file identifier, e.g. `1AbC-d_9`.
/// Built through `FileId::extract`, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileId(pub(crate) String);

impl FileId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which lh3 template to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageSize {
    /// `https://lh3.googleusercontent.com/d/<id>`
    #[default]
    Original,
    /// `https://lh3.googleusercontent.com/d/<id>=w<n>-h<n>-c`
    Square(u32),
}

impl ImageSize {
    pub fn pixels(&self) -> Option<u32> {
        match self {
            ImageSize::Original => None,
            ImageSize::Square(px) => Some(*px),
        }
    }
}

/// Body of POST /api/generate-lh3
#[derive(Debug, Deserialize)]
pub struct Lh3Request {
    #[serde(rename = "fileId", alias = "file_id", default)]
    pub file_id: Option<String>,
    #[serde(default)]
    pub size: Option<u32>,
}

/// Response of POST /api/generate-lh3.
/// Carries both `url` and `lh3_url` so older front-end readers keep working.
#[derive(Debug, Serialize)]
pub struct Lh3Response {
    pub file_id: String,
    pub lh3_url: String,
    pub url: String,
    pub size: Option<u32>,
}

/// Response of GET /api/google-image/{id}
#[derive(Debug, Serialize)]
pub struct ImageUrlResponse {
    pub url: String,
}
