use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Kind of remote resource. Governs the endpoint segment, the URL token and
/// whether the stored identifier keeps its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum ResourceType {
    #[default]
    Image,
    Pdf,
    Video,
    Raw,
}

impl ResourceType {
    /// Token the remote service uses in URLs and endpoint paths.
    ///
    /// Pdf shares the `image` token with Image.
    #[must_use]
    pub fn wire_token(self) -> &'static str {
        match self {
            ResourceType::Image | ResourceType::Pdf => "image",
            ResourceType::Video => "video",
            ResourceType::Raw => "raw",
        }
    }

    /// Raw files are stored under their full name, extension included.
    #[must_use]
    pub fn keeps_extension(self) -> bool {
        matches!(self, ResourceType::Raw)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceType::Image => "image",
            ResourceType::Pdf => "pdf",
            ResourceType::Video => "video",
            ResourceType::Raw => "raw",
        };
        f.write_str(name)
    }
}

impl FromStr for ResourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image" => Ok(ResourceType::Image),
            "pdf" => Ok(ResourceType::Pdf),
            "video" => Ok(ResourceType::Video),
            "raw" => Ok(ResourceType::Raw),
            other => Err(format!("unknown resource type '{other}'")),
        }
    }
}

/// Body of a successful upload, e.g.
/// `{"public_id":"Downloads/file","version":1369431906,"format":"png","resource_type":"image"}`
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct UploadResponse {
    pub public_id: String,
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub resource_type: String,
    #[serde(default, rename = "bytes")]
    pub size: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ErrorMessage {
    pub message: String,
}

/// Body of a destroy call: `{"result":"ok"}` or `{"error":{"message":"..."}}`
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
pub struct DestroyResponse {
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub error: Option<ErrorMessage>,
}

/// Outcome of uploading one local file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedResource {
    pub local_path: PathBuf,
    pub public_id: String,
    pub format: String,
    pub resource_type: ResourceType,
    pub size: u64,
    pub url: String,
    /// SHA-1 of the content that was sent
    pub checksum: String,
}
