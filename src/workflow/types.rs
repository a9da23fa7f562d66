use serde::Deserialize;
use std::path::Path;

/// Image formats the app accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Jpeg,
    Png,
}

impl MediaType {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }
}

/// A validated local image, held in memory until it is sent off.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedImage {
    pub file_name: String,
    pub media_type: MediaType,
    pub bytes: Vec<u8>,
}

impl SelectedImage {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Where the original ended up in the object store.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadResult {
    pub public_url: String,
    pub object_path: String,
    /// Timestamped file name without the key prefix. The upscale service
    /// wants this exact name.
    pub file_name: String,
}

/// Quality metrics reported by the upscale service, displayed verbatim.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalysisReport {
    pub duration: String,
    pub psnr: String,
    #[serde(default)]
    pub improvement: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpscaleResult {
    pub upscaled_url: String,
    pub analysis: Option<AnalysisReport>,
}
