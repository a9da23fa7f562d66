mod storage;
mod types;
mod upscaler;
mod validate;

pub use storage::StorageClient;
pub use types::{AnalysisReport, MediaType, SelectedImage, UploadResult, UpscaleResult};
pub use upscaler::request_upscale;
pub use validate::validate_candidate;
