// Re-export model types and service functions
pub mod error;
pub mod model;
pub mod service;
pub mod http;

pub use error::ImageError;
pub use model::{FileId, ImageSize, ImageUrlResponse, Lh3Request, Lh3Response, DEFAULT_IMAGE_SIZE};
pub use service::*;
pub use http::*;
