mod backend;
mod errors;
mod file;
mod local;
mod models;
pub mod naming;
mod service;

#[cfg(feature = "s3")]
mod s3;

pub use backend::{BlobContainer, ContainerProvider};
pub use errors::*;
pub use file::{FormFile, UploadedFile};
pub use local::LocalBackend;
pub use models::{BlobHandle, ByteReader};
pub use service::BlobUploadService;

#[cfg(feature = "s3")]
pub use s3::S3Backend;
