//! Image-source migration for the upload pass

pub mod downloaders;
pub mod image_migrator;
pub mod notion;
pub mod progress;
pub mod types;

pub use downloaders::ImageDownloader;
pub use image_migrator::{ImageMigrator, legacy_images};
pub use notion::{NotionClient, UploadFileUrl};
pub use progress::{NoOpProgress, ProgressReporter};
pub use types::{DownloadError, FailureStage, ImageFailure, ImageMigrationResult, UploadError};
