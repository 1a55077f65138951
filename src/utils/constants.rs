//! Shared configuration constants
//!
//! Default values used by the config builder and the passes, kept in one
//! place to avoid magic numbers.

use std::time::Duration;

/// Destination API base URL
pub const DEFAULT_NOTION_API_BASE: &str = "https://www.notion.so";

/// Image sources on the legacy blog host. Only these are re-hosted.
pub const DEFAULT_LEGACY_MEDIA_PATTERN: &str = r"hatena\.com";

/// Pause between documents in the upload pass
///
/// The destination API rate-limits uploads; one document every three
/// seconds stays under the limit for typical posts with a handful of images.
pub const DEFAULT_UPLOAD_INTERVAL: Duration = Duration::from_secs(3);

/// Timeout for a single image download or upload request
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Maximum size of a downloaded image: 20MB
pub const DEFAULT_MAX_IMAGE_SIZE: usize = 20 * 1024 * 1024;

/// File name of the metadata CSV inside the csv directory
pub const METADATA_FILE_NAME: &str = "meta.csv";

/// Date format used in the metadata CSV
pub const METADATA_DATE_FORMAT: &str = "%Y/%m/%d";

/// User agent sent with downloads and API calls
pub const USER_AGENT: &str = concat!("mtmigrate/", env!("CARGO_PKG_VERSION"));
