pub mod constants;
pub mod file_names;
pub mod mime;

pub use constants::*;
pub use file_names::{entry_file_name, image_file_name};
