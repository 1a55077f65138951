//! Movable Type export files: data model and parser

pub mod entry;
pub mod parser;

pub use entry::{Comment, Entry};
pub use parser::parse_export;
