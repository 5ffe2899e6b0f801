//! Message bundle sources.
//!
//! - `embedded` - Bundles compiled into the binary (default)
//! - `file` - Bundles read from a configured directory

mod embedded;
mod file;

pub use embedded::EmbeddedMessageSource;
pub use file::FileMessageSource;
