pub mod config;
pub mod record;
pub mod tag;

pub use config::{ConfigError, ManifoldConfig};
pub use record::*;
pub use tag::{ContentDigest, TaggingStrategy};
