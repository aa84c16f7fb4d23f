pub use crate::settings::Settings;
pub use npy_core::{ElementType, Number};

pub use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
