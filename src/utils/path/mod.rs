//! Path and URL utilities.
//!
//! - [`fs`]: Filesystem helpers (`ensure_dir`, `normalize_path`, `expand_path`)
//! - [`route`]: URL joining for stylesheet references (`url_join`)

pub mod fs;
pub mod route;

pub use fs::{ensure_dir, expand_path, normalize_path};
pub use route::url_join;
