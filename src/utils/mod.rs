//! Shared helpers: process execution, MIME types, paths, pluralization.

pub mod exec;
pub mod mime;
pub mod path;
pub mod plural;
