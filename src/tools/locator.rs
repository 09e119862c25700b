//! Tool resolution with a write-once registry.
//!
//! A [`ToolLocator`] is constructed once per process and handed to every
//! pipeline run. The first run resolves all required tools; later runs reuse
//! the cached [`ToolRegistry`].

use super::{Tool, ToolOverrides};
use crate::debug;
use crate::error::{FontFaceError, Result};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Finds an executable by name.
pub trait Resolve: Send + Sync {
    fn resolve(&self, command: &str) -> Option<PathBuf>;
}

/// Resolves executables through `PATH`, like `which`.
#[derive(Debug, Default, Clone, Copy)]
pub struct WhichResolver;

impl Resolve for WhichResolver {
    fn resolve(&self, command: &str) -> Option<PathBuf> {
        which::which(command).ok()
    }
}

/// Resolved executable paths, immutable once built.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    paths: FxHashMap<Tool, PathBuf>,
}

impl ToolRegistry {
    /// Path of `tool`, failing if it was not part of the required set.
    pub fn path(&self, tool: Tool) -> Result<&Path> {
        self.paths
            .get(&tool)
            .map(PathBuf::as_path)
            .ok_or_else(|| FontFaceError::ToolResolution {
                missing: vec![tool.command().to_string()],
                hint: install_hint(&[tool.command()]),
            })
    }
}

/// Lazily builds the [`ToolRegistry`] exactly once.
pub struct ToolLocator {
    required: Vec<Tool>,
    overrides: ToolOverrides,
    resolver: Box<dyn Resolve>,
    registry: OnceLock<ToolRegistry>,
    /// Serializes the first resolution so racing callers never see a partial registry.
    init: Mutex<()>,
}

impl ToolLocator {
    pub fn new(required: Vec<Tool>, overrides: ToolOverrides, resolver: impl Resolve + 'static) -> Self {
        Self {
            required,
            overrides,
            resolver: Box::new(resolver),
            registry: OnceLock::new(),
            init: Mutex::new(()),
        }
    }

    /// Resolve all required tools, or return the cached registry.
    ///
    /// Fails listing every tool that could not be found. A failed attempt
    /// caches nothing, so the next call resolves again.
    pub fn registry(&self) -> Result<&ToolRegistry> {
        if let Some(registry) = self.registry.get() {
            return Ok(registry);
        }

        let _guard = self.init.lock();
        if let Some(registry) = self.registry.get() {
            return Ok(registry);
        }

        let registry = self.locate()?;
        Ok(self.registry.get_or_init(|| registry))
    }

    fn locate(&self) -> Result<ToolRegistry> {
        let mut paths = FxHashMap::default();
        let mut missing = Vec::new();

        for &tool in &self.required {
            let path = match self.overrides.get(tool) {
                Some(path) => Some(path.clone()),
                None => self.resolver.resolve(tool.command()),
            };
            match path {
                Some(path) => {
                    debug!("tools"; "{tool} -> {}", path.display());
                    paths.insert(tool, path);
                }
                None => missing.push(tool.command()),
            }
        }

        if !missing.is_empty() {
            return Err(FontFaceError::ToolResolution {
                missing: missing.iter().map(|m| (*m).to_string()).collect(),
                hint: install_hint(&missing),
            });
        }

        Ok(ToolRegistry { paths })
    }
}

fn install_hint(missing: &[&str]) -> String {
    format!(
        "We are missing some required font packages.\nThat can be installed with:\nbrew install {}",
        missing.join(" ")
    )
}
