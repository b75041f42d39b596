//! Component sinks.
//!
//! The decomposition driver hands every extracted component to a
//! [`ComponentSink`]. A sink either stores it or returns an error, which
//! aborts the run.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::format::{save, LabelCodec};
use crate::algorithms::decompose::Component;
use crate::Result;

/// Destination for extracted components.
pub trait ComponentSink<L> {
    /// Store one component.
    fn persist(&mut self, component: &Component<L>) -> Result<()>;
}

impl<L, S> ComponentSink<L> for &mut S
where
    S: ComponentSink<L> + ?Sized,
{
    fn persist(&mut self, component: &Component<L>) -> Result<()> {
        (**self).persist(component)
    }
}

/// Keeps every component in memory.
#[derive(Debug, Clone)]
pub struct MemorySink<L> {
    components: Vec<Component<L>>,
}

impl<L> Default for MemorySink<L> {
    fn default() -> Self {
        Self {
            components: Vec::new(),
        }
    }
}

impl<L> MemorySink<L> {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Components received so far, in emission order.
    pub fn components(&self) -> &[Component<L>] {
        &self.components
    }

    /// Number of components received.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// True if nothing was received.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Take the collected components.
    pub fn into_components(self) -> Vec<Component<L>> {
        self.components
    }
}

impl<L: Clone> ComponentSink<L> for MemorySink<L> {
    fn persist(&mut self, component: &Component<L>) -> Result<()> {
        self.components.push(component.clone());
        Ok(())
    }
}

/// Writes each component as an `.egr` file named after the component.
///
/// Component names are resolved relative to the sink directory; missing
/// parent directories are created on demand.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    /// Sink rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    /// Root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Path a component with `name` is written to.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

impl<L: LabelCodec> ComponentSink<L> for DirectorySink {
    fn persist(&mut self, component: &Component<L>) -> Result<()> {
        let path = self.path_for(&component.name);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        save(&path, &component.graph)?;
        debug!("Wrote {}", path.display());
        self.written.push(path);
        Ok(())
    }
}
