//! Built-in renderers

use super::{Renderer, walk};
use crate::types::{Package, PathSegment, format_scalar};
use std::fmt;

/// Indented outline, one line per node with its tag and wire size
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeRenderer;

impl TreeRenderer {
    pub const KEY: &'static str = "tree";
}

impl Renderer for TreeRenderer {
    fn render(&self, package: &Package, out: &mut dyn fmt::Write) -> fmt::Result {
        for entry in walk(package) {
            let indent = (entry.depth - 1) * 2;
            write!(out, "{:indent$}{}: {}", "", entry.label, entry.value.tag())?;
            if let Some(scalar) = entry.value.scalar() {
                write!(out, " = {}", format_scalar(scalar))?;
            }
            writeln!(out, " ({} bytes)", entry.serialized_length)?;
        }
        Ok(())
    }
}

/// Flat `path = value` lines for every scalar, using the paths accepted by
/// [`Package::get`]. Names are escaped and items are written `[n]`, so every
/// line names exactly one node.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathsRenderer;

impl PathsRenderer {
    pub const KEY: &'static str = "paths";
}

impl Renderer for PathsRenderer {
    fn render(&self, package: &Package, out: &mut dyn fmt::Write) -> fmt::Result {
        let mut segments: Vec<String> = Vec::new();
        for entry in walk(package) {
            segments.truncate(entry.depth - 1);
            segments.push(PathSegment::from(entry.label).to_string());
            if let Some(scalar) = entry.value.scalar() {
                writeln!(out, "{} = {}", segments.join("/"), format_scalar(scalar))?;
            }
        }
        Ok(())
    }
}
