//! Content source abstraction for reading exports from the filesystem or ZIP archives.

use anyhow::{Context, Result, anyhow};
use camino::Utf8Path;
use std::io::Read;

/// Trait for abstracting where the export text is read from.
pub trait ContentSource {
    /// Read the document at the given logical path and return its content as a string.
    fn read_to_string(&mut self, path: &Utf8Path) -> Result<String>;
}

/// Reads files directly from the local filesystem.
pub struct FsSource;

impl ContentSource for FsSource {
    fn read_to_string(&mut self, path: &Utf8Path) -> Result<String> {
        std::fs::read_to_string(path.as_str()).with_context(|| format!("Failed to read {}", path))
    }
}

/// Reads an export packed inside a ZIP archive.
///
/// The logical path names an entry in the archive. An empty path selects the
/// first entry ending in `.l5x` (case-insensitive).
pub struct ZipSource<R: Read + std::io::Seek> {
    zip: zip::ZipArchive<R>,
}

impl<R: Read + std::io::Seek> ZipSource<R> {
    pub fn new(reader: R) -> Result<Self> {
        let zip = zip::ZipArchive::new(reader).context("Failed to open zip archive")?;
        Ok(Self { zip })
    }

    /// Name of the first `.l5x` entry in the archive, in archive order.
    pub fn first_export(&mut self) -> Result<Option<String>> {
        for i in 0..self.zip.len() {
            let name = self.zip.by_index(i)?.name().to_string();
            if name.to_ascii_lowercase().ends_with(".l5x") {
                return Ok(Some(name));
            }
        }
        Ok(None)
    }
}

impl<R: Read + std::io::Seek> ContentSource for ZipSource<R> {
    fn read_to_string(&mut self, path: &Utf8Path) -> Result<String> {
        let p = path
            .as_str()
            .trim_start_matches("./")
            .trim_start_matches('/')
            .to_string();
        let p = if p.is_empty() {
            self.first_export()?
                .ok_or_else(|| anyhow!("No .L5X entry in zip archive"))?
        } else {
            p
        };
        let mut f = self
            .zip
            .by_name(&p)
            .with_context(|| format!("File {} not found in zip", p))?;
        let mut s = String::new();
        f.read_to_string(&mut s)
            .with_context(|| format!("Failed to read {} from zip", p))?;
        Ok(s)
    }
}
