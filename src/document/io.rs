//! Package I/O and validation
//!
//! This module opens `.hwpx` packages, locates the editable content section,
//! and rebuilds the archive with one entry replaced.

use std::io::{Cursor, Read, Write};
use std::path::Path;

use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

use super::models::{SECTION_SCAN_LIMIT, Section, section_entry_name};
use crate::error::{DocumentError, Result};

/// Validates the file extension before any bytes are read
pub(crate) fn validate_hwpx_file(file_path: &Path) -> Result<()> {
    let extension = file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "hwpx" => Ok(()),
        "hwp" => Err(DocumentError::LegacyFormat),
        other => Err(DocumentError::UnsupportedFormat(other.to_string())),
    }
}

/// An in-memory `.hwpx` archive.
///
/// The original bytes are kept verbatim so that every save starts from the
/// pristine package rather than a previously mutated one.
#[derive(Debug, Clone)]
pub struct Package {
    bytes: Vec<u8>,
}

impl Package {
    /// Wrap raw archive bytes, failing early if they are not a ZIP package.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        ZipArchive::new(Cursor::new(bytes.as_slice()))?;
        Ok(Self { bytes })
    }

    fn archive(&self) -> Result<ZipArchive<Cursor<&[u8]>>> {
        Ok(ZipArchive::new(Cursor::new(self.bytes.as_slice()))?)
    }

    /// Read one entry's decompressed bytes, or `None` if it does not exist.
    pub fn read_entry(&self, name: &str) -> Result<Option<Vec<u8>>> {
        let mut archive = self.archive()?;
        let mut file = match archive.by_name(name) {
            Ok(file) => file,
            Err(zip::result::ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut content = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut content)?;
        Ok(Some(content))
    }

    /// Find the lowest-indexed `Contents/section<N>.xml` with N below the scan limit.
    pub fn find_section(&self) -> Result<Section> {
        for index in 0..SECTION_SCAN_LIMIT {
            let name = section_entry_name(index);
            if let Some(bytes) = self.read_entry(&name)? {
                debug!("Found content section {}", name);
                let xml = String::from_utf8(bytes)
                    .map_err(|_| DocumentError::SectionEncoding(name.clone()))?;
                return Ok(Section { index, xml });
            }
        }

        Err(DocumentError::ContentNotFound)
    }

    /// Build a new archive in which `name` holds `contents`.
    ///
    /// Every other entry is copied raw (compressed bytes and metadata
    /// untouched) in its original position. The replaced entry keeps its
    /// compression method.
    pub fn replace_entry(&self, name: &str, contents: &[u8]) -> Result<Vec<u8>> {
        let mut archive = self.archive()?;
        let mut writer = ZipWriter::new(Cursor::new(Vec::with_capacity(self.bytes.len())));
        let mut replaced = false;

        for i in 0..archive.len() {
            let file = archive.by_index_raw(i)?;
            if file.name() == name {
                let options = SimpleFileOptions::default()
                    .compression_method(file.compression())
                    .large_file(contents.len() as u64 >= u32::MAX as u64);
                drop(file);
                writer.start_file(name, options)?;
                writer.write_all(contents)?;
                replaced = true;
            } else {
                writer.raw_copy_file(file)?;
            }
        }

        if !replaced {
            writer.start_file(name, SimpleFileOptions::default())?;
            writer.write_all(contents)?;
        }

        Ok(writer.finish()?.into_inner())
    }
}
