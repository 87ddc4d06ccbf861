use std::io::{Cursor, Read, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::application::ports::{DocumentPackage, PackageError};

pub const MAIN_DOCUMENT_ENTRY: &str = "word/document.xml";
const MEDIA_PREFIX: &str = "word/media/";

/// A `.docx` package held in memory as its ordered list of zip entries.
///
/// Only the main document entry is ever rewritten; every other entry keeps
/// its exact bytes and position when the package is serialized again.
#[derive(Debug, Clone)]
pub struct DocxPackage {
    entries: Vec<(String, Vec<u8>)>,
    main_index: usize,
}

impl DocxPackage {
    pub fn from_bytes(data: &[u8]) -> Result<Self, PackageError> {
        let mut archive = ZipArchive::new(Cursor::new(data)).map_err(|e| {
            PackageError::UnsupportedContainer(format!("not a zip archive: {}", e))
        })?;

        let mut entries = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let mut entry = archive
                .by_index(i)
                .map_err(|e| PackageError::Archive(e.to_string()))?;
            let name = entry.name().to_string();
            let mut bytes = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut bytes)?;
            entries.push((name, bytes));
        }

        let main_index = entries
            .iter()
            .position(|(name, _)| name == MAIN_DOCUMENT_ENTRY)
            .ok_or_else(|| {
                PackageError::UnsupportedContainer(format!("{} not found", MAIN_DOCUMENT_ENTRY))
            })?;

        tracing::debug!(entries = entries.len(), "Loaded docx package");
        Ok(Self {
            entries,
            main_index,
        })
    }

    pub fn open(path: &Path) -> Result<Self, PackageError> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    pub fn entry(&self, name: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|(entry_name, _)| entry_name == name)
            .map(|(_, bytes)| bytes.as_slice())
    }

    pub fn entry_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn save(&self, path: &Path) -> Result<(), PackageError> {
        std::fs::write(path, self.to_bytes()?)?;
        Ok(())
    }
}

impl DocumentPackage for DocxPackage {
    fn main_entry_name(&self) -> &str {
        MAIN_DOCUMENT_ENTRY
    }

    fn read_main_entry(&self) -> Result<String, PackageError> {
        let bytes = &self.entries[self.main_index].1;
        String::from_utf8(bytes.clone()).map_err(|e| PackageError::InvalidEncoding(e.to_string()))
    }

    fn write_main_entry(&mut self, content: String) -> Result<(), PackageError> {
        self.entries[self.main_index].1 = content.into_bytes();
        Ok(())
    }

    /// Media entries are stored uncompressed and everything else deflated,
    /// which is the layout Word itself produces.
    fn to_bytes(&self) -> Result<Vec<u8>, PackageError> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

        for (name, data) in &self.entries {
            let options = if name.starts_with(MEDIA_PREFIX) {
                stored
            } else {
                deflated
            };
            if name.ends_with('/') {
                writer
                    .add_directory(name.as_str(), options)
                    .map_err(|e| PackageError::Archive(e.to_string()))?;
                continue;
            }
            writer
                .start_file(name.as_str(), options)
                .map_err(|e| PackageError::Archive(e.to_string()))?;
            writer.write_all(data)?;
        }

        let cursor = writer
            .finish()
            .map_err(|e| PackageError::Archive(e.to_string()))?;
        Ok(cursor.into_inner())
    }
}
