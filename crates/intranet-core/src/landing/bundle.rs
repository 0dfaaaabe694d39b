use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::Result;

/// Files that make up the landing site, in archive order.
pub const SITE_FILES: [&str; 3] = ["index.html", "styles.css", "app.js"];

/// Name of the downloadable site archive.
pub const SITE_ARCHIVE_NAME: &str = "nebula-forge-site.zip";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteFile {
    pub name: String,
    pub contents: Vec<u8>,
}

impl SiteFile {
    pub fn new(name: impl Into<String>, contents: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            contents,
        }
    }
}

/// Zips `files` in memory, deflated.
pub fn bundle_site(files: &[SiteFile]) -> Result<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for file in files {
        writer.start_file(file.name.as_str(), options)?;
        writer.write_all(&file.contents)?;
    }
    Ok(writer.finish()?.into_inner())
}

/// Status line once the archive is written.
pub fn bundle_ready_status() -> String {
    format!("✅ {} is ready.", SITE_ARCHIVE_NAME)
}

/// Status line when the archive could not be built.
pub fn bundle_failed_status(reason: &str) -> String {
    format!("Download unavailable: {}.", reason)
}
