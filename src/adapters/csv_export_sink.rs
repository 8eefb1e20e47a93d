use std::fs::File;
use std::path::{Path, PathBuf};

use crate::core::models::{ExportError, ResultRecord};
use crate::global_constants;

pub struct CsvExportSink {
    export_path: PathBuf,
}

impl CsvExportSink {
    pub fn new(export_path: impl Into<PathBuf>) -> Self {
        Self {
            export_path: export_path.into(),
        }
    }

    pub fn export_path(&self) -> &Path {
        &self.export_path
    }

    pub fn export(&self, records: &[ResultRecord]) -> Result<(), ExportError> {
        export_csv(records, &self.export_path)
    }
}

/// Writes a header row followed by one row per record.
pub fn export_csv(records: &[ResultRecord], path: &Path) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(global_constants::CSV_HEADER)?;
    for record in records {
        writer.write_record([
            record.title.as_str(),
            record.link.as_str(),
            record.snippet.as_str(),
            record.published_date.as_deref().unwrap_or_default(),
        ])?;
    }
    writer.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!(
        "{} Wrote {} record(s) to {:?}",
        global_constants::LOG_TAG_EXPORT,
        records.len(),
        path
    );
    Ok(())
}
