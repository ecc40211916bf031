use crate::app::error::{FileReadError, OutputWriteError};
use crate::app::models::{CollectionResult, FileEntry};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

#[derive(Debug, Default)]
pub struct SectionSummary {
    pub written: usize,
    pub failures: Vec<FileReadError>,
}

/// Reads a whole file, replacing invalid UTF-8 with U+FFFD.
pub fn read_entry(entry: &FileEntry) -> Result<String, FileReadError> {
    let bytes = fs::read(&entry.path).map_err(|e| FileReadError {
        label: entry.label.clone(),
        path: entry.path.clone(),
        source: e,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Writes one `[label]` section per readable entry, in the given order.
///
/// Unreadable entries are recorded and skipped. Only errors from `out` are
/// returned.
pub fn write_sections<I, W>(entries: I, out: &mut W) -> io::Result<SectionSummary>
where
    I: IntoIterator<Item = FileEntry>,
    W: Write,
{
    let mut summary = SectionSummary::default();

    for entry in entries {
        match read_entry(&entry) {
            Ok(content) => {
                write!(out, "[{}]\n{}\n\n", entry.label, content)?;
                summary.written += 1;
            }
            Err(err) => {
                log::warn!("{} (at {})", err, err.path.display());
                summary.failures.push(err);
            }
        }
    }

    Ok(summary)
}

/// Creates `output_path` and streams every entry into it.
pub fn write_collection<I>(
    entries: I,
    output_path: &Path,
) -> Result<CollectionResult, OutputWriteError>
where
    I: IntoIterator<Item = FileEntry>,
{
    let fail = |source: io::Error| OutputWriteError {
        path: output_path.to_path_buf(),
        source,
    };

    let file = File::create(output_path).map_err(fail)?;
    let mut writer = BufWriter::new(file);
    let summary = write_sections(entries, &mut writer).map_err(fail)?;
    writer.flush().map_err(fail)?;

    Ok(CollectionResult {
        written: summary.written,
        failures: summary.failures,
        output_path: output_path.to_path_buf(),
    })
}
