use crate::error::PdfRowsError;
use crate::extract::Record;
use crate::pattern::Schema;
use std::io::Write;
use std::path::Path;

/// Write a header row (the schema columns) followed by one row per
/// record. Returns the number of records written.
pub fn write_csv<W, I>(writer: W, schema: &Schema, records: I) -> Result<usize, PdfRowsError>
where
    W: Write,
    I: IntoIterator<Item = Record>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(schema.columns())?;

    let mut count = 0;
    for record in records {
        csv_writer.write_record(record.to_row())?;
        count += 1;
    }

    csv_writer.flush()?;
    Ok(count)
}

/// Write records to `path`.
///
/// The CSV is first written to a temporary file next to `path` and moved
/// into place only when complete, so an existing file is left untouched
/// if anything fails.
pub fn write_csv_file<I>(path: &Path, schema: &Schema, records: I) -> Result<usize, PdfRowsError>
where
    I: IntoIterator<Item = Record>,
{
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut builder = tempfile::Builder::new();
    builder.prefix(".pdfrows-");
    // Same mode a plain create would get: 0o666 minus the umask.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let mut tmpfile = builder.tempfile_in(dir)?;

    // Replacing a file keeps its permissions.
    if let Ok(existing) = std::fs::metadata(path) {
        tmpfile.as_file().set_permissions(existing.permissions())?;
    }

    let count = write_csv(tmpfile.as_file_mut(), schema, records)?;
    tmpfile.as_file().sync_all()?;
    tmpfile.persist(path).map_err(|e| PdfRowsError::Io(e.error))?;

    log::debug!("wrote {} row(s) to {}", count, path.display());
    Ok(count)
}
