use super::error::{ConvertError, Result};
use super::types::{Contact, ContactFields};
use std::io::Write;
use std::path::Path;
use tracing::warn;

/// Iterates over the contacts of a CSV file, in file order. The first line is a header
/// row and is never turned into a contact.
pub struct ContactReader<R> {
    record_iter: csv::StringRecordsIntoIter<R>,
    skipped: usize,
}

impl ContactReader<std::fs::File> {
    pub fn new(input_path: &Path) -> Result<Self> {
        let file = std::fs::File::open(input_path).map_err(|err| ConvertError::Read {
            path: input_path.to_path_buf(),
            source: err.into(),
        })?;

        Ok(Self::from_reader(file))
    }
}

impl<R: std::io::Read> ContactReader<R> {
    pub fn from_reader(rdr: R) -> Self {
        Self {
            record_iter: csv::ReaderBuilder::new()
                .has_headers(true)
                .flexible(true)
                .trim(csv::Trim::All)
                .from_reader(rdr)
                .into_records(),
            skipped: 0,
        }
    }

    /// Number of rows dropped so far for having too few fields.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<R: std::io::Read> Iterator for ContactReader<R> {
    type Item = Result<Contact>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match self.record_iter.next()? {
                Ok(record) => record,
                Err(source) => {
                    let line = source.position().map_or(0, |pos| pos.line());
                    return Some(Err(ConvertError::Row { line, source }));
                }
            };

            let line = record.position().map_or(0, |pos| pos.line());

            if record.len() < ContactFields::COUNT {
                warn!(
                    line,
                    fields = record.len(),
                    "skipping row with fewer than {} fields",
                    ContactFields::COUNT
                );
                self.skipped += 1;
                continue;
            }

            // Trailing columns are ignored
            let leading: csv::StringRecord =
                record.iter().take(ContactFields::COUNT).collect();

            return Some(
                leading
                    .deserialize::<ContactFields>(None)
                    .map(Contact::from)
                    .map_err(|source| ConvertError::Row { line, source }),
            );
        }
    }
}

/// Writes `document` to `output_path` via a temporary file in the same directory, so the
/// destination is either fully replaced or left untouched.
pub fn write_document(output_path: &Path, document: &str) -> Result<()> {
    let write_error = |source: std::io::Error| ConvertError::Write {
        path: output_path.to_path_buf(),
        source,
    };

    let dir = output_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(write_error)?;
    file.write_all(document.as_bytes()).map_err(write_error)?;
    file.as_file().sync_all().map_err(write_error)?;
    file.persist(output_path)
        .map_err(|err| write_error(err.error))?;

    Ok(())
}
