use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::catalog::Product;
use crate::errors::GenerationError;
use crate::users::UserRecord;

/// Write the product catalog. Returns the number of bytes written.
pub fn write_products_csv(path: &Path, products: &[Product]) -> Result<u64, GenerationError> {
    write_rows(path, products)
}

/// Write registration rows. Returns the number of bytes written.
pub fn write_users_csv(path: &Path, users: &[UserRecord]) -> Result<u64, GenerationError> {
    write_rows(path, users)
}

/// Read registration rows, trimming whitespace around every field.
pub fn read_users_csv(path: &Path) -> Result<Vec<UserRecord>, GenerationError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    let mut users = Vec::new();
    for row in reader.deserialize() {
        users.push(row?);
    }
    Ok(users)
}

fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<u64, GenerationError> {
    let writer = BufWriter::new(File::create(path)?);
    let mut writer = csv::Writer::from_writer(CountingWriter::new(writer));
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    let counting = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(counting.bytes_written())
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
