use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::errors::GenerationError;
use crate::titles::ProductTitle;

/// Write titles as a pretty-printed JSON array.
pub fn write_titles_json(path: &Path, titles: &[ProductTitle]) -> Result<(), GenerationError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, titles)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

pub fn read_titles_json(path: &Path) -> Result<Vec<ProductTitle>, GenerationError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
