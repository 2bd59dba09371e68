//! JSON emission for query outputs.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};

/// Serialize a query output as pretty-printed JSON on the given writer.
pub fn write_json<T: Serialize, W: Write>(value: &T, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, value).map_err(Error::Json)
}

/// Serialize a query output to a JSON file.
pub fn write_json_file<T: Serialize, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let file = File::create(path.as_ref()).map_err(Error::Io)?;
    write_json(value, BufWriter::new(file))
}
