//! State and configuration documents.
//!
//! Inputs may be YAML or JSON; outputs are always pretty JSON, which reads
//! back as YAML so commands can be chained.

use std::{
    fs,
    io::{self, Write as _},
    path::Path,
};

use serde::{Serialize, de::DeserializeOwned};

use super::CommandError;

pub(crate) fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, CommandError> {
    let raw = fs::read_to_string(path).map_err(|source| CommandError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_norway::from_str(&raw).map_err(|source| CommandError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a document that may be absent; no path and a `null` document both
/// mean there is nothing to read.
pub(crate) fn read_optional<T: DeserializeOwned>(
    path: Option<&Path>,
) -> Result<Option<T>, CommandError> {
    Ok(path
        .map(read_document::<Option<T>>)
        .transpose()?
        .flatten())
}

pub(crate) fn write_document<T: Serialize>(
    out: Option<&Path>,
    value: &T,
) -> Result<(), CommandError> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');

    match out {
        Some(path) => fs::write(path, json)?,
        None => io::stdout().lock().write_all(json.as_bytes())?,
    }

    Ok(())
}
