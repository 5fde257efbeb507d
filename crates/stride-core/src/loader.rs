use crate::error::{CoachError, Result};
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read a JSON metrics file into an opaque value. The schema belongs to the
/// data producer; nothing here validates it.
pub fn load_metrics(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(CoachError::NotFound(path.to_path_buf()))
        }
        Err(e) => return Err(e.into()),
    };
    serde_json::from_str(&contents).map_err(|e| CoachError::parse(path, e.to_string()))
}

/// Read a file as raw bytes.
pub fn load_bytes(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    match fs::read(path) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(CoachError::NotFound(path.to_path_buf())),
        Err(e) => Err(e.into()),
    }
}
