//! Reading setlist text from disk

use gigset_common::{Error, Result};
use std::io::ErrorKind;
use std::path::Path;

/// Read a setlist file, mapping a missing file to [`Error::NotFound`]
pub fn read_setlist_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::NotFound(format!("Setlist file {}", path.display())),
        _ => Error::Io(e),
    })
}
