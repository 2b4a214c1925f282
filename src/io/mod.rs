pub mod csv;
pub mod json;

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Buffered writer for `path`, or stdout when the path is `-`.
/// Missing parent directories are created.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(Box::new(BufWriter::new(File::create(path)?)))
}
