use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::Result;

/// How merged content lands in the target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    #[default]
    Append,
    Overwrite,
}

/// Writes merged templates to `path`, creating it if absent.
pub fn save_content(path: &Path, content: &str, mode: WriteMode) -> Result<()> {
    let mut options = OpenOptions::new();
    options.create(true);
    match mode {
        WriteMode::Append => options.append(true),
        WriteMode::Overwrite => options.write(true).truncate(true),
    };

    let mut file = options.open(path)?;
    file.write_all(content.as_bytes())?;
    file.flush()?;

    log::debug!("wrote {} bytes to {} ({:?})", content.len(), path.display(), mode);
    Ok(())
}
