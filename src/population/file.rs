//! Plain-text population files.
//!
//! One chromosome per line, written as its step abbreviations. An empty line
//! is an empty chromosome. Reading preserves file order.

use std::fs;
use std::path::Path;

use crate::chromosome::Chromosome;
use crate::error::PhaserError;

/// Reads every line of the file at `path`.
pub fn read_chromosome_lines(path: &Path) -> Result<Vec<String>, PhaserError> {
    let content =
        fs::read_to_string(path).map_err(|source| PhaserError::file_access(path, source))?;
    Ok(content.lines().map(str::to_string).collect())
}

/// Reads and parses the chromosomes stored at `path`.
pub fn read_chromosomes(path: &Path) -> Result<Vec<Chromosome>, PhaserError> {
    read_chromosome_lines(path)?
        .iter()
        .map(|line| line.parse())
        .collect()
}

/// Replaces the file at `path` with `chromosomes`, one per line.
///
/// The content goes to a sibling temporary file first and is renamed over
/// `path`, so readers only ever see a complete population.
pub fn write_chromosomes<'a>(
    path: &Path,
    chromosomes: impl IntoIterator<Item = &'a Chromosome>,
) -> Result<(), PhaserError> {
    let mut content = String::new();
    for chromosome in chromosomes {
        content.push_str(&chromosome.to_string());
        content.push('\n');
    }

    let mut temporary = path.as_os_str().to_owned();
    temporary.push(".tmp");
    let temporary = Path::new(&temporary);

    fs::write(temporary, content).map_err(|source| PhaserError::file_access(temporary, source))?;
    fs::rename(temporary, path).map_err(|source| {
        let _ = fs::remove_file(temporary);
        PhaserError::file_access(path, source)
    })
}
