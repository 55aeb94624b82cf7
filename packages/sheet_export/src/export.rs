//! Delimited-file export with collision-avoiding names.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// A file format tabular data can be exported to.
///
/// Each variant knows its extension and its row rendering. Rows are slices of
/// cells; every row is written on its own line.
///
/// # Examples
///
/// ```no_run
/// use sheet_export::Export;
///
/// let written = Export::Csv.save(
///     "target/exports",
///     "latencies",
///     &[
///         &["id", "name", "nanos"],
///         &["0", "parse", "1200"],
///         &["1", "resolve", "8800"],
///     ],
/// )?;
///
/// println!("wrote {}", written.display());
/// # Ok::<(), sheet_export::Error>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum Export {
    /// Comma-separated values, extension `.csv`.
    Csv,
}

impl Export {
    /// The file extension written by this format, with the leading dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => ".csv",
        }
    }

    const fn delimiter(self) -> &'static str {
        match self {
            Self::Csv => ",",
        }
    }

    /// Saves `rows` under `directory` as `<file_name><extension>`, never
    /// overwriting an existing file.
    ///
    /// When the target name is taken, a `_copy` suffix is appended, then
    /// `_copy1`, `_copy2` and so on until an unused name is found.
    ///
    /// Returns the path of the file actually written and prints a
    /// confirmation line.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] when the file cannot be created or written.
    pub fn save(
        self,
        directory: impl AsRef<Path>,
        file_name: &str,
        rows: &[&[&str]],
    ) -> Result<PathBuf> {
        self.save_with_overwrite(directory, file_name, false, rows)
    }

    /// Saves `rows` under `directory` as `<file_name><extension>`.
    ///
    /// With `overwrite` set, an existing file of the same name is replaced;
    /// otherwise the collision naming of [`save`](Self::save) applies.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] when the file cannot be created or written.
    pub fn save_with_overwrite(
        self,
        directory: impl AsRef<Path>,
        file_name: &str,
        overwrite: bool,
        rows: &[&[&str]],
    ) -> Result<PathBuf> {
        let directory = directory.as_ref();

        let path = if overwrite {
            directory.join(format!("{file_name}{}", self.extension()))
        } else {
            unused_path(directory, file_name, self.extension())
        };

        write_rows(&path, self.delimiter(), rows)?;

        println!(
            "{} file [{}]\n created successfully at: {}",
            self.extension().trim_start_matches('.').to_uppercase(),
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            directory.display()
        );

        Ok(path)
    }
}

/// Picks the first free path among `name`, `name_copy`, `name_copy1`, ...
fn unused_path(directory: &Path, file_name: &str, extension: &str) -> PathBuf {
    let exact = directory.join(format!("{file_name}{extension}"));

    if !exact.exists() {
        return exact;
    }

    let copy = directory.join(format!("{file_name}_copy{extension}"));

    if !copy.exists() {
        return copy;
    }

    let mut attempt = 1;

    loop {
        let numbered = directory.join(format!("{file_name}_copy{attempt}{extension}"));

        if !numbered.exists() {
            return numbered;
        }

        attempt += 1;
    }
}

fn write_rows(path: &Path, delimiter: &str, rows: &[&[&str]]) -> Result<()> {
    let io_error = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);

    for row in rows {
        writeln!(writer, "{}", row.join(delimiter)).map_err(io_error)?;
    }

    writer.flush().map_err(io_error)
}
