//! Line-swapping file copies.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// A replacement for one numbered line of the original file.
///
/// Line numbers are 0-based. When several replacements name the same line,
/// the last one wins.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Line {
    number: usize,
    content: String,
}

impl Line {
    /// Creates a replacement putting `content` at 0-based line `number`.
    #[must_use]
    pub fn new(number: usize, content: impl Into<String>) -> Self {
        Self {
            number,
            content: content.into(),
        }
    }

    /// The 0-based line this replacement applies to.
    #[must_use]
    pub fn number(&self) -> usize {
        self.number
    }

    /// The content swapped in at that line.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// A text-file format whose files can be copied with lines swapped out.
///
/// Each variant only contributes its file extension; the patching itself is
/// format-agnostic line replacement.
///
/// # Examples
///
/// ```no_run
/// use line_patch::{Editor, Line};
///
/// // Writes pages/index_copy.html with lines 10 and 20 replaced.
/// Editor::Html.edit_lines(
///     "pages",
///     "index",
///     &[
///         Line::new(10, "<title>Updated</title>"),
///         Line::new(20, "<meta charset=\"utf-8\">"),
///     ],
/// )?;
/// # Ok::<(), line_patch::Error>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum Editor {
    /// Files with the `.html` extension.
    Html,
    /// Files with the `.txt` extension.
    Txt,
    /// Files with the `.xml` extension.
    Xml,
}

impl Editor {
    /// The file extension handled by this editor, with the leading dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Html => ".html",
            Self::Txt => ".txt",
            Self::Xml => ".xml",
        }
    }

    /// Copies `<file_name><extension>` under `directory` to
    /// `<file_name>_copy<extension>`, swapping out the numbered lines.
    ///
    /// `lines` must be ordered by non-decreasing line number
    /// (debug-asserted); replacements naming lines past the end of the file
    /// are ignored. The original file is left untouched.
    ///
    /// Returns the path of the patched copy.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] when the original cannot be read or the copy cannot be
    /// written.
    pub fn edit_lines(
        self,
        directory: impl AsRef<Path>,
        file_name: &str,
        lines: &[Line],
    ) -> Result<PathBuf> {
        let directory = directory.as_ref();
        let source_path = directory.join(format!("{file_name}{}", self.extension()));
        let copy_path = directory.join(format!("{file_name}_copy{}", self.extension()));

        let read_error = |source| Error::Io {
            path: source_path.clone(),
            source,
        };
        let write_error = |source| Error::Io {
            path: copy_path.clone(),
            source,
        };

        let reader = BufReader::new(File::open(&source_path).map_err(read_error)?);
        let mut writer = BufWriter::new(File::create(&copy_path).map_err(write_error)?);

        let mut replacements = lines.iter().peekable();
        let mut previous_number = None;

        for (number, line) in reader.lines().enumerate() {
            let mut line = line.map_err(read_error)?;

            while let Some(replacement) = replacements.next_if(|r| r.number == number) {
                debug_assert!(
                    previous_number.is_none_or(|previous| previous <= replacement.number),
                    "replacements must not decrease in line number"
                );
                previous_number = Some(replacement.number);

                replacement.content.clone_into(&mut line);
            }

            writeln!(writer, "{line}").map_err(write_error)?;
        }

        writer.flush().map_err(write_error)?;

        Ok(copy_path)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn write_original(directory: &Path, name: &str, contents: &str) {
        fs::write(directory.join(name), contents).unwrap();
    }

    #[test]
    fn swaps_exactly_the_numbered_lines() {
        let directory = tempfile::tempdir().unwrap();
        write_original(directory.path(), "page.txt", "zero\none\ntwo\nthree\n");

        let copy = Editor::Txt
            .edit_lines(
                directory.path(),
                "page",
                &[Line::new(1, "ONE"), Line::new(3, "THREE")],
            )
            .unwrap();

        assert_eq!(copy.file_name().unwrap(), "page_copy.txt");
        assert_eq!(fs::read_to_string(copy).unwrap(), "zero\nONE\ntwo\nTHREE\n");
    }

    #[test]
    fn untouched_lines_survive_byte_for_byte() {
        let directory = tempfile::tempdir().unwrap();
        let original = "  indented\n\ttabbed\n\nempty above\n";
        write_original(directory.path(), "page.txt", original);

        let copy = Editor::Txt
            .edit_lines(directory.path(), "page", &[])
            .unwrap();

        assert_eq!(fs::read_to_string(copy).unwrap(), original);
    }

    #[test]
    fn duplicate_numbers_collapse_to_the_last_replacement() {
        let directory = tempfile::tempdir().unwrap();
        write_original(directory.path(), "page.txt", "a\nb\n");

        let copy = Editor::Txt
            .edit_lines(
                directory.path(),
                "page",
                &[Line::new(0, "first"), Line::new(0, "second")],
            )
            .unwrap();

        assert_eq!(fs::read_to_string(copy).unwrap(), "second\nb\n");
    }

    #[test]
    fn replacements_past_the_end_are_ignored() {
        let directory = tempfile::tempdir().unwrap();
        write_original(directory.path(), "page.xml", "<a/>\n");

        let copy = Editor::Xml
            .edit_lines(directory.path(), "page", &[Line::new(9, "<b/>")])
            .unwrap();

        assert_eq!(fs::read_to_string(copy).unwrap(), "<a/>\n");
    }

    #[test]
    fn missing_original_is_an_io_error() {
        let directory = tempfile::tempdir().unwrap();

        let result = Editor::Html.edit_lines(directory.path(), "absent", &[]);

        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn line_accessors_round_trip() {
        let line = Line::new(7, "content");

        assert_eq!(line.number(), 7);
        assert_eq!(line.content(), "content");
    }
}
