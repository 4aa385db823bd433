//! Interactive overwrite confirmation

use crate::error::Result;
use std::io::{BufRead, Write};
use std::path::Path;

/// Ask whether `path` may be overwritten
///
/// Returns `true` straight away when `path` is not an existing file.
/// Otherwise prompts on `output` and reads lines from `input` until one is
/// exactly `y` or `n`. Running out of input counts as `n`.
///
/// ```
/// use std::io::Cursor;
/// use snnkit::io::confirm_overwrite;
///
/// let existing = tempfile::NamedTempFile::new()?;
/// let mut input = Cursor::new("maybe\ny\n");
/// let mut output = Vec::new();
/// assert!(confirm_overwrite(existing.path(), &mut input, &mut output)?);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn confirm_overwrite<R: BufRead, W: Write>(
    path: impl AsRef<Path>,
    input: &mut R,
    output: &mut W,
) -> Result<bool> {
    let path = path.as_ref();
    if !path.is_file() {
        return Ok(true);
    }

    write!(output, "[WARNING] {} already exists - overwrite? [y/n] ", path.display())?;
    output.flush()?;

    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(false);
        }
        match line.trim_end_matches(&['\r', '\n'][..]) {
            "y" => return Ok(true),
            "n" => return Ok(false),
            _ => {
                write!(output, "Enter 'y' (overwrite) or 'n' (cancel). ")?;
                output.flush()?;
            }
        }
    }
}

/// [`confirm_overwrite`] on the process's stdin and stdout
pub fn confirm_overwrite_stdin(path: impl AsRef<Path>) -> Result<bool> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    confirm_overwrite(path, &mut stdin.lock(), &mut stdout.lock())
}
