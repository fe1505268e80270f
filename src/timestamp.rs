//! Timestamp bookkeeping through the same external tools the rest of the
//! pipeline relies on: `date -R -r` to read a file's modification time,
//! `touch -d` to apply it.

use std::io;
use std::path::Path;
use std::process::Command;
use std::string;
use snafu::ResultExt;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("could not run {}: {}", command, source))]
    ProcessError {
        command: &'static str,
        source: io::Error,
    },
    #[snafu(display("{} exited unsuccessfully: {}", command, detail))]
    CommandFailed {
        command: &'static str,
        detail: String,
    },
    #[snafu(display("invalid UTF-8 in {} output", command))]
    InvalidUtf8 {
        command: &'static str,
        source: string::FromUtf8Error,
    },
}

pub fn read_modified_date(path: &Path) -> Result<String, Error> {
    let output = Command::new("date")
        .arg("-R")
        .arg("-r").arg(path)
        .output()
        .context(ProcessError { command: "date" })?;

    ensure!(output.status.success(), CommandFailed {
        command: "date",
        detail: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
    });

    let date = String::from_utf8(output.stdout)
        .context(InvalidUtf8 { command: "date" })?;

    Ok(date.trim_end().to_string())
}

pub fn set_modified_date(path: &Path, date: &str) -> Result<(), Error> {
    let output = Command::new("touch")
        .arg("-d").arg(date)
        .arg(path)
        .output()
        .context(ProcessError { command: "touch" })?;

    ensure!(output.status.success(), CommandFailed {
        command: "touch",
        detail: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_modification_time_between_files() {
        let from = tempfile::NamedTempFile::new().unwrap();
        let to = tempfile::NamedTempFile::new().unwrap();

        let date = read_modified_date(from.path()).unwrap();
        set_modified_date(to.path(), &date).unwrap();

        assert_eq!(read_modified_date(to.path()).unwrap(), date);
    }

    #[test]
    fn missing_file_fails() {
        let err = read_modified_date(Path::new("no-such-movie.mov")).unwrap_err();
        assert!(err.to_string().contains("date"));
    }

    #[test]
    fn garbage_date_fails() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = set_modified_date(file.path(), "not a date").unwrap_err();
        assert!(err.to_string().contains("touch"));
    }
}
