use std::ffi::OsString;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use colored::Colorize;
use snafu::ResultExt;

use crate::args::build_args;
use crate::Config;

/// ffmpeg prints this to stderr when `-n` stops it from clobbering the
/// output. The run still counts as a success then.
const BENIGN_REFUSAL: &str = "already exists. Exiting";

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Could not run ffmpeg: {}", source))]
    ProcessError {
        source: io::Error,
    },
    #[snafu(display("ffmpeg exited with code: {}", code))]
    FfmpegError {
        code: i32,
    },
}

pub fn encode(config: &Config, output: &Path) -> Result<(), Error> {
    let args = build_args(config, output);
    println!("{}", command_line(&args).green());

    let mut ffmpeg = Command::new("ffmpeg")
        .args(&args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .context(ProcessError)?;

    // ffmpeg chatters on stderr the whole time; a separate reader keeps the
    // pipe drained while stdout is consumed below.
    let stderr = ffmpeg.stderr.take().unwrap();
    let last_error = thread::spawn(move || {
        let mut last_error = String::new();

        for line in BufReader::new(stderr).lines() {
            let line = match line {
                Ok(line) => line,
                Err(_) => break,
            };
            eprintln!("{}", line);
            last_error = line;
        }

        last_error
    });

    let stdout = ffmpeg.stdout.take().unwrap();
    for line in BufReader::new(stdout).lines() {
        match line {
            Ok(line) => println!("{}", line),
            Err(_) => break,
        }
    }

    let status = ffmpeg.wait().context(ProcessError)?;
    let last_error = last_error.join().unwrap_or_default();
    let code = status.code().unwrap_or(-1);
    println!("Process exited with code: {}", code);

    ensure!(status.success() || is_benign_refusal(&last_error), FfmpegError { code });

    Ok(())
}

fn is_benign_refusal(last_error: &str) -> bool {
    last_error.contains(BENIGN_REFUSAL)
}

fn command_line(args: &[OsString]) -> String {
    let mut line = String::from("ffmpeg");

    for arg in args {
        line.push(' ');
        line.push_str(&arg.to_string_lossy());
    }

    line
}
