#[macro_use] extern crate snafu;
use std::path::{Path, PathBuf};
use std::fs::{self, File};
use std::io;
use human_repr::HumanCount;
use snafu::ResultExt;

mod rotation;
pub use rotation::Rotation;

mod args;

mod encode;
use encode::encode;

mod timestamp;
use timestamp::{read_modified_date, set_modified_date};

pub type Result<T = (), E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("File {} doesn't exist or is inaccessible.", input.display()))]
    OpenInput {
        input: PathBuf,
        source: io::Error,
    },
    #[snafu(display("you can't configure audio settings if you set to copy it"))]
    AudioSettingsWithCopy,
    #[snafu(display("you can't disable audio if you set to copy it"))]
    AudioDisabledWithCopy,
    #[snafu(display("you can't configure audio settings if you disabled"))]
    AudioSettingsWithDisabled,
    #[snafu(display("Could not encode: {}", source))]
    Encode {
        source: encode::Error,
    },
    #[snafu(display("Could not read modification time of {}: {}", input.display(), source))]
    ReadDate {
        input: PathBuf,
        source: timestamp::Error,
    },
    #[snafu(display("Could not set modification time of {}: {}", output.display(), source))]
    SetDate {
        output: PathBuf,
        source: timestamp::Error,
    },
    #[snafu(display("Could not stat {}: {}", path.display(), source))]
    StatFile {
        path: PathBuf,
        source: io::Error,
    },
}

/// Everything the encode run needs, resolved and validated up front.
/// The orchestration below never re-checks any of it.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub input: PathBuf,
    pub quality: u32,
    pub fps: Option<f64>,
    pub rotate: Option<Rotation>,
    pub scale: Option<String>,
    pub preset: String,
    pub tune: String,
    pub audio: AudioMode,
    pub from: Option<String>,
    pub to: Option<String>,
    pub copy_metadata: bool,
    pub overwrite: bool,
}

/// Audio handling, with the invalid flag combinations ruled out by shape:
/// channel count and bitrate only exist when the audio is re-encoded.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioMode {
    Default {
        channels: Option<u32>,
        bitrate: Option<String>,
    },
    Copy,
    Disabled,
}

impl AudioMode {
    pub fn resolve(
        copy: bool,
        disable: bool,
        channels: Option<u32>,
        bitrate: Option<String>,
    ) -> Result<AudioMode> {
        if copy {
            ensure!(channels.is_none() && bitrate.is_none(), AudioSettingsWithCopy);
            ensure!(!disable, AudioDisabledWithCopy);
            return Ok(AudioMode::Copy);
        }

        if disable {
            ensure!(channels.is_none() && bitrate.is_none(), AudioSettingsWithDisabled);
            return Ok(AudioMode::Disabled);
        }

        Ok(AudioMode::Default { channels, bitrate })
    }
}

/// Normalizes a raw bitrate number to the unit ffmpeg expects.
pub fn kbps(value: u32) -> String {
    format!("{}k", value)
}

pub fn check_input(input: &Path) -> Result {
    // Check the input file can be opened successfully
    File::open(input)
        .context(OpenInput { input })?;

    Ok(())
}

/// The output lands in the working directory, named after the input with its
/// final extension swapped for `.encoded.mp4`. Earlier dots are preserved.
pub fn output_file_name(input: &Path) -> PathBuf {
    let mut name = input.file_stem()
        .unwrap_or_default()
        .to_os_string();
    name.push(".encoded.mp4");

    PathBuf::from(name)
}

pub fn run(config: &Config) -> Result {
    let output = output_file_name(&config.input);

    encode(config, &output).context(Encode)?;
    fix_date(&config.input, &output)?;
    size_diff(&config.input, &output)?;

    Ok(())
}

fn fix_date(input: &Path, output: &Path) -> Result {
    let date = read_modified_date(input).context(ReadDate { input })?;
    set_modified_date(output, &date).context(SetDate { output })?;

    Ok(())
}

fn size_diff(input: &Path, output: &Path) -> Result {
    let old_size = fs::metadata(input).context(StatFile { path: input })?.len();
    let new_size = fs::metadata(output).context(StatFile { path: output })?.len();

    println!();
    println!("Old file size: {}", old_size.human_count_bytes());
    println!("New file size: {}", new_size.human_count_bytes());
    println!("{}", comparison_line(old_size, new_size));

    Ok(())
}

fn comparison_line(old_size: u64, new_size: u64) -> String {
    let diff = old_size as i64 - new_size as i64;

    if diff > 0 {
        format!("You have saved {}", (diff as u64).human_count_bytes())
    } else if diff < 0 {
        format!("New file is larger by {}", (-diff as u64).human_count_bytes())
    } else {
        "File sizes are exactly the same! Amazing!".to_string()
    }
}
