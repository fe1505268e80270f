use std::ffi::OsString;
use std::path::Path;

use crate::{AudioMode, Config};

/// Builds the full ffmpeg argument list. The ordering is part of the
/// contract with ffmpeg and must not be shuffled.
pub fn build_args(config: &Config, output: &Path) -> Vec<OsString> {
    fn os(s: &str) -> OsString { OsString::from(s) }

    let mut args = vec![os(if config.overwrite { "-y" } else { "-n" })];

    args.push(os("-i"));
    args.push(config.input.clone().into_os_string());

    args.push(os("-c:v"));
    args.push(os("libx264"));
    args.push(os("-preset"));
    args.push(os(&config.preset));
    args.push(os("-crf"));
    args.push(os(&config.quality.to_string()));

    let filter = filter_chain(config);
    if !filter.is_empty() {
        args.push(os("-vf"));
        args.push(os(&filter));
    }

    if let Some(fps) = config.fps {
        args.push(os("-r"));
        args.push(os(&fps.to_string()));
    }

    match &config.audio {
        AudioMode::Default { channels, .. } => {
            if let Some(channels) = channels {
                args.push(os("-ac"));
                args.push(os(&channels.to_string()));
            }
            args.push(os("-c:a"));
            args.push(os("aac"));
        },
        AudioMode::Copy => {
            args.push(os("-c:a"));
            args.push(os("copy"));
        },
        AudioMode::Disabled => {
            args.push(os("-an"));
        },
    }

    if let Some(from) = &config.from {
        args.push(os("-ss"));
        args.push(os(from));
    }

    if let Some(to) = &config.to {
        args.push(os("-to"));
        args.push(os(to));
    }

    args.push(os("-vsync"));
    args.push(os("2"));
    args.push(os("-tune"));
    args.push(os(&config.tune));
    args.push(os("-movflags"));
    args.push(os("+faststart"));

    if config.copy_metadata {
        args.push(os("-map_metadata"));
        args.push(os("0"));
        args.push(os("-movflags"));
        args.push(os("use_metadata_tags"));
    }

    args.push(output.as_os_str().to_os_string());
    args
}

/// Rotation tokens first, then the scale token, comma-joined. Empty when
/// neither was requested.
fn filter_chain(config: &Config) -> String {
    let mut vf: Vec<String> = Vec::new();

    if let Some(rotate) = config.rotate {
        vf.extend(rotate.filter_tokens().iter().map(|token| token.to_string()));
    }

    if let Some(scale) = &config.scale {
        vf.push(format!("scale={}", scale));
    }

    vf.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use crate::Rotation;

    fn base_config() -> Config {
        Config {
            input: PathBuf::from("movie.mov"),
            quality: 25,
            fps: None,
            rotate: None,
            scale: None,
            preset: "slow".to_string(),
            tune: "film".to_string(),
            audio: AudioMode::Default { channels: None, bitrate: None },
            from: None,
            to: None,
            copy_metadata: true,
            overwrite: false,
        }
    }

    fn strings(args: Vec<OsString>) -> Vec<String> {
        args.into_iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn default_args_in_contract_order() {
        let args = strings(build_args(&base_config(), Path::new("movie.encoded.mp4")));
        assert_eq!(args, [
            "-n",
            "-i", "movie.mov",
            "-c:v", "libx264",
            "-preset", "slow",
            "-crf", "25",
            "-c:a", "aac",
            "-vsync", "2",
            "-tune", "film",
            "-movflags", "+faststart",
            "-map_metadata", "0",
            "-movflags", "use_metadata_tags",
            "movie.encoded.mp4",
        ]);
    }

    #[test]
    fn everything_enabled_keeps_the_order() {
        let config = Config {
            fps: Some(29.97),
            rotate: Some(Rotation::Right),
            scale: Some("1280:-1".to_string()),
            audio: AudioMode::Default { channels: Some(2), bitrate: None },
            from: Some("00:01:00".to_string()),
            to: Some("00:02:00".to_string()),
            ..base_config()
        };
        let args = strings(build_args(&config, Path::new("movie.encoded.mp4")));
        assert_eq!(args, [
            "-n",
            "-i", "movie.mov",
            "-c:v", "libx264",
            "-preset", "slow",
            "-crf", "25",
            "-vf", "transpose=1,scale=1280:-1",
            "-r", "29.97",
            "-ac", "2",
            "-c:a", "aac",
            "-ss", "00:01:00",
            "-to", "00:02:00",
            "-vsync", "2",
            "-tune", "film",
            "-movflags", "+faststart",
            "-map_metadata", "0",
            "-movflags", "use_metadata_tags",
            "movie.encoded.mp4",
        ]);
    }

    #[test]
    fn overwrite_swaps_the_guard_flag() {
        let config = Config { overwrite: true, ..base_config() };
        let args = strings(build_args(&config, Path::new("movie.encoded.mp4")));
        assert_eq!(args[0], "-y");
        assert!(!args.contains(&"-n".to_string()));
    }

    #[test]
    fn no_filter_flag_without_rotation_or_scale() {
        let args = strings(build_args(&base_config(), Path::new("movie.encoded.mp4")));
        assert!(!args.contains(&"-vf".to_string()));
    }

    #[test]
    fn rotation_tokens_come_before_scale() {
        let config = Config {
            rotate: Some(Rotation::Flip),
            scale: Some("-1:720".to_string()),
            ..base_config()
        };
        assert_eq!(filter_chain(&config), "transpose=2,transpose=2,scale=-1:720");
    }

    #[test]
    fn audio_copy_selects_the_copy_codec() {
        let config = Config { audio: AudioMode::Copy, ..base_config() };
        let args = strings(build_args(&config, Path::new("movie.encoded.mp4")));
        let at = args.iter().position(|arg| arg == "-c:a").unwrap();
        assert_eq!(args[at + 1], "copy");
        assert!(!args.contains(&"aac".to_string()));
    }

    #[test]
    fn audio_disabled_drops_the_stream() {
        let config = Config { audio: AudioMode::Disabled, ..base_config() };
        let args = strings(build_args(&config, Path::new("movie.encoded.mp4")));
        assert!(args.contains(&"-an".to_string()));
        assert!(!args.contains(&"-c:a".to_string()));
    }

    #[test]
    fn no_meta_drops_the_metadata_flags() {
        let config = Config { copy_metadata: false, ..base_config() };
        let args = strings(build_args(&config, Path::new("movie.encoded.mp4")));
        assert!(!args.contains(&"-map_metadata".to_string()));
        assert!(!args.contains(&"use_metadata_tags".to_string()));
        assert_eq!(args.last().unwrap(), "movie.encoded.mp4");
    }
}
