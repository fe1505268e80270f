use std::path::PathBuf;
use std::process;
use structopt::StructOpt;

use encode_video::{AudioMode, Config, Rotation};

#[derive(Debug, StructOpt)]
#[structopt(name = "encode-video", version_short = "v")]
struct Opt {
    /// Source file to encode
    #[structopt(short, long)]
    input: PathBuf,
    /// Sets video quality (0-51, where 0 is lossless, 17 is visually lossless, 23 is optimal default)
    #[structopt(long = "v:quality", default_value = "25")]
    quality: u32,
    /// Sets output video framerate
    #[structopt(long = "v:fps")]
    fps: Option<f64>,
    /// Rotates video, only `90`, `180`, `270`, `-90` are valid values
    #[structopt(long = "v:rotate", allow_hyphen_values = true)]
    rotate: Option<Rotation>,
    /// Scales video, feed it with raw ffmpeg `scale` `vf`, basic example: 1280:-1, -1:720
    #[structopt(long = "v:scale")]
    scale: Option<String>,
    /// Sets video encoding preset
    #[structopt(long = "v:preset", default_value = "slow")]
    preset: String,
    /// Sets video tune preset
    #[structopt(long = "v:tune", default_value = "film")]
    tune: String,
    /// Copies source audio
    #[structopt(long = "a:copy")]
    audio_copy: bool,
    /// Disables audio
    #[structopt(long = "a:none")]
    audio_none: bool,
    /// Sets audio channels count
    #[structopt(long = "a:channels")]
    audio_channels: Option<u32>,
    /// Sets audio quality (in kbps)
    #[structopt(long = "a:bitrate")]
    audio_bitrate: Option<u32>,
    /// Cuts video from this time
    #[structopt(long)]
    from: Option<String>,
    /// Cuts video to this time
    #[structopt(long)]
    to: Option<String>,
    /// Skips metadata copying
    #[structopt(long)]
    no_meta: bool,
    /// Overwrites encoded file if already exists
    #[structopt(short = "y", long)]
    overwrite: bool,
}

fn resolve(opt: Opt) -> encode_video::Result<Config> {
    encode_video::check_input(&opt.input)?;

    let audio = AudioMode::resolve(
        opt.audio_copy,
        opt.audio_none,
        opt.audio_channels,
        opt.audio_bitrate.map(encode_video::kbps),
    )?;

    Ok(Config {
        input: opt.input,
        quality: opt.quality,
        fps: opt.fps,
        rotate: opt.rotate,
        scale: opt.scale,
        preset: opt.preset,
        tune: opt.tune,
        audio,
        from: opt.from,
        to: opt.to,
        copy_metadata: !opt.no_meta,
        overwrite: opt.overwrite,
    })
}

fn main() {
    let opt = Opt::from_args();

    let config = match resolve(opt) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        },
    };

    if let Err(e) = encode_video::run(&config) {
        eprintln!();
        eprintln!("Error happened");
        eprintln!("{}", e);
        process::exit(1);
    }

    println!();
    println!("Success!");
}
