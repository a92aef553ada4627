//! Command-line front end: play a PSID tune and export its notes.

use anyhow::{Context, Result};
use clap::Parser;
use sid6502::IllegalOpcodePolicy;
use sid_notes::{output, Player, PlayerConfig, PsidFile, Region};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sid-notes")]
#[command(about = "Reconstruct notes from a C64 PSID tune and export them as JSON or MIDI")]
struct Args {
    /// PSID file to play
    file: PathBuf,

    /// Seconds to play
    #[arg(short, long, default_value_t = 60.0, conflicts_with = "frames")]
    seconds: f64,

    /// Frames to play instead of a duration in seconds
    #[arg(short, long)]
    frames: Option<u64>,

    /// 1-based song number (defaults to the file's start song)
    #[arg(long)]
    song: Option<u16>,

    /// Use NTSC timing instead of PAL
    #[arg(long)]
    ntsc: bool,

    /// Treat unknown opcodes as one-cycle NOPs instead of failing
    #[arg(long)]
    allow_illegal_opcodes: bool,

    /// Write the note dump as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write a Standard MIDI File
    #[arg(long)]
    midi: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn config(&self) -> PlayerConfig {
        let mut config = PlayerConfig::default();
        if self.ntsc {
            config = config.with_region(Region::Ntsc);
        }
        if let Some(song) = self.song {
            config = config.with_song(song);
        }
        if self.allow_illegal_opcodes {
            config = config.with_illegal_opcode_policy(IllegalOpcodePolicy::Nop);
        }
        config
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = match args.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let psid = PsidFile::read(&args.file)
        .with_context(|| format!("failed to load {}", args.file.display()))?;

    println!("Name:     {}", psid.name);
    println!("Author:   {}", psid.author);
    println!("Released: {}", psid.released);
    println!(
        "Songs:    {} (start song {}), load ${:04X}, init ${:04X}, play ${:04X}",
        psid.songs, psid.start_song, psid.load_address, psid.init_address, psid.play_address
    );

    let config = args.config();
    let fps = config.region.frame_rate();
    let mut player = Player::new(&psid, config).context("failed to initialise tune")?;

    let played = match args.frames {
        Some(frames) => player.run_frames(frames),
        None => player.run_seconds(args.seconds),
    };
    played.context("playback failed")?;

    let frames = player.frame();
    let song = player.song();
    let voices = player.finish();

    println!("Played song {} for {} frames", song, frames);
    for (voice, notes) in voices.iter().enumerate() {
        println!("Voice {}: {} notes", voice + 1, notes.len());
    }

    if let Some(path) = &args.json {
        let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        output::write_json(BufWriter::new(file), &voices)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Wrote note dump to {}", path.display());
    }

    if let Some(path) = &args.midi {
        let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        output::write_midi(BufWriter::new(file), &voices, fps)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Wrote MIDI file to {}", path.display());
    }

    Ok(())
}
