//! alarm-chime — render, play, or wait for the wake-up melody.

use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use alarm_chime::alarm::{AlarmEvent, AlarmSession, AlarmSound, AlarmTime};
use alarm_chime::config::AlarmConfig;
use alarm_chime::playback::open_player;
use alarm_chime::synth::SynthCapability;
use alarm_chime::wav;

/// How often `watch` reads the wall clock.
const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Extra time `play` waits for the device to drain.
const DRAIN: Duration = Duration::from_millis(300);

#[derive(Parser)]
#[command(name = "alarm-chime", version, about)]
struct Cli {
    /// Config file (default: ~/.alarm-chime/config.yaml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the melody and save it as a WAV file.
    Render {
        /// Output path (default: the configured sound_path).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Play the alarm sound once.
    Play,
    /// Show the clock and ring the alarm at the given time. Ctrl-C stops.
    Watch {
        /// Alarm time as HH:MM (default: the configured alarm_time).
        #[arg(long)]
        at: Option<AlarmTime>,
    },
    /// List the note names a melody may use.
    Notes,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config_path = cli.config.unwrap_or_else(AlarmConfig::default_path);
    let config = AlarmConfig::load(&config_path)?;
    let capability = SynthCapability::detect();

    match cli.command {
        Command::Render { output } => render(&config, capability, output),
        Command::Play => play(&config, capability),
        Command::Watch { at } => watch(&config, capability, at),
        Command::Notes => {
            for (name, hz) in config.note_table().iter() {
                println!("{name:<4} {hz:>8.2} Hz");
            }
            Ok(())
        }
    }
}

fn render(
    config: &AlarmConfig,
    capability: SynthCapability,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn Error>> {
    let sound = AlarmSound::render(config, capability)?;
    let path = output.unwrap_or_else(|| config.sound_path.clone());
    wav::write_wav(&path, &sound.buffer)?;
    println!("Alarm sound saved as '{}'", path.display());
    println!("Duration: {:.1} seconds", sound.buffer.duration_secs());
    Ok(())
}

fn play(config: &AlarmConfig, capability: SynthCapability) -> Result<(), Box<dyn Error>> {
    let sound = AlarmSound::prepare(config, capability)?;
    let mut player = open_player();
    player.set_volume(config.volume)?;
    player.start(&sound.buffer, false)?;
    thread::sleep(Duration::from_secs_f64(sound.buffer.duration_secs()) + DRAIN);
    player.stop()?;
    Ok(())
}

fn watch(
    config: &AlarmConfig,
    capability: SynthCapability,
    at: Option<AlarmTime>,
) -> Result<(), Box<dyn Error>> {
    let running = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&running);
    ctrlc::set_handler(move || flag.store(false, Ordering::SeqCst))?;

    let sound = AlarmSound::prepare(config, capability)?;
    let mut player = open_player();
    player.set_volume(config.volume)?;

    let time = at.unwrap_or(config.alarm_time);
    let mut session = AlarmSession::new(time, player.as_mut(), &sound.buffer);
    println!("{}", session.clock().status_text());

    let mut stdout = io::stdout();
    while running.load(Ordering::SeqCst) {
        let now = Local::now().naive_local();
        if let Some(AlarmEvent::Ring(time)) = session.poll(&now)? {
            println!("\n\n  JAAGO JAAGO SUBH HO GYI!  ({time})");
            println!("  Time to wake up! Press Ctrl-C to stop the alarm.\n");
        }
        write!(stdout, "\r{}", session.status_line(&now))?;
        stdout.flush()?;
        thread::sleep(POLL_INTERVAL);
    }

    session.finish()?;
    println!("\n{}", session.clock().status_text());
    Ok(())
}
