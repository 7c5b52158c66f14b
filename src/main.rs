use std::{error::Error, path::PathBuf};

use alarm_clock::{
    alert::{Player, Silent},
    config::Config,
    sound::RodioPlayer,
    store::FileStore,
    AppState, Clock,
};
use clap::{Parser, Subcommand};
use eframe::{egui::ViewportBuilder, run_native};
use log::{info, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// use this config file instead of the default one
    #[clap(long, short)]
    config: Option<PathBuf>,
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// write the default config file
    Init {
        #[clap(long, short)]
        force: bool,
    },
    /// add an alarm, e.g. `07:30 AM` or `19:30`
    Add { time: String },
    List,
    /// enable/disable an alarm
    Toggle { id: u64 },
    Delete { id: u64 },
}

fn main() -> Result<(), Box<dyn Error>> {
    // initilize the logger
    simple_file_logger::init_logger!("alarm_clock").expect("couldn't initialize logger");

    let args = Args::parse();
    let config_path = match args.config {
        Some(path) => path,
        None => Config::config_path()?,
    };
    // init only needs the path, so it can replace a config that no longer parses
    if let Some(Command::Init { force }) = args.command {
        if force || !config_path.exists() {
            Config::new().save(&config_path)?;
            println!("wrote {}", config_path.display());
        } else {
            println!(
                "{} already exists, use --force to overwrite it",
                config_path.display()
            );
        }
        return Ok(());
    }

    let config = Config::load(&config_path)?;
    let store = FileStore::new(config.alarms_dir()?);

    match args.command {
        Some(Command::Init { .. }) => {}
        Some(Command::Add { time }) => {
            let mut state = AppState::new(store, Silent);
            match state.add(&time)? {
                Some(id) => println!("added alarm {id}"),
                None => println!("no time given, nothing added"),
            }
        }
        Some(Command::List) => {
            let state = AppState::new(store, Silent);
            for alarm in state.alarms() {
                let enabled = if alarm.enabled { "on" } else { "off" };
                println!("{}\t{}\t{enabled}", alarm.id, alarm.time);
            }
        }
        Some(Command::Toggle { id }) => {
            let mut state = AppState::new(store, Silent);
            if !state.toggle(id)? {
                println!("no alarm with id {id}");
            }
        }
        Some(Command::Delete { id }) => {
            let mut state = AppState::new(store, Silent);
            if !state.delete(id)? {
                println!("no alarm with id {id}");
            }
        }
        None => run_gui(config, config_path, store)?,
    }
    Ok(())
}

fn open_player(config: &Config) -> Box<dyn Player> {
    let player = config
        .sound_path()
        .and_then(|path| RodioPlayer::open(&path, config.volume, config.loop_sound));
    match player {
        Ok(player) => Box::new(player),
        Err(e) => {
            warn!("alarms will be silent: {e}");
            Box::new(Silent)
        }
    }
}

fn run_gui(config: Config, config_path: PathBuf, store: FileStore) -> Result<(), Box<dyn Error>> {
    info!("alarms stored in {}", store.dir().display());
    let state = AppState::new(store, open_player(&config)).with_snooze_minutes(config.snooze_minutes);
    let native_options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_title("Alarm Clock")
            .with_inner_size([360.0, 480.0]),
        ..Default::default()
    };
    run_native(
        "Alarm Clock",
        native_options,
        Box::new(|_| Ok(Box::new(Clock::new(state, config, Some(config_path))))),
    )
    .map_err(std::convert::Into::into)
}
