//! Terminal weather dashboard backed by the Skycast proxy.
//!
//! This binary focuses on:
//! - Parsing CLI arguments
//! - Driving searches through the proxy and applying them to the view state
//! - Human-friendly output and the persisted recent-search list

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use directories::ProjectDirs;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use skycast::client::{ProxyClient, DEFAULT_PROXY_URL};
use skycast::dashboard::{
    DashboardSession, FileHistoryStore, SearchHistory, TemperatureUnit, Theme, ViewState,
};
use skycast::models::Location;

#[derive(Debug, Parser)]
#[command(name = "skycast-dashboard", version, about = "Terminal weather dashboard")]
struct Cli {
    /// Base URL of the proxy API.
    #[arg(long, env = "SKYCAST_PROXY_URL", default_value = DEFAULT_PROXY_URL, global = true)]
    proxy: String,

    /// Show temperatures in Fahrenheit.
    #[arg(long, global = true)]
    fahrenheit: bool,

    #[arg(long, value_enum, default_value_t = ThemeArg::Dark, global = true)]
    theme: ThemeArg,

    /// Print the dashboard as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    /// Where the recent-search list is kept.
    #[arg(long, env = "SKYCAST_HISTORY_FILE", global = true)]
    history_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ThemeArg {
    Dark,
    Light,
    /// Background follows the current conditions.
    Weather,
}

impl From<ThemeArg> for Option<Theme> {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Dark => Some(Theme::Dark),
            ThemeArg::Light => Some(Theme::Light),
            ThemeArg::Weather => None,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show weather for a city.
    Search { city: String },

    /// Show weather for a coordinate pair.
    Locate {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },

    /// List recent searches.
    History,

    /// Read commands from stdin; toggles re-render without refetching.
    Interactive,
}

/// Prints a loading marker and clears it when dropped, whatever the outcome.
struct Loading;

impl Loading {
    fn start() -> Self {
        eprint!("Loading...");
        let _ = io::stderr().flush();
        Loading
    }
}

impl Drop for Loading {
    fn drop(&mut self) {
        eprint!("\r\x1b[2K");
        let _ = io::stderr().flush();
    }
}

/// One line typed in interactive mode. Commands start with `:`; anything
/// else is a city name.
#[derive(Debug, PartialEq)]
enum Input {
    Blank,
    Quit,
    Units,
    Theme,
    History,
    /// 1-based index into the history list.
    Again(usize),
    Unknown(String),
    City(String),
}

const INTERACTIVE_HELP: &str = "Type a city, or :again <n> | :units | :theme | :history | :quit";

fn parse_input(line: &str) -> Input {
    let line = line.trim();
    let Some(command) = line.strip_prefix(':') else {
        return if line.is_empty() {
            Input::Blank
        } else {
            Input::City(line.to_string())
        };
    };
    let (name, arg) = command.split_once(char::is_whitespace).unwrap_or((command, ""));
    match (name, arg.trim()) {
        ("quit" | "exit" | "q", "") => Input::Quit,
        ("units", "") => Input::Units,
        ("theme", "") => Input::Theme,
        ("history", "") => Input::History,
        ("again", n) => match n.parse::<usize>() {
            Ok(n) if n > 0 => Input::Again(n),
            _ => Input::Unknown(line.to_string()),
        },
        _ => Input::Unknown(line.to_string()),
    }
}

struct Dashboard {
    session: DashboardSession<FileHistoryStore>,
    json: bool,
}

impl Dashboard {
    /// Fetch and show `location`. On failure the previous view stays as it was.
    async fn search(&mut self, location: Location) -> anyhow::Result<bool> {
        let result = {
            let _loading = Loading::start();
            self.session.search(&location).await
        };

        match result {
            Ok(true) => {
                self.show()?;
                Ok(true)
            }
            Ok(false) => Ok(false),
            Err(e) => {
                tracing::error!("Search for '{}' failed: {}", location, e);
                eprintln!("{}", failure_message(&location));
                Ok(false)
            }
        }
    }

    fn show(&self) -> anyhow::Result<()> {
        match self.session.view().render() {
            Some(view) if self.json => {
                let raw = serde_json::to_string_pretty(&view).context("Failed to encode view")?;
                println!("{}", raw);
            }
            Some(view) => print!("{}", view),
            None => println!("Try 'Chennai', 'Mumbai', or `locate --lat .. --lon ..`"),
        }
        Ok(())
    }

    fn show_history(&self) {
        let entries = self.session.history().entries();
        if entries.is_empty() {
            println!("No recent searches");
            return;
        }
        for (i, entry) in entries.iter().enumerate() {
            println!("{:>2}. {}", i + 1, entry);
        }
    }

    async fn interactive(&mut self) -> anyhow::Result<()> {
        println!("{}", INTERACTIVE_HELP);
        self.show()?;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
            match parse_input(&line) {
                Input::Blank => continue,
                Input::Quit => break,
                Input::Units => {
                    if self.session.view_mut().toggle_unit() {
                        self.show()?;
                    }
                }
                Input::Theme => {
                    self.session.view_mut().toggle_theme();
                    self.show()?;
                }
                Input::History => self.show_history(),
                Input::Again(n) => {
                    match self.session.history().entries().get(n - 1).cloned() {
                        Some(city) => {
                            self.search(Location::City(city)).await?;
                        }
                        None => eprintln!("No such history entry"),
                    }
                }
                Input::Unknown(command) => {
                    eprintln!("Unknown command '{}'. {}", command, INTERACTIVE_HELP)
                }
                Input::City(city) => {
                    self.search(Location::City(city)).await?;
                }
            }
        }
        Ok(())
    }
}

fn failure_message(location: &Location) -> &'static str {
    match location {
        Location::City(_) => "City not found or API error.",
        Location::Coordinates { .. } => "Unable to fetch weather for your location.",
    }
}

fn history_store(explicit: Option<PathBuf>) -> FileHistoryStore {
    if let Some(path) = explicit {
        return FileHistoryStore::at(path);
    }
    match ProjectDirs::from("", "", "skycast") {
        Some(dirs) => FileHistoryStore::in_dir(dirs.data_dir()),
        None => {
            tracing::warn!("No home directory; keeping search history in the working directory");
            FileHistoryStore::in_dir(std::path::Path::new("."))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skycast=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let unit = if cli.fahrenheit {
        TemperatureUnit::Fahrenheit
    } else {
        TemperatureUnit::Celsius
    };

    let store = history_store(cli.history_file);
    tracing::debug!("Search history at {}", store.path().display());

    let mut dashboard = Dashboard {
        session: DashboardSession::new(
            ProxyClient::new(&cli.proxy),
            ViewState::new(unit, cli.theme.into()),
            SearchHistory::open(store),
        ),
        json: cli.json,
    };

    match cli.command {
        Command::Search { city } => {
            let city = city.trim().to_string();
            if city.is_empty() {
                anyhow::bail!("City must not be empty");
            }
            if !dashboard.search(Location::City(city)).await? {
                std::process::exit(1);
            }
        }
        Command::Locate { lat, lon } => {
            if !dashboard.search(Location::Coordinates { lat, lon }).await? {
                std::process::exit(1);
            }
        }
        Command::History => dashboard.show_history(),
        Command::Interactive => dashboard.interactive().await?,
    }

    Ok(())
}
