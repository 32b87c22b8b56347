use std::{
    error::Error,
    fs::{self, File},
    io::{self, stdin},
    path::PathBuf,
    sync::Mutex,
    time::Instant,
};

use chrono::Local;
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use studybuddy::{
    app::{App, Flow},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    export::write_sessions_csv,
    runtime::{AppEvent, CrosstermEventSource, Runner},
    stats::compute_stats,
    store::{FileBackend, MemoryBackend, SessionStore},
    ui,
};

/// study session timer with streaks and daily stats
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A study companion for the terminal: time study sessions, keep a daily streak going, and watch a (simulated) study environment."
)]
pub struct Cli {
    /// file holding the saved user record
    #[clap(long)]
    state_file: Option<PathBuf>,

    /// configuration file to read instead of the default location
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// keep everything in memory and never touch the saved record
    #[clap(long)]
    ephemeral: bool,

    /// measure completion against this many study minutes per day
    #[clap(short = 'g', long)]
    daily_goal: Option<u32>,

    /// write the session history as csv to this path and exit
    #[clap(long, value_name = "PATH")]
    export: Option<PathBuf>,

    /// print today's statistics and exit
    #[clap(long)]
    stats: bool,

    /// log file (defaults to the state directory)
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Merge command line overrides into the loaded configuration
    fn apply_to(&self, mut config: Config) -> Config {
        if let Some(path) = &self.state_file {
            config.state_file = Some(path.clone());
        }
        if let Some(goal) = self.daily_goal {
            config.daily_goal_minutes = Some(goal);
        }
        config
    }

    fn session_store(&self, config: &Config) -> SessionStore {
        if self.ephemeral {
            return SessionStore::new(MemoryBackend::new());
        }
        match &config.state_file {
            Some(path) => SessionStore::new(FileBackend::with_path(path)),
            None => SessionStore::new(FileBackend::new()),
        }
    }
}

fn init_logging(path: Option<PathBuf>) {
    let Some(path) = path.or_else(AppDirs::log_path) else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let Ok(file) = File::options().create(true).append(true).open(&path) else {
        return;
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_file.clone());

    let config_store = match &cli.config {
        Some(path) => FileConfigStore::with_path(path),
        None => FileConfigStore::new(),
    };
    let config = cli.apply_to(config_store.load());
    let store = cli.session_store(&config);

    if let Some(path) = &cli.export {
        let state = store.load();
        write_sessions_csv(&state.sessions, File::create(path)?)?;
        info!(path = %path.display(), sessions = state.sessions.len(), "exported sessions");
        return Ok(());
    }

    if cli.stats {
        let state = store.load();
        let metric = config.completion_metric();
        let stats = compute_stats(&state, Local::now().date_naive(), metric.as_ref());
        println!("today: {}", stats.today_count);
        println!("total: {} min", stats.total_minutes);
        println!("streak: {}", stats.streak);
        println!("completion: {}%", stats.completion_pct);
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(store, &config, Instant::now());
    let result = start_tui(&mut terminal, &mut app, &config);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), config.tick_rate());

    terminal.draw(|f| ui::draw(app, f))?;

    loop {
        match runner.step(Instant::now(), app.next_deadline()) {
            AppEvent::Tick => {
                if app.on_tick(Instant::now()) {
                    terminal.draw(|f| ui::draw(app, f))?;
                }
            }
            AppEvent::Resize => {
                terminal.draw(|f| ui::draw(app, f))?;
            }
            AppEvent::Key(key) => {
                if app.on_key(key, Instant::now()) == Flow::Quit {
                    break;
                }
                terminal.draw(|f| ui::draw(app, f))?;
            }
        }
    }

    info!("exiting");
    Ok(())
}
