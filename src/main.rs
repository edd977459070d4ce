use clap::{builder::RangedU64ValueParser, error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Instant,
};
use tyxt::{
    app::{App, Control},
    config::{Config, ConfigStore, FileConfigStore},
    language::Language,
    runtime::{AppEvent, CrosstermEventSource, Runner, TICK_RATE},
    session::Session,
    telemetry,
    theme::ThemeId,
    word_generator::WordGenerator,
    TyxtError,
};

/// minimal typing speed test for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A minimal typing speed test: type the random words, watch wpm, accuracy and time live, then review a wpm history graph with peak, average and consistency."
)]
pub struct Cli {
    /// number of words in each test [default: 50, or the config file value]
    #[clap(short = 'w', long = "words", value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    number_of_words: Option<usize>,

    /// color theme to start with (cycle at runtime with ctrl+t)
    #[clap(short = 't', long, value_enum)]
    theme: Option<ThemeId>,

    /// seed for word selection, makes the generated prompts reproducible
    #[clap(long)]
    seed: Option<u64>,

    /// read settings from this file instead of the default config location
    #[clap(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Settings after layering command line flags over the config file
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub word_count: usize,
    pub theme: ThemeId,
    pub seed: Option<u64>,
}

impl Cli {
    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }

    fn resolve(&self, config: &Config) -> Settings {
        Settings {
            word_count: self.number_of_words.unwrap_or(config.word_count).max(1),
            theme: self.theme.unwrap_or(config.theme),
            seed: self.seed,
        }
    }
}

fn build_app(settings: &Settings) -> Result<App, TyxtError> {
    let generator = WordGenerator::new(Language::common()?, settings.seed);
    let mut session = Session::new(generator, settings.word_count, Instant::now());
    session.set_theme_index(settings.theme.index());
    Ok(App::new(session))
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let _telemetry = telemetry::init_tracing("info");

    let config = cli.config_store().load();
    let settings = cli.resolve(&config);
    tracing::info!(?settings, "starting");

    let mut app = build_app(&settings)?;

    enable_raw_mode()?;
    let _restore = TerminalGuard;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    start_tui(&mut terminal, &mut app)
}

/// Puts the terminal back in cooked mode when dropped, including on early
/// returns and panics during setup or the event loop.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = restore_terminal() {
            tracing::error!(%err, "failed to restore terminal");
        }
    }
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, Show)
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let mut runner = Runner::new(CrosstermEventSource::new(), TICK_RATE);
    draw(terminal, app);

    loop {
        match runner.step() {
            AppEvent::Tick => app.on_tick(Instant::now()),
            AppEvent::Resize => {}
            AppEvent::Key(key) => {
                if app.handle_key(key, Instant::now()) == Control::Quit {
                    break;
                }
            }
            AppEvent::Closed => {
                tracing::warn!("terminal event stream closed");
                break;
            }
        }

        runner.sync_ticker(app.ticking(), Instant::now());
        draw(terminal, app);
    }

    runner.stop_ticking();
    tracing::info!("exiting");
    Ok(())
}

/// Draw a frame. A failed draw is logged and retried on the next event.
fn draw<B: Backend>(terminal: &mut Terminal<B>, app: &App) {
    let view = app.view();
    if let Err(err) = terminal.draw(|f| f.render_widget(&view, f.area())) {
        tracing::error!(%err, "render failed");
    }
}
