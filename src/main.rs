use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
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
    time::SystemTime,
};

use typezy::{
    app::{App, Effect},
    config::{Config, ConfigStore, FileConfigStore},
    runtime::{EventPump, TICK_INTERVAL},
    session::{valid_duration, Session},
    text_provider::{spawn_fetch, HttpTextProvider},
    ui::Theme,
};

/// terminal typing speed test
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal typing speed test: fetches a paragraph from the web, counts down while you type, and reports words per minute and accuracy."
)]
pub struct Cli {
    /// number of seconds to run the test (1-600)
    #[clap(short = 's', long)]
    seconds: Option<u64>,

    /// custom reference text (skips the paragraph fetch)
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// endpoint to fetch paragraphs from
    #[clap(long)]
    endpoint: Option<String>,

    /// color theme
    #[clap(short = 't', long, value_enum)]
    theme: Option<CliTheme>,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum CliTheme {
    Light,
    Dark,
}

impl CliTheme {
    fn as_theme(&self) -> Theme {
        match self {
            CliTheme::Light => Theme::Light,
            CliTheme::Dark => Theme::Dark,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let mut config = store.load();
    if !valid_duration(config.duration_secs) {
        config.duration_secs = Config::default().duration_secs;
    }

    if let Some(secs) = cli.seconds {
        if !valid_duration(secs) {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::ValueValidation, "seconds must be between 1 and 600")
                .exit();
        }
        config.duration_secs = secs;
    }
    if let Some(endpoint) = cli.endpoint.clone() {
        config.endpoint = endpoint;
    }

    let theme = cli
        .theme
        .map(|t| t.as_theme())
        .or_else(|| Theme::from_name(&config.theme))
        .unwrap_or_default();

    let (session, loading) = match cli.prompt.clone() {
        Some(prompt) => (Session::new(prompt, config.duration_secs), false),
        None => (Session::new(String::new(), config.duration_secs), true),
    };
    let mut app = App::new(session, theme, loading);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let pump = EventPump::new(TICK_INTERVAL);
    if app.loading {
        spawn_fetch(HttpTextProvider::new(&config.endpoint)?, pump.sender());
    }

    let result = run(&mut terminal, &mut app, &pump, &config);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Remember duration/theme tweaks made during the run
    config.duration_secs = app.session.duration_secs;
    config.theme = app.theme.to_string();
    let _ = store.save(&config);

    result
}

fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    pump: &EventPump,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    draw(terminal, app)?;

    loop {
        match app.handle_event(pump.recv()?, SystemTime::now()) {
            Effect::Quit => break,
            Effect::Fetch => {
                spawn_fetch(HttpTextProvider::new(&config.endpoint)?, pump.sender());
                draw(terminal, app)?;
            }
            Effect::Redraw => draw(terminal, app)?,
            Effect::Noop => {}
        }
    }

    Ok(())
}

fn draw<B: Backend>(terminal: &mut Terminal<B>, app: &App) -> io::Result<()> {
    terminal.draw(|f| f.render_widget(app, f.area()))?;
    Ok(())
}
