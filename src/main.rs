mod ui;

use anyhow::Context;
use clap::Parser;
use crossterm::event::{self, Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use dex_lookup::config::{Config, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use dex_lookup::session::{LookupSession, Outcome, Ticket};
use dex_lookup::utils::{ability_label, format_tenths};
use dex_lookup::{HttpSource, LookupQuery, LookupResult, LookupService, SpriteLoader, Variant};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::fs::{self, OpenOptions};
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::ui::{draw_ui, App};

#[derive(Debug, Parser)]
#[command(name = "dex-lookup", about = "Look up a Pokémon by name or Pokédex number")]
struct Cli {
    /// PokeAPI-compatible base URL
    #[arg(long, env = "POKEAPI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "POKEAPI_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Log file for interactive sessions
    #[arg(long, env = "DEX_LOG_FILE", default_value = "data/lookup.log")]
    log_file: PathBuf,

    /// Look up one Pokémon, print it and exit
    #[arg(long, value_name = "NAME_OR_ID")]
    lookup: Option<String>,

    /// Use the shiny sprite variant
    #[arg(long)]
    shiny: bool,

    /// Print the one-shot result as JSON
    #[arg(long, requires = "lookup")]
    json: bool,
}

impl Cli {
    fn config(&self) -> Config {
        Config::new(&self.base_url, Duration::from_secs(self.timeout_secs))
    }

    fn variant(&self) -> Variant {
        if self.shiny {
            Variant::Shiny
        } else {
            Variant::Normal
        }
    }
}

fn init_logging(log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match log_file {
        Some(path) => {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("creating log directory {}", dir.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = cli.config();

    // One-shot mode: useful for scripting and for checking an upstream.
    if let Some(identifier) = cli.lookup.as_deref() {
        init_logging(None)?;
        let service = LookupService::new(config.http_source()?);
        let result = service.lookup(identifier.trim(), cli.variant()).await;
        return print_result(&result, cli.variant(), cli.json);
    }

    init_logging(Some(&cli.log_file))?;
    info!(base_url = %config.base_url, "starting interactive session");

    let (tx, rx) = mpsc::unbounded_channel();
    let mut dispatcher = Dispatcher {
        service: Arc::new(LookupService::new(config.http_source()?)),
        sprites: config.sprite_loader()?,
        tx,
        in_flight: None,
    };
    let mut app = App::new(cli.variant());

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_loop(&mut terminal, &mut app, &mut dispatcher, rx);

    // Restore terminal
    disable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(LeaveAlternateScreen)?;
    res?;
    Ok(ExitCode::SUCCESS)
}

fn print_result(result: &LookupResult, variant: Variant, json: bool) -> anyhow::Result<ExitCode> {
    match result {
        LookupResult::Found(record) => {
            if json {
                println!("{}", serde_json::to_string_pretty(record)?);
                return Ok(ExitCode::SUCCESS);
            }
            println!("Name: {}", record.display_name());
            println!("#ID: {}", record.id);
            println!("Height: {}", format_tenths(record.height_decimetres, "m"));
            println!("Weight: {}", format_tenths(record.weight_hectograms, "kg"));
            println!(
                "Sprite ({}): {}",
                variant.label(),
                record.sprite_url.as_deref().unwrap_or("Image not available")
            );
            println!("Abilities:");
            if record.abilities.is_empty() {
                println!("  No abilities found.");
            }
            for ability in &record.abilities {
                println!("  \u{2022} {}", ability_label(ability));
            }
            Ok(ExitCode::SUCCESS)
        }
        LookupResult::NotFound => {
            eprintln!("No such Pokémon.");
            Ok(ExitCode::from(1))
        }
        LookupResult::TransportError(err) => {
            eprintln!("Could not reach the Pokédex, check your connection: {}", err);
            Ok(ExitCode::from(2))
        }
    }
}

/// Runs lookups off the UI thread. Only the newest task is kept alive.
struct Dispatcher {
    service: Arc<LookupService<HttpSource>>,
    sprites: SpriteLoader,
    tx: UnboundedSender<(Ticket, Outcome)>,
    in_flight: Option<JoinHandle<()>>,
}

impl Dispatcher {
    fn dispatch(&mut self, session: &mut LookupSession, query: LookupQuery) {
        if let Some(prev) = self.in_flight.take() {
            prev.abort();
        }
        let ticket = session.begin(query.clone());
        let service = self.service.clone();
        let sprites = self.sprites.clone();
        let tx = self.tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let outcome = service.resolve(query, Some(&sprites)).await;
            let _ = tx.send((ticket, outcome));
        }));
    }
}

fn toggle_variant(app: &mut App, dispatcher: &mut Dispatcher) {
    if let Some(query) = app.session.toggle_variant() {
        dispatcher.dispatch(&mut app.session, query);
    }
}

fn submit(app: &mut App, dispatcher: &mut Dispatcher) {
    let query = app.session.query_for(app.submitted_identifier());
    dispatcher.dispatch(&mut app.session, query);
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    dispatcher: &mut Dispatcher,
    mut rx: UnboundedReceiver<(Ticket, Outcome)>,
) -> anyhow::Result<()> {
    let tick_rate = Duration::from_millis(100);

    loop {
        // Pick up finished lookups; the session ignores superseded ones.
        while let Ok((ticket, outcome)) = rx.try_recv() {
            app.session.complete(ticket, outcome);
        }

        draw_ui(terminal, app)?;

        if !event::poll(tick_rate)? {
            continue;
        }
        let key = match event::read()? {
            CEvent::Key(key) if key.kind != KeyEventKind::Release => key,
            _ => continue,
        };
        if is_interrupt(&key) {
            break;
        }

        if app.editing {
            match key.code {
                KeyCode::Enter => {
                    app.editing = false;
                    submit(app, dispatcher);
                }
                KeyCode::Esc => app.editing = false,
                KeyCode::Tab => toggle_variant(app, dispatcher),
                KeyCode::Backspace => {
                    app.search_text.pop();
                }
                KeyCode::Char(c) => app.search_text.push(c),
                _ => {}
            }
        } else {
            match key.code {
                KeyCode::Char('q') => break,
                KeyCode::Char('?') | KeyCode::F(1) => app.show_help = !app.show_help,
                KeyCode::Esc => app.show_help = false,
                KeyCode::Char('/') | KeyCode::Char('i') => {
                    app.editing = true;
                    app.show_help = false;
                }
                KeyCode::Tab | KeyCode::Char('s') => toggle_variant(app, dispatcher),
                KeyCode::Enter => submit(app, dispatcher),
                _ => {}
            }
        }
    }
    Ok(())
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}
