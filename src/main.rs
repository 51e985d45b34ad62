use std::io::{self, Write};

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use crossterm::{
    cursor::Show,
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{error, info};

use voyage::app::{App, AppMessage};
use voyage::cli::{parse_args, run_cli_command, ArgsError, USAGE_HINT};
use voyage::config::AppConfig;
use voyage::list::PageOutcome;
use voyage::models::ItineraryWithTour;
use voyage::tracing_setup::init_tracing;
use voyage::ui;

fn main() -> Result<()> {
    color_eyre::install()?;

    // Handle --version/--help before any initialization
    let options = match parse_args(std::env::args()) {
        Ok(command) => match run_cli_command(command) {
            Some(options) => options,
            None => return Ok(()),
        },
        Err(err) => {
            report_args_error(&err);
            std::process::exit(2);
        }
    };

    let mut config = AppConfig::from_env().wrap_err("invalid configuration")?;
    if let Some(url) = options.api_url {
        config = config.with_api_url(url);
    }

    init_tracing(&config.log_file)?;
    info!(api_url = %config.api_url, page_limit = config.page_limit, "Starting voyage");

    setup_panic_hook();

    let mut app = App::new(&config, options.filters).wrap_err("failed to build HTTP client")?;
    let runtime = tokio::runtime::Runtime::new()?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = runtime.block_on(async {
        let size = terminal.size()?;
        app.update_terminal_dimensions(size.width, size.height);
        app.sync_list();
        run_app(&mut terminal, &mut app).await
    });

    restore_terminal(&mut terminal)?;

    if let Err(ref err) = result {
        error!("Exited with error: {:?}", err);
    }
    result
}

fn report_args_error(err: &ArgsError) {
    eprintln!("error: {}", err);
    eprintln!("{}", USAGE_HINT);
}

/// Setup panic hook to restore terminal on panic
///
/// Panics on runtime worker threads come from fetch tasks, which the list
/// controller turns into an inline error; those only go to the log.
fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        if std::thread::current().name() != Some("main") {
            error!("Task panicked: {}", panic_info);
            return;
        }
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen, Show);
        let _ = io::stdout().flush();
        original_hook(panic_info);
    }));
}

/// Restore terminal to normal mode
fn restore_terminal<B: ratatui::backend::Backend + Write>(terminal: &mut Terminal<B>) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();

    // Take the receivers out of the app (we need ownership for select!)
    let mut message_rx: Option<mpsc::UnboundedReceiver<AppMessage>> = app.message_rx.take();
    let mut outcome_rx: Option<mpsc::UnboundedReceiver<PageOutcome<ItineraryWithTour>>> =
        app.list.take_outcome_rx();

    loop {
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, app))?;
            app.needs_redraw = false;
        }

        tokio::select! {
            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        app.handle_key(key);
                    }
                    Some(Ok(Event::Mouse(mouse))) => app.handle_mouse(mouse),
                    Some(Ok(Event::Resize(width, height))) => {
                        app.update_terminal_dimensions(width, height);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(err)) => return Err(err.into()),
                    None => app.quit(),
                }
            }

            Some(outcome) = async {
                match outcome_rx.as_mut() {
                    Some(rx) => rx.recv().await,
                    None => std::future::pending().await,
                }
            } => {
                app.handle_page_outcome(outcome);
            }

            Some(message) = async {
                match message_rx.as_mut() {
                    Some(rx) => rx.recv().await,
                    None => std::future::pending().await,
                }
            } => {
                app.handle_message(message);
            }
        }

        if app.should_quit {
            info!("Quit requested");
            return Ok(());
        }
    }
}
