//! Buzzline sentiment consumer.
//!
//! Pulls JSON messages from the configured topic, aggregates average
//! sentiment per category, and renders a live Ratatui bar chart.
//!
//! # Running
//!
//! ## Embedded mode (default, no external dependencies):
//! ```bash
//! cargo run
//! ```
//!
//! ## Kafka mode (requires a reachable broker):
//! ```bash
//! SENTIMENT_MODE=kafka PROJECT_TOPIC=buzzline-topic cargo run --features kafka
//! ```

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{error, info, warn};

use buzzline_sentiment::app::App;
use buzzline_sentiment::config::Config;
use buzzline_sentiment::source::{self, StreamSource};
use buzzline_sentiment::tui;

/// Idle redraw cadence when no messages arrive.
const IDLE_TICK: Duration = Duration::from_millis(200);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let config = Config::from_env();

    // Log to file (keeps TUI clean)
    let file_appender = tracing_appender::rolling::never(".", "buzzline-sentiment.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!(topic = %config.topic, mode = %config.mode, "polling messages from topic");

    let mut source = source::create_stream_source(&config)?;

    // ── Setup terminal ───────────────────────────────────────────
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));

    // ── Consume until quit, interrupt, or stream end ─────────────
    let mut app = App::new(config.topic.clone());
    let result = run_loop(
        &mut terminal,
        &mut app,
        source.as_mut(),
        config.render_yield,
    )
    .await;

    // ── Shutdown (always executed) ───────────────────────────────
    if let Err(e) = source.close().await {
        warn!(error = %e, "error while releasing stream source");
    }

    // When the stream ended on its own, keep the last chart on screen
    // until a key is pressed.
    if result.is_ok() && !app.quit_requested {
        let _ = hold_final_frame(&mut terminal, &app);
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    print_summary(&app);
    info!(
        received = app.messages_received,
        applied = app.messages_applied,
        dropped = app.messages_dropped,
        "consumer stopped"
    );
    result
}

/// Pull, aggregate, redraw. One message at a time, redraw after each.
async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    source: &mut dyn StreamSource,
    render_yield: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    terminal.draw(|f| tui::render(f, app))?;

    loop {
        tokio::select! {
            biased;
            _ = tokio::signal::ctrl_c() => {
                warn!("consumer interrupted by user");
                app.quit_requested = true;
                break;
            }
            next = source.next_message() => match next {
                Ok(Some(msg)) => {
                    app.ingest(&msg.payload);
                    app.tick();
                    terminal.draw(|f| tui::render(f, app))?;
                    // Bounded yield: let the display refresh and the user quit
                    if poll_quit(render_yield)? {
                        app.quit_requested = true;
                        break;
                    }
                }
                Ok(None) => {
                    info!("stream ended");
                    break;
                }
                Err(e) => {
                    error!(error = %e, "error while consuming messages");
                    break;
                }
            },
            _ = tokio::time::sleep(IDLE_TICK) => {
                app.tick();
                terminal.draw(|f| tui::render(f, app))?;
                if poll_quit(Duration::ZERO)? {
                    app.quit_requested = true;
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Polls input for up to `budget`, reporting whether the user asked to quit.
fn poll_quit(budget: Duration) -> io::Result<bool> {
    if event::poll(budget)? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press
                && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
            {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// One final blocking render: redraw the last state and wait for any key.
fn hold_final_frame(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &App,
) -> io::Result<()> {
    terminal.draw(|f| tui::render(f, app))?;
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}

/// Plain-text recap printed after the terminal is restored.
fn print_summary(app: &App) {
    println!();
    println!("=== Average Sentiment by Category ({}) ===", app.topic);
    if app.table.is_empty() {
        println!("(no messages were aggregated)");
    } else {
        println!("{:<20} {:>10} {:>10}", "category", "average", "count");
        for (category, stats) in app.table.iter() {
            println!(
                "{:<20} {:>10.2} {:>10}",
                category,
                stats.average(),
                stats.message_count
            );
        }
    }
    println!(
        "messages: {} received, {} applied, {} dropped",
        app.messages_received, app.messages_applied, app.messages_dropped
    );
}
