pub mod app;
pub mod ui;

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::{TimeZone, Utc};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::deadline::DeadlineFormatter;
use crate::snapshot::load_snapshot;
use app::App;
use ui::ui;

/// Opens the watch view on a task snapshot, refreshing countdowns every `tick`.
pub fn run_tui<Tz: TimeZone>(path: PathBuf, formatter: DeadlineFormatter<Tz>, tick: Duration) -> anyhow::Result<()>
where
    Tz::Offset: fmt::Display,
{
    let tasks = load_snapshot(&path)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(path, formatter, tasks, Utc::now());
    let res = run_app(&mut terminal, &mut app, tick);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

fn run_app<B: Backend, Tz: TimeZone>(terminal: &mut Terminal<B>, app: &mut App<Tz>, tick: Duration) -> io::Result<()>
where
    Tz::Offset: fmt::Display,
{
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Down | KeyCode::Char('j') => app.next(),
                        KeyCode::Up | KeyCode::Char('k') => app.previous(),
                        KeyCode::Char('d') => app.toggle_filter(),
                        KeyCode::Char('r') => app.reload(),
                        _ => {}
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick {
            app.tick(Utc::now());
            last_tick = Instant::now();
        }
    }
}
