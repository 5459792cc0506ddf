#![warn(clippy::all, clippy::pedantic)]

use std::io;
use std::os::fd::AsRawFd;
use std::time::{Duration, Instant};

use blockdrop::Time;
use blockdrop::app::{App, AppResult};
use blockdrop::{config, systems, ui};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, error, info};
use ratatui::{Terminal, prelude::*};

fn main() -> AppResult<()> {
    // Create log file and redirect stderr to it, so log output does not
    // tear the alternate screen
    let log_path = "blockdrop.log";
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)?;

    let stderr_handle = std::io::stderr();
    let stderr_fd = stderr_handle.as_raw_fd();
    let log_file_fd = log_file.as_raw_fd();

    // Safety: We're redirecting stderr to our log file using standard POSIX operations
    unsafe {
        libc::dup2(log_file_fd, stderr_fd);
    }

    // Set RUST_BACKTRACE environment variable for detailed panic messages
    unsafe {
        std::env::set_var("RUST_BACKTRACE", "1");
    }

    // Configure the logger to use stderr (which is now redirected to our file)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    info!("Starting blockdrop");

    match config::load_config_from_file() {
        Ok(loaded) => {
            *config::CONFIG.write().unwrap() = loaded;
            info!("Configuration loaded successfully");
        }
        Err(e) => {
            // Continue with default configuration
            error!("Failed to load configuration: {e:?}");
        }
    }

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick_rate = Duration::from_millis(33); // ~30 FPS
    let game_tick_rate = Duration::from_millis(50); // Game logic updates less often

    let app = App::new();
    let res = run_app(&mut terminal, app, tick_rate, game_tick_rate);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("Game error: {err:?}");
    }

    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    tick_rate: Duration,
    game_tick_rate: Duration,
) -> AppResult<()> {
    let mut last_render = Instant::now();
    let mut last_game_tick = Instant::now();

    // Flush any pending input events that might be in the buffer
    while crossterm::event::poll(Duration::from_millis(0))? {
        let _ = event::read()?;
    }

    loop {
        // Draw the UI once per frame, regardless of gravity timing
        if last_render.elapsed() >= tick_rate {
            terminal.draw(|f| ui::render(f, &mut app))?;
            last_render = Instant::now();
        }

        // Advance game logic
        if last_game_tick.elapsed() >= game_tick_rate {
            last_game_tick = Instant::now();

            // The world clock is the single time source for game logic
            let delta_seconds = {
                let mut time = app.world.resource_mut::<Time>();
                time.update();
                time.delta_seconds()
            };

            if app.should_quit {
                return Ok(());
            }

            systems::game_tick_system(&mut app.world, delta_seconds);
        }

        // Process keyboard input. Each key event maps to one discrete game
        // input and is applied immediately, in arrival order.
        if crossterm::event::poll(Duration::from_millis(5))? {
            if let Event::Key(key) = event::read()? {
                debug!("Key event: {key:?}");

                if key.kind == KeyEventKind::Release {
                    continue;
                }

                let keys = config::CONFIG.read().unwrap().keys.clone();

                if keys.quits(key.code) {
                    app.should_quit = true;
                    continue;
                }

                if let Some(action) = keys.action_for(key.code) {
                    systems::apply_input(&mut app.world, action);
                }
            }
        }
    }
}
