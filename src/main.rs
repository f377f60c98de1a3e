//! Cyber Academy
//!
//! Terminal front-end for the cybersecurity training simulator. Reads its
//! config from the file named by `CYBER_ACADEMY_CONFIG`.

use anyhow::Context;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use cyber_academy::engine::Heartbeat;
use cyber_academy::tui::App;
use cyber_academy::{Academy, Config, Result};
use log::info;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::stdout;
use std::sync::{Arc, Mutex};

fn main() -> Result<()> {
    let config = Config::from_env()?;
    simple_logger::SimpleLogger::new()
        .with_level(config.log_level()?)
        .init()
        .context("failed to install logger")?;

    let academy = Arc::new(Mutex::new(Academy::from_config(&config)?));
    let mut heartbeat = Heartbeat::start(academy.clone(), config.tick_interval())?;
    info!("Academy ready");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(academy, config.difficulty);
    let outcome = run(&mut terminal, &mut app);

    // Cleanup
    heartbeat.stop();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    outcome?;

    println!("\n╔════════════════════════════════════════════════════════╗");
    println!("║  Thanks for training at Cyber Academy!                 ║");
    println!("║  Your progress has been saved.                         ║");
    println!("╚════════════════════════════════════════════════════════╝\n");

    Ok(())
}

fn run<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| app.render(frame))?;
        if !app.handle_input()? {
            break;
        }
    }
    Ok(())
}
