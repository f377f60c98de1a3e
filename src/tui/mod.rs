//! Terminal User Interface
//!
//! Dashboard, simulation terminal, CTF and KotH views over a shared
//! [`Academy`](crate::Academy) using ratatui

pub mod app;
pub mod widgets;

pub use app::App;

use crate::data::{Difficulty, KothEventType};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
};

/// Color scheme for the academy
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub alert: Color,
    pub success: Color,
    pub warning: Color,
    pub border: Color,
    pub header: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            accent: Color::Cyan,
            alert: Color::Red,
            success: Color::Green,
            warning: Color::Yellow,
            border: Color::DarkGray,
            header: Color::Magenta,
        }
    }
}

pub fn difficulty_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Easy => Color::Green,
        Difficulty::Medium => Color::Magenta,
        Difficulty::Hard => Color::Red,
    }
}

pub fn event_color(event_type: KothEventType) -> Color {
    match event_type {
        KothEventType::Capture => Color::Yellow,
        KothEventType::Defense => Color::Green,
        KothEventType::Attack => Color::Red,
        KothEventType::System => Color::Blue,
    }
}

/// Create a styled border block
pub fn styled_block<'a>(title: &str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
}

/// Smaller logo for header
pub const SMALL_LOGO: &str = " CYBER ACADEMY ";

/// Help text
pub const HELP_TEXT: &str = r#"
╔═══════════════════════════════════════════════════════════════╗
║                       CONTROLS                                ║
╠═══════════════════════════════════════════════════════════════╣
║  Tab / 1-4  Switch view                                       ║
║  ↑/↓        Select competition or instance                    ║
║  : or /     Type a command                                    ║
║  Esc        Cancel / close help                               ║
║  ?          Toggle this help                                  ║
║  q          Quit                                              ║
╠═══════════════════════════════════════════════════════════════╣
║                      COMMANDS                                 ║
╠═══════════════════════════════════════════════════════════════╣
║  sim <module> [level]       Open a simulation terminal        ║
║  next / prev                Move between simulation tasks     ║
║  register [id]              Join a competition or instance    ║
║  flag <challenge> <flag>    Submit a CTF flag                 ║
║  capture [id] <flag>        Capture a KotH instance           ║
║  challenges [search]        Search the selected competition   ║
║  board [username]           Search the selected leaderboard   ║
║  profile / badges           Show your achievements            ║
║  reset                      Wipe all progress                 ║
╚═══════════════════════════════════════════════════════════════╝
"#;

/// Header, content, status bar
pub fn create_main_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),   // Header
            Constraint::Min(10),     // Main content
            Constraint::Length(1),   // Status bar
        ])
        .split(area)
        .to_vec()
}

/// Side panel + main area
pub fn create_content_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),  // Tab details
            Constraint::Percentage(60),  // Terminal
        ])
        .split(area)
        .to_vec()
}

/// Terminal output + command line
pub fn create_terminal_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),      // Output
            Constraint::Length(3),   // Input line
        ])
        .split(area)
        .to_vec()
}
