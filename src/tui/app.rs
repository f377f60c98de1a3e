//! Main application state and rendering

use crate::data::*;
use crate::engine::{catalog, Academy, SimulationSession, SkillLevel};
use crate::tui::widgets::{BadgeShelf, ProgressBar};
use crate::tui::{create_content_layout, create_main_layout, create_terminal_layout};
use crate::tui::{difficulty_color, event_color, styled_block, Theme, HELP_TEXT, SMALL_LOGO};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Lines kept in the terminal scrollback
const MAX_OUTPUT: usize = 200;

/// Application state
pub struct App {
    pub academy: Arc<Mutex<Academy>>,
    pub theme: Theme,
    pub running: bool,
    pub show_help: bool,
    pub tab: Tab,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub command_output: Vec<String>,
    pub session: Option<SimulationSession>,
    pub difficulty: SkillLevel,
    /// Highlighted row on the CTF and KotH tabs
    pub selected: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    Simulation,
    Ctf,
    Koth,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Dashboard, Tab::Simulation, Tab::Ctf, Tab::Koth];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Dashboard => "1 Dashboard",
            Tab::Simulation => "2 Simulation",
            Tab::Ctf => "3 CTF",
            Tab::Koth => "4 King of the Hill",
        }
    }

    fn index(&self) -> usize {
        Tab::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    fn next(&self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }
}

/// Input mode for command prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Command,  // Typing a command
}

fn lock(academy: &Mutex<Academy>) -> MutexGuard<'_, Academy> {
    academy.lock().unwrap_or_else(PoisonError::into_inner)
}

impl App {
    pub fn new(academy: Arc<Mutex<Academy>>, difficulty: SkillLevel) -> Self {
        Self {
            academy,
            theme: Theme::default(),
            running: true,
            show_help: false,
            tab: Tab::Dashboard,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            command_output: vec!["[SYSTEM] Welcome to Cyber Academy. Press ? for help.".to_string()],
            session: None,
            difficulty,
            selected: 0,
        }
    }

    /// Handle keyboard input. Returns `false` once the app should exit.
    pub fn handle_input(&mut self) -> std::io::Result<bool> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    return Ok(true);
                }

                if self.input_mode == InputMode::Command {
                    match key.code {
                        KeyCode::Enter => {
                            self.execute_command();
                            self.input_mode = InputMode::Normal;
                        }
                        KeyCode::Esc => {
                            self.input_buffer.clear();
                            self.input_mode = InputMode::Normal;
                        }
                        KeyCode::Backspace => {
                            self.input_buffer.pop();
                        }
                        KeyCode::Char(c) => {
                            self.input_buffer.push(c);
                        }
                        _ => {}
                    }
                    return Ok(true);
                }

                match key.code {
                    KeyCode::Char('q') => {
                        self.running = false;
                        return Ok(false);
                    }
                    KeyCode::Char('?') => {
                        self.show_help = !self.show_help;
                    }
                    KeyCode::Esc => self.show_help = false,
                    KeyCode::Tab => self.switch_tab(self.tab.next()),
                    KeyCode::Char(c @ '1'..='4') => {
                        let index = c as usize - '1' as usize;
                        self.switch_tab(Tab::ALL[index]);
                    }
                    KeyCode::Up => self.selected = self.selected.saturating_sub(1),
                    KeyCode::Down => {
                        if self.selected + 1 < self.row_count() {
                            self.selected += 1;
                        }
                    }
                    KeyCode::Char(':') | KeyCode::Char('/') => {
                        self.input_mode = InputMode::Command;
                        self.input_buffer.clear();
                    }
                    _ => {}
                }
            }
        }
        Ok(true)
    }

    fn switch_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.selected = 0;
    }

    fn row_count(&self) -> usize {
        let academy = lock(&self.academy);
        match self.tab {
            Tab::Ctf => academy.ctf().state().competitions.len(),
            Tab::Koth => academy.koth().state().instances.len(),
            _ => 0,
        }
    }

    /// Execute a typed command
    fn execute_command(&mut self) {
        let input = std::mem::take(&mut self.input_buffer);
        let output = self.process_command(&input);
        self.command_output.extend(output);

        if self.command_output.len() > MAX_OUTPUT {
            let excess = self.command_output.len() - MAX_OUTPUT;
            self.command_output.drain(..excess);
        }
    }

    /// Process a command and return output lines
    pub fn process_command(&mut self, input: &str) -> Vec<String> {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let Some(&head) = parts.first() else {
            return vec![];
        };
        let head = head.to_lowercase();

        if self.tab == Tab::Simulation && self.session.is_some() && head != "sim" {
            return self.simulation_command(input);
        }

        match head.as_str() {
            "help" => HELP_TEXT.lines().map(str::to_string).collect(),
            "sim" => self.start_simulation(&parts[1..]),
            "register" => self.register(parts.get(1).copied()),
            "flag" => self.submit_flag(&parts[1..]),
            "capture" => self.capture(&parts[1..]),
            "challenges" => self.list_challenges(&parts[1..].join(" ")),
            "board" => self.search_board(&parts[1..].join(" ")),
            "profile" => self.show_profile(),
            "badges" => self.show_badges(),
            "reset" => {
                lock(&self.academy).reset();
                self.session = None;
                vec!["[WARN] All progress wiped, competitions reseeded.".to_string()]
            }
            _ => vec![format!("[ERROR] Unknown command '{}'. Type 'help'.", head)],
        }
    }

    fn start_simulation(&mut self, args: &[&str]) -> Vec<String> {
        let Some(module_id) = args.first() else {
            let ids: Vec<&str> = catalog::all_modules().iter().map(|m| m.id).collect();
            return vec![format!("[ERROR] Usage: sim <{}> [beginner|intermediate|advanced]", ids.join("|"))];
        };
        let level = match args.get(1) {
            Some(text) => match text.parse::<SkillLevel>() {
                Ok(level) => level,
                Err(err) => return vec![format!("[ERROR] {}", err)],
            },
            None => self.difficulty,
        };

        let session = match lock(&self.academy).start_simulation(&module_id.to_lowercase(), level) {
            Ok(session) => session,
            Err(err) => return vec![format!("[ERROR] {}", err)],
        };
        let mut output = vec![format!(
            "[SYSTEM] {} simulation ({}). Type 'task' for your objective.",
            session.module().title,
            level
        )];
        if let Some(task) = session.current_task() {
            output.push(format!("[SYSTEM] Task 1: {}", task.title));
        }
        self.session = Some(session);
        self.tab = Tab::Simulation;
        output
    }

    fn simulation_command(&mut self, input: &str) -> Vec<String> {
        let Some(session) = self.session.as_mut() else {
            return vec![];
        };
        match input.trim().to_lowercase().as_str() {
            "next" | "prev" => {
                let moved = if input.trim().eq_ignore_ascii_case("next") {
                    session.next_task()
                } else {
                    session.previous_task()
                };
                if !moved {
                    return vec!["[SYSTEM] No more tasks in that direction.".to_string()];
                }
                let title = session.current_task().map_or("", |t| t.title);
                return vec![format!("[SYSTEM] Task {}: {}", session.current_index() + 1, title)];
            }
            _ => {}
        }

        let result = lock(&self.academy).run_command(session, input);
        let mut output = vec![format!("$ {}", input.trim())];
        output.extend(result.output);
        if let Some(task_id) = result.completed_task {
            output.push(format!("[SUCCESS] Task {} recorded.", task_id));
        }
        if result.exit {
            self.session = None;
            output.push("[SYSTEM] Simulation closed.".to_string());
        }
        output
    }

    /// Id of the highlighted competition or instance
    fn selected_id(&self) -> Option<String> {
        let academy = lock(&self.academy);
        match self.tab {
            Tab::Ctf => academy.ctf().competitions().nth(self.selected).map(|c| c.id.clone()),
            Tab::Koth => academy.koth().state().instances.keys().nth(self.selected).cloned(),
            _ => None,
        }
    }

    fn register(&mut self, id: Option<&str>) -> Vec<String> {
        let Some(id) = id.map(str::to_string).or_else(|| self.selected_id()) else {
            return vec!["[ERROR] Usage: register <id> (or select one on the CTF/KotH tab)".to_string()];
        };
        let mut academy = lock(&self.academy);
        let joined = if academy.ctf().competition(&id).is_some() {
            academy.register_for_competition(&id)
        } else if academy.koth().instance(&id).is_some() {
            academy.register_for_instance(&id)
        } else {
            return vec![format!("[ERROR] Nothing called '{}'.", id)];
        };
        if joined {
            vec![format!("[SUCCESS] Registered for {}.", id)]
        } else {
            vec![format!("[SYSTEM] Already registered for {}.", id)]
        }
    }

    fn submit_flag(&mut self, args: &[&str]) -> Vec<String> {
        let Some(competition_id) = self.selected_id().filter(|_| self.tab == Tab::Ctf) else {
            return vec!["[ERROR] Select a competition on the CTF tab first.".to_string()];
        };
        let Some((challenge_id, flag)) = args.split_first() else {
            return vec!["[ERROR] Usage: flag <challenge> <flag>".to_string()];
        };
        let flag = flag.join(" ");
        let mut academy = lock(&self.academy);
        let before = academy.ctf().user_points();
        if !academy.submit_flag(&competition_id, challenge_id, &flag) {
            return vec!["[ERROR] Please enter a flag for a known challenge.".to_string()];
        }
        let gained = academy.ctf().user_points() - before;
        if gained == 0 {
            return vec![format!("[SYSTEM] {} was already solved.", challenge_id)];
        }
        vec![format!(
            "[SUCCESS] Flag accepted: +{} points (rank {}).",
            gained,
            academy.ctf().user_rank()
        )]
    }

    fn capture(&mut self, args: &[&str]) -> Vec<String> {
        let mut academy = lock(&self.academy);
        let (instance_id, flag) = match args.split_first() {
            Some((first, rest)) if !rest.is_empty() && academy.koth().instance(first).is_some() => {
                (first.to_string(), rest.join(" "))
            }
            _ => {
                let selected = match self.tab {
                    Tab::Koth => academy.koth().state().instances.keys().nth(self.selected).cloned(),
                    _ => None,
                };
                match selected {
                    Some(id) => (id, args.join(" ")),
                    None => return vec!["[ERROR] Usage: capture <instance> <flag>".to_string()],
                }
            }
        };
        if academy.capture_instance(&instance_id, &flag) {
            vec![format!("[SUCCESS] {} captured. You are the king!", instance_id)]
        } else {
            vec![format!("[FAILED] Capture of {} refused: empty flag or instance not active.", instance_id)]
        }
    }

    fn list_challenges(&self, search: &str) -> Vec<String> {
        let Some(competition_id) = self.selected_id().filter(|_| self.tab == Tab::Ctf) else {
            return vec!["[ERROR] Select a competition on the CTF tab first.".to_string()];
        };
        let academy = lock(&self.academy);
        let Some(competition) = academy.ctf().competition(&competition_id) else {
            return vec![];
        };
        let query = ChallengeQuery {
            search: search.to_string(),
            ..ChallengeQuery::default()
        };
        let hits = competition.query(&query);
        if hits.is_empty() {
            return vec!["[SYSTEM] No challenges match your filters.".to_string()];
        }
        hits.iter()
            .map(|c| {
                format!(
                    "{} {:<10} {:<22} {:>4} pts  {}",
                    if c.solved { "✓" } else { " " },
                    c.id,
                    c.title,
                    c.points,
                    c.difficulty
                )
            })
            .collect()
    }

    fn search_board(&self, query: &str) -> Vec<String> {
        let Some(id) = self.selected_id() else {
            return vec!["[ERROR] Select a competition or instance first.".to_string()];
        };
        let academy = lock(&self.academy);
        let rows: Vec<String> = match self.tab {
            Tab::Ctf => search(academy.ctf().leaderboard(&id), query)
                .into_iter()
                .map(|p| format!("#{:<3} {:<14} {:>5} pts  {} solved", p.rank, p.username, p.points, p.solved_count))
                .collect(),
            _ => search(academy.koth().leaderboard(&id), query)
                .into_iter()
                .map(|e| {
                    format!(
                        "#{:<3} {:<14} {:>12}  {} captures",
                        e.rank,
                        e.username,
                        format_duration(e.total_uptime_seconds),
                        e.captures
                    )
                })
                .collect(),
        };
        if rows.is_empty() {
            return vec!["[SYSTEM] No users found.".to_string()];
        }
        rows
    }

    fn show_profile(&self) -> Vec<String> {
        let profile = lock(&self.academy).profile();
        vec![
            format!("[STATUS] Learning progress: {}%", profile.learning_progress),
            format!(
                "[STATUS] Modules completed: {}/{}",
                profile.completed_modules, profile.total_modules
            ),
            format!("[STATUS] Badges earned: {}/{}", profile.earned_badges, profile.total_badges),
            format!("[STATUS] CTF: {} points, rank {}", profile.ctf_points, profile.ctf_rank),
            format!(
                "[STATUS] KotH: {} uptime, {} captures, rank {}",
                format_duration(profile.koth_uptime_seconds),
                profile.koth_captures,
                profile.koth_rank
            ),
        ]
    }

    fn show_badges(&self) -> Vec<String> {
        let academy = lock(&self.academy);
        academy
            .badges()
            .iter()
            .map(|b| match b.earned_date {
                Some(date) if b.earned => format!("[OK] {} - earned {}", b.title, date),
                _ => format!("[--] {} - {}", b.title, b.description),
            })
            .collect()
    }

    // Rendering

    pub fn render(&mut self, frame: &mut Frame) {
        let layout = create_main_layout(frame.area());
        self.render_header(frame, layout[0]);

        let content = create_content_layout(layout[1]);
        match self.tab {
            Tab::Dashboard => self.render_dashboard(frame, content[0]),
            Tab::Simulation => self.render_simulation(frame, content[0]),
            Tab::Ctf => self.render_ctf(frame, content[0]),
            Tab::Koth => self.render_koth(frame, content[0]),
        }
        self.render_terminal(frame, content[1]);
        self.render_status_bar(frame, layout[2]);

        if self.show_help {
            self.render_help_overlay(frame);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let header_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(17),
                Constraint::Min(20),
                Constraint::Length(22),
            ])
            .split(area);

        let logo = Paragraph::new(SMALL_LOGO)
            .style(Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(self.theme.border)));
        frame.render_widget(logo, header_layout[0]);

        let tabs = Tabs::new(Tab::ALL.iter().map(|t| t.title()))
            .select(self.tab.index())
            .style(Style::default().fg(self.theme.fg))
            .highlight_style(Style::default().fg(self.theme.warning).add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(self.theme.border)));
        frame.render_widget(tabs, header_layout[1]);

        let now = lock(&self.academy).clock().now();
        let time = Paragraph::new(format!(" {} UTC ", now.format("%Y-%m-%d %H:%M:%S")))
            .alignment(Alignment::Right)
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(self.theme.border)));
        frame.render_widget(time, header_layout[2]);
    }

    fn render_dashboard(&self, frame: &mut Frame, area: Rect) {
        let academy = lock(&self.academy);
        let cyber = academy.progress().state();
        let modules = catalog::all_modules();

        let mut constraints = vec![Constraint::Length(2)];
        constraints.extend(modules.iter().map(|_| Constraint::Length(2)));
        constraints.push(Constraint::Length(2));
        constraints.push(Constraint::Min(3));
        let block = styled_block("Dashboard", &self.theme);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        frame.render_widget(
            ProgressBar::new("Learning progress", cyber.learning_progress).color(self.theme.header),
            rows[0],
        );
        for (i, module) in modules.iter().enumerate() {
            let percent = cyber.modules.get(module.id).map_or(0, |m| m.progress_percent);
            frame.render_widget(ProgressBar::new(module.title, percent), rows[i + 1]);
        }

        let next = match cyber.next_module().and_then(catalog::module) {
            Some(module) => format!("Next up: {} (sim {})", module.title, module.id),
            None => "Every module complete!".to_string(),
        };
        frame.render_widget(
            Paragraph::new(next).style(Style::default().fg(self.theme.success)),
            rows[modules.len() + 1],
        );
        frame.render_widget(BadgeShelf::new(&cyber.badges), rows[modules.len() + 2]);
    }

    fn render_simulation(&self, frame: &mut Frame, area: Rect) {
        let Some(session) = &self.session else {
            let text = vec![
                Line::from("No simulation running."),
                Line::from(""),
                Line::from(Span::styled(
                    "Type :sim phishing|network|crypto [level]",
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            frame.render_widget(Paragraph::new(text).block(styled_block("Simulation", &self.theme)), area);
            return;
        };

        let block = styled_block(&format!("{} - {}", session.module().title, session.level()), &self.theme);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(3)])
            .split(inner);

        frame.render_widget(ProgressBar::new("Tasks", session.progress_percent()), rows[0]);

        let mut lines: Vec<Line> = session
            .module()
            .tasks
            .iter()
            .enumerate()
            .map(|(i, task)| {
                let mark = if session.is_completed(task.id) { "✓" } else { " " };
                let style = if i == session.current_index() {
                    Style::default().fg(self.theme.fg).add_modifier(Modifier::BOLD)
                } else if session.is_completed(task.id) {
                    Style::default().fg(self.theme.success)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                Line::from(Span::styled(format!("[{}] {}. {}", mark, i + 1, task.title), style))
            })
            .collect();

        if let Some(task) = session.current_task() {
            let variant = task.variant(session.level());
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(task.description, Style::default().fg(self.theme.warning))));
            lines.push(Line::from(variant.instructions));
            if session.level() != SkillLevel::Advanced && !variant.hints.is_empty() {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled("Hints:", Style::default().fg(self.theme.accent))));
                lines.extend(variant.hints.iter().map(|h| Line::from(format!("  • {}", h))));
            }
        }
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), rows[1]);
    }

    fn render_ctf(&self, frame: &mut Frame, area: Rect) {
        let academy = lock(&self.academy);
        let ctf = academy.ctf();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(6), Constraint::Length(8)])
            .split(area);

        let items: Vec<ListItem> = ctf
            .competitions()
            .map(|c| {
                let status = if c.active { "LIVE" } else { "ENDED" };
                let joined = if c.user_registered { " ✓" } else { "" };
                ListItem::new(format!("{:<5} {} ({} players){}", status, c.title, c.participant_count, joined))
            })
            .collect();
        let mut state = ListState::default().with_selected(Some(self.selected));
        let list = List::new(items)
            .block(styled_block("Competitions", &self.theme))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(list, chunks[0], &mut state);

        let Some(competition) = ctf.competitions().nth(self.selected) else {
            return;
        };
        let lines: Vec<Line> = competition
            .challenges
            .iter()
            .map(|c| {
                Line::from(vec![
                    Span::raw(if c.solved { "✓ " } else { "  " }),
                    Span::styled(format!("{:<10}", c.id), Style::default().fg(Color::DarkGray)),
                    Span::raw(format!("{:<22}", c.title)),
                    Span::styled(format!("{:>4} ", c.points), Style::default().fg(self.theme.warning)),
                    Span::styled(c.difficulty.label(), Style::default().fg(difficulty_color(c.difficulty))),
                ])
            })
            .collect();
        let title = format!(
            "{} | {} to {}",
            competition.title,
            competition.start_date.format("%b %d"),
            competition.end_date.format("%b %d, %Y")
        );
        frame.render_widget(Paragraph::new(lines).block(styled_block(&title, &self.theme)), chunks[1]);

        let board: Vec<Line> = ctf
            .leaderboard(&competition.id)
            .iter()
            .take(chunks[2].height.saturating_sub(2) as usize)
            .map(|p| {
                let style = if p.id == CURRENT_USER_ID {
                    Style::default().fg(self.theme.success).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Line::from(Span::styled(
                    format!("#{:<3} {:<14} {:>5} pts  {} solved", p.rank, p.username, p.points, p.solved_count),
                    style,
                ))
            })
            .collect();
        frame.render_widget(Paragraph::new(board).block(styled_block("Leaderboard", &self.theme)), chunks[2]);
    }

    fn render_koth(&self, frame: &mut Frame, area: Rect) {
        let academy = lock(&self.academy);
        let koth = academy.koth();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Min(8), Constraint::Length(7)])
            .split(area);

        let items: Vec<ListItem> = koth
            .state()
            .instances
            .values()
            .map(|i| {
                let king = i.current_king.as_ref().map_or("vacant", |k| k.username.as_str());
                let status = if i.active { "LIVE" } else if i.has_ended(academy.clock().now()) { "ENDED" } else { "SOON" };
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{:<5} ", status)),
                    Span::styled(format!("{:<28}", i.name), Style::default().fg(difficulty_color(i.difficulty))),
                    Span::raw(format!(" ♛ {}", king)),
                ]))
            })
            .collect();
        let mut state = ListState::default().with_selected(Some(self.selected));
        let list = List::new(items)
            .block(styled_block("Instances", &self.theme))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(list, chunks[0], &mut state);

        let Some(instance) = koth.state().instances.values().nth(self.selected) else {
            return;
        };
        let creds = &instance.access_credentials;
        let mut lines = vec![
            Line::from(format!(
                "{} to {}",
                instance.start_time.format("%Y-%m-%d %H:%M"),
                instance.end_time.format("%Y-%m-%d %H:%M")
            )),
            Line::from(format!(
                "Players {}/{}{}",
                instance.participant_count,
                instance.max_participants,
                if instance.user_registered { " (registered)" } else { "" }
            )),
            Line::from(Span::styled(
                format!("ssh {}@{} -p {}  password: {}", creds.username, creds.host, creds.port, creds.password),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
        ];
        lines.extend(instance.events.iter().take(8).map(|e| {
            Line::from(vec![
                Span::styled(
                    format!("{} {} ", e.event_type.symbol(), e.timestamp.format("%H:%M")),
                    Style::default().fg(event_color(e.event_type)),
                ),
                Span::raw(e.message.clone()),
            ])
        }));
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .block(styled_block(&instance.name, &self.theme)),
            chunks[1],
        );

        let board: Vec<Line> = koth
            .leaderboard(&instance.id)
            .iter()
            .take(chunks[2].height.saturating_sub(2) as usize)
            .map(|e| {
                let style = if e.id == CURRENT_USER_ID {
                    Style::default().fg(self.theme.success).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Line::from(Span::styled(
                    format!(
                        "#{:<3} {:<14} {:>12}  {} captures",
                        e.rank,
                        e.username,
                        format_duration(e.total_uptime_seconds),
                        e.captures
                    ),
                    style,
                ))
            })
            .collect();
        frame.render_widget(Paragraph::new(board).block(styled_block("Uptime", &self.theme)), chunks[2]);
    }

    fn render_terminal(&self, frame: &mut Frame, area: Rect) {
        let chunks = create_terminal_layout(area);

        let visible_lines = chunks[0].height.saturating_sub(2) as usize;
        let start = self.command_output.len().saturating_sub(visible_lines);
        let output_lines: Vec<Line> = self.command_output[start..]
            .iter()
            .map(|line| {
                let (color, bold) = if line.starts_with("[ERROR]") || line.starts_with("[FAILED]") {
                    (self.theme.alert, true)
                } else if line.starts_with("[WARN]") {
                    (self.theme.warning, true)
                } else if line.starts_with("[SUCCESS]") || line.starts_with("✅") || line.starts_with("[OK]") {
                    (self.theme.success, true)
                } else if line.starts_with("[SYSTEM]") || line.starts_with("[STATUS]") {
                    (self.theme.accent, false)
                } else if line.starts_with("$ ") {
                    (self.theme.fg, true)
                } else if line.starts_with("[--]") {
                    (Color::DarkGray, false)
                } else {
                    (self.theme.fg, false)
                };
                let style = if bold {
                    Style::default().fg(color).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(color)
                };
                Line::from(Span::styled(line.as_str(), style))
            })
            .collect();

        let terminal = Paragraph::new(output_lines)
            .block(styled_block("Terminal", &self.theme))
            .wrap(Wrap { trim: false });
        frame.render_widget(terminal, chunks[0]);

        let typing = self.input_mode == InputMode::Command;
        let prompt = if typing {
            format!("student@academy:~$ {}_", self.input_buffer)
        } else {
            "student@academy:~$ [Press : or / to type command]".to_string()
        };
        let input = Paragraph::new(prompt)
            .style(Style::default().fg(if typing { Color::Green } else { Color::DarkGray }))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(if typing { Color::Green } else { self.theme.border }))
                    .title(" Command "),
            );
        frame.render_widget(input, chunks[1]);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let profile = lock(&self.academy).profile();
        let status_text = format!(
            " Progress {}% | Badges {}/{} | CTF {} pts #{} | KotH {} #{} | ? help  q quit ",
            profile.learning_progress,
            profile.earned_badges,
            profile.total_badges,
            profile.ctf_points,
            profile.ctf_rank,
            format_duration(profile.koth_uptime_seconds),
            profile.koth_rank,
        );
        let status = Paragraph::new(status_text).style(Style::default().fg(self.theme.fg).bg(Color::DarkGray));
        frame.render_widget(status, area);
    }

    fn render_help_overlay(&self, frame: &mut Frame) {
        let area = frame.area();
        let popup_width = 70.min(area.width.saturating_sub(4));
        let popup_height = 26.min(area.height.saturating_sub(4));
        let popup_area = Rect::new(
            (area.width - popup_width) / 2,
            (area.height - popup_height) / 2,
            popup_width,
            popup_height,
        );

        frame.render_widget(Clear, popup_area);

        let help = Paragraph::new(HELP_TEXT)
            .style(Style::default().fg(self.theme.fg).bg(self.theme.bg))
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(self.theme.accent)));
        frame.render_widget(help, popup_area);
    }
}
