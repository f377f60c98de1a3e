//! Custom widgets for the academy UI

use crate::data::BadgeRegistry;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

/// A labelled percentage bar for module and learning progress
pub struct ProgressBar {
    value: u8,
    label: String,
    color: Color,
    done_color: Color,
}

impl ProgressBar {
    pub fn new(label: &str, value: u8) -> Self {
        Self {
            value: value.min(100),
            label: label.to_string(),
            color: Color::Cyan,
            done_color: Color::Green,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Widget for ProgressBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height < 1 {
            return;
        }

        let color = if self.value >= 100 { self.done_color } else { self.color };

        let label = format!("{}: {}%", self.label, self.value);
        buf.set_string(area.x, area.y, &label, Style::default().fg(color));

        if area.height > 1 {
            let inner = area.width - 2;
            let filled = (u16::from(self.value) * inner) / 100;
            let bar_y = area.y + 1;
            buf.set_string(area.x, bar_y, "[", Style::default());
            buf.set_string(area.x + area.width - 1, bar_y, "]", Style::default());

            for x in 0..filled {
                buf.set_string(area.x + 1 + x, bar_y, "█", Style::default().fg(color));
            }
            for x in filled..inner {
                buf.set_string(area.x + 1 + x, bar_y, "░", Style::default().fg(Color::DarkGray));
            }
        }
    }
}

/// One line per badge: icon and title, dimmed until earned
pub struct BadgeShelf<'a> {
    registry: &'a BadgeRegistry,
}

impl<'a> BadgeShelf<'a> {
    pub fn new(registry: &'a BadgeRegistry) -> Self {
        Self { registry }
    }
}

impl Widget for BadgeShelf<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (row, badge) in self.registry.iter().enumerate() {
            let y = area.y + row as u16;
            if y >= area.y + area.height {
                break;
            }
            let icon = badge.kind().map_or("?", |k| k.icon());
            let (text, style) = match badge.earned_date {
                Some(date) if badge.earned => (
                    format!("{} {} ({})", icon, badge.title, date.format("%Y-%m-%d")),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
                _ => (format!("{} {}", icon, badge.title), Style::default().fg(Color::DarkGray)),
            };
            buf.set_stringn(area.x, y, &text, area.width as usize, style);
        }
    }
}
