use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::Theme;

/// Small vertical option picker shared by the level and quiz-kind
/// selection screens.
pub struct Picker<'a> {
    title: &'a str,
    options: &'a [String],
    selected: usize,
    theme: &'a Theme,
}

impl<'a> Picker<'a> {
    pub fn new(title: &'a str, options: &'a [String], selected: usize, theme: &'a Theme) -> Self {
        Self {
            title,
            options,
            selected,
            theme,
        }
    }
}

impl Widget for Picker<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.options
                    .iter()
                    .map(|_| Constraint::Length(1))
                    .collect::<Vec<_>>(),
            )
            .split(layout[1]);

        for (i, option) in self.options.iter().enumerate() {
            let is_selected = i == self.selected;
            let indicator = if is_selected { ">" } else { " " };
            let text = format!(" {indicator} {option}");

            let style = if is_selected {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };

            if i < rows.len() {
                Paragraph::new(Line::from(Span::styled(text, style))).render(rows[i], buf);
            }
        }
    }
}
