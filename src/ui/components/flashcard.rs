use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::content::models::KanaItem;
use crate::session::flashcard::FlashcardSession;
use crate::ui::theme::Theme;

pub struct CardView<'a> {
    session: &'a FlashcardSession<KanaItem>,
    script_label: &'a str,
    theme: &'a Theme,
}

impl<'a> CardView<'a> {
    pub fn new(
        session: &'a FlashcardSession<KanaItem>,
        script_label: &'a str,
        theme: &'a Theme,
    ) -> Self {
        Self {
            session,
            script_label,
            theme,
        }
    }
}

impl Widget for CardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let group_label = match self.session.selected_group() {
            Some(group) => format!(" {} | row: {} ", self.script_label, group),
            None => format!(" {} | all rows ", self.script_label),
        };
        let block = Block::bordered()
            .title(group_label)
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.session.is_loading() {
            Paragraph::new(Line::from(Span::styled(
                "Loading...",
                Style::default().fg(colors.muted()),
            )))
            .alignment(Alignment::Center)
            .render(inner, buf);
            return;
        }

        let filtered = self.session.filtered_items();
        if filtered.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "No cards in this group",
                Style::default().fg(colors.muted()),
            )))
            .alignment(Alignment::Center)
            .render(inner, buf);
            return;
        }

        let Some(card) = self.session.current() else {
            return;
        };

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(2),
                Constraint::Length(1),
            ])
            .split(inner);

        let face_lines: Vec<Line> = if self.session.is_flipped() {
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    card.romaji.clone(),
                    Style::default()
                        .fg(colors.success())
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    card.kind.clone(),
                    Style::default().fg(colors.muted()),
                )),
            ]
        } else {
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    card.glyph.clone(),
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD),
                )),
            ]
        };
        Paragraph::new(face_lines)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let counter = format!("{}/{}", self.session.current_index() + 1, filtered.len());
        Paragraph::new(Line::from(Span::styled(
            counter,
            Style::default().fg(colors.muted()),
        )))
        .alignment(Alignment::Center)
        .render(layout[1], buf);

        let face_hint = if self.session.is_flipped() {
            "showing answer"
        } else {
            "space to flip"
        };
        Paragraph::new(Line::from(Span::styled(
            face_hint,
            Style::default().fg(colors.accent_dim()),
        )))
        .alignment(Alignment::Center)
        .render(layout[2], buf);
    }
}
