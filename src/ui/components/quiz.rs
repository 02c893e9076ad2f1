use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::session::quiz::{Outcome, QuizSession};
use crate::ui::theme::Theme;

pub struct QuizView<'a> {
    session: &'a QuizSession,
    theme: &'a Theme,
}

impl<'a> QuizView<'a> {
    pub fn new(session: &'a QuizSession, theme: &'a Theme) -> Self {
        Self { session, theme }
    }

    fn render_progress(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let filled = fill_width(self.session.progress(), area.width);
        for x in area.x..area.x + area.width {
            let style = if x < area.x + filled {
                Style::default().bg(colors.accent())
            } else {
                Style::default().bg(colors.accent_dim())
            };
            buf[(x, area.y)].set_style(style);
        }
    }
}

fn fill_width(ratio: f64, width: u16) -> u16 {
    (ratio.clamp(0.0, 1.0) * width as f64) as u16
}

impl Widget for QuizView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let session = self.session;

        let title = format!(
            " Question {}/{} | Score {} ",
            (session.current_index() + 1).min(session.total()),
            session.total(),
            session.score()
        );
        let block = Block::bordered()
            .title(title)
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if session.total() == 0 {
            Paragraph::new(Line::from(Span::styled(
                "No questions available for this selection",
                Style::default().fg(colors.muted()),
            )))
            .alignment(Alignment::Center)
            .render(inner, buf);
            return;
        }

        let Some(question) = session.current() else {
            return;
        };

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(inner);

        self.render_progress(layout[0], buf);

        let mut prompt_lines: Vec<Line> = Vec::new();
        if let Some(japanese) = &question.japanese {
            prompt_lines.push(Line::from(Span::styled(
                japanese.clone(),
                Style::default().fg(colors.warning()),
            )));
            prompt_lines.push(Line::from(""));
        }
        prompt_lines.push(Line::from(Span::styled(
            question.prompt.clone(),
            Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
        )));
        if !question.input_kind.is_empty() {
            prompt_lines.push(Line::from(Span::styled(
                format!("(answer in {})", question.input_kind),
                Style::default().fg(colors.muted()),
            )));
        }
        Paragraph::new(prompt_lines)
            .wrap(Wrap { trim: false })
            .render(layout[1], buf);

        let input_block = Block::bordered()
            .border_style(Style::default().fg(if session.show_answer() {
                colors.border()
            } else {
                colors.accent()
            }));
        let input_inner = input_block.inner(layout[2]);
        input_block.render(layout[2], buf);
        let cursor = if session.show_answer() { "" } else { "_" };
        Paragraph::new(Line::from(Span::styled(
            format!("{}{}", session.user_answer(), cursor),
            Style::default().fg(colors.fg()),
        )))
        .render(input_inner, buf);

        let feedback = match session.outcome() {
            Outcome::Pending => Line::from(Span::styled(
                "Enter to submit",
                Style::default().fg(colors.muted()),
            )),
            Outcome::Correct => Line::from(Span::styled(
                "Correct!",
                Style::default()
                    .fg(colors.success())
                    .add_modifier(Modifier::BOLD),
            )),
            Outcome::Wrong => {
                let expected = question
                    .correct_answers
                    .first()
                    .map(String::as_str)
                    .unwrap_or("");
                Line::from(vec![
                    Span::styled(
                        "Wrong. ",
                        Style::default()
                            .fg(colors.error())
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("Answer: {expected}"),
                        Style::default().fg(colors.fg()),
                    ),
                ])
            }
        };
        Paragraph::new(feedback).render(layout[3], buf);
    }
}
