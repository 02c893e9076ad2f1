use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::quiz::{GradeBand, GradeThresholds, QuizSession, grade};
use crate::ui::theme::Theme;

pub struct ResultsCard<'a> {
    session: &'a QuizSession,
    thresholds: &'a GradeThresholds,
    theme: &'a Theme,
}

impl<'a> ResultsCard<'a> {
    pub fn new(
        session: &'a QuizSession,
        thresholds: &'a GradeThresholds,
        theme: &'a Theme,
    ) -> Self {
        Self {
            session,
            thresholds,
            theme,
        }
    }

    fn band_display(&self, band: GradeBand) -> (&'static str, Color) {
        let colors = &self.theme.colors;
        match band {
            GradeBand::Top => ("Perfect!", colors.warning()),
            GradeBand::High => ("Great!", colors.success()),
            GradeBand::Mid => ("Good!", colors.accent()),
            GradeBand::Low => ("Keep practicing", colors.error()),
        }
    }
}

impl Widget for ResultsCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let session = self.session;

        let block = Block::bordered()
            .title(" Quiz Complete ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let total = session.total();
        let percent = if total == 0 {
            0
        } else {
            session.score() * 100 / total
        };
        let band = grade(session.score(), total, self.thresholds);
        let (label, color) = self.band_display(band);

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                label,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("{} / {}", session.score(), total),
                Style::default().fg(colors.fg()),
            )),
            Line::from(Span::styled(
                format!("{percent}%"),
                Style::default().fg(color),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "[r] Retry  [q] Menu",
                Style::default().fg(colors.muted()),
            )),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
