use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::content::models::{GrammarItem, KanjiItem, VocabItem};
use crate::session::catalog::{CatalogFilter, Searchable};
use crate::ui::theme::Theme;

/// How a content type shows up in the browse list and its detail pane.
/// A display concern, so it lives with the widget rather than the models.
pub trait CatalogRow {
    fn row_text(&self) -> String;
    fn detail_lines(&self) -> Vec<String>;
}

impl CatalogRow for KanjiItem {
    fn row_text(&self) -> String {
        let meaning = self
            .vocabulary
            .first()
            .map(|v| v.meaning.as_str())
            .unwrap_or("");
        format!(
            "{}  on: {}  kun: {}  {}",
            self.kanji, self.onyomi.hiragana, self.kunyomi.hiragana, meaning
        )
    }

    fn detail_lines(&self) -> Vec<String> {
        let mut lines = vec![
            self.kanji.clone(),
            format!("Onyomi:  {} ({})", self.onyomi.hiragana, self.onyomi.romaji),
            format!("Kunyomi: {} ({})", self.kunyomi.hiragana, self.kunyomi.romaji),
            String::new(),
        ];
        for vocab in &self.vocabulary {
            lines.push(format!("{} [{}] {}", vocab.word, vocab.reading, vocab.meaning));
        }
        if !self.example.japanese.is_empty() {
            lines.push(String::new());
            lines.push(self.example.japanese.clone());
            lines.push(self.example.english.clone());
        }
        if !self.story.is_empty() {
            lines.push(String::new());
            lines.push(format!("Story: {}", self.story));
        }
        lines
    }
}

impl CatalogRow for GrammarItem {
    fn row_text(&self) -> String {
        format!("{}  {}", self.title, self.formula)
    }

    fn detail_lines(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            format!("Form: {}", self.formula),
            String::new(),
            self.explanation.clone(),
            String::new(),
            format!("e.g. {}", self.example),
        ]
    }
}

impl CatalogRow for VocabItem {
    fn row_text(&self) -> String {
        format!("{} [{}]  {}", self.word, self.kana, self.meaning)
    }

    fn detail_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("{} [{}]", self.word, self.kana),
            self.meaning.clone(),
            format!("Category: {}", self.category),
        ];
        for example in &self.examples {
            lines.push(String::new());
            lines.push(example.japanese.clone());
            lines.push(format!("{} - {}", example.romaji, example.meaning));
        }
        lines
    }
}

pub struct CatalogView<'a, T> {
    filter: &'a CatalogFilter<T>,
    title: &'a str,
    selected: usize,
    show_detail: bool,
    search_active: bool,
    theme: &'a Theme,
}

impl<'a, T: Searchable + CatalogRow> CatalogView<'a, T> {
    pub fn new(
        filter: &'a CatalogFilter<T>,
        title: &'a str,
        selected: usize,
        show_detail: bool,
        search_active: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            filter,
            title,
            selected,
            show_detail,
            search_active,
            theme,
        }
    }

    fn render_search_bar(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let cursor = if self.search_active { "_" } else { "" };
        let style = if self.search_active {
            Style::default().fg(colors.accent())
        } else {
            Style::default().fg(colors.muted())
        };
        Paragraph::new(Line::from(Span::styled(
            format!(" /{}{}", self.filter.query(), cursor),
            style,
        )))
        .render(area, buf);
    }
}

impl<T: Searchable + CatalogRow> Widget for CatalogView<'_, T> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.filter.is_loading() {
            Paragraph::new(Span::styled("Loading...", Style::default().fg(colors.muted())))
                .render(inner, buf);
            return;
        }

        let filtered = self.filter.filtered();
        let selected = self.selected.min(filtered.len().saturating_sub(1));

        if self.show_detail {
            if let Some(item) = filtered.get(selected) {
                let lines: Vec<Line> = item
                    .detail_lines()
                    .into_iter()
                    .map(|l| Line::from(Span::styled(l, Style::default().fg(colors.fg()))))
                    .collect();
                Paragraph::new(lines)
                    .wrap(Wrap { trim: false })
                    .render(inner, buf);
            }
            return;
        }

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        self.render_search_bar(layout[0], buf);

        let count_text = if filtered.is_empty() {
            " nothing found".to_string()
        } else {
            format!(" {} entries", filtered.len())
        };
        Paragraph::new(Line::from(Span::styled(
            count_text,
            Style::default().fg(colors.muted()),
        )))
        .render(layout[1], buf);

        let list_area = layout[2];
        let visible = list_area.height as usize;
        if visible == 0 || filtered.is_empty() {
            return;
        }

        // Keep the selection inside the visible window.
        let offset = selected.saturating_sub(visible.saturating_sub(1));
        for (row, (idx, item)) in filtered
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .enumerate()
        {
            let is_selected = idx == selected;
            let style = if is_selected {
                Style::default()
                    .fg(colors.highlight_fg())
                    .bg(colors.highlight_bg())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            let rect = Rect::new(
                list_area.x,
                list_area.y + row as u16,
                list_area.width,
                1,
            );
            Paragraph::new(Line::from(Span::styled(
                format!(" {}", item.row_text()),
                style,
            )))
            .render(rect, buf);
        }
    }
}
