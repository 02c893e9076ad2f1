mod app;
mod config;
mod content;
mod event;
mod session;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use app::{App, AppScreen, CatalogKind, LevelTarget};
use config::Config;
use content::models::{JlptLevel, KanaScript, QuizKind};
use event::{AppEvent, EventHandler};
use session::quiz::Outcome;
use ui::components::catalog::CatalogView;
use ui::components::flashcard::CardView;
use ui::components::picker::Picker;
use ui::components::quiz::QuizView;
use ui::components::results::ResultsCard;
use ui::layout::AppLayout;

#[derive(Parser)]
#[command(name = "kotoba", version, about = "Terminal Japanese flashcard and quiz app")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "JLPT level (n5..n1)")]
    level: Option<String>,

    #[arg(short, long, help = "Questions per quiz")]
    questions: Option<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_default();
    if let Some(level) = cli.level {
        // Fail fast on a bad level rather than coercing it.
        let level: JlptLevel = level.parse()?;
        config.level = level.file_key().to_string();
    }
    if let Some(questions) = cli.questions {
        config.quiz_questions = questions;
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    config.normalize();

    let events = EventHandler::new(Duration::from_millis(100));
    let mut app = App::new(config, events.sender());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Loaded {
                generation,
                payload,
            } => app.apply_loaded(generation, payload),
            AppEvent::Tick => {}
            AppEvent::Resize(_, _) => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Menu => handle_menu_key(app, key),
        AppScreen::QuizKindSelect => handle_quiz_kind_key(app, key),
        AppScreen::LevelSelect => handle_level_key(app, key),
        AppScreen::Flashcards => handle_flashcards_key(app, key),
        AppScreen::Catalog => handle_catalog_key(app, key),
        AppScreen::Quiz => handle_quiz_key(app, key),
        AppScreen::QuizResult => handle_result_key(app, key),
        AppScreen::Settings => handle_settings_key(app, key),
    }
}

fn activate_menu_entry(app: &mut App, index: usize) {
    match index {
        0 => app.open_flashcards(KanaScript::Hiragana),
        1 => app.open_flashcards(KanaScript::Katakana),
        2 => app.open_level_select(LevelTarget::Catalog(CatalogKind::Kanji)),
        3 => app.open_level_select(LevelTarget::Catalog(CatalogKind::Grammar)),
        4 => app.open_level_select(LevelTarget::Catalog(CatalogKind::Vocab)),
        5 => app.open_quiz_kind_select(),
        6 => app.go_to_settings(),
        _ => {}
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('1') => activate_menu_entry(app, 0),
        KeyCode::Char('2') => activate_menu_entry(app, 1),
        KeyCode::Char('3') => activate_menu_entry(app, 2),
        KeyCode::Char('4') => activate_menu_entry(app, 3),
        KeyCode::Char('5') => activate_menu_entry(app, 4),
        KeyCode::Char('6') => activate_menu_entry(app, 5),
        KeyCode::Char('c') => app.go_to_settings(),
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Enter => activate_menu_entry(app, app.menu.selected),
        _ => {}
    }
}

const QUIZ_KIND_OPTIONS: [(&str, Option<QuizKind>); 4] = [
    ("Mixed (sentence + particle)", None),
    ("JLPT vocabulary", Some(QuizKind::Jlpt)),
    ("Sentence", Some(QuizKind::Sentence)),
    ("Particle", Some(QuizKind::Particle)),
];

fn handle_quiz_kind_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_menu(),
        KeyCode::Up | KeyCode::Char('k') => {
            app.picker_selected = app.picker_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.picker_selected = (app.picker_selected + 1).min(QUIZ_KIND_OPTIONS.len() - 1);
        }
        KeyCode::Enter => {
            let kind = QUIZ_KIND_OPTIONS[app.picker_selected].1;
            app.open_level_select(LevelTarget::Quiz(kind));
        }
        _ => {}
    }
}

fn handle_level_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_menu(),
        KeyCode::Up | KeyCode::Char('k') => {
            app.picker_selected = app.picker_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.picker_selected = (app.picker_selected + 1).min(JlptLevel::ALL.len() - 1);
        }
        KeyCode::Enter => app.choose_level(JlptLevel::ALL[app.picker_selected]),
        _ => {}
    }
}

fn handle_flashcards_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_menu(),
        KeyCode::Char(' ') | KeyCode::Enter => app.kana.flip(),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('n') => app.kana.next(),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('p') => app.kana.previous(),
        KeyCode::Char('g') => app.cycle_group(),
        _ => {}
    }
}

fn handle_catalog_key(app: &mut App, key: KeyEvent) {
    if app.search_active {
        match key.code {
            KeyCode::Esc => {
                app.search_active = false;
                app.catalog_clear_query();
            }
            KeyCode::Enter => app.search_active = false,
            KeyCode::Backspace => app.catalog_pop_query(),
            KeyCode::Char(ch) => app.catalog_push_query(ch),
            _ => {}
        }
        return;
    }

    if app.catalog_detail {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => app.catalog_detail = false,
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_menu(),
        KeyCode::Char('/') => app.search_active = true,
        KeyCode::Down | KeyCode::Char('j') => app.catalog_down(),
        KeyCode::Up | KeyCode::Char('k') => app.catalog_up(),
        KeyCode::Enter => app.catalog_detail = true,
        _ => {}
    }
}

fn handle_quiz_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.go_to_menu(),
        KeyCode::Enter => app.quiz_enter(),
        KeyCode::Backspace => app.quiz_backspace(),
        KeyCode::Char(ch) => app.quiz_push_char(ch),
        _ => {}
    }
}

fn handle_result_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') => app.retry_quiz(),
        KeyCode::Char('q') | KeyCode::Esc => app.go_to_menu(),
        _ => {}
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            let _ = app.config.save();
            app.go_to_menu();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.settings_selected = app.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.settings_selected = (app.settings_selected + 1).min(2);
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => app.settings_cycle_forward(),
        KeyCode::Left | KeyCode::Char('h') => app.settings_cycle_backward(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Menu => render_menu(frame, app),
        AppScreen::QuizKindSelect => render_quiz_kind_select(frame, app),
        AppScreen::LevelSelect => render_level_select(frame, app),
        AppScreen::Flashcards => render_flashcards(frame, app),
        AppScreen::Catalog => render_catalog(frame, app),
        AppScreen::Quiz => render_quiz(frame, app),
        AppScreen::QuizResult => render_result(frame, app),
        AppScreen::Settings => render_settings(frame, app),
    }
}

fn render_menu(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " kotoba ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" Level {}", app.level.label()),
            Style::default().fg(colors.muted()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout[0]);

    let menu_area = ui::layout::centered_rect(50, 90, layout[1]);
    frame.render_widget(&app.menu, menu_area);

    let footer = Paragraph::new(Line::from(Span::styled(
        " [1-6] Open  [c] Settings  [q] Quit ",
        Style::default().fg(colors.muted()),
    )));
    frame.render_widget(footer, layout[2]);
}

fn render_quiz_kind_select(frame: &mut ratatui::Frame, app: &App) {
    let area = ui::layout::centered_rect(40, 50, frame.area());
    let options: Vec<String> = QUIZ_KIND_OPTIONS
        .iter()
        .map(|(label, _)| label.to_string())
        .collect();
    let picker = Picker::new("Quiz Type", &options, app.picker_selected, app.theme);
    frame.render_widget(picker, area);
}

fn render_level_select(frame: &mut ratatui::Frame, app: &App) {
    let area = ui::layout::centered_rect(40, 50, frame.area());
    let options: Vec<String> = JlptLevel::ALL
        .iter()
        .map(|l| l.label().to_string())
        .collect();
    let picker = Picker::new("JLPT Level", &options, app.picker_selected, app.theme);
    frame.render_widget(picker, area);
}

fn render_flashcards(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let layout = AppLayout::new(area);

    render_header(frame, app, layout.header, app.script.label());

    let card_area = ui::layout::centered_rect(60, 70, layout.main);
    let card = CardView::new(&app.kana, app.script.label(), app.theme);
    frame.render_widget(card, card_area);

    let footer = Paragraph::new(Line::from(Span::styled(
        " [space] Flip  [\u{2190}/\u{2192}] Navigate  [g] Row filter  [ESC] Back ",
        Style::default().fg(colors.muted()),
    )));
    frame.render_widget(footer, layout.footer);
}

fn render_catalog(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let layout = AppLayout::new(area);

    let title = format!("{} {}", app.catalog_kind.title(), app.level.label());
    render_header(frame, app, layout.header, &title);

    match app.catalog_kind {
        CatalogKind::Kanji => {
            let view = CatalogView::new(
                &app.kanji,
                &title,
                app.catalog_selected,
                app.catalog_detail,
                app.search_active,
                app.theme,
            );
            frame.render_widget(view, layout.main);
        }
        CatalogKind::Grammar => {
            let view = CatalogView::new(
                &app.grammar,
                &title,
                app.catalog_selected,
                app.catalog_detail,
                app.search_active,
                app.theme,
            );
            frame.render_widget(view, layout.main);
        }
        CatalogKind::Vocab => {
            let view = CatalogView::new(
                &app.vocab,
                &title,
                app.catalog_selected,
                app.catalog_detail,
                app.search_active,
                app.theme,
            );
            frame.render_widget(view, layout.main);
        }
    }

    let hint = if app.search_active {
        " Type to search  [Enter] Done  [ESC] Clear "
    } else if app.catalog_detail {
        " [ESC/Enter] Back to list "
    } else {
        " [/] Search  [j/k] Move  [Enter] Detail  [ESC] Back "
    };
    let footer = Paragraph::new(Line::from(Span::styled(
        hint,
        Style::default().fg(colors.muted()),
    )));
    frame.render_widget(footer, layout.footer);
}

fn render_quiz(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let layout = AppLayout::new(area);

    render_header(frame, app, layout.header, &format!("Quiz {}", app.level.label()));

    if app.quiz_loading {
        let loading = Paragraph::new(Line::from(Span::styled(
            "Loading questions...",
            Style::default().fg(colors.muted()),
        )));
        frame.render_widget(loading, layout.main);
    } else if let Some(quiz) = &app.quiz {
        let quiz_area = ui::layout::centered_rect(70, 80, layout.main);
        frame.render_widget(QuizView::new(quiz, app.theme), quiz_area);
    }

    let hint = match app.quiz.as_ref().map(|q| q.outcome()) {
        Some(Outcome::Pending) => " Type your answer  [Enter] Submit  [ESC] Quit quiz ",
        Some(_) => " [Enter] Next question  [ESC] Quit quiz ",
        None => " [ESC] Back ",
    };
    let footer = Paragraph::new(Line::from(Span::styled(
        hint,
        Style::default().fg(colors.muted()),
    )));
    frame.render_widget(footer, layout.footer);
}

fn render_result(frame: &mut ratatui::Frame, app: &App) {
    if let Some(quiz) = &app.quiz {
        let centered = ui::layout::centered_rect(50, 60, frame.area());
        let card = ResultsCard::new(quiz, &app.config.grades, app.theme);
        frame.render_widget(card, centered);
    }
}

fn render_settings(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let centered = ui::layout::centered_rect(60, 70, area);

    let block = Block::bordered()
        .title(" Settings ")
        .border_style(Style::default().fg(colors.accent()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(centered);
    block.render(centered, frame.buffer_mut());

    let fields: Vec<(String, String)> = vec![
        (
            "Quiz Questions".to_string(),
            format!("{}", app.config.quiz_questions),
        ),
        ("Theme".to_string(), app.config.theme.clone()),
        ("Default Level".to_string(), app.level.label().to_string()),
    ];

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(fields.len() as u16 * 3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(inner);

    let header = Paragraph::new(Line::from(Span::styled(
        "  Use arrows to navigate, Enter/Right to change, ESC to save & exit",
        Style::default().fg(colors.muted()),
    )));
    header.render(layout[0], frame.buffer_mut());

    let field_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            fields
                .iter()
                .map(|_| Constraint::Length(3))
                .collect::<Vec<_>>(),
        )
        .split(layout[1]);

    for (i, (label, value)) in fields.iter().enumerate() {
        let is_selected = i == app.settings_selected;
        let indicator = if is_selected { " > " } else { "   " };

        let label_text = format!("{indicator}{label}:");
        let value_text = format!("  < {value} >");

        let label_style = Style::default()
            .fg(if is_selected {
                colors.accent()
            } else {
                colors.fg()
            })
            .add_modifier(if is_selected {
                Modifier::BOLD
            } else {
                Modifier::empty()
            });

        let value_style = Style::default().fg(if is_selected {
            colors.warning()
        } else {
            colors.muted()
        });

        let lines = vec![
            Line::from(Span::styled(label_text, label_style)),
            Line::from(Span::styled(value_text, value_style)),
        ];
        Paragraph::new(lines).render(field_layout[i], frame.buffer_mut());
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        "  [ESC] Save & back  [Enter/arrows] Change value",
        Style::default().fg(colors.accent()),
    )));
    footer.render(layout[3], frame.buffer_mut());
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect, title: &str) {
    let colors = &app.theme.colors;
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " kotoba ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {title}"),
            Style::default().fg(colors.muted()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}
