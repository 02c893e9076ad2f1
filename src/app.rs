use std::sync::mpsc;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::Config;
use crate::content::models::{
    GrammarItem, JlptLevel, KanaItem, KanaScript, KanjiItem, QuizKind, VocabItem,
};
use crate::event::{AppEvent, LoadRequest, LoadedContent, spawn_load};
use crate::session::catalog::CatalogFilter;
use crate::session::flashcard::FlashcardSession;
use crate::session::quiz::QuizSession;
use crate::ui::components::menu::Menu;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Menu,
    QuizKindSelect,
    LevelSelect,
    Flashcards,
    Catalog,
    Quiz,
    QuizResult,
    Settings,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogKind {
    Kanji,
    Grammar,
    Vocab,
}

impl CatalogKind {
    pub fn title(self) -> &'static str {
        match self {
            CatalogKind::Kanji => "Kanji",
            CatalogKind::Grammar => "Grammar",
            CatalogKind::Vocab => "Vocabulary",
        }
    }
}

/// What the level picker opens once a level is chosen. Quiz carries the
/// chosen kind; `None` is the mixed sentence + particle pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelTarget {
    Catalog(CatalogKind),
    Quiz(Option<QuizKind>),
}

pub struct App {
    pub screen: AppScreen,
    pub menu: Menu<'static>,
    pub theme: &'static Theme,
    pub config: Config,
    pub should_quit: bool,

    pub level: JlptLevel,
    pub script: KanaScript,

    pub kana: FlashcardSession<KanaItem>,
    pub kanji: CatalogFilter<KanjiItem>,
    pub grammar: CatalogFilter<GrammarItem>,
    pub vocab: CatalogFilter<VocabItem>,
    pub quiz: Option<QuizSession>,
    pub quiz_loading: bool,

    pub catalog_kind: CatalogKind,
    pub catalog_selected: usize,
    pub catalog_detail: bool,
    pub search_active: bool,

    pub picker_selected: usize,
    pub level_target: LevelTarget,

    pub settings_selected: usize,

    // Loads are applied only when their generation matches the latest
    // request, so a slow early load can never clobber a later one.
    load_generation: u64,
    tx: mpsc::Sender<AppEvent>,
    rng: SmallRng,
}

impl App {
    pub fn new(config: Config, tx: mpsc::Sender<AppEvent>) -> Self {
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));
        let menu = Menu::new(theme);
        let level = config.level.parse().unwrap_or(JlptLevel::N5);

        Self {
            screen: AppScreen::Menu,
            menu,
            theme,
            config,
            should_quit: false,
            level,
            script: KanaScript::Hiragana,
            kana: FlashcardSession::loading(),
            kanji: CatalogFilter::loading(),
            grammar: CatalogFilter::loading(),
            vocab: CatalogFilter::loading(),
            quiz: None,
            quiz_loading: false,
            catalog_kind: CatalogKind::Kanji,
            catalog_selected: 0,
            catalog_detail: false,
            search_active: false,
            picker_selected: 0,
            level_target: LevelTarget::Catalog(CatalogKind::Kanji),
            settings_selected: 0,
            load_generation: 0,
            tx,
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn set_theme(&mut self, name: &str) {
        if let Some(theme) = Theme::load(name) {
            let theme: &'static Theme = Box::leak(Box::new(theme));
            self.theme = theme;
            self.menu.theme = theme;
        }
    }

    fn begin_load(&mut self, request: LoadRequest) {
        self.load_generation += 1;
        spawn_load(self.tx.clone(), self.load_generation, request);
    }

    /// Apply a finished load, dropping anything but the last-initiated one.
    pub fn apply_loaded(&mut self, generation: u64, payload: LoadedContent) {
        if generation != self.load_generation {
            return;
        }
        match payload {
            LoadedContent::Kana(items) => self.kana.load(items),
            LoadedContent::Kanji(items) => self.kanji.load(items),
            LoadedContent::Grammar(items) => self.grammar.load(items),
            LoadedContent::Vocab(items) => self.vocab.load(items),
            LoadedContent::Quiz(pool) => {
                self.quiz = Some(QuizSession::start(
                    pool,
                    self.config.quiz_questions,
                    &mut self.rng,
                ));
                self.quiz_loading = false;
            }
        }
    }

    // ---- screen transitions ----

    pub fn go_to_menu(&mut self) {
        self.screen = AppScreen::Menu;
        self.search_active = false;
        self.catalog_detail = false;
    }

    pub fn go_to_settings(&mut self) {
        self.settings_selected = 0;
        self.screen = AppScreen::Settings;
    }

    pub fn open_quiz_kind_select(&mut self) {
        self.picker_selected = 0;
        self.screen = AppScreen::QuizKindSelect;
    }

    pub fn open_level_select(&mut self, target: LevelTarget) {
        self.level_target = target;
        self.picker_selected = JlptLevel::ALL
            .iter()
            .position(|l| *l == self.level)
            .unwrap_or(0);
        self.screen = AppScreen::LevelSelect;
    }

    pub fn choose_level(&mut self, level: JlptLevel) {
        self.level = level;
        match self.level_target {
            LevelTarget::Catalog(kind) => self.open_catalog(kind),
            LevelTarget::Quiz(kind) => self.open_quiz(kind),
        }
    }

    pub fn open_flashcards(&mut self, script: KanaScript) {
        self.script = script;
        self.kana = FlashcardSession::loading();
        self.begin_load(LoadRequest::Kana(script));
        self.screen = AppScreen::Flashcards;
    }

    pub fn open_catalog(&mut self, kind: CatalogKind) {
        self.catalog_kind = kind;
        self.catalog_selected = 0;
        self.catalog_detail = false;
        self.search_active = false;
        let request = match kind {
            CatalogKind::Kanji => {
                self.kanji = CatalogFilter::loading();
                LoadRequest::Kanji(self.level)
            }
            CatalogKind::Grammar => {
                self.grammar = CatalogFilter::loading();
                LoadRequest::Grammar(self.level)
            }
            CatalogKind::Vocab => {
                self.vocab = CatalogFilter::loading();
                LoadRequest::Vocab(self.level)
            }
        };
        self.begin_load(request);
        self.screen = AppScreen::Catalog;
    }

    pub fn open_quiz(&mut self, kind: Option<QuizKind>) {
        self.quiz = None;
        self.quiz_loading = true;
        self.begin_load(LoadRequest::Quiz(self.level, kind));
        self.screen = AppScreen::Quiz;
    }

    pub fn retry_quiz(&mut self) {
        if let Some(quiz) = self.quiz.as_mut() {
            quiz.reset(&mut self.rng);
            self.screen = AppScreen::Quiz;
        }
    }

    // ---- flashcard interactions ----

    /// Cycle the row filter: all rows, then each group in first-seen order.
    pub fn cycle_group(&mut self) {
        let groups = self.kana.available_groups();
        if groups.is_empty() {
            return;
        }
        let next = match self.kana.selected_group() {
            None => Some(groups[0].clone()),
            Some(current) => {
                let pos = groups.iter().position(|g| g == current);
                match pos {
                    Some(i) if i + 1 < groups.len() => Some(groups[i + 1].clone()),
                    _ => None,
                }
            }
        };
        self.kana.select_group(next);
    }

    // ---- catalog interactions ----

    fn catalog_len(&self) -> usize {
        match self.catalog_kind {
            CatalogKind::Kanji => self.kanji.filtered().len(),
            CatalogKind::Grammar => self.grammar.filtered().len(),
            CatalogKind::Vocab => self.vocab.filtered().len(),
        }
    }

    pub fn catalog_down(&mut self) {
        let len = self.catalog_len();
        if len > 0 {
            self.catalog_selected = (self.catalog_selected + 1).min(len - 1);
        }
    }

    pub fn catalog_up(&mut self) {
        self.catalog_selected = self.catalog_selected.saturating_sub(1);
    }

    pub fn catalog_push_query(&mut self, ch: char) {
        match self.catalog_kind {
            CatalogKind::Kanji => self.kanji.push_query_char(ch),
            CatalogKind::Grammar => self.grammar.push_query_char(ch),
            CatalogKind::Vocab => self.vocab.push_query_char(ch),
        }
        self.catalog_selected = 0;
    }

    pub fn catalog_pop_query(&mut self) {
        match self.catalog_kind {
            CatalogKind::Kanji => self.kanji.pop_query_char(),
            CatalogKind::Grammar => self.grammar.pop_query_char(),
            CatalogKind::Vocab => self.vocab.pop_query_char(),
        }
        self.catalog_selected = 0;
    }

    pub fn catalog_clear_query(&mut self) {
        match self.catalog_kind {
            CatalogKind::Kanji => self.kanji.set_query(""),
            CatalogKind::Grammar => self.grammar.set_query(""),
            CatalogKind::Vocab => self.vocab.set_query(""),
        }
        self.catalog_selected = 0;
    }

    // ---- quiz interactions ----

    pub fn quiz_push_char(&mut self, ch: char) {
        if let Some(quiz) = self.quiz.as_mut() {
            quiz.push_answer_char(ch);
        }
    }

    pub fn quiz_backspace(&mut self) {
        if let Some(quiz) = self.quiz.as_mut() {
            quiz.pop_answer_char();
        }
    }

    /// Enter submits while answering, advances once revealed.
    pub fn quiz_enter(&mut self) {
        let Some(quiz) = self.quiz.as_mut() else {
            return;
        };
        if quiz.show_answer() {
            quiz.next();
            if quiz.is_finished() {
                self.screen = AppScreen::QuizResult;
            }
        } else {
            quiz.submit();
        }
    }

    // ---- settings ----

    pub fn settings_cycle_forward(&mut self) {
        match self.settings_selected {
            0 => {
                self.config.quiz_questions = (self.config.quiz_questions + 5).min(50);
            }
            1 => {
                let themes = Theme::available_themes();
                if let Some(idx) = themes.iter().position(|t| *t == self.config.theme) {
                    let next = (idx + 1) % themes.len();
                    self.config.theme = themes[next].clone();
                } else if let Some(first) = themes.first() {
                    self.config.theme = first.clone();
                }
                let name = self.config.theme.clone();
                self.set_theme(&name);
            }
            2 => {
                let idx = JlptLevel::ALL
                    .iter()
                    .position(|l| *l == self.level)
                    .unwrap_or(0);
                self.level = JlptLevel::ALL[(idx + 1) % JlptLevel::ALL.len()];
                self.config.level = self.level.file_key().to_string();
            }
            _ => {}
        }
    }

    pub fn settings_cycle_backward(&mut self) {
        match self.settings_selected {
            0 => {
                self.config.quiz_questions =
                    self.config.quiz_questions.saturating_sub(5).max(5);
            }
            1 => {
                let themes = Theme::available_themes();
                if let Some(idx) = themes.iter().position(|t| *t == self.config.theme) {
                    let next = if idx == 0 { themes.len() - 1 } else { idx - 1 };
                    self.config.theme = themes[next].clone();
                } else if let Some(first) = themes.first() {
                    self.config.theme = first.clone();
                }
                let name = self.config.theme.clone();
                self.set_theme(&name);
            }
            2 => {
                let idx = JlptLevel::ALL
                    .iter()
                    .position(|l| *l == self.level)
                    .unwrap_or(0);
                let prev = if idx == 0 {
                    JlptLevel::ALL.len() - 1
                } else {
                    idx - 1
                };
                self.level = JlptLevel::ALL[prev];
                self.config.level = self.level.file_key().to_string();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let (tx, _rx) = mpsc::channel();
        App::new(Config::default(), tx)
    }

    fn kanji(symbol: &str) -> KanjiItem {
        KanjiItem {
            kanji: symbol.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_stale_load_is_dropped() {
        let mut app = app();
        app.open_catalog(CatalogKind::Kanji); // generation 1
        app.open_catalog(CatalogKind::Kanji); // generation 2

        app.apply_loaded(1, LoadedContent::Kanji(vec![kanji("日")]));
        assert!(app.kanji.is_loading());

        app.apply_loaded(2, LoadedContent::Kanji(vec![kanji("月")]));
        assert!(!app.kanji.is_loading());
        assert_eq!(app.kanji.items()[0].kanji, "月");
    }

    #[test]
    fn test_quiz_load_respects_configured_limit() {
        let mut app = app();
        app.config.quiz_questions = 3;
        app.open_quiz(None); // generation 1
        assert!(app.quiz_loading);

        let pool = (0..10)
            .map(|i| crate::content::models::QuizQuestion {
                prompt: format!("q{i}"),
                correct_answers: vec!["a".to_string()],
                ..Default::default()
            })
            .collect();
        app.apply_loaded(1, LoadedContent::Quiz(pool));
        assert!(!app.quiz_loading);
        assert_eq!(app.quiz.as_ref().unwrap().total(), 3);
    }

    #[test]
    fn test_quiz_enter_submits_then_advances_to_result() {
        let mut app = app();
        app.open_quiz(None);
        let pool = vec![crate::content::models::QuizQuestion {
            prompt: "only".to_string(),
            correct_answers: vec!["a".to_string()],
            ..Default::default()
        }];
        app.apply_loaded(1, LoadedContent::Quiz(pool));

        app.quiz_push_char('a');
        app.quiz_enter(); // submit
        assert_eq!(app.screen, AppScreen::Quiz);
        app.quiz_enter(); // advance past last question
        assert_eq!(app.screen, AppScreen::QuizResult);
        assert_eq!(app.quiz.as_ref().unwrap().score(), 1);
    }

    #[test]
    fn test_retry_quiz_resets_counters() {
        let mut app = app();
        app.open_quiz(None);
        let pool = vec![crate::content::models::QuizQuestion {
            prompt: "only".to_string(),
            correct_answers: vec!["a".to_string()],
            ..Default::default()
        }];
        app.apply_loaded(1, LoadedContent::Quiz(pool));
        app.quiz_push_char('a');
        app.quiz_enter();
        app.quiz_enter();

        app.retry_quiz();
        assert_eq!(app.screen, AppScreen::Quiz);
        let quiz = app.quiz.as_ref().unwrap();
        assert_eq!(quiz.score(), 0);
        assert!(!quiz.is_finished());
    }

    #[test]
    fn test_cycle_group_walks_all_then_each_group() {
        let mut app = app();
        app.open_flashcards(KanaScript::Hiragana); // generation 1
        let items = vec![
            KanaItem {
                glyph: "あ".into(),
                group: "a".into(),
                ..Default::default()
            },
            KanaItem {
                glyph: "か".into(),
                group: "ka".into(),
                ..Default::default()
            },
        ];
        app.apply_loaded(1, LoadedContent::Kana(items));

        assert_eq!(app.kana.selected_group(), None);
        app.cycle_group();
        assert_eq!(app.kana.selected_group(), Some("a"));
        app.cycle_group();
        assert_eq!(app.kana.selected_group(), Some("ka"));
        app.cycle_group();
        assert_eq!(app.kana.selected_group(), None);
    }

    #[test]
    fn test_catalog_query_edit_resets_selection() {
        let mut app = app();
        app.open_catalog(CatalogKind::Kanji);
        app.apply_loaded(1, LoadedContent::Kanji(vec![kanji("日"), kanji("月")]));
        app.catalog_down();
        assert_eq!(app.catalog_selected, 1);
        app.catalog_push_query('x');
        assert_eq!(app.catalog_selected, 0);
    }
}
