use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};

use crate::content::models::{
    GrammarItem, JlptLevel, KanaItem, KanaScript, KanjiItem, QuizQuestion, VocabItem,
};
use crate::content::repository;

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    Resize(#[allow(dead_code)] u16, #[allow(dead_code)] u16),
    /// A content load finished. Stale generations are dropped by the app.
    Loaded {
        generation: u64,
        payload: LoadedContent,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadRequest {
    Kana(KanaScript),
    Kanji(JlptLevel),
    Grammar(JlptLevel),
    Vocab(JlptLevel),
    /// `None` means the mixed sentence + particle pool.
    Quiz(JlptLevel, Option<crate::content::models::QuizKind>),
}

pub enum LoadedContent {
    Kana(Vec<KanaItem>),
    Kanji(Vec<KanjiItem>),
    Grammar(Vec<GrammarItem>),
    Vocab(Vec<VocabItem>),
    Quiz(Vec<QuizQuestion>),
}

/// Run a content load off the UI thread, delivering the result through the
/// same channel as input events. The generation token travels with the
/// result so the app can apply only the last-initiated load.
pub fn spawn_load(tx: mpsc::Sender<AppEvent>, generation: u64, request: LoadRequest) {
    thread::spawn(move || {
        let payload = match request {
            LoadRequest::Kana(script) => LoadedContent::Kana(repository::load_kana(script)),
            LoadRequest::Kanji(level) => LoadedContent::Kanji(repository::load_kanji(level)),
            LoadRequest::Grammar(level) => LoadedContent::Grammar(repository::load_grammar(level)),
            LoadRequest::Vocab(level) => LoadedContent::Vocab(repository::load_vocabulary(level)),
            LoadRequest::Quiz(level, Some(kind)) => {
                LoadedContent::Quiz(repository::load_quiz(level, kind))
            }
            LoadRequest::Quiz(level, None) => {
                LoadedContent::Quiz(repository::load_quiz_mixed(level))
            }
        };
        let _ = tx.send(AppEvent::Loaded {
            generation,
            payload,
        });
    });
}

pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
    tx: mpsc::Sender<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let input_tx = tx.clone();

        thread::spawn(move || {
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key)) => {
                            if input_tx.send(AppEvent::Key(key)).is_err() {
                                return;
                            }
                        }
                        Ok(Event::Resize(w, h)) => {
                            if input_tx.send(AppEvent::Resize(w, h)).is_err() {
                                return;
                            }
                        }
                        _ => {}
                    }
                } else if input_tx.send(AppEvent::Tick).is_err() {
                    return;
                }
            }
        });

        Self { rx, tx }
    }

    /// Sender handed to the app for load-completion events.
    pub fn sender(&self) -> mpsc::Sender<AppEvent> {
        self.tx.clone()
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        Ok(self.rx.recv()?)
    }
}
