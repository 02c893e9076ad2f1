use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::session::catalog::{Searchable, contains_ignore_case};
use crate::session::flashcard::CardItem;

/// Raised only at the configuration boundary (CLI/config values). Content
/// files themselves never produce errors; unparseable ones are skipped.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("unknown JLPT level '{0}' (expected n5..n1)")]
    UnknownLevel(String),
    #[error("unknown kana script '{0}' (expected hiragana or katakana)")]
    UnknownScript(String),
    #[error("unknown quiz kind '{0}' (expected jlpt, sentence, particle, or mixed)")]
    UnknownQuizKind(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JlptLevel {
    N5,
    N4,
    N3,
    N2,
    N1,
}

impl JlptLevel {
    pub const ALL: [JlptLevel; 5] = [
        JlptLevel::N5,
        JlptLevel::N4,
        JlptLevel::N3,
        JlptLevel::N2,
        JlptLevel::N1,
    ];

    pub fn label(self) -> &'static str {
        match self {
            JlptLevel::N5 => "N5",
            JlptLevel::N4 => "N4",
            JlptLevel::N3 => "N3",
            JlptLevel::N2 => "N2",
            JlptLevel::N1 => "N1",
        }
    }

    /// Directory / filename key, e.g. `kanji/n5/`.
    pub fn file_key(self) -> &'static str {
        match self {
            JlptLevel::N5 => "n5",
            JlptLevel::N4 => "n4",
            JlptLevel::N3 => "n3",
            JlptLevel::N2 => "n2",
            JlptLevel::N1 => "n1",
        }
    }
}

impl FromStr for JlptLevel {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "n5" => Ok(JlptLevel::N5),
            "n4" => Ok(JlptLevel::N4),
            "n3" => Ok(JlptLevel::N3),
            "n2" => Ok(JlptLevel::N2),
            "n1" => Ok(JlptLevel::N1),
            other => Err(ContentError::UnknownLevel(other.to_string())),
        }
    }
}

impl fmt::Display for JlptLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KanaScript {
    Hiragana,
    Katakana,
}

impl KanaScript {
    pub fn label(self) -> &'static str {
        match self {
            KanaScript::Hiragana => "Hiragana",
            KanaScript::Katakana => "Katakana",
        }
    }

    pub fn dir_key(self) -> &'static str {
        match self {
            KanaScript::Hiragana => "hiragana",
            KanaScript::Katakana => "katakana",
        }
    }
}

impl FromStr for KanaScript {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hiragana" => Ok(KanaScript::Hiragana),
            "katakana" => Ok(KanaScript::Katakana),
            other => Err(ContentError::UnknownScript(other.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizKind {
    Jlpt,
    Sentence,
    Particle,
}

impl QuizKind {
    pub fn label(self) -> &'static str {
        match self {
            QuizKind::Jlpt => "JLPT",
            QuizKind::Sentence => "Sentence",
            QuizKind::Particle => "Particle",
        }
    }

    /// Filename prefix within `quiz/`, e.g. `sentence_n5_01.json`.
    pub fn file_prefix(self) -> &'static str {
        match self {
            QuizKind::Jlpt => "jlpt",
            QuizKind::Sentence => "sentence",
            QuizKind::Particle => "particle",
        }
    }
}

// All content records deserialize leniently: any missing field takes its
// default so a partially-filled source file still contributes entries.

#[derive(Clone, Debug, Default, Deserialize)]
pub struct KanaItem {
    #[serde(rename = "char", default)]
    pub glyph: String,
    #[serde(default)]
    pub romaji: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub group: String,
}

impl CardItem for KanaItem {
    fn group_key(&self) -> &str {
        &self.group
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct KanjiReading {
    #[serde(default)]
    pub hiragana: String,
    #[serde(default)]
    pub romaji: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct KanjiVocab {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub reading: String,
    #[serde(default)]
    pub meaning: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct KanjiExample {
    #[serde(default)]
    pub japanese: String,
    #[serde(default)]
    pub english: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct KanjiItem {
    #[serde(default)]
    pub kanji: String,
    #[serde(default)]
    pub onyomi: KanjiReading,
    #[serde(default)]
    pub kunyomi: KanjiReading,
    #[serde(default)]
    pub vocabulary: Vec<KanjiVocab>,
    #[serde(rename = "example_sentence", default)]
    pub example: KanjiExample,
    #[serde(default)]
    pub story: String,
    #[serde(default)]
    pub level: String,
}

impl Searchable for KanjiItem {
    /// Symbol and kana readings match exactly; vocabulary meanings ignore
    /// case since they are alphabetic.
    fn matches_query(&self, query: &str) -> bool {
        self.kanji.contains(query)
            || self.onyomi.hiragana.contains(query)
            || self.kunyomi.hiragana.contains(query)
            || self
                .vocabulary
                .iter()
                .any(|v| contains_ignore_case(&v.meaning, query))
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct GrammarItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub formula: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub example: String,
    #[serde(default)]
    pub level: String,
}

impl Searchable for GrammarItem {
    fn matches_query(&self, query: &str) -> bool {
        contains_ignore_case(&self.title, query)
            || contains_ignore_case(&self.explanation, query)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct VocabExample {
    #[serde(default)]
    pub japanese: String,
    #[serde(default)]
    pub romaji: String,
    #[serde(default)]
    pub meaning: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct VocabItem {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub kana: String,
    #[serde(default)]
    pub meaning: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub examples: Vec<VocabExample>,
}

impl Searchable for VocabItem {
    fn matches_query(&self, query: &str) -> bool {
        self.word.contains(query)
            || self.kana.contains(query)
            || contains_ignore_case(&self.meaning, query)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct QuizQuestion {
    #[serde(rename = "q", default)]
    pub prompt: String,
    /// Optional context sentence shown above the prompt.
    #[serde(default)]
    pub japanese: Option<String>,
    #[serde(rename = "inputType", default)]
    pub input_kind: String,
    #[serde(rename = "correctAnswers", default)]
    pub correct_answers: Vec<String>,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_round_trips_through_from_str() {
        for level in JlptLevel::ALL {
            assert_eq!(level.file_key().parse::<JlptLevel>().unwrap(), level);
        }
        assert_eq!("N4".parse::<JlptLevel>().unwrap(), JlptLevel::N4);
    }

    #[test]
    fn test_unknown_level_fails_fast() {
        let err = "n6".parse::<JlptLevel>().unwrap_err();
        assert!(matches!(err, ContentError::UnknownLevel(_)));
    }

    #[test]
    fn test_unknown_script_fails_fast() {
        assert!("romaji".parse::<KanaScript>().is_err());
        assert_eq!(
            "Katakana".parse::<KanaScript>().unwrap(),
            KanaScript::Katakana
        );
    }

    #[test]
    fn test_kana_item_parses_with_renamed_fields() {
        let json = r#"{"char": "あ", "romaji": "a", "type": "gojuon", "group": "a"}"#;
        let item: KanaItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.glyph, "あ");
        assert_eq!(item.group_key(), "a");
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let item: KanjiItem = serde_json::from_str(r#"{"kanji": "日"}"#).unwrap();
        assert_eq!(item.kanji, "日");
        assert!(item.vocabulary.is_empty());
        assert!(item.onyomi.hiragana.is_empty());

        let q: QuizQuestion = serde_json::from_str(r#"{"q": "?"}"#).unwrap();
        assert!(q.correct_answers.is_empty());
        assert!(q.japanese.is_none());
    }

    #[test]
    fn test_kanji_search_fields() {
        let json = r#"{
            "kanji": "日",
            "onyomi": {"hiragana": "にち", "romaji": "nichi"},
            "kunyomi": {"hiragana": "ひ", "romaji": "hi"},
            "vocabulary": [{"word": "日本", "reading": "にほん", "meaning": "Japan"}]
        }"#;
        let item: KanjiItem = serde_json::from_str(json).unwrap();
        assert!(item.matches_query("日"));
        assert!(item.matches_query("にち"));
        assert!(item.matches_query("japan"));
        assert!(!item.matches_query("moon"));
    }

    #[test]
    fn test_grammar_search_ignores_case() {
        let item = GrammarItem {
            title: "〜てください".to_string(),
            explanation: "Polite request".to_string(),
            ..Default::default()
        };
        assert!(item.matches_query("POLITE"));
        assert!(item.matches_query("てください"));
        assert!(!item.matches_query("past tense"));
    }

    #[test]
    fn test_vocab_search_word_kana_meaning() {
        let item = VocabItem {
            word: "猫".to_string(),
            kana: "ねこ".to_string(),
            meaning: "cat".to_string(),
            ..Default::default()
        };
        assert!(item.matches_query("猫"));
        assert!(item.matches_query("ねこ"));
        assert!(item.matches_query("Cat"));
    }
}
