use rust_embed::Embed;
use serde::de::DeserializeOwned;

use crate::content::models::{
    GrammarItem, JlptLevel, KanaItem, KanaScript, KanjiItem, QuizKind, QuizQuestion, VocabItem,
};

/// Content ships inside the binary, partitioned into one directory per
/// category/level with sorted `.json` files. Loading concatenates every
/// parseable file; a file that fails to parse is skipped, a missing or empty
/// category yields an empty list. No loader ever errors.
#[derive(Embed)]
#[folder = "assets/data/"]
struct DataAssets;

pub fn load_kana(script: KanaScript) -> Vec<KanaItem> {
    load_dir(&format!("kana/{}/", script.dir_key()))
}

pub fn load_kanji(level: JlptLevel) -> Vec<KanjiItem> {
    load_dir(&format!("kanji/{}/", level.file_key()))
}

pub fn load_grammar(level: JlptLevel) -> Vec<GrammarItem> {
    load_dir(&format!("grammar/{}/", level.file_key()))
}

pub fn load_vocabulary(level: JlptLevel) -> Vec<VocabItem> {
    load_dir(&format!("vocab/{}/", level.file_key()))
}

/// Quiz files share one directory and are partitioned by filename prefix,
/// e.g. `quiz/sentence_n5_01.json`.
pub fn load_quiz(level: JlptLevel, kind: QuizKind) -> Vec<QuizQuestion> {
    let prefix = format!("quiz/{}_{}", kind.file_prefix(), level.file_key());
    let mut questions: Vec<QuizQuestion> = load_prefixed(&prefix);
    // A question nobody can answer correctly is a data bug; drop it here.
    questions.retain(|q| !q.correct_answers.is_empty());
    questions
}

/// The sentence + particle union used by the mixed practice quiz.
pub fn load_quiz_mixed(level: JlptLevel) -> Vec<QuizQuestion> {
    let mut questions = load_quiz(level, QuizKind::Sentence);
    questions.extend(load_quiz(level, QuizKind::Particle));
    questions
}

fn load_dir<T: DeserializeOwned>(dir: &str) -> Vec<T> {
    collect(|path| is_content_file(path, dir))
}

fn load_prefixed<T: DeserializeOwned>(prefix: &str) -> Vec<T> {
    collect(|path| path.starts_with(prefix) && path.ends_with(".json"))
}

fn collect<T: DeserializeOwned>(keep: impl Fn(&str) -> bool) -> Vec<T> {
    let mut names: Vec<String> = DataAssets::iter()
        .map(|f| f.to_string())
        .filter(|f| keep(f))
        .collect();
    names.sort();

    let mut items = Vec::new();
    for name in names {
        if let Some(file) = DataAssets::get(&name) {
            append_entries(&mut items, file.data.as_ref());
        }
    }
    items
}

/// Direct children of `dir` only, `.json` only, and never the manifest.
fn is_content_file(path: &str, dir: &str) -> bool {
    match path.strip_prefix(dir) {
        Some(name) => !name.contains('/') && name.ends_with(".json") && name != "manifest.json",
        None => false,
    }
}

/// Parse one file's entries into `out`. Malformed files contribute nothing.
fn append_entries<T: DeserializeOwned>(out: &mut Vec<T>, bytes: &[u8]) {
    if let Ok(mut entries) = serde_json::from_slice::<Vec<T>>(bytes) {
        out.append(&mut entries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_content_file_scopes_to_direct_children() {
        assert!(is_content_file("kana/hiragana/gojuon_01.json", "kana/hiragana/"));
        assert!(!is_content_file("kana/hiragana/manifest.json", "kana/hiragana/"));
        assert!(!is_content_file("kana/katakana/gojuon_01.json", "kana/hiragana/"));
        assert!(!is_content_file("kana/hiragana/extra/deep.json", "kana/hiragana/"));
        assert!(!is_content_file("kana/hiragana/notes.txt", "kana/hiragana/"));
    }

    #[test]
    fn test_append_entries_skips_malformed_input() {
        let mut out: Vec<KanaItem> = Vec::new();
        append_entries(&mut out, b"{ this is not json");
        assert!(out.is_empty());
        // An object where a list is expected is also skipped whole.
        append_entries(&mut out, br#"{"char": "a"}"#);
        assert!(out.is_empty());
        append_entries(&mut out, r#"[{"char": "あ", "romaji": "a", "group": "a"}]"#.as_bytes());
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_malformed_file_does_not_poison_the_batch() {
        let mut out: Vec<KanaItem> = Vec::new();
        append_entries(&mut out, r#"[{"char": "あ", "romaji": "a"}]"#.as_bytes());
        append_entries(&mut out, b"broken");
        append_entries(&mut out, r#"[{"char": "い", "romaji": "i"}]"#.as_bytes());
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_bundled_kana_loads_for_both_scripts() {
        let hiragana = load_kana(KanaScript::Hiragana);
        let katakana = load_kana(KanaScript::Katakana);
        assert!(!hiragana.is_empty());
        assert!(!katakana.is_empty());
        assert!(hiragana.iter().any(|k| k.glyph == "あ" && k.romaji == "a"));
        assert!(katakana.iter().any(|k| k.glyph == "ア" && k.romaji == "a"));
    }

    #[test]
    fn test_bundled_kana_concatenates_files_in_name_order() {
        // gojuon_01 starts with the vowel row; later rows come from later
        // files, so あ must precede ま.
        let hiragana = load_kana(KanaScript::Hiragana);
        let a = hiragana.iter().position(|k| k.glyph == "あ").unwrap();
        let ma = hiragana.iter().position(|k| k.glyph == "ま").unwrap();
        assert!(a < ma);
    }

    #[test]
    fn test_bundled_kanji_skips_manifest() {
        // kanji/n5/ carries a manifest.json alongside the content files; it
        // must not surface as (or corrupt) loaded items.
        let kanji = load_kanji(JlptLevel::N5);
        assert!(!kanji.is_empty());
        assert!(kanji.iter().all(|k| !k.kanji.is_empty()));
    }

    #[test]
    fn test_missing_level_yields_empty_list() {
        assert!(load_kanji(JlptLevel::N1).is_empty());
        assert!(load_grammar(JlptLevel::N2).is_empty());
        assert!(load_vocabulary(JlptLevel::N3).is_empty());
        assert!(load_quiz(JlptLevel::N1, QuizKind::Particle).is_empty());
    }

    #[test]
    fn test_quiz_kinds_partition_by_prefix() {
        let jlpt = load_quiz(JlptLevel::N5, QuizKind::Jlpt);
        let sentence = load_quiz(JlptLevel::N5, QuizKind::Sentence);
        let particle = load_quiz(JlptLevel::N5, QuizKind::Particle);
        assert!(!jlpt.is_empty());
        assert!(!sentence.is_empty());
        assert!(!particle.is_empty());
    }

    #[test]
    fn test_mixed_quiz_is_sentence_plus_particle() {
        let sentence = load_quiz(JlptLevel::N5, QuizKind::Sentence);
        let particle = load_quiz(JlptLevel::N5, QuizKind::Particle);
        let mixed = load_quiz_mixed(JlptLevel::N5);
        assert_eq!(mixed.len(), sentence.len() + particle.len());
    }

    #[test]
    fn test_loaded_questions_always_have_answers() {
        for q in load_quiz_mixed(JlptLevel::N5) {
            assert!(!q.correct_answers.is_empty());
        }
    }
}
