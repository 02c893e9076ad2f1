//! End-to-end flow over the library surface: load bundled content, run a
//! quiz session through submit/advance, and grade the result with the
//! configured thresholds.

use rand::SeedableRng;
use rand::rngs::SmallRng;

use kotoba::config::Config;
use kotoba::content::models::{JlptLevel, KanaScript, QuizKind};
use kotoba::content::repository;
use kotoba::session::flashcard::FlashcardSession;
use kotoba::session::quiz::{GradeBand, Outcome, QuizSession, grade};

#[test]
fn bundled_quiz_runs_to_completion() {
    let pool = repository::load_quiz_mixed(JlptLevel::N5);
    assert!(!pool.is_empty());

    let mut rng = SmallRng::seed_from_u64(7);
    let mut quiz = QuizSession::start(pool, 5, &mut rng);
    assert_eq!(quiz.total(), 5);

    // Answer every question correctly using the first accepted answer.
    while !quiz.is_finished() {
        let answer = quiz.current().unwrap().correct_answers[0].clone();
        quiz.update_answer(&answer);
        quiz.submit();
        assert_eq!(quiz.outcome(), Outcome::Correct);
        quiz.next();
    }

    assert_eq!(quiz.score(), 5);
    assert_eq!(quiz.current_index(), quiz.total());

    let config = Config::default();
    let band = grade(quiz.score(), quiz.total(), &config.grades);
    assert_eq!(band, GradeBand::Top);
}

#[test]
fn wrong_answers_still_advance_and_lower_the_band() {
    let pool = repository::load_quiz(JlptLevel::N5, QuizKind::Particle);
    assert!(!pool.is_empty());

    let mut rng = SmallRng::seed_from_u64(7);
    let mut quiz = QuizSession::start(pool, 4, &mut rng);

    while !quiz.is_finished() {
        quiz.update_answer("definitely wrong");
        quiz.submit();
        assert_eq!(quiz.outcome(), Outcome::Wrong);
        quiz.next();
    }

    assert_eq!(quiz.score(), 0);
    let band = grade(quiz.score(), quiz.total(), &Config::default().grades);
    assert_eq!(band, GradeBand::Low);
}

#[test]
fn bundled_kana_drives_a_flashcard_session() {
    let mut session = FlashcardSession::loading();
    assert!(session.is_loading());

    session.load(repository::load_kana(KanaScript::Hiragana));
    assert!(!session.is_loading());
    assert!(session.current().is_some());

    // Filter to the vowel row and walk all the way around it.
    session.select_group(Some("a".to_string()));
    let len = session.filtered_items().len();
    assert!(len > 0);
    for _ in 0..len {
        session.next();
    }
    assert_eq!(session.current_index(), 0);
}

#[test]
fn retry_reshuffles_but_keeps_the_question_set() {
    let pool = repository::load_quiz(JlptLevel::N5, QuizKind::Jlpt);
    let mut rng = SmallRng::seed_from_u64(11);
    let mut quiz = QuizSession::start(pool, 4, &mut rng);

    let mut before: Vec<String> = (0..quiz.total())
        .map(|i| quiz.questions()[i].prompt.clone())
        .collect();
    before.sort();

    quiz.update_answer("x");
    quiz.submit();
    quiz.next();
    quiz.reset(&mut rng);

    assert_eq!(quiz.score(), 0);
    assert_eq!(quiz.current_index(), 0);
    let mut after: Vec<String> = (0..quiz.total())
        .map(|i| quiz.questions()[i].prompt.clone())
        .collect();
    after.sort();
    assert_eq!(before, after);
}
