//! Drives the controller end to end against scripted providers.

use quizgen::provider::MockProvider;
use quizgen::{App, AppState, Difficulty, QuizQuestion, GENERATION_FAILED_MESSAGE};

fn question(correct_index: usize) -> QuizQuestion {
    QuizQuestion {
        question: format!("Which option is number {}?", correct_index + 1),
        options: [
            "one".to_string(),
            "two".to_string(),
            "three".to_string(),
            "four".to_string(),
        ],
        correct_index,
        explanation: "Count them.".to_string(),
    }
}

fn five_questions() -> Vec<QuizQuestion> {
    vec![question(0), question(1), question(2), question(3), question(0)]
}

#[tokio::test]
async fn test_full_round_scores_correct_answers() {
    let provider = MockProvider::with_questions(five_questions());
    let mut app = App::new();

    app.generate(&provider, "Counting", Difficulty::Easy).await;
    assert_eq!(app.state, AppState::Quiz);
    assert_eq!(app.question_count(), 5);

    for i in 0..5 {
        let session = app.session().unwrap();
        assert_eq!(session.current_index(), i);
        if i == 2 {
            assert_eq!(session.progress_label(), "3 / 5");
        }

        let correct = session.current_question().correct_index;
        let pick = if i % 2 == 0 { correct } else { (correct + 1) % 4 };
        assert!(app.select_option(pick));
        assert!(!app.select_option(correct));
        app.advance();
    }

    assert_eq!(app.state, AppState::Results);
    assert_eq!(app.score(), 3);

    app.restart();
    assert_eq!(app.state, AppState::Setup);
    assert_eq!(app.subject(), "");
    assert_eq!(app.score(), 0);
    assert_eq!(app.error(), None);
    assert!(app.questions().is_empty());
}

#[tokio::test]
async fn test_failure_then_retry_by_user() {
    let provider = MockProvider::new(vec![
        Err("connection reset".to_string()),
        Ok(five_questions()),
    ]);
    let mut app = App::new();

    app.generate(&provider, "Counting", Difficulty::Medium).await;
    assert_eq!(app.state, AppState::Setup);
    assert_eq!(app.error(), Some(GENERATION_FAILED_MESSAGE));
    assert!(app.session().is_none());

    app.generate(&provider, "Counting", Difficulty::Medium).await;
    assert_eq!(app.state, AppState::Quiz);
    assert_eq!(app.error(), None);
    assert_eq!(provider.call_count(), 2);
}

#[tokio::test]
async fn test_single_question_goes_straight_to_results() {
    let provider = MockProvider::with_questions(vec![question(3)]);
    let mut app = App::new();

    app.generate(&provider, "One", Difficulty::Hard).await;
    assert!(app.select_option(3));
    app.advance();

    assert_eq!(app.state, AppState::Results);
    assert_eq!(app.score(), 1);
    assert_eq!(app.session().unwrap().current_index(), 0);
}
