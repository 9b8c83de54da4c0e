/*!
 * End-to-end quiz session tests over an in-memory database
 *
 * Sessions are driven through the scripted prompter: content rules answer the
 * term prompts (batch order is random) and queued answers drive the yes/no
 * prompts.
 */

use wordflash::prompt::ScriptedPrompter;
use wordflash::{LanguagePair, QuizEngine, Repository};

use crate::common::{seed_pair, seed_term};

fn en_fr() -> LanguagePair {
    LanguagePair::new("en", "fr").unwrap()
}

/// Two terms, one answered right, one wrong; the session ends at the repeat
/// prompt with the streaks updated
#[tokio::test]
async fn test_session_withOneRightOneWrongAnswer_shouldUpdateStreaksAndOfferRepeat() {
    let repo = Repository::new_in_memory().unwrap();
    let (cat, _) = seed_pair(&repo, "cat", "en", "chat", "fr").await.unwrap();
    let (dog, _) = seed_pair(&repo, "dog", "en", "chien", "fr").await.unwrap();

    let mut prompter = ScriptedPrompter::with_answers(Vec::<String>::new())
        .with_rule("cat", "chat")
        .with_rule("dog", "loup")
        .with_rule("Repeat?", "n");

    let summary = QuizEngine::new(&repo, &mut prompter, en_fr())
        .run()
        .await
        .unwrap();

    assert_eq!(summary.asked, 2);
    assert_eq!(summary.correct, 1);
    assert_eq!(summary.wrong, 1);
    assert_eq!(summary.archived, 0);
    assert!(summary.errors.is_empty());

    let cat = repo.get_term(&cat.id).await.unwrap().unwrap();
    let dog = repo.get_term(&dog.id).await.unwrap().unwrap();
    assert_eq!(cat.streak, 1);
    assert_eq!(dog.streak, 0);

    // Wrong answers list every acceptable translation
    assert!(
        prompter
            .transcript
            .iter()
            .any(|line| line.contains("Wrong :-( Correct answers: chien"))
    );
    // The session reached the repeat prompt, not an archive prompt
    assert!(
        prompter
            .transcript
            .iter()
            .any(|line| line.contains("No more words. Repeat?"))
    );
    assert!(
        !prompter
            .transcript
            .iter()
            .any(|line| line.contains("remove it from future quizzes"))
    );
}

/// A correct answer landing the streak on the interval triggers the archive
/// suggestion; accepting archives and zeroes the streak
#[tokio::test]
async fn test_session_withStreakReachingInterval_shouldArchiveOnAccept() {
    let repo = Repository::new_in_memory().unwrap();
    let (cat, _) = seed_pair(&repo, "cat", "en", "chat", "fr").await.unwrap();
    repo.update_streak(&cat.id, 4).await.unwrap();

    // The archive rule must come first: the archive question itself names
    // the term, so the term rule would otherwise swallow it.
    let mut prompter = ScriptedPrompter::with_answers(Vec::<String>::new())
        .with_rule("remove it from future quizzes", "")
        .with_rule("cat", "chat")
        .with_rule("Repeat?", "n");

    let summary = QuizEngine::new(&repo, &mut prompter, en_fr())
        .run()
        .await
        .unwrap();

    assert_eq!(summary.correct, 1);
    assert_eq!(summary.archived, 1);

    let cat = repo.get_term(&cat.id).await.unwrap().unwrap();
    assert!(cat.archived);
    assert_eq!(cat.streak, 0);
}

/// Declining the archive suggestion keeps the streak value
#[tokio::test]
async fn test_session_withArchiveDeclined_shouldKeepStreak() {
    let repo = Repository::new_in_memory().unwrap();
    let (cat, _) = seed_pair(&repo, "cat", "en", "chat", "fr").await.unwrap();
    repo.update_streak(&cat.id, 9).await.unwrap();

    let mut prompter = ScriptedPrompter::with_answers(Vec::<String>::new())
        .with_rule("remove it from future quizzes", "n")
        .with_rule("cat", "chat")
        .with_rule("Repeat?", "n");

    let summary = QuizEngine::new(&repo, &mut prompter, en_fr())
        .run()
        .await
        .unwrap();

    assert_eq!(summary.archived, 0);

    let cat = repo.get_term(&cat.id).await.unwrap().unwrap();
    assert!(!cat.archived);
    assert_eq!(cat.streak, 10, "Declining must preserve the streak");
}

/// A streak already sitting on a multiple of the interval must not trigger
/// the suggestion on entry; only a fresh correct answer landing on a multiple
/// does
#[tokio::test]
async fn test_session_withPreexistingIntervalStreak_shouldNotSuggestArchive() {
    let repo = Repository::new_in_memory().unwrap();
    let (cat, _) = seed_pair(&repo, "cat", "en", "chat", "fr").await.unwrap();
    repo.update_streak(&cat.id, 5).await.unwrap();

    let mut prompter = ScriptedPrompter::with_answers(Vec::<String>::new())
        .with_rule("cat", "chat")
        .with_rule("Repeat?", "n");

    let summary = QuizEngine::new(&repo, &mut prompter, en_fr())
        .run()
        .await
        .unwrap();

    assert_eq!(summary.archived, 0);
    assert!(
        !prompter
            .transcript
            .iter()
            .any(|line| line.contains("remove it from future quizzes"))
    );

    let cat = repo.get_term(&cat.id).await.unwrap().unwrap();
    assert_eq!(cat.streak, 6);
}

/// A wrong answer resets the streak and never suggests archiving, even from
/// a streak sitting on the interval
#[tokio::test]
async fn test_session_withWrongAnswerOnIntervalStreak_shouldResetToZero() {
    let repo = Repository::new_in_memory().unwrap();
    let (cat, _) = seed_pair(&repo, "cat", "en", "chat", "fr").await.unwrap();
    repo.update_streak(&cat.id, 5).await.unwrap();

    let mut prompter = ScriptedPrompter::with_answers(Vec::<String>::new())
        .with_rule("cat", "wrong")
        .with_rule("Repeat?", "n");

    let summary = QuizEngine::new(&repo, &mut prompter, en_fr())
        .run()
        .await
        .unwrap();

    assert_eq!(summary.wrong, 1);
    assert_eq!(summary.archived, 0);

    let cat = repo.get_term(&cat.id).await.unwrap().unwrap();
    assert_eq!(cat.streak, 0);
}

/// A term with no translations into the target language is skipped silently:
/// no prompt, no streak change
#[tokio::test]
async fn test_session_withOrphanTerm_shouldSkipWithoutPrompting() {
    let repo = Repository::new_in_memory().unwrap();
    seed_pair(&repo, "cat", "en", "chat", "fr").await.unwrap();
    let lonely = seed_term(&repo, "lonely", "en").await.unwrap();

    let mut prompter = ScriptedPrompter::with_answers(Vec::<String>::new())
        .with_rule("cat", "chat")
        .with_rule("Repeat?", "n");

    let summary = QuizEngine::new(&repo, &mut prompter, en_fr())
        .run()
        .await
        .unwrap();

    assert_eq!(summary.asked, 1);
    assert_eq!(summary.skipped, 1);
    assert!(
        !prompter
            .transcript
            .iter()
            .any(|line| line.contains("lonely"))
    );

    let lonely = repo.get_term(&lonely.id).await.unwrap().unwrap();
    assert_eq!(lonely.streak, 0);
}

/// An empty pool goes straight to the repeat prompt
#[tokio::test]
async fn test_session_withEmptyPool_shouldOfferRepeatImmediately() {
    let repo = Repository::new_in_memory().unwrap();

    let mut prompter =
        ScriptedPrompter::with_answers(Vec::<String>::new()).with_rule("Repeat?", "n");

    let summary = QuizEngine::new(&repo, &mut prompter, en_fr())
        .run()
        .await
        .unwrap();

    assert_eq!(summary.asked, 0);
    assert_eq!(prompter.transcript.len(), 1);
    assert!(prompter.transcript[0].contains("No more words. Repeat?"));
}

/// Accepting the repeat prompt draws a fresh batch in the same session
#[tokio::test]
async fn test_session_withRepeatAccepted_shouldRunSecondRound() {
    let repo = Repository::new_in_memory().unwrap();
    let (cat, _) = seed_pair(&repo, "cat", "en", "chat", "fr").await.unwrap();

    // Term prompts answered by rule; the two repeat prompts consume the
    // queue: yes (empty input) then no.
    let mut prompter = ScriptedPrompter::with_answers(["", "n"]).with_rule("cat", "chat");

    let summary = QuizEngine::new(&repo, &mut prompter, en_fr())
        .run()
        .await
        .unwrap();

    assert_eq!(summary.asked, 2);
    assert_eq!(summary.correct, 2);

    let cat = repo.get_term(&cat.id).await.unwrap().unwrap();
    assert_eq!(cat.streak, 2);
}
