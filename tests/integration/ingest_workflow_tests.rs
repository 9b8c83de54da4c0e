/*!
 * Ingestion workflow tests: manual entry and lookup-assisted flows over an
 * in-memory database with a mock dictionary.
 */

use wordflash::ingest::IngestPipeline;
use wordflash::lookup::mock::MockDictionary;
use wordflash::prompt::ScriptedPrompter;
use wordflash::{LanguagePair, Repository};

use crate::common::seed_term;

fn en_fr() -> LanguagePair {
    LanguagePair::new("en", "fr").unwrap()
}

/// A comma-separated translation becomes one term per synonym, each linked
/// to the same source term
#[tokio::test]
async fn test_addFromLookup_withSynonymList_shouldLinkEachWordSeparately() {
    let repo = Repository::new_in_memory().unwrap();
    let dictionary =
        MockDictionary::empty().with_entry("cat", &[("chat, matou", "(animal)", "nm")]);
    let mut prompter = ScriptedPrompter::with_answers(["cat"])
        .with_rule("Use this translation", "");

    let report = IngestPipeline::new(&repo, &dictionary, &mut prompter)
        .add_from_lookup(&en_fr())
        .await
        .unwrap();

    assert!(report.is_clean());
    assert_eq!(report.terms, 3, "cat, chat and matou");
    assert_eq!(report.links, 2);

    let cat = &repo.fetch_quiz_batch("en", 10).await.unwrap()[0];
    let mut translations = repo.fetch_translations(&cat.id, "fr").await.unwrap();
    translations.sort_by(|a, b| a.headword.cmp(&b.headword));

    let headwords: Vec<&str> = translations.iter().map(|t| t.headword.as_str()).collect();
    assert_eq!(headwords, vec!["chat", "matou"]);
    assert!(translations.iter().all(|t| t.part == "nm"));
}

/// Each candidate is offered individually; rejected ones are not ingested
#[tokio::test]
async fn test_addFromLookup_withRejectedCandidate_shouldOnlySaveAccepted() {
    let repo = Repository::new_in_memory().unwrap();
    let dictionary =
        MockDictionary::empty().with_entry("cat", &[("chat", "", ""), ("minou", "", "")]);
    let mut prompter = ScriptedPrompter::with_answers(["cat"])
        .with_rule("translation: chat", "n")
        .with_rule("translation: minou", "");

    let report = IngestPipeline::new(&repo, &dictionary, &mut prompter)
        .add_from_lookup(&en_fr())
        .await
        .unwrap();

    assert!(report.is_clean());
    assert_eq!(report.terms, 2, "cat and minou");
    assert_eq!(report.links, 1);

    let cat = &repo.fetch_quiz_batch("en", 10).await.unwrap()[0];
    let translations = repo.fetch_translations(&cat.id, "fr").await.unwrap();
    assert_eq!(translations.len(), 1);
    assert_eq!(translations[0].headword, "minou");
}

/// Running the same lookup twice must not create quiz-distinguishable
/// duplicates or duplicate links
#[tokio::test]
async fn test_addFromLookup_twice_shouldBeIdempotent() {
    let repo = Repository::new_in_memory().unwrap();
    let dictionary = MockDictionary::empty().with_entry("cat", &[("chat", "", "")]);

    for round in 0..2 {
        let mut prompter = ScriptedPrompter::with_answers(["cat"])
            .with_rule("Use this translation", "");
        let report = IngestPipeline::new(&repo, &dictionary, &mut prompter)
            .add_from_lookup(&en_fr())
            .await
            .unwrap();

        assert!(report.is_clean());
        if round == 1 {
            assert_eq!(report.links, 0, "Re-linking the same pair must not duplicate");
        }
    }

    let english = repo.fetch_quiz_batch("en", 10).await.unwrap();
    assert_eq!(english.len(), 1);
    let translations = repo
        .fetch_translations(&english[0].id, "fr")
        .await
        .unwrap();
    assert_eq!(translations.len(), 1);
}

/// A provider failure reports "no results" and leaves the store untouched
#[tokio::test]
async fn test_addFromLookup_withFailingProvider_shouldReportNoResults() {
    let repo = Repository::new_in_memory().unwrap();
    let dictionary = MockDictionary::failing();
    let mut prompter = ScriptedPrompter::with_answers(["cat"]);

    let report = IngestPipeline::new(&repo, &dictionary, &mut prompter)
        .add_from_lookup(&en_fr())
        .await
        .unwrap();

    assert!(report.is_clean());
    assert_eq!(report.terms, 0);
    assert!(
        prompter
            .transcript
            .iter()
            .any(|line| line == "No results found.")
    );
    assert!(repo.fetch_quiz_batch("en", 10).await.unwrap().is_empty());
}

/// An unknown word behaves the same as a provider failure
#[tokio::test]
async fn test_addFromLookup_withUnknownWord_shouldReportNoResults() {
    let repo = Repository::new_in_memory().unwrap();
    let dictionary = MockDictionary::empty();
    let mut prompter = ScriptedPrompter::with_answers(["doesnotexist"]);

    let report = IngestPipeline::new(&repo, &dictionary, &mut prompter)
        .add_from_lookup(&en_fr())
        .await
        .unwrap();

    assert_eq!(report.terms, 0);
    assert!(
        prompter
            .transcript
            .iter()
            .any(|line| line == "No results found.")
    );
}

/// Manual entry creates both terms and the link between them
#[tokio::test]
async fn test_addManual_shouldCreateLinkedPair() {
    let repo = Repository::new_in_memory().unwrap();
    let dictionary = MockDictionary::empty();
    let mut prompter = ScriptedPrompter::with_answers(Vec::<String>::new())
        .with_rule("What English word", "dog")
        .with_rule("translation of dog", "chien");

    IngestPipeline::new(&repo, &dictionary, &mut prompter)
        .add_manual(&en_fr())
        .await
        .unwrap();

    let english = repo.fetch_quiz_batch("en", 10).await.unwrap();
    assert_eq!(english.len(), 1);
    assert_eq!(english[0].headword, "dog");

    let translations = repo
        .fetch_translations(&english[0].id, "fr")
        .await
        .unwrap();
    assert_eq!(translations.len(), 1);
    assert_eq!(translations[0].headword, "chien");
}

/// Scraped arrow artifacts are stripped before the word is stored
#[tokio::test]
async fn test_addFromLookup_withArrowArtifact_shouldStoreCleanHeadword() {
    let repo = Repository::new_in_memory().unwrap();
    let dictionary = MockDictionary::empty().with_entry("cat", &[("⇒ chat", "", "")]);
    let mut prompter = ScriptedPrompter::with_answers(["cat"])
        .with_rule("Use this translation", "");

    IngestPipeline::new(&repo, &dictionary, &mut prompter)
        .add_from_lookup(&en_fr())
        .await
        .unwrap();

    let french = repo.fetch_quiz_batch("fr", 10).await.unwrap();
    assert_eq!(french.len(), 1);
    assert_eq!(french[0].headword, "chat");
}

/// Linking with a missing endpoint is a deliberate no-op, not a failure
#[tokio::test]
async fn test_linkTerms_withMissingEndpoint_shouldBeNoOp() {
    let repo = Repository::new_in_memory().unwrap();
    let dictionary = MockDictionary::empty();
    let mut prompter = ScriptedPrompter::with_answers(Vec::<String>::new());
    let pipeline = IngestPipeline::new(&repo, &dictionary, &mut prompter);

    let term = seed_term(&repo, "cat", "en").await.unwrap();

    assert!(!pipeline.link_terms(None, Some(&term.id)).await.unwrap());
    assert!(!pipeline.link_terms(Some(&term.id), None).await.unwrap());
    assert!(!pipeline.link_terms(None, None).await.unwrap());

    let translations = repo.fetch_translations(&term.id, "fr").await.unwrap();
    assert!(translations.is_empty());
}

/// Re-ingesting a word never resets its quiz state
#[tokio::test]
async fn test_addFromLookup_overExistingTerm_shouldPreserveStreakAndArchival() {
    let repo = Repository::new_in_memory().unwrap();
    let dictionary = MockDictionary::empty().with_entry("cat", &[("chat", "", "")]);

    let mut prompter = ScriptedPrompter::with_answers(["cat"])
        .with_rule("Use this translation", "");
    IngestPipeline::new(&repo, &dictionary, &mut prompter)
        .add_from_lookup(&en_fr())
        .await
        .unwrap();

    let cat = repo.fetch_quiz_batch("en", 10).await.unwrap()[0].clone();
    repo.update_streak(&cat.id, 3).await.unwrap();

    let mut prompter = ScriptedPrompter::with_answers(["cat"])
        .with_rule("Use this translation", "");
    IngestPipeline::new(&repo, &dictionary, &mut prompter)
        .add_from_lookup(&en_fr())
        .await
        .unwrap();

    let cat = repo.get_term(&cat.id).await.unwrap().unwrap();
    assert_eq!(cat.streak, 3);
}
