//! End-to-end behaviour of `ChatEngine::respond`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use parley_chat::logic::{PREFERENCES, USER_NAME_KEY};
use parley_chat::{
    default_registry, ChatEngine, ChatError, FnHandler, HandlerRegistry, NoKnowledge, Reply,
    ReplyHandler, Session,
};
use parley_core::{Classification, ConversationContext, ParleyError, Utterance};
use parley_nlp::{Corpus, CorpusClassifier, IntentClassifier, RuleAnalyzer};
use serde_json::json;

// =============================================================================
// Test doubles
// =============================================================================

/// Classifier answering from a fixed sentence -> classifications table.
#[derive(Default)]
struct ScriptedClassifier {
    table: HashMap<String, Vec<Classification>>,
    seen: Mutex<Vec<String>>,
}

impl ScriptedClassifier {
    fn with(mut self, sentence: &str, intent: &str, score: f64) -> Self {
        self.table
            .entry(sentence.to_string())
            .or_default()
            .push(Classification::new(intent, score));
        self
    }

    fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl IntentClassifier for ScriptedClassifier {
    async fn process(
        &self,
        _language: &str,
        text: &str,
        _context: &mut ConversationContext,
    ) -> parley_core::Result<Utterance> {
        self.seen.lock().unwrap().push(text.to_string());
        Ok(Utterance::from_classifications(text, self.classify(text).await?))
    }

    async fn classify(&self, text: &str) -> parley_core::Result<Vec<Classification>> {
        Ok(self.table.get(text).cloned().unwrap_or_default())
    }
}

/// Classifier that fails on a given sentence.
struct FailingClassifier {
    fail_on: &'static str,
}

#[async_trait]
impl IntentClassifier for FailingClassifier {
    async fn process(
        &self,
        _language: &str,
        text: &str,
        context: &mut ConversationContext,
    ) -> parley_core::Result<Utterance> {
        if text == self.fail_on {
            return Err(ParleyError::Classifier("engine offline".to_string()));
        }
        context.set("processed", text);
        Ok(Utterance::from_classifications(
            text,
            vec![Classification::new("echo", 1.0)],
        ))
    }

    async fn classify(&self, _text: &str) -> parley_core::Result<Vec<Classification>> {
        Ok(Vec::new())
    }
}

/// Async handler counting its invocations.
struct CountingHandler {
    intent: &'static str,
    min: f64,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl ReplyHandler for CountingHandler {
    fn intent(&self) -> &str {
        self.intent
    }

    fn min_score(&self) -> f64 {
        self.min
    }

    async fn execute(&self, text: &str, _session: &mut Session) -> Result<Reply, ChatError> {
        tokio::task::yield_now().await;
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(Reply::from(format!("{} #{}", text, n)))
    }
}

fn engine(classifier: ScriptedClassifier, registry: HandlerRegistry) -> ChatEngine {
    ChatEngine::with_seed(
        Arc::new(classifier),
        Arc::new(RuleAnalyzer::new()),
        registry,
        2024,
    )
}

fn reply(intent: &str, min: f64, text: &'static str) -> FnHandler {
    FnHandler::new(intent, min, move |_, _| Ok(Reply::from(text)))
}

// =============================================================================
// Dispatch
// =============================================================================

#[tokio::test]
async fn test_no_matching_handler_gives_empty_reply() {
    let classifier = ScriptedClassifier::default().with("Hello.", "greeting", 0.1);
    let mut bot = engine(classifier, HandlerRegistry::new().with(reply("greeting", 0.2, "Hi!")));
    assert!(bot.respond("Hello.").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unclassified_sentence_gives_empty_reply() {
    let mut bot = engine(
        ScriptedClassifier::default(),
        HandlerRegistry::new().with(reply("greeting", 0.0, "Hi!")),
    );
    assert!(bot.respond("Gibberish words.").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_threshold_boundary() {
    let t = 0.4;
    let classifier = ScriptedClassifier::default()
        .with("At threshold.", "ask.state", t)
        .with("Just below.", "ask.state", t - 1e-6);
    let mut bot = engine(classifier, HandlerRegistry::new().with(reply("ask.state", t, "Fine.")));

    assert_eq!(bot.respond("At threshold.").await.unwrap(), vec!["Fine."]);
    assert!(bot.respond("Just below.").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_matching_handlers_run_in_registration_order() {
    let classifier = ScriptedClassifier::default().with("Hi.", "greeting", 0.9);
    let registry = HandlerRegistry::new()
        .with(reply("greeting", 0.2, "first"))
        .with(reply("greeting", 0.5, "second"));
    let mut bot = engine(classifier, registry);
    assert_eq!(bot.respond("Hi.").await.unwrap(), vec!["first", "second"]);
}

#[tokio::test]
async fn test_sentences_processed_in_order() {
    let classifier = ScriptedClassifier::default()
        .with("Hi!", "greeting", 0.9)
        .with("How are you?", "ask.state", 0.9)
        .with("Bye.", "goodbye", 0.9);
    let registry = HandlerRegistry::new()
        .with(reply("goodbye", 0.2, "Good bye!"))
        .with(reply("greeting", 0.2, "Hello!"))
        .with(reply("ask.state", 0.2, "I am fine."));
    let mut bot = engine(classifier, registry);

    let out = bot.respond("Hi! How are you? Bye.").await.unwrap();
    assert_eq!(out, vec!["Hello!", "I am fine.", "Good bye!"]);
}

#[tokio::test]
async fn test_async_handlers_run_sequentially() {
    let calls = Arc::new(AtomicUsize::new(0));
    let classifier = ScriptedClassifier::default().with("x", "count", 1.0);
    let registry = HandlerRegistry::new()
        .with(CountingHandler { intent: "count", min: 0.5, calls: Arc::clone(&calls) })
        .with(CountingHandler { intent: "count", min: 0.5, calls: Arc::clone(&calls) });
    let mut bot = engine(classifier, registry);

    let out = bot.respond(vec!["x".to_string()]).await.unwrap();
    assert_eq!(out, vec!["x #1", "x #2"]);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

// =============================================================================
// Input forms
// =============================================================================

#[tokio::test]
async fn test_sentence_list_is_not_resegmented() {
    let classifier = Arc::new(ScriptedClassifier::default().with("One. Two.", "x", 1.0));
    let mut bot = ChatEngine::with_seed(
        classifier.clone(),
        Arc::new(RuleAnalyzer::new()),
        HandlerRegistry::new().with(reply("x", 0.5, "ok")),
        1,
    );
    let out = bot.respond(vec!["One. Two.".to_string()]).await.unwrap();
    assert_eq!(out, vec!["ok"]);
    assert_eq!(classifier.seen(), vec!["One. Two."]);
}

#[tokio::test]
async fn test_text_is_segmented() {
    let classifier = Arc::new(ScriptedClassifier::default());
    let mut bot = ChatEngine::new(
        classifier.clone(),
        Arc::new(RuleAnalyzer::new()),
        HandlerRegistry::new(),
    );
    bot.respond("One thing. Another thing!").await.unwrap();
    assert_eq!(classifier.seen(), vec!["One thing.", "Another thing!"]);
}

#[tokio::test]
async fn test_respond_value_accepts_string_and_list() {
    let classifier = ScriptedClassifier::default().with("Hi.", "greeting", 1.0);
    let mut bot = engine(classifier, HandlerRegistry::new().with(reply("greeting", 0.2, "Hello")));
    assert_eq!(bot.respond_value(json!("Hi.")).await.unwrap(), vec!["Hello"]);
    assert_eq!(bot.respond_value(json!(["Hi.", "Hi."])).await.unwrap(), vec!["Hello", "Hello"]);
}

#[tokio::test]
async fn test_respond_value_rejects_invalid_input() {
    let mut bot = engine(ScriptedClassifier::default(), HandlerRegistry::new());
    for value in [json!(7), json!({"text": "hi"}), json!(["hi", false]), json!(null)] {
        let err = bot.respond_value(value).await.unwrap_err();
        assert!(matches!(err, ChatError::InvalidInput(_)));
    }
}

// =============================================================================
// Substitution
// =============================================================================

#[tokio::test]
async fn test_reply_variables_are_substituted() {
    let classifier = ScriptedClassifier::default().with("Hi.", "greeting", 1.0);
    let mut bot = engine(
        classifier,
        HandlerRegistry::new().with(reply("greeting", 0.2, "Hi {{user_name}}")),
    );
    bot.context_mut().set("user_name", "Ana");
    assert_eq!(bot.respond("Hi.").await.unwrap(), vec!["Hi Ana"]);
}

#[tokio::test]
async fn test_unknown_variables_are_left_alone() {
    let classifier = ScriptedClassifier::default().with("Hi.", "greeting", 1.0);
    let mut bot = engine(
        classifier,
        HandlerRegistry::new().with(reply("greeting", 0.2, "Hi {{unknown}}")),
    );
    assert_eq!(bot.respond("Hi.").await.unwrap(), vec!["Hi {{unknown}}"]);
}

#[tokio::test]
async fn test_substitution_sees_later_sentence_mutations() {
    // Substitution runs after every sentence, so a name declared in the
    // second sentence fills a template produced by the first.
    let classifier = ScriptedClassifier::default()
        .with("Hi.", "greeting", 1.0)
        .with("I am Bob.", "declare.name", 1.0);
    let registry = HandlerRegistry::new()
        .with(reply("greeting", 0.2, "Hi {{user_name}}"))
        .with(FnHandler::new("declare.name", 0.2, |_, s| {
            s.context_mut().set("user_name", "Bob");
            Ok(Reply::Silent)
        }));
    let mut bot = engine(classifier, registry);
    assert_eq!(bot.respond("Hi. I am Bob.").await.unwrap(), vec!["Hi Bob"]);
}

#[tokio::test]
async fn test_empty_replies_are_dropped() {
    let classifier = ScriptedClassifier::default().with("Hi.", "greeting", 1.0);
    let registry = HandlerRegistry::new()
        .with(reply("greeting", 0.2, ""))
        .with(reply("greeting", 0.2, "Hello"));
    let mut bot = engine(classifier, registry);
    assert_eq!(bot.respond("Hi.").await.unwrap(), vec!["Hello"]);
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_handler_failure_aborts_turn() {
    let classifier = ScriptedClassifier::default()
        .with("First.", "x", 1.0)
        .with("Second.", "y", 1.0);
    let registry = HandlerRegistry::new()
        .with(FnHandler::new("x", 0.2, |_, _| Err(ChatError::handler("x", "boom"))))
        .with(FnHandler::new("x", 0.2, |_, s| {
            s.context_mut().set("later_handler", true);
            Ok(Reply::from("never"))
        }))
        .with(FnHandler::new("y", 0.2, |_, s| {
            s.context_mut().set("second_sentence", true);
            Ok(Reply::from("never"))
        }));
    let mut bot = engine(classifier, registry);

    let err = bot.respond("First. Second.").await.unwrap_err();
    assert!(matches!(err, ChatError::Handler { ref intent, .. } if intent == "x"));
    assert!(bot.context().get("later_handler").is_none());
    assert!(bot.context().get("second_sentence").is_none());
}

#[tokio::test]
async fn test_classifier_failure_aborts_turn_and_keeps_earlier_state() {
    let mut bot = ChatEngine::with_seed(
        Arc::new(FailingClassifier { fail_on: "Second." }),
        Arc::new(RuleAnalyzer::new()),
        HandlerRegistry::new().with(reply("echo", 0.5, "echo")),
        1,
    );
    let err = bot.respond("First. Second. Third.").await.unwrap_err();
    assert!(matches!(err, ChatError::Classification(_)));
    assert_eq!(bot.context().get_str("processed"), Some("First."));
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn test_declare_name_scenario() {
    let classifier = ScriptedClassifier::default().with("Hello, my name is Ana.", "declare.name", 0.9);
    let mut bot = engine(classifier, default_registry(Arc::new(NoKnowledge)));

    let out = bot.respond("Hello, my name is Ana.").await.unwrap();
    assert!(out.is_empty());
    assert_eq!(bot.context().get_str(USER_NAME_KEY), Some("Ana"));
}

#[tokio::test]
async fn test_preference_is_remembered_across_turns() {
    let classifier = ScriptedClassifier::default().with("Do you like pizza?", "ask.preference", 0.9);
    let mut bot = engine(classifier, default_registry(Arc::new(NoKnowledge)));

    let first = bot.respond("Do you like pizza?").await.unwrap();
    assert_eq!(first.len(), 1);
    assert!(PREFERENCES.contains(&first[0].as_str()));
    assert_eq!(bot.context().last_input(), Some("Do you like pizza?"));

    let second = bot.respond("Do you like pizza?").await.unwrap();
    assert_eq!(second, first);
}

#[tokio::test]
async fn test_engines_do_not_share_context() {
    let make = || {
        engine(
            ScriptedClassifier::default().with("Hello, my name is Ana.", "declare.name", 0.9),
            default_registry(Arc::new(NoKnowledge)),
        )
    };
    let mut a = make();
    let b = make();
    a.respond("Hello, my name is Ana.").await.unwrap();
    assert_eq!(a.context().get_str(USER_NAME_KEY), Some("Ana"));
    assert!(b.context().get(USER_NAME_KEY).is_none());
    assert_ne!(a.session().id(), b.session().id());
}

#[tokio::test]
async fn test_restored_context_is_used() {
    let classifier = ScriptedClassifier::default().with("Bye.", "goodbye", 1.0);
    let mut ctx = ConversationContext::new();
    ctx.set(USER_NAME_KEY, "Ana");
    let mut bot = engine(
        classifier,
        HandlerRegistry::new().with(reply("goodbye", 0.4, "Good Bye {{user_name}}")),
    )
    .with_context(ctx);
    assert_eq!(bot.respond("Bye.").await.unwrap(), vec!["Good Bye Ana"]);
}

// =============================================================================
// Full stack
// =============================================================================

#[tokio::test]
async fn test_corpus_classifier_conversation() {
    let classifier = CorpusClassifier::train(&Corpus::builtin().unwrap()).unwrap();
    let mut bot = ChatEngine::with_seed(
        Arc::new(classifier),
        Arc::new(RuleAnalyzer::new()),
        default_registry(Arc::new(NoKnowledge)),
        7,
    )
    .with_language("en");
    assert_eq!(bot.language(), "en");
    assert_eq!(bot.registry().len(), 9);

    let out = bot.respond("My name is Ana.").await.unwrap();
    assert!(out.is_empty());
    assert_eq!(bot.context().get_str(USER_NAME_KEY), Some("Ana"));
    assert_eq!(bot.context().get_str("last_intent"), Some("declare.name"));

    let first = bot.respond("Do you like pizza?").await.unwrap();
    let again = bot.respond("do you like pizza!!").await.unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(first, again);

    let out = bot.respond("What is Rust?").await.unwrap();
    assert_eq!(out, vec!["I don't Know :("]);

    let out = bot.respond("Tell me more").await.unwrap();
    assert_eq!(out, vec!["About What?"]);

    let out = bot.respond("Bye").await.unwrap();
    assert_eq!(out.len(), 1);
    assert!(!out[0].contains("{{"));
}

#[tokio::test]
async fn test_everyday_questions_get_one_reply() {
    let classifier = Arc::new(CorpusClassifier::train(&Corpus::builtin().unwrap()).unwrap());
    for question in [
        "Is it raining?",
        "Are you a robot?",
        "Are you there?",
        "Do you like pizza?",
        "How are you?",
        "Who are you?",
        "Can you help me?",
        "Good night",
    ] {
        let mut bot = ChatEngine::with_seed(
            classifier.clone(),
            Arc::new(RuleAnalyzer::new()),
            default_registry(Arc::new(NoKnowledge)),
            3,
        );
        let out = bot.respond(question).await.unwrap();
        assert_eq!(out.len(), 1, "{question}: {out:?}");
    }
}
