use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use echoassist::dispatch::intent::{interpret, IntentAction, IntentResolver, StructuredIntent};
use echoassist::dispatch::jobs::{describe_jobs, lookup_jobs};
use echoassist::dispatch::navigation::{trigger_phrases, NavAction};
use echoassist::dispatch::responder::Topic;
use echoassist::dispatch::{navigation_stage, remote_stage, Action, Dispatcher, Handling, Route};
use echoassist::error::NluError;

type Reply = Box<dyn Fn() -> Result<StructuredIntent, NluError> + Send + Sync>;

struct MockResolver {
    calls: AtomicUsize,
    inputs: Mutex<Vec<String>>,
    reply: Reply,
}

impl MockResolver {
    fn new(reply: impl Fn() -> Result<StructuredIntent, NluError> + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            inputs: Mutex::new(Vec::new()),
            reply: Box::new(reply),
        })
    }

    fn failing() -> Arc<Self> {
        Self::new(|| Err(NluError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE)))
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IntentResolver for MockResolver {
    async fn resolve(&self, utterance: &str) -> Result<StructuredIntent, NluError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inputs.lock().unwrap().push(utterance.to_string());
        (self.reply)()
    }
}

fn assert_keyword_answer(action: &Action, topic: Topic) {
    match action {
        Action::Answer(text) => assert!(topic.responses().contains(&text.as_str()), "'{}' not in {:?}", text, topic),
        other => panic!("Expected keyword answer, got {:?}", other),
    }
}

#[tokio::test]
async fn test_navigation_never_calls_remote() {
    let resolver = MockResolver::failing();
    let dispatcher = Dispatcher::new(resolver.clone());

    for (phrase, expected) in trigger_phrases() {
        let dispatch = dispatcher.dispatch(&format!("Hey, {} now", phrase)).await;
        assert_eq!(dispatch.route, Route::Navigation);
        assert_eq!(dispatch.action, Action::Navigate(expected));
    }

    assert_eq!(resolver.calls(), 0, "Navigation matches must not hit the network");
}

#[tokio::test]
async fn test_exactly_one_remote_call_per_utterance() {
    let resolver = MockResolver::failing();
    let dispatcher = Dispatcher::new(resolver.clone());

    let utterances = ["hello there", "what jobs do you have in sales", "xyzzy", ""];
    for (i, utterance) in utterances.iter().enumerate() {
        dispatcher.dispatch(utterance).await;
        assert_eq!(resolver.calls(), i + 1);
    }

    // Raw utterance is forwarded untouched
    let inputs = resolver.inputs.lock().unwrap().clone();
    assert_eq!(inputs, utterances.iter().map(|s| s.to_string()).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_network_failure_falls_back_to_keywords() {
    let resolver = MockResolver::failing();
    let dispatcher = Dispatcher::new(resolver.clone());

    let dispatch = dispatcher.dispatch("Hello there").await;
    assert_eq!(dispatch.route, Route::Keyword(Topic::Greeting));
    assert_keyword_answer(&dispatch.action, Topic::Greeting);

    let dispatch = dispatcher.dispatch("xyzzy").await;
    assert_eq!(dispatch.route, Route::Keyword(Topic::Fallback));
    assert_keyword_answer(&dispatch.action, Topic::Fallback);

    // Parse failures behave the same way
    let resolver = MockResolver::new(|| Err(NluError::Parse(serde_json::from_str::<serde_json::Value>("{").unwrap_err())));
    let dispatcher = Dispatcher::new(resolver);
    let dispatch = dispatcher.dispatch("how much does it cost").await;
    assert_eq!(dispatch.route, Route::Keyword(Topic::Pricing));
}

#[tokio::test]
async fn test_query_jobs_intent() {
    let resolver = MockResolver::new(|| Ok(StructuredIntent::new("query_jobs").with_entity("category", "cs")));
    let dispatcher = Dispatcher::new(resolver);

    let dispatch = dispatcher.dispatch("any computer science jobs?").await;
    assert_eq!(dispatch.route, Route::RemoteIntent("query_jobs".to_string()));
    assert_eq!(
        dispatch.action,
        Action::Say("CS roles: Software Engineer, Data Scientist, Machine Learning Engineer".to_string())
    );
}

#[tokio::test]
async fn test_query_jobs_unknown_category_is_empty() {
    assert!(lookup_jobs("unknown").is_empty());
    assert_eq!(describe_jobs("unknown"), "There are no UNKNOWN roles.");

    let resolver = MockResolver::new(|| Ok(StructuredIntent::new("query_jobs").with_entity("category", "unknown")));
    let dispatcher = Dispatcher::new(resolver);

    let dispatch = dispatcher.dispatch("jobs in astrology").await;
    assert_eq!(dispatch.route, Route::RemoteIntent("query_jobs".to_string()));
    assert_eq!(dispatch.action, Action::Say("There are no UNKNOWN roles.".to_string()));
}

#[test]
fn test_job_table() {
    assert_eq!(lookup_jobs("cs"), ["Software Engineer", "Data Scientist", "Machine Learning Engineer"]);
    assert_eq!(lookup_jobs(" IT "), ["IT Support Specialist", "Network Administrator", "System Analyst"]);
    assert_eq!(
        describe_jobs("sales"),
        "SALES roles: Sales Representative, Account Manager, Business Development Executive"
    );
}

#[tokio::test]
async fn test_navigate_intent_uses_entity_as_section() {
    let resolver = MockResolver::new(|| Ok(StructuredIntent::new("navigate").with_entity("page", "careers")));
    let dispatcher = Dispatcher::new(resolver);

    let dispatch = dispatcher.dispatch("I want to see careers").await;
    assert_eq!(dispatch.route, Route::RemoteIntent("navigate".to_string()));
    assert_eq!(dispatch.action, Action::Navigate(NavAction::Section("careers".to_string())));
}

#[tokio::test]
async fn test_smalltalk_reply_is_spoken_verbatim() {
    let resolver = MockResolver::new(|| {
        Ok(StructuredIntent::new("smalltalk").with_reply("I'm doing well, thank you for asking! How can I assist you?"))
    });
    let dispatcher = Dispatcher::new(resolver);

    let dispatch = dispatcher.dispatch("how are you").await;
    assert_eq!(
        dispatch.action,
        Action::Say("I'm doing well, thank you for asking! How can I assist you?".to_string())
    );
}

#[tokio::test]
async fn test_unhandled_intents_fall_through() {
    let cases: Vec<fn() -> StructuredIntent> = vec![
        || StructuredIntent::new("ask_info"),
        || StructuredIntent::new("navigate"),
        || StructuredIntent::new("navigate").with_entity("page", "   "),
        || StructuredIntent::new("query_jobs"),
        || StructuredIntent::new("smalltalk"),
        || StructuredIntent::new("smalltalk").with_reply(""),
        StructuredIntent::default,
    ];

    for case in cases {
        let resolver = MockResolver::new(move || Ok(case()));
        let dispatcher = Dispatcher::new(resolver.clone());

        let dispatch = dispatcher.dispatch("what does it cost").await;
        assert_eq!(dispatch.route, Route::Keyword(Topic::Pricing), "case {:?}", case());
        assert_keyword_answer(&dispatch.action, Topic::Pricing);
        assert_eq!(resolver.calls(), 1);
    }
}

#[test]
fn test_interpret_rejects_non_string_entities() {
    let mut structured = StructuredIntent::new("query_jobs");
    structured.entities.insert("category".to_string(), serde_json::json!(42));
    assert_eq!(interpret(&structured), None);

    let structured = StructuredIntent::new("query_jobs").with_entity("category", "it");
    assert!(matches!(interpret(&structured), Some(IntentAction::Say(_))));
}

#[test]
fn test_stage_combinator() {
    assert!(navigation_stage("go to demo").is_handled());
    assert_eq!(navigation_stage("hello"), Handling::Unhandled);

    let remote = remote_stage(Err(NluError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR)));
    assert_eq!(remote, Handling::Unhandled);

    // A handled stage short-circuits the rest
    let chained = navigation_stage("go to demo").or_else(|| panic!("later stage must not run"));
    assert!(chained.is_handled());
}
