use std::sync::Arc;

use echoassist::capture::ConsoleRecognizer;
use echoassist::config::AssistantConfig;
use echoassist::console::{parse_line, ConsoleInput, HELP};
use echoassist::dispatch::Dispatcher;
use echoassist::kernel::assistant::Assistant;
use echoassist::outputs::page::ConsolePage;
use echoassist::outputs::speech::{ConsoleEngine, ProcessEngine, SpeechEngine, Speaker};
use echoassist::prefs::{save_preference, AccessibilityPrefs, FileStore};
use echoassist::services::nlu::NluClient;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Setup Logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!("EchoAssist booting...");

    // 2. Config + persisted preferences
    let config = AssistantConfig::load()?;
    let mut prefs_store = FileStore::new(&config.prefs_path);
    let mut prefs = AccessibilityPrefs::load(&prefs_store);
    tracing::info!("Accessibility preferences: {:?}", prefs);

    // 3. Assistant wiring
    let resolver = Arc::new(NluClient::new(config.nlu_url.clone(), config.nlu_timeout()));
    tracing::info!("NLU endpoint {} (timeout {:?})", resolver.url(), config.nlu_timeout());

    let engine: Box<dyn SpeechEngine> = match config.speech.program() {
        Some(program) => Box::new(ProcessEngine::new(program)),
        None => Box::new(ConsoleEngine),
    };
    let speaker = Speaker::new(engine, config.voice.clone());
    let page = ConsolePage::new(config.sections.clone());
    let mut assistant = Assistant::new(Dispatcher::new(resolver), ConsoleRecognizer::new(), page, speaker);

    // 4. Spawn Input Reader (Stdin)
    let (tx, mut rx) = mpsc::channel::<ConsoleInput>(100);
    tokio::spawn(async move {
        let reader = BufReader::new(tokio::io::stdin());
        let mut lines = reader.lines();

        println!("{}", HELP);

        while let Ok(Some(line)) = lines.next_line().await {
            match parse_line(&line) {
                Ok(inputs) => {
                    for input in inputs {
                        if tx.send(input).await.is_err() {
                            return;
                        }
                    }
                }
                Err(e) => println!("{}", e),
            }
        }
        let _ = tx.send(ConsoleInput::Quit).await;
    });

    // 5. Run
    assistant.welcome();
    assistant.auto_greet();

    loop {
        tokio::select! {
            input = rx.recv() => match input {
                Some(ConsoleInput::Event(event)) => {
                    if let Some(dispatch) = assistant.handle_event(event).await {
                        tracing::debug!("Handled by {:?}", dispatch.route);
                    }
                }
                Some(ConsoleInput::Preference(pref, enabled)) => {
                    prefs.set(pref, enabled);
                    save_preference(&mut prefs_store, pref, enabled);
                    println!("[PREFS] {} {}", pref.name(), if enabled { "on" } else { "off" });
                }
                Some(ConsoleInput::Quit) | None => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    if assistant.session().is_listening() {
        assistant.stop_listening();
    }
    tracing::info!("EchoAssist stopped.");
    Ok(())
}
