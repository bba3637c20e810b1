use std::time::Duration;

use echoassist::error::SpeechError;
use echoassist::outputs::speech::{
    ConsoleEngine, ProcessEngine, SpeechEngine, Speaker, TtsProgram, Utterance, VoiceParams,
};

#[derive(Default)]
struct RecordingEngine {
    started: Vec<Utterance>,
    refuse: bool,
}

impl SpeechEngine for RecordingEngine {
    fn start(&mut self, _text: &str, _voice: &VoiceParams, utterance: &Utterance) -> Result<(), SpeechError> {
        if self.refuse {
            return Err(SpeechError::Spawn {
                program: "say".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
            });
        }
        self.started.push(utterance.clone());
        Ok(())
    }
}

#[test]
fn test_each_speak_cancels_the_previous() {
    let mut speaker = Speaker::new(RecordingEngine::default(), VoiceParams::default());

    for text in ["one", "two", "three"] {
        assert!(speaker.speak(text).is_some());
    }

    let started = &speaker.engine().started;
    assert!(started[0].has_ended());
    assert!(started[1].has_ended());
    assert!(!started[2].has_ended());
    assert!(speaker.is_speaking());

    speaker.cancel();
    assert!(speaker.engine().started[2].has_ended());
    assert!(!speaker.is_speaking());
}

#[test]
fn test_engine_failure_leaves_speaker_idle() {
    let engine = RecordingEngine {
        refuse: true,
        ..Default::default()
    };
    let mut speaker = Speaker::new(engine, VoiceParams::default());

    assert_eq!(speaker.speak("hello"), None);
    assert!(!speaker.is_speaking());
}

#[test]
fn test_console_engine_finishes_immediately() {
    let mut speaker = Speaker::new(ConsoleEngine, VoiceParams::default());
    assert!(speaker.speak("hello").is_some());
    assert!(!speaker.is_speaking());
}

#[test]
fn test_voice_params_clamping() {
    let wild = VoiceParams {
        voice: Some("default".to_string()),
        rate: 0.1,
        pitch: f32::NAN,
    };
    let clamped = wild.clamped();
    assert_eq!(clamped.voice, None, "'default' means platform default voice");
    assert_eq!(clamped.rate, 0.5);
    assert_eq!(clamped.pitch, 1.0);

    let high = VoiceParams { voice: None, rate: 9.0, pitch: 9.0 }.clamped();
    assert_eq!(high.rate, 2.0);
    assert_eq!(high.pitch, 2.0);
}

#[test]
fn test_say_arguments() {
    let voice = VoiceParams {
        voice: Some("Samantha".to_string()),
        rate: 1.2,
        pitch: 1.5,
    };
    assert_eq!(
        TtsProgram::Say.args("Hello there", &voice),
        vec!["-v", "Samantha", "-r", "210", "--", "Hello there"]
    );
    assert_eq!(TtsProgram::Say.binary(), "say");
}

#[test]
fn test_espeak_arguments() {
    let voice = VoiceParams {
        voice: None,
        rate: 1.0,
        pitch: 2.0,
    };
    // Pitch 2.0 maps to 100, capped at espeak's 99
    assert_eq!(
        TtsProgram::EspeakNg.args("Hi", &voice),
        vec!["-s", "175", "-p", "99", "--", "Hi"]
    );
    assert_eq!(TtsProgram::EspeakNg.binary(), "espeak-ng");
}

#[test]
fn test_dash_text_stays_positional() {
    let voice = VoiceParams::default();

    assert_eq!(
        TtsProgram::Say.args("-o /tmp/x.aiff", &voice),
        vec!["-r", "175", "--", "-o /tmp/x.aiff"]
    );
    assert_eq!(
        TtsProgram::EspeakNg.args("--version", &voice),
        vec!["-s", "175", "-p", "50", "--", "--version"]
    );
}

#[cfg(unix)]
fn delayed_write(path: &std::path::Path) -> tokio::process::Command {
    let mut command = tokio::process::Command::new("sh");
    command
        .arg("-c")
        .arg(format!("sleep 0.3 && echo done > '{}'", path.display()));
    command
}

#[cfg(unix)]
#[tokio::test]
async fn test_next_process_stops_previous_before_spawning() {
    let dir = std::env::temp_dir();
    let first_path = dir.join(format!("echoassist-speech-{}", uuid::Uuid::new_v4()));
    let second_path = dir.join(format!("echoassist-speech-{}", uuid::Uuid::new_v4()));

    let mut engine = ProcessEngine::new(TtsProgram::Say);
    let first = Utterance::new();
    let second = Utterance::new();

    engine.play(delayed_write(&first_path), &first).expect("spawn first");
    engine.play(delayed_write(&second_path), &second).expect("spawn second");

    // Block the runtime thread: the first child must already be stopped
    // without its watcher task getting a chance to run.
    std::thread::sleep(Duration::from_millis(800));
    assert!(!first_path.exists(), "previous process kept running");

    tokio::time::timeout(Duration::from_secs(5), second.ended_token().cancelled())
        .await
        .expect("second process finishes");
    assert!(second_path.exists(), "current process was interrupted");
    tokio::time::timeout(Duration::from_secs(5), first.ended_token().cancelled())
        .await
        .expect("first utterance ends");

    let _ = std::fs::remove_file(&second_path);
}

#[cfg(unix)]
#[tokio::test]
async fn test_cancel_ends_process_utterance() {
    let path = std::env::temp_dir().join(format!("echoassist-speech-{}", uuid::Uuid::new_v4()));
    let mut engine = ProcessEngine::new(TtsProgram::Say);
    let utterance = Utterance::new();

    engine.play(delayed_write(&path), &utterance).expect("spawn");
    utterance.cancel();
    tokio::time::sleep(Duration::from_millis(800)).await;

    assert!(!path.exists(), "cancelled process kept running");
}
