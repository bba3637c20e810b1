use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::process::{Child, Command};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::SpeechError;

/// Words per minute at rate 1.0.
const BASE_WPM: f32 = 175.0;

/// How often a playing child is checked for natural exit.
const EXIT_POLL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceParams {
    /// Platform voice name. `None` uses the engine default.
    pub voice: Option<String>,
    pub rate: f32,
    pub pitch: f32,
}

impl Default for VoiceParams {
    fn default() -> Self {
        Self {
            voice: None,
            rate: 1.0,
            pitch: 1.0,
        }
    }
}

impl VoiceParams {
    /// Rate limited to 0.5..=2.0, pitch to 0.0..=2.0. NaN falls back to 1.0.
    pub fn clamped(&self) -> Self {
        let fix = |v: f32, lo: f32, hi: f32| if v.is_nan() { 1.0 } else { v.clamp(lo, hi) };
        Self {
            voice: self.voice.clone().filter(|v| !v.trim().is_empty() && v != "default"),
            rate: fix(self.rate, 0.5, 2.0),
            pitch: fix(self.pitch, 0.0, 2.0),
        }
    }
}

/// One spoken response. `ended` fires when it is cancelled or finishes.
#[derive(Debug, Clone)]
pub struct Utterance {
    pub id: Uuid,
    ended: CancellationToken,
}

impl Utterance {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            ended: CancellationToken::new(),
        }
    }

    pub fn cancel(&self) {
        self.ended.cancel();
    }

    pub fn has_ended(&self) -> bool {
        self.ended.is_cancelled()
    }

    pub fn ended_token(&self) -> CancellationToken {
        self.ended.clone()
    }
}

impl Default for Utterance {
    fn default() -> Self {
        Self::new()
    }
}

/// Platform text-to-speech. Implementations must stop audio once the
/// utterance's token is cancelled, and cancel it themselves on completion.
pub trait SpeechEngine: Send {
    fn start(&mut self, text: &str, voice: &VoiceParams, utterance: &Utterance) -> Result<(), SpeechError>;
}

impl<E: SpeechEngine + ?Sized> SpeechEngine for Box<E> {
    fn start(&mut self, text: &str, voice: &VoiceParams, utterance: &Utterance) -> Result<(), SpeechError> {
        (**self).start(text, voice, utterance)
    }
}

/// Owns at most one live utterance. A new request preempts the old one.
pub struct Speaker<E> {
    engine: E,
    voice: VoiceParams,
    current: Option<Utterance>,
}

impl<E: SpeechEngine> Speaker<E> {
    pub fn new(engine: E, voice: VoiceParams) -> Self {
        Self {
            engine,
            voice: voice.clamped(),
            current: None,
        }
    }

    pub fn speak(&mut self, text: &str) -> Option<Uuid> {
        self.cancel();

        let utterance = Utterance::new();
        match self.engine.start(text, &self.voice, &utterance) {
            Ok(()) => {
                debug!("[SPEECH-{}] '{}'", utterance.id, text);
                let id = utterance.id;
                self.current = Some(utterance);
                Some(id)
            }
            Err(e) => {
                warn!("Speech output failed: {}", e);
                None
            }
        }
    }

    pub fn cancel(&mut self) {
        if let Some(utterance) = self.current.take() {
            if !utterance.has_ended() {
                debug!("[SPEECH-{}] cancelled", utterance.id);
            }
            utterance.cancel();
        }
    }

    pub fn is_speaking(&self) -> bool {
        self.current.as_ref().is_some_and(|u| !u.has_ended())
    }

    pub fn voice(&self) -> &VoiceParams {
        &self.voice
    }

    /// Takes effect on the next `speak`.
    pub fn set_voice(&mut self, voice: VoiceParams) {
        self.voice = voice.clamped();
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TtsProgram {
    /// macOS `say`. Has no pitch control.
    Say,
    EspeakNg,
}

impl TtsProgram {
    pub fn binary(&self) -> &'static str {
        match self {
            TtsProgram::Say => "say",
            TtsProgram::EspeakNg => "espeak-ng",
        }
    }

    pub fn args(&self, text: &str, voice: &VoiceParams) -> Vec<String> {
        let voice = voice.clamped();
        let wpm = (BASE_WPM * voice.rate).round() as u32;
        let mut args = Vec::new();

        if let Some(name) = &voice.voice {
            args.push("-v".to_string());
            args.push(name.clone());
        }

        match self {
            TtsProgram::Say => {
                args.push("-r".to_string());
                args.push(wpm.to_string());
            }
            TtsProgram::EspeakNg => {
                let pitch = (50.0 * voice.pitch).round().clamp(0.0, 99.0) as u32;
                args.push("-s".to_string());
                args.push(wpm.to_string());
                args.push("-p".to_string());
                args.push(pitch.to_string());
            }
        }

        // End of options; replies may start with '-'.
        args.push("--".to_string());
        args.push(text.to_string());
        args
    }
}

/// Speaks through a child process, killed when its utterance is cancelled
/// or when the next one starts. Needs a running tokio runtime.
pub struct ProcessEngine {
    program: TtsProgram,
    playing: Option<(Uuid, Arc<Mutex<Child>>)>,
}

impl ProcessEngine {
    pub fn new(program: TtsProgram) -> Self {
        Self { program, playing: None }
    }

    /// Spawn `command` as the only live child. The previous child is sent
    /// its kill signal before the new one is spawned.
    pub fn play(&mut self, mut command: Command, utterance: &Utterance) -> Result<(), SpeechError> {
        if let Some((previous_id, previous)) = self.playing.take() {
            stop_child(&previous, previous_id);
        }

        let child = command.kill_on_drop(true).spawn().map_err(|source| SpeechError::Spawn {
            program: command.as_std().get_program().to_string_lossy().into_owned(),
            source,
        })?;
        let child = Arc::new(Mutex::new(child));
        self.playing = Some((utterance.id, Arc::clone(&child)));

        let ended = utterance.ended_token();
        let id = utterance.id;
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = ended.cancelled() => {
                        stop_child(&child, id);
                        break;
                    }
                    _ = tokio::time::sleep(EXIT_POLL) => {
                        if has_exited(&child, id) {
                            break;
                        }
                    }
                }
            }
            ended.cancel();
        });

        Ok(())
    }
}

fn has_exited(child: &Mutex<Child>, id: Uuid) -> bool {
    let Ok(mut child) = child.lock() else {
        return true;
    };
    match child.try_wait() {
        Ok(Some(_)) => true,
        Ok(None) => false,
        Err(e) => {
            warn!("[SPEECH-{}] could not poll speech process: {}", id, e);
            true
        }
    }
}

fn stop_child(child: &Mutex<Child>, id: Uuid) {
    let Ok(mut child) = child.lock() else {
        return;
    };
    if !matches!(child.try_wait(), Ok(None)) {
        return;
    }
    match child.start_kill() {
        Ok(()) => debug!("[SPEECH-{}] process killed", id),
        Err(e) => warn!("[SPEECH-{}] failed to kill speech process: {}", id, e),
    }
}

impl SpeechEngine for ProcessEngine {
    fn start(&mut self, text: &str, voice: &VoiceParams, utterance: &Utterance) -> Result<(), SpeechError> {
        let mut command = Command::new(self.program.binary());
        command.args(self.program.args(text, voice));
        self.play(command, utterance)
    }
}

/// Prints instead of speaking. Used when no TTS program is available.
#[derive(Debug, Default)]
pub struct ConsoleEngine;

impl SpeechEngine for ConsoleEngine {
    fn start(&mut self, text: &str, _voice: &VoiceParams, utterance: &Utterance) -> Result<(), SpeechError> {
        println!("[SPEECH] {}", text);
        utterance.cancel();
        Ok(())
    }
}
