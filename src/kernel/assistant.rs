use tracing::{error, info, warn};

use super::event::AssistantEvent;
use super::session::AssistantSession;
use crate::capture::Recognizer;
use crate::dispatch::navigation::{confirmation, missing_section, NavAction};
use crate::dispatch::responder::{random_response, Topic};
use crate::dispatch::{Action, Dispatch, Dispatcher};
use crate::outputs::page::PageSurface;
use crate::outputs::speech::{SpeechEngine, Speaker, VoiceParams};

pub const AUTO_GREETING: &str =
    "Hello! I'm EchoAssist. Click the microphone or say 'Hey Echo' to ask me something.";
pub const LISTENING_PROMPT: &str = "Listening... Speak now.";

/// The widget controller. Owns the session flags and drives the
/// recognizer, page, and speaker from incoming events.
pub struct Assistant<R, P, E> {
    session: AssistantSession,
    dispatcher: Dispatcher,
    recognizer: R,
    page: P,
    speaker: Speaker<E>,
}

impl<R, P, E> Assistant<R, P, E>
where
    R: Recognizer,
    P: PageSurface,
    E: SpeechEngine,
{
    pub fn new(dispatcher: Dispatcher, recognizer: R, page: P, speaker: Speaker<E>) -> Self {
        Self {
            session: AssistantSession::new(),
            dispatcher,
            recognizer,
            page,
            speaker,
        }
    }

    pub fn session(&self) -> &AssistantSession {
        &self.session
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn speaker(&self) -> &Speaker<E> {
        &self.speaker
    }

    pub fn recognizer(&self) -> &R {
        &self.recognizer
    }

    /// Event entry point. Returns the dispatch result when the event carried an utterance.
    pub async fn handle_event(&mut self, event: AssistantEvent) -> Option<Dispatch> {
        match event {
            AssistantEvent::MicToggled => {
                if self.session.is_listening() {
                    self.speaker.cancel();
                    self.stop_listening();
                } else {
                    self.start_listening();
                }
                None
            }
            AssistantEvent::StartRequested => {
                self.start_listening();
                None
            }
            AssistantEvent::StopRequested => {
                self.speaker.cancel();
                self.stop_listening();
                None
            }
            AssistantEvent::Transcript(text) => Some(self.handle_utterance(text.trim()).await),
            AssistantEvent::RecognitionEnded => {
                if self.session.is_listening() {
                    self.stop_listening();
                }
                None
            }
            AssistantEvent::RecognitionError(reason) => {
                self.on_recognition_error(&reason);
                None
            }
            AssistantEvent::SampleQuestion(question) => Some(self.ask_sample(question.trim()).await),
            AssistantEvent::VoiceChanged(voice) => {
                self.set_voice(voice);
                None
            }
            AssistantEvent::GreetRequested => {
                self.auto_greet();
                None
            }
        }
    }

    /// Shown (not spoken) when the widget first loads.
    pub fn welcome(&mut self) {
        let greeting = random_response(Topic::Greeting, &mut rand::thread_rng());
        self.page.show_message(greeting);
    }

    /// Speaks the introduction once per session. Returns whether it spoke.
    pub fn auto_greet(&mut self) -> bool {
        if !self.session.mark_greeted() {
            return false;
        }
        self.page.show_message(AUTO_GREETING);
        self.speaker.speak(AUTO_GREETING);
        true
    }

    /// No-op when already listening. Returns whether a new capture began.
    pub fn start_listening(&mut self) -> bool {
        if !self.session.begin_listening() {
            return false;
        }

        self.speaker.cancel();
        self.page.show_message(LISTENING_PROMPT);

        if let Err(e) = self.recognizer.start() {
            error!("Recognition start error: {}", e);
            self.stop_listening();
            return false;
        }
        info!("Listening");
        true
    }

    pub fn stop_listening(&mut self) {
        self.session.end_listening();
        if let Err(e) = self.recognizer.stop() {
            warn!("Recognition stop error: {}", e);
        }
    }

    pub fn on_recognition_error(&mut self, reason: &str) {
        error!("Speech recognition error: {}", reason);
        self.page
            .show_message(&format!("Error: {}. Please try again.", reason));
        self.stop_listening();
    }

    pub fn set_voice(&mut self, voice: VoiceParams) {
        self.speaker.set_voice(voice);
    }

    pub async fn ask_sample(&mut self, question: &str) -> Dispatch {
        self.page.show_message(&format!("You asked: \"{}\"", question));
        self.handle_utterance(question).await
    }

    /// Echo, dispatch, then apply the chosen action.
    pub async fn handle_utterance(&mut self, utterance: &str) -> Dispatch {
        self.page.show_message(&format!("You said: \"{}\"", utterance));

        let dispatch = self.dispatcher.dispatch(utterance).await;
        self.apply(&dispatch.action);
        dispatch
    }

    pub fn apply(&mut self, action: &Action) {
        match action {
            Action::Navigate(nav) => self.navigate(nav),
            Action::Say(text) => {
                self.speaker.speak(text);
            }
            Action::Answer(text) => self.announce(text),
        }
    }

    fn navigate(&mut self, nav: &NavAction) {
        match nav {
            NavAction::Section(id) if !self.page.has_section(id) => {
                warn!("Navigation target '{}' not on page", id);
                self.announce(&missing_section(id));
            }
            NavAction::Section(id) => {
                self.announce(&confirmation(nav));
                self.page.scroll_to_section(id);
            }
            NavAction::Scroll(edge) => {
                self.page.scroll_to_edge(*edge);
                self.announce(&confirmation(nav));
            }
        }
    }

    fn announce(&mut self, text: &str) {
        self.page.show_message(text);
        self.speaker.speak(text);
    }
}
