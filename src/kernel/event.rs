use crate::outputs::speech::VoiceParams;

/// Inputs from the page, the recognizer, and the user.
#[derive(Debug, Clone, PartialEq)]
pub enum AssistantEvent {
    /// Floating microphone button: start when idle, stop when listening.
    MicToggled,
    StartRequested,
    StopRequested,
    /// Final transcript from the recognizer.
    Transcript(String),
    RecognitionEnded,
    RecognitionError(String),
    /// A pre-set sample question was picked.
    SampleQuestion(String),
    VoiceChanged(VoiceParams),
    /// Permission granted or page loaded.
    GreetRequested,
}
