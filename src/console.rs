//! Line commands for the console driver.

use crate::kernel::event::AssistantEvent;
use crate::outputs::speech::VoiceParams;
use crate::prefs::AccessibilityPref;

#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleInput {
    Event(AssistantEvent),
    Preference(AccessibilityPref, bool),
    Quit,
}

pub const HELP: &str = "Type a question to talk to EchoAssist. Commands: /mic, /stop, /greet, /ask <question>, \
/voice <rate> <pitch> [name], /pref <high-contrast|large-text|reduce-motion|screen-reader> <on|off>, /quit";

/// Translate one console line into inputs. A plain line is a full
/// single-shot capture: start, transcript, end.
pub fn parse_line(line: &str) -> Result<Vec<ConsoleInput>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Vec::new());
    }

    let Some(command) = line.strip_prefix('/') else {
        return Ok(vec![
            ConsoleInput::Event(AssistantEvent::StartRequested),
            ConsoleInput::Event(AssistantEvent::Transcript(line.to_string())),
            ConsoleInput::Event(AssistantEvent::RecognitionEnded),
        ]);
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let rest: Vec<&str> = parts.collect();

    match name {
        "mic" => Ok(vec![ConsoleInput::Event(AssistantEvent::MicToggled)]),
        "stop" => Ok(vec![ConsoleInput::Event(AssistantEvent::StopRequested)]),
        "greet" => Ok(vec![ConsoleInput::Event(AssistantEvent::GreetRequested)]),
        "quit" | "exit" => Ok(vec![ConsoleInput::Quit]),
        "ask" if !rest.is_empty() => Ok(vec![ConsoleInput::Event(AssistantEvent::SampleQuestion(
            rest.join(" "),
        ))]),
        "voice" => parse_voice(&rest).map(|voice| vec![ConsoleInput::Event(AssistantEvent::VoiceChanged(voice))]),
        "pref" => match rest.as_slice() {
            [pref, state] => {
                let pref = AccessibilityPref::from_name(pref).ok_or_else(|| format!("unknown preference '{}'", pref))?;
                let enabled = match *state {
                    "on" | "true" => true,
                    "off" | "false" => false,
                    other => return Err(format!("expected on/off, got '{}'", other)),
                };
                Ok(vec![ConsoleInput::Preference(pref, enabled)])
            }
            _ => Err("usage: /pref <name> <on|off>".to_string()),
        },
        _ => Err(format!("unknown command '/{}'", name)),
    }
}

fn parse_voice(args: &[&str]) -> Result<VoiceParams, String> {
    let [rate, pitch, name @ ..] = args else {
        return Err("usage: /voice <rate> <pitch> [name]".to_string());
    };
    let rate: f32 = rate.parse().map_err(|_| format!("invalid rate '{}'", rate))?;
    let pitch: f32 = pitch.parse().map_err(|_| format!("invalid pitch '{}'", pitch))?;
    let voice = if name.is_empty() { None } else { Some(name.join(" ")) };
    Ok(VoiceParams { voice, rate, pitch }.clamped())
}
