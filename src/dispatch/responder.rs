use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::navigation::contains_any;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Greeting,
    Features,
    Integration,
    Accessibility,
    Pricing,
    Fallback,
}

impl Topic {
    pub const ALL: [Topic; 6] = [
        Topic::Greeting,
        Topic::Features,
        Topic::Integration,
        Topic::Accessibility,
        Topic::Pricing,
        Topic::Fallback,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Topic::Greeting => "greeting",
            Topic::Features => "features",
            Topic::Integration => "integration",
            Topic::Accessibility => "accessibility",
            Topic::Pricing => "pricing",
            Topic::Fallback => "fallback",
        }
    }

    /// Candidate responses for this topic. Never empty.
    pub fn responses(&self) -> &'static [&'static str] {
        match self {
            Topic::Greeting => &[
                "Hello! I'm EchoAssist. How can I help you today?",
                "Hi there! I'm your voice assistant. What would you like to know?",
                "Welcome to EchoAssist! I'm here to answer your questions.",
            ],
            Topic::Features => &[
                "EchoAssist offers enhanced accessibility, intelligent responses, customizable voices, and easy integration with any website.",
                "Our features include natural language processing, high-quality text-to-speech, multiple voice options, and seamless website integration.",
                "EchoAssist can make your website more accessible, provide intelligent responses to user queries, and offer a personalized experience with customizable voices.",
            ],
            Topic::Integration => &[
                "Integrating EchoAssist with your website is simple. Just add our JavaScript library to your site, configure your preferences, and you're ready to go!",
                "You can integrate EchoAssist by including our script in your HTML, customizing the settings, and initializing the assistant. We also offer API options for more advanced integrations.",
                "To add EchoAssist to your website, you'll need to include our script tag, set up your configuration options, and initialize the assistant. Our documentation provides step-by-step instructions.",
            ],
            Topic::Accessibility => &[
                "EchoAssist enhances accessibility by providing voice interaction for users with visual impairments, offering customizable speech rates and pitches, and supporting screen readers.",
                "Our accessibility features include voice commands, high-contrast mode, text size adjustments, and compatibility with assistive technologies.",
                "We prioritize accessibility with features like voice navigation, keyboard shortcuts, screen reader support, and customizable text-to-speech options.",
            ],
            Topic::Pricing => &[
                "We offer three pricing plans: Starter at $29 per month, Professional at $79 per month, and Enterprise with custom pricing. Each plan includes different voice options and query limits.",
                "Our pricing starts at $29 monthly for the Starter plan with basic features, $79 for the Professional plan with advanced features, and custom pricing for Enterprise with unlimited options.",
                "EchoAssist pricing plans include Starter, Professional, and Enterprise tiers, with increasing features and capabilities at each level. Contact us for detailed pricing information.",
            ],
            Topic::Fallback => &[
                "I'm sorry, I didn't quite understand that. Could you rephrase your question?",
                "I'm not sure I have information about that. Is there something else I can help you with?",
                "I don't have an answer for that specific question. Would you like to know about our features, integration, accessibility, or pricing?",
            ],
        }
    }
}

const KEYWORD_GROUPS: &[(Topic, &[&str])] = &[
    (Topic::Greeting, &["hello", "hi", "hey", "greetings"]),
    (
        Topic::Features,
        &["feature", "offer", "provide", "what can you do", "what does echo", "what does it do"],
    ),
    (
        Topic::Integration,
        &["integrate", "integration", "add to", "implement", "website", "install"],
    ),
    (
        Topic::Accessibility,
        &["accessibility", "accessible", "disability", "impairment", "screen reader"],
    ),
    (
        Topic::Pricing,
        &["price", "pricing", "cost", "plan", "subscription", "pay"],
    ),
];

/// Pick the topic for an utterance. Anything unmatched, including the
/// empty string, lands in `Fallback`.
pub fn classify(utterance: &str) -> Topic {
    let lowered = utterance.to_lowercase();

    KEYWORD_GROUPS
        .iter()
        .find(|(_, keywords)| contains_any(&lowered, keywords))
        .map(|(topic, _)| *topic)
        .unwrap_or(Topic::Fallback)
}

/// Uniform pick from a topic's candidates.
pub fn random_response<R: Rng + ?Sized>(topic: Topic, rng: &mut R) -> &'static str {
    let candidates = topic.responses();
    candidates
        .choose(rng)
        .copied()
        .unwrap_or(Topic::Fallback.responses()[0])
}

/// Local keyword responder. Always answers.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordResponder;

impl KeywordResponder {
    pub fn new() -> Self {
        Self
    }

    pub fn respond(&self, utterance: &str) -> (Topic, &'static str) {
        self.respond_with(utterance, &mut rand::thread_rng())
    }

    pub fn respond_with<R: Rng + ?Sized>(&self, utterance: &str, rng: &mut R) -> (Topic, &'static str) {
        let topic = classify(utterance);
        (topic, random_response(topic, rng))
    }
}

pub fn respond(utterance: &str) -> &'static str {
    KeywordResponder::new().respond(utterance).1
}
