//! Utterance dispatch.
//!
//! Three stages are tried in order for every utterance:
//! navigation phrases, the remote NLU intent, and the local keyword
//! responder. Each stage returns a [`Handling`]; the first `Handled`
//! result wins. The keyword stage always answers, so dispatch never fails.
//!
//! Everything here decides; nothing here touches the page or the speaker.

pub mod intent;
pub mod jobs;
pub mod navigation;
pub mod responder;

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::NluError;
use intent::{interpret, IntentAction, IntentResolver, StructuredIntent};
use navigation::{match_navigation, NavAction};
use responder::{KeywordResponder, Topic};

/// Effect requested by a dispatched utterance.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Scroll, then display and speak a confirmation (or an apology).
    Navigate(NavAction),
    /// Speak only.
    Say(String),
    /// Display and speak.
    Answer(String),
}

/// Which stage produced the action.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Navigation,
    RemoteIntent(String),
    Keyword(Topic),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub route: Route,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Handling {
    Handled(Dispatch),
    Unhandled,
}

impl Handling {
    pub fn is_handled(&self) -> bool {
        matches!(self, Handling::Handled(_))
    }

    pub fn or_else(self, next: impl FnOnce() -> Handling) -> Handling {
        match self {
            Handling::Handled(dispatch) => Handling::Handled(dispatch),
            Handling::Unhandled => next(),
        }
    }

    /// Same as [`Handling::or_else`], but the next stage is only awaited when needed.
    pub async fn or_else_async<F, Fut>(self, next: F) -> Handling
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Handling>,
    {
        match self {
            Handling::Handled(dispatch) => Handling::Handled(dispatch),
            Handling::Unhandled => next().await,
        }
    }

    pub fn unwrap_or_else(self, last: impl FnOnce() -> Dispatch) -> Dispatch {
        match self {
            Handling::Handled(dispatch) => dispatch,
            Handling::Unhandled => last(),
        }
    }
}

pub fn navigation_stage(utterance: &str) -> Handling {
    match match_navigation(utterance) {
        Some(action) => Handling::Handled(Dispatch {
            route: Route::Navigation,
            action: Action::Navigate(action),
        }),
        None => Handling::Unhandled,
    }
}

/// Interpret the outcome of the NLU call. Network failures and
/// unrecognized intents are both `Unhandled`.
pub fn remote_stage(result: Result<StructuredIntent, NluError>) -> Handling {
    let structured = match result {
        Ok(structured) => structured,
        Err(e) => {
            warn!("NLU call failed, using keyword responder: {}", e);
            return Handling::Unhandled;
        }
    };

    match interpret(&structured) {
        Some(intent_action) => {
            let action = match intent_action {
                IntentAction::Navigate(nav) => Action::Navigate(nav),
                IntentAction::Say(text) => Action::Say(text),
            };
            Handling::Handled(Dispatch {
                route: Route::RemoteIntent(structured.label().to_string()),
                action,
            })
        }
        None => {
            debug!("Unhandled intent '{}' with entities {:?}", structured.label(), structured.entities);
            Handling::Unhandled
        }
    }
}

pub fn keyword_stage(responder: &KeywordResponder, utterance: &str) -> Dispatch {
    let (topic, text) = responder.respond(utterance);
    Dispatch {
        route: Route::Keyword(topic),
        action: Action::Answer(text.to_string()),
    }
}

pub struct Dispatcher {
    resolver: Arc<dyn IntentResolver>,
    responder: KeywordResponder,
}

impl Dispatcher {
    pub fn new(resolver: Arc<dyn IntentResolver>) -> Self {
        Self {
            resolver,
            responder: KeywordResponder::new(),
        }
    }

    pub async fn dispatch(&self, utterance: &str) -> Dispatch {
        let dispatch = navigation_stage(utterance)
            .or_else_async(|| async { remote_stage(self.resolver.resolve(utterance).await) })
            .await
            .unwrap_or_else(|| keyword_stage(&self.responder, utterance));

        info!("Dispatched via {:?}", dispatch.route);
        dispatch
    }
}
