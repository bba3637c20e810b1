/// Mutable widget flags. Owned by the assistant; nothing else writes them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssistantSession {
    is_listening: bool,
    has_greeted: bool,
}

impl AssistantSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_listening(&self) -> bool {
        self.is_listening
    }

    pub fn has_greeted(&self) -> bool {
        self.has_greeted
    }

    /// Returns false (and changes nothing) when already listening.
    pub fn begin_listening(&mut self) -> bool {
        if self.is_listening {
            return false;
        }
        self.is_listening = true;
        true
    }

    /// Returns whether a listening session was open.
    pub fn end_listening(&mut self) -> bool {
        std::mem::replace(&mut self.is_listening, false)
    }

    /// True only the first time in a session's lifetime.
    pub fn mark_greeted(&mut self) -> bool {
        !std::mem::replace(&mut self.has_greeted, true)
    }
}
