use tracing::debug;

use crate::error::CaptureError;

/// Single-shot, non-continuous speech capture. Transcripts arrive as
/// events; this trait only arms and disarms the recognizer.
pub trait Recognizer: Send {
    fn start(&mut self) -> Result<(), CaptureError>;
    fn stop(&mut self) -> Result<(), CaptureError>;
}

impl<R: Recognizer + ?Sized> Recognizer for Box<R> {
    fn start(&mut self) -> Result<(), CaptureError> {
        (**self).start()
    }
    fn stop(&mut self) -> Result<(), CaptureError> {
        (**self).stop()
    }
}

/// Treats each typed console line as a final transcript.
#[derive(Debug, Default)]
pub struct ConsoleRecognizer {
    running: bool,
}

impl ConsoleRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl Recognizer for ConsoleRecognizer {
    fn start(&mut self) -> Result<(), CaptureError> {
        if self.running {
            return Err(CaptureError::AlreadyStarted);
        }
        self.running = true;
        debug!("Console recognizer armed");
        Ok(())
    }

    fn stop(&mut self) -> Result<(), CaptureError> {
        if !self.running {
            return Err(CaptureError::NotRunning);
        }
        self.running = false;
        debug!("Console recognizer stopped");
        Ok(())
    }
}
