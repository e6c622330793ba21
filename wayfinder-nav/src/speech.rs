//! Speech sink abstraction
//!
//! The engine pushes fire-and-forget announcement text to a sink and never
//! waits on playback; a new utterance is assumed to supersede whatever is
//! still playing. Real TTS lives outside this crate.

use crate::error::NavError;
use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::info;

/// Trait for speech output sinks
#[async_trait]
pub trait SpeechSink: Send + Sync {
    /// Speak the given text, replacing any in-flight utterance
    async fn announce(&self, text: &str) -> Result<(), NavError>;

    /// Get sink name
    fn name(&self) -> &str;
}

/// Sink that logs announcements via tracing (CLI and examples)
pub struct ConsoleSpeechSink;

#[async_trait]
impl SpeechSink for ConsoleSpeechSink {
    async fn announce(&self, text: &str) -> Result<(), NavError> {
        info!(target: "wayfinder::speech", "{}", text);
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

/// Sink that records announcements in memory (tests and demos)
#[derive(Default)]
pub struct MemorySpeechSink {
    spoken: Mutex<Vec<String>>,
}

impl MemorySpeechSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything announced so far, in order
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().clone()
    }

    /// Drain and return the recorded announcements
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.spoken.lock())
    }

    pub fn len(&self) -> usize {
        self.spoken.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.spoken.lock().is_empty()
    }
}

#[async_trait]
impl SpeechSink for MemorySpeechSink {
    async fn announce(&self, text: &str) -> Result<(), NavError> {
        self.spoken.lock().push(text.to_string());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
