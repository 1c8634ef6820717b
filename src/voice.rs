//! Voice input
//!
//! Speech recognition itself is an opaque host capability. This module keeps
//! the listening flag, turns transcript events into draft text and decides
//! when a final transcript should be sent as a chat message.

use crate::notifications::Notice;
use crate::runtime::RandomSource;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Delay between a final transcript and sending it
pub const AUTO_SEND_DELAY: Duration = Duration::from_secs(1);

/// Accuracy shown for a final transcript
const FINAL_ACCURACY: f64 = 95.0;

#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("Voice recognition is not supported on this host.")]
    Unavailable,
    #[error("Failed to start voice recognition: {0}")]
    Start(String),
    #[error("Failed to stop voice recognition: {0}")]
    Stop(String),
}

/// Host speech-recognition capability
pub trait SpeechRecognizer {
    /// Begin listening. Transcripts arrive later as [`VoiceEvent`]s.
    ///
    /// # Errors
    ///
    /// Returns [`VoiceError::Start`] when the host refuses to start, for
    /// example because microphone access was denied.
    fn start(&mut self) -> Result<(), VoiceError>;

    /// Stop listening.
    ///
    /// # Errors
    ///
    /// Returns [`VoiceError::Stop`] when the recognizer could not be shut
    /// down cleanly.
    fn stop(&mut self) -> Result<(), VoiceError>;
}

impl<T: SpeechRecognizer + ?Sized> SpeechRecognizer for Box<T> {
    fn start(&mut self) -> Result<(), VoiceError> {
        (**self).start()
    }

    fn stop(&mut self) -> Result<(), VoiceError> {
        (**self).stop()
    }
}

/// Events streamed by the recognizer while listening
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceEvent {
    Partial(String),
    Final(String),
    Error(String),
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccuracyLevel {
    High,
    Medium,
    Low,
}

/// Simulated recognition confidence, percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Accuracy {
    pub percent: f64,
    pub level: AccuracyLevel,
}

impl Accuracy {
    #[must_use]
    pub fn new(percent: f64) -> Self {
        let percent = percent.clamp(0.0, 100.0);
        let level = if percent >= 80.0 {
            AccuracyLevel::High
        } else if percent >= 60.0 {
            AccuracyLevel::Medium
        } else {
            AccuracyLevel::Low
        };
        Self { percent, level }
    }

    /// Whole percent for display
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn rounded(&self) -> u8 {
        self.percent.round() as u8
    }
}

/// What the host should change after a voice operation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VoiceUpdate {
    /// Text to place in the message box
    pub draft: Option<String>,
    pub accuracy: Option<Accuracy>,
    /// Send this as a chat message after [`AUTO_SEND_DELAY`]
    pub submit: Option<String>,
    pub notice: Option<Notice>,
    pub listening: bool,
}

/// Voice input controller over an optional recognizer
pub struct VoiceInput<R: SpeechRecognizer> {
    recognizer: Option<R>,
    listening: bool,
}

impl<R: SpeechRecognizer> VoiceInput<R> {
    /// `None` means the host has no speech capability
    #[must_use]
    pub fn new(recognizer: Option<R>) -> Self {
        Self {
            recognizer,
            listening: false,
        }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.recognizer.is_some()
    }

    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn toggle(&mut self) -> VoiceUpdate {
        if self.listening {
            self.stop()
        } else {
            self.start()
        }
    }

    pub fn start(&mut self) -> VoiceUpdate {
        let Some(recognizer) = self.recognizer.as_mut() else {
            return VoiceUpdate {
                notice: Some(Notice::warning("Voice Input", VoiceError::Unavailable.to_string())),
                ..VoiceUpdate::default()
            };
        };

        match recognizer.start() {
            Ok(()) => {
                tracing::info!("Voice recognition started");
                self.listening = true;
                VoiceUpdate {
                    listening: true,
                    ..VoiceUpdate::default()
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to start voice recognition");
                let mut update = self.stop();
                update.notice = Some(Notice::error(
                    "Voice Input",
                    "Failed to start voice recognition.",
                ));
                update
            }
        }
    }

    pub fn stop(&mut self) -> VoiceUpdate {
        if let Some(recognizer) = self.recognizer.as_mut() {
            if let Err(e) = recognizer.stop() {
                tracing::error!(error = %e, "Error stopping recognition");
            }
        }
        self.listening = false;
        VoiceUpdate::default()
    }

    /// Apply one recognizer event
    pub fn handle(&mut self, event: VoiceEvent, rng: &mut impl RandomSource) -> VoiceUpdate {
        if !self.listening {
            tracing::debug!(?event, "Voice event while not listening");
            return VoiceUpdate::default();
        }

        match event {
            VoiceEvent::Partial(text) => VoiceUpdate {
                draft: Some(text),
                accuracy: Some(Accuracy::new(50.0 + rng.next_unit() * 50.0)),
                listening: true,
                ..VoiceUpdate::default()
            },
            VoiceEvent::Final(text) => VoiceUpdate {
                draft: Some(text.clone()),
                accuracy: Some(Accuracy::new(FINAL_ACCURACY)),
                submit: Some(text),
                listening: true,
                ..VoiceUpdate::default()
            },
            VoiceEvent::Error(code) => {
                tracing::error!(error = %code, "Voice recognition error");
                let mut update = self.stop();
                update.notice = Some(Notice::error("Voice Input", format!("Error: {code}")));
                update
            }
            VoiceEvent::Ended => {
                tracing::info!("Voice recognition ended");
                self.stop()
            }
        }
    }
}
