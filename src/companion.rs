//! Host-facing companion
//!
//! Ties the dialogue engine, the exercise session and the dashboard counters
//! together. The host owns one `Companion` and calls it from a single event
//! loop; nothing here is shared across threads.

use crate::config::TwinConfig;
use crate::dialogue::{self, Category};
use crate::notifications::{Notice, Notification, NotificationLog};
use crate::runtime::{RandomSource, Scheduler, SessionObserver, SessionRuntime, SessionSnapshot};
use crate::session::{format_countdown, ExerciseSession, SessionStatus, TimerFired};
use crate::voice::{Accuracy, SpeechRecognizer, VoiceEvent, VoiceInput, VoiceUpdate, AUTO_SEND_DELAY};
use crate::wellness::{DashboardStats, MoodChange, WellnessCounters};
use std::time::Duration;

/// Mood notices stay up for a shorter time
const MOOD_NOTICE_DURATION_MS: u64 = 3000;

/// Something the host should render
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    PlayerOpened { title: String, description: String },
    PlayerClosed,
    Instruction(String),
    /// `MM:SS`
    Countdown(String),
    Status(SessionStatus),
    ScrollLock(bool),
    WellnessScore(u8),
    Notification(Notification),
    /// Voice input switched on or off
    Listening(bool),
    /// Transcript so far, for the message box
    VoiceDraft { text: String, accuracy: Accuracy },
}

/// One answered chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub category: Category,
    pub reply: &'static str,
    pub conversation_count: u32,
    pub mood_change: Option<MoodChange>,
}

/// A chat message the host should send after `delay`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelayedMessage {
    pub text: String,
    pub delay: Duration,
}

/// Trimmed message text, or `None` for blank input
#[must_use]
pub fn accept_message(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Presentation state the session reports into
#[derive(Default)]
struct HostState {
    counters: WellnessCounters,
    notifications: NotificationLog,
    updates: Vec<Update>,
}

impl HostState {
    fn post(&mut self, notice: Notice) {
        let notification = self.notifications.post(notice).clone();
        self.updates.push(Update::Notification(notification));
    }
}

impl SessionObserver for HostState {
    fn on_tick(&mut self, remaining_seconds: u32) {
        self.updates
            .push(Update::Countdown(format_countdown(remaining_seconds)));
    }

    fn on_instruction_change(&mut self, text: &str) {
        self.updates.push(Update::Instruction(text.to_string()));
    }

    fn on_status_change(&mut self, status: SessionStatus) {
        self.updates.push(Update::Status(status));
    }

    fn on_award_points(&mut self, points: u8) {
        if let Some(score) = self.counters.award_points(points) {
            self.updates.push(Update::WellnessScore(score));
        }
    }

    fn on_player_opened(&mut self, title: &str, description: &str) {
        self.updates.push(Update::PlayerOpened {
            title: title.to_string(),
            description: description.to_string(),
        });
    }

    fn on_player_closed(&mut self) {
        self.updates.push(Update::PlayerClosed);
    }

    fn on_scroll_lock(&mut self, locked: bool) {
        self.updates.push(Update::ScrollLock(locked));
    }

    fn on_notify(&mut self, notice: Notice) {
        self.post(notice);
    }
}

pub struct Companion<S: Scheduler, R: RandomSource> {
    config: TwinConfig,
    session: SessionRuntime<S>,
    host: HostState,
    voice: VoiceInput<Box<dyn SpeechRecognizer>>,
    rng: R,
}

impl<S: Scheduler, R: RandomSource> Companion<S, R> {
    #[must_use]
    pub fn new(config: TwinConfig, scheduler: S, rng: R) -> Self {
        Self {
            session: SessionRuntime::new(config.session, scheduler),
            config,
            host: HostState::default(),
            voice: VoiceInput::new(None),
            rng,
        }
    }

    /// Give the companion a speech capability. Without one, voice input
    /// only reports that it is unsupported.
    #[must_use]
    pub fn with_recognizer(mut self, recognizer: impl SpeechRecognizer + 'static) -> Self {
        self.voice = VoiceInput::new(Some(Box::new(recognizer)));
        self
    }

    #[must_use]
    pub fn config(&self) -> &TwinConfig {
        &self.config
    }

    /// Simulated thinking time before the next reply
    pub fn reply_delay(&mut self) -> Duration {
        self.config.reply_delay + self.config.reply_jitter.mul_f64(self.rng.next_unit())
    }

    /// Answer a chat message and count the exchange. Blank input is ignored.
    pub fn reply_to(&mut self, text: &str) -> Option<Exchange> {
        let message = accept_message(text)?;
        let category = dialogue::classify(&message);
        let reply = dialogue::respond(category, &mut self.rng);

        let record = self
            .host
            .counters
            .record_exchange(&mut self.rng, self.config.mood_change_probability);
        if let Some(change) = record.mood_change {
            self.host.post(
                Notice::info(
                    "Mood Update",
                    format!("Your mood is now {}", change.to.as_str().to_lowercase()),
                )
                .with_duration(MOOD_NOTICE_DURATION_MS),
            );
        }

        tracing::info!(
            category = %category,
            conversations = record.conversation_count,
            "Replied to message"
        );

        Some(Exchange {
            category,
            reply,
            conversation_count: record.conversation_count,
            mood_change: record.mood_change,
        })
    }

    /// Greeting posted once the user has signed in
    #[must_use]
    pub fn welcome(&self) -> String {
        format!(
            "Welcome back, {}! I'm here to support your mental wellbeing journey. How are you feeling today?",
            self.config.username
        )
    }

    // ------------------------------------------------------------------
    // Exercise session
    // ------------------------------------------------------------------

    pub fn start_exercise(&mut self, name: &str) -> SessionSnapshot {
        self.session.start(name, &mut self.host)
    }

    pub fn pause_exercise(&mut self) -> SessionSnapshot {
        self.session.pause(&mut self.host)
    }

    pub fn resume_exercise(&mut self) -> SessionSnapshot {
        self.session.resume(&mut self.host)
    }

    pub fn toggle_pause(&mut self) -> SessionSnapshot {
        self.session.toggle_pause(&mut self.host)
    }

    pub fn stop_exercise(&mut self) -> SessionSnapshot {
        self.session.stop(&mut self.host)
    }

    /// Dismiss a completed session
    pub fn acknowledge(&mut self) -> SessionSnapshot {
        self.session.acknowledge(&mut self.host)
    }

    pub fn timer_fired(&mut self, fired: TimerFired) -> SessionSnapshot {
        self.session.timer_fired(fired, &mut self.host)
    }

    #[must_use]
    pub fn session(&self) -> &ExerciseSession {
        self.session.state()
    }

    #[must_use]
    pub fn session_snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    // ------------------------------------------------------------------
    // Dashboard and notifications
    // ------------------------------------------------------------------

    #[must_use]
    pub fn dashboard(&self) -> DashboardStats {
        self.host.counters.dashboard()
    }

    #[must_use]
    pub fn notifications(&self) -> &NotificationLog {
        &self.host.notifications
    }

    /// Post a notice from outside the session (voice input, host errors)
    pub fn notify(&mut self, notice: Notice) {
        self.host.post(notice);
    }

    /// Everything to render since the last drain, oldest first
    pub fn drain_updates(&mut self) -> Vec<Update> {
        std::mem::take(&mut self.host.updates)
    }

    // ------------------------------------------------------------------
    // Voice input
    // ------------------------------------------------------------------

    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.voice.is_listening()
    }

    pub fn toggle_voice(&mut self) {
        let was_listening = self.voice.is_listening();
        let update = self.voice.toggle();
        // Toggling never produces a transcript
        self.apply_voice(was_listening, update);
    }

    /// Feed one recognizer event. A final transcript comes back as a message
    /// to send after [`AUTO_SEND_DELAY`].
    pub fn voice_event(&mut self, event: VoiceEvent) -> Option<DelayedMessage> {
        let was_listening = self.voice.is_listening();
        let update = self.voice.handle(event, &mut self.rng);
        self.apply_voice(was_listening, update)
    }

    fn apply_voice(&mut self, was_listening: bool, update: VoiceUpdate) -> Option<DelayedMessage> {
        let VoiceUpdate {
            draft,
            accuracy,
            submit,
            notice,
            listening,
        } = update;

        if listening != was_listening {
            self.host.updates.push(Update::Listening(listening));
        }
        if let (Some(text), Some(accuracy)) = (draft, accuracy) {
            self.host.updates.push(Update::VoiceDraft { text, accuracy });
        }
        if let Some(notice) = notice {
            self.host.post(notice);
        }

        submit.map(|text| DelayedMessage {
            text,
            delay: AUTO_SEND_DELAY,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::testing::{ManualScheduler, SequenceRandom};
    use crate::runtime::SystemRandom;
    use crate::session::TimerKind;
    use crate::wellness::Mood;

    fn companion<R: RandomSource>(rng: R) -> Companion<ManualScheduler, R> {
        Companion::new(TwinConfig::default(), ManualScheduler::new(), rng)
    }

    #[test]
    fn test_blank_message_rejected() {
        let mut twin = companion(SystemRandom::seeded(1));
        assert!(twin.reply_to("   \n").is_none());
        assert_eq!(twin.dashboard().conversation_count, 24);
        assert_eq!(accept_message("  hi  ").as_deref(), Some("hi"));
    }

    #[test]
    fn test_reply_counts_exchange() {
        // reply index, then mood draw below the threshold
        let mut twin = companion(SequenceRandom::new([0.0, 0.2]));
        let exchange = twin.reply_to("I'm so tired").unwrap();

        assert_eq!(exchange.category, Category::Motivation);
        assert_eq!(exchange.reply, dialogue::reply_pool(Category::Motivation)[0]);
        assert_eq!(exchange.conversation_count, 25);
        assert_eq!(exchange.mood_change, None);
        assert!(twin.notifications().is_empty());
    }

    #[test]
    fn test_mood_change_posts_notice() {
        // reply index, mood trigger, mood pick (Calm)
        let mut twin = companion(SequenceRandom::new([0.0, 0.9, 0.2]));
        let exchange = twin.reply_to("hello").unwrap();

        assert_eq!(exchange.mood_change.unwrap().to, Mood::Calm);
        let latest = twin.notifications().latest().unwrap();
        assert_eq!(latest.notice.message, "Your mood is now calm");
        assert_eq!(latest.notice.duration_ms, MOOD_NOTICE_DURATION_MS);
        assert_eq!(twin.dashboard().mood, Mood::Calm);
    }

    #[test]
    fn test_reply_delay_range() {
        let mut twin = companion(SequenceRandom::new([0.0, 0.5]));
        assert_eq!(twin.reply_delay(), Duration::from_millis(1500));
        assert_eq!(twin.reply_delay(), Duration::from_millis(2000));
    }

    #[test]
    fn test_session_points_feed_wellness_score() {
        let mut twin = companion(SystemRandom::seeded(3));
        let scheduler = twin.session.scheduler().clone();

        twin.start_exercise("Box Breathing");
        for _ in 0..300 {
            let fired = scheduler.fire(TimerKind::Tick).unwrap();
            twin.timer_fired(fired);
        }

        assert_eq!(twin.session().status, SessionStatus::Completed);
        assert_eq!(twin.dashboard().wellness_score, 92);

        let updates = twin.drain_updates();
        assert!(updates.contains(&Update::WellnessScore(92)));
        assert!(updates.contains(&Update::Countdown("00:00".to_string())));
        assert!(twin.drain_updates().is_empty());

        twin.acknowledge();
        twin.start_exercise("Box Breathing");
        twin.stop_exercise();
        assert_eq!(twin.dashboard().wellness_score, 94);
    }

    #[test]
    fn test_session_notices_are_logged() {
        let mut twin = companion(SystemRandom::seeded(4));
        twin.start_exercise("Peaceful Beach Visualization");
        twin.toggle_pause();
        twin.toggle_pause();
        twin.stop_exercise();

        let titles: Vec<_> = twin
            .notifications()
            .iter()
            .map(|n| n.notice.title.as_str())
            .collect();
        assert_eq!(
            titles,
            vec![
                "Exercise Started",
                "Exercise Paused",
                "Exercise Resumed",
                "Exercise Completed"
            ]
        );
    }

    #[test]
    fn test_welcome_uses_username() {
        let twin = companion(SystemRandom::seeded(5));
        assert!(twin.welcome().starts_with("Welcome back, DemoUser!"));
    }

    struct Dictation;

    impl SpeechRecognizer for Dictation {
        fn start(&mut self) -> Result<(), crate::voice::VoiceError> {
            Ok(())
        }

        fn stop(&mut self) -> Result<(), crate::voice::VoiceError> {
            Ok(())
        }
    }

    #[test]
    fn test_voice_unsupported_posts_notice() {
        let mut twin = companion(SystemRandom::seeded(6));
        twin.toggle_voice();

        assert!(!twin.is_listening());
        let latest = twin.notifications().latest().unwrap();
        assert_eq!(latest.notice.title, "Voice Input");
        assert!(!twin.drain_updates().contains(&Update::Listening(true)));
    }

    #[test]
    fn test_final_transcript_is_sent_as_message() {
        let mut twin = companion(SequenceRandom::new([])).with_recognizer(Dictation);
        twin.toggle_voice();
        assert!(twin.is_listening());

        let draft = twin.voice_event(VoiceEvent::Partial("I can't".to_string()));
        assert_eq!(draft, None);

        let pending = twin
            .voice_event(VoiceEvent::Final("I can't sleep".to_string()))
            .unwrap();
        assert_eq!(pending.delay, AUTO_SEND_DELAY);

        let exchange = twin.reply_to(&pending.text).unwrap();
        assert_eq!(exchange.category, Category::Sleep);
        assert_eq!(exchange.conversation_count, 25);

        let updates = twin.drain_updates();
        assert_eq!(updates[0], Update::Listening(true));
        assert!(updates.iter().any(|update| matches!(
            update,
            Update::VoiceDraft { text, .. } if text == "I can't sleep"
        )));
    }

    #[test]
    fn test_voice_error_stops_listening() {
        let mut twin = companion(SequenceRandom::new([])).with_recognizer(Dictation);
        twin.toggle_voice();
        twin.drain_updates();

        assert_eq!(twin.voice_event(VoiceEvent::Error("no-speech".to_string())), None);

        assert!(!twin.is_listening());
        assert_eq!(twin.drain_updates()[0], Update::Listening(false));
        assert_eq!(
            twin.notifications().latest().unwrap().notice.message,
            "Error: no-speech"
        );
    }
}
