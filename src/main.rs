//! Mindful Twin - terminal host
//!
//! Reads chat messages and slash commands from stdin and renders the
//! companion's updates as text. All state lives on this task; timers and
//! delayed replies come back through channels.

use mindful_twin::companion::accept_message;
use mindful_twin::notifications::Notification;
use mindful_twin::runtime::{SystemRandom, TokioScheduler};
use mindful_twin::session::{catalog, SessionStatus};
use mindful_twin::voice::{SpeechRecognizer, VoiceError, VoiceEvent};
use mindful_twin::{Companion, TwinConfig, Update};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type Twin = Companion<TokioScheduler, SystemRandom>;

/// Notifications listed by `/notifications`
const RECENT_NOTIFICATIONS: usize = 10;

const HELP: &str = "\
Type a message to chat, or use a command:
  /exercises         list guided exercises
  /start <name|n>    start an exercise by name or menu number
  /pause /resume     pause or resume the running exercise
  /toggle            pause if running, resume if paused
  /stop              end the exercise early
  /status            show the current exercise
  /stats             dashboard as JSON
  /notifications     recent notifications
  /voice             toggle dictation: typed lines are sent as transcripts
  /help              this text
  /quit              exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command<'a> {
    Chat(&'a str),
    Exercises,
    Start(&'a str),
    Pause,
    Resume,
    Toggle,
    Stop,
    Status,
    Stats,
    Notifications,
    Voice,
    Help,
    Quit,
    Unknown(&'a str),
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Self {
        let line = line.trim();
        let Some(command) = line.strip_prefix('/') else {
            return Command::Chat(line);
        };

        let (name, arg) = command
            .split_once(char::is_whitespace)
            .map_or((command, ""), |(name, arg)| (name, arg.trim()));

        match name {
            "exercises" => Command::Exercises,
            "start" => Command::Start(arg),
            "pause" => Command::Pause,
            "resume" => Command::Resume,
            "toggle" => Command::Toggle,
            "stop" => Command::Stop,
            "status" => Command::Status,
            "stats" => Command::Stats,
            "notifications" => Command::Notifications,
            "voice" => Command::Voice,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => Command::Unknown(line),
        }
    }
}

/// Terminal stand-in for a speech capability: while listening, each typed
/// line arrives as a final transcript
struct TypedDictation;

impl SpeechRecognizer for TypedDictation {
    fn start(&mut self) -> Result<(), VoiceError> {
        Ok(())
    }

    fn stop(&mut self) -> Result<(), VoiceError> {
        Ok(())
    }
}

/// Senders that bring delayed work back to the event loop
struct Outbox {
    /// Messages whose reply is due
    reply_tx: mpsc::UnboundedSender<String>,
    /// Dictated messages to send as if typed
    send_tx: mpsc::UnboundedSender<String>,
}

/// Menu numbers are 1-based; anything else is taken as a name
fn resolve_exercise(arg: &str) -> String {
    arg.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| catalog::exercise_names().nth(i))
        .map_or_else(|| arg.to_string(), str::to_string)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mindful_twin=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = TwinConfig::from_env();
    tracing::info!(
        username = %config.username,
        session_seconds = config.session.session_seconds,
        pause_behavior = ?config.session.pause_behavior,
        "Starting companion"
    );

    let (scheduler, mut fired_rx) = TokioScheduler::new();
    let mut twin = Companion::new(config, scheduler, SystemRandom::from_entropy())
        .with_recognizer(TypedDictation);
    let (reply_tx, mut reply_rx) = mpsc::unbounded_channel::<String>();
    let (send_tx, mut send_rx) = mpsc::unbounded_channel::<String>();
    let outbox = Outbox { reply_tx, send_tx };

    println!("{}", twin.welcome());
    println!("Type /help for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match Command::parse(&line) {
                    Command::Quit => break,
                    command => handle_command(command, &mut twin, &outbox)?,
                }
            }
            Some(fired) = fired_rx.recv() => {
                twin.timer_fired(fired);
            }
            Some(message) = send_rx.recv() => {
                println!("you> {message}");
                submit_chat(&mut twin, &message, &outbox);
            }
            Some(message) = reply_rx.recv() => {
                if let Some(exchange) = twin.reply_to(&message) {
                    println!("twin> {}", exchange.reply);
                }
            }
        }

        render(&mut twin);

        // The completion screen has nothing to wait for in a terminal
        if twin.session().status == SessionStatus::Completed {
            twin.acknowledge();
            render(&mut twin);
        }
    }

    tracing::info!("Companion shut down");
    Ok(())
}

/// Deliver `message` back to the event loop after `delay`
fn send_later(tx: &mpsc::UnboundedSender<String>, message: String, delay: Duration) {
    let tx = tx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        // Receiver only closes on shutdown
        let _ = tx.send(message);
    });
}

fn submit_chat(twin: &mut Twin, text: &str, outbox: &Outbox) {
    let Some(message) = accept_message(text) else {
        return;
    };
    println!("(twin is typing...)");
    send_later(&outbox.reply_tx, message, twin.reply_delay());
}

fn handle_command(
    command: Command<'_>,
    twin: &mut Twin,
    outbox: &Outbox,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Chat(text) if twin.is_listening() => {
            if let Some(pending) = twin.voice_event(VoiceEvent::Final(text.to_string())) {
                send_later(&outbox.send_tx, pending.text, pending.delay);
            }
        }
        Command::Chat(text) => submit_chat(twin, text, outbox),
        Command::Exercises => {
            for (i, name) in catalog::exercise_names().enumerate() {
                println!("  {}. {name}", i + 1);
            }
        }
        Command::Start("") => println!("Usage: /start <name|number>"),
        Command::Start(arg) => {
            twin.start_exercise(&resolve_exercise(arg));
        }
        Command::Pause => {
            twin.pause_exercise();
        }
        Command::Resume => {
            twin.resume_exercise();
        }
        Command::Toggle => {
            twin.toggle_pause();
        }
        Command::Stop => {
            twin.stop_exercise();
        }
        Command::Status => {
            let snapshot = twin.session_snapshot();
            match snapshot.exercise {
                Some(exercise) => println!(
                    "{exercise}: {:?}, {} left, step {}",
                    snapshot.status,
                    snapshot.countdown,
                    snapshot.step_index + 1
                ),
                None => println!("No exercise in progress."),
            }
        }
        Command::Stats => {
            println!("{}", serde_json::to_string_pretty(&twin.dashboard())?);
        }
        Command::Notifications => {
            let log = twin.notifications();
            if log.is_empty() {
                println!("No notifications yet.");
            }
            for notification in log.iter().skip(log.len().saturating_sub(RECENT_NOTIFICATIONS)) {
                println!(
                    "  {} {}",
                    notification.timestamp.format("%H:%M:%S"),
                    format_notification(notification)
                );
            }
        }
        Command::Voice => twin.toggle_voice(),
        Command::Help => println!("{HELP}"),
        Command::Unknown(line) => println!("Unknown command {line}. Type /help for commands."),
        Command::Quit => {}
    }
    Ok(())
}

fn format_notification(notification: &Notification) -> String {
    format!(
        "[{}] {}: {}",
        notification.notice.kind.as_str(),
        notification.notice.title,
        notification.notice.message
    )
}

fn render(twin: &mut Twin) {
    for update in twin.drain_updates() {
        match update {
            Update::PlayerOpened { title, description } => {
                println!("== {title} ==");
                println!("{description}");
            }
            Update::PlayerClosed => println!("== exercise closed =="),
            Update::Instruction(text) => println!("  > {text}"),
            // Whole and half minutes only
            Update::Countdown(countdown) => {
                if countdown.ends_with(":00") || countdown.ends_with(":30") {
                    println!("  [{countdown}]");
                }
            }
            Update::WellnessScore(score) => println!("Wellness score: {score}%"),
            Update::Notification(notification) => {
                println!("{}", format_notification(&notification));
            }
            Update::Listening(true) => println!("(listening: type to dictate, /voice to stop)"),
            Update::Listening(false) => println!("(dictation off)"),
            Update::VoiceDraft { text, accuracy } => {
                println!("  heard: {text} ({}% accuracy)", accuracy.rounded());
            }
            Update::Status(status) => tracing::debug!(?status, "Rendered status"),
            Update::ScrollLock(locked) => tracing::debug!(locked, "Rendered scroll lock"),
        }
    }
}
