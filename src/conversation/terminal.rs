//! Terminal built-in commands.
//!
//! The terminal mode answers a handful of command words locally. `motivate`
//! goes to the collaborator with its own instruction, and anything that is
//! not a command is forwarded to the assistant as a question.

use rand::Rng;
use rand::seq::IndexedRandom;

use super::mode::Mode;

const RULE: &str = "----------------------------------------------";

const FORTUNES: &[&str] = &[
    "A quantum leap in your future awaits.",
    "The matrix will reveal hidden opportunities.",
    "Neural pathways will lead to breakthrough innovation.",
    "Your code will echo through the digital void.",
    "Holographic success patterns detected.",
];

/// Modes reachable with `cd`.
pub const CD_TARGETS: [Mode; 3] = [Mode::Art, Mode::Science, Mode::Commercial];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Status,
    Fortune,
    Motivate,
    /// `cd <target>`; `Err` carries the rejected target text.
    ChangeMode(Result<Mode, String>),
    /// Not a built-in; forwarded to the assistant.
    Ask,
}

/// Text produced locally for a built-in command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalReply {
    pub text: String,
    /// Mode the presentation layer should switch to, for a valid `cd`.
    pub navigate: Option<Mode>,
}

/// Classify a trimmed, non-empty input line. Command words are case-insensitive.
#[must_use]
pub fn parse(line: &str) -> Command {
    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or_default().to_ascii_lowercase();
    match command.as_str() {
        "help" => Command::Help,
        "status" => Command::Status,
        "fortune" => Command::Fortune,
        "motivate" => Command::Motivate,
        "cd" => {
            let target = words.next().unwrap_or_default();
            let parsed = target
                .parse::<Mode>()
                .ok()
                .filter(|mode| CD_TARGETS.contains(mode));
            Command::ChangeMode(parsed.ok_or_else(|| target.to_string()))
        }
        _ => Command::Ask,
    }
}

/// Local reply for a built-in. `None` for commands that need the collaborator.
#[must_use]
pub fn local_reply(command: &Command) -> Option<LocalReply> {
    let (text, navigate) = match command {
        Command::Help => (help_text(), None),
        Command::Status => (status_text(), None),
        Command::Fortune => (fortune_text(), None),
        Command::ChangeMode(Ok(mode)) => (change_mode_text(*mode), Some(*mode)),
        Command::ChangeMode(Err(target)) => (invalid_mode_text(target), None),
        Command::Motivate | Command::Ask => return None,
    };
    Some(LocalReply { text, navigate })
}

fn framed(title: &str, body: &str) -> String {
    format!("{title}\n{RULE}\n{body}\n{RULE}")
}

fn help_text() -> String {
    framed(
        "AVAILABLE COMMANDS:",
        "help          -> Display this help menu\n\
         cd art        -> Switch to Art Mode\n\
         cd science    -> Switch to Science Mode\n\
         cd commercial -> Switch to Commercial Mode\n\
         status        -> System diagnostic scan\n\
         fortune       -> Generate futuristic fortune\n\
         motivate      -> AI motivational message\n\
         anything else -> Ask the terminal AI",
    )
}

fn status_text() -> String {
    let mut rng = rand::rng();
    let cpu: u32 = rng.random_range(20..50);
    let memory: u32 = rng.random_range(60..100);
    let uptime: u32 = rng.random_range(100..1100);
    framed(
        "SYSTEM DIAGNOSTIC SCAN",
        &format!(
            "CPU Usage: {cpu}%\nMemory: {memory}% available\nNeural Network: ONLINE\n\
             Holographic Interface: ACTIVE\nUptime: {uptime} hours"
        ),
    )
}

fn fortune_text() -> String {
    let fortune = FORTUNES.choose(&mut rand::rng()).copied().unwrap_or_default();
    framed("FORTUNE TELLER v2.0", fortune)
}

fn change_mode_text(mode: Mode) -> String {
    framed(
        "INITIATING MODE TRANSITION...",
        &format!(
            "Switching to {} MODE...\nNeural pathways recalibrating...\nMODE CHANGE COMPLETE.",
            mode.as_str().to_ascii_uppercase()
        ),
    )
}

fn invalid_mode_text(target: &str) -> String {
    format!("ERROR: Invalid mode \"{target}\"\nAvailable modes: art, science, commercial")
}

#[cfg(test)]
#[path = "terminal_test.rs"]
mod tests;
