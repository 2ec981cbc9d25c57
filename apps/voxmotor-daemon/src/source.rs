//! Command source boundary: pull-based text commands with artifact
//! filtering and duplicate coalescing.

use std::io::{self, BufRead};

/// Supplies the next natural-language command, or `None` when the source is
/// exhausted. The caller owns de-duplication and artifact filtering.
pub trait CommandSource {
    fn next_command(&mut self) -> Option<String>;
}

/// Line-at-a-time command source for interactive use.
pub struct StdinSource {
    reader: io::Lines<io::StdinLock<'static>>,
}

impl StdinSource {
    pub fn new() -> Self {
        Self {
            reader: io::stdin().lock().lines(),
        }
    }
}

impl CommandSource for StdinSource {
    fn next_command(&mut self) -> Option<String> {
        loop {
            let line = self.reader.next()?.ok()?;
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }
}

/// Recogniser artifacts that must never reach the controller: explicit
/// blank-audio markers and bracketed non-speech tokens.
pub fn is_speech_artifact(text: &str) -> bool {
    text.contains("BLANK_AUDIO") || text.contains('(') || text.contains('[')
}

/// Coalesces a burst of identical commands into at most one dispatch.
/// Not a queue: only the immediately preceding forwarded text is remembered.
#[derive(Debug, Default)]
pub struct Debouncer {
    last: Option<String>,
}

impl Debouncer {
    /// True iff `text` differs from the last accepted command.
    pub fn accept(&mut self, text: &str) -> bool {
        if self.last.as_deref() == Some(text) {
            return false;
        }
        self.last = Some(text.to_string());
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Forward,
    Artifact,
    Duplicate,
}

/// Decide what to do with one polled text. Artifacts are dropped before the
/// debouncer sees them, so an artifact never becomes the remembered text: a
/// command repeated around an artifact is still coalesced to one dispatch.
pub fn screen_command(debouncer: &mut Debouncer, text: &str) -> Disposition {
    if is_speech_artifact(text) {
        return Disposition::Artifact;
    }
    if debouncer.accept(text) {
        Disposition::Forward
    } else {
        Disposition::Duplicate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_commands_are_coalesced() {
        let mut debouncer = Debouncer::default();
        assert!(debouncer.accept("rotate motor 1 to 90"));
        assert!(!debouncer.accept("rotate motor 1 to 90"));
        assert!(!debouncer.accept("rotate motor 1 to 90"));
    }

    #[test]
    fn test_changed_command_after_duplicate_is_accepted() {
        let mut debouncer = Debouncer::default();
        assert!(debouncer.accept("rotate motor 1 to 90"));
        assert!(!debouncer.accept("rotate motor 1 to 90"));
        assert!(debouncer.accept("stop motor 1"));
        // The original text is acceptable again once something else ran
        assert!(debouncer.accept("rotate motor 1 to 90"));
    }

    #[test]
    fn test_artifact_between_duplicates_does_not_reset_dedup() {
        let mut debouncer = Debouncer::default();
        assert_eq!(
            screen_command(&mut debouncer, "rotate motor 1 to 90"),
            Disposition::Forward
        );
        assert_eq!(screen_command(&mut debouncer, "(coughs)"), Disposition::Artifact);
        // The artifact did not become the remembered text, so the repeat is
        // still a duplicate and dispatches only once overall.
        assert_eq!(
            screen_command(&mut debouncer, "rotate motor 1 to 90"),
            Disposition::Duplicate
        );
        assert_eq!(screen_command(&mut debouncer, "stop motor 1"), Disposition::Forward);
    }

    #[test]
    fn test_artifacts_are_filtered() {
        assert!(is_speech_artifact("[BLANK_AUDIO]"));
        assert!(is_speech_artifact("(coughs)"));
        assert!(is_speech_artifact("[inaudible] rotate motor 1"));
        assert!(!is_speech_artifact("rotate motor 2 to 45 degrees"));
    }
}
