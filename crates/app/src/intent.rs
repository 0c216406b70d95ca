/// Something the player asked for on the terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    /// 0-based option index.
    Answer(usize),
    Restart,
    Quit,
}

/// Parse one input line. Options are typed 1-based.
#[must_use]
pub fn parse_intent(line: &str) -> Option<Intent> {
    match line.trim() {
        "r" | "restart" => Some(Intent::Restart),
        "q" | "quit" | "exit" => Some(Intent::Quit),
        other => other
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .map(Intent::Answer),
    }
}
