//! Interactive commands typed during a session, one per line.

/// A user gesture read from stdin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    StartOrPause,
    Reset,
    ToggleMusic,
    ShowZones,
    Help,
    Quit,
}

impl InputCommand {
    /// Parses one input line. Returns `None` for unknown input.
    ///
    /// An empty line starts or pauses, like the big round button.
    pub fn parse(line: &str) -> Option<Self> {
        let command = match line.trim().to_lowercase().as_str() {
            "" | "p" | "start" | "pause" | "go" => Self::StartOrPause,
            "r" | "reset" => Self::Reset,
            "m" | "music" | "musique" => Self::ToggleMusic,
            "z" | "zones" => Self::ShowZones,
            "h" | "help" | "aide" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            _ => return None,
        };
        Some(command)
    }
}
