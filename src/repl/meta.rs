/// Lines printed by `.help`.
pub const HELP_LINES: [&str; 5] = [
    "",
    "Meta-commands:",
    "  .help      Show this help",
    "  .exit      Exit the program",
    "",
];

/// Session-level commands. They start with `.` and are never echoed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaCommand<'a> {
    Exit,
    Help,
    Unrecognized(&'a str),
}

impl<'a> MetaCommand<'a> {
    /// Classifies a trimmed line that starts with `.`. Matching is exact.
    pub fn parse(line: &'a str) -> Self {
        match line {
            ".exit" => Self::Exit,
            ".help" => Self::Help,
            other => Self::Unrecognized(other),
        }
    }
}
