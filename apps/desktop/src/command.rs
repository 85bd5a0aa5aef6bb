#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    LoadMore,
    Refetch,
    Retry,
    Quit,
}

impl Command {
    /// Parses one input line. Blank input means "load more".
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "" | "m" | "more" => Some(Self::LoadMore),
            "r" | "refetch" | "refresh" => Some(Self::Refetch),
            "x" | "retry" | "reset" => Some(Self::Retry),
            "q" | "quit" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }
}

pub const HELP: &str = "commands: [Enter]/m load more, r refetch, x/retry reset, q quit";
