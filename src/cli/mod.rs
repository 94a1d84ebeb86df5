//! Command-line commands for the resume generator binary.

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Build the crew and print its plan as JSON.
    Plan,
    /// Send a prompt through the researcher's search-augmented client.
    Ask(String),
    /// Show version information.
    Version,
}

impl std::fmt::Display for CliCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plan => write!(f, "plan"),
            Self::Ask(_) => write!(f, "ask"),
            Self::Version => write!(f, "version"),
        }
    }
}

/// Parse a CLI command from the arguments following the program name.
///
/// No arguments means `plan`. `ask` joins the remaining arguments into the
/// prompt and requires at least one non-blank word.
pub fn parse_command<S: AsRef<str>>(args: &[S]) -> Option<CliCommand> {
    let Some((cmd, rest)) = args.split_first() else {
        return Some(CliCommand::Plan);
    };
    match cmd.as_ref() {
        "plan" => Some(CliCommand::Plan),
        "ask" => {
            let prompt = rest
                .iter()
                .map(|s| s.as_ref())
                .collect::<Vec<_>>()
                .join(" ");
            if prompt.trim().is_empty() {
                None
            } else {
                Some(CliCommand::Ask(prompt))
            }
        }
        "version" | "--version" | "-v" => Some(CliCommand::Version),
        _ => None,
    }
}

/// One-line usage text.
pub fn usage(program: &str) -> String {
    format!("usage: {} [plan | ask <prompt> | version]", program)
}
