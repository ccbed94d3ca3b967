#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Empty,
    Help,
    Quit,
    Health,
    Rules,
    ToggleDebug,
    /// Show the session id, or replace it when an argument is given.
    Session(Option<String>),
    Check(String),
    /// A known command used with missing arguments; carries the usage text.
    Usage(&'static str),
    Unknown(String),
    /// Free-form input for the agent endpoint.
    Message(String),
}

pub const HELP_TEXT: &str = "\
/check <path>   check a source file against the team rules
/rules          list the team rules
/health         ping the server
/session [id]   show or change the session id
/debug          toggle tool-call summaries from the agent
/q              quit
anything else is sent to the agent";

pub fn parse_command(input: &str) -> Command {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Command::Empty;
    }
    if matches!(trimmed, "quit" | "exit") {
        return Command::Quit;
    }
    if !trimmed.starts_with('/') {
        return Command::Message(input.trim_end_matches(['\r', '\n']).to_string());
    }

    let (name, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (trimmed, ""),
    };

    match name {
        "/q" | "/quit" => Command::Quit,
        "/help" => Command::Help,
        "/health" => Command::Health,
        "/rules" => Command::Rules,
        "/debug" => Command::ToggleDebug,
        "/session" if rest.is_empty() => Command::Session(None),
        "/session" => Command::Session(Some(rest.to_string())),
        "/check" if rest.is_empty() => Command::Usage("usage: /check <path>"),
        "/check" => Command::Check(rest.to_string()),
        _ => Command::Unknown(name.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_aliases() {
        for input in ["/q", "/quit", "quit", " exit "] {
            assert_eq!(parse_command(input), Command::Quit, "{input}");
        }
    }

    #[test]
    fn check_requires_path() {
        assert_eq!(parse_command("/check"), Command::Usage("usage: /check <path>"));
        assert_eq!(
            parse_command("/check  src/app.py "),
            Command::Check("src/app.py".to_string())
        );
    }

    #[test]
    fn session_with_and_without_argument() {
        assert_eq!(parse_command("/session"), Command::Session(None));
        assert_eq!(
            parse_command("/session team-a"),
            Command::Session(Some("team-a".to_string()))
        );
    }

    #[test]
    fn plain_text_is_a_message() {
        assert_eq!(
            parse_command("  explain PY-IMPORT-001\n"),
            Command::Message("  explain PY-IMPORT-001".to_string())
        );
        assert_eq!(parse_command("   "), Command::Empty);
    }

    #[test]
    fn unknown_slash_command_keeps_name() {
        assert_eq!(
            parse_command("/frobnicate now"),
            Command::Unknown("/frobnicate".to_string())
        );
    }
}
