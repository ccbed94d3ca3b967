use std::path::Path;

use rulecheck_api::{AgentReply, ApiOutcome, RuleCheckApiClient, RuleListing};
use rulecheck_client::{normalize, render_check_result, CheckResult, Role, Transcript};
use serde_json::Value;
use session_store::{KeyValueStore, SessionId, SessionIdentity};

use crate::commands::{parse_command, Command, HELP_TEXT};

/// Endpoint operations the app needs. Implemented by the HTTP client and by
/// test doubles.
#[allow(async_fn_in_trait)]
pub trait Backend {
    async fn send_agent(&self, session_id: &SessionId, input: &str) -> ApiOutcome<AgentReply>;
    async fn send_check(&self, session_id: &SessionId, code: &str) -> ApiOutcome<Value>;
    async fn fetch_rules(&self) -> ApiOutcome<RuleListing>;
    async fn ping(&self) -> ApiOutcome<bool>;
    fn set_debug(&mut self, debug: bool);
}

impl Backend for RuleCheckApiClient {
    async fn send_agent(&self, session_id: &SessionId, input: &str) -> ApiOutcome<AgentReply> {
        self.call_agent(session_id, input).await
    }

    async fn send_check(&self, session_id: &SessionId, code: &str) -> ApiOutcome<Value> {
        self.call_check(session_id, code, true, true).await
    }

    async fn fetch_rules(&self) -> ApiOutcome<RuleListing> {
        self.list_rules().await
    }

    async fn ping(&self) -> ApiOutcome<bool> {
        self.health().await
    }

    fn set_debug(&mut self, debug: bool) {
        RuleCheckApiClient::set_debug(self, debug);
    }
}

pub struct App<B, S> {
    backend: B,
    identity: SessionIdentity<S>,
    pub transcript: Transcript,
    pub debug: bool,
    pub should_exit: bool,
}

impl<B: Backend, S: KeyValueStore> App<B, S> {
    pub fn new(mut backend: B, identity: SessionIdentity<S>, debug: bool) -> Self {
        backend.set_debug(debug);
        Self {
            backend,
            identity,
            transcript: Transcript::new(),
            debug,
            should_exit: false,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn identity(&self) -> &SessionIdentity<S> {
        &self.identity
    }

    pub fn session_input(&self) -> &str {
        self.identity.current_input()
    }

    /// Handles one line of user input. Every outcome, failures included,
    /// ends up as transcript entries.
    pub async fn handle_line(&mut self, line: &str) {
        match parse_command(line) {
            Command::Empty => {}
            Command::Quit => self.should_exit = true,
            Command::Help => self.system(HELP_TEXT),
            Command::Usage(usage) => self.system(usage),
            Command::Unknown(name) => {
                self.system(format!("unknown command {name}; try /help"));
            }
            Command::ToggleDebug => {
                self.debug = !self.debug;
                self.backend.set_debug(self.debug);
                let state = if self.debug { "on" } else { "off" };
                self.system(format!("debug {state}"));
            }
            Command::Session(None) => {
                let id = self.identity.get();
                self.system(format!("session: {id}"));
            }
            Command::Session(Some(value)) => {
                self.identity.set(&value);
                let id = self.identity.get();
                self.system(format!("session: {id}"));
            }
            Command::Health => self.ping().await,
            Command::Rules => self.list_rules().await,
            Command::Check(path) => self.check_file(Path::new(&path)).await,
            Command::Message(text) => self.send_message(&text).await,
        }
    }

    async fn send_message(&mut self, text: &str) {
        let session_id = self.identity.get();
        self.transcript.push(Role::User, text);

        match self.backend.send_agent(&session_id, text).await {
            ApiOutcome::Success(reply) => {
                self.transcript.push(Role::Assistant, reply.output);
                if let Some(summary) = reply.tool_summary.filter(|steps| !steps.is_empty()) {
                    self.system(format_tool_summary(&summary));
                }
            }
            ApiOutcome::Failure { message } => {
                self.transcript.push(Role::Assistant, message);
            }
        }
    }

    async fn check_file(&mut self, path: &Path) {
        let code = match tokio::fs::read_to_string(path).await {
            Ok(code) => code,
            Err(error) => {
                self.system(format!("cannot read {}: {error}", path.display()));
                return;
            }
        };

        let session_id = self.identity.get();
        let result = match self.backend.send_check(&session_id, &code).await {
            ApiOutcome::Success(raw) => normalize(&raw),
            ApiOutcome::Failure { message } => CheckResult {
                summary: message,
                ..CheckResult::default()
            },
        };
        self.system(render_check_result(&result).trim_end().to_owned());
    }

    async fn list_rules(&mut self) {
        match self.backend.fetch_rules().await {
            ApiOutcome::Success(listing) => self.system(format_rule_listing(&listing)),
            ApiOutcome::Failure { message } => self.system(message),
        }
    }

    async fn ping(&mut self) {
        match self.backend.ping().await {
            ApiOutcome::Success(true) => self.system("server ok"),
            ApiOutcome::Success(false) => self.system("server responded but is not ok"),
            ApiOutcome::Failure { message } => self.system(message),
        }
    }

    fn system(&mut self, text: impl Into<String>) {
        self.transcript.push(Role::System, text);
    }
}

pub fn format_rule_listing(listing: &RuleListing) -> String {
    let mut out = format!("team: {}", listing.team_name);
    if !listing.members.is_empty() {
        out.push_str(&format!(" ({})", listing.members.join(", ")));
    }
    if listing.rules.is_empty() {
        out.push_str("\nno rules registered");
    }
    for rule in &listing.rules {
        let fix = if rule.auto_fix { " [auto-fix]" } else { "" };
        out.push_str(&format!("\n{} [{}] {}{fix}", rule.id, rule.language, rule.title));
    }
    out
}

fn format_tool_summary(steps: &[Value]) -> String {
    let tools: Vec<&str> = steps
        .iter()
        .map(|step| step.get("tool").and_then(Value::as_str).unwrap_or("?"))
        .collect();
    format!("tools used: {}", tools.join(", "))
}
