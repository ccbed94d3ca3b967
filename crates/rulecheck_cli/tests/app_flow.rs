use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::Write;

use pretty_assertions::assert_eq;
use rulecheck_api::{AgentReply, ApiOutcome, RuleListing, RuleSummary};
use rulecheck_cli::app::{App, Backend};
use rulecheck_client::Role;
use serde_json::{json, Value};
use session_store::{KeyValueStore, MemoryStore, SessionId, SessionIdentity, SESSION_STORAGE_KEY};

#[derive(Default)]
struct BackendSpy {
    agent_calls: RefCell<Vec<(String, String)>>,
    check_calls: RefCell<Vec<(String, String)>>,
    agent_replies: RefCell<VecDeque<ApiOutcome<AgentReply>>>,
    check_replies: RefCell<VecDeque<ApiOutcome<Value>>>,
    debug: Option<bool>,
}

impl BackendSpy {
    fn with_agent_reply(self, reply: ApiOutcome<AgentReply>) -> Self {
        self.agent_replies.borrow_mut().push_back(reply);
        self
    }

    fn with_check_reply(self, reply: ApiOutcome<Value>) -> Self {
        self.check_replies.borrow_mut().push_back(reply);
        self
    }
}

impl Backend for BackendSpy {
    async fn send_agent(&self, session_id: &SessionId, input: &str) -> ApiOutcome<AgentReply> {
        self.agent_calls
            .borrow_mut()
            .push((session_id.to_string(), input.to_string()));
        self.agent_replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| ApiOutcome::failure("no scripted reply"))
    }

    async fn send_check(&self, session_id: &SessionId, code: &str) -> ApiOutcome<Value> {
        self.check_calls
            .borrow_mut()
            .push((session_id.to_string(), code.to_string()));
        self.check_replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| ApiOutcome::failure("no scripted reply"))
    }

    async fn fetch_rules(&self) -> ApiOutcome<RuleListing> {
        ApiOutcome::Success(RuleListing {
            team_name: "runners".to_string(),
            members: vec!["kim".to_string(), "lee".to_string()],
            rules: vec![RuleSummary {
                id: "PY-IMPORT-001".to_string(),
                language: "python".to_string(),
                title: "Sorted imports".to_string(),
                description: String::new(),
                auto_fix: true,
            }],
        })
    }

    async fn ping(&self) -> ApiOutcome<bool> {
        ApiOutcome::Success(true)
    }

    fn set_debug(&mut self, debug: bool) {
        self.debug = Some(debug);
    }
}

fn identity_with(id: &str) -> SessionIdentity<MemoryStore> {
    let mut store = MemoryStore::new();
    store
        .set(SESSION_STORAGE_KEY, id)
        .expect("memory store set");
    SessionIdentity::restore(store)
}

fn texts<B: Backend, S: KeyValueStore>(app: &App<B, S>) -> Vec<(Role, String)> {
    app.transcript
        .entries()
        .iter()
        .map(|entry| (entry.role, entry.text.clone()))
        .collect()
}

fn reply(output: &str) -> ApiOutcome<AgentReply> {
    ApiOutcome::Success(AgentReply {
        output: output.to_string(),
        tool_summary: None,
    })
}

#[tokio::test]
async fn message_goes_to_agent_with_stored_session() {
    let backend = BackendSpy::default().with_agent_reply(reply("Imports must be sorted."));
    let mut app = App::new(backend, identity_with("team-a"), false);

    app.handle_line("what is PY-IMPORT-001?").await;

    assert_eq!(
        app.backend().agent_calls.borrow().clone(),
        vec![("team-a".to_string(), "what is PY-IMPORT-001?".to_string())]
    );
    assert_eq!(
        texts(&app),
        vec![
            (Role::User, "what is PY-IMPORT-001?".to_string()),
            (Role::Assistant, "Imports must be sorted.".to_string()),
        ]
    );
}

#[tokio::test]
async fn agent_failure_is_shown_verbatim_and_session_stays_usable() {
    let backend = BackendSpy::default()
        .with_agent_reply(ApiOutcome::failure("HTTP 502"))
        .with_agent_reply(reply("recovered"));
    let mut app = App::new(backend, identity_with("team-a"), false);

    app.handle_line("first").await;
    app.handle_line("second").await;

    assert_eq!(
        texts(&app),
        vec![
            (Role::User, "first".to_string()),
            (Role::Assistant, "HTTP 502".to_string()),
            (Role::User, "second".to_string()),
            (Role::Assistant, "recovered".to_string()),
        ]
    );
}

#[tokio::test]
async fn tool_summary_is_listed_after_reply() {
    let backend = BackendSpy::default().with_agent_reply(ApiOutcome::Success(AgentReply {
        output: "done".to_string(),
        tool_summary: Some(vec![json!({"tool": "check_code"}), json!({"tool": "add_rule"})]),
    }));
    let mut app = App::new(backend, identity_with("team-a"), true);

    app.handle_line("check this").await;

    assert_eq!(app.backend().debug, Some(true));
    assert_eq!(
        app.transcript.last().map(|entry| entry.text.as_str()),
        Some("tools used: check_code, add_rule")
    );
}

#[tokio::test]
async fn check_renders_normalized_result() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "from os import *\n").expect("write source");

    let backend = BackendSpy::default().with_check_reply(ApiOutcome::Success(json!({
        "summary": "1 violation",
        "violations": [{"rule_id": "PY-WILDCARD-001", "severity": "error", "message": "no wildcard", "start_line": 1}]
    })));
    let mut app = App::new(backend, identity_with("team-a"), false);

    app.handle_line(&format!("/check {}", file.path().display())).await;

    assert_eq!(
        app.backend().check_calls.borrow().clone(),
        vec![("team-a".to_string(), "from os import *\n".to_string())]
    );
    let last = app.transcript.last().expect("check result entry");
    assert_eq!(last.role, Role::System);
    assert!(last.text.starts_with("1 violation\n"));
    assert!(last.text.contains("PY-WILDCARD-001"));
}

#[tokio::test]
async fn failed_check_shows_message_as_summary() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "x = 1\n").expect("write source");

    let backend = BackendSpy::default().with_check_reply(ApiOutcome::failure("boom"));
    let mut app = App::new(backend, identity_with("team-a"), false);

    app.handle_line(&format!("/check {}", file.path().display())).await;

    assert_eq!(
        app.transcript.last().map(|entry| entry.text.as_str()),
        Some("boom")
    );
}

#[tokio::test]
async fn unreadable_file_does_not_call_backend() {
    let mut app = App::new(BackendSpy::default(), identity_with("team-a"), false);

    app.handle_line("/check /definitely/not/here.py").await;

    assert!(app.backend().check_calls.borrow().is_empty());
    let last = app.transcript.last().expect("error entry");
    assert!(last.text.starts_with("cannot read /definitely/not/here.py"));
}

#[tokio::test]
async fn session_command_edits_and_persists_id() {
    let mut app = App::new(BackendSpy::default(), identity_with("team-a"), false);

    app.handle_line("/session  team-b ").await;
    app.handle_line("hello").await;

    assert_eq!(
        app.transcript.entries()[0].text,
        "session: team-b".to_string()
    );
    assert_eq!(app.backend().agent_calls.borrow()[0].0, "team-b");
    assert_eq!(
        app.identity()
            .store()
            .get(SESSION_STORAGE_KEY)
            .expect("memory store get"),
        Some("team-b".to_string())
    );
}

#[tokio::test]
async fn rules_debug_and_quit_commands() {
    let mut app = App::new(BackendSpy::default(), identity_with("team-a"), false);

    app.handle_line("/rules").await;
    app.handle_line("/debug").await;
    app.handle_line("/health").await;
    app.handle_line("/q").await;

    assert_eq!(
        texts(&app),
        vec![
            (
                Role::System,
                "team: runners (kim, lee)\nPY-IMPORT-001 [python] Sorted imports [auto-fix]"
                    .to_string()
            ),
            (Role::System, "debug on".to_string()),
            (Role::System, "server ok".to_string()),
        ]
    );
    assert_eq!(app.backend().debug, Some(true));
    assert!(app.should_exit);
}

#[test]
fn raw_body_field_matches_between_transport_and_model() {
    assert_eq!(rulecheck_api::payload::RAW_TEXT_FIELD, rulecheck_client::RAW_TEXT_FIELD);
}
