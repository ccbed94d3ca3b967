use std::io::{self, Write};

use anyhow::Context;
use rulecheck_api::{RuleCheckApiClient, RuleCheckApiConfig};
use rulecheck_cli::app::App;
use rulecheck_client::logging::init_logging;
use rulecheck_client::render::write_entry;
use rulecheck_client::{EnvConfig, Role};
use session_store::{default_state_path, FileStore, KeyValueStore, MemoryStore, SessionIdentity};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = EnvConfig::from_env();
    init_logging(env.log_filter.as_deref());

    let mut config = RuleCheckApiConfig::default().with_debug(env.debug);
    if let Some(base_url) = &env.base_url {
        config = config.with_base_url(base_url);
    }
    if let Some(language) = &env.language {
        config = config.with_language(language);
    }
    let client = RuleCheckApiClient::new(config).context("invalid RULECHECK_BASE_URL")?;

    let store: Box<dyn KeyValueStore> = match env.state_path.clone().or_else(default_state_path) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "using state file");
            Box::new(FileStore::new(path))
        }
        None => {
            tracing::warn!("no config directory; session id will not persist");
            Box::new(MemoryStore::new())
        }
    };
    let identity = SessionIdentity::restore(store);

    let mut app = App::new(client, identity, env.debug);
    let mut stdout = io::stdout();
    writeln!(
        stdout,
        "AI Code Rule Checker ({}), session {}. /help for commands, /q to quit.",
        app.backend().config().base_url,
        app.session_input()
    )?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while !app.should_exit {
        write!(stdout, "You> ")?;
        stdout.flush()?;

        let Some(line) = lines.next_line().await.context("reading stdin")? else {
            break;
        };

        let before = app.transcript.len();
        app.handle_line(&line).await;
        for entry in &app.transcript.entries()[before..] {
            if entry.role != Role::User {
                write_entry(&mut stdout, entry)?;
            }
        }
    }

    Ok(())
}
