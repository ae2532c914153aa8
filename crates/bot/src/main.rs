//! Console runner for the pricing assistant

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use carcost_bot::{console, ConsoleTransport, Router};
use carcost_config::{load_settings, ConfigStore, StatsTracker};
use carcost_core::{ChatId, ChatTransport, MessageId};
use carcost_dialog::{AdminFlow, SessionStore, UserFlow};
use carcost_engine::CalculatorRegistry;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = load_settings().context("failed to load settings")?;
    if settings.uses_default_password() {
        tracing::warn!("admin password is the built-in default; set CARCOST__ADMIN_PASSWORD");
    }

    let store =
        Arc::new(ConfigStore::new(&settings.data_dir).context("failed to open the data store")?);
    let stats = Arc::new(StatsTracker::new(Arc::clone(&store)));
    let sessions = Arc::new(SessionStore::new());
    let registry = Arc::new(CalculatorRegistry::new());
    let transport: Arc<dyn ChatTransport> = Arc::new(ConsoleTransport);

    let user = UserFlow::new(
        Arc::clone(&sessions),
        registry,
        Arc::clone(&store),
        Arc::clone(&stats),
        Arc::clone(&transport),
        Duration::from_millis(settings.result_delay_ms),
    );
    let admin = AdminFlow::new(
        Arc::clone(&sessions),
        store,
        stats,
        Arc::clone(&transport),
        settings.admin_password.clone(),
    );
    let router = Arc::new(Router::new(sessions, user, admin, transport));

    tracing::info!("ready; type /start (or /help) and press enter");

    // One console equals one chat; each line is handled off the read loop
    // so a slow dialog never blocks input.
    let chat = ChatId(0);
    let mut next_message_id = 0_i64;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        next_message_id += 1;
        let event = console::parse_line(chat, &line, MessageId(next_message_id));
        let router = Arc::clone(&router);
        tokio::spawn(async move { router.dispatch(event).await });
    }

    Ok(())
}
