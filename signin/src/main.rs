//! A small TUI for signing in to a learning account from the command line

/// The "functional core" to the main module's "imperative shell"
mod app;

/// Configuration and argument parsing
mod config;

use app::App;
use clap::Parser;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use signin_core::{auth::HttpAuthClient, Effect, EffectContext, FileTokenStore};
use std::{io, process::ExitCode, sync::Arc};
use tokio::{
    fs,
    sync::mpsc::{unbounded_channel, UnboundedSender},
    task::JoinHandle,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// The connections effects run against in the real app
type Context = EffectContext<HttpAuthClient, FileTokenStore>;

#[tokio::main]
async fn main() -> io::Result<ExitCode> {
    let config = config::Config::parse();

    let _log_guard = init_tracing(&config).await?;

    let ctx = Arc::new(EffectContext::new(
        HttpAuthClient::new(config.server.clone(), reqwest::Client::new()),
        FileTokenStore::new(config.data_dir()),
    ));

    let mut terminal = ratatui::init();
    terminal.clear()?;
    let res = run(terminal, App::new(config.server.clone()), ctx).await;
    ratatui::restore();
    res
}

/// Log to a file in the data directory. The terminal belongs to the UI, so
/// we can't log to stdout.
async fn init_tracing(config: &config::Config) -> io::Result<WorkerGuard> {
    let dir = config.data_dir();
    fs::create_dir_all(&dir).await?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(&dir, "signin.log"));

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();

    tracing::info!(server = %config.server, ?dir, "starting");

    Ok(guard)
}

/// Manage the lifecycle of the app
async fn run(
    mut terminal: DefaultTerminal,
    mut app: App,
    ctx: Arc<Context>,
) -> io::Result<ExitCode> {
    // Side-effectful behaviors (network and disk access, timers) take place in
    // async tasks. Once those tasks are done, we read their results off of a
    // channel. Whatever is still outstanding when we exit (a login in flight,
    // a redirect timer) is dropped along with the runtime.
    let (effect_tx, mut effect_rx) = unbounded_channel();
    let mut outstanding_effects: Vec<JoinHandle<()>> = Vec::with_capacity(2);

    terminal.draw(|frame| app.render(frame))?;

    let mut event_stream = EventStream::new();

    loop {
        // Wait for either external input or the result of an effect. This is
        // an `Option<_>` because we don't need to pay attention to every
        // single terminal event.
        let next_action_opt = tokio::select! {
            event_opt = event_stream.next() => {
                match event_opt {
                    Some(Ok(Event::Key(key_event))) => Some(app::Action::Key(key_event)),
                    Some(Err(err)) => Some(app::Action::Problem(err.to_string())),
                    _ => None,
                }
            },

            effect_opt = effect_rx.recv() => effect_opt,
        };

        if let Some(action) = next_action_opt {
            for effect in app.handle(action) {
                outstanding_effects.push(spawn_effect_task(
                    effect_tx.clone(),
                    Arc::clone(&ctx),
                    effect,
                ));
            }
        }

        terminal.draw(|frame| app.render(frame))?;

        // This list should never be long (at most a login, a save, and a
        // redirect) so a full scan is fine.
        outstanding_effects.retain(|handle| !handle.is_finished());

        if let Some(code) = app.should_exit() {
            tracing::info!(
                outstanding = outstanding_effects.len(),
                "exiting"
            );

            return Ok(code);
        }
    }
}

/// Spawn a task to run an effect and send the next action to the app.
fn spawn_effect_task(
    effect_tx: UnboundedSender<app::Action>,
    ctx: Arc<Context>,
    effect: Effect,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Some(next_action) = ctx.run(effect).await {
            // The channel only closes when we're shutting down, and then
            // nobody is around to care.
            let _ = effect_tx.send(app::Action::Form(next_action));
        }
    })
}
