mod actors;
mod app_system;
mod clients;
mod domain;
mod error;
mod gateway;
mod messages;
mod ui;

#[cfg(test)]
mod mock_framework;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{error, info};

use crate::app_system::{setup_tracing, Args, RosterSystem};
use crate::clients::RosterClient;
use crate::gateway::{MemoryPatientGateway, RestPatientGateway};
use crate::ui::{App, Intent, RosterTerminal};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    setup_tracing(&args.log_file)?;

    info!(base_url = %args.base_url, demo = args.demo, "Starting patient roster");

    let system = if args.demo {
        RosterSystem::start(Arc::new(MemoryPatientGateway::with_demo_data()), args.mailbox_size)
    } else {
        let gateway = RestPatientGateway::new(&args.base_url, args.timeout())?;
        info!(url = gateway.collection_url(), "Using REST backend");
        RosterSystem::start(Arc::new(gateway), args.mailbox_size)
    };

    dispatch(&system.roster_client, Intent::Reload).await;

    let mut terminal = ui::setup_terminal()?;
    let result = run_app(&mut terminal, &system.roster_client).await;
    ui::restore_terminal(&mut terminal)?;

    if let Err(e) = &result {
        error!(error = %e, "Terminal loop failed");
    }
    system.shutdown().await?;
    result?;

    info!("Patient roster closed");
    Ok(())
}

async fn run_app(terminal: &mut RosterTerminal, client: &RosterClient) -> io::Result<()> {
    let mut app = App::new();

    loop {
        if let Ok(snapshot) = client.snapshot().await {
            app.sync(snapshot);
        }
        terminal.draw(|frame| ui::render(frame, &app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    if let Some(intent) = app.handle_key(key) {
                        dispatch(client, intent).await;
                    }
                }
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}

/// Forward an intent to the roster.
///
/// Editor transitions are answered right away and awaited so the next
/// snapshot already reflects them. Calls that reach the backend run on their
/// own task; their failures are logged by the roster and otherwise ignored.
async fn dispatch(client: &RosterClient, intent: Intent) {
    match intent {
        Intent::BeginAdd => {
            let _ = client.begin_add().await;
        }
        Intent::BeginEdit(id) => {
            let _ = client.begin_edit(id).await;
        }
        Intent::Cancel => {
            let _ = client.cancel().await;
        }
        Intent::Reload => {
            let client = client.clone();
            tokio::spawn(async move {
                let _ = client.load().await;
            });
        }
        Intent::Submit(values) => {
            let client = client.clone();
            tokio::spawn(async move {
                let _ = client.submit(values).await;
            });
        }
        Intent::Delete(id) => {
            let client = client.clone();
            tokio::spawn(async move {
                let _ = client.delete(id).await;
            });
        }
    }
}
