use futures::{SinkExt, StreamExt};
use group_forum_client::global_prefs::{global_prefs, init_global_prefs};
use group_forum_client::{App, AppResult, IncomingMessage, LinkEventBus, OutgoingMessage};
use chrono::Utc;
use std::{env, error::Error};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_util::codec::{Framed, LengthDelimitedCodec};
use tracing_subscriber::EnvFilter;

/// Application events
enum AppEvent {
    /// A link was put on the bus; the panel should drain its listener.
    Link,
    Server(IncomingMessage),
    Quit,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("group_forum_client=info")),
        )
        .init();

    init_global_prefs();
    let prefs = global_prefs();

    let (tx_to_server, rx_from_ui) = mpsc::unbounded_channel::<OutgoingMessage>();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();

    let bus = LinkEventBus::new();
    let mut app = App::new(tx_to_server, prefs.clone());
    app.mount(&bus);

    let server_addr = env::args().nth(1).unwrap_or_else(|| prefs.server_addr.clone());
    match TcpStream::connect(&server_addr).await {
        Ok(stream) => {
            tracing::info!("Connected to {}", server_addr);
            let server_tx = event_tx.clone();
            tokio::spawn(async move {
                if let Err(e) = run_transport(stream, rx_from_ui, server_tx).await {
                    tracing::error!("Transport closed: {}", e);
                }
            });
        }
        Err(e) => {
            tracing::warn!("Could not reach {} ({}), running offline", server_addr, e);
            tokio::spawn(drain_offline(rx_from_ui));
        }
    }

    // Each stdin line is a deep link, e.g. `group-forum/open/5`
    let link_tx = event_tx.clone();
    let link_bus = bus.clone();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let path = line.trim();
            if path == "quit" {
                break;
            }
            if path.is_empty() {
                continue;
            }
            link_bus.dispatch(path);
            if link_tx.send(AppEvent::Link).is_err() {
                return;
            }
        }
        let _ = link_tx.send(AppEvent::Quit);
    });

    drop(event_tx);

    // Main application loop
    while !app.should_quit {
        let Some(event) = event_rx.recv().await else {
            break;
        };
        match event {
            AppEvent::Link => {
                app.drain_links();
                log_panel(&app);
            }
            AppEvent::Server(msg) => {
                tracing::debug!("Server event: {}", msg.kind());
                app.handle_server_message(msg);
                log_panel(&app);
            }
            AppEvent::Quit => app.should_quit = true,
        }
    }

    app.unmount();
    Ok(())
}

/// Pump outgoing requests onto the socket and incoming frames into the loop.
async fn run_transport(
    stream: TcpStream,
    mut rx_from_ui: mpsc::UnboundedReceiver<OutgoingMessage>,
    to_app: mpsc::UnboundedSender<AppEvent>,
) -> AppResult<()> {
    let mut framed = Framed::new(stream, LengthDelimitedCodec::new());
    loop {
        tokio::select! {
            msg = rx_from_ui.recv() => {
                let Some(msg) = msg else { return Ok(()) };
                let serialized = bincode::serialize(&msg)?;
                framed.send(tokio_util::bytes::Bytes::from(serialized)).await?;
            }
            result = framed.next() => {
                match result {
                    Some(Ok(bytes)) => match bincode::deserialize::<IncomingMessage>(&bytes) {
                        Ok(msg) => {
                            if to_app.send(AppEvent::Server(msg)).is_err() {
                                return Ok(());
                            }
                        }
                        Err(e) => tracing::warn!("Skipping undecodable frame: {}", e),
                    },
                    Some(Err(e)) => return Err(e.into()),
                    None => return Ok(()),
                }
            }
        }
    }
}

/// Offline mode: requests have nowhere to go.
async fn drain_offline(mut rx_from_ui: mpsc::UnboundedReceiver<OutgoingMessage>) {
    while let Some(msg) = rx_from_ui.recv().await {
        tracing::info!("Offline, dropping {:?}", msg);
    }
}

fn log_panel<G: group_forum_client::MessageGateway>(app: &App<G>) {
    let Some(view) = app.view() else {
        tracing::info!("Forum panel {:?}", app.forum.phase());
        return;
    };
    tracing::info!(
        "[{}] {} - {} threads ({}){}",
        view.group_id,
        view.group.title,
        view.threads.len(),
        view.page_label(),
        if view.loading { " loading" } else { "" }
    );
    for (subject, posts, last_activity) in view.rows(Utc::now()) {
        tracing::info!("  {:<40} {:>4} posts  {}", subject, posts, last_activity);
    }
}
