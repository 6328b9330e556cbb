use std::time::Duration;

use clap::{Parser, Subcommand};
use events::{ClientEvent, Inbound, ServerEvent};
use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid server URL: {0}")]
    InvalidServerUrl(String),
    #[error("websocket connect failed: {0}")]
    WsConnect(Box<tokio_tungstenite::tungstenite::Error>),
    #[error("websocket closed")]
    WsClosed,
    #[error("event decode failed: {0}")]
    Decode(#[from] events::CodecError),
    #[error("timed out waiting for a server event")]
    Timeout,
}

#[derive(Parser, Debug)]
#[command(name = "party-cli", about = "Party server websocket console")]
struct Cli {
    #[arg(long, env = "PARTY_SERVER_URL", default_value = "http://127.0.0.1:4000")]
    server_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Connect, request a snapshot, and print the session it describes.
    Status {
        /// Seconds to wait for the snapshot.
        #[arg(long, default_value_t = 5)]
        wait_secs: u64,
    },
    /// Ask the server to start an activity.
    Start {
        #[command(subcommand)]
        activity: StartActivity,
    },
    /// Stream server events to stdout as they arrive.
    Watch {
        /// Stop after this many events.
        #[arg(long)]
        max_events: Option<usize>,
    },
}

#[derive(Subcommand, Clone, Copy, Debug)]
enum StartActivity {
    Beats,
    Ar,
    Instruments,
    Energizer,
    /// Wind down and send everyone back to the lobby.
    Over,
}

impl StartActivity {
    fn command(self) -> ClientEvent {
        match self {
            Self::Beats => ClientEvent::RequestStartBeats,
            Self::Ar => ClientEvent::RequestStartAr,
            Self::Instruments => ClientEvent::RequestStartInstruments,
            Self::Energizer => ClientEvent::RequestStartEnergizer,
            Self::Over => ClientEvent::RequestStartOver,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let url = ws_url(&cli.server_url)?;

    match cli.command {
        Command::Status { wait_secs } => run_status(&url, wait_secs).await,
        Command::Start { activity } => run_start(&url, activity).await,
        Command::Watch { max_events } => run_watch(&url, max_events).await,
    }
}

async fn run_status(url: &str, wait_secs: u64) -> Result<(), CliError> {
    let mut stream = connect(url).await?;
    send_command(&mut stream, &ClientEvent::RequestState).await?;

    let timeout = Duration::from_secs(wait_secs);
    loop {
        if let Inbound::Event(ServerEvent::StateUpdate { state }) =
            recv_next(&mut stream, timeout).await?
        {
            println!("activity: {}", state.activity);
            println!("players:  {}", state.players.len());
            for player in &state.players {
                match &player.group {
                    Some(group) => println!("  {} ({}) group={group}", player.nickname, player.id),
                    None => println!("  {} ({})", player.nickname, player.id),
                }
            }
            match &state.groups {
                Some(groups) => println!("groups:   {}", groups.len()),
                None => println!("groups:   none"),
            }
            return Ok(());
        }
    }
}

async fn run_start(url: &str, activity: StartActivity) -> Result<(), CliError> {
    let mut stream = connect(url).await?;
    let command = activity.command();
    send_command(&mut stream, &command).await?;
    println!("sent {}", events::encode_client_event(&command));
    Ok(())
}

async fn run_watch(url: &str, max_events: Option<usize>) -> Result<(), CliError> {
    let mut stream = connect(url).await?;
    send_command(&mut stream, &ClientEvent::RequestState).await?;

    let mut seen = 0_usize;
    loop {
        let Some(message) = stream.next().await else {
            return Err(CliError::WsClosed);
        };
        match message.map_err(|error| CliError::WsConnect(Box::new(error)))? {
            Message::Text(text) => {
                match events::decode_server_event(&text) {
                    Ok(Inbound::Event(_)) => println!("{text}"),
                    Ok(Inbound::Unrecognized { tag }) => println!("{text}  # unrecognized: {tag}"),
                    Err(error) => eprintln!("undecodable frame ({error}): {text}"),
                }
                seen = seen.saturating_add(1);
                if max_events.is_some_and(|limit| seen >= limit) {
                    return Ok(());
                }
            }
            Message::Close(_) => return Err(CliError::WsClosed),
            _ => {}
        }
    }
}

/// Dial the server and register as a display so the server scopes the
/// session to this connection.
async fn connect(
    url: &str,
) -> Result<
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>,
    CliError,
> {
    let (mut stream, _) = connect_async(url)
        .await
        .map_err(|error| CliError::WsConnect(Box::new(error)))?;
    send_command(&mut stream, &ClientEvent::register_entertainer()).await?;
    Ok(stream)
}

async fn send_command(
    stream: &mut tokio_tungstenite::WebSocketStream<
        tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
    >,
    command: &ClientEvent,
) -> Result<(), CliError> {
    stream
        .send(Message::Text(events::encode_client_event(command).into()))
        .await
        .map_err(|error| CliError::WsConnect(Box::new(error)))
}

async fn recv_next(
    stream: &mut tokio_tungstenite::WebSocketStream<
        tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
    >,
    timeout: Duration,
) -> Result<Inbound, CliError> {
    let fut = async {
        loop {
            let Some(message) = stream.next().await else {
                return Err(CliError::WsClosed);
            };
            match message.map_err(|error| CliError::WsConnect(Box::new(error)))? {
                Message::Text(text) => {
                    return events::decode_server_event(&text).map_err(CliError::from);
                }
                Message::Close(_) => return Err(CliError::WsClosed),
                _ => {}
            }
        }
    };

    tokio::time::timeout(timeout, fut)
        .await
        .map_err(|_| CliError::Timeout)?
}

fn ws_url(base_url: &str) -> Result<String, CliError> {
    if let Some(rest) = base_url.strip_prefix("http://") {
        return Ok(format!("ws://{rest}/ws"));
    }
    if let Some(rest) = base_url.strip_prefix("https://") {
        return Ok(format!("wss://{rest}/ws"));
    }

    Err(CliError::InvalidServerUrl(base_url.to_owned()))
}
