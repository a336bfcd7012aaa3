#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

mod stream;

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::{Args, Parser, Subcommand, ValueEnum};
use relay::{CameraKind, CreateCameraResponse, NewCamera};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
const DEFAULT_WS_URL: &str = "ws://localhost:8000/ws/camara-directa";
const NGROK_HEADER: &str = "ngrok-skip-browser-warning";

#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("{op} failed: HTTP {status}: {message}")]
    ServerError { op: String, status: u16, message: String },
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no JPEG files in {0}")]
    NoFrames(PathBuf),
    #[error("relay: {0}")]
    Relay(#[from] relay::RelayError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("invalid timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
}

#[derive(Parser, Debug)]
#[command(name = "parking-cli", about = "SmartParking backend and live relay CLI")]
struct Cli {
    #[arg(long, env = "PARKING_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    api_base_url: String,

    #[arg(long, env = "PARKING_WS_URL", default_value = DEFAULT_WS_URL)]
    ws_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone)]
pub(crate) struct CliContext {
    pub api_base_url: String,
    pub ws_url: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Camera registry.
    Cameras(CamerasCommand),
    /// Parking records and invoices.
    Records(RecordsCommand),
    /// Backend statistics.
    Stats,
    /// Relay a remote camera and save every frame as JPEG.
    Watch(stream::WatchArgs),
    /// Stream a directory of JPEGs as a local capture source.
    Push(stream::PushArgs),
}

#[derive(Args, Debug)]
struct CamerasCommand {
    #[command(subcommand)]
    command: CamerasSubcommand,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum KindArg {
    Ip,
    Local,
}

impl From<KindArg> for CameraKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Ip => Self::Remote,
            KindArg::Local => Self::Local,
        }
    }
}

#[derive(Subcommand, Debug)]
enum CamerasSubcommand {
    List,
    Add {
        name: String,
        #[arg(long, value_enum, default_value_t = KindArg::Ip)]
        kind: KindArg,
        #[arg(long, default_value = "")]
        url: String,
    },
    Delete {
        id: i64,
    },
}

#[derive(Args, Debug)]
struct RecordsCommand {
    #[command(subcommand)]
    command: RecordsSubcommand,
}

#[derive(Subcommand, Debug)]
enum RecordsSubcommand {
    List {
        /// Filter by status, e.g. `activo` or `cerrado`.
        #[arg(long)]
        estado: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    Get {
        id: i64,
    },
    /// Close the invoice of a record.
    Close {
        record_id: i64,
        #[arg(long)]
        amount: f64,
        /// RFC 3339 exit time; defaults to now.
        #[arg(long)]
        exit_time: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let ctx = CliContext {
        api_base_url: cli.api_base_url.trim_end_matches('/').to_owned(),
        ws_url: cli.ws_url,
    };

    match cli.command {
        Command::Cameras(cameras) => run_cameras(&ctx, cameras).await,
        Command::Records(records) => run_records(&ctx, records).await,
        Command::Stats => {
            let json = api_request(&ctx, "stats", reqwest::Method::GET, "/stats", &[], None).await?;
            print_json(&json)
        }
        Command::Watch(args) => stream::run_watch(&ctx, args).await,
        Command::Push(args) => stream::run_push(&ctx, args).await,
    }
}

async fn run_cameras(ctx: &CliContext, cameras: CamerasCommand) -> Result<(), CliError> {
    match cameras.command {
        CamerasSubcommand::List => {
            let json = api_request(ctx, "list cameras", reqwest::Method::GET, "/camaras", &[], None).await?;
            print_json(&json)
        }
        CamerasSubcommand::Add { name, kind, url } => {
            let camera = NewCamera::validate(&name, kind.into(), &url)?;
            let body = serde_json::to_value(&camera)?;
            let json = api_request(ctx, "create camera", reqwest::Method::POST, "/camaras", &[], Some(body)).await?;
            match serde_json::from_value::<CreateCameraResponse>(json.clone())
                .ok()
                .and_then(|r| r.server_id())
            {
                Some(id) => eprintln!("created camera {id}"),
                None => eprintln!("camera created; server returned no id"),
            }
            print_json(&json)
        }
        CamerasSubcommand::Delete { id } => {
            let path = format!("/camaras/{id}");
            let json = api_request(ctx, "delete camera", reqwest::Method::DELETE, &path, &[], None).await?;
            print_json(&json)
        }
    }
}

async fn run_records(ctx: &CliContext, records: RecordsCommand) -> Result<(), CliError> {
    match records.command {
        RecordsSubcommand::List { estado, limit } => {
            let query = record_query(estado.as_deref(), limit);
            let json = api_request(ctx, "list records", reqwest::Method::GET, "/registros", &query, None).await?;
            print_json(&json)
        }
        RecordsSubcommand::Get { id } => {
            let path = format!("/registros/{id}");
            let json = api_request(ctx, "get record", reqwest::Method::GET, &path, &[], None).await?;
            print_json(&json)
        }
        RecordsSubcommand::Close {
            record_id,
            amount,
            exit_time,
        } => {
            let exit_time = match exit_time {
                Some(value) => value,
                None => time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339)?,
            };
            let path = format!("/facturas/{record_id}/cerrar");
            let body = serde_json::json!({ "valor_pagado": amount, "hora_salida": exit_time });
            let json = api_request(ctx, "close invoice", reqwest::Method::PATCH, &path, &[], Some(body)).await?;
            print_json(&json)
        }
    }
}

/// Query pairs for `GET /registros`; blank values are left out.
fn record_query(estado: Option<&str>, limit: Option<u32>) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if let Some(estado) = estado.map(str::trim).filter(|v| !v.is_empty()) {
        query.push(("estado", estado.to_owned()));
    }
    if let Some(limit) = limit {
        query.push(("limit", limit.to_string()));
    }
    query
}

async fn api_request(
    ctx: &CliContext,
    op: &str,
    method: reqwest::Method,
    path: &str,
    query: &[(&'static str, String)],
    body: Option<Value>,
) -> Result<Value, CliError> {
    let mut headers = HeaderMap::new();
    headers.insert(HeaderName::from_static(NGROK_HEADER), HeaderValue::from_str("true")?);

    let client = reqwest::Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(30))
        .build()?;
    let url = format!("{}{}", ctx.api_base_url, path);

    let request = client.request(method, &url).query(query);
    let request = if let Some(json) = body {
        request.json(&json)
    } else {
        request
    };

    let response = request.send().await?;
    let status = response.status();
    let value = response.json::<Value>().await.unwrap_or(Value::Null);

    if !status.is_success() {
        return Err(CliError::ServerError {
            op: op.to_owned(),
            status: status.as_u16(),
            message: value.to_string(),
        });
    }

    Ok(value)
}

pub(crate) fn now_ms() -> u64 {
    let Ok(duration) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    u64::try_from(duration.as_millis()).unwrap_or(0)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
