use clap::Parser;
use futures_util::StreamExt;
use tokio::io::{AsyncBufReadExt, BufReader};
use url::Url;

use wirescope_core::Snapshot;
use wirescope_stream::{SnapshotStream, StreamEvent};
use wirescope_view::{
    BodyMode, CaptureTable, GridSink, SelectionState, decompose_query, human_bytes,
    human_duration_nanos,
};

#[derive(Debug, Parser)]
#[command(name = "wirescope-cli")]
struct Cli {
    /// Base URL of the capture backend admin interface.
    #[arg(long = "url", default_value = "http://127.0.0.1:8080/")]
    url: Url,
    /// Suppress the per-record table output.
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy)]
struct StdoutGrid {
    quiet: bool,
}

impl GridSink for StdoutGrid {
    fn append(&mut self, row: &Snapshot) {
        if !self.quiet {
            println!("{}", render_row(row));
        }
    }

    fn reset(&mut self) {
        if !self.quiet {
            println!("-- table cleared --");
        }
    }
}

fn render_row(row: &Snapshot) -> String {
    let marker = if row.has_error() {
        "x"
    } else if row.completed() {
        "*"
    } else {
        "."
    };
    let status = row
        .response
        .as_ref()
        .map(|response| response.status_code.to_string())
        .unwrap_or_else(|| "-".to_string());
    let duration = row
        .duration_nanos()
        .map(human_duration_nanos)
        .unwrap_or_else(|| row.duration.clone());
    let request_size = human_bytes(row.request.content_length);
    let response_size = row
        .response
        .as_ref()
        .map(|response| human_bytes(response.content_length))
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{marker} {id:>8}  {method:<7} {status:>4} {duration:>8} {request_size:>10} {response_size:>10}  {url}",
        id = row.id,
        method = row.request.method,
        url = row.request.url.display(),
    )
}

fn render_detail(row: &Snapshot) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {}\n",
        row.request.method,
        row.request.url.display()
    ));
    out.push_str(&format!(
        "body mode: {:?}\n",
        BodyMode::from_content_type(&row.request.content_type)
    ));
    let query = decompose_query(&row.request.url.raw_query);
    if !query.is_empty() {
        out.push_str("query:\n");
        for (key, values) in query {
            out.push_str(&format!("  {key} = {}\n", values.join(", ")));
        }
    }
    match &row.response {
        Some(response) => {
            out.push_str(&format!(
                "response: {} ({}, {:?})\n",
                response.status,
                human_bytes(response.content_length),
                BodyMode::from_content_type(&response.content_type)
            ));
        }
        None => out.push_str("response: none\n"),
    }
    out
}

#[tokio::main]
async fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut stream = SnapshotStream::connect(&cli.url)
        .await
        .map_err(|err| err.to_string())?;
    let mut events = stream.subscribe();
    let mut table = CaptureTable::new(StdoutGrid { quiet: cli.quiet });
    let mut selection = SelectionState::default();

    eprintln!("tailing {} (pause | play | clear | select <id> | show | quit)", cli.url);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            event = events.next() => match event {
                Some(StreamEvent::Snapshot(snapshot)) => {
                    let table_event = table.on_record(snapshot);
                    selection.on_table_event(table_event);
                }
                Some(StreamEvent::DecodeFailure(err)) => {
                    tracing::debug!(reason = %err.reason, "undecodable frame");
                }
                Some(StreamEvent::Closed(err)) => {
                    eprintln!("stream stopped: {err}");
                    break;
                }
                None => break,
            },
            line = lines.next_line() => {
                let Ok(Some(line)) = line else { break };
                match line.trim() {
                    "" => {}
                    "pause" => stream.pause(),
                    "play" => stream.play(),
                    "clear" => {
                        let table_event = table.clear();
                        selection.on_table_event(table_event);
                    }
                    "show" => match selection.current().and_then(|id| table.get(id)) {
                        Some(row) => print!("{}", render_detail(row)),
                        None => eprintln!("nothing selected"),
                    },
                    "quit" => break,
                    command => match command.strip_prefix("select ") {
                        Some(id) => selection.select(Some(id.trim())),
                        None => eprintln!("unknown command: {command}"),
                    },
                }
            }
        }
    }

    stream.dispose();
    Ok(())
}
