use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use pxld_core::record::QueryEvent;
use reqwest::blocking::Client;
use reqwest::Url;

const HTTP_TIMEOUT: Duration = Duration::from_secs(60);

/// Destination for one batch of decoded events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    /// One pretty JSON document per event.
    Stdout,
    /// The whole batch as a JSON array, replacing the file.
    File(PathBuf),
    /// The whole batch POSTed as a JSON array.
    Http(Url),
}

impl Sink {
    /// Only absolute http(s) URLs go to the network; anything else is a
    /// file path, including absolute paths.
    pub fn from_output(output: Option<&str>) -> Self {
        match output.map(str::trim) {
            None | Some("") => Sink::Stdout,
            Some(dest) => match Url::parse(dest) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => Sink::Http(url),
                _ => Sink::File(PathBuf::from(dest)),
            },
        }
    }
}

impl fmt::Display for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sink::Stdout => f.write_str("stdout"),
            Sink::File(p) => write!(f, "file:{}", p.display()),
            Sink::Http(u) => write!(f, "{}", u),
        }
    }
}

/// Writes batches to a `Sink`, holding the HTTP client across runs.
pub struct Emitter {
    sink: Sink,
    client: Option<Client>,
}

impl Emitter {
    pub fn new(sink: Sink) -> Result<Self> {
        let client = match sink {
            Sink::Http(_) => Some(
                Client::builder()
                    .timeout(HTTP_TIMEOUT)
                    .build()
                    .context("building HTTP client")?,
            ),
            _ => None,
        };
        Ok(Self { sink, client })
    }

    pub fn sink(&self) -> &Sink {
        &self.sink
    }

    pub fn emit(&self, events: &[QueryEvent]) -> Result<()> {
        match &self.sink {
            Sink::Stdout => {
                let stdout = io::stdout();
                write_pretty(&mut stdout.lock(), events).context("writing events to stdout")
            }
            Sink::File(path) => {
                let raw = serde_json::to_vec(events).context("serializing events")?;
                fs::write(path, raw).with_context(|| format!("writing events to {}", path.display()))
            }
            Sink::Http(url) => {
                let Some(client) = &self.client else {
                    bail!("HTTP sink without a client");
                };
                let res = client
                    .post(url.clone())
                    .json(events)
                    .send()
                    .with_context(|| format!("sending events to {url}"))?;
                let status = res.status();
                if status.is_client_error() || status.is_server_error() {
                    bail!("{url} answered with status {status}");
                }
                Ok(())
            }
        }
    }
}

fn write_pretty<W: Write>(out: &mut W, events: &[QueryEvent]) -> Result<()> {
    for event in events {
        writeln!(out, "{}", event)?;
    }
    out.flush()?;
    Ok(())
}
