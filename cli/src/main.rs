use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process;
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use pxld_core::config::DecoderConfig;
use pxld_core::stream::decode_stream_partial;
use tracing::{debug, error, info, warn};

mod cli;
mod output;

use cli::CliArguments;
use output::{Emitter, Sink};

macro_rules! fatal {
    ($err:expr, $msg:literal) => {{
        error!(fatal = true, error = %$err, $msg);
        process::exit(1);
    }};
    ($err:expr, $msg:literal, $($key:tt = $val:expr),+) => {{
        error!(fatal = true, error = %$err, $($key = %$val),+, $msg);
        process::exit(1);
    }};
}

/// One decode-and-emit pass over the target.
struct Runner {
    target: PathBuf,
    config: DecoderConfig,
    allow_partial: bool,
    emitter: Emitter,
}

impl Runner {
    fn new(args: &CliArguments) -> Result<Self> {
        let sink = Sink::from_output(args.output.as_deref());
        Ok(Self {
            target: args.target.clone(),
            config: DecoderConfig::new(Some(args.max_record_bytes)),
            allow_partial: args.allow_partial,
            emitter: Emitter::new(sink)?,
        })
    }

    /// Returns the number of events emitted.
    fn run_once(&self) -> Result<usize> {
        let file = File::open(&self.target)
            .with_context(|| format!("opening {}", self.target.display()))?;
        let run = decode_stream_partial(BufReader::new(file), self.config);

        debug!(
            records = run.telemetry.records,
            unrouted = run.telemetry.records_unrouted,
            bytes = run.telemetry.bytes_total(),
            elapsed_ms = run.telemetry.elapsed.as_millis() as u64,
            "Decode pass finished"
        );
        for (stage, spent) in run.telemetry.stage_times.iter() {
            debug!(stage = %stage, spent_us = spent.as_micros() as u64, "Stage time");
        }

        let events = match run.error {
            None => run.events,
            Some(e) if self.allow_partial => {
                warn!(
                    error = %e,
                    kind = ?e.kind(),
                    decoded = run.events.len(),
                    "Stopped at undecodable record, emitting what was decoded"
                );
                run.events
            }
            Some(e) => {
                return Err(e).with_context(|| format!("decoding {}", self.target.display()));
            }
        };

        self.emitter.emit(&events)?;
        Ok(events.len())
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_level(true)
        .with_line_number(false)
        .init();

    let cli_args = CliArguments::parse();

    let runner = Runner::new(&cli_args)
        .unwrap_or_else(|e| fatal!(format!("{e:#}"), "Failed to prepare output"));

    info!(
        path = %cli_args.target.display(),
        sink = %runner.emitter.sink(),
        repeat = ?cli_args.repeat,
        "Starting ProxySQL query log decoder"
    );

    let Some(every) = cli_args.repeat else {
        match runner.run_once() {
            Ok(n) => info!(events = n, "Query log decoded"),
            Err(e) => fatal!(
                format!("{e:#}"),
                "Failed to decode query log",
                path = cli_args.target.display()
            ),
        }
        return;
    };

    loop {
        let next = Instant::now() + every;
        match runner.run_once() {
            Ok(n) => info!(events = n, "Query log decoded"),
            Err(e) => fatal!(
                format!("{e:#}"),
                "Failed to decode query log",
                path = cli_args.target.display()
            ),
        }
        thread::sleep(next.saturating_duration_since(Instant::now()));
    }
}
