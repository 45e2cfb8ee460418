use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use pxld_core::constants::DEFAULT_MAX_PAYLOAD_LEN;

#[derive(Parser, Debug, Clone)]
#[command(
    version = env!("CARGO_PKG_VERSION"),
    about = "ProxySQL query log decoder",
    long_about = "Decodes ProxySQL binary query logs into JSON, once or on an interval"
)]
pub struct CliArguments {
    /// Query log file to decode
    #[arg(short = 't', long, env = "PXLD_TARGET", value_parser = existing_file)]
    pub target: PathBuf,

    /// Where to send the decoded events: an http(s) URL (POST, 60s timeout)
    /// or a file path. Omit to print each event to stdout.
    #[arg(short = 'o', long, env = "PXLD_OUTPUT")]
    pub output: Option<String>,

    /// Decode the target again every interval, e.g. 30s, 1h30m, 1.5s, 500ms.
    /// Useful for log-rotated files.
    #[arg(short = 'r', long, env = "PXLD_REPEAT", value_parser = parse_interval)]
    pub repeat: Option<Duration>,

    /// Reject records whose declared payload is larger than this
    #[arg(long, env = "PXLD_MAX_RECORD_BYTES", default_value_t = DEFAULT_MAX_PAYLOAD_LEN)]
    pub max_record_bytes: u64,

    /// On a decode failure, emit the events decoded before it and keep going
    #[arg(long, env = "PXLD_ALLOW_PARTIAL")]
    pub allow_partial: bool,
}

fn existing_file(raw: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(raw);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("'{raw}' is not an existing file"))
    }
}

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Parse a Go-style duration: one or more `<number><unit>` terms such as
/// `1h30m`, `1.5s` or `250us`. Units are `ns`, `us`/`µs`, `ms`, `s`, `m`
/// and `h`. A bare integer is taken as seconds.
pub fn parse_interval(raw: &str) -> Result<Duration, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("interval is empty".to_string());
    }

    let nanos = if raw.bytes().all(|b| b.is_ascii_digit()) {
        let secs: u128 = raw
            .parse()
            .map_err(|_| format!("invalid interval '{raw}'"))?;
        secs.checked_mul(NANOS_PER_SEC)
            .ok_or_else(|| format!("interval '{raw}' is too large"))?
    } else {
        sum_terms(raw)?
    };

    if nanos == 0 {
        return Err("interval must be greater than zero".to_string());
    }
    let secs = u64::try_from(nanos / NANOS_PER_SEC)
        .map_err(|_| format!("interval '{raw}' is too large"))?;
    Ok(Duration::new(secs, (nanos % NANOS_PER_SEC) as u32))
}

fn sum_terms(raw: &str) -> Result<u128, String> {
    let mut total: u128 = 0;
    let mut rest = raw;

    while !rest.is_empty() {
        let num_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(num_end);
        let unit_end = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_end);

        let scale: u128 = match unit {
            "ns" => 1,
            "us" | "µs" | "μs" => 1_000,
            "ms" => 1_000_000,
            "s" => NANOS_PER_SEC,
            "m" => 60 * NANOS_PER_SEC,
            "h" => 3_600 * NANOS_PER_SEC,
            "" => return Err(format!("missing unit in interval '{raw}'")),
            other => return Err(format!("unknown interval unit '{other}' in '{raw}'")),
        };

        let term = scale_term(number, scale).ok_or_else(|| format!("invalid interval '{raw}'"))?;
        total = total
            .checked_add(term)
            .ok_or_else(|| format!("interval '{raw}' is too large"))?;
        rest = tail;
    }
    Ok(total)
}

/// `number * scale` in nanoseconds, `number` being `int`, `int.frac` or `.frac`.
fn scale_term(number: &str, scale: u128) -> Option<u128> {
    let (int, frac) = number.split_once('.').unwrap_or((number, ""));
    if int.is_empty() && frac.is_empty() {
        return None;
    }
    if !int.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let whole = if int.is_empty() { 0 } else { int.parse::<u128>().ok()? };
    // Digits past nanosecond precision of the largest unit cannot matter.
    let frac = &frac[..frac.len().min(18)];
    let part = if frac.is_empty() {
        0
    } else {
        frac.parse::<u128>().ok()? * scale / 10u128.pow(frac.len() as u32)
    };
    whole.checked_mul(scale)?.checked_add(part)
}
