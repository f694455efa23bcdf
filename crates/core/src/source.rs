use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Result, SpangraphError};
use crate::model::Span;

#[derive(Debug, Clone, Default)]
pub struct SpanBatch {
    pub spans: Vec<Span>,
    pub files: Vec<PathBuf>,
    /// Total size of the files read.
    pub bytes: u64,
}

/// Reads spans from a file, or from every file matching a glob pattern.
///
/// Matched files are read in path order and their arrays concatenated.
pub fn read_spans(input: &str) -> Result<SpanBatch> {
    let files = resolve_inputs(input)?;
    let mut batch = SpanBatch::default();

    for path in files {
        let raw = fs::read(&path).map_err(|e| {
            SpangraphError::InputUnavailable(format!("failed reading {}: {e}", path.display()))
        })?;
        let spans = parse_spans(&raw).map_err(|e| match e {
            SpangraphError::MalformedInput(msg) => {
                SpangraphError::MalformedInput(format!("{}: {msg}", path.display()))
            }
            other => other,
        })?;

        tracing::debug!(path = %path.display(), spans = spans.len(), "read span file");
        batch.bytes += raw.len() as u64;
        batch.spans.extend(spans);
        batch.files.push(path);
    }

    Ok(batch)
}

pub fn parse_spans(raw: &[u8]) -> Result<Vec<Span>> {
    serde_json::from_slice(raw)
        .map_err(|e| SpangraphError::MalformedInput(format!("expected a JSON array of spans: {e}")))
}

fn resolve_inputs(input: &str) -> Result<Vec<PathBuf>> {
    let literal = PathBuf::from(input);
    if !input.contains(['*', '?', '[']) || literal.is_file() {
        return Ok(vec![literal]);
    }

    let entries = glob::glob(input).map_err(|e| {
        SpangraphError::InputUnavailable(format!("invalid input pattern {input}: {e}"))
    })?;
    let mut files = entries
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect::<Vec<_>>();
    files.sort();

    if files.is_empty() {
        tracing::warn!(pattern = input, "input pattern matched no files");
        return Err(SpangraphError::InputUnavailable(format!(
            "no files match {input}"
        )));
    }
    Ok(files)
}

/// Serializes `value` to `path`, creating parent directories. Returns the byte
/// count written.
pub fn write_json<T: Serialize>(path: &Path, value: &T, pretty: bool) -> Result<u64> {
    let payload = encode_json(value, pretty)?;
    write_payload(path, &payload)?;
    Ok(payload.len() as u64)
}

pub fn encode_json<T: Serialize>(value: &T, pretty: bool) -> Result<Vec<u8>> {
    if pretty {
        serde_json::to_vec_pretty(value)
    } else {
        serde_json::to_vec(value)
    }
    .map_err(|e| SpangraphError::Serialize(e.to_string()))
}

pub fn write_payload(path: &Path, payload: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| {
            SpangraphError::Io(format!("failed creating {}: {e}", parent.display()))
        })?;
    }
    fs::write(path, payload)
        .map_err(|e| SpangraphError::Io(format!("failed writing {}: {e}", path.display())))
}
