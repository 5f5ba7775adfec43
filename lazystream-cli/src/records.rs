//! JSON-lines input and keyed grouping for the command line.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result, bail};
use lazystream_api::{FieldPath, Stream, identity};
use serde_json::{Map, Value};

/// Validated `group`/`count` options.
#[derive(Debug, Clone)]
pub struct GroupSpec {
    pub key: FieldPath,
    pub bucket: Option<i64>,
    pub project: Option<FieldPath>,
}

impl GroupSpec {
    pub fn new(key: &str, bucket: Option<i64>, project: Option<&str>) -> Result<Self> {
        let key = FieldPath::parse(key).context("invalid --key")?;
        let project = project
            .map(FieldPath::parse)
            .transpose()
            .context("invalid --project")?;
        if let Some(bucket) = bucket.filter(|bucket| *bucket <= 0) {
            bail!("--bucket must be positive, got {bucket}");
        }
        Ok(Self {
            key,
            bucket,
            project,
        })
    }

    /// The group key of `record`.
    ///
    /// Records are grouped by the JSON value itself, so `1` and `"1"` stay
    /// apart. With a bucket the key must be an integer and is floor-divided
    /// by it.
    pub fn key_of(&self, record: &Value) -> Result<Value> {
        let value = self.key.resolve(record)?;
        match self.bucket {
            Some(bucket) => {
                let number = value
                    .as_i64()
                    .with_context(|| format!("'{}' is not an integer: {value}", self.key))?;
                Ok(Value::from(number.div_euclid(bucket)))
            }
            None => Ok(value.clone()),
        }
    }

    /// The value kept in the group for `record`.
    pub fn project(&self, record: Value) -> Result<Value> {
        match &self.project {
            Some(path) => Ok(path.resolve(&record)?.clone()),
            None => Ok(record),
        }
    }

    fn keyed(&self, records: Vec<Value>) -> Result<Vec<(Value, Value)>> {
        Stream::of(records)
            .map(|record| -> Result<(Value, Value)> { Ok((self.key_of(&record)?, record)) })
            .collect()
    }
}

/// Name of `key` in the output object: strings verbatim, other values by
/// their JSON text.
fn output_name(key: &Value) -> String {
    match key {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Insert a group under its output name, refusing to merge distinct keys
/// that print the same.
fn insert_group(out: &mut Map<String, Value>, key: &Value, value: Value) -> Result<()> {
    let name = output_name(key);
    if out.contains_key(&name) {
        bail!("keys with different JSON types both print as '{name}'; last seen {key}");
    }
    out.insert(name, value);
    Ok(())
}

/// Read records from `input`, or from stdin when absent.
pub fn load_records(input: Option<&Path>) -> Result<Vec<Value>> {
    match input {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
            read_records(BufReader::new(file))
        }
        None => read_records(io::stdin().lock()),
    }
}

/// Parse one JSON document per line, skipping blank lines.
pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<Value>> {
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("failed to read line {line_no}"))?;
        if line.trim().is_empty() {
            continue;
        }
        let record: Value = serde_json::from_str(&line)
            .with_context(|| format!("malformed JSON on line {line_no}"))?;
        records.push(record);
    }
    tracing::debug!(records = records.len(), "read input");
    Ok(records)
}

/// Group projected records by key, in first-seen key order.
pub fn run_group(spec: &GroupSpec, records: Vec<Value>) -> Result<Value> {
    let grouped = Stream::of(spec.keyed(records)?)
        .map_values(|record| spec.project(record))
        .group_by_key(identity)
        .to_dict();

    let mut out = Map::new();
    for (key, values) in grouped {
        let values = values.into_iter().collect::<Result<Vec<_>>>()?;
        insert_group(&mut out, &key, Value::Array(values))?;
    }
    Ok(Value::Object(out))
}

/// Count records per key, in first-seen key order.
pub fn run_count(spec: &GroupSpec, records: Vec<Value>) -> Result<Value> {
    let counts = Stream::of(spec.keyed(records)?)
        .map_values(|_| 1u64)
        .reduce_by_key(|a, b| a + b)
        .to_dict();

    let mut out = Map::new();
    for (key, count) in counts {
        insert_group(&mut out, &key, Value::from(count))?;
    }
    Ok(Value::Object(out))
}

/// Serialize command output, optionally indented.
pub fn render(output: &Value, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(output)?
    } else {
        serde_json::to_string(output)?
    };
    Ok(text)
}
