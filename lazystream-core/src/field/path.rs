//! Dotted field paths resolved against JSON records.
//!
//! Syntax: field names separated by `.`, each optionally followed by one or more
//! `[index]` suffixes. Negative indexes count from the end of an array.
//!
//! ```text
//! name          -> record["name"]
//! f4.f1         -> record["f4"]["f1"]
//! f3[0]         -> record["f3"][0]
//! f3[-1]        -> last element of record["f3"]
//! ```

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};
use serde_json::Value;

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Object member lookup.
    Field(String),
    /// Array element lookup; negative values count from the end.
    Index(i64),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Field(name) => write!(f, "field '{name}'"),
            Segment::Index(index) => write!(f, "index [{index}]"),
        }
    }
}

/// A parsed path such as `address.lines[0]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    raw: String,
    segments: Vec<Segment>,
}

impl FieldPath {
    /// Parse a dotted path.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            bail!("field path is empty");
        }

        let mut segments = Vec::new();
        for part in raw.split('.') {
            if part.is_empty() {
                bail!("empty segment in field path '{raw}'");
            }

            let (name, mut rest) = match part.find('[') {
                Some(open) => part.split_at(open),
                None => (part, ""),
            };
            if name.contains(']') {
                bail!("unexpected ']' in field path '{raw}'");
            }
            if !name.is_empty() {
                segments.push(Segment::Field(name.to_string()));
            }

            while !rest.is_empty() {
                let inner = rest
                    .strip_prefix('[')
                    .ok_or_else(|| anyhow!("unexpected '{rest}' in field path '{raw}'"))?;
                let close = inner
                    .find(']')
                    .ok_or_else(|| anyhow!("unclosed '[' in field path '{raw}'"))?;
                let digits = inner[..close].trim();
                let index: i64 = digits
                    .parse()
                    .with_context(|| format!("invalid index '{digits}' in field path '{raw}'"))?;
                segments.push(Segment::Index(index));
                rest = &inner[close + 1..];
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// The path as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Borrow the value this path points at inside `record`.
    pub fn resolve<'a>(&self, record: &'a Value) -> Result<&'a Value> {
        let mut current = record;
        for segment in &self.segments {
            current = match (segment, current) {
                (Segment::Field(name), Value::Object(members)) => members
                    .get(name)
                    .ok_or_else(|| anyhow!("field '{name}' not found while resolving '{}'", self.raw))?,
                (Segment::Index(index), Value::Array(items)) => {
                    let position = if *index < 0 {
                        items.len() as i64 + index
                    } else {
                        *index
                    };
                    usize::try_from(position)
                        .ok()
                        .and_then(|position| items.get(position))
                        .ok_or_else(|| {
                            anyhow!(
                                "index {index} out of range for array of length {} while resolving '{}'",
                                items.len(),
                                self.raw
                            )
                        })?
                }
                (segment, other) => bail!(
                    "cannot apply {segment} to {} while resolving '{}'",
                    kind(other),
                    self.raw
                ),
            };
        }
        Ok(current)
    }
}

impl FromStr for FieldPath {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "tests/path_tests.rs"]
mod tests;
