//! Parsers for `/proc` and `/sys` text files.
//!
//! These are pure functions that parse the content of colon-delimited
//! key/value files and single-value sysfs attributes into structured data.
//! They are designed to be easily testable with string inputs.

use thiserror::Error;

/// Error type for parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A required field is not present in the file.
    #[error("missing field '{0}'")]
    MissingField(String),
    /// A field is present but its value does not parse.
    #[error("invalid value for field '{field}': {value:?}")]
    InvalidValue { field: String, value: String },
}

impl ParseError {
    pub fn invalid(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Name of the field that failed.
    pub fn field(&self) -> &str {
        match self {
            Self::MissingField(field) => field,
            Self::InvalidValue { field, .. } => field,
        }
    }
}

/// Ordered lines of one text file.
///
/// Produced by a single read and consumed within one collector call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextRecords {
    lines: Vec<String>,
}

impl TextRecords {
    /// Splits file content into lines.
    ///
    /// A trailing newline does not produce an empty last record and a
    /// trailing `\r` is dropped from each line.
    pub fn from_content(content: &str) -> Self {
        Self {
            lines: content.lines().map(str::to_owned).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the trimmed value of the first line whose key equals `name`.
    ///
    /// See [`field_value`].
    pub fn field(&self, name: &str) -> &str {
        field_value(&self.lines, name)
    }

    /// Iterates over `(key, value)` pairs of lines that contain a colon.
    ///
    /// Both parts are trimmed. Lines without a colon are skipped.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.lines.iter().filter_map(|line| split_field(line))
    }
}

impl From<Vec<String>> for TextRecords {
    fn from(lines: Vec<String>) -> Self {
        Self { lines }
    }
}

fn split_field(line: &str) -> Option<(&str, &str)> {
    line.split_once(':')
        .map(|(key, value)| (key.trim(), value.trim()))
}

/// Finds the first line whose key (text before the first colon, trimmed)
/// equals `name` and returns its trimmed value.
///
/// Returns an empty string when no line matches. Lines without a colon
/// never match.
pub fn field_value<'a, S: AsRef<str>>(lines: &'a [S], name: &str) -> &'a str {
    lines
        .iter()
        .filter_map(|line| split_field(line.as_ref()))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .unwrap_or("")
}

/// Parses a `/proc/meminfo` style value such as `"16384000 kB"`.
///
/// Only the first whitespace-separated token is used.
pub fn parse_kb_field(records: &TextRecords, name: &str) -> Result<i64, ParseError> {
    let value = records.field(name);
    let token = value
        .split_whitespace()
        .next()
        .ok_or_else(|| ParseError::MissingField(name.to_string()))?;
    token
        .parse()
        .map_err(|_| ParseError::invalid(name, value))
}

/// Summary of the per-core records in `/proc/cpuinfo`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CpuInfoSummary {
    /// Value of the first `model name` line, empty if absent.
    pub model_name: String,
    /// Number of lines whose key contains `processor`.
    pub num_cores: usize,
    /// Sum of all `cpu MHz` values that parsed.
    pub mhz_total: f64,
    /// Number of `cpu MHz` values that parsed.
    pub mhz_readings: usize,
}

impl CpuInfoSummary {
    /// Mean clock speed over the readings that parsed.
    ///
    /// `None` when there is no reading at all, which also covers a file
    /// without any `processor` record.
    pub fn average_mhz(&self) -> Option<f64> {
        if self.mhz_readings == 0 {
            return None;
        }
        Some(self.mhz_total / self.mhz_readings as f64)
    }
}

/// Parses `/proc/cpuinfo` records.
///
/// Format is `key\t: value`, repeated once per logical core. Unparsable
/// `cpu MHz` values are skipped rather than failing the whole file.
pub fn parse_cpuinfo(records: &TextRecords) -> CpuInfoSummary {
    let mut summary = CpuInfoSummary {
        model_name: records.field("model name").to_string(),
        ..Default::default()
    };

    for (key, value) in records.fields() {
        if key.contains("processor") {
            summary.num_cores += 1;
        }
        if key.contains("cpu MHz")
            && let Ok(mhz) = value.parse::<f64>()
            && mhz.is_finite()
        {
            summary.mhz_total += mhz;
            summary.mhz_readings += 1;
        }
    }

    summary
}

/// Parses a sysfs cache size attribute such as `"32K\n"` into KB.
///
/// Only the first line is used. A single trailing unit letter is stripped:
/// `K` or no unit means KB, `M` and `G` are scaled up to KB.
pub fn parse_cache_size(content: &str, field: &str) -> Result<u64, ParseError> {
    let value = content.lines().next().unwrap_or("").trim();
    if value.is_empty() {
        return Err(ParseError::MissingField(field.to_string()));
    }

    let (digits, multiplier) = match value.chars().last() {
        Some('K') | Some('k') => (&value[..value.len() - 1], 1),
        Some('M') | Some('m') => (&value[..value.len() - 1], 1024),
        Some('G') | Some('g') => (&value[..value.len() - 1], 1024 * 1024),
        _ => (value, 1),
    };

    digits
        .parse::<u64>()
        .ok()
        .and_then(|size| size.checked_mul(multiplier))
        .ok_or_else(|| ParseError::invalid(field, value))
}

/// Parses a single integer sysfs attribute such as `"3400000\n"`.
pub fn parse_frequency(content: &str, field: &str) -> Result<u64, ParseError> {
    let value = content.trim();
    if value.is_empty() {
        return Err(ParseError::MissingField(field.to_string()));
    }
    value.parse().map_err(|_| ParseError::invalid(field, value))
}
