use crate::device::identifier::LoopbackId;
use crate::error::{Result, XrError};
use serde::Deserialize;
use std::path::Path;

/// One intended change: ensure the loopback exists and carries this description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRequest {
    pub loopback: LoopbackId,
    description: String,
}

impl ChangeRequest {
    pub fn new(loopback: LoopbackId, description: &str) -> Result<Self> {
        let description = description.trim();
        if description.is_empty() {
            return Err(XrError::MissingInput(format!(
                "Missing description for {}",
                loopback
            )));
        }
        if description.contains(['\n', '\r']) {
            return Err(XrError::InvalidCommand(format!(
                "description {}",
                description
            )));
        }

        Ok(Self {
            loopback,
            description: description.to_string(),
        })
    }

    /// Build a request from raw CLI arguments.
    pub fn parse(raw_loopback: &str, description: &str) -> Result<Self> {
        Self::new(LoopbackId::normalize(raw_loopback)?, description)
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    loopback: String,
    #[serde(default)]
    description: Option<String>,
}

/// Read a `loopback,description` CSV into a change batch.
///
/// The whole batch is rejected on the first bad row, so nothing reaches the
/// device unless every row is valid.
pub fn load_csv(path: &Path) -> Result<Vec<ChangeRequest>> {
    let reader = csv::Reader::from_path(path)?;
    parse_csv(reader)
}

/// Parse CSV content held in memory.
pub fn parse_csv_str(content: &str) -> Result<Vec<ChangeRequest>> {
    parse_csv(csv::Reader::from_reader(content.as_bytes()))
}

fn parse_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<ChangeRequest>> {
    let mut requests = Vec::new();

    for row in reader.deserialize::<CsvRow>() {
        let row = row?;
        let loopback = LoopbackId::normalize(&row.loopback)?;
        let description = row.description.unwrap_or_default();
        requests.push(ChangeRequest::new(loopback, &description)?);
    }

    if requests.is_empty() {
        return Err(XrError::MissingInput("CSV contained no rows.".to_string()));
    }

    tracing::debug!(rows = requests.len(), "loaded change batch from CSV");
    Ok(requests)
}
