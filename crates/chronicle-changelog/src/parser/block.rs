//! Decoding of delimited commit blocks

use chrono::{DateTime, Utc};
use chronicle_core::ChangelogError;
use chronicle_git::{LogRecord, Signature, FIELD_COUNT, FIELD_SEPARATOR, RECORD_SEPARATOR};

use crate::Result;

/// Split log text into blocks, skipping empty fragments
pub fn split_blocks(text: &str) -> impl Iterator<Item = &str> {
    text.split(RECORD_SEPARATOR)
        .filter(|block| !block.trim().is_empty())
}

/// Decode one block into a record
pub fn decode_block(block: &str) -> Result<LogRecord> {
    let fields: Vec<&str> = block.splitn(FIELD_COUNT, FIELD_SEPARATOR).collect();
    if fields.len() < FIELD_COUNT {
        return Err(ChangelogError::MalformedBlock(format!(
            "expected {} fields, found {} in block starting '{}'",
            FIELD_COUNT,
            fields.len(),
            fields.first().map_or("", |f| f.trim())
        )));
    }

    let author = Signature::new(fields[2], fields[3], parse_date(fields[4])?);
    let committer = Signature::new(fields[5], fields[6], parse_date(fields[7])?);

    let mut record = LogRecord::new(fields[0].trim(), fields[8], author)
        .with_committer(committer)
        .with_body(fields[9].trim_end());
    record.short_hash = fields[1].to_string();
    Ok(record)
}

fn parse_date(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| ChangelogError::MalformedBlock(format!("invalid date '{}': {}", value, e)))
}
