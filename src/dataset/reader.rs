use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};

use serde_json::{Map, Value};

use crate::dataset::record::{Dataset, IdColumn, QuestionPair, RowId};
use crate::error::{PipelineError, Result};
use crate::text::normalizer::text_of;

const QUESTION1: &str = "question1";
const QUESTION2: &str = "question2";
const LABEL: &str = "is_duplicate";

/// Load a dataset, choosing the format by extension.
/// `.jsonl` / `.ndjson` are read as JSON lines, everything else as CSV.
pub fn read_path(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let dataset = match path.extension().and_then(|e| e.to_str()) {
        Some("jsonl") | Some("ndjson") => read_jsonl_from(BufReader::new(file))?,
        _ => read_csv_from(file)?,
    };
    tracing::info!(
        "loaded {} rows from {} (key column `{}`, {} labeled)",
        dataset.len(),
        path.display(),
        dataset.id_column.name(),
        dataset.labeled_count()
    );
    Ok(dataset)
}

/// Read `id|test_id, question1, question2[, is_duplicate]` from CSV.
/// Other columns are ignored. Short rows and empty cells read as empty text.
pub fn read_csv_from<R: Read>(reader: R) -> Result<Dataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();
    let position = |name: &str| headers.iter().position(|h| h.trim() == name);

    let (id_column, id_idx) = match (position("id"), position("test_id")) {
        (Some(idx), _) => (IdColumn::Id, idx),
        (None, Some(idx)) => (IdColumn::TestId, idx),
        (None, None) => return Err(PipelineError::MissingColumn("id".to_string())),
    };
    let q1_idx = position(QUESTION1).ok_or_else(|| PipelineError::MissingColumn(QUESTION1.into()))?;
    let q2_idx = position(QUESTION2).ok_or_else(|| PipelineError::MissingColumn(QUESTION2.into()))?;
    let label_idx = position(LABEL);

    let mut pairs = Vec::new();
    let mut missing_text = 0usize;
    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        let raw_id = record.get(id_idx).unwrap_or("");
        let id = parse_id(id_column, row, raw_id)?;
        let question1 = record.get(q1_idx).unwrap_or("").to_string();
        let question2 = record.get(q2_idx).unwrap_or("").to_string();
        if question1.is_empty() || question2.is_empty() {
            missing_text += 1;
        }
        let label = match label_idx.and_then(|idx| record.get(idx)) {
            Some(raw) => parse_label(row, raw)?,
            None => None,
        };
        pairs.push(QuestionPair {
            id,
            question1,
            question2,
            label,
        });
    }
    if missing_text > 0 {
        tracing::warn!("{} rows have an empty or missing question; treated as empty text", missing_text);
    }
    Ok(Dataset::new(id_column, pairs))
}

/// Read one JSON object per line. This is the typed input path: a question
/// that is present but not a string fails with `InvalidInput`, `null` or an
/// absent key reads as empty text.
pub fn read_jsonl_from<R: BufRead>(reader: R) -> Result<Dataset> {
    let mut id_column: Option<IdColumn> = None;
    let mut pairs = Vec::new();
    for (row, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(&line)?;
        let Value::Object(object) = value else {
            return Err(PipelineError::schema(format!("line {} is not a JSON object", row + 1)));
        };
        let column = *id_column.get_or_insert(if object.contains_key("id") {
            IdColumn::Id
        } else {
            IdColumn::TestId
        });
        let id = match object.get(column.name()) {
            Some(Value::Number(n)) => n.as_u64().ok_or_else(|| PipelineError::InvalidValue {
                column: column.name(),
                row,
                value: n.to_string(),
            })?,
            Some(Value::String(s)) => parse_id(column, row, s)?,
            _ => return Err(PipelineError::MissingColumn(column.name().to_string())),
        };
        let label = match object.get(LABEL) {
            None | Some(Value::Null) => None,
            Some(Value::Bool(b)) => Some(*b),
            Some(Value::Number(n)) => parse_label(row, &n.to_string())?,
            Some(Value::String(s)) => parse_label(row, s)?,
            Some(other) => {
                return Err(PipelineError::InvalidValue {
                    column: LABEL,
                    row,
                    value: other.to_string(),
                })
            }
        };
        pairs.push(QuestionPair {
            id,
            question1: question_text(&object, QUESTION1)?,
            question2: question_text(&object, QUESTION2)?,
            label,
        });
    }
    Ok(Dataset::new(id_column.unwrap_or(IdColumn::Id), pairs))
}

fn question_text(object: &Map<String, Value>, field: &str) -> Result<String> {
    match object.get(field) {
        Some(value) => Ok(text_of(field, value)?.into_owned()),
        None => Ok(String::new()),
    }
}

fn parse_id(column: IdColumn, row: usize, raw: &str) -> Result<RowId> {
    raw.trim().parse::<RowId>().map_err(|_| PipelineError::InvalidValue {
        column: column.name(),
        row,
        value: raw.to_string(),
    })
}

fn parse_label(row: usize, raw: &str) -> Result<Option<bool>> {
    match raw.trim() {
        "" => Ok(None),
        "1" | "true" | "True" | "TRUE" => Ok(Some(true)),
        "0" | "false" | "False" | "FALSE" => Ok(Some(false)),
        other => Err(PipelineError::InvalidValue {
            column: LABEL,
            row,
            value: other.to_string(),
        }),
    }
}
