use std::{fs::File, io::Write, path::Path};

use crate::dataset::record::RowId;
use crate::error::Result;
use crate::features::row::FeatureMatrix;

/// Write `test_id,is_duplicate` rows. Probabilities use Rust's shortest
/// round-trip formatting, so the text parses back to the same f64.
pub fn write_submission<W: Write>(writer: W, predictions: &[(RowId, f64)]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["test_id", "is_duplicate"])?;
    for (id, probability) in predictions {
        wtr.write_record([id.to_string(), probability.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_submission_path(path: impl AsRef<Path>, predictions: &[(RowId, f64)]) -> Result<()> {
    let path = path.as_ref();
    write_submission(File::create(path)?, predictions)?;
    tracing::info!("wrote {} predictions to {}", predictions.len(), path.display());
    Ok(())
}

/// Write the matrix with its key column first and schema columns after.
/// A missing similarity is written as an empty cell.
pub fn write_feature_matrix<W: Write>(writer: W, matrix: &FeatureMatrix) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    let mut header = vec![matrix.id_column.name().to_string()];
    header.extend(matrix.schema.columns());
    wtr.write_record(&header)?;
    for row in &matrix.rows {
        let mut record = Vec::with_capacity(header.len());
        record.push(row.id.to_string());
        record.push(row.char_diff.to_string());
        record.push(row.cos_sim.map(|s| s.to_string()).unwrap_or_default());
        record.push(row.q1_wordcount.to_string());
        record.push(row.q2_wordcount.to_string());
        record.push(row.wordcount_diff.to_string());
        record.extend(row.keyword_flags.iter().map(|f| u8::from(*f).to_string()));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_feature_matrix_path(path: impl AsRef<Path>, matrix: &FeatureMatrix) -> Result<()> {
    let path = path.as_ref();
    write_feature_matrix(File::create(path)?, matrix)?;
    tracing::info!("wrote {} feature rows to {}", matrix.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::record::IdColumn;
    use crate::features::{keywords::KeywordDictionary, row::{FeatureRow, FeatureSchema}};

    #[test]
    fn submission_has_exactly_two_columns() {
        let mut buf = Vec::new();
        write_submission(&mut buf, &[(0, 0.25), (1, 1.0 / 3.0)]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "test_id,is_duplicate");
        assert_eq!(lines[1], "0,0.25");
        let parsed: f64 = lines[2].split(',').nth(1).unwrap().parse().unwrap();
        assert_eq!(parsed, 1.0 / 3.0);
    }

    #[test]
    fn feature_matrix_csv() {
        let matrix = FeatureMatrix {
            id_column: IdColumn::TestId,
            schema: FeatureSchema::new(&KeywordDictionary::new(["life"]).unwrap()),
            rows: vec![FeatureRow {
                id: 3,
                char_diff: -2,
                cos_sim: None,
                q1_wordcount: 1,
                q2_wordcount: 3,
                wordcount_diff: -2,
                keyword_flags: vec![true].into_boxed_slice(),
            }],
        };
        let mut buf = Vec::new();
        write_feature_matrix(&mut buf, &matrix).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "test_id,char_diff,cos_sim,q1_wordcount,q2_wordcount,wordcount_diff,kw_life\n3,-2,,1,3,-2,1\n"
        );
    }
}
