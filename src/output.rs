use crate::error::{Result, StallsError};
use crate::solver::{Answer, Query};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes one `Case #i: max min` line per answer, numbering cases from 1.
pub(crate) fn write_answers<W: Write>(mut writer: W, answers: &[Answer]) -> std::io::Result<()> {
    for (i, answer) in answers.iter().enumerate() {
        writeln!(
            writer,
            "Case #{}: {} {}",
            i + 1,
            answer.max_adjacent,
            answer.min_adjacent
        )?;
    }
    writer.flush()
}

pub(crate) fn write_answers_to_file(path: &Path, answers: &[Answer]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| StallsError::io(parent, e))?;
    }
    let file = File::create(path).map_err(|e| StallsError::io(path, e))?;
    write_answers(BufWriter::new(file), answers).map_err(|e| StallsError::io(path, e))
}

/// Console rendering that also shows the query behind each answer.
pub(crate) fn format_table(queries: &[Query], answers: &[Answer]) -> String {
    queries
        .iter()
        .zip(answers)
        .enumerate()
        .map(|(i, (query, answer))| {
            format!(
                "Case #{}: {},\t{},\t{},\t{}\n",
                i + 1,
                query.stalls(),
                query.customers(),
                answer.max_adjacent,
                answer.min_adjacent
            )
        })
        .collect()
}
