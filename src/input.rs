use crate::error::{Result, StallsError};
use crate::solver::Query;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reads a judge-format input: a case count line followed by one
/// `stalls customers` line per case.
pub(crate) fn read_queries<R: BufRead>(reader: R, source: &Path) -> Result<Vec<Query>> {
    let mut lines = reader.lines().enumerate().map(|(i, line)| {
        line.map(|line| (i + 1, line))
            .map_err(|e| StallsError::io(source, e))
    });

    let (count_line, count) = loop {
        match lines.next().transpose()? {
            None => return Err(StallsError::malformed(1, "missing case count")),
            Some((_, line)) if line.trim().is_empty() => continue,
            Some((number, line)) => {
                let count = line.trim().parse::<usize>().map_err(|e| {
                    let reason = format!("invalid case count {:?}: {}", line.trim(), e);
                    StallsError::malformed(number, reason)
                })?;
                break (number, count);
            }
        }
    };

    let mut queries = Vec::new();
    let mut last_line = count_line;
    while queries.len() < count {
        let Some((number, line)) = lines.next().transpose()? else {
            return Err(StallsError::malformed(
                last_line + 1,
                format!("expected {} cases, found {}", count, queries.len()),
            ));
        };
        last_line = number;
        let (stalls, customers) = parse_case(&line, number)?;
        queries.push(Query::new(stalls, customers)?);
    }

    for line in lines {
        let (number, line) = line?;
        if !line.trim().is_empty() {
            return Err(StallsError::malformed(
                number,
                format!("unexpected line after the {} declared cases", count),
            ));
        }
    }

    Ok(queries)
}

pub(crate) fn read_queries_from_file(path: &Path) -> Result<Vec<Query>> {
    let file = File::open(path).map_err(|e| StallsError::io(path, e))?;
    read_queries(BufReader::new(file), path)
}

fn parse_case(line: &str, number: usize) -> Result<(u64, u64)> {
    let tokens = line.split_whitespace().collect::<Vec<_>>();
    let &[stalls, customers] = tokens.as_slice() else {
        return Err(StallsError::malformed(
            number,
            format!("expected `stalls customers`, found {} tokens", tokens.len()),
        ));
    };
    let parse = |token: &str, what: &str| {
        token.parse::<u64>().map_err(|e| {
            StallsError::malformed(number, format!("invalid {} {:?}: {}", what, token, e))
        })
    };
    Ok((parse(stalls, "stall count")?, parse(customers, "customer count")?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read(text: &str) -> Result<Vec<Query>> {
        read_queries(Cursor::new(text), Path::new("test.in"))
    }

    #[test]
    fn reads_cases_in_order() {
        let queries = read("3\n4 2\n5 2\n1000 1\n").unwrap();
        let pairs = queries
            .iter()
            .map(|q| (q.stalls(), q.customers()))
            .collect::<Vec<_>>();
        assert_eq!(pairs, vec![(4, 2), (5, 2), (1000, 1)]);
    }

    #[test]
    fn tolerates_extra_whitespace_and_missing_final_newline() {
        let queries = read("\n2\r\n  7\t3 \r\n1000000000000000000 1").unwrap();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0].customers(), 3);
        assert_eq!(queries[1].stalls(), 1_000_000_000_000_000_000);
    }

    #[test]
    fn ignores_trailing_blank_lines() {
        assert_eq!(read("1\n3 3\n\n\n").unwrap().len(), 1);
    }

    #[test]
    fn zero_cases() {
        assert!(read("0\n").unwrap().is_empty());
    }

    fn malformed_line(text: &str) -> usize {
        match read(text).unwrap_err() {
            StallsError::MalformedInput { line, .. } => line,
            e => panic!("unexpected error: {}", e),
        }
    }

    #[test]
    fn reports_line_of_malformed_input() {
        assert_eq!(malformed_line(""), 1);
        assert_eq!(malformed_line("two\n1 1\n"), 1);
        assert_eq!(malformed_line("2\n1 1\n5\n"), 3);
        assert_eq!(malformed_line("2\n1 1\n5 x\n"), 3);
        assert_eq!(malformed_line("1\n5 -1\n"), 2);
        assert_eq!(malformed_line("1\n5 1 1\n"), 2);
    }

    #[test]
    fn count_mismatch_is_malformed() {
        assert_eq!(malformed_line("3\n1 1\n2 2\n"), 4);
        assert_eq!(malformed_line("1\n1 1\n2 2\n"), 3);
    }

    #[test]
    fn huge_case_count_is_malformed() {
        assert_eq!(malformed_line("18446744073709551615\n1 1\n"), 3);
        assert_eq!(malformed_line("1000000000000\n1 1\n2 2\n"), 4);
    }

    #[test]
    fn rejects_invalid_query() {
        let err = read("1\n3 4\n").unwrap_err();
        assert!(matches!(
            err,
            StallsError::InvalidQuery {
                stalls: 3,
                customers: 4,
                ..
            }
        ));
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.in");
        let err = read_queries_from_file(&path).unwrap_err();
        assert!(matches!(err, StallsError::Io { .. }));
        assert!(err.to_string().contains("missing.in"));
    }
}
