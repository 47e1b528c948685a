//! Batch encoding and decoding

use std::fmt::Write as _;

use printq_core::{Batch, Category, JobRecord, Priority};

use crate::error::ProtocolError;

/// Number of lines each job occupies after the count line
pub const FIELDS_PER_JOB: usize = 4;

/// Encode a batch as the processor's input text.
///
/// Line 1 is the job count, followed by `job_id`, `pages`, `category` and
/// `priority` for each job in batch order. Every line ends with `\n`.
pub fn encode(batch: &Batch) -> String {
    render(batch.jobs())
}

fn render(jobs: &[JobRecord]) -> String {
    // Worst case per field is "-2147483648\n"
    let mut out = String::with_capacity(12 * (1 + FIELDS_PER_JOB * jobs.len()));
    // Writing into a String cannot fail
    let _ = writeln!(out, "{}", jobs.len());
    for job in jobs {
        let _ = writeln!(out, "{}", job.job_id());
        let _ = writeln!(out, "{}", job.pages());
        let _ = writeln!(out, "{}", job.category().code());
        let _ = writeln!(out, "{}", job.priority().code());
    }
    out
}

/// Parse processor input text back into a batch.
///
/// Lines may carry surrounding whitespace and `\r\n` endings. Blank lines
/// after the last job are ignored; anything else there is an error.
pub fn decode(input: &str) -> Result<Batch, ProtocolError> {
    let mut lines = input.lines().enumerate().map(|(i, l)| (i + 1, l.trim()));

    let (count_line, count_text) = lines.next().ok_or(ProtocolError::EmptyBatch)?;
    let expected: usize = count_text
        .parse()
        .map_err(|_| ProtocolError::InvalidInteger {
            line: count_line,
            value: count_text.to_string(),
        })?;
    if expected == 0 {
        return Err(ProtocolError::EmptyBatch);
    }

    // the count is untrusted; grow as jobs actually parse
    let mut jobs = Vec::new();
    let mut last_line = count_line;
    for _ in 0..expected {
        let mut fields = [0i64; FIELDS_PER_JOB];
        let mut field_lines = [0usize; FIELDS_PER_JOB];
        for (slot, line_no) in fields.iter_mut().zip(field_lines.iter_mut()) {
            let (line, text) = lines.next().ok_or(ProtocolError::Truncated {
                line: last_line,
                expected,
                read: jobs.len(),
            })?;
            last_line = line;
            *line_no = line;
            *slot = parse_field(line, text)?;
        }

        let job_id = narrow(fields[0], field_lines[0])?;
        let pages = narrow(fields[1], field_lines[1])?;
        let category = Category::try_from(fields[2]).map_err(|source| ProtocolError::InvalidCode {
            line: field_lines[2],
            source,
        })?;
        let priority = Priority::try_from(fields[3]).map_err(|source| ProtocolError::InvalidCode {
            line: field_lines[3],
            source,
        })?;
        jobs.push(JobRecord::new(job_id, pages, category, priority));
    }

    if let Some((line, _)) = lines.find(|(_, text)| !text.is_empty()) {
        return Err(ProtocolError::TrailingData { line });
    }

    Batch::new(jobs).ok_or(ProtocolError::EmptyBatch)
}

fn parse_field(line: usize, text: &str) -> Result<i64, ProtocolError> {
    text.parse().map_err(|_| ProtocolError::InvalidInteger {
        line,
        value: text.to_string(),
    })
}

fn narrow(value: i64, line: usize) -> Result<i32, ProtocolError> {
    i32::try_from(value).map_err(|_| ProtocolError::InvalidInteger {
        line,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: i32, pages: i32, category: i64, priority: i64) -> JobRecord {
        JobRecord::new(
            id,
            pages,
            Category::try_from(category).unwrap(),
            Priority::try_from(priority).unwrap(),
        )
    }

    #[test]
    fn test_encode_single_job() {
        let batch = Batch::single(job(1, 10, 1, 1));
        assert_eq!(encode(&batch), "1\n1\n10\n1\n1\n");
    }

    #[test]
    fn test_encode_two_jobs_in_order() {
        let batch = Batch::new(vec![job(7, 3, 2, 3), job(8, 1, 1, 1)]).unwrap();
        assert_eq!(encode(&batch), "2\n7\n3\n2\n3\n8\n1\n1\n1\n");
    }

    #[test]
    fn test_decode_tolerates_whitespace_and_crlf() {
        let batch = decode(" 1 \r\n 4\r\n5\r\n3\r\n2\r\n\r\n").unwrap();
        assert_eq!(batch.jobs(), &[job(4, 5, 3, 2)]);
    }

    #[test]
    fn test_decode_rejects_zero_count() {
        assert_eq!(decode("0\n"), Err(ProtocolError::EmptyBatch));
        assert_eq!(decode(""), Err(ProtocolError::EmptyBatch));
    }

    #[test]
    fn test_decode_truncated() {
        let err = decode("2\n1\n1\n1\n1\n2\n2\n").unwrap_err();
        assert_eq!(
            err,
            ProtocolError::Truncated {
                line: 7,
                expected: 2,
                read: 1
            }
        );
    }

    #[test]
    fn test_decode_huge_count_is_truncated() {
        let err = decode("1152921504606846976\n1\n1\n1\n1\n").unwrap_err();
        assert_eq!(
            err,
            ProtocolError::Truncated {
                line: 5,
                expected: 1152921504606846976,
                read: 1
            }
        );
        assert!(matches!(
            decode("5000000000\n1\n1\n1\n1\n"),
            Err(ProtocolError::Truncated { read: 1, .. })
        ));
    }

    #[test]
    fn test_decode_bad_integer() {
        let err = decode("1\n1\nten\n1\n1\n").unwrap_err();
        assert_eq!(
            err,
            ProtocolError::InvalidInteger {
                line: 3,
                value: "ten".to_string()
            }
        );
    }

    #[test]
    fn test_decode_bad_code() {
        let err = decode("1\n1\n1\n1\n7\n").unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidCode { line: 5, .. }));
    }

    #[test]
    fn test_decode_trailing_data() {
        let err = decode("1\n1\n1\n1\n1\n\n9\n").unwrap_err();
        assert_eq!(err, ProtocolError::TrailingData { line: 7 });
    }
}
