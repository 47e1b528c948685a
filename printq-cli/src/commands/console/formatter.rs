//! Output formatting for console results

use colored::*;
use printq_core::JobQueue;
use printq_execution::SubmissionEvent;
use printq_output::{Channel, OutputLine};
use uuid::Uuid;

/// Output formatter for console results
#[derive(Default)]
pub struct OutputFormatter {}

impl OutputFormatter {
    pub fn new() -> Self {
        Self {}
    }

    pub fn print_success(&self, message: &str) {
        println!("{} {}", "✓".bright_green().bold(), message);
    }

    pub fn print_error(&self, message: &str) {
        eprintln!("{} {}", "✗".bright_red().bold(), message.bright_red());
    }

    pub fn print_warning(&self, message: &str) {
        println!("{} {}", "⚠".bright_yellow().bold(), message.bright_yellow());
    }

    pub fn print_info(&self, message: &str) {
        println!("{} {}", "ℹ".bright_blue().bold(), message);
    }

    /// Print the queue with 1-based positions
    pub fn print_jobs(&self, queue: &JobQueue) {
        if queue.is_empty() {
            self.print_info("Queue is empty");
            return;
        }
        for line in job_lines(queue) {
            println!("{}", line);
        }
    }

    pub fn print_transcript(&self, lines: &[OutputLine]) {
        if lines.is_empty() {
            self.print_info("No output yet");
            return;
        }
        for line in lines {
            let tag = format!("[{}]", short_id(line.session_id));
            match line.channel {
                Channel::Stdout => println!("{} {}", tag.dimmed(), line.text),
                Channel::Stderr => println!("{} {}", tag.dimmed(), line.text.bright_red()),
            }
        }
    }

    pub fn print_event(&self, event: &SubmissionEvent) {
        match event {
            SubmissionEvent::Started {
                submission_id,
                jobs,
            } => self.print_info(&format!(
                "Submission {} started with {} job(s)",
                short_id(*submission_id),
                jobs
            )),
            SubmissionEvent::Finished {
                submission_id,
                report,
            } => {
                let summary = format!(
                    "{} stdout / {} stderr lines in {:.1}s",
                    report.stdout_lines,
                    report.stderr_lines,
                    report.duration.as_secs_f64()
                );
                match report.exit_code {
                    Some(0) => self.print_success(&format!(
                        "Submission {} finished ({})",
                        short_id(*submission_id),
                        summary
                    )),
                    Some(code) => self.print_warning(&format!(
                        "Submission {} exited with code {} ({})",
                        short_id(*submission_id),
                        code,
                        summary
                    )),
                    None => self.print_warning(&format!(
                        "Submission {} was ended by a signal ({})",
                        short_id(*submission_id),
                        summary
                    )),
                }
            }
            SubmissionEvent::Failed {
                submission_id,
                batch,
                error,
            } => self.print_error(&format!(
                "Submission {} failed: {}. {} job(s) were not re-queued.",
                short_id(*submission_id),
                error,
                batch.len()
            )),
        }
    }
}

/// `  1) ID:7 | Pages:3 | Type:2 | Priority:3`
pub fn job_lines(queue: &JobQueue) -> Vec<String> {
    let width = queue.len().to_string().len();
    queue
        .iter()
        .enumerate()
        .map(|(i, job)| format!("  {:>width$}) {}", i + 1, job, width = width))
        .collect()
}

pub fn short_id(id: Uuid) -> String {
    id.simple().to_string().chars().take(8).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use printq_core::{Category, JobRecord, Priority};

    #[test]
    fn test_job_lines_are_numbered_from_one() {
        let mut queue = JobQueue::new();
        queue.add(JobRecord::new(7, 3, Category::Magazine, Priority::Low));
        queue.add(JobRecord::new(8, 1, Category::Newspaper, Priority::High));

        assert_eq!(
            job_lines(&queue),
            vec![
                "  1) ID:7 | Pages:3 | Type:2 | Priority:3",
                "  2) ID:8 | Pages:1 | Type:1 | Priority:1",
            ]
        );
    }

    #[test]
    fn test_short_id() {
        let id = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        assert_eq!(short_id(id), "67e55044");
    }
}
