//! REPL (Read-Eval-Print Loop) implementation for the printq console

use anyhow::Result;
use colored::*;
use printq_config::PrintqConfig;
use printq_execution::{
    Dispatcher, SessionConfig, SubmissionEvent, SubmissionPolicy, SubmissionTicket,
    SubmissionWorker, SubmitError,
};
use printq_output::{OutputSink, TranscriptSink};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::{Hinter, HistoryHinter};
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use uuid::Uuid;

use super::formatter::{short_id, OutputFormatter};
use super::parser::{CommandParser, ConsoleCommand};
use super::ConsoleConfig;
use crate::commands::output_sink;

/// Tab completion and history hints
struct PrintqHelper {
    hinter: HistoryHinter,
}

impl Helper for PrintqHelper {}
impl Highlighter for PrintqHelper {}
impl Validator for PrintqHelper {}

impl Completer for PrintqHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_to_cursor = &line[..pos];
        // only the command word is completed
        if line_to_cursor.contains(char::is_whitespace) {
            return Ok((pos, Vec::new()));
        }
        let candidates = ConsoleCommand::names()
            .iter()
            .filter(|name| name.starts_with(line_to_cursor))
            .map(|name| Pair {
                display: name.to_string(),
                replacement: name.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Hinter for PrintqHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<String> {
        self.hinter.hint(line, pos, ctx)
    }
}

/// Main console REPL implementation
pub struct PrintqConsole {
    editor: Editor<PrintqHelper, rustyline::history::FileHistory>,
    history_file: Option<PathBuf>,
    parser: CommandParser,
    formatter: OutputFormatter,
    dispatcher: Dispatcher,
    worker: SubmissionWorker,
    events: mpsc::UnboundedReceiver<SubmissionEvent>,
    transcript: Arc<TranscriptSink>,
    pending: HashSet<Uuid>,
    running: bool,
}

impl PrintqConsole {
    pub async fn new(settings: &PrintqConfig, config: ConsoleConfig) -> Result<Self> {
        let mut editor = Editor::new()?;
        editor.set_helper(Some(PrintqHelper {
            hinter: HistoryHinter {},
        }));

        let history_file = config
            .history_file
            .or_else(|| dirs::home_dir().map(|home| home.join(".printq_history")));
        if let Some(path) = &history_file {
            let _ = editor.load_history(path);
        }

        let transcript = Arc::new(TranscriptSink::new(settings.output.transcript_limit));
        let sink = output_sink(
            &settings.output,
            Some(transcript.clone() as Arc<dyn OutputSink>),
        )
        .await?;
        let (worker, events) = SubmissionWorker::start(
            SessionConfig::from(&settings.execution),
            SubmissionPolicy::from_serialize_flag(settings.execution.serialize_submissions),
            sink,
        );
        let dispatcher = Dispatcher::new(worker.handle());

        Ok(Self {
            editor,
            history_file,
            parser: CommandParser::new(),
            formatter: OutputFormatter::new(),
            dispatcher,
            worker,
            events,
            transcript,
            pending: HashSet::new(),
            running: false,
        })
    }

    /// Run until `exit` or end of input, then wait for running submissions
    pub async fn run(mut self) -> Result<()> {
        self.show_banner();
        self.running = true;

        while self.running {
            self.report_events();
            let prompt = self.prompt();
            // readline blocks; keep it off the runtime's other workers
            let input = tokio::task::block_in_place(|| self.editor.readline(&prompt));
            match input {
                Ok(line) => {
                    if let Err(e) = self.process_line(&line) {
                        self.formatter.print_error(&format!("Error: {:#}", e));
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("Use 'exit' or Ctrl+D to quit");
                }
                Err(ReadlineError::Eof) => break,
                Err(e) => {
                    self.formatter.print_error(&format!("Input error: {}", e));
                    break;
                }
            }
        }

        self.save_history();

        if !self.pending.is_empty() {
            self.formatter.print_info(&format!(
                "Waiting for {} submission(s) to finish",
                self.pending.len()
            ));
        }
        let Self {
            dispatcher,
            worker,
            mut events,
            formatter,
            ..
        } = self;
        drop(dispatcher);
        let shutdown = tokio::spawn(worker.shutdown());
        while let Some(event) = events.recv().await {
            formatter.print_event(&event);
        }
        if let Err(e) = shutdown.await {
            warn!("Submission worker shutdown failed: {}", e);
        }

        formatter.print_info("Goodbye!");
        Ok(())
    }

    fn show_banner(&self) {
        println!(
            "{}",
            format!("printq console v{}", env!("CARGO_PKG_VERSION"))
                .bright_cyan()
                .bold()
        );
        println!(
            "Type '{}' for available commands, '{}' to quit",
            "help".bright_yellow(),
            "exit".bright_yellow()
        );
        println!();
    }

    fn prompt(&self) -> String {
        if self.pending.is_empty() {
            "printq> ".bright_green().to_string()
        } else {
            format!("printq[{} running]> ", self.pending.len())
                .bright_yellow()
                .to_string()
        }
    }

    /// Print whatever the worker reported since the last prompt
    fn report_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            if !matches!(event, SubmissionEvent::Started { .. }) {
                self.pending.remove(&event.submission_id());
            }
            self.formatter.print_event(&event);
        }
    }

    fn process_line(&mut self, input: &str) -> Result<()> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(());
        }
        self.editor.add_history_entry(input)?;

        let Some(command) = self.parser.parse(input)? else {
            return Ok(());
        };
        debug!("Console command: {:?}", command);
        self.execute(command);
        Ok(())
    }

    fn execute(&mut self, command: ConsoleCommand) {
        match command {
            ConsoleCommand::Add {
                job_id,
                pages,
                category,
                priority,
            } => match self.dispatcher.add_job(&job_id, &pages, &category, &priority) {
                Ok(record) => self.formatter.print_success(&format!(
                    "Added {} at position {}",
                    record,
                    self.dispatcher.list_jobs().len()
                )),
                Err(e) => self.formatter.print_error(&e.to_string()),
            },
            ConsoleCommand::List => {
                self.formatter.print_jobs(self.dispatcher.list_jobs());
            }
            ConsoleCommand::Remove { position } => match self.dispatcher.remove_job(position - 1) {
                Ok(record) => self.formatter.print_success(&format!("Removed {}", record)),
                Err(e) => self
                    .formatter
                    .print_error(&format!("No job at position {} ({})", position, e)),
            },
            ConsoleCommand::Submit { position } => {
                let result = self.dispatcher.submit_one(position - 1);
                self.report_submission(result);
            }
            ConsoleCommand::SubmitAll => {
                let result = self.dispatcher.submit_all();
                self.report_submission(result);
            }
            ConsoleCommand::Output => {
                self.formatter.print_transcript(&self.transcript.lines());
            }
            ConsoleCommand::OutputClear => {
                self.transcript.clear();
                self.formatter.print_success("Output cleared");
            }
            ConsoleCommand::Help => self.show_help(),
            ConsoleCommand::Clear => print!("\x1B[2J\x1B[1;1H"),
            ConsoleCommand::History => {
                for (i, entry) in self.editor.history().iter().enumerate() {
                    println!("{:3}: {}", i + 1, entry);
                }
            }
            ConsoleCommand::Exit => self.running = false,
        }
    }

    fn report_submission(&mut self, result: Result<SubmissionTicket, SubmitError>) {
        match result {
            Ok(ticket) => {
                self.pending.insert(ticket.id);
                self.formatter.print_success(&format!(
                    "Submitted {} job(s) as {}",
                    ticket.jobs,
                    short_id(ticket.id)
                ));
            }
            Err(SubmitError::EmptySubmission) => {
                self.formatter.print_warning("Nothing to submit");
            }
            Err(e) => self.formatter.print_error(&e.to_string()),
        }
    }

    fn show_help(&self) {
        let entry = |usage: &str, what: &str| {
            println!("  {} - {}", format!("{:<40}", usage).bright_yellow(), what);
        };

        println!("{}", "Jobs:".bright_cyan().bold());
        entry("add <id> <pages> <category> <priority>", "Queue a job");
        entry("list", "Show the queue");
        entry("remove <position>", "Remove a queued job");
        entry("submit <position>", "Submit one job");
        entry("submit-all", "Submit the whole queue");
        println!();
        println!("{}", "Codes:".bright_cyan().bold());
        for category in printq_core::Category::all() {
            println!("  category {} - {}", category.code(), category.label());
        }
        for priority in printq_core::Priority::all() {
            println!("  priority {} - {}", priority.code(), priority.label());
        }
        println!();
        println!("{}", "Console:".bright_cyan().bold());
        entry("output", "Show processor output");
        entry("output clear", "Discard processor output");
        entry("history", "Show command history");
        entry("clear", "Clear the screen");
        entry("exit, quit", "Leave the console");
    }

    fn save_history(&mut self) {
        if let Some(path) = &self.history_file {
            if let Err(e) = self.editor.save_history(path) {
                debug!("Failed to save history to {:?}: {}", path, e);
            }
        }
    }
}
