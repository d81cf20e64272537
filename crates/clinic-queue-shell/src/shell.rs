//! Read-eval-render loop over a single in-memory queue.

use std::io::{BufRead, Write};

use chrono::Utc;
use clinic_queue_core::intake::default_date_time_now;
use clinic_queue_core::{PriorityQueue, QueueConfig, Registration, Specialty, WaitReport};
use tracing::{debug, warn};

use crate::command::{parse_line, Command};
use crate::render::{write_response, OutputFormat, Response};
use crate::ShellResult;

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Terminal front desk. Owns the session's queue.
pub struct Shell<R, W> {
    input: R,
    output: W,
    queue: PriorityQueue,
    config: QueueConfig,
    format: OutputFormat,
    prompt: bool,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W, config: QueueConfig, format: OutputFormat) -> Self {
        Self {
            input,
            output,
            queue: PriorityQueue::new(),
            config,
            format,
            prompt: false,
        }
    }

    /// Print a `> ` prompt before each line (interactive sessions).
    pub fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn queue(&self) -> &PriorityQueue {
        &self.queue
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Process lines until `quit` or end of input.
    pub fn run(&mut self) -> ShellResult<()> {
        let mut line = String::new();
        loop {
            if self.prompt {
                write!(self.output, "> ")?;
                self.output.flush()?;
            }

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                debug!("end of input");
                break;
            }

            if self.handle_line(&line)? == Flow::Quit {
                break;
            }
        }
        self.output.flush()?;
        Ok(())
    }

    /// Parse, execute and render one line.
    pub fn handle_line(&mut self, line: &str) -> ShellResult<Flow> {
        let command = match parse_line(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            Err(e) => {
                warn!(error = %e, "rejected command");
                self.emit(&Response::Error {
                    message: e.to_string(),
                })?;
                return Ok(Flow::Continue);
            }
        };

        debug!(command = command.verb(), "executing");
        if command == Command::Quit {
            return Ok(Flow::Quit);
        }

        let mutation = command.is_mutation();
        let len_before = self.queue.len();
        if let Some(response) = self.execute(command) {
            self.emit(&response)?;
        }

        // Re-render after anything that changed the queue.
        if mutation && self.queue.len() != len_before {
            self.emit(&Response::Board {
                rows: self.queue.snapshot(),
            })?;
            self.emit(&Response::Stats {
                stats: self.queue.stats(),
            })?;
        }
        Ok(Flow::Continue)
    }

    /// Apply a command to the queue. `Quit` has no response.
    pub fn execute(&mut self, command: Command) -> Option<Response> {
        let response = match command {
            Command::Register(mut registration) => {
                prefill_date_time(&mut registration);
                match registration.validate() {
                    Ok(valid) => Response::Registered {
                        entry: valid.enqueue(&mut self.queue).clone(),
                    },
                    Err(errors) => Response::Rejected {
                        errors: errors.messages(),
                    },
                }
            }
            Command::CallNext => match self.queue.call_next() {
                Some(entry) => Response::Called { entry },
                None => Response::QueueEmpty,
            },
            Command::Peek => Response::Next {
                entry: self.queue.peek().cloned(),
            },
            Command::Cancel(name) => {
                if self.queue.cancel(&name) {
                    Response::Cancelled { name }
                } else {
                    Response::NotFound { name }
                }
            }
            Command::Find(name) => {
                match WaitReport::for_patient(&self.queue, &name, &self.config, Utc::now()) {
                    Some(report) => Response::Located { report },
                    None => Response::NotFound { name },
                }
            }
            Command::List => Response::Board {
                rows: self.queue.snapshot(),
            },
            Command::Stats => Response::Stats {
                stats: self.queue.stats(),
            },
            Command::Specialties => Response::Specialties {
                labels: Specialty::ALL.iter().map(|s| s.label().to_string()).collect(),
            },
            Command::Help => Response::Help,
            Command::Quit => return None,
        };
        Some(response)
    }

    fn emit(&mut self, response: &Response) -> ShellResult<()> {
        write_response(&mut self.output, self.format, response)
    }
}

/// Blank date or time fields default to the current local date and time.
fn prefill_date_time(registration: &mut Registration) {
    if registration.date.trim().is_empty() || registration.time.trim().is_empty() {
        let (date, time) = default_date_time_now();
        if registration.date.trim().is_empty() {
            registration.date = date;
        }
        if registration.time.trim().is_empty() {
            registration.time = time;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_script(script: &str, format: OutputFormat) -> (String, usize) {
        let mut shell = Shell::new(
            Cursor::new(script.to_string()),
            Vec::new(),
            QueueConfig::default(),
            format,
        );
        shell.run().unwrap();
        let remaining = shell.queue().len();
        (String::from_utf8(shell.into_output()).unwrap(), remaining)
    }

    #[test]
    fn test_register_rerenders_board_and_stats() {
        let (out, len) = run_script(
            "register Ana;111;01/01/2030;09:00;Pediatría\n",
            OutputFormat::Text,
        );
        assert_eq!(len, 1);
        assert!(out.starts_with("Registered Ana (NORMAL) for Pediatría.\n"));
        assert!(out.contains("Patient"));
        assert!(out.contains("Total: 1 | Emergencies: 0 | Normal: 1"));
    }

    #[test]
    fn test_rejected_registration_leaves_queue_untouched() {
        let (out, len) = run_script("register ;abc;01/01/2030;09:00;Pediatría\n", OutputFormat::Text);
        assert_eq!(len, 0);
        assert!(out.contains("Registration failed:"));
        assert!(out.contains("  - Patient name is required"));
        assert!(out.contains("  - Phone may only contain digits"));
        assert!(!out.contains("Total:"));
    }

    #[test]
    fn test_full_session() {
        let script = "\
register Ana;111;01/01/2030;09:00;Pediatría
register Beto;222;01/01/2030;09:05;Cardiología;emergency
peek
find ana
next
cancel ana
next
quit
register Never;333;01/01/2030;09:10;Neurología
";
        let (out, len) = run_script(script, OutputFormat::Text);
        assert_eq!(len, 0);
        assert!(out.contains("Next: Beto (EMERGENCY) - Cardiología"));
        assert!(out.contains("Ana: position 2, NORMAL, Pediatría, waiting 0 min, about 15 min remaining"));
        assert!(out.contains("Calling Beto (EMERGENCY) - Cardiología - phone 222"));
        assert!(out.contains("Cancelled appointment for ana."));
        assert!(out.contains("No patients waiting."));
        assert!(!out.contains("Never"));
    }

    #[test]
    fn test_unknown_command_reports_error() {
        let (out, _) = run_script("dance\nfind Dora\n", OutputFormat::Text);
        assert!(out.starts_with("Error: Unknown command: dance"));
        assert!(out.contains("Patient Dora not found."));
    }

    #[test]
    fn test_json_session() {
        let (out, _) = run_script(
            "register Ana;111;01/01/2030;09:00;Pediatría\nstats\n",
            OutputFormat::Json,
        );
        let events: Vec<serde_json::Value> = out
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        let kinds: Vec<&str> = events
            .iter()
            .map(|e| e["event"].as_str().unwrap())
            .collect();
        assert_eq!(kinds, ["registered", "board", "stats", "stats"]);
        assert_eq!(events[0]["entry"]["name"], "Ana");
        assert_eq!(events[1]["rows"][0]["kind"], "NORMAL");
        assert_eq!(events[3]["stats"]["total"], 1);
    }

    #[test]
    fn test_blank_date_and_time_are_prefilled() {
        let mut shell = Shell::new(
            Cursor::new(String::new()),
            Vec::new(),
            QueueConfig::default(),
            OutputFormat::Text,
        );
        shell.handle_line("register Ana;111;;;Dermatología\n").unwrap();

        let entry = shell.queue().peek().unwrap();
        assert_eq!(entry.date.len(), 10);
        assert_eq!(entry.time.len(), 5);
        assert_eq!(&entry.date[2..3], "/");
        assert_eq!(&entry.time[2..3], ":");
    }

    #[test]
    fn test_failed_cancel_does_not_rerender() {
        let (out, _) = run_script("cancel Ana\n", OutputFormat::Text);
        assert_eq!(out, "Patient Ana not found.\n");
    }
}
