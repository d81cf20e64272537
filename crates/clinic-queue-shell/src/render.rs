//! Rendering queue responses as text or JSON lines.

use std::io::Write;

use clinic_queue_core::{Entry, EntryView, QueueStats, WaitReport};
use serde::Serialize;

use crate::command::HELP;
use crate::ShellResult;

/// Output style selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Everything the shell can tell the receptionist.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Response {
    Registered { entry: Entry },
    Rejected { errors: Vec<String> },
    Called { entry: Entry },
    QueueEmpty,
    Next { entry: Option<Entry> },
    Cancelled { name: String },
    NotFound { name: String },
    Located { report: WaitReport },
    Board { rows: Vec<EntryView> },
    Stats { stats: QueueStats },
    Specialties { labels: Vec<String> },
    Help,
    Error { message: String },
}

/// Write one response in the chosen format.
pub fn write_response<W: Write>(
    out: &mut W,
    format: OutputFormat,
    response: &Response,
) -> ShellResult<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, response)?;
            writeln!(out)?;
        }
        OutputFormat::Text => write_text(out, response)?,
    }
    Ok(())
}

fn write_text<W: Write>(out: &mut W, response: &Response) -> std::io::Result<()> {
    match response {
        Response::Registered { entry } => writeln!(
            out,
            "Registered {} ({}) for {}.",
            entry.name,
            entry.kind(),
            entry.specialty
        ),
        Response::Rejected { errors } => {
            writeln!(out, "Registration failed:")?;
            for error in errors {
                writeln!(out, "  - {}", error)?;
            }
            Ok(())
        }
        Response::Called { entry } => writeln!(
            out,
            "Calling {} ({}) - {} - phone {}",
            entry.name,
            entry.kind(),
            entry.specialty,
            entry.phone
        ),
        Response::QueueEmpty => writeln!(out, "No patients waiting."),
        Response::Next { entry: Some(entry) } => writeln!(
            out,
            "Next: {} ({}) - {}",
            entry.name,
            entry.kind(),
            entry.specialty
        ),
        Response::Next { entry: None } => writeln!(out, "Next: nobody, the queue is empty."),
        Response::Cancelled { name } => writeln!(out, "Cancelled appointment for {}.", name),
        Response::NotFound { name } => writeln!(out, "Patient {} not found.", name),
        Response::Located { report } => writeln!(
            out,
            "{}: position {}, {}, {}, waiting {} min, about {} min remaining",
            report.name,
            report.position,
            report.kind,
            report.specialty,
            report.waited_minutes,
            report.estimated_remaining_minutes
        ),
        Response::Board { rows } => write_board(out, rows),
        Response::Stats { stats } => writeln!(
            out,
            "Total: {} | Emergencies: {} | Normal: {} | Avg wait: {} min",
            stats.total, stats.emergency_count, stats.normal_count, stats.average_wait_minutes
        ),
        Response::Specialties { labels } => {
            for label in labels {
                writeln!(out, "  {}", label)?;
            }
            Ok(())
        }
        Response::Help => writeln!(out, "{}", HELP),
        Response::Error { message } => writeln!(out, "Error: {}", message),
    }
}

fn write_board<W: Write>(out: &mut W, rows: &[EntryView]) -> std::io::Result<()> {
    if rows.is_empty() {
        return writeln!(out, "(queue is empty)");
    }

    writeln!(
        out,
        "{:>3}  {:<24} {:<12} {:<5}  {:<16} {:<9} {:>7}",
        "Pos", "Patient", "Phone", "Time", "Specialty", "Kind", "Wait"
    )?;
    for row in rows {
        writeln!(
            out,
            "{:>3}  {:<24} {:<12} {:<5}  {:<16} {:<9} {:>3} min",
            row.position,
            row.name,
            row.phone,
            row.time,
            row.specialty.label(),
            row.kind.label(),
            row.wait_minutes
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic_queue_core::{PriorityQueue, Specialty};

    fn render(format: OutputFormat, response: &Response) -> String {
        let mut out = Vec::new();
        write_response(&mut out, format, response).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_text_stats() {
        let stats = QueueStats {
            total: 3,
            emergency_count: 1,
            normal_count: 2,
            average_wait_minutes: 7,
        };
        assert_eq!(
            render(OutputFormat::Text, &Response::Stats { stats }),
            "Total: 3 | Emergencies: 1 | Normal: 2 | Avg wait: 7 min\n"
        );
    }

    #[test]
    fn test_text_board() {
        let mut queue = PriorityQueue::new();
        queue.insert("Ana", "111", "01/01/2030", "09:00", Specialty::Pediatrics, false);
        queue.insert("Beto", "222", "01/01/2030", "09:05", Specialty::Cardiology, true);

        let text = render(
            OutputFormat::Text,
            &Response::Board {
                rows: queue.snapshot(),
            },
        );
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Patient"));
        assert!(lines[1].contains("Beto") && lines[1].contains("EMERGENCY"));
        assert!(lines[2].contains("Ana") && lines[2].contains("NORMAL"));
    }

    #[test]
    fn test_text_empty_board() {
        assert_eq!(
            render(OutputFormat::Text, &Response::Board { rows: vec![] }),
            "(queue is empty)\n"
        );
    }

    #[test]
    fn test_json_is_tagged() {
        let line = render(
            OutputFormat::Json,
            &Response::NotFound {
                name: "Dora".into(),
            },
        );
        let value: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(value["event"], "not_found");
        assert_eq!(value["name"], "Dora");
        assert!(line.ends_with('\n'));
    }

    #[test]
    fn test_text_rejected_lists_every_error() {
        let text = render(
            OutputFormat::Text,
            &Response::Rejected {
                errors: vec!["Phone is required".into(), "Date is required".into()],
            },
        );
        assert_eq!(
            text,
            "Registration failed:\n  - Phone is required\n  - Date is required\n"
        );
    }
}
