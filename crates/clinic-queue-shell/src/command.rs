//! Front-desk command parsing.

use clinic_queue_core::Registration;
use thiserror::Error;

/// Field separator inside a `register` line.
pub const FIELD_SEPARATOR: char = ';';

/// Command parse errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0} (type 'help' for a list)")]
    Unknown(String),

    #[error("'{0}' needs a patient name")]
    MissingName(&'static str),

    #[error("register expects name;phone;date;time;specialty[;emergency], got {0} field(s)")]
    FieldCount(usize),

    #[error("Unrecognised priority flag: {0} (use 'emergency' or leave it out)")]
    InvalidFlag(String),
}

pub type CommandResult<T> = Result<T, CommandError>;

/// A receptionist action.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Register(Registration),
    CallNext,
    Peek,
    Cancel(String),
    Find(String),
    List,
    Stats,
    Specialties,
    Help,
    Quit,
}

impl Command {
    /// Command name, for logs.
    pub fn verb(&self) -> &'static str {
        match self {
            Command::Register(_) => "register",
            Command::CallNext => "next",
            Command::Peek => "peek",
            Command::Cancel(_) => "cancel",
            Command::Find(_) => "find",
            Command::List => "list",
            Command::Stats => "stats",
            Command::Specialties => "specialties",
            Command::Help => "help",
            Command::Quit => "quit",
        }
    }

    /// Whether the command can change the queue.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Command::Register(_) | Command::CallNext | Command::Cancel(_)
        )
    }
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> CommandResult<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_lowercase().as_str() {
        "register" | "add" => Command::Register(parse_registration(rest)?),
        "next" | "call" => Command::CallNext,
        "peek" => Command::Peek,
        "cancel" => Command::Cancel(required_name("cancel", rest)?),
        "find" | "wait" => Command::Find(required_name("find", rest)?),
        "list" | "ls" => Command::List,
        "stats" => Command::Stats,
        "specialties" => Command::Specialties,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn required_name(verb: &'static str, rest: &str) -> CommandResult<String> {
    if rest.is_empty() {
        Err(CommandError::MissingName(verb))
    } else {
        Ok(rest.to_string())
    }
}

/// Split `name;phone;date;time;specialty[;emergency]` into a form.
///
/// Field content is left for `Registration::validate`.
fn parse_registration(rest: &str) -> CommandResult<Registration> {
    let fields: Vec<&str> = rest.split(FIELD_SEPARATOR).map(str::trim).collect();
    if !(5..=6).contains(&fields.len()) {
        return Err(CommandError::FieldCount(fields.len()));
    }

    let is_emergency = match fields.get(5) {
        None | Some(&"") => false,
        Some(flag) if flag.eq_ignore_ascii_case("emergency") => true,
        Some(flag) => return Err(CommandError::InvalidFlag(flag.to_string())),
    };

    Ok(Registration {
        name: fields[0].to_string(),
        phone: fields[1].to_string(),
        date: fields[2].to_string(),
        time: fields[3].to_string(),
        specialty: fields[4].to_string(),
        is_emergency,
    })
}

pub const HELP: &str = "\
Commands:
  register <name>;<phone>;[DD/MM/YYYY];[HH:MM];<specialty>[;emergency]
                       blank date/time default to now
  next                 call the next patient
  peek                 show who is next
  cancel <name>        cancel the first appointment under <name>
  find <name>          position and estimated wait for <name>
  list                 show the queue
  stats                show queue statistics
  specialties          list specialties
  help                 show this help
  quit                 exit";

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_register() {
        let cmd = parse_line("register Ana;111;01/01/2030;09:00;Pediatría")
            .unwrap()
            .unwrap();
        match cmd {
            Command::Register(reg) => {
                assert_eq!(reg.name, "Ana");
                assert_eq!(reg.phone, "111");
                assert_eq!(reg.specialty, "Pediatría");
                assert!(!reg.is_emergency);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_register_emergency() {
        let cmd = parse_line("register Beto ; 222 ; 01/01/2030 ; 09:05 ; Cardiología ; EMERGENCY")
            .unwrap()
            .unwrap();
        assert!(matches!(cmd, Command::Register(ref r) if r.is_emergency && r.name == "Beto"));
        assert!(cmd.is_mutation());
    }

    #[test]
    fn test_parse_register_errors() {
        assert_eq!(
            parse_line("register Ana;111"),
            Err(CommandError::FieldCount(2))
        );
        assert_eq!(
            parse_line("register Ana;111;01/01/2030;09:00;Pediatría;soon"),
            Err(CommandError::InvalidFlag("soon".into()))
        );
    }

    #[test]
    fn test_parse_name_commands() {
        assert_eq!(
            parse_line("cancel  María José ").unwrap(),
            Some(Command::Cancel("María José".into()))
        );
        assert_eq!(
            parse_line("FIND ana").unwrap(),
            Some(Command::Find("ana".into()))
        );
        assert_eq!(parse_line("cancel"), Err(CommandError::MissingName("cancel")));
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_line("  ").unwrap(), None);
        assert_eq!(parse_line("next").unwrap(), Some(Command::CallNext));
        assert_eq!(parse_line("list").unwrap(), Some(Command::List));
        assert_eq!(parse_line("quit").unwrap(), Some(Command::Quit));
        assert_eq!(
            parse_line("dance"),
            Err(CommandError::Unknown("dance".into()))
        );
        assert!(!Command::Stats.is_mutation());
    }

    proptest! {
        #[test]
        fn prop_register_fields_survive_parsing(
            name in "[A-Za-z][A-Za-z ]{0,20}[A-Za-z]",
            phone in "[0-9]{1,12}",
            emergency in any::<bool>(),
        ) {
            let flag = if emergency { ";emergency" } else { "" };
            let line = format!("register {name};{phone};01/01/2030;09:00;Neurología{flag}");
            let cmd = parse_line(&line).unwrap().unwrap();
            match cmd {
                Command::Register(reg) => {
                    prop_assert_eq!(reg.name, name);
                    prop_assert_eq!(reg.phone, phone);
                    prop_assert_eq!(reg.is_emergency, emergency);
                }
                other => prop_assert!(false, "unexpected command: {:?}", other),
            }
        }
    }
}
