//! Interactive console front end.
//!
//! A line-based command loop over the service. Every command runs to
//! completion; domain and storage errors are rendered and the loop keeps
//! going, so a single bad command never terminates the process.

use crate::domain::DomainWarning;
use crate::error::PhoneBookError;
use crate::models::{Contact, ContactDetails, Ringtone};
use crate::services::PhoneBookService;
use chrono::NaiveDate;
use std::io::{self, BufRead, Write};
use tracing::warn;

const CANCEL: &str = "!cancel";

/// Run the command loop until `quit` or end of input.
pub fn run(service: &mut PhoneBookService) -> io::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    println!("Phonebook ready. Type 'help' for commands.");

    loop {
        print!("phonebook> ");
        io::stdout().flush()?;

        let Some(line) = read_line(&mut input)? else {
            return Ok(());
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let outcome = match verb {
            "quit" | "exit" => return Ok(()),
            "help" => {
                print_help();
                Ok(())
            }
            "list" => {
                render_contacts(&service.list_all());
                Ok(())
            }
            "show" => show(service, rest),
            "add" => add(service, &mut input),
            "edit" => edit(service, rest, &mut input),
            "delete" => delete(service, rest, &mut input),
            "search" => {
                render_contacts(&service.search_exact(rest));
                Ok(())
            }
            other => {
                println!("Unknown command: {}. Type 'help' for commands.", other);
                Ok(())
            }
        };

        match outcome {
            Ok(()) => {}
            Err(CommandError::Cancelled) => println!("! Cancelled."),
            Err(CommandError::Domain(err)) => {
                println!("✗ {}", err);
                warn!(error = %err, "command failed");
            }
            Err(CommandError::Io(err)) => return Err(err),
        }
    }
}

enum CommandError {
    /// The user abandoned the command at a prompt.
    Cancelled,
    Domain(PhoneBookError),
    Io(io::Error),
}

impl From<PhoneBookError> for CommandError {
    fn from(err: PhoneBookError) -> Self {
        Self::Domain(err)
    }
}

impl From<io::Error> for CommandError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

fn show(service: &PhoneBookService, phone: &str) -> Result<(), CommandError> {
    let contact = service.get_by_phone(phone)?;
    render_contact_card(&contact);
    Ok(())
}

fn add(service: &mut PhoneBookService, input: &mut impl BufRead) -> Result<(), CommandError> {
    println!("Add contact (optional fields: press Enter to skip, '{}' to abort).", CANCEL);

    let phone = loop {
        let raw = prompt_required(input, "Phone number: ")?;
        match service.create_phone_number(&raw) {
            Ok(phone) => break phone,
            Err(err) => println!("! Invalid phone: {}", err),
        }
    };

    let first_name = prompt_required(input, "First name: ")?;
    let last_name = prompt_optional(input, "Last name: ")?;
    let email = prompt_optional(input, "Email: ")?;
    let pronouns = prompt_optional(input, "Pronouns: ")?;
    let ringtone = prompt_ringtone(input, Ringtone::Default)?;
    let birthday = prompt_birthday(input, None)?;
    let notes = prompt_optional(input, "Notes: ")?;

    let contact = Contact::new(
        phone,
        ContactDetails {
            first_name,
            last_name,
            email,
            pronouns,
            ringtone,
            birthday,
            notes,
        },
    )
    .map_err(PhoneBookError::from)?;

    let (added, warnings) = service.add(contact)?;
    println!("✓ Contact added: {}", added.phone_number().e164());
    render_warnings(&warnings);
    Ok(())
}

fn edit(
    service: &mut PhoneBookService,
    phone: &str,
    input: &mut impl BufRead,
) -> Result<(), CommandError> {
    let original = service.get_by_phone(phone)?;

    println!(
        "Edit {} (press Enter to keep the current value, '{}' to abort).",
        original.phone_number().e164(),
        CANCEL
    );

    // Work on a draft; nothing touches the stored record until the final
    // update call, so aborting at any prompt discards every change.
    let mut draft = original.clone();

    let new_phone = loop {
        let answer = prompt_with_default(
            input,
            &format!("Phone number [{}]: ", original.phone_number().raw()),
        )?;
        match answer {
            None => break None,
            Some(raw) => match service.create_phone_number(&raw) {
                Ok(phone) => break Some(phone),
                Err(err) => println!("! Invalid phone: {}", err),
            },
        }
    };

    let current = original.details();
    let first_name = prompt_with_default(
        input,
        &format!("First name [{}]: ", current.first_name),
    )?
    .unwrap_or(current.first_name);
    let last_name = prompt_optional_with_default(input, "Last name", current.last_name)?;
    let email = prompt_optional_with_default(input, "Email", current.email)?;
    let pronouns = prompt_optional_with_default(input, "Pronouns", current.pronouns)?;
    let ringtone = prompt_ringtone(input, current.ringtone)?;
    let birthday = prompt_birthday(input, current.birthday)?;
    let notes = prompt_optional_with_default(input, "Notes", current.notes)?;

    draft
        .update_details(ContactDetails {
            first_name,
            last_name,
            email,
            pronouns,
            ringtone,
            birthday,
            notes,
        })
        .map_err(PhoneBookError::from)?;

    if let Some(new_phone) = new_phone {
        draft = draft.with_phone_number(new_phone);
    }

    let (updated, warnings) = service.update(original.phone_number().e164(), draft)?;
    println!("✓ Contact updated: {}", updated.phone_number().e164());
    render_warnings(&warnings);
    Ok(())
}

fn delete(
    service: &mut PhoneBookService,
    phone: &str,
    input: &mut impl BufRead,
) -> Result<(), CommandError> {
    let contact = service.get_by_phone(phone)?;
    println!(
        "Delete {} ({})?",
        contact.first_name(),
        contact.phone_number().e164()
    );

    let answer = prompt_required(input, "Confirm [y/N]: ")?;
    if !answer.eq_ignore_ascii_case("y") {
        return Err(CommandError::Cancelled);
    }

    service.delete_by_phone(contact.phone_number().e164())?;
    println!("✓ Contact deleted.");
    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  list              show all contacts");
    println!("  show <phone>      show one contact");
    println!("  add               add a contact");
    println!("  edit <phone>      edit a contact");
    println!("  delete <phone>    delete a contact");
    println!("  search <query>    exact match on name or phone");
    println!("  help              this text");
    println!("  quit              leave");
}

fn render_contacts(contacts: &[Contact]) {
    if contacts.is_empty() {
        println!("(no contacts)");
        return;
    }
    for contact in contacts {
        let last = contact.last_name().map(|l| format!(" {}", l)).unwrap_or_default();
        println!(
            "{}{}  {}",
            contact.first_name(),
            last,
            contact.phone_number().e164()
        );
    }
}

fn render_contact_card(contact: &Contact) {
    println!("Phone:     {} (raw: {})", contact.phone_number().e164(), contact.phone_number().raw());
    println!("Name:      {}", contact.first_name());
    if let Some(last) = contact.last_name() {
        println!("Last name: {}", last);
    }
    if let Some(email) = contact.email() {
        println!("Email:     {}", email);
    }
    if let Some(pronouns) = contact.pronouns() {
        println!("Pronouns:  {}", pronouns);
    }
    println!("Ringtone:  {}", contact.ringtone());
    if let Some(birthday) = contact.birthday() {
        println!("Birthday:  {}", birthday);
    }
    if let Some(notes) = contact.notes() {
        println!("Notes:     {}", notes);
    }
}

fn render_warnings(warnings: &[DomainWarning]) {
    for warning in warnings {
        println!("! {}", warning.message());
    }
}

fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    let read = input.read_line(&mut line)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

/// Prompt until a non-empty answer arrives. EOF or the cancel word aborts.
fn prompt_required(input: &mut impl BufRead, label: &str) -> Result<String, CommandError> {
    loop {
        print!("{}", label);
        io::stdout().flush().map_err(CommandError::Io)?;

        let Some(line) = read_line(input)? else {
            return Err(CommandError::Cancelled);
        };
        let line = line.trim();
        if line == CANCEL {
            return Err(CommandError::Cancelled);
        }
        if !line.is_empty() {
            return Ok(line.to_string());
        }
    }
}

/// Prompt once; an empty answer means "skip" (`None`).
fn prompt_optional(input: &mut impl BufRead, label: &str) -> Result<Option<String>, CommandError> {
    print!("{}", label);
    io::stdout().flush().map_err(CommandError::Io)?;

    let Some(line) = read_line(input)? else {
        return Err(CommandError::Cancelled);
    };
    let line = line.trim();
    if line == CANCEL {
        return Err(CommandError::Cancelled);
    }
    if line.is_empty() {
        return Ok(None);
    }
    Ok(Some(line.to_string()))
}

/// Prompt once; an empty answer means "keep the current value" (`None`).
fn prompt_with_default(
    input: &mut impl BufRead,
    label: &str,
) -> Result<Option<String>, CommandError> {
    prompt_optional(input, label)
}

/// Edit-mode optional field: Enter keeps `current`, '-' clears it.
fn prompt_optional_with_default(
    input: &mut impl BufRead,
    name: &str,
    current: Option<String>,
) -> Result<Option<String>, CommandError> {
    let shown = current.as_deref().unwrap_or("-");
    let answer = prompt_optional(input, &format!("{} [{}]: ", name, shown))?;
    match answer {
        None => Ok(current),
        Some(value) if value == "-" => Ok(None),
        Some(value) => Ok(Some(value)),
    }
}

fn prompt_ringtone(
    input: &mut impl BufRead,
    current: Ringtone,
) -> Result<Ringtone, CommandError> {
    let names: Vec<&str> = Ringtone::ALL.iter().map(|r| r.name()).collect();
    loop {
        let answer = prompt_optional(
            input,
            &format!("Ringtone ({}) [{}]: ", names.join("/"), current),
        )?;
        match answer {
            None => return Ok(current),
            Some(name) => match Ringtone::parse(&name) {
                Some(ringtone) => return Ok(ringtone),
                None => println!("! Unknown ringtone: {}", name),
            },
        }
    }
}

fn prompt_birthday(
    input: &mut impl BufRead,
    current: Option<NaiveDate>,
) -> Result<Option<NaiveDate>, CommandError> {
    let shown = current.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string());
    loop {
        let answer = prompt_optional(input, &format!("Birthday (yyyy-mm-dd) [{}]: ", shown))?;
        match answer {
            None => return Ok(current),
            Some(value) if value == "-" => return Ok(None),
            Some(value) => match NaiveDate::parse_from_str(&value, "%Y-%m-%d") {
                Ok(date) => return Ok(Some(date)),
                Err(_) => println!("! Not a date: {}", value),
            },
        }
    }
}
