//! End-to-end persistence through the JSON file backend.

mod support;

use chrono::NaiveDate;
use phonebook::storage::JsonFilePhoneBookStateStorage;
use phonebook::{PhoneBookError, PhoneBookService, Ringtone, StorageError};
use std::fs;
use std::sync::Arc;
use support::{ContactBuilder, FakePhoneNumberNormalizer};
use tempfile::TempDir;

fn file_service(dir: &TempDir) -> PhoneBookService {
    let storage = Arc::new(JsonFilePhoneBookStateStorage::at_path(
        dir.path().join("phonebook.json"),
    ));
    PhoneBookService::new(storage, Arc::new(FakePhoneNumberNormalizer))
        .expect("service should hydrate")
}

#[test]
fn first_run_is_an_empty_phonebook() {
    let dir = TempDir::new().unwrap();
    let service = file_service(&dir);
    assert!(service.list_all().is_empty());
}

#[test]
fn full_contact_round_trips_through_a_fresh_service() {
    let dir = TempDir::new().unwrap();

    let mut writer = file_service(&dir);
    let contact = ContactBuilder::create()
        .with_phone(writer.create_phone_number("+40710000001").unwrap())
        .with_first_name("Ana")
        .with_last_name("Pop")
        .with_email("ana@example.com")
        .with_pronouns("she/her")
        .with_ringtone(Ringtone::Marimba)
        .with_birthday(NaiveDate::from_ymd_opt(2000, 1, 2).unwrap())
        .with_notes("met at the conference")
        .build();
    writer.add(contact.clone()).unwrap();

    // A brand-new service over the same file sees the identical record.
    let reader = file_service(&dir);
    let reloaded = reader.get_by_phone("+40710000001").unwrap();

    assert_eq!(reloaded.phone_number().e164(), contact.phone_number().e164());
    assert_eq!(reloaded.phone_number().raw(), contact.phone_number().raw());
    assert_eq!(reloaded.first_name(), contact.first_name());
    assert_eq!(reloaded.last_name(), contact.last_name());
    assert_eq!(reloaded.email(), contact.email());
    assert_eq!(reloaded.pronouns(), contact.pronouns());
    assert_eq!(reloaded.ringtone(), contact.ringtone());
    assert_eq!(reloaded.birthday(), contact.birthday());
    assert_eq!(reloaded.notes(), contact.notes());
}

#[test]
fn every_mutation_is_written_through() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("phonebook.json");

    let mut service = file_service(&dir);
    let contact = ContactBuilder::create()
        .with_phone(service.create_phone_number("+40710000001").unwrap())
        .build();
    service.add(contact).unwrap();

    // The file is complete after add, without any explicit flush call.
    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("+40710000001"));

    service.delete_by_phone("+40710000001").unwrap();
    let written = fs::read_to_string(&path).unwrap();
    assert!(!written.contains("+40710000001"));
}

#[test]
fn corrupted_document_fails_loudly_at_construction() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("phonebook.json");
    fs::write(&path, "{ definitely not json").unwrap();

    let storage = Arc::new(JsonFilePhoneBookStateStorage::at_path(path));
    let result = PhoneBookService::new(storage, Arc::new(FakePhoneNumberNormalizer));

    assert!(matches!(
        result,
        Err(PhoneBookError::Storage(StorageError::Corrupted { .. }))
    ));
}

#[test]
fn stored_phone_without_plus_prefix_fails_the_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("phonebook.json");
    fs::write(
        &path,
        r#"{"schemaVersion":1,"contacts":[{"phoneE164":"12345","phoneRaw":"12345","firstName":"Ana"}]}"#,
    )
    .unwrap();

    let storage = Arc::new(JsonFilePhoneBookStateStorage::at_path(path));
    let result = PhoneBookService::new(storage, Arc::new(FakePhoneNumberNormalizer));

    // The record is not silently dropped; the whole load fails.
    assert!(matches!(
        result,
        Err(PhoneBookError::Storage(StorageError::InvalidRecord(_)))
    ));
}

#[test]
fn stored_record_violating_entity_invariants_fails_the_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("phonebook.json");
    fs::write(
        &path,
        r#"{"schemaVersion":1,"contacts":[{"phoneE164":"+40710000001","firstName":"   "}]}"#,
    )
    .unwrap();

    let storage = Arc::new(JsonFilePhoneBookStateStorage::at_path(path));
    let result = PhoneBookService::new(storage, Arc::new(FakePhoneNumberNormalizer));

    assert!(matches!(
        result,
        Err(PhoneBookError::Storage(StorageError::InvalidRecord(_)))
    ));
}

#[test]
fn rewrites_leave_only_the_canonical_file() {
    let dir = TempDir::new().unwrap();

    let mut service = file_service(&dir);
    for (i, phone) in ["+40710000001", "+40710000002", "+40710000003"]
        .into_iter()
        .enumerate()
    {
        let contact = ContactBuilder::create()
            .with_phone(service.create_phone_number(phone).unwrap())
            .with_first_name(&format!("Contact{}", i))
            .build();
        service.add(contact).unwrap();
    }

    let names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["phonebook.json".to_string()]);
}
