//! Phonebook service layer.
//!
//! The sole mutator and query surface over the in-memory contact
//! collection: validation, uniqueness, duplicate-name advisories, sorting,
//! search, and write-through persistence.

use crate::domain::{DomainWarning, PhoneNumber, ValidationError, DEFAULT_REGION};
use crate::error::{PhoneBookError, PhoneBookResult};
use crate::models::{Contact, PhoneBookState};
use crate::normalizer::PhoneNumberNormalizer;
use crate::storage::PhoneBookStateStorage;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::debug;

/// Owns the live [`PhoneBookState`] and coordinates every operation on it.
///
/// State is hydrated from storage exactly once, at construction; every
/// successful mutation is followed synchronously by a full-state persist
/// (write-through, no batching). One service instance is the exclusive
/// in-process owner of its state.
///
/// Two separate processes pointed at the same backing file still race: the
/// storage's replace protocol prevents torn reads, but there is no
/// cross-process locking, so the last writer wins.
pub struct PhoneBookService {
    storage: Arc<dyn PhoneBookStateStorage>,
    normalizer: Arc<dyn PhoneNumberNormalizer>,
    state: PhoneBookState,
    default_region: String,
}

impl PhoneBookService {
    /// Create a service over `storage`, hydrating state immediately.
    ///
    /// # Errors
    ///
    /// Fails fast with a `StorageError` when the backing store reports
    /// corruption or cannot be read.
    pub fn new(
        storage: Arc<dyn PhoneBookStateStorage>,
        normalizer: Arc<dyn PhoneNumberNormalizer>,
    ) -> PhoneBookResult<Self> {
        Self::with_default_region(storage, normalizer, DEFAULT_REGION)
    }

    /// Like [`PhoneBookService::new`], with an explicit default region for
    /// phone normalization.
    pub fn with_default_region(
        storage: Arc<dyn PhoneBookStateStorage>,
        normalizer: Arc<dyn PhoneNumberNormalizer>,
        default_region: &str,
    ) -> PhoneBookResult<Self> {
        let state = storage.load()?;
        debug!(contacts = state.contacts.len(), "phonebook service hydrated");

        Ok(Self {
            storage,
            normalizer,
            state,
            default_region: default_region.to_string(),
        })
    }

    /// All contacts, sorted by `(first name, last name, E.164)`.
    ///
    /// Comparison is case-sensitive and ordinal on each key in turn; an
    /// absent last name sorts before a present one at equal first name.
    /// Pure read, no persistence side effect.
    pub fn list_all(&self) -> Vec<Contact> {
        let mut contacts = self.state.contacts.clone();
        contacts.sort_by(compare_contacts);
        contacts
    }

    /// Normalize raw input into a [`PhoneNumber`] using the service's
    /// default region.
    ///
    /// # Errors
    ///
    /// Validation errors from the normalizer surface verbatim.
    pub fn create_phone_number(&self, raw: &str) -> PhoneBookResult<PhoneNumber> {
        let phone =
            PhoneNumber::create(raw, self.normalizer.as_ref(), Some(&self.default_region))?;
        Ok(phone)
    }

    /// Add a contact, persist, and report duplicate-name advisories.
    ///
    /// # Errors
    ///
    /// `DuplicatePhoneNumber` when an existing contact shares the
    /// candidate's E.164; storage errors from the persist step.
    pub fn add(&mut self, contact: Contact) -> PhoneBookResult<(Contact, Vec<DomainWarning>)> {
        self.ensure_unique_phone(contact.phone_number().e164(), None)?;

        let warnings = self.duplicate_name_warnings(&contact, None);

        self.state.contacts.push(contact.clone());
        self.persist()?;
        debug!(e164 = contact.phone_number().e164(), "contact added");

        Ok((contact, warnings))
    }

    /// Look up a contact by phone number (raw or canonical input).
    ///
    /// # Errors
    ///
    /// `Validation` when the input is blank or cannot be normalized;
    /// `ContactNotFound` when no contact matches.
    pub fn get_by_phone(&self, phone: &str) -> PhoneBookResult<Contact> {
        let e164 = self.normalize_phone_key(phone)?;

        self.find_by_e164(&e164)
            .cloned()
            .ok_or(PhoneBookError::ContactNotFound(e164))
    }

    /// Remove a contact by phone number and persist.
    ///
    /// # Errors
    ///
    /// Same lookup failures as [`PhoneBookService::get_by_phone`]; storage
    /// errors from the persist step.
    pub fn delete_by_phone(&mut self, phone: &str) -> PhoneBookResult<()> {
        let e164 = self.normalize_phone_key(phone)?;

        let index = self
            .state
            .contacts
            .iter()
            .position(|c| c.phone_number().e164() == e164)
            .ok_or(PhoneBookError::ContactNotFound(e164))?;

        let removed = self.state.contacts.remove(index);
        self.persist()?;
        debug!(e164 = removed.phone_number().e164(), "contact deleted");

        Ok(())
    }

    /// Replace the contact stored under `original_phone` with `updated`.
    ///
    /// The replacement is identity-preserving: the record keeps its position
    /// in the collection. Duplicate-name advisories are computed against all
    /// contacts except the original.
    ///
    /// # Errors
    ///
    /// `ContactNotFound` when `original_phone` matches nothing;
    /// `DuplicatePhoneNumber` when the updated contact's E.164 changed and
    /// collides with a different existing contact; storage errors from the
    /// persist step.
    pub fn update(
        &mut self,
        original_phone: &str,
        updated: Contact,
    ) -> PhoneBookResult<(Contact, Vec<DomainWarning>)> {
        let original_e164 = self.normalize_phone_key(original_phone)?;

        let index = self
            .state
            .contacts
            .iter()
            .position(|c| c.phone_number().e164() == original_e164)
            .ok_or_else(|| PhoneBookError::ContactNotFound(original_e164.clone()))?;

        self.ensure_unique_phone(updated.phone_number().e164(), Some(&original_e164))?;

        let warnings = self.duplicate_name_warnings(&updated, Some(&original_e164));

        self.state.contacts[index] = updated.clone();
        self.persist()?;
        debug!(
            original = %original_e164,
            e164 = updated.phone_number().e164(),
            "contact updated"
        );

        Ok((updated, warnings))
    }

    /// Exact-match search across names and phone forms.
    ///
    /// A blank query yields an empty result, not an error. A contact matches
    /// when the query equals its first name, its last name (when present) or
    /// its raw phone form case-insensitively, or when the query itself
    /// normalizes to the contact's canonical E.164. Normalization failure on
    /// the query is treated as "does not match", never as an error. Results
    /// sort like [`PhoneBookService::list_all`].
    pub fn search_exact(&self, query: &str) -> Vec<Contact> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let query_e164 = self.try_normalize(query);

        let mut found: Vec<Contact> = self
            .state
            .contacts
            .iter()
            .filter(|c| {
                eq_ci(c.first_name(), query)
                    || c.last_name().is_some_and(|last| eq_ci(last, query))
                    || eq_ci(c.phone_number().raw(), query)
                    || query_e164
                        .as_deref()
                        .is_some_and(|q| c.phone_number().e164() == q)
            })
            .cloned()
            .collect();

        found.sort_by(compare_contacts);
        found
    }

    fn persist(&self) -> PhoneBookResult<()> {
        self.storage.save(&self.state)?;
        Ok(())
    }

    fn find_by_e164(&self, e164: &str) -> Option<&Contact> {
        self.state
            .contacts
            .iter()
            .find(|c| c.phone_number().e164() == e164)
    }

    /// Phone uniqueness by exact E.164 match, optionally excluding one
    /// canonical number (the record being updated).
    fn ensure_unique_phone(&self, new_e164: &str, except_e164: Option<&str>) -> PhoneBookResult<()> {
        let exists = self.state.contacts.iter().any(|c| {
            c.phone_number().e164() == new_e164
                && except_e164.map_or(true, |except| c.phone_number().e164() != except)
        });

        if exists {
            return Err(PhoneBookError::DuplicatePhoneNumber {
                e164: new_e164.to_string(),
            });
        }

        Ok(())
    }

    /// Advisory-only duplicate-name detection.
    ///
    /// A candidate collides with another contact when the trimmed first
    /// names compare equal case-insensitively AND the last names are either
    /// both absent or both present and equal the same way. Internal
    /// whitespace is not normalized. Never blocks the write.
    fn duplicate_name_warnings(
        &self,
        candidate: &Contact,
        except_e164: Option<&str>,
    ) -> Vec<DomainWarning> {
        let duplicate = self.state.contacts.iter().any(|c| {
            if except_e164.is_some_and(|except| c.phone_number().e164() == except) {
                return false;
            }

            let same_first = eq_ci(c.first_name(), candidate.first_name());

            let same_last = match (c.last_name(), candidate.last_name()) {
                (None, None) => true,
                (Some(a), Some(b)) => eq_ci(a, b),
                _ => false,
            };

            same_first && same_last
        });

        if !duplicate {
            return Vec::new();
        }

        vec![DomainWarning::duplicate_name(
            candidate.first_name(),
            candidate.last_name(),
        )]
    }

    /// Normalize a lookup key, failing on blank or unnormalizable input.
    fn normalize_phone_key(&self, phone: &str) -> PhoneBookResult<String> {
        let phone = phone.trim();
        if phone.is_empty() {
            return Err(ValidationError::MissingPhone.into());
        }

        self.try_normalize(phone)
            .ok_or_else(|| ValidationError::InvalidPhone(phone.to_string()).into())
    }

    /// Best-effort normalization: failures soften to `None`.
    fn try_normalize(&self, raw: &str) -> Option<String> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        self.normalizer.to_e164(raw, &self.default_region).ok()
    }
}

fn compare_contacts(a: &Contact, b: &Contact) -> Ordering {
    a.first_name()
        .cmp(b.first_name())
        .then_with(|| {
            a.last_name()
                .unwrap_or("")
                .cmp(b.last_name().unwrap_or(""))
        })
        .then_with(|| a.phone_number().e164().cmp(b.phone_number().e164()))
}

fn eq_ci(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContactDetails;
    use crate::storage::InMemoryPhoneBookStateStorage;

    /// Accepts `+` followed by digits verbatim, rejects everything else.
    struct FakeNormalizer;

    impl PhoneNumberNormalizer for FakeNormalizer {
        fn to_e164(&self, raw: &str, _default_region: &str) -> Result<String, ValidationError> {
            let trimmed = raw.trim();
            if trimmed.len() < 2 || !trimmed.starts_with('+') {
                return Err(ValidationError::InvalidPhone(raw.to_string()));
            }
            if !trimmed[1..].chars().all(|c| c.is_ascii_digit()) {
                return Err(ValidationError::InvalidPhone(raw.to_string()));
            }
            Ok(trimmed.to_string())
        }
    }

    fn service() -> PhoneBookService {
        service_on(Arc::new(InMemoryPhoneBookStateStorage::new()))
    }

    fn service_on(storage: Arc<InMemoryPhoneBookStateStorage>) -> PhoneBookService {
        PhoneBookService::new(storage, Arc::new(FakeNormalizer)).unwrap()
    }

    fn contact(service: &PhoneBookService, phone: &str, first: &str, last: Option<&str>) -> Contact {
        let phone = service.create_phone_number(phone).unwrap();
        Contact::new(
            phone,
            ContactDetails {
                first_name: first.to_string(),
                last_name: last.map(str::to_string),
                ..ContactDetails::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn test_list_all_sorts_by_first_last_then_e164() {
        let mut service = service();
        service
            .add(contact(&service, "+40710000003", "Maria", Some("Pop")))
            .unwrap();
        service
            .add(contact(&service, "+40710000002", "Ana", Some("Pop")))
            .unwrap();
        service
            .add(contact(&service, "+40710000001", "Ana", None))
            .unwrap();
        service
            .add(contact(&service, "+40710000004", "Ana", Some("Pop")))
            .unwrap();

        let all = service.list_all();
        let keys: Vec<_> = all
            .iter()
            .map(|c| (c.first_name(), c.last_name(), c.phone_number().e164()))
            .collect();

        // Absent last name sorts before a present one at equal first name.
        assert_eq!(
            keys,
            vec![
                ("Ana", None, "+40710000001"),
                ("Ana", Some("Pop"), "+40710000002"),
                ("Ana", Some("Pop"), "+40710000004"),
                ("Maria", Some("Pop"), "+40710000003"),
            ]
        );
    }

    #[test]
    fn test_list_all_is_idempotent() {
        let mut service = service();
        service
            .add(contact(&service, "+40710000002", "Maria", None))
            .unwrap();
        service
            .add(contact(&service, "+40710000001", "Ana", None))
            .unwrap();

        assert_eq!(service.list_all(), service.list_all());
    }

    #[test]
    fn test_sorting_is_case_sensitive_ordinal() {
        let mut service = service();
        service
            .add(contact(&service, "+40710000001", "ana", None))
            .unwrap();
        service
            .add(contact(&service, "+40710000002", "Bogdan", None))
            .unwrap();

        let all = service.list_all();
        // Ordinal comparison puts uppercase before lowercase.
        assert_eq!(all[0].first_name(), "Bogdan");
        assert_eq!(all[1].first_name(), "ana");
    }

    #[test]
    fn test_add_rejects_duplicate_phone_without_mutating_state() {
        let mut service = service();
        service
            .add(contact(&service, "+40710000001", "Ana", None))
            .unwrap();

        let result = service.add(contact(&service, "+40710000001", "Maria", None));
        assert!(matches!(
            result,
            Err(PhoneBookError::DuplicatePhoneNumber { ref e164 }) if e164 == "+40710000001"
        ));

        let all = service.list_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].first_name(), "Ana");
    }

    #[test]
    fn test_get_by_phone_normalizes_key() {
        let mut service = service();
        service
            .add(contact(&service, "+40710000001", "Ana", None))
            .unwrap();

        let found = service.get_by_phone("  +40710000001  ").unwrap();
        assert_eq!(found.first_name(), "Ana");
    }

    #[test]
    fn test_get_by_phone_failures() {
        let service = service();

        assert!(matches!(
            service.get_by_phone("   "),
            Err(PhoneBookError::Validation(ValidationError::MissingPhone))
        ));
        assert!(matches!(
            service.get_by_phone("not a phone"),
            Err(PhoneBookError::Validation(ValidationError::InvalidPhone(_)))
        ));
        assert!(matches!(
            service.get_by_phone("+40719999999"),
            Err(PhoneBookError::ContactNotFound(_))
        ));
    }

    #[test]
    fn test_delete_then_get_fails() {
        let mut service = service();
        service
            .add(contact(&service, "+40710000001", "Ana", None))
            .unwrap();

        service.delete_by_phone("+40710000001").unwrap();

        assert!(matches!(
            service.get_by_phone("+40710000001"),
            Err(PhoneBookError::ContactNotFound(_))
        ));
        assert!(matches!(
            service.delete_by_phone("+40710000001"),
            Err(PhoneBookError::ContactNotFound(_))
        ));
    }

    #[test]
    fn test_update_replaces_in_place() {
        let mut service = service();
        service
            .add(contact(&service, "+40710000001", "Ana", None))
            .unwrap();
        service
            .add(contact(&service, "+40710000002", "Maria", None))
            .unwrap();

        let mut draft = service.get_by_phone("+40710000001").unwrap();
        draft
            .update_details(ContactDetails {
                first_name: "Ana Maria".to_string(),
                ..draft.details()
            })
            .unwrap();

        let (updated, warnings) = service.update("+40710000001", draft).unwrap();
        assert_eq!(updated.first_name(), "Ana Maria");
        assert!(warnings.is_empty());

        // Same number of records, same identity, new details.
        let all = service.list_all();
        assert_eq!(all.len(), 2);
        assert_eq!(
            service.get_by_phone("+40710000001").unwrap().first_name(),
            "Ana Maria"
        );
    }

    #[test]
    fn test_update_unchanged_phone_does_not_conflict_with_itself() {
        let mut service = service();
        service
            .add(contact(&service, "+40710000001", "Ana", None))
            .unwrap();

        let draft = service.get_by_phone("+40710000001").unwrap();
        let result = service.update("+40710000001", draft);
        assert!(result.is_ok());
    }

    #[test]
    fn test_update_to_foreign_phone_fails_and_leaves_records_unchanged() {
        let mut service = service();
        service
            .add(contact(&service, "+40710000001", "Ana", None))
            .unwrap();
        service
            .add(contact(&service, "+40710000002", "Maria", None))
            .unwrap();

        let ana = service.get_by_phone("+40710000001").unwrap();
        let rekeyed = ana.with_phone_number(service.create_phone_number("+40710000002").unwrap());

        let result = service.update("+40710000001", rekeyed);
        assert!(matches!(
            result,
            Err(PhoneBookError::DuplicatePhoneNumber { ref e164 }) if e164 == "+40710000002"
        ));

        // Both originals intact.
        assert_eq!(
            service.get_by_phone("+40710000001").unwrap().first_name(),
            "Ana"
        );
        assert_eq!(
            service.get_by_phone("+40710000002").unwrap().first_name(),
            "Maria"
        );
    }

    #[test]
    fn test_update_missing_original_fails() {
        let mut service = service();
        let draft = contact(&service, "+40710000001", "Ana", None);

        assert!(matches!(
            service.update("+40719999999", draft),
            Err(PhoneBookError::ContactNotFound(_))
        ));
    }

    #[test]
    fn test_persistence_across_service_instances() {
        let storage = Arc::new(InMemoryPhoneBookStateStorage::new());

        let mut first = service_on(storage.clone());
        first
            .add(contact(&first, "+40710000001", "Ana", None))
            .unwrap();

        let second = service_on(storage);
        let all = second.list_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].phone_number().e164(), "+40710000001");
    }

    #[test]
    fn test_search_blank_query_is_empty_not_an_error() {
        let mut service = service();
        service
            .add(contact(&service, "+40710000001", "Ana", None))
            .unwrap();

        assert!(service.search_exact("").is_empty());
        assert!(service.search_exact("   ").is_empty());
    }

    #[test]
    fn test_search_matches_names_case_insensitively() {
        let mut service = service();
        service
            .add(contact(&service, "+40710000001", "Ana", Some("Pop")))
            .unwrap();

        assert_eq!(service.search_exact("ana").len(), 1);
        assert_eq!(service.search_exact("POP").len(), 1);
        assert_eq!(service.search_exact("an").len(), 0);
    }

    #[test]
    fn test_search_matches_raw_and_canonical_phone() {
        let mut service = service();
        // Raw form deliberately differs from the canonical form.
        let phone = crate::domain::PhoneNumber::from_e164(
            "+40710000001",
            Some("0710-000-001".to_string()),
        )
        .unwrap();
        let ana = Contact::new(
            phone,
            ContactDetails {
                first_name: "Ana".to_string(),
                ..ContactDetails::default()
            },
        )
        .unwrap();
        service.add(ana).unwrap();

        // Query equal to the raw form (trimmed, case-insensitive).
        assert_eq!(service.search_exact(" 0710-000-001 ").len(), 1);
        // Query that normalizes to the canonical form.
        assert_eq!(service.search_exact("+40710000001").len(), 1);
        // Unnormalizable query is "no match", not an error.
        assert!(service.search_exact("gibberish").is_empty());
    }

    #[test]
    fn test_search_results_are_sorted() {
        let mut service = service();
        service
            .add(contact(&service, "+40710000002", "Ana", Some("Pop")))
            .unwrap();
        service
            .add(contact(&service, "+40710000001", "Ana", None))
            .unwrap();

        let found = service.search_exact("Ana");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].phone_number().e164(), "+40710000001");
        assert_eq!(found[1].phone_number().e164(), "+40710000002");
    }

    #[test]
    fn test_add_warns_on_duplicate_name() {
        let mut service = service();
        service
            .add(contact(&service, "+40710000001", "Ana", Some("Pop")))
            .unwrap();

        let (_, warnings) = service
            .add(contact(&service, "+40710000002", "  ana ", Some("POP")))
            .unwrap();

        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code().as_str(), "DUPLICATE_NAME");
    }

    #[test]
    fn test_no_warning_when_last_name_presence_differs() {
        let mut service = service();
        service
            .add(contact(&service, "+40710000001", "Ana", Some("Pop")))
            .unwrap();

        let (_, warnings) = service
            .add(contact(&service, "+40710000002", "Ana", None))
            .unwrap();

        assert!(warnings.is_empty());
    }

    #[test]
    fn test_internal_whitespace_is_not_normalized_in_name_comparison() {
        let mut service = service();
        service
            .add(contact(&service, "+40710000001", "Ana Maria", None))
            .unwrap();

        let (_, warnings) = service
            .add(contact(&service, "+40710000002", "Ana  Maria", None))
            .unwrap();

        assert!(warnings.is_empty());
    }

    #[test]
    fn test_update_warnings_exclude_the_original_record() {
        let mut service = service();
        service
            .add(contact(&service, "+40710000001", "Ana", Some("Pop")))
            .unwrap();
        service
            .add(contact(&service, "+40710000002", "Maria", Some("Ionescu")))
            .unwrap();

        // Re-saving a contact under its own name must not warn about itself.
        let draft = service.get_by_phone("+40710000001").unwrap();
        let (_, warnings) = service.update("+40710000001", draft).unwrap();
        assert!(warnings.is_empty());

        // Renaming onto the other contact's name does warn.
        let mut draft = service.get_by_phone("+40710000001").unwrap();
        draft
            .update_details(ContactDetails {
                first_name: "Maria".to_string(),
                last_name: Some("Ionescu".to_string()),
                ..draft.details()
            })
            .unwrap();
        let (_, warnings) = service.update("+40710000001", draft).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code().as_str(), "DUPLICATE_NAME");
    }

    #[test]
    fn test_fails_fast_when_storage_is_corrupt_at_construction() {
        use crate::error::StorageError;
        use crate::error::StorageResult;

        struct CorruptStorage;

        impl PhoneBookStateStorage for CorruptStorage {
            fn load(&self) -> StorageResult<PhoneBookState> {
                Err(StorageError::InvalidRecord(ValidationError::CorruptedPhone(
                    "12345".to_string(),
                )))
            }

            fn save(&self, _state: &PhoneBookState) -> StorageResult<()> {
                Ok(())
            }
        }

        let result = PhoneBookService::new(Arc::new(CorruptStorage), Arc::new(FakeNormalizer));
        assert!(matches!(result, Err(PhoneBookError::Storage(_))));
    }
}
