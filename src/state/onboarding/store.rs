//! Form values and the error map of the current validation pass

use super::field::FieldId;
use std::collections::BTreeMap;

/// Current value of every onboarding field.
///
/// Every `FieldId` is always present; values default to the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    values: BTreeMap<FieldId, String>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            values: FieldId::ALL
                .into_iter()
                .map(|id| (id, String::new()))
                .collect(),
        }
    }
}

impl FormState {
    pub fn value(&self, id: FieldId) -> &str {
        self.values.get(&id).map(String::as_str).unwrap_or_default()
    }

    /// Owned copy of a value, for building request bodies
    pub fn owned(&self, id: FieldId) -> String {
        self.value(id).to_string()
    }

    fn apply(&mut self, patch: FormPatch) {
        for (id, value) in patch.values {
            self.values.insert(id, value);
        }
    }
}

/// Partial update merged into the form state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPatch {
    values: BTreeMap<FieldId, String>,
}

impl FormPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(id: FieldId, value: impl Into<String>) -> Self {
        Self::new().with(id, value)
    }

    pub fn with(mut self, id: FieldId, value: impl Into<String>) -> Self {
        self.values.insert(id, value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Field error messages from the last validation pass.
///
/// An empty message means the field was checked and is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap {
    messages: BTreeMap<FieldId, String>,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: FieldId, message: impl Into<String>) {
        self.messages.insert(id, message.into());
    }

    /// Non-empty message for a field, if any
    pub fn message(&self, id: FieldId) -> Option<&str> {
        self.messages
            .get(&id)
            .map(String::as_str)
            .filter(|m| !m.is_empty())
    }

    /// Whether the field was part of the last pass
    #[cfg(test)]
    pub fn contains(&self, id: FieldId) -> bool {
        self.messages.contains_key(&id)
    }

    pub fn has_errors(&self) -> bool {
        self.messages.values().any(|m| !m.is_empty())
    }

    /// Fields that currently carry an error, in key order
    pub fn failing(&self) -> Vec<FieldId> {
        self.messages
            .iter()
            .filter(|(_, m)| !m.is_empty())
            .map(|(id, _)| *id)
            .collect()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Holds form values and the current error map
#[derive(Debug, Clone, Default)]
pub struct FormStore {
    values: FormState,
    errors: ErrorMap,
}

impl FormStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> &FormState {
        &self.values
    }

    /// Merge a patch into the current values, overwriting listed keys
    pub fn set(&mut self, patch: FormPatch) {
        self.values.apply(patch);
    }

    pub fn reset(&mut self) {
        self.values = FormState::default();
        self.errors = ErrorMap::default();
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// Replace the whole error map
    pub fn set_errors(&mut self, errors: ErrorMap) {
        self.errors = errors;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_has_every_key_empty() {
        let store = FormStore::new();
        for id in FieldId::ALL {
            assert_eq!(store.get().value(id), "");
        }
        assert!(store.errors().is_empty());
    }

    #[test]
    fn test_set_then_get() {
        let mut store = FormStore::new();
        store.set(FormPatch::single(FieldId::Name, "Asha"));
        assert_eq!(store.get().value(FieldId::Name), "Asha");
    }

    #[test]
    fn test_empty_patch_changes_nothing() {
        let mut store = FormStore::new();
        store.set(
            FormPatch::new()
                .with(FieldId::Email, "asha@example.com")
                .with(FieldId::Mobile, "9876543210"),
        );
        let before = store.get().clone();
        store.set(FormPatch::new());
        assert_eq!(store.get(), &before);
    }

    #[test]
    fn test_set_only_overwrites_listed_keys() {
        let mut store = FormStore::new();
        store.set(
            FormPatch::new()
                .with(FieldId::Email, "asha@example.com")
                .with(FieldId::Name, "Asha"),
        );
        store.set(FormPatch::single(FieldId::Name, "Ravi"));
        assert_eq!(store.get().value(FieldId::Email), "asha@example.com");
        assert_eq!(store.get().value(FieldId::Name), "Ravi");
    }

    #[test]
    fn test_reset_restores_defaults_and_clears_errors() {
        let mut store = FormStore::new();
        store.set(FormPatch::single(FieldId::Pan, "ABCDE1234F"));
        let mut errors = ErrorMap::new();
        errors.insert(FieldId::Gstn, "GSTIN is required");
        store.set_errors(errors);

        store.reset();

        assert_eq!(store.get(), &FormState::default());
        assert!(store.errors().is_empty());
    }

    #[test]
    fn test_error_map_empty_message_is_not_an_error() {
        let mut errors = ErrorMap::new();
        errors.insert(FieldId::Name, "");
        errors.insert(FieldId::Email, "Email is required");

        assert!(errors.contains(FieldId::Name));
        assert_eq!(errors.message(FieldId::Name), None);
        assert_eq!(errors.message(FieldId::Email), Some("Email is required"));
        assert_eq!(errors.failing(), vec![FieldId::Email]);
        assert!(errors.has_errors());
    }
}
