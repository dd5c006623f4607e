// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! State behind the advanced-search dialog of the inventory and contacts
//! listings.

use tracing::debug;

use crate::query::{ParamValue, SearchParams, is_values_empty, stringify_search_query};
use crate::{ContactType, ContactTypeId, ListEntry, MakeListEntry};

/// Number inputs stop accepting digits once the rendered value reaches this
/// many characters.
pub const INPUT_NUMBER_MAX_LENGTH: usize = 10;

pub const MAKE_FIELD: &str = "Make";
pub const MODEL_FIELD: &str = "Model";
pub const TYPE_FIELD: &str = "type";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchFormKind {
    Contacts,
    Inventory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchFieldKind {
    Text,
    Number,
    Dropdown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchField {
    pub key: String,
    pub label: Option<String>,
    pub value: Option<String>,
    pub kind: SearchFieldKind,
}

impl SearchField {
    pub fn new(key: impl Into<String>, kind: SearchFieldKind) -> Self {
        Self {
            key: key.into(),
            label: None,
            value: None,
            kind,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn display_label(&self) -> &str {
        self.label
            .as_deref()
            .filter(|label| !label.is_empty())
            .unwrap_or(&self.key)
    }

    fn has_value(&self) -> bool {
        self.value.as_deref().is_some_and(|value| !value.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Automakes,
    ContactTypes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropdownOption<'a> {
    pub label: &'a str,
    pub value: &'a str,
    pub logo: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchDialog {
    form: SearchFormKind,
    fields: Vec<SearchField>,
    automakes: Vec<MakeListEntry>,
    models: Vec<ListEntry>,
    contact_types: Vec<ContactType>,
    selected_type: String,
}

impl SearchDialog {
    pub fn new(form: SearchFormKind, fields: Vec<SearchField>) -> Self {
        Self {
            form,
            fields,
            automakes: Vec::new(),
            models: Vec::new(),
            contact_types: Vec::new(),
            selected_type: String::new(),
        }
    }

    pub fn form(&self) -> SearchFormKind {
        self.form
    }

    pub fn fields(&self) -> &[SearchField] {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&SearchField> {
        self.fields.iter().find(|field| field.key == key)
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.field(key).and_then(|field| field.value.as_deref())
    }

    /// Lookup lists the dialog fetches when it opens.
    pub fn lookups_to_load(&self) -> Vec<Lookup> {
        match self.form {
            SearchFormKind::Inventory => vec![Lookup::Automakes],
            SearchFormKind::Contacts => vec![Lookup::ContactTypes],
        }
    }

    /// Returns false when no field has `key`.
    pub fn input_change(&mut self, key: &str, value: impl Into<String>) -> bool {
        let Some(field) = self.field_mut(key) else {
            debug!(key, "search input for unknown field ignored");
            return false;
        };
        field.value = Some(value.into());
        true
    }

    /// A value whose rendering reaches [`INPUT_NUMBER_MAX_LENGTH`] characters
    /// is dropped and the field keeps its previous value.
    pub fn number_input_change(&mut self, key: &str, value: Option<f64>) -> bool {
        let rendered = match value {
            Some(number) => {
                let rendered = number.to_string();
                if number != 0.0 && rendered.len() >= INPUT_NUMBER_MAX_LENGTH {
                    debug!(key, %rendered, "number input too long");
                    return false;
                }
                rendered
            }
            None => String::new(),
        };
        self.input_change(key, rendered)
    }

    pub fn clear(&mut self, key: &str) {
        if key == TYPE_FIELD {
            self.selected_type.clear();
        }
        if let Some(field) = self.field_mut(key) {
            field.value = None;
        }
    }

    /// The clear control is only offered for a field holding a value.
    pub fn clear_visible(&self, key: &str) -> bool {
        self.field(key).is_some_and(SearchField::has_value)
    }

    pub fn auto_make(&self) -> Option<&str> {
        self.value(MAKE_FIELD).filter(|make| !make.is_empty())
    }

    /// Key for the model-list lookup: `"Land Rover"` becomes `"landrover"`.
    pub fn make_lookup_key(&self) -> Option<String> {
        self.auto_make()
            .map(|make| make.to_lowercase().replace(' ', ""))
    }

    pub fn set_automakes(&mut self, makes: Vec<MakeListEntry>) {
        self.automakes = makes
            .into_iter()
            .map(|make| MakeListEntry {
                name: make.name.to_uppercase(),
                ..make
            })
            .collect();
    }

    pub fn set_models(&mut self, models: Vec<ListEntry>) {
        self.models = models;
    }

    pub fn set_contact_types(&mut self, types: Vec<ContactType>) {
        self.contact_types = types;
    }

    pub fn automakes(&self) -> &[MakeListEntry] {
        &self.automakes
    }

    pub fn models(&self) -> &[ListEntry] {
        &self.models
    }

    pub fn contact_types(&self) -> &[ContactType] {
        &self.contact_types
    }

    pub fn selected_type(&self) -> Option<&ContactType> {
        self.contact_types
            .iter()
            .find(|kind| kind.name == self.selected_type)
    }

    /// Records the chosen type's name and writes its id into `key`.
    pub fn select_contact_type(&mut self, key: &str, id: &ContactTypeId) -> bool {
        self.selected_type = self
            .contact_types
            .iter()
            .find(|kind| &kind.id == id)
            .map(|kind| kind.name.clone())
            .unwrap_or_default();
        self.input_change(key, id.as_str())
    }

    pub fn dropdown_options(&self, key: &str) -> Vec<DropdownOption<'_>> {
        match self.form {
            SearchFormKind::Inventory if key == MAKE_FIELD => self
                .automakes
                .iter()
                .map(|make| DropdownOption {
                    label: &make.name,
                    value: &make.name,
                    logo: make.logo.as_deref(),
                })
                .collect(),
            SearchFormKind::Inventory => self
                .models
                .iter()
                .map(|model| DropdownOption {
                    label: &model.name,
                    value: &model.name,
                    logo: None,
                })
                .collect(),
            SearchFormKind::Contacts => self
                .contact_types
                .iter()
                .map(|kind| DropdownOption {
                    label: &kind.name,
                    value: kind.id.as_str(),
                    logo: None,
                })
                .collect(),
        }
    }

    /// Field values as search parameters; number fields carry numbers.
    pub fn params(&self) -> SearchParams {
        let mut params = SearchParams::new();
        for field in &self.fields {
            let value = match (field.kind, field.value.as_deref()) {
                (_, None) => ParamValue::Null,
                (SearchFieldKind::Number, Some(raw)) => raw
                    .trim()
                    .parse::<f64>()
                    .map_or(ParamValue::Null, ParamValue::Number),
                (_, Some(raw)) => ParamValue::Text(raw.to_owned()),
            };
            params.set(field.key.clone(), value);
        }
        params
    }

    /// The search action stays disabled until some field holds a value.
    pub fn search_disabled(&self) -> bool {
        is_values_empty(&self.params())
    }

    pub fn query(&self) -> String {
        stringify_search_query(&self.params())
    }

    fn field_mut(&mut self, key: &str) -> Option<&mut SearchField> {
        self.fields.iter_mut().find(|field| field.key == key)
    }
}
