// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Query strings understood by the listing endpoints.
//!
//! Search parameters render as `value.key` pairs joined by `+`
//! (`5.year+ford.make`); column filters render as `value.column` or, for
//! ranges, `from.to.column`.

#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    Number(f64),
    Null,
}

impl ParamValue {
    fn is_empty_value(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::Number(number) => *number == 0.0 || number.is_nan(),
            Self::Null => true,
        }
    }

    fn is_kept(&self) -> bool {
        match self {
            Self::Text(text) => !text.trim().is_empty(),
            Self::Number(_) => true,
            Self::Null => false,
        }
    }

    fn render(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Number(number) => number.to_string(),
            Self::Null => String::new(),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Search parameters in insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchParams {
    entries: Vec<(String, ParamValue)>,
}

impl SearchParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, keeping its original position when it already exists.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn remove(&mut self, key: &str) {
        self.entries.retain(|(existing, _)| existing != key);
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub column: String,
    pub value: String,
}

impl FilterOption {
    pub fn new(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

/// True when no parameter carries a usable value. Zero counts as empty.
pub fn is_values_empty(params: &SearchParams) -> bool {
    params.iter().all(|(_, value)| value.is_empty_value())
}

/// Drops blank text and nulls; numbers (zero included) are kept.
pub fn filter_params(params: &SearchParams) -> SearchParams {
    SearchParams {
        entries: params
            .entries
            .iter()
            .filter(|(_, value)| value.is_kept())
            .cloned()
            .collect(),
    }
}

pub fn stringify_search_query(params: &SearchParams) -> String {
    filter_params(params)
        .iter()
        .map(|(key, value)| format!("{}.{key}", value.render()))
        .collect::<Vec<_>>()
        .join("+")
}

/// Range values (`from-to`) render as `from.to.column`; anything after a
/// second `-` is ignored. Range entries after the first carry their own
/// leading `+` on top of the join separator, which the listing endpoints
/// accept.
pub fn stringify_filter_query(filters: &[FilterOption]) -> String {
    filters
        .iter()
        .enumerate()
        .map(|(index, FilterOption { column, value })| {
            if value.contains('-') {
                let mut bounds = value.split('-');
                let from = bounds.next().unwrap_or_default();
                let to = bounds.next().unwrap_or_default();
                let lead = if index > 0 { "+" } else { "" };
                format!("{lead}{from}.{to}.{column}")
            } else {
                format!("{}.{column}", value.trim())
            }
        })
        .collect::<Vec<_>>()
        .join("+")
}

#[cfg(test)]
mod tests {
    use super::{
        FilterOption, ParamValue, SearchParams, filter_params, is_values_empty,
        stringify_filter_query, stringify_search_query,
    };

    #[test]
    fn empty_check_treats_blank_text_zero_and_null_as_empty() {
        let params = SearchParams::new()
            .with("make", "   ")
            .with("year", 0.0)
            .with("model", None::<String>);
        assert!(is_values_empty(&params));
        assert!(is_values_empty(&SearchParams::new()));

        let params = params.with("year", 2019.0);
        assert!(!is_values_empty(&params));
    }

    #[test]
    fn filter_params_keeps_zero_but_drops_blank_text() {
        let params = SearchParams::new()
            .with("make", "")
            .with("mileage", 0.0)
            .with("model", "Civic")
            .with("trim", ParamValue::Null);
        let filtered = filter_params(&params);

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered.get("mileage"), Some(&ParamValue::Number(0.0)));
        assert_eq!(filtered.get("model"), Some(&ParamValue::Text("Civic".to_owned())));
    }

    #[test]
    fn search_query_joins_value_key_pairs_in_insertion_order() {
        let params = SearchParams::new()
            .with("year", 2019.0)
            .with("make", "ford")
            .with("model", " ");
        assert_eq!(stringify_search_query(&params), "2019.year+ford.make");
    }

    #[test]
    fn search_query_is_empty_when_nothing_survives() {
        let params = SearchParams::new().with("make", "").with("model", None::<&str>);
        assert_eq!(stringify_search_query(&params), "");
    }

    #[test]
    fn set_replaces_value_in_place() {
        let mut params = SearchParams::new().with("a", "1").with("b", "2");
        params.set("a", "3");
        assert_eq!(stringify_search_query(&params), "3.a+2.b");
        params.remove("a");
        assert_eq!(stringify_search_query(&params), "2.b");
    }

    #[test]
    fn filter_query_renders_plain_and_range_values() {
        let filters = vec![
            FilterOption::new("price", "1000-5000"),
            FilterOption::new("make", " Ford "),
            FilterOption::new("year", "2010-2015-2020"),
        ];
        assert_eq!(
            stringify_filter_query(&filters),
            "1000.5000.price+Ford.make++2010.2015.year"
        );
    }

    #[test]
    fn filter_query_single_range_has_no_leading_separator() {
        let filters = vec![FilterOption::new("mileage", "0-50000")];
        assert_eq!(stringify_filter_query(&filters), "0.50000.mileage");
        assert_eq!(stringify_filter_query(&[]), "");
    }
}
