// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::dual_list::Keyed;
use crate::ids::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportService {
    Inventory,
    Contacts,
    Deals,
    Accounts,
}

impl ReportService {
    pub const ALL: [Self; 4] = [Self::Inventory, Self::Contacts, Self::Deals, Self::Accounts];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inventory => "inventory",
            Self::Contacts => "contacts",
            Self::Deals => "deals",
            Self::Accounts => "accounts",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "inventory" => Some(Self::Inventory),
            "contacts" => Some(Self::Contacts),
            "deals" => Some(Self::Deals),
            "accounts" => Some(Self::Accounts),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Inventory => "Inventory",
            Self::Contacts => "Contacts",
            Self::Deals => "Deals",
            Self::Accounts => "Accounts",
        }
    }
}

/// One selectable report column. `data` is the stable key the report
/// service uses to identify the column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportColumn {
    pub name: String,
    pub data: ColumnKey,
}

impl ReportColumn {
    pub fn new(name: impl Into<String>, data: impl Into<ColumnKey>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

impl Keyed for ReportColumn {
    type Key = ColumnKey;

    fn key(&self) -> &ColumnKey {
        &self.data
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDefinition {
    pub id: ReportId,
    pub name: String,
    #[serde(default, rename = "isdefault")]
    pub is_default: bool,
    #[serde(default)]
    pub columns: Vec<ReportColumn>,
}

impl ReportDefinition {
    /// Columns with a usable key, in stored order.
    pub fn persisted_columns(&self) -> Vec<ReportColumn> {
        self.columns
            .iter()
            .filter(|column| !column.data.is_blank())
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakeListEntry {
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEntry {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactType {
    pub id: ContactTypeId,
    pub name: String,
}
