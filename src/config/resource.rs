//! Resource declaration: route name, accepted add columns and their rules.

use std::collections::BTreeMap;

/// Kind of JSON value a column accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    String,
}

/// Per-column rule applied when loading a create payload.
#[derive(Clone, Debug)]
pub struct FieldRule {
    pub kind: FieldKind,
    pub required: bool,
    /// Maximum length in characters.
    pub max_length: Option<usize>,
}

/// Columns accepted on create, keyed by column name.
#[derive(Clone, Debug, Default)]
pub struct AddSchema {
    pub columns: BTreeMap<String, FieldRule>,
}

impl AddSchema {
    /// `txt` is the only writable column; it is non-null in storage so it is required here.
    pub fn comments(txt_max_length: Option<usize>) -> Self {
        let mut columns = BTreeMap::new();
        columns.insert(
            "txt".to_string(),
            FieldRule {
                kind: FieldKind::String,
                required: true,
                max_length: txt_max_length,
            },
        );
        AddSchema { columns }
    }
}

pub const DEFAULT_RESOURCE_NAME: &str = "comments";
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Runtime description of the comments resource.
#[derive(Clone, Debug)]
pub struct ResourceConfig {
    /// Path segment under `/api/v1`.
    pub name: String,
    pub add_schema: AddSchema,
    pub max_body_bytes: usize,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        ResourceConfig {
            name: DEFAULT_RESOURCE_NAME.to_string(),
            add_schema: AddSchema::comments(None),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ResourceConfig {
    /// Base path the resource routes are nested under, e.g. `/api/v1/comments`.
    pub fn base_path(&self) -> String {
        format!("/api/v1/{}", self.name)
    }
}
