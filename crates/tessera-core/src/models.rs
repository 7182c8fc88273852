//! Typed rows and the CKAN `package_create` payload.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::parse::{parse_extras, parse_resources, parse_tags};

/// Number of columns a data row must carry.
pub const ROW_WIDTH: usize = 16;

/// Column holding the dataset name, rewritten with the generated identifier.
pub const NAME_COLUMN: usize = 0;

/// Why a table row could not be turned into a [`DatasetRow`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("expected {expected} columns, found {found}")]
    TooFewColumns { expected: usize, found: usize },

    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' is not a boolean: {value:?}")]
    InvalidBoolean { field: &'static str, value: String },
}

/// One data row of the source sheet, by fixed column position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetRow {
    pub name: String,
    pub title: String,
    pub author: String,
    pub author_email: String,
    pub maintainer: String,
    pub maintainer_email: String,
    pub notes: String,
    pub tags_raw: String,
    pub extras_raw: String,
    pub license_id: String,
    pub is_private: Option<bool>,
    pub owner_org: String,
    pub resources_raw: String,
    pub state: String,
    pub version: String,
    pub dataset_type: String,
}

impl DatasetRow {
    /// Converts raw cells into a typed row.
    ///
    /// Cells past column 15 are ignored. Email cells are trimmed; every other
    /// text cell is kept verbatim.
    ///
    /// # Examples
    ///
    /// ```
    /// use tessera_core::models::DatasetRow;
    ///
    /// let mut cells: Vec<String> = vec![String::new(); 16];
    /// cells[0] = "Air_Quality".to_string();
    /// cells[3] = "  ops@example.org ".to_string();
    /// cells[10] = "TRUE".to_string();
    ///
    /// let row = DatasetRow::from_cells(&cells).unwrap();
    /// assert_eq!(row.author_email, "ops@example.org");
    /// assert_eq!(row.is_private, Some(true));
    /// ```
    pub fn from_cells(cells: &[String]) -> Result<Self, RowError> {
        if cells.len() < ROW_WIDTH {
            return Err(RowError::TooFewColumns {
                expected: ROW_WIDTH,
                found: cells.len(),
            });
        }

        let cell = |i: usize| cells[i].clone();

        if cells[NAME_COLUMN].trim().is_empty() {
            return Err(RowError::MissingField("name"));
        }

        Ok(Self {
            name: cell(0),
            title: cell(1),
            author: cell(2),
            author_email: cells[3].trim().to_string(),
            maintainer: cell(4),
            maintainer_email: cells[5].trim().to_string(),
            notes: cell(6),
            tags_raw: cell(7),
            extras_raw: cell(8),
            license_id: cell(9),
            is_private: parse_flag("private", &cells[10])?,
            owner_org: cell(11),
            resources_raw: cell(12),
            state: cell(13),
            version: cell(14),
            dataset_type: cell(15),
        })
    }
}

fn parse_flag(field: &'static str, raw: &str) -> Result<Option<bool>, RowError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" => Ok(None),
        "true" | "yes" | "1" => Ok(Some(true)),
        "false" | "no" | "0" => Ok(Some(false)),
        _ => Err(RowError::InvalidBoolean {
            field,
            value: raw.to_string(),
        }),
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
}

/// Free-form key/value metadata attached to a dataset.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Extra {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// Body of a CKAN `package_create` call.
///
/// CKAN API reference: <https://docs.ckan.org/en/2.9/api/#ckan.logic.action.create.package_create>
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DatasetRecord {
    pub name: String,
    pub title: String,
    pub author: String,
    pub author_email: String,
    pub maintainer: String,
    pub maintainer_email: String,
    pub notes: String,
    pub tags: Vec<Tag>,
    pub extras: Vec<Extra>,
    pub license_id: String,
    pub private: Option<bool>,
    pub owner_org: String,
    pub resources: Vec<Resource>,
    pub state: String,
    pub version: String,
    pub dataset_type: String,
}

impl DatasetRecord {
    /// Builds the payload for `row`, published under `identifier`.
    pub fn from_row(row: &DatasetRow, identifier: String) -> Self {
        Self {
            name: identifier,
            title: row.title.clone(),
            author: row.author.clone(),
            author_email: row.author_email.clone(),
            maintainer: row.maintainer.clone(),
            maintainer_email: row.maintainer_email.clone(),
            notes: row.notes.clone(),
            tags: parse_tags(Some(&row.tags_raw)),
            extras: parse_extras(Some(&row.extras_raw)),
            license_id: row.license_id.clone(),
            private: row.is_private,
            owner_org: row.owner_org.clone(),
            resources: parse_resources(Some(&row.resources_raw)),
            state: row.state.clone(),
            version: row.version.clone(),
            dataset_type: row.dataset_type.clone(),
        }
    }
}
