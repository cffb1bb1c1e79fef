use crate::domain::model::Endpoint;
use crate::utils::error::{NobelError, Result};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Name suffix the API uses for Wikidata link columns.
pub const CROSS_REFERENCE_SUFFIX: &str = "sameAs";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    Norwegian,
    Swedish,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Norwegian, Language::Swedish];

    pub fn suffix(&self) -> &'static str {
        match self {
            Language::English => ".en",
            Language::Norwegian => ".no",
            Language::Swedish => ".se",
        }
    }
}

/// Where a column's values come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Primary,
    /// Translation of a primary value.
    Locale(Language),
    /// Link to an external dataset.
    CrossReference,
}

impl ColumnKind {
    /// Kind implied by the flattened API column name.
    pub fn classify(name: &str) -> Self {
        if name.ends_with(CROSS_REFERENCE_SUFFIX) {
            return ColumnKind::CrossReference;
        }
        Language::ALL
            .into_iter()
            .find(|language| name.ends_with(language.suffix()))
            .map(ColumnKind::Locale)
            .unwrap_or(ColumnKind::Primary)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        let name = name.into();
        let kind = ColumnKind::classify(&name);
        Self { name, kind, values }
    }

    pub fn with_kind(name: impl Into<String>, kind: ColumnKind, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            kind,
            values,
        }
    }
}

/// Column-oriented table. Column names are unique and every column holds one
/// value per row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    rows: usize,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the record array of an API response and flatten it.
    pub fn from_response(body: &Value, endpoint: Endpoint) -> Result<Self> {
        let key = endpoint.records_key();
        match body.get(key) {
            Some(Value::Array(records)) => Ok(Self::from_records(records)),
            _ => Err(NobelError::ProcessingError {
                message: format!("Response has no '{}' array", key),
            }),
        }
    }

    /// Flatten records into columns. Nested objects become dotted column names,
    /// arrays and scalars are kept as cell values. Columns are ordered by first
    /// appearance and cells a record does not have are null.
    pub fn from_records(records: &[Value]) -> Self {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut columns: Vec<(String, Vec<Value>)> = Vec::new();
        let mut rows = 0;

        for record in records {
            let Value::Object(map) = record else {
                tracing::warn!("Skipping non-object record: {}", record);
                continue;
            };

            let mut cells = Vec::new();
            flatten_object("", map, &mut cells);

            for (name, value) in cells {
                let idx = *index.entry(name.clone()).or_insert_with(|| {
                    columns.push((name, vec![Value::Null; rows]));
                    columns.len() - 1
                });
                let values = &mut columns[idx].1;
                if values.len() > rows {
                    // two paths flattened to the same name; the later one wins
                    values[rows] = value;
                } else {
                    values.push(value);
                }
            }

            rows += 1;
            for (_, values) in columns.iter_mut() {
                values.resize(rows, Value::Null);
            }
        }

        Self {
            columns: columns
                .into_iter()
                .map(|(name, values)| Column::new(name, values))
                .collect(),
            rows,
        }
    }

    pub fn push_column(&mut self, column: Column) -> Result<()> {
        if self.contains_column(&column.name) {
            return Err(NobelError::ValidationError {
                message: format!("Column '{}' already exists", column.name),
            });
        }
        if self.columns.is_empty() {
            self.rows = column.values.len();
        } else if column.values.len() != self.rows {
            return Err(NobelError::ValidationError {
                message: format!(
                    "Column '{}' has {} values, table has {} rows",
                    column.name,
                    column.values.len(),
                    self.rows
                ),
            });
        }
        self.columns.push(column);
        Ok(())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub(crate) fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn contains_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn num_rows(&self) -> usize {
        self.rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Keep the columns `keep` accepts, in their current order. Returns how many were removed.
    pub fn retain_columns<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&Column) -> bool,
    {
        let before = self.columns.len();
        self.columns.retain(|c| keep(c));
        before - self.columns.len()
    }

    pub fn to_csv(&self) -> Result<String> {
        self.to_delimited(b',')
    }

    pub fn to_tsv(&self) -> Result<String> {
        self.to_delimited(b'\t')
    }

    fn to_delimited(&self, delimiter: u8) -> Result<String> {
        // csv writes an empty record as `""`
        if self.columns.is_empty() {
            return Ok(String::new());
        }

        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(Vec::new());

        writer.write_record(self.columns.iter().map(|c| c.name.as_str()))?;
        for row in 0..self.rows {
            writer.write_record(self.columns.iter().map(|c| cell_text(&c.values[row])))?;
        }

        let bytes = writer.into_inner().map_err(|e| NobelError::ProcessingError {
            message: format!("Failed to flush delimited output: {}", e),
        })?;
        String::from_utf8(bytes).map_err(|e| NobelError::ProcessingError {
            message: format!("Delimited output is not UTF-8: {}", e),
        })
    }
}

fn flatten_object(prefix: &str, map: &Map<String, Value>, out: &mut Vec<(String, Value)>) {
    for (key, value) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            Value::Object(inner) if !inner.is_empty() => flatten_object(&name, inner, out),
            other => out.push((name, other.clone())),
        }
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
