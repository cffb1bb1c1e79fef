use crate::domain::table::{ColumnKind, Language, Table};
use crate::utils::error::{NobelError, Result};
use std::collections::HashMap;

/// Norwegian and Swedish translations and Wikidata links.
fn is_dropped(kind: ColumnKind) -> bool {
    matches!(
        kind,
        ColumnKind::Locale(Language::Norwegian)
            | ColumnKind::Locale(Language::Swedish)
            | ColumnKind::CrossReference
    )
}

/// Copy of `table` without translation and link columns.
pub fn prune_columns(table: &Table) -> Table {
    let mut pruned = table.clone();
    prune_columns_in_place(&mut pruned);
    pruned
}

/// Drop translation and link columns from `table`, keeping the order of the
/// rest. Returns how many columns were dropped.
pub fn prune_columns_in_place(table: &mut Table) -> usize {
    let dropped = table.retain_columns(|column| !is_dropped(column.kind));
    tracing::debug!(
        "Dropped {} translation/link columns, {} left",
        dropped,
        table.num_columns()
    );
    dropped
}

/// Copy of `table` with the `.en` suffix stripped from English columns.
pub fn strip_english_suffix(table: &Table) -> Result<Table> {
    let mut renamed = table.clone();
    strip_english_suffix_in_place(&mut renamed)?;
    Ok(renamed)
}

/// Strip `.en` from every English column name. Renamed columns become
/// primary columns.
///
/// Fails with [`NobelError::ColumnCollision`] if any two columns would share a
/// name afterwards; the table is left untouched in that case.
pub fn strip_english_suffix_in_place(table: &mut Table) -> Result<usize> {
    let renames = plan_english_renames(table)?;

    let columns = table.columns_mut();
    for (idx, new_name) in &renames {
        let column = &mut columns[*idx];
        column.name = new_name.clone();
        column.kind = ColumnKind::Primary;
    }

    tracing::debug!("Stripped '.en' from {} columns", renames.len());
    Ok(renames.len())
}

fn plan_english_renames(table: &Table) -> Result<Vec<(usize, String)>> {
    let suffix = Language::English.suffix();
    let mut renames = Vec::new();
    let mut sources_by_target: HashMap<String, Vec<String>> = HashMap::new();

    for (idx, column) in table.columns().iter().enumerate() {
        let target = if column.kind == ColumnKind::Locale(Language::English) {
            let stripped = column
                .name
                .strip_suffix(suffix)
                .unwrap_or(&column.name)
                .to_string();
            renames.push((idx, stripped.clone()));
            stripped
        } else {
            column.name.clone()
        };
        sources_by_target
            .entry(target)
            .or_default()
            .push(column.name.clone());
    }

    for (_, target) in &renames {
        if let Some(sources) = sources_by_target.get(target) {
            if sources.len() > 1 {
                return Err(NobelError::ColumnCollision {
                    target: target.clone(),
                    sources: sources.clone(),
                });
            }
        }
    }

    Ok(renames)
}
