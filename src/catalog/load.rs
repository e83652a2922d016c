use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use log::warn;
use serde_json::Value;

use super::config::{CatalogConfig, ColumnMap, ColumnSpec};
use super::date::CalendarDate;
use super::record::{Catalog, ProjectRecord};

pub fn load_catalog(data_path: &Path, config: &CatalogConfig) -> Result<Catalog> {
    let raw = fs::read_to_string(data_path)
        .with_context(|| format!("failed to read catalog file {}", data_path.display()))?;
    parse_catalog(&raw, config)
}

pub fn parse_catalog(raw: &str, config: &CatalogConfig) -> Result<Catalog> {
    let parsed: Value = serde_json::from_str(raw).context("invalid JSON in catalog file")?;
    let rows = parsed
        .as_array()
        .ok_or_else(|| anyhow!("catalog root must be a JSON array of records"))?;

    let mut records = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        match record_from_row(row, &config.columns) {
            Ok(record) => records.push(record),
            Err(error) => warn!("skipping catalog record {index}: {error}"),
        }
    }

    if records.is_empty() {
        return Err(anyhow!("catalog contains no usable records"));
    }

    let mut catalog = Catalog { records };
    catalog.sort_for_display(&config.region_attribute);
    Ok(catalog)
}

pub fn load_config(config_path: Option<&Path>) -> Result<CatalogConfig> {
    let Some(path) = config_path else {
        return Ok(CatalogConfig::default());
    };

    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid config in {}", path.display()))
}

fn record_from_row(row: &Value, columns: &ColumnMap) -> Result<ProjectRecord> {
    let row = row
        .as_object()
        .ok_or_else(|| anyhow!("record is not a JSON object"))?;

    let field = |spec: &ColumnSpec| -> Option<String> {
        row.get(&spec.src)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };
    let required = |spec: &ColumnSpec| -> Result<String> {
        field(spec).ok_or_else(|| anyhow!("missing required column `{}`", spec.src))
    };
    let date = |spec: &ColumnSpec| -> Result<CalendarDate> {
        let value = required(spec)?;
        CalendarDate::parse(&value)
            .ok_or_else(|| anyhow!("unparseable date `{value}` in column `{}`", spec.src))
    };

    Ok(ProjectRecord {
        domain: required(&columns.domain)?,
        name: required(&columns.name)?,
        project_name: field(&columns.project_name).unwrap_or_default(),
        organization: field(&columns.organization).unwrap_or_default(),
        sectors: split_values(&field(&columns.sectors).unwrap_or_default()),
        language: split_values(&field(&columns.language).unwrap_or_default()),
        license: field(&columns.license).unwrap_or_else(|| "Unknown".to_string()),
        os: split_values(&field(&columns.os).unwrap_or_default()),
        program: field(&columns.program).unwrap_or_default(),
        start_date: date(&columns.start_date)?,
        last_update: date(&columns.last_update)?,
        code_location: field(&columns.code_location).unwrap_or_default(),
        description: field(&columns.description),
    })
}

/// Splits a raw multi-value cell on `,`, `+`, and the word `and`, trimming
/// each piece. An empty result collapses to a single `Unknown` entry.
pub fn split_values(raw: &str) -> Vec<String> {
    let mut values = Vec::new();
    for part in raw.split(|ch| ch == ',' || ch == '+') {
        for piece in part.split(" and ") {
            let trimmed = piece.trim();
            if !trimmed.is_empty() && trimmed != "and" {
                values.push(trimmed.to_string());
            }
        }
    }
    if values.is_empty() {
        values.push("Unknown".to_string());
    }
    values
}
