use std::collections::BTreeSet;

use chrono::Days;

use crate::config::{
    GeneratorConfig, IntRange, ProjectConfig, TargetRule, WaterConfig, WeightedLabel,
};
use crate::error::{Error, Result};
use crate::vocabulary::NUMBER_PLACEHOLDER;

/// Validate both dataset configurations.
pub fn validate_config(config: &GeneratorConfig) -> Result<()> {
    validate_project_config(&config.projects)?;
    validate_water_config(&config.water)
}

/// Validate the project dataset configuration.
///
/// This checks:
/// - a positive record count and a usable delimiter
/// - non-empty, duplicate-free vocabulary tables with writable labels
/// - status and sector subsets reference known labels
/// - ranges are ordered and dates stay representable
pub fn validate_project_config(config: &ProjectConfig) -> Result<()> {
    let delimiter = config.delimiter;
    check_count("projects.count", config.count)?;
    check_delimiter("projects.delimiter", delimiter)?;
    check_label("projects.filename", &config.filename, delimiter)?;
    check_text("projects.id_prefix", &config.id_prefix, delimiter)?;

    if config.id_base.checked_add(config.count).is_none() {
        return Err(invalid(format!(
            "projects.id_base {} overflows with count {}",
            config.id_base, config.count
        )));
    }

    check_labels("projects.provinces", &config.provinces, delimiter)?;
    check_labels("projects.sectors", &config.sectors, delimiter)?;
    check_labels("projects.statuses", &config.statuses, delimiter)?;
    check_labels("projects.actions", &config.actions, delimiter)?;

    check_subset(
        "projects.completed_statuses",
        &config.completed_statuses,
        &config.statuses,
    )?;
    check_subset(
        "projects.unstarted_statuses",
        &config.unstarted_statuses,
        &config.statuses,
    )?;
    if let Some(status) = config
        .completed_statuses
        .iter()
        .find(|status| config.unstarted_statuses.contains(status))
    {
        return Err(invalid(format!(
            "status '{status}' cannot be both completed and unstarted"
        )));
    }
    check_subset(
        "projects.capital_intensive_sectors",
        &config.capital_intensive_sectors,
        &config.sectors,
    )?;

    let mut ruled = BTreeSet::new();
    for target in &config.sector_targets {
        if !config.sectors.contains(&target.sector) {
            return Err(invalid(format!(
                "projects.sector_targets references unknown sector '{}'",
                target.sector
            )));
        }
        if !ruled.insert(target.sector.as_str()) {
            return Err(invalid(format!(
                "projects.sector_targets has more than one rule for '{}'",
                target.sector
            )));
        }
        match &target.rule {
            TargetRule::Numbered { template, min, max } => {
                check_text("projects.sector_targets.template", template, delimiter)?;
                if !template.contains(NUMBER_PLACEHOLDER) {
                    return Err(invalid(format!(
                        "template '{template}' is missing the {NUMBER_PLACEHOLDER} placeholder"
                    )));
                }
                check_range(
                    "projects.sector_targets.range",
                    IntRange::new(*min, *max),
                )?;
            }
            TargetRule::Fixed { target } => {
                check_text("projects.sector_targets.target", target, delimiter)?;
            }
        }
    }

    let needs_generic = config
        .sectors
        .iter()
        .any(|sector| !ruled.contains(sector.as_str()));
    if needs_generic || !config.generic_targets.is_empty() {
        check_labels("projects.generic_targets", &config.generic_targets, delimiter)?;
    }

    check_range("projects.capital_budget", config.capital_budget)?;
    check_range("projects.standard_budget", config.standard_budget)?;
    check_range("projects.progress", config.progress)?;
    if config.progress.max > 100 {
        return Err(invalid("projects.progress.max must be <= 100"));
    }

    check_range("projects.start_offset_days", config.start_offset_days)?;
    check_range("projects.duration_days", config.duration_days)?;
    if config.duration_days.min == 0 {
        return Err(invalid(
            "projects.duration_days.min must be > 0 so end dates follow start dates",
        ));
    }
    let horizon = config
        .start_offset_days
        .max
        .checked_add(config.duration_days.max)
        .ok_or_else(|| invalid("projects date ranges overflow"))?;
    if config
        .start_base
        .checked_add_days(Days::new(horizon))
        .is_none()
    {
        return Err(invalid(format!(
            "projects dates overflow the calendar {horizon} days after {}",
            config.start_base
        )));
    }

    Ok(())
}

/// Validate the water point dataset configuration.
pub fn validate_water_config(config: &WaterConfig) -> Result<()> {
    let delimiter = config.delimiter;
    check_count("water.count", config.count)?;
    check_delimiter("water.delimiter", delimiter)?;
    check_label("water.filename", &config.filename, delimiter)?;

    let bounds = &config.bounds;
    let coords = [bounds.lat_min, bounds.lat_max, bounds.lon_min, bounds.lon_max];
    if coords.iter().any(|value| !value.is_finite()) {
        return Err(invalid("water.bounds must be finite"));
    }
    if bounds.lat_min > bounds.lat_max || bounds.lon_min > bounds.lon_max {
        return Err(invalid("water.bounds min must be <= max"));
    }

    if config.infra_types.is_empty() {
        return Err(invalid("water.infra_types must not be empty"));
    }
    let mut labels = BTreeSet::new();
    for infra in &config.infra_types {
        check_label("water.infra_types.label", &infra.label, delimiter)?;
        check_text("water.infra_types.name_prefix", &infra.name_prefix, delimiter)?;
        if !labels.insert(infra.label.as_str()) {
            return Err(invalid(format!(
                "water.infra_types has duplicate label '{}'",
                infra.label
            )));
        }
    }
    check_weights(
        "water.infra_types",
        config.infra_types.iter().map(|infra| infra.weight),
    )?;

    let dam = &config.dam;
    check_label("water.dam.critical_status", &dam.critical_status, delimiter)?;
    check_label("water.dam.operational_status", &dam.operational_status, delimiter)?;
    if dam.critical_status == dam.operational_status {
        return Err(invalid("water.dam statuses must be distinct"));
    }
    check_range("water.dam.level", dam.level)?;
    if dam.level.max > 100 {
        return Err(invalid("water.dam.level.max must be <= 100"));
    }

    check_range("water.well.depth", config.well.depth)?;
    check_weighted_labels("water.well.statuses", &config.well.statuses, delimiter)?;
    check_weighted_labels("water.other.statuses", &config.other.statuses, delimiter)?;

    Ok(())
}

fn check_count(field: &str, count: u64) -> Result<()> {
    if count == 0 {
        return Err(invalid(format!("{field} must be > 0")));
    }
    Ok(())
}

fn check_delimiter(field: &str, delimiter: char) -> Result<()> {
    if !delimiter.is_ascii() || matches!(delimiter, '"' | '\n' | '\r') {
        return Err(invalid(format!(
            "{field} must be a single ASCII character other than a quote or newline"
        )));
    }
    Ok(())
}

/// Text that is written verbatim into a dataset field.
fn check_text(field: &str, value: &str, delimiter: char) -> Result<()> {
    if value.contains(delimiter) || value.contains(['"', '\n', '\r']) {
        return Err(invalid(format!(
            "{field} value '{value}' contains the delimiter, a quote or a newline"
        )));
    }
    Ok(())
}

fn check_label(field: &str, value: &str, delimiter: char) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(format!("{field} must not be empty")));
    }
    check_text(field, value, delimiter)
}

fn check_labels(field: &str, values: &[String], delimiter: char) -> Result<()> {
    if values.is_empty() {
        return Err(invalid(format!("{field} must not be empty")));
    }
    let mut seen = BTreeSet::new();
    for value in values {
        check_label(field, value, delimiter)?;
        if !seen.insert(value.as_str()) {
            return Err(invalid(format!("{field} has duplicate label '{value}'")));
        }
    }
    Ok(())
}

fn check_subset(field: &str, values: &[String], universe: &[String]) -> Result<()> {
    match values.iter().find(|value| !universe.contains(value)) {
        Some(value) => Err(invalid(format!("{field} references unknown label '{value}'"))),
        None => Ok(()),
    }
}

fn check_range(field: &str, range: IntRange) -> Result<()> {
    if range.min > range.max {
        return Err(invalid(format!("{field} min must be <= max")));
    }
    Ok(())
}

fn check_weights(field: &str, weights: impl Iterator<Item = f64>) -> Result<()> {
    let mut total = 0.0;
    for weight in weights {
        if !weight.is_finite() || weight < 0.0 {
            return Err(invalid(format!(
                "{field} weights must be finite and >= 0, got {weight}"
            )));
        }
        total += weight;
    }
    if total <= 0.0 {
        return Err(invalid(format!("{field} weights must sum to a positive value")));
    }
    Ok(())
}

fn check_weighted_labels(field: &str, values: &[WeightedLabel], delimiter: char) -> Result<()> {
    if values.is_empty() {
        return Err(invalid(format!("{field} must not be empty")));
    }
    let mut seen = BTreeSet::new();
    for value in values {
        check_label(field, &value.label, delimiter)?;
        if !seen.insert(value.label.as_str()) {
            return Err(invalid(format!(
                "{field} has duplicate label '{}'",
                value.label
            )));
        }
    }
    check_weights(field, values.iter().map(|value| value.weight))
}

fn invalid(message: impl Into<String>) -> Error {
    Error::InvalidConfig(message.into())
}
