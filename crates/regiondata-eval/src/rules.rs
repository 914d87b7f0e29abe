use std::collections::HashSet;

use chrono::{Days, NaiveDate};

use regiondata_core::schema::{
    BUDGET_DH, DATE_DEBUT, DATE_FIN_PREVUE, ID_PROJET, INTITULE_PROJET, LAT, NIVEAU_OU_DEBIT,
    NOM, PROVINCE, SECTEUR, STATUT, TAUX_AVANCEMENT, TYPE,
};
use regiondata_core::vocabulary::NUMBER_PLACEHOLDER;
use regiondata_core::{InfraKind, IntRange, ProjectConfig, TargetRule, WaterConfig};
use regiondata_generate::FieldValue;

use crate::engine::ViolationSink;
use crate::model::Violation;

/// Row checks for the project dataset.
pub(crate) struct ProjectRules<'a> {
    config: &'a ProjectConfig,
    seen_ids: HashSet<String>,
}

impl<'a> ProjectRules<'a> {
    pub(crate) fn new(config: &'a ProjectConfig) -> Self {
        Self {
            config,
            seen_ids: HashSet::new(),
        }
    }

    /// `fields` are already parsed in schema order.
    pub(crate) fn check(&mut self, index: u64, fields: &[FieldValue], sink: &mut ViolationSink) {
        let [
            FieldValue::Text(id),
            FieldValue::Text(title),
            FieldValue::Text(province),
            FieldValue::Text(sector),
            FieldValue::Integer(budget),
            FieldValue::Text(status),
            FieldValue::Integer(completion),
            FieldValue::Date(start),
            FieldValue::Date(end),
        ] = fields
        else {
            return;
        };
        let mut report = |code: &str, column: &str, message: String| {
            sink.push(Violation::new(code, Some(column), Some(index), message));
        };

        let expected_id = self.config.record_id(index);
        if *id != expected_id {
            report("id_sequence", ID_PROJET, format!("expected '{expected_id}', found '{id}'"));
        }
        if !self.seen_ids.insert(id.clone()) {
            report("duplicate_id", ID_PROJET, format!("'{id}' already used"));
        }

        if !contains(&self.config.provinces, province) {
            report("unknown_label", PROVINCE, format!("unknown province '{province}'"));
        }
        let sector_known = contains(&self.config.sectors, sector);
        if !sector_known {
            report("unknown_label", SECTEUR, format!("unknown sector '{sector}'"));
        }
        let status_known = contains(&self.config.statuses, status);
        if !status_known {
            report("unknown_label", STATUT, format!("unknown status '{status}'"));
        }

        if sector_known {
            let range = self.config.budget_range(sector);
            if !range.contains(*budget) {
                report(
                    "budget_range",
                    BUDGET_DH,
                    format!("{budget} outside [{}, {}] for '{sector}'", range.min, range.max),
                );
            }
            if let Err(message) = self.check_title(sector, title) {
                report("title", INTITULE_PROJET, message);
            }
        }

        if status_known {
            if let Err(message) = self.check_completion(status, *completion) {
                report("completion_status", TAUX_AVANCEMENT, message);
            }
        }

        let window = date_window(self.config.start_base, self.config.start_offset_days);
        if window.is_some_and(|(first, last)| *start < first || *start > last) {
            report("start_window", DATE_DEBUT, format!("start {start} outside window"));
        }

        let duration = (*end - *start).num_days();
        let bounds = self.config.duration_days;
        if duration <= 0 || !bounds.contains(duration as u64) {
            report(
                "duration_range",
                DATE_FIN_PREVUE,
                format!("{duration} days outside [{}, {}]", bounds.min, bounds.max),
            );
        }
    }

    fn check_completion(&self, status: &str, completion: u64) -> Result<(), String> {
        let expected = if contains(&self.config.completed_statuses, status) {
            IntRange::new(100, 100)
        } else if contains(&self.config.unstarted_statuses, status) {
            IntRange::new(0, 0)
        } else {
            self.config.progress
        };
        if expected.contains(completion) {
            Ok(())
        } else {
            Err(format!(
                "{completion}% outside [{}, {}] for '{status}'",
                expected.min, expected.max
            ))
        }
    }

    fn check_title(&self, sector: &str, title: &str) -> Result<(), String> {
        let target = self
            .config
            .actions
            .iter()
            .find_map(|action| {
                title
                    .strip_prefix(action.as_str())
                    .and_then(|rest| rest.strip_prefix(' '))
            })
            .ok_or_else(|| format!("'{title}' does not start with a known action"))?;

        let matches = match self.config.target_rule(sector) {
            Some(TargetRule::Numbered { template, min, max }) => {
                numbered_target(template, target).is_some_and(|n| (*min..=*max).contains(&n))
            }
            Some(TargetRule::Fixed { target: fixed }) => target == fixed,
            None => contains(&self.config.generic_targets, target),
        };
        if matches {
            Ok(())
        } else {
            Err(format!("target '{target}' does not fit sector '{sector}'"))
        }
    }
}

/// Row checks for the water point dataset.
pub(crate) struct WaterRules<'a> {
    config: &'a WaterConfig,
}

impl<'a> WaterRules<'a> {
    pub(crate) fn new(config: &'a WaterConfig) -> Self {
        Self { config }
    }

    pub(crate) fn check(&self, index: u64, fields: &[FieldValue], sink: &mut ViolationSink) {
        let [
            FieldValue::Text(name),
            FieldValue::Text(infra_type),
            FieldValue::Text(status),
            FieldValue::Integer(level),
            FieldValue::Float(lat),
            FieldValue::Float(lon),
        ] = fields
        else {
            return;
        };
        let mut report = |code: &str, column: &str, message: String| {
            sink.push(Violation::new(code, Some(column), Some(index), message));
        };

        if !self.config.bounds.contains(*lat, *lon) {
            report("out_of_bounds", LAT, format!("({lat}, {lon}) outside the region"));
        }

        let Some(infra) = self.config.infra_type(infra_type) else {
            report("unknown_label", TYPE, format!("unknown type '{infra_type}'"));
            return;
        };

        let expected_name = format!("{}{index}", infra.name_prefix);
        if *name != expected_name {
            report("name_sequence", NOM, format!("expected '{expected_name}', found '{name}'"));
        }

        match infra.kind {
            InfraKind::Dam => {
                let dam = &self.config.dam;
                if !dam.level.contains(*level) {
                    report("level_range", NIVEAU_OU_DEBIT, range_message(*level, dam.level));
                }
                let expected = if *level < dam.critical_below {
                    &dam.critical_status
                } else {
                    &dam.operational_status
                };
                if status != expected {
                    report(
                        "dam_status",
                        STATUT,
                        format!("level {level} requires '{expected}', found '{status}'"),
                    );
                }
            }
            InfraKind::Well => {
                let well = &self.config.well;
                if !well.depth.contains(*level) {
                    report("level_range", NIVEAU_OU_DEBIT, range_message(*level, well.depth));
                }
                if !well.statuses.iter().any(|label| label.label == *status) {
                    report("unknown_label", STATUT, format!("unknown well status '{status}'"));
                }
            }
            InfraKind::Other => {
                if *level != 0 {
                    report("level_range", NIVEAU_OU_DEBIT, format!("{level} should be 0"));
                }
                let statuses = &self.config.other.statuses;
                if !statuses.iter().any(|label| label.label == *status) {
                    report("unknown_label", STATUT, format!("unknown status '{status}'"));
                }
            }
        }
    }
}

fn contains(labels: &[String], value: &str) -> bool {
    labels.iter().any(|label| label == value)
}

fn range_message(value: u64, range: IntRange) -> String {
    format!("{value} outside [{}, {}]", range.min, range.max)
}

fn date_window(base: NaiveDate, offset: IntRange) -> Option<(NaiveDate, NaiveDate)> {
    let first = base.checked_add_days(Days::new(offset.min))?;
    let last = base.checked_add_days(Days::new(offset.max))?;
    Some((first, last))
}

/// Number substituted into `template` to produce `target`.
fn numbered_target(template: &str, target: &str) -> Option<u64> {
    let (prefix, suffix) = template.split_once(NUMBER_PLACEHOLDER)?;
    let digits = target.strip_prefix(prefix)?.strip_suffix(suffix)?;
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_target_extracts_the_substituted_number() {
        assert_eq!(numbered_target("la route RP-{n}", "la route RP-4821"), Some(4821));
        assert_eq!(
            numbered_target("(Douar {n})", "(Douar 7)"),
            Some(7)
        );
        assert_eq!(numbered_target("la route RP-{n}", "la route RP-"), None);
        assert_eq!(numbered_target("la route RP-{n}", "la route RP-12a"), None);
        assert_eq!(numbered_target("la route RP-{n}", "un collège"), None);
    }

    #[test]
    fn completion_follows_status_groups() {
        let config = ProjectConfig::default();
        let rules = ProjectRules::new(&config);

        assert!(rules.check_completion("Achevé", 100).is_ok());
        assert!(rules.check_completion("Achevé", 95).is_err());
        assert!(rules.check_completion("En Étude", 0).is_ok());
        assert!(rules.check_completion("Appel d'Offres", 10).is_err());
        assert!(rules.check_completion("En Cours", 50).is_ok());
        assert!(rules.check_completion("En Cours", 100).is_err());
    }

    #[test]
    fn titles_must_match_the_sector_rule() {
        let config = ProjectConfig::default();
        let rules = ProjectRules::new(&config);
        let action = &config.actions[0];

        assert!(
            rules
                .check_title("Infrastructure Routière", &format!("{action} la route RP-1234"))
                .is_ok()
        );
        assert!(
            rules
                .check_title("Infrastructure Routière", &format!("{action} la route RP-12"))
                .is_err()
        );
        assert!(
            rules
                .check_title("Éducation & Formation", &format!("{action} un collège de proximité"))
                .is_ok()
        );
        assert!(
            rules
                .check_title("Santé", &format!("{action} {}", config.generic_targets[0]))
                .is_ok()
        );
        assert!(rules.check_title("Santé", "Démolition d'un pont").is_err());
    }
}
