use chrono::{Days, NaiveDate};
use rand::Rng;

use regiondata_core::vocabulary::NUMBER_PLACEHOLDER;
use regiondata_core::{DatasetKind, ProjectConfig, TargetRule, validate_project_config};

use crate::errors::GenerationError;
use crate::generators::{FieldValue, Record, dataset_seed, record_rng};
use crate::sampling::pick;

/// A synthetic regional development project.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRecord {
    pub id: String,
    pub title: String,
    pub province: String,
    pub sector: String,
    pub budget: u64,
    pub status: String,
    pub completion_pct: u8,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Record for ProjectRecord {
    const KIND: DatasetKind = DatasetKind::Projects;

    fn fields(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Text(self.id.clone()),
            FieldValue::Text(self.title.clone()),
            FieldValue::Text(self.province.clone()),
            FieldValue::Text(self.sector.clone()),
            FieldValue::Integer(self.budget),
            FieldValue::Text(self.status.clone()),
            FieldValue::Integer(u64::from(self.completion_pct)),
            FieldValue::Date(self.start_date),
            FieldValue::Date(self.end_date),
        ]
    }
}

/// Field synthesizers for project records.
///
/// Each method consumes randomness and the sibling fields it depends on,
/// nothing else.
#[derive(Debug, Clone, Copy)]
pub struct ProjectSynthesizer<'a> {
    config: &'a ProjectConfig,
}

impl<'a> ProjectSynthesizer<'a> {
    pub fn new(config: &'a ProjectConfig) -> Self {
        Self { config }
    }

    /// Action phrase followed by a target phrase chosen by the sector's rule.
    pub fn synthesize_title(
        &self,
        sector: &str,
        rng: &mut impl Rng,
    ) -> Result<String, GenerationError> {
        let action = pick("projects.actions", &self.config.actions, rng)?;
        let target = match self.config.target_rule(sector) {
            Some(TargetRule::Numbered { template, min, max }) => {
                let number = rng.random_range(*min..=*max);
                template.replace(NUMBER_PLACEHOLDER, &number.to_string())
            }
            Some(TargetRule::Fixed { target }) => target.clone(),
            None => pick("projects.generic_targets", &self.config.generic_targets, rng)?
                .to_string(),
        };
        Ok(format!("{action} {target}"))
    }

    pub fn synthesize_budget(&self, sector: &str, rng: &mut impl Rng) -> u64 {
        let range = self.config.budget_range(sector);
        rng.random_range(range.min..=range.max)
    }

    pub fn synthesize_completion(&self, status: &str, rng: &mut impl Rng) -> u8 {
        let is = |statuses: &[String]| statuses.iter().any(|s| s == status);
        if is(&self.config.completed_statuses) {
            100
        } else if is(&self.config.unstarted_statuses) {
            0
        } else {
            let progress = self.config.progress;
            // validation caps progress at 100
            rng.random_range(progress.min..=progress.max) as u8
        }
    }

    /// Start date inside the start window and an end date strictly after it.
    pub fn synthesize_dates(
        &self,
        rng: &mut impl Rng,
    ) -> Result<(NaiveDate, NaiveDate), GenerationError> {
        let offset = self.config.start_offset_days;
        let duration = self.config.duration_days;
        let offset = rng.random_range(offset.min..=offset.max);
        let duration = rng.random_range(duration.min..=duration.max);

        let start = self
            .config
            .start_base
            .checked_add_days(Days::new(offset))
            .ok_or_else(|| date_overflow(self.config.start_base, offset))?;
        let end = start
            .checked_add_days(Days::new(duration))
            .ok_or_else(|| date_overflow(start, duration))?;
        Ok((start, end))
    }

    /// Build the record at `index`, category fields first.
    pub fn synthesize_record(
        &self,
        index: u64,
        rng: &mut impl Rng,
    ) -> Result<ProjectRecord, GenerationError> {
        let province = pick("projects.provinces", &self.config.provinces, rng)?.to_string();
        let sector = pick("projects.sectors", &self.config.sectors, rng)?.to_string();
        let status = pick("projects.statuses", &self.config.statuses, rng)?.to_string();

        let budget = self.synthesize_budget(&sector, rng);
        let completion_pct = self.synthesize_completion(&status, rng);
        let (start_date, end_date) = self.synthesize_dates(rng)?;
        let title = self.synthesize_title(&sector, rng)?;

        Ok(ProjectRecord {
            id: self.config.record_id(index),
            title,
            province,
            sector,
            budget,
            status,
            completion_pct,
            start_date,
            end_date,
        })
    }
}

/// Generate `config.count` project records from `seed`.
pub fn generate_projects(
    config: &ProjectConfig,
    seed: u64,
) -> Result<Vec<ProjectRecord>, GenerationError> {
    validate_project_config(config)?;

    let synthesizer = ProjectSynthesizer::new(config);
    let stream = dataset_seed(seed, DatasetKind::Projects);
    (0..config.count)
        .map(|index| {
            let mut rng = record_rng(stream, index);
            synthesizer.synthesize_record(index, &mut rng)
        })
        .collect()
}

fn date_overflow(date: NaiveDate, days: u64) -> GenerationError {
    GenerationError::Configuration(format!("date {date} + {days} days is out of range"))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn completed_and_unstarted_statuses_pin_completion() {
        let config = ProjectConfig::default();
        let synthesizer = ProjectSynthesizer::new(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        assert_eq!(synthesizer.synthesize_completion("Achevé", &mut rng), 100);
        assert_eq!(synthesizer.synthesize_completion("En Étude", &mut rng), 0);
        assert_eq!(synthesizer.synthesize_completion("Appel d'Offres", &mut rng), 0);
        for _ in 0..200 {
            let value = synthesizer.synthesize_completion("En Cours", &mut rng);
            assert!((10..=95).contains(&value));
        }
    }

    #[test]
    fn road_titles_embed_a_four_digit_route() {
        let config = ProjectConfig::default();
        let synthesizer = ProjectSynthesizer::new(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        for _ in 0..100 {
            let title = synthesizer
                .synthesize_title("Infrastructure Routière", &mut rng)
                .unwrap();
            let (_, number) = title.rsplit_once("RP-").expect("route number");
            let number: u32 = number.parse().expect("numeric route");
            assert!((1000..=9999).contains(&number));
        }
    }

    #[test]
    fn water_titles_embed_a_district_index() {
        let config = ProjectConfig::default();
        let synthesizer = ProjectSynthesizer::new(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(12);

        for _ in 0..100 {
            let title = synthesizer
                .synthesize_title("Eau & Assainissement", &mut rng)
                .unwrap();
            let inner = title
                .rsplit_once("(Douar ")
                .and_then(|(_, rest)| rest.strip_suffix(')'))
                .expect("district index");
            let index: u32 = inner.parse().expect("numeric district");
            assert!((1..=50).contains(&index));
        }
    }

    #[test]
    fn education_titles_use_fixed_target() {
        let config = ProjectConfig::default();
        let synthesizer = ProjectSynthesizer::new(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(13);

        let title = synthesizer
            .synthesize_title("Éducation & Formation", &mut rng)
            .unwrap();
        assert!(title.ends_with(" un collège de proximité"), "{title}");
        assert!(config.actions.iter().any(|action| title.starts_with(action.as_str())));
    }

    #[test]
    fn other_sectors_draw_generic_targets() {
        let config = ProjectConfig::default();
        let synthesizer = ProjectSynthesizer::new(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(14);

        for _ in 0..50 {
            let title = synthesizer.synthesize_title("Santé", &mut rng).unwrap();
            assert!(
                config
                    .generic_targets
                    .iter()
                    .any(|target| title.ends_with(target.as_str())),
                "{title}"
            );
        }
    }

    #[test]
    fn dates_stay_in_window() {
        let config = ProjectConfig::default();
        let synthesizer = ProjectSynthesizer::new(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(15);
        let base = config.start_base;

        for _ in 0..500 {
            let (start, end) = synthesizer.synthesize_dates(&mut rng).unwrap();
            let offset = (start - base).num_days();
            let duration = (end - start).num_days();
            assert!((0..=1000).contains(&offset));
            assert!((90..=730).contains(&duration));
        }
    }

    #[test]
    fn zero_count_fails_before_generation() {
        let mut config = ProjectConfig::default();
        config.count = 0;

        assert!(matches!(
            generate_projects(&config, 1),
            Err(GenerationError::Configuration(_))
        ));
    }
}
