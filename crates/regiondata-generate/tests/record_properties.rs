use std::collections::HashSet;

use regiondata_core::{GeneratorConfig, InfraKind, ProjectConfig, WaterConfig};
use regiondata_generate::{FieldValue, Record, generate_projects, generate_water_points};

const SEEDS: [u64; 4] = [0, 1, 42, 2024];

fn projects(seed: u64) -> (ProjectConfig, Vec<regiondata_generate::ProjectRecord>) {
    let config = ProjectConfig::default();
    let records = generate_projects(&config, seed).expect("generate projects");
    (config, records)
}

fn water(seed: u64) -> (WaterConfig, Vec<regiondata_generate::WaterPointRecord>) {
    let config = WaterConfig::default();
    let records = generate_water_points(&config, seed).expect("generate water points");
    (config, records)
}

#[test]
fn budgets_follow_sector_ranges() {
    for seed in SEEDS {
        let (config, records) = projects(seed);
        for record in &records {
            let capital = ["Infrastructure Routière", "Eau & Assainissement"]
                .contains(&record.sector.as_str());
            let range = if capital {
                2_000_000..=50_000_000
            } else {
                500_000..=5_000_000
            };
            assert!(range.contains(&record.budget), "{record:?}");
            assert!(config.budget_range(&record.sector).contains(record.budget));
        }
    }
}

#[test]
fn completion_is_coupled_to_status() {
    for seed in SEEDS {
        let (_, records) = projects(seed);
        for record in &records {
            match record.status.as_str() {
                "Achevé" => assert_eq!(record.completion_pct, 100),
                "En Étude" | "Appel d'Offres" => assert_eq!(record.completion_pct, 0),
                _ => assert!((10..=95).contains(&record.completion_pct), "{record:?}"),
            }
        }
    }
}

#[test]
fn end_dates_follow_start_dates() {
    for seed in SEEDS {
        let (config, records) = projects(seed);
        for record in &records {
            let duration = (record.end_date - record.start_date).num_days();
            assert!(record.end_date > record.start_date);
            assert!((90..=730).contains(&duration), "{record:?}");
            let offset = (record.start_date - config.start_base).num_days();
            assert!((0..=1000).contains(&offset), "{record:?}");
        }
    }
}

#[test]
fn categories_come_from_vocabulary() {
    let (config, records) = projects(5);
    for record in &records {
        assert!(config.provinces.contains(&record.province));
        assert!(config.sectors.contains(&record.sector));
        assert!(config.statuses.contains(&record.status));
    }

    let (config, records) = water(5);
    for record in &records {
        assert!(config.infra_type(&record.infra_type).is_some(), "{record:?}");
    }
}

#[test]
fn identifiers_are_sequential_and_seed_independent() {
    let (_, first) = projects(1);
    let (_, second) = projects(2);

    let ids: HashSet<&str> = first.iter().map(|record| record.id.as_str()).collect();
    assert_eq!(ids.len(), first.len());

    for (index, (a, b)) in first.iter().zip(&second).enumerate() {
        assert_eq!(a.id, format!("PRJ-{}", 2_024_000 + index));
        assert_eq!(a.id, b.id);
    }
}

#[test]
fn shorter_runs_are_prefixes_of_longer_runs() {
    let mut config = ProjectConfig::default();
    let full = generate_projects(&config, 77).expect("full run");
    config.count = 10;
    let short = generate_projects(&config, 77).expect("short run");

    assert_eq!(short.as_slice(), &full[..10]);
}

#[test]
fn dam_status_matches_level() {
    for seed in SEEDS {
        let (config, records) = water(seed);
        for record in &records {
            let infra = config.infra_type(&record.infra_type).expect("known type");
            match infra.kind {
                InfraKind::Dam => {
                    assert_eq!(record.status == "Critique (Sec)", record.level < 15);
                    assert!(record.name.starts_with("Barrage Loc-"));
                }
                InfraKind::Well => assert!(record.level <= 50),
                InfraKind::Other => assert_eq!(record.level, 0),
            }
        }
    }
}

#[test]
fn coordinates_stay_in_region() {
    for seed in SEEDS {
        let (_, records) = water(seed);
        for record in &records {
            assert!((31.20..=32.50).contains(&record.lat), "{record:?}");
            assert!((-9.80..=-7.30).contains(&record.lon), "{record:?}");
        }
    }
}

#[test]
fn wells_dominate_the_type_mix() {
    let mut config = WaterConfig::default();
    config.count = 3000;
    let records = generate_water_points(&config, 11).expect("generate water points");
    let wells = records
        .iter()
        .filter(|record| record.infra_type == "Forage (Well)")
        .count();
    let share = wells as f64 / records.len() as f64;
    assert!((0.55..0.65).contains(&share), "well share was {share}");
}

#[test]
fn fields_match_schema_order() {
    let config = GeneratorConfig::default();
    let project = generate_projects(&config.projects, 1).expect("projects")[0].clone();
    let fields = project.fields();

    assert_eq!(fields[0], FieldValue::Text(project.id.clone()));
    assert_eq!(fields[4], FieldValue::Integer(project.budget));
    assert_eq!(fields[6], FieldValue::Integer(u64::from(project.completion_pct)));
    assert_eq!(fields[8], FieldValue::Date(project.end_date));
}
