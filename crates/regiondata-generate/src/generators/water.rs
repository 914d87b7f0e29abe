use rand::Rng;

use regiondata_core::{DatasetKind, InfraKind, InfraType, WaterConfig, validate_water_config};

use crate::errors::GenerationError;
use crate::generators::{FieldValue, Record, dataset_seed, record_rng};
use crate::sampling::{choose_weighted, pick_weighted};

/// A synthetic water infrastructure point.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterPointRecord {
    pub name: String,
    pub infra_type: String,
    pub status: String,
    /// Percent full for dams, depth for wells, zero otherwise.
    pub level: u64,
    pub lat: f64,
    pub lon: f64,
}

impl Record for WaterPointRecord {
    const KIND: DatasetKind = DatasetKind::Water;

    fn fields(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Text(self.name.clone()),
            FieldValue::Text(self.infra_type.clone()),
            FieldValue::Text(self.status.clone()),
            FieldValue::Integer(self.level),
            FieldValue::Float(self.lat),
            FieldValue::Float(self.lon),
        ]
    }
}

/// Field synthesizers for water point records.
#[derive(Debug, Clone, Copy)]
pub struct WaterSynthesizer<'a> {
    config: &'a WaterConfig,
}

impl<'a> WaterSynthesizer<'a> {
    pub fn new(config: &'a WaterConfig) -> Self {
        Self { config }
    }

    pub fn synthesize_infra_type(
        &self,
        rng: &mut impl Rng,
    ) -> Result<&'a InfraType, GenerationError> {
        choose_weighted(&self.config.infra_types, |infra| infra.weight, rng).ok_or_else(|| {
            GenerationError::Configuration(
                "water.infra_types has no type with a positive weight".to_string(),
            )
        })
    }

    /// Status and measurement for a point of the given kind.
    pub fn synthesize_status_and_level(
        &self,
        kind: InfraKind,
        rng: &mut impl Rng,
    ) -> Result<(String, u64), GenerationError> {
        match kind {
            InfraKind::Dam => {
                let dam = &self.config.dam;
                let level = rng.random_range(dam.level.min..=dam.level.max);
                let status = if level < dam.critical_below {
                    &dam.critical_status
                } else {
                    &dam.operational_status
                };
                Ok((status.clone(), level))
            }
            InfraKind::Well => {
                let well = &self.config.well;
                let depth = rng.random_range(well.depth.min..=well.depth.max);
                let status = pick_weighted("water.well.statuses", &well.statuses, rng)?;
                Ok((status.to_string(), depth))
            }
            InfraKind::Other => {
                let status =
                    pick_weighted("water.other.statuses", &self.config.other.statuses, rng)?;
                Ok((status.to_string(), 0))
            }
        }
    }

    /// Independent uniform draws over the bounding box.
    pub fn synthesize_coordinates(&self, rng: &mut impl Rng) -> (f64, f64) {
        let bounds = &self.config.bounds;
        let lat = rng.random_range(bounds.lat_min..=bounds.lat_max);
        let lon = rng.random_range(bounds.lon_min..=bounds.lon_max);
        (lat, lon)
    }

    pub fn synthesize_name(&self, infra: &InfraType, index: u64) -> String {
        format!("{}{index}", infra.name_prefix)
    }

    pub fn synthesize_record(
        &self,
        index: u64,
        rng: &mut impl Rng,
    ) -> Result<WaterPointRecord, GenerationError> {
        let infra = self.synthesize_infra_type(rng)?;
        let (status, level) = self.synthesize_status_and_level(infra.kind, rng)?;
        let (lat, lon) = self.synthesize_coordinates(rng);

        Ok(WaterPointRecord {
            name: self.synthesize_name(infra, index),
            infra_type: infra.label.clone(),
            status,
            level,
            lat,
            lon,
        })
    }
}

/// Generate `config.count` water point records from `seed`.
pub fn generate_water_points(
    config: &WaterConfig,
    seed: u64,
) -> Result<Vec<WaterPointRecord>, GenerationError> {
    validate_water_config(config)?;

    let synthesizer = WaterSynthesizer::new(config);
    let stream = dataset_seed(seed, DatasetKind::Water);
    (0..config.count)
        .map(|index| {
            let mut rng = record_rng(stream, index);
            synthesizer.synthesize_record(index, &mut rng)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn dam_status_follows_level() {
        let config = WaterConfig::default();
        let synthesizer = WaterSynthesizer::new(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        for _ in 0..500 {
            let (status, level) = synthesizer
                .synthesize_status_and_level(InfraKind::Dam, &mut rng)
                .unwrap();
            assert!((5..=100).contains(&level));
            assert_eq!(status == "Critique (Sec)", level < 15, "{status} at {level}");
            assert!(status == "Critique (Sec)" || status == "Opérationnel");
        }
    }

    #[test]
    fn wells_report_depth_and_known_status() {
        let config = WaterConfig::default();
        let synthesizer = WaterSynthesizer::new(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(6);

        for _ in 0..500 {
            let (status, depth) = synthesizer
                .synthesize_status_and_level(InfraKind::Well, &mut rng)
                .unwrap();
            assert!(depth <= 50);
            assert!(config.well.statuses.iter().any(|label| label.label == status));
        }
    }

    #[test]
    fn other_types_report_zero() {
        let config = WaterConfig::default();
        let synthesizer = WaterSynthesizer::new(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(8);

        for _ in 0..100 {
            let (status, level) = synthesizer
                .synthesize_status_and_level(InfraKind::Other, &mut rng)
                .unwrap();
            assert_eq!(level, 0);
            assert!(status == "Actif" || status == "À l'arrêt");
        }
    }

    #[test]
    fn names_carry_type_prefix_and_index() {
        let config = WaterConfig::default();
        let synthesizer = WaterSynthesizer::new(&config);

        assert_eq!(
            synthesizer.synthesize_name(&config.infra_types[0], 3),
            "Barrage Loc-3"
        );
        assert_eq!(
            synthesizer.synthesize_name(&config.infra_types[1], 7),
            "Puits Douar-7"
        );
        assert_eq!(synthesizer.synthesize_name(&config.infra_types[3], 12), "Zone-12");
    }

    #[test]
    fn coordinates_stay_in_bounds() {
        let config = WaterConfig::default();
        let synthesizer = WaterSynthesizer::new(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(10);

        for _ in 0..1000 {
            let (lat, lon) = synthesizer.synthesize_coordinates(&mut rng);
            assert!((31.20..=32.50).contains(&lat), "lat {lat}");
            assert!((-9.80..=-7.30).contains(&lon), "lon {lon}");
        }
    }
}
