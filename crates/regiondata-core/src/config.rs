use std::path::PathBuf;

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::vocabulary;

/// Immutable configuration for a generation run.
///
/// Every table the generator samples from lives here, so several
/// configurations can run side by side in one process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GeneratorConfig {
    /// Run seed. When absent a random seed is drawn and reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Directory where dataset files are written.
    pub out_dir: PathBuf,
    pub projects: ProjectConfig,
    pub water: WaterConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            out_dir: PathBuf::from("."),
            projects: ProjectConfig::default(),
            water: WaterConfig::default(),
        }
    }
}

/// Text encoding of a written dataset file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum TextEncoding {
    /// Plain UTF-8.
    Utf8,
    /// UTF-8 prefixed with a byte-order mark, which spreadsheet tools use to
    /// detect accented characters.
    Utf8Bom,
}

impl TextEncoding {
    pub fn byte_order_mark(self) -> &'static [u8] {
        match self {
            TextEncoding::Utf8 => &[],
            TextEncoding::Utf8Bom => b"\xEF\xBB\xBF",
        }
    }
}

/// Inclusive integer range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IntRange {
    pub min: u64,
    pub max: u64,
}

impl IntRange {
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: u64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// A categorical label with a sampling weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeightedLabel {
    pub label: String,
    pub weight: f64,
}

impl WeightedLabel {
    pub fn new(label: impl Into<String>, weight: f64) -> Self {
        Self {
            label: label.into(),
            weight,
        }
    }
}

/// How a project title target is chosen for a sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetRule {
    /// Template whose `{n}` placeholder is replaced by a uniform integer in
    /// `[min, max]`.
    Numbered { template: String, min: u64, max: u64 },
    /// A single fixed target phrase.
    Fixed { target: String },
}

/// Target rule bound to a sector. Sectors without a rule draw from the
/// generic target list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SectorTarget {
    pub sector: String,
    pub rule: TargetRule,
}

/// Configuration of the project dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProjectConfig {
    pub count: u64,
    pub filename: String,
    pub delimiter: char,
    pub encoding: TextEncoding,
    pub id_prefix: String,
    /// Identifier of record `i` is `id_prefix` followed by `id_base + i`.
    pub id_base: u64,
    /// First possible start date.
    pub start_base: NaiveDate,
    pub provinces: Vec<String>,
    pub sectors: Vec<String>,
    pub statuses: Vec<String>,
    /// Statuses that pin completion to 100.
    pub completed_statuses: Vec<String>,
    /// Statuses that pin completion to 0.
    pub unstarted_statuses: Vec<String>,
    pub capital_intensive_sectors: Vec<String>,
    pub actions: Vec<String>,
    pub generic_targets: Vec<String>,
    pub start_offset_days: IntRange,
    pub duration_days: IntRange,
    pub capital_budget: IntRange,
    pub standard_budget: IntRange,
    /// Completion range for statuses that are neither completed nor unstarted.
    pub progress: IntRange,
    #[serde(default)]
    pub sector_targets: Vec<SectorTarget>,
}

impl ProjectConfig {
    pub fn is_capital_intensive(&self, sector: &str) -> bool {
        self.capital_intensive_sectors.iter().any(|s| s == sector)
    }

    pub fn budget_range(&self, sector: &str) -> IntRange {
        if self.is_capital_intensive(sector) {
            self.capital_budget
        } else {
            self.standard_budget
        }
    }

    pub fn target_rule(&self, sector: &str) -> Option<&TargetRule> {
        self.sector_targets
            .iter()
            .find(|target| target.sector == sector)
            .map(|target| &target.rule)
    }

    /// Identifier for the record at `index`.
    pub fn record_id(&self, index: u64) -> String {
        format!("{}{}", self.id_prefix, self.id_base + index)
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            count: vocabulary::DEFAULT_PROJECT_COUNT,
            filename: vocabulary::PROJECTS_FILENAME.to_string(),
            delimiter: ';',
            encoding: TextEncoding::Utf8Bom,
            id_prefix: vocabulary::PROJECT_ID_PREFIX.to_string(),
            id_base: vocabulary::PROJECT_ID_BASE,
            start_base: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap_or_default(),
            provinces: owned(vocabulary::PROVINCES),
            sectors: owned(vocabulary::SECTORS),
            statuses: owned(vocabulary::PROJECT_STATUSES),
            completed_statuses: owned(&[vocabulary::STATUS_COMPLETED]),
            unstarted_statuses: owned(&[vocabulary::STATUS_IN_STUDY, vocabulary::STATUS_TENDERING]),
            capital_intensive_sectors: owned(vocabulary::CAPITAL_INTENSIVE_SECTORS),
            actions: owned(vocabulary::ACTIONS),
            generic_targets: owned(vocabulary::GENERIC_TARGETS),
            start_offset_days: IntRange::new(0, 1000),
            duration_days: IntRange::new(90, 730),
            capital_budget: IntRange::new(2_000_000, 50_000_000),
            standard_budget: IntRange::new(500_000, 5_000_000),
            progress: IntRange::new(10, 95),
            sector_targets: vec![
                SectorTarget {
                    sector: vocabulary::SECTOR_ROADS.to_string(),
                    rule: TargetRule::Numbered {
                        template: vocabulary::ROAD_TARGET_TEMPLATE.to_string(),
                        min: 1000,
                        max: 9999,
                    },
                },
                SectorTarget {
                    sector: vocabulary::SECTOR_WATER.to_string(),
                    rule: TargetRule::Numbered {
                        template: vocabulary::WATER_TARGET_TEMPLATE.to_string(),
                        min: 1,
                        max: 50,
                    },
                },
                SectorTarget {
                    sector: vocabulary::SECTOR_EDUCATION.to_string(),
                    rule: TargetRule::Fixed {
                        target: vocabulary::EDUCATION_TARGET.to_string(),
                    },
                },
            ],
        }
    }
}

/// Rectangular latitude/longitude region, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.lat_min..=self.lat_max).contains(&lat) && (self.lon_min..=self.lon_max).contains(&lon)
    }
}

/// Behavior family of an infrastructure type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum InfraKind {
    Dam,
    Well,
    Other,
}

/// Infrastructure type drawn for a water point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct InfraType {
    pub label: String,
    pub kind: InfraKind,
    pub weight: f64,
    /// Prefix of the point name; the record index is appended.
    pub name_prefix: String,
}

/// Dams report percent-full and only two statuses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DamRule {
    /// Levels strictly below this value are critical.
    pub critical_below: u64,
    pub critical_status: String,
    pub operational_status: String,
    pub level: IntRange,
}

/// Wells report depth and a weighted status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WellRule {
    pub depth: IntRange,
    pub statuses: Vec<WeightedLabel>,
}

/// Other types report no measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OtherRule {
    pub statuses: Vec<WeightedLabel>,
}

/// Configuration of the water point dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WaterConfig {
    pub count: u64,
    pub filename: String,
    pub delimiter: char,
    pub encoding: TextEncoding,
    pub bounds: BoundingBox,
    pub dam: DamRule,
    pub well: WellRule,
    pub other: OtherRule,
    pub infra_types: Vec<InfraType>,
}

impl WaterConfig {
    pub fn infra_type(&self, label: &str) -> Option<&InfraType> {
        self.infra_types.iter().find(|infra| infra.label == label)
    }
}

impl Default for WaterConfig {
    fn default() -> Self {
        let mut infra_types = vec![
            infra(vocabulary::DAM_TYPE, InfraKind::Dam),
            infra(vocabulary::WELL_TYPE, InfraKind::Well),
        ];
        infra_types.extend(
            vocabulary::OTHER_TYPES
                .iter()
                .map(|entry| infra(*entry, InfraKind::Other)),
        );

        Self {
            count: vocabulary::DEFAULT_WATER_COUNT,
            filename: vocabulary::WATER_FILENAME.to_string(),
            delimiter: ';',
            encoding: TextEncoding::Utf8,
            bounds: BoundingBox {
                lat_min: vocabulary::LAT_MIN,
                lat_max: vocabulary::LAT_MAX,
                lon_min: vocabulary::LON_MIN,
                lon_max: vocabulary::LON_MAX,
            },
            dam: DamRule {
                critical_below: 15,
                critical_status: vocabulary::WATER_STATUS_CRITICAL.to_string(),
                operational_status: vocabulary::WATER_STATUS_OPERATIONAL.to_string(),
                level: IntRange::new(5, 100),
            },
            well: WellRule {
                depth: IntRange::new(0, 50),
                statuses: weighted(vocabulary::WELL_STATUSES),
            },
            other: OtherRule {
                statuses: weighted(vocabulary::OTHER_STATUSES),
            },
            infra_types,
        }
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn weighted(values: &[(&str, f64)]) -> Vec<WeightedLabel> {
    values
        .iter()
        .map(|(label, weight)| WeightedLabel::new(*label, *weight))
        .collect()
}

fn infra((label, weight, name_prefix): (&str, f64, &str), kind: InfraKind) -> InfraType {
    InfraType {
        label: label.to_string(),
        kind,
        weight,
        name_prefix: name_prefix.to_string(),
    }
}
