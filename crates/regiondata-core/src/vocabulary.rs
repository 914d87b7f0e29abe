//! Reference vocabulary for the Marrakech-Safi region.
//!
//! These tables are the sampling universes behind [`GeneratorConfig::default`].
//!
//! [`GeneratorConfig::default`]: crate::GeneratorConfig

pub const PROJECTS_FILENAME: &str = "PDR_Marrakech_Safi_Projects.csv";
pub const WATER_FILENAME: &str = "Water_Data_Marrakech_Safi.csv";

pub const DEFAULT_PROJECT_COUNT: u64 = 500;
pub const DEFAULT_WATER_COUNT: u64 = 300;

pub const PROJECT_ID_PREFIX: &str = "PRJ-";
pub const PROJECT_ID_BASE: u64 = 2_024_000;

pub const PROVINCES: &[&str] = &[
    "Préfecture de Marrakech",
    "Province de Chichaoua",
    "Province d'Al Haouz",
    "Province d'El Kelâa des Sraghna",
    "Province d'Essaouira",
    "Province de Rehamna",
    "Province de Safi",
    "Province de Youssoufia",
];

pub const SECTOR_ROADS: &str = "Infrastructure Routière";
pub const SECTOR_WATER: &str = "Eau & Assainissement";
pub const SECTOR_EDUCATION: &str = "Éducation & Formation";

pub const SECTORS: &[&str] = &[
    SECTOR_ROADS,
    SECTOR_WATER,
    SECTOR_EDUCATION,
    "Santé",
    "Tourisme & Artisanat",
    "Agriculture Solidaire",
    "Énergie Renouvelable",
];

/// Sectors whose budgets come from the high range.
pub const CAPITAL_INTENSIVE_SECTORS: &[&str] = &[SECTOR_ROADS, SECTOR_WATER];

pub const STATUS_IN_STUDY: &str = "En Étude";
pub const STATUS_TENDERING: &str = "Appel d'Offres";
pub const STATUS_COMPLETED: &str = "Achevé";

pub const PROJECT_STATUSES: &[&str] = &[
    STATUS_IN_STUDY,
    STATUS_TENDERING,
    "En Cours",
    "En Retard",
    STATUS_COMPLETED,
    "Suspendu",
];

pub const ACTIONS: &[&str] = &[
    "Construction de",
    "Aménagement de",
    "Réhabilitation de",
    "Équipement de",
    "Étude technique pour",
];

pub const GENERIC_TARGETS: &[&str] = &[
    "la route provinciale",
    "un centre de santé",
    "une école communale",
    "un barrage collinaire",
    "un centre culturel",
    "un réseau d'eau potable",
];

pub const ROAD_TARGET_TEMPLATE: &str = "la route RP-{n}";
pub const WATER_TARGET_TEMPLATE: &str = "un système d'alimentation en eau potable (Douar {n})";
pub const EDUCATION_TARGET: &str = "un collège de proximité";

/// Placeholder substituted by numbered target templates.
pub const NUMBER_PLACEHOLDER: &str = "{n}";

// Approximate regional bounding box.
pub const LAT_MIN: f64 = 31.20;
pub const LAT_MAX: f64 = 32.50;
pub const LON_MIN: f64 = -9.80;
pub const LON_MAX: f64 = -7.30;

pub const WATER_STATUS_OPERATIONAL: &str = "Opérationnel";
pub const WATER_STATUS_CRITICAL: &str = "Critique (Sec)";

/// Infrastructure types as (label, weight, name prefix).
pub const DAM_TYPE: (&str, f64, &str) = ("Barrage (Dam)", 0.05, "Barrage Loc-");
pub const WELL_TYPE: (&str, f64, &str) = ("Forage (Well)", 0.6, "Puits Douar-");
pub const OTHER_TYPES: &[(&str, f64, &str)] = &[
    ("Station Épuration", 0.15, "Zone-"),
    ("Zone Agricole", 0.2, "Zone-"),
];

pub const WELL_STATUSES: &[(&str, f64)] = &[
    (WATER_STATUS_OPERATIONAL, 0.6),
    (WATER_STATUS_CRITICAL, 0.2),
    ("En Maintenance", 0.1),
    ("Pollué", 0.1),
];

pub const OTHER_STATUSES: &[(&str, f64)] = &[("Actif", 1.0), ("À l'arrêt", 1.0)];
