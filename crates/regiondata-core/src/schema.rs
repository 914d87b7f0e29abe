use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::SCHEMA_VERSION;

pub const ID_PROJET: &str = "ID_Projet";
pub const INTITULE_PROJET: &str = "Intitulé_Projet";
pub const PROVINCE: &str = "Province";
pub const SECTEUR: &str = "Secteur";
pub const BUDGET_DH: &str = "Budget_DH";
pub const STATUT: &str = "Statut";
pub const TAUX_AVANCEMENT: &str = "Taux_Avancement";
pub const DATE_DEBUT: &str = "Date_Début";
pub const DATE_FIN_PREVUE: &str = "Date_Fin_Prévue";

pub const NOM: &str = "Nom";
pub const TYPE: &str = "Type";
pub const NIVEAU_OU_DEBIT: &str = "Niveau_Ou_Debit";
pub const LAT: &str = "lat";
pub const LON: &str = "lon";

const PROJECT_COLUMNS: &[(&str, ColumnKind)] = &[
    (ID_PROJET, ColumnKind::Text),
    (INTITULE_PROJET, ColumnKind::Text),
    (PROVINCE, ColumnKind::Text),
    (SECTEUR, ColumnKind::Text),
    (BUDGET_DH, ColumnKind::Integer),
    (STATUT, ColumnKind::Text),
    (TAUX_AVANCEMENT, ColumnKind::Integer),
    (DATE_DEBUT, ColumnKind::Date),
    (DATE_FIN_PREVUE, ColumnKind::Date),
];

const WATER_COLUMNS: &[(&str, ColumnKind)] = &[
    (NOM, ColumnKind::Text),
    (TYPE, ColumnKind::Text),
    (STATUT, ColumnKind::Text),
    (NIVEAU_OU_DEBIT, ColumnKind::Integer),
    (LAT, ColumnKind::Float),
    (LON, ColumnKind::Float),
];

/// The two dataset families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    Projects,
    Water,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 2] = [DatasetKind::Projects, DatasetKind::Water];

    /// Stable key used for seeding and reporting.
    pub fn key(self) -> &'static str {
        match self {
            DatasetKind::Projects => "projects",
            DatasetKind::Water => "water",
        }
    }

    pub fn schema(self) -> DatasetSchema {
        match self {
            DatasetKind::Projects => project_schema(),
            DatasetKind::Water => water_schema(),
        }
    }
}

impl std::fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Value kind of a dataset column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Text,
    Integer,
    Float,
    Date,
}

/// Named, typed column in declared order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ColumnKind,
}

/// Versioned column contract shared by the writer and the evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DatasetSchema {
    pub name: String,
    pub version: u32,
    pub columns: Vec<ColumnSpec>,
}

impl DatasetSchema {
    fn from_columns(name: &str, columns: &[(&str, ColumnKind)]) -> Self {
        Self {
            name: name.to_string(),
            version: SCHEMA_VERSION,
            columns: columns
                .iter()
                .map(|(name, kind)| ColumnSpec {
                    name: name.to_string(),
                    kind: *kind,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|col| col.name.as_str()).collect()
    }

    /// Position of a column in the declared order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|col| col.name == name)
    }

    /// Header line joined with `delimiter`.
    pub fn header(&self, delimiter: char) -> String {
        self.column_names().join(&delimiter.to_string())
    }
}

/// Schema of the project dataset file.
///
/// Consumers add their own `lat`/`lon` columns to this file, so it never
/// declares them.
pub fn project_schema() -> DatasetSchema {
    DatasetSchema::from_columns(DatasetKind::Projects.key(), PROJECT_COLUMNS)
}

/// Schema of the water point dataset file.
pub fn water_schema() -> DatasetSchema {
    DatasetSchema::from_columns(DatasetKind::Water.key(), WATER_COLUMNS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_header_is_exact() {
        assert_eq!(
            project_schema().header(';'),
            "ID_Projet;Intitulé_Projet;Province;Secteur;Budget_DH;Statut;Taux_Avancement;Date_Début;Date_Fin_Prévue"
        );
    }

    #[test]
    fn water_header_is_exact() {
        assert_eq!(water_schema().header(';'), "Nom;Type;Statut;Niveau_Ou_Debit;lat;lon");
    }

    #[test]
    fn project_schema_leaves_room_for_coordinates() {
        let schema = project_schema();
        assert!(schema.position(LAT).is_none());
        assert!(schema.position(LON).is_none());
    }
}
