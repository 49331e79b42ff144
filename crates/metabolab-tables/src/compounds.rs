//! Compound library table.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use metabolab_common::Result;

use crate::query::{Cell, TableQuery, TableRow};

/// One stock compound as listed in the library file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compound {
    pub compound_name: String,
    pub smiles: String,
    pub mw: f64,
    pub mass_mg: f64,
    pub volume_of_stock_ml: f64,
    #[serde(rename = "stock_concentration_1mM")]
    pub stock_concentration_1mm: f64,
    pub equivalence: f64,
    pub density: String,
    pub micro_liter_per_reaction: f64,
    pub volume_liquid_sm: String,
    pub solvent: String,
    pub no_of_reactions: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompoundLibrary {
    #[serde(default)]
    pub compounds: Vec<Compound>,
}

impl CompoundLibrary {
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let library = Self::from_json(&std::fs::read_to_string(path)?)?;
        debug!(path = %path.display(), compounds = library.compounds.len(), "loaded compound library");
        Ok(library)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompoundField {
    #[default]
    CompoundName,
    Smiles,
    Mw,
    MassMg,
    VolumeOfStockMl,
    StockConcentration,
    Equivalence,
    Density,
    MicroLiterPerReaction,
    VolumeLiquidSm,
    Solvent,
    NoOfReactions,
}

impl TableRow for Compound {
    type Field = CompoundField;

    fn cell(&self, field: CompoundField) -> Cell<'_> {
        match field {
            CompoundField::CompoundName          => Cell::Text(&self.compound_name),
            CompoundField::Smiles                => Cell::Text(&self.smiles),
            CompoundField::Mw                    => Cell::Number(self.mw),
            CompoundField::MassMg                => Cell::Number(self.mass_mg),
            CompoundField::VolumeOfStockMl       => Cell::Number(self.volume_of_stock_ml),
            CompoundField::StockConcentration    => Cell::Number(self.stock_concentration_1mm),
            CompoundField::Equivalence           => Cell::Number(self.equivalence),
            CompoundField::Density               => Cell::Text(&self.density),
            CompoundField::MicroLiterPerReaction => Cell::Number(self.micro_liter_per_reaction),
            CompoundField::VolumeLiquidSm        => Cell::Text(&self.volume_liquid_sm),
            CompoundField::Solvent               => Cell::Text(&self.solvent),
            CompoundField::NoOfReactions         => Cell::Number(f64::from(self.no_of_reactions)),
        }
    }

    fn searchable(&self) -> Vec<&str> {
        vec![self.compound_name.as_str(), self.smiles.as_str(), self.solvent.as_str()]
    }
}

impl TableQuery<CompoundField> {
    /// Alphabetical by name, no filter.
    pub fn compounds() -> Self {
        Self::new(CompoundField::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metabolab_test_utils::assert_eq;

    fn compound(name: &str, smiles: &str, mw: f64, solvent: &str) -> Compound {
        Compound {
            compound_name: name.to_string(),
            smiles: smiles.to_string(),
            mw,
            mass_mg: 10.0,
            volume_of_stock_ml: 1.0,
            stock_concentration_1mm: 1.0,
            equivalence: 1.0,
            density: "solid".to_string(),
            micro_liter_per_reaction: 5.0,
            volume_liquid_sm: "-".to_string(),
            solvent: solvent.to_string(),
            no_of_reactions: 4,
        }
    }

    fn library() -> Vec<Compound> {
        vec![
            compound("pyridine", "c1ccncc1", 79.1, "DMSO"),
            compound("Benzoic acid", "OC(=O)c1ccccc1", 122.12, "Ethanol"),
            compound("aniline", "Nc1ccccc1", 93.13, "DMSO"),
        ]
    }

    fn names(rows: &[&Compound]) -> Vec<String> {
        rows.iter().map(|c| c.compound_name.clone()).collect()
    }

    #[test]
    fn test_default_sort_is_name_ascending() {
        let data = library();
        let q = TableQuery::compounds();
        assert_eq!(names(&q.apply(&data)), vec!["aniline", "Benzoic acid", "pyridine"]);
    }

    #[test]
    fn test_search_covers_smiles_and_solvent() {
        let data = library();
        let mut q = TableQuery::compounds();
        q.set_search("NCC");
        assert_eq!(names(&q.apply(&data)), vec!["pyridine"]);
        q.set_search("dmso");
        assert_eq!(names(&q.apply(&data)), vec!["aniline", "pyridine"]);
    }

    #[test]
    fn test_numeric_column_toggles_direction() {
        let data = library();
        let mut q = TableQuery::compounds();
        q.sort_by(CompoundField::Mw);
        assert_eq!(names(&q.apply(&data)), vec!["pyridine", "aniline", "Benzoic acid"]);
        q.sort_by(CompoundField::Mw);
        assert_eq!(names(&q.apply(&data)), vec!["Benzoic acid", "aniline", "pyridine"]);
    }

    #[test]
    fn test_group_filter_excludes_ungrouped_rows() {
        let data = library();
        let mut q = TableQuery::compounds();
        q.set_group(Some("DMSO".to_string()));
        assert!(q.apply(&data).is_empty());
    }

    #[test]
    fn test_library_json_uses_source_field_names() {
        let json = r#"{"compounds": [{
            "compound_name": "glycine", "smiles": "NCC(=O)O", "mw": 75.07,
            "mass_mg": 7.5, "volume_of_stock_ml": 1.0, "stock_concentration_1mM": 0.1,
            "equivalence": 1.0, "density": "solid", "micro_liter_per_reaction": 10.0,
            "volume_liquid_sm": "-", "solvent": "Water", "no_of_reactions": 12
        }]}"#;
        let library = CompoundLibrary::from_json(json).unwrap();
        assert_eq!(library.compounds.len(), 1);
        assert_eq!(library.compounds[0].stock_concentration_1mm, 0.1);
        assert_eq!(library.compounds[0].no_of_reactions, 12);
    }

    #[test]
    fn test_from_file_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("compounds.json");
        let original = CompoundLibrary { compounds: library() };
        std::fs::write(&path, serde_json::to_string(&original).unwrap()).unwrap();
        assert_eq!(CompoundLibrary::from_file(&path).unwrap(), original);
    }
}
