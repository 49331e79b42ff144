//! Reaction-product table.
//!
//! The catalog lists a central molecule and groups of reactions starting
//! from it. Each product becomes one row; its physical properties are
//! derived from its position in the group so the table is stable between
//! page loads.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use metabolab_common::Result;

use crate::query::{Cell, TableQuery, TableRow};

const SOLUBILITY: [&str; 4] = ["Water", "Ethanol", "DMSO", "Acetone"];
const STABILITY: [&str; 3] = ["Stable at RT", "Refrigerate", "Freeze"];
const STORAGE: [&str; 3] = ["2-8°C, Dry", "Room Temperature", "-20°C"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Molecule {
    pub name: String,
    pub formula: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    pub formula: String,
    pub product_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionGroup {
    pub name: String,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionCatalog {
    pub central_molecule: Molecule,
    #[serde(default)]
    pub reaction_groups: Vec<ReactionGroup>,
}

impl ReactionCatalog {
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&content)?;
        debug!(
            path = %path.display(),
            groups = catalog.reaction_groups.len(),
            "loaded reaction catalog"
        );
        Ok(catalog)
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.reaction_groups.iter().map(|g| g.name.as_str())
    }

    /// The central molecule first, then every product in catalog order.
    pub fn rows(&self) -> Vec<ReactionRow> {
        let mut rows = vec![ReactionRow {
            id: "central".to_string(),
            formula: self.central_molecule.formula.clone(),
            name: self.central_molecule.name.clone(),
            molecular_weight: 408.6,
            melting_point: "185-187°C".to_string(),
            solubility: "Water, Ethanol".to_string(),
            stability: "Stable at RT".to_string(),
            storage: "2-8°C, Dry".to_string(),
            reaction_type: "Starting Material".to_string(),
        }];

        for group in &self.reaction_groups {
            for (i, reaction) in group.reactions.iter().enumerate() {
                rows.push(ReactionRow {
                    id: format!("{}-{}", group.name, i),
                    formula: reaction.formula.clone(),
                    name: reaction.product_name.clone(),
                    molecular_weight: 400.0 + i as f64 * 50.0,
                    melting_point: format!("{}-{}°C", 150 + i * 10, 200 + i * 15),
                    solubility: SOLUBILITY[i % SOLUBILITY.len()].to_string(),
                    stability: STABILITY[i % STABILITY.len()].to_string(),
                    storage: STORAGE[i % STORAGE.len()].to_string(),
                    reaction_type: group.name.clone(),
                });
            }
        }
        rows
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionRow {
    pub id: String,
    pub formula: String,
    pub name: String,
    pub molecular_weight: f64,
    pub melting_point: String,
    pub solubility: String,
    pub stability: String,
    pub storage: String,
    /// Name of the reaction group, or "Starting Material".
    pub reaction_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReactionField {
    Id,
    Formula,
    Name,
    #[default]
    MolecularWeight,
    MeltingPoint,
    Solubility,
    Stability,
    Storage,
    ReactionType,
}

impl TableRow for ReactionRow {
    type Field = ReactionField;

    fn cell(&self, field: ReactionField) -> Cell<'_> {
        match field {
            ReactionField::Id              => Cell::Text(&self.id),
            ReactionField::Formula         => Cell::Text(&self.formula),
            ReactionField::Name            => Cell::Text(&self.name),
            ReactionField::MolecularWeight => Cell::Number(self.molecular_weight),
            ReactionField::MeltingPoint    => Cell::Text(&self.melting_point),
            ReactionField::Solubility      => Cell::Text(&self.solubility),
            ReactionField::Stability       => Cell::Text(&self.stability),
            ReactionField::Storage         => Cell::Text(&self.storage),
            ReactionField::ReactionType    => Cell::Text(&self.reaction_type),
        }
    }

    fn searchable(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.formula.as_str(), self.reaction_type.as_str()]
    }

    fn group(&self) -> Option<&str> {
        Some(self.reaction_type.as_str())
    }
}

impl TableQuery<ReactionField> {
    /// Lightest products first, no filter.
    pub fn reactions() -> Self {
        Self::new(ReactionField::default())
    }
}
