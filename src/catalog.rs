//! Static definition tables: resources, tools and crafting recipes.
//!
//! Tables are read-only once loaded. Every cross-reference is checked at
//! load time so a misspelt key fails immediately instead of surfacing as
//! a silently missing resource mid-game.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

const STANDARD_CATALOG: &str = include_str!("../data/catalog.yaml");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialCost {
    pub resource: String,
    pub quantity: f64,
}

impl MaterialCost {
    pub fn new(resource: impl Into<String>, quantity: f64) -> Self {
        Self {
            resource: resource.into(),
            quantity,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceDefinition {
    pub key: String,
    pub display_name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub gatherable: bool,
    #[serde(default)]
    pub color_class: String,
    #[serde(default)]
    pub sell_price: Option<f64>,
    #[serde(default)]
    pub worker_cost: Option<f64>,
    #[serde(default)]
    pub worker_salary: Option<f64>,
    /// Inputs consumed each time one unit is produced.
    #[serde(default)]
    pub materials: Vec<MaterialCost>,
}

/// Tool lookups keyed by tool resource key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolTables {
    #[serde(default)]
    pub categories: BTreeMap<String, String>,
    #[serde(default)]
    pub bonuses: BTreeMap<String, f64>,
    #[serde(default)]
    pub effectiveness: BTreeMap<String, Vec<String>>,
}

impl ToolTables {
    pub fn category(&self, tool: &str) -> GameResult<&str> {
        self.categories
            .get(tool)
            .map(String::as_str)
            .ok_or_else(|| GameError::UnknownToolCategory(tool.to_string()))
    }

    pub fn bonus_percent(&self, tool: &str) -> f64 {
        self.bonuses.get(tool).copied().unwrap_or(0.0)
    }

    pub fn is_effective(&self, tool: &str, resource: &str) -> bool {
        self.effectiveness
            .get(tool)
            .is_some_and(|targets| targets.iter().any(|target| target == resource))
    }

    /// Tools that speed up gathering of `resource`.
    pub fn tools_for<'a>(&'a self, resource: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.effectiveness
            .iter()
            .filter(move |(_, targets)| targets.iter().any(|target| target == resource))
            .map(|(tool, _)| tool.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CraftingRecipe {
    pub id: String,
    pub ingredients: Vec<MaterialCost>,
    pub result: MaterialCost,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    resources: Vec<ResourceDefinition>,
    #[serde(default)]
    tools: ToolTables,
    #[serde(default)]
    recipes: Vec<CraftingRecipe>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    resources: BTreeMap<String, ResourceDefinition>,
    tools: ToolTables,
    recipes: BTreeMap<String, CraftingRecipe>,
}

impl Catalog {
    /// Tables shipped with the game.
    pub fn standard() -> GameResult<Self> {
        Self::from_yaml_str(STANDARD_CATALOG)
    }

    pub fn from_yaml_str(text: &str) -> GameResult<Self> {
        let file: CatalogFile = serde_yaml::from_str(text)
            .map_err(|err| GameError::InvalidCatalog(err.to_string()))?;
        Self::new(file.resources, file.tools, file.recipes)
    }

    pub fn new(
        resources: Vec<ResourceDefinition>,
        tools: ToolTables,
        recipes: Vec<CraftingRecipe>,
    ) -> GameResult<Self> {
        let mut by_key = BTreeMap::new();
        for definition in resources {
            let key = definition.key.clone();
            if by_key.insert(key.clone(), definition).is_some() {
                return Err(GameError::InvalidCatalog(format!(
                    "resource '{key}' defined more than once"
                )));
            }
        }
        let mut by_id = BTreeMap::new();
        for recipe in recipes {
            let id = recipe.id.clone();
            if by_id.insert(id.clone(), recipe).is_some() {
                return Err(GameError::InvalidCatalog(format!(
                    "recipe '{id}' defined more than once"
                )));
            }
        }
        let catalog = Self {
            resources: by_key,
            tools,
            recipes: by_id,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> GameResult<()> {
        if !self.resources.contains_key(crate::GOLD) {
            return Err(GameError::InvalidCatalog(format!(
                "catalog must define '{}'",
                crate::GOLD
            )));
        }
        for definition in self.resources.values() {
            for material in &definition.materials {
                self.require(&material.resource, || {
                    format!("materials of '{}'", definition.key)
                })?;
            }
        }
        for (tool, category) in &self.tools.categories {
            self.require(tool, || format!("tool category '{category}'"))?;
        }
        for tool in self.tools.bonuses.keys() {
            self.require(tool, || "tool bonus table".to_string())?;
            if !self.tools.categories.contains_key(tool) {
                return Err(GameError::InvalidCatalog(format!(
                    "tool '{tool}' has a bonus but no category"
                )));
            }
        }
        for (tool, targets) in &self.tools.effectiveness {
            self.require(tool, || "tool effectiveness table".to_string())?;
            for target in targets {
                self.require(target, || format!("effectiveness of '{tool}'"))?;
            }
        }
        for recipe in self.recipes.values() {
            for ingredient in &recipe.ingredients {
                self.require(&ingredient.resource, || format!("recipe '{}'", recipe.id))?;
            }
            self.require(&recipe.result.resource, || format!("recipe '{}'", recipe.id))?;
        }
        Ok(())
    }

    fn require(&self, key: &str, referrer: impl FnOnce() -> String) -> GameResult<()> {
        if self.resources.contains_key(key) {
            Ok(())
        } else {
            Err(GameError::InvalidCatalog(format!(
                "{} references unknown resource '{key}'",
                referrer()
            )))
        }
    }

    pub fn resource(&self, key: &str) -> GameResult<&ResourceDefinition> {
        self.resources
            .get(key)
            .ok_or_else(|| GameError::UnknownResource(key.to_string()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.resources.contains_key(key)
    }

    pub fn resources(&self) -> impl Iterator<Item = &ResourceDefinition> {
        self.resources.values()
    }

    pub fn recipe(&self, id: &str) -> GameResult<&CraftingRecipe> {
        self.recipes
            .get(id)
            .ok_or_else(|| GameError::UnknownRecipe(id.to_string()))
    }

    pub fn recipes(&self) -> impl Iterator<Item = &CraftingRecipe> {
        self.recipes.values()
    }

    pub fn tools(&self) -> &ToolTables {
        &self.tools
    }

    /// Sell price per unit, `None` for resources that cannot be sold.
    pub fn sell_price(&self, key: &str) -> Option<f64> {
        self.resources.get(key).and_then(|def| def.sell_price)
    }
}

pub struct CatalogLoader {
    base_dir: PathBuf,
}

impl CatalogLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Catalog> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
        let catalog = Catalog::from_yaml_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_is_consistent() {
        let catalog = Catalog::standard().unwrap();
        assert!(catalog.contains("wood"));
        assert_eq!(catalog.tools().category("hatchet").unwrap(), "cutting");
        assert!(catalog.tools().is_effective("pickaxe", "stone"));
        assert_eq!(catalog.tools().tools_for("wood").collect::<Vec<_>>(), ["hatchet"]);
        assert_eq!(catalog.recipe("brick").unwrap().result.resource, "brick");
    }

    #[test]
    fn unknown_lookups_fail_loudly() {
        let catalog = Catalog::standard().unwrap();
        assert_eq!(
            catalog.recipe("golden_crown").unwrap_err(),
            GameError::UnknownRecipe("golden_crown".into())
        );
        assert_eq!(
            catalog.tools().category("wood").unwrap_err(),
            GameError::UnknownToolCategory("wood".into())
        );
        assert!(catalog.resource("w00d").is_err());
    }

    #[test]
    fn dangling_material_reference_is_rejected() {
        let yaml = r#"
resources:
  - key: gold
    display_name: Gold
  - key: plank
    display_name: Plank
    materials:
      - resource: timber
        quantity: 2
"#;
        let err = Catalog::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, GameError::InvalidCatalog(msg) if msg.contains("timber")));
    }

    #[test]
    fn bonus_without_category_is_rejected() {
        let yaml = r#"
resources:
  - key: gold
    display_name: Gold
  - key: axe
    display_name: Axe
tools:
  bonuses:
    axe: 25
"#;
        assert!(Catalog::from_yaml_str(yaml).is_err());
    }
}
