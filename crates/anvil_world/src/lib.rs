//! Content loading, scenario setup and the catalog-driven repair calculator
//! shared by the CLI and integration tests.

mod calculator;
mod neighbors;
mod scenario;

pub use calculator::CatalogRepair;
pub use neighbors::{Neighbor, Reservoir, ScenarioWorld, Storage};
pub use scenario::{load_scenario, DeviceSetup, ItemSpec, NeighborSpec, Scenario};

use anvil_core::{DeviceConstants, EnchantmentId, ItemId, ItemKind};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: ItemId,
    pub kind: ItemKind,
    pub max_count: u32,
    /// Durability of a tool; zero for anything that cannot be damaged.
    #[serde(default)]
    pub max_damage: u32,
    /// Material that restores this tool's durability.
    #[serde(default)]
    pub repair_material: Option<ItemId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnchantmentDef {
    pub id: EnchantmentId,
    pub max_level: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Content {
    pub content_version: String,
    pub items: Vec<ItemDef>,
    pub enchantments: Vec<EnchantmentDef>,
    pub constants: DeviceConstants,
}

impl Content {
    pub fn item(&self, id: &ItemId) -> Option<&ItemDef> {
        self.items.iter().find(|def| def.id == *id)
    }

    pub fn enchantment(&self, id: &EnchantmentId) -> Option<&EnchantmentDef> {
        self.enchantments.iter().find(|def| def.id == *id)
    }
}

#[derive(Deserialize)]
struct ItemsFile {
    content_version: String,
    items: Vec<ItemDef>,
    enchantments: Vec<EnchantmentDef>,
}

/// Validates cross-references in loaded content, panicking on any authoring error.
pub fn validate_content(content: &Content) {
    let item_ids: HashSet<&ItemId> = content.items.iter().map(|def| &def.id).collect();
    assert_eq!(
        item_ids.len(),
        content.items.len(),
        "item ids must be unique"
    );

    for def in &content.items {
        assert!(def.max_count > 0, "item '{}' has zero max_count", def.id);
        if def.kind == ItemKind::Tool {
            assert_eq!(def.max_count, 1, "tool '{}' must not stack", def.id);
            assert!(def.max_damage > 0, "tool '{}' has no durability", def.id);
        }
        if let Some(material) = &def.repair_material {
            assert!(
                item_ids.contains(material),
                "item '{}' repair material '{}' is not a known item",
                def.id,
                material,
            );
        }
    }

    for def in &content.enchantments {
        assert!(
            def.max_level > 0,
            "enchantment '{}' has zero max_level",
            def.id
        );
    }

    assert!(
        content.constants.total_cooldown_ticks >= 0,
        "total_cooldown_ticks must not be negative"
    );
    assert!(
        content.constants.drink_per_tick > 0,
        "drink_per_tick must be positive"
    );
}

pub fn load_content(content_dir: &str) -> Result<Content> {
    let dir = Path::new(content_dir);
    let constants: DeviceConstants = serde_json::from_str(
        &std::fs::read_to_string(dir.join("constants.json")).context("reading constants.json")?,
    )
    .context("parsing constants.json")?;
    let items_file: ItemsFile = serde_json::from_str(
        &std::fs::read_to_string(dir.join("items.json")).context("reading items.json")?,
    )
    .context("parsing items.json")?;
    let content = Content {
        content_version: items_file.content_version,
        items: items_file.items,
        enchantments: items_file.enchantments,
        constants,
    };
    validate_content(&content);
    tracing::debug!(
        version = %content.content_version,
        items = content.items.len(),
        "content loaded"
    );
    Ok(content)
}
