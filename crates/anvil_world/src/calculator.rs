//! A repair calculator driven by the item catalog.
//!
//! Two recipes: tool + its repair material restores durability, and
//! tool-or-book + enchanted book merges enchantments.

use crate::Content;
use anvil_core::{
    Enchantment, Enchantments, ItemKind, ItemStack, ModifierCost, RepairCalculator, RepairQuote,
};

/// One unit of repair material restores `1 / REPAIR_UNIT_DIVISOR` of max durability.
const REPAIR_UNIT_DIVISOR: u32 = 4;

pub struct CatalogRepair<'a> {
    content: &'a Content,
}

impl<'a> CatalogRepair<'a> {
    pub fn new(content: &'a Content) -> Self {
        CatalogRepair { content }
    }

    fn material_repair(&self, tool: &ItemStack, material: &ItemStack) -> Option<RepairQuote> {
        let def = self.content.item(&tool.item)?;
        if def.repair_material.as_ref() != Some(&material.item) || tool.damage == 0 {
            return None;
        }
        let per_unit = (def.max_damage / REPAIR_UNIT_DIVISOR).max(1);
        let units = tool.damage.div_ceil(per_unit).min(material.count);
        if units == 0 {
            return None;
        }
        let output = ItemStack {
            damage: tool.damage.saturating_sub(units * per_unit),
            ..tool.clone()
        };
        Some(RepairQuote {
            output,
            level_cost: units,
            modifier_cost: ModifierCost::Count(units),
        })
    }

    fn book_merge(&self, target: &ItemStack, book: &ItemStack) -> Option<RepairQuote> {
        let mut merged: Enchantments = target.enchantments.clone();
        let mut level_cost = 0;

        for incoming in &book.enchantments {
            let Some(def) = self.content.enchantment(&incoming.id) else {
                continue;
            };
            match merged.iter().position(|e| e.id == incoming.id) {
                Some(idx) => {
                    let existing = &mut merged[idx];
                    let level = if existing.level == incoming.level {
                        (existing.level + 1).min(def.max_level)
                    } else {
                        existing.level.max(incoming.level)
                    };
                    if level != existing.level {
                        existing.level = level;
                        level_cost += level;
                    }
                }
                None => {
                    let level = incoming.level.min(def.max_level);
                    merged.push(Enchantment {
                        id: incoming.id.clone(),
                        level,
                    });
                    level_cost += level;
                }
            }
        }

        if level_cost == 0 {
            return None;
        }
        Some(RepairQuote {
            output: ItemStack {
                count: 1,
                enchantments: merged,
                ..target.clone()
            },
            level_cost,
            modifier_cost: ModifierCost::All,
        })
    }
}

impl RepairCalculator for CatalogRepair<'_> {
    fn quote(&self, tool: Option<&ItemStack>, modifier: Option<&ItemStack>) -> Option<RepairQuote> {
        let (tool, modifier) = (tool?, modifier?);
        match (tool.kind, modifier.kind) {
            (ItemKind::Tool | ItemKind::EnchantedBook, ItemKind::EnchantedBook) => {
                self.book_merge(tool, modifier)
            }
            (ItemKind::Tool, ItemKind::Material) => self.material_repair(tool, modifier),
            _ => None,
        }
    }
}
