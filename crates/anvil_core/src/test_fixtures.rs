//! Shared test fixtures for anvil_core and downstream crates.
//!
//! `TestWorld` places fake chests and liquid sources on any face.
//! `FixedQuote` is a repair calculator that always answers the same way.

use crate::{
    extract_unit, insert_unit, Enchantment, EnchantmentId, Face, FluidHandler, FluidStack, ItemId,
    ItemKind, ItemStack, ModifierCost, Neighborhood, RepairCalculator, RepairQuote,
    SidedInventory,
};
use std::cell::Cell;

// ---------------------------------------------------------------------------
// Stacks
// ---------------------------------------------------------------------------

pub fn damaged_pickaxe() -> ItemStack {
    ItemStack {
        item: ItemId("iron_pickaxe".to_string()),
        kind: ItemKind::Tool,
        count: 1,
        max_count: 1,
        damage: 200,
        enchantments: Default::default(),
    }
}

pub fn repaired_pickaxe() -> ItemStack {
    ItemStack {
        damage: 0,
        ..damaged_pickaxe()
    }
}

pub fn efficiency_book() -> ItemStack {
    ItemStack {
        item: ItemId("enchanted_book".to_string()),
        kind: ItemKind::EnchantedBook,
        count: 1,
        max_count: 1,
        damage: 0,
        enchantments: [Enchantment {
            id: EnchantmentId("efficiency".to_string()),
            level: 3,
        }]
        .into_iter()
        .collect(),
    }
}

pub fn iron_ingots(count: u32) -> ItemStack {
    ItemStack {
        item: ItemId("iron_ingot".to_string()),
        kind: ItemKind::Material,
        count,
        max_count: 64,
        damage: 0,
        enchantments: Default::default(),
    }
}

// ---------------------------------------------------------------------------
// Calculators
// ---------------------------------------------------------------------------

/// Always returns `quote` when a tool is present. Counts calls.
pub struct FixedQuote {
    pub quote: Option<RepairQuote>,
    pub calls: Cell<u32>,
}

impl FixedQuote {
    pub fn none() -> Self {
        FixedQuote {
            quote: None,
            calls: Cell::new(0),
        }
    }

    pub fn new(output: ItemStack, level_cost: u32, modifier_cost: ModifierCost) -> Self {
        FixedQuote {
            quote: Some(RepairQuote {
                output,
                level_cost,
                modifier_cost,
            }),
            calls: Cell::new(0),
        }
    }
}

impl RepairCalculator for FixedQuote {
    fn quote(&self, tool: Option<&ItemStack>, _modifier: Option<&ItemStack>) -> Option<RepairQuote> {
        self.calls.set(self.calls.get() + 1);
        if tool.is_none() {
            return None;
        }
        self.quote.clone()
    }
}

// ---------------------------------------------------------------------------
// Neighbors
// ---------------------------------------------------------------------------

/// A plain chest: takes anything until `capacity` stacks are used.
#[derive(Debug, Clone, Default)]
pub struct Chest {
    pub stacks: Vec<ItemStack>,
    pub capacity: usize,
    /// Faces items were inserted through, in order.
    pub inserted_through: Vec<Face>,
    pub extracted_through: Vec<Face>,
}

impl Chest {
    pub fn with_capacity(capacity: usize) -> Self {
        Chest {
            capacity,
            ..Chest::default()
        }
    }

    pub fn holding(stacks: Vec<ItemStack>) -> Self {
        let capacity = stacks.len().max(1);
        Chest {
            stacks,
            capacity,
            ..Chest::default()
        }
    }

    pub fn total_count(&self) -> u32 {
        self.stacks.iter().map(|s| s.count).sum()
    }
}

impl SidedInventory for Chest {
    fn insert_one(&mut self, face: Face, stack: &ItemStack) -> bool {
        if !insert_unit(&mut self.stacks, self.capacity, stack) {
            return false;
        }
        self.inserted_through.push(face);
        true
    }

    fn extract_one(
        &mut self,
        face: Face,
        accept: &dyn Fn(&ItemStack) -> bool,
    ) -> Option<ItemStack> {
        let unit = extract_unit(&mut self.stacks, accept)?;
        self.extracted_through.push(face);
        Some(unit)
    }
}

/// An endless-until-empty liquid source.
#[derive(Debug, Clone)]
pub struct LiquidSource {
    pub stored: FluidStack,
}

impl LiquidSource {
    pub fn xp(amount: u32) -> Self {
        LiquidSource {
            stored: FluidStack::xp(amount),
        }
    }
}

impl FluidHandler for LiquidSource {
    fn fill(&mut self, _face: Face, _stack: &FluidStack, _simulate: bool) -> u32 {
        0
    }

    fn drain(&mut self, _face: Face, max: u32, simulate: bool) -> Option<FluidStack> {
        let amount = max.min(self.stored.amount);
        if amount == 0 {
            return None;
        }
        if !simulate {
            self.stored.amount -= amount;
        }
        Some(FluidStack {
            fluid: self.stored.fluid.clone(),
            amount,
        })
    }
}

/// Six faces, each optionally holding a chest and/or a liquid source.
#[derive(Debug, Default)]
pub struct TestWorld {
    pub chests: [Option<Chest>; 6],
    pub sources: [Option<LiquidSource>; 6],
}

impl TestWorld {
    pub fn with_chest(mut self, face: Face, chest: Chest) -> Self {
        self.chests[face.index()] = Some(chest);
        self
    }

    pub fn with_source(mut self, face: Face, source: LiquidSource) -> Self {
        self.sources[face.index()] = Some(source);
        self
    }

    pub fn chest(&self, face: Face) -> &Chest {
        self.chests[face.index()]
            .as_ref()
            .unwrap_or_else(|| panic!("no chest on {face:?}"))
    }

    pub fn source(&self, face: Face) -> &LiquidSource {
        self.sources[face.index()]
            .as_ref()
            .unwrap_or_else(|| panic!("no liquid source on {face:?}"))
    }
}

impl Neighborhood for TestWorld {
    fn inventory(&mut self, face: Face) -> Option<&mut dyn SidedInventory> {
        self.chests[face.index()]
            .as_mut()
            .map(|chest| chest as &mut dyn SidedInventory)
    }

    fn fluid_handler(&mut self, face: Face) -> Option<&mut dyn FluidHandler> {
        self.sources[face.index()]
            .as_mut()
            .map(|source| source as &mut dyn FluidHandler)
    }
}
