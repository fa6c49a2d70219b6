//! Capability interfaces at the device boundary.
//!
//! The device implements `SidedInventory` and `FluidHandler` itself and
//! sees its neighbors through the same traits via `Neighborhood`.

use crate::{Face, FluidStack, ItemStack};

/// Item access through a face, one unit per call.
pub trait SidedInventory {
    /// Insert one unit of `stack` entering through `face`.
    fn insert_one(&mut self, face: Face, stack: &ItemStack) -> bool;

    /// Extract one unit leaving through `face` for which `accept` holds.
    fn extract_one(&mut self, face: Face, accept: &dyn Fn(&ItemStack) -> bool)
        -> Option<ItemStack>;
}

/// Fluid access through a face.
pub trait FluidHandler {
    /// Returns the amount accepted.
    fn fill(&mut self, face: Face, stack: &FluidStack, simulate: bool) -> u32;

    fn drain(&mut self, face: Face, max: u32, simulate: bool) -> Option<FluidStack>;
}

/// The world around one device, looked up by the device's own faces.
pub trait Neighborhood {
    fn inventory(&mut self, face: Face) -> Option<&mut dyn SidedInventory>;

    fn fluid_handler(&mut self, face: Face) -> Option<&mut dyn FluidHandler>;
}

/// A world with nothing attached on any face.
pub struct Isolated;

impl Neighborhood for Isolated {
    fn inventory(&mut self, _face: Face) -> Option<&mut dyn SidedInventory> {
        None
    }

    fn fluid_handler(&mut self, _face: Face) -> Option<&mut dyn FluidHandler> {
        None
    }
}

/// How much of the modifier stack a repair uses up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierCost {
    All,
    Count(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairQuote {
    pub output: ItemStack,
    pub level_cost: u32,
    pub modifier_cost: ModifierCost,
}

/// Computes what combining a tool with a modifier would produce.
pub trait RepairCalculator {
    /// `None` when the pair is incompatible or either input is missing.
    fn quote(&self, tool: Option<&ItemStack>, modifier: Option<&ItemStack>)
        -> Option<RepairQuote>;
}
