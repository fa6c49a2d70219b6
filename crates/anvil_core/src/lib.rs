//! `anvil_core`: the automated anvil's per-tick state machine.
//!
//! No IO, no world simulation. Neighbors and the repair-cost formula are
//! supplied by the caller through the traits in `capability`.

mod capability;
mod device;
mod directions;
mod inventory;
mod persistence;
mod repair;
mod router;
mod tank;
mod types;
pub mod xp;

pub use capability::{
    FluidHandler, Isolated, ModifierCost, Neighborhood, RepairCalculator, RepairQuote,
    SidedInventory,
};
pub use device::Device;
pub use directions::{AutoFlags, DirectionSet, SideConfig};
pub use inventory::{extract_unit, insert_unit, SlotInventory};
pub use persistence::DeviceRecord;
pub use repair::Cooldown;
pub use tank::Tank;
pub use types::*;

#[cfg(any(test, feature = "test-support"))]
pub mod test_fixtures;
