//! Cooldown-gated repair attempts.

use crate::{
    xp, DeviceConstants, DeviceEvent, ModifierCost, RepairCalculator, Slot, SlotInventory, Tank,
};
use serde::{Deserialize, Serialize};

/// Ticks until the next repair attempt.
///
/// Fires on the tick that finds the counter already below zero, so a full
/// cycle after a reset spans `total + 2` ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cooldown {
    remaining: i32,
}

impl Cooldown {
    pub fn new(remaining: i32) -> Self {
        Cooldown {
            remaining: remaining.max(-1),
        }
    }

    pub fn remaining(self) -> i32 {
        self.remaining
    }

    /// Advance one tick. Returns true when an attempt is due; the counter is
    /// then already reset to `total`.
    pub fn step(&mut self, total: i32) -> bool {
        let expired = self.remaining < 0;
        self.remaining -= 1;
        if expired {
            self.remaining = total;
        }
        expired
    }
}

/// Why an attempt did or did not change anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RepairOutcome {
    Repaired { liquid_cost: u32 },
    NoRecipe,
    InsufficientLiquid { needed: u32, available: u32 },
}

/// Try one repair. Only a `Repaired` outcome touches the slots or the tank.
pub(crate) fn attempt_repair(
    inventory: &mut SlotInventory,
    tank: &mut Tank,
    calculator: &impl RepairCalculator,
    constants: &DeviceConstants,
    events: &mut Vec<DeviceEvent>,
) -> RepairOutcome {
    let Some(quote) = calculator.quote(inventory.get(Slot::Tool), inventory.get(Slot::Modifier))
    else {
        return RepairOutcome::NoRecipe;
    };

    let xp_cost = xp::experience_for_level(quote.level_cost);
    let liquid_cost = xp::xp_to_liquid(xp_cost, constants);

    let available = tank.drain(liquid_cost, true);
    if available != liquid_cost {
        return RepairOutcome::InsufficientLiquid {
            needed: liquid_cost,
            available,
        };
    }

    tank.drain(liquid_cost, false);
    match quote.modifier_cost {
        ModifierCost::All => inventory.set(Slot::Modifier, None),
        ModifierCost::Count(count) => inventory.shrink(Slot::Modifier, count),
    }
    inventory.set(Slot::Tool, None);
    inventory.set(Slot::Output, Some(quote.output));

    events.push(DeviceEvent::AnvilUsed {
        volume: constants.use_sound_volume,
        pitch: constants.use_sound_pitch,
    });

    RepairOutcome::Repaired { liquid_cost }
}
