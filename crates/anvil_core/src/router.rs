//! Per-tick item and liquid transfers across the device's faces.
//!
//! Every transfer is best effort and moves at most one unit (or one
//! throughput budget of liquid). Nothing carries over between ticks.

use crate::{
    AutoFlags, AutoSlot, DeviceEvent, DirectionSet, Face, FluidStack, ItemStack, Neighborhood,
    SideConfig, SidedInventory, Slot, SlotInventory, Tank,
};

/// Borrowed view of the device state the router touches.
pub(crate) struct Router<'a> {
    pub inventory: &'a mut SlotInventory,
    pub tank: &'a mut Tank,
    pub sides: &'a SideConfig,
    pub auto: &'a AutoFlags,
}

impl Router<'_> {
    /// Run the four automated transfers in their fixed order.
    pub fn run(
        &mut self,
        world: &mut impl Neighborhood,
        drink_per_tick: u32,
        events: &mut Vec<DeviceEvent>,
    ) {
        if self.auto.get(AutoSlot::Xp) {
            let amount = drink_from_sides(self.tank, &self.sides.xp, drink_per_tick, world);
            if amount > 0 {
                events.push(DeviceEvent::LiquidDrunk { amount });
            }
        }

        if self.auto.get(AutoSlot::Output) && self.inventory.is_occupied(Slot::Output) {
            if let Some(face) = push_output(self.inventory, &self.sides.output, world) {
                events.push(DeviceEvent::ItemPushed { face });
            }
        }

        if self.auto.get(AutoSlot::Tool) && !self.inventory.is_occupied(Slot::Tool) {
            if let Some(face) = pull_into(self.inventory, Slot::Tool, &self.sides.tool, world) {
                events.push(DeviceEvent::ItemPulled {
                    slot: Slot::Tool,
                    face,
                });
            }
        }

        if self.auto.get(AutoSlot::Modifier) {
            if let Some(face) =
                pull_into(self.inventory, Slot::Modifier, &self.sides.modifier, world)
            {
                events.push(DeviceEvent::ItemPulled {
                    slot: Slot::Modifier,
                    face,
                });
            }
        }
    }
}

/// Pull liquid from every enabled face until `limit` or the tank is full.
/// Returns the total amount added to the tank.
pub(crate) fn drink_from_sides(
    tank: &mut Tank,
    sides: &DirectionSet,
    limit: u32,
    world: &mut impl Neighborhood,
) -> u32 {
    let mut budget = limit.min(tank.space());
    let mut total = 0;

    for face in sides.faces() {
        if budget == 0 {
            break;
        }
        let Some(source) = world.fluid_handler(face) else {
            continue;
        };
        let Some(offered) = source.drain(face.opposite(), budget, true) else {
            continue;
        };
        let wanted = tank.fill(&offered, true).min(budget);
        if wanted == 0 {
            continue;
        }
        let Some(drained) = source.drain(face.opposite(), wanted, false) else {
            continue;
        };
        if drained.amount > wanted {
            let excess = FluidStack {
                fluid: drained.fluid.clone(),
                amount: drained.amount - wanted,
            };
            let returned = source.fill(face.opposite(), &excess, false);
            tracing::warn!(
                ?face,
                wanted,
                drained = drained.amount,
                returned,
                "source over-delivered"
            );
        }
        let accepted = FluidStack {
            amount: drained.amount.min(wanted),
            ..drained
        };
        let filled = tank.fill(&accepted, false);
        budget = budget.saturating_sub(filled);
        total += filled;
        tracing::trace!(?face, filled, "drank liquid");
    }

    total
}

/// Hand one output unit to the first enabled neighbor that takes it.
fn push_output(
    inventory: &mut SlotInventory,
    sides: &DirectionSet,
    world: &mut impl Neighborhood,
) -> Option<Face> {
    let unit = inventory.get(Slot::Output)?.with_count(1);

    for face in sides.faces() {
        let Some(target) = world.inventory(face) else {
            continue;
        };
        if target.insert_one(face.opposite(), &unit) {
            inventory.shrink(Slot::Output, 1);
            tracing::debug!(?face, item = %unit.item, "pushed output");
            return Some(face);
        }
    }

    None
}

/// Take one unit from the first enabled neighbor offering something `slot` has room for.
fn pull_into(
    inventory: &mut SlotInventory,
    slot: Slot,
    sides: &DirectionSet,
    world: &mut impl Neighborhood,
) -> Option<Face> {
    for face in sides.faces() {
        let Some(source) = world.inventory(face) else {
            continue;
        };
        let accept = |stack: &ItemStack| inventory.has_room_for(slot, stack);
        let Some(unit) = source.extract_one(face.opposite(), &accept) else {
            continue;
        };
        if inventory.insert_one(slot, &unit) {
            tracing::debug!(?face, ?slot, item = %unit.item, "pulled item");
            if unit.count > 1 {
                hand_back(source, face, &unit.with_count(unit.count - 1));
            }
            return Some(face);
        }
        hand_back(source, face, &unit);
    }

    None
}

/// Return `stack` to the neighbor it came from, one unit at a time.
fn hand_back(source: &mut dyn SidedInventory, face: Face, stack: &ItemStack) {
    for returned in 0..stack.count {
        if !source.insert_one(face.opposite(), stack) {
            tracing::warn!(
                ?face,
                item = %stack.item,
                lost = stack.count - returned,
                "neighbor refused returned items"
            );
            return;
        }
    }
}
