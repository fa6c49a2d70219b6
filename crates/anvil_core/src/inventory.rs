//! The device's three-slot inventory and its acceptance rules.

use crate::{ItemKind, ItemStack, Slot};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotInventory {
    slots: [Option<ItemStack>; 3],
}

impl SlotInventory {
    /// Whether an external insert of `stack` into `slot` is allowed.
    ///
    /// The output slot is filled only by the repair controller.
    pub fn can_accept(&self, slot: Slot, stack: &ItemStack) -> bool {
        if stack.count == 0 {
            return false;
        }
        match slot {
            Slot::Tool => stack.is_tool_like() || stack.kind == ItemKind::EnchantedBook,
            Slot::Modifier => true,
            Slot::Output => false,
        }
    }

    pub fn get(&self, slot: Slot) -> Option<&ItemStack> {
        self.slots[slot.index()].as_ref()
    }

    pub fn is_occupied(&self, slot: Slot) -> bool {
        self.slots[slot.index()].is_some()
    }

    /// Unchecked write, used by the controller and by persistence.
    pub fn set(&mut self, slot: Slot, stack: Option<ItemStack>) {
        self.slots[slot.index()] = stack.filter(|s| s.count > 0);
    }

    /// Insert one unit of `stack` into `slot`, merging with what is there.
    /// Returns false with no change if the slot refuses it or is full.
    pub fn insert_one(&mut self, slot: Slot, stack: &ItemStack) -> bool {
        if !self.can_accept(slot, stack) {
            return false;
        }
        let entry = &mut self.slots[slot.index()];
        match entry {
            None => {
                *entry = Some(stack.with_count(1));
                true
            }
            Some(existing) if existing.stacks_with(stack) && existing.count < existing.max_count => {
                existing.count += 1;
                true
            }
            Some(_) => false,
        }
    }

    /// Whether one unit of `stack` would fit into `slot` right now.
    pub fn has_room_for(&self, slot: Slot, stack: &ItemStack) -> bool {
        if !self.can_accept(slot, stack) {
            return false;
        }
        match self.get(slot) {
            None => true,
            Some(existing) => existing.stacks_with(stack) && existing.count < existing.max_count,
        }
    }

    /// Remove one unit from `slot`.
    pub fn take_one(&mut self, slot: Slot) -> Option<ItemStack> {
        let entry = &mut self.slots[slot.index()];
        let stack = entry.as_mut()?;
        let taken = stack.with_count(1);
        stack.count -= 1;
        if stack.count == 0 {
            *entry = None;
        }
        Some(taken)
    }

    /// Decrease `slot` by `count`, clearing it on reaching zero.
    pub fn shrink(&mut self, slot: Slot, count: u32) {
        let entry = &mut self.slots[slot.index()];
        let Some(stack) = entry.as_mut() else {
            return;
        };
        stack.count = stack.count.saturating_sub(count);
        if stack.count == 0 {
            *entry = None;
        }
    }
}

/// Insert one unit of `stack` into a list of at most `capacity` stacks,
/// merging into the first stack with room before starting a new one.
///
/// Shared by the plain storage neighbors so every one of them stacks the
/// same way.
pub fn insert_unit(stacks: &mut Vec<ItemStack>, capacity: usize, stack: &ItemStack) -> bool {
    let mergeable = stacks
        .iter()
        .position(|s| s.stacks_with(stack) && s.count < s.max_count);
    match mergeable {
        Some(idx) => stacks[idx].count += 1,
        None if stacks.len() < capacity => stacks.push(stack.with_count(1)),
        None => return false,
    }
    true
}

/// Remove one unit from the first stack `accept` allows, dropping the
/// stack once it is empty.
pub fn extract_unit(
    stacks: &mut Vec<ItemStack>,
    accept: &dyn Fn(&ItemStack) -> bool,
) -> Option<ItemStack> {
    let idx = stacks.iter().position(|s| accept(s))?;
    let unit = stacks[idx].with_count(1);
    stacks[idx].count -= 1;
    if stacks[idx].count == 0 {
        stacks.remove(idx);
    }
    Some(unit)
}
