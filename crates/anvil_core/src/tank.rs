//! Single-fluid bounded tank.

use crate::{FluidId, FluidStack};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tank {
    fluid: FluidId,
    capacity: u32,
    amount: u32,
    dirty: bool,
}

impl Tank {
    pub fn new(capacity: u32, fluid: FluidId) -> Self {
        Tank {
            fluid,
            capacity,
            amount: 0,
            dirty: false,
        }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn amount(&self) -> u32 {
        self.amount
    }

    pub fn space(&self) -> u32 {
        self.capacity - self.amount
    }

    pub fn accepts(&self, fluid: &FluidId) -> bool {
        *fluid == self.fluid
    }

    pub fn fluid(&self) -> &FluidId {
        &self.fluid
    }

    /// Fill with `stack`, returning how much was (or would be) accepted.
    pub fn fill(&mut self, stack: &FluidStack, simulate: bool) -> u32 {
        if !self.accepts(&stack.fluid) {
            return 0;
        }
        let accepted = stack.amount.min(self.space());
        if !simulate && accepted > 0 {
            self.amount += accepted;
            self.dirty = true;
        }
        accepted
    }

    /// Drain up to `max`, returning how much was (or would be) drained.
    ///
    /// Callers that need an all-or-nothing debit simulate first and only
    /// commit once the simulated amount equals the request.
    pub fn drain(&mut self, max: u32, simulate: bool) -> u32 {
        let drained = max.min(self.amount);
        if !simulate && drained > 0 {
            self.amount -= drained;
            self.dirty = true;
        }
        drained
    }

    /// Overwrite the stored amount, clamped to capacity.
    pub fn set_amount(&mut self, amount: u32) {
        let amount = amount.min(self.capacity);
        if amount != self.amount {
            self.amount = amount;
            self.dirty = true;
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}
