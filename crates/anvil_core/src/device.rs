use crate::repair::{attempt_repair, Cooldown, RepairOutcome};
use crate::router::Router;
use crate::{
    AutoFlags, AutoSlot, DeviceConstants, DeviceEvent, DeviceRecord, DirectionSet, EventEnvelope,
    Face, FluidHandler, FluidId, FluidStack, ItemStack, Neighborhood, RepairCalculator,
    SideConfig, SidedInventory, Slot, SlotInventory, SyncChange, Tank, XP_FLUID,
};

/// The automated repair station.
///
/// Owns its slots, tank, routing configuration and cooldown. The tick
/// driver calls [`Device::tick`] once per world tick while loaded.
#[derive(Debug, Clone)]
pub struct Device {
    constants: DeviceConstants,
    inventory: SlotInventory,
    tank: Tank,
    sides: SideConfig,
    auto: AutoFlags,
    cooldown: Cooldown,
    tick: u64,
}

impl Device {
    pub fn new(constants: DeviceConstants) -> Self {
        let tank = Tank::new(constants.tank_capacity(), FluidId(XP_FLUID.to_string()));
        Device {
            constants,
            inventory: SlotInventory::default(),
            tank,
            sides: SideConfig::default(),
            auto: AutoFlags::default(),
            cooldown: Cooldown::default(),
            tick: 0,
        }
    }

    pub fn constants(&self) -> &DeviceConstants {
        &self.constants
    }

    pub fn inventory(&self) -> &SlotInventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut SlotInventory {
        &mut self.inventory
    }

    pub fn tank(&self) -> &Tank {
        &self.tank
    }

    pub fn tank_mut(&mut self) -> &mut Tank {
        &mut self.tank
    }

    pub fn cooldown(&self) -> i32 {
        self.cooldown.remaining()
    }

    pub fn ticks_elapsed(&self) -> u64 {
        self.tick
    }

    // -----------------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------------

    pub fn allowed_directions(&self, slot: AutoSlot) -> &DirectionSet {
        self.sides.select(slot)
    }

    pub fn set_allowed_direction(&mut self, slot: AutoSlot, face: Face, enabled: bool) {
        self.sides.select_mut(slot).set(face, enabled);
    }

    pub fn auto_flag(&self, slot: AutoSlot) -> bool {
        self.auto.get(slot)
    }

    pub fn set_auto_flag(&mut self, slot: AutoSlot, enabled: bool) {
        self.auto.set(slot, enabled);
    }

    // -----------------------------------------------------------------------
    // Tick
    // -----------------------------------------------------------------------

    /// Advance one tick: transfers, cooldown, maybe a repair, then sync.
    pub fn tick(
        &mut self,
        world: &mut impl Neighborhood,
        calculator: &impl RepairCalculator,
    ) -> Vec<EventEnvelope> {
        let mut events = Vec::new();

        Router {
            inventory: &mut self.inventory,
            tank: &mut self.tank,
            sides: &self.sides,
            auto: &self.auto,
        }
        .run(world, self.constants.drink_per_tick, &mut events);

        if self.cooldown.step(self.constants.total_cooldown_ticks) {
            let outcome = attempt_repair(
                &mut self.inventory,
                &mut self.tank,
                calculator,
                &self.constants,
                &mut events,
            );
            match outcome {
                RepairOutcome::Repaired { liquid_cost } => {
                    tracing::debug!(tick = self.tick, liquid_cost, "repair completed");
                }
                RepairOutcome::NoRecipe => {
                    tracing::trace!(tick = self.tick, "nothing to repair");
                }
                RepairOutcome::InsufficientLiquid { needed, available } => {
                    tracing::trace!(tick = self.tick, needed, available, "waiting on liquid");
                }
            }
        }

        let changes = self.take_changes();
        if !changes.is_empty() {
            events.push(DeviceEvent::Synced { changes });
        }

        let tick = self.tick;
        self.tick += 1;
        events
            .into_iter()
            .map(|event| EventEnvelope { tick, event })
            .collect()
    }

    // -----------------------------------------------------------------------
    // Sync
    // -----------------------------------------------------------------------

    /// Collect one change per dirty field and clear the dirty flags.
    pub fn take_changes(&mut self) -> Vec<SyncChange> {
        let mut changes = Vec::new();
        for slot in AutoSlot::ALL {
            let dirs = self.sides.select_mut(slot);
            if dirs.is_dirty() {
                changes.push(SyncChange::Directions {
                    slot,
                    faces: dirs.faces().collect(),
                });
                dirs.clear_dirty();
            }
        }
        if self.auto.is_dirty() {
            changes.push(SyncChange::AutoFlags {
                enabled: self.auto.enabled(),
            });
            self.auto.clear_dirty();
        }
        if self.tank.is_dirty() {
            changes.push(SyncChange::TankAmount(self.tank.amount()));
            self.tank.clear_dirty();
        }
        changes
    }

    /// Apply a write from a remote observer, same as the local setter.
    pub fn apply_sync(&mut self, change: &SyncChange) {
        match change {
            SyncChange::Directions { slot, faces } => self.sides.select_mut(*slot).replace(faces),
            SyncChange::AutoFlags { enabled } => self.auto.replace(enabled),
            SyncChange::TankAmount(amount) => self.tank.set_amount(*amount),
        }
    }

    /// Set one auto flag from a raw selector ordinal off the wire.
    pub fn apply_auto_flag_ordinal(&mut self, ordinal: u8, enabled: bool) {
        let slot = AutoSlot::from_ordinal(ordinal)
            .unwrap_or_else(|err| unreachable!("selector must be validated upstream: {err}"));
        self.set_auto_flag(slot, enabled);
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    pub fn save(&self) -> DeviceRecord {
        DeviceRecord {
            tool: self.inventory.get(Slot::Tool).cloned(),
            modifier: self.inventory.get(Slot::Modifier).cloned(),
            output: self.inventory.get(Slot::Output).cloned(),
            tank_amount: self.tank.amount(),
            cooldown: self.cooldown.remaining(),
            sides: self.sides.clone(),
            auto_flags: self.auto.clone(),
        }
    }

    /// Restore from a record. Restored state is considered already synced.
    pub fn load(&mut self, record: &DeviceRecord) {
        self.inventory.set(Slot::Tool, record.tool.clone());
        self.inventory.set(Slot::Modifier, record.modifier.clone());
        self.inventory.set(Slot::Output, record.output.clone());
        self.tank.set_amount(record.tank_amount);
        self.cooldown = Cooldown::new(record.cooldown);
        self.sides = record.sides.clone();
        self.auto = record.auto_flags.clone();
        self.take_changes();
    }

    pub fn from_record(constants: DeviceConstants, record: &DeviceRecord) -> Self {
        let mut device = Device::new(constants);
        device.load(record);
        device
    }
}

impl SidedInventory for Device {
    fn insert_one(&mut self, face: Face, stack: &ItemStack) -> bool {
        for (auto, slot) in [(AutoSlot::Tool, Slot::Tool), (AutoSlot::Modifier, Slot::Modifier)] {
            if self.sides.select(auto).contains(face) && self.inventory.insert_one(slot, stack) {
                return true;
            }
        }
        false
    }

    fn extract_one(
        &mut self,
        face: Face,
        accept: &dyn Fn(&ItemStack) -> bool,
    ) -> Option<ItemStack> {
        if !self.sides.output.contains(face) {
            return None;
        }
        if !accept(self.inventory.get(Slot::Output)?) {
            return None;
        }
        self.inventory.take_one(Slot::Output)
    }
}

impl FluidHandler for Device {
    fn fill(&mut self, face: Face, stack: &FluidStack, simulate: bool) -> u32 {
        if !self.sides.xp.contains(face) {
            return 0;
        }
        self.tank.fill(stack, simulate)
    }

    fn drain(&mut self, _face: Face, _max: u32, _simulate: bool) -> Option<FluidStack> {
        None
    }
}
