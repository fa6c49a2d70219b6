use super::*;

fn enable(device: &mut Device, slot: AutoSlot, faces: &[Face]) {
    for face in faces {
        device.set_allowed_direction(slot, *face, true);
    }
    device.set_auto_flag(slot, true);
}

#[test]
fn test_auto_output_pushes_one_unit_to_enabled_face() {
    let mut device = device_with(0, None, None);
    device.inventory_mut().set(Slot::Output, Some(iron_ingots(3)));
    enable(&mut device, AutoSlot::Output, &[Face::East]);
    let mut world = TestWorld::default()
        .with_chest(Face::East, Chest::with_capacity(4))
        .with_chest(Face::West, Chest::with_capacity(4));

    let events = device.tick(&mut world, &FixedQuote::none());

    assert_eq!(world.chest(Face::East).total_count(), 1);
    assert_eq!(world.chest(Face::East).inserted_through, vec![Face::West]);
    assert_eq!(world.chest(Face::West).total_count(), 0);
    assert_eq!(device.inventory().get(Slot::Output).unwrap().count, 2);
    assert!(has_event(&events, |e| *e == DeviceEvent::ItemPushed { face: Face::East }));
}

#[test]
fn test_auto_output_disabled_keeps_output() {
    let mut device = device_with(0, None, None);
    device.inventory_mut().set(Slot::Output, Some(repaired_pickaxe()));
    device.set_allowed_direction(AutoSlot::Output, Face::East, true);
    let mut world = TestWorld::default().with_chest(Face::East, Chest::with_capacity(4));

    device.tick(&mut world, &FixedQuote::none());

    assert_eq!(world.chest(Face::East).total_count(), 0);
    assert!(device.inventory().is_occupied(Slot::Output));
}

#[test]
fn test_auto_output_falls_through_to_next_face() {
    let mut device = device_with(0, None, None);
    device.inventory_mut().set(Slot::Output, Some(repaired_pickaxe()));
    enable(&mut device, AutoSlot::Output, &[Face::Up, Face::South]);
    let mut full = Chest::with_capacity(1);
    full.stacks.push(efficiency_book());
    let mut world = TestWorld::default()
        .with_chest(Face::Up, full)
        .with_chest(Face::South, Chest::with_capacity(1));

    device.tick(&mut world, &FixedQuote::none());

    assert_eq!(world.chest(Face::Up).total_count(), 1);
    assert_eq!(world.chest(Face::South).stacks, vec![repaired_pickaxe()]);
    assert!(!device.inventory().is_occupied(Slot::Output));
}

#[test]
fn test_auto_output_with_no_room_is_retried() {
    let mut device = device_with(0, None, None);
    device.inventory_mut().set(Slot::Output, Some(repaired_pickaxe()));
    enable(&mut device, AutoSlot::Output, &[Face::North]);
    let mut full = Chest::with_capacity(1);
    full.stacks.push(efficiency_book());
    let mut world = TestWorld::default().with_chest(Face::North, full);

    device.tick(&mut world, &FixedQuote::none());
    assert!(device.inventory().is_occupied(Slot::Output));

    world.chests[Face::North.index()] = Some(Chest::with_capacity(1));
    device.tick(&mut world, &FixedQuote::none());
    assert!(!device.inventory().is_occupied(Slot::Output));
}

#[test]
fn test_tool_pull_skips_items_the_slot_refuses() {
    let mut device = device_with(0, None, None);
    enable(&mut device, AutoSlot::Tool, &[Face::North]);
    let mut world = TestWorld::default().with_chest(
        Face::North,
        Chest::holding(vec![iron_ingots(10), damaged_pickaxe()]),
    );

    let events = device.tick(&mut world, &FixedQuote::none());

    assert_eq!(device.inventory().get(Slot::Tool), Some(&damaged_pickaxe()));
    assert_eq!(world.chest(Face::North).stacks, vec![iron_ingots(10)]);
    assert_eq!(world.chest(Face::North).extracted_through, vec![Face::South]);
    assert!(has_event(&events, |e| *e
        == DeviceEvent::ItemPulled {
            slot: Slot::Tool,
            face: Face::North
        }));
}

#[test]
fn test_tool_pull_waits_for_empty_slot() {
    let mut device = device_with(0, Some(repaired_pickaxe()), None);
    enable(&mut device, AutoSlot::Tool, &[Face::North]);
    let mut world =
        TestWorld::default().with_chest(Face::North, Chest::holding(vec![damaged_pickaxe()]));

    device.tick(&mut world, &FixedQuote::none());

    assert_eq!(device.inventory().get(Slot::Tool), Some(&repaired_pickaxe()));
    assert_eq!(world.chest(Face::North).total_count(), 1);
}

#[test]
fn test_modifier_pull_tops_up_occupied_slot() {
    let mut device = device_with(0, None, Some(iron_ingots(3)));
    enable(&mut device, AutoSlot::Modifier, &[Face::West]);
    let mut world = TestWorld::default().with_chest(Face::West, Chest::holding(vec![iron_ingots(5)]));

    device.tick(&mut world, &FixedQuote::none());
    device.tick(&mut world, &FixedQuote::none());

    assert_eq!(device.inventory().get(Slot::Modifier).unwrap().count, 5);
    assert_eq!(world.chest(Face::West).total_count(), 3);
}

#[test]
fn test_modifier_pull_ignores_unstackable_items() {
    let mut device = device_with(0, None, Some(iron_ingots(3)));
    enable(&mut device, AutoSlot::Modifier, &[Face::West]);
    let mut world =
        TestWorld::default().with_chest(Face::West, Chest::holding(vec![efficiency_book()]));

    device.tick(&mut world, &FixedQuote::none());

    assert_eq!(device.inventory().get(Slot::Modifier), Some(&iron_ingots(3)));
    assert_eq!(world.chest(Face::West).total_count(), 1);
}

#[test]
fn test_faces_outside_the_set_are_ignored() {
    let mut device = device_with(0, None, None);
    enable(&mut device, AutoSlot::Tool, &[Face::Up]);
    let mut world =
        TestWorld::default().with_chest(Face::Down, Chest::holding(vec![damaged_pickaxe()]));

    device.tick(&mut world, &FixedQuote::none());

    assert!(!device.inventory().is_occupied(Slot::Tool));
    assert_eq!(world.chest(Face::Down).total_count(), 1);
}

#[test]
fn test_drink_is_capped_per_tick() {
    let mut device = device_with(0, None, None);
    enable(&mut device, AutoSlot::Xp, &[Face::Down]);
    let mut world = TestWorld::default().with_source(Face::Down, LiquidSource::xp(1000));

    let events = device.tick(&mut world, &FixedQuote::none());

    assert_eq!(device.tank().amount(), 100);
    assert_eq!(world.source(Face::Down).stored.amount, 900);
    assert!(has_event(&events, |e| *e == DeviceEvent::LiquidDrunk { amount: 100 }));
}

#[test]
fn test_drink_budget_spans_faces() {
    let mut device = device_with(0, None, None);
    enable(&mut device, AutoSlot::Xp, &[Face::Down, Face::Up]);
    let mut world = TestWorld::default()
        .with_source(Face::Down, LiquidSource::xp(60))
        .with_source(Face::Up, LiquidSource::xp(60));

    device.tick(&mut world, &FixedQuote::none());

    assert_eq!(device.tank().amount(), 100);
    assert_eq!(world.source(Face::Down).stored.amount, 0);
    assert_eq!(world.source(Face::Up).stored.amount, 20);
}

#[test]
fn test_drink_stops_at_capacity() {
    let mut device = device_with(capacity() - 30, None, None);
    enable(&mut device, AutoSlot::Xp, &[Face::Down]);
    let mut world = TestWorld::default().with_source(Face::Down, LiquidSource::xp(1000));

    device.tick(&mut world, &FixedQuote::none());

    assert_eq!(device.tank().amount(), capacity());
    assert_eq!(world.source(Face::Down).stored.amount, 970);
}

#[test]
fn test_drink_refuses_other_fluids() {
    let mut device = device_with(0, None, None);
    enable(&mut device, AutoSlot::Xp, &[Face::Down]);
    let water = LiquidSource {
        stored: FluidStack {
            fluid: FluidId("water".to_string()),
            amount: 1000,
        },
    };
    let mut world = TestWorld::default().with_source(Face::Down, water);

    device.tick(&mut world, &FixedQuote::none());

    assert_eq!(device.tank().amount(), 0);
    assert_eq!(world.source(Face::Down).stored.amount, 1000);
}

#[test]
fn test_toggle_applies_from_next_tick() {
    let mut device = device_with(0, None, None);
    device.set_allowed_direction(AutoSlot::Xp, Face::Down, true);
    let mut world = TestWorld::default().with_source(Face::Down, LiquidSource::xp(1000));

    device.tick(&mut world, &FixedQuote::none());
    assert_eq!(device.tank().amount(), 0);

    device.set_auto_flag(AutoSlot::Xp, true);
    assert_eq!(device.tank().amount(), 0, "toggling is not retroactive");
    device.tick(&mut world, &FixedQuote::none());
    assert_eq!(device.tank().amount(), 100);

    device.set_allowed_direction(AutoSlot::Xp, Face::Down, false);
    device.tick(&mut world, &FixedQuote::none());
    assert_eq!(device.tank().amount(), 100);
}

#[test]
fn test_repaired_output_leaves_on_following_tick() {
    let mut device = device_with(capacity(), Some(damaged_pickaxe()), Some(efficiency_book()));
    enable(&mut device, AutoSlot::Output, &[Face::East]);
    let mut world = TestWorld::default().with_chest(Face::East, Chest::with_capacity(1));
    let calculator = FixedQuote::new(repaired_pickaxe(), 1, ModifierCost::All);

    tick_until_attempt(&mut device, &mut world, &calculator);
    assert!(device.inventory().is_occupied(Slot::Output));
    assert_eq!(world.chest(Face::East).total_count(), 0);

    device.tick(&mut world, &calculator);
    assert_eq!(world.chest(Face::East).stacks, vec![repaired_pickaxe()]);
}

// --- Neighbors that hand over more than asked ---------------------------

/// Reports the requested amount when simulating but hands over 500 extra
/// on commit. Anything filled back is counted.
struct OverDelivering {
    returned: u32,
}

impl FluidHandler for OverDelivering {
    fn fill(&mut self, _face: Face, stack: &FluidStack, simulate: bool) -> u32 {
        if !simulate {
            self.returned += stack.amount;
        }
        stack.amount
    }

    fn drain(&mut self, _face: Face, max: u32, simulate: bool) -> Option<FluidStack> {
        let amount = if simulate { max } else { max + 500 };
        Some(FluidStack::xp(amount))
    }
}

/// Gives away the whole first matching stack instead of one unit.
struct WholeStack(Chest);

impl SidedInventory for WholeStack {
    fn insert_one(&mut self, face: Face, stack: &ItemStack) -> bool {
        self.0.insert_one(face, stack)
    }

    fn extract_one(
        &mut self,
        _face: Face,
        accept: &dyn Fn(&ItemStack) -> bool,
    ) -> Option<ItemStack> {
        let idx = self.0.stacks.iter().position(|s| accept(s))?;
        Some(self.0.stacks.remove(idx))
    }
}

struct GreedyWorld {
    down: OverDelivering,
    up: LiquidSource,
    west: WholeStack,
}

impl Neighborhood for GreedyWorld {
    fn inventory(&mut self, face: Face) -> Option<&mut dyn SidedInventory> {
        match face {
            Face::West => Some(&mut self.west),
            _ => None,
        }
    }

    fn fluid_handler(&mut self, face: Face) -> Option<&mut dyn FluidHandler> {
        match face {
            Face::Down => Some(&mut self.down),
            Face::Up => Some(&mut self.up),
            _ => None,
        }
    }
}

fn greedy_world() -> GreedyWorld {
    GreedyWorld {
        down: OverDelivering { returned: 0 },
        up: LiquidSource::xp(1000),
        west: WholeStack(Chest::holding(vec![iron_ingots(5)])),
    }
}

#[test]
fn test_drink_caps_over_delivering_source() {
    let mut device = device_with(0, None, None);
    enable(&mut device, AutoSlot::Xp, &[Face::Down, Face::Up]);
    let mut world = greedy_world();

    let events = device.tick(&mut world, &FixedQuote::none());

    assert_eq!(device.tank().amount(), 100);
    assert_eq!(world.down.returned, 500, "excess goes back to the source");
    assert_eq!(world.up.stored.amount, 1000, "budget is spent after the first face");
    assert!(has_event(&events, |e| *e == DeviceEvent::LiquidDrunk { amount: 100 }));
}

#[test]
fn test_drink_near_capacity_with_over_delivering_source() {
    let mut device = device_with(capacity() - 30, None, None);
    enable(&mut device, AutoSlot::Xp, &[Face::Down]);
    let mut world = greedy_world();

    device.tick(&mut world, &FixedQuote::none());

    assert_eq!(device.tank().amount(), capacity());
    assert_eq!(world.down.returned, 500);
}

#[test]
fn test_pull_returns_extra_units_to_neighbor() {
    let mut device = device_with(0, None, None);
    enable(&mut device, AutoSlot::Modifier, &[Face::West]);
    let mut world = greedy_world();

    device.tick(&mut world, &FixedQuote::none());

    assert_eq!(device.inventory().get(Slot::Modifier), Some(&iron_ingots(1)));
    assert_eq!(world.west.0.stacks, vec![iron_ingots(4)]);
}

// --- The device as somebody else's neighbor ---------------------------

#[test]
fn test_device_exposes_output_only_on_output_faces() {
    let mut device = device_with(0, None, None);
    device.inventory_mut().set(Slot::Output, Some(repaired_pickaxe()));
    device.set_allowed_direction(AutoSlot::Output, Face::Down, true);

    assert!(device.extract_one(Face::Up, &|_| true).is_none());
    assert!(device.extract_one(Face::Down, &|_| false).is_none());
    assert_eq!(device.extract_one(Face::Down, &|_| true), Some(repaired_pickaxe()));
    assert!(!device.inventory().is_occupied(Slot::Output));
}

#[test]
fn test_device_accepts_inserts_per_slot_faces() {
    let mut device = device_with(0, None, None);
    device.set_allowed_direction(AutoSlot::Tool, Face::North, true);
    device.set_allowed_direction(AutoSlot::Modifier, Face::South, true);

    assert!(!device.insert_one(Face::North, &iron_ingots(1)));
    assert!(!device.insert_one(Face::East, &damaged_pickaxe()));
    assert!(device.insert_one(Face::North, &damaged_pickaxe()));
    assert!(device.insert_one(Face::South, &iron_ingots(1)));

    assert_eq!(device.inventory().get(Slot::Tool), Some(&damaged_pickaxe()));
    assert_eq!(device.inventory().get(Slot::Modifier), Some(&iron_ingots(1)));
}

#[test]
fn test_device_tank_fills_only_through_xp_faces() {
    let mut device = device_with(0, None, None);
    device.set_allowed_direction(AutoSlot::Xp, Face::West, true);

    assert_eq!(device.fill(Face::East, &FluidStack::xp(50), false), 0);
    assert_eq!(device.fill(Face::West, &FluidStack::xp(50), true), 50);
    assert_eq!(device.tank().amount(), 0);
    assert_eq!(device.fill(Face::West, &FluidStack::xp(50), false), 50);
    assert_eq!(device.tank().amount(), 50);
    assert!(FluidHandler::drain(&mut device, Face::West, 50, false).is_none());
}
