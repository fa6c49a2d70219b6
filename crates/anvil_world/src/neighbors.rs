//! Simple neighbor blocks for driving a device outside a full world.

use anvil_core::{
    extract_unit, insert_unit, Face, FluidHandler, FluidStack, ItemStack, Neighborhood,
    SidedInventory,
};

/// A storage block that accepts any item on any face.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Storage {
    pub stacks: Vec<ItemStack>,
    pub capacity: usize,
}

impl Storage {
    pub fn item_count(&self) -> u32 {
        self.stacks.iter().map(|s| s.count).sum()
    }
}

impl SidedInventory for Storage {
    fn insert_one(&mut self, _face: Face, stack: &ItemStack) -> bool {
        insert_unit(&mut self.stacks, self.capacity, stack)
    }

    fn extract_one(
        &mut self,
        _face: Face,
        accept: &dyn Fn(&ItemStack) -> bool,
    ) -> Option<ItemStack> {
        extract_unit(&mut self.stacks, accept)
    }
}

/// A liquid store that can be drained and refilled.
#[derive(Debug, Clone, PartialEq)]
pub struct Reservoir {
    pub contents: FluidStack,
    pub capacity: u32,
}

impl FluidHandler for Reservoir {
    fn fill(&mut self, _face: Face, stack: &FluidStack, simulate: bool) -> u32 {
        if stack.fluid != self.contents.fluid {
            return 0;
        }
        let accepted = stack
            .amount
            .min(self.capacity.saturating_sub(self.contents.amount));
        if !simulate {
            self.contents.amount += accepted;
        }
        accepted
    }

    fn drain(&mut self, _face: Face, max: u32, simulate: bool) -> Option<FluidStack> {
        let amount = max.min(self.contents.amount);
        if amount == 0 {
            return None;
        }
        if !simulate {
            self.contents.amount -= amount;
        }
        Some(FluidStack {
            fluid: self.contents.fluid.clone(),
            amount,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Neighbor {
    Storage(Storage),
    Reservoir(Reservoir),
}

/// What sits against each of the device's faces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenarioWorld {
    pub faces: [Option<Neighbor>; 6],
}

impl ScenarioWorld {
    pub fn place(&mut self, face: Face, neighbor: Neighbor) {
        self.faces[face.index()] = Some(neighbor);
    }

    pub fn storage(&self, face: Face) -> Option<&Storage> {
        match &self.faces[face.index()] {
            Some(Neighbor::Storage(storage)) => Some(storage),
            _ => None,
        }
    }

    pub fn reservoir(&self, face: Face) -> Option<&Reservoir> {
        match &self.faces[face.index()] {
            Some(Neighbor::Reservoir(reservoir)) => Some(reservoir),
            _ => None,
        }
    }
}

impl Neighborhood for ScenarioWorld {
    fn inventory(&mut self, face: Face) -> Option<&mut dyn SidedInventory> {
        match &mut self.faces[face.index()] {
            Some(Neighbor::Storage(storage)) => Some(storage),
            _ => None,
        }
    }

    fn fluid_handler(&mut self, face: Face) -> Option<&mut dyn FluidHandler> {
        match &mut self.faces[face.index()] {
            Some(Neighbor::Reservoir(reservoir)) => Some(reservoir),
            _ => None,
        }
    }
}
