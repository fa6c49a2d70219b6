//! Scenario files: a device setup plus the blocks around it.

use crate::{Content, Neighbor, Reservoir, ScenarioWorld, Storage};
use anvil_core::{
    AutoSlot, Device, Enchantment, Face, FluidId, FluidStack, ItemId, ItemStack, SideConfig, Slot,
};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// An item written by name; kind and stack size come from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSpec {
    pub item: ItemId,
    #[serde(default = "one")]
    pub count: u32,
    #[serde(default)]
    pub damage: u32,
    #[serde(default)]
    pub enchantments: Vec<Enchantment>,
}

fn one() -> u32 {
    1
}

impl ItemSpec {
    pub fn resolve(&self, content: &Content) -> Result<ItemStack> {
        let Some(def) = content.item(&self.item) else {
            bail!("unknown item '{}'", self.item);
        };
        if self.count == 0 || self.count > def.max_count {
            bail!(
                "item '{}' count {} outside 1..={}",
                self.item,
                self.count,
                def.max_count
            );
        }
        if def.max_damage > 0 && self.damage > def.max_damage {
            bail!(
                "item '{}' damage {} exceeds max_damage {}",
                self.item,
                self.damage,
                def.max_damage
            );
        }
        for enchantment in &self.enchantments {
            if content.enchantment(&enchantment.id).is_none() {
                bail!(
                    "item '{}' carries unknown enchantment '{}'",
                    self.item,
                    enchantment.id
                );
            }
        }
        Ok(ItemStack {
            item: def.id.clone(),
            kind: def.kind,
            count: self.count,
            max_count: def.max_count,
            damage: self.damage,
            enchantments: self.enchantments.iter().cloned().collect(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceSetup {
    pub tool: Option<ItemSpec>,
    pub modifier: Option<ItemSpec>,
    pub tank_amount: u32,
    pub sides: SideConfig,
    pub auto: Vec<AutoSlot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NeighborSpec {
    Storage {
        capacity: usize,
        #[serde(default)]
        items: Vec<ItemSpec>,
    },
    Reservoir {
        fluid: FluidId,
        amount: u32,
        capacity: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub device: DeviceSetup,
    #[serde(default)]
    pub neighbors: Vec<(Face, NeighborSpec)>,
}

impl Scenario {
    /// Build the device described by this scenario.
    pub fn build_device(&self, content: &Content) -> Result<Device> {
        let mut device = Device::new(content.constants.clone());
        let setup = &self.device;

        for (slot, spec) in [(Slot::Tool, &setup.tool), (Slot::Modifier, &setup.modifier)] {
            let Some(spec) = spec else {
                continue;
            };
            let stack = spec
                .resolve(content)
                .with_context(|| format!("scenario '{}' {slot:?} slot", self.name))?;
            if !device.inventory().can_accept(slot, &stack) {
                bail!(
                    "scenario '{}': {slot:?} slot does not accept '{}'",
                    self.name,
                    stack.item
                );
            }
            device.inventory_mut().set(slot, Some(stack));
        }

        device.tank_mut().set_amount(setup.tank_amount);
        for slot in AutoSlot::ALL {
            for face in setup.sides.select(slot).faces() {
                device.set_allowed_direction(slot, face, true);
            }
            device.set_auto_flag(slot, setup.auto.contains(&slot));
        }
        device.take_changes();
        Ok(device)
    }

    /// Build the blocks around the device.
    pub fn build_world(&self, content: &Content) -> Result<ScenarioWorld> {
        let mut world = ScenarioWorld::default();
        for (face, spec) in &self.neighbors {
            if world.faces[face.index()].is_some() {
                bail!("scenario '{}' places two neighbors on {face:?}", self.name);
            }
            let neighbor = match spec {
                NeighborSpec::Storage { capacity, items } => {
                    if items.len() > *capacity {
                        bail!(
                            "scenario '{}': storage on {face:?} holds {} stacks but has capacity {capacity}",
                            self.name,
                            items.len()
                        );
                    }
                    let stacks = items
                        .iter()
                        .map(|spec| spec.resolve(content))
                        .collect::<Result<Vec<_>>>()
                        .with_context(|| format!("scenario '{}' storage on {face:?}", self.name))?;
                    Neighbor::Storage(Storage {
                        stacks,
                        capacity: *capacity,
                    })
                }
                NeighborSpec::Reservoir {
                    fluid,
                    amount,
                    capacity,
                } => Neighbor::Reservoir(Reservoir {
                    contents: FluidStack {
                        fluid: fluid.clone(),
                        amount: (*amount).min(*capacity),
                    },
                    capacity: *capacity,
                }),
            };
            world.place(*face, neighbor);
        }
        Ok(world)
    }
}

pub fn load_scenario(path: impl AsRef<Path>) -> Result<Scenario> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading scenario file: {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("parsing scenario file: {}", path.display()))
}
