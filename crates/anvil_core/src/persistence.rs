//! Save/load record for a device.

use crate::{AutoFlags, ItemStack, SideConfig};
use serde::{Deserialize, Serialize};

/// Everything that survives an unload. Encoding is up to the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceRecord {
    pub tool: Option<ItemStack>,
    pub modifier: Option<ItemStack>,
    pub output: Option<ItemStack>,
    pub tank_amount: u32,
    pub cooldown: i32,
    pub sides: SideConfig,
    pub auto_flags: AutoFlags,
}
