//! Type definitions for `anvil_core`.
//!
//! Faces, slot selectors, stacks, fluids, events and tunable constants.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// ---------------------------------------------------------------------------
// ID newtypes
// ---------------------------------------------------------------------------

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(ItemId);
string_id!(FluidId);
string_id!(EnchantmentId);

/// The only fluid the tank will hold.
pub const XP_FLUID: &str = "xpjuice";

// ---------------------------------------------------------------------------
// Faces and selectors
// ---------------------------------------------------------------------------

/// One of the six axis-aligned sides of the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Face {
    Down,
    Up,
    North,
    South,
    West,
    East,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Down,
        Face::Up,
        Face::North,
        Face::South,
        Face::West,
        Face::East,
    ];

    pub fn opposite(self) -> Face {
        match self {
            Face::Down => Face::Up,
            Face::Up => Face::Down,
            Face::North => Face::South,
            Face::South => Face::North,
            Face::West => Face::East,
            Face::East => Face::West,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub(crate) fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// The three physical slots of the device, in inventory index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    Tool,
    Modifier,
    Output,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::Tool, Slot::Modifier, Slot::Output];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Slot> {
        Slot::ALL.get(index).copied()
    }
}

/// Functions that can be automated, each with its own faces and flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AutoSlot {
    Tool,
    Modifier,
    Output,
    Xp,
}

impl AutoSlot {
    pub const ALL: [AutoSlot; 4] = [
        AutoSlot::Tool,
        AutoSlot::Modifier,
        AutoSlot::Output,
        AutoSlot::Xp,
    ];

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Decode a selector that arrived as a raw ordinal.
    pub fn from_ordinal(ordinal: u8) -> Result<AutoSlot, UnknownAutoSlot> {
        AutoSlot::ALL
            .get(usize::from(ordinal))
            .copied()
            .ok_or(UnknownAutoSlot(ordinal))
    }
}

/// A selector ordinal outside the closed `AutoSlot` set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownAutoSlot(pub u8);

impl std::fmt::Display for UnknownAutoSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown auto slot ordinal {}", self.0)
    }
}

impl std::error::Error for UnknownAutoSlot {}

// ---------------------------------------------------------------------------
// Items and fluids
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Tool,
    EnchantedBook,
    Material,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Enchantment {
    pub id: EnchantmentId,
    pub level: u32,
}

pub type Enchantments = SmallVec<[Enchantment; 2]>;

/// A stack of identical items. Everything except `count` is identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub item: ItemId,
    pub kind: ItemKind,
    pub count: u32,
    pub max_count: u32,
    /// Damage taken; 0 is pristine. Only meaningful for tools.
    #[serde(default)]
    pub damage: u32,
    #[serde(default)]
    pub enchantments: Enchantments,
}

impl ItemStack {
    pub fn is_tool_like(&self) -> bool {
        self.kind == ItemKind::Tool
    }

    /// True if `other` can merge into this stack (same item and aux data).
    pub fn stacks_with(&self, other: &ItemStack) -> bool {
        self.item == other.item
            && self.kind == other.kind
            && self.damage == other.damage
            && self.enchantments == other.enchantments
    }

    /// A copy of this stack holding `count` items.
    pub fn with_count(&self, count: u32) -> ItemStack {
        ItemStack {
            count,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FluidStack {
    pub fluid: FluidId,
    pub amount: u32,
}

impl FluidStack {
    pub fn xp(amount: u32) -> FluidStack {
        FluidStack {
            fluid: FluidId(XP_FLUID.to_string()),
            amount,
        }
    }
}

// ---------------------------------------------------------------------------
// Events and sync
// ---------------------------------------------------------------------------

/// State mirrored to remote observers. Each variant carries the full value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SyncChange {
    Directions { slot: AutoSlot, faces: Vec<Face> },
    AutoFlags { enabled: Vec<AutoSlot> },
    TankAmount(u32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DeviceEvent {
    AnvilUsed { volume: f32, pitch: f32 },
    LiquidDrunk { amount: u32 },
    ItemPushed { face: Face },
    ItemPulled { slot: Slot, face: Face },
    Synced { changes: Vec<SyncChange> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub tick: u64,
    pub event: DeviceEvent,
}

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConstants {
    /// Ticks between repair attempts.
    pub total_cooldown_ticks: i32,
    /// Upper bound on liquid pulled from all faces in one tick.
    pub drink_per_tick: u32,
    /// Tank capacity, expressed as the liquid worth of this many levels.
    pub tank_capacity_level: u32,
    pub liquid_per_xp: u32,
    pub use_sound_volume: f32,
    pub use_sound_pitch: f32,
}

impl Default for DeviceConstants {
    fn default() -> Self {
        DeviceConstants {
            total_cooldown_ticks: 40,
            drink_per_tick: 100,
            tank_capacity_level: 45,
            liquid_per_xp: 20,
            use_sound_volume: 0.3,
            use_sound_pitch: 1.0,
        }
    }
}

impl DeviceConstants {
    pub fn tank_capacity(&self) -> u32 {
        crate::xp::liquid_for_level(self.tank_capacity_level, self)
    }
}
