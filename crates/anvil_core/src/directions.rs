//! Per-function routing configuration: which faces each function uses and
//! whether it runs automatically.

use crate::{AutoSlot, Face};
use serde::{Deserialize, Serialize};

/// A set of enabled faces. Mutations mark the set dirty for sync.
///
/// Equality compares the faces only; the dirty flag is sync bookkeeping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Face>", into = "Vec<Face>")]
pub struct DirectionSet {
    bits: u8,
    dirty: bool,
}

impl DirectionSet {
    pub fn set(&mut self, face: Face, enabled: bool) {
        let bits = if enabled {
            self.bits | face.bit()
        } else {
            self.bits & !face.bit()
        };
        if bits != self.bits {
            self.bits = bits;
            self.dirty = true;
        }
    }

    /// Replace the whole set, as a remote write does.
    pub fn replace(&mut self, faces: &[Face]) {
        let bits = faces.iter().fold(0, |acc, face| acc | face.bit());
        if bits != self.bits {
            self.bits = bits;
            self.dirty = true;
        }
    }

    pub fn contains(&self, face: Face) -> bool {
        self.bits & face.bit() != 0
    }

    /// Enabled faces in `Face::ALL` order.
    pub fn faces(&self) -> impl Iterator<Item = Face> + '_ {
        Face::ALL.into_iter().filter(|face| self.contains(*face))
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}

impl PartialEq for DirectionSet {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl Eq for DirectionSet {}

impl From<Vec<Face>> for DirectionSet {
    fn from(faces: Vec<Face>) -> Self {
        let mut set = DirectionSet::default();
        set.replace(&faces);
        set.clear_dirty();
        set
    }
}

impl From<DirectionSet> for Vec<Face> {
    fn from(set: DirectionSet) -> Self {
        set.faces().collect()
    }
}

/// One boolean per `AutoSlot`, packed like the device's other flag maps.
/// Compared by flags only, like `DirectionSet`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<AutoSlot>", into = "Vec<AutoSlot>")]
pub struct AutoFlags {
    bits: u8,
    dirty: bool,
}

impl AutoFlags {
    pub fn set(&mut self, slot: AutoSlot, enabled: bool) {
        let mask = 1 << slot.ordinal();
        let bits = if enabled {
            self.bits | mask
        } else {
            self.bits & !mask
        };
        if bits != self.bits {
            self.bits = bits;
            self.dirty = true;
        }
    }

    pub fn get(&self, slot: AutoSlot) -> bool {
        self.bits & (1 << slot.ordinal()) != 0
    }

    pub fn enabled(&self) -> Vec<AutoSlot> {
        AutoSlot::ALL
            .into_iter()
            .filter(|slot| self.get(*slot))
            .collect()
    }

    pub fn replace(&mut self, enabled: &[AutoSlot]) {
        for slot in AutoSlot::ALL {
            self.set(slot, enabled.contains(&slot));
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}

impl PartialEq for AutoFlags {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl Eq for AutoFlags {}

impl From<Vec<AutoSlot>> for AutoFlags {
    fn from(enabled: Vec<AutoSlot>) -> Self {
        let mut flags = AutoFlags::default();
        flags.replace(&enabled);
        flags.clear_dirty();
        flags
    }
}

impl From<AutoFlags> for Vec<AutoSlot> {
    fn from(flags: AutoFlags) -> Self {
        flags.enabled()
    }
}

/// The four direction sets, one per `AutoSlot`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideConfig {
    pub tool: DirectionSet,
    pub modifier: DirectionSet,
    pub output: DirectionSet,
    pub xp: DirectionSet,
}

impl SideConfig {
    pub fn select(&self, slot: AutoSlot) -> &DirectionSet {
        match slot {
            AutoSlot::Tool => &self.tool,
            AutoSlot::Modifier => &self.modifier,
            AutoSlot::Output => &self.output,
            AutoSlot::Xp => &self.xp,
        }
    }

    pub fn select_mut(&mut self, slot: AutoSlot) -> &mut DirectionSet {
        match slot {
            AutoSlot::Tool => &mut self.tool,
            AutoSlot::Modifier => &mut self.modifier,
            AutoSlot::Output => &mut self.output,
            AutoSlot::Xp => &mut self.xp,
        }
    }
}
