//! Expression map document model.
//!
//! A typed tree mirroring the host's `InstrumentMap` layout:
//!
//! ```text
//! InstrumentMap
//! ├── name
//! ├── slotvisuals: [USlotVisuals]
//! ├── slots: [PSoundSlot]
//! │   ├── remote: PSlotThruTrigger
//! │   ├── action: PSlotMidiAction
//! │   │   └── noteChanger: [PSlotNoteChanger]
//! │   ├── sv: [USlotVisuals]
//! │   ├── name
//! │   └── color
//! └── controller
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

pub const SLOT_ID_BASE: u64 = 1_500_000_000;
pub const TRIGGER_ID_BASE: u64 = 1_300_000_000;
pub const ACTION_ID_BASE: u64 = 1_400_000_000;
pub const NOTE_CHANGER_ID_BASE: u64 = 1_401_136_000;
pub const VISUAL_ID_BASE: u64 = 1_309_870_000;

/// How the host treats the articulations of a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Articulations act as performance directions (stay active).
    Directional,
    /// Articulations attach to single notes.
    Attribute,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Directional, Variant::Attribute];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Directional => "directional",
            Variant::Attribute => "attribute",
        }
    }

    pub fn capitalized(&self) -> &'static str {
        match self {
            Variant::Directional => "Directional",
            Variant::Attribute => "Attribute",
        }
    }

    /// Host `articulationtype` flag.
    pub fn type_flag(&self) -> u8 {
        match self {
            Variant::Directional => 1,
            Variant::Attribute => 0,
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "directional" | "direction" => Ok(Variant::Directional),
            "attribute" => Ok(Variant::Attribute),
            _ => Err(Error::UnknownVariant(s.to_string())),
        }
    }
}

/// One complete expression map for an (instrument, variant) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionMapDocument {
    pub name: String,
    pub instrument: String,
    pub variant: Variant,
    /// Top-level listing of every slot's visual, in slot order.
    pub visuals: Vec<SlotVisual>,
    pub slots: Vec<Slot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub id: u64,
    pub name: String,
    pub trigger: Trigger,
    pub action: MidiAction,
    pub visual: SlotVisual,
    pub technique: String,
    pub color: u8,
}

/// Incoming message that selects the slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    pub id: u64,
    pub status: u8,
    pub data1: u32,
    pub data2: u8,
    pub channel: u8,
    pub port: u32,
}

/// What the host does to notes played while the slot is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MidiAction {
    pub id: u64,
    pub version: u32,
    pub remap: NoteRemap,
    pub note_changer: NoteChanger,
    /// -1 means no key override.
    pub key: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteChanger {
    pub id: u64,
    pub remap: NoteRemap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteRemap {
    pub channel: u8,
    pub velocity_factor: f32,
    pub length_factor: f32,
    pub min_velocity: u8,
    pub max_velocity: u8,
    pub transpose: i8,
    pub min_pitch: u8,
    pub max_pitch: u8,
}

impl NoteRemap {
    /// Pass-through remap on the given channel.
    pub fn identity(channel: u8) -> Self {
        NoteRemap {
            channel,
            velocity_factor: 1.0,
            length_factor: 1.0,
            min_velocity: 0,
            max_velocity: 127,
            transpose: 0,
            min_pitch: 0,
            max_pitch: 127,
        }
    }
}

/// Display metadata for a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotVisual {
    pub id: u64,
    pub display_type: u8,
    pub articulation_type: u8,
    pub symbol: u32,
    pub text: String,
    pub description: String,
    pub group: u8,
}
