//! Expression map builder.
//!
//! Turns one [`InstrumentGroup`] into an [`ExpressionMapDocument`] for a
//! given [`Variant`]. Every node ID is its kind's base plus the slot index,
//! so rebuilding the same group always yields the same document.

use crate::document::{
    ExpressionMapDocument, MidiAction, NoteChanger, NoteRemap, Slot, SlotVisual, Trigger,
    Variant, ACTION_ID_BASE, NOTE_CHANGER_ID_BASE, SLOT_ID_BASE, TRIGGER_ID_BASE,
    VISUAL_ID_BASE,
};
use crate::group::{InstrumentGroup, InstrumentGroups, TriggeredArticulation};
use crate::midi::{MAX_DATA_VALUE, NOTE_ON_STATUS};
use crate::Result;

const ACTION_VERSION: u32 = 600;
const DISPLAY_TYPE: u8 = 1;
const DEFAULT_SYMBOL: u32 = 73;
const NO_KEY: i32 = -1;

/// `"<instrument> Expression Map (<Variant>)"`
pub fn document_name(instrument: &str, variant: Variant) -> String {
    format!("{} Expression Map ({})", instrument, variant.capitalized())
}

/// Build the document for a group.
pub fn build(group: &InstrumentGroup, variant: Variant) -> ExpressionMapDocument {
    let slots: Vec<Slot> = group
        .articulations
        .iter()
        .map(|articulation| build_slot(articulation, variant))
        .collect();

    let visuals = slots.iter().map(|slot| slot.visual.clone()).collect();

    ExpressionMapDocument {
        name: document_name(&group.instrument, variant),
        instrument: group.instrument.clone(),
        variant,
        visuals,
        slots,
    }
}

/// Build the document for one instrument out of a run's groups.
pub fn build_for(
    groups: &InstrumentGroups,
    instrument: &str,
    variant: Variant,
) -> Result<ExpressionMapDocument> {
    let group = groups.get(instrument)?;
    Ok(build(group, variant))
}

fn build_slot(articulation: &TriggeredArticulation, variant: Variant) -> Slot {
    let index = articulation.trigger as u64;
    let addr = articulation.channel_port();
    let category = articulation.record.category;
    let name = articulation.name().to_string();

    let trigger = Trigger {
        id: TRIGGER_ID_BASE + index,
        status: NOTE_ON_STATUS,
        data1: articulation.trigger,
        data2: MAX_DATA_VALUE,
        channel: addr.channel,
        port: addr.port,
    };

    let action = MidiAction {
        id: ACTION_ID_BASE + index,
        version: ACTION_VERSION,
        remap: NoteRemap::identity(addr.channel),
        note_changer: NoteChanger {
            id: NOTE_CHANGER_ID_BASE + index,
            remap: NoteRemap::identity(addr.channel),
        },
        key: NO_KEY,
    };

    let visual = SlotVisual {
        id: VISUAL_ID_BASE + index,
        display_type: DISPLAY_TYPE,
        articulation_type: variant.type_flag(),
        symbol: DEFAULT_SYMBOL,
        text: name.clone(),
        description: category.label().to_string(),
        group: 0,
    };

    Slot {
        id: SLOT_ID_BASE + index,
        name,
        trigger,
        action,
        visual,
        technique: category.label().to_string(),
        color: category.color(),
    }
}
