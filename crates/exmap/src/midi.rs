//! MIDI addressing for keyswitch triggers.
//!
//! Trigger numbers map onto channels in blocks of 16; anything past the
//! sixteenth trigger spills onto the next port.

use serde::{Deserialize, Serialize};

/// Status byte for Note On on channel 1.
pub const NOTE_ON_STATUS: u8 = 0x90;

/// Highest 7-bit data value.
pub const MAX_DATA_VALUE: u8 = 127;

pub const CHANNELS_PER_PORT: u32 = 16;

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Channel and port for a trigger index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelPort {
    /// 0-15
    pub channel: u8,
    pub port: u32,
}

impl ChannelPort {
    pub fn for_index(index: u32) -> Self {
        ChannelPort {
            channel: (index % CHANNELS_PER_PORT) as u8,
            port: index / CHANNELS_PER_PORT,
        }
    }
}

/// Note name with the host's octave numbering, where note 0 is `C-2`.
pub fn note_name(note: u32) -> String {
    let octave = (note / 12) as i64 - 2;
    format!("{}{}", NOTE_NAMES[(note % 12) as usize], octave)
}
