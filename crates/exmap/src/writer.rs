//! Serializing expression map documents to the host's XML format and
//! persisting them as `<instrument>_<variant>.<extension>`.

use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use tracing::info;

use crate::document::{ExpressionMapDocument, NoteRemap, Slot, SlotVisual, Variant};
use crate::{Error, Result};

pub const DEFAULT_OUTPUT_EXTENSION: &str = "expressionmap";

const INDENT: usize = 3;

fn xml_error(e: impl Display) -> Error {
    Error::Xml(e.to_string())
}

/// Thin layer over quick-xml for the host's `<int name= value=/>` style.
struct MapWriter {
    writer: Writer<Vec<u8>>,
}

impl MapWriter {
    fn new() -> Self {
        MapWriter {
            writer: Writer::new_with_indent(Vec::new(), b' ', INDENT),
        }
    }

    fn event(&mut self, event: Event<'_>) -> Result<()> {
        self.writer.write_event(event).map_err(xml_error)?;
        Ok(())
    }

    fn start(&mut self, tag: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let start = BytesStart::new(tag).with_attributes(attrs.iter().copied());
        self.event(Event::Start(start))
    }

    fn end(&mut self, tag: &str) -> Result<()> {
        self.event(Event::End(BytesEnd::new(tag)))
    }

    fn empty(&mut self, tag: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let empty = BytesStart::new(tag).with_attributes(attrs.iter().copied());
        self.event(Event::Empty(empty))
    }

    fn int(&mut self, name: &str, value: impl Display) -> Result<()> {
        self.empty("int", &[("name", name), ("value", &value.to_string())])
    }

    fn float(&mut self, name: &str, value: f32) -> Result<()> {
        self.empty("float", &[("name", name), ("value", &value.to_string())])
    }

    fn string(&mut self, name: &str, value: &str) -> Result<()> {
        self.empty("string", &[("name", name), ("value", value), ("wide", "true")])
    }

    fn obj_start(&mut self, class: &str, name: Option<&str>, id: u64) -> Result<()> {
        let id = id.to_string();
        match name {
            Some(name) => self.start("obj", &[("class", class), ("name", name), ("ID", &id)]),
            None => self.start("obj", &[("class", class), ("ID", &id)]),
        }
    }

    /// `<member name=..><int name="ownership"/><list name="obj" type="obj">`
    fn owned_list_start(&mut self, member: &str, ownership: u8) -> Result<()> {
        self.start("member", &[("name", member)])?;
        self.int("ownership", ownership)?;
        self.start("list", &[("name", "obj"), ("type", "obj")])
    }

    fn owned_list_end(&mut self) -> Result<()> {
        self.end("list")?;
        self.end("member")
    }

    fn finish(self) -> Result<String> {
        String::from_utf8(self.writer.into_inner()).map_err(xml_error)
    }
}

/// Render a document as XML text.
pub fn to_xml(doc: &ExpressionMapDocument) -> Result<String> {
    let mut w = MapWriter::new();

    w.event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    w.start("InstrumentMap", &[])?;
    w.string("name", &doc.name)?;

    w.owned_list_start("slotvisuals", 1)?;
    for visual in &doc.visuals {
        write_visual(&mut w, visual)?;
    }
    w.owned_list_end()?;

    w.owned_list_start("slots", 1)?;
    for slot in &doc.slots {
        write_slot(&mut w, slot)?;
    }
    w.owned_list_end()?;

    w.start("member", &[("name", "controller")])?;
    w.int("ownership", 1)?;
    w.end("member")?;

    w.end("InstrumentMap")?;
    w.finish()
}

fn write_slot(w: &mut MapWriter, slot: &Slot) -> Result<()> {
    w.obj_start("PSoundSlot", None, slot.id)?;

    let trigger = &slot.trigger;
    w.obj_start("PSlotThruTrigger", Some("remote"), trigger.id)?;
    w.int("status", trigger.status)?;
    w.int("data1", trigger.data1)?;
    w.int("data2", trigger.data2)?;
    w.int("channel", trigger.channel)?;
    w.int("port", trigger.port)?;
    w.end("obj")?;

    let action = &slot.action;
    w.obj_start("PSlotMidiAction", Some("action"), action.id)?;
    w.int("version", action.version)?;

    w.owned_list_start("noteChanger", 1)?;
    w.obj_start("PSlotNoteChanger", None, action.note_changer.id)?;
    write_remap(w, &action.note_changer.remap)?;
    w.end("obj")?;
    w.owned_list_end()?;

    w.start("member", &[("name", "midiMessages")])?;
    w.int("ownership", 1)?;
    w.end("member")?;

    write_remap(w, &action.remap)?;
    w.int("key", action.key)?;
    w.end("obj")?;

    // The slot refers to the same visual as the top-level listing.
    w.owned_list_start("sv", 2)?;
    write_visual(w, &slot.visual)?;
    w.owned_list_end()?;

    w.start("member", &[("name", "name")])?;
    w.string("s", &slot.name)?;
    w.end("member")?;

    w.int("color", slot.color)?;
    w.end("obj")
}

fn write_remap(w: &mut MapWriter, remap: &NoteRemap) -> Result<()> {
    w.int("channel", remap.channel)?;
    w.float("velocityFact", remap.velocity_factor)?;
    w.float("lengthFact", remap.length_factor)?;
    w.int("minVelocity", remap.min_velocity)?;
    w.int("maxVelocity", remap.max_velocity)?;
    w.int("transpose", remap.transpose)?;
    w.int("minPitch", remap.min_pitch)?;
    w.int("maxPitch", remap.max_pitch)
}

fn write_visual(w: &mut MapWriter, visual: &SlotVisual) -> Result<()> {
    w.obj_start("USlotVisuals", None, visual.id)?;
    w.int("displaytype", visual.display_type)?;
    w.int("articulationtype", visual.articulation_type)?;
    w.int("symbol", visual.symbol)?;
    w.string("text", &visual.text)?;
    w.string("description", &visual.description)?;
    w.int("group", visual.group)?;
    w.end("obj")
}

/// `<instrument>_<variant>.<extension>`
pub fn file_name(instrument: &str, variant: Variant, extension: &str) -> String {
    format!(
        "{}_{}.{}",
        instrument,
        variant.as_str(),
        extension.trim_start_matches('.')
    )
}

/// Persists documents into one output directory.
#[derive(Debug, Clone)]
pub struct DocumentWriter {
    output_dir: PathBuf,
    extension: String,
}

impl DocumentWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        DocumentWriter {
            output_dir: output_dir.into(),
            extension: DEFAULT_OUTPUT_EXTENSION.to_string(),
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn path_for(&self, doc: &ExpressionMapDocument) -> PathBuf {
        self.output_dir
            .join(file_name(&doc.instrument, doc.variant, &self.extension))
    }

    /// Serialize and write a document, creating the output directory if needed.
    pub fn write(&self, doc: &ExpressionMapDocument) -> Result<PathBuf> {
        let xml = to_xml(doc)?;

        fs::create_dir_all(&self.output_dir).map_err(|source| Error::Io {
            path: self.output_dir.clone(),
            source,
        })?;

        let path = self.path_for(doc);
        fs::write(&path, xml).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;

        info!("Saved: {}", path.display());
        Ok(path)
    }
}
