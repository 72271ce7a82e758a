//! End-to-end tests: filename listings in, expression maps out.

use exmap::{
    builder, to_xml, Category, DocumentWriter, MatcherConfig, OrderingPolicy, Pipeline,
    PipelineConfig, SkipReason, Variant,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn iconica(instrument: &str, articulation: &str) -> String {
    format!("Iconica_Iconica_SP_{instrument}_{articulation}.vstsound")
}

fn default_pipeline() -> Pipeline {
    Pipeline::new(&PipelineConfig::default()).unwrap()
}

#[test]
fn test_violins_scenario() {
    let config = PipelineConfig {
        matcher: MatcherConfig {
            marker: "_Series_SP_".to_string(),
            marker_case_insensitive: false,
            extension: "ext".to_string(),
        },
        ..PipelineConfig::default()
    };
    let pipeline = Pipeline::new(&config).unwrap();

    let result = pipeline
        .scan([
            "Viol1n_Series_SP_Violins1_Staccato.ext",
            "Viol1n_Series_SP_Violins1_Legato.ext",
        ])
        .unwrap();

    assert_eq!(result.value.len(), 1);
    let group = result.value.get("Violins1").unwrap();
    let summary: Vec<(&str, u32, Category)> = group
        .articulations
        .iter()
        .map(|a| (a.name(), a.trigger, a.record.category))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Legato", 0, Category::Long),
            ("Staccato", 1, Category::Short),
        ]
    );

    let doc = pipeline
        .build(&result.value, "Violins1", Variant::Directional)
        .unwrap();
    assert_eq!(doc.slots[0].color, Category::Long.color());
}

#[test]
fn test_missing_marker_lands_in_skipped() {
    let result = default_pipeline()
        .scan([
            iconica("Harp", "Glissando"),
            "Harp_Glissando.vstsound".to_string(),
        ])
        .unwrap();

    assert_eq!(result.value.articulation_count(), 1);
    let skipped: Vec<_> = result.skipped_for(SkipReason::MissingMarker).collect();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].filename, "Harp_Glissando.vstsound");
    assert!(result
        .value
        .iter()
        .all(|g| g.articulations.iter().all(|a| a.source_filename != "Harp_Glissando.vstsound")));
}

#[test]
fn test_horns_not_shadowed_by_horn() {
    let result = default_pipeline()
        .scan([iconica("Horns", "Sustain"), iconica("Horn", "Sustain")])
        .unwrap();

    let instruments: Vec<_> = result.value.instruments().collect();
    assert_eq!(instruments, vec!["Horn", "Horns"]);
    assert_eq!(result.value.get("Horns").unwrap().articulations[0].name(), "Sustain");
}

#[test]
fn test_twenty_articulations_overflow_ports() {
    let files: Vec<String> = (0..20)
        .map(|i| iconica("Timpani", &format!("Hit_{i:02}")))
        .collect();
    let pipeline = default_pipeline();
    let result = pipeline.scan(&files).unwrap();

    let doc = pipeline
        .build(&result.value, "Timpani", Variant::Attribute)
        .unwrap();
    assert_eq!(doc.slots.len(), 20);

    let addressing: Vec<(u32, u8, u32)> = doc
        .slots
        .iter()
        .map(|s| (s.trigger.data1, s.trigger.channel, s.trigger.port))
        .collect();
    let expected: Vec<(u32, u8, u32)> = (0..20u32).map(|i| (i, (i % 16) as u8, i / 16)).collect();
    assert_eq!(addressing, expected);
    assert_eq!(addressing[16], (16, 0, 1));
}

#[test]
fn test_curated_precede_alphabetical_regardless_of_input_order() {
    let mut files = vec![
        iconica("Celli", "Accent"),
        iconica("Celli", "Long"),
        iconica("Celli", "Pizzicato"),
        iconica("Celli", "Legato"),
        iconica("Celli", "Sustain"),
    ];
    let pipeline = default_pipeline();

    let forward = pipeline.scan(&files).unwrap();
    files.reverse();
    let backward = pipeline.scan(&files).unwrap();
    assert_eq!(forward.value, backward.value);

    let names: Vec<_> = forward
        .value
        .get("Celli")
        .unwrap()
        .articulations
        .iter()
        .map(|a| a.name())
        .collect();
    assert_eq!(names, vec!["Legato", "Sustain", "Long", "Accent", "Pizzicato"]);
}

#[test]
fn test_plain_lexicographic_policy() {
    let config = PipelineConfig {
        ordering: OrderingPolicy::Lexicographic,
        ..PipelineConfig::default()
    };
    let pipeline = Pipeline::new(&config).unwrap();
    let result = pipeline
        .scan([
            iconica("Celli", "sustain"),
            iconica("Celli", "Legato"),
            iconica("Celli", "Accent"),
        ])
        .unwrap();
    let names: Vec<_> = result
        .value
        .get("Celli")
        .unwrap()
        .articulations
        .iter()
        .map(|a| a.name())
        .collect();
    assert_eq!(names, vec!["Accent", "Legato", "sustain"]);
}

#[test]
fn test_every_instrument_both_variants_written() {
    let temp_dir = TempDir::new().unwrap();
    let pipeline = default_pipeline();
    let result = pipeline
        .scan([
            iconica("Tam_Tam", "Roll"),
            iconica("Tam_Tam", "Hit"),
            iconica("Violins2", "Tremolo"),
            iconica("Kazoo", "Hum"),
        ])
        .unwrap();
    assert_eq!(result.skipped_for(SkipReason::UnknownInstrument).count(), 1);

    let writer = DocumentWriter::new(temp_dir.path());
    let mut written = Vec::new();
    for group in result.value.iter() {
        for variant in Variant::ALL {
            let doc = builder::build(group, variant);
            let path = writer.write(&doc).unwrap();
            written.push(path.file_name().unwrap().to_string_lossy().into_owned());
        }
    }
    written.sort();

    assert_eq!(
        written,
        vec![
            "Tam_Tam_attribute.expressionmap",
            "Tam_Tam_directional.expressionmap",
            "Violins2_attribute.expressionmap",
            "Violins2_directional.expressionmap",
        ]
    );
}

#[test]
fn test_documents_are_reproducible() {
    let files = [iconica("Flute1", "Legato"), iconica("Flute1", "Flutter_Tongue")];
    let first = default_pipeline().scan(&files).unwrap();
    let second = default_pipeline().scan(&files).unwrap();

    let a = builder::build_for(&first.value, "Flute1", Variant::Directional).unwrap();
    let b = builder::build_for(&second.value, "Flute1", Variant::Directional).unwrap();
    let (a, b) = (to_xml(&a).unwrap(), to_xml(&b).unwrap());
    assert_eq!(a, b);
    assert!(a.contains(r#"<string name="text" value="Flutter Tongue" wide="true"/>"#));
    assert!(a.contains(r#"<string name="description" value="FX" wide="true"/>"#));
}

#[test]
fn test_missing_instrument_does_not_affect_others() {
    let pipeline = default_pipeline();
    let result = pipeline.scan([iconica("Tuba", "Legato")]).unwrap();

    assert!(pipeline.build(&result.value, "Euphonium", Variant::Directional).is_err());
    assert!(pipeline.build(&result.value, "Tuba", Variant::Directional).is_ok());
}
