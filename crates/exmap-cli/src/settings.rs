//! Turning loaded configuration into library settings.

use anyhow::{Context, Result};
use exmap::{Category, MatcherConfig, OrderingPolicy, PipelineConfig, Variant};
use exmapconf::{ExmapConfig, OrderingPolicyKind};

use crate::VariantArg;

pub fn pipeline_config(config: &ExmapConfig) -> Result<PipelineConfig> {
    let extra_phrases = config
        .classify
        .phrases
        .iter()
        .map(|(phrase, category)| {
            let category = category
                .parse::<Category>()
                .with_context(|| format!("In [classify.phrases] entry {:?}", phrase))?;
            Ok((phrase.clone(), category))
        })
        .collect::<Result<Vec<_>>>()?;

    let ordering = match config.ordering.policy {
        OrderingPolicyKind::Curated => OrderingPolicy::Curated(config.ordering.preferred.clone()),
        OrderingPolicyKind::Lexicographic => OrderingPolicy::Lexicographic,
    };

    Ok(PipelineConfig {
        matcher: MatcherConfig {
            marker: config.library.marker.clone(),
            marker_case_insensitive: config.library.marker_case_insensitive,
            extension: config.library.extension.clone(),
        },
        extra_instruments: config.library.instruments.clone(),
        extra_phrases,
        ordering,
    })
}

/// Variants to write. The flag wins over `[output] variants`.
pub fn variants(config: &ExmapConfig, arg: Option<VariantArg>) -> Result<Vec<Variant>> {
    match arg {
        Some(VariantArg::Directional) => Ok(vec![Variant::Directional]),
        Some(VariantArg::Attribute) => Ok(vec![Variant::Attribute]),
        Some(VariantArg::Both) => Ok(Variant::ALL.to_vec()),
        None => {
            let mut variants = Vec::new();
            for name in &config.output.variants {
                let variant = name
                    .parse::<Variant>()
                    .with_context(|| "In [output] variants")?;
                if !variants.contains(&variant) {
                    variants.push(variant);
                }
            }
            Ok(variants)
        }
    }
}
