//! Source registry module
//!
//! Maps the five logical layers (rain, soil moisture, temperature,
//! dryness, minerals) to the dataset, bands, and date window that feed
//! them. Specs are read-only after construction; the registry is built
//! from configuration, never hardcoded at the call site.

use crate::catalog::DateRange;
use std::collections::HashMap;
use std::fmt;

/// Statistic used to reduce a time series to a single raster.
///
/// Mean is the only statistic the pipeline uses today; the enum exists
/// so the reduction is named in configuration rather than implied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AggregationStat {
    #[default]
    Mean,
}

/// The five logical layers, in rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Rain,
    SoilMoisture,
    Temperature,
    Dryness,
    Minerals,
}

impl LayerKind {
    /// All layers in their fixed presentation order.
    pub fn all() -> [LayerKind; 5] {
        [
            LayerKind::Rain,
            LayerKind::SoilMoisture,
            LayerKind::Temperature,
            LayerKind::Dryness,
            LayerKind::Minerals,
        ]
    }

    /// Display label used on the rendering surface.
    pub fn label(&self) -> &'static str {
        match self {
            LayerKind::Rain => "Rain",
            LayerKind::SoilMoisture => "Soil Moisture",
            LayerKind::Temperature => "Temperature",
            LayerKind::Dryness => "Soil Dryness",
            LayerKind::Minerals => "Soil Minerals",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What to fetch for one logical layer: dataset, bands, window, statistic.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSpec {
    /// Catalog identifier of the dataset
    pub dataset_id: String,
    /// Bands to aggregate, in the order the transformer consumes them
    pub bands: Vec<String>,
    /// Temporal window, half-open
    pub range: DateRange,
    /// Time-axis reduction
    pub stat: AggregationStat,
}

impl SourceSpec {
    pub fn new(
        dataset_id: impl Into<String>,
        bands: Vec<String>,
        range: DateRange,
    ) -> Self {
        SourceSpec {
            dataset_id: dataset_id.into(),
            bands,
            range,
            stat: AggregationStat::Mean,
        }
    }
}

/// Read-only map from logical layer to its source spec.
#[derive(Debug, Clone)]
pub struct SourceRegistry {
    sources: HashMap<LayerKind, SourceSpec>,
}

impl SourceRegistry {
    /// Builds a registry from (layer, spec) pairs.
    pub fn new(entries: impl IntoIterator<Item = (LayerKind, SourceSpec)>) -> Self {
        SourceRegistry {
            sources: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, kind: LayerKind) -> Option<&SourceSpec> {
        self.sources.get(&kind)
    }

    /// Iterates registered layers in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = (LayerKind, &SourceSpec)> {
        LayerKind::all()
            .into_iter()
            .filter_map(|kind| self.sources.get(&kind).map(|spec| (kind, spec)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_iter_follows_presentation_order() {
        let registry = SourceRegistry::new([
            (
                LayerKind::Minerals,
                SourceSpec::new("s2", vec!["B11".into(), "B12".into(), "B8".into()], range()),
            ),
            (
                LayerKind::Rain,
                SourceSpec::new("gpm", vec!["precipitationCal".into()], range()),
            ),
        ]);
        let kinds: Vec<_> = registry.iter().map(|(k, _)| k).collect();
        assert_eq!(kinds, vec![LayerKind::Rain, LayerKind::Minerals]);
    }

    #[test]
    fn test_get_missing_layer() {
        let registry = SourceRegistry::new([]);
        assert!(registry.get(LayerKind::Rain).is_none());
    }
}
