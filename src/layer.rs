use log::debug;

use crate::data::feature::FeatureCollection;
use crate::errors::Result;
use crate::geo_csv_config::GeoCsvConfig;
use crate::geometry_mapper::MappingStats;

/// Whatever displays the features, e.g. a map layer. It may reject a collection.
pub trait AcceptFeatureCollection {
    fn accept(&mut self, collection: FeatureCollection) -> Result<()>;
}

impl AcceptFeatureCollection for Vec<FeatureCollection> {
    fn accept(&mut self, collection: FeatureCollection) -> Result<()> {
        self.push(collection);
        Ok(())
    }
}

/// Input of `GeoCsv::add_data`: delimited text that still needs parsing, or features built elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerData<'txt> {
    Text(&'txt str),
    Features(FeatureCollection),
}

impl<'txt> From<&'txt str> for LayerData<'txt> {
    fn from(text: &'txt str) -> Self {
        LayerData::Text(text)
    }
}

impl<'txt> From<FeatureCollection> for LayerData<'txt> {
    fn from(fc: FeatureCollection) -> Self {
        LayerData::Features(fc)
    }
}

/// Parses delimited text with point records into a `FeatureCollection`.
#[derive(Debug, Default)]
pub struct GeoCsv {
    config: GeoCsvConfig,
}

impl GeoCsv {
    pub fn new(config: GeoCsvConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeoCsvConfig {
        &self.config
    }

    pub fn to_feature_collection(&self, text: &str) -> Result<FeatureCollection> {
        self.to_feature_collection_with_stats(text).map(|(fc, _)| fc)
    }

    pub fn to_feature_collection_with_stats(
        &self,
        text: &str,
    ) -> Result<(FeatureCollection, MappingStats)> {
        let parser = self.config.table_parser();
        let mapper = self.config.geometry_mapper();
        let transform = self.config.row_transform.as_deref();

        let (fc, stats) = if self.config.header_present {
            let table = match transform {
                Some(t) => parser.parse_transformed(text, t),
                None => parser.parse(text),
            };
            mapper.map_table_with_stats(&table)?
        } else {
            let rows = match transform {
                Some(t) => parser.parse_rows_with(text, t),
                None => parser.parse_rows(text),
            };
            mapper.map_rows_with_stats(&rows)?
        };

        debug!(
            "rows: {}; features: {}; omitted: {}",
            stats.rows_seen,
            stats.features_mapped,
            stats.num_omitted()
        );
        Ok((fc, stats))
    }

    /// Text gets parsed and mapped, ready-made features are handed over as they are.
    pub fn add_data<'txt, D, S>(&self, data: D, sink: &mut S) -> Result<()>
    where
        D: Into<LayerData<'txt>>,
        S: AcceptFeatureCollection + ?Sized,
    {
        let fc = match data.into() {
            LayerData::Text(text) => self.to_feature_collection(text)?,
            LayerData::Features(fc) => fc,
        };
        sink.accept(fc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::feature::{Feature, Properties};
    use crate::errors::GeoCsvError;
    use crate::transform_row::SkipRowsStartingWith;

    struct RejectingSink;
    impl AcceptFeatureCollection for RejectingSink {
        fn accept(&mut self, _collection: FeatureCollection) -> Result<()> {
            Err(GeoCsvError::Sink {
                msg: "layer is read-only".into(),
            })
        }
    }

    #[test]
    fn add_text() {
        let mut sink: Vec<FeatureCollection> = Vec::new();
        GeoCsv::default()
            .add_data("latitude,longitude\n1,2\n3,4", &mut sink)
            .unwrap();
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].len(), 2);
    }

    #[test]
    fn lone_line_ending_is_empty_input() {
        for text in ["\n", "\r", "\r\n"] {
            let (fc, stats) = GeoCsv::default().to_feature_collection_with_stats(text).unwrap();
            assert!(fc.is_empty());
            assert_eq!(stats.rows_seen, 0);
        }
    }

    #[test]
    fn add_features_are_forwarded() {
        let fc = FeatureCollection::from(vec![Feature::point(1.0, 2.0, Properties::new())]);
        let mut sink: Vec<FeatureCollection> = Vec::new();
        GeoCsv::default().add_data(fc.clone(), &mut sink).unwrap();
        assert_eq!(sink, vec![fc]);
    }

    #[test]
    fn config_errors_never_reach_the_sink() {
        let mut sink: Vec<FeatureCollection> = Vec::new();
        let res = GeoCsv::default().add_data("lat,lng\n1,2", &mut sink);
        assert!(matches!(res, Err(GeoCsvError::ConfigError { .. })));
        assert!(sink.is_empty());
    }

    #[test]
    fn sink_errors_are_passed_on() {
        let res = GeoCsv::default().add_data("latitude,longitude\n1,2", &mut RejectingSink);
        assert!(matches!(res, Err(GeoCsvError::Sink { .. })));
    }

    #[test]
    fn row_transform_in_header_mode() {
        let cfg = GeoCsvConfig::builder()
            .row_transform(Box::new(SkipRowsStartingWith::new("#")))
            .build()
            .unwrap();
        let (fc, stats) = GeoCsv::new(cfg)
            .to_feature_collection_with_stats("latitude,longitude\n#1,2\n3,4")
            .unwrap();
        assert_eq!(fc.len(), 1);
        assert_eq!(stats.rows_seen, 1);
        assert_eq!(fc.features[0].coordinates(), [4.0, 3.0]);
    }

    #[test]
    fn row_transform_in_no_header_mode() {
        let cfg = GeoCsvConfig::builder()
            .header_present(false)
            .latitude("lat")
            .longitude("lng")
            .row_transform(Box::new(SkipRowsStartingWith::new("#")))
            .build()
            .unwrap();
        let fc = GeoCsv::new(cfg)
            .to_feature_collection("# lat,lng,popup\n1,2,x")
            .unwrap();
        assert_eq!(fc.len(), 1);
        assert_eq!(fc.features[0].properties.get("popup").unwrap(), "x");
    }
}
