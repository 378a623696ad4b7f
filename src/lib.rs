//! Turns delimited text (CSV, TSV, ...) with point records into a GeoJSON-like `FeatureCollection`.
//!
//! ```
//! use geo_csv::{GeoCsv, GeoCsvConfig};
//!
//! let geo_csv = GeoCsv::new(GeoCsvConfig::default());
//! let fc = geo_csv
//!     .to_feature_collection("latitude,longitude,popup\n40.1,-3.5,Madrid\n")
//!     .unwrap();
//! assert_eq!(fc.features[0].coordinates(), [-3.5, 40.1]);
//! assert_eq!(fc.features[0].properties.get("popup").unwrap(), "Madrid");
//! ```

pub mod data;
pub mod errors;
pub mod geo_csv_config;
pub mod geometry_mapper;
pub mod layer;
pub mod row_formatter;
pub mod row_reader;
pub mod table_parser;
pub mod tokenizer;
pub mod transform_row;

#[cfg(feature = "jsonconf")]
pub mod conf;

pub use data::feature::{Feature, FeatureCollection, Geometry, Properties};
pub use data::table::{ColumnSet, ParsedTable, RowObject};
pub use errors::{GeoCsvError, Result};
pub use geo_csv_config::{GeoCsvConfig, GeoCsvConfigBuilder};
pub use geometry_mapper::{FieldSelector, GeometryMapper, MappingStats, OmitReason, OmittedRow};
pub use layer::{AcceptFeatureCollection, GeoCsv, LayerData};
pub use row_formatter::RowFormatter;
pub use table_parser::TableParser;
pub use tokenizer::{DelimitedTokenizer, Token};
pub use transform_row::{Row, TransformRow};
