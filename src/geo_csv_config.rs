use crate::errors::{GeoCsvError, Result};
use crate::geometry_mapper::{FieldSelector, GeometryMapper};
use crate::table_parser::TableParser;
use crate::tokenizer::QUOTE_CHAR;
use crate::transform_row::TransformRow;

pub const DEFAULT_DELIMITER: char = ',';
pub const DEFAULT_LATITUDE_FIELD: &str = "latitude";
pub const DEFAULT_LONGITUDE_FIELD: &str = "longitude";
pub const DEFAULT_COLUMNS: [&str; 3] = ["lat", "lng", "popup"];

/// Immutable configuration of one parse. Build it via `GeoCsvConfig::builder()`.
#[derive(Debug)]
pub struct GeoCsvConfig {
    pub delimiter: char,
    pub header_present: bool,
    pub latitude: FieldSelector,
    pub longitude: FieldSelector,
    pub default_columns: Vec<String>, // ignored if header_present == true
    pub row_transform: Option<Box<dyn TransformRow + Send + Sync>>,
}

impl GeoCsvConfig {
    pub fn builder() -> GeoCsvConfigBuilder {
        GeoCsvConfigBuilder::new()
    }

    pub fn table_parser(&self) -> TableParser {
        TableParser::new(self.delimiter)
    }

    pub fn geometry_mapper(&self) -> GeometryMapper {
        GeometryMapper::new(
            self.latitude.clone(),
            self.longitude.clone(),
            self.default_columns.clone(),
        )
    }
}

impl Default for GeoCsvConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            header_present: true,
            latitude: DEFAULT_LATITUDE_FIELD.into(),
            longitude: DEFAULT_LONGITUDE_FIELD.into(),
            default_columns: DEFAULT_COLUMNS.iter().map(|s| s.to_string()).collect(),
            row_transform: None,
        }
    }
}

pub struct GeoCsvConfigBuilder {
    delimiter: char,
    header_present: bool,
    latitude: FieldSelector,
    longitude: FieldSelector,
    default_columns: Vec<String>,
    row_transform: Option<Box<dyn TransformRow + Send + Sync>>,
}

impl GeoCsvConfigBuilder {
    pub fn new() -> Self {
        let GeoCsvConfig {
            delimiter,
            header_present,
            latitude,
            longitude,
            default_columns,
            row_transform,
        } = GeoCsvConfig::default();
        Self {
            delimiter,
            header_present,
            latitude,
            longitude,
            default_columns,
            row_transform,
        }
    }

    pub fn csv() -> Self {
        Self::new()
    }

    pub fn tsv() -> Self {
        Self::new().delimiter('\t')
    }

    pub fn delimiter(mut self, c: char) -> GeoCsvConfigBuilder {
        self.delimiter = c;
        self
    }

    pub fn header_present(mut self, b: bool) -> GeoCsvConfigBuilder {
        self.header_present = b;
        self
    }

    pub fn latitude<T: Into<FieldSelector>>(mut self, field: T) -> GeoCsvConfigBuilder {
        self.latitude = field.into();
        self
    }

    pub fn longitude<T: Into<FieldSelector>>(mut self, field: T) -> GeoCsvConfigBuilder {
        self.longitude = field.into();
        self
    }

    pub fn default_columns<T: Into<String>>(mut self, columns: Vec<T>) -> GeoCsvConfigBuilder {
        self.default_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn row_transform(mut self, t: Box<dyn TransformRow + Send + Sync>) -> GeoCsvConfigBuilder {
        self.row_transform = Some(t);
        self
    }

    pub fn build(self) -> Result<GeoCsvConfig> {
        if self.delimiter == QUOTE_CHAR || self.delimiter == '\n' || self.delimiter == '\r' {
            return Err(GeoCsvError::config(format!(
                "delimiter {:?} is not allowed (it must not be a quote or a line ending)",
                self.delimiter
            )));
        }
        if !self.header_present && self.default_columns.is_empty() {
            return Err(GeoCsvError::config(
                "mandatory 'default columns' are not set! (Empty vec, but no header row present)",
            ));
        }

        Ok(GeoCsvConfig {
            delimiter: self.delimiter,
            header_present: self.header_present,
            latitude: self.latitude,
            longitude: self.longitude,
            default_columns: self.default_columns,
            row_transform: self.row_transform,
        })
    }
}

impl Default for GeoCsvConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
