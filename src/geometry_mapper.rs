use std::fmt::Display;

use log::{debug, trace};

#[cfg(feature = "jsonconf")]
use serde::Deserialize;

use crate::data::feature::{Feature, FeatureCollection, Properties};
use crate::data::table::{ColumnSet, ParsedTable};
use crate::errors::{GeoCsvError, Result};
use crate::transform_row::Row;

/// Selects the latitude or longitude column, either by (case-sensitive, untrimmed) name or by position.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "jsonconf", derive(Deserialize))]
#[cfg_attr(feature = "jsonconf", serde(untagged))]
pub enum FieldSelector {
    Name(String),
    Index(usize),
}

impl From<&str> for FieldSelector {
    fn from(name: &str) -> Self {
        FieldSelector::Name(name.to_string())
    }
}

impl From<String> for FieldSelector {
    fn from(name: String) -> Self {
        FieldSelector::Name(name)
    }
}

impl From<usize> for FieldSelector {
    fn from(idx: usize) -> Self {
        FieldSelector::Index(idx)
    }
}

impl Display for FieldSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldSelector::Name(name) => write!(f, "'{}'", name),
            FieldSelector::Index(idx) => write!(f, "#{}", idx),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OmitReason {
    MissingLatitude,
    MissingLongitude,
    InvalidLatitude(String),
    InvalidLongitude(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OmittedRow {
    pub row_idx: usize, // data row index, i.e. without the header row
    pub reason: OmitReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingStats {
    pub rows_seen: usize,
    pub features_mapped: usize,
    pub omitted: Vec<OmittedRow>,
}

impl MappingStats {
    pub fn num_omitted(&self) -> usize {
        self.omitted.len()
    }
}

/// Turns parsed rows into point features.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeometryMapper {
    latitude: FieldSelector,
    longitude: FieldSelector,
    default_columns: ColumnSet, // only used for raw rows, i.e. without a header row
}

impl GeometryMapper {
    pub fn new<LAT, LON>(latitude: LAT, longitude: LON, default_columns: Vec<String>) -> Self
    where
        LAT: Into<FieldSelector>,
        LON: Into<FieldSelector>,
    {
        Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
            default_columns: ColumnSet::new(default_columns),
        }
    }

    pub fn map_table(&self, table: &ParsedTable) -> Result<FeatureCollection> {
        self.map_table_with_stats(table).map(|(fc, _)| fc)
    }

    pub fn map_table_with_stats(
        &self,
        table: &ParsedTable,
    ) -> Result<(FeatureCollection, MappingStats)> {
        let mut stats = MappingStats::default();
        // Empty input: no header, nothing to map.
        if table.columns.is_empty() && table.rows.is_empty() {
            return Ok((FeatureCollection::new(), stats));
        }

        let (lat_idx, lon_idx) = self.resolve_pair(&table.columns)?;
        let lat_name = row_object_key(&table.columns, lat_idx, "latitude")?;
        let lon_name = row_object_key(&table.columns, lon_idx, "longitude")?;

        let mut fc = FeatureCollection::with_capacity(table.rows.len());
        for (row_idx, row) in table.rows.iter().enumerate() {
            stats.rows_seen += 1;
            let coords = read_coordinates(
                row.get(lat_name).map(String::as_str),
                row.get(lon_name).map(String::as_str),
            );
            match coords {
                Ok((lat, lon)) => {
                    let properties: Properties = row
                        .iter()
                        .filter(|(k, _)| k.as_str() != lat_name && k.as_str() != lon_name)
                        .map(|(k, v)| (k.clone(), v.clone()))
                        .collect();
                    fc.push(Feature::point(lon, lat, properties));
                }
                Err(reason) => omit(&mut stats, row_idx, reason),
            }
        }
        stats.features_mapped = fc.len();
        Ok((fc, stats))
    }

    pub fn map_rows(&self, rows: &[Row]) -> Result<FeatureCollection> {
        self.map_rows_with_stats(rows).map(|(fc, _)| fc)
    }

    /// Raw rows are read positionally; the names come from the default columns.
    pub fn map_rows_with_stats(&self, rows: &[Row]) -> Result<(FeatureCollection, MappingStats)> {
        let mut stats = MappingStats::default();
        let (lat_idx, lon_idx) = self.resolve_pair(&self.default_columns)?;

        let mut fc = FeatureCollection::with_capacity(rows.len());
        for (row_idx, row) in rows.iter().enumerate() {
            stats.rows_seen += 1;
            let coords = read_coordinates(
                row.get(lat_idx).map(String::as_str),
                row.get(lon_idx).map(String::as_str),
            );
            match coords {
                Ok((lat, lon)) => {
                    let properties: Properties = self
                        .default_columns
                        .names()
                        .iter()
                        .enumerate()
                        .filter(|(i, _)| *i != lat_idx && *i != lon_idx)
                        .map(|(i, name)| (name.clone(), row.get(i).cloned().unwrap_or_default()))
                        .collect();
                    fc.push(Feature::point(lon, lat, properties));
                }
                Err(reason) => omit(&mut stats, row_idx, reason),
            }
        }
        stats.features_mapped = fc.len();
        Ok((fc, stats))
    }

    fn resolve_pair(&self, columns: &ColumnSet) -> Result<(usize, usize)> {
        let lat_idx = resolve(&self.latitude, columns, "latitude")?;
        let lon_idx = resolve(&self.longitude, columns, "longitude")?;
        if lat_idx == lon_idx {
            return Err(GeoCsvError::config(format!(
                "latitude field {} and longitude field {} both resolve to column #{}",
                self.latitude, self.longitude, lat_idx
            )));
        }
        trace!("resolved latitude to column #{lat_idx}, longitude to column #{lon_idx}");
        Ok((lat_idx, lon_idx))
    }
}

fn resolve(selector: &FieldSelector, columns: &ColumnSet, role: &str) -> Result<usize> {
    let idx = match selector {
        FieldSelector::Name(name) => columns.index_of(name),
        FieldSelector::Index(idx) => (*idx < columns.len()).then_some(*idx),
    };
    idx.ok_or_else(|| {
        GeoCsvError::config(format!(
            "{} field {} not found in columns {:?}",
            role,
            selector,
            columns.names()
        ))
    })
}

/// Row objects hold one value per column name, taken from the last column carrying it. A column that is
/// shadowed by a later one with the same name can't be read by name.
fn row_object_key<'c>(columns: &'c ColumnSet, idx: usize, role: &str) -> Result<&'c str> {
    match columns.name_at(idx) {
        Some(name) if columns.index_of(name) == Some(idx) => Ok(name),
        Some(name) => Err(GeoCsvError::config(format!(
            "{} column #{} is shadowed by a later column with the same name '{}'",
            role, idx, name
        ))),
        None => Err(GeoCsvError::config(format!(
            "{} column #{} not found in columns {:?}",
            role,
            idx,
            columns.names()
        ))),
    }
}

fn omit(stats: &mut MappingStats, row_idx: usize, reason: OmitReason) {
    debug!("omitting row: {}; reason: {:?}", row_idx, &reason);
    stats.omitted.push(OmittedRow { row_idx, reason });
}

fn read_coordinates(
    lat: Option<&str>,
    lon: Option<&str>,
) -> std::result::Result<(f64, f64), OmitReason> {
    let lat = parse_coordinate(lat).map_err(|raw| match raw {
        None => OmitReason::MissingLatitude,
        Some(v) => OmitReason::InvalidLatitude(v),
    })?;
    let lon = parse_coordinate(lon).map_err(|raw| match raw {
        None => OmitReason::MissingLongitude,
        Some(v) => OmitReason::InvalidLongitude(v),
    })?;
    Ok((lat, lon))
}

/// `Err(None)` for missing/blank values, `Err(Some(raw))` for values that are no finite number.
fn parse_coordinate(raw: Option<&str>) -> std::result::Result<f64, Option<String>> {
    let raw = raw.map(str::trim).filter(|v| !v.is_empty()).ok_or(None)?;
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(Some(raw.to_string())),
    }
}
