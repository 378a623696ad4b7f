use serde::Deserialize;

use crate::geometry_mapper::FieldSelector;

/// Json representation of the layer options. Every key is optional and falls back to the defaults.
/// The option names of the Leaflet.geoCSV plugin are accepted as aliases.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GeoCsvOptions {
    pub comment: Option<String>,
    #[serde(alias = "firstLineTitles")]
    pub header_present: Option<bool>,
    #[serde(alias = "fieldSeparator")]
    pub delimiter: Option<String>,
    #[serde(alias = "latitudeTitle")]
    pub latitude_field: Option<FieldSelector>,
    #[serde(alias = "longitudeTitle")]
    pub longitude_field: Option<FieldSelector>,
    #[serde(alias = "titles")]
    pub default_columns: Option<Vec<String>>,
    pub rows: Option<RowOpts>,
}

/// Row filters, applied to the data rows before mapping.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RowOpts {
    pub comment: Option<String>,
    pub skip_rows_from_start: Option<usize>,
    pub skip_rows_by_startswith: Option<Vec<String>>,
    pub skip_rows_by_regex: Option<Vec<String>>,
    pub skip_empty_rows: Option<bool>,
    pub trim_fields: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deser_empty() {
        assert_eq!(
            GeoCsvOptions::default(),
            serde_json::from_str("{}").expect("could not deserialize ")
        );
    }

    #[test]
    fn deser_all_opts() {
        let data = r##"
        {
            "comment": "stations without header",
            "headerPresent": false,
            "delimiter": ";",
            "latitudeField": "lat",
            "longitudeField": 1,
            "defaultColumns": ["lat", "lng", "popup"],
            "rows": {
                "skipRowsFromStart": 1,
                "skipRowsByStartswith": ["#"],
                "skipRowsByRegex": ["^Totals:"],
                "skipEmptyRows": true,
                "trimFields": true
            }
        }
        "##;
        assert_eq!(
            GeoCsvOptions {
                comment: Some("stations without header".to_string()),
                header_present: Some(false),
                delimiter: Some(";".to_string()),
                latitude_field: Some(FieldSelector::Name("lat".to_string())),
                longitude_field: Some(FieldSelector::Index(1)),
                default_columns: Some(vec!["lat".into(), "lng".into(), "popup".into()]),
                rows: Some(RowOpts {
                    comment: None,
                    skip_rows_from_start: Some(1),
                    skip_rows_by_startswith: Some(vec!["#".to_string()]),
                    skip_rows_by_regex: Some(vec!["^Totals:".to_string()]),
                    skip_empty_rows: Some(true),
                    trim_fields: Some(true),
                }),
            },
            serde_json::from_str(data).expect("could not deserialize ")
        );
    }

    #[test]
    fn deser_leaflet_option_names() {
        let data = r#"
        {
            "firstLineTitles": false,
            "fieldSeparator": "\t",
            "latitudeTitle": "lat",
            "longitudeTitle": "lng",
            "titles": ["lat", "lng", "popup"]
        }
        "#;
        let opts: GeoCsvOptions = serde_json::from_str(data).expect("could not deserialize ");
        assert_eq!(opts.header_present, Some(false));
        assert_eq!(opts.delimiter, Some("\t".to_string()));
        assert_eq!(opts.latitude_field, Some(FieldSelector::Name("lat".into())));
        assert_eq!(opts.longitude_field, Some(FieldSelector::Name("lng".into())));
        assert_eq!(opts.default_columns.unwrap().len(), 3);
    }

    #[test]
    fn deser_err_on_unknown_key() {
        let res = serde_json::from_str::<GeoCsvOptions>(r#"{ "separator": ";" }"#);
        assert!(res.is_err());
    }

    #[test]
    fn deser_err_on_negative_index() {
        let res = serde_json::from_str::<GeoCsvOptions>(r#"{ "latitudeField": -1 }"#);
        assert!(res.is_err());
    }
}
