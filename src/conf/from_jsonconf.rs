use crate::{
    conf::jsonconf::{GeoCsvOptions, RowOpts},
    errors::{GeoCsvError, Result},
    geo_csv_config::{GeoCsvConfig, GeoCsvConfigBuilder},
    transform_row::*,
};

impl TryFrom<RowOpts> for TransformChain {
    type Error = GeoCsvError;

    fn try_from(opts: RowOpts) -> Result<TransformChain> {
        let mut chain = TransformChain::default();

        if let Some(n) = opts.skip_rows_from_start {
            chain.push(Box::new(SkipRowsFromStart::new(n)));
        }
        for prefix in opts.skip_rows_by_startswith.unwrap_or_default() {
            chain.push(Box::new(SkipRowsStartingWith::new(prefix)));
        }
        for pattern in opts.skip_rows_by_regex.unwrap_or_default() {
            chain.push(Box::new(SkipRowsByRegex::new(pattern)?)); // <--- this is why we do all this...
        }
        // Trimming runs before the empty check, so whitespace-only rows count as empty.
        if opts.trim_fields.unwrap_or(false) {
            chain.push(Box::new(TrimFields));
        }
        if opts.skip_empty_rows.unwrap_or(false) {
            chain.push(Box::new(SkipEmptyRows));
        }
        Ok(chain)
    }
}

impl TryFrom<GeoCsvOptions> for GeoCsvConfig {
    type Error = GeoCsvError;

    fn try_from(opts: GeoCsvOptions) -> Result<GeoCsvConfig> {
        let mut builder = GeoCsvConfigBuilder::new();

        if let Some(delim) = opts.delimiter {
            let mut chars = delim.chars();
            builder = match (chars.next(), chars.next()) {
                (Some(c), None) => builder.delimiter(c),
                _ => {
                    return Err(GeoCsvError::config(format!(
                        "delimiter must be exactly one character, got {:?}",
                        delim
                    )))
                }
            };
        }
        if let Some(b) = opts.header_present {
            builder = builder.header_present(b);
        }
        if let Some(lat) = opts.latitude_field {
            builder = builder.latitude(lat);
        }
        if let Some(lon) = opts.longitude_field {
            builder = builder.longitude(lon);
        }
        if let Some(cols) = opts.default_columns {
            builder = builder.default_columns(cols);
        }
        if let Some(row_opts) = opts.rows {
            let chain = TransformChain::try_from(row_opts)?;
            if !chain.is_empty() {
                builder = builder.row_transform(Box::new(chain));
            }
        }
        builder.build()
    }
}

impl GeoCsvConfig {
    pub fn from_json_str(json: &str) -> Result<GeoCsvConfig> {
        let opts: GeoCsvOptions = serde_json::from_str(json)?;
        opts.try_into()
    }
}
