//! Load wrappers: mode-code parsing and path shaping ahead of the adapter

use anyhow::Result;

use super::{
    ColumnSpec, Disposition, JobReport, LoadConfig, LoadSource, SourceFormat, WarehouseClient,
};
use crate::error::Error;
use crate::table::Table;

/// Load in-memory rows into a warehouse table
///
/// `mode_code` is `'a'` (append) or `'t'` (truncate); anything else fails
/// before the client is touched. Schema autodetection is on exactly when
/// no explicit schema is given.
pub fn load_table(
    client: &dyn WarehouseClient,
    table: &Table,
    destination: &str,
    mode_code: char,
    schema: Option<Vec<ColumnSpec>>,
) -> Result<JobReport> {
    let disposition = Disposition::from_mode_code(mode_code)?;
    let autodetect = schema.is_none();
    let config = LoadConfig {
        disposition,
        schema,
        autodetect,
        source_format: None,
        skip_leading_rows: None,
    };

    let report = client.load_table(LoadSource::Rows(table), destination, &config)?;
    log::info!("loaded {} rows into {}", report.rows_written, destination);
    Ok(report)
}

/// Load a CSV or Excel object from the store into a warehouse table
///
/// `bucket_path` is `bucket/dir/file.csv` without any URI scheme; the
/// adapter owns scheme prefixing. Delimited loads skip one leading header
/// row unless told otherwise.
pub fn load_uri(
    client: &dyn WarehouseClient,
    bucket_path: &str,
    destination: &str,
    mode_code: char,
    source_format: SourceFormat,
    schema: Option<Vec<ColumnSpec>>,
    skip_leading_rows: Option<u32>,
) -> Result<JobReport> {
    let disposition = Disposition::from_mode_code(mode_code)?;

    if bucket_path.contains("://") {
        return Err(Error::invalid_parameter(format!(
            "do not include a URI scheme in bucket path '{}'",
            bucket_path
        ))
        .into());
    }

    let skip_leading_rows = skip_leading_rows.or(match source_format {
        SourceFormat::Csv => Some(1),
        SourceFormat::Excel => None,
    });
    let autodetect = schema.is_none();
    let config = LoadConfig {
        disposition,
        schema,
        autodetect,
        source_format: Some(source_format),
        skip_leading_rows,
    };

    let report = client.load_table(LoadSource::Uri(bucket_path), destination, &config)?;
    log::info!("loaded {} into {}", bucket_path, destination);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Row, Value};
    use crate::warehouse::ColumnType;
    use std::cell::RefCell;

    /// Adapter fake that records the load calls it receives
    #[derive(Default)]
    struct RecordingClient {
        loads: RefCell<Vec<(String, LoadConfig, usize)>>,
    }

    impl WarehouseClient for RecordingClient {
        fn run_query(&self, _sql: &str) -> Result<Table> {
            Ok(Table::default())
        }

        fn load_table(
            &self,
            source: LoadSource<'_>,
            destination: &str,
            config: &LoadConfig,
        ) -> Result<JobReport> {
            let row_count = match source {
                LoadSource::Rows(table) => table.row_count(),
                LoadSource::Uri(_) => 0,
            };
            self.loads
                .borrow_mut()
                .push((destination.to_string(), config.clone(), row_count));
            Ok(JobReport {
                job_id: "job-1".into(),
                rows_written: row_count as u64,
            })
        }
    }

    fn sample_table() -> Table {
        let mut table = Table::new(vec!["id".into()]);
        let mut row = Row::new();
        row.insert("id".into(), Value::Int(1));
        table.push_row(row);
        table
    }

    #[test]
    fn test_append_mode_maps_through() {
        let client = RecordingClient::default();
        let report =
            load_table(&client, &sample_table(), "proj.data.terms", 'a', None).unwrap();

        assert_eq!(report.rows_written, 1);
        let loads = client.loads.borrow();
        assert_eq!(loads.len(), 1);
        assert_eq!(loads[0].0, "proj.data.terms");
        assert_eq!(loads[0].1.disposition, Disposition::Append);
        assert!(loads[0].1.autodetect);
    }

    #[test]
    fn test_bad_mode_code_never_reaches_client() {
        let client = RecordingClient::default();
        let error =
            load_table(&client, &sample_table(), "proj.data.terms", 'x', None).unwrap_err();

        assert!(matches!(
            error.downcast_ref::<Error>(),
            Some(Error::InvalidParameter { .. })
        ));
        assert!(client.loads.borrow().is_empty());
    }

    #[test]
    fn test_explicit_schema_disables_autodetect() {
        let client = RecordingClient::default();
        let schema = vec![
            ColumnSpec::nullable("id", ColumnType::Integer),
            ColumnSpec::nullable("startDate", ColumnType::DateTime),
        ];
        load_table(&client, &sample_table(), "proj.data.terms", 't', Some(schema)).unwrap();

        let loads = client.loads.borrow();
        assert_eq!(loads[0].1.disposition, Disposition::Truncate);
        assert!(!loads[0].1.autodetect);
        assert_eq!(loads[0].1.schema.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn test_uri_load_defaults_csv_header_skip() {
        let client = RecordingClient::default();
        load_uri(
            &client,
            "backups/terms/out_1.csv",
            "proj.data.terms",
            'a',
            SourceFormat::Csv,
            None,
            None,
        )
        .unwrap();

        let loads = client.loads.borrow();
        assert_eq!(loads[0].1.skip_leading_rows, Some(1));
        assert_eq!(loads[0].1.source_format, Some(SourceFormat::Csv));
    }

    #[test]
    fn test_uri_load_rejects_scheme_prefix() {
        let client = RecordingClient::default();
        let error = load_uri(
            &client,
            "gs://backups/terms/out_1.csv",
            "proj.data.terms",
            'a',
            SourceFormat::Csv,
            None,
            None,
        )
        .unwrap_err();

        assert!(matches!(
            error.downcast_ref::<Error>(),
            Some(Error::InvalidParameter { .. })
        ));
        assert!(client.loads.borrow().is_empty());
    }

    #[test]
    fn test_excel_uri_load_has_no_header_skip() {
        let client = RecordingClient::default();
        load_uri(
            &client,
            "backups/terms/report.xlsx",
            "proj.data.terms",
            't',
            SourceFormat::Excel,
            None,
            None,
        )
        .unwrap();

        let loads = client.loads.borrow();
        assert_eq!(loads[0].1.skip_leading_rows, None);
    }
}
