use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use arrow::array::{Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::{DataSourceError, LoadError, SchemaError};
use super::model::*;

// ---------------------------------------------------------------------------
// Data sources
// ---------------------------------------------------------------------------

const SHEETS_PREFIX: &str = "https://docs.google.com/spreadsheets/d/";

/// Where a dataset is read from. Also the key of the dataset cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataSource {
    /// HTTP(S) location, already normalised (see [`normalize_sheet_url`]).
    Url(String),
    /// Local snapshot.
    File(PathBuf),
}

impl DataSource {
    /// Interpret a user-supplied location: anything with an http(s) scheme is
    /// a URL, everything else a file path.
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Url(normalize_sheet_url(location))
        } else {
            DataSource::File(PathBuf::from(location))
        }
    }

    fn format(&self) -> Result<SourceFormat, DataSourceError> {
        match self {
            DataSource::Url(url) => {
                let path = url.split(['?', '#']).next().unwrap_or(url);
                let ext = path.rsplit_once('.').map(|(_, e)| e).unwrap_or("");
                match SourceFormat::from_extension(ext) {
                    Some(SourceFormat::Parquet) => Err(DataSourceError::Unsupported(
                        "parquet is only read from local files".to_string(),
                    )),
                    Some(fmt) => Ok(fmt),
                    None => Ok(SourceFormat::Csv),
                }
            }
            DataSource::File(path) => {
                let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
                SourceFormat::from_extension(ext).ok_or_else(|| {
                    DataSourceError::Unsupported(format!("file extension .{ext}"))
                })
            }
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => write!(f, "{url}"),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Rewrite a Google Sheets link (`/edit`, `/view`, `/htmlview`, …) into its
/// CSV export link, keeping the sheet `gid`. Export and gviz links, and
/// non-Sheets URLs, are returned unchanged.
pub fn normalize_sheet_url(url: &str) -> String {
    let Some(rest) = url.strip_prefix(SHEETS_PREFIX) else {
        return url.to_string();
    };
    let (id, tail) = rest.split_once('/').unwrap_or((rest, ""));
    if id.is_empty() || tail.starts_with("export") || tail.starts_with("gviz") {
        return url.to_string();
    }
    let gid = tail
        .split(['?', '&', '#'])
        .find_map(|part| part.strip_prefix("gid="));
    match gid {
        Some(gid) => format!("{SHEETS_PREFIX}{id}/export?format=csv&gid={gid}"),
        None => format!("{SHEETS_PREFIX}{id}/export?format=csv"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceFormat {
    Csv,
    Tsv,
    Json,
    Parquet,
}

impl SourceFormat {
    fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(SourceFormat::Csv),
            "tsv" => Some(SourceFormat::Tsv),
            "json" => Some(SourceFormat::Json),
            "parquet" | "pq" => Some(SourceFormat::Parquet),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Fetch, parse and clean a dataset.
///
/// Every format is first read into a [`RawTable`] of trimmed text cells so
/// that type coercion and row dropping behave identically regardless of
/// where the data came from.
pub fn load(source: &DataSource, timeout: Duration) -> Result<Dataset, LoadError> {
    log::info!("Loading care-home dataset from {source}");
    let table = read_table(source, timeout)?;
    let rows_read = table.rows.len();
    let dataset = clean(table)?;
    log::info!(
        "Loaded {} of {rows_read} rows ({} brands, {} local authorities)",
        dataset.len(),
        dataset.brands.len(),
        dataset.local_authorities.len()
    );
    Ok(dataset)
}

fn read_table(source: &DataSource, timeout: Duration) -> Result<RawTable, LoadError> {
    let format = source.format()?;
    match source {
        DataSource::Url(url) => {
            let text = fetch_text(url, timeout)?;
            match format {
                SourceFormat::Csv => read_delimited(text.as_bytes(), b','),
                SourceFormat::Tsv => read_delimited(text.as_bytes(), b'\t'),
                SourceFormat::Json => read_json(&text),
                SourceFormat::Parquet => Err(DataSourceError::Unsupported(
                    "parquet is only read from local files".to_string(),
                )
                .into()),
            }
        }
        DataSource::File(path) => match format {
            SourceFormat::Csv => read_delimited(open(path)?, b','),
            SourceFormat::Tsv => read_delimited(open(path)?, b'\t'),
            SourceFormat::Json => {
                let text = std::fs::read_to_string(path).map_err(|source| {
                    DataSourceError::Io {
                        path: path.clone(),
                        source,
                    }
                })?;
                read_json(&text)
            }
            SourceFormat::Parquet => read_parquet(path),
        },
    }
}

fn open(path: &Path) -> Result<File, DataSourceError> {
    File::open(path).map_err(|source| DataSourceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn fetch_text(url: &str, timeout: Duration) -> Result<String, DataSourceError> {
    let http = |source| DataSourceError::Http {
        url: url.to_string(),
        source,
    };
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(http)?;

    let response = client.get(url).send().map_err(http)?;
    let status = response.status();
    if !status.is_success() {
        return Err(DataSourceError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    let text = response.text().map_err(http)?;
    log::debug!("Fetched {} bytes from {url}", text.len());
    Ok(text)
}

// ---------------------------------------------------------------------------
// Raw table – text cells before coercion
// ---------------------------------------------------------------------------

/// Header names plus row-major cells. Empty (after trimming) cells are `None`.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

fn cell(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

/// Header row followed by data rows; every row must have the header's width.
fn read_delimited<R: Read>(reader: R, delimiter: u8) -> Result<RawTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_reader(reader);
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(cell).collect());
    }
    Ok(RawTable { headers, rows })
}

/// Records-oriented JSON: `[{ "Brand Name": "...", "Care homes beds": 40, ... }, ...]`.
/// Headers are the union of keys in first-seen order.
fn read_json(text: &str) -> Result<RawTable, LoadError> {
    let root: JsonValue = serde_json::from_str(text)?;
    let items = root.as_array().ok_or_else(|| {
        DataSourceError::Malformed("expected a top-level JSON array".to_string())
    })?;

    let mut objects = Vec::with_capacity(items.len());
    let mut headers: Vec<String> = Vec::new();
    for (i, item) in items.iter().enumerate() {
        let obj = item.as_object().ok_or_else(|| {
            DataSourceError::Malformed(format!("row {i} is not a JSON object"))
        })?;
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
        objects.push(obj);
    }

    let rows = objects
        .into_iter()
        .map(|obj| {
            headers
                .iter()
                .map(|h| obj.get(h).and_then(json_cell))
                .collect()
        })
        .collect();
    Ok(RawTable { headers, rows })
}

fn json_cell(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) => cell(s),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Parquet snapshot: every column is cast to UTF-8 text, so numeric, date
/// and timestamp columns all flow through the same coercion as CSV.
fn read_parquet(path: &Path) -> Result<RawTable, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().trim().to_string())
        .collect();
    let reader = builder.build()?;

    let mut rows = Vec::new();
    for batch in reader {
        let batch = batch?;
        let mut columns = Vec::with_capacity(batch.num_columns());
        for col in batch.columns() {
            let text = cast(col.as_ref(), &DataType::Utf8)?;
            let strings = text
                .as_any()
                .downcast_ref::<StringArray>()
                .ok_or_else(|| {
                    DataSourceError::Malformed("column did not cast to UTF-8".to_string())
                })?
                .clone();
            columns.push(strings);
        }
        for row in 0..batch.num_rows() {
            rows.push(
                columns
                    .iter()
                    .map(|c| if c.is_null(row) { None } else { cell(c.value(row)) })
                    .collect(),
            );
        }
    }
    Ok(RawTable { headers, rows })
}

// ---------------------------------------------------------------------------
// Coercion and row dropping
// ---------------------------------------------------------------------------

struct ColumnIndex {
    brand: usize,
    provider: usize,
    location_id: usize,
    location_name: usize,
    local_authority: usize,
    directorate: usize,
    beds: usize,
    rating: usize,
    publication_date: usize,
    latitude: usize,
    longitude: usize,
}

impl ColumnIndex {
    fn resolve(headers: &[String]) -> Result<Self, SchemaError> {
        let mut positions = [0usize; 11];
        let mut missing = Vec::new();
        for (slot, name) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
            match headers.iter().position(|h| h == name) {
                Some(i) => *slot = i,
                None => missing.push(name.to_string()),
            }
        }
        if !missing.is_empty() {
            return Err(SchemaError { missing });
        }
        let [brand, provider, location_id, location_name, local_authority, directorate, beds, rating, publication_date, latitude, longitude] =
            positions;
        Ok(ColumnIndex {
            brand,
            provider,
            location_id,
            location_name,
            local_authority,
            directorate,
            beds,
            rating,
            publication_date,
            latitude,
            longitude,
        })
    }
}

/// Turn a raw table into a [`Dataset`]:
/// * beds → number (unparsable, negative or non-finite → null)
/// * publication date → date (unparsable → null)
/// * rows missing brand, beds or directorate are dropped
/// * only [`ADULT_SOCIAL_CARE`] rows are kept
pub fn clean(table: RawTable) -> Result<Dataset, SchemaError> {
    let ix = ColumnIndex::resolve(&table.headers)?;

    let mut records = Vec::with_capacity(table.rows.len());
    let mut missing_required = 0usize;
    let mut other_directorate = 0usize;

    for (row_no, mut row) in table.rows.into_iter().enumerate() {
        let mut take = |i: usize| row.get_mut(i).and_then(Option::take);

        let brand = take(ix.brand);
        let beds = take(ix.beds).as_deref().and_then(parse_beds);
        let directorate = take(ix.directorate);
        let (Some(brand), Some(beds), Some(directorate)) = (brand, beds, directorate) else {
            log::debug!("Row {row_no}: missing brand, beds or directorate; dropped");
            missing_required += 1;
            continue;
        };
        if directorate != ADULT_SOCIAL_CARE {
            other_directorate += 1;
            continue;
        }

        records.push(Record {
            brand,
            provider: take(ix.provider),
            location_id: take(ix.location_id),
            location_name: take(ix.location_name),
            local_authority: take(ix.local_authority),
            directorate,
            beds,
            rating: take(ix.rating),
            publication_date: take(ix.publication_date).as_deref().and_then(parse_date),
            latitude: take(ix.latitude).as_deref().and_then(parse_coordinate),
            longitude: take(ix.longitude).as_deref().and_then(parse_coordinate),
        });
    }

    if missing_required > 0 || other_directorate > 0 {
        log::info!(
            "Dropped {missing_required} rows missing required fields and {other_directorate} rows outside '{ADULT_SOCIAL_CARE}'"
        );
    }
    Ok(Dataset::from_records(records))
}

fn parse_beds(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|b| b.is_finite() && *b >= 0.0)
}

fn parse_coordinate(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Slash and dash dates are read day-first; the regulator publishes UK dates.
const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d", "%d-%m-%Y", "%d %b %Y"];
const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%d/%m/%Y %H:%M:%S",
];

fn parse_date(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{ArrayRef, Float64Array};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;

    const HEADER: &str = "Brand Name,Provider Name,Location ID,Location Name,Location Local Authority,Location Inspection Directorate,Care homes beds,Location Latest Overall Rating,Publication Date,Location Latitude,Location Longitude";

    fn csv_table(rows: &[&str]) -> RawTable {
        let text = std::iter::once(HEADER)
            .chain(rows.iter().copied())
            .collect::<Vec<_>>()
            .join("\n");
        read_delimited(text.as_bytes(), b',').expect("parse csv")
    }

    #[test]
    fn coerces_and_keeps_adult_social_care() {
        let table = csv_table(&[
            "Acme,Acme Ltd,1-001,Oak House,Leeds,Adult social care,40,Good,2023-05-12,53.8,-1.55",
            "Acme,Acme Ltd,1-002,Elm House,Leeds,Adult social care,12.5,Outstanding,not a date,,",
        ]);
        let ds = clean(table).expect("clean");
        assert_eq!(ds.len(), 2);

        let oak = &ds.records[0];
        assert_eq!(oak.beds, 40.0);
        assert_eq!(oak.publication_date, NaiveDate::from_ymd_opt(2023, 5, 12));
        assert_eq!(oak.coordinates(), Some((53.8, -1.55)));

        let elm = &ds.records[1];
        assert_eq!(elm.beds, 12.5);
        assert_eq!(elm.publication_date, None);
        assert_eq!(elm.latitude, None);
        assert_eq!(elm.longitude, None);
    }

    #[test]
    fn unparsable_beds_drop_the_row() {
        let table = csv_table(&[
            "Acme,Acme Ltd,1-001,Oak House,Leeds,Adult social care,forty,Good,,,",
            "Acme,Acme Ltd,1-002,Elm House,Leeds,Adult social care,-3,Good,,,",
            "Acme,Acme Ltd,1-003,Ash House,Leeds,Adult social care,,Good,,,",
            "Acme,Acme Ltd,1-004,Yew House,Leeds,Adult social care,9,Good,,,",
        ]);
        let ds = clean(table).expect("clean");
        let ids: Vec<_> = ds.records.iter().map(|r| r.location_id.clone()).collect();
        assert_eq!(ids, vec![Some("1-004".to_string())]);
    }

    #[test]
    fn drops_missing_brand_and_other_directorates() {
        let table = csv_table(&[
            ",Acme Ltd,1-001,Oak House,Leeds,Adult social care,40,Good,,,",
            "Acme,Acme Ltd,1-002,Elm House,Leeds,Hospitals,40,Good,,,",
            "Acme,Acme Ltd,1-003,Ash House,Leeds,,40,Good,,,",
            "Acme,Acme Ltd,1-004,Yew House,Leeds,Adult social care,40,,,,",
        ]);
        let ds = clean(table).expect("clean");
        assert_eq!(ds.len(), 1);
        assert!(ds.records.iter().all(|r| r.directorate == ADULT_SOCIAL_CARE));
        assert_eq!(ds.records[0].rating, None);
    }

    #[test]
    fn directorate_is_compared_after_trimming() {
        let text = format!(
            "{HEADER}\n\
             Acme,Acme Ltd,1-001,Oak House,Leeds,  Adult social care  ,40,Good,,,\n\
             Acme,Acme Ltd,1-002,Elm House,Leeds,adult social care,40,Good,,,\n"
        );
        let table = read_delimited(text.as_bytes(), b',').expect("parse csv");
        let ds = clean(table).expect("clean");
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].location_id.as_deref(), Some("1-001"));
        assert_eq!(ds.records[0].directorate, ADULT_SOCIAL_CARE);
    }

    #[test]
    fn missing_columns_are_a_schema_error() {
        let text = "Brand Name,Provider Name,Location ID\nAcme,Acme Ltd,1-001\n";
        let table = read_delimited(text.as_bytes(), b',').expect("parse csv");
        let err = clean(table).expect_err("schema");
        assert_eq!(err.missing.len(), 8);
        assert!(err.missing.contains(&COL_BEDS.to_string()));
        assert!(!err.missing.contains(&COL_BRAND.to_string()));
    }

    #[test]
    fn columns_may_appear_in_any_order() {
        let text = "Location Longitude,Care homes beds,Brand Name,Provider Name,Location ID,Location Name,Location Local Authority,Location Inspection Directorate,Location Latest Overall Rating,Publication Date,Location Latitude,Extra\n\
                    -1.5,25,Acme,Acme Ltd,1-001,Oak House,Leeds,Adult social care,Good,01/02/2024,53.1,ignored\n";
        let table = read_delimited(text.as_bytes(), b',').expect("parse csv");
        let ds = clean(table).expect("clean");
        let rec = &ds.records[0];
        assert_eq!(rec.beds, 25.0);
        assert_eq!(rec.coordinates(), Some((53.1, -1.5)));
        assert_eq!(rec.publication_date, NaiveDate::from_ymd_opt(2024, 2, 1));
    }

    #[test]
    fn date_shapes() {
        let d = NaiveDate::from_ymd_opt(2023, 5, 12);
        assert_eq!(parse_date("2023-05-12"), d);
        assert_eq!(parse_date("12/05/2023"), d);
        assert_eq!(parse_date("2023/05/12"), d);
        assert_eq!(parse_date("12-05-2023"), d);
        assert_eq!(parse_date("12 May 2023"), d);
        assert_eq!(parse_date("2023-05-12T09:30:00"), d);
        assert_eq!(parse_date("2023-05-12 09:30:00.000"), d);
        assert_eq!(parse_date("2023-05-12T09:30:00+01:00"), d);
        assert_eq!(parse_date("May twelfth"), None);
        assert_eq!(parse_date("31/02/2023"), None);
    }

    #[test]
    fn json_records_are_read() {
        let text = r#"[
            {"Brand Name": "Acme", "Provider Name": "Acme Ltd", "Location ID": "1-001",
             "Location Name": "Oak House", "Location Local Authority": "Leeds",
             "Location Inspection Directorate": "Adult social care", "Care homes beds": 30,
             "Location Latest Overall Rating": "Good", "Publication Date": "2023-01-04",
             "Location Latitude": 53.8, "Location Longitude": null},
            {"Brand Name": "Acme", "Care homes beds": 5}
        ]"#;
        let table = read_json(text).expect("json");
        assert_eq!(table.rows.len(), 2);
        let ds = clean(table).expect("clean");
        // second row has no directorate
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].beds, 30.0);
        assert_eq!(ds.records[0].latitude, Some(53.8));
        assert_eq!(ds.records[0].longitude, None);
    }

    #[test]
    fn json_must_be_an_array_of_objects() {
        assert!(matches!(
            read_json(r#"{"Brand Name": "Acme"}"#),
            Err(LoadError::DataSource(DataSourceError::Malformed(_)))
        ));
        assert!(matches!(
            read_json("[1, 2]"),
            Err(LoadError::DataSource(DataSourceError::Malformed(_)))
        ));
        assert!(matches!(
            read_json("[{"),
            Err(LoadError::DataSource(DataSourceError::Json(_)))
        ));
    }

    #[test]
    fn ragged_csv_is_a_data_source_error() {
        let text = format!("{HEADER}\nAcme,Acme Ltd\n");
        assert!(matches!(
            read_delimited(text.as_bytes(), b','),
            Err(LoadError::DataSource(DataSourceError::Csv(_)))
        ));
    }

    #[test]
    fn loads_csv_file_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().expect("tempfile");
        writeln!(file, "{HEADER}").expect("write");
        writeln!(
            file,
            "Acme,Acme Ltd,1-001,Oak House,Leeds,Adult social care,40,Good,2023-05-12,53.8,-1.55"
        )
        .expect("write");

        let source = DataSource::File(file.path().to_path_buf());
        let ds = load(&source, Duration::from_secs(1)).expect("load");
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.brands, vec!["Acme"]);
    }

    #[test]
    fn loads_parquet_file_from_disk() {
        let text_field = |name: &str| Field::new(name, DataType::Utf8, true);
        let schema = Arc::new(Schema::new(
            REQUIRED_COLUMNS
                .iter()
                .map(|&name| match name {
                    COL_BEDS | COL_LATITUDE | COL_LONGITUDE => {
                        Field::new(name, DataType::Float64, true)
                    }
                    _ => text_field(name),
                })
                .collect::<Vec<_>>(),
        ));
        let text = |v: &str| Arc::new(StringArray::from(vec![Some(v)])) as ArrayRef;
        let num = |v: Option<f64>| Arc::new(Float64Array::from(vec![v])) as ArrayRef;
        let columns = vec![
            text("Acme"),
            text("Acme Ltd"),
            text("1-001"),
            text("Oak House"),
            text("Leeds"),
            text(ADULT_SOCIAL_CARE),
            num(Some(42.0)),
            text("Good"),
            text("2024-03-01"),
            num(Some(51.5)),
            num(None),
        ];
        let batch = RecordBatch::try_new(schema.clone(), columns).expect("batch");

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().expect("tempfile");
        let mut writer =
            ArrowWriter::try_new(file.reopen().expect("reopen"), schema, None).expect("writer");
        writer.write(&batch).expect("write");
        writer.close().expect("close");

        let ds = load(&DataSource::File(file.path().to_path_buf()), Duration::from_secs(1))
            .expect("load");
        assert_eq!(ds.len(), 1);
        let rec = &ds.records[0];
        assert_eq!(rec.beds, 42.0);
        assert_eq!(rec.latitude, Some(51.5));
        assert_eq!(rec.longitude, None);
        assert_eq!(rec.publication_date, NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn unreadable_file_is_a_data_source_error() {
        let source = DataSource::File(PathBuf::from("/definitely/not/here.csv"));
        assert!(matches!(
            load(&source, Duration::from_secs(1)),
            Err(LoadError::DataSource(DataSourceError::Io { .. }))
        ));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let source = DataSource::File(PathBuf::from("care_homes.xlsx"));
        assert!(matches!(
            load(&source, Duration::from_secs(1)),
            Err(LoadError::DataSource(DataSourceError::Unsupported(_)))
        ));
    }

    #[test]
    fn parquet_over_http_is_rejected() {
        let source = DataSource::parse("https://example.org/care_homes.parquet");
        assert!(matches!(
            source.format(),
            Err(DataSourceError::Unsupported(_))
        ));
        let csv = DataSource::parse("https://example.org/export?format=csv");
        assert_eq!(csv.format().expect("format"), SourceFormat::Csv);
    }

    #[test]
    fn locations_are_classified() {
        assert_eq!(
            DataSource::parse("  data/care.csv "),
            DataSource::File(PathBuf::from("data/care.csv"))
        );
        assert!(matches!(
            DataSource::parse("HTTPS://example.org/care.csv"),
            DataSource::Url(_)
        ));
    }

    #[test]
    fn sheet_links_become_csv_exports() {
        assert_eq!(
            normalize_sheet_url("https://docs.google.com/spreadsheets/d/abc123/edit#gid=42"),
            "https://docs.google.com/spreadsheets/d/abc123/export?format=csv&gid=42"
        );
        assert_eq!(
            normalize_sheet_url("https://docs.google.com/spreadsheets/d/abc123/edit?usp=sharing"),
            "https://docs.google.com/spreadsheets/d/abc123/export?format=csv"
        );
        assert_eq!(
            normalize_sheet_url("https://docs.google.com/spreadsheets/d/abc123"),
            "https://docs.google.com/spreadsheets/d/abc123/export?format=csv"
        );
        let export = "https://docs.google.com/spreadsheets/d/abc123/export?format=csv";
        assert_eq!(normalize_sheet_url(export), export);
        let other = "https://example.org/care.csv";
        assert_eq!(normalize_sheet_url(other), other);
    }
}
