use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, Observation, WeatherTable};
use super::schema::STATION_COL;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a station table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one station per record (default)
/// * `.json`    – `[{ "관측지점별(1)": "서울", "평균기온 (℃)": "12.5", ... }, ...]`
/// * `.parquet` – one column per field, any scalar types
///
/// Every format must carry the station column.
pub fn load_file(path: &Path) -> Result<WeatherTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" | "txt" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} rows, {} stations, {} columns from {}",
        table.len(),
        table.stations.len(),
        table.columns.len(),
        path.display()
    );
    Ok(table)
}

/// Station identifiers are names, never coerced: `"0108"` stays `"0108"`.
fn station_cell(raw: &str) -> CellValue {
    match raw.trim() {
        "" => CellValue::Null,
        name => CellValue::Text(name.to_string()),
    }
}

/// Split a row's fields into the station identifier and the remaining cells.
fn observation(mut cells: BTreeMap<String, CellValue>) -> Observation {
    let station = match cells.remove(STATION_COL) {
        Some(CellValue::Null) | None => None,
        Some(value) => Some(value.to_string()),
    };
    Observation { station, cells }
}

fn require_station_column(columns: &[String]) -> Result<()> {
    if !columns.iter().any(|c| c == STATION_COL) {
        bail!("missing station column '{STATION_COL}'");
    }
    Ok(())
}

fn metric_columns(columns: Vec<String>) -> Vec<String> {
    columns.into_iter().filter(|c| c != STATION_COL).collect()
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one row per station.
/// Numbers may be quoted with thousands separators (`"1,234.5"`); they are
/// kept as text and coerced on use.
fn load_csv(path: &Path) -> Result<WeatherTable> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();
    require_station_column(&headers)?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cells = headers
            .iter()
            .zip(record.iter())
            .map(|(name, raw)| {
                let cell = if name == STATION_COL {
                    station_cell(raw)
                } else {
                    CellValue::from_raw(raw)
                };
                (name.clone(), cell)
            })
            .collect();
        rows.push(observation(cells));
    }

    Ok(WeatherTable::from_rows(metric_columns(headers), rows))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<WeatherTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut columns: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut cells = BTreeMap::new();
        for (key, val) in obj {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
            let cell = match val {
                JsonValue::String(s) if key == STATION_COL => station_cell(s),
                _ => json_to_cell(val),
            };
            cells.insert(key.clone(), cell);
        }
        rows.push(observation(cells));
    }

    require_station_column(&columns)?;
    Ok(WeatherTable::from_rows(metric_columns(columns), rows))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::from_raw(s),
        JsonValue::Number(n) => n.as_f64().map_or(CellValue::Null, CellValue::Number),
        JsonValue::Bool(b) => CellValue::Text(b.to_string()),
        JsonValue::Null => CellValue::Null,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet table. Works with files written by both **Pandas**
/// (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<WeatherTable> {
    read_parquet(path, PARQUET_BATCH_ROWS)
}

/// Rows decoded per record batch.
const PARQUET_BATCH_ROWS: usize = 1024;

fn read_parquet(path: &Path, batch_rows: usize) -> Result<WeatherTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    require_station_column(&columns)?;
    let reader = builder
        .with_batch_size(batch_rows)
        .build()
        .context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        // Rows already read from earlier batches.
        let offset = rows.len();
        for row in 0..batch.num_rows() {
            let mut cells = BTreeMap::new();
            for (col_idx, name) in columns.iter().enumerate() {
                let col = batch.column(col_idx);
                let value = if name == STATION_COL {
                    extract_station(col, row)
                } else {
                    extract_cell(col, row)
                }
                .with_context(|| format!("Row {}, column '{name}'", offset + row))?;
                cells.insert(name.clone(), value);
            }
            rows.push(observation(cells));
        }
    }

    Ok(WeatherTable::from_rows(metric_columns(columns), rows))
}

fn extract_station(col: &Arc<dyn Array>, row: usize) -> Result<CellValue> {
    if col.is_null(row) {
        return Ok(CellValue::Null);
    }
    match col.data_type() {
        DataType::Utf8 => Ok(station_cell(col.as_string::<i32>().value(row))),
        DataType::LargeUtf8 => Ok(station_cell(col.as_string::<i64>().value(row))),
        _ => extract_cell(col, row),
    }
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> Result<CellValue> {
    if col.is_null(row) {
        return Ok(CellValue::Null);
    }
    let cell = match col.data_type() {
        DataType::Utf8 => CellValue::from_raw(col.as_string::<i32>().value(row)),
        DataType::LargeUtf8 => CellValue::from_raw(col.as_string::<i64>().value(row)),
        DataType::Int32 => CellValue::Number(col.as_primitive::<Int32Type>().value(row) as f64),
        DataType::Int64 => CellValue::Number(col.as_primitive::<Int64Type>().value(row) as f64),
        DataType::Float32 => CellValue::Number(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => CellValue::Number(col.as_primitive::<Float64Type>().value(row)),
        // Dates, timestamps, booleans: keep their display form.
        _ => CellValue::Text(array_value_to_string(col, row)?),
    };
    Ok(cell)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use arrow::array::{Float64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use tempfile::TempDir;

    use super::*;
    use crate::data::coerce::coerce_column;
    use crate::data::schema::{MAX_TEMP_DATE, TOTAL_PRECIP};

    fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn csv_keeps_separated_numbers_as_text() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "weather.csv",
            "\u{feff}관측지점별(1),합계강수량 (mm),최고기온일자\n\
             서울,\"1,234.5\",2023-08-01\n\
             ,12,2023-08-02\n\
             부산,,2023-08-03\n",
        );
        let table = load_file(&path).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.columns, vec![TOTAL_PRECIP.to_string(), MAX_TEMP_DATE.to_string()]);
        assert_eq!(table.stations, vec!["부산".to_string(), "서울".to_string()]);
        assert_eq!(table.rows[1].station, None);
        assert_eq!(
            table.rows[0].cell(TOTAL_PRECIP),
            &CellValue::Text("1,234.5".into())
        );
        assert_eq!(coerce_column(&table, TOTAL_PRECIP), vec![Some(1234.5), Some(12.0), None]);
    }

    #[test]
    fn csv_without_station_column_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "bad.csv", "station,t\nA,1\n");
        let err = load_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains(STATION_COL));
    }

    #[test]
    fn json_records_load() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "weather.json",
            r#"[{"관측지점별(1)": "서울", "합계강수량 (mm)": "1,000"},
                {"관측지점별(1)": null, "합계강수량 (mm)": 5.5},
                {"관측지점별(1)": 108, "합계강수량 (mm)": null}]"#,
        );
        let table = load_file(&path).unwrap();
        assert_eq!(table.columns, vec![TOTAL_PRECIP.to_string()]);
        assert_eq!(table.stations, vec!["108".to_string(), "서울".to_string()]);
        assert_eq!(coerce_column(&table, TOTAL_PRECIP), vec![Some(1000.0), Some(5.5), None]);
    }

    #[test]
    fn parquet_tables_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("weather.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new(STATION_COL, DataType::Utf8, true),
            Field::new(TOTAL_PRECIP, DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec![Some("서울"), None])),
                Arc::new(Float64Array::from(vec![Some(1234.5), None])),
            ],
        )
        .unwrap();
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.stations, vec!["서울".to_string()]);
        assert_eq!(coerce_column(&table, TOTAL_PRECIP), vec![Some(1234.5), None]);
    }

    #[test]
    fn station_ids_are_kept_verbatim() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "ids.csv", "관측지점별(1),평균기온 (℃)\n 0108 ,12.5\n,3\n");
        let table = load_file(&path).unwrap();
        assert_eq!(table.rows[0].station.as_deref(), Some("0108"));
        assert_eq!(table.rows[1].station, None);
        assert_eq!(table.stations, vec!["0108".to_string()]);

        let path = write(&dir, "ids.json", r#"[{"관측지점별(1)": "0108", "평균기온 (℃)": 1}]"#);
        let table = load_file(&path).unwrap();
        assert_eq!(table.rows[0].station.as_deref(), Some("0108"));
    }

    #[test]
    fn parquet_rows_span_batches_in_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("batches.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new(STATION_COL, DataType::Utf8, true),
            Field::new(TOTAL_PRECIP, DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["0108", "서울", "부산", "대구", "광주"])),
                Arc::new(Float64Array::from(vec![1.0, 2.0, 3.0, 4.0, 5.0])),
            ],
        )
        .unwrap();
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = read_parquet(&path, 2).unwrap();
        assert_eq!(table.len(), 5);
        let stations: Vec<_> = table.rows.iter().map(|r| r.station.as_deref()).collect();
        assert_eq!(
            stations,
            vec![Some("0108"), Some("서울"), Some("부산"), Some("대구"), Some("광주")]
        );
        assert_eq!(
            coerce_column(&table, TOTAL_PRECIP),
            vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0)]
        );
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("weather.xlsx")).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }
}
