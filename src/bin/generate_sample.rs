use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;
use weather_dashboard::data::schema::{
    AVG_CLOUD, AVG_GROUND_TEMP, AVG_HUMIDITY, AVG_LOCAL_PRESSURE, AVG_MAX_TEMP, AVG_MIN_TEMP,
    AVG_SEA_PRESSURE, AVG_TEMP, AVG_WIND, MAX_SEA_PRESSURE, MAX_TEMP, MAX_TEMP_DATE, MAX_WIND,
    MIN_SEA_PRESSURE, MIN_TEMP, MIN_TEMP_DATE, STATION_COL, TOTAL_PRECIP, TOTAL_SUNSHINE,
};

/// One station-year, in the column layout of the published station tables.
#[derive(Debug, Serialize)]
struct SampleRow {
    #[serde(rename = "관측지점별(1)")]
    station: String,
    #[serde(rename = "평균기온 (℃)")]
    avg_temp: f64,
    #[serde(rename = "평균최고기온 (℃)")]
    avg_max_temp: f64,
    #[serde(rename = "평균최저기온 (℃)")]
    avg_min_temp: f64,
    #[serde(rename = "최고기온 (℃)")]
    max_temp: f64,
    #[serde(rename = "최고기온일자")]
    max_temp_date: String,
    #[serde(rename = "최저기온 (℃)")]
    min_temp: f64,
    #[serde(rename = "최저기온일자")]
    min_temp_date: String,
    #[serde(rename = "평균지면온도 (℃)")]
    avg_ground_temp: f64,
    /// Thousands-separated, as in the source tables.
    #[serde(rename = "합계강수량 (mm)")]
    total_precip: String,
    #[serde(rename = "합계일조시간 (hr)")]
    total_sunshine: String,
    #[serde(rename = "평균풍속 (m/s)")]
    avg_wind: f64,
    #[serde(rename = "최대풍속 (m/s)")]
    max_wind: f64,
    #[serde(rename = "평균상대습도 (%)")]
    avg_humidity: f64,
    #[serde(rename = "평균전운량 (할)")]
    avg_cloud: f64,
    #[serde(rename = "평균현지기압 (hPa)")]
    avg_local_pressure: String,
    #[serde(rename = "평균해면기압 (hPa)")]
    avg_sea_pressure: String,
    #[serde(rename = "최고해면기압 (hPa)")]
    max_sea_pressure: String,
    #[serde(rename = "최저해면기압 (hPa)")]
    min_sea_pressure: String,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in `[lo, hi)`, rounded to one decimal.
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        ((lo + (hi - lo) * self.next_f64()) * 10.0).round() / 10.0
    }

    fn day_in(&mut self, month: u32) -> String {
        let day = 1 + (self.next_u64() % 28) as u32;
        format!("2023-{month:02}-{day:02}")
    }
}

/// Format with a thousands separator, one decimal.
fn with_separators(v: f64) -> String {
    let s = format!("{v:.1}");
    let (int, frac) = s.split_once('.').unwrap_or((s.as_str(), "0"));
    let (sign, digits) = int.strip_prefix('-').map_or(("", int), |d| ("-", d));
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}.{frac}")
}

/// (station, latitude-ish warmth offset, coastal)
const STATIONS: &[(&str, f64, bool)] = &[
    ("속초", -0.5, true),
    ("철원", -3.0, false),
    ("춘천", -1.5, false),
    ("강릉", 0.5, true),
    ("서울", 0.0, false),
    ("인천", 0.0, true),
    ("수원", 0.0, false),
    ("청주", 0.3, false),
    ("대전", 0.5, false),
    ("안동", 0.2, false),
    ("포항", 1.5, true),
    ("대구", 1.8, false),
    ("전주", 1.0, false),
    ("울산", 1.8, true),
    ("광주", 1.7, false),
    ("부산", 2.5, true),
    ("목포", 1.9, true),
    ("여수", 2.3, true),
    ("제주", 4.0, true),
    ("서귀포", 4.5, true),
    ("울릉도", 0.8, true),
    ("대관령", -5.5, false),
];

fn main() {
    let mut rng = SimpleRng::new(42);

    let rows: Vec<SampleRow> = STATIONS
        .iter()
        .map(|&(name, warmth, coastal)| {
            let avg = 12.5 + warmth + rng.range(-0.4, 0.4);
            let spread = if coastal { 5.0 } else { 6.5 };
            let precip = rng.range(900.0, 2100.0) + if coastal { 250.0 } else { 0.0 };
            let sea = rng.range(1014.0, 1017.5);
            let local = sea - if name == "대관령" { 170.0 } else { rng.range(0.0, 12.0) };
            SampleRow {
                station: name.to_string(),
                avg_temp: avg,
                avg_max_temp: ((avg + spread) * 10.0).round() / 10.0,
                avg_min_temp: ((avg - spread + 1.0) * 10.0).round() / 10.0,
                max_temp: rng.range(33.0, 38.5),
                max_temp_date: rng.day_in(8),
                min_temp: rng.range(-19.0, -4.0) + warmth * 1.5,
                min_temp_date: rng.day_in(1),
                avg_ground_temp: ((avg + 1.6) * 10.0).round() / 10.0,
                total_precip: with_separators(precip),
                total_sunshine: with_separators(rng.range(1900.0, 2600.0)),
                avg_wind: rng.range(1.0, if coastal { 4.5 } else { 2.5 }),
                max_wind: rng.range(9.0, 24.0),
                avg_humidity: rng.range(58.0, 78.0),
                avg_cloud: rng.range(4.0, 5.8),
                avg_local_pressure: with_separators(local),
                avg_sea_pressure: with_separators(sea),
                max_sea_pressure: with_separators(sea + rng.range(14.0, 22.0)),
                min_sea_pressure: with_separators(sea - rng.range(18.0, 30.0)),
            }
        })
        .collect();

    // ---- CSV ----
    let csv_path = "weather.csv";
    let mut writer = csv::Writer::from_path(csv_path).expect("Failed to create output file");
    for row in &rows {
        writer.serialize(row).expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush CSV");

    // ---- Parquet ----
    let text = |f: fn(&SampleRow) -> String| -> ArrayRef {
        Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    };
    let num = |f: fn(&SampleRow) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
    };

    let columns: Vec<(&str, ArrayRef)> = vec![
        (STATION_COL, text(|r| r.station.clone())),
        (AVG_TEMP, num(|r| r.avg_temp)),
        (AVG_MAX_TEMP, num(|r| r.avg_max_temp)),
        (AVG_MIN_TEMP, num(|r| r.avg_min_temp)),
        (MAX_TEMP, num(|r| r.max_temp)),
        (MAX_TEMP_DATE, text(|r| r.max_temp_date.clone())),
        (MIN_TEMP, num(|r| r.min_temp)),
        (MIN_TEMP_DATE, text(|r| r.min_temp_date.clone())),
        (AVG_GROUND_TEMP, num(|r| r.avg_ground_temp)),
        (TOTAL_PRECIP, text(|r| r.total_precip.clone())),
        (TOTAL_SUNSHINE, text(|r| r.total_sunshine.clone())),
        (AVG_WIND, num(|r| r.avg_wind)),
        (MAX_WIND, num(|r| r.max_wind)),
        (AVG_HUMIDITY, num(|r| r.avg_humidity)),
        (AVG_CLOUD, num(|r| r.avg_cloud)),
        (AVG_LOCAL_PRESSURE, text(|r| r.avg_local_pressure.clone())),
        (AVG_SEA_PRESSURE, text(|r| r.avg_sea_pressure.clone())),
        (MAX_SEA_PRESSURE, text(|r| r.max_sea_pressure.clone())),
        (MIN_SEA_PRESSURE, text(|r| r.min_sea_pressure.clone())),
    ];

    let schema = Arc::new(Schema::new(
        columns
            .iter()
            .map(|(name, array)| Field::new(*name, array.data_type().clone(), false))
            .collect::<Vec<_>>(),
    ));
    let batch = RecordBatch::try_new(
        schema.clone(),
        columns.into_iter().map(|(_, array)| array).collect(),
    )
    .expect("Failed to create RecordBatch");

    let parquet_path = "weather.parquet";
    let file = std::fs::File::create(parquet_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    println!(
        "Wrote {} stations to {csv_path} and {parquet_path}",
        rows.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators_group_thousands() {
        assert_eq!(with_separators(1234.56), "1,234.6");
        assert_eq!(with_separators(1016.0), "1,016.0");
        assert_eq!(with_separators(999.0), "999.0");
        assert_eq!(with_separators(-1234567.0), "-1,234,567.0");
    }
}
