//! Column names of the station climate table and the metric catalogue
//! built on top of them.

use super::model::WeatherTable;

/// Station identifier column.
pub const STATION_COL: &str = "관측지점별(1)";

pub const AVG_TEMP: &str = "평균기온 (℃)";
pub const AVG_MAX_TEMP: &str = "평균최고기온 (℃)";
pub const AVG_MIN_TEMP: &str = "평균최저기온 (℃)";
pub const MAX_TEMP: &str = "최고기온 (℃)";
pub const MIN_TEMP: &str = "최저기온 (℃)";
pub const AVG_GROUND_TEMP: &str = "평균지면온도 (℃)";
pub const TOTAL_PRECIP: &str = "합계강수량 (mm)";
pub const TOTAL_SUNSHINE: &str = "합계일조시간 (hr)";
pub const AVG_WIND: &str = "평균풍속 (m/s)";
pub const MAX_WIND: &str = "최대풍속 (m/s)";
pub const AVG_HUMIDITY: &str = "평균상대습도 (%)";
pub const AVG_CLOUD: &str = "평균전운량 (할)";
pub const AVG_LOCAL_PRESSURE: &str = "평균현지기압 (hPa)";
pub const AVG_SEA_PRESSURE: &str = "평균해면기압 (hPa)";
pub const MAX_SEA_PRESSURE: &str = "최고해면기압 (hPa)";
pub const MIN_SEA_PRESSURE: &str = "최저해면기압 (hPa)";

/// Date on which [`MAX_TEMP`] was recorded.
pub const MAX_TEMP_DATE: &str = "최고기온일자";
/// Date on which [`MIN_TEMP`] was recorded.
pub const MIN_TEMP_DATE: &str = "최저기온일자";

/// Fixed columns of the station heatmap.
pub const HEATMAP_COLUMNS: [&str; 5] = [AVG_TEMP, MAX_TEMP, MIN_TEMP, TOTAL_PRECIP, AVG_WIND];

/// Category name → candidate metric columns.
pub const METRIC_CATALOGUE: &[(&str, &[&str])] = &[
    (
        "기온 (Temperature)",
        &[AVG_TEMP, AVG_MAX_TEMP, AVG_MIN_TEMP, MAX_TEMP, MIN_TEMP, AVG_GROUND_TEMP],
    ),
    ("강수/일조 (Precip & Sun)", &[TOTAL_PRECIP, TOTAL_SUNSHINE]),
    ("바람 (Wind)", &[AVG_WIND, MAX_WIND]),
    ("습도/운량 (Humidity/Cloud)", &[AVG_HUMIDITY, AVG_CLOUD]),
    (
        "기압 (Pressure)",
        &[AVG_LOCAL_PRESSURE, AVG_SEA_PRESSURE, MAX_SEA_PRESSURE, MIN_SEA_PRESSURE],
    ),
];

/// A metric category with the columns actually present in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricGroup {
    pub name: String,
    pub columns: Vec<String>,
}

/// Prune the catalogue to columns present in `table`.
///
/// Every category is kept, even if it ends up empty, so the category list
/// stays stable across datasets.
pub fn metric_groups(table: &WeatherTable) -> Vec<MetricGroup> {
    METRIC_CATALOGUE
        .iter()
        .map(|(name, columns)| MetricGroup {
            name: name.to_string(),
            columns: columns
                .iter()
                .filter(|c| table.has_column(c))
                .map(|c| c.to_string())
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::table;

    #[test]
    fn absent_columns_are_dropped_from_groups() {
        let t = table(&[(Some("A"), &[(AVG_TEMP, "1"), (AVG_WIND, "2"), ("other", "3")])]);
        let groups = metric_groups(&t);
        assert_eq!(groups.len(), METRIC_CATALOGUE.len());
        assert_eq!(groups[0].columns, vec![AVG_TEMP.to_string()]);
        assert!(groups[1].columns.is_empty());
        assert_eq!(groups[2].columns, vec![AVG_WIND.to_string()]);
    }

    #[test]
    fn group_columns_keep_catalogue_order() {
        let t = table(&[(Some("A"), &[(MIN_TEMP, "1"), (AVG_TEMP, "2")])]);
        let groups = metric_groups(&t);
        assert_eq!(groups[0].columns, vec![AVG_TEMP.to_string(), MIN_TEMP.to_string()]);
    }
}
