//! ECharts option construction for the report page.

use crate::aggregate::series::Series;
use serde::Serialize;
use serde_json::{json, Value};

/// One chart on the report page: a title plus a ready-to-render
/// ECharts option object.
#[derive(Debug, Clone)]
pub struct Chart {
    pub title: String,
    pub option: Value,
}

/// Smooth line chart with a 50-100% data zoom window.
pub fn line<V: Serialize>(title: &str, subtitle: &str, series: &Series<V>) -> Chart {
    let values: Vec<&V> = series.points.iter().map(|p| &p.value).collect();

    Chart {
        title: title.to_string(),
        option: json!({
            "title": { "text": title, "subtext": subtitle },
            "tooltip": { "trigger": "axis" },
            "xAxis": { "type": "category", "splitNumber": 20, "data": series.labels() },
            "yAxis": { "type": "value", "scale": true },
            "dataZoom": [{ "start": 50, "end": 100, "xAxisIndex": [0] }],
            "series": [{ "type": "line", "smooth": true, "data": values }],
        }),
    }
}

/// Line chart variant with a BTC-denominated y axis (volume view).
pub fn volume_line(title: &str, subtitle: &str, series: &Series<String>) -> Chart {
    let values: Vec<&String> = series.points.iter().map(|p| &p.value).collect();

    Chart {
        title: title.to_string(),
        option: json!({
            "title": { "text": title, "subtext": subtitle },
            "tooltip": { "trigger": "axis" },
            "xAxis": { "type": "category", "data": series.labels() },
            "yAxis": {
                "type": "value",
                "name": "BTC",
                "splitNumber": 20,
                "axisLabel": { "formatter": "{value} BTC" },
            },
            "dataZoom": [{ "start": 50, "end": 100, "xAxisIndex": [0] }],
            "series": [{ "type": "line", "smooth": true, "data": values }],
        }),
    }
}

/// Pie chart with per-item tooltip.
pub fn pie<V: Serialize>(title: &str, subtitle: &str, series: &Series<V>) -> Chart {
    let data: Vec<Value> = series
        .points
        .iter()
        .map(|p| json!({ "name": p.label, "value": p.value }))
        .collect();

    Chart {
        title: title.to_string(),
        option: json!({
            "title": { "text": title, "subtext": subtitle, "left": "center" },
            "tooltip": { "trigger": "item" },
            "series": [{
                "type": "pie",
                "radius": "60%",
                "data": data,
                "label": { "formatter": "{b}: {c}" },
            }],
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_series() -> Series<u64> {
        let mut series = Series::new();
        series.push("2020/03/15".to_string(), 10);
        series.push("2020/03/16".to_string(), 20);
        series
    }

    #[test]
    fn test_line_chart_option_shape() {
        let chart = line("Daily Fees", "Routing", &sample_series());

        assert_eq!(chart.option["title"]["text"], "Daily Fees");
        assert_eq!(chart.option["xAxis"]["data"].as_array().unwrap().len(), 2);
        assert_eq!(chart.option["series"][0]["type"], "line");
        assert_eq!(chart.option["series"][0]["data"][1], 20);
    }

    #[test]
    fn test_pie_chart_carries_labels_and_values() {
        let mut series = Series::new();
        series.push("Bob : 5".to_string(), 30u64);
        series.push(" : 7".to_string(), 20u64);

        let chart = pie("Fees by Channel", "Routing", &series);
        let data = chart.option["series"][0]["data"].as_array().unwrap();

        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["name"], "Bob : 5");
        assert_eq!(data[0]["value"], 30);
        assert_eq!(data[1]["name"], " : 7");
    }

    #[test]
    fn test_volume_line_uses_btc_axis() {
        let mut series = Series::new();
        series.push("2020/03/15".to_string(), "1.50000000".to_string());

        let chart = volume_line("Daily Volume", "Routing", &series);
        assert_eq!(chart.option["yAxis"]["name"], "BTC");
        assert_eq!(chart.option["series"][0]["data"][0], "1.50000000");
    }
}
