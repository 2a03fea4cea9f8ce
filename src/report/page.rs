//! HTML page composition: all charts on one self-contained report page.

use super::charts::Chart;
use std::path::Path;

const ECHARTS_CDN: &str = "https://cdn.jsdelivr.net/npm/echarts@5.5.0/dist/echarts.min.js";

#[derive(Debug)]
pub enum ReportError {
    Io(std::io::Error),
    Serialization(serde_json::Error),
}

impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        ReportError::Io(err)
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::Serialization(err)
    }
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::Io(e) => write!(f, "IO error: {}", e),
            ReportError::Serialization(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl std::error::Error for ReportError {}

/// Render all charts into a single HTML document.
pub fn render_page(charts: &[Chart]) -> Result<String, ReportError> {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Routing Report</title>\n");
    html.push_str(&format!("<script src=\"{}\"></script>\n", ECHARTS_CDN));
    html.push_str("</head>\n<body style=\"display:flex;flex-wrap:wrap;\">\n");

    for index in 0..charts.len() {
        html.push_str(&format!(
            "<div id=\"chart-{}\" style=\"width:900px;height:500px;\"></div>\n",
            index
        ));
    }

    html.push_str("<script>\n");
    for (index, chart) in charts.iter().enumerate() {
        let option = serde_json::to_string(&chart.option)?;
        html.push_str(&format!(
            "echarts.init(document.getElementById(\"chart-{}\")).setOption({});\n",
            index, option
        ));
    }
    html.push_str("</script>\n</body>\n</html>\n");

    Ok(html)
}

/// Compose the report and write it to `path`.
pub fn write_report(path: &Path, charts: &[Chart]) -> Result<(), ReportError> {
    let html = render_page(charts)?;
    std::fs::write(path, html)?;
    log::info!("📝 Report written to: {}", path.display());
    Ok(())
}
