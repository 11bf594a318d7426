// @file: oi_chart/src/chart/render.rs
// @description: Writes a figure to a standalone HTML page and hands it to the system viewer.
// @author: LAS.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use log::{info, warn};
use serde::Serialize;
use crate::chart::figure::Figure;
use crate::core::errors::AppError;


//
// CONSTANTS
//

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";


//
// PUBLIC INTERFACE
//

pub fn to_html(figure: &Figure) -> Result<String, AppError> {
    let data: String = script_safe_json(&figure.data)?;
    let layout: String = script_safe_json(&figure.layout)?;

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{cdn}"></script>
</head>
<body>
<div id="chart" style="width:100%;height:95vh;"></div>
<script>
Plotly.newPlot("chart", {data}, {layout});
</script>
</body>
</html>
"#,
        title = escape_html(&figure.layout.title.text),
        cdn = PLOTLY_CDN,
        data = data,
        layout = layout,
    ))
}

pub fn write_html(figure: &Figure, path: impl AsRef<Path>) -> Result<PathBuf, AppError> {
    let path: &Path = path.as_ref();
    fs::write(path, to_html(figure)?)?;

    info!("Chart written to {}", path.display());
    Ok(path.to_path_buf())
}

/// Best effort: a missing viewer is reported, not fatal.
pub fn open_in_viewer(path: &Path) {
    let mut command: Command = viewer_command(path);

    match command.status() {
        Ok(status) if status.success() => info!("Opened {} in the system viewer", path.display()),
        Ok(status) => warn!("Viewer exited with {} for {}", status, path.display()),
        Err(e) => warn!("Could not launch viewer for {}: {}", path.display(), e),
    }
}


//
// INTERNAL HELPERS
//

// `<` never occurs outside JSON strings, so `\u003c` keeps the value intact and `</script>` out of the page.
fn script_safe_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    Ok(serde_json::to_string(value)?.replace('<', "\\u003c"))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn viewer_command(path: &Path) -> Command {
    if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]).arg(path);
        cmd
    } else if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    }
}
