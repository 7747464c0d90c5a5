//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::{Context, Result};
use std::path::Path;

use wordcard_core::report::GradeSheet;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML report from a deck's grade sheets, oldest first.
///
/// The last sheet is reported in full; earlier ones only appear in the
/// score history chart.
pub fn generate_html(history: &[GradeSheet]) -> String {
    let mut html = String::new();
    let latest = history.last();
    let title = latest.map(|s| s.deck_title.as_str()).unwrap_or("no sessions");

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>wordcard grades: {}</title>\n",
        html_escape(title)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    let Some(latest) = latest else {
        html.push_str("<header>\n<h1>wordcard grades</h1>\n");
        html.push_str("<p class=\"meta\">No grade sheets recorded yet.</p>\n</header>\n");
        html.push_str("</body>\n</html>");
        return html;
    };

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&latest.deck_title)));
    html.push_str(&format!(
        "<p class=\"meta\">Mode: <strong>{}</strong> | Track: {} | {} sessions | {}</p>\n",
        html_escape(&latest.mode),
        latest.track,
        history.len(),
        latest.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Score
    let summary = &latest.summary;
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Score</h2>\n");
    html.push_str(&format!(
        "<p class=\"score {}\">{}%</p>\n",
        score_class(summary.percentage),
        summary.percentage
    ));
    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Correct</th><th>Total</th><th>Answered</th><th>Skipped</th><th>Change</th></tr></thead>\n");
    let change = match history.len() {
        0 | 1 => "-".to_string(),
        n => format!("{:+}", latest.delta(&history[n - 2])),
    };
    html.push_str(&format!(
        "<tbody><tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr></tbody>\n",
        summary.correct,
        summary.total,
        summary.answered,
        latest.skipped(),
        change
    ));
    html.push_str("</table>\n");

    if history.len() > 1 {
        html.push_str("<h2>History</h2>\n");
        html.push_str(&generate_history_chart(history));
    }
    html.push_str("</section>\n");

    // Mistakes
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>To review</h2>\n");
    if latest.entries.is_empty() {
        html.push_str("<p>Nothing to review.</p>\n");
    } else {
        html.push_str("<table class=\"results-table\" id=\"results\">\n");
        html.push_str("<thead><tr><th onclick=\"sortTable(0)\">#</th><th onclick=\"sortTable(1)\">Question</th><th onclick=\"sortTable(2)\">Answer</th><th onclick=\"sortTable(3)\">Result</th></tr></thead>\n");
        html.push_str("<tbody>\n");
        for entry in &latest.entries {
            let (class, text) = if entry.skip {
                ("skip", "skipped")
            } else {
                ("fail", "wrong")
            };
            html.push_str(&format!(
                "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                class,
                entry.num_of_question,
                html_escape(&entry.q),
                html_escape(&entry.ans),
                text
            ));
        }
        html.push_str("</tbody></table>\n");
    }
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(latest).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    // JavaScript for sorting
    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(history: &[GradeSheet], path: &Path) -> Result<()> {
    let html = generate_html(history);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}

fn score_class(percentage: u32) -> &'static str {
    if percentage >= 80 {
        "pass"
    } else if percentage >= 50 {
        "warn"
    } else {
        "fail"
    }
}

fn generate_history_chart(history: &[GradeSheet]) -> String {
    let bar_height = 24;
    let max_width = 400;
    let padding = 8;
    let label_width = 160;

    let total_height = history.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, sheet) in history.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let score = sheet.summary.percentage;
        let width = score as usize * max_width / 100;

        let color = match score_class(score) {
            "pass" => "#22c55e",
            "warn" => "#eab308",
            _ => "#ef4444",
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"13\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            sheet.created_at.format("%Y-%m-%d %H:%M")
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{}%</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            score
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #ffffff; --fg: #1f2937; --border: #e5e7eb; --pass: #dcfce7; --warn: #fef9c3; --fail: #fee2e2; --skip: #f3f4f6; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #14532d; --warn: #713f12; --fail: #7f1d1d; --skip: #1f2937; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.score { font-size: 3rem; font-weight: bold; display: inline-block; padding: 0.5rem 1.5rem; border-radius: 8px; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
.pass { background: var(--pass); }
.warn { background: var(--warn); }
.fail { background: var(--fail); }
.skip { background: var(--skip); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('results');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    const na = Number(va), nb = Number(vb);
    const cmp = !isNaN(na) && !isNaN(nb) ? na - nb : va.localeCompare(vb);
    return asc ? cmp : -cmp;
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;
