use crate::core::{industry_label, SimulationReport};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

pub const CHART_TITLE: &str = "Projected Financial Growth";
const CHART_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Formats a thousands figure as `$1,234.56K`.
pub fn format_thousands(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}${}.{}K", sign, grouped, cents)
}

pub fn render(report: &SimulationReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

pub fn render_text(report: &SimulationReport) -> String {
    let mut out = String::new();
    let result = &report.result;

    // write! into a String cannot fail
    let _ = writeln!(out, "🛩️ Digital Twin Business Simulator ({} preset)", report.preset);
    let _ = writeln!(out);

    if let Some(quote) = &report.quote {
        match &quote.warning {
            Some(warning) => {
                let _ = writeln!(out, "⚠️ {}", warning);
            }
            None => {
                let _ = writeln!(
                    out,
                    "💲 Live rate for {}: ${:.2}/hr",
                    industry_label(&quote.industry_code),
                    quote.rate
                );
            }
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "📈 Business Impact");
    let _ = writeln!(
        out,
        "  Projected Profit Margin: {}",
        format_thousands(result.profit_margin)
    );
    let _ = writeln!(
        out,
        "  Estimated Valuation:     {}",
        format_thousands(result.valuation)
    );
    let _ = writeln!(out);

    out.push_str(&render_chart(report));
    let _ = writeln!(out);
    let _ = writeln!(out, "✅ Adjust the inputs to see different business outcomes!");

    out
}

/// One bar per projection point, scaled to the largest value.
pub fn render_chart(report: &SimulationReport) -> String {
    let points = &report.result.projection;
    let max = points.iter().map(|p| p.value).fold(0.0_f64, f64::max);
    let label_width = points.iter().map(|p| p.label.len()).max().unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(out, "{} (Profit Margin, $K)", CHART_TITLE);
    for point in points {
        let bar_len = if max > 0.0 {
            ((point.value.max(0.0) / max) * CHART_WIDTH as f64).round() as usize
        } else {
            0
        };
        let _ = writeln!(
            out,
            "  {:<width$} │{} {}",
            point.label,
            "█".repeat(bar_len),
            format_thousands(point.value),
            width = label_width
        );
    }
    out
}
