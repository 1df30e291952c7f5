//! Plain-text rendering of a price estimate.

use crate::features::RawSpec;
use crate::predictor::PredictionResult;
use serde::Serialize;
use std::fmt;

/// Format a price with a currency symbol and comma thousands separators.
pub fn format_price(price: u64, currency_symbol: &str) -> String {
    let digits = price.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{currency_symbol}{grouped}")
}

/// Render a form decimal the way the form shows it: at least one fractional digit.
fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Headline figure with its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub label: &'static str,
    pub value: String,
}

/// The rendered estimate: headline metrics plus a restatement of every selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceSummary {
    /// Formatted estimated price
    price: String,

    /// Screen size and RAM
    metrics: Vec<Metric>,

    /// Selected configuration, as (title, value) lines
    configuration: Vec<(&'static str, String)>,
}

impl PriceSummary {
    pub fn new(spec: &RawSpec, prediction: &PredictionResult, currency_symbol: &str) -> Self {
        let metrics = vec![
            Metric {
                label: "Screen Size",
                value: format!("{:.1}\"", spec.screen_size),
            },
            Metric {
                label: "RAM",
                value: format!("{} GB", spec.ram),
            },
        ];

        let mut display = vec![
            format!("{}\"", format_decimal(spec.screen_size)),
            spec.resolution.to_string(),
        ];
        if spec.touchscreen.as_flag() == 1 {
            display.push("Touchscreen".to_string());
        }
        if spec.ips.as_flag() == 1 {
            display.push("IPS".to_string());
        }

        let configuration = vec![
            ("Brand", spec.brand.clone()),
            ("Type", spec.form_factor.clone()),
            ("CPU", spec.cpu_brand.clone()),
            ("GPU", spec.gpu_brand.clone()),
            ("Storage", format!("SSD: {}GB, HDD: {}GB", spec.ssd, spec.hdd)),
            ("Display", display.join(" ")),
            ("OS", spec.os.clone()),
            ("Weight", format!("{} kg", format_decimal(spec.weight))),
        ];

        Self {
            price: format_price(prediction.price, currency_symbol),
            metrics,
            configuration,
        }
    }

    /// The formatted price.
    pub fn price(&self) -> &str {
        &self.price
    }

    /// Echoed screen size and RAM.
    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    /// Restated selections, in display order.
    pub fn configuration(&self) -> &[(&'static str, String)] {
        &self.configuration
    }
}

impl fmt::Display for PriceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Price Prediction")?;
        writeln!(f, "  {:<16}{}", "Estimated Price", self.price)?;
        for metric in &self.metrics {
            writeln!(f, "  {:<16}{}", metric.label, metric.value)?;
        }
        writeln!(f)?;
        writeln!(f, "Configuration Summary")?;
        for (title, value) in &self.configuration {
            writeln!(f, "  {:<16}{}", title, value)?;
        }
        Ok(())
    }
}
