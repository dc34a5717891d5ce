//! Quotation document rendering.
//!
//! Quotations render through an HTML template; when `wkhtmltopdf` is on
//! the PATH the HTML is converted to PDF, otherwise the HTML itself is
//! served and the browser handles printing.

use std::collections::HashMap;
use std::process::Stdio;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use tera::{Context, Tera};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{info, warn};

use panelquote_db::repositories::QuotationWithItems;

use crate::words::amount_in_words;

const QUOTATION_TEMPLATE: &str = include_str!("../templates/quotation.html");

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("template error: {0}")]
    Template(String),
    #[error("conversion error: {0}")]
    Conversion(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub enum RenderedDocument {
    Pdf(Vec<u8>),
    Html(String),
}

/// Simple money filter: formats a number to 2 decimal places.
/// Usage: `amount | money`
fn tera_money_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let num = match value {
        tera::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        tera::Value::Null => 0.0,
        _ => 0.0,
    };
    Ok(tera::Value::String(format!("{num:.2}")))
}

pub struct DocumentRenderer {
    tera: Tera,
    wkhtmltopdf_path: Option<String>,
}

#[derive(Serialize)]
struct ItemContext {
    name: String,
    specifications: String,
    brand: String,
    quantity: u32,
    unit: &'static str,
    unit_price: f64,
    total_price: f64,
}

impl DocumentRenderer {
    pub fn new() -> Result<Self, DocumentError> {
        let mut tera = Tera::default();
        tera.add_raw_template("quotation.html", QUOTATION_TEMPLATE)
            .map_err(|error| DocumentError::Template(error.to_string()))?;
        tera.register_filter("money", tera_money_filter);

        let wkhtmltopdf_path =
            which::which("wkhtmltopdf").ok().map(|path| path.to_string_lossy().to_string());

        match &wkhtmltopdf_path {
            Some(path) => info!(path = %path, "wkhtmltopdf found"),
            None => warn!(
                "wkhtmltopdf not found in PATH - quotation documents will be served as HTML"
            ),
        }

        Ok(Self { tera, wkhtmltopdf_path })
    }

    pub fn render_html(&self, quotation: &QuotationWithItems) -> Result<String, DocumentError> {
        let record = &quotation.quotation;

        let items: Vec<ItemContext> = quotation
            .items
            .iter()
            .map(|item| ItemContext {
                name: item.name.clone(),
                specifications: item.specifications.clone(),
                brand: item.brand.clone(),
                quantity: item.quantity,
                unit: item.unit.label(),
                unit_price: item.unit_price.to_f64().unwrap_or(0.0),
                total_price: item.total_price().to_f64().unwrap_or(0.0),
            })
            .collect();

        let total_cost = record.material_cost + record.production_cost;
        let price_before_tax =
            total_cost * (Decimal::ONE + record.profit_margin / Decimal::ONE_HUNDRED);
        let tax_amount = record.final_amount - price_before_tax;

        let mut context = Context::new();
        context.insert("quotation_number", &record.quotation_number);
        context.insert("quotation_date", &record.created_at);
        context.insert("customer_name", &record.customer_name);
        context.insert("customer_address", &record.customer_address);
        context.insert("customer_email", &record.customer_email);
        context.insert("customer_phone", &record.customer_phone);
        context.insert("tax_number", &record.tax_number);
        context.insert("panel_type", &record.panel_type);
        context.insert("panel_size", &record.panel_size);
        context.insert("busbar_type", &record.busbar_type);
        context.insert("ip_rating", &record.ip_rating);
        context.insert("feeder_count", &record.feeder_count);
        context.insert("motor_count", &record.motor_count);
        context.insert("special_requirements", &record.special_requirements);
        context.insert("items", &items);
        context.insert("material_cost", &record.material_cost.to_f64().unwrap_or(0.0));
        context.insert("production_cost", &record.production_cost.to_f64().unwrap_or(0.0));
        context.insert("total_cost", &total_cost.to_f64().unwrap_or(0.0));
        context.insert("profit_margin", &record.profit_margin.to_f64().unwrap_or(0.0));
        context.insert("price_before_tax", &price_before_tax.to_f64().unwrap_or(0.0));
        context.insert("tax_percentage", &record.tax_percentage.to_f64().unwrap_or(0.0));
        context.insert("tax_amount", &tax_amount.to_f64().unwrap_or(0.0));
        context.insert("final_amount", &record.final_amount.to_f64().unwrap_or(0.0));
        context.insert("amount_in_words", &amount_in_words(record.final_amount));

        self.tera
            .render("quotation.html", &context)
            .map_err(|error| DocumentError::Template(error.to_string()))
    }

    pub async fn render(
        &self,
        quotation: &QuotationWithItems,
    ) -> Result<RenderedDocument, DocumentError> {
        let html = self.render_html(quotation)?;

        let Some(path) = &self.wkhtmltopdf_path else {
            return Ok(RenderedDocument::Html(html));
        };

        match convert_to_pdf(path, &html).await {
            Ok(pdf) => Ok(RenderedDocument::Pdf(pdf)),
            Err(error) => {
                warn!(error = %error, "pdf conversion failed; serving HTML instead");
                Ok(RenderedDocument::Html(html))
            }
        }
    }
}

async fn convert_to_pdf(wkhtmltopdf: &str, html: &str) -> Result<Vec<u8>, DocumentError> {
    let mut child = Command::new(wkhtmltopdf)
        .args(["--quiet", "--encoding", "utf-8", "-", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    if let Some(stdin) = child.stdin.as_mut() {
        stdin.write_all(html.as_bytes()).await?;
    }
    drop(child.stdin.take());

    let output = child.wait_with_output().await?;
    if !output.status.success() {
        return Err(DocumentError::Conversion(format!(
            "wkhtmltopdf exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr)
        )));
    }

    Ok(output.stdout)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rust_decimal::Decimal;

    use panelquote_core::catalog::StaticCatalog;
    use panelquote_core::domain::panel::{PanelConfiguration, PanelType};
    use panelquote_core::engine::Estimator;
    use panelquote_db::repositories::{
        QuotationRecord, QuotationStatus, QuotationWithItems,
    };

    use super::{tera_money_filter, DocumentRenderer};

    fn quotation_fixture() -> QuotationWithItems {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime");
        let estimation = runtime
            .block_on(
                Estimator::new(StaticCatalog)
                    .estimate(&PanelConfiguration::standard(PanelType::Mcc)),
            )
            .expect("estimate");
        let breakdown = &estimation.cost_breakdown;

        QuotationWithItems {
            quotation: QuotationRecord {
                id: 1,
                quotation_number: "2026/QUO/001".to_string(),
                customer_name: "Acme Switchgear".to_string(),
                customer_address: "Plot 12, Industrial Estate".to_string(),
                customer_email: "purchase@acme.example".to_string(),
                customer_phone: "98200 00000".to_string(),
                tax_number: "27AAACA0000A1Z5".to_string(),
                panel_type: "MCC".to_string(),
                panel_size: "800x800x300".to_string(),
                busbar_type: "copper".to_string(),
                brand_preference: "schneider".to_string(),
                ip_rating: "IP55".to_string(),
                feeder_count: 4,
                motor_count: 1,
                special_requirements: String::new(),
                material_cost: breakdown.material_cost,
                production_cost: breakdown.production_cost,
                profit_margin: breakdown.profit_margin,
                tax_percentage: breakdown.tax_percentage,
                final_amount: breakdown.final_amount,
                status: QuotationStatus::Draft,
                created_at: "2026-08-06 10:00:00".to_string(),
            },
            items: estimation.bom_items,
        }
    }

    #[test]
    fn rendered_document_carries_quotation_lines_and_totals() {
        let renderer = DocumentRenderer::new().expect("renderer");
        let quotation = quotation_fixture();

        let html = renderer.render_html(&quotation).expect("render");

        assert!(html.contains("2026/QUO/001"));
        assert!(html.contains("Acme Switchgear"));
        assert!(html.contains("Terminal Block"));
        assert!(html.contains("Rupees"), "amount in words missing");
        assert!(
            html.contains(&format!(
                "{:.2}",
                quotation.quotation.final_amount.to_string().parse::<f64>().expect("final")
            )),
            "final amount missing from document"
        );
    }

    #[test]
    fn money_filter_formats_to_two_decimals() {
        let value = tera::Value::Number(serde_json::Number::from_f64(45.5).expect("number"));
        let formatted = tera_money_filter(&value, &HashMap::new()).expect("filter");
        assert_eq!(formatted, tera::Value::String("45.50".to_string()));

        let null = tera_money_filter(&tera::Value::Null, &HashMap::new()).expect("filter");
        assert_eq!(null, tera::Value::String("0.00".to_string()));
    }

    #[test]
    fn missing_optional_customer_fields_render_without_error() {
        let renderer = DocumentRenderer::new().expect("renderer");
        let mut quotation = quotation_fixture();
        quotation.quotation.customer_email = String::new();
        quotation.quotation.customer_phone = String::new();
        quotation.quotation.tax_number = String::new();

        let html = renderer.render_html(&quotation).expect("render");
        assert!(html.contains("Acme Switchgear"));
    }

    #[test]
    fn zero_amount_document_renders_zero_words() {
        let renderer = DocumentRenderer::new().expect("renderer");
        let mut quotation = quotation_fixture();
        quotation.items.clear();
        quotation.quotation.material_cost = Decimal::ZERO;
        quotation.quotation.production_cost = Decimal::ZERO;
        quotation.quotation.final_amount = Decimal::ZERO;

        let html = renderer.render_html(&quotation).expect("render");
        assert!(html.contains("Zero"));
    }
}
