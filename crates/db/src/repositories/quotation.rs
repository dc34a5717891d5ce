use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::Row;

use panelquote_core::domain::bom::BomLineItem;
use panelquote_core::domain::costing::CostBreakdown;

use super::{decode_decimal, decode_quantity, QuotationRepository, RepositoryError};
use crate::DbPool;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuotationStatus {
    Draft,
    Sent,
    Accepted,
    Rejected,
}

impl QuotationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            QuotationStatus::Draft => "draft",
            QuotationStatus::Sent => "sent",
            QuotationStatus::Accepted => "accepted",
            QuotationStatus::Rejected => "rejected",
        }
    }
}

impl std::str::FromStr for QuotationStatus {
    type Err = RepositoryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "draft" => Ok(Self::Draft),
            "sent" => Ok(Self::Sent),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            other => Err(RepositoryError::Decode(format!("unknown quotation status `{other}`"))),
        }
    }
}

/// Input for persisting one estimated quotation.
#[derive(Clone, Debug)]
pub struct NewQuotation {
    pub customer_name: String,
    pub customer_address: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub tax_number: String,
    pub panel_type: String,
    pub panel_size: String,
    pub busbar_type: String,
    pub brand_preference: String,
    pub ip_rating: String,
    pub feeder_count: u32,
    pub motor_count: u32,
    pub special_requirements: String,
    pub items: Vec<BomLineItem>,
    pub breakdown: CostBreakdown,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationRecord {
    pub id: i64,
    pub quotation_number: String,
    pub customer_name: String,
    pub customer_address: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub tax_number: String,
    pub panel_type: String,
    pub panel_size: String,
    pub busbar_type: String,
    pub brand_preference: String,
    pub ip_rating: String,
    pub feeder_count: u32,
    pub motor_count: u32,
    pub special_requirements: String,
    pub material_cost: Decimal,
    pub production_cost: Decimal,
    pub profit_margin: Decimal,
    pub tax_percentage: Decimal,
    pub final_amount: Decimal,
    pub status: QuotationStatus,
    pub created_at: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationWithItems {
    pub quotation: QuotationRecord,
    pub items: Vec<BomLineItem>,
}

pub struct SqlQuotationRepository {
    pool: DbPool,
}

impl SqlQuotationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Quotation numbers count up per calendar year: `YYYY/QUO/NNN`.
    async fn next_quotation_number(&self, year: i32) -> Result<String, RepositoryError> {
        let prefix = format!("{year}/QUO/");
        let last: Option<String> = sqlx::query_scalar(
            "SELECT quotation_number FROM quotations
             WHERE quotation_number LIKE ?
             ORDER BY id DESC LIMIT 1",
        )
        .bind(format!("{prefix}%"))
        .fetch_optional(&self.pool)
        .await?;

        let counter = last
            .as_deref()
            .and_then(|number| number.rsplit('/').next())
            .and_then(|suffix| suffix.parse::<u32>().ok())
            .map_or(1, |current| current + 1);

        Ok(format!("{prefix}{counter:03}"))
    }
}

fn record_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<QuotationRecord, RepositoryError> {
    Ok(QuotationRecord {
        id: row.get("id"),
        quotation_number: row.get("quotation_number"),
        customer_name: row.get("customer_name"),
        customer_address: row.get("customer_address"),
        customer_email: row.get("customer_email"),
        customer_phone: row.get("customer_phone"),
        tax_number: row.get("tax_number"),
        panel_type: row.get("panel_type"),
        panel_size: row.get("panel_size"),
        busbar_type: row.get("busbar_type"),
        brand_preference: row.get("brand_preference"),
        ip_rating: row.get("ip_rating"),
        feeder_count: decode_quantity("feeder_count", row.get::<i64, _>("feeder_count"))?,
        motor_count: decode_quantity("motor_count", row.get::<i64, _>("motor_count"))?,
        special_requirements: row.get("special_requirements"),
        material_cost: decode_decimal("material_cost", &row.get::<String, _>("material_cost"))?,
        production_cost: decode_decimal(
            "production_cost",
            &row.get::<String, _>("production_cost"),
        )?,
        profit_margin: decode_decimal("profit_margin", &row.get::<String, _>("profit_margin"))?,
        tax_percentage: decode_decimal(
            "tax_percentage",
            &row.get::<String, _>("tax_percentage"),
        )?,
        final_amount: decode_decimal("final_amount", &row.get::<String, _>("final_amount"))?,
        status: row.get::<String, _>("status").parse()?,
        created_at: row.get("created_at"),
    })
}

fn item_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<BomLineItem, RepositoryError> {
    Ok(BomLineItem {
        component_code: row.get("component_code"),
        name: row.get("name"),
        category: row
            .get::<String, _>("category")
            .parse()
            .map_err(|error| RepositoryError::Decode(format!("{error}")))?,
        brand: row.get("brand"),
        specifications: row.get("specifications"),
        quantity: decode_quantity("quantity", row.get::<i64, _>("quantity"))?,
        unit_price: decode_decimal("unit_price", &row.get::<String, _>("unit_price"))?,
        unit: row
            .get::<String, _>("unit")
            .parse()
            .map_err(|error| RepositoryError::Decode(format!("{error}")))?,
    })
}

#[async_trait]
impl QuotationRepository for SqlQuotationRepository {
    async fn create(
        &self,
        quotation: NewQuotation,
        year: i32,
    ) -> Result<(i64, String), RepositoryError> {
        let quotation_number = self.next_quotation_number(year).await?;

        // Totals are always recomputed from the lines; a client-supplied
        // figure out of sync with its items must never be persisted.
        let material_cost: Decimal =
            quotation.items.iter().map(BomLineItem::total_price).sum();

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "INSERT INTO quotations (
                quotation_number, customer_name, customer_address, customer_email,
                customer_phone, tax_number, panel_type, panel_size, busbar_type,
                brand_preference, ip_rating, feeder_count, motor_count,
                special_requirements, material_cost, production_cost,
                profit_margin, tax_percentage, final_amount
             ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&quotation_number)
        .bind(&quotation.customer_name)
        .bind(&quotation.customer_address)
        .bind(&quotation.customer_email)
        .bind(&quotation.customer_phone)
        .bind(&quotation.tax_number)
        .bind(&quotation.panel_type)
        .bind(&quotation.panel_size)
        .bind(&quotation.busbar_type)
        .bind(&quotation.brand_preference)
        .bind(&quotation.ip_rating)
        .bind(quotation.feeder_count)
        .bind(quotation.motor_count)
        .bind(&quotation.special_requirements)
        .bind(material_cost.to_string())
        .bind(quotation.breakdown.production_cost.to_string())
        .bind(quotation.breakdown.profit_margin.to_string())
        .bind(quotation.breakdown.tax_percentage.to_string())
        .bind(quotation.breakdown.final_amount.to_string())
        .execute(&mut *tx)
        .await?;

        let quotation_id = result.last_insert_rowid();

        for item in &quotation.items {
            sqlx::query(
                "INSERT INTO quotation_items (
                    quotation_id, component_code, name, category, brand,
                    specifications, quantity, unit_price, total_price, unit
                 ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(quotation_id)
            .bind(&item.component_code)
            .bind(&item.name)
            .bind(item.category.label())
            .bind(&item.brand)
            .bind(&item.specifications)
            .bind(item.quantity)
            .bind(item.unit_price.to_string())
            .bind(item.total_price().to_string())
            .bind(item.unit.label())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok((quotation_id, quotation_number))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<QuotationWithItems>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM quotations WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let quotation = record_from_row(&row)?;

        let item_rows = sqlx::query(
            "SELECT component_code, name, category, brand, specifications,
                    quantity, unit_price, unit
             FROM quotation_items WHERE quotation_id = ? ORDER BY id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let items =
            item_rows.iter().map(item_from_row).collect::<Result<Vec<_>, _>>()?;

        Ok(Some(QuotationWithItems { quotation, items }))
    }

    async fn list(&self, limit: i64) -> Result<Vec<QuotationRecord>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM quotations ORDER BY id DESC LIMIT ?")
            .bind(limit.max(1))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(record_from_row).collect()
    }

    async fn update_status(
        &self,
        id: i64,
        status: QuotationStatus,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query("UPDATE quotations SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM quotations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
