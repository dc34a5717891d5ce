use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::Row;

use panelquote_core::domain::component::ComponentCatalogEntry;

use super::{decode_decimal, ComponentRepository, RepositoryError};
use crate::DbPool;

#[derive(Clone, Debug, Default)]
pub struct ComponentFilter {
    pub category: Option<String>,
    pub brand: Option<String>,
}

pub struct SqlComponentRepository {
    pool: DbPool,
}

impl SqlComponentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn entry_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<ComponentCatalogEntry, RepositoryError> {
    let raw_category = row.get::<String, _>("category");
    let raw_unit = row.get::<String, _>("stock_unit");
    let raw_price = row.get::<String, _>("unit_price");

    Ok(ComponentCatalogEntry {
        code: row.get("component_code"),
        name: row.get("name"),
        category: raw_category
            .parse()
            .map_err(|error| RepositoryError::Decode(format!("{error}")))?,
        brand: row.get("brand"),
        specifications: row.get("specifications"),
        unit_price: decode_decimal("unit_price", &raw_price)?,
        stock_unit: raw_unit
            .parse()
            .map_err(|error| RepositoryError::Decode(format!("{error}")))?,
    })
}

#[async_trait]
impl ComponentRepository for SqlComponentRepository {
    async fn find_by_code(
        &self,
        code: &str,
    ) -> Result<Option<ComponentCatalogEntry>, RepositoryError> {
        let row = sqlx::query(
            "SELECT component_code, name, category, brand, specifications, unit_price, stock_unit
             FROM components WHERE component_code = ?",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(entry_from_row).transpose()
    }

    async fn list(
        &self,
        filter: super::ComponentFilter,
    ) -> Result<Vec<ComponentCatalogEntry>, RepositoryError> {
        let mut sql = String::from(
            "SELECT component_code, name, category, brand, specifications, unit_price, stock_unit
             FROM components",
        );
        let mut clauses = Vec::new();
        if filter.category.is_some() {
            clauses.push("category = ?");
        }
        if filter.brand.is_some() {
            clauses.push("brand = ?");
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY category, name");

        let mut query = sqlx::query(&sql);
        if let Some(category) = &filter.category {
            query = query.bind(category);
        }
        if let Some(brand) = &filter.brand {
            query = query.bind(brand);
        }

        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(entry_from_row).collect()
    }

    async fn insert(&self, entry: &ComponentCatalogEntry) -> Result<i64, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO components
                (component_code, name, category, brand, specifications, unit_price, stock_unit)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&entry.code)
        .bind(&entry.name)
        .bind(entry.category.label())
        .bind(&entry.brand)
        .bind(&entry.specifications)
        .bind(entry.unit_price.to_string())
        .bind(entry.stock_unit.label())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn update_price(
        &self,
        code: &str,
        unit_price: Decimal,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "UPDATE components
             SET unit_price = ?, updated_at = datetime('now')
             WHERE component_code = ?",
        )
        .bind(unit_price.to_string())
        .bind(code)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
