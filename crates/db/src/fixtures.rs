//! Deterministic seed dataset for development and tests.
//!
//! Components are inserted from `StaticCatalog::entries()`, never from a
//! second table, so the catalog-backed estimation path prices exactly as
//! the catalog-free fallback does.

use sqlx::Row;
use tracing::info;

use panelquote_core::catalog::StaticCatalog;
use panelquote_core::domain::panel::PanelType;

use crate::repositories::RepositoryError;
use crate::DbPool;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeedResult {
    pub components_seeded: u64,
    pub panel_types_seeded: u64,
    pub rules_seeded: u64,
}

#[derive(Clone, Debug, Default)]
pub struct VerificationResult {
    pub all_present: bool,
    pub checks: Vec<(&'static str, bool)>,
}

pub struct SeedDataset;

const PANEL_TYPE_ROWS: &[(&str, &str, &str)] = &[
    ("MCC", "MCC Panel", "Motor Control Center"),
    ("PCC", "PCC Panel", "Power Control Center"),
    ("LT", "LT Panel", "Low Tension Panel"),
    ("VFD", "VFD Panel", "Variable Frequency Drive Panel"),
    ("APFC", "APFC Panel", "Automatic Power Factor Correction"),
    ("PLC", "PLC Panel", "Programmable Logic Controller Panel"),
];

impl SeedDataset {
    pub async fn load(pool: &DbPool) -> Result<SeedResult, RepositoryError> {
        let mut result = SeedResult::default();

        for (code, name, description) in PANEL_TYPE_ROWS {
            let inserted = sqlx::query(
                "INSERT OR IGNORE INTO panel_types (panel_code, name, description)
                 VALUES (?, ?, ?)",
            )
            .bind(code)
            .bind(name)
            .bind(description)
            .execute(pool)
            .await?;
            result.panel_types_seeded += inserted.rows_affected();
        }

        for entry in StaticCatalog::entries() {
            let inserted = sqlx::query(
                "INSERT OR IGNORE INTO components
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
            .execute(pool)
            .await?;
            result.components_seeded += inserted.rows_affected();
        }

        let existing_rules: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM bom_rules").fetch_one(pool).await?;
        if existing_rules == 0 {
            for panel_type in PanelType::ALL {
                for rule in StaticCatalog::default_rules(panel_type) {
                    let inserted = sqlx::query(
                        "INSERT INTO bom_rules
                            (panel_type_id, component_id, quantity_rule, base_quantity, is_mandatory)
                         SELECT pt.id, c.id, ?, ?, ?
                         FROM panel_types pt, components c
                         WHERE pt.panel_code = ? AND c.component_code = ?",
                    )
                    .bind(rule.quantity_rule.label())
                    .bind(rule.base_quantity)
                    .bind(i64::from(rule.mandatory))
                    .bind(panel_type.code())
                    .bind(&rule.component_code)
                    .execute(pool)
                    .await?;
                    result.rules_seeded += inserted.rows_affected();
                }
            }
        }

        info!(
            components = result.components_seeded,
            panel_types = result.panel_types_seeded,
            rules = result.rules_seeded,
            "seed dataset loaded"
        );

        Ok(result)
    }

    pub async fn verify(pool: &DbPool) -> Result<VerificationResult, RepositoryError> {
        let component_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM components").fetch_one(pool).await?;
        let panel_type_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM panel_types").fetch_one(pool).await?;
        let rule_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM bom_rules").fetch_one(pool).await?;

        // Dangling rules would silently shrink rule-driven BOMs.
        let dangling_rules: i64 = sqlx::query(
            "SELECT COUNT(*) AS count FROM bom_rules br
             LEFT JOIN components c ON br.component_id = c.id
             WHERE c.id IS NULL",
        )
        .fetch_one(pool)
        .await?
        .get("count");

        let expected_components = StaticCatalog::entries().len() as i64;
        let checks = vec![
            ("components-present", component_count >= expected_components),
            ("panel-types-present", panel_type_count >= PANEL_TYPE_ROWS.len() as i64),
            ("mcc-rules-present", rule_count >= 4),
            ("rules-reference-components", dangling_rules == 0),
        ];
        let all_present = checks.iter().all(|(_, passed)| *passed);

        Ok(VerificationResult { all_present, checks })
    }
}

#[cfg(test)]
mod tests {
    use super::SeedDataset;
    use crate::{connect_with_settings, migrations};

    #[tokio::test]
    async fn seed_load_is_idempotent() {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        migrations::run_pending(&pool).await.expect("migrate");

        let first = SeedDataset::load(&pool).await.expect("first load");
        assert!(first.components_seeded > 0);
        assert_eq!(first.panel_types_seeded, 6);
        assert_eq!(first.rules_seeded, 4);

        let second = SeedDataset::load(&pool).await.expect("second load");
        assert_eq!(second.components_seeded, 0, "re-seeding must not duplicate components");
        assert_eq!(second.panel_types_seeded, 0);
        assert_eq!(second.rules_seeded, 0);
    }

    #[tokio::test]
    async fn verification_passes_on_a_seeded_database() {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        migrations::run_pending(&pool).await.expect("migrate");
        SeedDataset::load(&pool).await.expect("seed");

        let verification = SeedDataset::verify(&pool).await.expect("verify");
        assert!(verification.all_present, "failed checks: {:?}", verification.checks);
    }

    #[tokio::test]
    async fn verification_fails_on_an_empty_database() {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        migrations::run_pending(&pool).await.expect("migrate");

        let verification = SeedDataset::verify(&pool).await.expect("verify");
        assert!(!verification.all_present);
    }
}
