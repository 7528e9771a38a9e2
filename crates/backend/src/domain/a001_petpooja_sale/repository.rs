use contracts::domain::a001_petpooja_sale::SalesRecord;
use sea_orm::{ConnectionTrait, DatabaseBackend, DbErr, Statement};
use std::path::{Path, PathBuf};

use crate::shared::data::db;

const CREATE_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS sales_data (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        receipt_number TEXT,
        sale_date TEXT,
        transaction_time TEXT,
        sale_amount REAL,
        tax_amount REAL,
        discount_amount REAL,
        round_off REAL,
        net_sale REAL,
        payment_mode TEXT,
        order_type TEXT,
        transaction_status TEXT
    );
"#;

const INSERT_SQL: &str = r#"
    INSERT INTO sales_data
        (receipt_number, sale_date, transaction_time, sale_amount, tax_amount, discount_amount,
         round_off, net_sale, payment_mode, order_type, transaction_status)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
"#;

/// Local SQLite store for sales rows.
///
/// Every call opens its own connection; nothing spans more than one statement,
/// so rows written before a failure stay in place.
#[derive(Debug, Clone)]
pub struct SalesStore {
    db_path: PathBuf,
    db_url: String,
}

impl SalesStore {
    pub fn new(db_file: &Path) -> anyhow::Result<Self> {
        Ok(Self {
            db_path: db::absolute_path(db_file)?,
            db_url: db::database_url(db_file)?,
        })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Create the sales table when it does not exist yet
    pub async fn ensure_schema(&self) -> Result<(), DbErr> {
        let conn = db::connect(&self.db_url).await?;
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            CREATE_TABLE_SQL.to_string(),
        ))
        .await?;
        tracing::info!("Database ensured at '{}'", self.db_path.display());
        Ok(())
    }

    /// Insert one record. Returns 1 when a row was written, 0 on any failure.
    pub async fn insert(&self, record: &SalesRecord) -> u64 {
        match self.try_insert(record).await {
            Ok(affected) if affected > 0 => 1,
            Ok(_) => {
                tracing::warn!(
                    "Insert of receipt '{}' affected no rows",
                    record.receipt_number
                );
                0
            }
            Err(e) => {
                tracing::error!("DB insert error: {}", e);
                if let Ok(json) = serde_json::to_string(record) {
                    tracing::debug!("Rejected record: {}", json);
                }
                0
            }
        }
    }

    async fn try_insert(&self, record: &SalesRecord) -> Result<u64, DbErr> {
        let conn = db::connect(&self.db_url).await?;
        let stmt = Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            INSERT_SQL,
            vec![
                null_if_empty(&record.receipt_number).into(),
                null_if_empty(&record.sale_date).into(),
                null_if_empty(&record.transaction_time).into(),
                record.sale_amount.into(),
                record.tax_amount.into(),
                record.discount_amount.into(),
                record.round_off.into(),
                record.net_sale.into(),
                null_if_empty(&record.payment_mode).into(),
                null_if_empty(&record.order_type).into(),
                null_if_empty(&record.transaction_status).into(),
            ],
        );
        let result = conn.execute(stmt).await?;
        Ok(result.rows_affected())
    }

    /// Number of rows in the sales table
    pub async fn count(&self) -> Result<i64, DbErr> {
        let conn = db::connect(&self.db_url).await?;
        let row = conn
            .query_one(Statement::from_string(
                DatabaseBackend::Sqlite,
                "SELECT COUNT(*) AS cnt FROM sales_data".to_string(),
            ))
            .await?;
        match row {
            Some(row) => row.try_get("", "cnt"),
            None => Ok(0),
        }
    }
}

fn null_if_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
