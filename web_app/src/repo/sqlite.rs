use crate::models;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{FromRow, Row, SqlitePool, sqlite::SqliteRow};

use super::{AppRepo, sqlite_queries};

#[derive(Clone)]
pub struct SqlxSqliteRepo {
    pub db_pool: SqlitePool,
}

/// An unknown `estado` is a corrupt row, never a pending order
fn decode_status(raw: &str) -> sqlx::Result<models::order::OrderStatus> {
    raw.parse::<models::order::OrderStatus>()
        .map_err(|e| sqlx::Error::Decode(e.into()))
}

impl FromRow<'_, SqliteRow> for models::order::OrderRecord {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            code: row.try_get("codigo")?,
            plan_description: row.try_get("plan_descripcion")?,
            amount: row.try_get("monto")?,
            customer_name: row.try_get("cliente_nombre")?,
            customer_phone: row.try_get("cliente_celular")?,
            customer_email: row.try_get("cliente_email")?,
            headcount: row.try_get("num_personas")?,
            sold_at: row.try_get("fecha_venta")?,
            visit_date: row.try_get("fecha_visita")?,
            expires_on: row.try_get("fecha_vencimiento")?,
            status: decode_status(&row.try_get::<String, &str>("estado")?)?,
            payment_method: row.try_get("metodo_pago")?,
            sales_agent: row.try_get("agente_nombre")?,
            detail_json: row.try_get("detalle_json")?,
        })
    }
}

#[async_trait]
impl AppRepo for SqlxSqliteRepo {
    async fn get_config_value(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(sqlx::query_scalar(sqlite_queries::QUERY_GET_CONFIG_VALUE)
            .bind(key)
            .fetch_optional(&self.db_pool)
            .await?)
    }

    async fn get_config_values_by_prefix(
        &self,
        prefix: &str,
    ) -> anyhow::Result<Vec<(String, String)>> {
        Ok(
            sqlx::query(sqlite_queries::QUERY_GET_CONFIG_VALUES_BY_PREFIX)
                .bind(prefix)
                .map(|row: SqliteRow| {
                    (
                        row.try_get("clave").unwrap_or_default(),
                        row.try_get("valor").unwrap_or_default(),
                    )
                })
                .fetch_all(&self.db_pool)
                .await?,
        )
    }

    async fn order_code_exists(&self, code: &str) -> anyhow::Result<bool> {
        let exists: i64 = sqlx::query_scalar(sqlite_queries::QUERY_ORDER_CODE_EXISTS)
            .bind(code)
            .fetch_one(&self.db_pool)
            .await?;

        Ok(exists > 0)
    }

    async fn insert_pending_order(
        &self,
        order: &models::order::OrderRecord,
    ) -> anyhow::Result<()> {
        Ok(sqlx::query(sqlite_queries::QUERY_INSERT_PENDING_ORDER)
            .bind(&order.code)
            .bind(&order.plan_description)
            .bind(order.amount)
            .bind(&order.customer_name)
            .bind(&order.customer_phone)
            .bind(&order.customer_email)
            .bind(order.headcount)
            .bind(order.sold_at)
            .bind(order.visit_date)
            .bind(order.expires_on)
            .bind(order.status.to_string())
            .bind(&order.payment_method)
            .bind(&order.sales_agent)
            .bind(&order.detail_json)
            .execute(&self.db_pool)
            .await
            .map(|_| ())?)
    }

    async fn delete_pending_order(&self, code: &str) -> anyhow::Result<u64> {
        Ok(sqlx::query(sqlite_queries::QUERY_DELETE_PENDING_ORDER)
            .bind(code)
            .bind(models::order::OrderStatus::PendingPayment.to_string())
            .execute(&self.db_pool)
            .await?
            .rows_affected())
    }

    async fn update_pending_order_status(
        &self,
        code: &str,
        status: &models::order::OrderStatus,
    ) -> anyhow::Result<u64> {
        Ok(
            sqlx::query(sqlite_queries::QUERY_UPDATE_PENDING_ORDER_STATUS)
                .bind(status.to_string())
                .bind(Utc::now())
                .bind(code)
                .bind(models::order::OrderStatus::PendingPayment.to_string())
                .execute(&self.db_pool)
                .await?
                .rows_affected(),
        )
    }

    async fn get_order_by_code(
        &self,
        code: &str,
    ) -> anyhow::Result<Option<models::order::OrderRecord>> {
        Ok(
            sqlx::query_as::<_, models::order::OrderRecord>(
                sqlite_queries::QUERY_GET_ORDER_BY_CODE,
            )
            .bind(code)
            .fetch_optional(&self.db_pool)
            .await?,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::OrderStatus;

    #[test]
    fn test_decode_status() {
        assert_eq!(decode_status("PAGADO").unwrap(), OrderStatus::Paid);
        assert_eq!(
            decode_status("PENDIENTE_PAGO").unwrap(),
            OrderStatus::PendingPayment
        );
        assert!(matches!(
            decode_status("REEMBOLSADO"),
            Err(sqlx::Error::Decode(_))
        ));
    }
}
