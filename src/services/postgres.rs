use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use uuid::Uuid;

use crate::models::{Coordinate, ProviderService, Review, ServiceCategory};
use crate::services::catalog::{check_review_rating, CatalogError, ServiceCatalog};

const SERVICE_COLUMNS: &str = r#"
    s.id, s.provider_id, p.display_name AS provider_name, s.name,
    c.name AS category, s.price_per_hour, p.latitude, p.longitude,
    s.average_rating, s.total_reviews, s.is_active
"#;

/// PostgreSQL-backed service catalog
///
/// Services hang off provider rows that carry the provider's location.
/// Rating aggregates are stored on the service row and recomputed from the
/// reviews table whenever a review is recorded.
pub struct PostgresCatalog {
    pool: PgPool,
}

impl PostgresCatalog {
    /// Create a new catalog from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, CatalogError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new catalog from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, CatalogError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    async fn fetch_service(&self, id: Uuid) -> Result<ProviderService, CatalogError> {
        let query = format!(
            r#"
            SELECT {SERVICE_COLUMNS}
            FROM provider_services s
            JOIN providers p ON p.id = s.provider_id
            JOIN service_categories c ON c.id = s.category_id
            WHERE s.id = $1
            "#
        );

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("Service {} not found", id)))?;

        service_from_row(&row)
    }
}

fn service_from_row(row: &PgRow) -> Result<ProviderService, CatalogError> {
    let total_reviews: i32 = row.try_get("total_reviews")?;

    Ok(ProviderService {
        id: row.try_get("id")?,
        provider_id: row.try_get("provider_id")?,
        provider_name: row.try_get("provider_name")?,
        name: row.try_get("name")?,
        category: row.try_get("category")?,
        price_per_hour: row.try_get::<Decimal, _>("price_per_hour")?,
        location: Coordinate::new(row.try_get("latitude")?, row.try_get("longitude")?),
        average_rating: row.try_get("average_rating")?,
        total_reviews: total_reviews.max(0) as u32,
        is_active: row.try_get("is_active")?,
    })
}

#[async_trait]
impl ServiceCatalog for PostgresCatalog {
    async fn list_active_services(
        &self,
        category_hint: Option<&str>,
    ) -> Result<Vec<ProviderService>, CatalogError> {
        let query = format!(
            r#"
            SELECT {SERVICE_COLUMNS}
            FROM provider_services s
            JOIN providers p ON p.id = s.provider_id
            JOIN service_categories c ON c.id = s.category_id
            WHERE s.is_active AND p.is_active
              AND p.latitude IS NOT NULL AND p.longitude IS NOT NULL
              AND ($1::TEXT IS NULL OR c.name = $1)
            "#
        );

        let rows = sqlx::query(&query)
            .bind(category_hint)
            .fetch_all(&self.pool)
            .await?;

        let services = rows
            .iter()
            .map(service_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            "Loaded {} active services (category hint: {:?})",
            services.len(),
            category_hint
        );

        Ok(services)
    }

    async fn list_categories(&self) -> Result<Vec<ServiceCategory>, CatalogError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, is_active
            FROM service_categories
            WHERE is_active
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<ServiceCategory, CatalogError> {
                Ok(ServiceCategory {
                    id: row.try_get("id")?,
                    name: row.try_get("name")?,
                    description: row.try_get("description")?,
                    is_active: row.try_get("is_active")?,
                })
            })
            .collect()
    }

    async fn record_review(&self, review: Review) -> Result<ProviderService, CatalogError> {
        check_review_rating(review.rating)?;

        let mut tx = self.pool.begin().await?;

        let exists: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM provider_services WHERE id = $1 FOR UPDATE")
                .bind(review.service_id)
                .fetch_optional(&mut *tx)
                .await?;

        if exists.is_none() {
            return Err(CatalogError::NotFound(format!(
                "Service {} not found",
                review.service_id
            )));
        }

        sqlx::query(
            r#"
            INSERT INTO reviews (id, service_id, rating, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(review.id)
        .bind(review.service_id)
        .bind(review.rating as i16)
        .bind(review.created_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE provider_services s
            SET average_rating = agg.average_rating,
                total_reviews = agg.total_reviews,
                updated_at = NOW()
            FROM (
                SELECT COALESCE(AVG(rating), 0)::DOUBLE PRECISION AS average_rating,
                       COUNT(*)::INTEGER AS total_reviews
                FROM reviews
                WHERE service_id = $1
            ) agg
            WHERE s.id = $1
            "#,
        )
        .bind(review.service_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!("Recorded review {} for service {}", review.id, review.service_id);

        self.fetch_service(review.service_id).await
    }

    async fn health_check(&self) -> Result<bool, CatalogError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
