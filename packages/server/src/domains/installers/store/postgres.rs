use async_trait::async_trait;
use sqlx::PgPool;

use super::InstallerStore;
use crate::common::InstallerId;
use crate::domains::installers::models::Installer;
use crate::kernel::{StoreError, StoreResult};

const COLUMNS: &str = "id, company_name, logo_url, address_one, address_two, postal_code, city, \
     phone_number, email, postal_areas, is_fallback, created_at, created_by, updated_at, updated_by";

/// PostgreSQL installer store. `postal_areas` is a `TEXT[]` with a GIN index.
#[derive(Clone)]
pub struct PostgresInstallerStore {
    pool: PgPool,
}

impl PostgresInstallerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InstallerStore for PostgresInstallerStore {
    async fn insert(&self, installer: &Installer) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO installers (
                id, company_name, logo_url, address_one, address_two, postal_code, city,
                phone_number, email, postal_areas, is_fallback, created_at, created_by,
                updated_at, updated_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(installer.id)
        .bind(&installer.company_name)
        .bind(&installer.logo_url)
        .bind(&installer.address_one)
        .bind(&installer.address_two)
        .bind(&installer.postal_code)
        .bind(&installer.city)
        .bind(&installer.phone_number)
        .bind(&installer.email)
        .bind(&installer.postal_areas)
        .bind(installer.is_fallback)
        .bind(installer.created_at)
        .bind(installer.created_by)
        .bind(installer.updated_at)
        .bind(installer.updated_by)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, installer: &Installer) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE installers
            SET company_name = $2,
                logo_url = $3,
                address_one = $4,
                address_two = $5,
                postal_code = $6,
                city = $7,
                phone_number = $8,
                email = $9,
                postal_areas = $10,
                is_fallback = $11,
                updated_at = $12,
                updated_by = $13
            WHERE id = $1
            "#,
        )
        .bind(installer.id)
        .bind(&installer.company_name)
        .bind(&installer.logo_url)
        .bind(&installer.address_one)
        .bind(&installer.address_two)
        .bind(&installer.postal_code)
        .bind(&installer.city)
        .bind(&installer.phone_number)
        .bind(&installer.email)
        .bind(&installer.postal_areas)
        .bind(installer.is_fallback)
        .bind(installer.updated_at)
        .bind(installer.updated_by)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Installer", installer.id));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: InstallerId) -> StoreResult<Option<Installer>> {
        let installer = sqlx::query_as::<_, Installer>(&format!(
            "SELECT {COLUMNS} FROM installers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(installer)
    }

    async fn list(&self) -> StoreResult<Vec<Installer>> {
        let installers = sqlx::query_as::<_, Installer>(&format!(
            "SELECT {COLUMNS} FROM installers ORDER BY company_name, id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(installers)
    }

    async fn find_by_postal_area(&self, prefix: &str) -> StoreResult<Vec<Installer>> {
        let installers = sqlx::query_as::<_, Installer>(&format!(
            "SELECT {COLUMNS} FROM installers WHERE postal_areas @> ARRAY[$1]::TEXT[] ORDER BY id"
        ))
        .bind(prefix)
        .fetch_all(&self.pool)
        .await?;
        Ok(installers)
    }

    async fn find_fallbacks(&self) -> StoreResult<Vec<Installer>> {
        let installers = sqlx::query_as::<_, Installer>(&format!(
            "SELECT {COLUMNS} FROM installers WHERE is_fallback ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(installers)
    }

    async fn set_fallback(&self, id: InstallerId) -> StoreResult<Installer> {
        // Single statement; a missing id leaves every flag untouched
        sqlx::query(
            r#"
            UPDATE installers
            SET is_fallback = (id = $1)
            WHERE EXISTS (SELECT 1 FROM installers WHERE id = $1)
              AND (is_fallback OR id = $1)
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| StoreError::not_found("Installer", id))
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
