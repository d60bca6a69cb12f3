//! PostgreSQL professional profiles, services and portfolio items.
//!
//! Services and portfolio rows reference their profile with
//! `ON DELETE CASCADE`. Aggregate rating fields are not stored here; callers
//! attach them from the `barbers` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, ErrorCode, PortfolioItemId, ProfileId, ServiceId, Timestamp, UserId,
};
use crate::domain::professional::{PortfolioItem, PriceRange, ProfessionalProfile, Service};
use crate::ports::{PortfolioRepository, ProfileRepository, ServiceRepository};

pub struct PostgresProfessionalRepository {
    pool: PgPool,
}

impl PostgresProfessionalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const PROFILE_COLUMNS: &str = "id, owner_email, business_name, display_name, bio, phone, email, \
     website, instagram, address, city, state, specialties, price_range, years_experience, \
     is_verified, created_at, updated_at";

const SERVICE_COLUMNS: &str =
    "id, profile_id, name, description, price_min, price_max, duration_minutes, created_at, updated_at";

const PORTFOLIO_COLUMNS: &str =
    "id, profile_id, image_url, caption, service_category, display_order, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    owner_email: String,
    business_name: String,
    display_name: Option<String>,
    bio: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    website: Option<String>,
    instagram: Option<String>,
    address: Option<String>,
    city: Option<String>,
    state: Option<String>,
    specialties: Vec<String>,
    price_range: Option<String>,
    years_experience: Option<i32>,
    is_verified: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProfileRow> for ProfessionalProfile {
    type Error = DomainError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let price_range = row
            .price_range
            .map(|p| {
                p.parse::<PriceRange>().map_err(|_| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Invalid price range value: {}", p),
                    )
                })
            })
            .transpose()?;

        Ok(ProfessionalProfile {
            id: ProfileId::from_uuid(row.id),
            owner: UserId::new(row.owner_email)
                .map_err(|e| DomainError::database("Invalid profile owner", e))?,
            business_name: row.business_name,
            display_name: row.display_name,
            bio: row.bio,
            phone: row.phone,
            email: row.email,
            website: row.website,
            instagram: row.instagram,
            address: row.address,
            city: row.city,
            state: row.state,
            specialties: row.specialties,
            price_range,
            years_experience: row.years_experience.map(|y| y.max(0) as u32),
            is_verified: row.is_verified,
            average_rating: 0.0,
            total_reviews: 0,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ServiceRow {
    id: Uuid,
    profile_id: Uuid,
    name: String,
    description: Option<String>,
    price_min: Option<f64>,
    price_max: Option<f64>,
    duration_minutes: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ServiceRow> for Service {
    fn from(row: ServiceRow) -> Self {
        Service {
            id: ServiceId::from_uuid(row.id),
            profile_id: ProfileId::from_uuid(row.profile_id),
            name: row.name,
            description: row.description,
            price_min: row.price_min,
            price_max: row.price_max,
            duration_minutes: row.duration_minutes.map(|d| d.max(0) as u32),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PortfolioRow {
    id: Uuid,
    profile_id: Uuid,
    image_url: String,
    caption: Option<String>,
    service_category: Option<String>,
    display_order: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PortfolioRow> for PortfolioItem {
    fn from(row: PortfolioRow) -> Self {
        PortfolioItem {
            id: PortfolioItemId::from_uuid(row.id),
            profile_id: ProfileId::from_uuid(row.profile_id),
            image_url: row.image_url,
            caption: row.caption,
            service_category: row.service_category,
            display_order: row.display_order,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        }
    }
}

fn not_found_unless_updated(rows: u64, resource: &str) -> Result<(), DomainError> {
    if rows == 0 {
        Err(DomainError::not_found(resource))
    } else {
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfessionalRepository {
    async fn insert_profile(&self, profile: &ProfessionalProfile) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO professional_profiles (
                id, owner_email, business_name, display_name, bio, phone, email, website,
                instagram, address, city, state, specialties, price_range, years_experience,
                is_verified, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            "#,
        )
        .bind(profile.id.as_uuid())
        .bind(profile.owner.as_str())
        .bind(&profile.business_name)
        .bind(&profile.display_name)
        .bind(&profile.bio)
        .bind(&profile.phone)
        .bind(&profile.email)
        .bind(&profile.website)
        .bind(&profile.instagram)
        .bind(&profile.address)
        .bind(&profile.city)
        .bind(&profile.state)
        .bind(&profile.specialties)
        .bind(profile.price_range.map(|p| p.as_str()))
        .bind(profile.years_experience.map(|y| y as i32))
        .bind(profile.is_verified)
        .bind(profile.created_at.as_datetime())
        .bind(profile.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("professional_profiles_owner_email_key") {
                    return DomainError::new(
                        ErrorCode::Conflict,
                        "Professional profile already exists",
                    );
                }
            }
            DomainError::database("Failed to save profile", e)
        })?;
        Ok(())
    }

    async fn update_profile(&self, profile: &ProfessionalProfile) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE professional_profiles SET
                business_name = $2,
                display_name = $3,
                bio = $4,
                phone = $5,
                email = $6,
                website = $7,
                instagram = $8,
                address = $9,
                city = $10,
                state = $11,
                specialties = $12,
                price_range = $13,
                years_experience = $14,
                updated_at = $15
            WHERE id = $1
            "#,
        )
        .bind(profile.id.as_uuid())
        .bind(&profile.business_name)
        .bind(&profile.display_name)
        .bind(&profile.bio)
        .bind(&profile.phone)
        .bind(&profile.email)
        .bind(&profile.website)
        .bind(&profile.instagram)
        .bind(&profile.address)
        .bind(&profile.city)
        .bind(&profile.state)
        .bind(&profile.specialties)
        .bind(profile.price_range.map(|p| p.as_str()))
        .bind(profile.years_experience.map(|y| y as i32))
        .bind(profile.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update profile", e))?;

        not_found_unless_updated(result.rows_affected(), "Professional profile")
    }

    async fn find_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Option<ProfessionalProfile>, DomainError> {
        let row: Option<ProfileRow> = sqlx::query_as(&format!(
            "SELECT {} FROM professional_profiles WHERE owner_email = $1",
            PROFILE_COLUMNS
        ))
        .bind(owner.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch profile", e))?;

        row.map(ProfessionalProfile::try_from).transpose()
    }

    async fn find_profile(&self, id: ProfileId) -> Result<Option<ProfessionalProfile>, DomainError> {
        let row: Option<ProfileRow> = sqlx::query_as(&format!(
            "SELECT {} FROM professional_profiles WHERE id = $1",
            PROFILE_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch profile", e))?;

        row.map(ProfessionalProfile::try_from).transpose()
    }

    async fn list_profiles(&self) -> Result<Vec<ProfessionalProfile>, DomainError> {
        let rows: Vec<ProfileRow> = sqlx::query_as(&format!(
            "SELECT {} FROM professional_profiles",
            PROFILE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list profiles", e))?;

        rows.into_iter().map(ProfessionalProfile::try_from).collect()
    }

    async fn delete_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Option<(ProfessionalProfile, Vec<PortfolioItem>)>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        let row: Option<ProfileRow> = sqlx::query_as(&format!(
            "SELECT {} FROM professional_profiles WHERE owner_email = $1 FOR UPDATE",
            PROFILE_COLUMNS
        ))
        .bind(owner.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to fetch profile", e))?;

        let profile = match row {
            Some(row) => ProfessionalProfile::try_from(row)?,
            None => return Ok(None),
        };

        let items: Vec<PortfolioRow> = sqlx::query_as(&format!(
            "SELECT {} FROM professional_portfolio WHERE profile_id = $1",
            PORTFOLIO_COLUMNS
        ))
        .bind(profile.id.as_uuid())
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to list portfolio", e))?;

        sqlx::query("DELETE FROM professional_profiles WHERE id = $1")
            .bind(profile.id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to delete profile", e))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit profile delete", e))?;

        Ok(Some((
            profile,
            items.into_iter().map(PortfolioItem::from).collect(),
        )))
    }
}

#[async_trait]
impl ServiceRepository for PostgresProfessionalRepository {
    async fn insert_service(&self, service: &Service) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO professional_services (
                id, profile_id, name, description, price_min, price_max, duration_minutes,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(service.id.as_uuid())
        .bind(service.profile_id.as_uuid())
        .bind(&service.name)
        .bind(&service.description)
        .bind(service.price_min)
        .bind(service.price_max)
        .bind(service.duration_minutes.map(|d| d as i32))
        .bind(service.created_at.as_datetime())
        .bind(service.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to save service", e))?;
        Ok(())
    }

    async fn update_service(&self, service: &Service) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE professional_services SET
                name = $2,
                description = $3,
                price_min = $4,
                price_max = $5,
                duration_minutes = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(service.id.as_uuid())
        .bind(&service.name)
        .bind(&service.description)
        .bind(service.price_min)
        .bind(service.price_max)
        .bind(service.duration_minutes.map(|d| d as i32))
        .bind(service.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update service", e))?;

        not_found_unless_updated(result.rows_affected(), "Service")
    }

    async fn find_service(&self, id: ServiceId) -> Result<Option<Service>, DomainError> {
        let row: Option<ServiceRow> = sqlx::query_as(&format!(
            "SELECT {} FROM professional_services WHERE id = $1",
            SERVICE_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch service", e))?;

        Ok(row.map(Service::from))
    }

    async fn list_services(&self, profile: ProfileId) -> Result<Vec<Service>, DomainError> {
        let rows: Vec<ServiceRow> = sqlx::query_as(&format!(
            "SELECT {} FROM professional_services WHERE profile_id = $1 ORDER BY name",
            SERVICE_COLUMNS
        ))
        .bind(profile.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list services", e))?;

        Ok(rows.into_iter().map(Service::from).collect())
    }

    async fn delete_service(&self, id: ServiceId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM professional_services WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete service", e))?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl PortfolioRepository for PostgresProfessionalRepository {
    async fn insert_item(&self, item: &PortfolioItem) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO professional_portfolio (
                id, profile_id, image_url, caption, service_category, display_order,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(item.id.as_uuid())
        .bind(item.profile_id.as_uuid())
        .bind(&item.image_url)
        .bind(&item.caption)
        .bind(&item.service_category)
        .bind(item.display_order)
        .bind(item.created_at.as_datetime())
        .bind(item.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to save portfolio item", e))?;
        Ok(())
    }

    async fn update_item(&self, item: &PortfolioItem) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE professional_portfolio SET
                image_url = $2,
                caption = $3,
                service_category = $4,
                display_order = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(item.id.as_uuid())
        .bind(&item.image_url)
        .bind(&item.caption)
        .bind(&item.service_category)
        .bind(item.display_order)
        .bind(item.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update portfolio item", e))?;

        not_found_unless_updated(result.rows_affected(), "Portfolio item")
    }

    async fn find_item(&self, id: PortfolioItemId) -> Result<Option<PortfolioItem>, DomainError> {
        let row: Option<PortfolioRow> = sqlx::query_as(&format!(
            "SELECT {} FROM professional_portfolio WHERE id = $1",
            PORTFOLIO_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch portfolio item", e))?;

        Ok(row.map(PortfolioItem::from))
    }

    async fn list_items(&self, profile: ProfileId) -> Result<Vec<PortfolioItem>, DomainError> {
        let rows: Vec<PortfolioRow> = sqlx::query_as(&format!(
            "SELECT {} FROM professional_portfolio WHERE profile_id = $1 \
             ORDER BY display_order, created_at DESC",
            PORTFOLIO_COLUMNS
        ))
        .bind(profile.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list portfolio", e))?;

        Ok(rows.into_iter().map(PortfolioItem::from).collect())
    }

    async fn delete_item(&self, id: PortfolioItemId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM professional_portfolio WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete portfolio item", e))?;
        Ok(result.rows_affected() > 0)
    }
}
