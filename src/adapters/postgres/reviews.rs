//! PostgreSQL review repository and aggregate ratings (`barbers` table).
//!
//! Every review write runs in one transaction together with the aggregate
//! adjustments it causes. Each touched aggregate is serialized with a
//! transaction-scoped advisory lock on its key (covers the first review of a
//! professional, where no row exists yet to lock) and then read with
//! `SELECT ... FOR UPDATE` before the new average is written back.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ReviewId, StarRating, Timestamp, UserId};
use crate::domain::review::{
    adjustments_for_update, ProfessionalKey, ProfessionalRating, RatingAdjustment, Review,
};
use crate::ports::{sort_ratings, RatingReader, ReviewFilter, ReviewRepository};

pub struct PostgresReviewRepository {
    pool: PgPool,
}

impl PostgresReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const REVIEW_COLUMNS: &str = "id, author_email, professional_name, venue, location, service_type, \
     rating, cost, title, body, is_public, created_at, updated_at";

const RATING_COLUMNS: &str =
    "name_key, venue_key, professional_name, venue, location, average_rating, total_reviews, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct ReviewRow {
    id: Uuid,
    author_email: String,
    professional_name: String,
    venue: String,
    location: Option<String>,
    service_type: String,
    rating: i16,
    cost: Option<f64>,
    title: String,
    body: String,
    is_public: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ReviewRow> for Review {
    type Error = DomainError;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        Ok(Review {
            id: ReviewId::from_uuid(row.id),
            author: UserId::new(row.author_email)
                .map_err(|e| DomainError::database("Invalid review author", e))?,
            professional_name: row.professional_name,
            venue: row.venue,
            location: row.location,
            service_type: row.service_type,
            rating: StarRating::new(row.rating as i64)
                .map_err(|e| DomainError::database("Invalid stored rating", e))?,
            cost: row.cost,
            title: row.title,
            body: row.body,
            is_public: row.is_public,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RatingRow {
    name_key: String,
    venue_key: String,
    professional_name: String,
    venue: String,
    location: Option<String>,
    average_rating: f64,
    total_reviews: i32,
    updated_at: DateTime<Utc>,
}

impl From<RatingRow> for ProfessionalRating {
    fn from(row: RatingRow) -> Self {
        ProfessionalRating {
            key: ProfessionalKey::new(&row.name_key, &row.venue_key),
            professional_name: row.professional_name,
            venue: row.venue,
            location: row.location,
            average_rating: row.average_rating,
            total_reviews: row.total_reviews.max(0) as u32,
            updated_at: Timestamp::from_datetime(row.updated_at),
        }
    }
}

/// 64-bit advisory lock id for an aggregate key.
fn lock_id(key: &ProfessionalKey) -> i64 {
    let digest = Sha256::digest(format!("barbers:{}\u{1f}{}", key.name(), key.venue()).as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    i64::from_be_bytes(bytes)
}

async fn lock_rating(
    tx: &mut Transaction<'_, Postgres>,
    key: &ProfessionalKey,
) -> Result<Option<ProfessionalRating>, DomainError> {
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(lock_id(key))
        .execute(&mut **tx)
        .await
        .map_err(|e| DomainError::database("Failed to lock aggregate", e))?;

    let row: Option<RatingRow> = sqlx::query_as(&format!(
        "SELECT {} FROM barbers WHERE name_key = $1 AND venue_key = $2 FOR UPDATE",
        RATING_COLUMNS
    ))
    .bind(key.name())
    .bind(key.venue())
    .fetch_optional(&mut **tx)
    .await
    .map_err(|e| DomainError::database("Failed to read aggregate", e))?;

    Ok(row.map(ProfessionalRating::from))
}

async fn store_rating(
    tx: &mut Transaction<'_, Postgres>,
    key: &ProfessionalKey,
    rating: Option<&ProfessionalRating>,
) -> Result<(), DomainError> {
    match rating {
        Some(r) => {
            sqlx::query(
                r#"
                INSERT INTO barbers (
                    name_key, venue_key, professional_name, venue, location,
                    average_rating, total_reviews, updated_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                ON CONFLICT (name_key, venue_key) DO UPDATE SET
                    professional_name = EXCLUDED.professional_name,
                    venue = EXCLUDED.venue,
                    location = EXCLUDED.location,
                    average_rating = EXCLUDED.average_rating,
                    total_reviews = EXCLUDED.total_reviews,
                    updated_at = EXCLUDED.updated_at
                "#,
            )
            .bind(key.name())
            .bind(key.venue())
            .bind(&r.professional_name)
            .bind(&r.venue)
            .bind(&r.location)
            .bind(r.average_rating)
            .bind(r.total_reviews as i32)
            .bind(r.updated_at.as_datetime())
            .execute(&mut **tx)
            .await
            .map_err(|e| DomainError::database("Failed to write aggregate", e))?;
        }
        None => {
            sqlx::query("DELETE FROM barbers WHERE name_key = $1 AND venue_key = $2")
                .bind(key.name())
                .bind(key.venue())
                .execute(&mut **tx)
                .await
                .map_err(|e| DomainError::database("Failed to delete aggregate", e))?;
        }
    }
    Ok(())
}

/// Locks, folds and writes back each adjustment. Keys are locked in sorted
/// order so two writers touching the same pair cannot deadlock.
async fn apply_adjustments(
    tx: &mut Transaction<'_, Postgres>,
    adjustments: &[RatingAdjustment],
    now: Timestamp,
) -> Result<Vec<(ProfessionalKey, Option<ProfessionalRating>)>, DomainError> {
    let mut ordered: Vec<&RatingAdjustment> = adjustments.iter().collect();
    ordered.sort_by_key(|a| a.key());

    let mut results = Vec::with_capacity(ordered.len());
    for adjustment in ordered {
        let key = adjustment.key();
        let current = lock_rating(tx, &key).await?;
        let next = adjustment.apply(current.as_ref(), now);
        store_rating(tx, &key, next.as_ref()).await?;
        results.push((key, next));
    }
    Ok(results)
}

fn result_for(
    results: Vec<(ProfessionalKey, Option<ProfessionalRating>)>,
    key: &ProfessionalKey,
) -> Option<ProfessionalRating> {
    results
        .into_iter()
        .find(|(k, _)| k == key)
        .and_then(|(_, rating)| rating)
}

async fn lock_review(
    tx: &mut Transaction<'_, Postgres>,
    id: ReviewId,
) -> Result<Review, DomainError> {
    let row: Option<ReviewRow> = sqlx::query_as(&format!(
        "SELECT {} FROM reviews WHERE id = $1 FOR UPDATE",
        REVIEW_COLUMNS
    ))
    .bind(id.as_uuid())
    .fetch_optional(&mut **tx)
    .await
    .map_err(|e| DomainError::database("Failed to read review", e))?;

    row.ok_or_else(|| DomainError::not_found("Review"))?.try_into()
}

#[async_trait]
impl ReviewRepository for PostgresReviewRepository {
    async fn insert(&self, review: &Review) -> Result<ProfessionalRating, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        sqlx::query(
            r#"
            INSERT INTO reviews (
                id, author_email, professional_name, venue, location, service_type,
                rating, cost, title, body, is_public, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(review.id.as_uuid())
        .bind(review.author.as_str())
        .bind(&review.professional_name)
        .bind(&review.venue)
        .bind(&review.location)
        .bind(&review.service_type)
        .bind(review.rating.value() as i16)
        .bind(review.cost)
        .bind(&review.title)
        .bind(&review.body)
        .bind(review.is_public)
        .bind(review.created_at.as_datetime())
        .bind(review.updated_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to insert review", e))?;

        let professional = review.professional();
        let key = professional.key();
        let results = apply_adjustments(
            &mut tx,
            &[RatingAdjustment::Added {
                professional,
                rating: review.rating,
            }],
            review.updated_at,
        )
        .await?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit review", e))?;

        result_for(results, &key).ok_or_else(|| {
            DomainError::database("Failed to insert review", "aggregate missing after insert")
        })
    }

    async fn update(
        &self,
        previous: &Review,
        updated: &Review,
    ) -> Result<Option<ProfessionalRating>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        // The locked row, not the caller's copy, is what the aggregate counted.
        let stored = lock_review(&mut tx, previous.id).await?;

        sqlx::query(
            r#"
            UPDATE reviews SET
                professional_name = $2,
                venue = $3,
                location = $4,
                service_type = $5,
                rating = $6,
                cost = $7,
                title = $8,
                body = $9,
                is_public = $10,
                updated_at = $11
            WHERE id = $1
            "#,
        )
        .bind(updated.id.as_uuid())
        .bind(&updated.professional_name)
        .bind(&updated.venue)
        .bind(&updated.location)
        .bind(&updated.service_type)
        .bind(updated.rating.value() as i16)
        .bind(updated.cost)
        .bind(&updated.title)
        .bind(&updated.body)
        .bind(updated.is_public)
        .bind(updated.updated_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to update review", e))?;

        let new_professional = updated.professional();
        let key = new_professional.key();
        let adjustments = adjustments_for_update(
            (&stored.professional(), stored.rating),
            (&new_professional, updated.rating),
        );
        let results = apply_adjustments(&mut tx, &adjustments, updated.updated_at).await?;
        let current = match result_for(results, &key) {
            Some(rating) => Some(rating),
            // Unchanged rating for the same professional: nothing was rewritten.
            None if adjustments.is_empty() => lock_rating(&mut tx, &key).await?,
            None => None,
        };

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit review update", e))?;

        Ok(current)
    }

    async fn delete(&self, review: &Review) -> Result<Option<ProfessionalRating>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        let stored = lock_review(&mut tx, review.id).await?;

        sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(stored.id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to delete review", e))?;

        let key = stored.professional().key();
        let results = apply_adjustments(
            &mut tx,
            &[RatingAdjustment::Removed {
                key: key.clone(),
                rating: stored.rating,
            }],
            Timestamp::now(),
        )
        .await?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit review delete", e))?;

        Ok(result_for(results, &key))
    }

    async fn find_by_id(&self, id: ReviewId) -> Result<Option<Review>, DomainError> {
        let row: Option<ReviewRow> = sqlx::query_as(&format!(
            "SELECT {} FROM reviews WHERE id = $1",
            REVIEW_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch review", e))?;

        row.map(Review::try_from).transpose()
    }

    async fn list_public(&self, filter: &ReviewFilter) -> Result<Vec<Review>, DomainError> {
        let professional = filter
            .professional
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", s));
        let location = filter
            .location
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", s));

        let rows: Vec<ReviewRow> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM reviews
            WHERE is_public
              AND ($1::TEXT IS NULL OR professional_name ILIKE $1)
              AND ($2::TEXT IS NULL OR location ILIKE $2)
            ORDER BY created_at DESC
            LIMIT $3
            "#,
            REVIEW_COLUMNS
        ))
        .bind(professional)
        .bind(location)
        .bind(filter.effective_limit() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list reviews", e))?;

        rows.into_iter().map(Review::try_from).collect()
    }

    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Review>, DomainError> {
        let rows: Vec<ReviewRow> = sqlx::query_as(&format!(
            "SELECT {} FROM reviews WHERE author_email = $1 ORDER BY created_at DESC",
            REVIEW_COLUMNS
        ))
        .bind(author.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list reviews", e))?;

        rows.into_iter().map(Review::try_from).collect()
    }
}

#[async_trait]
impl RatingReader for PostgresReviewRepository {
    async fn list_ratings(&self) -> Result<Vec<ProfessionalRating>, DomainError> {
        let rows: Vec<RatingRow> = sqlx::query_as(&format!("SELECT {} FROM barbers", RATING_COLUMNS))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to list ratings", e))?;

        let mut ratings: Vec<ProfessionalRating> =
            rows.into_iter().map(ProfessionalRating::from).collect();
        sort_ratings(&mut ratings);
        Ok(ratings)
    }

    async fn find_rating(
        &self,
        key: &ProfessionalKey,
    ) -> Result<Option<ProfessionalRating>, DomainError> {
        let row: Option<RatingRow> = sqlx::query_as(&format!(
            "SELECT {} FROM barbers WHERE name_key = $1 AND venue_key = $2",
            RATING_COLUMNS
        ))
        .bind(key.name())
        .bind(key.venue())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch rating", e))?;

        Ok(row.map(ProfessionalRating::from))
    }
}
