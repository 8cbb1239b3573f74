use super::ICycleProfileRepo;
use chrono::NaiveDate;
use helsa_notify_domain::{CyclePreferences, CycleProfile, ID};
use sqlx::{
    types::{Json, Uuid},
    FromRow, PgPool,
};

pub struct PostgresCycleProfileRepo {
    pool: PgPool,
}

impl PostgresCycleProfileRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CycleProfileRaw {
    cycle_profile_uid: Uuid,
    owner_uid: Uuid,
    anchor_date: NaiveDate,
    cycle_length_days: i64,
    event_duration_days: i64,
    history: Json<Vec<NaiveDate>>,
    preferences: Json<CyclePreferences>,
    next_event_date: NaiveDate,
}

impl From<CycleProfileRaw> for CycleProfile {
    fn from(raw: CycleProfileRaw) -> Self {
        Self {
            id: raw.cycle_profile_uid.into(),
            owner_id: raw.owner_uid.into(),
            anchor_date: raw.anchor_date,
            cycle_length_days: raw.cycle_length_days,
            event_duration_days: raw.event_duration_days,
            history: raw.history.0,
            preferences: raw.preferences.0,
            next_event_date: raw.next_event_date,
        }
    }
}

#[async_trait::async_trait]
impl ICycleProfileRepo for PostgresCycleProfileRepo {
    async fn insert(&self, profile: &CycleProfile) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO cycle_profiles
            (cycle_profile_uid, owner_uid, anchor_date, cycle_length_days, event_duration_days, history, preferences, next_event_date)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(profile.id.inner_ref())
        .bind(profile.owner_id.inner_ref())
        .bind(profile.anchor_date)
        .bind(profile.cycle_length_days)
        .bind(profile.event_duration_days)
        .bind(Json(&profile.history))
        .bind(Json(&profile.preferences))
        .bind(profile.next_event_date)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, profile: &CycleProfile) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE cycle_profiles
            SET cycle_length_days = $2,
                event_duration_days = $3,
                history = $4,
                preferences = $5,
                next_event_date = $6
            WHERE cycle_profile_uid = $1
            "#,
        )
        .bind(profile.id.inner_ref())
        .bind(profile.cycle_length_days)
        .bind(profile.event_duration_days)
        .bind(Json(&profile.history))
        .bind(Json(&profile.preferences))
        .bind(profile.next_event_date)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_owner(&self, owner_id: &ID) -> Option<CycleProfile> {
        sqlx::query_as::<_, CycleProfileRaw>(
            r#"
            SELECT * FROM cycle_profiles
            WHERE owner_uid = $1
            "#,
        )
        .bind(owner_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_default()
        .map(|profile| profile.into())
    }
}
