use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::store::ProfileStore;

use super::model::Profile;

const COLUMNS: &str = "id, name, email, weight_kg, height_cm, age, sex, diseases, \
     preferred_cuisines, preferred_flavors, preferred_ingredients, allergies, \
     dietary_restrictions, created_at";

#[derive(Clone)]
pub struct PgProfileStore {
    db: PgPool,
}

impl PgProfileStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn create(&self, p: Profile) -> anyhow::Result<Profile> {
        let row = sqlx::query_as::<_, Profile>(&format!(
            r#"
            INSERT INTO profiles ({COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(p.id)
        .bind(&p.name)
        .bind(&p.email)
        .bind(p.weight_kg)
        .bind(p.height_cm)
        .bind(p.age)
        .bind(&p.sex)
        .bind(&p.diseases)
        .bind(&p.preferred_cuisines)
        .bind(&p.preferred_flavors)
        .bind(&p.preferred_ingredients)
        .bind(&p.allergies)
        .bind(&p.dietary_restrictions)
        .bind(p.created_at)
        .fetch_one(&self.db)
        .await?;
        Ok(row)
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Profile>> {
        let row = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {COLUMNS} FROM profiles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn list(&self) -> anyhow::Result<Vec<Profile>> {
        let rows = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {COLUMNS} FROM profiles ORDER BY created_at"
        ))
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn update(&self, p: Profile) -> anyhow::Result<Option<Profile>> {
        let row = sqlx::query_as::<_, Profile>(&format!(
            r#"
            UPDATE profiles
            SET name = $2, email = $3, weight_kg = $4, height_cm = $5, age = $6, sex = $7,
                diseases = $8, preferred_cuisines = $9, preferred_flavors = $10,
                preferred_ingredients = $11, allergies = $12, dietary_restrictions = $13
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(p.id)
        .bind(&p.name)
        .bind(&p.email)
        .bind(p.weight_kg)
        .bind(p.height_cm)
        .bind(p.age)
        .bind(&p.sex)
        .bind(&p.diseases)
        .bind(&p.preferred_cuisines)
        .bind(&p.preferred_flavors)
        .bind(&p.preferred_ingredients)
        .bind(&p.allergies)
        .bind(&p.dietary_restrictions)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
