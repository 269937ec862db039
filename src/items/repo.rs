use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::store::{ItemFilter, ItemStore};

use super::model::Item;

const COLUMNS: &str = "id, name, description, price, cuisine, flavor, calories, protein, fat, \
     carbohydrate, fiber, sodium, cholesterol, ingredients, allergens, dietary_tags, \
     health_benefits, health_warnings, rating, review_count, created_at";

#[derive(Clone)]
pub struct PgItemStore {
    db: PgPool,
}

impl PgItemStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ItemStore for PgItemStore {
    async fn create(&self, i: Item) -> anyhow::Result<Item> {
        let row = sqlx::query_as::<_, Item>(&format!(
            r#"
            INSERT INTO items ({COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                    $17, $18, $19, $20, $21)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(i.id)
        .bind(&i.name)
        .bind(&i.description)
        .bind(i.price)
        .bind(&i.cuisine)
        .bind(&i.flavor)
        .bind(i.calories)
        .bind(i.protein)
        .bind(i.fat)
        .bind(i.carbohydrate)
        .bind(i.fiber)
        .bind(i.sodium)
        .bind(i.cholesterol)
        .bind(&i.ingredients)
        .bind(&i.allergens)
        .bind(&i.dietary_tags)
        .bind(&i.health_benefits)
        .bind(&i.health_warnings)
        .bind(i.rating)
        .bind(i.review_count)
        .bind(i.created_at)
        .fetch_one(&self.db)
        .await?;
        Ok(row)
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Item>> {
        let row = sqlx::query_as::<_, Item>(&format!("SELECT {COLUMNS} FROM items WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.db)
            .await?;
        Ok(row)
    }

    async fn get_many(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Item>> {
        let rows = sqlx::query_as::<_, Item>(&format!(
            "SELECT {COLUMNS} FROM items WHERE id = ANY($1)"
        ))
        .bind(ids)
        .fetch_all(&self.db)
        .await?;
        // keep caller order, drop unknown ids
        Ok(ids
            .iter()
            .filter_map(|id| rows.iter().find(|r| r.id == *id).cloned())
            .collect())
    }

    async fn list(&self) -> anyhow::Result<Vec<Item>> {
        let rows = sqlx::query_as::<_, Item>(&format!(
            "SELECT {COLUMNS} FROM items ORDER BY created_at"
        ))
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn search(&self, f: &ItemFilter) -> anyhow::Result<Vec<Item>> {
        let rows = sqlx::query_as::<_, Item>(&format!(
            r#"
            SELECT {COLUMNS} FROM items
            WHERE ($1::text IS NULL OR cuisine = $1)
              AND ($2::text IS NULL OR flavor = $2)
              AND ($3::text IS NULL OR $3 = ANY(dietary_tags))
              AND ($4::text IS NULL OR NOT ($4 = ANY(allergens)))
              AND ($5::text IS NULL OR $5 = ANY(health_benefits))
              AND ($6::float8 IS NULL OR calories >= $6)
              AND ($7::float8 IS NULL OR calories <= $7)
              AND ($8::float8 IS NULL OR protein >= $8)
              AND ($9::float8 IS NULL OR fat <= $9)
              AND ($10::float8 IS NULL OR rating >= $10)
            ORDER BY created_at
            "#
        ))
        .bind(&f.cuisine)
        .bind(&f.flavor)
        .bind(&f.dietary_tag)
        .bind(&f.without_allergen)
        .bind(&f.for_disease)
        .bind(f.min_calories)
        .bind(f.max_calories)
        .bind(f.min_protein)
        .bind(f.max_fat)
        .bind(f.min_rating)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn update(&self, i: Item) -> anyhow::Result<Option<Item>> {
        let row = sqlx::query_as::<_, Item>(&format!(
            r#"
            UPDATE items
            SET name = $2, description = $3, price = $4, cuisine = $5, flavor = $6,
                calories = $7, protein = $8, fat = $9, carbohydrate = $10, fiber = $11,
                sodium = $12, cholesterol = $13, ingredients = $14, allergens = $15,
                dietary_tags = $16, health_benefits = $17, health_warnings = $18,
                rating = $19, review_count = $20
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(i.id)
        .bind(&i.name)
        .bind(&i.description)
        .bind(i.price)
        .bind(&i.cuisine)
        .bind(&i.flavor)
        .bind(i.calories)
        .bind(i.protein)
        .bind(i.fat)
        .bind(i.carbohydrate)
        .bind(i.fiber)
        .bind(i.sodium)
        .bind(i.cholesterol)
        .bind(&i.ingredients)
        .bind(&i.allergens)
        .bind(&i.dietary_tags)
        .bind(&i.health_benefits)
        .bind(&i.health_warnings)
        .bind(i.rating)
        .bind(i.review_count)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
