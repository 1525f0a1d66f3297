use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::Postgres;

use crate::models::pagination::PageRequest;
use crate::models::user::UserRef;
use super::criteria::{SliderCriteria, SqlParam};
use super::types::Slider;
use super::{SliderRepository, sort_fields};

/// Slider columns plus the joined user's login.
const SELECT_SLIDER: &str = "\
    SELECT s.id, s.presentation, s.user_id, u.login AS user_login \
    FROM slider s \
    LEFT JOIN app_user u ON u.id = s.user_id";

#[derive(sqlx::FromRow)]
struct SliderRow {
    id: i64,
    presentation: Option<String>,
    user_id: Option<i64>,
    user_login: Option<String>,
}

impl From<SliderRow> for Slider {
    fn from(row: SliderRow) -> Self {
        let user = match (row.user_id, row.user_login) {
            (Some(id), Some(login)) => Some(UserRef { id, login }),
            _ => None,
        };
        Slider {
            id: Some(row.id),
            presentation: row.presentation,
            user_id: row.user_id,
            user,
        }
    }
}

fn bind_params<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    params: &[SqlParam],
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for param in params {
        query = match param {
            SqlParam::Long(v) => query.bind(*v),
            SqlParam::Text(v) => query.bind(v.clone()),
            SqlParam::LongList(v) => query.bind(v.clone()),
            SqlParam::TextList(v) => query.bind(v.clone()),
        };
    }
    query
}

fn order_by(page: &PageRequest) -> String {
    sort_fields(page)
        .iter()
        .map(|(field, dir)| format!("{} {}", field.column(), dir.as_sql()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Clone)]
pub struct PgSliderRepository {
    pool: PgPool,
}

impl PgSliderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SliderRepository for PgSliderRepository {
    async fn find_by_criteria(&self, criteria: &SliderCriteria, page: &PageRequest) -> Result<Vec<Slider>, sqlx::Error> {
        let (where_clause, params) = criteria.to_sql(0);
        let n = params.len();
        let sql = format!(
            "{SELECT_SLIDER} WHERE {where_clause} ORDER BY {} LIMIT ${} OFFSET ${}",
            order_by(page),
            n + 1,
            n + 2
        );
        let rows = bind_params(sqlx::query_as::<_, SliderRow>(&sql), &params)
            .bind(page.size)
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Slider::from).collect())
    }

    async fn count_by_criteria(&self, criteria: &SliderCriteria) -> Result<i64, sqlx::Error> {
        let (where_clause, params) = criteria.to_sql(0);
        let sql = format!("SELECT COUNT(*) FROM slider s WHERE {where_clause}");
        let (count,): (i64,) = bind_params(sqlx::query_as(&sql), &params)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Slider>, sqlx::Error> {
        let sql = format!("{SELECT_SLIDER} WHERE s.id = $1");
        let row = sqlx::query_as::<_, SliderRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Slider::from))
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM slider WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
    }

    async fn insert(&self, slider: &Slider) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("INSERT INTO slider (presentation, user_id) VALUES ($1, $2) RETURNING id")
            .bind(&slider.presentation)
            .bind(slider.user_id)
            .fetch_one(&self.pool)
            .await
    }

    async fn update(&self, slider: &Slider) -> Result<bool, sqlx::Error> {
        let Some(id) = slider.id else {
            return Ok(false);
        };
        let result = sqlx::query("UPDATE slider SET presentation = $1, user_id = $2 WHERE id = $3")
            .bind(&slider.presentation)
            .bind(slider.user_id)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM slider WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM slider")
            .fetch_one(&self.pool)
            .await
    }
}
