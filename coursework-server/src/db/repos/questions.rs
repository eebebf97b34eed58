//! Trivia question repository
//!
//! Listing, search and per-category queries page in SQL with
//! `LIMIT/OFFSET` and read the unpaged total from `COUNT(*) OVER()`.

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Row};

use crate::db::DbError;
use crate::models::{NewQuestion, Pagination, Paginated, Question};
use super::escape_like;

/// Question repository
pub struct QuestionRepo<'a> {
    pool: &'a PgPool,
}

/// Collect a page of rows that carry a `total` window column.
fn paginate(rows: Vec<PgRow>, page: Pagination) -> Result<Paginated<Question>, DbError> {
    let total = match rows.first() {
        Some(row) => row.try_get::<i64, _>("total")?,
        None => 0,
    };
    let items = rows
        .iter()
        .map(Question::from_row)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Paginated {
        items,
        total,
        page: page.page,
    })
}

impl<'a> QuestionRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// One page of all questions, ordered by id.
    pub async fn list(&self, page: Pagination) -> Result<Paginated<Question>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, question, answer, category, difficulty, COUNT(*) OVER() AS total
            FROM questions
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        paginate(rows, page)
    }

    /// Case-insensitive substring search on the question text.
    pub async fn search(
        &self,
        term: &str,
        page: Pagination,
    ) -> Result<Paginated<Question>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, question, answer, category, difficulty, COUNT(*) OVER() AS total
            FROM questions
            WHERE question ILIKE '%' || $1 || '%' ESCAPE '\'
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(escape_like(term.trim()))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        paginate(rows, page)
    }

    pub async fn list_for_category(
        &self,
        category: i32,
        page: Pagination,
    ) -> Result<Paginated<Question>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, question, answer, category, difficulty, COUNT(*) OVER() AS total
            FROM questions
            WHERE category = $1
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(category)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        paginate(rows, page)
    }

    /// Insert a question. Unknown category surfaces as `DbError::ForeignKey`.
    pub async fn create(&self, question: &NewQuestion) -> Result<Question, DbError> {
        let created = sqlx::query_as(
            r#"
            INSERT INTO questions (question, answer, category, difficulty)
            VALUES ($1, $2, $3, $4)
            RETURNING id, question, answer, category, difficulty
            "#,
        )
        .bind(&question.question)
        .bind(&question.answer)
        .bind(question.category)
        .bind(question.difficulty)
        .fetch_one(self.pool)
        .await?;

        Ok(created)
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("question", id));
        }
        Ok(())
    }

    /// Questions still available to a quiz: in `category` (all when `None`)
    /// and not among `previous`.
    pub async fn quiz_candidates(
        &self,
        category: Option<i32>,
        previous: &[i32],
    ) -> Result<Vec<Question>, DbError> {
        let rows = sqlx::query_as(
            r#"
            SELECT id, question, answer, category, difficulty
            FROM questions
            WHERE ($1::int IS NULL OR category = $1)
              AND NOT (id = ANY($2))
            ORDER BY id
            "#,
        )
        .bind(category)
        .bind(previous)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use crate::db::repos::CategoryRepo;

    // Integration tests - run with DATABASE_URL set

    async fn pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::create_pool(&url).await.expect("pool creation failed");
        crate::db::migrations::run(&pool, App::Trivia).await.expect("migrations");
        crate::db::seed::run(&pool, App::Trivia).await.expect("seed");
        pool
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn quiz_candidates_skip_previous() {
        let pool = pool().await;
        let category = CategoryRepo::new(&pool).list().await.unwrap()[0].id;
        let repo = QuestionRepo::new(&pool);

        let first = repo
            .create(&NewQuestion {
                question: "Who discovered penicillin?".into(),
                answer: "Alexander Fleming".into(),
                difficulty: 3,
                category,
            })
            .await
            .unwrap();

        let remaining = repo.quiz_candidates(Some(category), &[first.id]).await.unwrap();
        assert!(remaining.iter().all(|q| q.id != first.id));
        assert!(remaining.iter().all(|q| q.category == category));

        repo.delete(first.id).await.unwrap();
        assert!(matches!(
            repo.delete(first.id).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn search_reports_total_beyond_page() {
        let pool = pool().await;
        let category = CategoryRepo::new(&pool).list().await.unwrap()[0].id;
        let repo = QuestionRepo::new(&pool);

        for n in 0..3 {
            repo.create(&NewQuestion {
                question: format!("zebra stripes {n}?"),
                answer: "yes".into(),
                difficulty: 1,
                category,
            })
            .await
            .unwrap();
        }

        let page = repo.search("ZEBRA", Pagination::new(1, 2)).await.unwrap();
        assert_eq!(page.items.len(), 2);
        assert!(page.total >= 3);
    }
}
