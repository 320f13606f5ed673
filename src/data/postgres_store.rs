use crate::{
    data::{
        StudentStore,
        student::{NewStudent, Student, StudentId, decode_listing},
    },
    error::{MakeQuerySnafu, MigrateSnafu, MissingStudentSnafu, OpenDatabaseSnafu, RosterResult},
};
use async_trait::async_trait;
use serde_json::Value;
use snafu::{ResultExt, ensure};
use sqlx::{Pool, Postgres, postgres::PgPoolOptions};
use uuid::Uuid;

/// Students kept as schemaless JSONB documents, one row each, keyed by a database-assigned UUID.
#[derive(Clone, Debug)]
pub struct PostgresStudentStore {
    pool: Pool<Postgres>,
}

impl PostgresStudentStore {
    pub async fn new(options: PgPoolOptions, db_path: &str) -> RosterResult<Self> {
        let pool = options.connect(db_path).await.context(OpenDatabaseSnafu)?;

        sqlx::migrate!().run(&pool).await.context(MigrateSnafu)?;

        Ok(Self::from_pool(pool))
    }

    /// Wraps a pool whose schema is already migrated.
    pub const fn from_pool(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    fn map_rows(rows: Vec<(Uuid, Value)>) -> Vec<Student> {
        decode_listing(rows.into_iter().map(|(id, document)| (id.into(), document)))
    }
}

#[async_trait]
impl StudentStore for PostgresStudentStore {
    async fn list_all(&self) -> RosterResult<Vec<Student>> {
        let rows: Vec<(Uuid, Value)> =
            sqlx::query_as("SELECT id, document FROM public.students ORDER BY seq")
                .fetch_all(&self.pool)
                .await
                .context(MakeQuerySnafu)?;

        Ok(Self::map_rows(rows))
    }

    async fn find_by_name_substring(&self, query: &str) -> RosterResult<Vec<Student>> {
        //strpos rather than LIKE, so that `%` and `_` in the query aren't treated as wildcards
        let rows: Vec<(Uuid, Value)> = sqlx::query_as(
            "SELECT id, document FROM public.students \
             WHERE $1 = '' OR strpos(lower(coalesce(document->>'name', '')), lower($1)) > 0 \
             ORDER BY seq",
        )
        .bind(query)
        .fetch_all(&self.pool)
        .await
        .context(MakeQuerySnafu)?;

        Ok(Self::map_rows(rows))
    }

    async fn find_by_id(&self, id: StudentId) -> RosterResult<Option<Student>> {
        let Some(document): Option<Value> =
            sqlx::query_scalar("SELECT document FROM public.students WHERE id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .context(MakeQuerySnafu)?
        else {
            return Ok(None);
        };

        Student::from_document(id, document).map(Some)
    }

    async fn insert(&self, student: NewStudent) -> RosterResult<StudentId> {
        let id: Uuid =
            sqlx::query_scalar("INSERT INTO public.students (document) VALUES ($1) RETURNING id")
                .bind(student.to_document())
                .fetch_one(&self.pool)
                .await
                .context(MakeQuerySnafu)?;

        Ok(id.into())
    }

    async fn update_full(&self, id: StudentId, student: NewStudent) -> RosterResult<()> {
        //merge, so keys written by other tools survive an edit
        let result =
            sqlx::query("UPDATE public.students SET document = document || $2 WHERE id = $1")
                .bind(id.as_uuid())
                .bind(student.to_document())
                .execute(&self.pool)
                .await
                .context(MakeQuerySnafu)?;

        ensure!(result.rows_affected() > 0, MissingStudentSnafu { id });
        Ok(())
    }

    async fn update_remarks(&self, id: StudentId, remarks: String) -> RosterResult<()> {
        sqlx::query(
            "UPDATE public.students \
             SET document = document || jsonb_build_object('remarks', $2::text) \
             WHERE id = $1",
        )
        .bind(id.as_uuid())
        .bind(remarks)
        .execute(&self.pool)
        .await
        .context(MakeQuerySnafu)?;

        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
