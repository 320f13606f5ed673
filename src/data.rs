use crate::{
    data::student::{NewStudent, Student, StudentId},
    error::RosterResult,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod memory_store;
pub mod postgres_store;
pub mod student;

/// Record access for the student collection. Every method is a single round-trip to the store.
#[async_trait]
pub trait StudentStore: Debug + Send + Sync {
    /// All students, in the order the store keeps them.
    async fn list_all(&self) -> RosterResult<Vec<Student>>;

    /// Case-insensitive plain substring match on `name`. An empty query matches everyone.
    async fn find_by_name_substring(&self, query: &str) -> RosterResult<Vec<Student>>;

    async fn find_by_id(&self, id: StudentId) -> RosterResult<Option<Student>>;

    async fn insert(&self, student: NewStudent) -> RosterResult<StudentId>;

    /// Overwrites all four mutable fields, failing with `MissingStudent` if `id` isn't stored.
    async fn update_full(&self, id: StudentId, student: NewStudent) -> RosterResult<()>;

    /// Overwrites only `remarks`. Unknown ids are ignored.
    async fn update_remarks(&self, id: StudentId, remarks: String) -> RosterResult<()>;

    /// Releases whatever the store holds open. Called once during graceful shutdown.
    async fn close(&self) {}
}
