use crate::{
    data::{
        StudentStore,
        student::{NewStudent, Student, StudentId, decode_listing},
    },
    error::{MissingStudentSnafu, RosterResult},
};
use async_trait::async_trait;
use serde_json::{Map, Value};
use snafu::OptionExt;
use tokio::sync::RwLock;

/// In-process stand-in for the database. Keeps raw documents in insertion order so the same
/// document mapping runs as with Postgres.
#[derive(Debug, Default)]
pub struct MemoryStudentStore {
    documents: RwLock<Vec<(StudentId, Value)>>,
}

impl MemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a raw document, bypassing form validation. Mirrors records written by other tools.
    pub async fn insert_raw(&self, document: Value) -> StudentId {
        let id = StudentId::generate();
        self.documents.write().await.push((id, document));
        id
    }

    async fn collect_matching(&self, filter: impl Fn(&Value) -> bool) -> RosterResult<Vec<Student>> {
        let matching: Vec<_> = self
            .documents
            .read()
            .await
            .iter()
            .filter(|(_, document)| filter(document))
            .cloned()
            .collect();

        Ok(decode_listing(matching))
    }
}

fn merge_into(target: &mut Value, fields: Map<String, Value>) {
    match target {
        Value::Object(existing) => existing.extend(fields),
        other => *other = Value::Object(fields),
    }
}

#[async_trait]
impl StudentStore for MemoryStudentStore {
    async fn list_all(&self) -> RosterResult<Vec<Student>> {
        self.collect_matching(|_| true).await
    }

    async fn find_by_name_substring(&self, query: &str) -> RosterResult<Vec<Student>> {
        let query = query.to_lowercase();
        self.collect_matching(|document| {
            query.is_empty()
                || document
                    .get("name")
                    .and_then(Value::as_str)
                    .is_some_and(|name| name.to_lowercase().contains(&query))
        })
        .await
    }

    async fn find_by_id(&self, id: StudentId) -> RosterResult<Option<Student>> {
        let document = self
            .documents
            .read()
            .await
            .iter()
            .find(|(candidate, _)| *candidate == id)
            .map(|(_, document)| document.clone());

        document
            .map(|document| Student::from_document(id, document))
            .transpose()
    }

    async fn insert(&self, student: NewStudent) -> RosterResult<StudentId> {
        Ok(self.insert_raw(student.to_document()).await)
    }

    async fn update_full(&self, id: StudentId, student: NewStudent) -> RosterResult<()> {
        let mut documents = self.documents.write().await;
        let (_, document) = documents
            .iter_mut()
            .find(|(candidate, _)| *candidate == id)
            .context(MissingStudentSnafu { id })?;

        if let Value::Object(fields) = student.to_document() {
            merge_into(document, fields);
        }
        Ok(())
    }

    async fn update_remarks(&self, id: StudentId, remarks: String) -> RosterResult<()> {
        let mut documents = self.documents.write().await;
        if let Some((_, document)) = documents.iter_mut().find(|(candidate, _)| *candidate == id) {
            let fields = [("remarks".to_string(), Value::String(remarks))]
                .into_iter()
                .collect();
            merge_into(document, fields);
        }
        Ok(())
    }
}
