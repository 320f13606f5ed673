use crate::error::{
    DecodeDocumentSnafu, DocumentAgeSnafu, FractionalAgeSnafu, InvalidAgeSnafu,
    InvalidIdentifierSnafu, RosterError, RosterResult,
};
use serde::Deserialize;
use serde_json::{Value, json};
use snafu::{ResultExt, ensure};
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};
use uuid::Uuid;

/// Store-assigned identifier for a student. Travels through URLs as the hyphenated UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StudentId(Uuid);

impl StudentId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub const fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for StudentId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for StudentId {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::try_parse(s)
            .map(Self)
            .context(InvalidIdentifierSnafu { original: s })
    }
}

impl Display for StudentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub age: i64,
    pub course: String,
    pub remarks: String,
}

/// What a stored document has to look like to become a [`Student`].
#[derive(Deserialize)]
struct StudentDocument {
    name: String,
    age: StoredAge,
    course: String,
    #[serde(default)]
    remarks: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredAge {
    Number(i64),
    //document stores that only know doubles write `22` as `22.0`
    Float(f64),
    Text(String),
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn whole_age(id: StudentId, age: f64) -> RosterResult<i64> {
    ensure!(
        age.fract() == 0.0 && age >= i64::MIN as f64 && age < i64::MAX as f64,
        FractionalAgeSnafu { id, age }
    );
    Ok(age as i64)
}

impl Student {
    pub fn from_document(id: StudentId, document: Value) -> RosterResult<Self> {
        let StudentDocument {
            name,
            age,
            course,
            remarks,
        } = serde_json::from_value(document).context(DecodeDocumentSnafu { id })?;

        let age = match age {
            StoredAge::Number(age) => age,
            StoredAge::Float(age) => whole_age(id, age)?,
            StoredAge::Text(text) => text
                .trim()
                .parse()
                .context(DocumentAgeSnafu { id, original: text })?,
        };

        Ok(Self {
            id,
            name,
            age,
            course,
            remarks: remarks.unwrap_or_default(),
        })
    }
}

/// Decodes documents for the list and search pages. A document that can't become a [`Student`]
/// is logged and left out, so one record written by another tool doesn't hide the rest.
pub fn decode_listing(documents: impl IntoIterator<Item = (StudentId, Value)>) -> Vec<Student> {
    documents
        .into_iter()
        .filter_map(|(id, document)| match Student::from_document(id, document) {
            Ok(student) => Some(student),
            Err(error) => {
                warn!(%id, ?error, "Leaving undecodable student out of the listing");
                None
            }
        })
        .collect()
}

/// The four mutable fields, already validated. Used for both inserts and full updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub age: i64,
    pub course: String,
    pub remarks: String,
}

impl NewStudent {
    pub fn to_document(&self) -> Value {
        json!({
            "name": self.name,
            "age": self.age,
            "course": self.course,
            "remarks": self.remarks,
        })
    }
}

/// Raw add/edit form submission, before the age has been coerced.
#[derive(Deserialize, Debug)]
pub struct StudentForm {
    pub name: String,
    pub age: String,
    pub course: String,
    #[serde(default)]
    pub remarks: String,
}

impl TryFrom<StudentForm> for NewStudent {
    type Error = RosterError;

    fn try_from(form: StudentForm) -> Result<Self, Self::Error> {
        let StudentForm {
            name,
            age,
            course,
            remarks,
        } = form;

        let parsed_age = age
            .trim()
            .parse()
            .context(InvalidAgeSnafu { original: age })?;

        Ok(Self {
            name,
            age: parsed_age,
            course,
            remarks,
        })
    }
}
