use crate::data::student::StudentId;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use snafu::Snafu;
use std::num::ParseIntError;

pub type RosterResult<T> = Result<T, RosterError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RosterError {
    #[snafu(display("Error opening database"))]
    OpenDatabase { source: sqlx::Error },
    #[snafu(display("Error migrating DB schema"))]
    MigrateError { source: sqlx::migrate::MigrateError },
    #[snafu(display("An error occurred: {source}"))]
    MakeQuery { source: sqlx::Error },
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse IP port"))]
    ParsePort { source: ParseIntError },
    #[snafu(display("Unknown student store kind {:?}, expected `postgres` or `memory`", kind))]
    UnknownStoreKind { kind: String },
    #[snafu(display("Invalid student ID: {:?}", original))]
    InvalidIdentifier {
        source: uuid::Error,
        original: String,
    },
    #[snafu(display("Student not found: {}", id))]
    MissingStudent { id: StudentId },
    #[snafu(display("Age must be a whole number, got {:?}", original))]
    InvalidAge {
        source: ParseIntError,
        original: String,
    },
    #[snafu(display("Stored document for student {} is malformed: {}", id, source))]
    DecodeDocument {
        source: serde_json::Error,
        id: StudentId,
    },
    #[snafu(display("Stored age {:?} for student {} is not a whole number", original, id))]
    DocumentAge {
        source: ParseIntError,
        id: StudentId,
        original: String,
    },
    #[snafu(display("Stored age {} for student {} is not a whole number", age, id))]
    FractionalAge { id: StudentId, age: f64 },
    #[snafu(display("An error occurred: {}", message))]
    Unexpected { message: String },
}

impl RosterError {
    /// Collapses everything except user input validation into a generic server fault.
    ///
    /// The write handlers that don't look the record up first report a bad identifier or a
    /// missing record the same way as a store failure.
    #[must_use]
    pub fn into_server_fault(self) -> Self {
        match self {
            Self::InvalidAge { .. } | Self::Unexpected { .. } => self,
            other => Self::Unexpected {
                message: other.to_string(),
            },
        }
    }

    pub const fn status_code(&self) -> StatusCode {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const NF: StatusCode = StatusCode::NOT_FOUND; //not found
        const BI: StatusCode = StatusCode::BAD_REQUEST; //bad input

        match self {
            Self::OpenDatabase { .. } | Self::MigrateError { .. } | Self::MakeQuery { .. } => ISE,
            Self::BadEnvVar { .. } | Self::ParsePort { .. } | Self::UnknownStoreKind { .. } => {
                ISE
            }
            Self::InvalidIdentifier { .. } | Self::InvalidAge { .. } => BI,
            Self::MissingStudent { .. } => NF,
            Self::DecodeDocument { .. } | Self::DocumentAge { .. } | Self::FractionalAge { .. } => {
                ISE
            }
            Self::Unexpected { .. } => ISE,
        }
    }
}

impl IntoResponse for RosterError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            error!(?self, "Error!");
        } else {
            warn!(?self, "Rejected request");
        }
        (status_code, self.to_string()).into_response()
    }
}
