use std::fmt::{Debug, Display};
use std::io::Error as IoError;

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use derivative::Derivative;
use serde::{Serialize, Serializer};
use sqlx::Error as DatabaseError;

use crate::campaign::CampaignId;

#[derive(Debug, Serialize, Derivative)]
#[derivative(PartialEq, Eq)]
#[serde(untagged)]
pub enum Error {
    // 400
    #[serde(serialize_with = "display")]
    InvalidJson(#[derivative(PartialEq = "ignore")] JsonPayloadError),
    #[serde(serialize_with = "display")]
    InvalidPath(#[derivative(PartialEq = "ignore")] PathError),

    // 404
    PathDoesNotExist,
    CampaignDoesNotExist {
        campaign_id: CampaignId,
    },

    // 500
    #[serde(serialize_with = "display")]
    FailedDatabaseCall(#[derivative(PartialEq = "ignore")] DatabaseError),
    #[serde(serialize_with = "display")]
    IoError(#[derivative(PartialEq = "ignore")] IoError),
}

impl Error {
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::InvalidJson(_) => "E4001000",
            Error::InvalidPath(_) => "E4001001",
            Error::PathDoesNotExist => "E4041000",
            Error::CampaignDoesNotExist { .. } => "E4041001",
            Error::FailedDatabaseCall(_) => "E5001000",
            Error::IoError(_) => "E5001001",
        }
    }

    pub fn error_message(&self) -> &'static str {
        match self {
            Error::InvalidJson(_) => "The given json could not be parsed",
            Error::InvalidPath(_) => "The given path could not be parsed",
            Error::PathDoesNotExist => "The requested path does not exist",
            Error::CampaignDoesNotExist { .. } => "The requested campaign does not exist",
            Error::FailedDatabaseCall(_) => {
                "An error occurred when communicating with the database"
            }
            Error::IoError(_) => "An error occurred during an I/O operation",
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidJson(_) => StatusCode::BAD_REQUEST,
            Error::InvalidPath(_) => StatusCode::BAD_REQUEST,
            Error::PathDoesNotExist => StatusCode::NOT_FOUND,
            Error::CampaignDoesNotExist { .. } => StatusCode::NOT_FOUND,
            Error::FailedDatabaseCall(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        #[derive(Serialize)]
        struct Dummy<'a> {
            error_code: &'static str,
            error_message: &'static str,
            error_meta: &'a Error,
        }

        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "request failed");
        }

        // a missing campaign is reported by status alone
        if let Error::CampaignDoesNotExist { .. } = self {
            return HttpResponse::build(status).finish();
        }

        HttpResponse::build(status).json(&Dummy {
            error_code: self.error_code(),
            error_message: self.error_message(),
            error_meta: self,
        })
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        Debug::fmt(self, f)
    }
}

impl From<DatabaseError> for Error {
    fn from(error: DatabaseError) -> Error {
        Error::FailedDatabaseCall(error)
    }
}

impl From<IoError> for Error {
    fn from(error: IoError) -> Error {
        Error::IoError(error)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidJson(err) => Some(err),
            Error::InvalidPath(err) => Some(err),
            Error::FailedDatabaseCall(err) => Some(err),
            Error::IoError(err) => Some(err),
            _ => None,
        }
    }
}

fn display<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    serializer.collect_str(value)
}
