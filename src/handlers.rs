use actix_web::web::Json;
use actix_web::{get, HttpResponse, ResponseError};
use serde::Serialize;

use crate::error::Error;

#[derive(Clone, Debug, Serialize)]
pub struct GreetingBody {
    pub message: &'static str,
}

#[get("/")]
#[tracing::instrument]
pub async fn root() -> Json<GreetingBody> {
    Json(GreetingBody {
        message: "Hello World",
    })
}

pub async fn path_does_not_exist() -> HttpResponse {
    Error::PathDoesNotExist.error_response()
}
