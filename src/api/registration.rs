//! Registration Lambda handler.
//!
//! `GET` lists registrations, `POST` creates one, `PUT ?id=` updates the
//! supplied fields and `DELETE ?id=` removes a registration. Missing targets
//! of `PUT`/`DELETE` are reported as 404.

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::info;

use super::helpers::{self, ApiResponse};
use super::parsing::{self, Method};
use crate::core::models::{
    MSG_REGISTRATION_DELETED, MSG_REGISTRATION_ID_REQUIRED, MSG_REGISTRATION_NOT_FOUND,
    NewRegistration, RegistrationPatch, RegistrationPayload, RegistrationUpdate,
};
use crate::errors::ApiError;
use crate::store::{Connector, RegistrationStore};

#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationRequest {
    List,
    Create(NewRegistration),
    Update { id: i32, update: RegistrationUpdate },
    Delete { id: i32 },
}

impl RegistrationRequest {
    pub fn from_event(method: &Method, event: &Value) -> Result<Self, ApiError> {
        match method {
            Method::Get => Ok(Self::List),
            Method::Post => {
                let payload = parsing::json_body::<RegistrationPayload>(event)?;
                Ok(Self::Create(NewRegistration::try_from(payload)?))
            }
            Method::Put => {
                let id = parsing::id_param(event, MSG_REGISTRATION_ID_REQUIRED)?;
                let patch = parsing::json_body::<RegistrationPatch>(event)?;
                Ok(Self::Update {
                    id,
                    update: RegistrationUpdate::try_from(patch)?,
                })
            }
            Method::Delete => Ok(Self::Delete {
                id: parsing::id_param(event, MSG_REGISTRATION_ID_REQUIRED)?,
            }),
            _ => Err(ApiError::MethodNotAllowed),
        }
    }
}

/// Lambda entrypoint for the registration function.
///
/// # Errors
///
/// Never fails; every outcome is encoded in the returned [`ApiResponse`].
pub async fn function_handler<C>(
    connector: &C,
    event: LambdaEvent<Value>,
) -> Result<ApiResponse, Error>
where
    C: Connector,
    C::Store: RegistrationStore,
{
    Ok(handle_event(connector, &event.payload).await)
}

#[tracing::instrument(level = "info", skip_all)]
pub async fn handle_event<C>(connector: &C, event: &Value) -> ApiResponse
where
    C: Connector,
    C::Store: RegistrationStore,
{
    let method = parsing::http_method(event);
    if method == Method::Options {
        return helpers::preflight();
    }

    let request = match RegistrationRequest::from_event(&method, event) {
        Ok(r) => r,
        Err(e) => {
            info!(?method, "Rejected registration request: {}", e);
            return helpers::error_response(&e);
        }
    };
    info!(?request, "Registration request");

    let mut store = match connector.connect().await {
        Ok(s) => s,
        Err(e) => return helpers::error_response(&e),
    };
    let result = execute(&mut store, request).await;
    connector.release(store).await;

    result.unwrap_or_else(|e| helpers::error_response(&e))
}

async fn execute<S>(store: &mut S, request: RegistrationRequest) -> Result<ApiResponse, ApiError>
where
    S: RegistrationStore + ?Sized,
{
    let not_found = || ApiError::NotFound(MSG_REGISTRATION_NOT_FOUND.to_string());

    match request {
        RegistrationRequest::List => {
            let rows = store.list().await?;
            helpers::json_response(200, &rows)
        }
        RegistrationRequest::Create(registration) => {
            let row = store.insert(registration).await?;
            info!(id = row.id, "Registration created");
            helpers::json_response(201, &row)
        }
        RegistrationRequest::Update { id, update } => {
            let row = store.update(id, &update).await?.ok_or_else(not_found)?;
            helpers::json_response(200, &row)
        }
        RegistrationRequest::Delete { id } => {
            store.delete(id).await?.ok_or_else(not_found)?;
            Ok(helpers::ok_message(MSG_REGISTRATION_DELETED))
        }
    }
}
