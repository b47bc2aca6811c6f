//! Content Lambda handler - news, achievements and gallery selected by `?type=`.
//!
//! - `GET` lists every row of the table, newest first
//! - `POST` inserts one row from the JSON body and returns it with 201
//! - `DELETE ?id=` removes a row by primary key
//! - `OPTIONS` answers CORS preflight without touching the database

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{info, warn};

use super::helpers::{self, ApiResponse};
use super::parsing::{self, Method};
use crate::core::models::{
    AchievementPayload, ContentKind, GalleryPayload, NewAchievement, NewContent, NewGalleryItem,
    NewNews, NewsPayload,
};
use crate::errors::ApiError;
use crate::store::{Connector, ContentStore};

pub const MSG_INVALID_TYPE: &str = "Invalid content type";
pub const MSG_ID_REQUIRED: &str = "ID is required";
pub const MSG_DELETED: &str = "Deleted successfully";

/// A validated content request, ready to run against a store.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentRequest {
    List(ContentKind),
    Create(NewContent),
    Delete { kind: ContentKind, id: i32 },
}

impl ContentRequest {
    /// Validates method, `type`, `id` and body before any database work.
    pub fn from_event(method: &Method, event: &Value) -> Result<Self, ApiError> {
        match method {
            Method::Get => Ok(Self::List(content_kind(event)?)),
            Method::Post => {
                let item = match content_kind(event)? {
                    ContentKind::News => NewContent::News(NewNews::try_from(
                        parsing::json_body::<NewsPayload>(event)?,
                    )?),
                    ContentKind::Achievements => NewContent::Achievement(
                        NewAchievement::try_from(parsing::json_body::<AchievementPayload>(event)?)?,
                    ),
                    ContentKind::Gallery => NewContent::Gallery(NewGalleryItem::try_from(
                        parsing::json_body::<GalleryPayload>(event)?,
                    )?),
                };
                Ok(Self::Create(item))
            }
            Method::Delete => {
                let id = parsing::id_param(event, MSG_ID_REQUIRED)?;
                Ok(Self::Delete {
                    kind: content_kind(event)?,
                    id,
                })
            }
            _ => Err(ApiError::MethodNotAllowed),
        }
    }
}

fn content_kind(event: &Value) -> Result<ContentKind, ApiError> {
    parsing::query_param(event, "type")
        .and_then(|t| ContentKind::parse(&t))
        .ok_or_else(|| ApiError::Validation(MSG_INVALID_TYPE.to_string()))
}

/// Lambda entrypoint for the content function.
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
    C::Store: ContentStore,
{
    Ok(handle_event(connector, &event.payload).await)
}

/// Maps one API Gateway event to one response. A connection is opened only
/// once the request has passed validation, and is released on every path.
#[tracing::instrument(level = "info", skip_all)]
pub async fn handle_event<C>(connector: &C, event: &Value) -> ApiResponse
where
    C: Connector,
    C::Store: ContentStore,
{
    let method = parsing::http_method(event);
    if method == Method::Options {
        return helpers::preflight();
    }

    let request = match ContentRequest::from_event(&method, event) {
        Ok(r) => r,
        Err(e) => {
            info!(?method, "Rejected content request: {}", e);
            return helpers::error_response(&e);
        }
    };
    info!(?request, "Content request");

    let mut store = match connector.connect().await {
        Ok(s) => s,
        Err(e) => return helpers::error_response(&e),
    };
    let result = execute(&mut store, request).await;
    connector.release(store).await;

    result.unwrap_or_else(|e| helpers::error_response(&e))
}

async fn execute<S>(store: &mut S, request: ContentRequest) -> Result<ApiResponse, ApiError>
where
    S: ContentStore + ?Sized,
{
    match request {
        ContentRequest::List(kind) => {
            let items = store.list(kind).await?;
            helpers::json_response(200, &items)
        }
        ContentRequest::Create(item) => {
            let table = item.kind().as_str();
            let inserted = store.insert(item).await?;
            info!(table, id = inserted.id(), "Content row inserted");
            helpers::json_response(201, &inserted)
        }
        ContentRequest::Delete { kind, id } => {
            let removed = store.delete(kind, id).await?;
            // Unlike registrations, a content delete reports success even when
            // nothing matched.
            if removed == 0 {
                warn!(table = kind.as_str(), id, "Delete matched no rows");
            }
            Ok(helpers::ok_message(MSG_DELETED))
        }
    }
}
