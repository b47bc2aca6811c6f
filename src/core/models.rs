use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::errors::ApiError;

// ============================================================================
// Content (news, achievements, gallery)
// ============================================================================

/// Table selector for the content handler, taken from the `type` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    News,
    Achievements,
    Gallery,
}

impl ContentKind {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "news" => Some(Self::News),
            "achievements" => Some(Self::Achievements),
            "gallery" => Some(Self::Gallery),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::News => "news",
            Self::Achievements => "achievements",
            Self::Gallery => "gallery",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct NewsItem {
    pub id: i32,
    pub title: String,
    pub category: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Achievement {
    pub id: i32,
    pub title: String,
    pub recipient: String,
    /// Free-text year or period, e.g. "2025".
    pub date: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct GalleryItem {
    pub id: i32,
    pub image_url: String,
    pub caption: String,
    pub created_at: NaiveDateTime,
}

/// A row of any content table, serialized as the bare row object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContentItem {
    News(NewsItem),
    Achievement(Achievement),
    Gallery(GalleryItem),
}

impl ContentItem {
    #[must_use]
    pub const fn id(&self) -> i32 {
        match self {
            Self::News(item) => item.id,
            Self::Achievement(item) => item.id,
            Self::Gallery(item) => item.id,
        }
    }
}

/// Raw POST body for `type=news`.
#[derive(Debug, Default, Deserialize)]
pub struct NewsPayload {
    pub title: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
}

/// Raw POST body for `type=achievements`.
#[derive(Debug, Default, Deserialize)]
pub struct AchievementPayload {
    pub title: Option<String>,
    pub recipient: Option<String>,
    pub date: Option<String>,
}

/// Raw POST body for `type=gallery`.
#[derive(Debug, Default, Deserialize)]
pub struct GalleryPayload {
    pub image_url: Option<String>,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewNews {
    pub title: String,
    pub category: String,
    /// `None` lets the database fill in `CURRENT_DATE`.
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAchievement {
    pub title: String,
    pub recipient: String,
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewGalleryItem {
    pub image_url: String,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NewContent {
    News(NewNews),
    Achievement(NewAchievement),
    Gallery(NewGalleryItem),
}

impl NewContent {
    #[must_use]
    pub const fn kind(&self) -> ContentKind {
        match self {
            Self::News(_) => ContentKind::News,
            Self::Achievement(_) => ContentKind::Achievements,
            Self::Gallery(_) => ContentKind::Gallery,
        }
    }
}

impl TryFrom<NewsPayload> for NewNews {
    type Error = ApiError;

    fn try_from(payload: NewsPayload) -> Result<Self, Self::Error> {
        Ok(Self {
            title: required(payload.title, "title")?,
            category: required(payload.category, "category")?,
            date: optional_date(payload.date)?,
        })
    }
}

impl TryFrom<AchievementPayload> for NewAchievement {
    type Error = ApiError;

    fn try_from(payload: AchievementPayload) -> Result<Self, Self::Error> {
        Ok(Self {
            title: required(payload.title, "title")?,
            recipient: required(payload.recipient, "recipient")?,
            date: optional_text(payload.date),
        })
    }
}

impl TryFrom<GalleryPayload> for NewGalleryItem {
    type Error = ApiError;

    fn try_from(payload: GalleryPayload) -> Result<Self, Self::Error> {
        Ok(Self {
            image_url: required(payload.image_url, "image_url")?,
            caption: payload.caption.unwrap_or_default(),
        })
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, ApiError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::Validation(format!("Missing required field: {field}")))
}

fn optional_text(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn optional_date(value: Option<String>) -> Result<Option<NaiveDate>, ApiError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ApiError::Validation(format!("Invalid date: {raw}"))),
    }
}

// ============================================================================
// Registrations
// ============================================================================

pub const MSG_ALL_FIELDS_REQUIRED: &str = "Все поля обязательны для заполнения";
pub const MSG_REGISTRATION_ID_REQUIRED: &str = "ID регистрации обязателен";
pub const MSG_NO_FIELDS_TO_UPDATE: &str = "Нет полей для обновления";
pub const MSG_REGISTRATION_NOT_FOUND: &str = "Регистрация не найдена";
pub const MSG_REGISTRATION_DELETED: &str = "Регистрация удалена";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Registration {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub user_id: String,
    pub is_admin: bool,
    pub created_at: NaiveDateTime,
}

/// Raw POST body for a new registration.
#[derive(Debug, Default, Deserialize)]
pub struct RegistrationPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRegistration {
    pub first_name: String,
    pub last_name: String,
    pub user_id: String,
}

impl TryFrom<RegistrationPayload> for NewRegistration {
    type Error = ApiError;

    fn try_from(payload: RegistrationPayload) -> Result<Self, Self::Error> {
        let trimmed = |v: Option<String>| {
            v.map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .ok_or_else(|| ApiError::Validation(MSG_ALL_FIELDS_REQUIRED.to_string()))
        };

        Ok(Self {
            first_name: trimmed(payload.first_name)?,
            last_name: trimmed(payload.last_name)?,
            user_id: trimmed(payload.user_id)?,
        })
    }
}

/// Raw PUT body; any subset of the updatable columns.
#[derive(Debug, Default, Deserialize)]
pub struct RegistrationPatch {
    pub is_admin: Option<bool>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_id: Option<String>,
}

/// One column assignment in a registration update. The variants are the full
/// set of columns a PUT may touch.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationField {
    IsAdmin(bool),
    FirstName(String),
    LastName(String),
    UserId(String),
}

impl RegistrationField {
    #[must_use]
    pub const fn column(&self) -> &'static str {
        match self {
            Self::IsAdmin(_) => "is_admin",
            Self::FirstName(_) => "first_name",
            Self::LastName(_) => "last_name",
            Self::UserId(_) => "user_id",
        }
    }

    /// Writes this assignment into `registration`.
    pub fn apply(&self, registration: &mut Registration) {
        match self {
            Self::IsAdmin(v) => registration.is_admin = *v,
            Self::FirstName(v) => registration.first_name.clone_from(v),
            Self::LastName(v) => registration.last_name.clone_from(v),
            Self::UserId(v) => registration.user_id.clone_from(v),
        }
    }
}

/// Non-empty list of column assignments built from a [`RegistrationPatch`].
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationUpdate {
    fields: Vec<RegistrationField>,
}

impl RegistrationUpdate {
    #[must_use]
    pub fn fields(&self) -> &[RegistrationField] {
        &self.fields
    }
}

impl TryFrom<RegistrationPatch> for RegistrationUpdate {
    type Error = ApiError;

    fn try_from(patch: RegistrationPatch) -> Result<Self, Self::Error> {
        let text = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

        let mut fields = Vec::new();
        if let Some(is_admin) = patch.is_admin {
            fields.push(RegistrationField::IsAdmin(is_admin));
        }
        if let Some(first_name) = text(patch.first_name) {
            fields.push(RegistrationField::FirstName(first_name));
        }
        if let Some(last_name) = text(patch.last_name) {
            fields.push(RegistrationField::LastName(last_name));
        }
        if let Some(user_id) = text(patch.user_id) {
            fields.push(RegistrationField::UserId(user_id));
        }

        if fields.is_empty() {
            return Err(ApiError::Validation(MSG_NO_FIELDS_TO_UPDATE.to_string()));
        }
        Ok(Self { fields })
    }
}
