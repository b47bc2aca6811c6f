#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde_json::{Value, json};

use club_api::ApiError;
use club_api::core::models::{
    Achievement, ContentItem, ContentKind, GalleryItem, NewContent, NewRegistration, NewsItem,
    Registration, RegistrationUpdate,
};
use club_api::store::{Connector, ContentStore, RegistrationStore};

#[derive(Debug, Default)]
pub struct FakeDb {
    pub news: Vec<NewsItem>,
    pub achievements: Vec<Achievement>,
    pub gallery: Vec<GalleryItem>,
    pub registrations: Vec<Registration>,
    next_id: i32,
    ticks: i64,
}

impl FakeDb {
    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    /// Strictly increasing timestamp, one second per row.
    fn now(&mut self) -> NaiveDateTime {
        self.ticks += 1;
        Self::today().and_hms_opt(9, 0, 0).unwrap() + TimeDelta::seconds(self.ticks)
    }
}

/// In-memory connector counting how often a connection was opened and released.
#[derive(Default)]
pub struct FakeConnector {
    pub db: Arc<Mutex<FakeDb>>,
    pub connects: AtomicUsize,
    pub releases: AtomicUsize,
    /// When set, `connect` fails with this message.
    pub connect_error: Option<String>,
    /// When set, every statement fails with this message.
    pub query_error: Option<String>,
}

impl FakeConnector {
    pub fn failing_connect(message: &str) -> Self {
        Self {
            connect_error: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn failing_queries(message: &str) -> Self {
        Self {
            query_error: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }
}

pub struct FakeStore {
    db: Arc<Mutex<FakeDb>>,
    query_error: Option<String>,
}

impl FakeStore {
    fn check(&self) -> Result<(), ApiError> {
        match &self.query_error {
            Some(msg) => Err(ApiError::Database(sqlx::Error::Protocol(msg.clone()))),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Connector for FakeConnector {
    type Store = FakeStore;

    async fn connect(&self) -> Result<FakeStore, ApiError> {
        if let Some(msg) = &self.connect_error {
            return Err(ApiError::Database(sqlx::Error::Protocol(msg.clone())));
        }
        self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(FakeStore {
            db: Arc::clone(&self.db),
            query_error: self.query_error.clone(),
        })
    }

    async fn release(&self, _store: FakeStore) {
        self.releases.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ContentStore for FakeStore {
    async fn list(&mut self, kind: ContentKind) -> Result<Vec<ContentItem>, ApiError> {
        self.check()?;
        let db = self.db.lock().unwrap();
        let items = match kind {
            ContentKind::News => {
                let mut rows = db.news.clone();
                rows.sort_by(|a, b| b.date.cmp(&a.date));
                rows.into_iter().map(ContentItem::News).collect()
            }
            ContentKind::Achievements => {
                let mut rows = db.achievements.clone();
                rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                rows.into_iter().map(ContentItem::Achievement).collect()
            }
            ContentKind::Gallery => {
                let mut rows = db.gallery.clone();
                rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                rows.into_iter().map(ContentItem::Gallery).collect()
            }
        };
        Ok(items)
    }

    async fn insert(&mut self, item: NewContent) -> Result<ContentItem, ApiError> {
        self.check()?;
        let mut db = self.db.lock().unwrap();
        let id = db.next_id();
        let created_at = db.now();
        let inserted = match item {
            NewContent::News(n) => {
                let row = NewsItem {
                    id,
                    title: n.title,
                    category: n.category,
                    date: n.date.unwrap_or_else(FakeDb::today),
                };
                db.news.push(row.clone());
                ContentItem::News(row)
            }
            NewContent::Achievement(a) => {
                let row = Achievement {
                    id,
                    title: a.title,
                    recipient: a.recipient,
                    date: a.date,
                    created_at,
                };
                db.achievements.push(row.clone());
                ContentItem::Achievement(row)
            }
            NewContent::Gallery(g) => {
                let row = GalleryItem {
                    id,
                    image_url: g.image_url,
                    caption: g.caption,
                    created_at,
                };
                db.gallery.push(row.clone());
                ContentItem::Gallery(row)
            }
        };
        Ok(inserted)
    }

    async fn delete(&mut self, kind: ContentKind, id: i32) -> Result<u64, ApiError> {
        self.check()?;
        let mut db = self.db.lock().unwrap();
        let before;
        let after;
        match kind {
            ContentKind::News => {
                before = db.news.len();
                db.news.retain(|r| r.id != id);
                after = db.news.len();
            }
            ContentKind::Achievements => {
                before = db.achievements.len();
                db.achievements.retain(|r| r.id != id);
                after = db.achievements.len();
            }
            ContentKind::Gallery => {
                before = db.gallery.len();
                db.gallery.retain(|r| r.id != id);
                after = db.gallery.len();
            }
        }
        Ok((before - after) as u64)
    }
}

#[async_trait]
impl RegistrationStore for FakeStore {
    async fn list(&mut self) -> Result<Vec<Registration>, ApiError> {
        self.check()?;
        let db = self.db.lock().unwrap();
        let mut rows = db.registrations.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn insert(&mut self, registration: NewRegistration) -> Result<Registration, ApiError> {
        self.check()?;
        let mut db = self.db.lock().unwrap();
        let row = Registration {
            id: db.next_id(),
            first_name: registration.first_name,
            last_name: registration.last_name,
            user_id: registration.user_id,
            is_admin: false,
            created_at: db.now(),
        };
        db.registrations.push(row.clone());
        Ok(row)
    }

    async fn update(
        &mut self,
        id: i32,
        update: &RegistrationUpdate,
    ) -> Result<Option<Registration>, ApiError> {
        self.check()?;
        let mut db = self.db.lock().unwrap();
        let Some(row) = db.registrations.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        for field in update.fields() {
            field.apply(row);
        }
        Ok(Some(row.clone()))
    }

    async fn delete(&mut self, id: i32) -> Result<Option<Registration>, ApiError> {
        self.check()?;
        let mut db = self.db.lock().unwrap();
        let pos = db.registrations.iter().position(|r| r.id == id);
        Ok(pos.map(|i| db.registrations.remove(i)))
    }
}

/// Builds a REST API Gateway event.
pub fn event(method: &str, params: Value, body: Option<Value>) -> Value {
    let mut event = json!({
        "httpMethod": method,
        "queryStringParameters": params,
    });
    if let Some(body) = body {
        event["body"] = Value::String(body.to_string());
    }
    event
}

pub fn body_json(response: &club_api::api::ApiResponse) -> Value {
    serde_json::from_str(&response.body).expect("response body is JSON")
}
