//! Mock client implementing the UserApi trait
//!
//! Keeps users in memory and records each call instead of making HTTP requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::Mutex;
use user_core::{Result, User, UserApi, UserError, UserPatch, UserPayload};

use crate::fixture::{load_fixture, FixtureError};

/// The API operation a call was made to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    List,
    Get,
    Create,
    Update,
    Delete,
}

/// A single recorded call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallLogEntry {
    pub timestamp: DateTime<Utc>,
    pub method: Method,

    /// Path ID for get/update/delete
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Request body for create/update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<UserPayload>,

    /// Error message (if call failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

struct Store {
    users: Vec<User>,
    next_id: i64,
}

/// An in-memory `UserApi`
pub struct MockClient {
    base_url: String,
    store: Mutex<Store>,
    calls: Mutex<Vec<CallLogEntry>>,
    /// Queued failures per method, consumed one per call
    failures: Mutex<HashMap<Method, VecDeque<(u16, String)>>>,
}

impl MockClient {
    pub fn new(users: Vec<User>) -> Self {
        let next_id = users.iter().map(|u| u.user_id).max().unwrap_or(0) + 1;
        Self {
            base_url: "mock://memory".to_string(),
            store: Mutex::new(Store { users, next_id }),
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(HashMap::new()),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Seed the store from a JSON fixture file
    pub fn from_fixture(path: impl AsRef<Path>) -> std::result::Result<Self, FixtureError> {
        let path = path.as_ref();
        let mut client = Self::new(load_fixture(path)?);
        client.base_url = format!("mock://{}", path.display());
        Ok(client)
    }

    /// Make the next call to `method` fail with the given status and body
    pub fn fail_next(&self, method: Method, status: u16, message: &str) {
        self.failures
            .lock()
            .unwrap()
            .entry(method)
            .or_default()
            .push_back((status, message.to_string()));
    }

    /// All calls made so far, oldest first
    pub fn calls(&self) -> Vec<CallLogEntry> {
        self.calls.lock().unwrap().clone()
    }

    /// Just the methods of the calls made so far
    pub fn methods(&self) -> Vec<Method> {
        self.calls.lock().unwrap().iter().map(|c| c.method).collect()
    }

    pub fn call_count(&self, method: Method) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Snapshot of the stored users
    pub fn users(&self) -> Vec<User> {
        self.store.lock().unwrap().users.clone()
    }

    fn take_failure(&self, method: Method) -> Option<UserError> {
        self.failures
            .lock()
            .unwrap()
            .get_mut(&method)
            .and_then(|queue| queue.pop_front())
            .map(|(status, message)| UserError::Api { status, message })
    }

    /// Record the call and hand back the result unchanged
    fn log_call<T>(
        &self,
        method: Method,
        id: Option<i64>,
        payload: Option<&UserPayload>,
        result: Result<T>,
    ) -> Result<T> {
        let entry = CallLogEntry {
            timestamp: Utc::now(),
            method,
            id,
            payload: payload.cloned(),
            error: result.as_ref().err().map(|e| e.to_string()),
        };
        self.calls.lock().unwrap().push(entry);
        result
    }

    fn run<T>(
        &self,
        method: Method,
        id: Option<i64>,
        payload: Option<&UserPayload>,
        op: impl FnOnce(&mut Store) -> Result<T>,
    ) -> Result<T> {
        let result = match self.take_failure(method) {
            Some(err) => Err(err),
            None => op(&mut self.store.lock().unwrap()),
        };
        self.log_call(method, id, payload, result)
    }
}

fn build_user(user_id: i64, payload: &UserPayload) -> User {
    User {
        user_id,
        user_name: payload.user_name.clone(),
        first_name: payload.first_name.clone(),
        last_name: payload.last_name.clone(),
        email: payload.email.clone(),
        user_status: payload.user_status,
        department: payload.department.clone(),
    }
}

fn username_taken() -> UserError {
    UserError::Api {
        status: 409,
        message: "username already exists".to_string(),
    }
}

impl UserApi for MockClient {
    fn list_users(&self) -> Result<Vec<User>> {
        self.run(Method::List, None, None, |store| Ok(store.users.clone()))
    }

    fn get_user(&self, id: i64) -> Result<User> {
        self.run(Method::Get, Some(id), None, |store| {
            store
                .users
                .iter()
                .find(|u| u.user_id == id)
                .cloned()
                .ok_or(UserError::NotFound(id))
        })
    }

    fn get_user_fields(&self, id: i64) -> Result<UserPatch> {
        self.get_user(id).map(|user| UserPatch::from(&user))
    }

    fn create_user(&self, user: &UserPayload) -> Result<User> {
        self.run(Method::Create, None, Some(user), |store| {
            if store.users.iter().any(|u| u.user_name == user.user_name) {
                return Err(username_taken());
            }
            let created = build_user(store.next_id, user);
            store.next_id += 1;
            store.users.push(created.clone());
            Ok(created)
        })
    }

    fn update_user(&self, id: i64, user: &UserPayload) -> Result<User> {
        self.run(Method::Update, Some(id), Some(user), |store| {
            if store
                .users
                .iter()
                .any(|u| u.user_name == user.user_name && u.user_id != id)
            {
                return Err(username_taken());
            }
            let existing = store
                .users
                .iter_mut()
                .find(|u| u.user_id == id)
                .ok_or(UserError::NotFound(id))?;
            *existing = build_user(id, user);
            Ok(existing.clone())
        })
    }

    fn delete_user(&self, id: i64) -> Result<()> {
        self.run(Method::Delete, Some(id), None, |store| {
            store.users.retain(|u| u.user_id != id);
            Ok(())
        })
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
