//! Shared in-memory repositories and fixtures for identity tests

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use identity_service::contract::{Session, User, UserFilter};
use identity_service::domain::repository::{SessionRepository, UserRepository};
use identity_service::domain::{CredentialBackend, Service};
use idgm_kit::PageRequest;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

pub fn print_test_header(test_name: &str, purpose: &str) {
    println!("\n🧪 TEST: {}", test_name);
    println!("📋 PURPOSE: {}", purpose);
}

#[derive(Clone, Default)]
pub struct MockUserRepo {
    data: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MockUserRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.data.read().len()
    }
}

#[async_trait]
impl UserRepository for MockUserRepo {
    async fn create(&self, user: &User) -> anyhow::Result<User> {
        self.data.write().insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        Ok(self.data.read().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        Ok(self.data.read().values().find(|u| u.email == email).cloned())
    }

    async fn update(&self, user: &User) -> anyhow::Result<User> {
        self.data.write().insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn list(&self, filter: &UserFilter, page: PageRequest) -> anyhow::Result<(Vec<User>, u64)> {
        let search = filter.search.as_deref().map(str::to_lowercase);
        let mut users: Vec<User> = self
            .data
            .read()
            .values()
            .filter(|u| filter.role.is_none_or(|r| u.role == r))
            .filter(|u| {
                search.as_deref().is_none_or(|s| {
                    u.email.contains(s) || u.name.to_lowercase().contains(s)
                })
            })
            .cloned()
            .collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = users.len() as u64;
        Ok((page.slice(&users), total))
    }
}

#[derive(Clone, Default)]
pub struct MockSessionRepo {
    data: Arc<RwLock<HashMap<String, Session>>>,
}

impl MockSessionRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.data.read().len()
    }

    /// Force every stored session to have expired
    pub fn expire_all(&self) {
        let past = Utc::now() - chrono::Duration::minutes(1);
        for session in self.data.write().values_mut() {
            session.expires_at = past;
        }
    }
}

#[async_trait]
impl SessionRepository for MockSessionRepo {
    async fn create(&self, session: &Session) -> anyhow::Result<()> {
        self.data
            .write()
            .insert(session.token_hash.clone(), session.clone());
        Ok(())
    }

    async fn find(&self, token_hash: &str) -> anyhow::Result<Option<Session>> {
        Ok(self.data.read().get(token_hash).cloned())
    }

    async fn delete(&self, token_hash: &str) -> anyhow::Result<()> {
        self.data.write().remove(token_hash);
        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> anyhow::Result<u64> {
        let mut data = self.data.write();
        let before = data.len();
        data.retain(|_, s| s.expires_at > now);
        Ok((before - data.len()) as u64)
    }
}

pub struct TestContext {
    pub service: Arc<Service>,
    pub users: Arc<MockUserRepo>,
    pub sessions: Arc<MockSessionRepo>,
}

pub fn create_test_context(backend: Option<Arc<dyn CredentialBackend>>) -> TestContext {
    let users = Arc::new(MockUserRepo::new());
    let sessions = Arc::new(MockSessionRepo::new());
    let service = Arc::new(Service::new(
        users.clone(),
        sessions.clone(),
        backend,
        Duration::from_secs(3600),
    ));
    TestContext {
        service,
        users,
        sessions,
    }
}
