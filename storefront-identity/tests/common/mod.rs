//! Shared fixtures: a cheap-hashing identity actor and a recording store
//! wrapper that logs every call and can be told to reject operations.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use storefront_identity::admin::{AddUserForm, AdminController, EditUserForm};
use storefront_identity::{
    Claim, IdentityActor, IdentityConfig, IdentityError, IdentityHandle, IdentityStore, NewUser,
    Result, Role, User,
};

pub const PASSWORD: &str = "Secure!Pass1";

pub fn test_config() -> IdentityConfig {
    IdentityConfig::new().with_hash_cost(64, 1)
}

/// Log output for failing tests; `RUST_LOG=storefront_identity=debug`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub async fn spawn_store() -> IdentityHandle {
    init_tracing();
    IdentityActor::spawn(test_config()).await.unwrap()
}

pub fn birthdate() -> NaiveDate {
    NaiveDate::from_ymd_opt(1990, 4, 2).unwrap()
}

pub fn new_user(name: &str) -> NewUser {
    NewUser {
        user_name: name.into(),
        email: format!("{name}@example.com"),
        password: PASSWORD.into(),
        birthdate: birthdate(),
        city: "Brussels".into(),
        country: "Belgium".into(),
    }
}

pub fn add_user_form(name: &str) -> AddUserForm {
    AddUserForm {
        user_name: name.into(),
        email: format!("{name}@example.com"),
        password: PASSWORD.into(),
        birthdate: "1990-04-02".into(),
        city: "Brussels".into(),
        country: "Belgium".into(),
    }
}

pub fn edit_user_form(name: &str, birthdate: &str) -> EditUserForm {
    EditUserForm {
        user_name: name.into(),
        email: format!("{name}@example.com"),
        birthdate: birthdate.into(),
        city: "Ghent".into(),
        country: "Belgium".into(),
    }
}

/// Store wrapper recording the name of every contract call
pub struct RecordingStore {
    inner: IdentityHandle,
    calls: Mutex<Vec<&'static str>>,
    failing: Mutex<HashSet<&'static str>>,
}

impl RecordingStore {
    pub fn new(inner: IdentityHandle) -> Arc<Self> {
        Arc::new(Self {
            inner,
            calls: Mutex::new(Vec::new()),
            failing: Mutex::new(HashSet::new()),
        })
    }

    pub async fn spawn() -> Arc<Self> {
        Self::new(spawn_store().await)
    }

    pub fn inner(&self) -> &IdentityHandle {
        &self.inner
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls that could change store state
    pub fn mutations(&self) -> Vec<&'static str> {
        self.calls()
            .into_iter()
            .filter(|op| {
                !(op.starts_with("find_")
                    || op.starts_with("list_")
                    || op.starts_with("get_")
                    || op.starts_with("is_"))
            })
            .collect()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Make every future call of `op` fail with a store rejection
    pub fn fail(&self, op: &'static str) {
        self.failing.lock().unwrap().insert(op);
    }

    fn record(&self, op: &'static str) -> Result<()> {
        self.calls.lock().unwrap().push(op);
        if self.failing.lock().unwrap().contains(op) {
            return Err(IdentityError::rejected(format!("{op} refused by store")));
        }
        Ok(())
    }
}

#[async_trait]
impl IdentityStore for RecordingStore {
    async fn find_user_by_id(&self, user_id: &str) -> Result<Option<User>> {
        self.record("find_user_by_id")?;
        self.inner.find_user_by_id(user_id).await
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.record("list_users")?;
        self.inner.list_users().await
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        self.record("create_user")?;
        self.inner.create_user(new_user).await
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        self.record("update_user")?;
        self.inner.update_user(user).await
    }

    async fn delete_user(&self, user_id: &str) -> Result<()> {
        self.record("delete_user")?;
        self.inner.delete_user(user_id).await
    }

    async fn get_user_claims(&self, user_id: &str) -> Result<Vec<Claim>> {
        self.record("get_user_claims")?;
        self.inner.get_user_claims(user_id).await
    }

    async fn add_user_claim(&self, user_id: &str, claim: Claim) -> Result<()> {
        self.record("add_user_claim")?;
        self.inner.add_user_claim(user_id, claim).await
    }

    async fn remove_user_claim(&self, user_id: &str, claim: &Claim) -> Result<()> {
        self.record("remove_user_claim")?;
        self.inner.remove_user_claim(user_id, claim).await
    }

    async fn is_user_in_role(&self, user_id: &str, role_name: &str) -> Result<bool> {
        self.record("is_user_in_role")?;
        self.inner.is_user_in_role(user_id, role_name).await
    }

    async fn add_user_to_role(&self, user_id: &str, role_name: &str) -> Result<()> {
        self.record("add_user_to_role")?;
        self.inner.add_user_to_role(user_id, role_name).await
    }

    async fn remove_user_from_role(&self, user_id: &str, role_name: &str) -> Result<()> {
        self.record("remove_user_from_role")?;
        self.inner.remove_user_from_role(user_id, role_name).await
    }

    async fn find_role_by_id(&self, role_id: &str) -> Result<Option<Role>> {
        self.record("find_role_by_id")?;
        self.inner.find_role_by_id(role_id).await
    }

    async fn list_roles(&self) -> Result<Vec<Role>> {
        self.record("list_roles")?;
        self.inner.list_roles().await
    }

    async fn create_role(&self, name: &str) -> Result<Role> {
        self.record("create_role")?;
        self.inner.create_role(name).await
    }

    async fn update_role(&self, role: &Role) -> Result<()> {
        self.record("update_role")?;
        self.inner.update_role(role).await
    }

    async fn delete_role(&self, role_id: &str) -> Result<()> {
        self.record("delete_role")?;
        self.inner.delete_role(role_id).await
    }

    async fn get_role_claims(&self, role_id: &str) -> Result<Vec<Claim>> {
        self.record("get_role_claims")?;
        self.inner.get_role_claims(role_id).await
    }

    async fn add_role_claim(&self, role_id: &str, claim: Claim) -> Result<()> {
        self.record("add_role_claim")?;
        self.inner.add_role_claim(role_id, claim).await
    }

    async fn remove_role_claim(&self, role_id: &str, claim: &Claim) -> Result<()> {
        self.record("remove_role_claim")?;
        self.inner.remove_role_claim(role_id, claim).await
    }
}

pub fn controller_over(store: &Arc<RecordingStore>) -> AdminController {
    AdminController::new(store.clone())
}
