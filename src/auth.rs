use log::debug;

use crate::backend::Backend;
use crate::error::Result;
use crate::model::Session;
use crate::store::Store;

/// Owns the store and caches the active session.
///
/// The cache is what callers consult to decide whether someone is logged in;
/// it is not re-read from the store on every access.
pub struct AuthContext<B> {
    store: Store<B>,
    session: Option<Session>,
}

impl<B: Backend> AuthContext<B> {
    pub fn new(store: Store<B>) -> Result<Self> {
        let session = store.current_session()?;
        debug!("Loaded session for {:?}", session.as_ref().map(|s| &s.username));
        Ok(AuthContext { store, session })
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// On failure the cached session is left as it was
    pub fn login(&mut self, username: &str, password: &str) -> Result<&Session> {
        let session = self.store.login(username, password)?;
        Ok(self.session.insert(session))
    }

    pub fn register(&mut self, username: &str, password: &str) -> Result<&Session> {
        let session = self.store.register(username, password)?;
        Ok(self.session.insert(session))
    }

    /// The cache is cleared even if the store fails to forget the session
    pub fn logout(&mut self) -> Result<()> {
        let result = self.store.logout();
        self.session = None;
        result
    }

    pub fn store(&self) -> &Store<B> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store<B> {
        &mut self.store
    }

    pub fn into_store(self) -> Store<B> {
        self.store
    }
}
