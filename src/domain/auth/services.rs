use std::sync::Arc;

use super::entities::{Session, User};
use super::errors::{AuthError, RepositoryError};
use super::ports::{PasswordHasher, SessionRepository, TokenIssuer, UserRepository};
use super::value_objects::{Email, Password, PasswordHash, SessionToken, Username};

/// Authentication service implementing the session lifecycle
///
/// Orchestrates the four ports: user and session repositories, the password
/// hasher, and the token issuer. State machine over a token: Anonymous ->
/// (login) -> Authenticated -> (logout or expiry) -> Anonymous.
pub struct AuthService {
  user_repo: Arc<dyn UserRepository>,
  session_repo: Arc<dyn SessionRepository>,
  password_hasher: Arc<dyn PasswordHasher>,
  token_issuer: Arc<dyn TokenIssuer>,
}

impl AuthService {
  /// Creates a new instance of AuthService
  pub fn new(
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_issuer: Arc<dyn TokenIssuer>,
  ) -> Self {
    Self {
      user_repo,
      session_repo,
      password_hasher,
      token_issuer,
    }
  }

  /// Registers a new user
  ///
  /// Hashes the password and persists the user. The email pre-check gives a
  /// friendly error on the common path; the store's unique index is what
  /// actually guarantees uniqueness under concurrent registration, so a
  /// duplicate-key violation from `create` is remapped here as well.
  ///
  /// # Errors
  /// Returns `AuthError::EmailAlreadyExists` if the email is already taken.
  pub async fn register(
    &self,
    username: Username,
    email: Email,
    password: Password,
  ) -> Result<User, AuthError> {
    if let Some(_existing) = self.user_repo.find_by_email(&email).await? {
      return Err(AuthError::EmailAlreadyExists);
    }

    let password_hash = self.password_hasher.hash(&password).await?;

    let user = User::new(
      username.into_inner(),
      email.into_inner(),
      password_hash.into_inner(),
    );

    match self.user_repo.create(user).await {
      Ok(user) => Ok(user),
      Err(AuthError::Repository(RepositoryError::DuplicateKey(_))) => {
        Err(AuthError::EmailAlreadyExists)
      }
      Err(e) => Err(e),
    }
  }

  /// Authenticates a user and creates a new session
  ///
  /// Returns the persisted session together with the raw token; the token is
  /// never stored, only its hash. Prior sessions for the same user are left
  /// untouched.
  ///
  /// # Errors
  /// Returns `AuthError::InvalidCredentials` for both an unknown email and a
  /// wrong password, so callers cannot probe which emails are registered.
  pub async fn login(
    &self,
    email: Email,
    password: Password,
  ) -> Result<(Session, SessionToken), AuthError> {
    let user = match self.user_repo.find_by_email(&email).await? {
      Some(user) => user,
      None => {
        // Internally a distinct event, externally indistinguishable
        // from a wrong password
        tracing::debug!("Login attempt for unknown email");
        return Err(AuthError::InvalidCredentials);
      }
    };

    let password_hash = PasswordHash::from_hash(&user.password_hash)?;

    let is_valid = self
      .password_hasher
      .verify(&password, &password_hash)
      .await?;

    if !is_valid {
      tracing::debug!(user_id = %user.id, "Login attempt with wrong password");
      return Err(AuthError::InvalidCredentials);
    }

    let (token, expires_at) = self.token_issuer.issue().await?;

    let session = Session::new(user.id, token.hash().into_inner(), expires_at);
    let created_session = self.session_repo.save(session).await?;

    Ok((created_session, token))
  }

  /// Revokes the session holding this token
  ///
  /// Idempotent: an absent, already-revoked, or expired token still yields
  /// success. Unconditional revocation never fails for the caller's benefit.
  pub async fn logout(&self, token: SessionToken) -> Result<(), AuthError> {
    let token_hash = token.hash();

    self
      .session_repo
      .delete_by_token_hash(token_hash.as_str())
      .await?;

    Ok(())
  }

  /// Validates a session token and returns the associated user
  ///
  /// Expiry is enforced here at read time, regardless of whether the row has
  /// been swept. An expired row observed during authorize is deleted as
  /// housekeeping.
  ///
  /// # Errors
  /// Returns `AuthError::InvalidToken` if the session is absent or expired.
  pub async fn authorize(&self, token: SessionToken) -> Result<User, AuthError> {
    let token_hash = token.hash();

    let session = self
      .session_repo
      .find_by_token_hash(token_hash.as_str())
      .await?
      .ok_or(AuthError::InvalidToken)?;

    if session.is_expired() {
      self
        .session_repo
        .delete_by_token_hash(token_hash.as_str())
        .await?;
      return Err(AuthError::InvalidToken);
    }

    self
      .user_repo
      .find_by_id(session.user_id)
      .await?
      .ok_or(AuthError::InvalidToken)
  }

  /// Returns all registered users (administrative listing)
  pub async fn list_users(&self) -> Result<Vec<User>, AuthError> {
    self.user_repo.find_all().await
  }

  /// Looks up a single user by email
  ///
  /// # Errors
  /// Returns `AuthError::UserNotFound` if no user holds this email.
  pub async fn find_user_by_email(&self, email: Email) -> Result<User, AuthError> {
    self
      .user_repo
      .find_by_email(&email)
      .await?
      .ok_or(AuthError::UserNotFound)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use argon2::password_hash::SaltString;
  use argon2::{Algorithm, Argon2, Params, PasswordHasher as _, PasswordVerifier, Version};
  use async_trait::async_trait;
  use chrono::{DateTime, Duration, Utc};
  use std::sync::Mutex;
  use uuid::Uuid;

  struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
  }

  impl InMemoryUserRepository {
    fn new() -> Self {
      Self {
        users: Mutex::new(Vec::new()),
      }
    }
  }

  #[async_trait]
  impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, AuthError> {
      let mut users = self.users.lock().unwrap();
      // Check and insert under one lock, like a unique index would
      if users.iter().any(|u| u.email == user.email) {
        return Err(AuthError::Repository(RepositoryError::DuplicateKey(
          user.email.clone(),
        )));
      }
      users.push(user.clone());
      Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
      let users = self.users.lock().unwrap();
      Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError> {
      let users = self.users.lock().unwrap();
      Ok(users.iter().find(|u| u.email == email.as_str()).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, AuthError> {
      Ok(self.users.lock().unwrap().clone())
    }
  }

  struct InMemorySessionRepository {
    sessions: Mutex<Vec<Session>>,
  }

  impl InMemorySessionRepository {
    fn new() -> Self {
      Self {
        sessions: Mutex::new(Vec::new()),
      }
    }

    fn insert_raw(&self, session: Session) {
      self.sessions.lock().unwrap().push(session);
    }

    fn count(&self) -> usize {
      self.sessions.lock().unwrap().len()
    }
  }

  #[async_trait]
  impl SessionRepository for InMemorySessionRepository {
    async fn save(&self, session: Session) -> Result<Session, AuthError> {
      self.sessions.lock().unwrap().push(session.clone());
      Ok(session)
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, AuthError> {
      let sessions = self.sessions.lock().unwrap();
      Ok(sessions.iter().find(|s| s.token_hash == token_hash).cloned())
    }

    async fn delete_by_token_hash(&self, token_hash: &str) -> Result<(), AuthError> {
      let mut sessions = self.sessions.lock().unwrap();
      sessions.retain(|s| s.token_hash != token_hash);
      Ok(())
    }
  }

  /// Real Argon2id, weakest legal parameters so tests stay fast
  struct TestPasswordHasher;

  fn weak_argon2() -> Argon2<'static> {
    let params = Params::new(8, 1, 1, Some(32)).unwrap();
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
  }

  #[async_trait]
  impl PasswordHasher for TestPasswordHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, AuthError> {
      let salt = SaltString::generate(&mut rand::rngs::OsRng);
      let hash = weak_argon2()
        .hash_password(password.as_str().as_bytes(), &salt)
        .unwrap();
      Ok(PasswordHash::from_hash(hash.to_string()).unwrap())
    }

    async fn verify(
      &self,
      password: &Password,
      hashed_password: &PasswordHash,
    ) -> Result<bool, AuthError> {
      let parsed = argon2::PasswordHash::new(hashed_password.as_str()).unwrap();
      Ok(
        weak_argon2()
          .verify_password(password.as_str().as_bytes(), &parsed)
          .is_ok(),
      )
    }
  }

  struct TestTokenIssuer;

  #[async_trait]
  impl TokenIssuer for TestTokenIssuer {
    async fn issue(&self) -> Result<(SessionToken, DateTime<Utc>), AuthError> {
      let token = SessionToken::generate().map_err(AuthError::Validation)?;
      Ok((token, Utc::now() + Duration::hours(1)))
    }
  }

  struct Harness {
    service: AuthService,
    user_repo: Arc<InMemoryUserRepository>,
    session_repo: Arc<InMemorySessionRepository>,
    hasher: Arc<TestPasswordHasher>,
  }

  fn harness() -> Harness {
    let user_repo = Arc::new(InMemoryUserRepository::new());
    let session_repo = Arc::new(InMemorySessionRepository::new());
    let hasher = Arc::new(TestPasswordHasher);
    let service = AuthService::new(
      user_repo.clone(),
      session_repo.clone(),
      hasher.clone(),
      Arc::new(TestTokenIssuer),
    );
    Harness {
      service,
      user_repo,
      session_repo,
      hasher,
    }
  }

  async fn register_alice(h: &Harness) -> User {
    h.service
      .register(
        Username::new("alice").unwrap(),
        Email::new("a@x.com").unwrap(),
        Password::new("p@ssword1").unwrap(),
      )
      .await
      .unwrap()
  }

  #[tokio::test]
  async fn test_register_stores_verifiable_hash_not_plaintext() {
    let h = harness();
    register_alice(&h).await;

    let stored = h
      .user_repo
      .find_by_email(&Email::new("a@x.com").unwrap())
      .await
      .unwrap()
      .unwrap();

    // Never the literal password
    assert_ne!(stored.password_hash, "p@ssword1");

    // But it verifies against the original input
    let hash = PasswordHash::from_hash(&stored.password_hash).unwrap();
    let password = Password::new("p@ssword1").unwrap();
    assert!(h.hasher.verify(&password, &hash).await.unwrap());
  }

  #[tokio::test]
  async fn test_duplicate_email_yields_exactly_one_success() {
    let h = harness();
    register_alice(&h).await;

    let second = h
      .service
      .register(
        Username::new("alice2").unwrap(),
        Email::new("a@x.com").unwrap(),
        Password::new("otherpass").unwrap(),
      )
      .await;

    assert!(matches!(second, Err(AuthError::EmailAlreadyExists)));
    assert_eq!(h.user_repo.find_all().await.unwrap().len(), 1);
  }

  #[tokio::test]
  async fn test_concurrent_duplicate_registration() {
    let h = harness();

    let register = |username: &str| {
      h.service.register(
        Username::new(username).unwrap(),
        Email::new("race@x.com").unwrap(),
        Password::new("p@ssword1").unwrap(),
      )
    };

    let (a, b) = tokio::join!(register("first"), register("second"));

    let successes = [a.is_ok(), b.is_ok()].iter().filter(|&&ok| ok).count();
    assert_eq!(successes, 1);
    assert_eq!(h.user_repo.find_all().await.unwrap().len(), 1);
  }

  #[tokio::test]
  async fn test_login_then_authorize_resolves_user() {
    let h = harness();
    let user = register_alice(&h).await;

    let before = Utc::now();
    let (session, token) = h
      .service
      .login(
        Email::new("a@x.com").unwrap(),
        Password::new("p@ssword1").unwrap(),
      )
      .await
      .unwrap();

    // Expiry is issuance + 1 hour, within scheduling tolerance
    let expected = before + Duration::hours(1);
    let drift = (session.expires_at - expected).num_seconds().abs();
    assert!(drift < 5, "expiry drifted by {}s", drift);

    let authorized = h.service.authorize(token).await.unwrap();
    assert_eq!(authorized.id, user.id);
  }

  #[tokio::test]
  async fn test_wrong_password_and_unknown_email_indistinguishable() {
    let h = harness();
    register_alice(&h).await;

    let wrong_password = h
      .service
      .login(
        Email::new("a@x.com").unwrap(),
        Password::new("wrongpass").unwrap(),
      )
      .await;

    let unknown_email = h
      .service
      .login(
        Email::new("nobody@x.com").unwrap(),
        Password::new("p@ssword1").unwrap(),
      )
      .await;

    assert!(matches!(wrong_password, Err(AuthError::InvalidCredentials)));
    assert!(matches!(unknown_email, Err(AuthError::InvalidCredentials)));
  }

  #[tokio::test]
  async fn test_each_login_creates_new_session_leaving_prior_intact() {
    let h = harness();
    register_alice(&h).await;

    let login = || {
      h.service.login(
        Email::new("a@x.com").unwrap(),
        Password::new("p@ssword1").unwrap(),
      )
    };

    let (_, first_token) = login().await.unwrap();
    let (_, second_token) = login().await.unwrap();

    assert_eq!(h.session_repo.count(), 2);
    assert!(h.service.authorize(first_token).await.is_ok());
    assert!(h.service.authorize(second_token).await.is_ok());
  }

  #[tokio::test]
  async fn test_logout_revokes_and_is_idempotent() {
    let h = harness();
    register_alice(&h).await;

    let (_, token) = h
      .service
      .login(
        Email::new("a@x.com").unwrap(),
        Password::new("p@ssword1").unwrap(),
      )
      .await
      .unwrap();

    h.service.logout(token.clone()).await.unwrap();

    let denied = h.service.authorize(token.clone()).await;
    assert!(matches!(denied, Err(AuthError::InvalidToken)));

    // Second logout on the same token is not an error either
    h.service.logout(token).await.unwrap();
  }

  #[tokio::test]
  async fn test_logout_with_never_issued_token_succeeds() {
    let h = harness();
    let token = SessionToken::generate().unwrap();
    assert!(h.service.logout(token).await.is_ok());
  }

  #[tokio::test]
  async fn test_expired_session_row_fails_authorize() {
    let h = harness();
    let user = register_alice(&h).await;

    // Plant an expired session directly; the row exists but is past expiry
    let token = SessionToken::generate().unwrap();
    h.session_repo.insert_raw(Session::new(
      user.id,
      token.hash().into_inner(),
      Utc::now() - Duration::seconds(1),
    ));

    let denied = h.service.authorize(token).await;
    assert!(matches!(denied, Err(AuthError::InvalidToken)));

    // The expired row was swept on read
    assert_eq!(h.session_repo.count(), 0);
  }

  #[tokio::test]
  async fn test_find_user_by_email_distinguishes_not_found() {
    let h = harness();
    register_alice(&h).await;

    let found = h
      .service
      .find_user_by_email(Email::new("a@x.com").unwrap())
      .await
      .unwrap();
    assert_eq!(found.username, "alice");

    let missing = h
      .service
      .find_user_by_email(Email::new("nobody@x.com").unwrap())
      .await;
    assert!(matches!(missing, Err(AuthError::UserNotFound)));
  }

  #[tokio::test]
  async fn test_list_users() {
    let h = harness();
    register_alice(&h).await;
    h.service
      .register(
        Username::new("bob").unwrap(),
        Email::new("b@x.com").unwrap(),
        Password::new("p@ssword2").unwrap(),
      )
      .await
      .unwrap();

    let users = h.service.list_users().await.unwrap();
    assert_eq!(users.len(), 2);
  }
}
