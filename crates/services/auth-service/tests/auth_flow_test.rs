//! Login, registration and session tests against the seeded store.

use std::sync::Arc;

use auth_service_lib::config::AuthServiceConfig;
use auth_service_lib::service::AuthService;
use auth_service_lib::session::{FileStorage, SessionManager, SessionState};
use auth_service_lib::build_auth;
use common::{AppError, JwtConfig};
use domain::{EmployeeId, Registration, Role, DEFAULT_POSITION};
use record_service_lib::latency::LatencyPolicy;
use record_service_lib::repository::{InMemoryStore, RecordStore};

fn config() -> AuthServiceConfig {
    AuthServiceConfig {
        jwt: JwtConfig {
            secret: "test-secret-key-for-testing-only-32chars".to_string(),
            expiration_hours: 1,
        },
        ..AuthServiceConfig::default()
    }
}

fn seeded() -> (Arc<dyn RecordStore>, Arc<dyn AuthService>) {
    let store: Arc<dyn RecordStore> = Arc::new(InMemoryStore::seeded(LatencyPolicy::NONE).unwrap());
    let auth = build_auth(&config(), store.clone());
    (store, auth)
}

#[tokio::test]
async fn test_login_seed_user() {
    let (_, auth) = seeded();

    let session = auth.login("budi", "budi").await.unwrap();

    assert_eq!(session.user.role, Role::User);
    assert_eq!(session.user.employee_id, Some(EmployeeId::new("pegawai-1")));
    assert_eq!(auth.verify_token(&session.token).await.unwrap(), session.user);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (_, auth) = seeded();

    let result = auth.login("budi", "wrong").await;

    assert!(matches!(result, Err(AppError::InvalidCredentials)));
}

#[tokio::test]
async fn test_register_taken_username() {
    let (store, auth) = seeded();

    let result = auth.register("New Person", "budi", "x").await;

    assert!(matches!(result, Err(AppError::UsernameTaken)));
    assert_eq!(store.list_employees().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_register_then_login() {
    let (store, auth) = seeded();

    let session = auth.register("Sari Dewi", "sari", "sari123").await.unwrap();
    let employee_id = session.user.employee_id.clone().unwrap();

    let employee = store.find_employee_by_id(&employee_id).await.unwrap().unwrap();
    assert_eq!(employee.name, "Sari Dewi");
    assert_eq!(employee.position, DEFAULT_POSITION);
    assert_eq!(store.list_employees().await.unwrap()[0].id, employee_id);

    let again = auth.login("sari", "sari123").await.unwrap();
    assert_eq!(again.user, session.user);
}

#[tokio::test]
async fn test_deleted_employee_invalidates_linked_token() {
    let (store, auth) = seeded();
    let session = auth.login("rina", "rina").await.unwrap();

    store
        .delete_employee(&EmployeeId::new("pegawai-2"))
        .await
        .unwrap();

    assert!(matches!(
        auth.verify_token(&session.token).await,
        Err(AppError::Unauthorized)
    ));
}

#[tokio::test]
async fn test_session_survives_restart_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let (_, auth) = seeded();

    let first = SessionManager::new(auth.clone(), Arc::new(FileStorage::new(&path)));
    let session = first
        .register(&Registration {
            name: "Sari Dewi".to_string(),
            username: "sari".to_string(),
            password: "sari123".to_string(),
            confirm_password: "sari123".to_string(),
        })
        .await
        .unwrap();

    let second = SessionManager::new(auth.clone(), Arc::new(FileStorage::new(&path)));
    assert_eq!(
        second.restore().await,
        SessionState::Authenticated(session.clone())
    );

    second.logout().await;
    assert!(!path.exists());
    assert!(auth.verify_token(&session.token).await.is_err());

    let third = SessionManager::new(auth, Arc::new(FileStorage::new(&path)));
    assert_eq!(third.restore().await, SessionState::Anonymous);
}
