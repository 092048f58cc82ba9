use std::sync::Arc;

use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::config::BackendConfig;
use crate::models::Student;
use crate::store::StudentDirectory;

pub const NOT_CONFIGURED: &str = "Database not configured. Please set up Supabase credentials.";
pub const INVALID_CODE: &str = "Invalid code. Please check your student code and try again.";
pub const LOGIN_FAILED: &str = "Login failed. Please try again.";
pub const EMPTY_CODE: &str = "Please enter your code";

/// Outcome of one login attempt. Exactly one of `student`/`error` is set,
/// which the two constructors are the only way to uphold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthResult {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    student: Option<Student>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl AuthResult {
    pub fn granted(student: Student) -> Self {
        Self {
            success: true,
            student: Some(student),
            error: None,
        }
    }

    pub fn denied<S: Into<String>>(error: S) -> Self {
        Self {
            success: false,
            student: None,
            error: Some(error.into()),
        }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn student(&self) -> Option<&Student> {
        self.student.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

pub struct AuthService {
    config: Option<BackendConfig>,
    directory: Arc<dyn StudentDirectory>,
}

impl AuthService {
    pub fn new(config: Option<BackendConfig>, directory: Arc<dyn StudentDirectory>) -> Self {
        Self { config, directory }
    }

    /// Resolve a login code. The code is treated as an opaque string; trimming
    /// is the caller's job. Nothing here ever propagates an error: every
    /// failure, backend trouble included, comes back as a denied `AuthResult`.
    pub async fn login_with_code(&self, code: &str) -> AuthResult {
        match &self.config {
            Some(config) if !config.is_placeholder() => {}
            _ => return AuthResult::denied(NOT_CONFIGURED),
        }

        match self.directory.student_by_code(code).await {
            Ok(Some(student)) => AuthResult::granted(student),
            Ok(None) => AuthResult::denied(INVALID_CODE),
            Err(err) => {
                log::error!("Student lookup failed: {:#}", err);
                AuthResult::denied(LOGIN_FAILED)
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub code: String,
}

pub async fn login(
    Json(body): Json<LoginRequest>,
    Extension(auth): Extension<Arc<AuthService>>,
) -> Json<AuthResult> {
    let code = body.code.trim();
    if code.is_empty() {
        return Json(AuthResult::denied(EMPTY_CODE));
    }
    Json(auth.login_with_code(code).await)
}
