//! Lookup-then-ownership gate shared by every single-record operation.

use anyhow::anyhow;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::Resume;

pub const RESUME_NOT_FOUND: &str = "Resume not found";

/// Parses the `:id` path segment. A malformed id is a store-level failure
/// (500), not a missing record.
pub fn parse_resume_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw)
        .map_err(|e| AppError::Internal(anyhow!("malformed resume id \"{raw}\": {e}")))
}

/// Existence is checked before ownership: a missing record is Not-Found
/// for every caller.
pub fn ensure_owner(found: Option<Resume>, caller: &str) -> Result<Resume, AppError> {
    let resume = found.ok_or_else(|| AppError::NotFound(RESUME_NOT_FOUND.to_string()))?;
    if resume.owner != caller {
        return Err(AppError::NotAuthorized);
    }
    Ok(resume)
}
