//! Caller identity gate in front of the dispatcher.
//!
//! [`PresenceCheck`] only requires that some identifier is attached. It is a
//! pass-through gate, not an authentication protocol; a deployment that needs
//! real verification supplies its own [`IdentityVerifier`].

use async_trait::async_trait;

use crate::error::{AdcraftError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub uid: String,
}

#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, uid: Option<&str>) -> Result<CallerIdentity>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PresenceCheck;

#[async_trait]
impl IdentityVerifier for PresenceCheck {
    async fn verify(&self, uid: Option<&str>) -> Result<CallerIdentity> {
        match uid.map(str::trim) {
            Some(uid) if !uid.is_empty() => Ok(CallerIdentity {
                uid: uid.to_string(),
            }),
            _ => Err(AdcraftError::Unauthorized),
        }
    }
}
