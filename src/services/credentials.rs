//! Credential save / test and the settings surface.

use tracing::{info, warn};

use crate::error::Result;
use crate::session::{Shared, TestStatus};

pub struct CredentialSettings<'a> {
    shared: &'a Shared,
}

impl<'a> CredentialSettings<'a> {
    pub fn new(shared: &'a Shared) -> Self {
        Self { shared }
    }

    /// The in-memory credential (empty when none is configured).
    pub fn current(&self) -> String {
        self.shared.lock().credential.clone()
    }

    pub fn is_configured(&self) -> bool {
        !self.shared.lock().credential.is_empty()
    }

    /// Adopt `plaintext` as the session credential, persist it obfuscated and
    /// close the settings surface.
    ///
    /// An empty `plaintext` is a no-op returning `Ok(false)`.
    pub fn save(&self, plaintext: &str) -> Result<bool> {
        if !self.shared.store.save(plaintext)? {
            return Ok(false);
        }
        self.shared.lock().credential = plaintext.to_string();
        self.shared.set_settings_visible(false);
        Ok(true)
    }

    /// Forget the credential in memory and on disk.
    pub fn clear(&self) -> Result<()> {
        self.shared.store.clear()?;
        self.shared.lock().credential.clear();
        info!("credential cleared");
        Ok(())
    }

    /// Check `plaintext` against the backend's validation endpoint.
    ///
    /// The status is `Testing` while the call is in flight and always ends as
    /// `Success` or `Failure`. A transport error counts as `Failure`.
    pub async fn test(&self, plaintext: &str) -> TestStatus {
        self.shared.lock().test_status = TestStatus::Testing;

        let status = match self.shared.api.validate_credential(plaintext).await {
            Ok(check) if check.success => TestStatus::Success,
            Ok(check) => {
                if let Some(error) = check.error {
                    warn!(error = %error, "credential rejected");
                }
                TestStatus::Failure
            }
            Err(e) => {
                warn!(error = %e, "credential test failed");
                TestStatus::Failure
            }
        };

        self.shared.lock().test_status = status;
        status
    }

    /// Last credential test outcome.
    pub fn test_status(&self) -> TestStatus {
        self.shared.lock().test_status
    }

    pub fn is_open(&self) -> bool {
        self.shared.lock().settings_visible
    }

    pub fn open(&self) {
        self.shared.set_settings_visible(true);
    }

    pub fn close(&self) {
        self.shared.set_settings_visible(false);
    }

    pub fn toggle(&self) {
        let visible = self.is_open();
        self.shared.set_settings_visible(!visible);
    }
}
