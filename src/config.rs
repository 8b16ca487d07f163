use crate::model::ContentStatus;
use crate::{QuotaError, Result};

/// Configuration for the quota enforcer
///
/// Controls which content type is limited, where limits live in the host's
/// user metadata and which texts the host shows to users.
///
/// # Examples
///
/// ```
/// use postquota::QuotaConfig;
///
/// let config = QuotaConfig::default().with_content_type("article");
/// assert_eq!(config.content_type, "article");
/// assert_eq!(config.limit_key, "post_limit");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct QuotaConfig {
    /// Slug of the content type to limit
    pub content_type: String,
    /// User metadata key holding the limit
    pub limit_key: String,
    /// User metadata key holding the notice-shown flag
    pub notice_key: String,
    /// Name of the profile form field carrying the limit
    pub form_field: String,
    /// Statuses that don't count towards the quota
    pub excluded_statuses: Vec<ContentStatus>,
    /// Message returned when a save is refused
    pub over_limit_message: String,
    /// Message of the one-time warning notice
    pub notice_message: String,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            content_type: "post".to_string(),
            limit_key: "post_limit".to_string(),
            notice_key: "post_limit_notice_shown".to_string(),
            form_field: "post-limit".to_string(),
            excluded_statuses: vec![ContentStatus::Trash],
            over_limit_message: "You are over your post limit.".to_string(),
            notice_message: "Notice: You have reached your post limit and can not add more posts."
                .to_string(),
        }
    }
}

impl QuotaConfig {
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Checks that the configuration can be used against a host
    pub fn validate(&self) -> Result<()> {
        if self.content_type.trim().is_empty() {
            return Err(QuotaError::Config("content type must not be empty".to_string()));
        }
        if self.limit_key.is_empty() || self.notice_key.is_empty() {
            return Err(QuotaError::Config("metadata keys must not be empty".to_string()));
        }
        if self.limit_key == self.notice_key {
            return Err(QuotaError::Config(format!(
                "limit and notice share the metadata key '{}'",
                self.limit_key
            )));
        }
        if self.form_field.is_empty() {
            return Err(QuotaError::Config("form field name must not be empty".to_string()));
        }
        Ok(())
    }
}
