//! Profile screen input and the error channel the host shows after a save

use std::collections::HashMap;

/// Fields submitted with a profile save
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    fields: HashMap<String, String>,
}

impl ProfileForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// How an issue affects the profile save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// The whole save is refused
    Validation,
    /// Informational only, the save goes ahead
    Advisory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileIssue {
    pub kind: IssueKind,
    pub code: &'static str,
    pub message: String,
}

/// Errors collected while the host processes a profile save
#[derive(Debug, Clone, Default)]
pub struct ProfileErrors {
    issues: Vec<ProfileIssue>,
}

impl ProfileErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, kind: IssueKind, code: &'static str, message: impl Into<String>) {
        self.issues.push(ProfileIssue {
            kind,
            code,
            message: message.into(),
        });
    }

    pub fn issues(&self) -> &[ProfileIssue] {
        &self.issues
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// True when at least one issue blocks the save
    pub fn blocks_save(&self) -> bool {
        self.issues.iter().any(|i| i.kind == IssueKind::Validation)
    }

    pub fn has(&self, kind: IssueKind) -> bool {
        self.issues.iter().any(|i| i.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advisory_does_not_block() {
        let mut errors = ProfileErrors::new();
        errors.add(IssueKind::Advisory, "post_limit_notice", "over");
        assert!(!errors.blocks_save());
        assert!(errors.has(IssueKind::Advisory));

        errors.add(IssueKind::Validation, "post_limit_error", "bad");
        assert!(errors.blocks_save());
        assert_eq!(errors.issues().len(), 2);
    }

    #[test]
    fn test_form_lookup() {
        let form = ProfileForm::new().with_field("post-limit", "4");
        assert_eq!(form.get("post-limit"), Some("4"));
        assert_eq!(form.get("other"), None);
    }
}
