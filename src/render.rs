//! View models handed back to the host's profile screen and notice area

use crate::Result;
use askama::Template;

#[derive(Template)]
#[template(path = "profile_section.html")]
struct ProfileSectionTemplate<'a> {
    heading: &'a str,
    label: &'a str,
    field: &'a str,
    value: u64,
}

#[derive(Template)]
#[template(path = "limit_notice.html")]
struct LimitNoticeTemplate<'a> {
    class: &'a str,
    message: &'a str,
}

/// Limit input shown on a user's profile screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSection {
    pub heading: String,
    pub label: String,
    /// Form field name and element ID
    pub field: String,
    /// Current limit, 0 when unlimited
    pub value: u64,
}

impl ProfileSection {
    pub fn new(field: impl Into<String>, value: u64) -> Self {
        Self {
            heading: "Limit Posts".to_string(),
            label: "Post Limit (0 for no limit)".to_string(),
            field: field.into(),
            value,
        }
    }

    pub fn render_html(&self) -> Result<String> {
        let html = ProfileSectionTemplate {
            heading: &self.heading,
            label: &self.label,
            field: &self.field,
            value: self.value,
        }
        .render()?;
        Ok(html)
    }
}

/// Warning shown once when a user reaches their limit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitNotice {
    pub message: String,
    pub dismissible: bool,
}

impl LimitNotice {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            dismissible: true,
        }
    }

    pub fn css_class(&self) -> &'static str {
        if self.dismissible {
            "notice notice-warning is-dismissible"
        } else {
            "notice notice-warning"
        }
    }

    pub fn render_html(&self) -> Result<String> {
        let html = LimitNoticeTemplate {
            class: self.css_class(),
            message: &self.message,
        }
        .render()?;
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_section_html() {
        let html = ProfileSection::new("post-limit", 5).render_html().unwrap();
        assert!(html.contains("<h3>Limit Posts</h3>"));
        assert!(html.contains(r#"name="post-limit""#));
        assert!(html.contains(r#"value="5""#));
        assert!(html.contains(r#"min="0""#));
    }

    #[test]
    fn test_notice_html_is_escaped() {
        let notice = LimitNotice::warning("<b>over</b> & out");
        let html = notice.render_html().unwrap();
        assert!(html.contains("notice notice-warning is-dismissible"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;b&gt;over"));
    }
}
