//! Identity resolution - who is an admin.

use super::user::{Principal, Role, VerifiedIdentity};

/// Statically configured admin e-mail allow-list.
///
/// Built once at startup from configuration and passed explicitly to
/// whatever needs to resolve roles. An empty list means nobody is an admin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminAllowList {
    emails: Vec<String>,
}

impl AdminAllowList {
    pub fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let emails = emails
            .into_iter()
            .map(|e| e.as_ref().trim().to_string())
            .filter(|e| !e.is_empty())
            .collect();
        Self { emails }
    }

    /// Parse a comma-separated list, e.g. the `ADMIN_EMAILS` variable.
    pub fn parse(raw: &str) -> Self {
        Self::new(raw.split(','))
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    /// Exact, case-sensitive match after trimming.
    pub fn resolve(&self, email: &str) -> Role {
        let email = email.trim();
        if !email.is_empty() && self.emails.iter().any(|admin| admin == email) {
            Role::Admin
        } else {
            Role::User
        }
    }

    /// Attach the live role to a verified identity.
    pub fn authorize(&self, identity: VerifiedIdentity) -> Principal {
        let role = self.resolve(&identity.email);
        let display_name = identity
            .display_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| "Anonymous".to_string());

        Principal {
            uid: identity.uid,
            email: identity.email,
            display_name,
            photo_url: identity.photo_url,
            role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_listed_email_is_admin() {
        let list = AdminAllowList::new(["a@x.com"]);
        assert_eq!(list.resolve("a@x.com"), Role::Admin);
        assert_eq!(list.resolve("b@x.com"), Role::User);
    }

    #[test]
    fn test_empty_list_fails_closed() {
        let list = AdminAllowList::default();
        assert!(list.is_empty());
        assert_eq!(list.resolve("a@x.com"), Role::User);
        assert_eq!(list.resolve(""), Role::User);

        let blank = AdminAllowList::parse(" , ,");
        assert!(blank.is_empty());
        assert_eq!(blank.resolve(""), Role::User);
    }

    #[test]
    fn test_parse_trims_entries_and_is_case_sensitive() {
        let list = AdminAllowList::parse(" a@x.com ,ops@x.com");
        assert_eq!(list.len(), 2);
        assert_eq!(list.resolve("ops@x.com"), Role::Admin);
        assert_eq!(list.resolve(" a@x.com "), Role::Admin);
        assert_eq!(list.resolve("A@x.com"), Role::User);
    }

    #[test]
    fn test_authorize_defaults_display_name() {
        let list = AdminAllowList::new(["a@x.com"]);
        let principal = list.authorize(VerifiedIdentity {
            uid: "u1".to_string(),
            email: "a@x.com".to_string(),
            display_name: None,
            photo_url: None,
        });
        assert!(principal.is_admin());
        assert_eq!(principal.display_name, "Anonymous");
    }
}
