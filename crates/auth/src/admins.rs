use std::collections::BTreeSet;

use stockbot_core::{ChatUserId, DomainResult};

use crate::Role;

/// Fixed allow-list of administrator identities, loaded once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminList {
    ids: BTreeSet<ChatUserId>,
}

impl AdminList {
    pub fn new<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = ChatUserId>,
    {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    /// Parse a comma-separated list such as `"111, 222,333"`.
    ///
    /// Blank segments are skipped; any other non-integer entry is an error.
    pub fn parse(csv: &str) -> DomainResult<Self> {
        let ids = csv
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse::<ChatUserId>)
            .collect::<DomainResult<BTreeSet<_>>>()?;
        Ok(Self { ids })
    }

    pub fn is_admin(&self, id: ChatUserId) -> bool {
        self.ids.contains(&id)
    }

    pub fn role_of(&self, id: ChatUserId) -> Role {
        if self.is_admin(id) {
            Role::Admin
        } else {
            Role::Guest
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockbot_core::DomainError;

    #[test]
    fn parses_comma_separated_ids() {
        let admins = AdminList::parse("111, 222 ,333,").unwrap();
        assert_eq!(admins.len(), 3);
        assert!(admins.is_admin(ChatUserId::new(222)));
        assert!(!admins.is_admin(ChatUserId::new(444)));
    }

    #[test]
    fn rejects_non_numeric_entries() {
        let err = AdminList::parse("111,bob").unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(_)));
    }

    #[test]
    fn role_follows_membership() {
        let admins = AdminList::new([ChatUserId::new(1)]);
        assert_eq!(admins.role_of(ChatUserId::new(1)), Role::Admin);
        assert_eq!(admins.role_of(ChatUserId::new(2)), Role::Guest);
    }

    #[test]
    fn empty_list_has_no_admins() {
        let admins = AdminList::parse("").unwrap();
        assert!(admins.is_empty());
        assert_eq!(admins.role_of(ChatUserId::new(1)), Role::Guest);
    }
}
