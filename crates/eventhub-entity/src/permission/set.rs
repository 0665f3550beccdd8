//! Permission sets with wildcard semantics.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::action::Permission;

/// The set of permissions granted to a role.
///
/// Membership checks go through [`PermissionSet::grants`], which
/// short-circuits on [`Permission::All`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeSet<Permission>);

impl PermissionSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the set contains the wildcard.
    pub fn is_wildcard(&self) -> bool {
        self.0.contains(&Permission::All)
    }

    /// Whether `permission` is granted, directly or through the wildcard.
    pub fn grants(&self, permission: &Permission) -> bool {
        self.is_wildcard() || self.0.contains(permission)
    }

    /// Whether any of `permissions` is granted.
    pub fn grants_any<'a>(&self, permissions: impl IntoIterator<Item = &'a Permission>) -> bool {
        self.is_wildcard() || permissions.into_iter().any(|p| self.0.contains(p))
    }

    /// Add a permission.
    pub fn insert(&mut self, permission: Permission) -> bool {
        self.0.insert(permission)
    }

    /// Iterate over the stored tokens in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &Permission> {
        self.0.iter()
    }

    /// Number of stored tokens.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Tokens as owned strings, for persistence.
    pub fn to_tokens(&self) -> Vec<String> {
        self.0.iter().map(|p| p.as_str().to_string()).collect()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<S: AsRef<str>> From<&[S]> for PermissionSet {
    fn from(tokens: &[S]) -> Self {
        tokens.iter().map(|t| Permission::from(t.as_ref())).collect()
    }
}
