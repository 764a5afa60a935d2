//! User paging policy
//!
//! Interprets the `users_per_file` setting: negative values embed users in
//! the realm artifact, zero puts all users in one separate artifact, and a
//! positive value is the fixed number of users per page artifact.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;

/// How users of a realm are split into artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserPaging {
    /// Users are embedded in the realm artifact; no page artifacts
    SameFile,
    /// Users go into page artifacts separate from the realm metadata
    ///
    /// `users_per_file = None` means a single page holding every user.
    SeparateFile {
        users_per_file: Option<NonZeroUsize>,
    },
}

impl UserPaging {
    /// Build the policy from the raw `users_per_file` setting
    ///
    /// # Examples
    ///
    /// ```
    /// use keyport::core::export::UserPaging;
    ///
    /// assert_eq!(UserPaging::from_users_per_file(-1), UserPaging::SameFile);
    /// assert_eq!(UserPaging::from_users_per_file(0).page_size(250), Some(250));
    /// assert_eq!(UserPaging::from_users_per_file(100).page_size(250), Some(100));
    /// ```
    pub fn from_users_per_file(users_per_file: i64) -> Self {
        if users_per_file < 0 {
            return Self::SameFile;
        }
        let size = usize::try_from(users_per_file).unwrap_or(usize::MAX);
        Self::SeparateFile {
            users_per_file: NonZeroUsize::new(size),
        }
    }

    /// Whether users are embedded in the realm artifact
    pub fn users_into_same_file(&self) -> bool {
        matches!(self, Self::SameFile)
    }

    /// Number of users per page for a realm with `total_count` users
    ///
    /// Returns `None` when users are not paged at all.
    pub fn page_size(&self, total_count: usize) -> Option<usize> {
        match self {
            Self::SameFile => None,
            Self::SeparateFile {
                users_per_file: None,
            } => Some(total_count),
            Self::SeparateFile {
                users_per_file: Some(size),
            } => Some(size.get()),
        }
    }

    /// The raw `users_per_file` value this policy corresponds to
    pub fn users_per_file(&self) -> i64 {
        match self {
            Self::SameFile => -1,
            Self::SeparateFile {
                users_per_file: None,
            } => 0,
            Self::SeparateFile {
                users_per_file: Some(size),
            } => i64::try_from(size.get()).unwrap_or(i64::MAX),
        }
    }
}

impl Default for UserPaging {
    fn default() -> Self {
        Self::from_users_per_file(50)
    }
}

impl fmt::Display for UserPaging {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SameFile => write!(f, "users in realm file"),
            Self::SeparateFile {
                users_per_file: None,
            } => write!(f, "all users in one separate file"),
            Self::SeparateFile {
                users_per_file: Some(size),
            } => write!(f, "{size} users per file"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_means_same_file() {
        let paging = UserPaging::from_users_per_file(-5);
        assert!(paging.users_into_same_file());
        assert_eq!(paging.page_size(10), None);
        assert_eq!(paging.users_per_file(), -1);
    }

    #[test]
    fn test_zero_means_single_separate_page() {
        let paging = UserPaging::from_users_per_file(0);
        assert!(!paging.users_into_same_file());
        assert_eq!(paging.page_size(42), Some(42));
        assert_eq!(paging.page_size(0), Some(0));
        assert_eq!(paging.users_per_file(), 0);
    }

    #[test]
    fn test_positive_is_fixed_page_size() {
        let paging = UserPaging::from_users_per_file(100);
        assert_eq!(paging.page_size(250), Some(100));
        assert_eq!(paging.page_size(3), Some(100));
        assert_eq!(paging.users_per_file(), 100);
    }

    #[test]
    fn test_default_is_fifty_per_file() {
        assert_eq!(UserPaging::default().page_size(1000), Some(50));
    }

    #[test]
    fn test_display() {
        assert_eq!(UserPaging::SameFile.to_string(), "users in realm file");
        assert_eq!(
            UserPaging::from_users_per_file(10).to_string(),
            "10 users per file"
        );
    }
}
