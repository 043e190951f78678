//! Repository search wire types.
//!
//! Field names follow the GitHub REST API. Serde renames map them onto the
//! names used throughout the crate (`display_name`, `url`, `star_count`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

/// Owner of a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    /// Account login.
    #[serde(rename = "login")]
    pub name: String,
    /// Avatar image URL.
    pub avatar_url: String,
}

/// One repository search hit. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Unique within a result set (not enforced).
    pub id: u64,
    /// Short repository name.
    #[serde(default)]
    pub name: String,
    /// `owner/name`.
    #[serde(rename = "full_name")]
    pub display_name: String,
    /// Browser URL of the repository.
    #[serde(rename = "html_url")]
    pub url: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Stargazer count.
    #[serde(rename = "stargazers_count")]
    pub star_count: u64,
    /// Primary language, if GitHub detected one.
    #[serde(default)]
    pub language: Option<String>,
    /// Owning account.
    pub owner: Owner,
}

/// One server response unit for a given page number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Total number of hits reported by the server for the query.
    pub total_count: u64,
    /// Server-side search timed out before collecting every hit.
    #[serde(rename = "incomplete_results", default)]
    pub incomplete: bool,
    /// Hits on this page, in server order.
    pub items: Vec<Repository>,
}

impl Page {
    /// Page with the given total and items, marked complete.
    pub fn new(total_count: u64, items: Vec<Repository>) -> Self {
        Self {
            total_count,
            incomplete: false,
            items,
        }
    }
}

/// 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageNumber(NonZeroU32);

impl PageNumber {
    /// The first page.
    pub const FIRST: PageNumber = PageNumber(NonZeroU32::MIN);

    /// Smart constructor: rejects 0.
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    /// The following page.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Raw page number.
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Default number of results per page.
pub const DEFAULT_PER_PAGE: u32 = 30;

/// Largest page size the search API accepts.
pub const MAX_PER_PAGE: u32 = 100;

/// Clamp a requested page size into the range the API accepts.
pub fn clamp_per_page(per_page: u32) -> u32 {
    per_page.clamp(1, MAX_PER_PAGE)
}
