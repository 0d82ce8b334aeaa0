use std::sync::LazyLock;

use regex::Regex;

static SLUG_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\W-]+").expect("slug separator pattern is valid"));

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub id: i32,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: i32,
}

#[derive(Debug, Clone)]
pub struct NewPage {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: i32,
}

/// Sparse update for a page. `description` distinguishes "absent"
/// (`None`) from "clear it" (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct PagePatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
}

impl PagePatch {
    /// Overwrites only the fields present in the patch. The slug is never
    /// recomputed, so public URLs survive a rename.
    pub fn apply(self, page: &mut Page) {
        if let Some(title) = self.title {
            page.title = title;
        }
        if let Some(description) = self.description {
            page.description = description;
        }
    }
}

/// Turn a page title into its public slug.
///
/// Lowercases and trims the title, then collapses every run of
/// whitespace, non-word characters and hyphens into a single `-`.
/// Punctuation at the edges is not stripped, so `"Shop!"` yields `"shop-"`.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    SLUG_SEPARATORS
        .replace_all(lowered.trim(), "-")
        .into_owned()
}
