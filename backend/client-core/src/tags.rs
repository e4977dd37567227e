//! Tag reconciliation for the add/remove tag operations.
//!
//! Both functions work on the lead's `tags` in place. `None` means the lead
//! never had a tags field, which matters for what goes on the wire: see
//! [`TagsPatch`].

use models::{ACADEMY_ACTIVE, ACADEMY_CANCELLED};

use serde::Serialize;

/// `(held, incoming)`: adding `incoming` strips `held` from the lead.
const MUTUALLY_EXCLUSIVE: [(&str, &str); 2] = [
    (ACADEMY_CANCELLED, ACADEMY_ACTIVE),
    (ACADEMY_ACTIVE, ACADEMY_CANCELLED),
];

/// Merges `new_tags` into `current`.
///
/// 1. Every existing occurrence of a tag being added is removed.
/// 2. Adding one academy lifecycle tag removes the opposite one.
/// 3. `new_tags` are appended in order, duplicates included.
///
/// Survivors keep their relative order ahead of the appended tags. Unset
/// tags stay unset when nothing is added.
pub fn merge_added_tags(current: &mut Option<Vec<String>>, new_tags: &[&str]) {
    if let Some(existing) = current.as_mut() {
        for tag in new_tags {
            remove_all(existing, tag);
        }

        for (held, incoming) in MUTUALLY_EXCLUSIVE {
            if contains(existing, held) && new_tags.contains(&incoming) {
                remove_all(existing, held);
            }
        }
    }

    if new_tags.is_empty() {
        return;
    }

    current
        .get_or_insert_with(Vec::new)
        .extend(new_tags.iter().map(|tag| tag.to_string()));
}

/// Removes every occurrence of each tag in `tags_to_remove`. Unset stays unset.
pub fn strip_removed_tags(current: &mut Option<Vec<String>>, tags_to_remove: &[&str]) {
    if let Some(existing) = current.as_mut() {
        for tag in tags_to_remove {
            remove_all(existing, tag);
        }
    }
}

/// PATCH body for the tag operations: `{"tags": ...}`.
#[derive(Debug, Serialize)]
pub struct TagsPatch<'a> {
    pub tags: Option<&'a [String]>,
}

impl<'a> TagsPatch<'a> {
    /// After an add. Unset tags serialize as `null`.
    pub fn after_add(tags: &'a Option<Vec<String>>) -> Self {
        Self {
            tags: tags.as_deref(),
        }
    }

    /// After a remove. Unset tags serialize as an explicit `[]`.
    pub fn after_remove(tags: &'a Option<Vec<String>>) -> Self {
        Self {
            tags: Some(tags.as_deref().unwrap_or(&[])),
        }
    }
}

fn contains(tags: &[String], tag: &str) -> bool {
    tags.iter().any(|t| t == tag)
}

fn remove_all(tags: &mut Vec<String>, tag: &str) {
    tags.retain(|t| t != tag);
}
