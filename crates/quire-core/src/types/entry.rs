//! Read-only view of a content entry, and the content-type descriptors
//! collected through the type registry hook.

use serde::{Deserialize, Serialize};

use super::id::EntryId;

/// Snapshot of an entry being saved.
///
/// Hooks receive a copy; changing it has no effect on the stored entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntrySnapshot {
    /// Entry identifier.
    pub id: EntryId,
    /// Content type name, e.g. `"article"` or `"note"`.
    #[serde(rename = "type")]
    pub entry_type: String,
    /// Name as entered by the author, if any.
    #[serde(default)]
    pub name: Option<String>,
    /// Slug already stored for this entry, if any.
    #[serde(default)]
    pub slug: Option<String>,
    /// Raw entry content.
    #[serde(default)]
    pub content: String,
}

impl EntrySnapshot {
    /// Creates a snapshot for a new entry of the given type.
    pub fn new(entry_type: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: EntryId::new(),
            entry_type: entry_type.into(),
            name: None,
            slug: None,
            content: content.into(),
        }
    }

    /// Sets the author-supplied name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets a previously stored slug.
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Returns whether this entry already has a non-empty slug.
    pub fn has_slug(&self) -> bool {
        self.slug.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Returns whether the entry is of one of the given types.
    pub fn is_type_in(&self, types: &[&str]) -> bool {
        types.contains(&self.entry_type.as_str())
    }
}

/// Descriptor of a registered content type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryTypeDescriptor {
    /// Icon class shown next to entries of this type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Any other descriptor fields contributed by plugins.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl EntryTypeDescriptor {
    /// Creates a descriptor with an icon.
    pub fn with_icon(icon: impl Into<String>) -> Self {
        Self {
            icon: Some(icon.into()),
            extra: serde_json::Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_type_field() {
        let entry = EntrySnapshot::new("note", "hello");
        let json = serde_json::to_value(&entry).expect("serialize");
        assert_eq!(json["type"], "note");
        assert_eq!(json["content"], "hello");
    }

    #[test]
    fn test_descriptor_keeps_unknown_fields() {
        let descriptor: EntryTypeDescriptor =
            serde_json::from_str(r#"{"icon":"mdi mdi-star","plural":"likes"}"#)
                .expect("deserialize");
        assert_eq!(descriptor.icon.as_deref(), Some("mdi mdi-star"));
        assert_eq!(descriptor.extra["plural"], "likes");
    }

    #[test]
    fn test_has_slug_ignores_empty() {
        let entry = EntrySnapshot::new("note", "");
        assert!(!entry.has_slug());
        assert!(!entry.clone().with_slug("").has_slug());
        assert!(entry.with_slug("abc").has_slug());
    }
}
