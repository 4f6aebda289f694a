use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Identity of a story within a result set.
///
/// The search API usually sends `objectID` as a string, but numeric ids are
/// accepted too so hand-built payloads and fixtures round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObjectId {
    Text(String),
    Number(u64),
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectId::Text(s) => f.write_str(s),
            ObjectId::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for ObjectId {
    fn from(s: &str) -> Self {
        ObjectId::Text(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub num_comments: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub points: i64,
    #[serde(rename = "objectID")]
    pub object_id: ObjectId,
}

impl Story {
    #[cfg(test)]
    pub fn new(object_id: u64, title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            url: None,
            author: String::new(),
            num_comments: 0,
            points: 0,
            object_id: ObjectId::Number(object_id),
        }
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("(Untitled)")
    }

    pub fn display_url(&self) -> &str {
        self.url.as_deref().unwrap_or("")
    }

    /// Case-insensitive substring match on the title.
    pub fn title_contains(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.title
            .as_deref()
            .map(|t| t.to_lowercase().contains(&needle))
            .unwrap_or(needle.is_empty())
    }
}

/// The API sends explicit `null` for some numeric and text fields.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_hit() {
        let json = r#"{
            "title": "React",
            "url": "https://reactjs.org/",
            "author": "Jordan Walke",
            "num_comments": 3,
            "points": 4,
            "objectID": "0"
        }"#;
        let story: Story = serde_json::from_str(json).unwrap();
        assert_eq!(story.display_title(), "React");
        assert_eq!(story.display_url(), "https://reactjs.org/");
        assert_eq!(story.author, "Jordan Walke");
        assert_eq!(story.num_comments, 3);
        assert_eq!(story.points, 4);
        assert_eq!(story.object_id, ObjectId::from("0"));
    }

    #[test]
    fn test_deserialize_nulls() {
        let json = r#"{
            "title": null,
            "url": null,
            "author": null,
            "num_comments": null,
            "points": null,
            "objectID": 42
        }"#;
        let story: Story = serde_json::from_str(json).unwrap();
        assert_eq!(story.display_title(), "(Untitled)");
        assert_eq!(story.display_url(), "");
        assert_eq!(story.author, "");
        assert_eq!(story.num_comments, 0);
        assert_eq!(story.points, 0);
        assert_eq!(story.object_id, ObjectId::Number(42));
    }

    #[test]
    fn test_missing_object_id_rejected() {
        let json = r#"{"title": "No id"}"#;
        assert!(serde_json::from_str::<Story>(json).is_err());
    }

    #[test]
    fn test_object_id_display() {
        assert_eq!(ObjectId::from("abc").to_string(), "abc");
        assert_eq!(ObjectId::Number(7).to_string(), "7");
    }

    #[test]
    fn test_title_contains_is_case_insensitive() {
        let story = Story::new(1, "Redux");
        assert!(story.title_contains("red"));
        assert!(story.title_contains("RED"));
        assert!(story.title_contains(""));
        assert!(!story.title_contains("React"));
    }

    #[test]
    fn test_title_contains_without_title() {
        let mut story = Story::new(1, "x");
        story.title = None;
        assert!(story.title_contains(""));
        assert!(!story.title_contains("x"));
    }
}
