//! Tag and substring filtering over a note snapshot.

use crate::entity::Note;
use crate::tags::ALL_TAGS;

/// Tag narrowing: either no filter, or exact membership in a note's tags.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum TagFilter {
    #[default]
    All,
    Tag(String),
}

impl TagFilter {
    pub fn matches(&self, note: &Note) -> bool {
        match self {
            TagFilter::All => true,
            TagFilter::Tag(tag) => note.has_tag(tag),
        }
    }
}

impl From<&str> for TagFilter {
    /// `"All"` and the empty string both mean no tag filter.
    fn from(s: &str) -> Self {
        if s.is_empty() || s == ALL_TAGS {
            TagFilter::All
        } else {
            TagFilter::Tag(s.to_string())
        }
    }
}

impl From<Option<&str>> for TagFilter {
    fn from(s: Option<&str>) -> Self {
        s.map(TagFilter::from).unwrap_or_default()
    }
}

/// Combined tag and content filter. Both parts must match.
#[derive(Debug, Default, Clone)]
pub struct NoteFilter {
    pub tag: TagFilter,
    /// Case-insensitive substring of the note content; empty matches all.
    pub query: String,
}

impl NoteFilter {
    pub fn new(tag: impl Into<TagFilter>, query: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            query: query.into(),
        }
    }

    /// Parse a raw query string.
    ///
    /// A `tag:` token selects the tag (the last one wins); the other words
    /// form the content query.
    ///
    /// ```ignore
    /// let filter = NoteFilter::parse("tag:home buy milk");
    /// assert_eq!(filter.tag, TagFilter::Tag("home".to_string()));
    /// assert_eq!(filter.query, "buy milk");
    /// ```
    pub fn parse(raw: &str) -> Self {
        let mut tag = TagFilter::All;
        let mut remaining = Vec::new();

        for token in raw.split_whitespace() {
            if let Some(value) = token.strip_prefix("tag:") {
                tag = TagFilter::from(value);
            } else {
                remaining.push(token);
            }
        }

        Self {
            tag,
            query: remaining.join(" "),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tag == TagFilter::All && self.query.is_empty()
    }

    pub fn matches(&self, note: &Note) -> bool {
        self.tag.matches(note) && self.matches_query(note)
    }

    fn matches_query(&self, note: &Note) -> bool {
        self.query.is_empty() || note.content.to_lowercase().contains(&self.query.to_lowercase())
    }

    /// Matching notes in their original order.
    pub fn apply<'a>(&self, notes: &'a [Note]) -> Vec<&'a Note> {
        notes.iter().filter(|n| self.matches(n)).collect()
    }
}

/// Narrow `notes` by tag (`"All"` to skip) then by content substring (empty
/// to skip), preserving input order.
pub fn filter(notes: &[Note], tag: &str, query: &str) -> Vec<Note> {
    NoteFilter::new(tag, query)
        .apply(notes)
        .into_iter()
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::NoteDraft;

    fn note(content: &str, tags: &[&str]) -> Note {
        Note::create(
            NoteDraft {
                content: Some(content.to_string()),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                ..Default::default()
            },
            1,
        )
    }

    fn sample() -> Vec<Note> {
        vec![
            note("Buy milk", &["home"]),
            note("Read book", &["leisure"]),
            note("Fix MILK frother", &["home", "chores"]),
        ]
    }

    #[test]
    fn test_all_and_empty_query_is_identity() {
        let notes = sample();
        assert_eq!(filter(&notes, "All", ""), notes);
        assert!(filter(&[], "All", "").is_empty());
    }

    #[test]
    fn test_search_scenario() {
        let notes = vec![note("Buy milk", &[]), note("Read book", &[])];
        let result = filter(&notes, "All", "milk");
        assert_eq!(result, vec![notes[0].clone()]);
    }

    #[test]
    fn test_search_is_case_insensitive_and_ordered() {
        let notes = sample();
        let result = filter(&notes, "All", "Milk");
        assert_eq!(result, vec![notes[0].clone(), notes[2].clone()]);
    }

    #[test]
    fn test_tag_filter_membership() {
        let notes = sample();
        for tag in ["home", "leisure", "chores", "absent"] {
            let result = filter(&notes, tag, "");
            for n in &notes {
                assert_eq!(result.contains(n), n.has_tag(tag), "tag {}", tag);
            }
        }
    }

    #[test]
    fn test_tag_and_query_compose() {
        let notes = sample();
        assert_eq!(filter(&notes, "chores", "milk"), vec![notes[2].clone()]);
        assert!(filter(&notes, "leisure", "milk").is_empty());
    }

    #[test]
    fn test_tag_match_is_exact() {
        let notes = vec![note("x", &["Home"])];
        assert!(filter(&notes, "home", "").is_empty());
    }

    #[test]
    fn test_query_only_checks_content() {
        let notes = vec![Note::create(
            NoteDraft {
                title: Some("milk".to_string()),
                content: Some("eggs".to_string()),
                ..Default::default()
            },
            1,
        )];
        assert!(filter(&notes, "All", "milk").is_empty());
    }

    #[test]
    fn test_parse_query_no_filters() {
        let f = NoteFilter::parse("hello world");
        assert_eq!(f.query, "hello world");
        assert_eq!(f.tag, TagFilter::All);
    }

    #[test]
    fn test_parse_query_tag_filter() {
        let f = NoteFilter::parse("tag:home milk");
        assert_eq!(f.tag, TagFilter::Tag("home".to_string()));
        assert_eq!(f.query, "milk");
    }

    #[test]
    fn test_parse_query_last_tag_wins() {
        let f = NoteFilter::parse("tag:a tag:b");
        assert_eq!(f.tag, TagFilter::Tag("b".to_string()));
        assert_eq!(f.query, "");
    }

    #[test]
    fn test_parse_query_tag_all() {
        let f = NoteFilter::parse("tag:All");
        assert!(f.is_empty());
    }

    #[test]
    fn test_tag_filter_from_option() {
        assert_eq!(TagFilter::from(None::<&str>), TagFilter::All);
        assert_eq!(TagFilter::from(Some("")), TagFilter::All);
        assert_eq!(TagFilter::from(Some("x")), TagFilter::Tag("x".to_string()));
    }
}
