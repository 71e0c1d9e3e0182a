//! Parser for graph-schema field directives.
//!
//! The directive string mixes two separators: whitespace splits independent
//! directives, commas split a directive into tokens.
//!
//! ```text
//! #[dgraph("predicate=initial_release_date index=year")]
//! #[dgraph("predicate=genre,reverse,count")]
//! #[dgraph("index=hash,term,trigram,fulltext")]
//! #[dgraph("index=geo,type=geo")]
//! #[dgraph("index=exact,upsert")]
//! ```
//!
//! A bare token directly following `index=` inside the same directive
//! continues the index list, so each directive runs a small two-state
//! machine ([`Mode`]). The grammar is permissive: anything it does not
//! understand is dropped and collected in [`Directives::ignored`].

use log::trace;

use crate::model::Field;

/// Parsed directives of a single field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directives {
    /// Last `predicate=` value seen
    pub predicate: Option<String>,
    /// Every index value, in encounter order
    pub indexes: Vec<String>,
    /// Last `type=` value seen
    pub type_hint: Option<String>,
    pub reverse: bool,
    pub count: bool,
    pub upsert: bool,
    /// Tokens that were dropped
    pub ignored: Vec<String>,
}

/// Per-directive parser state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Default,
    /// Inside an `index=` list; bare tokens are more index values
    InIndex,
}

/// One comma-separated token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Predicate(&'a str),
    Index(&'a str),
    TypeHint(&'a str),
    Reverse,
    Count,
    Upsert,
    /// `key=value` with an unknown key
    Unknown(&'a str),
    /// Anything without `=`
    Bare(&'a str),
}

impl<'a> Token<'a> {
    fn classify(raw: &'a str) -> Self {
        if let Some(value) = raw.strip_prefix("predicate=") {
            return Token::Predicate(value);
        }
        if let Some(value) = raw.strip_prefix("index=") {
            return Token::Index(value);
        }
        if let Some(value) = raw.strip_prefix("type=") {
            return Token::TypeHint(value);
        }

        match raw {
            "reverse" => Token::Reverse,
            "count" => Token::Count,
            "upsert" => Token::Upsert,
            other if other.contains('=') => Token::Unknown(other),
            other => Token::Bare(other),
        }
    }
}

impl Directives {
    /// Parse a raw directive string. Empty input yields empty directives.
    pub fn parse(raw: &str) -> Self {
        let mut directives = Directives::default();
        for directive in raw.split_whitespace() {
            directives.parse_directive(directive);
        }
        directives
    }

    fn parse_directive(&mut self, directive: &str) {
        let mut mode = Mode::Default;

        for raw in directive.split(',') {
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }

            mode = match Token::classify(raw) {
                Token::Predicate(value) => {
                    self.predicate = Some(value.to_string());
                    Mode::Default
                }
                Token::Index(value) => {
                    self.indexes.push(value.to_string());
                    Mode::InIndex
                }
                Token::TypeHint(value) => {
                    self.type_hint = Some(value.to_string());
                    Mode::Default
                }
                Token::Reverse => {
                    self.reverse = true;
                    Mode::Default
                }
                Token::Count => {
                    self.count = true;
                    Mode::Default
                }
                Token::Upsert => {
                    self.upsert = true;
                    Mode::Default
                }
                Token::Bare(value) if mode == Mode::InIndex => {
                    self.indexes.push(value.to_string());
                    Mode::InIndex
                }
                Token::Bare(value) | Token::Unknown(value) => {
                    trace!("ignoring directive token `{value}`");
                    self.ignored.push(value.to_string());
                    mode
                }
            };
        }
    }

    /// Merge into a field. Scalars overwrite, indexes append, flags only ever turn on.
    pub fn apply_to(&self, field: &mut Field) {
        if let Some(predicate) = &self.predicate {
            field.predicate = predicate.clone();
        }
        if let Some(type_hint) = &self.type_hint {
            field.type_hint = Some(type_hint.clone());
        }
        field.indexes.extend(self.indexes.iter().cloned());
        field.is_reverse |= self.reverse;
        field.has_count |= self.count;
        field.upsert |= self.upsert;
    }
}

/// Parse `raw` and merge it into `field`, returning the dropped tokens.
pub fn apply_directives(raw: &str, field: &mut Field) -> Vec<String> {
    let directives = Directives::parse(raw);
    directives.apply_to(field);
    directives.ignored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeName;

    fn parsed(raw: &str) -> Field {
        let mut field = Field::new("Test", TypeName::String);
        apply_directives(raw, &mut field);
        field
    }

    #[test]
    fn test_index_list() {
        let field = parsed("index=hash,term,trigram,fulltext");
        assert_eq!(field.indexes, vec!["hash", "term", "trigram", "fulltext"]);
        assert_eq!(field.predicate, "");
    }

    #[test]
    fn test_predicate_with_space_separated_index() {
        let field = parsed("predicate=initial_release_date index=year");
        assert_eq!(field.predicate, "initial_release_date");
        assert_eq!(field.indexes, vec!["year"]);
    }

    #[test]
    fn test_predicate_with_reverse_and_count() {
        let field = parsed("predicate=genre,reverse,count");
        assert_eq!(field.predicate, "genre");
        assert!(field.is_reverse);
        assert!(field.has_count);
        assert!(field.indexes.is_empty());
    }

    #[test]
    fn test_count_only() {
        let field = parsed("count");
        assert!(field.has_count);
        assert!(!field.is_reverse);
        assert!(!field.upsert);
    }

    #[test]
    fn test_type_hint_does_not_leak_into_indexes() {
        let field = parsed("index=geo,type=geo");
        assert_eq!(field.indexes, vec!["geo"]);
        assert_eq!(field.type_hint.as_deref(), Some("geo"));
    }

    #[test]
    fn test_index_with_upsert() {
        let field = parsed("index=exact,upsert");
        assert_eq!(field.indexes, vec!["exact"]);
        assert!(field.upsert);
    }

    #[test]
    fn test_tilde_predicate_is_not_reverse_by_itself() {
        let field = parsed("predicate=~genre");
        assert_eq!(field.predicate, "~genre");
        assert!(!field.is_reverse);
    }

    #[test]
    fn test_empty_input_is_noop() {
        let directives = Directives::parse("");
        assert_eq!(directives, Directives::default());

        let directives = Directives::parse("   \t ");
        assert_eq!(directives, Directives::default());
    }

    #[test]
    fn test_index_mode_resets_per_directive() {
        let directives = Directives::parse("index=term extra");
        assert_eq!(directives.indexes, vec!["term"]);
        assert_eq!(directives.ignored, vec!["extra"]);
    }

    #[test]
    fn test_flag_ends_index_list() {
        let directives = Directives::parse("index=exact,upsert,hash");
        assert_eq!(directives.indexes, vec!["exact"]);
        assert!(directives.upsert);
        assert_eq!(directives.ignored, vec!["hash"]);
    }

    #[test]
    fn test_indexes_accumulate_across_directives() {
        let directives = Directives::parse("index=hash index=term,trigram index=hash");
        assert_eq!(directives.indexes, vec!["hash", "term", "trigram", "hash"]);
    }

    #[test]
    fn test_scalars_last_write_wins() {
        let directives = Directives::parse("predicate=first type=int predicate=second type=geo");
        assert_eq!(directives.predicate.as_deref(), Some("second"));
        assert_eq!(directives.type_hint.as_deref(), Some("geo"));
    }

    #[test]
    fn test_unknown_keys_are_ignored_without_leaving_index_mode() {
        let directives = Directives::parse("index=term,lang=en,fulltext");
        assert_eq!(directives.indexes, vec!["term", "fulltext"]);
        assert_eq!(directives.ignored, vec!["lang=en"]);
    }

    #[test]
    fn test_empty_tokens_are_skipped() {
        let directives = Directives::parse("index=hash,,term,");
        assert_eq!(directives.indexes, vec!["hash", "term"]);
        assert!(directives.ignored.is_empty());
    }

    #[test]
    fn test_apply_appends_to_existing_indexes() {
        let mut field = Field::new("Name", TypeName::String);
        field.indexes.push("hash".to_string());
        apply_directives("index=fulltext", &mut field);
        assert_eq!(field.indexes, vec!["hash", "fulltext"]);
    }
}
