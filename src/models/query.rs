use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::collections::HashMap;

/// Bytes left untouched by [`query_escape`]; everything else is `%XX` encoded.
const QUERY_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Inbound query parameters, keeping every value supplied for a name.
#[derive(Debug, Default, Clone)]
pub struct QueryParams {
    values: HashMap<String, Vec<String>>,
}

impl QueryParams {
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut values: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in pairs {
            values.entry(name).or_default().push(value);
        }
        Self { values }
    }

    /// Returns the value of `name` only when it was given exactly once.
    pub fn single(&self, name: &str) -> Option<&str> {
        match self.values.get(name).map(Vec::as_slice) {
            Some([value]) => Some(value.as_str()),
            _ => None,
        }
    }
}

/// Query-escapes `input`: space becomes `+`, unreserved ASCII is kept as is.
pub fn query_escape(input: &str) -> String {
    // A literal "%20" in the input is itself escaped to "%2520", so this only hits spaces.
    utf8_percent_encode(input, QUERY_ESCAPE)
        .to_string()
        .replace("%20", "+")
}

/// Builds the query forwarded upstream.
///
/// A single `q` wins outright. Otherwise a single `author` and a single `title`
/// are combined, in that order. Names given zero or several times are ignored.
/// Returns `None` when nothing usable was supplied.
pub fn derive_query(params: &QueryParams) -> Option<String> {
    if let Some(q) = params.single("q") {
        return Some(format!("q={}", query_escape(q)));
    }

    let mut query = String::new();
    if let Some(author) = params.single("author") {
        query.push_str("author=");
        query.push_str(&query_escape(author));
    }
    if let Some(title) = params.single("title") {
        if !query.is_empty() {
            query.push('&');
        }
        query.push_str("title=");
        query.push_str(&query_escape(title));
    }

    if query.is_empty() {
        None
    } else {
        Some(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        QueryParams::from_pairs(
            pairs
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string())),
        )
    }

    #[test]
    fn q_takes_precedence_over_author_and_title() {
        let p = params(&[("author", "Tolkien"), ("q", "the lord"), ("title", "Hobbit")]);
        assert_eq!(derive_query(&p).as_deref(), Some("q=the+lord"));
    }

    #[test]
    fn author_alone() {
        let p = params(&[("author", "Jane Austen")]);
        assert_eq!(derive_query(&p).as_deref(), Some("author=Jane+Austen"));
    }

    #[test]
    fn author_and_title_are_joined() {
        let p = params(&[("title", "Emma"), ("author", "Austen")]);
        assert_eq!(
            derive_query(&p).as_deref(),
            Some("author=Austen&title=Emma")
        );
    }

    #[test]
    fn title_alone_has_no_leading_ampersand() {
        let p = params(&[("title", "Dune")]);
        assert_eq!(derive_query(&p).as_deref(), Some("title=Dune"));
    }

    #[test]
    fn repeated_q_falls_through_to_author() {
        let p = params(&[("q", "a"), ("q", "b"), ("author", "Orwell")]);
        assert_eq!(derive_query(&p).as_deref(), Some("author=Orwell"));
    }

    #[test]
    fn repeated_q_alone_is_rejected() {
        let p = params(&[("q", "a"), ("q", "b")]);
        assert_eq!(derive_query(&p), None);
    }

    #[test]
    fn repeated_title_is_ignored() {
        let p = params(&[("author", "Herbert"), ("title", "Dune"), ("title", "Emma")]);
        assert_eq!(derive_query(&p).as_deref(), Some("author=Herbert"));
    }

    #[test]
    fn unrecognized_names_are_rejected() {
        let p = params(&[("isbn", "123"), ("lang", "en")]);
        assert_eq!(derive_query(&p), None);
        assert_eq!(derive_query(&QueryParams::default()), None);
    }

    #[test]
    fn empty_value_still_counts() {
        let p = params(&[("q", "")]);
        assert_eq!(derive_query(&p).as_deref(), Some("q="));
    }

    #[test]
    fn derivation_is_deterministic() {
        let p = params(&[("author", "Le Guin"), ("title", "The Dispossessed")]);
        assert_eq!(derive_query(&p), derive_query(&p));
    }

    #[test]
    fn escapes_like_a_query_component() {
        assert_eq!(query_escape("a b"), "a+b");
        assert_eq!(query_escape("a&b=c"), "a%26b%3Dc");
        assert_eq!(query_escape("-_.~"), "-_.~");
        assert_eq!(query_escape("100%20"), "100%2520");
        assert_eq!(query_escape("a+b"), "a%2Bb");
        assert_eq!(query_escape("café"), "caf%C3%A9");
    }
}
