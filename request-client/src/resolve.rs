// request-client/src/resolve.rs
//! Final URL assembly: base URL, path placeholders and the merged query.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::collections::BTreeMap;
use url::form_urlencoded;

/// Bytes in a path value that would otherwise start a query or fragment,
/// or read as an escape
const PATH_VALUE: &AsciiSet = &CONTROLS.add(b'%').add(b'?').add(b'#');

/// Replace each `{name}` in the path part of a URL that has an entry in
/// `params`. Values are inserted as-is except for `%`, `?`, `#` and control
/// bytes, which are percent-encoded.
///
/// Single pass, so substituted values are never themselves expanded.
/// Placeholders without an entry stay as literal text.
pub fn substitute_params(path: &str, params: &BTreeMap<String, String>) -> String {
    substitute_with(path, params, |value| {
        utf8_percent_encode(value, PATH_VALUE).to_string()
    })
}

/// Placeholders inside an inline query get form-encoded values, so they
/// parse back to exactly the value given.
fn substitute_query_params(query: &str, params: &BTreeMap<String, String>) -> String {
    substitute_with(query, params, |value| {
        form_urlencoded::byte_serialize(value.as_bytes()).collect()
    })
}

fn substitute_with<F>(template: &str, params: &BTreeMap<String, String>, encode: F) -> String
where
    F: Fn(&str) -> String,
{
    if params.is_empty() {
        return template.to_string();
    }

    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            rest = "";
            break;
        };

        match params.get(&after[..close]) {
            Some(value) => {
                out.push_str(&encode(value));
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Insert or replace `key`, keeping the position of the first occurrence
fn upsert(pairs: &mut Vec<(String, String)>, key: String, value: String) {
    match pairs.iter_mut().find(|(existing, _)| *existing == key) {
        Some(pair) => pair.1 = value,
        None => pairs.push((key, value)),
    }
}

/// Merge the query string already in `path` with the explicit `query` map.
///
/// Inline pairs come first in their original order, explicit keys follow;
/// an explicit key replaces an inline one with the same name.
pub fn merge_query(inline: &str, query: &BTreeMap<String, String>) -> Vec<(String, String)> {
    let mut pairs = Vec::new();

    for (key, value) in form_urlencoded::parse(inline.as_bytes()).into_owned() {
        upsert(&mut pairs, key, value);
    }
    for (key, value) in query {
        upsert(&mut pairs, key.clone(), value.clone());
    }

    pairs
}

/// Build the absolute URL for a call.
pub fn resolve_url(
    base_url: &str,
    path: &str,
    params: &BTreeMap<String, String>,
    query: &BTreeMap<String, String>,
) -> String {
    // Split the template first so substituted values can't open a query
    // or fragment of their own.
    let (template, fragment) = match path.split_once('#') {
        Some((template, fragment)) => (template, Some(fragment)),
        None => (path, None),
    };
    let (template, inline) = template.split_once('?').unwrap_or((template, ""));

    let path = substitute_params(template, params);
    let inline = substitute_query_params(inline, params);

    let pairs = merge_query(&inline, query);

    let mut url = format!("{}{}", base_url, path);
    if !pairs.is_empty() {
        url.push('?');
        url.push_str(
            &form_urlencoded::Serializer::new(String::new())
                .extend_pairs(pairs)
                .finish(),
        );
    }
    if let Some(fragment) = fragment {
        url.push('#');
        url.push_str(fragment);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_substitute_single_param() {
        assert_eq!(substitute_params("/test/{id}", &map(&[("id", "test")])), "/test/test");
    }

    #[test]
    fn test_substitute_every_occurrence() {
        let params = map(&[("id", "7"), ("sub", "notes")]);
        assert_eq!(
            substitute_params("/users/{id}/{sub}/{id}", &params),
            "/users/7/notes/7"
        );
    }

    #[test]
    fn test_unmatched_placeholder_left_alone() {
        let params = map(&[("id", "7")]);
        assert_eq!(substitute_params("/a/{other}/{id}", &params), "/a/{other}/7");
        assert_eq!(substitute_params("/a/{id", &params), "/a/{id");
        assert_eq!(substitute_params("/a/{{id}}", &params), "/a/{7}");
    }

    #[test]
    fn test_substituted_values_are_not_expanded() {
        let params = map(&[("a", "{b}"), ("b", "x")]);
        assert_eq!(substitute_params("/{a}/{b}", &params), "/{b}/x");
    }

    #[test]
    fn test_inline_and_explicit_query_are_both_kept() {
        let url = resolve_url(
            "http://localhost:9000",
            "/test?a=b",
            &BTreeMap::new(),
            &map(&[("test", "test")]),
        );
        assert_eq!(url, "http://localhost:9000/test?a=b&test=test");
    }

    #[test]
    fn test_explicit_query_wins_on_collision() {
        let pairs = merge_query("a=1&b=2&a=3", &map(&[("b", "override")]));
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), "3".to_string()),
                ("b".to_string(), "override".to_string())
            ]
        );
    }

    #[test]
    fn test_no_query_means_no_question_mark() {
        assert_eq!(
            resolve_url("http://a.b", "/test", &BTreeMap::new(), &BTreeMap::new()),
            "http://a.b/test"
        );
        assert_eq!(
            resolve_url("http://a.b", "/test?", &BTreeMap::new(), &BTreeMap::new()),
            "http://a.b/test"
        );
    }

    #[test]
    fn test_query_values_are_encoded() {
        let url = resolve_url(
            "",
            "/search?q=a%20b",
            &BTreeMap::new(),
            &map(&[("tag", "x&y=z")]),
        );
        assert_eq!(url, "/search?q=a+b&tag=x%26y%3Dz");
    }

    #[test]
    fn test_params_then_query_then_fragment() {
        let url = resolve_url(
            "http://a.b",
            "/items/{id}?view=full#top",
            &map(&[("id", "42")]),
            &map(&[("lang", "en")]),
        );
        assert_eq!(url, "http://a.b/items/42?view=full&lang=en#top");
    }

    #[test]
    fn test_param_values_cannot_start_query_or_fragment() {
        let url = resolve_url(
            "http://a.b",
            "/files/{name}",
            &map(&[("name", "what?")]),
            &BTreeMap::new(),
        );
        assert_eq!(url, "http://a.b/files/what%3F");

        let url = resolve_url(
            "http://a.b",
            "/files/{name}?v=1",
            &map(&[("name", "a#b&c=d 100%")]),
            &map(&[("lang", "en")]),
        );
        assert_eq!(url, "http://a.b/files/a%23b&c=d 100%25?v=1&lang=en");
    }

    #[test]
    fn test_placeholders_in_inline_query() {
        let url = resolve_url(
            "",
            "/search?q={term}&page=1",
            &map(&[("term", "a&b=c")]),
            &BTreeMap::new(),
        );
        assert_eq!(url, "/search?q=a%26b%3Dc&page=1");
    }

    #[test]
    fn test_params_do_not_touch_base_url() {
        let url = resolve_url("http://{id}.example", "/{id}", &map(&[("id", "7")]), &BTreeMap::new());
        assert_eq!(url, "http://{id}.example/7");
    }
}
