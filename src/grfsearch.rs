//! Redirect for the in-game "find missing content" search.
//!
//! Old OpenTTD clients open `grfsearch.openttd.org/?do=searchtext&q=...` or
//! `?do=searchgrfid&q=<grfid>:<md5sum>,...`. These are translated into a search on GRFCrawler,
//! which has its own query format and knows nothing about md5sums.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::form_urlencoded;

use crate::{pattern::static_regex, EdgeHandler, Outcome, Request, Response};

/// Everything but `A-Za-z0-9-_.!~*'()` is escaped.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const SEARCH_PATH: &str = "/index.php";

/// Every value of `key` in a raw query string, in order of appearance.
fn query_values(querystring: &str, key: &str) -> Vec<String> {
    form_urlencoded::parse(querystring.as_bytes())
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .collect()
}

fn encode_query<'a>(params: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    params
        .into_iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(key, QUERY_VALUE),
                utf8_percent_encode(value, QUERY_VALUE)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Remove the `:<md5sum>` part of every `<grfid>:<md5sum>` entry.
fn strip_md5sums(q: &str) -> String {
    static_regex!(r":[0-9A-Fa-f]*").replace_all(q, "").into_owned()
}

/// Translates content-search links from old clients into GRFCrawler searches.
#[derive(Debug, Clone)]
pub struct GrfSearchRedirect {
    base_url: String,
}

impl GrfSearchRedirect {
    /// Default GRFCrawler location.
    pub const DEFAULT_BASE_URL: &'static str = "https://grfcrawler.tt-forums.net";

    /// Create a redirect to the GRFCrawler instance at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        GrfSearchRedirect {
            base_url: base_url.into(),
        }
    }

    /// Path and query on GRFCrawler for the given client query string.
    ///
    /// A repeated key keeps all of its values. A single empty `q` counts as no search at all,
    /// while a repeated `q` is a search even if some values are empty.
    fn target(querystring: &str) -> String {
        let q = query_values(querystring, "q");
        if q.is_empty() || (q.len() == 1 && q[0].is_empty()) {
            return SEARCH_PATH.to_owned();
        }

        // A repeated `do` matches neither action.
        let action = match query_values(querystring, "do").as_slice() {
            [action] => Some(action.clone()),
            _ => None,
        };

        // An unknown `do` still gets the `?`, just with nothing after it.
        let query = match action.as_deref() {
            Some("searchtext") => encode_query(
                [("do", "search")]
                    .into_iter()
                    .chain(q.iter().map(|q| ("q", q.as_str()))),
            ),
            Some("searchgrfid") => {
                let grfids: Vec<String> = q.iter().map(|q| strip_md5sums(q)).collect();
                encode_query(
                    [("do", "search"), ("type", "grfidlist")]
                        .into_iter()
                        .chain(grfids.iter().map(|q| ("q", q.as_str()))),
                )
            }
            _ => String::new(),
        };

        format!("{SEARCH_PATH}?{query}")
    }
}

impl Default for GrfSearchRedirect {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_URL)
    }
}

impl EdgeHandler for GrfSearchRedirect {
    fn handle(&self, request: Request) -> Outcome {
        let location = format!("{}{}", self.base_url, Self::target(&request.querystring));
        log::debug!(target: "openttd_edge",
                    querystring = request.querystring.as_str(),
                    location = location.as_str();
                    "redirecting content search");
        Response::moved_permanently(location).into()
    }
}
