//! Handlers that always answer with a `301 Moved Permanently`.

use std::borrow::Cow;

use crate::{pattern::static_regex, EdgeHandler, Outcome, Request, Response};

fn redirect(location: String) -> Outcome {
    log::debug!(target: "openttd_edge", location = location.as_str(); "redirecting");
    Response::moved_permanently(location).into()
}

/// Redirects every request to the same location, whatever was asked for.
#[derive(Debug, Clone)]
pub struct FixedRedirect {
    location: String,
}

impl FixedRedirect {
    /// Create a redirect that always points at `location`.
    pub fn new(location: impl Into<String>) -> Self {
        FixedRedirect {
            location: location.into(),
        }
    }

    /// The redirect target.
    pub fn location(&self) -> &str {
        &self.location
    }
}

impl EdgeHandler for FixedRedirect {
    fn handle(&self, _request: Request) -> Outcome {
        redirect(self.location.clone())
    }
}

/// Sends visitors to the same path on another host.
#[derive(Debug, Clone)]
pub struct ProxyRedirect {
    base_url: String,
}

impl ProxyRedirect {
    /// Create a redirect onto `base_url`, an origin without trailing slash.
    pub fn new(base_url: impl Into<String>) -> Self {
        ProxyRedirect {
            base_url: base_url.into(),
        }
    }
}

impl EdgeHandler for ProxyRedirect {
    fn handle(&self, request: Request) -> Outcome {
        let path = if request.uri.is_empty() {
            "/"
        } else {
            request.uri.as_str()
        };
        redirect(format!("{}{}", self.base_url, path))
    }
}

/// Maps the old security advisory site onto the security pages of the main website.
///
/// Advisory links (`/CVE-2020-1234`, optionally under `/en`) go to their own page, everything
/// else to the security landing page.
#[derive(Debug, Clone)]
pub struct SecurityRedirect {
    website_url: String,
}

const SECURITY_INDEX: &str = "/security.html";

impl SecurityRedirect {
    /// Create a redirect onto the website at `website_url`.
    pub fn new(website_url: impl Into<String>) -> Self {
        SecurityRedirect {
            website_url: website_url.into(),
        }
    }

    fn target_path(uri: &str) -> Cow<'_, str> {
        // A uri that starts like an advisory but doesn't fully match one is used as-is.
        match uri {
            "/" | "/en" | "/en/" => Cow::Borrowed(SECURITY_INDEX),
            _ if uri.starts_with("/en/CVE") => static_regex!(r"^/en/CVE-([0-9]+)-([0-9]+)$")
                .replace(uri, "/security/CVE-${1}-${2}.html"),
            _ if uri.starts_with("/CVE") => static_regex!(r"^/CVE-([0-9]+)-([0-9]+)$")
                .replace(uri, "/security/CVE-${1}-${2}.html"),
            _ => Cow::Borrowed(SECURITY_INDEX),
        }
    }
}

impl EdgeHandler for SecurityRedirect {
    fn handle(&self, request: Request) -> Outcome {
        let path = Self::target_path(&request.uri);
        redirect(format!("{}{}", self.website_url, path))
    }
}
