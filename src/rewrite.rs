//! Handlers that rewrite the request uri and let CloudFront continue with the origin fetch.
//!
//! A uri that does not match a handler's pattern is forwarded untouched.

use regex::Regex;

use crate::{pattern::static_regex, EdgeHandler, Outcome, Request, Response};

/// Replace the first match of `regex` in the request uri, logging when something changed.
fn rewrite_uri(mut request: Request, regex: &Regex, replacement: &str) -> Outcome {
    let new_uri = regex.replace(&request.uri, replacement).into_owned();
    if new_uri != request.uri {
        log::trace!(target: "openttd_edge",
                    old_uri = request.uri.as_str(),
                    new_uri = new_uri.as_str();
                    "rewrote uri");
    }
    request.uri = new_uri;
    request.into()
}

/// Drops the human readable filename from BaNaNaS downloads.
///
/// The client asks for `/<content-type>/<unique-id>/<md5sum>/<name>.tar.gz` so it knows what to
/// call the file, but the bucket only stores `/<content-type>/<unique-id>/<md5sum>.tar.gz`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssetPathRewrite;

impl EdgeHandler for AssetPathRewrite {
    fn handle(&self, request: Request) -> Outcome {
        let regex = static_regex!(
            r"^/([a-z-]+)/([a-f0-9]{8})/([a-f0-9]{32})/[a-zA-Z0-9_.-]+.tar.gz$"
        );
        rewrite_uri(request, regex, "/${1}/${2}/${3}.tar.gz")
    }
}

/// Serves `index.html` for directory requests.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectoryIndex;

impl EdgeHandler for DirectoryIndex {
    fn handle(&self, request: Request) -> Outcome {
        rewrite_uri(request, static_regex!(r"/$"), "/index.html")
    }
}

/// Maps a pull-request preview directory to its entry page.
#[derive(Debug, Default, Clone, Copy)]
pub struct PreviewIndex;

impl EdgeHandler for PreviewIndex {
    fn handle(&self, request: Request) -> Outcome {
        rewrite_uri(
            request,
            static_regex!(r"^/([0-9A-Za-z_-]+)/$"),
            "/${1}/openttd.html",
        )
    }
}

/// Keeps old Flyspray task links working against the static archive.
///
/// The archive has no front page, so visitors landing there are sent to the current issue
/// tracker instead.
#[derive(Debug, Clone)]
pub struct TaskLinkRewrite {
    tracker_url: String,
}

impl TaskLinkRewrite {
    /// Default location of the issue tracker.
    pub const DEFAULT_TRACKER_URL: &'static str = "https://github.com/OpenTTD/OpenTTD/issues";

    /// Create a rewrite that sends the archive front page to `tracker_url`.
    pub fn new(tracker_url: impl Into<String>) -> Self {
        TaskLinkRewrite {
            tracker_url: tracker_url.into(),
        }
    }
}

impl Default for TaskLinkRewrite {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TRACKER_URL)
    }
}

impl EdgeHandler for TaskLinkRewrite {
    fn handle(&self, request: Request) -> Outcome {
        if request.uri == "/" || request.uri == "/index.html" {
            log::debug!(target: "openttd_edge",
                        uri = request.uri.as_str(),
                        location = self.tracker_url.as_str();
                        "redirecting archive front page");
            return Response::moved_permanently(self.tracker_url.clone()).into();
        }

        rewrite_uri(request, static_regex!(r"^/task/([0-9]+)$"), "/task/${1}.html")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{AssetPathRewrite, DirectoryIndex, PreviewIndex, TaskLinkRewrite};
    use crate::{EdgeHandler, Request};

    fn uri_after(handler: &impl EdgeHandler, uri: &str) -> String {
        handler
            .handle(Request::new(uri))
            .uri()
            .expect("request should be forwarded")
            .to_owned()
    }

    #[test]
    fn asset_path_drops_filename() {
        assert_eq!(
            uri_after(
                &AssetPathRewrite,
                "/base-graphics/12345678/0123456789abcdef0123456789abcdef/opengfx-7.1.tar.gz"
            ),
            "/base-graphics/12345678/0123456789abcdef0123456789abcdef.tar.gz"
        );
        assert_eq!(
            uri_after(
                &AssetPathRewrite,
                "/newgrf/4d4d0101/ffffffffffffffffffffffffffffffff/Some_Set-v2.tar.gz"
            ),
            "/newgrf/4d4d0101/ffffffffffffffffffffffffffffffff.tar.gz"
        );
    }

    #[test]
    fn asset_path_leaves_other_uris_alone() {
        for uri in [
            "/",
            "/base-graphics/12345678/0123456789abcdef0123456789abcdef.tar.gz",
            // uppercase hex is not a valid md5sum here
            "/base-graphics/12345678/0123456789ABCDEF0123456789ABCDEF/a.tar.gz",
            // short id
            "/base-graphics/1234567/0123456789abcdef0123456789abcdef/a.tar.gz",
            "/base-graphics/12345678/0123456789abcdef0123456789abcdef/a.zip",
            "/Base-Graphics/12345678/0123456789abcdef0123456789abcdef/a.tar.gz",
        ] {
            assert_eq!(uri_after(&AssetPathRewrite, uri), uri);
        }
    }

    #[test]
    fn asset_path_keeps_other_request_fields() {
        let mut request =
            Request::new("/ai/12345678/0123456789abcdef0123456789abcdef/x.tar.gz");
        request.extra.insert("method".to_owned(), json!("GET"));
        let outcome = AssetPathRewrite.handle(request);
        let forwarded = outcome.as_request().unwrap();
        assert_eq!(forwarded.uri, "/ai/12345678/0123456789abcdef0123456789abcdef.tar.gz");
        assert_eq!(forwarded.extra["method"], json!("GET"));
    }

    #[test]
    fn directory_index() {
        assert_eq!(uri_after(&DirectoryIndex, "/"), "/index.html");
        assert_eq!(uri_after(&DirectoryIndex, "/gs-api/"), "/gs-api/index.html");
        assert_eq!(uri_after(&DirectoryIndex, "/gs-api"), "/gs-api");
        assert_eq!(uri_after(&DirectoryIndex, "/a/b.html"), "/a/b.html");
    }

    #[test]
    fn preview_index() {
        assert_eq!(uri_after(&PreviewIndex, "/pr-1234/"), "/pr-1234/openttd.html");
        assert_eq!(uri_after(&PreviewIndex, "/master_2/"), "/master_2/openttd.html");
        assert_eq!(uri_after(&PreviewIndex, "/pr-1234"), "/pr-1234");
        assert_eq!(uri_after(&PreviewIndex, "/a/b/"), "/a/b/");
        assert_eq!(uri_after(&PreviewIndex, "/"), "/");
        assert_eq!(uri_after(&PreviewIndex, "/caf\u{e9}/"), "/caf\u{e9}/");
    }

    #[test]
    fn task_links() {
        let handler = TaskLinkRewrite::default();
        assert_eq!(uri_after(&handler, "/task/42"), "/task/42.html");
        assert_eq!(uri_after(&handler, "/task/42.html"), "/task/42.html");
        assert_eq!(uri_after(&handler, "/task/abc"), "/task/abc");
        assert_eq!(uri_after(&handler, "/index.php"), "/index.php");
    }

    #[test]
    fn task_archive_front_page_redirects() {
        let handler = TaskLinkRewrite::default();
        for uri in ["/", "/index.html"] {
            let outcome = handler.handle(Request::new(uri));
            assert_eq!(
                outcome.location(),
                Some("https://github.com/OpenTTD/OpenTTD/issues")
            );
            assert!(outcome.as_request().is_none());
        }
    }
}
