use std::{fmt, str::FromStr};

use crate::{
    AssetPathRewrite, DirectoryIndex, EdgeHandler, Error, FixedRedirect, GrfSearchRedirect,
    PreviewIndex, ProxyRedirect, SecurityRedirect, TaskLinkRewrite,
};

/// Deployment units, named the way they are attached to the CloudFront distributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionName {
    /// `bananas-cdn`: [`AssetPathRewrite`](crate::AssetPathRewrite).
    BananasCdn,
    /// `index-redirect`: [`DirectoryIndex`](crate::DirectoryIndex).
    IndexRedirect,
    /// `preview-redirect`: [`PreviewIndex`](crate::PreviewIndex).
    PreviewRedirect,
    /// `flyspray-redirect`: [`TaskLinkRewrite`](crate::TaskLinkRewrite).
    FlysprayRedirect,
    /// `redirect-farm`: CI builds.
    RedirectFarm,
    /// `redirect-forum`: the forum board.
    RedirectForum,
    /// `redirect-github`: the source repository.
    RedirectGithub,
    /// `redirect-issues`: the issue tracker.
    RedirectIssues,
    /// `redirect-root`: the website front page.
    RedirectRoot,
    /// `domain-redirect-nogo`: the GameScript API docs.
    DomainRedirectNogo,
    /// `redirect-proxy.binaries`: [`ProxyRedirect`](crate::ProxyRedirect) to the CDN.
    RedirectProxyBinaries,
    /// `redirect-grfsearch`: [`GrfSearchRedirect`](crate::GrfSearchRedirect).
    RedirectGrfsearch,
    /// `redirect-security`: [`SecurityRedirect`](crate::SecurityRedirect).
    RedirectSecurity,
}

impl FunctionName {
    /// Every deployment unit.
    pub const ALL: [FunctionName; 13] = [
        FunctionName::BananasCdn,
        FunctionName::IndexRedirect,
        FunctionName::PreviewRedirect,
        FunctionName::FlysprayRedirect,
        FunctionName::RedirectFarm,
        FunctionName::RedirectForum,
        FunctionName::RedirectGithub,
        FunctionName::RedirectIssues,
        FunctionName::RedirectRoot,
        FunctionName::DomainRedirectNogo,
        FunctionName::RedirectProxyBinaries,
        FunctionName::RedirectGrfsearch,
        FunctionName::RedirectSecurity,
    ];

    /// Name of the deployment unit, e.g. `redirect-security`.
    pub fn as_str(&self) -> &'static str {
        match self {
            FunctionName::BananasCdn => "bananas-cdn",
            FunctionName::IndexRedirect => "index-redirect",
            FunctionName::PreviewRedirect => "preview-redirect",
            FunctionName::FlysprayRedirect => "flyspray-redirect",
            FunctionName::RedirectFarm => "redirect-farm",
            FunctionName::RedirectForum => "redirect-forum",
            FunctionName::RedirectGithub => "redirect-github",
            FunctionName::RedirectIssues => "redirect-issues",
            FunctionName::RedirectRoot => "redirect-root",
            FunctionName::DomainRedirectNogo => "domain-redirect-nogo",
            FunctionName::RedirectProxyBinaries => "redirect-proxy.binaries",
            FunctionName::RedirectGrfsearch => "redirect-grfsearch",
            FunctionName::RedirectSecurity => "redirect-security",
        }
    }
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FunctionName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FunctionName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| Error::UnknownFunction(s.to_owned()))
    }
}

/// Origins the edge functions redirect to.
#[derive(Debug, Clone)]
pub struct EdgeConfig {
    pub(crate) website_url: String,
    pub(crate) cdn_url: String,
    pub(crate) grfcrawler_url: String,
}

impl EdgeConfig {
    /// Default main website.
    pub const DEFAULT_WEBSITE_URL: &'static str = "https://www.openttd.org";
    /// Default CDN serving release binaries.
    pub const DEFAULT_CDN_URL: &'static str = "https://cdn.openttd.org";
    /// Default GRFCrawler location.
    pub const DEFAULT_GRFCRAWLER_URL: &'static str = GrfSearchRedirect::DEFAULT_BASE_URL;

    /// CI build overview.
    pub const CI_URL: &'static str = "https://dev.azure.com/openttd/OpenTTD/_build";
    /// Forum board.
    pub const FORUM_URL: &'static str = "https://www.tt-forums.net/viewforum.php?f=55";
    /// Source repository.
    pub const SOURCE_URL: &'static str = "https://github.com/OpenTTD/OpenTTD";
    /// Issue tracker.
    pub const ISSUES_URL: &'static str = TaskLinkRewrite::DEFAULT_TRACKER_URL;
    /// GameScript API documentation.
    pub const GS_API_DOCS_URL: &'static str = "https://docs.openttd.org/gs-api/";

    /// Override the main website origin. Used by the security and root redirects.
    ///
    /// ```
    /// # use openttd_edge::EdgeConfig;
    /// let mut config = EdgeConfig::default();
    /// config.website_url("https://staging.openttd.org");
    /// ```
    pub fn website_url(&mut self, website_url: impl Into<String>) -> &mut Self {
        self.website_url = website_url.into();
        self
    }

    /// Override the origin binaries are redirected to.
    pub fn cdn_url(&mut self, cdn_url: impl Into<String>) -> &mut Self {
        self.cdn_url = cdn_url.into();
        self
    }

    /// Override the GRFCrawler origin.
    pub fn grfcrawler_url(&mut self, grfcrawler_url: impl Into<String>) -> &mut Self {
        self.grfcrawler_url = grfcrawler_url.into();
        self
    }

    /// Build the handler behind a deployment unit.
    ///
    /// ```
    /// # use openttd_edge::{EdgeConfig, EdgeHandler, FunctionName, Request};
    /// let handler = EdgeConfig::default().function(FunctionName::IndexRedirect);
    /// let outcome = handler.handle(Request::new("/docs/"));
    /// assert_eq!(outcome.uri(), Some("/docs/index.html"));
    /// ```
    pub fn function(&self, name: FunctionName) -> Box<dyn EdgeHandler> {
        match name {
            FunctionName::BananasCdn => Box::new(AssetPathRewrite),
            FunctionName::IndexRedirect => Box::new(DirectoryIndex),
            FunctionName::PreviewRedirect => Box::new(PreviewIndex),
            FunctionName::FlysprayRedirect => Box::new(TaskLinkRewrite::new(Self::ISSUES_URL)),
            FunctionName::RedirectFarm => Box::new(FixedRedirect::new(Self::CI_URL)),
            FunctionName::RedirectForum => Box::new(FixedRedirect::new(Self::FORUM_URL)),
            FunctionName::RedirectGithub => Box::new(FixedRedirect::new(Self::SOURCE_URL)),
            FunctionName::RedirectIssues => Box::new(FixedRedirect::new(Self::ISSUES_URL)),
            FunctionName::RedirectRoot => {
                Box::new(FixedRedirect::new(format!("{}/", self.website_url)))
            }
            FunctionName::DomainRedirectNogo => Box::new(FixedRedirect::new(Self::GS_API_DOCS_URL)),
            FunctionName::RedirectProxyBinaries => Box::new(ProxyRedirect::new(&self.cdn_url)),
            FunctionName::RedirectGrfsearch => {
                Box::new(GrfSearchRedirect::new(&self.grfcrawler_url))
            }
            FunctionName::RedirectSecurity => Box::new(SecurityRedirect::new(&self.website_url)),
        }
    }
}

impl Default for EdgeConfig {
    fn default() -> Self {
        EdgeConfig {
            website_url: Self::DEFAULT_WEBSITE_URL.to_owned(),
            cdn_url: Self::DEFAULT_CDN_URL.to_owned(),
            grfcrawler_url: Self::DEFAULT_GRFCRAWLER_URL.to_owned(),
        }
    }
}
