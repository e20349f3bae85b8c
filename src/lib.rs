//! Lambda@Edge functions for the OpenTTD CloudFront distributions.
//!
//! # Overview
//!
//! Every function is an [`EdgeHandler`]: it receives one [`Request`] and returns an [`Outcome`],
//! either the request (possibly with a rewritten uri) to continue to the origin, or a
//! `301 Moved Permanently` [`Response`] that CloudFront sends straight back to the client.
//!
//! Handlers are stateless and never fail. [`EdgeConfig::function`] builds the handler behind a
//! given deployment unit; [`EdgeHandler::invoke_json`] runs it on a raw CloudFront event.
//!
//! # Error Handling
//!
//! Errors are represented by the [`Error`] enum. They only come from the event envelope (a
//! malformed event, or one without a record) and from looking up unknown function names.
//!
//! # Logging
//!
//! The package uses the [`log`](https://docs.rs/log/latest/log/) crate with target
//! `openttd_edge`. Rewrites are logged at trace level, redirects at debug level.

#![warn(rustdoc::missing_crate_level_docs)]
#![warn(missing_docs)]

mod config;
mod error;
mod event;
mod grfsearch;
mod handler;
mod pattern;
mod redirect;
mod rewrite;

pub use config::{EdgeConfig, FunctionName};
pub use error::{Error, Result};
pub use event::{CloudFront, Event, Header, Outcome, Record, Request, Response};
pub use grfsearch::GrfSearchRedirect;
pub use handler::{run, Completion, EdgeHandler};
pub use redirect::{FixedRedirect, ProxyRedirect, SecurityRedirect};
pub use rewrite::{AssetPathRewrite, DirectoryIndex, PreviewIndex, TaskLinkRewrite};
