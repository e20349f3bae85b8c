use std::collections::BTreeMap;

use derive_more::From;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A Lambda@Edge invocation event as delivered by CloudFront.
#[derive(Debug, Serialize, Deserialize)]
pub struct Event {
    /// CloudFront always sends exactly one record.
    #[serde(rename = "Records")]
    pub records: Vec<Record>,
}

impl Event {
    /// Parse an event from its JSON wire form.
    pub fn from_json(json: &str) -> Result<Event> {
        Ok(serde_json::from_str(json)?)
    }

    /// Wrap a single request into an event, the way CloudFront does.
    pub fn from_request(request: Request) -> Event {
        Event {
            records: vec![Record {
                cf: CloudFront {
                    request,
                    extra: serde_json::Map::new(),
                },
            }],
        }
    }

    /// Take the request out of the first record.
    pub fn into_request(self) -> Result<Request> {
        self.records
            .into_iter()
            .next()
            .map(|record| record.cf.request)
            .ok_or(Error::MissingRecord)
    }
}

/// One entry of [`Event::records`].
#[derive(Debug, Serialize, Deserialize)]
pub struct Record {
    /// The CloudFront part of the record.
    pub cf: CloudFront,
}

/// Distribution config and the request being processed.
#[derive(Debug, Serialize, Deserialize)]
pub struct CloudFront {
    /// The viewer or origin request.
    pub request: Request,
    /// `config` and whatever else CloudFront sends along.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// An inbound edge request.
///
/// Only `uri` and `querystring` are interpreted. All other fields CloudFront sends (`clientIp`,
/// `method`, `headers`, `origin`, ...) are kept in `extra` so that a forwarded request serializes
/// back the way it was received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Request path, starting with `/`.
    #[serde(default)]
    pub uri: String,
    /// Raw query string, without the leading `?`.
    #[serde(default)]
    pub querystring: String,
    /// Every other request field, untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Request {
    /// Create a request for `uri` with an empty query string and no other fields.
    pub fn new(uri: impl Into<String>) -> Self {
        Request {
            uri: uri.into(),
            querystring: String::new(),
            extra: serde_json::Map::new(),
        }
    }

    /// Set the raw query string (without `?`).
    pub fn with_querystring(mut self, querystring: impl Into<String>) -> Self {
        self.querystring = querystring.into();
        self
    }
}

/// A single header value in CloudFront's `{key, value}` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Header name with its original casing, e.g. `Location`.
    pub key: String,
    /// Header value.
    pub value: String,
}

/// A response generated at the edge instead of forwarding the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// Numeric status code as a string, e.g. `"301"`.
    pub status: String,
    /// Reason phrase sent with the status.
    pub status_description: String,
    /// Lowercased header name to its values.
    pub headers: BTreeMap<String, Vec<Header>>,
}

impl Response {
    /// Build a `301 Moved Permanently` pointing at `location`.
    pub fn moved_permanently(location: impl Into<String>) -> Self {
        Response {
            status: "301".to_owned(),
            status_description: "Moved Permanently".to_owned(),
            headers: BTreeMap::from([(
                "location".to_owned(),
                vec![Header {
                    key: "Location".to_owned(),
                    value: location.into(),
                }],
            )]),
        }
    }

    /// Value of the `Location` header, if any.
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get("location")
            .and_then(|values| values.first())
            .map(|header| header.value.as_str())
    }
}

/// Result of running a handler: either the request continues down the pipeline, or CloudFront
/// answers the client directly.
#[derive(Debug, Clone, PartialEq, Serialize, From)]
#[serde(untagged)]
pub enum Outcome {
    /// Continue to cache lookup and origin with this request.
    Forward(Request),
    /// Send this response to the client.
    Respond(Response),
}

impl Outcome {
    /// The forwarded request, if the handler passed it on.
    pub fn as_request(&self) -> Option<&Request> {
        match self {
            Outcome::Forward(request) => Some(request),
            Outcome::Respond(_) => None,
        }
    }

    /// The generated response, if the handler answered directly.
    pub fn as_response(&self) -> Option<&Response> {
        match self {
            Outcome::Forward(_) => None,
            Outcome::Respond(response) => Some(response),
        }
    }

    /// Rewritten uri for forwarded requests.
    pub fn uri(&self) -> Option<&str> {
        self.as_request().map(|request| request.uri.as_str())
    }

    /// Redirect target for responses.
    pub fn location(&self) -> Option<&str> {
        self.as_response().and_then(Response::location)
    }

    /// Serialize into the shape the Lambda@Edge runtime expects back.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use std::{fs::File, io::BufReader};

    use serde_json::json;

    use super::{Event, Outcome, Request, Response};
    use crate::Error;

    #[test]
    fn parse_viewer_request_event() {
        let f = File::open("tests/data/events/viewer-request.json")
            .expect("Failed to open tests/data/events/viewer-request.json");
        let event: Event = serde_json::from_reader(BufReader::new(f)).unwrap();
        assert!(event.records[0].cf.extra.contains_key("config"));

        let request = event.into_request().unwrap();
        assert_eq!(request.uri, "/base-graphics/12345678/0123456789abcdef0123456789abcdef/opengfx-7.1.tar.gz");
        assert_eq!(request.querystring, "");
        assert_eq!(request.extra["method"], json!("GET"));
        assert_eq!(request.extra["clientIp"], json!("203.0.113.178"));
    }

    #[test]
    fn forwarded_request_keeps_unknown_fields() {
        let original = json!({
            "clientIp": "2001:db8::1",
            "method": "GET",
            "uri": "/docs/",
            "querystring": "a=b",
            "headers": {
                "host": [{ "key": "Host", "value": "docs.openttd.org" }]
            }
        });
        let request: Request = serde_json::from_value(original.clone()).unwrap();
        let outcome = Outcome::from(request);
        assert_eq!(serde_json::to_value(&outcome).unwrap(), original);
    }

    #[test]
    fn missing_uri_and_querystring_default_to_empty() {
        let request: Request = serde_json::from_str(r#"{"method": "GET"}"#).unwrap();
        assert_eq!(request.uri, "");
        assert_eq!(request.querystring, "");
    }

    #[test]
    fn response_wire_shape() {
        let outcome = Outcome::from(Response::moved_permanently("https://www.openttd.org/"));
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({
                "status": "301",
                "statusDescription": "Moved Permanently",
                "headers": {
                    "location": [{ "key": "Location", "value": "https://www.openttd.org/" }]
                }
            })
        );
        assert_eq!(outcome.location(), Some("https://www.openttd.org/"));
        assert_eq!(outcome.uri(), None);
    }

    #[test]
    fn empty_records_is_an_error() {
        let event = Event::from_json(r#"{"Records": []}"#).unwrap();
        assert!(matches!(event.into_request(), Err(Error::MissingRecord)));
    }

    #[test]
    fn garbage_is_an_invalid_event() {
        assert!(matches!(
            Event::from_json("not json"),
            Err(Error::InvalidEvent(_))
        ));
    }
}
