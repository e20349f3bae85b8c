use crate::{Event, Outcome, Request, Result};

/// A single edge function.
///
/// Implementations are stateless: every call sees one request and produces exactly one
/// [`Outcome`], never failing.
pub trait EdgeHandler: Send + Sync {
    /// Either rewrite and forward `request`, or answer it directly.
    fn handle(&self, request: Request) -> Outcome;

    /// Run the handler against a full CloudFront event.
    ///
    /// Fails only if the event carries no request.
    fn invoke(&self, event: Event) -> Result<Outcome> {
        let request = event.into_request().inspect_err(|err| {
            log::warn!(target: "openttd_edge", "unable to extract request from event: {:?}", err);
        })?;
        Ok(self.handle(request))
    }

    /// JSON in, JSON out. This is what the Lambda@Edge runtime sees.
    fn invoke_json(&self, event: &str) -> Result<String> {
        let event = Event::from_json(event).inspect_err(|err| {
            log::warn!(target: "openttd_edge", "malformed CloudFront event: {:?}", err);
        })?;
        self.invoke(event)?.to_json()
    }

    /// Run the handler against `event` and report the result through `completion`.
    ///
    /// `completion` is called exactly once, before this returns.
    fn handle_event(&self, event: Event, completion: impl Completion)
    where
        Self: Sized,
    {
        run(self, event, completion);
    }
}

/// Receives the result of an invocation. Called exactly once per event.
pub trait Completion {
    /// Take the outcome of an invocation, or the error that kept the handler from running.
    fn complete(self, result: Result<Outcome>);
}

impl<T: FnOnce(Result<Outcome>)> Completion for T {
    fn complete(self, result: Result<Outcome>) {
        self(result);
    }
}

/// Invoke `handler` on `event` and hand the result to `completion` before returning.
pub fn run(handler: &dyn EdgeHandler, event: Event, completion: impl Completion) {
    completion.complete(handler.invoke(event));
}
