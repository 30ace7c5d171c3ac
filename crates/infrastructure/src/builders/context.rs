//! Builders that adjust the request's cancellation context.

use std::convert::Infallible;
use std::time::Duration;

use httpx_domain::{CancellationToken, Request, RequestBuilder, RequestContext};

/// Sets a deadline for executing the request.
pub fn timeout(limit: Duration) -> RequestBuilder {
    RequestBuilder::named(
        format!("timeout({}ms)", limit.as_millis()),
        move |request: &mut Request| {
            let context = RequestContext::of_mut(request);
            *context = context.clone().with_timeout(limit);
            Ok::<_, Infallible>(())
        },
    )
}

/// Binds the request to `token`; cancelling it aborts execution.
pub fn cancel_with(token: CancellationToken) -> RequestBuilder {
    RequestBuilder::named("cancel_with", move |request: &mut Request| {
        let context = RequestContext::of_mut(request);
        *context = context.clone().with_cancellation(token.clone());
        Ok::<_, Infallible>(())
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use httpx_domain::new_request;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_timeout_and_cancellation_compose() {
        let token = CancellationToken::new();
        let mut request = new_request("GET", "/").unwrap();

        timeout(Duration::from_millis(250)).apply(&mut request).unwrap();
        cancel_with(token.clone()).apply(&mut request).unwrap();
        token.cancel();

        let context = RequestContext::of(&request);
        assert_eq!(context.timeout(), Some(Duration::from_millis(250)));
        assert!(context.cancellation().is_cancelled());
    }

    #[test]
    fn test_timeout_name() {
        assert_eq!(timeout(Duration::from_secs(2)).name(), "timeout(2000ms)");
    }
}
