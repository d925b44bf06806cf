//! Policy table deciding how shortening failures affect a request.

use crate::domain::shortener::ShortenerError;

/// What the orchestrator does with a failed shortening attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureAction {
    /// Encode the long URL instead and attach the failure as a warning.
    Fallback,
    /// Abort the request with an internal error.
    Fail,
}

/// Maps each error class to its outcome.
///
/// Once the input URL is valid, upstream problems never block QR generation:
/// every typed upstream failure falls back. Only failures that indicate a bug
/// on our side fail the request.
pub fn action_for(error: &ShortenerError) -> FailureAction {
    match error {
        ShortenerError::Timeout
        | ShortenerError::Network(_)
        | ShortenerError::Upstream { .. }
        | ShortenerError::InvalidResponse(_) => FailureAction::Fallback,
        ShortenerError::Unexpected(_) => FailureAction::Fail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_failures_fall_back() {
        let errors = [
            ShortenerError::Timeout,
            ShortenerError::Network("refused".into()),
            ShortenerError::Upstream {
                status: 500,
                message: "boom".into(),
            },
            ShortenerError::Upstream {
                status: 401,
                message: "bad key".into(),
            },
            ShortenerError::InvalidResponse("not json".into()),
        ];

        for err in &errors {
            assert_eq!(action_for(err), FailureAction::Fallback, "{err:?}");
        }
    }

    #[test]
    fn test_unexpected_failure_fails() {
        assert_eq!(
            action_for(&ShortenerError::Unexpected("builder".into())),
            FailureAction::Fail
        );
    }
}
