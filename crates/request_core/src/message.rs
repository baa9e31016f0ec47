use shared::error::RequestFailure;

type Extractor = fn(&RequestFailure) -> Option<String>;

fn body_message(failure: &RequestFailure) -> Option<String> {
    failure.response.as_ref()?.data.message.clone()
}

fn body_detail(failure: &RequestFailure) -> Option<String> {
    failure.response.as_ref()?.data.detail.clone()
}

fn transport_message(failure: &RequestFailure) -> Option<String> {
    failure.message.clone()
}

// The order is part of the contract: the server's own message wins, then its
// detail field, then the transport-level message.
const EXTRACTORS: &[Extractor] = &[body_message, body_detail, transport_message];

/// Derives a display-ready message from an arbitrary failure shape, trying
/// each extractor in turn and falling back to `fallback` when none of them
/// yields a value.
pub fn display_message(failure: &RequestFailure, fallback: &str) -> String {
    EXTRACTORS
        .iter()
        .find_map(|extract| extract(failure))
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::{ErrorBody, ErrorResponse};

    fn failure_with_body(message: Option<&str>, detail: Option<&str>) -> RequestFailure {
        RequestFailure {
            response: Some(ErrorResponse {
                status: 422,
                data: ErrorBody {
                    message: message.map(str::to_string),
                    detail: detail.map(str::to_string),
                },
            }),
            message: Some("request failed with status 422".to_string()),
        }
    }

    #[test]
    fn body_message_wins_over_everything() {
        let failure = failure_with_body(Some("title must not be empty"), Some("title"));
        assert_eq!(
            display_message(&failure, "fallback"),
            "title must not be empty"
        );
    }

    #[test]
    fn body_detail_is_used_when_message_is_absent() {
        let failure = failure_with_body(None, Some("not found"));
        assert_eq!(display_message(&failure, "fallback"), "not found");
    }

    #[test]
    fn transport_message_is_used_when_the_body_is_empty() {
        let failure = failure_with_body(None, None);
        assert_eq!(
            display_message(&failure, "fallback"),
            "request failed with status 422"
        );
    }

    #[test]
    fn transport_message_works_without_any_response() {
        let failure = RequestFailure::transport("network down");
        assert_eq!(display_message(&failure, "fallback"), "network down");
    }

    #[test]
    fn fallback_is_used_when_nothing_is_usable() {
        assert_eq!(
            display_message(&RequestFailure::bare(), "fallback"),
            "fallback"
        );
    }
}
