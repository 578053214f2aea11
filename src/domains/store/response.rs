//! Classification of upstream HTTP responses.
//!
//! Order of checks:
//! 1. an HTML body (first non-blank character `<`) is an auth/not-found page
//! 2. a non-2xx status carries its JSON body, or `HTTP {status}: {text}`
//! 3. an empty 2xx body becomes the empty-result sentinel
//! 4. anything else must be JSON

use reqwest::StatusCode;
use serde_json::Value;

use crate::domains::tools::OperationResult;

/// Turn an upstream status and body into an operation result.
pub fn classify(status: StatusCode, body: &str) -> OperationResult {
    let trimmed = body.trim();

    if trimmed.starts_with('<') {
        return OperationResult::failure(html_failure(status, trimmed));
    }

    if !status.is_success() {
        return match serde_json::from_str::<Value>(trimmed) {
            Ok(json) => OperationResult::failure(json.to_string()),
            Err(_) => {
                let detail = if trimmed.is_empty() {
                    status.canonical_reason().unwrap_or("Unknown Status")
                } else {
                    trimmed
                };
                OperationResult::failure(format!("HTTP {}: {}", status.as_u16(), detail))
            }
        };
    }

    if trimmed.is_empty() {
        return OperationResult::empty();
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(json) => OperationResult::success(json),
        Err(e) => OperationResult::failure(format!("Invalid JSON response from API: {e}")),
    }
}

fn html_failure(status: StatusCode, body: &str) -> String {
    let haystack = format!("{} {}", status.as_u16(), body);
    let mentions = |code: &str, phrase: &str| haystack.contains(code) || haystack.contains(phrase);

    if mentions("401", "Unauthorized") {
        "Authentication failed (401 Unauthorized). Check BIGCOMMERCE_ACCESS_TOKEN and the store hash."
            .to_string()
    } else if mentions("403", "Forbidden") {
        "Access denied (403 Forbidden). The API account lacks the scope required for this resource."
            .to_string()
    } else if mentions("404", "Not Found") {
        "Resource not found (404 Not Found). Check the store hash and the requested id."
            .to_string()
    } else {
        match extract_title(body) {
            Some(title) => format!("API returned an HTML page instead of JSON: {title}"),
            None => format!(
                "API returned an HTML page instead of JSON (HTTP {})",
                status.as_u16()
            ),
        }
    }
}

/// Text between the first `<title>` and `</title>`, if non-empty.
fn extract_title(html: &str) -> Option<&str> {
    let lower = html.to_ascii_lowercase();
    let start = lower.find("<title>")? + "<title>".len();
    let end = start + lower.get(start..)?.find("</title>")?;
    html.get(start..end)
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn failure_text(result: OperationResult) -> String {
        match result {
            OperationResult::Failure(msg) => msg,
            OperationResult::Success(v) => panic!("expected failure, got {v}"),
        }
    }

    #[test]
    fn test_success_json() {
        let result = classify(StatusCode::OK, r#"{"data":[{"id":1}]}"#);
        assert_eq!(result, OperationResult::success(json!({ "data": [{ "id": 1 }] })));
    }

    #[test]
    fn test_empty_body_is_sentinel() {
        assert_eq!(classify(StatusCode::OK, ""), OperationResult::empty());
        assert_eq!(classify(StatusCode::NO_CONTENT, "  \n"), OperationResult::empty());
    }

    #[test]
    fn test_error_with_json_body() {
        let text = failure_text(classify(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"status": 422, "title": "Invalid filter"}"#,
        ));
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["title"], "Invalid filter");
    }

    #[test]
    fn test_error_with_text_body() {
        let text = failure_text(classify(StatusCode::BAD_GATEWAY, "upstream down"));
        assert_eq!(text, "HTTP 502: upstream down");
    }

    #[test]
    fn test_error_with_empty_body_uses_reason() {
        let text = failure_text(classify(StatusCode::SERVICE_UNAVAILABLE, ""));
        assert_eq!(text, "HTTP 503: Service Unavailable");
    }

    #[test]
    fn test_html_401() {
        let body = "<html><head><title>401 Unauthorized</title></head></html>";
        let text = failure_text(classify(StatusCode::UNAUTHORIZED, body));
        assert!(text.contains("Authentication failed"));
    }

    #[test]
    fn test_html_403_and_404() {
        let text = failure_text(classify(StatusCode::FORBIDDEN, "<html>Forbidden</html>"));
        assert!(text.contains("Access denied"));

        let text = failure_text(classify(StatusCode::NOT_FOUND, "<html>Not Found</html>"));
        assert!(text.contains("Resource not found"));
    }

    #[test]
    fn test_html_on_success_status_is_failure() {
        let body = "<!DOCTYPE html><html><head><TITLE> Maintenance </TITLE></head></html>";
        let text = failure_text(classify(StatusCode::OK, body));
        assert_eq!(text, "API returned an HTML page instead of JSON: Maintenance");
    }

    #[test]
    fn test_html_without_title() {
        let text = failure_text(classify(StatusCode::OK, "<html></html>"));
        assert_eq!(text, "API returned an HTML page instead of JSON (HTTP 200)");
    }

    #[test]
    fn test_invalid_json_on_success() {
        let text = failure_text(classify(StatusCode::OK, "not json"));
        assert!(text.starts_with("Invalid JSON response from API"));
    }
}
