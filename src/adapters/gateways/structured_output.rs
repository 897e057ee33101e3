//! Strict decoding of JSON objects out of model text.
//!
//! Models are asked for a bare JSON object but sometimes wrap it in a
//! markdown code block or add a sentence around it. The object is cut out
//! and decoded into the gateway's typed output; anything that does not
//! decode is a malformed response.

use serde::de::DeserializeOwned;

use crate::ports::{AIProvider, CompletionRequest, FinishReason, GatewayError};

/// Sends `request` and decodes the reply into `T`.
pub(crate) async fn complete_json<T: DeserializeOwned>(
    provider: &dyn AIProvider,
    request: CompletionRequest,
) -> Result<T, GatewayError> {
    let operation = request.metadata.operation;
    let response = provider.complete(request).await?;

    if response.finish_reason == FinishReason::ContentFilter {
        return Err(GatewayError::unavailable("response was filtered"));
    }

    decode(&response.content).map_err(|err| {
        tracing::debug!(operation, content = %response.content, "Undecodable model output");
        err
    })
}

/// Decodes the first JSON object in `content` into `T`.
pub(crate) fn decode<T: DeserializeOwned>(content: &str) -> Result<T, GatewayError> {
    let json = extract_json_object(content)
        .ok_or_else(|| GatewayError::malformed("no JSON object in response"))?;
    serde_json::from_str(json).map_err(|e| GatewayError::malformed(e.to_string()))
}

/// Returns the JSON object text inside `content`, preferring a fenced block.
fn extract_json_object(content: &str) -> Option<&str> {
    let trimmed = content.trim();
    let body = fenced_block(trimmed).unwrap_or(trimmed);
    let start = body.find('{')?;
    balanced_object(body, start)
}

fn fenced_block(s: &str) -> Option<&str> {
    let open = s.find("```")?;
    let after_fence = &s[open + 3..];
    // Skip the info string (e.g. "json") up to the end of the fence line
    let body_start = after_fence.find('\n')? + 1;
    let body = &after_fence[body_start..];
    let end = body.find("```")?;
    Some(body[..end].trim())
}

fn balanced_object(s: &str, start: usize) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, c) in s[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            _ if in_string => {}
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&s[start..start + i + 1]);
                }
            }
            _ => {}
        }
    }
    None
}
