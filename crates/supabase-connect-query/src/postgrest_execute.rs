use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use supabase_connect_core::{
    PostgrestErrorBody, StatusCode, SupabaseClient, SupabaseError, SupabaseResponse,
};

use crate::sql::{CountOption, SqlOperation, SqlParts};

/// Execute a PostgREST request and parse the response.
///
/// Auth headers come from the client's defaults; this only adds `Accept`.
pub async fn execute_rest<T: DeserializeOwned + Send>(
    client: &SupabaseClient,
    method: reqwest::Method,
    url: &str,
    mut headers: HeaderMap,
    body: Option<JsonValue>,
    parts: &SqlParts,
) -> SupabaseResponse<T> {
    headers
        .entry(ACCEPT)
        .or_insert(HeaderValue::from_static("application/json"));

    tracing::debug!(
        method = %method,
        url = %url,
        operation = ?parts.operation,
        "Executing PostgREST request"
    );

    let mut request = client.http().request(method, url).headers(headers);

    if let Some(body) = body {
        request = request.json(&body);
    }

    let response = match request.send().await {
        Ok(r) => r,
        Err(e) => return SupabaseResponse::error(SupabaseError::from(e)),
    };

    let status_code = response.status().as_u16();
    let count = parse_count_from_headers(response.headers());

    let body_text = match response.text().await {
        Ok(t) => t,
        Err(e) => return SupabaseResponse::error(SupabaseError::from(e)),
    };

    tracing::debug!(status = status_code, bytes = body_text.len(), "PostgREST response");

    if status_code >= 400 {
        return parse_error_response(status_code, &body_text);
    }

    // 204 No Content, or return=minimal
    if status_code == 204 || body_text.trim().is_empty() {
        return SupabaseResponse::no_content().with_count(count);
    }

    let data = match parse_body::<T>(&body_text, parts) {
        Ok(data) => data,
        Err(e) => return SupabaseResponse::error(e),
    };

    if parts.maybe_single && data.len() > 1 {
        return SupabaseResponse::error(SupabaseError::MultipleRows(data.len()));
    }

    build_response_from_operation(data, parts, StatusCode::from_u16(status_code), count)
}

/// Decode a success body into rows.
///
/// Accepts a JSON array, a single object (`single()` or `return=representation`),
/// or a bare scalar from a scalar RPC, which is wrapped as `{ "<function>": value }`.
fn parse_body<T: DeserializeOwned>(body_text: &str, parts: &SqlParts) -> Result<Vec<T>, SupabaseError> {
    if let Ok(data) = serde_json::from_str::<Vec<T>>(body_text) {
        return Ok(data);
    }
    if let Ok(item) = serde_json::from_str::<T>(body_text) {
        return Ok(vec![item]);
    }

    match serde_json::from_str::<JsonValue>(body_text) {
        Ok(scalar) if !scalar.is_array() && !scalar.is_object() => {
            let mut wrapped = serde_json::Map::new();
            wrapped.insert(parts.table.clone(), scalar);
            serde_json::from_value::<T>(JsonValue::Object(wrapped))
                .map(|item| vec![item])
                .map_err(|e| {
                    SupabaseError::serialization(format!("Failed to parse scalar response: {e}"))
                })
        }
        Ok(_) => Err(SupabaseError::serialization(format!(
            "Failed to parse response: {body_text}"
        ))),
        Err(e) => Err(SupabaseError::serialization(format!(
            "Failed to parse response: {e}"
        ))),
    }
}

fn build_response_from_operation<T>(
    data: Vec<T>,
    parts: &SqlParts,
    status: StatusCode,
    header_count: Option<i64>,
) -> SupabaseResponse<T> {
    let status = match parts.operation {
        SqlOperation::Insert => StatusCode::Created,
        _ => status,
    };

    let count = header_count.or_else(|| {
        if parts.count != CountOption::None {
            Some(data.len() as i64)
        } else {
            None
        }
    });

    SupabaseResponse {
        data,
        error: None,
        count,
        status,
    }
}

/// PostgREST returns counts in `Content-Range`: "0-9/100" or "*/100".
pub(crate) fn parse_count_from_headers(headers: &HeaderMap) -> Option<i64> {
    headers
        .get("content-range")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.rsplit_once('/'))
        .and_then(|(_, total)| total.parse::<i64>().ok())
}

fn parse_error_response<T>(status_code: u16, body: &str) -> SupabaseResponse<T> {
    match serde_json::from_str::<PostgrestErrorBody>(body) {
        Ok(error_body) if error_body.message.is_some() || error_body.code.is_some() => {
            SupabaseResponse::error(SupabaseError::from_body(status_code, error_body))
        }
        _ => SupabaseResponse::error(SupabaseError::postgrest(status_code, body.to_string(), None)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use supabase_connect_core::Row;

    fn parts(operation: SqlOperation) -> SqlParts {
        SqlParts::new(operation, "public", "exec_sql")
    }

    #[test]
    fn test_count_from_content_range() {
        let mut headers = HeaderMap::new();
        headers.insert("content-range", HeaderValue::from_static("0-9/42"));
        assert_eq!(parse_count_from_headers(&headers), Some(42));

        headers.insert("content-range", HeaderValue::from_static("0-9/*"));
        assert_eq!(parse_count_from_headers(&headers), None);

        assert_eq!(parse_count_from_headers(&HeaderMap::new()), None);
    }

    #[test]
    fn test_parse_body_array() {
        let rows: Vec<Row> =
            parse_body(r#"[{"content":"a"},{"content":"b"}]"#, &parts(SqlOperation::Select)).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_parse_body_single_object() {
        let rows: Vec<Row> = parse_body(r#"{"content":"a"}"#, &parts(SqlOperation::Insert)).unwrap();
        assert_eq!(rows[0].get_as::<String>("content").as_deref(), Some("a"));
    }

    #[test]
    fn test_parse_body_scalar_wrapped_by_function_name() {
        let rows: Vec<Row> = parse_body("null", &parts(SqlOperation::Rpc)).unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].contains("exec_sql"));
    }

    #[test]
    fn test_parse_error_response_json() {
        let resp = parse_error_response::<Row>(
            404,
            r#"{"code":"42P01","message":"relation \"public.text_entries\" does not exist","details":null,"hint":null}"#,
        );
        let err = resp.error.unwrap();
        assert_eq!(err.code(), Some("42P01"));
        assert!(err.is_missing_table());
        assert_eq!(resp.status, StatusCode::NotFound);
    }

    #[test]
    fn test_parse_error_response_plain_text() {
        let resp = parse_error_response::<Row>(502, "Bad Gateway");
        match resp.error.unwrap() {
            SupabaseError::PostgRest { status, message, .. } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("Expected PostgRest variant, got: {:?}", other),
        }
    }
}
