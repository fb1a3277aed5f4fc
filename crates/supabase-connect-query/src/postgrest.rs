use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde_json::Value as JsonValue;

use supabase_connect_core::SupabaseError;

use crate::sql::{CountOption, SqlParts};

/// Build PostgREST URL and headers for a SELECT query.
pub fn build_postgrest_select(
    base_url: &str,
    parts: &SqlParts,
) -> Result<(String, HeaderMap), SupabaseError> {
    let mut url = table_url(base_url, &parts.table);
    let mut headers = HeaderMap::new();
    let mut query_params = Vec::new();

    // Select columns
    let columns = parts
        .select_columns
        .as_deref()
        .map(|cols| {
            cols.split(',')
                .map(|c| c.trim().trim_matches('"'))
                .filter(|c| !c.is_empty())
                .collect::<Vec<_>>()
                .join(",")
        })
        .unwrap_or_else(|| "*".to_string());
    query_params.push(format!("select={}", columns));

    // Order
    if !parts.orders.is_empty() {
        let order_parts: Vec<String> = parts
            .orders
            .iter()
            .map(|o| format!("{}.{}", o.column, o.direction.as_postgrest()))
            .collect();
        query_params.push(format!("order={}", order_parts.join(",")));
    }

    // Limit
    if let Some(limit) = parts.limit {
        if limit < 0 {
            return Err(SupabaseError::query_builder(format!(
                "limit must not be negative, got {limit}"
            )));
        }
        query_params.push(format!("limit={}", limit));
    }

    // Single row
    if parts.single {
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.pgrst.object+json"),
        );
    }

    if let Some(count_val) = count_option_prefer(parts.count) {
        headers.insert("Prefer", HeaderValue::from_static(count_val));
    }

    if parts.needs_profile() {
        insert_header(&mut headers, "Accept-Profile", &parts.schema)?;
    }

    url.push('?');
    url.push_str(&query_params.join("&"));

    Ok((url, headers))
}

/// Build PostgREST URL, headers, and body for an INSERT query.
pub fn build_postgrest_insert(
    base_url: &str,
    parts: &SqlParts,
    values: &JsonValue,
) -> Result<(String, HeaderMap, JsonValue), SupabaseError> {
    if !(values.is_object() || values.is_array()) {
        return Err(SupabaseError::query_builder(
            "Insert values must be a JSON object or array of objects",
        ));
    }

    let url = table_url(base_url, &parts.table);
    let mut headers = HeaderMap::new();

    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    // Prefer header (compose return + count)
    let mut prefer_parts = vec![if parts.returning {
        "return=representation"
    } else {
        "return=minimal"
    }];
    if let Some(count_val) = count_option_prefer(parts.count) {
        prefer_parts.push(count_val);
    }
    insert_header(&mut headers, "Prefer", &prefer_parts.join(","))?;

    if parts.needs_profile() {
        insert_header(&mut headers, "Content-Profile", &parts.schema)?;
    }

    Ok((url, headers, values.clone()))
}

/// Build PostgREST URL, headers, and body for an RPC call.
///
/// A null argument set is sent as an empty object.
pub fn build_postgrest_rpc(
    base_url: &str,
    parts: &SqlParts,
    args: &JsonValue,
) -> Result<(String, HeaderMap, JsonValue), SupabaseError> {
    let url = format!("{}/rpc/{}", base_url.trim_end_matches('/'), parts.table);
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    if parts.needs_profile() {
        insert_header(&mut headers, "Content-Profile", &parts.schema)?;
    }

    let body = if args.is_null() {
        JsonValue::Object(serde_json::Map::new())
    } else {
        args.clone()
    };

    Ok((url, headers, body))
}

// ─── Internal Helpers ──────────────────────────────────────

fn table_url(base_url: &str, table: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), table)
}

fn insert_header(headers: &mut HeaderMap, name: &'static str, value: &str) -> Result<(), SupabaseError> {
    let value = HeaderValue::from_str(value).map_err(|e| {
        SupabaseError::query_builder(format!("Invalid value for header {name}: {e}"))
    })?;
    headers.insert(name, value);
    Ok(())
}

/// Convert a CountOption to its PostgREST Prefer header value.
fn count_option_prefer(option: CountOption) -> Option<&'static str> {
    match option {
        CountOption::None => None,
        CountOption::Exact => Some("count=exact"),
    }
}
