use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::Serialize;
use serde_json::Value;
use vaani_core::{select_best, BestProduct};

use crate::middleware::RequestId;

use super::{ApiError, AppState};

const QUERY_REQUIRED: &str = "Query is required";
const API_KEY_MISSING: &str = "API Key missing in Environment Variables";

#[derive(Debug, Default)]
pub(super) struct SearchRequest {
    query: Option<Value>,
}

impl SearchRequest {
    /// Reads the request from a JSON body. Only an object can carry a
    /// `query`; any other JSON value is a request without one.
    fn from_value(body: Value) -> Self {
        let query = match body {
            Value::Object(mut fields) => fields.remove("query"),
            _ => None,
        };
        Self { query }
    }

    /// The search keyword, if present as a non-empty string.
    fn keyword(&self) -> Option<&str> {
        self.query
            .as_ref()
            .and_then(Value::as_str)
            .filter(|q| !q.is_empty())
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub(super) enum SearchResponse {
    NoProducts {
        message: String,
    },
    Success {
        best_product: BestProduct,
        total_found: usize,
    },
}

impl SearchResponse {
    fn no_products(query: &str) -> Self {
        Self::NoProducts {
            message: format!("No products found for \"{query}\""),
        }
    }
}

pub(super) async fn search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let request = match body {
        Ok(Json(value)) => SearchRequest::from_value(value),
        // Callers that send no JSON body at all are treated as sending `{}`.
        Err(JsonRejection::MissingJsonContentType(_)) => SearchRequest::default(),
        Err(rejection) => return Err(ApiError::Validation(rejection.body_text())),
    };

    let Some(query) = request.keyword() else {
        return Err(ApiError::Validation(QUERY_REQUIRED.to_string()));
    };

    let Some(feed) = state.feed.as_ref() else {
        tracing::error!(request_id = %req_id.0, "search rejected: cuelinks api key missing");
        return Err(ApiError::Configuration(API_KEY_MISSING.to_string()));
    };

    let products = feed.search_products(query).await.map_err(|e| {
        tracing::error!(
            request_id = %req_id.0,
            base_url = %state.config.cuelinks_base_url,
            error = %e,
            "error fetching from cuelinks"
        );
        ApiError::Upstream(e.to_string())
    })?;

    if products.is_empty() {
        tracing::info!(request_id = %req_id.0, query, "no products found");
        return Ok(Json(SearchResponse::no_products(query)));
    }

    let total_found = products.len();
    let best_product = select_best(&products)
        .map(BestProduct::from_product)
        .ok_or_else(|| ApiError::Upstream("no product could be selected".to_string()))?;

    tracing::info!(request_id = %req_id.0, query, total_found, "best price selected");

    Ok(Json(SearchResponse::Success {
        best_product,
        total_found,
    }))
}
