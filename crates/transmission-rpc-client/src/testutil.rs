//! Shared test utilities and fixtures.

use serde_json::{Value, json};

use crate::ops::{CONFLICT, RpcRequest, RpcResponse};

/// A `200 OK` response with a successful envelope.
pub(crate) fn success_response(arguments: Value) -> RpcResponse {
    envelope_response(json!({"result": "success", "tag": 1, "arguments": arguments}))
}

/// A `200 OK` response whose envelope carries a failure result.
pub(crate) fn failure_response(result: &str) -> RpcResponse {
    envelope_response(json!({"result": result, "tag": 1}))
}

fn envelope_response(envelope: Value) -> RpcResponse {
    RpcResponse {
        status: 200,
        session_ids: Vec::new(),
        body: serde_json::to_vec(&envelope).unwrap(),
    }
}

/// A `409 Conflict` response handing out the given session id header values.
pub(crate) fn conflict_response(session_ids: &[&str]) -> RpcResponse {
    RpcResponse {
        status: CONFLICT,
        session_ids: session_ids.iter().map(|s| s.to_string()).collect(),
        body: b"<h1>409: Conflict</h1>".to_vec(),
    }
}

/// A `torrent-get` arguments object with the given `(id, name, status)` torrents.
pub(crate) fn torrents_arguments(torrents: &[(i64, &str, i64)]) -> Value {
    let torrents: Vec<Value> = torrents
        .iter()
        .map(|(id, name, status)| json!({"id": id, "name": name, "status": status}))
        .collect();
    json!({ "torrents": torrents })
}

/// The JSON envelope a request carries.
pub(crate) fn request_json(request: &RpcRequest) -> Value {
    serde_json::from_slice(&request.body).unwrap()
}
