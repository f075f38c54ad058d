use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue};

/// Connection-scoped headers that never cross a proxy hop.
const HOP_BY_HOP: [HeaderName; 7] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    HeaderName::from_static("proxy-connection"),
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP.contains(name)
}

/// Headers for the backend request. Repeated values collapse into one
/// comma-joined value; `Host` and `Content-Length` are left to the client.
pub fn forward_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(inbound.keys_len());

    for name in inbound.keys() {
        if is_hop_by_hop(name) || name == header::HOST || name == header::CONTENT_LENGTH {
            continue;
        }

        let joined = inbound
            .get_all(name)
            .iter()
            .map(HeaderValue::as_bytes)
            .collect::<Vec<_>>()
            .join(&b","[..]);

        match HeaderValue::from_bytes(&joined) {
            Ok(value) => {
                out.insert(name.clone(), value);
            }
            Err(e) => tracing::warn!("Dropping header {}: {}", name, e),
        }
    }

    out
}

/// Headers for the relayed response. The server recomputes framing.
pub fn relay_headers(backend: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(backend.keys_len());
    for (name, value) in backend {
        if is_hop_by_hop(name) || name == header::CONTENT_LENGTH {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    out
}
