#![allow(dead_code)]

use cloudinary_mgr::interfaces::{HttpResponse, MockTransport};
use cloudinary_mgr::{CloudinaryService, ServiceConfig};
use sha1::{Digest, Sha1};

pub const CLOUD: &str = "demo";
pub const API_KEY: &str = "123456";
pub const API_SECRET: &str = "abcdef";

pub fn service(mock: MockTransport) -> CloudinaryService<MockTransport> {
    CloudinaryService::with_transport(ServiceConfig::new(CLOUD, API_KEY, API_SECRET), mock)
}

pub fn response(status: u16, status_text: &str, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        status_text: status_text.to_string(),
        body: body.to_string(),
    }
}

pub fn field<'a>(fields: &'a [(String, String)], key: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

pub fn keys(fields: &[(String, String)]) -> Vec<String> {
    fields.iter().map(|(k, _)| k.clone()).collect()
}

pub fn sha1_hex(s: &str) -> String {
    Sha1::digest(s.as_bytes())
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// 200 response echoing the public id that was sent
pub fn echo_upload(fields: &[(String, String)], format: &str) -> HttpResponse {
    let public_id = field(fields, "public_id").unwrap_or("random123");
    let body = serde_json::json!({
        "public_id": public_id,
        "version": 1369431906,
        "format": format,
        "resource_type": "image",
        "bytes": 4
    });
    response(200, "200 OK", &body.to_string())
}
