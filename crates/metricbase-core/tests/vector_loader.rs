//! JSON test vector loader shared by the value tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::fs;

use base64::Engine;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ValueVector {
    pub description: String,
    pub kind: String,
    pub input: InputData,
    #[serde(default)]
    pub expect_text: Option<String>,
    #[serde(default)]
    pub expect_stale: bool,
}

#[derive(Debug, Deserialize)]
pub struct InputData {
    pub encoding: String,
    pub data: String,
}

impl InputData {
    pub fn bytes(&self) -> Vec<u8> {
        match self.encoding.as_str() {
            "base64" => base64::engine::general_purpose::STANDARD
                .decode(&self.data)
                .expect("invalid base64 in test vector"),
            "hex" => hex::decode(&self.data).expect("invalid hex in test vector"),
            "text" => self.data.as_bytes().to_vec(),
            other => panic!("unsupported encoding: {other}"),
        }
    }

    pub fn text(&self) -> &str {
        assert_eq!(self.encoding, "text", "vector input is not text");
        &self.data
    }
}

pub fn load(name: &str) -> Vec<ValueVector> {
    let s = fs::read_to_string(format!("tests/vectors/{name}")).unwrap();
    serde_json::from_str(&s).unwrap()
}
