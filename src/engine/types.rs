use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generation {
    pub generated_text: String,
}

/// One line written by the worker: the ready handshake or a reply to a prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerReply {
    pub ok: bool,
    #[serde(default)]
    pub ready: bool,
    #[serde(default)]
    pub results: Vec<Generation>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub meta: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerRequest<'a> {
    pub prompt: &'a str,
}
