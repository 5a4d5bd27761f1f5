#[cfg(test)]
use crate::error::RecordError;
use serde::{Deserialize, Serialize};

/// フロントエンドへ送信する模擬パケット。1件ごとに1つのWebSocketテキストメッセージになる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacketRecord {
    pub timestamp: i64,
    pub src_ip: String,
    pub src_port: u32,
    pub dst_ip: String,
    pub dst_port: u32,
    pub pid: i32,
    pub pname: String,
    #[serde(rename = "type")]
    pub packet_type: PacketType,
    pub length: u32,
    #[serde(rename = "payload_base64", with = "payload_base64")]
    pub payload: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PacketType {
    Request,
    Response,
}

impl PacketRecord {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    // lengthとペイロードの整合性も検証する
    #[cfg(test)]
    pub fn from_json(text: &str) -> Result<Self, RecordError> {
        let record: PacketRecord = serde_json::from_str(text)?;
        if record.length as usize != record.payload.len() {
            return Err(RecordError::LengthMismatch {
                declared: record.length,
                actual: record.payload.len(),
            });
        }
        Ok(record)
    }
}

mod payload_base64 {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(payload: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(payload))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded.as_bytes()).map_err(serde::de::Error::custom)
    }
}
