use serde::Serialize;

/// Uniform response envelope. Success and failure alike are reported
/// through `status`; `count` only accompanies list responses.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: "success",
            message: message.into(),
            count: None,
            data: Some(data),
            error: None,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

impl ApiResponse<()> {
    pub fn failed(message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            status: "failed",
            message: message.into(),
            count: None,
            data: None,
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn success_envelope_has_no_error_field() {
        let v = to_value(ApiResponse::success("login successfully", json!({"token": "t"}))).unwrap();
        assert_eq!(v["status"], "success");
        assert_eq!(v["message"], "login successfully");
        assert_eq!(v["data"]["token"], "t");
        assert!(v.get("error").is_none());
        assert!(v.get("count").is_none());
    }

    #[test]
    fn failed_envelope_has_no_data_field() {
        let v = to_value(ApiResponse::failed("request error", Some("db down".into()))).unwrap();
        assert_eq!(v["status"], "failed");
        assert_eq!(v["error"], "db down");
        assert!(v.get("data").is_none());
    }

    #[test]
    fn list_envelope_carries_count() {
        let v = to_value(
            ApiResponse::success("data fetch successfully", json!([1, 2, 3])).with_count(3),
        )
        .unwrap();
        assert_eq!(v["count"], 3);
    }

    #[test]
    fn explicit_null_data_is_kept() {
        // GET /get/:id answers success with data: null for a missing record.
        let v = to_value(ApiResponse::success(
            "data fetch successfully",
            None::<serde_json::Value>,
        ))
        .unwrap();
        assert!(v.get("data").is_some());
        assert!(v["data"].is_null());
    }
}
