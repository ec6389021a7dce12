use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    pub image_b64: String,
    /// Defaults to image/jpeg.
    pub content_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MealRequest {
    pub description: String,
}
