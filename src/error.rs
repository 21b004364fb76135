use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("cannot parse date `{raw}` with format `{format}`")]
    DateParse { raw: String, format: String },

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}
