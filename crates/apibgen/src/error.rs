#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    #[error("Generic {0}")]
    Generic(String),

    #[error("Cannot read collection file: {0}")]
    Read(String),

    #[error("Cannot parse collection: {0}")]
    Parse(String),

    #[error("Cannot write output file: {0}")]
    Write(String),
}
