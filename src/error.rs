pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An edge names a node that has no vertex cell. Parser output cannot
    /// produce this; hitting it means a graph was assembled by hand incorrectly.
    #[error("edge #{edge} references node `{node}` which has no vertex cell")]
    DanglingEndpoint { edge: usize, node: String },

    #[error("deflate stream error: {0}")]
    Deflate(#[from] std::io::Error),

    #[error("payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("decoded payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
