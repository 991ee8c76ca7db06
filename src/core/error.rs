//! 统一错误处理 for AlgoTrace
//!
//! 算法引擎本身不返回错误：无法满足的输入（例如模式串比文本长）会得到空轨迹。
//! 错误只出现在边界上：图的构造与校验、算法请求的参数检查、配置加载、
//! Huffman 解码，以及自动播放所需的运行时。
//!
//! 统一的返回类型是 `VizResult<T>`。

use thiserror::Error;

/// 统一的错误类型
#[derive(Error, Debug)]
pub enum VizError {
    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    #[error("vertex {vertex} out of range for graph with {vertex_count} vertices")]
    VertexOutOfRange { vertex: usize, vertex_count: usize },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}

/// 统一的结果类型
pub type VizResult<T> = Result<T, VizError>;

impl From<toml::de::Error> for VizError {
    fn from(err: toml::de::Error) -> Self {
        VizError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for VizError {
    fn from(err: toml::ser::Error) -> Self {
        VizError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for VizError {
    fn from(err: serde_json::Error) -> Self {
        VizError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_out_of_range_message() {
        let err = VizError::VertexOutOfRange {
            vertex: 7,
            vertex_count: 3,
        };
        assert_eq!(
            err.to_string(),
            "vertex 7 out of range for graph with 3 vertices"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: VizError = io.into();
        assert!(matches!(err, VizError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json")
            .expect_err("Parsing should fail in test");
        let err: VizError = parse.into();
        assert!(matches!(err, VizError::Serialization(_)));
    }
}
