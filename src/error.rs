//! 定义了库中所有可能的错误类型。
//! Defines all possible error types in the library.
//!
//! Only registration with a host can fail. The per-connection hooks are total
//! over their inputs and never return an error.

use thiserror::Error;

/// The primary error type for the congestion control library.
/// 拥塞控制库的主要错误类型。
#[derive(Debug, Error)]
pub enum Error {
    /// An algorithm with the same name is already registered.
    /// 同名算法已被注册。
    #[error("congestion control algorithm `{0}` is already registered")]
    AlreadyRegistered(String),

    /// The registry has no room for another algorithm.
    /// 注册表没有空间容纳更多算法。
    #[error("algorithm registry is full ({capacity} entries)")]
    RegistryFull { capacity: usize },

    /// No algorithm with the requested name is registered.
    /// 未注册所请求名称的算法。
    #[error("congestion control algorithm `{0}` is not registered")]
    UnknownAlgorithm(String),

    /// The algorithm name is empty or too long.
    /// 算法名称为空或过长。
    #[error("invalid algorithm name `{name}`: must be 1..={max} bytes")]
    InvalidName { name: String, max: usize },
}

/// A specialized `Result` type for this library.
/// 本库专用的 `Result` 类型。
pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for std::io::Error {
    fn from(err: Error) -> Self {
        use std::io::ErrorKind;
        let kind = match err {
            Error::AlreadyRegistered(_) => ErrorKind::AlreadyExists,
            Error::RegistryFull { .. } => ErrorKind::OutOfMemory,
            Error::UnknownAlgorithm(_) => ErrorKind::NotFound,
            Error::InvalidName { .. } => ErrorKind::InvalidInput,
        };
        std::io::Error::new(kind, err)
    }
}
