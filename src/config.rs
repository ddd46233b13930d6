//! 定义了拥塞控制算法及其注册表的可配置参数。
//! Defines configurable parameters for the congestion control algorithm and its registry.

use crate::congestion::reno::RENO_CUSTOM_NAME;

/// A structure containing all configurable parameters.
///
/// 包含所有可配置参数的结构体。
#[derive(Debug, Clone)]
pub struct Config {
    /// Per-connection congestion control parameters.
    /// 每个连接的拥塞控制参数。
    pub congestion_control: CongestionControlConfig,

    /// Algorithm registry parameters.
    /// 算法注册表参数。
    pub registry: RegistryConfig,
}

/// Congestion control-related parameters.
///
/// 拥塞控制相关参数。
#[derive(Debug, Clone)]
pub struct CongestionControlConfig {
    /// The name of the algorithm a host opens when it does not ask for one.
    /// 主机未指定算法时使用的算法名称。
    pub algorithm: String,
    /// The upper bound of the congestion window in packets. Typically derived
    /// from the receiver window or a configured maximum. Values below 1 are
    /// treated as 1.
    ///
    /// 拥塞窗口的上限（以包为单位）。通常来自接收窗口或配置的最大值。
    /// 小于1的值按1处理。
    pub cwnd_clamp: u32,
}

/// Registry-related parameters.
///
/// 注册表相关参数。
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// The maximum number of algorithms that may be registered at once.
    /// 同时可注册的最大算法数量。
    pub max_algorithms: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            congestion_control: CongestionControlConfig::default(),
            registry: RegistryConfig::default(),
        }
    }
}

impl Default for CongestionControlConfig {
    fn default() -> Self {
        Self {
            algorithm: RENO_CUSTOM_NAME.to_string(),
            cwnd_clamp: u32::MAX,
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { max_algorithms: 16 }
    }
}
