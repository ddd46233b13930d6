//! The host-side table of congestion control algorithms.
//! 主机端的拥塞控制算法表。
//!
//! Algorithms register under a unique name and connections are bound to them
//! by name. The registry is shared between all connections of a host; the
//! controllers it opens are not.

use crate::config::Config;
use crate::congestion::reno::RenoCustom;
use crate::congestion::{CongestionAlgorithm, CongestionControl};
use crate::error::{Error, Result};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info};

/// The longest name an algorithm may register under, in bytes.
pub const MAX_ALGORITHM_NAME_LEN: usize = 16;

/// A concurrent registry of congestion control algorithms.
///
/// 一个并发的拥塞控制算法注册表。
pub struct Registry {
    algorithms: DashMap<&'static str, Arc<dyn CongestionAlgorithm>>,
    /// Held across the capacity check and the insert of a registration.
    /// 在注册的容量检查与插入之间持有。
    registration: Mutex<()>,
    config: Config,
}

impl Registry {
    /// Creates an empty registry.
    ///
    /// 创建一个空的注册表。
    pub fn new(config: Config) -> Self {
        Self {
            algorithms: DashMap::new(),
            registration: Mutex::new(()),
            config,
        }
    }

    /// Creates a registry with the built-in algorithms already registered.
    ///
    /// 创建一个已注册内置算法的注册表。
    pub fn with_builtin(config: Config) -> Result<Self> {
        let registry = Self::new(config);
        registry.register(Arc::new(RenoCustom))?;
        Ok(registry)
    }

    /// Registers an algorithm.
    ///
    /// Fails if the name is invalid or taken, or if the registry is at
    /// capacity.
    ///
    /// 注册一个算法。名称无效或已被占用，或注册表已满时失败。
    pub fn register(&self, algorithm: Arc<dyn CongestionAlgorithm>) -> Result<()> {
        let name = algorithm.name();
        if name.is_empty() || name.len() > MAX_ALGORITHM_NAME_LEN {
            return Err(Error::InvalidName {
                name: name.to_string(),
                max: MAX_ALGORITHM_NAME_LEN,
            });
        }

        let _guard = self
            .registration
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let capacity = self.config.registry.max_algorithms;
        if self.algorithms.len() >= capacity && !self.algorithms.contains_key(name) {
            return Err(Error::RegistryFull { capacity });
        }

        match self.algorithms.entry(name) {
            Entry::Occupied(_) => Err(Error::AlreadyRegistered(name.to_string())),
            Entry::Vacant(entry) => {
                entry.insert(algorithm);
                info!(algorithm = name, "Congestion control algorithm registered");
                Ok(())
            }
        }
    }

    /// Removes an algorithm. Controllers already opened from it keep working.
    ///
    /// 移除一个算法。已经创建的控制器继续工作。
    pub fn unregister(&self, name: &str) -> Result<()> {
        match self.algorithms.remove(name) {
            Some(_) => {
                info!(algorithm = name, "Congestion control algorithm unregistered");
                Ok(())
            }
            None => Err(Error::UnknownAlgorithm(name.to_string())),
        }
    }

    /// Initializes the congestion state of a new connection bound to `name`.
    ///
    /// 为绑定到 `name` 的新连接初始化拥塞状态。
    pub fn open(&self, name: &str) -> Result<Box<dyn CongestionControl>> {
        let algorithm = self
            .algorithms
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| Error::UnknownAlgorithm(name.to_string()))?;

        let controller = algorithm.init(&self.config.congestion_control);
        debug!(
            algorithm = name,
            cwnd = controller.congestion_window(),
            "Connection bound to congestion control algorithm"
        );
        Ok(controller)
    }

    /// Opens the algorithm named in the configuration.
    pub fn open_default(&self) -> Result<Box<dyn CongestionControl>> {
        self.open(&self.config.congestion_control.algorithm)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.algorithms.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.algorithms.iter().map(|entry| *entry.key()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.algorithms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.algorithms.is_empty()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("algorithms", &self.names())
            .field("config", &self.config)
            .finish()
    }
}
