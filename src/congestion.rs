//! Defines the pluggable congestion control interface.
//! 定义了可插拔的拥塞控制接口。
//!
//! A host transport binds an algorithm through [`CongestionAlgorithm`] and then
//! drives one [`CongestionControl`] instance per connection. The instance is
//! the only handle to the connection's congestion state, so no hook can run
//! before initialization, and `&mut self` keeps hook invocations serialized.

use crate::config::CongestionControlConfig;
use std::fmt;
use std::time::Duration;

pub mod reno;


/// The slow start threshold of a connection that has not seen congestion yet.
///
/// 尚未经历拥塞的连接所使用的慢启动阈值。
pub const INFINITE_SSTHRESH: u32 = 0x7fff_ffff;

/// The smallest slow start threshold a reduction may produce.
pub const MIN_SSTHRESH: u32 = 2;

/// The smallest congestion window, one full-size segment.
pub const MIN_CWND: u32 = 1;

/// The growth phase of a controller, derived from cwnd and ssthresh.
///
/// 控制器的增长阶段，由 cwnd 和 ssthresh 推导得出。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CongestionState {
    /// cwnd ≤ ssthresh: one unit of window per acknowledged unit.
    /// 慢启动阶段。
    SlowStart,
    /// cwnd > ssthresh: roughly one unit of window per round trip.
    /// 拥塞避免阶段。
    CongestionAvoidance,
}

impl CongestionState {
    pub(crate) fn from_window(cwnd: u32, ssthresh: u32) -> Self {
        if cwnd <= ssthresh {
            CongestionState::SlowStart
        } else {
            CongestionState::CongestionAvoidance
        }
    }
}

/// A congestion signal declared by the host's loss detection.
///
/// 由主机丢包检测声明的拥塞信号。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CongestionEvent {
    /// Loss detected while ACKs keep flowing (e.g. fast retransmit).
    /// The window drops to the new threshold.
    Loss,
    /// Retransmission timeout. The window restarts from one segment.
    Timeout,
}

/// A point-in-time view of a controller, for telemetry outside the core.
///
/// 控制器的时间点快照，供核心外部的遥测使用。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CongestionSnapshot {
    /// The name of the algorithm driving the connection.
    /// 驱动该连接的算法名称。
    pub algorithm: &'static str,
    /// The congestion window, in packets.
    /// 拥塞窗口（以包为单位）。
    pub congestion_window: u32,
    /// The slow start threshold, `INFINITE_SSTHRESH` before any congestion.
    /// 慢启动阈值，发生拥塞前为 `INFINITE_SSTHRESH`。
    pub slow_start_threshold: u32,
    /// The host-supplied window ceiling.
    /// 主机提供的窗口上限。
    pub cwnd_clamp: u32,
    /// The growth phase derived from the window and threshold.
    /// 由窗口和阈值推导出的增长阶段。
    pub state: CongestionState,
    /// The most recent valid RTT sample.
    /// 最近一个有效的RTT样本。
    pub last_rtt: Option<Duration>,
}

impl fmt::Display for CongestionSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} cwnd={}", self.algorithm, self.congestion_window)?;
        if self.slow_start_threshold == INFINITE_SSTHRESH {
            write!(f, " ssthresh=inf")?;
        } else {
            write!(f, " ssthresh={}", self.slow_start_threshold)?;
        }
        write!(f, " clamp={} state={:?}", self.cwnd_clamp, self.state)?;
        match self.last_rtt {
            Some(rtt) => write!(f, " rtt={}us", rtt.as_micros()),
            None => write!(f, " rtt=n/a"),
        }
    }
}

/// A trait for per-connection congestion control state.
///
/// Every hook completes in constant time and never blocks.
///
/// 每个连接的拥塞控制状态 trait。
pub trait CongestionControl: Send + 'static {
    /// Computes the slow start threshold to use after a congestion event.
    /// Pure: the host decides when and how to apply it.
    ///
    /// 计算拥塞事件后使用的慢启动阈值。
    fn ssthresh(&self) -> u32;

    /// Called once per batch of newly acknowledged packets. Returns the
    /// (possibly unchanged) congestion window.
    ///
    /// 每批新确认的包调用一次。返回（可能未改变的）拥塞窗口。
    fn on_ack(&mut self, acked: u32, is_cwnd_limited: bool) -> u32;

    /// Records an RTT sample in microseconds. Non-positive samples mean
    /// "unavailable" and are ignored.
    ///
    /// 记录一个以微秒为单位的RTT样本。非正值表示不可用，将被忽略。
    fn on_rtt_sample(&mut self, rtt_us: i64);

    /// Returns the window the host should restore after deciding a reduction
    /// was spurious.
    ///
    /// 返回主机在判定一次缩减为误判后应恢复的窗口。
    fn undo_cwnd(&self) -> u32;

    /// Gets the current congestion window size in packets.
    ///
    /// 获取当前的拥塞窗口大小（以包为单位）。
    fn congestion_window(&self) -> u32;

    /// Gets the current slow start threshold in packets.
    ///
    /// 获取当前的慢启动阈值（以包为单位）。
    fn slow_start_threshold(&self) -> u32;

    /// Gets the host-supplied ceiling of the congestion window.
    ///
    /// 获取主机提供的拥塞窗口上限。
    fn cwnd_clamp(&self) -> u32;

    /// The most recent valid RTT sample, if any was ever supplied.
    ///
    /// 最近一个有效的RTT样本（如果曾经提供过）。
    fn last_rtt(&self) -> Option<Duration>;

    /// Sets the congestion window, clamped to `[MIN_CWND, cwnd_clamp]`.
    /// Discards any fractional additive-increase credit.
    ///
    /// 设置拥塞窗口，限制在 `[MIN_CWND, cwnd_clamp]` 之内，
    /// 并丢弃未满一个单位的加性增长累计。
    fn set_congestion_window(&mut self, cwnd: u32);

    /// Sets the slow start threshold, raised to at least `MIN_SSTHRESH`.
    ///
    /// 设置慢启动阈值，不低于 `MIN_SSTHRESH`。
    fn set_slow_start_threshold(&mut self, ssthresh: u32);

    /// Sets the window ceiling. A window above the new ceiling is cut to it
    /// and loses its additive-increase credit.
    ///
    /// 设置窗口上限。超过新上限的窗口被截断，并丢弃其加性增长累计。
    fn set_cwnd_clamp(&mut self, clamp: u32);

    /// Gets the name of the algorithm.
    ///
    /// 获取算法名称。
    fn algorithm_name(&self) -> &'static str;

    /// Gets the current growth phase.
    ///
    /// 获取当前的增长阶段。
    fn state(&self) -> CongestionState {
        CongestionState::from_window(self.congestion_window(), self.slow_start_threshold())
    }

    /// Applies the standard reduction for a congestion event.
    ///
    /// 对拥塞事件应用标准的窗口缩减。
    fn on_congestion_event(&mut self, event: CongestionEvent) {
        let ssthresh = self.ssthresh();
        self.set_slow_start_threshold(ssthresh);
        match event {
            CongestionEvent::Loss => self.set_congestion_window(ssthresh),
            CongestionEvent::Timeout => self.set_congestion_window(MIN_CWND),
        }
        tracing::debug!(
            algorithm = self.algorithm_name(),
            ?event,
            cwnd = self.congestion_window(),
            ssthresh = self.slow_start_threshold(),
            "Congestion event applied"
        );
    }

    /// Captures the controller's state for telemetry.
    ///
    /// 捕获控制器状态用于遥测。
    fn snapshot(&self) -> CongestionSnapshot {
        CongestionSnapshot {
            algorithm: self.algorithm_name(),
            congestion_window: self.congestion_window(),
            slow_start_threshold: self.slow_start_threshold(),
            cwnd_clamp: self.cwnd_clamp(),
            state: self.state(),
            last_rtt: self.last_rtt(),
        }
    }
}

/// A congestion control algorithm that a host can bind connections to.
///
/// 主机可以将连接绑定到的拥塞控制算法。
pub trait CongestionAlgorithm: Send + Sync + 'static {
    /// The unique name the algorithm registers under.
    /// 算法注册时使用的唯一名称。
    fn name(&self) -> &'static str;

    /// Creates the congestion state of a fresh connection.
    /// 为新连接创建拥塞状态。
    fn init(&self, config: &CongestionControlConfig) -> Box<dyn CongestionControl>;
}
