//! A Reno congestion controller: slow start followed by additive increase.
//!
//! 一个Reno拥塞控制器：慢启动之后进行加性增长。
//!
//! Congestion avoidance grows the window by one packet for every `cwnd`
//! packets acknowledged. Integer credit is carried in `cwnd_cnt` across ACK
//! batches; whole units are moved into the window and the remainder modulo
//! `cwnd` is kept, so growth never stalls however large the window gets.

use crate::config::CongestionControlConfig;
use crate::congestion::{
    CongestionAlgorithm, CongestionControl, CongestionState, INFINITE_SSTHRESH, MIN_CWND,
    MIN_SSTHRESH,
};
use std::time::Duration;
use tracing::{debug, trace};

/// The name under which [`RenoCustom`] registers.
pub const RENO_CUSTOM_NAME: &str = "reno_custom";

/// The Reno algorithm, as seen by a host's registry.
///
/// 注册表中看到的Reno算法。
#[derive(Debug, Default, Clone, Copy)]
pub struct RenoCustom;

impl CongestionAlgorithm for RenoCustom {
    fn name(&self) -> &'static str {
        RENO_CUSTOM_NAME
    }

    fn init(&self, config: &CongestionControlConfig) -> Box<dyn CongestionControl> {
        Box::new(Reno::new(config))
    }
}

/// Per-connection Reno state.
///
/// 每个连接的Reno状态。
#[derive(Debug, Clone)]
pub struct Reno {
    /// Congestion window, in packets.
    /// 拥塞窗口（以包为单位）。
    pub(super) congestion_window: u32,
    /// Slow start threshold, in packets.
    /// 慢启动阈值（以包为单位）。
    pub(super) slow_start_threshold: u32,
    /// Packets acknowledged in congestion avoidance that have not yet
    /// earned a whole unit of window.
    /// 拥塞避免阶段中尚未累积成一个完整窗口单位的已确认包数。
    pub(super) cwnd_cnt: u32,
    cwnd_clamp: u32,
    last_rtt: Option<Duration>,
}

impl Reno {
    /// Initializes the state of a fresh connection: one packet of window and
    /// no threshold yet.
    ///
    /// 初始化新连接的状态：一个包的窗口，尚无阈值。
    pub fn new(config: &CongestionControlConfig) -> Self {
        Self {
            congestion_window: MIN_CWND,
            slow_start_threshold: INFINITE_SSTHRESH,
            cwnd_cnt: 0,
            cwnd_clamp: config.cwnd_clamp.max(MIN_CWND),
            last_rtt: None,
        }
    }

    /// Exponential growth bounded by ssthresh. Returns the acked credit left
    /// over once the window has reached the threshold.
    fn slow_start(&mut self, acked: u32) -> u32 {
        let cwnd = self
            .congestion_window
            .saturating_add(acked)
            .min(self.slow_start_threshold)
            .max(self.congestion_window);
        let leftover = acked - (cwnd - self.congestion_window);
        self.congestion_window = cwnd.min(self.cwnd_clamp);
        trace!(cwnd = self.congestion_window, leftover, "Slow Start: cwnd increased");
        leftover
    }

    /// Additive increase of one packet per `w` packets acknowledged.
    fn additive_increase(&mut self, w: u32, acked: u32) {
        let w = w.max(MIN_CWND);
        if self.cwnd_cnt >= w {
            self.cwnd_cnt = 0;
            self.congestion_window = self.congestion_window.saturating_add(1);
        }

        self.cwnd_cnt = self.cwnd_cnt.saturating_add(acked);
        if self.cwnd_cnt >= w {
            let delta = self.cwnd_cnt / w;
            self.cwnd_cnt -= delta * w;
            self.congestion_window = self.congestion_window.saturating_add(delta);
        }
        trace!(
            cwnd = self.congestion_window,
            cwnd_cnt = self.cwnd_cnt,
            "Congestion Avoidance: additive increase"
        );
    }
}

impl Default for Reno {
    fn default() -> Self {
        Self::new(&CongestionControlConfig::default())
    }
}

impl CongestionControl for Reno {
    fn ssthresh(&self) -> u32 {
        (self.congestion_window >> 1).max(MIN_SSTHRESH)
    }

    fn on_ack(&mut self, acked: u32, is_cwnd_limited: bool) -> u32 {
        trace!(
            acked,
            is_cwnd_limited,
            cwnd = self.congestion_window,
            ssthresh = self.slow_start_threshold,
            rtt_us = self.last_rtt.map(|rtt| rtt.as_micros() as u64),
            "ACK batch"
        );

        // Growing a window the sender is not filling only invites bursts.
        if !is_cwnd_limited {
            return self.congestion_window;
        }

        let entry_state = self.state();
        let mut acked = acked;
        if entry_state == CongestionState::SlowStart {
            acked = self.slow_start(acked);
            if acked == 0 {
                return self.congestion_window;
            }
        }

        // Credit left over from slow start feeds the same step.
        self.additive_increase(self.congestion_window, acked);
        self.congestion_window = self.congestion_window.min(self.cwnd_clamp);

        if entry_state != self.state() {
            debug!(
                cwnd = self.congestion_window,
                ssthresh = self.slow_start_threshold,
                "State changed to CongestionAvoidance"
            );
        }
        self.congestion_window
    }

    fn on_rtt_sample(&mut self, rtt_us: i64) {
        if rtt_us > 0 {
            self.last_rtt = Some(Duration::from_micros(rtt_us as u64));
        }
    }

    /// The undo policy is the identity: the window in effect is the one to
    /// keep. No pre-reduction snapshot is remembered.
    fn undo_cwnd(&self) -> u32 {
        self.congestion_window
    }

    fn congestion_window(&self) -> u32 {
        self.congestion_window
    }

    fn slow_start_threshold(&self) -> u32 {
        self.slow_start_threshold
    }

    fn cwnd_clamp(&self) -> u32 {
        self.cwnd_clamp
    }

    fn last_rtt(&self) -> Option<Duration> {
        self.last_rtt
    }

    fn set_congestion_window(&mut self, cwnd: u32) {
        self.congestion_window = cwnd.clamp(MIN_CWND, self.cwnd_clamp);
        self.cwnd_cnt = 0;
    }

    fn set_slow_start_threshold(&mut self, ssthresh: u32) {
        self.slow_start_threshold = ssthresh.max(MIN_SSTHRESH);
    }

    fn set_cwnd_clamp(&mut self, clamp: u32) {
        self.cwnd_clamp = clamp.max(MIN_CWND);
        if self.congestion_window > self.cwnd_clamp {
            // Credit earned against the larger window must not survive it.
            self.congestion_window = self.cwnd_clamp;
            self.cwnd_cnt = 0;
        }
    }

    fn algorithm_name(&self) -> &'static str {
        RENO_CUSTOM_NAME
    }
}
