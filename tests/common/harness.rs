//! tests/common/harness.rs
#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reno_custom::{CongestionControl, CongestionEvent, Registry, config::Config};
use std::sync::{Arc, Once};

/// Initializes tracing for tests, ensuring it's only done once.
pub fn init_tracing() {
    static TRACING_INIT: Once = Once::new();
    TRACING_INIT.call_once(|| {
        let filter =
            std::env::var("RUST_LOG").unwrap_or_else(|_| "reno_custom=debug".to_string());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .init();
    });
}

/// Builds a registry holding the built-in algorithms.
pub fn registry_with_clamp(cwnd_clamp: u32) -> Arc<Registry> {
    let mut config = Config::default();
    config.congestion_control.cwnd_clamp = cwnd_clamp;
    Arc::new(Registry::with_builtin(config).unwrap())
}

/// A minimal host transport: it plays the role of the connection that owns
/// a controller and feeds it ACK batches, RTT samples and loss signals.
pub struct SimulatedHost {
    pub controller: Box<dyn CongestionControl>,
    rng: StdRng,
    /// Probability that a round trip ends in a loss.
    loss_rate: f64,
    pub rounds: u32,
}

impl SimulatedHost {
    pub fn new(registry: &Registry, seed: u64, loss_rate: f64) -> Self {
        Self {
            controller: registry.open_default().unwrap(),
            rng: StdRng::seed_from_u64(seed),
            loss_rate,
            rounds: 0,
        }
    }

    /// Runs one round trip: a full window of packets is acknowledged in
    /// randomly sized batches, then a loss may be declared.
    pub fn round_trip(&mut self) {
        let mut outstanding = self.controller.congestion_window();
        while outstanding > 0 {
            let batch = self.rng.random_range(1..=outstanding.min(8));
            outstanding -= batch;
            let limited = self.rng.random_bool(0.9);
            self.controller.on_ack(batch, limited);
            self.controller
                .on_rtt_sample(self.rng.random_range(-100..=50_000));
            self.check_invariants();
        }

        if self.rng.random_bool(self.loss_rate) {
            let event = if self.rng.random_bool(0.2) {
                CongestionEvent::Timeout
            } else {
                CongestionEvent::Loss
            };
            self.controller.on_congestion_event(event);
            self.check_invariants();
        }
        self.rounds += 1;
    }

    pub fn check_invariants(&self) {
        let cwnd = self.controller.congestion_window();
        assert!(cwnd >= 1, "cwnd {} below floor", cwnd);
        assert!(
            cwnd <= self.controller.cwnd_clamp(),
            "cwnd {} above clamp {}",
            cwnd,
            self.controller.cwnd_clamp()
        );
        assert!(self.controller.slow_start_threshold() >= 2);
        assert_eq!(self.controller.undo_cwnd(), cwnd);
    }
}
