//! Phonon: local scam-phrase risk classification for live call transcripts.
//! Library root: module wiring, re-exports, tracing setup.

pub mod classifier;
pub mod config;
pub mod metrics;
pub mod monitor;
pub mod normalize;
pub mod phrases;
pub mod risk;

pub use classifier::{ClassificationResult, MatchMode, PhraseRiskClassifier};
pub use config::{ClassifierConfig, ConfigError, MonitorConfig};
pub use monitor::{run_monitor_loop, ChannelSink, LogSink, MonitorEvent, MonitorSummary, SegmentVerdict, VerdictSink};
pub use phrases::{DictionaryError, PhraseDictionary};
pub use risk::{PhraseTier, RiskLevel};

/// Install the global tracing subscriber. Logs go to stderr; filter via
/// `RUST_LOG`, defaulting to `phonon=info`. Set `PHONON_LOG_JSON=1` for JSON lines.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("phonon=info,phonon_listen=info"));
    let json = std::env::var("PHONON_LOG_JSON").is_ok_and(|v| v == "1" || v == "true");

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
