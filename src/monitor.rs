//! Live transcript monitoring.
//! Finalized speech segments arrive on a channel in speaking order; each one
//! is classified and handed to a [`VerdictSink`]. High-risk segments also
//! raise an alert. Segment text is not kept after its verdict is delivered.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::classifier::{ClassificationResult, PhraseRiskClassifier};
use crate::config::MonitorConfig;
use crate::metrics::{LatencySnapshot, MonitorMetrics};
use crate::normalize::detect_language;
use crate::risk::RiskLevel;

/// Verdict for one transcript segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentVerdict {
    pub segment_id: String,
    /// 1-based position among classified segments.
    pub sequence: u64,
    pub language: Option<String>,
    pub text: String,
    pub result: ClassificationResult,
}

/// Receives verdicts from the monitor loop, e.g. a UI bridge or notifier.
pub trait VerdictSink: Send + Sync {
    fn on_verdict(&self, verdict: &SegmentVerdict);

    /// Called after `on_verdict` for high-risk segments.
    fn on_alert(&self, _verdict: &SegmentVerdict) {}
}

/// Event forwarded by [`ChannelSink`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "verdict", rename_all = "snake_case")]
pub enum MonitorEvent {
    Verdict(SegmentVerdict),
    Alert(SegmentVerdict),
}

/// Forwards every verdict and alert into an unbounded channel.
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<MonitorEvent>,
}

impl ChannelSink {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<MonitorEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl VerdictSink for ChannelSink {
    fn on_verdict(&self, verdict: &SegmentVerdict) {
        if self.tx.send(MonitorEvent::Verdict(verdict.clone())).is_err() {
            debug!("verdict receiver dropped");
        }
    }

    fn on_alert(&self, verdict: &SegmentVerdict) {
        if self.tx.send(MonitorEvent::Alert(verdict.clone())).is_err() {
            debug!("alert receiver dropped");
        }
    }
}

/// Writes verdicts to the tracing log.
pub struct LogSink;

impl VerdictSink for LogSink {
    fn on_verdict(&self, verdict: &SegmentVerdict) {
        info!(
            seq = verdict.sequence,
            risk = %verdict.result.risk,
            lang = verdict.language.as_deref().unwrap_or("-"),
            reason = %verdict.result.reason,
            "segment_verdict"
        );
    }

    fn on_alert(&self, verdict: &SegmentVerdict) {
        warn!(
            seq = verdict.sequence,
            matches = ?verdict.result.matched_phrases,
            "high-risk phrases in live transcript"
        );
    }
}

/// Counters for one monitoring session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MonitorSummary {
    pub segments_classified: u64,
    pub segments_skipped: u64,
    pub low: u64,
    pub medium: u64,
    pub high: u64,
    pub alerts: u64,
    /// Highest risk seen; `None` if nothing was classified.
    pub peak_risk: Option<RiskLevel>,
    pub latency: LatencySnapshot,
}

impl MonitorSummary {
    fn record(&mut self, risk: RiskLevel) {
        self.segments_classified += 1;
        match risk {
            RiskLevel::Low => self.low += 1,
            RiskLevel::Medium => self.medium += 1,
            RiskLevel::High => self.high += 1,
        }
        self.peak_risk = self.peak_risk.max(Some(risk));
    }
}

/// Run the monitor until the segment channel closes or `cancel` fires.
/// Segments are processed strictly in arrival order.
pub async fn run_monitor_loop(
    mut segments: mpsc::Receiver<String>,
    classifier: Arc<PhraseRiskClassifier>,
    sink: Arc<dyn VerdictSink>,
    config: MonitorConfig,
    metrics: Arc<MonitorMetrics>,
    cancel: CancellationToken,
) -> MonitorSummary {
    let mut summary = MonitorSummary::default();
    info!(
        detect_language = config.detect_language,
        dictionary_version = classifier.dictionary().version(),
        "monitor loop started"
    );

    loop {
        let segment = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!("monitor loop cancelled");
                break;
            }
            next = segments.recv() => match next {
                Some(text) => text,
                None => {
                    debug!("segment channel closed");
                    break;
                }
            },
        };

        if segment.trim().is_empty() {
            summary.segments_skipped += 1;
            continue;
        }

        let cycle_start = Instant::now();
        let result = classifier.classify(&segment);
        metrics.record_classify(result.risk, cycle_start.elapsed());

        summary.record(result.risk);
        let language = if config.detect_language {
            detect_language(&segment)
        } else {
            None
        };
        let verdict = SegmentVerdict {
            segment_id: uuid::Uuid::new_v4().to_string(),
            sequence: summary.segments_classified,
            language,
            text: segment,
            result,
        };

        sink.on_verdict(&verdict);
        if verdict.result.is_alert() {
            summary.alerts += 1;
            sink.on_alert(&verdict);
        }
        metrics.record_segment(cycle_start.elapsed());
    }

    summary.latency = metrics.snapshot();

    info!(
        classified = summary.segments_classified,
        skipped = summary.segments_skipped,
        alerts = summary.alerts,
        peak = ?summary.peak_risk,
        "monitor loop stopped"
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_tracks_peak_and_counts() {
        let mut s = MonitorSummary::default();
        assert_eq!(s.peak_risk, None);
        s.record(RiskLevel::Medium);
        s.record(RiskLevel::Low);
        assert_eq!(s.peak_risk, Some(RiskLevel::Medium));
        s.record(RiskLevel::High);
        s.record(RiskLevel::Low);
        assert_eq!(s.peak_risk, Some(RiskLevel::High));
        assert_eq!((s.low, s.medium, s.high), (2, 1, 1));
        assert_eq!(s.segments_classified, 4);
    }

    #[test]
    fn channel_sink_forwards_verdicts_and_alerts() {
        let (sink, mut rx) = ChannelSink::channel();
        let verdict = SegmentVerdict {
            segment_id: "id".into(),
            sequence: 1,
            language: None,
            text: "send money".into(),
            result: PhraseRiskClassifier::default().classify("send money"),
        };
        sink.on_verdict(&verdict);
        sink.on_alert(&verdict);
        assert_eq!(rx.try_recv().unwrap(), MonitorEvent::Verdict(verdict.clone()));
        assert_eq!(rx.try_recv().unwrap(), MonitorEvent::Alert(verdict));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn monitor_event_serializes_with_tag() {
        let verdict = SegmentVerdict {
            segment_id: "id".into(),
            sequence: 3,
            language: Some("en".into()),
            text: "hi".into(),
            result: PhraseRiskClassifier::default().classify("hi"),
        };
        let json = serde_json::to_value(MonitorEvent::Alert(verdict)).unwrap();
        assert_eq!(json["event"], "alert");
        assert_eq!(json["verdict"]["sequence"], 3);
        assert_eq!(json["verdict"]["result"]["risk"], "low");
    }
}
