//! Reads one finalized transcript segment per stdin line and prints one JSON
//! event per line to stdout. Stops on EOF or Ctrl-C.

use std::io::{BufRead, Write};
use std::sync::Arc;

use phonon::{
    init_tracing, run_monitor_loop, ClassifierConfig, MonitorConfig, PhraseDictionary,
    PhraseRiskClassifier, SegmentVerdict, VerdictSink,
};
use phonon::metrics::MonitorMetrics;
use phonon::monitor::MonitorEvent;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Prints events as JSON lines.
struct StdoutSink;

impl StdoutSink {
    fn emit(&self, event: MonitorEvent) {
        let line = match serde_json::to_string(&event) {
            Ok(line) => line,
            Err(e) => {
                error!(error = %e, "failed to serialize event");
                return;
            }
        };
        let mut out = std::io::stdout().lock();
        if let Err(e) = writeln!(out, "{line}").and_then(|_| out.flush()) {
            warn!(error = %e, "stdout write failed");
        }
    }
}

impl VerdictSink for StdoutSink {
    fn on_verdict(&self, verdict: &SegmentVerdict) {
        self.emit(MonitorEvent::Verdict(verdict.clone()));
    }

    fn on_alert(&self, verdict: &SegmentVerdict) {
        self.emit(MonitorEvent::Alert(verdict.clone()));
    }
}

fn build_classifier(config: &ClassifierConfig) -> PhraseRiskClassifier {
    PhraseRiskClassifier::from_config(config).unwrap_or_else(|e| {
        warn!(error = %e, "phrase file load failed, using built-in dictionary");
        PhraseRiskClassifier::new(Arc::new(PhraseDictionary::builtin()))
            .with_match_mode(config.match_mode)
            .with_reason_limit(config.reason_limit)
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let classifier_config = ClassifierConfig::from_env()?;
    let monitor_config = MonitorConfig::from_env()?;
    let classifier = Arc::new(build_classifier(&classifier_config));
    let cancel = CancellationToken::new();

    info!(
        match_mode = ?classifier.match_mode(),
        phrases = classifier.dictionary().len(),
        "phonon-listen starting"
    );

    let (tx, rx) = mpsc::channel::<String>(monitor_config.channel_capacity);

    // Dedicated OS thread: a blocking stdin read would otherwise hold up
    // runtime shutdown after Ctrl-C.
    let reader_cancel = cancel.clone();
    std::thread::Builder::new()
        .name("phonon-stdin".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(text) => {
                        if reader_cancel.is_cancelled() || tx.blocking_send(text).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "stdin read failed");
                        break;
                    }
                }
            }
        })?;

    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received");
            signal_cancel.cancel();
        }
    });

    let summary = run_monitor_loop(
        rx,
        classifier,
        Arc::new(StdoutSink),
        monitor_config,
        Arc::new(MonitorMetrics::new()),
        cancel,
    )
    .await;

    info!(
        summary = %serde_json::to_string(&summary)?,
        "phonon-listen finished"
    );
    Ok(())
}
