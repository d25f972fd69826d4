//! Operation pipeline bridge
//!
//! The bridge is the only adapter between the UI and an external
//! [`OperationPipeline`]. Pipelines run on a worker thread with their own tokio
//! runtime; every outcome travels back over a channel and is appended to the
//! [`OperationLogSink`] by [`OperationPipelineBridge::poll`] on the UI thread.
//!
//! Exactly one operation may be in flight. The in-flight slot is filled before
//! the worker is spawned and emptied only after the terminal record has been
//! appended, so log records of two invocations never interleave.

use super::error::ShellError;
use super::operation_log::OperationLogSink;
use super::targets::TargetId;
use async_trait::async_trait;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRequest {
    pub target_id: TargetId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationOutcome {
    Started,
    Progress(String),
    Completed,
    Failed(String),
}

impl OperationOutcome {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OperationOutcome::Completed | OperationOutcome::Failed(_))
    }

    /// Console line for this outcome
    pub fn log_text(&self) -> String {
        match self {
            OperationOutcome::Started => "Injection started".to_string(),
            OperationOutcome::Progress(text) => text.clone(),
            OperationOutcome::Completed => "Injection completed".to_string(),
            OperationOutcome::Failed(reason) => format!("Injection failed: {}", reason),
        }
    }
}

/// Handle a running pipeline uses to report progress back to the UI thread
#[derive(Clone)]
pub struct ProgressReporter {
    sender: Sender<OperationOutcome>,
    repaint: Option<egui::Context>,
}

impl ProgressReporter {
    pub fn report(&self, text: impl Into<String>) {
        self.send(OperationOutcome::Progress(text.into()));
    }

    fn send(&self, outcome: OperationOutcome) {
        // Receiver gone means the bridge already closed this invocation
        if self.sender.send(outcome).is_ok() {
            if let Some(ctx) = &self.repaint {
                ctx.request_repaint();
            }
        }
    }
}

/// External subsystem that performs the actual effect on a target.
///
/// `run` must not report `Started` or a terminal outcome itself; the bridge
/// emits those. Long-running implementations should watch `cancel`.
#[async_trait]
pub trait OperationPipeline: Send + Sync {
    async fn run(
        &self,
        request: OperationRequest,
        progress: ProgressReporter,
        cancel: CancellationToken,
    ) -> Result<(), String>;
}

/// Stand-in pipeline: succeeds after an optional delay without touching anything
#[derive(Debug, Clone, Default)]
pub struct PlaceholderPipeline {
    delay: Duration,
}

impl PlaceholderPipeline {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl OperationPipeline for PlaceholderPipeline {
    async fn run(
        &self,
        request: OperationRequest,
        _progress: ProgressReporter,
        _cancel: CancellationToken,
    ) -> Result<(), String> {
        debug!("Placeholder pipeline invoked for {}", request.target_id);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(())
    }
}

struct InFlight {
    target_id: TargetId,
    receiver: Receiver<OperationOutcome>,
    cancel: CancellationToken,
}

pub struct OperationPipelineBridge {
    pipeline: Arc<dyn OperationPipeline>,
    in_flight: Option<InFlight>,
    repaint: Option<egui::Context>,
}

impl OperationPipelineBridge {
    pub fn new(pipeline: Arc<dyn OperationPipeline>) -> Self {
        Self {
            pipeline,
            in_flight: None,
            repaint: None,
        }
    }

    /// Wake the UI whenever the worker delivers an outcome
    pub fn set_repaint_context(&mut self, ctx: egui::Context) {
        self.repaint = Some(ctx);
    }

    pub fn is_running(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn running_target(&self) -> Option<&TargetId> {
        self.in_flight.as_ref().map(|flight| &flight.target_id)
    }

    /// Start the pipeline for `target` without blocking the caller.
    ///
    /// Rejections are appended to `sink` as a single record and returned.
    pub fn invoke(
        &mut self,
        target: Option<&TargetId>,
        sink: &mut OperationLogSink,
    ) -> Result<(), ShellError> {
        let Some(target_id) = target else {
            return Err(Self::reject(ShellError::NoActiveTarget, sink));
        };
        if self.in_flight.is_some() {
            return Err(Self::reject(ShellError::AlreadyRunning, sink));
        }

        let (sender, receiver) = mpsc::channel();
        let cancel = CancellationToken::new();
        self.in_flight = Some(InFlight {
            target_id: target_id.clone(),
            receiver,
            cancel: cancel.clone(),
        });
        sink.append(OperationOutcome::Started.log_text());
        info!("Operation started for target {}", target_id);

        let reporter = ProgressReporter {
            sender,
            repaint: self.repaint.clone(),
        };
        let request = OperationRequest {
            target_id: target_id.clone(),
        };
        let pipeline = Arc::clone(&self.pipeline);

        let spawned = std::thread::Builder::new()
            .name("opshell-operation".to_string())
            .spawn(move || run_worker(pipeline, request, reporter, cancel));

        if let Err(e) = spawned {
            error!("Failed to spawn operation worker: {}", e);
            let reason = format!("could not start worker: {}", e);
            sink.append(OperationOutcome::Failed(reason.clone()).log_text());
            self.in_flight = None;
            return Err(ShellError::OperationFailed(reason));
        }

        Ok(())
    }

    /// Drain delivered outcomes into `sink`. Returns the terminal outcome once
    /// the in-flight operation has finished.
    pub fn poll(&mut self, sink: &mut OperationLogSink) -> Option<OperationOutcome> {
        let flight = self.in_flight.as_ref()?;

        let terminal = loop {
            match flight.receiver.try_recv() {
                Ok(outcome) => {
                    sink.append(outcome.log_text());
                    if outcome.is_terminal() {
                        break Some(outcome);
                    }
                }
                Err(TryRecvError::Empty) => break None,
                Err(TryRecvError::Disconnected) => {
                    warn!("Operation worker for {} exited without a result", flight.target_id);
                    let outcome = OperationOutcome::Failed(
                        "worker exited without reporting a result".to_string(),
                    );
                    sink.append(outcome.log_text());
                    break Some(outcome);
                }
            }
        };

        if let Some(outcome) = &terminal {
            info!("Operation for {} finished: {:?}", flight.target_id, outcome);
            self.in_flight = None;
        }
        terminal
    }

    /// Ask the in-flight operation to stop. The terminal record still arrives
    /// through [`poll`](Self::poll).
    pub fn cancel(&self) {
        if let Some(flight) = &self.in_flight {
            info!("Cancelling operation for {}", flight.target_id);
            flight.cancel.cancel();
        }
    }

    fn reject(err: ShellError, sink: &mut OperationLogSink) -> ShellError {
        warn!("Operation rejected: {}", err);
        match &err {
            ShellError::NoActiveTarget => {
                sink.append(OperationOutcome::Failed(err.to_string()).log_text());
            }
            _ => {
                sink.append(format!("Injection rejected: {}", err));
            }
        }
        err
    }
}

impl Drop for OperationPipelineBridge {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn run_worker(
    pipeline: Arc<dyn OperationPipeline>,
    request: OperationRequest,
    reporter: ProgressReporter,
    cancel: CancellationToken,
) {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            reporter.send(OperationOutcome::Failed(format!(
                "could not start runtime: {}",
                e
            )));
            return;
        }
    };

    let result = runtime.block_on(async {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err("cancelled".to_string()),
            result = pipeline.run(request, reporter.clone(), cancel.clone()) => result,
        }
    });

    reporter.send(match result {
        Ok(()) => OperationOutcome::Completed,
        Err(reason) => OperationOutcome::Failed(reason),
    });
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use pretty_assertions::assert_eq;

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn texts(sink: &OperationLogSink) -> Vec<String> {
        sink.all().iter().map(|r| r.text.clone()).collect()
    }

    #[test]
    fn test_no_target_rejected_with_one_record() {
        let mut bridge = OperationPipelineBridge::new(Arc::new(PlaceholderPipeline::default()));
        let mut sink = OperationLogSink::new();

        let err = bridge.invoke(None, &mut sink).unwrap_err();

        assert_eq!(err, ShellError::NoActiveTarget);
        assert_eq!(sink.len(), 1);
        assert!(!bridge.is_running());
    }

    #[test]
    fn test_placeholder_logs_started_then_completed() {
        let mut bridge = OperationPipelineBridge::new(Arc::new(PlaceholderPipeline::default()));
        let mut sink = OperationLogSink::new();

        bridge.invoke(Some(&TargetId::new("a")), &mut sink).unwrap();
        assert_eq!(texts(&sink), vec!["Injection started"]);

        assert!(wait_until_idle(&mut bridge, &mut sink, TIMEOUT));
        assert_eq!(texts(&sink), vec!["Injection started", "Injection completed"]);
    }

    #[test]
    fn test_invoke_returns_before_pipeline_finishes() {
        let pipeline = Arc::new(GatedPipeline::default());
        let gate = Arc::clone(&pipeline.gate);
        let mut bridge = OperationPipelineBridge::new(pipeline);
        let mut sink = OperationLogSink::new();

        bridge.invoke(Some(&TargetId::new("a")), &mut sink).unwrap();
        assert!(bridge.is_running());
        assert_eq!(bridge.running_target(), Some(&TargetId::new("a")));

        gate.notify_one();
        assert!(wait_until_idle(&mut bridge, &mut sink, TIMEOUT));
        assert_eq!(
            texts(&sink),
            vec!["Injection started", "waiting for gate", "Injection completed"]
        );
    }

    #[test]
    fn test_second_invoke_while_running_is_rejected() {
        let pipeline = Arc::new(GatedPipeline::default());
        let gate = Arc::clone(&pipeline.gate);
        let mut bridge = OperationPipelineBridge::new(pipeline);
        let mut sink = OperationLogSink::new();

        bridge.invoke(Some(&TargetId::new("a")), &mut sink).unwrap();
        let before = sink.len();
        let err = bridge.invoke(Some(&TargetId::new("b")), &mut sink).unwrap_err();
        assert_eq!(err, ShellError::AlreadyRunning);

        // Exactly one rejection record while the first run is still held
        assert!(bridge.is_running());
        assert_eq!(sink.len(), before + 1);
        assert_eq!(
            sink.latest().unwrap().text,
            "Injection rejected: an operation is already running"
        );
        assert_eq!(bridge.running_target(), Some(&TargetId::new("a")));

        gate.notify_one();
        assert!(wait_until_idle(&mut bridge, &mut sink, TIMEOUT));

        let started = texts(&sink)
            .iter()
            .filter(|t| t.as_str() == "Injection started")
            .count();
        assert_eq!(started, 1);
        assert_eq!(sink.latest().unwrap().text, "Injection completed");
    }

    #[test]
    fn test_failure_is_logged_and_releases_lock() {
        let mut bridge = OperationPipelineBridge::new(Arc::new(FailingPipeline));
        let mut sink = OperationLogSink::new();

        bridge.invoke(Some(&TargetId::new("a")), &mut sink).unwrap();
        assert!(wait_until_idle(&mut bridge, &mut sink, TIMEOUT));
        assert_eq!(
            texts(&sink),
            vec!["Injection started", "step 1", "Injection failed: boom"]
        );

        // Lock released: a new invocation is accepted
        assert!(bridge.invoke(Some(&TargetId::new("a")), &mut sink).is_ok());
        assert!(wait_until_idle(&mut bridge, &mut sink, TIMEOUT));
    }

    #[test]
    fn test_cancel_releases_lock() {
        let mut bridge = OperationPipelineBridge::new(Arc::new(GatedPipeline::default()));
        let mut sink = OperationLogSink::new();

        bridge.invoke(Some(&TargetId::new("a")), &mut sink).unwrap();
        bridge.cancel();

        assert!(wait_until_idle(&mut bridge, &mut sink, TIMEOUT));
        assert_eq!(sink.latest().unwrap().text, "Injection failed: cancelled");
    }

    #[test]
    fn test_poll_when_idle_is_noop() {
        let mut bridge = OperationPipelineBridge::new(Arc::new(PlaceholderPipeline::default()));
        let mut sink = OperationLogSink::new();
        assert_eq!(bridge.poll(&mut sink), None);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_outcome_text() {
        assert!(OperationOutcome::Completed.is_terminal());
        assert!(OperationOutcome::Failed("x".into()).is_terminal());
        assert!(!OperationOutcome::Started.is_terminal());
        assert!(!OperationOutcome::Progress("x".into()).is_terminal());
        assert_eq!(OperationOutcome::Progress("50%".into()).log_text(), "50%");
    }
}
