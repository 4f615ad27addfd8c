//! Pipeline lifecycle and task orchestration
//!
//! `Pipeline` owns the record buffer, the sinks and every spawned task:
//! one reader per enabled source, a pool of drain workers and a periodic
//! flusher. Reader/flusher/worker loops all share one `Shared` state and
//! observe shutdown cooperatively through a cancellation token.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex as AsyncMutex, Notify};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use omnilog_config::Config;
use omnilog_record::{Formatter, PolicyKind, Record};
use omnilog_sinks::{ConsoleSink, FileSink, LogSink};
use omnilog_sources::{
    FileSource, NumericChannel, ServiceChannelSource, SocketSource, Source,
};

use crate::buffer::RingBuffer;
use crate::error::{PipelineError, Result};
use crate::metrics::{DropTracker, MetricsSnapshot, PipelineMetrics};

/// Lifecycle states, entered in order and never re-entered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Constructed, nothing spawned
    Configured,
    /// Tasks spawned, records flowing
    Running,
    /// Shutdown in progress: joining tasks, final drain pending
    ShuttingDown,
    /// All tasks joined, buffer drained, sinks flushed
    Stopped,
}

impl std::fmt::Display for PipelineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Configured => "configured",
            Self::Running => "running",
            Self::ShuttingDown => "shutting_down",
            Self::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// State shared by every pipeline task
struct Shared {
    buffer: RingBuffer<Record>,
    sinks: Vec<Arc<dyn LogSink>>,
    metrics: Arc<PipelineMetrics>,
    drop_tracker: DropTracker,

    /// Exclusive drain: keeps pops FIFO end-to-end so per-source order
    /// survives all the way to each sink
    drain_gate: AsyncMutex<()>,

    /// Push-side hint waking one parked drain worker
    drain_signal: Notify,
}

impl Shared {
    /// Push a record, counting and reporting a drop on overflow
    fn publish(&self, record: Record) {
        match self.buffer.try_push(record) {
            Ok(()) => {
                self.metrics.record_pushed();
                self.drain_signal.notify_one();
            }
            Err(_rejected) => {
                self.metrics.record_dropped();
                self.drop_tracker.record_drop();
            }
        }
    }

    /// Pop until empty, fanning each record out to every sink in order
    ///
    /// Never cancelled part-way: once entered, all currently buffered
    /// records are delivered. Sink errors are isolated per sink.
    async fn drain(&self) {
        let _gate = self.drain_gate.lock().await;

        while let Some(record) = self.buffer.try_pop() {
            for sink in &self.sinks {
                match sink.write(&record) {
                    Ok(()) => self.metrics.record_written(),
                    Err(e) => {
                        self.metrics.record_sink_error();
                        tracing::debug!(sink = %sink.name(), error = %e, "sink write failed");
                    }
                }
            }
        }

        self.metrics.record_drain();
    }
}

/// Cloneable handle that requests shutdown without touching the pipeline
///
/// `request()` only stores an atomic flag and trips the cancellation
/// token, so signal wiring can call it freely; teardown itself stays with
/// the host task that owns the [`Pipeline`].
#[derive(Clone)]
pub struct ShutdownHandle {
    running: Arc<AtomicBool>,
    cancel: CancellationToken,
}

impl ShutdownHandle {
    /// Ask every pipeline task to wind down
    pub fn request(&self) {
        self.running.store(false, Ordering::SeqCst);
        self.cancel.cancel();
    }

    /// Whether shutdown has been requested
    pub fn is_requested(&self) -> bool {
        !self.running.load(Ordering::SeqCst)
    }
}

/// The telemetry logging pipeline
///
/// Owns sinks, buffer, worker pool and all spawned tasks. See the crate
/// docs for the lifecycle diagram.
pub struct Pipeline {
    state: PipelineState,
    config: Config,

    /// Sinks attached so far; shared with tasks once running
    sinks: Vec<Arc<dyn LogSink>>,

    metrics: Arc<PipelineMetrics>,

    /// Built at `start()`, lives until drop
    shared: Option<Arc<Shared>>,

    running: Arc<AtomicBool>,
    cancel: CancellationToken,
    tasks: Vec<JoinHandle<()>>,

    /// Injected middleware binding for the someip source
    channel: Option<Box<dyn NumericChannel>>,
}

impl Pipeline {
    /// Build a pipeline from a validated configuration
    ///
    /// Opens every configured sink. A sink that fails to open is reported
    /// once and skipped; the pipeline proceeds without it. Configuration
    /// problems are fatal here, before anything is spawned.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let mut sinks: Vec<Arc<dyn LogSink>> = Vec::new();

        if config.sinks.console_enabled() {
            tracing::info!("console sink attached");
            sinks.push(Arc::new(ConsoleSink::new()));
        }

        for file in config.sinks.files.iter().filter(|f| f.enabled) {
            match FileSink::new(&file.path) {
                Ok(sink) => {
                    tracing::info!(sink = %file.path, "file sink attached");
                    sinks.push(Arc::new(sink));
                }
                Err(e) => {
                    tracing::error!(sink = %file.path, error = %e, "sink failed to open, continuing without it");
                }
            }
        }

        Ok(Self {
            state: PipelineState::Configured,
            config,
            sinks,
            metrics: Arc::new(PipelineMetrics::new()),
            shared: None,
            running: Arc::new(AtomicBool::new(false)),
            cancel: CancellationToken::new(),
            tasks: Vec::new(),
            channel: None,
        })
    }

    /// Inject the middleware binding backing the someip source
    ///
    /// Must happen before `start()`. The middleware runtime is
    /// process-global, so at most one channel exists per process.
    pub fn set_numeric_channel(&mut self, channel: Box<dyn NumericChannel>) -> Result<()> {
        self.ensure_configured()?;
        self.channel = Some(channel);
        Ok(())
    }

    /// Attach an additional sink
    ///
    /// Lets hosts (and tests) add sinks beyond the configured console and
    /// file sinks. Must happen before `start()`.
    pub fn add_sink(&mut self, sink: Arc<dyn LogSink>) -> Result<()> {
        self.ensure_configured()?;
        self.sinks.push(sink);
        Ok(())
    }

    /// Current lifecycle state
    #[inline]
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Number of attached sinks
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Records dropped by a full buffer so far
    pub fn drops_observed(&self) -> u64 {
        self.metrics.drops()
    }

    /// Snapshot of the pipeline counters
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Handle for requesting shutdown from signal wiring or other tasks
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            running: Arc::clone(&self.running),
            cancel: self.cancel.clone(),
        }
    }

    /// Wait until shutdown has been requested
    pub async fn shutdown_requested(&self) {
        self.cancel.cancelled().await;
    }

    /// Spawn the worker pool, the flusher and one reader per source
    ///
    /// Transitions `Configured -> Running`. Must be called from within a
    /// tokio runtime. Calling it twice is an error and a no-op.
    pub fn start(&mut self) -> Result<()> {
        self.ensure_configured_for(PipelineState::Running)?;

        let service_enabled = self
            .config
            .sources
            .someip
            .as_ref()
            .is_some_and(|s| s.enabled);
        if service_enabled && self.channel.is_none() {
            return Err(PipelineError::ChannelMissing);
        }

        let shared = Arc::new(Shared {
            buffer: RingBuffer::new(self.config.log_manager.buffer_capacity),
            sinks: self.sinks.clone(),
            metrics: Arc::clone(&self.metrics),
            drop_tracker: DropTracker::default(),
            drain_gate: AsyncMutex::new(()),
            drain_signal: Notify::new(),
        });
        self.shared = Some(Arc::clone(&shared));
        self.running.store(true, Ordering::SeqCst);

        let worker_count = self.config.log_manager.thread_pool_size;
        for worker_id in 0..worker_count {
            self.tasks.push(tokio::spawn(worker_loop(
                Arc::clone(&shared),
                self.cancel.clone(),
                worker_id,
            )));
        }

        let flush_period = Duration::from_millis(self.config.log_manager.sink_flush_rate_ms);
        self.tasks.push(tokio::spawn(flusher_loop(
            Arc::clone(&shared),
            self.cancel.clone(),
            flush_period,
        )));

        let app_name = self.config.log_manager.app_name.clone();

        if let Some(cfg) = self.config.sources.file.as_ref().filter(|c| c.enabled) {
            let source = Source::File(FileSource::new(&cfg.path));
            self.tasks.push(tokio::spawn(reader_loop(
                source,
                formatter_for(cfg.policy, app_name.as_deref()),
                Duration::from_millis(cfg.parse_rate_ms),
                Arc::clone(&shared),
                self.cancel.clone(),
            )));
        }

        if let Some(cfg) = self.config.sources.socket.as_ref().filter(|c| c.enabled) {
            let source = Source::Socket(SocketSource::new(cfg.ip.clone(), cfg.port));
            self.tasks.push(tokio::spawn(reader_loop(
                source,
                formatter_for(cfg.policy, app_name.as_deref()),
                Duration::from_millis(cfg.parse_rate_ms),
                Arc::clone(&shared),
                self.cancel.clone(),
            )));
        }

        if let Some(cfg) = self.config.sources.someip.as_ref().filter(|c| c.enabled) {
            let channel = self.channel.take().expect("checked above");
            let source = Source::Service(ServiceChannelSource::new(channel));
            self.tasks.push(tokio::spawn(reader_loop(
                source,
                formatter_for(cfg.policy, app_name.as_deref()),
                Duration::from_millis(cfg.parse_rate_ms),
                Arc::clone(&shared),
                self.cancel.clone(),
            )));
        }

        self.state = PipelineState::Running;
        tracing::info!(
            sinks = self.sinks.len(),
            workers = worker_count,
            sources = ?self.config.enabled_sources(),
            buffer_capacity = self.config.log_manager.buffer_capacity,
            "pipeline started"
        );
        Ok(())
    }

    /// Stop the pipeline
    ///
    /// Transitions `Running -> ShuttingDown -> Stopped`: signals every
    /// task, joins them all, performs one final drain so every record
    /// pushed before shutdown reaches every healthy sink, then flushes
    /// and releases the sinks. Idempotent once `Stopped`.
    pub async fn shutdown(&mut self) -> Result<()> {
        match self.state {
            PipelineState::Stopped => return Ok(()),
            PipelineState::Running => {}
            from => {
                return Err(PipelineError::InvalidTransition {
                    from,
                    to: PipelineState::ShuttingDown,
                });
            }
        }
        self.state = PipelineState::ShuttingDown;

        self.running.store(false, Ordering::SeqCst);
        self.cancel.cancel();

        for task in self.tasks.drain(..) {
            if task.await.is_err() {
                tracing::warn!("pipeline task panicked before joining");
            }
        }

        // Final drain: everything accepted before the flag flipped is
        // delivered before we report Stopped.
        if let Some(shared) = &self.shared {
            shared.drain().await;
        }

        for sink in &self.sinks {
            if let Err(e) = sink.flush() {
                tracing::warn!(sink = %sink.name(), error = %e, "flush failed at shutdown");
            }
        }

        self.state = PipelineState::Stopped;

        let snapshot = self.metrics.snapshot();
        tracing::info!(
            records_pushed = snapshot.records_pushed,
            records_written = snapshot.records_written,
            records_dropped = snapshot.records_dropped,
            parse_failures = snapshot.parse_failures,
            sink_write_errors = snapshot.sink_write_errors,
            "pipeline stopped"
        );
        Ok(())
    }

    fn ensure_configured(&self) -> Result<()> {
        self.ensure_configured_for(self.state)
    }

    fn ensure_configured_for(&self, to: PipelineState) -> Result<()> {
        if self.state == PipelineState::Configured {
            Ok(())
        } else {
            Err(PipelineError::InvalidTransition {
                from: self.state,
                to,
            })
        }
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("state", &self.state)
            .field("sinks", &self.sinks.len())
            .field("tasks", &self.tasks.len())
            .finish()
    }
}

/// Build the formatter for one reader
fn formatter_for(policy: PolicyKind, app_name: Option<&str>) -> Formatter {
    let formatter = Formatter::new(policy);
    match app_name {
        Some(name) => formatter.with_app_name(name),
        None => formatter,
    }
}

/// Reader task: open, read one line per tick, format, publish
///
/// Open failures and read errors are transient; the loop keeps retrying
/// until shutdown, with the tick sleep as backoff.
async fn reader_loop(
    mut source: Source,
    formatter: Formatter,
    period: Duration,
    shared: Arc<Shared>,
    cancel: CancellationToken,
) {
    let kind = source.kind();
    let context = formatter.policy().context_name;
    tracing::info!(source = kind, context, "reader starting");

    let mut raw = String::new();
    let mut opened = false;

    loop {
        if cancel.is_cancelled() {
            break;
        }

        if !opened {
            match source.open().await {
                Ok(()) => opened = true,
                Err(e) => {
                    tracing::debug!(source = kind, error = %e, "open failed, retrying next tick");
                }
            }
        }

        if opened {
            let read = tokio::select! {
                _ = cancel.cancelled() => break,
                read = source.read_line(&mut raw) => read,
            };

            match read {
                Ok(true) => match formatter.format(&raw) {
                    Some(record) => shared.publish(record),
                    None => shared.metrics.record_parse_failure(),
                },
                Ok(false) => {}
                Err(e) => {
                    opened = false;
                    tracing::debug!(source = kind, error = %e, "read failed, reopening next tick");
                }
            }
        }

        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(period) => {}
        }
    }

    tracing::info!(source = kind, "reader stopping");
}

/// Drain worker: parked until a push hints that records are waiting
async fn worker_loop(shared: Arc<Shared>, cancel: CancellationToken, worker_id: usize) {
    tracing::debug!(worker_id, "drain worker starting");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = shared.drain_signal.notified() => shared.drain().await,
        }
    }

    tracing::debug!(worker_id, "drain worker stopping");
}

/// Flusher task: periodic drain, plus one final drain on the way out
async fn flusher_loop(shared: Arc<Shared>, cancel: CancellationToken, period: Duration) {
    tracing::debug!(period_ms = period.as_millis() as u64, "flusher starting");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(period) => shared.drain().await,
        }
    }

    shared.drain().await;
    tracing::debug!("flusher stopping");
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod pipeline_test;
