//! Background job scheduling.
//!
//! Jobs run on fixed tokio intervals with a shared watch channel for
//! graceful shutdown. The interval's first immediate tick is skipped, so
//! a job never fires at startup before the server is serving traffic.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy)]
#[allow(dead_code)] // Seconds and Hourly are available for future jobs
pub enum JobFrequency {
    Seconds(u64),
    Hourly,
    Daily,
}

impl JobFrequency {
    pub fn duration(&self) -> Duration {
        let secs = match self {
            JobFrequency::Seconds(secs) => *secs,
            JobFrequency::Hourly => 3600,
            JobFrequency::Daily => 86400,
        };
        Duration::from_secs(secs)
    }
}

/// A periodic background task.
#[async_trait::async_trait]
pub trait Job: Send + Sync {
    fn name(&self) -> &'static str;

    fn frequency(&self) -> JobFrequency;

    /// One run. Errors are logged by the scheduler, not retried early;
    /// the job fires again on its next tick regardless.
    async fn execute(&self) -> Result<(), String>;
}

async fn run_job(job: Arc<dyn Job>, mut shutdown_rx: watch::Receiver<bool>) {
    let name = job.name();
    let mut interval = tokio::time::interval(job.frequency().duration());

    // Discard the immediate first tick
    interval.tick().await;
    info!(job = name, frequency = ?job.frequency(), "Job scheduled");

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let start = std::time::Instant::now();
                info!(job = name, "Job starting");

                let outcome = job.execute().await;
                let elapsed_ms = start.elapsed().as_millis();
                match outcome {
                    Ok(()) => info!(job = name, elapsed_ms, "Job completed"),
                    Err(e) => error!(job = name, elapsed_ms, error = %e, "Job failed"),
                }
            }
            _ = shutdown_rx.changed() => {
                if *shutdown_rx.borrow() {
                    info!(job = name, "Job shutting down");
                    break;
                }
            }
        }
    }
}

/// Owns the registered jobs and their spawned tasks.
pub struct JobScheduler {
    jobs: Vec<Arc<dyn Job>>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
    handles: Vec<JoinHandle<()>>,
}

impl JobScheduler {
    pub fn new() -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            jobs: Vec::new(),
            shutdown_tx,
            shutdown_rx,
            handles: Vec::new(),
        }
    }

    pub fn register<J: Job + 'static>(&mut self, job: J) {
        self.jobs.push(Arc::new(job));
    }

    /// Spawn one task per registered job.
    pub fn start(&mut self) {
        info!("Starting job scheduler with {} jobs", self.jobs.len());

        for job in &self.jobs {
            let task = run_job(Arc::clone(job), self.shutdown_rx.clone());
            self.handles.push(tokio::spawn(task));
        }
    }

    /// Signal shutdown; returns without waiting.
    pub fn shutdown(&self) {
        info!("Initiating job scheduler shutdown");
        let _ = self.shutdown_tx.send(true);
    }

    /// Wait for every job task to finish, up to `timeout`.
    pub async fn wait_for_shutdown(self, timeout: Duration) {
        let drain = async {
            for handle in self.handles {
                if let Err(e) = handle.await {
                    warn!("Job task panicked: {}", e);
                }
            }
        };

        match tokio::time::timeout(timeout, drain).await {
            Ok(()) => info!("All jobs completed gracefully"),
            Err(_) => warn!("Job shutdown timed out after {:?}", timeout),
        }
    }
}

impl Default for JobScheduler {
    fn default() -> Self {
        Self::new()
    }
}
