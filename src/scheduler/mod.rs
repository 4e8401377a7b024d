// wblogtool/src/scheduler/mod.rs
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, Instant};

/// One invocation of a scheduled job body.
pub type JobFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send>>;

struct Job {
    name: String,
    interval: Duration,
    next_due: Instant,
    run: Box<dyn FnMut() -> JobFuture + Send>,
}

/// Process-wide periodic-task runner.
///
/// A single tick loop drives all registered jobs: it sleeps until the
/// earliest next-due time, then runs every due job to completion,
/// sequentially and in registration order. A job's next due time is computed
/// from its last run plus its interval, in memory only; after a process
/// restart the intervals start over from process start.
pub struct Scheduler {
    jobs: Vec<Job>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self { jobs: Vec::new() }
    }

    /// Registers a fixed-interval job, first due one interval after the
    /// scheduler starts.
    pub fn every<F>(&mut self, interval: Duration, name: &str, run: F)
    where
        F: FnMut() -> JobFuture + Send + 'static,
    {
        self.jobs.push(Job {
            name: name.to_string(),
            interval,
            next_due: Instant::now() + interval,
            run: Box::new(run),
        });
    }

    /// Runs the tick loop until `shutdown` yields.
    ///
    /// A failing job is reported and simply waits for its next tick; the
    /// loop itself never terminates on job failure.
    pub async fn run(mut self, mut shutdown: mpsc::Receiver<()>) {
        let start = Instant::now();
        for job in &mut self.jobs {
            job.next_due = start + job.interval;
        }
        println!("Scheduler started with {} job(s)", self.jobs.len());

        loop {
            let wake = match self.jobs.iter().map(|j| j.next_due).min() {
                Some(wake) => wake,
                None => {
                    println!("Scheduler has no registered jobs, exiting.");
                    return;
                }
            };

            tokio::select! {
                _ = shutdown.recv() => {
                    println!("Scheduler shutting down");
                    return;
                }
                _ = time::sleep_until(wake) => {
                    let now = Instant::now();
                    // Due jobs run sequentially, in registration order, so
                    // two jobs due on the same tick never contend for the
                    // data file.
                    for job in self.jobs.iter_mut().filter(|j| j.next_due <= now) {
                        match (job.run)().await {
                            Ok(()) => println!("✓ Scheduled job '{}' completed", job.name),
                            Err(e) => eprintln!("❌ Scheduled job '{}' failed: {:#}", job.name, e),
                        }
                        job.next_due = Instant::now() + job.interval;
                    }
                }
            }
        }
    }
}
