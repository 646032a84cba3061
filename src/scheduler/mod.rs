//! Notification scheduler
//!
//! Runs the three notification jobs on fixed wall-clock triggers. Each job
//! lives on its own tokio task that sleeps until the next fire time, runs,
//! and logs a report. A job never overlaps with itself.

pub mod trigger;

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Local, Utc};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::config::NotificationsConfig;
use crate::database::DatabaseService;
use crate::services::{DeliveryReport, Notification, NotificationService};
use crate::utils::errors::Result;
use crate::utils::logging::log_job_run;

pub use trigger::Trigger;

/// The scheduled notification jobs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Job {
    InactiveReminders,
    UnfinishedReminders,
    NewBookAlerts,
}

impl Job {
    pub const ALL: [Job; 3] = [Job::InactiveReminders, Job::UnfinishedReminders, Job::NewBookAlerts];

    pub fn id(&self) -> &'static str {
        match self {
            Job::InactiveReminders => "inactive_reminders",
            Job::UnfinishedReminders => "unfinished_reminders",
            Job::NewBookAlerts => "new_book_alerts",
        }
    }

    pub fn trigger(&self) -> Trigger {
        match self {
            Job::InactiveReminders => Trigger::Daily { hour: 10, minute: 0 },
            Job::UnfinishedReminders => Trigger::Daily { hour: 20, minute: 0 },
            Job::NewBookAlerts => Trigger::EveryHours(6),
        }
    }
}

/// Outcome of one job run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobReport {
    pub job: Job,
    pub candidates: usize,
    pub delivery: DeliveryReport,
}

/// Job bodies: select recipients, render, deliver
#[derive(Clone)]
pub struct NotificationJobs {
    db: DatabaseService,
    notifier: NotificationService,
    config: NotificationsConfig,
}

impl NotificationJobs {
    pub fn new(db: DatabaseService, notifier: NotificationService, config: NotificationsConfig) -> Self {
        Self { db, notifier, config }
    }

    /// Run one job immediately, as if its slot fired now
    pub async fn run(&self, job: Job) -> Result<JobReport> {
        self.run_at(job, Utc::now()).await
    }

    /// Run one job for the slot that fired at `fire_time`
    ///
    /// Recipient windows are measured from `fire_time`, not from when the
    /// run actually starts.
    pub async fn run_at(&self, job: Job, fire_time: DateTime<Utc>) -> Result<JobReport> {
        let started = Instant::now();
        let notifications = self.collect(job, fire_time).await?;
        let delivery = self.notifier.deliver(&notifications).await;

        log_job_run(
            job.id(),
            notifications.len(),
            delivery.sent,
            delivery.failed,
            started.elapsed().as_millis() as u64,
        );

        Ok(JobReport { job, candidates: notifications.len(), delivery })
    }

    async fn collect(&self, job: Job, now: DateTime<Utc>) -> Result<Vec<Notification>> {
        let notifications: Vec<Notification> = match job {
            Job::InactiveReminders => self
                .db
                .inactive_recipients(now, self.config.inactive_days)
                .await?
                .iter()
                .map(|recipient| self.notifier.inactive_reminder(recipient))
                .collect(),
            Job::UnfinishedReminders => self
                .db
                .unfinished_books(now, self.config.unfinished_days, self.config.min_progress)
                .await?
                .iter()
                .map(|record| self.notifier.unfinished_reminder(record))
                .collect(),
            Job::NewBookAlerts => self
                .db
                .new_book_alerts(now, self.config.new_books_window_hours)
                .await?
                .iter()
                .map(|alert| self.notifier.new_book_alert(alert))
                .collect(),
        };
        Ok(notifications)
    }
}

/// Owns the background tasks of the scheduled jobs
pub struct NotificationScheduler {
    jobs: Arc<NotificationJobs>,
    handles: Vec<JoinHandle<()>>,
}

impl NotificationScheduler {
    pub fn new(jobs: NotificationJobs) -> Self {
        Self { jobs: Arc::new(jobs), handles: Vec::new() }
    }

    /// Registered jobs with their triggers
    pub fn registrations() -> Vec<(&'static str, Trigger)> {
        Job::ALL.iter().map(|job| (job.id(), job.trigger())).collect()
    }

    pub fn is_running(&self) -> bool {
        !self.handles.is_empty()
    }

    /// Spawn one task per job; does nothing if already started
    pub fn start(&mut self) {
        if self.is_running() {
            warn!("Notification scheduler already running");
            return;
        }

        for job in Job::ALL {
            info!(job_id = job.id(), trigger = %job.trigger(), "Registering notification job");
            let jobs = self.jobs.clone();
            self.handles.push(tokio::spawn(run_forever(jobs, job)));
        }
        info!("Notification scheduler started");
    }

    /// Abort all job tasks
    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }
        for handle in self.handles.drain(..) {
            handle.abort();
        }
        info!("Notification scheduler stopped");
    }
}

impl Drop for NotificationScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_forever(jobs: Arc<NotificationJobs>, job: Job) {
    let mut last_fired: Option<DateTime<Local>> = None;
    loop {
        let now = Local::now();
        let Some(next) = job.trigger().next_run(last_fired.as_ref(), &now) else {
            warn!(job_id = job.id(), "Trigger has no next fire time, job disabled");
            return;
        };

        info!(job_id = job.id(), next_run = %next, "Next run scheduled");
        tokio::time::sleep((next - now).to_std().unwrap_or_default()).await;

        info!(job_id = job.id(), "Running notification job");
        last_fired = Some(next);
        match jobs.run_at(job, next.with_timezone(&Utc)).await {
            Ok(report) => info!(
                job_id = job.id(),
                candidates = report.candidates,
                sent = report.delivery.sent,
                failed = report.delivery.failed,
                "Notification job finished"
            ),
            Err(e) => e.log(job.id()),
        }
    }
}
