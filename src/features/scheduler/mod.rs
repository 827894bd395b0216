//! # Feature: Reminder Scheduler
//!
//! Named registry of daily recurring jobs. Each name owns at most one live
//! tokio task; scheduling a name again cancels the previous task first.
//!
//! - **Version**: 2.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.1.0: Cancelling lets an in-flight run finish; add `shutdown`
//! - 2.0.0: Replace search-and-remove rescheduling with a name-keyed registry
//! - 1.0.0: Initial release with a single daily job

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
use chrono_tz::Tz;
use dashmap::DashMap;
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::features::store::ReminderTime;

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("job registration failed: {0}")]
    Registration(String),

    #[error("scheduler is shut down")]
    ShutDown,
}

/// Work executed on every daily trigger
#[async_trait]
pub trait ScheduledTask: Send + Sync {
    async fn run(&self);
}

/// Dropping a job stops its loop. A run already in progress completes first.
struct ScheduledJob {
    time: ReminderTime,
    handle: JoinHandle<()>,
    _cancel: oneshot::Sender<()>,
}

pub struct JobScheduler {
    jobs: DashMap<String, ScheduledJob>,
    tz: Tz,
    shut_down: AtomicBool,
}

impl JobScheduler {
    pub fn new(tz: Tz) -> Self {
        Self {
            jobs: DashMap::new(),
            tz,
            shut_down: AtomicBool::new(false),
        }
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Cancel any job registered under `name`, then register a new one firing
    /// every day at `time`.
    ///
    /// If registration fails after the cancellation, `name` stays
    /// unscheduled and the error is returned.
    pub fn schedule_daily(
        &self,
        name: &str,
        time: ReminderTime,
        task: Arc<dyn ScheduledTask>,
    ) -> Result<(), SchedulerError> {
        if self.cancel(name) {
            debug!("Cancelled previous '{name}' job before rescheduling");
        }

        if self.shut_down.load(Ordering::SeqCst) {
            warn!("Cannot register job '{name}': scheduler is shut down");
            return Err(SchedulerError::ShutDown);
        }

        let runtime = Handle::try_current().map_err(|e| {
            warn!("Cannot register job '{name}': {e}");
            SchedulerError::Registration(e.to_string())
        })?;

        let (cancel, cancelled) = oneshot::channel();
        let handle = runtime.spawn(run_daily(name.to_string(), time, self.tz, task, cancelled));

        // A concurrent registration may have slipped in between cancel and insert;
        // dropping the displaced job cancels it
        let job = ScheduledJob {
            time,
            handle,
            _cancel: cancel,
        };
        if self.jobs.insert(name.to_string(), job).is_some() {
            debug!("Replaced a concurrently registered '{name}' job");
        }

        info!("📅 Job '{name}' scheduled daily at {time} ({})", self.tz);
        Ok(())
    }

    /// Cancel the job under `name`; returns whether one existed
    pub fn cancel(&self, name: &str) -> bool {
        self.jobs.remove(name).is_some()
    }

    /// Cancel every job and refuse further registrations
    pub fn shutdown(&self) {
        self.shut_down.store(true, Ordering::SeqCst);
        let cancelled = self.jobs.len();
        self.jobs.clear();
        info!("🛑 Scheduler shut down ({cancelled} jobs cancelled)");
    }

    pub fn scheduled_time(&self, name: &str) -> Option<ReminderTime> {
        self.jobs.get(name).map(|job| job.time)
    }

    /// Live jobs under `name` (0 or 1)
    pub fn active_jobs(&self, name: &str) -> usize {
        self.jobs
            .get(name)
            .filter(|job| !job.handle.is_finished())
            .map_or(0, |_| 1)
    }

    pub fn next_run(&self, name: &str) -> Option<DateTime<Utc>> {
        self.scheduled_time(name)
            .map(|time| next_occurrence(Utc::now(), time, self.tz))
    }
}

async fn run_daily(
    name: String,
    time: ReminderTime,
    tz: Tz,
    task: Arc<dyn ScheduledTask>,
    mut cancelled: oneshot::Receiver<()>,
) {
    let mut last_fired = None;
    loop {
        let now = Utc::now();
        let next = next_deadline(now, last_fired, time, tz);
        let wait = (next - now).to_std().unwrap_or_default();
        debug!(
            "Job '{name}' next fires at {} (in {}s)",
            next.with_timezone(&tz),
            wait.as_secs()
        );

        tokio::select! {
            _ = tokio::time::sleep(wait) => {}
            _ = &mut cancelled => {
                debug!("Job '{name}' cancelled while waiting");
                return;
            }
        }

        info!("⏰ Running scheduled job '{name}'");
        task.run().await;
        last_fired = Some(next);

        if !matches!(cancelled.try_recv(), Err(oneshot::error::TryRecvError::Empty)) {
            debug!("Job '{name}' cancelled during its run");
            return;
        }
    }
}

/// Next firing after `now`, never repeating the occurrence that last fired
/// even if the wall clock lags the timer
fn next_deadline(
    now: DateTime<Utc>,
    last_fired: Option<DateTime<Utc>>,
    time: ReminderTime,
    tz: Tz,
) -> DateTime<Utc> {
    let from = last_fired.map_or(now, |fired| fired.max(now));
    next_occurrence(from, time, tz)
}

/// First instant strictly after `now` whose wall-clock time in `tz` is `time`
pub fn next_occurrence(now: DateTime<Utc>, time: ReminderTime, tz: Tz) -> DateTime<Utc> {
    let mut date = now.with_timezone(&tz).date_naive();
    // Two iterations suffice unless the local time does not exist that day
    for _ in 0..4 {
        let candidate = date.and_time(time.as_naive_time());
        if let Some(local) = tz.from_local_datetime(&candidate).earliest() {
            let utc = local.with_timezone(&Utc);
            if utc > now {
                return utc;
            }
        }
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }
    now + ChronoDuration::days(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GARDEN_TZ;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct CountingTask {
        runs: AtomicUsize,
    }

    impl CountingTask {
        fn runs(&self) -> usize {
            self.runs.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ScheduledTask for CountingTask {
        async fn run(&self) {
            self.runs.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Takes half an hour per run
    #[derive(Default)]
    struct SlowTask {
        started: AtomicUsize,
        finished: AtomicUsize,
    }

    #[async_trait]
    impl ScheduledTask for SlowTask {
        async fn run(&self) {
            self.started.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_secs(30 * 60)).await;
            self.finished.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn at(hour: u8, minute: u8) -> ReminderTime {
        ReminderTime::new(hour, minute).unwrap()
    }

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_next_occurrence_later_today() {
        // 08:00 in Kuala Lumpur
        let now = utc("2025-03-01T00:00:00Z");
        assert_eq!(
            next_occurrence(now, at(18, 30), GARDEN_TZ),
            utc("2025-03-01T10:30:00Z")
        );
    }

    #[test]
    fn test_next_occurrence_rolls_to_tomorrow() {
        let now = utc("2025-03-01T00:00:00Z");
        assert_eq!(
            next_occurrence(now, at(7, 0), GARDEN_TZ),
            utc("2025-03-01T23:00:00Z")
        );
    }

    #[test]
    fn test_next_occurrence_is_strictly_after_now() {
        let now = utc("2025-03-01T00:00:00Z");
        assert_eq!(
            next_occurrence(now, ReminderTime::DEFAULT, GARDEN_TZ),
            utc("2025-03-02T00:00:00Z")
        );
    }

    #[test]
    fn test_next_occurrence_crosses_utc_date() {
        // 23:30 UTC on Mar 1 is already 07:30 on Mar 2 in Kuala Lumpur
        let now = utc("2025-03-01T23:30:00Z");
        assert_eq!(
            next_occurrence(now, ReminderTime::DEFAULT, GARDEN_TZ),
            utc("2025-03-02T00:00:00Z")
        );
    }

    #[test]
    fn test_next_deadline_skips_occurrence_already_fired() {
        // Wall clock reads 07:59:59 although the 08:00 run already happened
        let fired = utc("2025-03-02T00:00:00Z");
        let now = utc("2025-03-01T23:59:59Z");
        assert_eq!(
            next_deadline(now, Some(fired), ReminderTime::DEFAULT, GARDEN_TZ),
            utc("2025-03-03T00:00:00Z")
        );
        assert_eq!(
            next_deadline(now, None, ReminderTime::DEFAULT, GARDEN_TZ),
            fired
        );
    }

    #[tokio::test]
    async fn test_reschedule_leaves_exactly_one_job() {
        let scheduler = JobScheduler::new(GARDEN_TZ);
        let task = Arc::new(CountingTask::default());

        for (hour, minute) in [(8, 0), (6, 15), (21, 45), (18, 30)] {
            scheduler
                .schedule_daily("daily_reminder", at(hour, minute), task.clone())
                .unwrap();
            assert_eq!(scheduler.active_jobs("daily_reminder"), 1);
        }

        assert_eq!(scheduler.scheduled_time("daily_reminder"), Some(at(18, 30)));
        assert_eq!(scheduler.jobs.len(), 1);
    }

    #[tokio::test]
    async fn test_cancel_removes_job() {
        let scheduler = JobScheduler::new(GARDEN_TZ);
        scheduler
            .schedule_daily("daily_reminder", at(8, 0), Arc::new(CountingTask::default()))
            .unwrap();

        assert!(scheduler.cancel("daily_reminder"));
        assert!(!scheduler.cancel("daily_reminder"));
        assert_eq!(scheduler.active_jobs("daily_reminder"), 0);
        assert!(scheduler.scheduled_time("daily_reminder").is_none());
        assert!(scheduler.next_run("daily_reminder").is_none());
    }

    #[tokio::test]
    async fn test_names_are_independent() {
        let scheduler = JobScheduler::new(GARDEN_TZ);
        let task = Arc::new(CountingTask::default());
        scheduler.schedule_daily("a", at(8, 0), task.clone()).unwrap();
        scheduler.schedule_daily("b", at(9, 0), task.clone()).unwrap();

        scheduler.cancel("a");
        assert_eq!(scheduler.active_jobs("a"), 0);
        assert_eq!(scheduler.active_jobs("b"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_job_fires_within_a_day() {
        let scheduler = JobScheduler::new(GARDEN_TZ);
        let task = Arc::new(CountingTask::default());
        scheduler
            .schedule_daily("daily_reminder", at(8, 0), task.clone())
            .unwrap();

        tokio::time::sleep(Duration::from_secs(24 * 3600 + 60)).await;
        assert!(task.runs() >= 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_job_never_fires() {
        let scheduler = JobScheduler::new(GARDEN_TZ);
        let task = Arc::new(CountingTask::default());
        scheduler
            .schedule_daily("daily_reminder", at(8, 0), task.clone())
            .unwrap();
        scheduler.cancel("daily_reminder");

        tokio::time::sleep(Duration::from_secs(2 * 24 * 3600)).await;
        assert_eq!(task.runs(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rescheduled_job_never_fires_at_old_time() {
        let scheduler = JobScheduler::new(GARDEN_TZ);
        let old_task = Arc::new(CountingTask::default());
        let new_task = Arc::new(CountingTask::default());
        scheduler
            .schedule_daily("daily_reminder", at(8, 0), old_task.clone())
            .unwrap();
        scheduler
            .schedule_daily("daily_reminder", at(18, 30), new_task.clone())
            .unwrap();

        tokio::time::sleep(Duration::from_secs(2 * 24 * 3600)).await;
        assert_eq!(old_task.runs(), 0);
        assert!(new_task.runs() >= 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_lets_running_broadcast_finish() {
        let scheduler = JobScheduler::new(GARDEN_TZ);
        let task = Arc::new(SlowTask::default());
        scheduler
            .schedule_daily("daily_reminder", at(8, 0), task.clone())
            .unwrap();

        // Step in 1 minute increments until the run is under way
        while task.started.load(Ordering::SeqCst) == 0 {
            tokio::time::sleep(Duration::from_secs(60)).await;
        }
        assert_eq!(task.finished.load(Ordering::SeqCst), 0);

        scheduler
            .schedule_daily("daily_reminder", at(18, 30), Arc::new(CountingTask::default()))
            .unwrap();
        tokio::time::sleep(Duration::from_secs(60 * 60)).await;

        assert_eq!(task.finished.load(Ordering::SeqCst), 1);
        assert_eq!(task.started.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.active_jobs("daily_reminder"), 1);
    }

    #[tokio::test]
    async fn test_shutdown_refuses_new_jobs() {
        let scheduler = JobScheduler::new(GARDEN_TZ);
        scheduler
            .schedule_daily("daily_reminder", at(8, 0), Arc::new(CountingTask::default()))
            .unwrap();

        scheduler.shutdown();
        assert_eq!(scheduler.active_jobs("daily_reminder"), 0);

        let result =
            scheduler.schedule_daily("daily_reminder", at(9, 0), Arc::new(CountingTask::default()));
        assert!(matches!(result, Err(SchedulerError::ShutDown)));
        assert!(scheduler.scheduled_time("daily_reminder").is_none());
    }

    #[test]
    fn test_registration_failure_leaves_name_unscheduled() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        let scheduler = JobScheduler::new(GARDEN_TZ);
        let task = Arc::new(CountingTask::default());

        {
            let _guard = runtime.enter();
            scheduler
                .schedule_daily("daily_reminder", at(8, 0), task.clone())
                .unwrap();
        }
        assert_eq!(scheduler.scheduled_time("daily_reminder"), Some(at(8, 0)));

        // Outside any runtime the old job is cancelled but nothing replaces it
        let result = scheduler.schedule_daily("daily_reminder", at(18, 30), task);
        assert!(matches!(result, Err(SchedulerError::Registration(_))));
        assert_eq!(scheduler.active_jobs("daily_reminder"), 0);
        assert!(scheduler.scheduled_time("daily_reminder").is_none());
    }
}
