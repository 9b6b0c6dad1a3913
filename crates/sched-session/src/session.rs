use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use event_bus::EventBus;
use sched_driver::Driver;
use sched_types::{DriverStatus, Event, FrameworkId, MasterInfo, OfferId, TaskId, TaskInfo, TaskState};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::error::SessionError;
use crate::state::SessionState;

/// Per-operation deadlines, counted from the moment the corresponding event subscription is
/// armed (not from when the driver command is issued).
#[derive(Debug, Clone, Copy)]
pub struct Timeouts {
    pub connect: Duration,
    pub launch: Duration,
    pub kill: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(30),
            launch: Duration::from_secs(30),
            kill: Duration::from_secs(30),
        }
    }
}

/// Which driver command backs a teardown call; the three public teardown methods all funnel
/// through [`Session::stop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StopKind {
    Disconnect,
    Terminate,
    Abort,
}

/// A single framework session against a scheduler master. Owns the lifecycle state machine,
/// the per-task post-launch watches, and the driver handle used to issue commands.
///
/// Always held behind an `Arc`: the terminal-watch spawned by [`Session::launch`] needs to
/// outlive the call that created it, so every method that can install one takes `self` as
/// `&Arc<Self>`.
pub struct Session {
    driver: Arc<dyn Driver>,
    bus: EventBus<Event>,
    state: RwLock<SessionState>,
    timeouts: Timeouts,
    task_subs: DashMap<TaskId, CancellationToken>,
}

impl Session {
    pub fn new(driver: Arc<dyn Driver>, bus: EventBus<Event>, timeouts: Timeouts) -> Arc<Self> {
        Arc::new(Self {
            driver,
            bus,
            state: RwLock::new(SessionState::Disconnected),
            timeouts,
            task_subs: DashMap::new(),
        })
    }

    pub async fn state(&self) -> SessionState {
        *self.state.read().await
    }

    /// Number of task ids currently holding a live terminal-watch.
    pub fn tracked_task_count(&self) -> usize {
        self.task_subs.len()
    }

    async fn cas(&self, from: SessionState, to: SessionState) -> bool {
        let mut guard = self.state.write().await;
        if *guard == from {
            *guard = to;
            true
        } else {
            false
        }
    }

    async fn cas_many(&self, from: &[SessionState], to: SessionState) -> bool {
        let mut guard = self.state.write().await;
        if from.contains(&*guard) {
            *guard = to;
            true
        } else {
            false
        }
    }

    async fn require_connected(&self) -> Result<(), SessionError> {
        let actual = self.state().await;
        if actual == SessionState::Connected {
            Ok(())
        } else {
            Err(SessionError::WrongState {
                expected: "Connected",
                actual,
            })
        }
    }

    async fn require_not_disconnected(&self) -> Result<(), SessionError> {
        if self.state().await == SessionState::Disconnected {
            Err(SessionError::Disconnected)
        } else {
            Ok(())
        }
    }

    fn map_bus_error(&self, err: event_bus::Error, timeout_message: &'static str) -> SessionError {
        match err {
            event_bus::Error::Timeout => SessionError::Timeout(timeout_message),
            other => SessionError::EventBus(other),
        }
    }

    /// Connects to the master. Transitions Disconnected -> Connecting for the duration of the
    /// attempt; a failed connect (timeout, a `Disconnected`/`MesosError` event, or the driver
    /// reporting it never started) does not revert the session to Disconnected by itself;
    /// callers observe the failure and may call [`Session::disconnect`] (which also accepts
    /// `Connecting` as a source state) to fully reset before retrying.
    pub async fn connect(self: &Arc<Self>) -> Result<(FrameworkId, MasterInfo), SessionError> {
        if !self.cas(SessionState::Disconnected, SessionState::Connecting).await {
            return Err(SessionError::WrongState {
                expected: "Disconnected",
                actual: self.state().await,
            });
        }

        let mut rx = self.bus.subscribe();

        match self.driver.start().await {
            Ok(status) if status.is_running() => {}
            Ok(_not_running) => return Err(SessionError::Driver(sched_driver::Error::Disconnected)),
            Err(err) => return Err(SessionError::Driver(err)),
        }

        let event = rx
            .recv_where(Some(self.timeouts.connect), |event| {
                matches!(
                    event,
                    Event::Registered { .. } | Event::Disconnected | Event::MesosError { .. }
                )
            })
            .await
            .map_err(|err| self.map_bus_error(err, "connection attempt timed out"))?;

        match event {
            Event::Registered {
                framework_id,
                master_info,
            } => {
                let transitioned = self.cas(SessionState::Connecting, SessionState::Connected).await;
                debug_assert!(transitioned, "connect is the sole writer out of Connecting on success");
                tracing::info!(framework_id = %framework_id, "session registered with master");
                Ok((framework_id, master_info))
            }
            Event::Disconnected => {
                tracing::debug!("connect observed a disconnect before registering");
                Err(SessionError::Driver(sched_driver::Error::Disconnected))
            }
            Event::MesosError { message } => {
                tracing::debug!(%message, "connect observed a master error before registering");
                Err(SessionError::Mesos(message))
            }
            _ => unreachable!("recv_where only returns events matching the predicate above"),
        }
    }

    /// Launches `tasks` against `offer_ids`. Requires `Connected`. On success, returns one
    /// result per input task, in input order; each entry resolves independently once its
    /// launch-watch observes a terminal state or `Running`.
    ///
    /// If the driver rejects `launch_tasks` synchronously, this call fails as a whole and no
    /// per-task watch is ever armed; per-offer cleanup (declining) is the caller's
    /// (`sched-launcher`'s) responsibility.
    pub async fn launch(
        self: &Arc<Self>,
        offer_ids: Vec<OfferId>,
        tasks: Vec<TaskInfo>,
    ) -> Result<Vec<Result<TaskInfo, SessionError>>, SessionError> {
        self.require_connected().await?;

        if tasks.is_empty() {
            return Ok(Vec::new());
        }

        let watches: Vec<_> = tasks
            .iter()
            .map(|task| (task.task_id.clone(), self.bus.subscribe()))
            .collect();

        self.driver.launch_tasks(offer_ids, tasks.clone()).await?;

        let results = watches
            .into_iter()
            .zip(tasks)
            .map(|((task_id, rx), task)| self.watch_launch(task_id, task, rx));

        Ok(futures::future::join_all(results).await)
    }

    async fn watch_launch(
        self: &Arc<Self>,
        task_id: TaskId,
        task: TaskInfo,
        mut rx: event_bus::Receiver<Event>,
    ) -> Result<TaskInfo, SessionError> {
        let watched = task_id.clone();
        let event = rx
            .recv_where(Some(self.timeouts.launch), move |event| match event {
                Event::TaskEvent { task_id, state, .. } => {
                    *task_id == watched && (*state == TaskState::Running || state.is_terminal())
                }
                _ => false,
            })
            .await
            .map_err(|err| self.map_bus_error(err, "task launch attempt timed out"))?;

        match event {
            Event::TaskEvent {
                state: TaskState::Running,
                ..
            } => {
                tracing::debug!(task_id = %task_id, "task is running, installing terminal watch");
                self.install_terminal_watch(task_id).await;
                Ok(task)
            }
            Event::TaskEvent {
                state,
                status_message,
                ..
            } => {
                tracing::debug!(task_id = %task_id, ?state, "task failed to reach running during launch");
                Err(SessionError::TaskFailure {
                    state,
                    message: status_message,
                })
            }
            _ => unreachable!("recv_where only returns events matching the predicate above"),
        }
    }

    /// Installs a long-lived, untimed watch that removes the task from `task_subs` the moment
    /// it reaches a terminal state. Replaces (and cancels) any pre-existing watch for the same
    /// id. If the session has left `Connected` by the time this runs, the watch is torn down
    /// immediately instead of being armed (TOCTOU cleanup after a launch race with disconnect).
    async fn install_terminal_watch(self: &Arc<Self>, task_id: TaskId) {
        let token = CancellationToken::new();
        let rx = self.bus.subscribe();

        if let Some(previous) = self.task_subs.insert(task_id.clone(), token.clone()) {
            previous.cancel();
        }

        if self.state().await != SessionState::Connected {
            if let Some((_, token)) = self.task_subs.remove(&task_id) {
                token.cancel();
            }
            return;
        }

        let session = Arc::clone(self);
        tokio::spawn(async move {
            session.run_terminal_watch(task_id, token, rx).await;
        });
    }

    async fn run_terminal_watch(
        self: Arc<Self>,
        task_id: TaskId,
        token: CancellationToken,
        mut rx: event_bus::Receiver<Event>,
    ) {
        let watched = task_id.clone();
        let watch = rx.recv_where(None, move |event| {
            matches!(event, Event::TaskEvent { task_id, state, .. } if *task_id == watched && state.is_terminal())
        });

        tokio::select! {
            _ = token.cancelled() => {
                tracing::trace!(task_id = %task_id, "terminal watch cancelled");
            }
            result = watch => {
                if let Ok(Event::TaskEvent { state, .. }) = result {
                    tracing::info!(task_id = %task_id, ?state, "task reached terminal state");
                }
                self.task_subs.remove(&task_id);
            }
        }
    }

    /// Kills a running task. Requires `Connected`.
    pub async fn kill(self: &Arc<Self>, task_id: TaskId) -> Result<TaskId, SessionError> {
        self.require_connected().await?;

        let mut rx = self.bus.subscribe();
        self.driver.kill_task(task_id.clone()).await?;

        let watched = task_id.clone();
        let event = rx
            .recv_where(Some(self.timeouts.kill), move |event| {
                matches!(event, Event::TaskEvent { task_id, state, .. } if *task_id == watched && state.is_terminal())
            })
            .await
            .map_err(|err| self.map_bus_error(err, "task kill timed out"))?;

        match event {
            Event::TaskEvent {
                state: TaskState::Lost,
                status_message,
                ..
            } => Err(SessionError::TaskFailure {
                state: TaskState::Lost,
                message: status_message,
            }),
            Event::TaskEvent { .. } => Ok(task_id),
            _ => unreachable!("recv_where only returns events matching the predicate above"),
        }
    }

    /// Declines an offer. Requires any state other than `Disconnected`.
    pub async fn decline(self: &Arc<Self>, offer_id: OfferId) -> Result<(), SessionError> {
        self.require_not_disconnected().await?;
        self.driver.decline_offer(offer_id).await?;
        Ok(())
    }

    /// Gracefully disconnects, allowing the framework to be re-offered its tasks by a later
    /// session with the same id.
    pub async fn disconnect(self: &Arc<Self>) -> Result<DriverStatus, SessionError> {
        self.stop(StopKind::Disconnect).await
    }

    /// Disconnects without failover: the master releases this framework's tasks.
    pub async fn terminate(self: &Arc<Self>) -> Result<DriverStatus, SessionError> {
        self.stop(StopKind::Terminate).await
    }

    /// Aborts the session immediately and ungracefully.
    pub async fn abort(self: &Arc<Self>) -> Result<DriverStatus, SessionError> {
        self.stop(StopKind::Abort).await
    }

    async fn stop(self: &Arc<Self>, kind: StopKind) -> Result<DriverStatus, SessionError> {
        if !self
            .cas_many(
                &[SessionState::Connected, SessionState::Connecting],
                SessionState::Disconnecting,
            )
            .await
        {
            return Err(SessionError::WrongState {
                expected: "Connected or Connecting",
                actual: self.state().await,
            });
        }

        for entry in self.task_subs.iter() {
            entry.value().cancel();
        }
        self.task_subs.clear();

        match kind {
            StopKind::Disconnect => self.driver.stop(true).await?,
            StopKind::Terminate => self.driver.stop(false).await?,
            StopKind::Abort => self.driver.abort().await?,
        }

        let status = self.driver.join().await?;

        if !self.cas(SessionState::Disconnecting, SessionState::Disconnected).await {
            return Err(SessionError::IllegalState(
                "session left Disconnecting by a concurrent writer during teardown",
            ));
        }

        tracing::info!(?status, "session torn down");
        Ok(status)
    }
}
