mod common;

use std::sync::Arc;

use common::{connected_session, driver_that_starts, short_timeouts};
use event_bus::EventBus;
use sched_driver::MockDriver;
use sched_session::{Session, SessionError, SessionState};
use sched_types::{DriverStatus, Event, TaskId, TaskState};

#[tokio::test]
async fn connect_is_rejected_from_any_state_but_disconnected() {
    let driver = driver_that_starts();
    let bus = EventBus::<Event>::new(16);
    let session = connected_session(driver, &bus).await;

    let result = session.connect().await;
    assert!(matches!(result, Err(SessionError::WrongState { .. })));
}

#[tokio::test]
async fn a_timed_out_connect_does_not_resolve_again_when_a_late_event_arrives() {
    let mut driver = MockDriver::new();
    driver.expect_start().returning(|| Ok(DriverStatus::Running));
    let session = Session::new(Arc::new(driver), EventBus::new(16), short_timeouts());

    let result = session.connect().await;
    assert!(matches!(result, Err(SessionError::Timeout(_))));
    // the subscription behind the timed-out connect is gone; a late event just has no
    // listener and is not an error for the bus to publish into an empty room.
    assert_eq!(session.state().await, SessionState::Connecting);
}

#[tokio::test]
async fn disconnect_also_recovers_a_session_stuck_in_connecting() {
    let mut driver = MockDriver::new();
    driver.expect_start().returning(|| Ok(DriverStatus::NotStarted));
    driver.expect_stop().returning(|_| Ok(()));
    driver.expect_join().returning(|| Ok(DriverStatus::Stopped));
    let session = Session::new(Arc::new(driver), EventBus::new(16), short_timeouts());

    assert!(session.connect().await.is_err());
    assert_eq!(session.state().await, SessionState::Connecting);

    let status = session.disconnect().await.unwrap();
    assert_eq!(status, DriverStatus::Stopped);
    assert_eq!(session.state().await, SessionState::Disconnected);
}

#[tokio::test]
async fn kill_on_an_already_lost_task_fails_with_task_failure() {
    let mut driver = driver_that_starts();
    driver.expect_kill_task().returning(|_| Ok(()));
    let bus = EventBus::<Event>::new(16);
    let session = connected_session(driver, &bus).await;

    let task_id = TaskId::new("t1");
    let kill = tokio::spawn({
        let session = Arc::clone(&session);
        let task_id = task_id.clone();
        async move { session.kill(task_id).await }
    });
    tokio::task::yield_now().await;
    bus.send(Event::TaskEvent {
        task_id: task_id.clone(),
        state: TaskState::Lost,
        status_message: Some("slave lost".into()),
    })
    .unwrap();

    assert!(matches!(
        kill.await.unwrap(),
        Err(SessionError::TaskFailure { state: TaskState::Lost, .. })
    ));
}

#[tokio::test]
async fn decline_is_rejected_once_the_session_is_fully_disconnected() {
    let mut driver = driver_that_starts();
    driver.expect_stop().returning(|_| Ok(()));
    driver.expect_join().returning(|| Ok(DriverStatus::Stopped));
    let bus = EventBus::<Event>::new(16);
    let session = connected_session(driver, &bus).await;

    session.disconnect().await.unwrap();

    let result = session.decline(sched_types::OfferId::new("o1")).await;
    assert!(matches!(result, Err(SessionError::Disconnected)));
}

#[tokio::test]
async fn a_failed_launch_watch_timeout_does_not_prevent_a_later_unrelated_kill() {
    let mut driver = driver_that_starts();
    driver.expect_launch_tasks().returning(|_, _| Ok(()));
    driver.expect_kill_task().returning(|_| Ok(()));
    let bus = EventBus::<Event>::new(16);
    let session = connected_session(driver, &bus).await;

    let stale_task = sched_types::TaskInfo {
        name: "stale".into(),
        task_id: TaskId::new("stale"),
        slave_id: sched_types::SlaveId::new("slave-1"),
        resources: vec![],
        spec: sched_types::TaskSpec::Command(sched_types::CommandSpec {
            value: "/bin/true".into(),
            args: vec![],
        }),
    };
    let results = session.launch(vec![], vec![stale_task]).await.unwrap();
    assert!(matches!(results[0], Err(SessionError::Timeout(_))));

    let task_id = TaskId::new("unrelated");
    let kill = tokio::spawn({
        let session = Arc::clone(&session);
        let task_id = task_id.clone();
        async move { session.kill(task_id).await }
    });
    tokio::task::yield_now().await;
    bus.send(Event::TaskEvent {
        task_id: task_id.clone(),
        state: TaskState::Killed,
        status_message: None,
    })
    .unwrap();

    assert_eq!(kill.await.unwrap().unwrap(), task_id);
}
