mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{connected_session, driver_that_starts, offer, task_descriptor};
use event_bus::EventBus;
use sched_launcher::{distinct_slaves, OfferFilter, TaskLauncher};
use sched_types::{Event, Offer, TaskDescriptor, TaskState};

async fn still_pending<T>(handle: tokio::task::JoinHandle<T>) {
    let result = tokio::time::timeout(Duration::from_millis(100), handle).await;
    assert!(result.is_err(), "submit_tasks should still be waiting for a usable batch");
}

#[tokio::test]
async fn non_matching_offer_is_declined_and_submit_stays_pending() {
    let mut driver = driver_that_starts();
    driver.expect_decline_offer().times(1).returning(|_| Ok(()));
    let bus = EventBus::<Event>::new(16);
    let session = connected_session(driver, &bus).await;
    let launcher = Arc::new(TaskLauncher::new(session, bus.clone()));

    let handle = tokio::spawn({
        let launcher = Arc::clone(&launcher);
        async move { launcher.submit_tasks(vec![task_descriptor("t1", "RESOURCE_A")], None).await }
    });
    tokio::task::yield_now().await;
    bus.send(Event::Offer {
        offers: vec![offer("X", "s1", "RESOURCE_X")],
    })
    .unwrap();

    still_pending(handle).await;
}

#[tokio::test]
async fn matching_offer_across_the_full_stack_resolves_to_a_launched_task() {
    let mut driver = driver_that_starts();
    let bus = EventBus::<Event>::new(16);
    let bus_for_closure = bus.clone();
    driver.expect_launch_tasks().times(1).returning(move |_offer_ids, tasks| {
        let _ = bus_for_closure.send(Event::TaskEvent {
            task_id: tasks[0].task_id.clone(),
            state: TaskState::Running,
            status_message: None,
        });
        Ok(())
    });
    let session = connected_session(driver, &bus).await;
    let launcher = TaskLauncher::new(session, bus.clone());

    let handle = tokio::spawn(async move {
        launcher.submit_tasks(vec![task_descriptor("t1", "RESOURCE_A")], None).await
    });
    tokio::task::yield_now().await;
    bus.send(Event::Offer {
        offers: vec![offer("A", "s1", "RESOURCE_A")],
    })
    .unwrap();

    let tasks = handle.await.unwrap().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].name, "t1");
}

#[tokio::test]
async fn a_batch_with_one_bad_and_one_good_offer_declines_only_the_bad_one() {
    let mut driver = driver_that_starts();
    driver.expect_decline_offer().times(1).returning(|_| Ok(()));
    driver.expect_launch_tasks().times(1).returning(|_, _| Ok(()));
    let bus = EventBus::<Event>::new(16);
    let session = connected_session(driver, &bus).await;
    let launcher = Arc::new(TaskLauncher::new(session, bus.clone()));

    let handle = tokio::spawn({
        let launcher = Arc::clone(&launcher);
        async move { launcher.submit_tasks(vec![task_descriptor("t1", "RESOURCE_A")], None).await }
    });
    tokio::task::yield_now().await;
    bus.send(Event::Offer {
        offers: vec![offer("X", "s1", "RESOURCE_X"), offer("A", "s1", "RESOURCE_A")],
    })
    .unwrap();

    still_pending(handle).await;
}

#[tokio::test]
async fn distinct_slaves_filter_accepts_a_two_slave_batch_and_launches_both_tasks_in_order() {
    let mut driver = driver_that_starts();
    let bus = EventBus::<Event>::new(16);
    let bus_for_closure = bus.clone();
    driver.expect_launch_tasks().times(1).returning(move |_offer_ids, tasks| {
        for task in &tasks {
            let _ = bus_for_closure.send(Event::TaskEvent {
                task_id: task.task_id.clone(),
                state: TaskState::Running,
                status_message: None,
            });
        }
        Ok(())
    });
    let session = connected_session(driver, &bus).await;
    let launcher = TaskLauncher::new(session, bus.clone());

    let descriptors = vec![task_descriptor("a", "RESOURCE_A"), task_descriptor("b", "RESOURCE_B")];
    let filter: Arc<dyn OfferFilter> = Arc::new(distinct_slaves as fn(&[(Offer, TaskDescriptor)]) -> bool);

    let handle = tokio::spawn(async move { launcher.submit_tasks(descriptors, Some(filter)).await });
    tokio::task::yield_now().await;
    bus.send(Event::Offer {
        offers: vec![offer("o1", "s1", "RESOURCE_A"), offer("o2", "s2", "RESOURCE_B")],
    })
    .unwrap();

    let tasks = handle.await.unwrap().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].name, "a");
    assert_eq!(tasks[1].name, "b");
}

#[tokio::test]
async fn distinct_slaves_filter_rejects_a_same_slave_batch_and_declines_both_offers() {
    let mut driver = driver_that_starts();
    driver.expect_decline_offer().times(2).returning(|_| Ok(()));
    let bus = EventBus::<Event>::new(16);
    let session = connected_session(driver, &bus).await;
    let launcher = Arc::new(TaskLauncher::new(session, bus.clone()));

    let descriptors = vec![task_descriptor("a", "RESOURCE_A"), task_descriptor("b", "RESOURCE_B")];
    let filter: Arc<dyn OfferFilter> = Arc::new(distinct_slaves as fn(&[(Offer, TaskDescriptor)]) -> bool);

    let handle = tokio::spawn({
        let launcher = Arc::clone(&launcher);
        async move { launcher.submit_tasks(descriptors, Some(filter)).await }
    });
    tokio::task::yield_now().await;
    bus.send(Event::Offer {
        offers: vec![offer("o1", "s1", "RESOURCE_A"), offer("o2", "s1", "RESOURCE_B")],
    })
    .unwrap();

    still_pending(handle).await;
}

#[tokio::test]
async fn a_synchronous_launch_rejection_declines_the_attempted_offer_and_stays_pending() {
    let mut driver = driver_that_starts();
    driver
        .expect_launch_tasks()
        .times(1)
        .returning(|_, _| Err(sched_driver::Error::Rejected("no resources".into())));
    driver.expect_decline_offer().times(1).returning(|_| Ok(()));
    let bus = EventBus::<Event>::new(16);
    let session = connected_session(driver, &bus).await;
    let launcher = Arc::new(TaskLauncher::new(session, bus.clone()));

    let handle = tokio::spawn({
        let launcher = Arc::clone(&launcher);
        async move { launcher.submit_tasks(vec![task_descriptor("t1", "RESOURCE_A")], None).await }
    });
    tokio::task::yield_now().await;
    bus.send(Event::Offer {
        offers: vec![offer("A", "s1", "RESOURCE_A")],
    })
    .unwrap();

    still_pending(handle).await;
}

#[tokio::test]
async fn empty_descriptor_list_resolves_immediately() {
    let bus = EventBus::<Event>::new(16);
    let session = connected_session(driver_that_starts(), &bus).await;
    let launcher = TaskLauncher::new(session, bus);

    let tasks = launcher.submit_tasks(vec![], None).await.unwrap();
    assert!(tasks.is_empty());
}
