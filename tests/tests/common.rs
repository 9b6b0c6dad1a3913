use std::sync::Arc;

use event_bus::EventBus;
use sched_driver::MockDriver;
use sched_session::{Session, Timeouts};
use sched_types::{
    CommandSpec, DriverStatus, Event, FrameworkId, MasterId, MasterInfo, Offer, OfferId, Resource,
    SlaveId, TaskDescriptor, TaskSpec,
};

pub fn short_timeouts() -> Timeouts {
    Timeouts {
        connect: std::time::Duration::from_millis(300),
        launch: std::time::Duration::from_millis(300),
        kill: std::time::Duration::from_millis(300),
    }
}

pub fn task_descriptor(name: &str, resource: &str) -> TaskDescriptor {
    TaskDescriptor {
        name: name.into(),
        resources: vec![Resource::scalar(resource, 1.0)],
        spec: TaskSpec::Command(CommandSpec {
            value: "/bin/true".into(),
            args: vec![],
        }),
    }
}

pub fn offer(id: &str, slave: &str, resource: &str) -> Offer {
    Offer {
        offer_id: OfferId::new(id),
        framework_id: FrameworkId::new("fw-1"),
        slave_id: SlaveId::new(slave),
        host: "host".into(),
        executor_id: None,
        resources: vec![Resource::scalar(resource, 1.0)],
    }
}

/// Brings a session up to `Connected` against a driver whose `start` has already been
/// configured by the caller. Drives the connect handshake through a spawned task so the
/// caller's own event bus can publish the `Registered` event that resolves it.
pub async fn connected_session(driver: MockDriver, bus: &EventBus<Event>) -> Arc<Session> {
    let session = Session::new(Arc::new(driver), bus.clone(), short_timeouts());

    let handle = tokio::spawn({
        let session = Arc::clone(&session);
        async move { session.connect().await }
    });
    tokio::task::yield_now().await;
    bus.send(Event::Registered {
        framework_id: FrameworkId::new("fw-1"),
        master_info: MasterInfo {
            master_id: MasterId::new("m-1"),
            host: "master".into(),
            port: 5050,
        },
    })
    .unwrap();
    handle.await.unwrap().unwrap();
    session
}

pub fn driver_that_starts() -> MockDriver {
    let mut driver = MockDriver::new();
    driver.expect_start().returning(|| Ok(DriverStatus::Running));
    driver
}
