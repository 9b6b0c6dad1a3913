use std::time::Duration;

use async_trait::async_trait;
use event_bus::EventBus;
use sched_driver::{Driver, Error};
use sched_types::{
    DriverStatus, Event, FrameworkId, MasterId, MasterInfo, OfferId, TaskId, TaskInfo, TaskState,
};

/// A stand-in for a real master connection: registers itself shortly after `start`, and
/// replays every launched task through Staging -> Running -> Finished so the demo has
/// something to watch. Never talks to the network; exists purely to give the CLI demo a
/// driver to drive.
pub struct DemoDriver {
    bus: EventBus<Event>,
}

impl DemoDriver {
    pub fn new(bus: EventBus<Event>) -> Self {
        Self { bus }
    }
}

#[async_trait]
impl Driver for DemoDriver {
    async fn start(&self) -> Result<DriverStatus, Error> {
        let bus = self.bus.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            let _ = bus.send(Event::Registered {
                framework_id: FrameworkId::new("demo-framework"),
                master_info: MasterInfo {
                    master_id: MasterId::new("demo-master"),
                    host: "localhost".into(),
                    port: 5050,
                },
            });
        });
        Ok(DriverStatus::Running)
    }

    async fn stop(&self, failover: bool) -> Result<(), Error> {
        tracing::debug!(failover, "demo driver stopping");
        Ok(())
    }

    async fn abort(&self) -> Result<(), Error> {
        Ok(())
    }

    async fn join(&self) -> Result<DriverStatus, Error> {
        Ok(DriverStatus::Stopped)
    }

    async fn launch_tasks(&self, _offer_ids: Vec<OfferId>, tasks: Vec<TaskInfo>) -> Result<(), Error> {
        let bus = self.bus.clone();
        tokio::spawn(async move {
            for task in tasks {
                publish(&bus, task.task_id.clone(), TaskState::Running);
                tokio::time::sleep(Duration::from_millis(300)).await;
                publish(&bus, task.task_id, TaskState::Finished);
            }
        });
        Ok(())
    }

    async fn decline_offer(&self, offer_id: OfferId) -> Result<(), Error> {
        tracing::debug!(offer_id = %offer_id, "demo driver declining offer");
        Ok(())
    }

    async fn kill_task(&self, task_id: TaskId) -> Result<(), Error> {
        publish(&self.bus, task_id, TaskState::Killed);
        Ok(())
    }
}

fn publish(bus: &EventBus<Event>, task_id: TaskId, state: TaskState) {
    let _ = bus.send(Event::TaskEvent {
        task_id,
        state,
        status_message: None,
    });
}
