mod demo_driver;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use demo_driver::DemoDriver;
use event_bus::EventBus;
use sched_config::SchedulerConfig;
use sched_launcher::TaskLauncher;
use sched_session::Session;
use sched_types::{CommandSpec, Event, FrameworkId, Offer, OfferId, Resource, SlaveId, TaskDescriptor, TaskSpec};

#[derive(Parser)]
#[command(author, version, about = "Runs a couple of demo tasks against an in-process driver")]
struct Cli {
    /// Optional config file; falls back to built-in defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    let config = match cli.config {
        Some(path) => SchedulerConfig::from_path(path)?,
        None => SchedulerConfig::default(),
    };

    init_tracing(config.logger.level);

    let bus = EventBus::<Event>::new(config.event_channel_capacity);
    let driver = Arc::new(DemoDriver::new(bus.clone()));
    let session = Session::new(driver, bus.clone(), config.timeouts.into());

    let (framework_id, master_info) = session.connect().await?;
    tracing::info!(%framework_id, host = %master_info.host, "connected");

    tokio::spawn(offer_feed(bus.clone()));

    let launcher = TaskLauncher::new(Arc::clone(&session), bus);
    let descriptors = vec![
        TaskDescriptor {
            name: "hello-1".into(),
            resources: vec![Resource::scalar("cpus", 1.0)],
            spec: TaskSpec::Command(CommandSpec {
                value: "/bin/echo".into(),
                args: vec!["hello from task 1".into()],
            }),
        },
        TaskDescriptor {
            name: "hello-2".into(),
            resources: vec![Resource::scalar("cpus", 1.0)],
            spec: TaskSpec::Command(CommandSpec {
                value: "/bin/echo".into(),
                args: vec!["hello from task 2".into()],
            }),
        },
    ];

    let tasks = launcher.submit_tasks(descriptors, None).await?;
    for task in &tasks {
        tracing::info!(task_id = %task.task_id, name = %task.name, "task launched");
    }

    tokio::time::sleep(Duration::from_secs(1)).await;

    let status = session.disconnect().await?;
    tracing::info!(?status, "disconnected");

    Ok(())
}

/// Stands in for a real offer stream: publishes one fresh offer every tick, framed as the
/// driver would deserialize it off the wire.
async fn offer_feed(bus: EventBus<Event>) {
    let mut tick = tokio::time::interval(Duration::from_millis(200));
    let mut next_batch = 0u64;

    loop {
        tick.tick().await;
        next_batch += 1;

        let offers = vec![
            Offer {
                offer_id: OfferId::new(format!("offer-{next_batch}-a")),
                framework_id: FrameworkId::new("demo-framework"),
                slave_id: SlaveId::new("slave-1"),
                host: "slave-1.local".into(),
                executor_id: None,
                resources: vec![Resource::scalar("cpus", 2.0)],
            },
            Offer {
                offer_id: OfferId::new(format!("offer-{next_batch}-b")),
                framework_id: FrameworkId::new("demo-framework"),
                slave_id: SlaveId::new("slave-2"),
                host: "slave-2.local".into(),
                executor_id: None,
                resources: vec![Resource::scalar("cpus", 2.0)],
            },
        ];

        if bus.send(Event::Offer { offers }).is_err() {
            // no subscribers left means the demo is winding down.
            return;
        }
    }
}

fn init_tracing(level: tracing::Level) {
    tracing_subscriber::fmt().with_max_level(level).init();
}
