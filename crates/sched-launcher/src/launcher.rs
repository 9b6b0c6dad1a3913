use std::sync::Arc;

use event_bus::EventBus;
use sched_session::Session;
use sched_types::{Event, Offer, OfferId, TaskDescriptor, TaskInfo};
use uuid::Uuid;

use crate::error::LauncherError;
use crate::filter::OfferFilter;
use crate::matcher::{match_offers, Assignment};

/// Consumes the offer stream, greedily matches incoming offers against a set of task
/// descriptors, and drives the session manager's `launch`/`decline` calls until every
/// descriptor has a launched task.
pub struct TaskLauncher {
    session: Arc<Session>,
    bus: EventBus<Event>,
}

impl TaskLauncher {
    pub fn new(session: Arc<Session>, bus: EventBus<Event>) -> Self {
        Self { session, bus }
    }

    /// Resolves once every descriptor in `descriptors` has a corresponding launched task, in
    /// input order. `filter` rejects an otherwise-acceptable assignment (e.g. to enforce
    /// distinct slaves); `None` accepts any full assignment.
    pub async fn submit_tasks(
        &self,
        descriptors: Vec<TaskDescriptor>,
        filter: Option<Arc<dyn OfferFilter>>,
    ) -> Result<Vec<TaskInfo>, LauncherError> {
        if descriptors.is_empty() {
            return Ok(Vec::new());
        }

        let mut rx = self.bus.subscribe();

        loop {
            let event = rx.recv_where(None, |event| matches!(event, Event::Offer { .. })).await?;
            let Event::Offer { offers } = event else {
                unreachable!("recv_where only returns events matching the predicate above")
            };

            if offers.is_empty() {
                continue;
            }

            tracing::trace!(count = offers.len(), "received offer batch");

            if let Some(tasks) = self.try_batch(&descriptors, offers, filter.as_deref()).await? {
                return Ok(tasks);
            }
        }
    }

    /// Attempts to satisfy every descriptor from a single offer batch. Returns `Ok(Some(_))`
    /// once all descriptors are launched; `Ok(None)` if this batch could not be used (no full
    /// match, the filter rejected it, or the driver rejected the launch), in which case every
    /// offer from the batch has already been declined and the caller should wait for another.
    async fn try_batch(
        &self,
        descriptors: &[TaskDescriptor],
        offers: Vec<Offer>,
        filter: Option<&dyn OfferFilter>,
    ) -> Result<Option<Vec<TaskInfo>>, LauncherError> {
        let Some(assignment) = match_offers(descriptors, &offers) else {
            tracing::debug!("batch does not cover every descriptor, declining all offers");
            self.decline_all(offers).await;
            return Ok(None);
        };

        if let Some(filter) = filter {
            if !filter.accept(&assignment) {
                tracing::debug!("filter rejected the proposed assignment, declining all offers");
                self.decline_all(offers).await;
                return Ok(None);
            }
        }

        self.accept_assignment(assignment, offers).await
    }

    async fn accept_assignment(
        &self,
        assignment: Assignment,
        batch: Vec<Offer>,
    ) -> Result<Option<Vec<TaskInfo>>, LauncherError> {
        let assigned_ids: Vec<OfferId> = assignment.iter().map(|(offer, _)| offer.offer_id.clone()).collect();
        let tasks: Vec<TaskInfo> = assignment
            .iter()
            .map(|(offer, descriptor)| build_task_info(offer, descriptor))
            .collect();

        let unmatched: Vec<Offer> = batch
            .into_iter()
            .filter(|offer| !assigned_ids.contains(&offer.offer_id))
            .collect();
        self.decline_all(unmatched).await;

        match self.session.launch(assigned_ids, tasks).await {
            Ok(per_task) => {
                let mut resolved = Vec::with_capacity(per_task.len());
                for result in per_task {
                    resolved.push(result?);
                }
                Ok(Some(resolved))
            }
            Err(err) => {
                tracing::warn!(error = %err, "launch rejected synchronously, declining attempted offers");
                let matched = assignment.into_iter().map(|(offer, _)| offer);
                self.decline_all(matched).await;
                Ok(None)
            }
        }
    }

    async fn decline_all(&self, offers: impl IntoIterator<Item = Offer>) {
        for offer in offers {
            if let Err(err) = self.session.decline(offer.offer_id.clone()).await {
                tracing::error!(offer_id = %offer.offer_id, error = %err, "failed to decline offer");
            }
        }
    }
}

fn build_task_info(offer: &Offer, descriptor: &TaskDescriptor) -> TaskInfo {
    TaskInfo {
        name: descriptor.name.clone(),
        task_id: Uuid::new_v4().to_string().into(),
        slave_id: offer.slave_id.clone(),
        resources: descriptor.resources.clone(),
        spec: descriptor.spec.clone(),
    }
}
