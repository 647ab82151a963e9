use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use sherwood_contracts::messaging::ContextKind;
use sherwood_model::ActivationState;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, warn};

/// One activation change as seen by listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusFrame {
    pub sequence: u64,
    pub state: ActivationState,
}

/// A listener's reply to a [`StatusFrame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryAck {
    pub sequence: u64,
    pub context: ContextKind,
    pub success: bool,
}

/// Running totals of acknowledgments received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeliveryStats {
    pub published: u64,
    pub acknowledged: u64,
    pub rejected: u64,
}

#[derive(Debug)]
struct AckLedger {
    tx: broadcast::Sender<DeliveryAck>,
    acknowledged: AtomicU64,
    rejected: AtomicU64,
}

impl AckLedger {
    fn record(&self, ack: DeliveryAck) {
        if ack.success {
            self.acknowledged.fetch_add(1, Ordering::Relaxed);
        } else {
            self.rejected.fetch_add(1, Ordering::Relaxed);
        }
        let _ = self.tx.send(ack);
    }
}

/// In-process fan-out of activation changes to every listening context.
///
/// Delivery is at-most-once and never blocks the publisher: a listener that
/// falls more than `capacity` frames behind loses the oldest frames and is
/// expected to resynchronize by querying the broker. Acknowledgments are
/// tallied and re-broadcast for observers, but nothing waits on them.
pub struct StatusBus {
    tx: broadcast::Sender<StatusFrame>,
    ledger: Arc<AckLedger>,
    sequence: AtomicU64,
    capacity: usize,
}

impl fmt::Debug for StatusBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatusBus")
            .field("capacity", &self.capacity)
            .field("subscribers", &self.tx.receiver_count())
            .field("sequence", &self.sequence.load(Ordering::Relaxed))
            .finish()
    }
}

impl StatusBus {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, _) = broadcast::channel(capacity);
        let (ack_tx, _) = broadcast::channel(capacity);
        Self {
            tx,
            ledger: Arc::new(AckLedger {
                tx: ack_tx,
                acknowledged: AtomicU64::new(0),
                rejected: AtomicU64::new(0),
            }),
            sequence: AtomicU64::new(0),
            capacity,
        }
    }

    pub fn publish(&self, state: ActivationState) -> StatusFrame {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let frame = StatusFrame { sequence, state };
        match self.tx.send(frame) {
            Ok(receivers) => {
                debug!(sequence, %state, receivers, "status change broadcast");
            }
            Err(_) => {
                debug!(sequence, %state, "status change had no listeners");
            }
        }
        frame
    }

    pub fn subscribe(&self, context: ContextKind) -> StatusSubscription {
        StatusSubscription {
            context,
            rx: self.tx.subscribe(),
            ledger: Arc::clone(&self.ledger),
        }
    }

    /// Stream of acknowledgments sent after this call.
    pub fn subscribe_acks(&self) -> broadcast::Receiver<DeliveryAck> {
        self.ledger.tx.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub fn stats(&self) -> DeliveryStats {
        DeliveryStats {
            published: self.sequence.load(Ordering::Relaxed),
            acknowledged: self.ledger.acknowledged.load(Ordering::Relaxed),
            rejected: self.ledger.rejected.load(Ordering::Relaxed),
        }
    }
}

impl Default for StatusBus {
    fn default() -> Self {
        Self::new(DEFAULT_STATUS_CHANNEL_CAPACITY)
    }
}

pub const DEFAULT_STATUS_CHANNEL_CAPACITY: usize = 16;

/// A context's receiving end of the [`StatusBus`].
pub struct StatusSubscription {
    context: ContextKind,
    rx: broadcast::Receiver<StatusFrame>,
    ledger: Arc<AckLedger>,
}

impl fmt::Debug for StatusSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatusSubscription")
            .field("context", &self.context)
            .field("pending", &self.rx.len())
            .finish()
    }
}

impl StatusSubscription {
    pub fn context(&self) -> ContextKind {
        self.context
    }

    /// Next frame, skipping over any this listener lagged past. `None` once
    /// the bus is gone.
    pub async fn recv(&mut self) -> Option<StatusFrame> {
        loop {
            match self.rx.recv().await {
                Ok(frame) => return Some(frame),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(
                        context = self.context.as_str(),
                        skipped,
                        "status listener lagged; frames dropped"
                    );
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    pub fn ack(&self, frame: &StatusFrame, success: bool) {
        self.ledger.record(DeliveryAck {
            sequence: frame.sequence,
            context: self.context,
            success,
        });
    }
}
