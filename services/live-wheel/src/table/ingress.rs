use futures::{
    channel::{mpsc, oneshot},
    SinkExt,
};
use spinpot_types::{BetReceipt, DisplayState, WheelError};
use thiserror::Error;
use tracing::warn;

use super::TickOutcome;

pub enum Message {
    PlaceBet {
        identity: String,
        gross: f64,
        response: oneshot::Sender<Result<BetReceipt, WheelError>>,
    },
    Credit {
        identity: String,
        net: f64,
        response: oneshot::Sender<Result<f64, WheelError>>,
    },
    Tick {
        response: Option<oneshot::Sender<TickOutcome>>,
    },
    Display {
        response: oneshot::Sender<DisplayState>,
    },
    NextRound {
        response: oneshot::Sender<Result<u64, WheelError>>,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    #[error(transparent)]
    Round(#[from] WheelError),
    #[error("table actor stopped")]
    Closed,
}

/// Handle to the table actor. Every request is queued behind earlier ones, so bets and
/// ticks are applied one at a time in arrival order.
#[derive(Clone)]
pub struct Mailbox {
    sender: mpsc::Sender<Message>,
}

impl Mailbox {
    pub(super) fn new(sender: mpsc::Sender<Message>) -> Self {
        Self { sender }
    }

    pub async fn place_bet(&mut self, identity: &str, gross: f64) -> Result<BetReceipt, TableError> {
        let (response, receiver) = oneshot::channel();
        self.request(Message::PlaceBet {
            identity: identity.to_string(),
            gross,
            response,
        })
        .await?;
        Ok(receiver.await.map_err(|_| TableError::Closed)??)
    }

    pub async fn credit(&mut self, identity: &str, net: f64) -> Result<f64, TableError> {
        let (response, receiver) = oneshot::channel();
        self.request(Message::Credit {
            identity: identity.to_string(),
            net,
            response,
        })
        .await?;
        Ok(receiver.await.map_err(|_| TableError::Closed)??)
    }

    pub async fn tick(&mut self) -> Result<TickOutcome, TableError> {
        let (response, receiver) = oneshot::channel();
        self.request(Message::Tick {
            response: Some(response),
        })
        .await?;
        receiver.await.map_err(|_| TableError::Closed)
    }

    /// Fire-and-forget tick. Returns false once the actor is gone.
    pub async fn send_tick(&mut self) -> bool {
        if self.sender.send(Message::Tick { response: None }).await.is_err() {
            warn!("table mailbox closed; tick dropped");
            return false;
        }
        true
    }

    pub async fn display_state(&mut self) -> Result<DisplayState, TableError> {
        let (response, receiver) = oneshot::channel();
        self.request(Message::Display { response }).await?;
        receiver.await.map_err(|_| TableError::Closed)
    }

    pub async fn next_round(&mut self) -> Result<u64, TableError> {
        let (response, receiver) = oneshot::channel();
        self.request(Message::NextRound { response }).await?;
        Ok(receiver.await.map_err(|_| TableError::Closed)??)
    }

    async fn request(&mut self, message: Message) -> Result<(), TableError> {
        self.sender.send(message).await.map_err(|_| {
            warn!("table mailbox closed; request dropped");
            TableError::Closed
        })
    }
}
