//! The live update channel.
//!
//! Dashboard clients hold a websocket open against `/live`. Whenever a webhook mutation lands, the
//! engine's [`ChangeHub`] broadcasts a [`DataChanged`] hint and every connected session forwards it
//! as a `data_updated` text frame. The frame carries no data on purpose: clients re-fetch the
//! metrics endpoints, so a dropped or coalesced hint costs one refresh, never correctness.
use std::time::{Duration, Instant};

use actix_web::{web, HttpRequest, HttpResponse};
use actix_ws::{Message, MessageStream, Session};
use log::*;
use pulse_engine::events::{ChangeHub, DataChanged};
use tokio::{sync::broadcast, time};

/// The text frame sent to clients after every applied change.
pub const DATA_UPDATED_EVENT: &str = "data_updated";

/// Time between heartbeat pings to the client.
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);
/// Max idle time before the client is considered gone and the session is dropped.
const CLIENT_TIMEOUT: Duration = Duration::from_secs(10);

/// Route handler for `GET /live`. Upgrades the connection and spawns a session task that relays
/// change hints until either side goes away.
pub async fn live_updates(
    req: HttpRequest,
    stream: web::Payload,
    hub: web::Data<ChangeHub>,
) -> Result<HttpResponse, actix_web::Error> {
    let (response, session, msg_stream) = actix_ws::handle(&req, stream)?;
    let rx = hub.subscribe();
    debug!("📡️ New live subscriber connected");
    actix_web::rt::spawn(live_session(session, msg_stream, rx));
    Ok(response)
}

async fn live_session(mut session: Session, mut stream: MessageStream, mut rx: broadcast::Receiver<DataChanged>) {
    let mut last_heartbeat = Instant::now();
    let mut heartbeat = time::interval(HEARTBEAT_INTERVAL);
    let reason = loop {
        tokio::select! {
            _ = heartbeat.tick() => {
                if Instant::now().duration_since(last_heartbeat) > CLIENT_TIMEOUT {
                    break "client stopped responding to pings";
                }
                if session.ping(b"").await.is_err() {
                    return;
                }
            },
            msg = stream.recv() => match msg {
                Some(Ok(Message::Ping(bytes))) => {
                    last_heartbeat = Instant::now();
                    if session.pong(&bytes).await.is_err() {
                        return;
                    }
                },
                Some(Ok(Message::Pong(_))) => {
                    last_heartbeat = Instant::now();
                },
                Some(Ok(Message::Close(_))) | None => {
                    debug!("📡️ Live subscriber disconnected");
                    return;
                },
                Some(Ok(_)) => {
                    // Inbound frames carry nothing useful; the channel is one-way.
                    last_heartbeat = Instant::now();
                },
                Some(Err(e)) => {
                    debug!("📡️ Live session protocol error. {e}");
                    return;
                },
            },
            changed = rx.recv() => match changed {
                Ok(DataChanged) => {
                    if session.text(DATA_UPDATED_EVENT).await.is_err() {
                        return;
                    }
                },
                // A lagged receiver missed some hints. One frame still prompts the refresh.
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    trace!("📡️ Live subscriber lagged by {missed} hints");
                    if session.text(DATA_UPDATED_EVENT).await.is_err() {
                        return;
                    }
                },
                Err(broadcast::error::RecvError::Closed) => break "change hub closed",
            },
        }
    };
    debug!("📡️ Closing live session: {reason}");
    let _ = session.close(None).await;
}
