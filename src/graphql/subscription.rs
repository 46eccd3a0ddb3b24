//! GraphQL Subscriptions
//!
//! `graphql-transport-ws` over a browser `WebSocket`. The message exchange is
//! kept in [`SubscriptionProtocol`], which maps each frame to a reply and an event; [`Subscription`]
//! only wires it to socket callbacks.

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CloseEvent, Event, MessageEvent, WebSocket};

use super::{GraphqlError, GraphqlErrorEntry, GraphqlResponse};
use crate::config::ClientConfig;

/// Websocket sub-protocol name
pub const PROTOCOL: &str = "graphql-transport-ws";

const SUBSCRIPTION_ID: &str = "1";

// ========================
// Wire messages
// ========================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    ConnectionInit {
        #[serde(skip_serializing_if = "Option::is_none")]
        payload: Option<Value>,
    },
    Subscribe {
        id: String,
        payload: SubscribePayload,
    },
    Pong {},
    Complete {
        id: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribePayload {
    pub query: String,
    pub operation_name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    ConnectionAck {},
    Next {
        id: String,
        payload: Value,
    },
    Error {
        id: String,
        #[serde(default)]
        payload: Vec<GraphqlErrorEntry>,
    },
    Complete {
        id: String,
    },
    Ping {},
    Pong {},
    #[serde(other)]
    Unknown,
}

/// What a subscriber is told
#[derive(Debug)]
pub enum SubscriptionEvent<T> {
    Data(T),
    Error(GraphqlError),
}

/// Outcome of handling one server frame
#[derive(Debug)]
pub struct Step<T> {
    pub reply: Option<ClientMessage>,
    pub event: Option<SubscriptionEvent<T>>,
}

impl<T> Step<T> {
    fn quiet() -> Self {
        Self { reply: None, event: None }
    }

    fn reply(message: ClientMessage) -> Self {
        Self { reply: Some(message), event: None }
    }

    fn event(event: SubscriptionEvent<T>) -> Self {
        Self { reply: None, event: Some(event) }
    }
}

// ========================
// Protocol state machine
// ========================

#[derive(Debug, Clone)]
pub struct SubscriptionProtocol {
    operation_name: &'static str,
    document: &'static str,
    authorization: Option<String>,
}

impl SubscriptionProtocol {
    pub fn new(operation_name: &'static str, document: &'static str, authorization: Option<String>) -> Self {
        Self { operation_name, document, authorization }
    }

    /// First frame after the socket opens
    pub fn connection_init(&self) -> ClientMessage {
        let payload = self
            .authorization
            .as_ref()
            .map(|auth| serde_json::json!({ "headers": { "Authorization": auth } }));
        ClientMessage::ConnectionInit { payload }
    }

    pub fn complete(&self) -> ClientMessage {
        ClientMessage::Complete { id: SUBSCRIPTION_ID.to_string() }
    }

    pub fn handle<T: DeserializeOwned>(&self, frame: &str) -> Step<T> {
        let message: ServerMessage = match serde_json::from_str(frame) {
            Ok(message) => message,
            Err(e) => return Step::event(SubscriptionEvent::Error(e.into())),
        };

        match message {
            ServerMessage::ConnectionAck {} => {
                Step::reply(ClientMessage::Subscribe {
                    id: SUBSCRIPTION_ID.to_string(),
                    payload: SubscribePayload {
                        query: self.document.to_string(),
                        operation_name: self.operation_name.to_string(),
                    },
                })
            }
            ServerMessage::Next { id, payload } if id == SUBSCRIPTION_ID => {
                let result = serde_json::from_value::<GraphqlResponse<T>>(payload)
                    .map_err(GraphqlError::from)
                    .and_then(|response| response.into_fetched())
                    .and_then(|fetched| fetched.into_complete());
                Step::event(match result {
                    Ok(data) => SubscriptionEvent::Data(data),
                    Err(e) => SubscriptionEvent::Error(e),
                })
            }
            ServerMessage::Error { id, payload } if id == SUBSCRIPTION_ID => {
                let message = payload.into_iter().map(|e| e.message).collect::<Vec<_>>().join("; ");
                Step::event(SubscriptionEvent::Error(GraphqlError::Graphql(message)))
            }
            ServerMessage::Ping {} => Step::reply(ClientMessage::Pong {}),
            ServerMessage::Complete { id } => {
                tracing::debug!(id = %id, "subscription completed by server");
                Step::quiet()
            }
            other => {
                tracing::debug!(?other, "ignoring subscription frame");
                Step::quiet()
            }
        }
    }
}

// ========================
// Browser driver
// ========================

/// A live subscription. Dropping it detaches the callbacks and closes the socket.
pub struct Subscription {
    socket: WebSocket,
    complete: String,
    _on_open: Closure<dyn FnMut(Event)>,
    _on_message: Closure<dyn FnMut(MessageEvent)>,
    _on_error: Closure<dyn FnMut(Event)>,
    _on_close: Closure<dyn FnMut(CloseEvent)>,
}

fn js_error(value: JsValue) -> GraphqlError {
    GraphqlError::Socket(format!("{:?}", value))
}

fn send(socket: &WebSocket, message: &ClientMessage) {
    let result = serde_json::to_string(message)
        .map_err(GraphqlError::from)
        .and_then(|text| socket.send_with_str(&text).map_err(js_error));
    if let Err(e) = result {
        tracing::warn!(error = %e, "failed to send subscription frame");
    }
}

impl Subscription {
    pub fn start<T, F>(config: &ClientConfig, operation_name: &'static str, document: &'static str, on_event: F) -> Result<Self, GraphqlError>
    where
        T: DeserializeOwned + 'static,
        F: Fn(SubscriptionEvent<T>) + 'static,
    {
        let socket = WebSocket::new_with_str(&config.ws_endpoint, PROTOCOL).map_err(js_error)?;
        let protocol = SubscriptionProtocol::new(operation_name, document, config.authorization());
        let init = protocol.connection_init();
        let complete = serde_json::to_string(&protocol.complete())?;
        let on_event = Rc::new(on_event);

        let on_open = {
            let socket = socket.clone();
            Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                tracing::debug!(operation = operation_name, "subscription socket open");
                send(&socket, &init);
            })
        };

        let on_message = {
            let socket = socket.clone();
            let on_event = Rc::clone(&on_event);
            Closure::<dyn FnMut(MessageEvent)>::new(move |ev: MessageEvent| {
                let Some(frame) = ev.data().as_string() else {
                    tracing::warn!("ignoring non-text subscription frame");
                    return;
                };
                let step = protocol.handle::<T>(&frame);
                if let Some(reply) = step.reply {
                    send(&socket, &reply);
                }
                if let Some(event) = step.event {
                    on_event(event);
                }
            })
        };

        let on_error = {
            let on_event = Rc::clone(&on_event);
            Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                on_event(SubscriptionEvent::Error(GraphqlError::Socket("connection error".to_string())));
            })
        };

        let on_close = {
            let on_event = Rc::clone(&on_event);
            Closure::<dyn FnMut(CloseEvent)>::new(move |ev: CloseEvent| {
                let reason = format!("closed with code {} {}", ev.code(), ev.reason());
                on_event(SubscriptionEvent::Error(GraphqlError::Socket(reason.trim_end().to_string())));
            })
        };

        socket.set_onopen(Some(on_open.as_ref().unchecked_ref()));
        socket.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
        socket.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        socket.set_onclose(Some(on_close.as_ref().unchecked_ref()));

        Ok(Self {
            socket,
            complete,
            _on_open: on_open,
            _on_message: on_message,
            _on_error: on_error,
            _on_close: on_close,
        })
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.socket.set_onopen(None);
        self.socket.set_onmessage(None);
        self.socket.set_onerror(None);
        self.socket.set_onclose(None);
        if self.socket.ready_state() == WebSocket::OPEN {
            let _ = self.socket.send_with_str(&self.complete);
        }
        let _ = self.socket.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Latest {
        todos: Vec<i32>,
    }

    fn protocol(auth: Option<&str>) -> SubscriptionProtocol {
        SubscriptionProtocol::new("notifyNewPublicTodos", "subscription notifyNewPublicTodos { x }", auth.map(str::to_string))
    }

    #[test]
    fn test_connection_init_carries_token() {
        let init = serde_json::to_value(protocol(Some("Bearer t")).connection_init()).unwrap();
        assert_eq!(init, json!({ "type": "connection_init", "payload": { "headers": { "Authorization": "Bearer t" } } }));

        let init = serde_json::to_value(protocol(None).connection_init()).unwrap();
        assert_eq!(init, json!({ "type": "connection_init" }));
    }

    #[test]
    fn test_ack_triggers_subscribe() {
        let p = protocol(None);
        let step = p.handle::<Latest>(r#"{"type":"connection_ack"}"#);
        assert!(step.event.is_none());

        let reply = serde_json::to_value(step.reply.unwrap()).unwrap();
        assert_eq!(reply["type"], "subscribe");
        assert_eq!(reply["id"], "1");
        assert_eq!(reply["payload"]["operationName"], "notifyNewPublicTodos");
    }

    #[test]
    fn test_next_delivers_data() {
        let p = protocol(None);
        let frame = json!({ "type": "next", "id": "1", "payload": { "data": { "todos": [61] } } }).to_string();
        match p.handle::<Latest>(&frame).event {
            Some(SubscriptionEvent::Data(data)) => assert_eq!(data, Latest { todos: vec![61] }),
            other => panic!("expected data, got {:?}", other),
        }
    }

    #[test]
    fn test_next_with_errors_is_error() {
        let p = protocol(None);
        let frame = json!({ "type": "next", "id": "1", "payload": { "errors": [{ "message": "denied" }] } }).to_string();
        match p.handle::<Latest>(&frame).event {
            Some(SubscriptionEvent::Error(e)) => assert_eq!(e.to_string(), "denied"),
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_frame_and_ping() {
        let p = protocol(None);
        let step = p.handle::<Latest>(r#"{"type":"error","id":"1","payload":[{"message":"bad query"}]}"#);
        assert!(matches!(step.event, Some(SubscriptionEvent::Error(GraphqlError::Graphql(ref m))) if m == "bad query"));

        let step = p.handle::<Latest>(r#"{"type":"ping"}"#);
        assert_eq!(step.reply, Some(ClientMessage::Pong {}));
    }

    #[test]
    fn test_unknown_and_malformed_frames() {
        let p = protocol(None);
        let step = p.handle::<Latest>(r#"{"type":"ka"}"#);
        assert!(step.reply.is_none() && step.event.is_none());

        let step = p.handle::<Latest>("not json");
        assert!(matches!(step.event, Some(SubscriptionEvent::Error(GraphqlError::Decode(_)))));
    }

    #[test]
    fn test_pong_and_complete_encoding() {
        assert_eq!(serde_json::to_value(ClientMessage::Pong {}).unwrap(), json!({ "type": "pong" }));
        assert_eq!(serde_json::to_value(protocol(None).complete()).unwrap(), json!({ "type": "complete", "id": "1" }));
    }
}
