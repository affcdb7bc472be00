//! JSON frames exchanged with the browser over `/ws`.

use common::games::snake::{Direction, SessionSnapshot};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Start { player_name: String },
    Turn { direction: Direction },
    Restart,
    Stop,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Welcome {
        suggested_name: String,
        field_width: usize,
        field_height: usize,
        tick_interval_ms: u64,
    },
    State {
        snapshot: SessionSnapshot,
    },
    Error {
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_client_messages() {
        let start: ClientMessage =
            serde_json::from_str(r#"{"type":"start","player_name":"Ann"}"#).unwrap();
        assert_eq!(
            start,
            ClientMessage::Start {
                player_name: "Ann".to_string()
            }
        );

        let turn: ClientMessage =
            serde_json::from_str(r#"{"type":"turn","direction":"UP"}"#).unwrap();
        assert_eq!(turn, ClientMessage::Turn { direction: Direction::Up });

        let restart: ClientMessage = serde_json::from_str(r#"{"type":"restart"}"#).unwrap();
        assert_eq!(restart, ClientMessage::Restart);
    }

    #[test]
    fn test_unknown_direction_is_rejected() {
        let result =
            serde_json::from_str::<ClientMessage>(r#"{"type":"turn","direction":"NORTH"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_error_frame_shape() {
        let json = serde_json::to_value(ServerMessage::Error {
            message: "nope".to_string(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"type": "error", "message": "nope"}));
    }
}
