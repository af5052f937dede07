//! Chatbot WebSocket handler
//!
//! The UI's chat page connects to `/wb/chatbot` and expects one JSON reply
//! per question with the shape `{pergunta_original, match_intencao, answer}`.
//! The bot is an echo with a tiny keyword intent match; real answers are a
//! backend concern.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use serde::Serialize;

use crate::AppState;

/// Reply frame the chat UI renders
#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub pergunta_original: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_intencao: Option<String>,
    pub answer: String,
}

/// GET /wb/chatbot - Upgrade to the chatbot WebSocket
pub async fn chatbot_ws(State(_state): State<Arc<AppState>>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(handle_socket)
}

async fn handle_socket(mut socket: WebSocket) {
    tracing::debug!("Chatbot client connected");

    while let Some(Ok(message)) = socket.recv().await {
        let question = match message {
            Message::Text(text) => text,
            Message::Close(_) => break,
            // Ping/pong are handled by axum; ignore binary frames
            _ => continue,
        };

        let reply = answer(&question);
        let frame = match serde_json::to_string(&reply) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize chat reply");
                continue;
            }
        };

        if socket.send(Message::Text(frame)).await.is_err() {
            break;
        }
    }

    tracing::debug!("Chatbot client disconnected");
}

/// Build the reply for one question
fn answer(question: &str) -> ChatReply {
    let normalized = question.trim().to_lowercase();

    let (intent, answer) = if normalized.contains("ajuda") || normalized.contains("help") {
        (
            Some("ajuda"),
            "Posso responder sobre vendas, estoque e relatórios. Pergunte algo!".to_string(),
        )
    } else if normalized.contains("venda") {
        (
            Some("vendas"),
            "Os dados de vendas estão no painel principal, em Vendas.".to_string(),
        )
    } else if normalized.contains("estoque") {
        (
            Some("estoque"),
            "A posição de estoque atualizada está na aba Estoque.".to_string(),
        )
    } else {
        (None, format!("Você disse: {}", question.trim()))
    };

    ChatReply {
        pergunta_original: question.to_string(),
        match_intencao: intent.map(String::from),
        answer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmatched_question_is_echoed() {
        let reply = answer("  qual o sentido da vida?  ");
        assert!(reply.match_intencao.is_none());
        assert_eq!(reply.answer, "Você disse: qual o sentido da vida?");
    }

    #[test]
    fn test_intent_match_on_keywords() {
        let reply = answer("como estão as VENDAS deste mês?");
        assert_eq!(reply.match_intencao.as_deref(), Some("vendas"));

        let reply = answer("preciso de ajuda");
        assert_eq!(reply.match_intencao.as_deref(), Some("ajuda"));
    }

    #[test]
    fn test_reply_serializes_expected_shape() {
        let reply = answer("oi");
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["pergunta_original"], "oi");
        assert!(json.get("answer").is_some());
        // No intent matched: the field is omitted entirely
        assert!(json.get("match_intencao").is_none());
    }
}
