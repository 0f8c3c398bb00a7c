use linebot::line::events::EventSource;
use linebot::line::{InboundEvent, MessageContent, parse_webhook_body};

#[test]
fn test_parse_text_message_event() {
    let body = r#"{
        "destination": "xxxxxxxxxx",
        "events": [{
            "type": "message",
            "message": { "type": "text", "id": "14353798921116", "text": "Hello, world" },
            "timestamp": 1625665242211,
            "source": { "type": "user", "userId": "U80696558e1aa831..." },
            "replyToken": "757913772c4646b784d4b7ce46d12671",
            "mode": "active",
            "webhookEventId": "01FZ74A0TDDPYRVKNK77XKC3ZR",
            "deliveryContext": { "isRedelivery": false }
        }]
    }"#;

    let webhook = parse_webhook_body(body).unwrap();

    assert_eq!(webhook.destination.as_deref(), Some("xxxxxxxxxx"));
    assert_eq!(webhook.events.len(), 1);
    assert_eq!(
        webhook.events[0].text_message(),
        Some(("757913772c4646b784d4b7ce46d12671", "Hello, world"))
    );
    match &webhook.events[0] {
        InboundEvent::Message { source, message, .. } => {
            assert_eq!(
                source,
                &Some(EventSource::User {
                    user_id: Some("U80696558e1aa831...".to_string())
                })
            );
            assert!(matches!(message, MessageContent::Text { .. }));
        }
        other => panic!("Unexpected event: {other:?}"),
    }
}

#[test]
fn test_non_text_variants_have_no_reply_obligation() {
    let body = r#"{"events":[
        {"type":"message","replyToken":"A","message":{"type":"image","id":"1","contentProvider":{"type":"line"}}},
        {"type":"follow","replyToken":"B","source":{"type":"user","userId":"U1"}},
        {"type":"join","replyToken":"C","source":{"type":"group","groupId":"G1"}},
        {"type":"unfollow","source":{"type":"user","userId":"U1"}},
        {"type":"postback","replyToken":"D","postback":{"data":"x=1"}},
        {"type":"memberJoined","replyToken":"E"}
    ]}"#;

    let webhook = parse_webhook_body(body).unwrap();

    assert_eq!(webhook.events.len(), 6);
    assert!(webhook.events.iter().all(|e| e.text_message().is_none()));
    assert!(matches!(webhook.events[1], InboundEvent::Follow { .. }));
    assert!(matches!(webhook.events[2], InboundEvent::Join { .. }));
    assert_eq!(webhook.events[3], InboundEvent::Other);
    assert_eq!(webhook.events[4], InboundEvent::Other);
}

#[test]
fn test_text_message_without_reply_token_is_not_actionable() {
    // Standby-mode events arrive without a reply token
    let body = r#"{"events":[
        {"type":"message","mode":"standby","message":{"type":"text","id":"1","text":"hi"}}
    ]}"#;

    let webhook = parse_webhook_body(body).unwrap();
    assert_eq!(webhook.events[0].text_message(), None);
    assert_eq!(webhook.events[0].kind(), "message.text");
}

#[test]
fn test_unknown_source_type_still_decodes() {
    let body = r#"{"events":[
        {"type":"message","replyToken":"R","source":{"type":"space","spaceId":"S"},
         "message":{"type":"text","id":"1","text":"hi"}}
    ]}"#;

    let webhook = parse_webhook_body(body).unwrap();
    assert_eq!(webhook.events[0].text_message(), Some(("R", "hi")));
}

#[test]
fn test_filter_is_deterministic() {
    let body = r#"{"events":[{"type":"message","replyToken":"R","message":{"type":"text","id":"1","text":"x"}}]}"#;
    let webhook = parse_webhook_body(body).unwrap();
    let event = &webhook.events[0];

    let first = event.text_message();
    let second = event.text_message();
    assert_eq!(first, second);
}

#[test]
fn test_malformed_bodies_rejected() {
    assert!(parse_webhook_body("").is_err());
    assert!(parse_webhook_body("{}").is_err());
    assert!(parse_webhook_body(r#"{"events":{}}"#).is_err());
    assert!(parse_webhook_body(r#"{"events":[{"replyToken":"R"}]}"#).is_err());
}
