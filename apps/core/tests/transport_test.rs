use launchpad_core::config::Config;
use launchpad_core::contract::{
    AddClipboardRequest, CoreRequest, CoreResponse, DetectClipboardRequest, SearchRequest,
};
use launchpad_core::core_service::LauncherCore;
use launchpad_core::discovery::{BuiltInAppProvider, Indexer};
use launchpad_core::model::IndexedApp;
use launchpad_core::transport::{handle_json, handle_request, ErrorCode, TransportResponse};

fn initialized_core() -> LauncherCore {
    let core = LauncherCore::with_indexer(
        Config::default(),
        Indexer::with_providers(vec![Box::new(BuiltInAppProvider::from_apps(vec![
            IndexedApp::new("Notepad", "notepad.exe"),
        ]))]),
    );
    core.initialize();
    core
}

#[test]
fn search_request_round_trips_through_json() {
    let request = CoreRequest::Search(SearchRequest {
        query: "note".to_string(),
    });

    let encoded = serde_json::to_string(&request).unwrap();
    assert_eq!(encoded, r#"{"kind":"search","payload":{"query":"note"}}"#);
    let decoded: CoreRequest = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, request);
}

#[test]
fn request_handler_returns_ok_transport_response() {
    let core = initialized_core();

    let response = handle_request(
        &core,
        CoreRequest::Search(SearchRequest {
            query: "notepad".into(),
        }),
    );

    match response {
        TransportResponse::Ok {
            response: CoreResponse::Search(payload),
        } => {
            assert_eq!(payload.results.len(), 1);
            assert_eq!(payload.results[0].id, "app-Notepad");
        }
        other => panic!("expected search response, got {other:?}"),
    }
}

#[test]
fn clipboard_requests_flow_through_the_core() {
    let core = initialized_core();

    let detected = handle_request(
        &core,
        CoreRequest::DetectClipboardChange(DetectClipboardRequest {
            text: "from another app".into(),
        }),
    );
    let repeated = handle_request(
        &core,
        CoreRequest::DetectClipboardChange(DetectClipboardRequest {
            text: "from another app".into(),
        }),
    );
    handle_request(
        &core,
        CoreRequest::AddClipboard(AddClipboardRequest {
            content: "from the launcher".into(),
        }),
    );
    let snapshot = handle_request(&core, CoreRequest::ClipboardSnapshot);

    assert!(matches!(
        detected,
        TransportResponse::Ok {
            response: CoreResponse::DetectClipboardChange(ref r)
        } if r.item.is_some()
    ));
    assert!(matches!(
        repeated,
        TransportResponse::Ok {
            response: CoreResponse::DetectClipboardChange(ref r)
        } if r.item.is_none()
    ));
    match snapshot {
        TransportResponse::Ok {
            response: CoreResponse::ClipboardSnapshot(payload),
        } => {
            let contents: Vec<&str> = payload.items.iter().map(|i| i.content.as_str()).collect();
            assert_eq!(contents, vec!["from the launcher", "from another app"]);
        }
        other => panic!("expected snapshot response, got {other:?}"),
    }
}

#[test]
fn snapshot_request_needs_no_payload() {
    let core = initialized_core();
    let raw = handle_json(&core, r#"{"kind":"clipboard_snapshot"}"#);
    let parsed: TransportResponse = serde_json::from_str(&raw).unwrap();
    assert!(matches!(parsed, TransportResponse::Ok { .. }));
}

#[test]
fn json_handler_returns_invalid_json_error_code() {
    let core = initialized_core();

    let raw = handle_json(&core, "{not-json");
    let parsed: TransportResponse = serde_json::from_str(&raw).unwrap();

    match parsed {
        TransportResponse::Err { error } => assert_eq!(error.code, ErrorCode::InvalidJson),
        _ => panic!("expected invalid json error"),
    }
}

#[test]
fn json_handler_returns_invalid_request_for_blank_clipboard_add() {
    let core = initialized_core();
    let request = CoreRequest::AddClipboard(AddClipboardRequest {
        content: "   ".into(),
    });

    let raw = handle_json(&core, &serde_json::to_string(&request).unwrap());
    let parsed: TransportResponse = serde_json::from_str(&raw).unwrap();

    match parsed {
        TransportResponse::Err { error } => assert_eq!(error.code, ErrorCode::InvalidRequest),
        _ => panic!("expected invalid request error"),
    }
}

#[test]
fn ok_responses_carry_status_tag() {
    let core = initialized_core();
    let raw = handle_json(&core, r#"{"kind":"search","payload":{"query":""}}"#);
    assert!(raw.contains("\"status\":\"ok\""));
    assert!(raw.contains("\"results\":[]"));
}
