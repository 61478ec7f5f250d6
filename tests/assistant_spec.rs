use std::sync::{Arc, Mutex};

use air_onboard::assistant::{
    estimate_tokens, mock_policy_answer, Assistant, ChatBackend, ClaudeClient, ClaudeError,
    FALLBACK_ANSWER, NO_MATCH_ANSWER,
};
use air_onboard::store::Store;
use axum::{extract::State, http::HeaderMap, http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};

fn store() -> Store {
    Store::builtin().expect("Failed to load built-in dataset")
}

/// Requests seen by the fake upstream: headers and JSON body.
type Seen = Arc<Mutex<Vec<(HeaderMap, Value)>>>;

/// Serve a fixed Messages API reply on 127.0.0.1 and return its base URL.
async fn spawn_upstream(status: StatusCode, reply: Value) -> (String, Seen) {
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route(
            "/v1/messages",
            post(
                move |State(seen): State<Seen>, headers: HeaderMap, Json(body): Json<Value>| {
                    let reply = reply.clone();
                    async move {
                        seen.lock().unwrap().push((headers, body));
                        (status, Json(reply))
                    }
                },
            ),
        )
        .with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), seen)
}

mod mock_answers {
    use super::*;

    #[test]
    fn engineers_get_the_remote_work_paragraph() {
        let answer = mock_policy_answer(&store(), "What's the remote work policy?", "software-engineer");

        assert!(answer.answer.starts_with("Great question! As a Software Engineer at Airbnb"));
        assert_eq!(answer.citations, vec!["remote-work-policy"]);
        assert_eq!(answer.tokens_used, estimate_tokens(&answer.answer));
        assert_eq!(answer.data_sources_queried, vec!["policies.json", "roles.json"]);
    }

    #[test]
    fn product_managers_get_their_own_remote_paragraph() {
        let answer = mock_policy_answer(&store(), "Can I wfh?", "product-manager");
        assert!(answer.answer.starts_with("As a Product Manager, you also have full remote flexibility!"));
    }

    #[test]
    fn other_roles_get_the_first_section_for_remote_questions() {
        let store = store();
        let answer = mock_policy_answer(&store, "What's the remote work policy?", "hr-coordinator");
        let first = &store.get_policy_sections_for_role("remote-work-policy", Some("hr-coordinator"))[0];

        assert_eq!(
            answer.answer,
            format!("Based on Airbnb's remote work policy:\n\n{}", first.content)
        );
    }

    #[test]
    fn conference_budget_is_for_engineers_only() {
        let store = store();
        let engineer = mock_policy_answer(&store, "How do I expense a conference?", "software-engineer");
        assert!(engineer.answer.starts_with("Good news! Engineers have an annual conference budget"));

        let pm = mock_policy_answer(&store, "How do I expense a conference?", "product-manager");
        assert!(pm.answer.starts_with("Here's Airbnb's expense reimbursement policy"));
        assert_eq!(pm.citations, vec!["expense-policy"]);
    }

    #[test]
    fn pto_and_benefits_are_the_same_for_everyone() {
        let store = store();
        let pto = mock_policy_answer(&store, "How do I request PTO?", "hr-coordinator");
        assert!(pto.answer.starts_with("Airbnb has a flexible PTO policy"));

        let benefits = mock_policy_answer(&store, "What benefits does Airbnb offer?", "product-manager");
        assert!(benefits.answer.starts_with("Airbnb offers comprehensive benefits!"));
        assert_eq!(benefits.citations, vec!["benefits-overview"]);
    }

    #[test]
    fn security_answers_depend_on_role() {
        let store = store();
        let engineer = mock_policy_answer(&store, "What security training do I need to complete?", "software-engineer");
        assert!(engineer.answer.starts_with("Security is critical at Airbnb!"));

        let hr = mock_policy_answer(&store, "What security training do I need to complete?", "hr-coordinator");
        assert!(hr
            .answer
            .starts_with("Here's what you need to know about security and data handling:\n\n"));
    }

    #[test]
    fn unmatched_topics_quote_the_policy_by_name() {
        let store = store();
        let answer = mock_policy_answer(&store, "How do I report a sick day?", "software-engineer");
        let policy = store.get_policy("pto-policy").unwrap();

        assert_eq!(
            answer.answer,
            format!("Based on Airbnb's {}:\n\n{}", policy.name, policy.sections[0].content)
        );
    }

    #[test]
    fn unknown_questions_get_the_fixed_fallback() {
        let answer = mock_policy_answer(&store(), "xyz completely unrelated gibberish", "software-engineer");

        assert_eq!(answer.answer, NO_MATCH_ANSWER);
        assert!(answer.citations.is_empty());
        assert_eq!(answer.tokens_used, 150);
        assert_eq!(answer.data_sources_queried, vec!["policies.json"]);
    }

    #[tokio::test]
    async fn assistant_wraps_mock_answers() {
        let assistant = Assistant::mock(store());
        assert_eq!(assistant.backend().name(), "mock");

        let response = assistant
            .answer("What's the PTO policy?", "software-engineer")
            .await
            .unwrap();
        assert_eq!(response.citations, vec!["pto-policy"]);
        assert!(response.tokens_used > 0);
    }
}

mod claude_relay {
    use super::*;

    #[tokio::test]
    async fn sends_the_prompt_and_returns_the_first_text_block() {
        let (base_url, seen) = spawn_upstream(
            StatusCode::OK,
            json!({
                "content": [
                    { "type": "tool_use", "id": "t1", "name": "lookup", "input": {} },
                    { "type": "text", "text": "You can work remotely." },
                    { "type": "text", "text": "Ignored." }
                ],
                "usage": { "input_tokens": 40, "output_tokens": 12 }
            }),
        )
        .await;

        let client = ClaudeClient::new(base_url, "sk-test").with_max_tokens(256);
        let response = client
            .ask("What's the remote work policy?", "software-engineer")
            .await
            .unwrap();

        assert_eq!(response.answer, "You can work remotely.");
        assert!(response.citations.is_empty());
        assert_eq!(response.tokens_used, 52);

        let seen = seen.lock().unwrap();
        let (headers, body) = &seen[0];
        assert_eq!(headers["x-api-key"], "sk-test");
        assert_eq!(headers["anthropic-version"], "2023-06-01");
        assert_eq!(body["model"], "claude-sonnet-4-20250514");
        assert_eq!(body["max_tokens"], 256);
        assert_eq!(body["messages"][0]["role"], "user");
        let content = body["messages"][0]["content"].as_str().unwrap();
        assert!(content.contains("The user is in the role: software-engineer."));
        assert!(content.contains("User question: What's the remote work policy?"));
    }

    #[tokio::test]
    async fn falls_back_when_no_text_block_is_returned() {
        let (base_url, _) = spawn_upstream(
            StatusCode::OK,
            json!({ "content": [], "usage": { "input_tokens": 5, "output_tokens": 0 } }),
        )
        .await;

        let response = ClaudeClient::new(base_url, "sk-test")
            .ask("Hello?", "product-manager")
            .await
            .unwrap();
        assert_eq!(response.answer, FALLBACK_ANSWER);
        assert_eq!(response.tokens_used, 5);
    }

    #[tokio::test]
    async fn maps_upstream_statuses_to_errors() {
        let (base_url, _) =
            spawn_upstream(StatusCode::UNAUTHORIZED, json!({ "error": "bad key" })).await;
        let err = ClaudeClient::new(base_url, "wrong").ask("Hi", "software-engineer").await;
        assert!(matches!(err, Err(ClaudeError::Unauthorized)));

        let (base_url, _) =
            spawn_upstream(StatusCode::SERVICE_UNAVAILABLE, json!({ "error": "overloaded" })).await;
        let err = ClaudeClient::new(base_url, "sk-test").ask("Hi", "software-engineer").await;
        match err {
            Err(ClaudeError::Upstream { status, body }) => {
                assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
                assert!(body.contains("overloaded"));
            }
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn rejects_undecodable_bodies() {
        let (base_url, _) = spawn_upstream(StatusCode::OK, json!({ "unexpected": true })).await;
        let err = ClaudeClient::new(base_url, "sk-test").ask("Hi", "software-engineer").await;
        assert!(matches!(err, Err(ClaudeError::Http(_))));
    }

    #[tokio::test]
    async fn unreachable_upstream_is_an_http_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let assistant = Assistant::new(
            store(),
            ChatBackend::Claude(ClaudeClient::new(format!("http://{}", addr), "sk-test")),
        );
        let err = assistant.answer("Hi", "software-engineer").await;
        assert!(matches!(err, Err(ClaudeError::Http(_))));
    }
}
