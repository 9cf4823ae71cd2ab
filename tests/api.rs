//! End-to-end tests of the HTTP API against the in-memory store.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Arc;
use tower::ServiceExt;
use trivia_api::{app, seed_categories, AppState, MemoryStore, NewQuestion, Settings, TriviaStore};

const QUESTIONS: &[(&str, &str, i64)] = &[
    ("What is the heaviest organ in the human body?", "The liver", 1),
    ("Who discovered penicillin?", "Alexander Fleming", 1),
    ("Hematology is a branch of medicine involving the study of what?", "Blood", 1),
    ("Which Dutch graphic artist made mathematically inspired woodcuts?", "Escher", 2),
    ("La Giaconda is better known as what?", "Mona Lisa", 2),
    ("What is the largest lake in Africa?", "Lake Victoria", 3),
    ("The Taj Mahal is located in which Indian city?", "Agra", 3),
    ("Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?", "Maya Angelou", 4),
    ("Who invented Peanut Butter?", "George Washington Carver", 4),
    ("What movie earned Tom Hanks his third straight Oscar nomination, in 1996?", "Apollo 13", 5),
    ("Who won 1990?", "West Germany", 6),
    ("Which country won the first ever soccer World Cup in 1930?", "Uruguay", 6),
];

async fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    seed_categories(&*store).await.unwrap();
    for (question, answer, category) in QUESTIONS {
        store
            .insert_question(&NewQuestion {
                question: question.to_string(),
                answer: answer.to_string(),
                difficulty: 2,
                category: *category,
            })
            .await
            .unwrap();
    }
    store
}

fn router(store: Arc<MemoryStore>) -> Router {
    let settings = Settings::default();
    app(AppState::new(store, &settings), &settings).unwrap()
}

async fn seeded_router() -> Router {
    router(seeded_store().await)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn assert_error(status: StatusCode, body: &Value, expected: StatusCode, message: &str) {
    assert_eq!(status, expected, "{}", body);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], expected.as_u16());
    assert_eq!(body["message"], message);
}

fn ids(questions: &Value) -> Vec<i64> {
    questions
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn lists_categories() {
    let app = seeded_router().await;
    let (status, body) = send(&app, Method::GET, "/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["categories"]["1"], "Science");
    assert_eq!(body["categories"]["6"], "Sports");
    assert_eq!(body["categories"].as_object().unwrap().len(), 6);
}

#[tokio::test]
async fn no_categories_is_not_found() {
    let app = router(Arc::new(MemoryStore::new()));
    let (status, body) = send(&app, Method::GET, "/categories", None).await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "resource not found");
}

#[tokio::test]
async fn first_page_holds_ten_questions() {
    let app = seeded_router().await;
    let (status, body) = send(&app, Method::GET, "/questions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(ids(&body["questions"]), (1..=10).collect::<Vec<_>>());
    assert_eq!(body["total_questions"], 12);
    assert!(body["current_category"].is_null());
    assert_eq!(body["categories"].as_object().unwrap().len(), 6);

    let first = &body["questions"][0];
    assert_eq!(first["answer"], "The liver");
    assert_eq!(first["category"], 1);
    assert_eq!(first["difficulty"], 2);
}

#[tokio::test]
async fn later_pages_and_bad_page_values() {
    let app = seeded_router().await;
    let (status, body) = send(&app, Method::GET, "/questions?page=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["questions"]), vec![11, 12]);
    assert!(body["total_questions"].as_u64().unwrap() >= 2);

    let (status, body) = send(&app, Method::GET, "/questions?page=500", None).await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "resource not found");

    let (status, body) = send(&app, Method::GET, "/questions?page=0", None).await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "resource not found");

    let (status, body) = send(&app, Method::GET, "/questions?page=abc", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["questions"]).len(), 10);
}

#[tokio::test]
async fn delete_removes_question() {
    let app = seeded_router().await;
    let (status, body) = send(&app, Method::DELETE, "/questions/3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["deleted"], 3);

    let (_, body) = send(&app, Method::GET, "/questions", None).await;
    assert!(!ids(&body["questions"]).contains(&3));
    assert_eq!(body["total_questions"], 11);

    let (status, body) = send(&app, Method::DELETE, "/questions/3", None).await;
    assert_error(status, &body, StatusCode::UNPROCESSABLE_ENTITY, "unprocessable");
}

#[tokio::test]
async fn delete_with_non_integer_id_is_unprocessable() {
    let app = seeded_router().await;
    let (status, body) = send(&app, Method::DELETE, "/questions/mk", None).await;
    assert_error(status, &body, StatusCode::UNPROCESSABLE_ENTITY, "unprocessable");
}

#[tokio::test]
async fn create_question_returns_new_id() {
    let app = seeded_router().await;
    let new_question = json!({
        "question": "new question",
        "answer": "new answer",
        "difficulty": 1,
        "category": 1
    });
    let (status, body) = send(&app, Method::POST, "/questions", Some(new_question)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let created = body["created"].as_i64().unwrap();
    assert_eq!(created, 13);

    let (_, body) = send(&app, Method::GET, "/questions?page=2", None).await;
    assert_eq!(body["total_questions"], 13);
    assert_eq!(ids(&body["questions"]).last(), Some(&created));
}

#[tokio::test]
async fn create_question_accepts_form_strings() {
    let app = seeded_router().await;
    let body = json!({"question": "q", "answer": "a", "difficulty": "4", "category": "2"});
    let (status, body) = send(&app, Method::POST, "/questions", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn create_question_missing_field_is_unprocessable() {
    let app = seeded_router().await;
    let new_question = json!({
        "question": "new_question",
        "answer": "new_answer",
        "category": 1
    });
    let (status, body) = send(&app, Method::POST, "/questions", Some(new_question)).await;
    assert_error(status, &body, StatusCode::UNPROCESSABLE_ENTITY, "unprocessable");
    assert!(body["detail"].as_str().unwrap().contains("difficulty"));
}

#[tokio::test]
async fn create_question_unknown_category_is_conflict() {
    let app = seeded_router().await;
    let body = json!({"question": "q", "answer": "a", "difficulty": 1, "category": 99});
    let (status, body) = send(&app, Method::POST, "/questions", Some(body)).await;
    assert_error(status, &body, StatusCode::CONFLICT, "conflict");
}

#[tokio::test]
async fn search_matches_substring_ignoring_case() {
    let app = seeded_router().await;
    let (status, body) = send(&app, Method::POST, "/questions/search", Some(json!({"searchTerm": "a"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let questions = body["questions"].as_array().unwrap();
    let expected = QUESTIONS.iter().filter(|(q, _, _)| q.to_lowercase().contains('a')).count();
    assert_eq!(questions.len(), expected);
    assert_eq!(body["total_questions"], expected);
    assert!(body["current_category"].is_null());
    for q in questions {
        assert!(q["question"].as_str().unwrap().to_lowercase().contains('a'));
    }
    assert!(!questions.iter().any(|q| q["question"] == "Who won 1990?"));

    let (_, body) = send(&app, Method::POST, "/questions/search", Some(json!({"searchTerm": "TITLE"}))).await;
    assert_eq!(body["total_questions"], 1);
    assert_eq!(body["questions"][0]["answer"], "Maya Angelou");
}

#[tokio::test]
async fn search_without_term_is_unprocessable() {
    let app = seeded_router().await;
    let (status, body) = send(&app, Method::POST, "/questions/search", Some(json!({}))).await;
    assert_error(status, &body, StatusCode::UNPROCESSABLE_ENTITY, "unprocessable");
}

#[tokio::test]
async fn questions_by_category() {
    let app = seeded_router().await;
    let (status, body) = send(&app, Method::GET, "/categories/1/questions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(ids(&body["questions"]), vec![1, 2, 3]);
    assert_eq!(body["total_questions"], 3);
    assert_eq!(body["current_category"], 1);
    for q in body["questions"].as_array().unwrap() {
        assert_eq!(q["category"], 1);
    }
}

#[tokio::test]
async fn questions_by_unknown_or_malformed_category_is_not_found() {
    let app = seeded_router().await;
    let (status, body) = send(&app, Method::GET, "/categories/a/questions", None).await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "resource not found");
    let (status, body) = send(&app, Method::GET, "/categories/200/questions", None).await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "resource not found");
}

#[tokio::test]
async fn quiz_over_all_categories_exhausts_the_pool() {
    let app = seeded_router().await;
    let mut previous: Vec<i64> = Vec::new();
    loop {
        let request = json!({
            "quiz_category": {"type": "click", "id": 0},
            "previous_questions": previous
        });
        let (status, body) = send(&app, Method::POST, "/quizzes", Some(request)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        if body["question"].is_null() {
            break;
        }
        let id = body["question"]["id"].as_i64().unwrap();
        assert!((1..=12).contains(&id));
        assert!(!previous.contains(&id), "question {} asked twice", id);
        previous.push(id);
        assert!(previous.len() <= QUESTIONS.len());
    }
    let asked: HashSet<i64> = previous.into_iter().collect();
    assert_eq!(asked.len(), QUESTIONS.len());
}

#[tokio::test]
async fn quiz_in_one_category_stays_in_it() {
    let app = seeded_router().await;
    let mut previous: Vec<i64> = Vec::new();
    for _ in 0..2 {
        let request = json!({
            "quiz_category": {"type": "Sports", "id": "6"},
            "previous_questions": previous
        });
        let (status, body) = send(&app, Method::POST, "/quizzes", Some(request)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["question"]["category"], 6);
        previous.push(body["question"]["id"].as_i64().unwrap());
    }
    let request = json!({
        "quiz_category": {"type": "Sports", "id": 6},
        "previous_questions": previous
    });
    let (_, body) = send(&app, Method::POST, "/quizzes", Some(request)).await;
    assert!(body["question"].is_null());
}

#[tokio::test]
async fn quiz_missing_fields_is_unprocessable() {
    let app = seeded_router().await;
    let (status, body) = send(&app, Method::POST, "/quizzes", Some(json!({"previous_questions": []}))).await;
    assert_error(status, &body, StatusCode::UNPROCESSABLE_ENTITY, "unprocessable");
    let request = json!({"quiz_category": {"type": "click", "id": 0}});
    let (status, body) = send(&app, Method::POST, "/quizzes", Some(request)).await;
    assert_error(status, &body, StatusCode::UNPROCESSABLE_ENTITY, "unprocessable");
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = seeded_router().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/questions")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "bad request");
}

#[tokio::test]
async fn unknown_route_and_wrong_method_use_the_envelope() {
    let app = seeded_router().await;
    let (status, body) = send(&app, Method::GET, "/nope", None).await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "resource not found");
    let (status, body) = send(&app, Method::PUT, "/quizzes", None).await;
    assert_error(status, &body, StatusCode::METHOD_NOT_ALLOWED, "method not allowed");
}

async fn send_raw(app: &Router, uri: &str, body: String, content_length: bool) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if content_length {
        builder = builder.header(header::CONTENT_LENGTH, body.len());
    }
    let response = app.clone().oneshot(builder.body(Body::from(body)).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn oversized_body_uses_the_envelope() {
    let app = seeded_router().await;
    let body = json!({ "searchTerm": "a".repeat(70 * 1024) }).to_string();

    let (status, json) = send_raw(&app, "/questions/search", body.clone(), true).await;
    assert_error(status, &json, StatusCode::PAYLOAD_TOO_LARGE, "payload too large");
    assert!(json["detail"].as_str().unwrap().contains("65536"));

    let (status, json) = send_raw(&app, "/questions/search", body, false).await;
    assert_error(status, &json, StatusCode::PAYLOAD_TOO_LARGE, "payload too large");

    let (status, _) = send(&app, Method::POST, "/questions/search", Some(json!({ "searchTerm": "title" }))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let app = seeded_router().await;
    let request = Request::builder()
        .uri("/categories")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

    let preflight = Request::builder()
        .method(Method::OPTIONS)
        .uri("/questions/1")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(preflight).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let methods = response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap().to_string();
    assert!(methods.contains("DELETE"));
}

#[tokio::test]
async fn health_and_readiness() {
    let app = seeded_router().await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "memory");
    assert!(body.get("database").is_none());
    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "ok");
    let (_, body) = send(&app, Method::GET, "/version", None).await;
    assert_eq!(body["name"], "trivia-api");
    assert_eq!(body["store"], "memory");
    assert_eq!(body["questions_per_page"], 10);
}
