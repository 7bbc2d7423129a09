use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;
use tutorhub::api::router;
use tutorhub::db::repository;
use tutorhub::models::{Goal, Schedule, Tutor};
use tutorhub::state::AppState;

async fn setup_app() -> Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test db");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    for (slug, description) in [("travel", "For travel"), ("work", "For work and career")] {
        repository::insert_goal(
            &pool,
            &Goal {
                slug: slug.to_string(),
                description: description.to_string(),
                icon: String::new(),
            },
        )
        .await
        .expect("Failed to insert goal");
    }

    let schedule = |json: Value| -> Schedule { serde_json::from_value(json).expect("schedule") };

    repository::insert_tutor(
        &pool,
        &Tutor {
            id: 1,
            name: "Mark Adams".to_string(),
            about: "Travel English.".to_string(),
            rating: 4.8,
            picture: String::new(),
            price: 1100,
            goals: vec!["travel".to_string()],
            schedule: schedule(json!({ "mon": { "10:00": true } })),
        },
    )
    .await
    .expect("Failed to insert tutor");

    repository::insert_tutor(
        &pool,
        &Tutor {
            id: 2,
            name: "Emma Novak".to_string(),
            about: "Conversation practice.".to_string(),
            rating: 4.2,
            picture: String::new(),
            price: 700,
            goals: vec!["travel".to_string()],
            schedule: schedule(json!({ "fri": { "18:00": true } })),
        },
    )
    .await
    .expect("Failed to insert tutor");

    router(AppState { db: pool })
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response should be json")
}

#[tokio::test]
async fn health_is_ok() {
    let app = setup_app().await;
    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn lists_filters_and_sorts_tutors() {
    let app = setup_app().await;

    let response = app.clone().oneshot(get("/tutors")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let tutors = body_json(response).await;
    assert_eq!(tutors.as_array().unwrap().len(), 2);

    let response = app
        .clone()
        .oneshot(get("/tutors?sort=price_asc"))
        .await
        .unwrap();
    let tutors = body_json(response).await;
    assert_eq!(tutors[0]["id"], 2);
    assert_eq!(tutors[1]["id"], 1);

    // known goal nobody serves: empty list, not an error
    let response = app.clone().oneshot(get("/tutors?goal=work")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let tutors = body_json(response).await;
    assert!(tutors.as_array().unwrap().is_empty());

    // unknown goal: 404
    let response = app.clone().oneshot(get("/tutors?goal=chess")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn tutor_profile_and_goals() {
    let app = setup_app().await;

    let response = app.clone().oneshot(get("/tutors/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let tutor = body_json(response).await;
    assert_eq!(tutor["name"], "Mark Adams");
    assert_eq!(tutor["schedule"]["mon"]["10:00"], true);

    let response = app.clone().oneshot(get("/tutors/99")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(get("/goals")).await.unwrap();
    let goals = body_json(response).await;
    assert_eq!(goals.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn featured_samples_at_most_count() {
    let app = setup_app().await;

    let response = app
        .clone()
        .oneshot(get("/tutors/featured?count=1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let tutors = body_json(response).await;
    assert_eq!(tutors.as_array().unwrap().len(), 1);

    // count larger than the catalog returns everyone
    let response = app
        .oneshot(get("/tutors/featured?count=50"))
        .await
        .unwrap();
    let tutors = body_json(response).await;
    assert_eq!(tutors.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn booking_maps_outcomes_to_status_codes() {
    let app = setup_app().await;

    let valid = json!({
        "weekday": "mon",
        "time": "10:00",
        "name": "Alice",
        "phone": "+1 555 123 4567"
    });

    let response = app
        .clone()
        .oneshot(post("/tutors/1/book", valid.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let confirmation = body_json(response).await;
    assert_eq!(confirmation["weekday"], "Monday");
    assert_eq!(confirmation["tutor_name"], "Mark Adams");

    // same slot again: conflict
    let response = app
        .clone()
        .oneshot(post("/tutors/1/book", valid.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // a slot outside the schedule: not found
    let response = app
        .clone()
        .oneshot(post(
            "/tutors/1/book",
            json!({ "weekday": "mon", "time": "09:00", "name": "Alice", "phone": "+1 555 123 4567" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // invalid fields: 400 with field-level details
    let response = app
        .clone()
        .oneshot(post(
            "/tutors/1/book",
            json!({ "weekday": "mon", "time": "10:00", "name": "", "phone": "5551234" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await;
    assert!(error["fields"]["name"].is_array());
    assert!(error["fields"]["phone"].is_array());

    let response = app
        .oneshot(post("/tutors/99/book", valid))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn lesson_request_round_trip() {
    let app = setup_app().await;

    let response = app
        .clone()
        .oneshot(post(
            "/requests",
            json!({ "name": "Carol", "phone": "+7 (900) 123-45-67", "goal": "travel", "hours_per_week": "3-5" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let confirmation = body_json(response).await;
    assert_eq!(confirmation["goal"], "For travel");
    assert_eq!(confirmation["hours_per_week"], "3-5");

    let response = app
        .oneshot(post(
            "/requests",
            json!({ "name": "Carol", "phone": "+7 (900) 123-45-67", "goal": "chess", "hours_per_week": "1-2" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
