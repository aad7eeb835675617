use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use axum::{extract::State, http::StatusCode, routing::post, Router};
use client_core::{
    PredictionClient, PredictionService, SessionController, SessionState, Submission,
};
use shared::{protocol::PredictionResult, QueryField};
use tokio::{net::TcpListener, runtime::Handle};

const SUCCESS_BODY: &str = r#"{"predicted":12000,"min_price":11000,"max_price":13000,"margin":1000,"confidence":87.5,"residual_std":950}"#;

async fn spawn_predict_server(status: StatusCode, body: &'static str) -> (String, Arc<AtomicUsize>) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route(
            "/predict/",
            post(move |State(hits): State<Arc<AtomicUsize>>| async move {
                hits.fetch_add(1, Ordering::SeqCst);
                (
                    status,
                    [(axum::http::header::CONTENT_TYPE, "application/json")],
                    body,
                )
            }),
        )
        .with_state(hits.clone());
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), hits)
}

fn session_for(base_url: &str) -> SessionController {
    let service: Arc<dyn PredictionService> = Arc::new(PredictionClient::new(base_url));
    SessionController::new(service, Handle::current())
}

fn fill_duster(session: &mut SessionController) {
    session.set_brand("dacia");
    session.set_field(QueryField::Model, "Duster").expect("model");
    session.set_field(QueryField::Year, "2018").expect("year");
}

#[tokio::test]
async fn successful_prediction_lands_unchanged() {
    let (base_url, hits) = spawn_predict_server(StatusCode::OK, SUCCESS_BODY).await;
    let mut session = session_for(&base_url);
    fill_duster(&mut session);

    assert!(matches!(session.submit(), Submission::InFlight(_)));
    let state = session.wait_for_resolution().await.expect("resolution").clone();

    assert_eq!(
        state,
        SessionState::Succeeded(PredictionResult {
            predicted: 12000.0,
            min_price: 11000.0,
            max_price: 13000.0,
            margin: 1000.0,
            confidence_percent: 87.5,
            residual_std_dev: 950.0,
        })
    );
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn service_failure_surfaces_detail_and_endpoint() {
    let (base_url, hits) =
        spawn_predict_server(StatusCode::INTERNAL_SERVER_ERROR, r#"{"detail":"model unavailable"}"#)
            .await;
    let mut session = session_for(&base_url);
    fill_duster(&mut session);

    session.submit();
    session.wait_for_resolution().await.expect("resolution");

    assert_eq!(
        session.state(),
        &SessionState::Failed(format!(
            "model unavailable. Make sure the API is running on {base_url}"
        ))
    );
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn validation_failure_never_reaches_the_server() {
    let (base_url, hits) = spawn_predict_server(StatusCode::OK, SUCCESS_BODY).await;
    let mut session = session_for(&base_url);
    session.set_brand("");

    assert!(matches!(session.submit(), Submission::Rejected));
    assert_eq!(
        session.state(),
        &SessionState::Failed("Please fill in brand, model and year".into())
    );
    assert!(session.wait_for_resolution().await.is_none());
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn form_stays_usable_after_a_failure() {
    let (failing_url, _) =
        spawn_predict_server(StatusCode::BAD_REQUEST, r#"{"detail":"Prediction error: bad input"}"#)
            .await;
    let mut session = session_for(&failing_url);
    fill_duster(&mut session);

    session.submit();
    session.wait_for_resolution().await.expect("resolution");
    assert!(session
        .state()
        .error_message()
        .expect("failed")
        .starts_with("Prediction error: bad input. "));

    session.set_field(QueryField::MileageKm, "50000").expect("mileage");
    session.submit();
    assert!(session.state().is_submitting());
    session.wait_for_resolution().await.expect("second resolution");
    assert_eq!(session.query().mileage_km, 50_000);
}
