use payloads::{
    APIClient, ClientError, DraftChange, EventCategory, FormState, Severity,
    UrgencyLevel,
};
use reqwest::StatusCode;
use serde_json::json;
use test_helpers::{spawn_app, unreachable_address};

#[tokio::test]
async fn create_event_sends_normalized_record() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let mut form = FormState::default();
    for change in [
        DraftChange::Title("Flood relief".into()),
        DraftChange::Description("River burst its banks".into()),
        DraftChange::Category(Some(EventCategory::Disaster)),
        DraftChange::IsOngoing(true),
        DraftChange::EstimatedAffectedPeople("3200".into()),
        DraftChange::Severity(Some(Severity::Critical)),
        DraftChange::Location("Lower valley".into()),
        DraftChange::StartDate(Some(jiff::civil::date(2025, 4, 2))),
        DraftChange::UrgencyLevel(Some(UrgencyLevel::Immediate)),
        DraftChange::FundingGoal("50000".into()),
    ] {
        form.change(change);
    }
    let record = form.begin_submit()?;
    app.client.create_event(&record).await?;

    let events = app.backend.events();
    assert_eq!(events.len(), 1);
    assert_eq!(
        events[0],
        json!({
            "id": null,
            "title": "Flood relief",
            "description": "River burst its banks",
            "category": "Disaster",
            "isOngoing": true,
            "estimatedAffectedPeople": 3200,
            "severity": "Critical",
            "location": "Lower valley",
            "startDate": "2025-04-02",
            "endDate": "",
            "coverImage": "",
            "urgencyLevel": "Immediate",
            "fundingGoal": 50000.0,
            "currentFunding": null,
        })
    );

    Ok(())
}

#[tokio::test]
async fn empty_form_is_accepted_by_the_endpoint() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let record = FormState::default().begin_submit()?;
    app.client.create_event(&record).await?;

    let events = app.backend.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["title"], "");
    assert_eq!(events[0]["isOngoing"], false);
    assert!(events[0]["fundingGoal"].is_null());

    Ok(())
}

#[tokio::test]
async fn non_success_status_is_an_api_error() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.backend.respond_to_events_with(422);

    let record = FormState::default().begin_submit()?;
    let result = app.client.create_event(&record).await;

    match result {
        Err(ClientError::APIError(status, _)) => {
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY)
        }
        other => panic!("Expected APIError, got {other:?}"),
    }
    assert!(app.backend.events().is_empty());

    Ok(())
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() -> anyhow::Result<()> {
    let client = APIClient {
        address: unreachable_address(),
        inner_client: reqwest::Client::new(),
    };

    let record = FormState::default().begin_submit()?;
    let result = client.create_event(&record).await;
    assert!(matches!(result, Err(ClientError::Network(_))));

    Ok(())
}
