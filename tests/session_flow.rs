// SPDX-License-Identifier: MPL-2.0
mod common;

use common::{drive, services, FixedPosition, Scripted};
use heartshield::app::config::Config;
use heartshield::app::Capabilities;
use heartshield::application::hospital::{HospitalLinks, DEFAULT_SEARCH_URL};
use heartshield::application::port::Coordinates;
use heartshield::domain::risk::{ExtractedData, FieldName, RiskTier, UserProfile};
use heartshield::i18n::fluent::I18n;
use heartshield::session::{
    Effect, FeedbackMessage, FormMessage, Message, PredictionMessage, Session, UploadMessage,
};
use heartshield::ui::status::Region;
use image_rs::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::tempdir;

fn write_png(dir: &Path) -> PathBuf {
    let path = dir.join("report.png");
    RgbaImage::from_pixel(4, 3, Rgba([200, 30, 40, 255]))
        .save(&path)
        .expect("write png");
    path
}

fn english() -> I18n {
    I18n::new(Some("en-US".into()), &Config::default())
}

async fn complete_form(session: &mut Session, services: &heartshield::app::Services) {
    let rest = [
        (FieldName::Height, "165"),
        (FieldName::Weight, "70"),
        (FieldName::ApHi, "150"),
        (FieldName::ApLo, "95"),
        (FieldName::Cholesterol, "260"),
        (FieldName::Glucose, "95"),
        (FieldName::Smoke, "no"),
        (FieldName::Alco, "no"),
        (FieldName::Active, "yes"),
    ];
    for (field, value) in rest {
        drive(session, services, FormMessage::FieldChanged(field, value.into())).await;
    }
}

#[tokio::test]
async fn report_to_high_risk_with_specialist_search() {
    let dir = tempdir().expect("temp dir");
    let path = write_png(dir.path());
    let scripted = Arc::new(
        Scripted::default()
            .extracting(ExtractedData::from_pairs([("age", "45"), ("gender", "F")]))
            .predicting(80.0),
    );
    let services = services(scripted.clone());
    let mut session = Session::default();
    let i18n = english();

    drive(&mut session, &services, UploadMessage::FileDropped(path)).await;
    assert!(session.is_preview_visible());
    assert_eq!(session.preview().map(|p| p.name()), Some("report.png"));

    drive(&mut session, &services, UploadMessage::Submit).await;
    assert_eq!(scripted.extracted_files.lock().expect("lock").as_slice(), ["report.png"]);
    assert!(!session.overlay().is_visible());
    assert!(session.can_submit_report());
    assert_eq!(session.form().get(FieldName::Age), "45");
    assert_eq!(session.form().get(FieldName::Gender), "female");
    let upload_status = session.status().get(Region::Upload).expect("upload status");
    assert_eq!(
        upload_status.text(&i18n),
        "Data extracted. Review fields and click \"Analyse Risk\"."
    );

    complete_form(&mut session, &services).await;
    drive(&mut session, &services, PredictionMessage::Submit).await;

    let assessment = session.assessment().expect("assessment");
    assert_eq!(assessment.tier(), RiskTier::High);
    assert_eq!(i18n.tr(assessment.tier().i18n_key()), "High Risk");
    assert_eq!(
        i18n.tr_with_args(
            "result-probability",
            &[("probability", assessment.probability_text().as_str())]
        ),
        "Probability: 80%"
    );
    assert!(session.is_hospital_visible());
    assert_eq!(session.hospital().map(|h| h.link()), Some(DEFAULT_SEARCH_URL));

    let sent = scripted.predicted_forms.lock().expect("lock");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].get(FieldName::ApHi), "150");
}

#[tokio::test]
async fn profile_fills_what_the_report_lacks() {
    let scripted = Arc::new(
        Scripted::default().extracting(ExtractedData::from_pairs([("age", ""), ("ap_hi", "130")])),
    );
    let services = services(scripted);
    let profile = UserProfile {
        age: Some("60".into()),
        height: Some("180".into()),
        weight: None,
        gender: Some("Male".into()),
    };
    let mut session = Session::new(Capabilities::default(), Some(profile), HospitalLinks::default());

    let dir = tempdir().expect("temp dir");
    drive(&mut session, &services, UploadMessage::FileDropped(write_png(dir.path()))).await;
    drive(&mut session, &services, UploadMessage::Submit).await;

    assert_eq!(session.form().get(FieldName::Age), "60");
    assert_eq!(session.form().get(FieldName::Height), "180");
    assert_eq!(session.form().get(FieldName::Weight), "");
    assert_eq!(session.form().get(FieldName::Gender), "male");
    assert_eq!(session.form().get(FieldName::ApHi), "130");
}

#[tokio::test]
async fn hospital_appears_only_above_fifty_percent() {
    let scripted = Arc::new(Scripted::default().predicting(50.0));
    let services = services(scripted.clone());
    let mut session = Session::default();

    drive(&mut session, &services, FormMessage::FieldChanged(FieldName::Age, "45".into())).await;
    drive(&mut session, &services, FormMessage::FieldChanged(FieldName::Gender, "male".into())).await;
    complete_form(&mut session, &services).await;

    drive(&mut session, &services, PredictionMessage::Submit).await;
    assert_eq!(session.assessment().map(|a| a.tier()), Some(RiskTier::Low));
    assert!(!session.is_hospital_visible());

    scripted.set_probability(51.0);
    drive(&mut session, &services, PredictionMessage::Submit).await;
    assert_eq!(session.assessment().map(|a| a.tier()), Some(RiskTier::Moderate));
    assert!(session.is_hospital_visible());
}

#[tokio::test]
async fn located_user_gets_anchored_search() {
    let scripted = Arc::new(Scripted::default().predicting(90.0));
    let mut services = services(scripted);
    services.location = Some(Arc::new(FixedPosition(
        Coordinates::new(45.5, -73.6).expect("coords"),
    )));
    let mut session = Session::new(services.capabilities(), None, HospitalLinks::default());

    drive(&mut session, &services, FormMessage::FieldChanged(FieldName::Age, "70".into())).await;
    drive(&mut session, &services, FormMessage::FieldChanged(FieldName::Gender, "male".into())).await;
    complete_form(&mut session, &services).await;
    drive(&mut session, &services, PredictionMessage::Submit).await;

    let hospital = session.hospital().expect("hospital");
    assert!(!hospital.is_locating());
    assert!(hospital.link().contains("@45.5,-73.6"));
}

#[tokio::test]
async fn server_reason_is_shown_on_prediction_failure() {
    let scripted = Arc::new(Scripted::default());
    let services = services(scripted);
    let mut session = Session::default();
    complete_form(&mut session, &services).await;
    drive(&mut session, &services, FormMessage::FieldChanged(FieldName::Age, "45".into())).await;
    drive(&mut session, &services, FormMessage::FieldChanged(FieldName::Gender, "male".into())).await;

    drive(&mut session, &services, PredictionMessage::Submit).await;

    let status = session.status().get(Region::Result).expect("status");
    assert_eq!(status.text(&english()), "Missing age. Please fill all fields.");
    assert!(!session.is_analysing());
}

#[tokio::test]
async fn empty_review_is_never_sent() {
    let scripted = Arc::new(Scripted::default());
    let services = services(scripted.clone());
    let mut session = Session::default();

    drive(&mut session, &services, FeedbackMessage::NameChanged("Sam".into())).await;
    drive(&mut session, &services, FeedbackMessage::Submit).await;

    assert!(scripted.feedback.lock().expect("lock").is_empty());
    assert_eq!(
        session.status().get(Region::Feedback).map(|s| s.text(&english())),
        Some("Please enter a review.".to_string())
    );
}

#[tokio::test]
async fn feedback_is_delivered_and_inputs_reset() {
    let scripted = Arc::new(Scripted::default());
    let services = services(scripted.clone());
    let mut session = Session::default();

    drive(&mut session, &services, FeedbackMessage::ReviewChanged("Very clear".into())).await;
    drive(&mut session, &services, FeedbackMessage::Submit).await;

    let sent = scripted.feedback.lock().expect("lock");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].review, "Very clear");
    assert!(sent[0].name.is_empty());
    assert!(session.feedback().review.is_empty());
    assert_eq!(
        session.status().get(Region::Feedback).map(|s| s.key.as_str()),
        Some("status-feedback-thanks")
    );
}

#[tokio::test]
async fn late_extraction_after_remove_is_dropped() {
    let dir = tempdir().expect("temp dir");
    let scripted = Arc::new(
        Scripted::default().extracting(ExtractedData::from_pairs([("age", "45")])),
    );
    let services = services(scripted);
    let mut session = Session::default();
    drive(&mut session, &services, UploadMessage::FileDropped(write_png(dir.path()))).await;

    let effect = session.update(Message::Upload(UploadMessage::Submit));
    assert!(matches!(effect, Effect::Extract { .. }));
    assert!(session.overlay().is_visible());
    assert!(!session.can_submit_report());

    let _ = session.update(Message::Upload(UploadMessage::RemoveFile));
    if let Some(future) = effect.into_future(&services) {
        let late = future.await;
        let _ = session.update(late);
    }

    assert!(session.report().is_none());
    assert!(session.form().is_blank());
    assert!(!session.overlay().is_visible());
    assert!(session.can_submit_report());
}

#[tokio::test]
async fn unsupported_drop_keeps_current_report() {
    let dir = tempdir().expect("temp dir");
    let scripted = Arc::new(Scripted::default());
    let services = services(scripted);
    let mut session = Session::default();
    drive(&mut session, &services, UploadMessage::FileDropped(write_png(dir.path()))).await;

    drive(&mut session, &services, UploadMessage::FileDropped(PathBuf::from("notes.txt"))).await;

    assert_eq!(session.report().map(|f| f.name()), Some("report.png"));
    assert_eq!(session.notifications().visible_count(), 1);
}

#[tokio::test]
async fn clear_all_resets_every_section() {
    let scripted = Arc::new(Scripted::default().predicting(90.0));
    let services = services(scripted);
    let mut session = Session::default();
    drive(&mut session, &services, FormMessage::FieldChanged(FieldName::Age, "70".into())).await;
    drive(&mut session, &services, FormMessage::FieldChanged(FieldName::Gender, "male".into())).await;
    complete_form(&mut session, &services).await;
    drive(&mut session, &services, PredictionMessage::Submit).await;
    assert!(session.is_hospital_visible());

    drive(&mut session, &services, UploadMessage::ClearAll).await;

    assert!(session.form().is_blank());
    assert!(session.assessment().is_none());
    assert!(!session.is_hospital_visible());
    assert!(session.status().get(Region::Result).is_none());
}
