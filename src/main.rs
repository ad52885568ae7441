use std::sync::Arc;

use anyhow::Result;
use chrono::{Duration, TimeZone, Utc};
use mockcal_calendar::{
    CalendarNavigator, CalendarService, CalendarSnapshot, CalendarViewType, EventForm,
    EventPatch, NavigateAction, Notification,
};
use mockcal_core::{AppError, Config};
use tokio::sync::mpsc;

fn print_snapshot(label: &str, snapshot: &CalendarSnapshot) {
    println!(
        "[{}] signed_in={} pending={} events={}",
        label,
        snapshot.signed_in,
        snapshot.pending,
        snapshot.events.len()
    );
    for event in &snapshot.events {
        println!("    {} {} ({})", event.start.format("%Y-%m-%d %H:%M"), event.title, event.id);
    }
}

fn drain(rx: &mut mpsc::UnboundedReceiver<Notification>) {
    while let Ok(notification) = rx.try_recv() {
        println!("  -> {:?}: {}", notification.level, notification.text);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    mockcal_core::init()?;

    let (config, _warnings) = Config::load_validated()?;
    tracing::info!("mockcal demo started");

    let (tx, mut rx) = mpsc::unbounded_channel();
    let service = CalendarService::from_config(&config, Arc::new(tx));

    // The demo dataset lives in January 2025.
    let today = Utc
        .with_ymd_and_hms(2025, 1, 15, 9, 0, 0)
        .single()
        .unwrap_or_else(Utc::now);
    let mut nav = CalendarNavigator::new(today, CalendarViewType::Week, config.calendar.week_start);

    service.sign_in().await;
    drain(&mut rx);

    let window = nav.fetch_window(
        config.calendar.fetch_months_before,
        config.calendar.fetch_months_after,
    );
    service.fetch_events(Some(window.start), Some(window.end)).await;
    drain(&mut rx);
    println!("{}", nav.title());
    print_snapshot("fetched", &service.snapshot());

    let form = EventForm {
        title: "Design review".to_string(),
        attendees: "lead@example.com, designer@example.com".to_string(),
        meet_link: "https://meet.google.com/abc-defg-hij".to_string(),
        ..EventForm::blank(today + Duration::days(1))
    };
    let draft = form.into_draft().map_err(AppError::from)?;
    if let Some(created) = service.create_event(draft).await {
        drain(&mut rx);
        service
            .update_event(&created.id, EventPatch::title("Design review (renamed)"))
            .await;
        drain(&mut rx);
    }

    service.delete_event("3").await;
    drain(&mut rx);
    print_snapshot("edited", &service.snapshot());

    nav.navigate(NavigateAction::Next, today);
    let range = nav.visible_range();
    println!(
        "{}: {} events",
        nav.title(),
        service.events_in_range(range.start, range.end).len()
    );

    service.sign_out().await;
    drain(&mut rx);
    print_snapshot("signed out", &service.snapshot());

    Ok(())
}
