//! Tests for the event reducer and the derived view

use super::*;
use crate::app::models::RecordField;
use crate::app::services::leaderboard::filter::FilterField;
use crate::app::services::leaderboard::pipeline::TrackScope;
use crate::app::services::view_controller::Transition;

fn filter(field: FilterField, value: &str) -> ViewEvent {
    ViewEvent::FilterChanged {
        field,
        value: value.to_string(),
    }
}

#[test]
fn test_events_before_load_are_ignored() {
    let mut controller = ViewController::new(AppState::default());

    assert_eq!(
        controller.handle(ViewEvent::SortClicked(RecordField::Power)),
        Transition::Ignored
    );
    assert_eq!(
        controller.handle(filter(FilterField::Track, "Utah")),
        Transition::Ignored
    );
    assert_eq!(controller.state(), &AppState::default());
    assert!(controller.view().rows.is_empty());
}

#[test]
fn test_initial_view_is_time_ascending() {
    let controller = create_loaded_controller();
    let view = controller.view();

    assert_eq!(
        view_cars(&controller),
        vec!["Bolide", "Scintilla", "Tempesta", "Pessima", "Covet"]
    );
    assert_eq!(view.stats.count, 5);
    assert_eq!(view.stats.fastest_time, "1:01.900");
    assert_eq!(view.updated, Some("2024-06-02"));
    assert!(view.error.is_none());
}

#[test]
fn test_filter_change_and_wildcard() {
    let mut controller = create_loaded_controller();

    assert_eq!(
        controller.handle(filter(FilterField::Drivetrain, "前驱")),
        Transition::Recompute
    );
    assert_eq!(view_cars(&controller), vec!["Pessima", "Covet"]);
    assert_eq!(controller.view().stats.fastest_time, "1:23.456");

    controller.handle(filter(FilterField::Drivetrain, "all"));
    assert_eq!(controller.view().rows.len(), 5);
}

#[test]
fn test_search_is_trimmed_and_case_insensitive() {
    let mut controller = create_loaded_controller();

    controller.handle(ViewEvent::SearchChanged("  UTA ".to_string()));
    assert_eq!(view_cars(&controller), vec!["Pessima", "Covet"]);

    controller.handle(ViewEvent::SearchChanged("ti".to_string()));
    assert_eq!(view_cars(&controller), vec!["Scintilla"]);
}

#[test]
fn test_search_combines_with_filters() {
    let mut controller = create_loaded_controller();

    controller.handle(filter(FilterField::Drivetrain, "后驱"));
    controller.handle(ViewEvent::SearchChanged("italy".to_string()));

    assert_eq!(view_cars(&controller), vec!["Tempesta"]);
}

#[test]
fn test_sort_click_on_current_field_flips_direction() {
    let mut controller = create_loaded_controller();

    controller.handle(ViewEvent::SortClicked(RecordField::Time));

    assert!(!controller.state().sort.ascending);
    // Untimed records stay last when descending
    assert_eq!(
        view_cars(&controller),
        vec!["Pessima", "Tempesta", "Scintilla", "Bolide", "Covet"]
    );
}

#[test]
fn test_sort_click_on_new_field_starts_ascending() {
    let mut controller = create_loaded_controller();

    controller.handle(ViewEvent::SortClicked(RecordField::Power));
    assert_eq!(controller.state().sort.field, RecordField::Power);
    assert!(controller.state().sort.ascending);
    // Missing power counts as zero; "310" is read as a number
    assert_eq!(
        view_cars(&controller),
        vec!["Covet", "Pessima", "Tempesta", "Bolide", "Scintilla"]
    );

    controller.handle(ViewEvent::SortClicked(RecordField::Power));
    assert_eq!(
        view_cars(&controller),
        vec!["Scintilla", "Bolide", "Tempesta", "Pessima", "Covet"]
    );
}

#[test]
fn test_track_tab_scopes_rows_and_stats() {
    let mut controller = create_loaded_controller();

    controller.handle(ViewEvent::TrackTabClicked(TrackScope::Track(
        "Utah".to_string(),
    )));
    let view = controller.view();
    assert_eq!(view.stats.count, 2);
    assert_eq!(view.stats.fastest_time, "1:23.456");
    assert_eq!(view.scope, TrackScope::Track("Utah".to_string()));

    controller.handle(ViewEvent::TrackTabClicked(TrackScope::All));
    assert_eq!(controller.view().stats.count, 5);
}

#[test]
fn test_reset_restores_wildcards_and_keeps_sort() {
    let mut controller = create_loaded_controller();
    controller.handle(filter(FilterField::Mod, "是"));
    controller.handle(ViewEvent::SearchChanged("bol".to_string()));
    controller.handle(ViewEvent::SortClicked(RecordField::Car));
    assert_eq!(view_cars(&controller), vec!["Bolide"]);

    controller.handle(ViewEvent::Reset);

    assert!(controller.state().filters.is_unconstrained());
    assert_eq!(controller.state().filters.search(), "");
    assert_eq!(controller.state().sort.field, RecordField::Car);
    assert_eq!(
        view_cars(&controller),
        vec!["Bolide", "Covet", "Pessima", "Scintilla", "Tempesta"]
    );
}

#[test]
fn test_load_failure_renders_empty_view_with_message() {
    let mut controller = ViewController::new(AppState::default());
    let mut renderer = RecordingRenderer::default();

    let transition = controller
        .dispatch(
            ViewEvent::LoadFailed("HTTP 404: Not Found".to_string()),
            &mut renderer,
        )
        .unwrap();

    assert_eq!(transition, Transition::Failed);
    let frame = renderer.last();
    assert!(frame.cars.is_empty());
    assert_eq!(frame.count, 0);
    assert_eq!(frame.fastest_time, "--:--.--");
    assert_eq!(frame.error.as_deref(), Some("HTTP 404: Not Found"));
}

#[test]
fn test_malformed_payload_is_a_failed_load() {
    let mut controller = ViewController::new(AppState::default());

    let transition = controller.handle(ViewEvent::Loaded(json!({ "data": [] })));

    assert_eq!(transition, Transition::Failed);
    let view = controller.view();
    assert!(view.rows.is_empty());
    assert!(
        view.error
            .is_some_and(|message| message.contains("expected an array"))
    );
}

#[test]
fn test_failure_after_load_empties_the_view() {
    let mut controller = create_loaded_controller();

    controller.handle(ViewEvent::LoadFailed("connection reset".to_string()));

    let view = controller.view();
    assert!(view.rows.is_empty());
    assert!(view.updated.is_none());
    assert_eq!(view.error, Some("connection reset"));
}

#[test]
fn test_dispatch_skips_render_for_ignored_events() {
    let mut controller = ViewController::new(AppState::default());
    let mut renderer = RecordingRenderer::default();

    controller
        .dispatch(ViewEvent::Reset, &mut renderer)
        .unwrap();
    assert!(renderer.frames.is_empty());

    controller
        .dispatch(ViewEvent::Loaded(create_leaderboard_document()), &mut renderer)
        .unwrap();
    controller
        .dispatch(filter(FilterField::Track, "Italy"), &mut renderer)
        .unwrap();

    assert_eq!(renderer.frames.len(), 2);
    assert_eq!(renderer.frames[0].count, 5);
    assert_eq!(renderer.last().cars, vec!["Tempesta"]);
}

#[test]
fn test_track_views_follow_filters() {
    let mut controller = create_loaded_controller();
    controller.handle(filter(FilterField::Mod, "是"));

    let views = controller.track_views();
    let names: Vec<&str> = views.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["Hirochi Raceway", "Italy", "Utah"]);

    let hirochi = &views[0].1;
    assert_eq!(hirochi.stats.count, 2);
    assert_eq!(hirochi.stats.fastest_time, "1:01.900");
    assert_eq!(views[1].1.stats.count, 0);
    assert_eq!(
        hirochi.scope,
        TrackScope::Track("Hirochi Raceway".to_string())
    );
}

#[test]
fn test_filter_options_from_loaded_data() {
    let controller = create_loaded_controller();
    let options = controller.filter_options();

    assert_eq!(options.tracks, vec!["Hirochi Raceway", "Italy", "Utah"]);
    assert_eq!(options.layouts, vec!["Full", "GP", "Short"]);
}

#[test]
fn test_view_serializes_for_json_output() {
    let controller = create_loaded_controller();
    let value = serde_json::to_value(controller.view()).unwrap();

    assert_eq!(value["stats"]["count"], 5);
    assert_eq!(value["rows"][0]["car"], "Bolide");
    assert_eq!(value["sort"]["field"], "time");
}
