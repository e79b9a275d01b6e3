//! Tests for the view controller
//!
//! Controller tests drive the reducer with UI events and inspect the
//! derived views through a recording renderer. Debounce tests run on a
//! paused tokio clock.

pub mod controller_tests;

use crate::Result;
use crate::app::services::view_controller::{
    AppState, LeaderboardView, Renderer, ViewController, ViewEvent,
};
use serde_json::{Value, json};

/// Snapshot of one rendered view
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedView {
    pub cars: Vec<String>,
    pub count: usize,
    pub fastest_time: String,
    pub error: Option<String>,
}

/// Renderer that remembers every paint
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub frames: Vec<RenderedView>,
}

impl RecordingRenderer {
    pub fn last(&self) -> &RenderedView {
        self.frames.last().expect("at least one frame rendered")
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, view: &LeaderboardView<'_>) -> Result<()> {
        self.frames.push(RenderedView {
            cars: view
                .rows
                .iter()
                .map(|r| r.car.clone().unwrap_or_default())
                .collect(),
            count: view.stats.count,
            fastest_time: view.stats.fastest_time.clone(),
            error: view.error.map(str::to_string),
        });
        Ok(())
    }
}

/// Leaderboard document with three tracks and mixed attributes
pub fn create_leaderboard_document() -> Value {
    json!([
        {
            "car": "Pessima", "track": "Utah", "layout": "Short",
            "time": "1:23.456", "power": 180, "drivetrain": "前驱",
            "power_type": "油车", "start_type": "静态起步", "mod": "否",
            "date": "2024-01-10"
        },
        {
            "car": "Scintilla", "track": "Hirochi Raceway", "layout": "Full",
            "time": "1:05.120", "power": 650, "drivetrain": "四驱",
            "power_type": "电车", "start_type": "滚动起步", "mod": "是",
            "date": "2024-06-02"
        },
        {
            "car": "Covet", "track": "Utah", "layout": "Full",
            "time": "--:--.--", "drivetrain": "前驱", "power_type": "油车",
            "mod": "否"
        },
        {
            "car": "Bolide", "track": "Hirochi Raceway", "layout": "Full",
            "time": "1:01.900", "power": 420, "drivetrain": "后驱",
            "power_type": "油车", "start_type": "静态起步", "mod": "是",
            "date": "2024-05-20"
        },
        {
            "car": "Tempesta", "track": "Italy", "layout": "GP",
            "time": "1:10.000", "power": "310", "drivetrain": "后驱",
            "power_type": "油车", "mod": "否", "date": "2024-02-14"
        }
    ])
}

/// Controller with the default state and the leaderboard document loaded
pub fn create_loaded_controller() -> ViewController {
    let mut controller = ViewController::new(AppState::default());
    controller.handle(ViewEvent::Loaded(create_leaderboard_document()));
    controller
}

/// Car names of the current view, in row order
pub fn view_cars(controller: &ViewController) -> Vec<String> {
    controller
        .view()
        .rows
        .iter()
        .map(|r| r.car.clone().unwrap_or_default())
        .collect()
}
