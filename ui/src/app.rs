use chrono::Utc;
use quizdesk_business::Route;
use quizdesk_states::Time;

use crate::{pages, state::State, widgets};

pub struct QuizdeskApp {
    pub state: State,
}

impl QuizdeskApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self { state }
    }
}

impl eframe::App for QuizdeskApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply values that arrived over the update channel since last frame.
        self.state.ctx.sync_computes();

        // One clock sample per frame; command snapshots read it from here.
        self.state
            .ctx
            .update::<Time>(|time| *time.as_mut() = Utc::now());

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                widgets::env_version(ui);
            });
        });

        let route = *self.state.ctx.state::<Route>();
        egui::CentralPanel::default().show(ctx, |ui| match route {
            Route::AdminArea => pages::admin_page(&mut self.state, ui),
            Route::Homepage => pages::home_page(&mut self.state, ui),
        });

        // Let dirty computes settle before the next frame renders.
        self.state.ctx.run_computed();
    }
}
