use std::collections::HashMap;
use std::path::Path;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Color32, Context};
use log::info;

use crate::catalog::{Catalog, CatalogConfig, load_catalog, load_config};

mod chart;
mod events;
mod filter;
mod physics;
mod render_utils;
mod transition;
mod ui;

use chart::ChartState;
use events::EventBus;
use filter::FilterSet;
use physics::Simulation;
use transition::ModeMachine;

#[derive(Clone, Debug)]
pub struct StartOptions {
    pub data_path: String,
    pub config_path: Option<String>,
    pub select: Option<String>,
}

pub struct AtlasApp {
    options: StartOptions,
    state: AppState,
    reload_rx: Option<Receiver<LoadResult>>,
}

type LoadResult = Result<Loaded, String>;

pub(in crate::app) struct Loaded {
    pub(in crate::app) catalog: Catalog,
    pub(in crate::app) config: CatalogConfig,
}

enum AppState {
    Loading {
        rx: Receiver<LoadResult>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

pub(in crate::app) struct ViewModel {
    catalog: Catalog,
    config: CatalogConfig,
    filters: FilterSet,
    bus: EventBus,
    mode: ModeMachine,
    simulation: Simulation,
    chart: Option<ChartState>,
    chart_dirty: bool,
    hovered: Option<usize>,
    selected: Option<usize>,
    dragged: Option<usize>,
    keyword_input: String,
    license_choices: Vec<FilterChoice>,
    os_choices: Vec<FilterChoice>,
    region_colors: HashMap<String, Color32>,
    visible_count: usize,
}

#[derive(Clone, Debug)]
pub(in crate::app) struct FilterChoice {
    pub(in crate::app) key: String,
    pub(in crate::app) label: String,
    pub(in crate::app) checked: bool,
}

impl AtlasApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, options: StartOptions) -> Self {
        let state = Self::start_load(options.clone());
        Self {
            options,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(options: StartOptions) -> Receiver<LoadResult> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_for(&options).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(options: StartOptions) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(options),
        }
    }
}

fn load_for(options: &StartOptions) -> anyhow::Result<Loaded> {
    let config = load_config(options.config_path.as_deref().map(Path::new))?;
    let catalog = load_catalog(Path::new(&options.data_path), &config)?;
    info!(
        "loaded {} records across {} regions from {}",
        catalog.len(),
        catalog.regions(&config.region_attribute).len(),
        options.data_path
    );
    Ok(Loaded { catalog, config })
}

impl eframe::App for AtlasApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(match result {
                        Ok(loaded) => AppState::Ready(Box::new(ViewModel::new(
                            loaded,
                            self.options.select.as_deref(),
                        ))),
                        Err(error) => AppState::Error(error),
                    });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading project catalog...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load project catalog");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.options.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &self.options.data_path, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.options.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => {
                            transition = Some(match result {
                                Ok(loaded) => AppState::Ready(Box::new(ViewModel::new(
                                    loaded,
                                    self.options.select.as_deref(),
                                ))),
                                Err(error) => AppState::Error(error),
                            });
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition = Some(AppState::Error(
                                "Background load worker disconnected".to_owned(),
                            ));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}
