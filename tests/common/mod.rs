//! Common test utilities for integration tests
#![allow(dead_code)]

use grid2blockgrid::migration::{InMemoryDataTypeService, MigrationContext};
use grid2blockgrid::{
    BlockGridConfiguration, BlockValue, GridConfiguration, GridMigrator, GridValue,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing_subscriber::layer::SubscriberExt;

pub const MEDIA_UDI: &str = "umb://media/5c7a4d5e8f0b4a529a430c8b3e3c1a11";
pub const TWO_COL_ROW_ID: &str = "0c8f2b6e-3b1d-4a8e-9d1c-5f7e2a9b4c01";

/// Grid configuration with settings, templates and layouts
///
/// - templates: "1 column layout" (full width, rte/media), "2 column layout" (4 + 8)
/// - layouts: "Hero" (12), "2-col" (6 + 6), "Side" (4)
/// - settings: a row radio list, a cell radio list, an unsupported textstring
pub fn grid_config_json() -> Value {
    json!({
        "items": {
            "columns": 12,
            "config": [
                {
                    "label": "Class",
                    "description": "Set a css class",
                    "key": "class",
                    "view": "radiobuttonlist",
                    "applyTo": "row",
                    "prevalues": ["full", "narrow", "wide"]
                },
                {
                    "label": "Background",
                    "description": "",
                    "key": "background color",
                    "view": "radiobuttonlist",
                    "applyTo": "cell",
                    "prevalues": [
                        { "label": "Red", "value": "red" },
                        { "label": "Blue", "value": "blue" }
                    ]
                },
                {
                    "label": "Title",
                    "key": "title",
                    "view": "textstring",
                    "applyTo": "row"
                }
            ],
            "templates": [
                {
                    "name": "1 column layout",
                    "sections": [{ "grid": 12, "allowAll": false, "allowed": ["rte", "media"] }]
                },
                {
                    "name": "2 column layout",
                    "sections": [
                        { "grid": 4, "allowed": ["2-col"] },
                        { "grid": 8 }
                    ]
                }
            ],
            "layouts": [
                {
                    "label": "Hero",
                    "name": "Hero",
                    "areas": [{ "grid": 12, "allowed": ["headline"] }]
                },
                {
                    "label": "Two columns",
                    "name": "2-col",
                    "areas": [{ "grid": 6 }, { "grid": 6 }]
                },
                { "name": "Side", "areas": [{ "grid": "4" }] }
            ]
        }
    })
}

pub fn grid_config() -> GridConfiguration {
    GridConfiguration::new(grid_config_json())
}

/// Stored value: one "2-col" row (rte + media | headline) and one "Hero" row
/// holding only an unsupported macro control
pub fn grid_value_json() -> Value {
    json!({
        "name": "1 column layout",
        "sections": [{
            "grid": "12",
            "rows": [
                {
                    "name": "2-col",
                    "id": TWO_COL_ROW_ID,
                    "config": { "class": "wide" },
                    "areas": [
                        {
                            "grid": "6",
                            "config": { "background color": "red" },
                            "controls": [
                                {
                                    "value": "<p>Left</p>",
                                    "editor": { "alias": "rte", "view": "rte" }
                                },
                                {
                                    "value": { "udi": MEDIA_UDI, "image": "/media/1001/photo.jpg" },
                                    "editor": { "alias": "media", "view": "media" }
                                }
                            ]
                        },
                        {
                            "grid": 6,
                            "controls": [
                                {
                                    "value": "Right",
                                    "editor": { "alias": "headline", "view": "textstring" }
                                }
                            ]
                        }
                    ]
                },
                {
                    "name": "Hero",
                    "areas": [{
                        "grid": 12,
                        "controls": [
                            {
                                "value": { "macroAlias": "latestNews" },
                                "editor": { "alias": "macro", "view": "macro" }
                            }
                        ]
                    }]
                }
            ]
        }]
    })
}

pub fn grid_value() -> GridValue {
    serde_json::from_value(grid_value_json()).unwrap()
}

/// Run the schema pass on the fixture configuration
pub fn translated_context(
    migrator: &GridMigrator,
) -> (MigrationContext, InMemoryDataTypeService, BlockGridConfiguration) {
    let mut context = MigrationContext::with_default_migrators();
    let mut data_types = InMemoryDataTypeService::new();
    let config = migrator.translate_config(&grid_config(), &mut context, &mut data_types);
    (context, data_types, config)
}

/// Count how often each content and settings UDI is referenced from the layout tree
pub fn layout_references(value: &BlockValue) -> (HashMap<String, usize>, HashMap<String, usize>) {
    let mut contents = HashMap::new();
    let mut settings = HashMap::new();
    for item in value.layout_items() {
        *contents.entry(item.content_udi.to_string()).or_insert(0) += 1;
        if let Some(udi) = &item.settings_udi {
            *settings.entry(udi.to_string()).or_insert(0) += 1;
        }
    }
    (contents, settings)
}

#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: tracing::Level,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    pub fn message(&self) -> &str {
        self.fields.get("message").map(String::as_str).unwrap_or_default()
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            fields: visitor.0.into_iter().collect(),
        });
    }
}

/// Run `f` with a subscriber that records every event
pub fn with_captured_events<F, R>(f: F) -> (R, Vec<CapturedEvent>)
where
    F: FnOnce() -> R,
{
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(EventCapture {
        events: Arc::clone(&events),
    });
    let result = tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    (result, captured)
}

/// Warnings among captured events
pub fn warnings(events: &[CapturedEvent]) -> Vec<&CapturedEvent> {
    events
        .iter()
        .filter(|e| e.level == tracing::Level::WARN)
        .collect()
}
