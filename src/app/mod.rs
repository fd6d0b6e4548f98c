pub mod app_program;
pub mod config;
pub mod error;
pub mod event_async_task_manager;
pub mod event_msg;
pub mod event_sync_subscriptions;
pub mod fixture;
pub mod logger;
pub mod sync_simulator;
pub mod tea_model;
pub mod tea_update;
pub mod tea_view;
pub mod terminal;
pub mod ui_components;
pub mod view_model_context;
