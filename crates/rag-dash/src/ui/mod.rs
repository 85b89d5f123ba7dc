//! UI module - TUI rendering components.
//!
//! Rendering reads a [`DashboardView`](crate::domain::DashboardView)
//! snapshot and never touches the backend:
//! - `layout.rs`: Main layout orchestration
//! - `health_panel.rs`: Health strip
//! - `search_panel.rs`, `rag_panel.rs`, `documents_panel.rs`: Feature panels
//! - `format.rs`: Text shaping shared by the TUI and the one-shot commands
//! - `widgets/`: Reusable UI components

mod documents_panel;
mod health_panel;
mod layout;
mod rag_panel;
mod search_panel;

pub mod format;
pub mod widgets;

pub use layout::render;
