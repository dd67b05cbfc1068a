//! Presentation-independent UI
//!
//! Layout and pointer hit-testing for the HUD buttons.

pub mod layout;

pub use layout::{
    Button, ButtonAction, HudLayout, Label, LayoutStyle, Rect, TextMetrics, hit_test, layout,
};
