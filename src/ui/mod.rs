//! egui widgets for the viewer window.

pub mod panels;
pub mod plot;
