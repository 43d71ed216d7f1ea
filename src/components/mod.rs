pub mod form;
pub mod relation_canvas;
