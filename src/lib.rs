//! formgrid: line-items table editor and form shell for business forms

pub mod cli;
pub mod config;
pub mod editor;
pub mod form;
pub mod form_tui;
pub mod models;
pub mod render;
pub mod storage;
pub mod submit;
