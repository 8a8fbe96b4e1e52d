//! FLTK widgets. Everything here only builds widgets and sends `Message`s;
//! `AppState` owns the behavior.

pub mod dialogs;
pub mod file_dialogs;
pub mod home;
pub mod main_window;
pub mod menu;
pub mod tab_bar;
pub mod toc_tree;
pub mod toolbar;
