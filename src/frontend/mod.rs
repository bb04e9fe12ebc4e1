//! Frontend module for the `SurveyConsole` application.

pub mod assets;
pub mod components;
pub mod pages;
pub mod services;
