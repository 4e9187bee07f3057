pub mod app;

pub mod event;

pub mod ui;

pub mod tui;

pub mod handler;

pub mod config;

pub mod notification;

pub mod cli;

pub mod headless;

pub mod credential;

pub mod payload;

pub mod query;

pub mod qr;

pub mod pdf;

pub mod export;

pub mod command;

pub mod clipboard;

pub mod theme;

pub mod form;

pub mod share;
