mod analyses;
mod config;
mod layouts;
