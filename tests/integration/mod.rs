mod config_layering;
mod file_facility;
mod support;
