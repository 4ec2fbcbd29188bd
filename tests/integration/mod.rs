//! Integration tests for scc-bootstrap

mod merge_properties;
mod settings_loading;
mod test_utils;
