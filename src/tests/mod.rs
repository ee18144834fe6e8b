mod config_tests;
mod fake_host;
mod inspector_tests;
