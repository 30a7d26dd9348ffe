mod basic_integration;
mod observe_integration;
