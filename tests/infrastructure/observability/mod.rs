mod request_context_test;
mod tracing_config_test;
