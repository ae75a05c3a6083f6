mod quiz_assembler_test;
mod quiz_service_test;
mod run_tracker_test;
