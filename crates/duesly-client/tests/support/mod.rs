pub mod triage_testkit;
