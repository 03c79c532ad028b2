mod filter_test;
mod submission_flow_test;
