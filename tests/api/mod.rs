mod http_tests;
mod membership_tests;
