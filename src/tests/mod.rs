mod router_tests;
mod schema_tests;
