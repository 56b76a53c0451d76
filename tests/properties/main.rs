mod portfolio_tests;
mod search_tests;
