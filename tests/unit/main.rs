mod cli_command_parse_tests;
mod config_tests;
mod render_tests;
mod search_tests;
mod storage_tests;
