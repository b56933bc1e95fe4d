pub mod affect;
pub mod config_cmd;
pub mod replay;
pub mod search;
