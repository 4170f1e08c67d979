pub mod commands;
pub mod parser;
pub mod path_list;
pub mod state;
