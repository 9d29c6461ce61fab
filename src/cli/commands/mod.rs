pub mod expand;
pub mod lookup;
pub mod show_config;
pub mod test_rpc;
