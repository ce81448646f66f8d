use clap::{ArgMatches, Command};

pub trait Cmd {
    const NAME: &'static str;

    fn cmd() -> Command;

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()>;
}

pub mod config;

mod key_gen;
pub use key_gen::KeyGenCmd;

mod send_key;
pub use send_key::SendKeyCmd;

mod get_key;
pub use get_key::GetKeyCmd;

mod send_msg;
pub use send_msg::SendMsgCmd;

mod get_msg;
pub use get_msg::GetMsgCmd;
