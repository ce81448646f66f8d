use clap::Command;
use log::LevelFilter;
use msgr::cmd::{Cmd, GetKeyCmd, GetMsgCmd, KeyGenCmd, SendKeyCmd, SendMsgCmd};

fn main() {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let app = Command::new("msgr")
        .version(env!("CARGO_PKG_VERSION"))
        .about("RSA key exchange and secure messages")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(KeyGenCmd::cmd())
        .subcommand(SendKeyCmd::cmd())
        .subcommand(GetKeyCmd::cmd())
        .subcommand(SendMsgCmd::cmd())
        .subcommand(GetMsgCmd::cmd())
        .get_matches();

    let result = match app.subcommand() {
        Some((KeyGenCmd::NAME, m)) => KeyGenCmd.run(m),
        Some((SendKeyCmd::NAME, m)) => SendKeyCmd.run(m),
        Some((GetKeyCmd::NAME, m)) => GetKeyCmd.run(m),
        Some((SendMsgCmd::NAME, m)) => SendMsgCmd.run(m),
        Some((GetMsgCmd::NAME, m)) => GetMsgCmd.run(m),
        _ => unreachable!("subcommand is required"),
    };

    if let Err(e) = result {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}
