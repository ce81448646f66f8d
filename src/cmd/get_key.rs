use crate::client::KeyServer;
use crate::cmd::config::MsgrConfig;
use crate::cmd::Cmd;
use crate::store::KeyStore;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

#[derive(Default)]
pub struct GetKeyCmd;

impl Cmd for GetKeyCmd {
    const NAME: &'static str = "getKey";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .about("fetch a peer's public key and store it locally")
            .arg(
                Arg::new("email")
                    .value_name("EMAIL")
                    .action(ArgAction::Set)
                    .required(true)
                    .value_parser(value_parser!(String))
                    .help("to specify the email of the peer"),
            )
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let email = m.get_one::<String>("email").cloned().unwrap();

        let server = KeyServer::new(&MsgrConfig::config().server)?;
        let wire = server.key_get(&email)?;

        let store = KeyStore::current()?;
        store.save_peer(&email, &wire.key)?;
        log::info!("stored key for `{email}`");
        Ok(())
    }
}
