use crate::client::KeyServer;
use crate::cmd::config::MsgrConfig;
use crate::cmd::Cmd;
use crate::error::MsgrError;
use crate::store::KeyStore;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

#[derive(Default)]
pub struct GetMsgCmd;

impl Cmd for GetMsgCmd {
    const NAME: &'static str = "getMsg";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .about("fetch a message for one of this machine's emails and decrypt it")
            .arg(
                Arg::new("email")
                    .value_name("EMAIL")
                    .action(ArgAction::Set)
                    .required(true)
                    .value_parser(value_parser!(String))
                    .help("to specify the email the message was sent to"),
            )
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let email = m.get_one::<String>("email").cloned().unwrap();

        let store = KeyStore::current()?;
        let private = store.load_private()?;
        if !private.knows(&email) {
            return Err(MsgrError::NotOurPeer(email).into());
        }

        let server = KeyServer::new(&MsgrConfig::config().server)?;
        let wire = server.message_get(&email)?;

        let plaintext = cipher::rsa::decrypt(&wire.content, &private)?;
        println!("{plaintext}");
        Ok(())
    }
}
