use crate::client::{KeyServer, WireMessage};
use crate::cmd::config::MsgrConfig;
use crate::cmd::Cmd;
use crate::store::KeyStore;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

#[derive(Default)]
pub struct SendMsgCmd;

impl Cmd for SendMsgCmd {
    const NAME: &'static str = "sendMsg";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .about("encrypt a message with a peer's stored key and send it")
            .arg(
                Arg::new("email")
                    .value_name("EMAIL")
                    .action(ArgAction::Set)
                    .required(true)
                    .value_parser(value_parser!(String))
                    .help("to specify the email of the receiver"),
            )
            .arg(
                Arg::new("message")
                    .value_name("MESSAGE")
                    .action(ArgAction::Set)
                    .required(true)
                    .value_parser(value_parser!(String))
                    .help("to specify the plaintext message"),
            )
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let (email, message) = (
            m.get_one::<String>("email").cloned().unwrap(),
            m.get_one::<String>("message").cloned().unwrap(),
        );

        let store = KeyStore::current()?;
        let peer = store.load_peer(&email)?;

        let content = cipher::rsa::encrypt(&message, &peer);
        let server = KeyServer::new(&MsgrConfig::config().server)?;
        server.message_put(
            &email,
            &WireMessage {
                email: email.clone(),
                content,
            },
        )?;

        log::info!("message sent to `{email}`");
        Ok(())
    }
}
