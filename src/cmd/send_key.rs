use crate::client::{KeyServer, WireKey};
use crate::cmd::config::MsgrConfig;
use crate::cmd::Cmd;
use crate::store::KeyStore;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

#[derive(Default)]
pub struct SendKeyCmd;

impl Cmd for SendKeyCmd {
    const NAME: &'static str = "sendKey";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .about("register the local public key with the server under an email")
            .arg(
                Arg::new("email")
                    .value_name("EMAIL")
                    .action(ArgAction::Set)
                    .required(true)
                    .value_parser(value_parser!(String))
                    .help("to specify the email to register the key under"),
            )
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let email = m.get_one::<String>("email").cloned().unwrap();

        let store = KeyStore::current()?;
        let public = store.load_public()?;

        let server = KeyServer::new(&MsgrConfig::config().server)?;
        server.key_put(
            &email,
            &WireKey {
                email: email.clone(),
                key: public.encode64(),
            },
        )?;

        // the private key may now decode messages addressed to `email`
        let mut private = store.load_private()?;
        private.add_email(&email);
        store.save_private(&private)?;

        log::info!("key registered for `{email}`");
        Ok(())
    }
}
