use crate::cmd::config::MsgrConfig;
use crate::cmd::Cmd;
use crate::store::KeyStore;
use cipher::KeyFactory;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

#[derive(Default)]
pub struct KeyGenCmd;

impl Cmd for KeyGenCmd {
    const NAME: &'static str = "keyGen";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .about("generate a key pair and store it on this machine")
            .arg(
                Arg::new("bits")
                    .value_name("BITS")
                    .action(ArgAction::Set)
                    .required(true)
                    .value_parser(value_parser!(usize))
                    .help("to specify the key pair modulus bits length, a multiple of 8"),
            )
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let bits = m.get_one::<usize>("bits").copied().unwrap();
        anyhow::ensure!(
            bits >= 16 && bits % 8 == 0,
            "keysize must be a multiple of 8, at least 16, got {bits}"
        );

        let cfg = MsgrConfig::config();
        let (public, private) = KeyFactory::new()
            .workers(cfg.threads)
            .test_rounds(cfg.test_rounds)
            .generate_key_pair(bits);

        let store = KeyStore::current()?;
        store.save_public(&public)?;
        store.save_private(&private)?;
        log::info!(
            "generated a {bits}-bit key pair under `{}`",
            store.dir().display()
        );

        Ok(())
    }
}
