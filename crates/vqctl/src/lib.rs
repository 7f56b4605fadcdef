use anyhow::Context;
use virtual_queue::{Client, HttpTransport, Resort, TokenProvider};

mod config;
mod join;
mod output;

pub use config::Config;
use output::Output;

/// A command-line tool for joining theme-park virtual queues.
#[derive(Debug, clap::Parser)]
#[clap(author, about, version)]
pub struct Cli {
    /// Configuration profile to use.
    ///
    /// Profiles are distinct configurations of the `vqctl` tool, and are
    /// completely optional. Use multiple profiles to track multiple accounts
    /// or resorts.
    #[clap(long, default_value = "default", env = "VQCTL_PROFILE")]
    profile: String,

    /// Resort whose virtual queues are used (WDW or DL).
    #[clap(long, global = true, env = "VQCTL_RESORT")]
    resort: Option<Resort>,

    /// Origin of an alternative virtual-queue service.
    #[clap(long, global = true, env = "VQCTL_ORIGIN")]
    origin: Option<url::Url>,

    /// Access token of the user.
    #[clap(long, global = true, env = "VQCTL_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    #[clap(subcommand)]
    cmd: Command,

    #[clap(flatten)]
    output: Output,
}

#[derive(Debug, clap::Subcommand)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// Store an access token and resort in the profile.
    Auth(Auth),
    /// List the virtual queues of the resort.
    Queues,
    /// List the guests which may join a queue.
    Guests {
        /// ID of the queue.
        queue_id: String,
    },
    /// Join guests to a queue as a single party.
    ///
    /// Guests who can't join are removed from the party, and the remaining
    /// guests are resubmitted until the party obtains a boarding group.
    /// Rejected guests are listed along with the reason for their rejection.
    Join(join::Join),
}

#[derive(Debug, clap::Args)]
pub struct Auth {
    /// Access token to store.
    #[clap(long)]
    token: String,
}

impl Auth {
    /// Store the token, and `resort` if given, into `config`,
    /// returning a confirmation for the user.
    fn apply(&self, config: &mut Config, resort: Option<Resort>, profile: &str) -> String {
        config.access_token = Some(self.token.clone());
        if let Some(resort) = resort {
            config.resort = Some(resort);
            config.origin = None;
        }
        format!("Configured access token for profile {profile:?}.")
    }
}

#[derive(Debug)]
pub struct CliContext {
    config: Config,
    output: Output,
}

/// ConfiguredToken provides the access token of the CLI configuration,
/// failing requests which require one if none is configured.
#[derive(Clone)]
pub struct ConfiguredToken(Option<String>);

impl TokenProvider for ConfiguredToken {
    async fn access_token(&self) -> anyhow::Result<String> {
        self.0
            .clone()
            .context("You must run `vqctl auth --token <TOKEN>` first")
    }
}

impl CliContext {
    pub fn client(&self) -> Client<HttpTransport, ConfiguredToken> {
        Client::with_origin(
            self.config.origin(),
            HttpTransport::default(),
            ConfiguredToken(self.config.access_token.clone()),
        )
    }

    pub fn output_type(&self) -> output::OutputType {
        self.output.output_type()
    }
}

impl Cli {
    pub async fn run(&self) -> anyhow::Result<()> {
        let mut config = Config::load(&self.profile)?;

        if let Command::Auth(auth) = &self.cmd {
            let confirmation = auth.apply(&mut config, self.resort, &self.profile);
            config.write(&self.profile)?;

            println!("{confirmation}");
            return Ok(());
        }

        // Arguments override, but don't update, the stored profile.
        if self.resort.is_some() {
            config.resort = self.resort;
            config.origin = None;
        }
        if self.origin.is_some() {
            config.origin = self.origin.clone();
        }
        if self.access_token.is_some() {
            config.access_token = self.access_token.clone();
        }

        let ctx = CliContext {
            config,
            output: self.output.clone(),
        };

        match &self.cmd {
            Command::Auth(_) => Ok(()),
            Command::Queues => {
                let queues = ctx
                    .client()
                    .get_queues()
                    .await
                    .context("failed to list queues")?;
                output::print_all(ctx.output_type(), queues)
            }
            Command::Guests { queue_id } => {
                let guests = ctx
                    .client()
                    .get_linked_guests(queue_id)
                    .await
                    .with_context(|| format!("failed to list guests of queue {queue_id}"))?;
                output::print_all(ctx.output_type(), guests)
            }
            Command::Join(join) => join.run(&ctx).await,
        }
    }
}
