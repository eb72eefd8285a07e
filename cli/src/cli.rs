use std::path::PathBuf;

use certstore_s3::config::{ENV_S3_BUCKET, ENV_S3_PREFIX, ENV_S3_REGION};
use certstore_s3::{S3StorageConfig, PROVIDER_NAME};
use clap::{Args, Parser, Subcommand};
use url::Url;

pub const DEFAULT_CA_URL: &str = "https://acme-v02.api.letsencrypt.org/directory";

#[derive(Parser, Debug)]
#[command(
    name = "certstore",
    about = "Inspect and manage certificates kept in remote certificate storage",
    after_help = "Examples:\n  \
    certstore --s3-bucket my-certs site exists example.com\n  \
    certstore site import example.com --cert cert.pem --key key.pem\n  \
    certstore user show admin@example.com"
)]
pub struct Cli {
    #[command(flatten)]
    pub storage: StorageCliArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Parameters selecting the storage and the CA namespace inside it.
#[derive(Debug, Clone, Args)]
pub struct StorageCliArgs {
    /// Directory URL of the ACME CA. Its host name namespaces every stored key.
    #[arg(env = "CERTSTORE_CA_URL", long, global = true, default_value = DEFAULT_CA_URL)]
    pub ca_url: Url,

    /// Storage provider to use.
    #[arg(env = "CERTSTORE_PROVIDER", long, global = true, default_value = PROVIDER_NAME)]
    pub provider: String,

    #[command(flatten)]
    pub aws_s3: AWSS3CliArgs,
}

/// Parameters used to config AWS S3.
#[derive(Debug, Clone, Args)]
pub struct AWSS3CliArgs {
    /// The ARN / Name of the S3 bucket.
    #[arg(env = ENV_S3_BUCKET, long = "s3-bucket", global = true)]
    pub bucket_identifier: Option<String>,

    /// Sub-path inside the CA namespace.
    #[arg(env = ENV_S3_PREFIX, long = "s3-prefix", global = true)]
    pub prefix: Option<String>,

    /// Region of the bucket, when it differs from the AWS default.
    #[arg(env = ENV_S3_REGION, long = "s3-region", global = true)]
    pub region: Option<String>,
}

impl AWSS3CliArgs {
    /// The S3 configuration given on the command line, if a bucket was named.
    pub fn validated(&self) -> Option<S3StorageConfig> {
        let bucket = self.bucket_identifier.as_deref().filter(|bucket| !bucket.is_empty())?;
        let non_empty = |value: &Option<String>| value.clone().filter(|value| !value.is_empty());

        Some(S3StorageConfig {
            bucket: bucket.to_string(),
            prefix: non_empty(&self.prefix),
            region: non_empty(&self.region),
        })
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect or change site data
    Site {
        #[command(subcommand)]
        command: SiteCommand,
    },
    /// Inspect or change user data
    User {
        #[command(subcommand)]
        command: UserCommand,
    },
    /// List the available storage providers
    Providers,
}

#[derive(Subcommand, Debug)]
pub enum SiteCommand {
    /// Print whether site data is stored for a domain
    Exists { domain: String },
    /// Print the certificate stored for a domain
    Show { domain: String },
    /// Delete the site data of a domain
    Delete { domain: String },
    /// Store a certificate and key for a domain
    Import {
        domain: String,
        /// PEM encoded certificate chain
        #[arg(long)]
        cert: PathBuf,
        /// PEM encoded private key
        #[arg(long)]
        key: PathBuf,
        /// Issuer metadata
        #[arg(long)]
        meta: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Print the registration stored for an account
    Show { email: String },
    /// Store the registration and account key of an account
    Import {
        email: String,
        /// JSON encoded registration resource
        #[arg(long)]
        reg: PathBuf,
        /// PEM encoded account key
        #[arg(long)]
        key: PathBuf,
    },
    /// Print the most recently used account email, if the storage knows it
    MostRecent,
}
