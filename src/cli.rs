use clap::{Parser, Subcommand};

#[derive(Debug, Parser, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct CLI {
    #[command(subcommand)]
    pub(crate) command: PackitCommand,
}

#[derive(Debug, Subcommand, Clone, PartialEq)]
pub enum PackitCommand {
    /// Initialize a new package from an installed template
    Init {
        /// Package name (prompted for when omitted)
        #[clap(short, long)]
        name: Option<String>,
        /// Template to scaffold from (prompted for when omitted)
        #[clap(short, long)]
        template: Option<String>,
        /// Overwrite the target directory if it already exists
        #[clap(short, long)]
        force: bool,
        /// Skip interactive prompts and use defaults
        #[clap(short, long)]
        skip: bool,
    },
    /// Authenticate using an access token from the web dashboard
    Login {
        /// Access token obtained from the web dashboard
        token: String,
    },
    /// Logout of the current session
    Logout,
    /// Manage your uploaded packages
    Package {
        #[command(subcommand)]
        task: PackageTask,
    },
    /// Print the current CLI version
    Version,
}

#[derive(Debug, Subcommand, Clone, PartialEq)]
pub enum PackageTask {
    /// Flatten the current project and upload it under the manifest's name and version
    Upload,
    /// Remove an uploaded package, by explicit name and version or from the local manifest
    Remove {
        /// Package name (requires --version)
        #[clap(short, long)]
        name: Option<String>,
        /// Package version (requires --name)
        #[clap(short, long)]
        version: Option<String>,
    },
    /// List the packages uploaded to your account
    List,
}
