use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use mtrack_core::VERSION;

/// Mtrack - repair and maintenance tracker for departmental machines
#[derive(Parser)]
#[command(name = "mtrack")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base URL of the tracker API
    #[arg(long, global = true, env = "MTRACK_API_URL", value_name = "URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use ASCII symbols only
    #[arg(long, global = true)]
    pub ascii: bool,

    /// Disable interactive prompts
    #[arg(long, global = true)]
    pub no_input: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Arguments for the `login` command
#[derive(Args)]
pub struct LoginArgs {
    /// Account name (prompted when omitted)
    #[arg(long, short)]
    pub username: Option<String>,
}

/// Arguments for the `register` command
#[derive(Args)]
pub struct RegisterArgs {
    /// Account name (prompted when omitted)
    #[arg(long, short)]
    pub username: Option<String>,
}

/// Arguments for the `whoami` command
#[derive(Args)]
pub struct WhoamiArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct MachinesArgs {
    #[command(subcommand)]
    pub command: MachinesSubcommand,
}

#[derive(Subcommand)]
pub enum MachinesSubcommand {
    /// List machines
    List(MachineListArgs),

    /// Add a machine
    Add(MachineAddArgs),
}

/// Arguments for the `machines list` command
#[derive(Args)]
pub struct MachineListArgs {
    /// Only machines whose name contains this text
    #[arg(long, short)]
    pub search: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format; overrides TTY detection
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Arguments for the `machines add` command
#[derive(Args)]
pub struct MachineAddArgs {
    /// Machine name
    #[arg(long)]
    pub name: Option<String>,

    /// Description
    #[arg(long)]
    pub description: Option<String>,

    /// Photo to upload
    #[arg(long, value_name = "PATH")]
    pub image: Option<String>,
}

#[derive(Args)]
pub struct RepairsArgs {
    #[command(subcommand)]
    pub command: RepairsSubcommand,
}

#[derive(Subcommand)]
pub enum RepairsSubcommand {
    /// Record a repair against a machine
    Add(RepairAddArgs),

    /// Show a repair by ID
    Show(RepairShowArgs),

    /// Change the price of a repair
    EditPrice(RepairEditPriceArgs),

    /// Delete a repair
    Delete(RepairDeleteArgs),

    /// List the repair-type catalog
    Types(RepairTypesArgs),
}

/// Arguments for the `repairs add` command
#[derive(Args)]
pub struct RepairAddArgs {
    /// Machine ID (selected interactively when omitted)
    #[arg(long, value_name = "ID")]
    pub machine: Option<String>,

    /// Repair type ID from the catalog
    #[arg(long = "type", value_name = "ID", conflicts_with = "custom")]
    pub repair_type: Option<String>,

    /// Free-text repair type
    #[arg(long, value_name = "LABEL")]
    pub custom: Option<String>,

    /// Price in the configured currency
    #[arg(long)]
    pub price: Option<String>,

    /// Description of the work
    #[arg(long)]
    pub description: Option<String>,
}

/// Arguments for the `repairs show` command
#[derive(Args)]
pub struct RepairShowArgs {
    /// Repair ID
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `repairs edit-price` command
#[derive(Args)]
pub struct RepairEditPriceArgs {
    /// Repair ID
    #[arg(value_name = "ID")]
    pub id: String,

    /// New price
    #[arg(long)]
    pub price: Option<String>,

    /// Skip the confirmation prompt
    #[arg(long, short)]
    pub yes: bool,
}

/// Arguments for the `repairs delete` command
#[derive(Args)]
pub struct RepairDeleteArgs {
    /// Repair ID
    #[arg(value_name = "ID")]
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short)]
    pub yes: bool,
}

/// Arguments for the `repairs types` command
#[derive(Args)]
pub struct RepairTypesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `report` command
#[derive(Args)]
pub struct ReportArgs {
    /// Only repairs added in this month (YYYY-MM)
    #[arg(long, value_name = "YYYY-MM")]
    pub month: Option<String>,

    /// Match repair type or machine name
    #[arg(long, short)]
    pub search: Option<String>,

    /// Report on a single machine, newest repairs first
    #[arg(long, value_name = "ID")]
    pub machine: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format; overrides TTY detection
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Tables and formatted amounts, even when piped
    Table,
    /// Space-separated rows and `key=value` lines
    Plain,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Jsonl,
}

/// Arguments for the `export` command
#[derive(Args)]
pub struct ExportArgs {
    /// Only repairs added in this month (YYYY-MM)
    #[arg(long, value_name = "YYYY-MM")]
    pub month: Option<String>,

    /// Match repair type or machine name
    #[arg(long, short)]
    pub search: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    pub format: ExportFormat,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the session
    Login(LoginArgs),

    /// Forget the stored session
    Logout,

    /// Create an account
    Register(RegisterArgs),

    /// Show the signed-in user
    Whoami(WhoamiArgs),

    /// Browse and add machines
    #[command(alias = "machine")]
    Machines(MachinesArgs),

    /// Record, edit and delete repairs
    #[command(alias = "repair")]
    Repairs(RepairsArgs),

    /// Repair costs per machine with a grand total
    Report(ReportArgs),

    /// Export the filtered report (portable formats)
    Export(ExportArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
