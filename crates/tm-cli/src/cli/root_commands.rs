use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};
use tm_core::enums::FileType;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP API server
    Serve(ServeArgs),
    /// Create or upgrade the database schema, then exit
    Migrate,
    /// Print mock results for template ids without touching the database
    Generate(GenerateArgs),
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Interface to bind (overrides server.host)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind (overrides server.port)
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Template id to generate samples for; repeat for several, order is kept
    #[arg(long = "template-id", required = true, num_args = 1..)]
    pub template_ids: Vec<i64>,

    /// Restrict samples to one file type
    #[arg(long, value_enum)]
    pub file_type: Option<FileTypeArg>,

    /// Earliest sample date (YYYY-MM-DD, not in the future)
    #[arg(long)]
    pub date_from: Option<NaiveDate>,

    /// Latest sample date (YYYY-MM-DD, not in the future)
    #[arg(long)]
    pub date_to: Option<NaiveDate>,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Omit created_at and file_type from samples
    #[arg(long, conflicts_with_all = ["file_type", "date_from", "date_to"])]
    pub plain: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum FileTypeArg {
    Pdf,
    Image,
}

impl From<FileTypeArg> for FileType {
    fn from(arg: FileTypeArg) -> Self {
        match arg {
            FileTypeArg::Pdf => Self::Pdf,
            FileTypeArg::Image => Self::Image,
        }
    }
}
