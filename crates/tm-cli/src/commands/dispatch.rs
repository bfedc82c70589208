use crate::bootstrap;
use crate::cli::{Commands, GlobalFlags};
use crate::commands;

/// Route a parsed command to its handler.
pub async fn dispatch(command: Commands, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Generate(args) => commands::generate::handle(&args, flags),
        Commands::Migrate => {
            let config = bootstrap::load_config(flags)?;
            commands::migrate::handle(&config, flags).await
        }
        Commands::Serve(args) => {
            let config = bootstrap::load_config(flags)?;
            commands::serve::handle(&args, config).await
        }
    }
}
