use clap::Parser;
use localvault::cli::commands::{add::AddArgs, edit::EditArgs};
use localvault::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    // Completions need neither config nor logging.
    if let Commands::Completions { shell } = cli.command {
        localvault::cli::commands::completions::execute(shell);
        return;
    }

    let settings = match localvault::cli::load_settings(&cli) {
        Ok(s) => s,
        Err(e) => {
            localvault::cli::output::error(&e.to_string());
            std::process::exit(1);
        }
    };
    localvault::logging::init(&settings.log_level);

    let result = match cli.command {
        Commands::Init { ref name } => {
            localvault::cli::commands::init::execute(&cli, &settings, name.as_deref())
        }
        Commands::Add {
            ref title,
            ref username,
            ref url,
            ref notes,
            generate,
            length,
        } => localvault::cli::commands::add::execute(
            &cli,
            &settings,
            &AddArgs {
                title,
                username,
                url,
                notes,
                generate,
                length,
            },
        ),
        Commands::Get { id, ref field } => {
            localvault::cli::commands::get::execute(&cli, &settings, id, field)
        }
        Commands::List { ref search, recent } => {
            localvault::cli::commands::list::execute(&cli, &settings, search.as_deref(), recent)
        }
        Commands::Edit {
            id,
            ref title,
            ref username,
            ref url,
            ref notes,
            password,
            generate,
            length,
        } => localvault::cli::commands::edit::execute(
            &cli,
            &settings,
            id,
            &EditArgs {
                title: title.as_deref(),
                username: username.as_deref(),
                url: url.as_deref(),
                notes: notes.as_deref(),
                prompt_password: password,
                generate,
                length,
            },
        ),
        Commands::Delete { id, force } => {
            localvault::cli::commands::delete::execute(&cli, &settings, id, force)
        }
        Commands::Generate { length } => {
            localvault::cli::commands::generate::execute(&settings, length)
        }
        Commands::Setting { ref action } => {
            localvault::cli::commands::setting::execute(&cli, &settings, action)
        }
        Commands::Vaults { ref action } => {
            localvault::cli::commands::vaults::execute(&cli, &settings, action)
        }
        Commands::Completions { .. } => Ok(()),
    };

    if let Err(e) = result {
        localvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
