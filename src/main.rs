use std::io;

use anyhow::Result;
use clap::{Parser, Subcommand};

use budget_split::cli::{
    handle_audit_command, handle_budget_command, handle_category_command, handle_expense_command,
    handle_export_command, handle_family_command, handle_income_command, handle_plan_command,
    handle_report_command, handle_structure_command, Session,
};
use budget_split::config::{resolve_current_user, Settings, SplitPaths};
use budget_split::models::UserId;
use budget_split::setup::{Prompter, SetupWizard};
use budget_split::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "split",
    version,
    about = "Percentage-based budgeting from the terminal",
    long_about = "budget-split divides your monthly income between Necesidades, \
                  Gustos and Ahorro. Move one percentage and the others rescale \
                  so the split always adds up to 100%."
)]
struct Cli {
    /// Act as this user (as reported by your identity provider)
    #[arg(long, global = true, env = "BUDGET_SPLIT_USER")]
    user: Option<String>,

    /// Work on another user's data (requires a family grant)
    #[arg(long, global = true)]
    owner: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and default categories
    Init,

    /// Remember which user is signed in
    Login {
        /// User id from the identity provider
        user_id: String,
    },

    /// Forget the signed-in user
    Logout,

    /// Interactive first-run setup
    Setup,

    /// Show current configuration and paths
    Config,

    /// Show and edit the percentage split
    #[command(subcommand)]
    Structure(budget_split::cli::StructureCommands),

    /// Category commands
    #[command(subcommand)]
    Category(budget_split::cli::CategoryCommands),

    /// Income source commands
    #[command(subcommand)]
    Income(budget_split::cli::IncomeCommands),

    /// Monthly budget commands
    #[command(subcommand)]
    Budget(budget_split::cli::BudgetCommands),

    /// Planned spending commands
    #[command(subcommand)]
    Plan(budget_split::cli::PlanCommands),

    /// Expense commands
    #[command(subcommand)]
    Expense(budget_split::cli::ExpenseCommands),

    /// Reports
    #[command(subcommand)]
    Report(budget_split::cli::ReportCommands),

    /// Family sharing
    #[command(subcommand)]
    Family(budget_split::cli::FamilyCommands),

    /// Export data
    #[command(subcommand)]
    Export(budget_split::cli::ExportCommands),

    /// Show recent changes
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Include changes made by other users
        #[arg(long)]
        all: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = SplitPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let Some(command) = cli.command else {
        println!("budget-split - percentage-based budgeting");
        println!();
        println!("Run 'split --help' for usage information.");
        if SetupWizard::new(paths).needs_setup(&settings) {
            println!("Run 'split setup' to get started.");
        }
        return Ok(());
    };

    match &command {
        Commands::Init => {
            println!("Initializing budget-split at: {}", paths.base_dir().display());
            initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Default categories have been created:");
            println!("  - Necesidades (50%)");
            println!("  - Gustos (30%)");
            println!("  - Ahorro (20%)");
            println!();
            println!("Run 'split login <user-id>' and then 'split structure show'.");
            return Ok(());
        }
        Commands::Login { user_id } => {
            let user_id = user_id.trim();
            if user_id.is_empty() {
                anyhow::bail!("User id cannot be empty");
            }
            settings.current_user = Some(UserId::new(user_id));
            settings.save(&paths)?;
            println!("Signed in as {}", user_id);
            return Ok(());
        }
        Commands::Logout => {
            settings.current_user = None;
            settings.save(&paths)?;
            println!("Signed out.");
            return Ok(());
        }
        Commands::Config => {
            println!("budget-split configuration");
            println!("==========================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!();
            println!("Settings:");
            match &settings.current_user {
                Some(user) => println!("  Signed in as:   {}", user),
                None => println!("  Signed in as:   (nobody)"),
            }
            println!("  Default preset: {}", settings.default_preset);
            println!("  Setup done:     {}", settings.setup_completed);
            return Ok(());
        }
        _ => {}
    }

    // Initialize storage
    initialize_storage(&paths)?;
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    if let Commands::Setup = command {
        let suggested = resolve_current_user(cli.user.as_deref(), &settings).ok();
        let wizard = SetupWizard::new(paths);
        let stdin = io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), io::stdout());
        wizard.run(&mut storage, &mut settings, &mut prompter, suggested.as_ref())?;
        return Ok(());
    }

    let actor = resolve_current_user(cli.user.as_deref(), &settings)?;
    storage.set_actor(actor.clone());
    let session = Session::new(actor, cli.owner.map(UserId::new));

    match command {
        Commands::Structure(cmd) => handle_structure_command(&storage, &settings, &session, cmd)?,
        Commands::Category(cmd) => handle_category_command(&storage, cmd)?,
        Commands::Income(cmd) => handle_income_command(&storage, &session, cmd)?,
        Commands::Budget(cmd) => handle_budget_command(&storage, &session, cmd)?,
        Commands::Plan(cmd) => handle_plan_command(&storage, &session, cmd)?,
        Commands::Expense(cmd) => handle_expense_command(&storage, &session, cmd)?,
        Commands::Report(cmd) => handle_report_command(&storage, &session, cmd)?,
        Commands::Family(cmd) => handle_family_command(&storage, &session, cmd)?,
        Commands::Export(cmd) => handle_export_command(&storage, &session, cmd)?,
        Commands::Audit { limit, all } => handle_audit_command(&storage, &session, limit, all)?,
        Commands::Init
        | Commands::Login { .. }
        | Commands::Logout
        | Commands::Config
        | Commands::Setup => {}
    }

    Ok(())
}
