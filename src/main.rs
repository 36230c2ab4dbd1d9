use clap::Parser;
use faculty_hub::config::cli::{AdminCommand, Command};
use faculty_hub::core::csv_import::{self, TEMPLATE};
use faculty_hub::core::render;
use faculty_hub::domain::ports::Storage;
use faculty_hub::utils::error::ErrorSeverity;
use faculty_hub::utils::{logger, validation::Validate};
use faculty_hub::{
    AdminConsole, ApiClient, CliConfig, ClientConfig, Directory, FacultyForm, HubError,
    LocalStorage, Result, Session,
};
use std::io::Write;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let config = match ClientConfig::load(cli.config.as_deref(), &cli.overrides()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if config.log_json {
        logger::init_json_logger(cli.verbose, config.log_level.as_deref());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level.as_deref());
    }

    tracing::debug!("Effective config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(cli.command, &config).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(command: Command, config: &ClientConfig) -> Result<()> {
    let api = ApiClient::new(config)?;
    tracing::debug!("Using API at {}", api.base_url());

    match command {
        Command::List => {
            let directory = Directory::new(api);
            println!("{}", render::render_directory(&directory.browse("").await?));
        }
        Command::Search { query } => {
            let directory = Directory::new(api);
            println!("{}", render::render_directory(&directory.browse(&query).await?));
        }
        Command::Show { id } => {
            let directory = Directory::new(api);
            let faculty = directory.profile(id).await?;
            let now = chrono::Local::now().naive_local();
            println!("{}", render::render_profile(&faculty, now));
        }
        Command::Admin { command } => {
            let session = Session::new(LocalStorage::new(config.session_dir.clone()));
            run_admin(command, api, &session).await?;
        }
    }

    Ok(())
}

async fn run_admin(
    command: AdminCommand,
    api: ApiClient,
    session: &Session<LocalStorage>,
) -> Result<()> {
    let files = LocalStorage::new(".".to_string());

    match command {
        AdminCommand::Login { password } => {
            let password = match password {
                Some(password) => password,
                None => prompt("Password: ")?,
            };
            session.login(&api, &password).await?;
            println!("✅ Logged in");
        }
        AdminCommand::Logout => {
            session.logout().await?;
            println!("👋 Logged out");
        }
        AdminCommand::Template { output } => {
            files.write_file(&output, TEMPLATE.as_bytes()).await?;
            println!("📄 Template written to {}", output);
        }
        AdminCommand::Import {
            file,
            preview: true,
        } => {
            let text = read_text(&files, &file).await?;
            println!("{}", render::render_csv_preview(&csv_import::preview_csv(&text)?));
        }
        protected => {
            let token = session.require_token().await?;
            let admin = AdminConsole::new(api.with_token(token));
            run_protected(protected, &admin, &files).await?;
        }
    }

    Ok(())
}

async fn run_protected(
    command: AdminCommand,
    admin: &AdminConsole<ApiClient>,
    files: &LocalStorage,
) -> Result<()> {
    match command {
        AdminCommand::List => {}
        AdminCommand::Add {
            form: fields,
            details,
            scrape,
        } => {
            let mut form = FacultyForm::new();
            form.apply(&(&fields).into());
            if scrape {
                let scraped = admin.scrape(&mut form).await?;
                println!("{}\n", render::render_scrape_preview(&scraped));
            }
            form.apply_manual(details.into());
            let saved = admin.save(&form).await?;
            println!("✅ Added {} (id {})\n", saved.name, saved.id);
        }
        AdminCommand::Edit {
            id,
            form: fields,
            details,
            scrape,
        } => {
            let mut form = admin.open_edit(id).await?;
            form.apply(&(&fields).into());
            if scrape {
                let scraped = admin.scrape(&mut form).await?;
                println!("{}\n", render::render_scrape_preview(&scraped));
            }
            form.apply_manual(details.into());
            let saved = admin.save(&form).await?;
            println!("✅ Updated {} (id {})\n", saved.name, saved.id);
        }
        AdminCommand::Delete { id, yes } => {
            if !yes && !confirm("Are you sure you want to delete this faculty member?")? {
                println!("Cancelled");
                return Ok(());
            }
            admin.delete(id).await?;
            println!("🗑️  Deleted faculty {}\n", id);
        }
        AdminCommand::Scrape { linkedin, scholar } => {
            let scraped = admin
                .scrape_urls(linkedin.as_deref(), scholar.as_deref())
                .await?;
            println!("{}", render::render_scrape_preview(&scraped));
            return Ok(());
        }
        AdminCommand::Import { file, .. } => {
            let text = read_text(files, &file).await?;
            let report = admin.import_csv(&text).await?;
            println!("{}\n", render::render_import_report(&report));
        }
        AdminCommand::Login { .. } | AdminCommand::Logout | AdminCommand::Template { .. } => {
            return Ok(());
        }
    }

    // 每次變更後重新載入列表
    println!("{}", render::render_admin_list(&admin.faculty().await?));
    Ok(())
}

async fn read_text(files: &LocalStorage, path: &str) -> Result<String> {
    let bytes = files.read_file(path).await?;
    String::from_utf8(bytes).map_err(|e| HubError::CsvImportError {
        message: format!("{} is not valid UTF-8: {}", path, e),
    })
}

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn confirm(question: &str) -> Result<bool> {
    let answer = prompt(&format!("{} [y/N] ", question))?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
