use crate::config::ConfigOverrides;
use crate::core::csv_import::TEMPLATE_FILE_NAME;
use crate::core::form::{FormChanges, ManualEntry};
use crate::domain::model::{Certification, ExperienceItem, Project};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "faculty-hub")]
#[command(about = "Browse and administer the faculty hub directory")]
pub struct CliConfig {
    /// Path to a TOML configuration file (default: ./faculty-hub.toml when present)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Base URL of the faculty hub API
    #[arg(long, global = true, env = "FACULTY_HUB_API_URL")]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Directory holding the admin session token
    #[arg(long, global = true, env = "FACULTY_HUB_SESSION_DIR")]
    pub session_dir: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List every faculty member
    List,
    /// Search by name, department, research area or keyword
    Search { query: String },
    /// Show a faculty profile
    Show { id: i64 },
    /// Password-protected administration
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum AdminCommand {
    /// Log in and store the session token
    Login {
        #[arg(long, env = "FACULTY_HUB_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the stored session token
    Logout,
    /// List faculty with their ids
    List,
    /// Add a faculty member
    Add {
        #[command(flatten)]
        form: FormArgs,
        #[command(flatten)]
        details: DetailArgs,
        /// Fill profile details from the LinkedIn / Google Scholar URLs
        #[arg(long)]
        scrape: bool,
    },
    /// Edit a faculty member; omitted fields keep their current value
    Edit {
        id: i64,
        #[command(flatten)]
        form: FormArgs,
        #[command(flatten)]
        details: DetailArgs,
        #[arg(long)]
        scrape: bool,
    },
    /// Delete a faculty member
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Preview what the server scrapes from profile URLs
    Scrape {
        #[arg(long)]
        linkedin: Option<String>,
        #[arg(long)]
        scholar: Option<String>,
    },
    /// Import faculty from a CSV file
    Import {
        file: String,
        /// Only show the first rows of the file
        #[arg(long)]
        preview: bool,
    },
    /// Write the CSV import template
    Template {
        #[arg(short, long, default_value = TEMPLATE_FILE_NAME)]
        output: String,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct FormArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long, visible_alias = "title")]
    pub designation: Option<String>,
    #[arg(long)]
    pub department: Option<String>,
    #[arg(long = "office")]
    pub office_location: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long = "linkedin")]
    pub linkedin_url: Option<String>,
    #[arg(long = "scholar")]
    pub google_scholar_url: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct DetailArgs {
    #[arg(long = "picture")]
    pub profile_picture_url: Option<String>,
    #[arg(long)]
    pub headline: Option<String>,
    /// Repeatable
    #[arg(long, value_name = "POSITION|COMPANY[|DURATION]")]
    pub experience: Vec<ExperienceItem>,
    /// Repeatable
    #[arg(long, value_name = "TITLE[|DESCRIPTION]")]
    pub project: Vec<Project>,
    /// Repeatable
    #[arg(long, value_name = "NAME[|ISSUER]")]
    pub certification: Vec<Certification>,
    /// Drop existing experience, projects and certifications first
    #[arg(long)]
    pub clear_lists: bool,
}

impl From<&FormArgs> for FormChanges {
    fn from(args: &FormArgs) -> Self {
        Self {
            name: args.name.clone(),
            designation: args.designation.clone(),
            department: args.department.clone(),
            office_location: args.office_location.clone(),
            email: args.email.clone(),
            linkedin_url: args.linkedin_url.clone(),
            google_scholar_url: args.google_scholar_url.clone(),
        }
    }
}

impl From<DetailArgs> for ManualEntry {
    fn from(args: DetailArgs) -> Self {
        Self {
            profile_picture_url: args.profile_picture_url,
            headline: args.headline,
            experience: args.experience,
            projects: args.project,
            certifications: args.certification,
            clear_lists: args.clear_lists,
        }
    }
}

impl CliConfig {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            api_base_url: self.api_url.clone(),
            timeout_seconds: self.timeout,
            session_dir: self.session_dir.clone(),
            log_json: self.log_json,
        }
    }
}
